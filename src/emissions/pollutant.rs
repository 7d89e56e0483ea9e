use strum::{Display, EnumIter};

/// The four pollutant species the estimator reports. Display names follow
/// the conventional column labels of emissions tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, Display, EnumIter)]
pub enum Pollutant {
    #[strum(serialize = "CO_2")]
    #[serde(rename = "CO_2")]
    Co2,
    #[strum(serialize = "NO_x")]
    #[serde(rename = "NO_x")]
    Nox,
    #[strum(serialize = "PM")]
    #[serde(rename = "PM")]
    Pm,
    #[strum(serialize = "VOC")]
    #[serde(rename = "VOC")]
    Voc,
}

impl Pollutant {
    pub const COUNT: usize = 4;
}

/// Selects which published coefficient set the estimator evaluates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, Display, EnumIter)]
pub enum FuelType {
    #[default]
    Petrol,
    Diesel,
    Lpg,
}
