#[derive(Debug)]
pub enum TrajectoryError {
    Csv(csv::Error),
}

impl From<csv::Error> for TrajectoryError {
    fn from(value: csv::Error) -> Self {
        TrajectoryError::Csv(value)
    }
}
