#![doc = include_str!("../README.md")]

pub mod aggregate;
pub mod analysis;
pub mod emissions;
pub mod kinematics;
pub mod network;
pub mod trajectory;
#[doc(hidden)]
pub mod util;
pub mod visual;

#[doc(inline)]
pub use analysis::{Analysis, AnalysisTables, Config};

use crate::aggregate::error::AggregateError;
use crate::emissions::error::EmissionsError;
use crate::network::error::NetworkError;
use crate::trajectory::error::TrajectoryError;
use crate::visual::error::VisualError;

/// Crate-level error, wrapping each module's own error type.
#[derive(Debug)]
pub enum Error {
    Network(NetworkError),
    Trajectory(TrajectoryError),
    Emissions(EmissionsError),
    Aggregate(AggregateError),
    Visual(VisualError),
}

pub type Result<T> = std::result::Result<T, Error>;

crate::impl_err!(NetworkError, Network);
crate::impl_err!(TrajectoryError, Trajectory);
crate::impl_err!(EmissionsError, Emissions);
crate::impl_err!(AggregateError, Aggregate);
crate::impl_err!(VisualError, Visual);
