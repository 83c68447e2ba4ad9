use thiserror::Error;

use crate::form::FormError;
use crate::projection::Extent;

#[derive(Debug, Error, PartialEq)]
pub enum PlannerError {
    #[error("Please select at least two locations.")]
    InsufficientSelection { selected: usize },
    #[error(transparent)]
    InvalidInput(#[from] FormError),
    #[error("routing service failure: {0}")]
    RoutingServiceFailure(String),
    #[error("invalid extent for route geometry: {0:?}")]
    DegenerateGeometry(Extent),
}
