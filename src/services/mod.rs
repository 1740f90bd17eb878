//! Services turning requests into page data, one module per page family.
use thiserror::Error;

use crate::domain::query::QueryError;
use crate::domain::types::TypeConstraintError;
use crate::repository::errors::ApiError;

pub mod api;
pub mod overview;
pub mod resource;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("invalid query: {0}")]
    InvalidQuery(#[from] QueryError),

    #[error("not found: {0}")]
    NotFound(#[from] TypeConstraintError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
