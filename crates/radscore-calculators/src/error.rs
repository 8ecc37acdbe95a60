use thiserror::Error;

use radscore_core::error::ValidationError;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("unknown calculator: {0}")]
    UnknownCalculator(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
