// Mon Oct 19 2026 - Alex

use crate::quantity::QuantityError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HotplugError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Quantity error: {0}")]
    Quantity(#[from] QuantityError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, HotplugError>;
