//! Error types for battle setup and reporting
//!
//! Normal play never fails: unknown ids, unaffordable cards and thin samples
//! degrade silently. These variants cover the few inputs that are rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BalanceError {
    /// A hero capacity is zero or negative
    #[error("hero {hero} has invalid {field}: {value} (must be positive)")]
    InvalidHeroSettings { hero: u8, field: String, value: i32 },
    /// Batch configuration cannot produce any battle
    #[error("invalid batch configuration: {reason}")]
    InvalidBatchConfig { reason: String },
    /// Range grid with no cells
    #[error("bucket counts must be positive (health {health}, resource {resource})")]
    InvalidBuckets { health: u32, resource: u32 },
}

/// Result type alias for fallible balance operations
pub type BalanceResult<T> = Result<T, BalanceError>;
