//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use relay_proto::MAX_FRAME_LEN;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("limits.max_frame_len must be between 1 and {MAX_FRAME_LEN}, got {0}")]
    MaxFrameLen(usize),
    /// A bounded outbound queue needs a capacity of at least one.
    #[error("limits.outbound_queue must be at least 1, got {0}")]
    OutboundQueue(usize),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.trim().is_empty() {
        errors.push(ValidationError::MissingServerName);
    }

    let max_frame_len = config.limits.max_frame_len;
    if !(1..=MAX_FRAME_LEN).contains(&max_frame_len) {
        errors.push(ValidationError::MaxFrameLen(max_frame_len));
    }

    if config.limits.outbound_queue == 0 {
        errors.push(ValidationError::OutboundQueue(0));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
