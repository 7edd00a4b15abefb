//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval > 0, port non-zero)
//! - Check the bind address actually parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: `ServiceConfig → Result<(), Vec<ValidationError>>`
//! - Runs before a config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("listener.bind_address must use a non-zero port")]
    ZeroPort,

    #[error("heartbeat.interval_ms must be greater than zero")]
    ZeroInterval,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.enabled {
        match config.listener.bind_address.parse::<SocketAddr>() {
            Ok(addr) if addr.port() == 0 => errors.push(ValidationError::ZeroPort),
            Ok(_) => {}
            Err(_) => errors.push(ValidationError::InvalidBindAddress(
                config.listener.bind_address.clone(),
            )),
        }
    }

    if config.heartbeat.interval_ms == 0 {
        errors.push(ValidationError::ZeroInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
