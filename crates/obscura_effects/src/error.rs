//! Error types for obscura_effects

use obscura_animation::AnimationError;
use thiserror::Error;

/// Errors that can occur while wiring or driving page effects
#[derive(Error, Debug)]
pub enum EffectError {
    /// A session could not be started
    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    /// Configuration values out of range
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration text could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A counter's `data-count` value has no leading integer
    #[error("Invalid counter value: {0:?}")]
    InvalidCount(String),

    /// An event referenced an element the page does not have
    #[error("No {kind} at index {index}")]
    MissingElement { kind: &'static str, index: usize },
}

/// Result type for effect operations
pub type Result<T> = std::result::Result<T, EffectError>;
