//! Error types for the configuration and lifecycle interfaces.
//!
//! The simulation itself has no failure modes: generation guarantees keep
//! the entity sets well-formed and the gravity singularity is clamped away.
//! What can go wrong is input from the outside world: a settings value that
//! isn't a number, or a lifecycle signal arriving in the wrong phase.

use std::fmt;

use crate::sim::GamePhase;

/// Rejected settings update
#[derive(Debug)]
pub enum SettingsError {
    /// No tunable with this name
    UnknownSetting { name: String },
    /// Value didn't parse as a finite number
    InvalidNumber { name: &'static str, raw: String },
    /// Settings document wasn't valid JSON for [`crate::Settings`]
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::UnknownSetting { name } => write!(f, "unknown setting '{}'", name),
            SettingsError::InvalidNumber { name, raw } => {
                write!(f, "setting '{}' expects a number, got '{}'", name, raw)
            }
            SettingsError::Json(e) => write!(f, "invalid settings document: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

/// Lifecycle signal that doesn't apply to the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    InvalidTransition {
        from: GamePhase,
        signal: &'static str,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidTransition { from, signal } => {
                write!(f, "cannot {} while {:?}", signal, from)
            }
        }
    }
}

impl std::error::Error for SessionError {}

pub type SettingsResult<T> = Result<T, SettingsError>;
pub type SessionResult<T> = Result<T, SessionError>;
