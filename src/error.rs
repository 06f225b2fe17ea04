//! Error types for resource managers.
//!
//! Missing resources are recoverable; a missing loader is a setup bug and is
//! never papered over by a caller-supplied default.

use thiserror::Error;

/// Errors returned by [`ResourceManager`](crate::ResourceManager) lookups and loads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("Resource '{handle}' is not handled by manager '{manager}'.{}", did_you_mean(.suggestion))]
    NotRegistered {
        manager: String,
        handle: String,
        suggestion: Option<String>,
    },

    #[error("Resource '{handle}' failed to load in manager '{manager}'.")]
    LoadFailed { manager: String, handle: String },

    #[error("No loader function assigned to manager '{manager}'. You must configure a loader before loading.")]
    LoaderNotConfigured { manager: String },
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" Did you mean '{}'?", s),
        None => String::new(),
    }
}

impl ResourceError {
    /// Returns true if a default value or re-registration can recover from this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotRegistered { .. } | Self::LoadFailed { .. })
    }

    /// Closest registered handle, for `NotRegistered` errors.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::NotRegistered { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }

    /// Resource handle the error refers to, if any.
    pub fn handle(&self) -> Option<&str> {
        match self {
            Self::NotRegistered { handle, .. } | Self::LoadFailed { handle, .. } => Some(handle),
            Self::LoaderNotConfigured { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_registered_message_includes_suggestion() {
        let err = ResourceError::NotRegistered {
            manager: "sprites".into(),
            handle: "playr".into(),
            suggestion: Some("player".into()),
        };
        let msg = err.to_string();
        assert!(msg.contains("'playr'"));
        assert!(msg.contains("'sprites'"));
        assert!(msg.ends_with("Did you mean 'player'?"));
    }

    #[test]
    fn test_not_registered_message_without_suggestion() {
        let err = ResourceError::NotRegistered {
            manager: "sprites".into(),
            handle: "zzz".into(),
            suggestion: None,
        };
        assert!(!err.to_string().contains("Did you mean"));
    }

    #[test]
    fn test_recoverability() {
        let missing = ResourceError::LoadFailed { manager: "m".into(), handle: "h".into() };
        let unconfigured = ResourceError::LoaderNotConfigured { manager: "m".into() };
        assert!(missing.is_recoverable());
        assert!(!unconfigured.is_recoverable());
        assert_eq!(missing.handle(), Some("h"));
        assert_eq!(unconfigured.handle(), None);
    }
}
