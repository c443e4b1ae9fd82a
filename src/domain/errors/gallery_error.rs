//! Gallery error types.

use thiserror::Error;

/// Errors raised while loading, rendering or rating the gallery.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum GalleryError {
    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("failed to parse server response: {message}")]
    Parse { message: String },

    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("rating update for {id} rejected with {status}")]
    UpdateRejected { id: String, status: u16 },

    #[error("invalid rating selection: {reason}")]
    InvalidSelection { reason: String },

    #[error("display error: {message}")]
    Display { message: String },
}

impl GalleryError {
    /// Creates transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Creates invalid selection error.
    #[must_use]
    pub fn invalid_selection(reason: impl Into<String>) -> Self {
        Self::InvalidSelection {
            reason: reason.into(),
        }
    }

    /// Creates display error.
    #[must_use]
    pub fn display(message: impl Into<String>) -> Self {
        Self::Display {
            message: message.into(),
        }
    }

    /// Returns whether retrying the same request may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Server { status, .. } | Self::UpdateRejected { status, .. } => {
                *status == 429 || *status >= 500
            }
            Self::Parse { .. } | Self::InvalidSelection { .. } | Self::Display { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(GalleryError::transport("reset"), true ; "transport")]
    #[test_case(GalleryError::server(503, "down"), true ; "unavailable")]
    #[test_case(GalleryError::server(429, "slow down"), true ; "rate_limited")]
    #[test_case(GalleryError::server(404, "missing"), false ; "not_found")]
    #[test_case(GalleryError::UpdateRejected { id: "a".into(), status: 502 }, true ; "update_bad_gateway")]
    #[test_case(GalleryError::UpdateRejected { id: "a".into(), status: 400 }, false ; "update_bad_request")]
    #[test_case(GalleryError::parse("eof"), false ; "parse")]
    #[test_case(GalleryError::invalid_selection("x"), false ; "selection")]
    fn test_is_transient(error: GalleryError, expected: bool) {
        assert_eq!(error.is_transient(), expected);
    }
}
