//! Error taxonomy for Steam Web API calls.
//!
//! [`SteamError`] is produced by the gateway and by the core helpers built on it.
//! Tool implementations surface it through [`ToolSourceError::Steam`](crate::tool_source::ToolSourceError).

use thiserror::Error;

/// Failure of a remote call or of the data it returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SteamError {
    /// Connection, DNS, TLS or timeout failure before a response arrived.
    #[error("network unreachable: {0}")]
    Network(String),

    /// The API key was rejected or the requested resource is private (401/403).
    #[error("authorization failed: {0}")]
    Authorization(String),

    /// The remote resource does not exist (404, or an empty lookup such as an unknown vanity name).
    #[error("not found: {0}")]
    NotFound(String),

    /// The remote side is throttling us (429).
    #[error("rate limited by Steam; try again later")]
    RateLimited,

    /// Any other non-success status.
    #[error("Steam server error {status}: {message}")]
    RemoteServer { status: u16, message: String },

    /// Parameters rejected locally or by the remote side (400).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A sub-resource for one item of a batch is unavailable (no stats, private section).
    #[error("partial data unavailable: {0}")]
    PartialDataUnavailable(String),

    /// The response body did not match the expected record shape.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl SteamError {
    /// Maps a non-success HTTP status to the taxonomy. `excerpt` is a short, already sanitized body excerpt.
    pub fn from_status(status: u16, excerpt: &str) -> Self {
        match status {
            400 => SteamError::Validation(non_empty_or(excerpt, "request rejected by Steam")),
            401 | 403 => SteamError::Authorization(non_empty_or(
                excerpt,
                "API key rejected or profile is private",
            )),
            404 => SteamError::NotFound(non_empty_or(excerpt, "resource does not exist")),
            429 => SteamError::RateLimited,
            _ => SteamError::RemoteServer {
                status,
                message: non_empty_or(excerpt, "no details"),
            },
        }
    }

    /// True for failures that mean "this item has no data" rather than "the service is broken".
    pub fn is_item_scoped(&self) -> bool {
        matches!(
            self,
            SteamError::NotFound(_)
                | SteamError::Authorization(_)
                | SteamError::Validation(_)
                | SteamError::PartialDataUnavailable(_)
        )
    }
}

fn non_empty_or(s: &str, fallback: &str) -> String {
    let s = s.trim();
    if s.is_empty() {
        fallback.to_string()
    } else {
        s.to_string()
    }
}

/// Removes every occurrence of `secret` from `message` and caps its length.
///
/// Applied to anything derived from a remote body or a transport error before it
/// is placed inside a [`SteamError`].
pub fn sanitize_message(message: &str, secret: &str, max_chars: usize) -> String {
    let redacted = if secret.is_empty() {
        message.to_string()
    } else {
        message.replace(secret, "***")
    };
    let flattened = redacted.replace(['\n', '\r'], " ");
    let trimmed = flattened.trim();
    if trimmed.chars().count() > max_chars {
        let cut: String = trimmed.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_covers_taxonomy() {
        assert!(matches!(SteamError::from_status(400, ""), SteamError::Validation(_)));
        assert!(matches!(SteamError::from_status(401, ""), SteamError::Authorization(_)));
        assert!(matches!(SteamError::from_status(403, "x"), SteamError::Authorization(_)));
        assert!(matches!(SteamError::from_status(404, ""), SteamError::NotFound(_)));
        assert_eq!(SteamError::from_status(429, "slow down"), SteamError::RateLimited);
        assert_eq!(
            SteamError::from_status(503, ""),
            SteamError::RemoteServer {
                status: 503,
                message: "no details".to_string()
            }
        );
    }

    #[test]
    fn sanitize_redacts_secret_and_truncates() {
        let msg = "error for https://x/?key=SECRET123&steamid=1\nline two";
        let out = sanitize_message(msg, "SECRET123", 200);
        assert!(!out.contains("SECRET123"));
        assert!(out.contains("key=***"));
        assert!(!out.contains('\n'));

        let long = "a".repeat(50);
        assert_eq!(sanitize_message(&long, "", 10), format!("{}...", "a".repeat(10)));
    }

    #[test]
    fn item_scoped_errors() {
        assert!(SteamError::PartialDataUnavailable("x".into()).is_item_scoped());
        assert!(SteamError::Authorization("private".into()).is_item_scoped());
        assert!(!SteamError::RateLimited.is_item_scoped());
        assert!(!SteamError::Network("down".into()).is_item_scoped());
    }
}
