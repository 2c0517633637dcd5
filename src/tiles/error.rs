//! Classification of failed tile fetches.
//!
//! A failure only ever affects the tile it belongs to; the coordinate engine
//! never sees these errors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a tile could not be loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileErrorKind {
    /// HTTP 404
    NotFound,
    /// HTTP 403, usually a bad or missing token
    Forbidden,
    /// HTTP 500, 502 or 503
    ServerError,
    /// Any other non-success HTTP status
    Unknown,
    /// The request never produced a response
    Network,
}

impl TileErrorKind {
    /// Category for a non-success HTTP status
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            403 => Self::Forbidden,
            500 | 502 | 503 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not-found",
            Self::Forbidden => "forbidden",
            Self::ServerError => "server-error",
            Self::Unknown => "unknown",
            Self::Network => "network",
        }
    }

    /// Headline shown on the failed tile's placeholder
    pub fn message(&self, status: Option<u16>) -> String {
        let status = status
            .map(|code| code.to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        match self {
            Self::NotFound => "Tile Not Found (404)".to_string(),
            Self::Forbidden => "Access Denied (403)".to_string(),
            Self::ServerError => format!("Server Error ({})", status),
            Self::Unknown => format!("HTTP Error ({})", status),
            Self::Network => "Network Error".to_string(),
        }
    }

    /// Suggestion shown under the headline
    pub fn hint(&self) -> &'static str {
        match self {
            Self::NotFound => "Tile does not exist at this location",
            Self::Forbidden => "Check your API token",
            Self::ServerError => "Server is experiencing issues",
            Self::Network => "Check your internet connection",
            Self::Unknown => "Try refreshing the page",
        }
    }
}

impl fmt::Display for TileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified tile fetch failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", describe(.kind, .status, .detail))]
pub struct TileFetchError {
    pub kind: TileErrorKind,
    /// HTTP status, absent for transport failures
    pub status: Option<u16>,
    /// Underlying transport error text, if any
    pub detail: Option<String>,
}

fn describe(kind: &TileErrorKind, status: &Option<u16>, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("{}: {}", kind.message(*status), detail),
        None => kind.message(*status),
    }
}

impl TileFetchError {
    pub fn from_status(status: u16) -> Self {
        Self {
            kind: TileErrorKind::from_status(status),
            status: Some(status),
            detail: None,
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self {
            kind: TileErrorKind::Network,
            status: None,
            detail: Some(detail.into()),
        }
    }

    pub fn message(&self) -> String {
        self.kind.message(self.status)
    }

    pub fn hint(&self) -> &'static str {
        self.kind.hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(TileErrorKind::from_status(404), TileErrorKind::NotFound);
        assert_eq!(TileErrorKind::from_status(403), TileErrorKind::Forbidden);
        for status in [500, 502, 503] {
            assert_eq!(TileErrorKind::from_status(status), TileErrorKind::ServerError);
        }
        for status in [400, 401, 418, 501, 504] {
            assert_eq!(TileErrorKind::from_status(status), TileErrorKind::Unknown);
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(TileFetchError::from_status(404).message(), "Tile Not Found (404)");
        assert_eq!(TileFetchError::from_status(403).message(), "Access Denied (403)");
        assert_eq!(TileFetchError::from_status(502).message(), "Server Error (502)");
        assert_eq!(TileFetchError::from_status(418).message(), "HTTP Error (418)");
        assert_eq!(TileErrorKind::ServerError.message(None), "Server Error (Unknown)");
        assert_eq!(TileFetchError::network("reset").message(), "Network Error");
    }

    #[test]
    fn test_hints_are_distinct() {
        let kinds = [
            TileErrorKind::NotFound,
            TileErrorKind::Forbidden,
            TileErrorKind::ServerError,
            TileErrorKind::Unknown,
            TileErrorKind::Network,
        ];
        let mut hints: Vec<_> = kinds.iter().map(|k| k.hint()).collect();
        hints.sort();
        hints.dedup();
        assert_eq!(hints.len(), kinds.len());
        assert_eq!(TileErrorKind::Forbidden.hint(), "Check your API token");
    }

    #[test]
    fn test_display_includes_detail() {
        let err = TileFetchError::network("connection refused");
        assert_eq!(err.to_string(), "Network Error: connection refused");
        assert_eq!(TileErrorKind::ServerError.to_string(), "server-error");
        assert_eq!(
            serde_json::to_string(&TileErrorKind::NotFound).unwrap(),
            "\"not-found\""
        );
    }
}
