use crate::core::geo::TileCoord;

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// Token-authenticated tile server laid out as `{base}/tiles/{z}/{x}/{y}?token={token}`.
#[derive(Debug, Clone)]
pub struct TileServerSource {
    base_url: String,
    token: String,
}

impl TileServerSource {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl TileSource for TileServerSource {
    fn url(&self, coord: TileCoord) -> String {
        format!(
            "{}/tiles/{}/{}/{}?token={}",
            self.base_url, coord.z, coord.x, coord.y, self.token
        )
    }
}
