//! GitHub release payloads and the server-asset check

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// Substring every florida-server asset name carries
pub const SERVER_ASSET_MARKER: &str = "florida-server-";

/// GitHub release metadata
#[derive(Deserialize, Debug, Clone)]
pub struct GithubRelease {
    pub tag_name: String,
    #[serde(default, deserialize_with = "assets_or_empty")]
    pub assets: Vec<GithubAsset>,
}

/// A release fetched by tag. The tag is already known, so `tag_name` may be
/// absent.
#[derive(Deserialize, Debug, Clone)]
pub struct TaggedRelease {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default, deserialize_with = "assets_or_empty")]
    pub assets: Vec<GithubAsset>,
}

/// GitHub release asset
#[derive(Deserialize, Debug, Clone)]
pub struct GithubAsset {
    pub name: String,
}

/// `assets` missing, null or not an array means no assets; entries without a
/// string `name` are dropped.
fn assets_or_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<GithubAsset>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// True if at least one asset is a florida-server build
pub fn has_server_assets(assets: &[GithubAsset]) -> bool {
    assets
        .iter()
        .any(|asset| asset.name.contains(SERVER_ASSET_MARKER))
}

impl GithubRelease {
    pub fn has_server_assets(&self) -> bool {
        has_server_assets(&self.assets)
    }
}

impl TaggedRelease {
    pub fn has_server_assets(&self) -> bool {
        has_server_assets(&self.assets)
    }
}

/// Decode the release returned by a by-tag lookup; any JSON object is accepted
pub fn decode_release(body: &[u8]) -> Result<TaggedRelease> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| Error::api(format!("invalid release payload: {}", e)))?;

    if !value.is_object() {
        return Err(Error::api("invalid release payload: expected a JSON object"));
    }

    serde_json::from_value(value).map_err(|e| Error::api(format!("invalid release payload: {}", e)))
}

/// Decode a release listing, newest first.
///
/// Entries that are not valid releases come back as `Err` with the reason so
/// the caller can report and skip them; the listing itself must be a
/// non-empty array.
pub fn decode_release_list(
    body: &[u8],
) -> Result<Vec<std::result::Result<GithubRelease, String>>> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| Error::api(format!("invalid JSON response: {}", e)))?;

    match value {
        Value::Array(items) if !items.is_empty() => Ok(items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(|e| e.to_string()))
            .collect()),
        _ => Err(Error::api(
            "invalid JSON response: expected non-empty array of releases",
        )),
    }
}
