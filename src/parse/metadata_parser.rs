use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::model::metadata::TrackMetadata;

/// Error type for `metadata.json` parsing
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("invalid metadata JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// On-disk shape of `metadata.json`. Timestamps stay strings here so that a
/// malformed date degrades to "unknown" instead of rejecting the track.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMetadata {
    track_id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    status: Option<String>,
    description: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

/// Parse the bytes of a `metadata.json` file.
///
/// Missing and empty fields come back as `None`; the track builder decides
/// the fallbacks. Only structurally invalid JSON is an error.
pub fn parse_metadata(bytes: &[u8]) -> Result<TrackMetadata, MetadataError> {
    let raw: RawMetadata = serde_json::from_slice(bytes)?;
    Ok(TrackMetadata {
        track_id: non_empty(raw.track_id),
        kind: non_empty(raw.kind),
        status: non_empty(raw.status),
        description: non_empty(raw.description),
        created_at: raw.created_at.as_deref().and_then(parse_timestamp),
        updated_at: raw.updated_at.as_deref().and_then(parse_timestamp),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
