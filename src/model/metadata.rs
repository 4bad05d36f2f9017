use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fields of a track's `metadata.json`, all optional.
///
/// Empty strings in the file are normalized to `None` by the parser so the
/// builder only has one notion of "missing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMetadata {
    pub track_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Raw inputs for one track directory, gathered by discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEntry {
    /// Name of the track's directory; the id when metadata has none
    pub dir_name: String,
    pub source: super::track::TrackSource,
    pub metadata: TrackMetadata,
    /// Contents of `plan.md`, `None` if it is missing or unreadable
    pub plan: Option<String>,
}
