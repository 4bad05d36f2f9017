use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a track lives on disk (`conductor/tracks/` or `conductor/archive/`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackSource {
    Active,
    Archived,
}

impl TrackSource {
    /// Directory name under `conductor/` holding tracks of this source
    pub fn dir_name(self) -> &'static str {
        match self {
            TrackSource::Active => "tracks",
            TrackSource::Archived => "archive",
        }
    }
}

impl std::fmt::Display for TrackSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackSource::Active => write!(f, "active"),
            TrackSource::Archived => write!(f, "archived"),
        }
    }
}

/// A checkbox line nested under a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub name: String,
    pub completed: bool,
}

/// A `- [x] Task: ...` line item within a phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    /// Source of truth from the checkbox; independent of subtask completion
    pub completed: bool,
    /// Short commit hash from a trailing `` `abc1234` ``
    pub commit: Option<String>,
    pub subtasks: Vec<Subtask>,
}

/// A `## Phase N: Name` section of a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Number as written; not necessarily unique or contiguous
    pub number: u32,
    pub name: String,
    /// Hex hash from `[checkpoint: abc1234]`
    pub checkpoint: Option<String>,
    pub tasks: Vec<Task>,
}

/// Progress of a phase, derived from its tasks every time it is asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Empty,
    Pending,
    InProgress,
    Completed,
}

impl PhaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseStatus::Empty => "empty",
            PhaseStatus::Pending => "pending",
            PhaseStatus::InProgress => "in_progress",
            PhaseStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A track as shown by the viewer: metadata plus its parsed plan.
///
/// Built fresh on every refresh and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    /// The metadata `type` field (feature, bug, chore, ...)
    pub kind: String,
    pub status: String,
    pub description: String,
    pub source: TrackSource,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Phases in document order
    pub phases: Vec<Phase>,
}

impl Track {
    pub fn is_archived(&self) -> bool {
        self.source == TrackSource::Archived
    }

    pub fn phase(&self, idx: usize) -> Option<&Phase> {
        self.phases.get(idx)
    }
}

impl Phase {
    pub fn task(&self, idx: usize) -> Option<&Task> {
        self.tasks.get(idx)
    }
}
