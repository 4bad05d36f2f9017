use crate::model::metadata::TrackEntry;
use crate::model::track::{Phase, PhaseStatus, Task, Track};
use crate::parse::parse_plan;

/// Fallback for a missing `type` or `status`
pub const UNKNOWN: &str = "unknown";

/// Build one track from its directory entry. Never fails: missing metadata
/// fields fall back to defaults and a missing plan means no phases.
pub fn build_track(entry: &TrackEntry) -> Track {
    let meta = &entry.metadata;
    Track {
        id: meta
            .track_id
            .clone()
            .unwrap_or_else(|| entry.dir_name.clone()),
        kind: meta.kind.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        status: meta.status.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        description: meta.description.clone().unwrap_or_default(),
        source: entry.source,
        created_at: meta.created_at,
        updated_at: meta.updated_at,
        phases: entry.plan.as_deref().map(parse_plan).unwrap_or_default(),
    }
}

/// Build every entry and return the tracks in display order.
pub fn build_all<'a, I>(entries: I) -> Vec<Track>
where
    I: IntoIterator<Item = &'a TrackEntry>,
{
    let mut tracks: Vec<Track> = entries.into_iter().map(build_track).collect();
    sort_tracks(&mut tracks);
    tracks
}

/// Active tracks first, then archived; by id within each group.
pub fn sort_tracks(tracks: &mut [Track]) {
    tracks.sort_by(|a, b| a.source.cmp(&b.source).then_with(|| a.id.cmp(&b.id)));
}

/// Derive a phase's status from its tasks
pub fn phase_status(phase: &Phase) -> PhaseStatus {
    let total = phase.tasks.len();
    let done = completed_tasks(phase);
    if total == 0 {
        PhaseStatus::Empty
    } else if done == total {
        PhaseStatus::Completed
    } else if done > 0 {
        PhaseStatus::InProgress
    } else {
        PhaseStatus::Pending
    }
}

pub fn completed_tasks(phase: &Phase) -> usize {
    phase.tasks.iter().filter(|t| t.completed).count()
}

pub fn completed_subtasks(task: &Task) -> usize {
    task.subtasks.iter().filter(|s| s.completed).count()
}

/// Status label for a single task
pub fn task_status(task: &Task) -> &'static str {
    if task.completed { "completed" } else { "pending" }
}
