use std::sync::LazyLock;

use regex::Regex;

use crate::model::track::{Phase, Subtask, Task};

/// `## Phase 1: Setup [checkpoint: abc1234]`
static PHASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^## Phase (\d+): (.+?)(?:\s*\[checkpoint:\s*([a-f0-9]+)\])?\s*$")
        .expect("phase pattern compiles")
});

/// ``- [x] Task: Create project structure `def5678` ``
static TASK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^- \[([ x])\] Task: (.+?)(?:\s+`([a-f0-9]{7,})`)?\s*$")
        .expect("task pattern compiles")
});

/// `    - [x] Create directory layout` (one indent level below a task)
static SUBTASK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^    - \[([ x])\] (.+)$").expect("subtask pattern compiles"));

/// One recognized line of a plan document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanLine {
    Phase {
        number: u32,
        name: String,
        checkpoint: Option<String>,
    },
    Task {
        name: String,
        completed: bool,
        commit: Option<String>,
    },
    Subtask {
        name: String,
        completed: bool,
    },
}

/// Match a single line against the phase, task and subtask grammars, in that
/// order. Returns `None` for anything else.
pub fn classify_line(line: &str) -> Option<PlanLine> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if let Some(caps) = PHASE_RE.captures(line) {
        // A number too large for u32 is not a phase header
        if let Ok(number) = caps[1].parse::<u32>() {
            return Some(PlanLine::Phase {
                number,
                name: caps[2].trim().to_string(),
                checkpoint: caps.get(3).map(|m| m.as_str().to_string()),
            });
        }
        return None;
    }

    if let Some(caps) = TASK_RE.captures(line) {
        return Some(PlanLine::Task {
            name: caps[2].trim().to_string(),
            completed: &caps[1] == "x",
            commit: caps.get(3).map(|m| m.as_str().to_string()),
        });
    }

    if let Some(caps) = SUBTASK_RE.captures(line) {
        return Some(PlanLine::Subtask {
            name: caps[2].trim().to_string(),
            completed: &caps[1] == "x",
        });
    }

    None
}

/// Fold state while walking a plan: closed phases, the open phase, and
/// whether the open phase's last task still accepts subtasks.
#[derive(Debug, Default)]
struct PlanBuilder {
    phases: Vec<Phase>,
    open: Option<Phase>,
    task_open: bool,
}

impl PlanBuilder {
    fn push(&mut self, line: PlanLine) {
        match line {
            PlanLine::Phase {
                number,
                name,
                checkpoint,
            } => {
                if let Some(done) = self.open.take() {
                    self.phases.push(done);
                }
                self.open = Some(Phase {
                    number,
                    name,
                    checkpoint,
                    tasks: Vec::new(),
                });
                self.task_open = false;
            }
            PlanLine::Task {
                name,
                completed,
                commit,
            } => {
                // Tasks before the first phase header are dropped
                if let Some(phase) = self.open.as_mut() {
                    phase.tasks.push(Task {
                        name,
                        completed,
                        commit,
                        subtasks: Vec::new(),
                    });
                    self.task_open = true;
                }
            }
            PlanLine::Subtask { name, completed } => {
                if !self.task_open {
                    return;
                }
                if let Some(task) = self.open.as_mut().and_then(|p| p.tasks.last_mut()) {
                    task.subtasks.push(Subtask { name, completed });
                }
            }
        }
    }

    fn finish(mut self) -> Vec<Phase> {
        if let Some(done) = self.open.take() {
            self.phases.push(done);
        }
        self.phases
    }
}

/// Parse a `plan.md` document into phases, tasks and subtasks.
///
/// Lines that match none of the grammars, or that appear where their
/// parent is missing, are skipped. Never fails: arbitrary input yields a
/// (possibly empty) list.
pub fn parse_plan(source: &str) -> Vec<Phase> {
    let mut builder = PlanBuilder::default();
    for line in source.split('\n') {
        if let Some(parsed) = classify_line(line) {
            builder.push(parsed);
        }
    }
    builder.finish()
}
