//! Screen-stack navigation as a pure reducer over the current track snapshot.
//!
//! The navigator never owns tracks. Every transition takes the snapshot the
//! caller is displaying, and [`Navigator::reclamp`] must be called whenever
//! that snapshot is replaced so no frame keeps an out-of-range index.

use serde::{Deserialize, Serialize};

use crate::model::track::{Phase, Task, Track};

/// One drill-down level of the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Tracks {
        cursor: usize,
    },
    Phases {
        track: usize,
        cursor: usize,
    },
    Tasks {
        track: usize,
        phase: usize,
        cursor: usize,
    },
    Detail {
        track: usize,
        phase: usize,
        task: usize,
        /// Lower-bounded here; the upper bound is applied when rendering
        scroll: usize,
    },
    QuitConfirm,
}

/// Input to the reducer, already decoded from raw keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    MoveCursor(isize),
    MoveScroll(isize),
    Confirm,
    Back,
    RequestQuit,
    ConfirmQuit(bool),
}

/// What a transition did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Stack untouched; no redraw needed
    Unchanged,
    Changed,
    /// The user confirmed quitting; the host should shut down
    Quit,
}

/// Why a stored stack cannot become a [`Navigator`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavStateError {
    #[error("navigation stack is empty")]
    EmptyStack,
    #[error("navigation stack must start at the tracks screen")]
    BottomNotTracks,
}

/// The navigation stack. Never empty; the bottom frame is always `Tracks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNavigator")]
pub struct Navigator {
    stack: Vec<Screen>,
}

/// Unchecked wire form of [`Navigator`]
#[derive(Deserialize)]
struct RawNavigator {
    stack: Vec<Screen>,
}

impl TryFrom<RawNavigator> for Navigator {
    type Error = NavStateError;

    fn try_from(raw: RawNavigator) -> Result<Self, Self::Error> {
        match raw.stack.first() {
            None => Err(NavStateError::EmptyStack),
            Some(Screen::Tracks { .. }) => Ok(Navigator { stack: raw.stack }),
            Some(_) => Err(NavStateError::BottomNotTracks),
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

fn phases_of(tracks: &[Track], track: usize) -> &[Phase] {
    tracks
        .get(track)
        .map(|t| t.phases.as_slice())
        .unwrap_or(&[])
}

fn tasks_of(tracks: &[Track], track: usize, phase: usize) -> &[Task] {
    phases_of(tracks, track)
        .get(phase)
        .map(|p| p.tasks.as_slice())
        .unwrap_or(&[])
}

/// Largest valid index for a collection of `len` items, 0 when empty
fn clamp_index(value: usize, len: usize) -> usize {
    value.min(len.saturating_sub(1))
}

/// Number of rows the cursor of `screen` moves over
pub fn item_count(screen: &Screen, tracks: &[Track]) -> usize {
    match *screen {
        Screen::Tracks { .. } => tracks.len(),
        Screen::Phases { track, .. } => phases_of(tracks, track).len(),
        Screen::Tasks { track, phase, .. } => tasks_of(tracks, track, phase).len(),
        Screen::Detail { .. } | Screen::QuitConfirm => 0,
    }
}

/// Clamp every index in `screen` against `tracks`. Returns the clamped frame.
fn clamp_screen(screen: Screen, tracks: &[Track]) -> Screen {
    match screen {
        Screen::Tracks { cursor } => Screen::Tracks {
            cursor: clamp_index(cursor, tracks.len()),
        },
        Screen::Phases { track, cursor } => {
            let track = clamp_index(track, tracks.len());
            Screen::Phases {
                track,
                cursor: clamp_index(cursor, phases_of(tracks, track).len()),
            }
        }
        Screen::Tasks {
            track,
            phase,
            cursor,
        } => {
            let track = clamp_index(track, tracks.len());
            let phase = clamp_index(phase, phases_of(tracks, track).len());
            Screen::Tasks {
                track,
                phase,
                cursor: clamp_index(cursor, tasks_of(tracks, track, phase).len()),
            }
        }
        Screen::Detail {
            track,
            phase,
            task,
            scroll,
        } => {
            let track = clamp_index(track, tracks.len());
            let phase = clamp_index(phase, phases_of(tracks, track).len());
            Screen::Detail {
                track,
                phase,
                task: clamp_index(task, tasks_of(tracks, track, phase).len()),
                scroll,
            }
        }
        Screen::QuitConfirm => Screen::QuitConfirm,
    }
}

impl Navigator {
    pub fn new() -> Self {
        Navigator {
            stack: vec![Screen::Tracks { cursor: 0 }],
        }
    }

    /// The active screen
    pub fn current(&self) -> &Screen {
        // The stack is never empty: pops stop at one frame
        &self.stack[self.stack.len() - 1]
    }

    /// All frames, bottom first
    pub fn stack(&self) -> &[Screen] {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The frame beneath the active one, if any
    pub fn previous(&self) -> Option<&Screen> {
        self.stack.iter().rev().nth(1)
    }

    /// Back to a single `Tracks{cursor: 0}` frame
    pub fn reset(&mut self) {
        self.stack.clear();
        self.stack.push(Screen::Tracks { cursor: 0 });
    }

    /// Drop every frame above the bottom `Tracks` one, keeping its cursor
    pub fn unwind(&mut self) -> bool {
        let changed = self.stack.len() > 1;
        self.stack.truncate(1);
        changed
    }

    fn top_mut(&mut self) -> &mut Screen {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn push(&mut self, screen: Screen) -> Transition {
        self.stack.push(screen);
        Transition::Changed
    }

    fn pop(&mut self) -> Transition {
        if self.stack.len() > 1 {
            self.stack.pop();
            Transition::Changed
        } else {
            Transition::Unchanged
        }
    }

    /// Apply one event against the snapshot currently on screen.
    pub fn apply(&mut self, event: NavEvent, tracks: &[Track]) -> Transition {
        let current = *self.current();

        if current == Screen::QuitConfirm {
            return match event {
                NavEvent::ConfirmQuit(true) => Transition::Quit,
                NavEvent::ConfirmQuit(false) | NavEvent::Back => self.pop(),
                _ => Transition::Unchanged,
            };
        }

        match event {
            NavEvent::MoveCursor(delta) => self.move_cursor(delta, tracks),
            NavEvent::MoveScroll(delta) => self.move_scroll(delta),
            NavEvent::Confirm => self.confirm(tracks),
            NavEvent::Back => {
                if self.stack.len() > 1 {
                    self.pop()
                } else {
                    self.push(Screen::QuitConfirm)
                }
            }
            NavEvent::RequestQuit => match current {
                Screen::Tracks { .. } => self.push(Screen::QuitConfirm),
                _ => Transition::Unchanged,
            },
            NavEvent::ConfirmQuit(_) => Transition::Unchanged,
        }
    }

    fn move_cursor(&mut self, delta: isize, tracks: &[Track]) -> Transition {
        let count = item_count(self.current(), tracks);
        let cursor = match self.top_mut() {
            Screen::Tracks { cursor }
            | Screen::Phases { cursor, .. }
            | Screen::Tasks { cursor, .. } => cursor,
            Screen::Detail { .. } | Screen::QuitConfirm => return Transition::Unchanged,
        };
        let next = clamp_index(cursor.saturating_add_signed(delta), count);
        if next == *cursor {
            return Transition::Unchanged;
        }
        *cursor = next;
        Transition::Changed
    }

    fn move_scroll(&mut self, delta: isize) -> Transition {
        let Screen::Detail { scroll, .. } = self.top_mut() else {
            return Transition::Unchanged;
        };
        let next = scroll.saturating_add_signed(delta);
        if next == *scroll {
            return Transition::Unchanged;
        }
        *scroll = next;
        Transition::Changed
    }

    /// Cap the detail scroll offset at `max`, as the renderer would.
    /// Returns whether the offset moved.
    pub fn limit_scroll(&mut self, max: usize) -> bool {
        match self.top_mut() {
            Screen::Detail { scroll, .. } if *scroll > max => {
                *scroll = max;
                true
            }
            _ => false,
        }
    }

    fn confirm(&mut self, tracks: &[Track]) -> Transition {
        let current = *self.current();
        match current {
            Screen::Tracks { cursor } if cursor < tracks.len() => self.push(Screen::Phases {
                track: cursor,
                cursor: 0,
            }),
            Screen::Phases { track, cursor } if cursor < phases_of(tracks, track).len() => {
                self.push(Screen::Tasks {
                    track,
                    phase: cursor,
                    cursor: 0,
                })
            }
            Screen::Tasks {
                track,
                phase,
                cursor,
            } if cursor < tasks_of(tracks, track, phase).len() => self.push(Screen::Detail {
                track,
                phase,
                task: cursor,
                scroll: 0,
            }),
            _ => Transition::Unchanged,
        }
    }

    /// Re-fit every frame to a freshly loaded snapshot. Indices that point
    /// past the end of their collection move to its last item (or 0 when it
    /// is empty); frames are never dropped. Returns whether anything moved.
    pub fn reclamp(&mut self, tracks: &[Track]) -> bool {
        let mut changed = false;
        for frame in &mut self.stack {
            let clamped = clamp_screen(*frame, tracks);
            if clamped != *frame {
                *frame = clamped;
                changed = true;
            }
        }
        changed
    }
}

/// By-value form of [`Navigator::apply`]: returns the next navigator and
/// leaves `nav` untouched.
pub fn reduce(nav: &Navigator, event: NavEvent, tracks: &[Track]) -> (Navigator, Transition) {
    let mut next = nav.clone();
    let transition = next.apply(event, tracks);
    (next, transition)
}
