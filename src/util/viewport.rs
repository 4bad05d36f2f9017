/// Visible window of a scrollable list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// First visible item (inclusive)
    pub start: usize,
    /// Last visible item (exclusive)
    pub end: usize,
    pub more_above: usize,
    pub more_below: usize,
}

impl Viewport {
    fn new(start: usize, end: usize, total: usize) -> Self {
        Viewport {
            start,
            end,
            more_above: start,
            more_below: total - end,
        }
    }
}

/// Compute a window of at most `max_visible` lines that keeps `cursor`
/// visible. When items are hidden, a line is reserved for each
/// "more above"/"more below" indicator, so the item window shrinks
/// accordingly. The cursor is clamped into the list first.
pub fn calc_viewport(total: usize, cursor: usize, max_visible: usize) -> Viewport {
    let max_visible = max_visible.max(1);
    if total == 0 {
        return Viewport::default();
    }
    let cursor = cursor.min(total - 1);
    if total <= max_visible {
        return Viewport::new(0, total, total);
    }

    // Cursor sits on the last row of the window unless the list ends first
    let window = |capacity: usize| {
        let start = (cursor + 1).saturating_sub(capacity);
        let end = (start + capacity).min(total);
        (end.saturating_sub(capacity), end)
    };
    let indicators = |(start, end): (usize, usize)| (start > 0) as usize + (end < total) as usize;

    let mut reserved = indicators(window(max_visible));
    for _ in 0..3 {
        let capacity = max_visible.saturating_sub(reserved).max(1);
        let (start, end) = window(capacity);
        let needed = indicators((start, end));
        if needed == reserved {
            return Viewport::new(start, end, total);
        }
        reserved = needed;
    }

    let (start, end) = window(max_visible.saturating_sub(2).max(1));
    Viewport::new(start, end, total)
}
