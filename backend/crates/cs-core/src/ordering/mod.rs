//! Position-index maintenance for ordered siblings.
//!
//! Lists on a board and tasks in a list carry a dense, zero-based integer
//! `position`: for a container with `n` members the position set is exactly
//! `{0, .., n-1}`. Every mutation (insert, remove, move) shifts one
//! contiguous range of siblings by ±1 and writes the affected item last,
//! which keeps the invariant without renumbering the whole container.
//!
//! The functions here only compute the shift; the repositories translate a
//! [`PositionShift`] into a single `UPDATE .. SET position = position + d`
//! statement over the sibling range.

/// A sibling range (inclusive bounds) and the delta to apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionShift {
    /// First affected position (inclusive).
    pub lower: i32,
    /// Last affected position (inclusive); `None` means unbounded.
    pub upper: Option<i32>,
    /// Always +1 or -1.
    pub delta: i32,
}

impl PositionShift {
    /// Whether a sibling at `position` falls inside this shift's range.
    pub fn contains(&self, position: i32) -> bool {
        position >= self.lower && self.upper.is_none_or(|u| position <= u)
    }
}

/// Shift for inserting a new item at `target`: existing siblings at
/// `target` and beyond move one slot right.
pub fn insert_shift(target: i32) -> PositionShift {
    PositionShift {
        lower: target,
        upper: None,
        delta: 1,
    }
}

/// Shift for removing the item at `old`: trailing siblings close the gap.
pub fn remove_shift(old: i32) -> PositionShift {
    PositionShift {
        lower: old + 1,
        upper: None,
        delta: -1,
    }
}

/// Shift for a same-container move from `old` to `new`.
///
/// Returns `None` for the no-op move (`new == old`), which callers must
/// short-circuit without side effects. Otherwise exactly one range moves:
/// toward the front, siblings in `[new, old)` shift right; toward the
/// back, siblings in `(old, new]` shift left. The moved item itself takes
/// `new` afterwards.
pub fn move_shift(old: i32, new: i32) -> Option<PositionShift> {
    if new < old {
        Some(PositionShift {
            lower: new,
            upper: Some(old - 1),
            delta: 1,
        })
    } else if new > old {
        Some(PositionShift {
            lower: old + 1,
            upper: Some(new),
            delta: -1,
        })
    } else {
        None
    }
}

/// Checks the contiguity invariant: the multiset of positions is exactly
/// `{0, .., len-1}`.
pub fn is_contiguous(positions: &[i32]) -> bool {
    let mut sorted: Vec<i32> = positions.to_vec();
    sorted.sort_unstable();
    sorted.iter().enumerate().all(|(i, &p)| p == i as i32)
}
