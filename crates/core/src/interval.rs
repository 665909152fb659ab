//! Half-open interval primitives for minute-of-day blocks.
//!
//! Every operation treats blocks as `[start, end)`: adjacent blocks that
//! share an endpoint do not overlap. These functions are pure and total;
//! malformed blocks (`start >= end`) are rejected by the validator before
//! they reach this layer.

use slotwise_domain::TimeBlock;

/// Two blocks overlap iff `a.start < b.end && b.start < a.end`.
///
/// The single inequality covers all three textbook cases (b starts inside
/// a, b ends inside a, b spans a) and excludes mere adjacency.
pub fn overlaps(a: &TimeBlock, b: &TimeBlock) -> bool {
    a.start_minute < b.end_minute && b.start_minute < a.end_minute
}

/// Whether `minute` falls inside `block` (start inclusive, end exclusive).
pub fn contains(block: &TimeBlock, minute: u16) -> bool {
    block.start_minute <= minute && minute < block.end_minute
}

/// Remove every busy interval from `block`, splitting as needed.
///
/// Returns the remaining free sub-intervals in ascending order. Busy
/// intervals may be unsorted and may overlap each other.
pub fn subtract(block: TimeBlock, busy: &[TimeBlock]) -> Vec<TimeBlock> {
    let mut busy_sorted: Vec<TimeBlock> =
        busy.iter().copied().filter(|b| overlaps(b, &block)).collect();
    busy_sorted.sort_by_key(|b| b.start_minute);

    let mut free = Vec::new();
    let mut cursor = block.start_minute;

    for b in busy_sorted {
        if b.start_minute > cursor {
            free.push(TimeBlock::new(cursor, b.start_minute));
        }
        cursor = cursor.max(b.end_minute);
        if cursor >= block.end_minute {
            return free;
        }
    }

    if cursor < block.end_minute {
        free.push(TimeBlock::new(cursor, block.end_minute));
    }
    free
}
