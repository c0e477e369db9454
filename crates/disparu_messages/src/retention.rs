//! Retention policy: keep only the most recent messages.

use crate::model::{MAX_MESSAGE_LIMIT, MIN_MESSAGE_LIMIT};

/// Clamps a requested limit into `[MIN_MESSAGE_LIMIT, MAX_MESSAGE_LIMIT]`.
pub fn clamp_message_limit(requested: i64) -> u32 {
    requested.clamp(i64::from(MIN_MESSAGE_LIMIT), i64::from(MAX_MESSAGE_LIMIT)) as u32
}

/// Returns the last `limit` elements of `sequence`, in order.
///
/// Idempotent: `retained(&retained(s, l), l) == retained(s, l)`.
pub fn retained<T: Clone>(sequence: &[T], limit: usize) -> Vec<T> {
    let start = sequence.len().saturating_sub(limit);
    sequence[start..].to_vec()
}

/// Drops the oldest elements of `sequence` until at most `limit` remain.
///
/// Returns how many elements were dropped.
pub fn apply_retention<T>(sequence: &mut Vec<T>, limit: usize) -> usize {
    let excess = sequence.len().saturating_sub(limit);
    sequence.drain(..excess);
    excess
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn retained_keeps_the_most_recent_in_order() {
        let sequence: Vec<u32> = (1..=10).collect();
        assert_eq!(retained(&sequence, 3), vec![8, 9, 10]);
        assert_eq!(retained(&sequence, 50), sequence);
        assert_eq!(retained(&sequence, 0), Vec::<u32>::new());
    }

    #[test]
    fn retention_is_idempotent() {
        let sequence: Vec<u32> = (1..=25).collect();
        for limit in [0, 1, 10, 24, 25, 26, 50] {
            let once = retained(&sequence, limit);
            assert_eq!(retained(&once, limit), once);

            let mut in_place = sequence.clone();
            apply_retention(&mut in_place, limit);
            assert_eq!(in_place, once);
            assert_eq!(apply_retention(&mut in_place, limit), 0);
        }
    }

    #[test]
    fn apply_retention_reports_dropped_count() {
        let mut sequence: Vec<u32> = (1..=12).collect();
        assert_eq!(apply_retention(&mut sequence, 10), 2);
        assert_eq!(sequence.first(), Some(&3));
    }

    #[test]
    fn limits_clamp_to_bounds() {
        assert_eq!(clamp_message_limit(999), 50);
        assert_eq!(clamp_message_limit(1), 10);
        assert_eq!(clamp_message_limit(-7), 10);
        assert_eq!(clamp_message_limit(30), 30);
        assert_eq!(clamp_message_limit(i64::MAX), 50);
    }
}
