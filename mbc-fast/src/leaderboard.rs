// Bounded retention of the best-scoring groups
//
// A min-heap keyed by (score, insertion order). While the board has room every
// offer is kept. Once full, an offer must beat the current minimum strictly;
// the minimum (oldest first among equal scores) is then evicted.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::errors::{GbcError, GbcResult};

/// Default number of groups retained by a search.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 5;

/// A scored group. `members` are 0-indexed and strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGroup {
    pub score: f64,
    /// Serialized 1-indexed, like the text output
    #[serde(rename = "vertices", serialize_with = "serialize_one_indexed")]
    pub members: Vec<usize>,
}

impl RankedGroup {
    pub fn one_indexed(&self) -> Vec<usize> {
        self.members.iter().map(|&v| v + 1).collect()
    }
}

impl fmt::Display for RankedGroup {
    /// `score: v1 v2 ...` with 1-indexed vertex ids
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.score)?;
        for v in &self.members {
            write!(f, " {}", v + 1)?;
        }
        Ok(())
    }
}

fn serialize_one_indexed<S: Serializer>(members: &[usize], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(members.iter().map(|&v| v + 1))
}

#[derive(Debug, Clone)]
struct Entry {
    score: f64,
    seq: u64,
    members: Vec<usize>,
}

impl Entry {
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_cmp(other)
    }
}

#[derive(Debug, Clone)]
pub struct Leaderboard {
    capacity: usize,
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Leaderboard {
    /// # Errors
    /// - `InvalidParameter` if capacity is 0
    pub fn new(capacity: usize) -> GbcResult<Self> {
        if capacity == 0 {
            return Err(GbcError::InvalidParameter(
                "leaderboard size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity + 1),
            next_seq: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Lowest retained score, if any.
    pub fn min_score(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(entry)| entry.score)
    }

    /// Offer a group. Returns whether it was retained.
    /// `members` is only cloned when the group is kept.
    pub fn offer(&mut self, score: f64, members: &[usize]) -> bool {
        if self.len() >= self.capacity() {
            match self.min_score() {
                Some(min) if score > min => {
                    self.heap.pop();
                }
                _ => return false,
            }
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry {
            score,
            seq,
            members: members.to_vec(),
        }));
        true
    }

    /// Re-offer every entry of `other` in its original insertion order.
    pub fn absorb(&mut self, other: Leaderboard) {
        if other.is_empty() {
            return;
        }
        let mut entries: Vec<Entry> = other.heap.into_iter().map(|Reverse(e)| e).collect();
        entries.sort_by_key(|e| e.seq);
        for entry in entries {
            self.offer(entry.score, &entry.members);
        }
    }

    /// Retained groups in ascending score order (ties in insertion order).
    pub fn into_sorted_vec(self) -> Vec<RankedGroup> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .rev() // sorted Reverse<_> is descending by key
            .map(|Reverse(e)| RankedGroup {
                score: e.score,
                members: e.members,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(board: Leaderboard) -> Vec<f64> {
        board.into_sorted_vec().into_iter().map(|g| g.score).collect()
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert!(matches!(Leaderboard::new(0), Err(GbcError::InvalidParameter(_))));
    }

    #[test]
    fn test_fills_then_evicts_minimum() {
        let mut board = Leaderboard::new(3).unwrap();
        assert!(board.offer(2.0, &[0]));
        assert!(board.offer(1.0, &[1]));
        assert!(board.offer(3.0, &[2]));
        assert_eq!(board.min_score(), Some(1.0));

        assert!(board.offer(4.0, &[3]));
        assert_eq!(board.len(), 3);
        assert_eq!(scores(board), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_equal_to_minimum_is_rejected_when_full() {
        let mut board = Leaderboard::new(2).unwrap();
        board.offer(1.0, &[0]);
        board.offer(2.0, &[1]);
        assert!(!board.offer(1.0, &[2]));
        assert!(!board.offer(0.5, &[3]));
        let groups = board.into_sorted_vec();
        assert_eq!(groups[0].members, vec![0]);
    }

    #[test]
    fn test_oldest_minimum_is_evicted_first() {
        let mut board = Leaderboard::new(2).unwrap();
        board.offer(1.0, &[0]);
        board.offer(1.0, &[1]);
        board.offer(5.0, &[2]);
        let groups = board.into_sorted_vec();
        assert_eq!(groups[0].members, vec![1]);
        assert_eq!(groups[1].members, vec![2]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut board = Leaderboard::new(4).unwrap();
        for v in 0..3 {
            board.offer(7.0, &[v]);
        }
        let members: Vec<Vec<usize>> = board.into_sorted_vec().into_iter().map(|g| g.members).collect();
        assert_eq!(members, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_absorb_replays_in_insertion_order() {
        let mut left = Leaderboard::new(2).unwrap();
        left.offer(3.0, &[0, 1]);
        left.offer(1.0, &[0, 2]);
        let mut right = Leaderboard::new(2).unwrap();
        right.offer(2.0, &[1, 2]);
        right.offer(5.0, &[1, 3]);

        left.absorb(right);
        assert_eq!(scores(left), vec![3.0, 5.0]);
    }

    #[test]
    fn test_absorb_empty_board_changes_nothing() {
        let mut board = Leaderboard::new(3).unwrap();
        board.offer(4.0, &[1]);
        let empty = Leaderboard::new(3).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.capacity(), 3);

        board.absorb(empty);
        assert_eq!(board.len(), 1);
        assert!(!board.is_empty());
        assert_eq!(board.min_score(), Some(4.0));
    }

    #[test]
    fn test_display_is_one_indexed() {
        let group = RankedGroup {
            score: 12.5,
            members: vec![0, 4],
        };
        assert_eq!(group.to_string(), "12.5: 1 5");
        assert_eq!(group.one_indexed(), vec![1, 5]);
    }

    #[test]
    fn test_json_is_one_indexed() {
        let group = RankedGroup {
            score: 3.0,
            members: vec![2],
        };
        let json = serde_json::to_string(&group).unwrap();
        assert_eq!(json, r#"{"score":3.0,"vertices":[3]}"#);
    }
}
