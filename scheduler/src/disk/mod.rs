mod c_scan;
mod fcfs;
mod scan;
mod sstf;

use crate::InputError;
use tracing::{info, warn};

pub use c_scan::CScan;
pub use fcfs::DiskFcfs;
pub use scan::{Look, Scan};
pub use sstf::Sstf;

pub const DEFAULT_DISK_SIZE: u32 = 200;

/// A disk head scheduling policy.
pub trait DiskScheduler {
    const NAME: &'static str;

    fn service(&self, queue: &RequestQueue) -> SeekPlan;
}

/// Which end of the disk a sweep heads for first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Towards `disk_size - 1`.
    #[default]
    Outward,
    /// Towards track 0.
    Inward,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Self::Outward => Self::Inward,
            Self::Inward => Self::Outward,
        }
    }
}

/// Pending track requests in insertion order, with the head position and disk size
/// they were validated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestQueue {
    disk_size: u32,
    head: u32,
    requests: Vec<u32>,
}

impl RequestQueue {
    pub fn new(disk_size: u32, head: u32) -> Result<Self, InputError> {
        let error = if disk_size == 0 {
            InputError::ZeroDiskSize
        } else if head >= disk_size {
            InputError::HeadOutOfRange { head, disk_size }
        } else {
            return Ok(Self {
                disk_size,
                head,
                requests: Vec::new(),
            });
        };
        warn!(%error, "rejected disk geometry");
        Err(error)
    }

    pub fn with_requests<I>(disk_size: u32, head: u32, requests: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut queue = RequestQueue::new(disk_size, head)?;
        for track in requests {
            queue.push(track)?;
        }
        Ok(queue)
    }

    /// Appends a request. Out of range or repeated tracks are rejected and leave the
    /// queue as it was.
    pub fn push(&mut self, track: u32) -> Result<(), InputError> {
        let error = if track >= self.disk_size {
            InputError::TrackOutOfRange {
                track,
                disk_size: self.disk_size,
            }
        } else if self.requests.contains(&track) {
            InputError::DuplicateRequest(track)
        } else {
            self.requests.push(track);
            return Ok(());
        };
        warn!(%error, "rejected disk request");
        Err(error)
    }

    pub fn disk_size(&self) -> u32 {
        self.disk_size
    }

    pub fn head(&self) -> u32 {
        self.head
    }

    pub fn requests(&self) -> &[u32] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn last_track(&self) -> u32 {
        self.disk_size - 1
    }

    /// Returns the requests below the head and those at or above it, both sorted ascending.
    fn split_at_head(&self) -> (Vec<u32>, Vec<u32>) {
        let mut sorted = self.requests.clone();
        sorted.sort_unstable();
        let split = sorted.partition_point(|&track| track < self.head);
        let above = sorted.split_off(split);
        (sorted, above)
    }
}

/// The order the head visits tracks in, starting at its initial position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeekPlan {
    pub sequence: Vec<u32>,
    pub total_seek: u64,
}

impl SeekPlan {
    fn from_sequence(sequence: Vec<u32>) -> Self {
        let total_seek = sequence
            .windows(2)
            .map(|step| step[0].abs_diff(step[1]) as u64)
            .sum();
        Self {
            sequence,
            total_seek,
        }
    }

    /// Mean head movement per step, 0 when the head never moved.
    pub fn average_seek(&self) -> f64 {
        match self.sequence.len() {
            0 | 1 => 0.0,
            len => self.total_seek as f64 / (len - 1) as f64,
        }
    }
}

/// One line of the policy comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    pub name: &'static str,
    pub plan: SeekPlan,
}

fn ranked<S: DiskScheduler>(scheduler: S, queue: &RequestQueue) -> Ranking {
    Ranking {
        name: S::NAME,
        plan: scheduler.service(queue),
    }
}

/// Runs every policy on the same queue and sorts them by total seek, lowest first.
/// Equal totals keep the FCFS, SSTF, SCAN, LOOK, C-SCAN order.
pub fn compare(queue: &RequestQueue, direction: Direction) -> Vec<Ranking> {
    let mut rankings = vec![
        ranked(DiskFcfs, queue),
        ranked(Sstf, queue),
        ranked(Scan::new(direction), queue),
        ranked(Look::new(direction), queue),
        ranked(CScan::new(direction), queue),
    ];
    rankings.sort_by_key(|ranking| ranking.plan.total_seek);

    if let Some(best) = rankings.first() {
        info!(
            best = best.name,
            total_seek = best.plan.total_seek,
            "disk policies compared"
        );
    }
    rankings
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn textbook_queue() -> RequestQueue {
        let requests = [98, 183, 37, 122, 14, 124, 65, 67];
        RequestQueue::with_requests(200, 53, requests).unwrap()
    }

    #[test]
    fn test_queue_rejects_bad_requests() {
        let mut queue = RequestQueue::new(200, 50).unwrap();
        queue.push(10).unwrap();

        assert_eq!(queue.push(10), Err(InputError::DuplicateRequest(10)));
        assert_eq!(
            queue.push(200),
            Err(InputError::TrackOutOfRange {
                track: 200,
                disk_size: 200,
            })
        );
        assert_eq!(queue.requests(), &[10]);
    }

    #[test]
    fn test_queue_rejects_bad_geometry() {
        assert_eq!(RequestQueue::new(0, 0), Err(InputError::ZeroDiskSize));
        assert_eq!(
            RequestQueue::new(100, 100),
            Err(InputError::HeadOutOfRange {
                head: 100,
                disk_size: 100,
            })
        );
    }

    #[test]
    fn test_split_at_head_keeps_head_track_above() {
        let requests = [70, 40, 5, 39];
        let queue = RequestQueue::with_requests(100, 40, requests).unwrap();
        assert_eq!(queue.split_at_head(), (vec![5, 39], vec![40, 70]));
    }

    #[test]
    fn test_seek_plan_totals_every_step() {
        let plan = SeekPlan::from_sequence(vec![50, 10, 90, 90]);
        assert_eq!(plan.total_seek, 120);
        assert_eq!(plan.average_seek(), 40.0);
        assert_eq!(SeekPlan::from_sequence(vec![50]).average_seek(), 0.0);
    }

    #[test]
    fn test_compare_ranks_lowest_seek_first() {
        let rankings = compare(&textbook_queue(), Direction::Outward);

        let names: Vec<&str> = rankings.iter().map(|ranking| ranking.name).collect();
        assert_eq!(names, vec!["SSTF", "LOOK", "SCAN", "C-SCAN", "FCFS"]);
        assert!(rankings
            .windows(2)
            .all(|pair| pair[0].plan.total_seek <= pair[1].plan.total_seek));
    }

    #[test]
    fn test_flipped_direction_mirrors_sweep() {
        assert_eq!(Direction::default().flipped(), Direction::Inward);
        assert_eq!(Direction::Inward.flipped(), Direction::Outward);

        let outward = compare(&textbook_queue(), Direction::Outward);
        let inward = compare(&textbook_queue(), Direction::Outward.flipped());
        let look = |rankings: &[Ranking]| {
            rankings
                .iter()
                .find(|ranking| ranking.name == "LOOK")
                .map(|ranking| ranking.plan.total_seek)
        };
        assert_eq!(look(&outward), Some(299));
        assert_eq!(look(&inward), Some(208));
    }

    #[test]
    fn test_compare_empty_queue() {
        let queue = RequestQueue::new(200, 20).unwrap();
        for ranking in compare(&queue, Direction::Inward) {
            assert_eq!(ranking.plan.sequence, vec![20]);
            assert_eq!(ranking.plan.total_seek, 0);
        }
    }
}
