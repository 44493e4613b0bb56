use super::{Direction, DiskScheduler, RequestQueue, SeekPlan};
use tracing::debug;

/// Circular SCAN. Sweeps one way only and wraps to the opposite edge of the disk
/// instead of reversing. The wrap is charged as head movement.
pub struct CScan {
    direction: Direction,
}

impl CScan {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

impl DiskScheduler for CScan {
    const NAME: &'static str = "C-SCAN";

    fn service(&self, queue: &RequestQueue) -> SeekPlan {
        let (below, above) = queue.split_at_head();
        let last_track = queue.last_track();

        let mut sequence = Vec::with_capacity(queue.len() + 3);
        sequence.push(queue.head());

        match self.direction {
            Direction::Outward => {
                sequence.extend(&above);
                if !above.is_empty() && sequence.last() != Some(&last_track) {
                    sequence.push(last_track);
                }
                if !below.is_empty() {
                    if below[0] != 0 {
                        sequence.push(0);
                    }
                    sequence.extend(&below);
                }
            }
            Direction::Inward => {
                sequence.extend(below.iter().rev());
                if !below.is_empty() && sequence.last() != Some(&0) {
                    sequence.push(0);
                }
                if !above.is_empty() {
                    if above.last() != Some(&last_track) {
                        sequence.push(last_track);
                    }
                    sequence.extend(above.iter().rev());
                }
            }
        }

        let plan = SeekPlan::from_sequence(sequence);
        debug!(
            policy = Self::NAME,
            total_seek = plan.total_seek,
            "disk queue serviced"
        );
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::tests::textbook_queue;

    #[test]
    fn test_c_scan_outward_wraps_to_track_zero() {
        let plan = CScan::new(Direction::Outward).service(&textbook_queue());

        assert_eq!(
            plan.sequence,
            vec![53, 65, 67, 98, 122, 124, 183, 199, 0, 14, 37]
        );
        assert_eq!(plan.total_seek, 382);
    }

    #[test]
    fn test_c_scan_inward_wraps_to_last_track() {
        let plan = CScan::new(Direction::Inward).service(&textbook_queue());

        assert_eq!(
            plan.sequence,
            vec![53, 37, 14, 0, 199, 183, 124, 122, 98, 67, 65]
        );
        assert_eq!(plan.total_seek, 386);
    }

    #[test]
    fn test_c_scan_never_reverses() {
        let plan = CScan::new(Direction::Outward).service(&textbook_queue());
        let wrap = plan.sequence.iter().position(|&t| t == 0).unwrap();

        assert!(plan.sequence[..wrap].windows(2).all(|s| s[0] <= s[1]));
        assert!(plan.sequence[wrap..].windows(2).all(|s| s[0] <= s[1]));
    }

    #[test]
    fn test_c_scan_without_requests_ahead() {
        let queue = RequestQueue::with_requests(100, 60, [20, 0]).unwrap();
        let plan = CScan::new(Direction::Outward).service(&queue);

        assert_eq!(plan.sequence, vec![60, 0, 20]);
        assert_eq!(plan.total_seek, 80);
    }
}
