use super::{DiskScheduler, RequestQueue, SeekPlan};
use tracing::debug;

/// Shortest seek time first. Equidistant requests go to the lower track.
pub struct Sstf;

fn nearest(pending: &[u32], current: u32) -> Option<usize> {
    pending
        .iter()
        .enumerate()
        .min_by_key(|&(_, &track)| (track.abs_diff(current), track))
        .map(|(index, _)| index)
}

impl DiskScheduler for Sstf {
    const NAME: &'static str = "SSTF";

    fn service(&self, queue: &RequestQueue) -> SeekPlan {
        let mut pending = queue.requests().to_vec();
        let mut current = queue.head();
        let mut sequence = Vec::with_capacity(pending.len() + 1);
        sequence.push(current);

        while let Some(index) = nearest(&pending, current) {
            current = pending.swap_remove(index);
            sequence.push(current);
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
    use crate::disk::{tests::textbook_queue, DiskFcfs};

    #[test]
    fn test_sstf_follows_nearest_request() {
        let plan = Sstf.service(&textbook_queue());

        assert_eq!(plan.sequence, vec![53, 65, 67, 37, 14, 98, 122, 124, 183]);
        assert_eq!(plan.total_seek, 236);
        let fcfs = DiskFcfs.service(&textbook_queue());
        assert!(plan.total_seek <= fcfs.total_seek);
    }

    #[test]
    fn test_sstf_tie_goes_to_lower_track() {
        let queue = RequestQueue::with_requests(100, 50, [60, 40]).unwrap();
        let plan = Sstf.service(&queue);

        assert_eq!(plan.sequence, vec![50, 40, 60]);
    }
}
