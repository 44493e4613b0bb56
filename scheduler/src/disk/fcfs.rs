use super::{DiskScheduler, RequestQueue, SeekPlan};
use tracing::debug;

/// Services requests in the order they were queued.
pub struct DiskFcfs;

impl DiskScheduler for DiskFcfs {
    const NAME: &'static str = "FCFS";

    fn service(&self, queue: &RequestQueue) -> SeekPlan {
        let mut sequence = Vec::with_capacity(queue.len() + 1);
        sequence.push(queue.head());
        sequence.extend_from_slice(queue.requests());

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
    fn test_fcfs_keeps_insertion_order() {
        let plan = DiskFcfs.service(&textbook_queue());

        assert_eq!(plan.sequence, vec![53, 98, 183, 37, 122, 14, 124, 65, 67]);
        assert_eq!(plan.total_seek, 640);
    }
}
