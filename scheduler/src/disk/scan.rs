use super::{Direction, DiskScheduler, RequestQueue, SeekPlan};
use tracing::debug;

/// The elevator algorithm. Bounces off the end of the disk when requests are waiting
/// on the other side of the head.
pub struct Scan {
    direction: Direction,
}

/// Like [`Scan`], but turns around at the last pending request instead of the disk edge.
pub struct Look {
    direction: Direction,
}

impl Scan {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

impl Look {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

fn sweep(queue: &RequestQueue, direction: Direction, touch_edge: bool) -> SeekPlan {
    let (below, above) = queue.split_at_head();
    let bounces = !below.is_empty() && !above.is_empty();

    let mut sequence = Vec::with_capacity(queue.len() + 2);
    sequence.push(queue.head());

    match direction {
        Direction::Outward => {
            sequence.extend(&above);
            if touch_edge && bounces && sequence.last() != Some(&queue.last_track()) {
                sequence.push(queue.last_track());
            }
            sequence.extend(below.iter().rev());
        }
        Direction::Inward => {
            sequence.extend(below.iter().rev());
            if touch_edge && bounces && sequence.last() != Some(&0) {
                sequence.push(0);
            }
            sequence.extend(&above);
        }
    }

    SeekPlan::from_sequence(sequence)
}

impl DiskScheduler for Scan {
    const NAME: &'static str = "SCAN";

    fn service(&self, queue: &RequestQueue) -> SeekPlan {
        let plan = sweep(queue, self.direction, true);
        debug!(
            policy = Self::NAME,
            total_seek = plan.total_seek,
            "disk queue serviced"
        );
        plan
    }
}

impl DiskScheduler for Look {
    const NAME: &'static str = "LOOK";

    fn service(&self, queue: &RequestQueue) -> SeekPlan {
        let plan = sweep(queue, self.direction, false);
        debug!(
            policy = Self::NAME,
            total_seek = plan.total_seek,
            "disk queue serviced"
        );
        plan
    }
}
