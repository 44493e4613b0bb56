use super::{run_to_completion, validate, CpuScheduler, Process, Schedule};
use crate::InputError;
use tracing::info;

/// Non-preemptive shortest job first.
pub struct ShortestJobFirst;

impl CpuScheduler for ShortestJobFirst {
    const NAME: &'static str = "Shortest Job First";

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, InputError> {
        validate(processes)?;

        let mut pending = processes.to_vec();
        pending.sort_by_key(|p| (p.arrival(), p.burst(), p.pid()));

        let schedule = run_to_completion(pending, Process::burst);
        info!(
            policy = Self::NAME,
            makespan = schedule.makespan(),
            "schedule computed"
        );
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::{tests::busy, Slice};

    #[test]
    fn test_sjf_picks_shortest_available_job() {
        let processes = vec![
            Process::new(1, 0, 7),
            Process::new(2, 2, 4),
            Process::new(3, 4, 1),
            Process::new(4, 5, 4),
        ];
        let schedule = ShortestJobFirst.schedule(&processes).unwrap();

        let order: Vec<u32> = schedule.timeline.iter().filter_map(Slice::pid).collect();
        assert_eq!(order, vec![1, 3, 2, 4]);
        assert_eq!(schedule.average_waiting(), 4.0);
    }

    #[test]
    fn test_sjf_equal_bursts_go_to_earliest_arrival() {
        let processes = vec![
            Process::new(1, 0, 3),
            Process::new(3, 1, 2),
            Process::new(2, 2, 2),
        ];
        let schedule = ShortestJobFirst.schedule(&processes).unwrap();

        let order: Vec<u32> = schedule.timeline.iter().filter_map(Slice::pid).collect();
        assert_eq!(order, vec![1, 3, 2]);
    }

    #[test]
    fn test_sjf_equal_bursts_and_arrivals_go_to_lower_pid() {
        let processes = vec![Process::new(2, 0, 2), Process::new(1, 0, 2)];
        let schedule = ShortestJobFirst.schedule(&processes).unwrap();

        assert_eq!(schedule.processes[0].pid(), 1);
    }

    #[test]
    fn test_sjf_idles_until_next_arrival() {
        let processes = vec![
            Process::new(1, 0, 1),
            Process::new(2, 6, 2),
            Process::new(3, 4, 9),
        ];
        let schedule = ShortestJobFirst.schedule(&processes).unwrap();

        assert_eq!(
            schedule.timeline,
            vec![
                busy(1, 0, 1),
                Slice::Idle { start: 1, end: 4 },
                busy(3, 4, 13),
                busy(2, 13, 15),
            ]
        );
    }
}
