mod fcfs;
mod priority;
mod process;
mod round_robin;
mod sjf;

use crate::InputError;
use std::{collections::HashSet, fmt};
use tracing::{debug, warn};

pub use fcfs::Fcfs;
pub use priority::PriorityScheduler;
pub use process::Process;
pub use round_robin::RoundRobin;
pub use sjf::ShortestJobFirst;

pub const DEFAULT_QUANTUM: u32 = 2;

/// A CPU scheduling policy.
///
/// The input slice is only read. Every run works on its own clones, so the same
/// processes can be handed to several policies one after the other.
pub trait CpuScheduler {
    const NAME: &'static str;

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, InputError>;
}

/// One entry of the Gantt chart, covering `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Busy { pid: u32, start: u32, end: u32 },
    Idle { start: u32, end: u32 },
}

impl Slice {
    pub fn start(&self) -> u32 {
        match *self {
            Self::Busy { start, .. } | Self::Idle { start, .. } => start,
        }
    }

    pub fn end(&self) -> u32 {
        match *self {
            Self::Busy { end, .. } | Self::Idle { end, .. } => end,
        }
    }

    pub fn duration(&self) -> u32 {
        self.end() - self.start()
    }

    pub fn pid(&self) -> Option<u32> {
        match *self {
            Self::Busy { pid, .. } => Some(pid),
            Self::Idle { .. } => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle { .. })
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy { pid, start, end } => write!(f, "P{pid}({start}-{end})"),
            Self::Idle { start, end } => write!(f, "idle({start}-{end})"),
        }
    }
}

/// The outcome of a scheduling run. `processes` is in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    pub processes: Vec<Process>,
    pub timeline: Vec<Slice>,
}

impl Schedule {
    pub fn process(&self, pid: u32) -> Option<&Process> {
        self.processes.iter().find(|process| process.pid() == pid)
    }

    pub fn makespan(&self) -> u32 {
        self.timeline.last().map_or(0, Slice::end)
    }

    pub fn busy_time(&self) -> u32 {
        self.timeline
            .iter()
            .filter(|slice| !slice.is_idle())
            .map(Slice::duration)
            .sum()
    }

    pub fn average_waiting(&self) -> f64 {
        self.average(Process::waiting_time)
    }

    pub fn average_turnaround(&self) -> f64 {
        self.average(Process::turnaround_time)
    }

    fn average(&self, metric: fn(&Process) -> u32) -> f64 {
        if self.processes.is_empty() {
            return 0.0;
        }
        let total: u64 = self.processes.iter().map(|p| metric(p) as u64).sum();
        total as f64 / self.processes.len() as f64
    }
}

fn validate(processes: &[Process]) -> Result<(), InputError> {
    let mut seen = HashSet::with_capacity(processes.len());
    for process in processes {
        let error = if process.burst() == 0 {
            InputError::ZeroBurst { pid: process.pid() }
        } else if !seen.insert(process.pid()) {
            InputError::DuplicatePid(process.pid())
        } else {
            continue;
        };
        warn!(%error, "rejected process set");
        return Err(error);
    }

    // No policy can finish later than the last arrival plus the total burst
    let last_arrival = processes.iter().map(Process::arrival).max().unwrap_or(0);
    let makespan = processes
        .iter()
        .try_fold(last_arrival, |end, p| end.checked_add(p.burst()));
    if makespan.is_none() {
        let error = InputError::ClockOverflow;
        warn!(%error, "rejected process set");
        return Err(error);
    }
    Ok(())
}

/// Shared loop of the non-preemptive policies. `pending` must already be sorted so that
/// ties on `key` are won by the earliest entry.
fn run_to_completion<K, F>(mut pending: Vec<Process>, key: F) -> Schedule
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    let mut clock = 0;
    let mut processes = Vec::with_capacity(pending.len());
    let mut timeline = Vec::with_capacity(pending.len());

    while !pending.is_empty() {
        let selected = pending
            .iter()
            .enumerate()
            .filter(|(_, process)| process.arrival() <= clock)
            .min_by_key(|(_, process)| key(process))
            .map(|(index, _)| index);

        let Some(index) = selected else {
            // Nothing has arrived yet, so skip ahead to the next arrival
            let Some(next_arrival) = pending.iter().map(Process::arrival).min() else {
                break;
            };
            timeline.push(Slice::Idle {
                start: clock,
                end: next_arrival,
            });
            clock = next_arrival;
            continue;
        };

        let mut process = pending.remove(index);
        process.dispatch(clock);
        let ran = process.run_for(process.burst());
        timeline.push(Slice::Busy {
            pid: process.pid(),
            start: clock,
            end: clock + ran,
        });
        clock += ran;
        process.complete(clock);
        debug!(pid = process.pid(), completion = clock, "process finished");

        processes.push(process);
    }

    Schedule {
        processes,
        timeline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn busy(pid: u32, start: u32, end: u32) -> Slice {
        Slice::Busy { pid, start, end }
    }

    /// Bursts 7, 4, 1, 4 for P1..P4, all arriving at 0
    fn batch() -> Vec<Process> {
        [7, 4, 1, 4]
            .into_iter()
            .zip(1..)
            .map(|(burst, pid)| Process::new(pid, 0, burst))
            .collect()
    }

    fn mixed() -> Vec<Process> {
        vec![
            Process::with_priority(1, 0, 5, 3),
            Process::with_priority(2, 1, 3, 1),
            Process::with_priority(3, 2, 8, 4),
            Process::with_priority(4, 3, 6, 2),
            Process::with_priority(5, 20, 2, 0),
        ]
    }

    fn all_schedules(processes: &[Process]) -> Vec<Schedule> {
        vec![
            Fcfs.schedule(processes).unwrap(),
            ShortestJobFirst.schedule(processes).unwrap(),
            PriorityScheduler.schedule(processes).unwrap(),
            RoundRobin::new(3).unwrap().schedule(processes).unwrap(),
        ]
    }

    #[test]
    fn test_conservation_law_holds_for_every_policy() {
        for schedule in all_schedules(&mixed()) {
            assert_eq!(schedule.processes.len(), 5);
            for process in &schedule.processes {
                assert!(process.is_finished());
                assert_eq!(
                    process.completion_time() - process.arrival(),
                    process.turnaround_time()
                );
                assert_eq!(
                    process.turnaround_time() - process.burst(),
                    process.waiting_time()
                );
            }
        }
    }

    #[test]
    fn test_busy_time_matches_total_burst() {
        let total_burst: u32 = mixed().iter().map(Process::burst).sum();
        for schedule in all_schedules(&mixed()) {
            assert_eq!(schedule.busy_time(), total_burst);
        }
    }

    #[test]
    fn test_input_is_not_mutated_between_runs() {
        let processes = mixed();
        let snapshot = processes.clone();

        let first = RoundRobin::new(2).unwrap().schedule(&processes).unwrap();
        let second = RoundRobin::new(2).unwrap().schedule(&processes).unwrap();

        assert_eq!(processes, snapshot);
        assert_eq!(first, second);
        assert!(processes.iter().all(|p| p.start_time().is_none()));
    }

    #[test]
    fn test_sjf_has_lowest_average_waiting_on_batch() {
        let schedules = all_schedules(&batch());
        let sjf = schedules[1].average_waiting();

        assert_eq!(sjf, 3.75);
        assert_eq!(schedules[0].average_waiting(), 7.5);
        for schedule in &schedules {
            assert!(sjf <= schedule.average_waiting());
        }
    }

    #[test]
    fn test_idle_slices_keep_timeline_contiguous() {
        let processes = vec![Process::new(1, 2, 3), Process::new(2, 9, 1)];
        for schedule in &all_schedules(&processes)[..3] {
            assert_eq!(schedule.timeline.first().map(Slice::start), Some(0));
            for pair in schedule.timeline.windows(2) {
                assert_eq!(pair[0].end(), pair[1].start());
            }
            assert_eq!(schedule.makespan(), 10);
        }
    }

    #[test]
    fn test_rejects_zero_burst_and_duplicates() {
        let zero = vec![Process::new(1, 0, 3), Process::new(2, 0, 0)];
        assert_eq!(Fcfs.schedule(&zero), Err(InputError::ZeroBurst { pid: 2 }));

        let duplicate = vec![Process::new(4, 0, 3), Process::new(4, 1, 2)];
        assert_eq!(
            ShortestJobFirst.schedule(&duplicate),
            Err(InputError::DuplicatePid(4))
        );
    }

    #[test]
    fn test_rejects_work_that_overflows_the_clock() {
        let late = vec![Process::new(1, u32::MAX - 1, 5)];
        let long = vec![Process::new(1, 0, u32::MAX), Process::new(2, 0, 1)];
        let round_robin = RoundRobin::new(2).unwrap();

        for processes in [late, long] {
            let overflow = Err(InputError::ClockOverflow);
            assert_eq!(Fcfs.schedule(&processes), overflow);
            assert_eq!(ShortestJobFirst.schedule(&processes), overflow);
            assert_eq!(PriorityScheduler.schedule(&processes), overflow);
            assert_eq!(round_robin.schedule(&processes), overflow);
        }
    }

    #[test]
    fn test_work_may_end_exactly_at_clock_limit() {
        let processes = vec![Process::new(1, u32::MAX - 5, 5)];
        for schedule in all_schedules(&processes) {
            assert_eq!(schedule.makespan(), u32::MAX);
            assert_eq!(schedule.process(1).map(Process::waiting_time), Some(0));
        }
    }

    #[test]
    fn test_empty_input_gives_empty_schedule() {
        for schedule in all_schedules(&[]) {
            assert!(schedule.timeline.is_empty());
            assert_eq!(schedule.makespan(), 0);
            assert_eq!(schedule.average_waiting(), 0.0);
        }
    }

    #[test]
    fn test_slice_display() {
        let busy = Slice::Busy {
            pid: 3,
            start: 4,
            end: 9,
        };
        let idle = Slice::Idle { start: 0, end: 4 };
        assert_eq!(busy.to_string(), "P3(4-9)");
        assert_eq!(idle.to_string(), "idle(0-4)");
        assert_eq!(busy.duration(), 5);
        assert_eq!(idle.pid(), None);
    }
}
