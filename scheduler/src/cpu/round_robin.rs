use super::{validate, CpuScheduler, Process, Schedule, Slice};
use crate::InputError;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

pub struct RoundRobin {
    quantum: u32,
}

impl RoundRobin {
    pub fn new(quantum: u32) -> Result<Self, InputError> {
        if quantum == 0 {
            warn!("rejected a zero time quantum");
            return Err(InputError::ZeroQuantum);
        }
        Ok(Self { quantum })
    }

    pub fn quantum(&self) -> u32 {
        self.quantum
    }
}

/// Moves every process that has arrived by `clock` to the back of the ready queue.
fn admit(arrivals: &mut VecDeque<Process>, ready: &mut VecDeque<Process>, clock: u32) {
    while arrivals
        .front()
        .map_or(false, |process| process.arrival() <= clock)
    {
        ready.extend(arrivals.pop_front());
    }
}

impl CpuScheduler for RoundRobin {
    const NAME: &'static str = "Round Robin Scheduler";

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, InputError> {
        validate(processes)?;

        let mut sorted = processes.to_vec();
        sorted.sort_by_key(|process| (process.arrival(), process.pid()));
        let mut arrivals = VecDeque::from(sorted);

        let mut ready = VecDeque::with_capacity(arrivals.len());
        let mut finished = Vec::with_capacity(arrivals.len());
        let mut timeline = Vec::new();
        let mut clock = 0;

        loop {
            admit(&mut arrivals, &mut ready, clock);

            let Some(mut process) = ready.pop_front() else {
                // The CPU sits unused until the next arrival. No idle slice is recorded here.
                match arrivals.front() {
                    Some(next) => {
                        clock = next.arrival();
                        continue;
                    }
                    None => break,
                }
            };

            process.dispatch(clock);
            let ran = process.run_for(self.quantum);
            timeline.push(Slice::Busy {
                pid: process.pid(),
                start: clock,
                end: clock + ran,
            });
            clock += ran;

            // Arrivals during the slice queue up ahead of the preempted process
            admit(&mut arrivals, &mut ready, clock);

            if process.is_finished() {
                process.complete(clock);
                debug!(pid = process.pid(), completion = clock, "process finished");
                finished.push(process);
            } else {
                ready.push_back(process);
            }
        }

        info!(
            policy = Self::NAME,
            quantum = self.quantum,
            makespan = clock,
            "schedule computed"
        );
        Ok(Schedule {
            processes: finished,
            timeline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::tests::busy;
    use std::collections::HashMap;

    #[test]
    fn test_round_robin_rejects_zero_quantum() {
        assert!(matches!(RoundRobin::new(0), Err(InputError::ZeroQuantum)));
        assert_eq!(RoundRobin::new(4).map(|rr| rr.quantum()), Ok(4));
    }

    #[test]
    fn test_round_robin_slices_and_requeues() {
        let processes = vec![
            Process::new(1, 0, 5),
            Process::new(2, 1, 3),
            Process::new(3, 2, 1),
        ];
        let schedule = RoundRobin::new(2).unwrap().schedule(&processes).unwrap();

        assert_eq!(
            schedule.timeline,
            vec![
                busy(1, 0, 2),
                busy(2, 2, 4),
                busy(3, 4, 5),
                busy(1, 5, 7),
                busy(2, 7, 8),
                busy(1, 8, 9),
            ]
        );

        let order: Vec<u32> = schedule.processes.iter().map(Process::pid).collect();
        assert_eq!(order, vec![3, 2, 1]);

        let p1 = schedule.process(1).unwrap();
        assert_eq!(p1.start_time(), Some(0));
        assert_eq!(p1.turnaround_time(), 9);
        assert_eq!(p1.waiting_time(), 4);
        assert_eq!(schedule.process(3).map(Process::waiting_time), Some(2));
    }

    #[test]
    fn test_round_robin_arrival_queues_before_preempted_process() {
        let processes = vec![Process::new(1, 0, 4), Process::new(2, 2, 2)];
        let schedule = RoundRobin::new(2).unwrap().schedule(&processes).unwrap();

        let order: Vec<u32> = schedule.timeline.iter().filter_map(Slice::pid).collect();
        assert_eq!(order, vec![1, 2, 1]);
    }

    #[test]
    fn test_round_robin_jumps_gap_without_idle_slice() {
        let processes = vec![Process::new(1, 0, 2), Process::new(2, 5, 1)];
        let schedule = RoundRobin::new(2).unwrap().schedule(&processes).unwrap();

        assert_eq!(schedule.timeline, vec![busy(1, 0, 2), busy(2, 5, 6)]);
        assert!(schedule.timeline.iter().all(|slice| !slice.is_idle()));
        assert_eq!(schedule.process(2).map(Process::waiting_time), Some(0));
    }

    #[test]
    fn test_round_robin_wait_between_dispatches_is_bounded() {
        let quantum = 3;
        let processes = vec![
            Process::new(1, 0, 10),
            Process::new(2, 0, 4),
            Process::new(3, 0, 7),
            Process::new(4, 0, 12),
        ];
        let bound = (processes.len() as u32 - 1) * quantum;
        let schedule = RoundRobin::new(quantum)
            .unwrap()
            .schedule(&processes)
            .unwrap();

        let mut last_end = HashMap::new();
        for slice in &schedule.timeline {
            let pid = slice.pid().unwrap();
            if let Some(end) = last_end.insert(pid, slice.end()) {
                assert!(slice.start() - end <= bound, "P{pid} waited too long");
            }
        }
    }

    #[test]
    fn test_round_robin_large_quantum_matches_fcfs() {
        let processes = vec![
            Process::new(1, 0, 3),
            Process::new(2, 1, 2),
            Process::new(3, 7, 1),
        ];
        let rr = RoundRobin::new(100).unwrap().schedule(&processes).unwrap();
        let fcfs = super::super::Fcfs.schedule(&processes).unwrap();

        for process in &fcfs.processes {
            assert_eq!(
                rr.process(process.pid()).map(Process::completion_time),
                Some(process.completion_time())
            );
        }
    }
}
