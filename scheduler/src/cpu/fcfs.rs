use super::{validate, CpuScheduler, Process, Schedule, Slice};
use crate::InputError;
use tracing::info;

/// First come, first served. Ties on arrival go to the lower pid.
pub struct Fcfs;

impl CpuScheduler for Fcfs {
    const NAME: &'static str = "First Come First Serve";

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, InputError> {
        validate(processes)?;

        let mut processes = processes.to_vec();
        processes.sort_by_key(|process| (process.arrival(), process.pid()));

        let mut clock = 0;
        let mut timeline = Vec::with_capacity(processes.len());
        for process in &mut processes {
            if clock < process.arrival() {
                timeline.push(Slice::Idle {
                    start: clock,
                    end: process.arrival(),
                });
                clock = process.arrival();
            }

            process.dispatch(clock);
            let ran = process.run_for(process.burst());
            timeline.push(Slice::Busy {
                pid: process.pid(),
                start: clock,
                end: clock + ran,
            });
            clock += ran;
            process.complete(clock);
        }

        info!(policy = Self::NAME, makespan = clock, "schedule computed");
        Ok(Schedule {
            processes,
            timeline,
        })
    }
}
