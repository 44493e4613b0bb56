use super::{run_to_completion, validate, CpuScheduler, Process, Schedule};
use crate::InputError;
use tracing::info;

/// Non-preemptive priority scheduling, lower priority values run first.
pub struct PriorityScheduler;

impl CpuScheduler for PriorityScheduler {
    const NAME: &'static str = "Priority Scheduler";

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, InputError> {
        validate(processes)?;

        let mut pending = processes.to_vec();
        pending.sort_by_key(|p| (p.arrival(), p.priority(), p.pid()));

        let schedule = run_to_completion(pending, Process::priority);
        info!(
            policy = Self::NAME,
            makespan = schedule.makespan(),
            "schedule computed"
        );
        Ok(schedule)
    }
}
