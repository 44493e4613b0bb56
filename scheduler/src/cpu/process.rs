#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: u32,
    name: String,
    arrival: u32,
    burst: u32,
    priority: i32,
    remaining: u32,
    start_time: Option<u32>,
    completion_time: u32,
    waiting_time: u32,
    turnaround_time: u32,
}

impl Process {
    const DEFAULT_PRIORITY: i32 = 0;

    pub fn new(pid: u32, arrival: u32, burst: u32) -> Self {
        Process::with_priority(pid, arrival, burst, Process::DEFAULT_PRIORITY)
    }

    pub fn with_priority(pid: u32, arrival: u32, burst: u32, priority: i32) -> Self {
        Process::named(pid, &format!("P{pid}"), arrival, burst, priority)
    }

    pub fn named(pid: u32, name: &str, arrival: u32, burst: u32, priority: i32) -> Self {
        Self {
            pid,
            name: name.to_owned(),
            arrival,
            burst,
            priority,
            remaining: burst,
            start_time: None,
            completion_time: 0,
            waiting_time: 0,
            turnaround_time: 0,
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arrival(&self) -> u32 {
        self.arrival
    }

    pub fn burst(&self) -> u32 {
        self.burst
    }

    /// Lower values are more urgent.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// `None` until the process is first dispatched.
    pub fn start_time(&self) -> Option<u32> {
        self.start_time
    }

    pub fn completion_time(&self) -> u32 {
        self.completion_time
    }

    pub fn waiting_time(&self) -> u32 {
        self.waiting_time
    }

    pub fn turnaround_time(&self) -> u32 {
        self.turnaround_time
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    pub(crate) fn dispatch(&mut self, now: u32) {
        self.start_time.get_or_insert(now);
    }

    /// Runs for at most `ticks` and returns how long the process actually ran.
    pub(crate) fn run_for(&mut self, ticks: u32) -> u32 {
        let ran = ticks.min(self.remaining);
        self.remaining -= ran;
        ran
    }

    pub(crate) fn complete(&mut self, now: u32) {
        debug_assert!(self.is_finished(), "P{} completed with work left", self.pid);
        debug_assert!(now >= self.arrival + self.burst);

        self.completion_time = now;
        self.turnaround_time = now - self.arrival;
        self.waiting_time = self.turnaround_time - self.burst;
    }
}
