mod display;
mod runner;

use crate::{config::ViewerConfig, scenario::Scenario};
use allocation_sim::{
    files::FileAllocationSimulator,
    memory::{FitPolicy, PartitionTable},
    AllocError,
};
use rand::{rngs::StdRng, SeedableRng};
use scheduling_sim::{
    cpu::{CpuScheduler, Fcfs, PriorityScheduler, RoundRobin, Schedule, ShortestJobFirst},
    disk::{self, Ranking, RequestQueue},
    InputError,
};
use std::{error::Error, fmt};
use tracing::info;

pub use runner::SimulationRunner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Cpu,
    Disk,
    Memory,
    Files,
}

impl Panel {
    pub const ALL: [Panel; 4] = [Self::Cpu, Self::Disk, Self::Memory, Self::Files];

    pub fn title(self) -> &'static str {
        match self {
            Self::Cpu => "CPU Scheduling",
            Self::Disk => "Disk Scheduling",
            Self::Memory => "Memory Allocation",
            Self::Files => "File Allocation",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&p| p == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

#[derive(Debug)]
pub enum SetupError {
    Input(InputError),
    Alloc(AllocError),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(error) => write!(f, "invalid scheduling input: {error}"),
            Self::Alloc(error) => write!(f, "invalid allocation input: {error}"),
        }
    }
}

impl Error for SetupError {}

impl From<InputError> for SetupError {
    fn from(error: InputError) -> Self {
        Self::Input(error)
    }
}

impl From<AllocError> for SetupError {
    fn from(error: AllocError) -> Self {
        Self::Alloc(error)
    }
}

pub struct CpuRun {
    pub name: &'static str,
    pub schedule: Schedule,
}

fn cpu_run<S: CpuScheduler>(scheduler: &S, scenario: &Scenario) -> Result<CpuRun, InputError> {
    Ok(CpuRun {
        name: S::NAME,
        schedule: scheduler.schedule(&scenario.processes)?,
    })
}

pub struct MemoryRun {
    pub policy: FitPolicy,
    pub table: PartitionTable,
    /// One line per request, placed or not.
    pub outcomes: Vec<String>,
}

/// Results of every engine for one scenario.
pub struct Simulation {
    pub cpu: Vec<CpuRun>,
    pub queue: RequestQueue,
    pub disk: Vec<Ranking>,
    pub memory: Vec<MemoryRun>,
    pub files: FileAllocationSimulator,
    pub file_log: Vec<String>,
}

impl Simulation {
    pub fn run(scenario: &Scenario, config: &ViewerConfig) -> Result<Self, SetupError> {
        let cpu = vec![
            cpu_run(&Fcfs, scenario)?,
            cpu_run(&ShortestJobFirst, scenario)?,
            cpu_run(&PriorityScheduler, scenario)?,
            cpu_run(&RoundRobin::new(config.quantum)?, scenario)?,
        ];

        let queue = RequestQueue::with_requests(
            config.disk_size,
            scenario.head,
            scenario.requests.iter().copied(),
        )?;
        let disk = disk::compare(&queue, config.direction);

        let mut memory = Vec::with_capacity(FitPolicy::ALL.len());
        for policy in FitPolicy::ALL {
            let sizes = scenario.partition_sizes.iter().copied();
            let mut table = PartitionTable::with_sizes(sizes)?;
            let outcomes = scenario
                .memory_requests
                .iter()
                .zip(1..)
                .map(|(&size, n)| {
                    let pid = format!("P{n}");
                    match table.allocate(policy, &pid, size) {
                        Ok(index) => format!("{pid} ({size}KB) -> block {index}"),
                        Err(error) => format!("{pid} ({size}KB) failed: {error}"),
                    }
                })
                .collect();
            memory.push(MemoryRun {
                policy,
                table,
                outcomes,
            });
        }

        let mut files =
            FileAllocationSimulator::with_seed(config.device_blocks, scenario.device_seed);
        let mut file_log = Vec::with_capacity(scenario.files.len());
        for request in &scenario.files {
            let strategy = request.strategy;
            let line = match files.create_file(&request.name, request.size, strategy) {
                Ok(id) => format!("{} -> {id} ({})", request.name, strategy.name()),
                Err(error) => format!("{} failed: {error}", request.name),
            };
            file_log.push(line);
        }

        Ok(Self {
            cpu,
            queue,
            disk,
            memory,
            files,
            file_log,
        })
    }
}

/// Everything the display needs. Kept apart from the engines, which never see it.
pub struct App {
    config: ViewerConfig,
    rng: StdRng,
    scenario: Scenario,
    simulation: Simulation,
    panel: Panel,
    step: usize,
}

impl App {
    pub fn new(config: ViewerConfig) -> Result<Self, SetupError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let scenario = Scenario::generate(&mut rng, &config);
        let simulation = Simulation::run(&scenario, &config)?;

        Ok(Self {
            config,
            rng,
            scenario,
            simulation,
            panel: Panel::Cpu,
            step: 1,
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    /// How many timeline entries or seek steps are revealed so far.
    pub fn step(&self) -> usize {
        self.step
    }

    fn last_step(&self) -> usize {
        match self.panel {
            Panel::Cpu => self
                .simulation
                .cpu
                .iter()
                .map(|run| run.schedule.timeline.len())
                .max()
                .unwrap_or(0),
            Panel::Disk => self.simulation.queue.len() + 3,
            Panel::Memory | Panel::Files => 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.last_step()
    }

    pub fn advance(&mut self) {
        if !self.is_finished() {
            self.step += 1;
        }
    }

    pub fn next_panel(&mut self) {
        self.panel = self.panel.next();
        self.step = 1;
    }

    /// Re-runs the disk policies with the sweep heading the other way first.
    pub fn flip_direction(&mut self) {
        self.config.direction = self.config.direction.flipped();
        self.simulation.disk = disk::compare(&self.simulation.queue, self.config.direction);
        self.step = 1;
    }

    pub fn regenerate(&mut self) -> Result<(), SetupError> {
        let scenario = Scenario::generate(&mut self.rng, &self.config);
        self.simulation = Simulation::run(&scenario, &self.config)?;
        self.scenario = scenario;
        self.step = 1;
        info!(
            processes = self.scenario.processes.len(),
            "generated a new scenario"
        );
        Ok(())
    }
}
