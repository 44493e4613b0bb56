use crate::config::ViewerConfig;
use allocation_sim::{
    consts::{
        MAX_FILE_BLOCKS, MAX_PARTITIONS, MIN_FILE_BLOCKS, MIN_PARTITIONS, PARTITION_SIZE_CHOICES,
    },
    files::Strategy,
};
use rand::{rngs::StdRng, seq::index, Rng};
use scheduling_sim::cpu::Process;

pub struct FileRequest {
    pub name: String,
    pub size: usize,
    pub strategy: Strategy,
}

/// Random input for all four engines.
pub struct Scenario {
    pub processes: Vec<Process>,
    pub head: u32,
    pub requests: Vec<u32>,
    pub partition_sizes: Vec<u32>,
    pub memory_requests: Vec<u32>,
    pub files: Vec<FileRequest>,
    /// Seed for the random block choice of linked and indexed files.
    pub device_seed: u64,
}

impl Scenario {
    pub fn generate(rng: &mut StdRng, config: &ViewerConfig) -> Self {
        let processes = (1..=rng.random_range(4..=6))
            .map(|pid| {
                Process::with_priority(
                    pid,
                    rng.random_range(0..10),
                    rng.random_range(1..=10),
                    rng.random_range(0..5),
                )
            })
            .collect();

        let tracks = config.disk_size as usize;
        let request_count = rng.random_range(6..=10).min(tracks);
        let requests = index::sample(rng, tracks, request_count)
            .into_iter()
            .map(|track| track as u32)
            .collect();

        let choices = PARTITION_SIZE_CHOICES.len();
        let partition_sizes = (0..rng.random_range(MIN_PARTITIONS..=MAX_PARTITIONS))
            .map(|_| PARTITION_SIZE_CHOICES[rng.random_range(0..choices)])
            .collect();
        let memory_requests = (0..rng.random_range(3..=5))
            .map(|_| rng.random_range(30..=220))
            .collect();

        let files = (1..=rng.random_range(4..=6))
            .map(|i| FileRequest {
                name: format!("file{i}.txt"),
                size: rng.random_range(MIN_FILE_BLOCKS..=MAX_FILE_BLOCKS),
                strategy: Strategy::ALL[rng.random_range(0..Strategy::ALL.len())],
            })
            .collect();

        Self {
            processes,
            head: rng.random_range(0..config.disk_size),
            requests,
            partition_sizes,
            memory_requests,
            files,
            device_seed: rng.random(),
        }
    }
}
