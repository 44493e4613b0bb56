use allocation_sim::consts::DEFAULT_DEVICE_BLOCKS;
use scheduling_sim::{
    cpu::DEFAULT_QUANTUM,
    disk::{Direction, DEFAULT_DISK_SIZE},
};
use std::{env, path::PathBuf, process, time::Duration};

const DEFAULT_TICK_RATE: Duration = Duration::from_millis(200);
const DEFAULT_LOG_FILE: &str = "scheduling-sim.log";

/// Viewer settings, filled from the command line.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Seed for generated scenarios. Random when not given.
    pub seed: Option<u64>,
    pub quantum: u32,
    pub tick_rate: Duration,
    pub disk_size: u32,
    pub device_blocks: usize,
    pub direction: Direction,
    pub log_file: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            quantum: DEFAULT_QUANTUM,
            tick_rate: DEFAULT_TICK_RATE,
            disk_size: DEFAULT_DISK_SIZE,
            device_blocks: DEFAULT_DEVICE_BLOCKS,
            direction: Direction::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

fn print_help(program: &str) {
    eprintln!("Scheduling and allocation policy viewer");
    eprintln!();
    eprintln!("Usage: {program} [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --seed <N>         Seed for the generated scenario");
    eprintln!("  --quantum <N>      Round Robin time quantum (default {DEFAULT_QUANTUM})");
    eprintln!("  --tick-ms <N>      Playback speed in milliseconds (default 200)");
    eprintln!("  --disk-size <N>    Number of disk tracks (default {DEFAULT_DISK_SIZE})");
    eprintln!("  --blocks <N>       Blocks on the file device (default {DEFAULT_DEVICE_BLOCKS})");
    eprintln!("  --inward           Sweep towards track 0 first");
    eprintln!("  --log <PATH>       Log file (default {DEFAULT_LOG_FILE}), filtered by SIM_LOG");
    eprintln!("  -h, --help         Print this help message");
    eprintln!();
    eprintln!("Keys: q quit, p pause, r resume, s step, d flip disk direction,");
    eprintln!("      tab next panel, n new scenario");
}

fn value<T: std::str::FromStr>(flag: &str, raw: Option<&String>) -> Result<T, String> {
    let raw = raw.ok_or_else(|| format!("Missing value for {flag}"))?;
    raw.parse()
        .map_err(|_| format!("Invalid value for {flag}: {raw}"))
}

pub fn parse_args() -> Result<ViewerConfig, String> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("scheduling-sim", String::as_str);

    let mut config = ViewerConfig::default();
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help(program);
                process::exit(0);
            }
            "--seed" => config.seed = Some(value(arg, rest.next())?),
            "--quantum" => config.quantum = value(arg, rest.next())?,
            "--tick-ms" => config.tick_rate = Duration::from_millis(value(arg, rest.next())?),
            "--disk-size" => config.disk_size = value(arg, rest.next())?,
            "--blocks" => config.device_blocks = value(arg, rest.next())?,
            "--inward" => config.direction = Direction::Inward,
            "--log" => config.log_file = value(arg, rest.next())?,
            _ => {
                return Err(format!(
                    "Unknown option: {arg}\nUse --help for usage information."
                ))
            }
        }
    }

    if config.disk_size == 0 {
        return Err("--disk-size must be at least 1".to_owned());
    }
    Ok(config)
}
