use allocation_sim::{
    files::{FileAllocationSimulator, Strategy},
    memory::{FitPolicy, PartitionTable},
    AllocError,
};
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SIM_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    partitions().map_err(io::Error::other)?;
    files().map_err(io::Error::other)?;
    Ok(())
}

fn partitions() -> Result<(), AllocError> {
    let sizes = [100, 500, 200, 300, 600];
    println!("* Partitions (KB): {sizes:?}");

    for policy in FitPolicy::ALL {
        let mut table = PartitionTable::with_sizes(sizes)?;
        for (pid, request) in [("P1", 212), ("P2", 417), ("P3", 112), ("P4", 426)] {
            match table.allocate(policy, pid, request) {
                Ok(index) => println!(
                    "* {}: {pid} ({request}KB) -> partition {index} ({}KB)",
                    policy.name(),
                    sizes[index]
                ),
                Err(error) if error.is_capacity() => println!(
                    "* {}: {pid} ({request}KB) must wait, {error}",
                    policy.name()
                ),
                Err(error) => return Err(error),
            }
        }

        let stats = table.stats();
        println!(
            "* {}: allocated {}KB of {}KB, internal fragmentation {}KB",
            policy.name(),
            stats.allocated,
            stats.total,
            stats.internal_fragmentation
        );
    }
    Ok(())
}

fn files() -> Result<(), AllocError> {
    let mut simulator = FileAllocationSimulator::with_seed(20, 0);
    let blocks = simulator.device().len();
    println!("* Created a device with {blocks} blocks.");

    let a = simulator.create_file("a.txt", 4, Strategy::Contiguous)?;
    simulator.create_file("b.txt", 5, Strategy::Contiguous)?;
    let c = simulator.create_file("c.txt", 3, Strategy::Contiguous)?;
    simulator.delete_file(a)?;
    simulator.delete_file(c)?;

    let (free, fragments) = simulator.fragmentation();
    println!("* Deleted a.txt and c.txt: {free} free blocks in {fragments} fragments.");

    for strategy in Strategy::ALL {
        match simulator.create_file("d.txt", 6, strategy) {
            Ok(id) => {
                if let Some(file) = simulator.file(id) {
                    println!("* {}: d.txt placed at {}", strategy.name(), file.location());
                }
                simulator.delete_file(id)?;
            }
            Err(error) => println!("* {}: d.txt rejected, {error}", strategy.name()),
        }
    }

    let stats = simulator.stats();
    println!(
        "* Device: {} files, {}/{} blocks used ({:.1}%).",
        stats.files, stats.used_blocks, stats.total_blocks, stats.utilization
    );
    Ok(())
}
