pub const DEFAULT_DEVICE_BLOCKS: usize = 50;

/// Partition sizes (KB) offered by generated scenarios.
pub const PARTITION_SIZE_CHOICES: [u32; 7] = [50, 75, 100, 125, 150, 200, 250];
pub const MIN_PARTITIONS: usize = 5;
pub const MAX_PARTITIONS: usize = 8;

pub const MIN_FILE_BLOCKS: usize = 2;
pub const MAX_FILE_BLOCKS: usize = 5;
