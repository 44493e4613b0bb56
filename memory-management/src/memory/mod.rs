mod fit;
mod partition;

use crate::AllocError;
use tracing::{debug, info, warn};

pub use fit::FitPolicy;
pub use partition::{Occupant, Partition};

/// Totals over the whole table, in KB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub total: u64,
    pub allocated: u64,
    pub free: u64,
    pub internal_fragmentation: u64,
}

/// An ordered list of fixed partitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionTable {
    partitions: Vec<Partition>,
}

impl PartitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sizes<I>(sizes: I) -> Result<Self, AllocError>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut table = Self::new();
        for size in sizes {
            table.add_partition(size)?;
        }
        Ok(table)
    }

    pub fn add_partition(&mut self, size: u32) -> Result<usize, AllocError> {
        if size == 0 {
            warn!("rejected an empty partition");
            return Err(AllocError::ZeroPartition);
        }
        self.partitions.push(Partition::new(size));
        Ok(self.partitions.len() - 1)
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn get(&self, index: usize) -> Option<&Partition> {
        self.partitions.get(index)
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Places `pid` into the partition chosen by `policy` and returns its index.
    /// On failure the table is left untouched.
    pub fn allocate(
        &mut self,
        policy: FitPolicy,
        pid: &str,
        size: u32,
    ) -> Result<usize, AllocError> {
        let error = if size == 0 {
            AllocError::ZeroSize
        } else if self.find(pid).is_some() {
            AllocError::AlreadyResident(pid.to_owned())
        } else if let Some(index) = policy.select(&self.partitions, size) {
            let partition = &mut self.partitions[index];
            partition.occupy(pid, size);
            info!(
                policy = policy.name(),
                pid,
                size,
                partition = index,
                waste = partition.size() - size,
                "process placed"
            );
            return Ok(index);
        } else {
            AllocError::NoSuitablePartition { requested: size }
        };

        warn!(policy = policy.name(), pid, size, %error, "allocation failed");
        Err(error)
    }

    pub fn first_fit(&mut self, pid: &str, size: u32) -> Result<usize, AllocError> {
        self.allocate(FitPolicy::FirstFit, pid, size)
    }

    pub fn best_fit(&mut self, pid: &str, size: u32) -> Result<usize, AllocError> {
        self.allocate(FitPolicy::BestFit, pid, size)
    }

    pub fn worst_fit(&mut self, pid: &str, size: u32) -> Result<usize, AllocError> {
        self.allocate(FitPolicy::WorstFit, pid, size)
    }

    /// Frees the partition holding `pid` and returns its index.
    pub fn release(&mut self, pid: &str) -> Result<usize, AllocError> {
        let index = self
            .find(pid)
            .ok_or_else(|| AllocError::UnknownProcess(pid.to_owned()))?;
        self.partitions[index].vacate();
        debug!(pid, partition = index, "partition released");
        Ok(index)
    }

    fn find(&self, pid: &str) -> Option<usize> {
        self.partitions.iter().position(|partition| {
            partition
                .occupant()
                .map_or(false, |occupant| occupant.pid == pid)
        })
    }

    pub fn stats(&self) -> MemoryStats {
        let total = self
            .partitions
            .iter()
            .map(|partition| u64::from(partition.size()))
            .sum();
        let allocated = self
            .partitions
            .iter()
            .filter_map(Partition::occupant)
            .map(|occupant| u64::from(occupant.size))
            .sum();
        let internal_fragmentation = self
            .partitions
            .iter()
            .filter_map(Partition::internal_fragmentation)
            .map(u64::from)
            .sum();

        MemoryStats {
            total,
            allocated,
            free: total - allocated,
            internal_fragmentation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textbook_table() -> PartitionTable {
        PartitionTable::with_sizes([100, 500, 200, 300, 600]).unwrap()
    }

    #[test]
    fn test_fit_policies_pick_expected_partition() {
        let expected = [
            (FitPolicy::FirstFit, 500),
            (FitPolicy::BestFit, 300),
            (FitPolicy::WorstFit, 600),
        ];

        for (policy, size) in expected {
            let mut table = textbook_table();
            let index = table.allocate(policy, "P1", 212).unwrap();
            let partition = table.get(index).unwrap();

            assert_eq!(partition.size(), size, "{}", policy.name());
            assert_eq!(
                partition.occupant(),
                Some(&Occupant {
                    pid: "P1".to_owned(),
                    size: 212,
                })
            );
            assert_eq!(partition.internal_fragmentation(), Some(size - 212));
        }
    }

    #[test]
    fn test_convenience_methods_match_policies() {
        let mut table = textbook_table();
        assert_eq!(table.first_fit("P1", 212), Ok(1));
        assert_eq!(table.best_fit("P2", 212), Ok(3));
        assert_eq!(table.worst_fit("P3", 212), Ok(4));
        assert_eq!(table.first_fit("P4", 150), Ok(2));
    }

    #[test]
    fn test_occupied_partitions_are_skipped() {
        let mut table = textbook_table();
        table.first_fit("P1", 400).unwrap();

        assert_eq!(table.first_fit("P2", 400), Ok(4));
        assert_eq!(
            table.first_fit("P3", 400),
            Err(AllocError::NoSuitablePartition { requested: 400 })
        );
    }

    #[test]
    fn test_ties_go_to_first_partition() {
        for policy in FitPolicy::ALL {
            let mut table = PartitionTable::with_sizes([50, 300, 300, 40]).unwrap();
            let placed = table.allocate(policy, "P1", 120);
            assert_eq!(placed, Ok(1), "{}", policy.name());
        }
    }

    #[test]
    fn test_failed_allocation_leaves_table_untouched() {
        let mut table = textbook_table();
        table.best_fit("P1", 90).unwrap();
        let before = table.clone();

        let error = table.worst_fit("P2", 601).unwrap_err();
        assert!(error.is_capacity());
        assert_eq!(table, before);

        assert_eq!(table.best_fit("P3", 0), Err(AllocError::ZeroSize));
        assert_eq!(
            table.best_fit("P1", 10),
            Err(AllocError::AlreadyResident("P1".to_owned()))
        );
        assert_eq!(table, before);
    }

    #[test]
    fn test_partitions_are_never_split() {
        let mut table = PartitionTable::with_sizes([400]).unwrap();
        table.first_fit("P1", 100).unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.first_fit("P2", 100).is_err());
    }

    #[test]
    fn test_release_frees_partition() {
        let mut table = textbook_table();
        table.worst_fit("P1", 212).unwrap();

        assert_eq!(table.release("P1"), Ok(4));
        assert!(table.partitions().iter().all(Partition::is_free));
        assert_eq!(table, textbook_table());
        assert_eq!(
            table.release("P1"),
            Err(AllocError::UnknownProcess("P1".to_owned()))
        );
    }

    #[test]
    fn test_stats_report_internal_fragmentation() {
        let mut table = textbook_table();
        table.best_fit("P1", 212).unwrap();
        table.first_fit("P2", 80).unwrap();

        assert_eq!(
            table.stats(),
            MemoryStats {
                total: 1700,
                allocated: 292,
                free: 1408,
                internal_fragmentation: 88 + 20,
            }
        );
    }

    #[test]
    fn test_stats_hold_totals_beyond_u32() {
        let mut table = PartitionTable::with_sizes([u32::MAX, 2, u32::MAX]).unwrap();
        table.first_fit("P1", u32::MAX).unwrap();
        table.first_fit("P2", 1).unwrap();
        table.first_fit("P3", 5).unwrap();

        let max = u64::from(u32::MAX);
        assert_eq!(
            table.stats(),
            MemoryStats {
                total: 2 * max + 2,
                allocated: max + 6,
                free: max - 4,
                internal_fragmentation: 1 + (max - 5),
            }
        );
    }

    #[test]
    fn test_zero_partition_is_rejected() {
        assert_eq!(
            PartitionTable::with_sizes([100, 0]),
            Err(AllocError::ZeroPartition)
        );
    }
}
