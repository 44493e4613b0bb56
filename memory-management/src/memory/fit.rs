use super::Partition;

/// How a free partition is chosen for an incoming process. Every policy breaks ties in
/// favour of the partition that comes first in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitPolicy {
    FirstFit,
    BestFit,
    WorstFit,
}

impl FitPolicy {
    pub const ALL: [FitPolicy; 3] = [Self::FirstFit, Self::BestFit, Self::WorstFit];

    pub fn name(self) -> &'static str {
        match self {
            Self::FirstFit => "First Fit",
            Self::BestFit => "Best Fit",
            Self::WorstFit => "Worst Fit",
        }
    }

    /// Returns the index of the partition this policy would use, without claiming it.
    pub fn select(self, partitions: &[Partition], request: u32) -> Option<usize> {
        let mut candidates = partitions
            .iter()
            .enumerate()
            .filter(|(_, partition)| partition.fits(request));

        let chosen = match self {
            Self::FirstFit => candidates.next(),
            Self::BestFit => candidates.min_by_key(|(_, partition)| partition.size()),
            // max_by_key keeps the last maximum, so search backwards to keep the first
            Self::WorstFit => candidates
                .rev()
                .max_by_key(|(_, partition)| partition.size()),
        };
        chosen.map(|(index, _)| index)
    }
}
