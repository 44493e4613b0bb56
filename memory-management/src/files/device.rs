use super::FileId;

pub type BlockId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRole {
    Index,
    Data,
}

/// The state of one block on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slot {
    #[default]
    Free,
    Owned {
        file: FileId,
        role: BlockRole,
        /// Following block of a linked file's chain.
        next: Option<BlockId>,
    },
}

impl Slot {
    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }

    pub fn owner(&self) -> Option<FileId> {
        match *self {
            Self::Owned { file, .. } => Some(file),
            Self::Free => None,
        }
    }
}

/// A fixed array of blocks addressed by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDevice {
    slots: Vec<Slot>,
}

impl BlockDevice {
    pub fn new(blocks: usize) -> Self {
        Self {
            slots: vec![Slot::Free; blocks],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, block: BlockId) -> Option<&Slot> {
        self.slots.get(block)
    }

    pub fn free_blocks(&self) -> Vec<BlockId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_free())
            .map(|(block, _)| block)
            .collect()
    }

    pub fn free_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_free()).count()
    }

    pub fn used_count(&self) -> usize {
        self.len() - self.free_count()
    }

    /// Number of separate runs of adjacent free blocks.
    pub fn free_runs(&self) -> usize {
        self.slots
            .iter()
            .enumerate()
            .filter(|&(block, slot)| {
                slot.is_free() && (block == 0 || !self.slots[block - 1].is_free())
            })
            .count()
    }

    /// Lowest block starting `size` free blocks in a row.
    pub fn first_free_window(&self, size: usize) -> Option<BlockId> {
        if size == 0 || size > self.len() {
            return None;
        }
        (0..=self.len() - size).find(|&start| {
            let window = &self.slots[start..start + size];
            window.iter().all(Slot::is_free)
        })
    }

    pub(super) fn claim(
        &mut self,
        block: BlockId,
        file: FileId,
        role: BlockRole,
        next: Option<BlockId>,
    ) {
        debug_assert!(self.slots[block].is_free(), "block {block} claimed twice");
        self.slots[block] = Slot::Owned { file, role, next };
    }

    pub(super) fn release(&mut self, block: BlockId) {
        self.slots[block] = Slot::Free;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device_with(used: &[BlockId], len: usize) -> BlockDevice {
        let mut device = BlockDevice::new(len);
        for &block in used {
            device.claim(block, FileId(1), BlockRole::Data, None);
        }
        device
    }

    #[test]
    fn test_free_runs_counts_gaps() {
        assert_eq!(BlockDevice::new(10).free_runs(), 1);
        assert_eq!(device_with(&[0, 4, 5, 9], 10).free_runs(), 2);
        assert_eq!(device_with(&[1, 3], 5).free_runs(), 3);
        assert_eq!(device_with(&[0, 1, 2], 3).free_runs(), 0);
    }

    #[test]
    fn test_first_free_window() {
        let device = device_with(&[2, 6], 10);

        assert_eq!(device.first_free_window(2), Some(0));
        assert_eq!(device.first_free_window(3), Some(3));
        assert_eq!(device.first_free_window(4), None);
        assert_eq!(device_with(&[0], 4).first_free_window(3), Some(1));
        assert_eq!(device.first_free_window(11), None);
    }

    #[test]
    fn test_counts() {
        let device = device_with(&[1, 2, 7], 8);

        assert_eq!(device.free_count(), 5);
        assert_eq!(device.used_count(), 3);
        assert_eq!(device.free_blocks(), vec![0, 3, 4, 5, 6]);
        assert_eq!(device.slot(1).and_then(Slot::owner), Some(FileId(1)));
        assert_eq!(device.slot(8), None);
    }
}
