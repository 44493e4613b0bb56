mod device;
mod file;

use crate::{consts::DEFAULT_DEVICE_BLOCKS, AllocError};
use rand::{rngs::StdRng, seq::index, SeedableRng};
use tracing::{debug, info, warn};

pub use device::{BlockDevice, BlockId, BlockRole, Slot};
pub use file::{File, FileId, Strategy};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceStats {
    pub files: usize,
    pub total_blocks: usize,
    pub used_blocks: usize,
    pub free_blocks: usize,
    pub fragments: usize,
    /// Percentage of blocks in use.
    pub utilization: f64,
}

/// A block device together with the files allocated on it.
///
/// Linked and indexed allocation pick their blocks at random among the free ones.
/// Build the simulator with [`FileAllocationSimulator::with_seed`] to make that choice
/// reproducible.
pub struct FileAllocationSimulator {
    device: BlockDevice,
    files: Vec<File>,
    next_id: u32,
    rng: StdRng,
}

impl FileAllocationSimulator {
    pub fn new(blocks: usize) -> Self {
        Self::with_rng(blocks, StdRng::from_os_rng())
    }

    pub fn with_seed(blocks: usize, seed: u64) -> Self {
        Self::with_rng(blocks, StdRng::seed_from_u64(seed))
    }

    fn with_rng(blocks: usize, rng: StdRng) -> Self {
        Self {
            device: BlockDevice::new(blocks),
            files: Vec::new(),
            next_id: 1,
            rng,
        }
    }

    pub fn device(&self) -> &BlockDevice {
        &self.device
    }

    pub fn files(&self) -> &[File] {
        &self.files
    }

    pub fn file(&self, id: FileId) -> Option<&File> {
        self.files.iter().find(|file| file.id() == id)
    }

    pub fn free_block_count(&self) -> usize {
        self.device.free_count()
    }

    pub fn create_file(
        &mut self,
        name: &str,
        size: usize,
        strategy: Strategy,
    ) -> Result<FileId, AllocError> {
        match strategy {
            Strategy::Contiguous => self.allocate_contiguous(name, size),
            Strategy::Linked => self.allocate_linked(name, size),
            Strategy::Indexed => self.allocate_indexed(name, size),
        }
    }

    /// Places the file in the lowest run of `size` adjacent free blocks. Fails when free
    /// space is too fragmented even if enough blocks are free in total.
    pub fn allocate_contiguous(&mut self, name: &str, size: usize) -> Result<FileId, AllocError> {
        validate(name, size)?;

        let Some(start) = self.device.first_free_window(size) else {
            let error = AllocError::NoContiguousRun { requested: size };
            return Err(reject(name, error));
        };
        let blocks = (start..start + size).collect();
        Ok(self.commit(name, Strategy::Contiguous, blocks, None))
    }

    /// Places the file on any free blocks, chained in ascending block order.
    pub fn allocate_linked(&mut self, name: &str, size: usize) -> Result<FileId, AllocError> {
        validate(name, size)?;

        let free = self.device.free_blocks();
        if free.len() < size {
            let error = AllocError::InsufficientSpace {
                requested: size,
                free: free.len(),
            };
            return Err(reject(name, error));
        }

        let blocks = self.pick(&free, size);
        Ok(self.commit(name, Strategy::Linked, blocks, None))
    }

    /// Uses the lowest free block as the index block and any other free blocks for data.
    pub fn allocate_indexed(&mut self, name: &str, size: usize) -> Result<FileId, AllocError> {
        validate(name, size)?;

        let free = self.device.free_blocks();
        if free.len() < size + 1 {
            let error = AllocError::InsufficientSpace {
                requested: size + 1,
                free: free.len(),
            };
            return Err(reject(name, error));
        }

        let index_block = Some(free[0]);
        let blocks = self.pick(&free[1..], size);
        Ok(self.commit(name, Strategy::Indexed, blocks, index_block))
    }

    /// Frees every block of the file, index block included, and returns the file.
    pub fn delete_file(&mut self, id: FileId) -> Result<File, AllocError> {
        let Some(position) = self.files.iter().position(|file| file.id() == id) else {
            warn!(%id, "cannot delete unknown file");
            return Err(AllocError::UnknownFile(id));
        };

        let file = self.files.remove(position);
        for block in file.occupied() {
            self.device.release(block);
        }
        info!(%id, name = file.name(), blocks = file.size(), "file deleted");

        self.check_consistency();
        Ok(file)
    }

    /// Returns `(free_block_count, free_run_count)`.
    pub fn fragmentation(&self) -> (usize, usize) {
        (self.device.free_count(), self.device.free_runs())
    }

    /// Follows the `next` pointers of a linked file from its first block.
    pub fn chain(&self, id: FileId) -> Option<Vec<BlockId>> {
        let file = self.file(id).filter(|f| f.strategy() == Strategy::Linked)?;

        let mut chain = Vec::with_capacity(file.size());
        let mut cursor = file.start_block();
        while let Some(block) = cursor {
            chain.push(block);
            cursor = match self.device.slot(block) {
                Some(Slot::Owned { next, .. }) => *next,
                _ => None,
            };
        }
        Some(chain)
    }

    pub fn stats(&self) -> DeviceStats {
        let (free_blocks, fragments) = self.fragmentation();
        let total_blocks = self.device.len();
        let used_blocks = total_blocks - free_blocks;
        let utilization = if total_blocks > 0 {
            used_blocks as f64 / total_blocks as f64 * 100.0
        } else {
            0.0
        };

        DeviceStats {
            files: self.files.len(),
            total_blocks,
            used_blocks,
            free_blocks,
            fragments,
            utilization,
        }
    }

    /// Chooses `amount` of the given blocks at random and returns them sorted.
    fn pick(&mut self, free: &[BlockId], amount: usize) -> Vec<BlockId> {
        let mut chosen: Vec<BlockId> = index::sample(&mut self.rng, free.len(), amount)
            .into_iter()
            .map(|i| free[i])
            .collect();
        chosen.sort_unstable();
        chosen
    }

    fn commit(
        &mut self,
        name: &str,
        strategy: Strategy,
        blocks: Vec<BlockId>,
        index_block: Option<BlockId>,
    ) -> FileId {
        let id = FileId(self.next_id);
        self.next_id += 1;

        if let Some(block) = index_block {
            self.device.claim(block, id, BlockRole::Index, None);
        }
        for (position, &block) in blocks.iter().enumerate() {
            let next = match strategy {
                Strategy::Linked => blocks.get(position + 1).copied(),
                Strategy::Contiguous | Strategy::Indexed => None,
            };
            self.device.claim(block, id, BlockRole::Data, next);
        }

        let file = File::new(id, name, strategy, blocks, index_block);
        info!(
            %id,
            name,
            strategy = strategy.name(),
            location = %file.location(),
            "file allocated"
        );
        debug!(blocks = ?file.blocks(), "data blocks");
        self.files.push(file);

        self.check_consistency();
        id
    }

    /// Every owned block belongs to a listed file and every listed block is owned by
    /// its file.
    fn check_consistency(&self) {
        if !cfg!(debug_assertions) {
            return;
        }

        for (block, slot) in self.device.slots().iter().enumerate() {
            if let Some(owner) = slot.owner() {
                debug_assert!(
                    self.file(owner).is_some(),
                    "block {block} owned by unknown file {owner}"
                );
            }
        }

        for file in &self.files {
            if let Some(block) = file.index_block() {
                debug_assert!(
                    self.owns(file.id(), block, BlockRole::Index),
                    "index block {block} is not owned by {}",
                    file.id()
                );
            }
            for &block in file.blocks() {
                debug_assert!(
                    self.owns(file.id(), block, BlockRole::Data),
                    "data block {block} is not owned by {}",
                    file.id()
                );
            }
        }
    }

    fn owns(&self, id: FileId, block: BlockId, role: BlockRole) -> bool {
        match self.device.slot(block) {
            Some(&Slot::Owned { file, role: held, .. }) => file == id && held == role,
            _ => false,
        }
    }
}

impl Default for FileAllocationSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE_BLOCKS)
    }
}

fn validate(name: &str, size: usize) -> Result<(), AllocError> {
    let error = if name.trim().is_empty() {
        AllocError::EmptyName
    } else if size == 0 {
        AllocError::ZeroSize
    } else {
        return Ok(());
    };
    warn!(%error, "rejected file");
    Err(error)
}

fn reject(name: &str, error: AllocError) -> AllocError {
    warn!(name, %error, "file allocation failed");
    error
}
