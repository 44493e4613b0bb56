use super::BlockId;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Contiguous,
    Linked,
    Indexed,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Self::Contiguous, Self::Linked, Self::Indexed];

    pub fn name(self) -> &'static str {
        match self {
            Self::Contiguous => "Contiguous",
            Self::Linked => "Linked",
            Self::Indexed => "Indexed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    id: FileId,
    name: String,
    strategy: Strategy,
    blocks: Vec<BlockId>,
    index_block: Option<BlockId>,
}

impl File {
    pub(super) fn new(
        id: FileId,
        name: &str,
        strategy: Strategy,
        blocks: Vec<BlockId>,
        index_block: Option<BlockId>,
    ) -> Self {
        Self {
            id,
            name: name.to_owned(),
            strategy,
            blocks,
            index_block,
        }
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in data blocks. The index block of an indexed file is not counted.
    pub fn size(&self) -> usize {
        self.blocks.len()
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Data blocks, in chain order for linked files.
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    pub fn index_block(&self) -> Option<BlockId> {
        self.index_block
    }

    /// Where a directory entry would point: the index block for indexed files,
    /// the first data block otherwise.
    pub fn start_block(&self) -> Option<BlockId> {
        self.index_block.or_else(|| self.blocks.first().copied())
    }

    /// Every block the file occupies, index block first.
    pub fn occupied(&self) -> impl Iterator<Item = BlockId> + '_ {
        let data = self.blocks.iter().copied();
        self.index_block.into_iter().chain(data)
    }

    /// Short location label, e.g. `4-7`, `S:12` or `I:3`.
    pub fn location(&self) -> String {
        match (self.strategy, self.start_block()) {
            (_, None) => "-".to_owned(),
            (Strategy::Contiguous, Some(start)) => format!("{start}-{}", start + self.size() - 1),
            (Strategy::Linked, Some(start)) => format!("S:{start}"),
            (Strategy::Indexed, Some(index)) => format!("I:{index}"),
        }
    }
}
