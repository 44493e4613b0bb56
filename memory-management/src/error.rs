use crate::files::FileId;
use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    ZeroSize,
    EmptyName,
    ZeroPartition,
    AlreadyResident(String),
    NoSuitablePartition { requested: u32 },
    InsufficientSpace { requested: usize, free: usize },
    NoContiguousRun { requested: usize },
    UnknownProcess(String),
    UnknownFile(FileId),
}

impl AllocError {
    /// True when the input was valid but the resource could not satisfy it.
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            Self::NoSuitablePartition { .. }
                | Self::InsufficientSpace { .. }
                | Self::NoContiguousRun { .. }
        )
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "size must be greater than 0"),
            Self::EmptyName => write!(f, "a file name is required"),
            Self::ZeroPartition => write!(f, "partitions must be larger than 0KB"),
            Self::AlreadyResident(pid) => write!(f, "{pid} is already in memory"),
            Self::NoSuitablePartition { requested } => {
                write!(f, "no free partition can hold {requested}KB")
            }
            Self::InsufficientSpace { requested, free } => {
                write!(f, "{requested} blocks needed but only {free} are free")
            }
            Self::NoContiguousRun { requested } => {
                write!(f, "no run of {requested} contiguous free blocks")
            }
            Self::UnknownProcess(pid) => write!(f, "{pid} is not in memory"),
            Self::UnknownFile(id) => write!(f, "file {id} does not exist"),
        }
    }
}

impl Error for AllocError {}
