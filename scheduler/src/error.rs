use std::{error::Error, fmt};

/// Rejected input. Returned before any scheduling work starts, so nothing the caller
/// owns has been touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    ZeroBurst { pid: u32 },
    DuplicatePid(u32),
    /// The last arrival plus the total burst does not fit in the clock.
    ClockOverflow,
    ZeroQuantum,
    ZeroDiskSize,
    HeadOutOfRange { head: u32, disk_size: u32 },
    TrackOutOfRange { track: u32, disk_size: u32 },
    DuplicateRequest(u32),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBurst { pid } => write!(f, "P{pid} has a burst time of 0"),
            Self::DuplicatePid(pid) => write!(f, "P{pid} appears more than once"),
            Self::ClockOverflow => write!(f, "the workload runs past the end of the clock"),
            Self::ZeroQuantum => write!(f, "the time quantum must be greater than 0"),
            Self::ZeroDiskSize => write!(f, "the disk must have at least one track"),
            Self::HeadOutOfRange { head, disk_size } => {
                write!(f, "head position {head} is outside 0-{}", disk_size - 1)
            }
            Self::TrackOutOfRange { track, disk_size } => {
                write!(f, "request {track} is outside 0-{}", disk_size - 1)
            }
            Self::DuplicateRequest(track) => write!(f, "request {track} already exists"),
        }
    }
}

impl Error for InputError {}
