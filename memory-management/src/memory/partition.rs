/// The process living in a partition and the amount of memory it asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    pub pid: String,
    pub size: u32,
}

/// A fixed-size memory partition. Its size never changes, placing a process only flips
/// it between free and occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    size: u32,
    occupant: Option<Occupant>,
}

impl Partition {
    pub(super) fn new(size: u32) -> Self {
        Self {
            size,
            occupant: None,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn occupant(&self) -> Option<&Occupant> {
        self.occupant.as_ref()
    }

    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn fits(&self, request: u32) -> bool {
        self.is_free() && self.size >= request
    }

    /// Space wasted inside an occupied partition.
    pub fn internal_fragmentation(&self) -> Option<u32> {
        self.occupant
            .as_ref()
            .map(|occupant| self.size - occupant.size)
    }

    pub(super) fn occupy(&mut self, pid: &str, size: u32) {
        debug_assert!(self.fits(size));
        self.occupant = Some(Occupant {
            pid: pid.to_owned(),
            size,
        });
    }

    pub(super) fn vacate(&mut self) -> Option<Occupant> {
        self.occupant.take()
    }
}
