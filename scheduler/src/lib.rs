//! Deterministic simulations of CPU process scheduling and disk head scheduling.
//!
//! Every engine borrows its input and returns a fresh result, so the same workload can
//! be run through several policies and compared.

pub mod cpu;
pub mod disk;
mod error;

pub use error::InputError;
