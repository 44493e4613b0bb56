//! Simulations of fixed-partition memory allocation and file block allocation.
//!
//! Unlike the scheduling engines these own mutable state: a placement either claims
//! everything it needs or fails and leaves the state as it was.

pub mod consts;
mod error;
pub mod files;
pub mod memory;

pub use error::AllocError;
