//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod fov;
mod neighbors;

pub use fov::Fov;
pub use neighbors::Neighbors;
