//! In-memory collections split across logical submodules.

mod collections;
mod ids;
mod seed;

pub use collections::Store;
