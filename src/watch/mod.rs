// src/watch/mod.rs

//! Watch-directory polling and task dispatch.

pub mod supervisor;

pub use supervisor::{CycleOutcome, Supervisor};
