//! Utility modules shared by the pipeline.

pub mod exec;
pub mod fs;
