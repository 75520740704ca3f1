//! Batch driver for the meshquant preprocessing pipeline
//!
//! Orchestrates the numeric core over whole directories of meshes:
//! per-mesh normalization/quantization round trips, the adaptive
//! vs. uniform comparison experiment, seam tokenization, and all
//! result-file writing. Meshes are processed in parallel and a
//! failure in one mesh never aborts the rest of the batch.

pub mod config;
pub mod process;
pub mod experiment;
pub mod batch;

pub use batch::*;
pub use config::*;
pub use experiment::*;
pub use process::*;
