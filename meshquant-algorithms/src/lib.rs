//! # meshquant algorithms
//!
//! The numeric core of the mesh preprocessing pipeline: coordinate
//! normalization, uniform and density-adaptive quantization,
//! reconstruction-error metrics, and seam tokenization.
//!
//! All functions here are pure transforms over in-memory data; file
//! I/O and orchestration live in `meshquant-io` and
//! `meshquant-pipeline`.

pub mod normalization;
pub mod quantization;
pub mod adaptive;
pub mod metrics;
pub mod seams;
pub mod nearest_neighbor;

// Re-export commonly used items
pub use normalization::*;
pub use quantization::*;
pub use adaptive::*;
pub use metrics::*;
pub use seams::*;
pub use nearest_neighbor::*;
