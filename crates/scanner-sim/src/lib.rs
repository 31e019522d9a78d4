//! Scan engine for the tri-sensor scanner.
//!
//! Owns the hecs world of placed objects, runs the sweep, detection and blip
//! systems once per tick, and produces ScanSnapshots for a renderer.

pub mod engine;
pub mod systems;
pub mod world_model;

pub use engine::{ScanConfig, ScanEngine};
pub use scanner_core as core;
