//! Terminal host for the tri-sensor scanner.
//!
//! This crate wires the scan engine to a fixed-rate loop thread, a command
//! channel, a shared latest snapshot and a text render adapter.

pub mod console;
pub mod control;
pub mod error;
pub mod game_loop;
pub mod render;
pub mod state;
pub mod status;

pub use scanner_core as core;
