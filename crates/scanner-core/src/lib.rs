//! Core types and definitions for the tri-sensor scanner.
//!
//! This crate defines the vocabulary shared across the other crates:
//! components, commands, snapshots, events, the sensor registry and constants.
//! It has no dependency on the engine or on any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod sensors;
pub mod state;
pub mod types;
