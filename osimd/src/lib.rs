//! # Osim Host Daemon
//!
//! This crate provides the host runtime driving the simulation engine
//! headless.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: the engine never prints
//! - **Output is snapshot rendering**: text or JSON, one frame per tick
//! - **Deterministic mode is first-class**: no wall-clock timer, one step
//!   per loop iteration
//!
//! ## Non-Responsibilities
//!
//! The host does NOT:
//! - Add semantics on top of the engine (it only renders snapshots)
//! - Implement interactive control (scenario files stand in for input)

pub mod render;
pub mod runtime;
pub mod scenario;

pub use render::{render_json, render_text};
pub use runtime::{HostRuntime, HostRuntimeConfig, HostRuntimeError};
pub use scenario::{Scenario, ScenarioError};
