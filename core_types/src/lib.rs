//! # Core Types
//!
//! This crate defines the fundamental types shared across the Osim workspace.
//!
//! ## Philosophy
//!
//! Core types are designed with these principles:
//! - **Explicit over implicit**: Every scripted action is a typed variant, not a string tag.
//! - **Type safety first**: The type system prevents malformed scripts at compile time.
//! - **Determinism**: Identifiers are small monotonic integers, never random.
//!
//! ## Key Types
//!
//! - [`Pid`]: Unique identifier for a simulated process
//! - [`Action`] / [`ActionKind`]: One scripted step of a process
//! - [`ProcessState`]: The five lifecycle buckets
//! - [`WaitCondition`]: Predicate a condition-blocked process waits on

pub mod action;
pub mod ids;
pub mod process;

pub use action::{Action, ActionKind};
pub use ids::Pid;
pub use process::{ProcessState, WaitCondition};
