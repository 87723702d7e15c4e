//! Phase graph management.
//!
//! `PhaseManager` holds the declared phase graph, derives which roles may
//! use which actions in each phase, validates submissions, and computes the
//! successor phase (including the hunter detour).

mod manager;

pub use manager::PhaseManager;
