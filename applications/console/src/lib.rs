//! Melody Console Library
//!
//! Headless Melody Player: a player session driven by operator commands read
//! from a terminal, with a simulated media element standing in for audio
//! output.
//!
//! This library exposes the components for testing purposes.

pub mod commands;
pub mod config;
pub mod demo;
pub mod error;
pub mod media;
pub mod monitor;
pub mod shell;

// Re-export commonly used types for convenience
pub use commands::{Command, CommandError};
pub use config::ConsoleConfig;
pub use error::{ConsoleError, Result};
pub use media::{spawn_clock, MediaClock, SimulatedMedia};
pub use shell::{Flow, Shell};
