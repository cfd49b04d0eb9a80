//! Replays scripted table interactions against a JSON fixture.
//!
//! Library half of the `gridkit-replay` binary, exposed for tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod fixture;
pub mod paths;
pub mod render;
pub mod replay;

pub use error::ReplayError;
