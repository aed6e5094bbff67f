//! CLI command implementations.

pub mod poll;

pub use poll::{PollCommand, PollReport, SkuOutcome};
