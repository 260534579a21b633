//! Awake window and reminder cadence.

mod cadence;
mod window;

pub use cadence::Cadence;
pub use window::{parse_clock, AwakeWindow};
