//! State module for tracking harvest progress
//!
//! # Components
//!
//! - `AttemptState`: the bounded retry state machine driven by the navigator
//! - `Outcome`: what happened to one listing page or detail item

mod attempt_state;
mod outcome;

// Re-export main types
pub use attempt_state::AttemptState;
pub use outcome::Outcome;
