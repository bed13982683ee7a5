//! Match rules: transit, scoring, action resolution and the step loop.
//!
//! The engine calls into these in a fixed order every tick:
//! - `transit`: movement countdowns and arrivals
//! - `scoring`: hub eligibility, schedules and rate limits
//! - `resolver`: the per-kind precondition/effect table
//! - `engine`: the episode state machine wrapping all of the above

pub mod transit;
pub mod scoring;
pub mod resolver;
pub mod engine;

pub use engine::{EpisodePhase, MatchEngine, StepOutcome};
pub use resolver::{action_mask, legal_actions, resolve_tick, ActionRule, RULES};
