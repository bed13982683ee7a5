//! Full-match rollouts between two policies.

use log::debug;
use rustc_hash::FxHashMap;

use super::{team_actions, Policy};
use crate::core::action::RobotAction;
use crate::core::config::MatchConfig;
use crate::core::entity::ROBOT_COUNT;
use crate::core::error::SimResult;
use crate::core::event::MatchEvent;
use crate::core::snapshot::{MatchOutcome, MatchSnapshot};
use crate::core::team::Team;
use crate::rules::MatchEngine;

/// Rollout settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RolloutOptions {
    /// Policies are consulted every this many ticks; in between, the last
    /// actions are repeated. At least 1.
    pub control_period: u64,

    /// Record a snapshot every this many ticks. The initial and final
    /// frames are always recorded, so `None` records just those two.
    pub frame_interval: Option<u64>,
}

impl Default for RolloutOptions {
    fn default() -> Self {
        Self {
            control_period: 1,
            frame_interval: None,
        }
    }
}

impl RolloutOptions {
    /// Set the control period.
    #[must_use]
    pub fn with_control_period(mut self, ticks: u64) -> Self {
        self.control_period = ticks.max(1);
        self
    }

    /// Record frames every `ticks` ticks.
    #[must_use]
    pub fn with_frames(mut self, ticks: u64) -> Self {
        self.frame_interval = Some(ticks.max(1));
        self
    }
}

/// Summary of a finished match.
#[derive(Clone, Debug)]
pub struct MatchReport {
    pub outcome: MatchOutcome,
    /// Terminal snapshot.
    pub final_snapshot: MatchSnapshot,
    /// Initial snapshot plus every recorded frame, in tick order.
    pub frames: Vec<MatchSnapshot>,
    /// Occurrences per event name (see `MatchEvent::name`).
    pub event_counts: FxHashMap<&'static str, u64>,
    /// Balls scored per robot slot.
    pub scored_by: [u32; ROBOT_COUNT],
}

impl MatchReport {
    /// Get the count for one event name.
    #[must_use]
    pub fn count(&self, event: &str) -> u64 {
        self.event_counts.get(event).copied().unwrap_or(0)
    }

    /// Final score of one alliance.
    #[must_use]
    pub fn score(&self, team: Team) -> u32 {
        self.final_snapshot.scores[team]
    }
}

/// Play a full match, Red against Blue.
pub fn run_match(
    config: MatchConfig,
    red: &mut dyn Policy,
    blue: &mut dyn Policy,
    options: &RolloutOptions,
) -> SimResult<MatchReport> {
    let control_period = options.control_period.max(1);

    let mut engine = MatchEngine::new();
    let mut snapshot = engine.reset(config)?;
    red.reset();
    blue.reset();

    debug!("rollout: {} (Red) vs {} (Blue)", red.name(), blue.name());

    let mut frames = vec![snapshot.clone()];
    let mut event_counts: FxHashMap<&'static str, u64> = FxHashMap::default();
    let mut scored_by = [0u32; ROBOT_COUNT];
    let mut actions = [RobotAction::Hold; ROBOT_COUNT];

    loop {
        if snapshot.tick % control_period == 0 {
            team_actions(red, &snapshot, Team::Red, &mut actions);
            team_actions(blue, &snapshot, Team::Blue, &mut actions);
        }

        let step = engine.step(&actions)?;
        for event in &step.events {
            *event_counts.entry(event.name()).or_insert(0) += 1;
            if let MatchEvent::BallScored { robot, .. } = event {
                scored_by[robot.index()] += 1;
            }
        }
        snapshot = step.snapshot;

        let on_interval = options
            .frame_interval
            .is_some_and(|every| snapshot.tick % every.max(1) == 0);
        if on_interval || step.terminal {
            frames.push(snapshot.clone());
        }
        if step.terminal {
            break;
        }
    }

    Ok(MatchReport {
        outcome: snapshot.outcome(),
        final_snapshot: snapshot,
        frames,
        event_counts,
        scored_by,
    })
}
