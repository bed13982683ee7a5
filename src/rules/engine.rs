//! Step loop and episode lifecycle.
//!
//! ```text
//! NotStarted --reset--> Running --step x duration_ticks--> Terminated
//!                          ^                                    |
//!                          +---------------reset----------------+
//! ```
//!
//! Each `MatchEngine` owns its episode outright. Nothing is shared between
//! engines, so a self-play trainer can run one per worker thread.

use log::{debug, info, warn};

use super::resolver;
use crate::core::action::{RobotAction, ACTION_COUNT};
use crate::core::config::MatchConfig;
use crate::core::entity::{RobotId, ROBOT_COUNT};
use crate::core::error::{SimError, SimResult};
use crate::core::event::{EventList, MatchEvent};
use crate::core::snapshot::{MatchOutcome, MatchSnapshot};
use crate::core::state::MatchState;
use crate::core::team::Team;
use crate::zones::ZoneTopology;

/// Lifecycle phase of the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EpisodePhase {
    #[default]
    NotStarted,
    Running,
    Terminated,
}

/// Everything `step` returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    pub snapshot: MatchSnapshot,
    pub events: EventList,
    /// True only on the step that ended the match.
    pub terminal: bool,
}

#[derive(Clone, Debug)]
struct Episode {
    topology: ZoneTopology,
    state: MatchState,
}

/// A single match simulation.
///
/// ## Example
///
/// ```
/// use rust_hubsim::core::{MatchConfig, RobotAction, ROBOT_COUNT};
/// use rust_hubsim::rules::MatchEngine;
///
/// let mut engine = MatchEngine::new();
/// engine.reset(MatchConfig::simple().with_duration(2)).unwrap();
///
/// let idle = [RobotAction::Hold; ROBOT_COUNT];
/// assert!(!engine.step(&idle).unwrap().terminal);
/// assert!(engine.step(&idle).unwrap().terminal);
/// assert!(engine.step(&idle).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MatchEngine {
    phase: EpisodePhase,
    episode: Option<Episode>,
}

impl MatchEngine {
    /// Create an engine with no episode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh episode.
    ///
    /// On a configuration error the engine keeps whatever episode it had.
    pub fn reset(&mut self, config: MatchConfig) -> SimResult<MatchSnapshot> {
        let topology = config.topology()?;
        let state = MatchState::new(&config);

        debug!(
            "reset: {} ticks, {} balls, {} hubs",
            state.duration_ticks,
            state.initial_total_balls,
            topology.hubs().len()
        );

        let snapshot = MatchSnapshot::capture(&topology, &state, false);
        self.episode = Some(Episode { topology, state });
        self.phase = EpisodePhase::Running;
        Ok(snapshot)
    }

    /// Resolve one tick with one action per robot, in slot order.
    ///
    /// Fails with `InvalidPhase` unless the engine is `Running`.
    /// Illegal actions never fail; they resolve as Hold.
    pub fn step(&mut self, actions: &[RobotAction; ROBOT_COUNT]) -> SimResult<StepOutcome> {
        let phase = self.phase;
        let episode = match (phase, self.episode.as_mut()) {
            (EpisodePhase::Running, Some(episode)) => episode,
            _ => return Err(SimError::InvalidPhase { phase }),
        };

        let mut events = EventList::new();
        resolver::resolve_tick(&episode.topology, &mut episode.state, actions, &mut events);

        let state = &mut episode.state;
        state.tick += 1;

        debug_assert!(state.is_conserved(), "ball ledger out of balance at tick {}", state.tick);
        debug_assert!(state.robots_consistent(), "robot invariant broken at tick {}", state.tick);

        let terminal = state.is_terminal();
        if terminal {
            let outcome = MatchOutcome::from_scores(&state.scores);
            info!(
                "tick={} match ended: red {} blue {} ({:?})",
                state.tick,
                state.scores[Team::Red],
                state.scores[Team::Blue],
                outcome
            );
            events.push(MatchEvent::MatchEnded {
                scores: state.scores,
                outcome,
            });
            self.phase = EpisodePhase::Terminated;
        }

        Ok(StepOutcome {
            snapshot: MatchSnapshot::capture(&episode.topology, &episode.state, terminal),
            events,
            terminal,
        })
    }

    /// `step` with discrete action indices (see `RobotAction::from_index`).
    ///
    /// Out-of-range indices resolve as Hold.
    pub fn step_indices(&mut self, indices: &[u32; ROBOT_COUNT]) -> SimResult<StepOutcome> {
        let mut actions = [RobotAction::Hold; ROBOT_COUNT];
        for (slot, (&index, action)) in indices.iter().zip(actions.iter_mut()).enumerate() {
            match RobotAction::from_index(index) {
                Some(decoded) => *action = decoded,
                None => warn!("action index {} for robot {} out of range, holding", index, slot),
            }
        }
        self.step(&actions)
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    /// Current episode state, if any.
    #[must_use]
    pub fn state(&self) -> Option<&MatchState> {
        self.episode.as_ref().map(|e| &e.state)
    }

    /// Current episode topology, if any.
    #[must_use]
    pub fn topology(&self) -> Option<&ZoneTopology> {
        self.episode.as_ref().map(|e| &e.topology)
    }

    /// Snapshot of the current episode.
    pub fn snapshot(&self) -> SimResult<MatchSnapshot> {
        let episode = self.episode()?;
        let terminal = self.phase == EpisodePhase::Terminated;
        Ok(MatchSnapshot::capture(&episode.topology, &episode.state, terminal))
    }

    /// Final result, once the match has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<MatchOutcome> {
        match (self.phase, &self.episode) {
            (EpisodePhase::Terminated, Some(e)) => Some(MatchOutcome::from_scores(&e.state.scores)),
            _ => None,
        }
    }

    /// Actions `robot` could take right now.
    pub fn legal_actions(&self, robot: RobotId) -> SimResult<Vec<RobotAction>> {
        let episode = self.episode()?;
        Ok(resolver::legal_actions(&episode.topology, &episode.state, robot))
    }

    /// Legality of every discrete action index for `robot`.
    pub fn action_mask(&self, robot: RobotId) -> SimResult<[bool; ACTION_COUNT]> {
        let episode = self.episode()?;
        Ok(resolver::action_mask(&episode.topology, &episode.state, robot))
    }

    fn episode(&self) -> SimResult<&Episode> {
        self.episode
            .as_ref()
            .ok_or(SimError::InvalidPhase { phase: self.phase })
    }
}
