//! Baseline policies.

use crate::core::action::{RobotAction, ACTION_COUNT};
use crate::core::entity::RobotId;
use crate::core::rng::PolicyRng;
use crate::core::snapshot::{HubView, MatchSnapshot};
use crate::core::team::Team;
use crate::core::zone::Zone;

use super::Policy;

// =============================================================================
// Hold
// =============================================================================

/// Never does anything.
#[derive(Clone, Debug, Default)]
pub struct HoldPolicy;

impl Policy for HoldPolicy {
    fn name(&self) -> &str {
        "hold"
    }

    fn act(&mut self, _view: &MatchSnapshot, _robot: RobotId) -> RobotAction {
        RobotAction::Hold
    }
}

// =============================================================================
// Random
// =============================================================================

/// Uniform over every discrete action index, legal or not.
///
/// Illegal picks resolve as Hold, so this is also a cheap fuzzer for the
/// resolver.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    seed: u64,
    rng: PolicyRng,
}

impl RandomPolicy {
    /// Create a random policy. The same seed replays the same choices.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: PolicyRng::new(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn act(&mut self, _view: &MatchSnapshot, _robot: RobotId) -> RobotAction {
        RobotAction::from_index(self.rng.gen_index(ACTION_COUNT) as u32).unwrap_or_default()
    }

    fn reset(&mut self) {
        self.rng = PolicyRng::new(self.seed);
    }
}

// =============================================================================
// Shuttle
// =============================================================================

/// Hand-written baseline: fill up, drive to the own hub, empty out.
///
/// Per robot, in priority order:
/// 1. in transit: Hold
/// 2. holding balls at the own hub: Shoot when it can score, else Hold
/// 3. full, or holding balls where the supply ran dry: head for the hub
/// 4. standing on supply: Intake
/// 5. otherwise head for the zone with the most loose balls
///
/// Routing assumes the standard Attacker-Neutral-Defender line.
#[derive(Clone, Debug, Default)]
pub struct ShuttlePolicy;

impl ShuttlePolicy {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// One move along the line toward `target`.
fn step_toward(from: Zone, target: Zone) -> RobotAction {
    if from == target {
        RobotAction::Hold
    } else if from == Zone::Neutral || target == Zone::Neutral {
        RobotAction::Move(target)
    } else {
        RobotAction::Move(Zone::Neutral)
    }
}

fn own_hub(view: &MatchSnapshot) -> Option<&HubView> {
    view.hubs
        .iter()
        .find(|h| h.team == Some(Team::Red))
        .or_else(|| view.hubs.iter().find(|h| h.team.is_none()))
}

fn richest_zone(view: &MatchSnapshot) -> Option<Zone> {
    let (zone, &balls) = view
        .zone_supply
        .iter()
        .max_by(|(za, a), (zb, b)| a.cmp(b).then(zb.cmp(za)))?;
    (balls > 0).then_some(zone)
}

impl Policy for ShuttlePolicy {
    fn name(&self) -> &str {
        "shuttle"
    }

    fn act(&mut self, view: &MatchSnapshot, robot: RobotId) -> RobotAction {
        let Some(me) = view.robot(robot) else {
            return RobotAction::Hold;
        };
        if me.in_transit() {
            return RobotAction::Hold;
        }

        let hub = own_hub(view);
        let supply_here = view.zone_supply[me.zone];

        if let Some(hub) = hub {
            if me.balls_held > 0 && me.zone == hub.zone {
                return if hub.active && me.cooldown_remaining_ticks == 0 {
                    RobotAction::Shoot
                } else {
                    RobotAction::Hold
                };
            }
            let full = me.balls_held >= me.capacity;
            if full || (me.balls_held > 0 && supply_here == 0) {
                return step_toward(me.zone, hub.zone);
            }
        }

        if supply_here > 0 && me.balls_held < me.capacity {
            return if me.intake_cooldown_remaining_ticks == 0 {
                RobotAction::Intake
            } else {
                RobotAction::Hold
            };
        }

        richest_zone(view).map_or(RobotAction::Hold, |zone| step_toward(me.zone, zone))
    }
}
