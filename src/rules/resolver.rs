//! Action resolution for one tick.
//!
//! ## Resolution Order
//!
//! 1. Transit countdowns (arrivals first)
//! 2. Intake
//! 3. Pass
//! 4. Shoot
//! 5. Move
//! 6. Cooldown countdowns
//!
//! Within a phase robots resolve in slot order, each against the state
//! left by everything resolved before it. Two robots intaking from a
//! shared supply therefore split it in slot order.
//!
//! ## Rule Table
//!
//! Each non-Hold action kind has one `ActionRule`: a precondition that
//! only reads the state and an effect that assumes the precondition held.
//! An action whose precondition fails resolves as Hold and is reported as
//! `MatchEvent::ActionRejected`. The same preconditions back
//! `legal_actions` and `action_mask`, so a mask never disagrees with the
//! resolver.

use std::borrow::Cow;

use log::trace;

use super::scoring;
use super::transit;
use crate::core::action::{ActionKind, RobotAction, ACTION_COUNT};
use crate::core::entity::{RobotId, ROBOT_COUNT};
use crate::core::error::IllegalAction;
use crate::core::event::{EventList, MatchEvent};
use crate::core::state::{MatchState, RobotState};
use crate::zones::ZoneTopology;

/// Reads the state and decides whether an action may resolve.
pub type Precondition = fn(&ZoneTopology, &MatchState, RobotId, RobotAction) -> Result<(), IllegalAction>;

/// Applies an action whose precondition held.
pub type Effect = fn(&ZoneTopology, &mut MatchState, RobotId, RobotAction, &mut EventList);

/// Legality check and effect for one action kind.
#[derive(Clone, Copy)]
pub struct ActionRule {
    pub kind: ActionKind,
    pub precondition: Precondition,
    pub effect: Effect,
}

impl std::fmt::Debug for ActionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRule").field("kind", &self.kind).finish()
    }
}

/// Rules in resolution order.
pub const RULES: [ActionRule; 4] = [
    ActionRule {
        kind: ActionKind::Intake,
        precondition: intake_precondition,
        effect: intake_effect,
    },
    ActionRule {
        kind: ActionKind::Pass,
        precondition: pass_precondition,
        effect: pass_effect,
    },
    ActionRule {
        kind: ActionKind::Shoot,
        precondition: shoot_precondition,
        effect: shoot_effect,
    },
    ActionRule {
        kind: ActionKind::Move,
        precondition: move_precondition,
        effect: move_effect,
    },
];

/// Look up the rule for an action kind. Hold has none.
#[must_use]
pub fn rule_for(kind: ActionKind) -> Option<&'static ActionRule> {
    RULES.iter().find(|rule| rule.kind == kind)
}

/// Check one action against the current state without applying it.
pub fn check(
    topology: &ZoneTopology,
    state: &MatchState,
    robot: RobotId,
    action: RobotAction,
) -> Result<(), IllegalAction> {
    match rule_for(action.kind()) {
        Some(rule) => (rule.precondition)(topology, state, robot, action),
        None => Ok(()),
    }
}

/// Resolve one tick of actions, appending events in resolution order.
///
/// Does not advance `state.tick`; the step loop does that.
pub fn resolve_tick(
    topology: &ZoneTopology,
    state: &mut MatchState,
    actions: &[RobotAction; ROBOT_COUNT],
    events: &mut EventList,
) {
    // === Phase 1: transit ===
    for robot in &mut state.robots {
        if let Some(zone) = transit::tick_transit(robot) {
            events.push(MatchEvent::RobotArrived { robot: robot.id, zone });
        }
    }

    scoring::begin_tick(state);

    // === Phases 2-5: rule table ===
    for rule in &RULES {
        for robot in RobotId::all() {
            let action = actions[robot.index()];
            if action.kind() != rule.kind {
                continue;
            }
            match (rule.precondition)(topology, state, robot, action) {
                Ok(()) => (rule.effect)(topology, state, robot, action, events),
                Err(reason) => {
                    trace!("tick={} {} {} rejected: {}", state.tick + 1, robot, action, reason);
                    events.push(MatchEvent::ActionRejected {
                        robot,
                        kind: rule.kind,
                        reason,
                    });
                }
            }
        }
    }

    // === Phase 6: cooldowns ===
    for robot in &mut state.robots {
        robot.cooldown_remaining_ticks = robot.cooldown_remaining_ticks.saturating_sub(1);
        robot.intake_cooldown_remaining_ticks = robot.intake_cooldown_remaining_ticks.saturating_sub(1);
    }
}

/// The state as the rule table will see it next tick: arrivals committed
/// and per-tick hub counters cleared. Borrowed when neither applies.
fn next_tick_view(state: &MatchState) -> Cow<'_, MatchState> {
    let arriving = state.robots.iter().any(|r| r.transit_remaining_ticks == 1);
    let stale_hubs = state.hubs.iter().any(|h| h.accepted_this_tick > 0);
    if !arriving && !stale_hubs {
        return Cow::Borrowed(state);
    }

    let mut next = state.clone();
    for robot in &mut next.robots {
        transit::tick_transit(robot);
    }
    scoring::begin_tick(&mut next);
    Cow::Owned(next)
}

/// Actions that would pass their precondition next tick.
///
/// Hold is always first. Robots resolved earlier in the same tick can
/// still change the outcome (a lower slot may empty the supply first).
#[must_use]
pub fn legal_actions(topology: &ZoneTopology, state: &MatchState, robot: RobotId) -> Vec<RobotAction> {
    let next = next_tick_view(state);
    (0..ACTION_COUNT as u32)
        .filter_map(RobotAction::from_index)
        .filter(|&action| check(topology, &next, robot, action).is_ok())
        .collect()
}

/// Legality of every discrete action index.
#[must_use]
pub fn action_mask(topology: &ZoneTopology, state: &MatchState, robot: RobotId) -> [bool; ACTION_COUNT] {
    let mut mask = [false; ACTION_COUNT];
    for action in legal_actions(topology, state, robot) {
        mask[action.index() as usize] = true;
    }
    mask
}

// =============================================================================
// Preconditions
// =============================================================================

fn acting_robot(state: &MatchState, robot: RobotId) -> Result<&RobotState, IllegalAction> {
    let r = state.robot(robot).ok_or(IllegalAction::UnknownRobot(robot))?;
    if r.in_transit() {
        return Err(IllegalAction::InTransit);
    }
    Ok(r)
}

fn intake_precondition(
    _topology: &ZoneTopology,
    state: &MatchState,
    robot: RobotId,
    _action: RobotAction,
) -> Result<(), IllegalAction> {
    let r = acting_robot(state, robot)?;
    if r.intake_cooldown_remaining_ticks > 0 {
        return Err(IllegalAction::IntakeCoolingDown);
    }
    if r.is_full() {
        return Err(IllegalAction::AtCapacity);
    }
    if state.zone_supply[r.zone] == 0 {
        return Err(IllegalAction::NoSupply);
    }
    Ok(())
}

fn pass_precondition(
    _topology: &ZoneTopology,
    state: &MatchState,
    robot: RobotId,
    action: RobotAction,
) -> Result<(), IllegalAction> {
    let r = acting_robot(state, robot)?;
    let RobotAction::Pass(target) = action else {
        return Ok(());
    };
    let receiver = state.robot(target).ok_or(IllegalAction::UnknownRobot(target))?;

    if target == robot {
        return Err(IllegalAction::SelfPass);
    }
    if r.balls_held == 0 {
        return Err(IllegalAction::EmptyHanded);
    }
    if receiver.in_transit() {
        return Err(IllegalAction::ReceiverInTransit);
    }
    if receiver.zone != r.zone {
        return Err(IllegalAction::NotCoLocated);
    }
    if receiver.is_full() {
        return Err(IllegalAction::ReceiverFull);
    }
    Ok(())
}

fn shoot_precondition(
    topology: &ZoneTopology,
    state: &MatchState,
    robot: RobotId,
    _action: RobotAction,
) -> Result<(), IllegalAction> {
    let r = acting_robot(state, robot)?;
    let hub = topology.hub_for(r.zone).ok_or(IllegalAction::NoHub)?;
    if r.balls_held == 0 {
        return Err(IllegalAction::EmptyHanded);
    }
    if r.cooldown_remaining_ticks > 0 {
        return Err(IllegalAction::CoolingDown);
    }
    scoring::check(topology, state, hub, r.team)
}

fn move_precondition(
    topology: &ZoneTopology,
    state: &MatchState,
    robot: RobotId,
    action: RobotAction,
) -> Result<(), IllegalAction> {
    let r = state.robot(robot).ok_or(IllegalAction::UnknownRobot(robot))?;
    let RobotAction::Move(target) = action else {
        return Ok(());
    };
    transit::check_move(topology, r, target)
}

// =============================================================================
// Effects
// =============================================================================

fn intake_effect(
    _topology: &ZoneTopology,
    state: &mut MatchState,
    robot: RobotId,
    _action: RobotAction,
    events: &mut EventList,
) {
    let Some(r) = state.robots.get_mut(robot.index()) else {
        return;
    };
    let zone = r.zone;
    let supply = &mut state.zone_supply[zone];

    let count = r.intake_rate.min(*supply).min(r.free_capacity());
    *supply -= count;
    r.balls_held += count;
    r.intake_cooldown_remaining_ticks = r.intake_period;

    events.push(MatchEvent::BallsIntaken { robot, zone, count });
}

fn pass_effect(
    _topology: &ZoneTopology,
    state: &mut MatchState,
    robot: RobotId,
    action: RobotAction,
    events: &mut EventList,
) {
    let RobotAction::Pass(target) = action else {
        return;
    };
    let (Some(giver), Some(receiver)) = (state.robot(robot), state.robot(target)) else {
        return;
    };

    // Clipped to what the receiver can still hold.
    let count = giver.pass_amount.min(giver.balls_held).min(receiver.free_capacity());

    if let Some(giver) = state.robot_mut(robot) {
        giver.balls_held -= count;
    }
    if let Some(receiver) = state.robot_mut(target) {
        receiver.balls_held += count;
    }

    events.push(MatchEvent::BallsPassed {
        from: robot,
        to: target,
        count,
    });
}

fn shoot_effect(
    topology: &ZoneTopology,
    state: &mut MatchState,
    robot: RobotId,
    _action: RobotAction,
    events: &mut EventList,
) {
    let Some((team, hub)) = state
        .robot(robot)
        .and_then(|r| topology.hub_for(r.zone).map(|hub| (r.team, hub)))
    else {
        return;
    };
    if !scoring::score(topology, state, hub, team) {
        return;
    }
    if let Some(r) = state.robot_mut(robot) {
        r.balls_held -= 1;
        r.cooldown_remaining_ticks = r.shoot_cooldown;
    }

    events.push(MatchEvent::BallScored { robot, team, hub });
}

fn move_effect(
    topology: &ZoneTopology,
    state: &mut MatchState,
    robot: RobotId,
    action: RobotAction,
    events: &mut EventList,
) {
    let RobotAction::Move(target) = action else {
        return;
    };
    let Some(r) = state.robot_mut(robot) else {
        return;
    };
    let from = r.zone;
    if let Ok(ticks) = transit::begin_move(topology, r, target) {
        events.push(MatchEvent::TransitStarted {
            robot,
            from,
            to: target,
            ticks,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MatchConfig;
    use crate::core::team::Team;
    use crate::core::zone::Zone;

    fn setup() -> (ZoneTopology, MatchState) {
        let config = MatchConfig::simple();
        (config.topology().unwrap(), MatchState::new(&config))
    }

    fn only(robot: u8, action: RobotAction) -> [RobotAction; ROBOT_COUNT] {
        let mut actions = [RobotAction::Hold; ROBOT_COUNT];
        actions[robot as usize] = action;
        actions
    }

    fn resolve(topology: &ZoneTopology, state: &mut MatchState, actions: &[RobotAction; ROBOT_COUNT]) -> EventList {
        let mut events = EventList::new();
        resolve_tick(topology, state, actions, &mut events);
        state.tick += 1;
        events
    }

    #[test]
    fn test_rules_follow_resolution_order() {
        let kinds: Vec<_> = RULES.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, ActionKind::RESOLUTION_ORDER.to_vec());
        assert!(rule_for(ActionKind::Hold).is_none());
    }

    // =========================================================================
    // Intake
    // =========================================================================

    #[test]
    fn test_intake_takes_rate_limited_amount() {
        let (topology, mut state) = setup();

        let events = resolve(&topology, &mut state, &only(0, RobotAction::Intake));

        assert_eq!(state.robots[0].balls_held, 5);
        assert_eq!(state.zone_supply[Zone::Neutral], 25);
        assert_eq!(
            events.as_slice(),
            &[MatchEvent::BallsIntaken {
                robot: RobotId::new(0),
                zone: Zone::Neutral,
                count: 5
            }]
        );
    }

    #[test]
    fn test_intake_waits_out_its_period() {
        let (topology, mut state) = setup();
        state.robots[0].intake_rate = 3;
        state.robots[0].intake_period = 5;

        let mut intaken = Vec::new();
        for _ in 0..10 {
            let events = resolve(&topology, &mut state, &only(0, RobotAction::Intake));
            intaken.push(state.robots[0].balls_held);
            if let Some(MatchEvent::ActionRejected { reason, .. }) = events.first() {
                assert_eq!(*reason, IllegalAction::IntakeCoolingDown);
            }
        }

        // 6 balls over 10 ticks, one intake every 5 ticks.
        assert_eq!(intaken, vec![3, 3, 3, 3, 3, 6, 6, 6, 6, 6]);
        assert_eq!(state.zone_supply[Zone::Neutral], 24);
        assert!(state.is_conserved());
    }

    #[test]
    fn test_intake_clipped_by_capacity_and_supply() {
        let (topology, mut state) = setup();
        state.robots[0].balls_held = 18;
        state.initial_total_balls += 18;
        resolve(&topology, &mut state, &only(0, RobotAction::Intake));
        assert_eq!(state.robots[0].balls_held, 20);
        assert_eq!(state.zone_supply[Zone::Neutral], 28);
        assert!(state.is_conserved());

        state.zone_supply[Zone::Neutral] = 1;
        state.initial_total_balls -= 27;
        resolve(&topology, &mut state, &only(1, RobotAction::Intake));
        assert_eq!(state.robots[1].balls_held, 1);
        assert_eq!(state.zone_supply[Zone::Neutral], 0);
        assert!(state.is_conserved());
    }

    #[test]
    fn test_shared_supply_split_in_slot_order() {
        let (topology, mut state) = setup();
        state.zone_supply[Zone::Neutral] = 7;
        state.initial_total_balls = 7;

        let mut actions = [RobotAction::Hold; ROBOT_COUNT];
        actions[4] = RobotAction::Intake;
        actions[1] = RobotAction::Intake;
        actions[2] = RobotAction::Intake;
        let events = resolve(&topology, &mut state, &actions);

        assert_eq!(state.robots[1].balls_held, 5);
        assert_eq!(state.robots[2].balls_held, 2);
        assert_eq!(state.robots[4].balls_held, 0);
        assert!(matches!(
            events.last(),
            Some(MatchEvent::ActionRejected {
                reason: IllegalAction::NoSupply,
                ..
            })
        ));
        assert!(state.is_conserved());
    }

    #[test]
    fn test_intake_when_full_rejected() {
        let (topology, mut state) = setup();
        state.robots[0].balls_held = 20;
        state.initial_total_balls += 20;

        assert_eq!(
            check(&topology, &state, RobotId::new(0), RobotAction::Intake),
            Err(IllegalAction::AtCapacity)
        );
    }

    // =========================================================================
    // Pass
    // =========================================================================

    #[test]
    fn test_pass_clips_to_receiver_capacity() {
        let (topology, mut state) = setup();
        state.robots[0].balls_held = 10;
        state.robots[0].pass_amount = 5;
        state.robots[1].balls_held = 18;
        state.initial_total_balls += 28;

        let events = resolve(&topology, &mut state, &only(0, RobotAction::Pass(RobotId::new(1))));

        assert_eq!(state.robots[0].balls_held, 8);
        assert_eq!(state.robots[1].balls_held, 20);
        assert_eq!(
            events.as_slice(),
            &[MatchEvent::BallsPassed {
                from: RobotId::new(0),
                to: RobotId::new(1),
                count: 2
            }]
        );
        assert!(state.is_conserved());
    }

    #[test]
    fn test_pass_rejections() {
        let (topology, mut state) = setup();
        let pass = |target: u8| RobotAction::Pass(RobotId::new(target));

        assert_eq!(
            check(&topology, &state, RobotId::new(0), pass(1)),
            Err(IllegalAction::EmptyHanded)
        );

        state.robots[0].balls_held = 3;
        assert_eq!(
            check(&topology, &state, RobotId::new(0), pass(0)),
            Err(IllegalAction::SelfPass)
        );
        assert_eq!(
            check(&topology, &state, RobotId::new(0), pass(9)),
            Err(IllegalAction::UnknownRobot(RobotId::new(9)))
        );

        state.robots[1].zone = Zone::Attacker;
        assert_eq!(
            check(&topology, &state, RobotId::new(0), pass(1)),
            Err(IllegalAction::NotCoLocated)
        );

        state.robots[2].transit_remaining_ticks = 1;
        state.robots[2].destination = Some(Zone::Defender);
        assert_eq!(
            check(&topology, &state, RobotId::new(0), pass(2)),
            Err(IllegalAction::ReceiverInTransit)
        );

        state.robots[3].balls_held = 20;
        assert_eq!(
            check(&topology, &state, RobotId::new(0), pass(3)),
            Err(IllegalAction::ReceiverFull)
        );

        // Cross-alliance handoffs are allowed.
        assert!(check(&topology, &state, RobotId::new(0), pass(4)).is_ok());
    }

    // =========================================================================
    // Shoot
    // =========================================================================

    #[test]
    fn test_shoot_scores_and_sets_cooldown() {
        let (topology, mut state) = setup();
        state.robots[0].zone = Zone::Attacker;
        state.robots[0].balls_held = 2;
        state.robots[0].shoot_cooldown = 2;
        state.initial_total_balls += 2;

        let events = resolve(&topology, &mut state, &only(0, RobotAction::Shoot));

        assert_eq!(state.robots[0].balls_held, 1);
        assert_eq!(state.scores[Team::Red], 1);
        assert_eq!(state.scored_total, 1);
        // Set to 2, then one tick elapsed.
        assert_eq!(state.robots[0].cooldown_remaining_ticks, 1);
        assert!(matches!(events[0], MatchEvent::BallScored { .. }));

        let events = resolve(&topology, &mut state, &only(0, RobotAction::Shoot));
        assert!(matches!(
            events[0],
            MatchEvent::ActionRejected {
                reason: IllegalAction::CoolingDown,
                ..
            }
        ));
        assert_eq!(state.robots[0].balls_held, 1);

        resolve(&topology, &mut state, &only(0, RobotAction::Shoot));
        assert_eq!(state.robots[0].balls_held, 0);
        assert_eq!(state.scores[Team::Red], 2);
        assert!(state.is_conserved());
    }

    #[test]
    fn test_shoot_rejections() {
        let (topology, mut state) = setup();

        state.robots[0].balls_held = 1;
        assert_eq!(
            check(&topology, &state, RobotId::new(0), RobotAction::Shoot),
            Err(IllegalAction::NoHub)
        );

        state.robots[0].zone = Zone::Defender;
        assert_eq!(
            check(&topology, &state, RobotId::new(0), RobotAction::Shoot),
            Err(IllegalAction::WrongTeam)
        );

        state.robots[1].zone = Zone::Attacker;
        assert_eq!(
            check(&topology, &state, RobotId::new(1), RobotAction::Shoot),
            Err(IllegalAction::EmptyHanded)
        );
    }

    // =========================================================================
    // Move and transit lock
    // =========================================================================

    #[test]
    fn test_move_then_locked_until_arrival() {
        let (topology, mut state) = setup();
        state.robots[0].balls_held = 1;
        state.initial_total_balls += 1;

        let events = resolve(&topology, &mut state, &only(0, RobotAction::Move(Zone::Attacker)));
        assert!(matches!(events[0], MatchEvent::TransitStarted { ticks: 2, .. }));
        assert!(state.robots[0].in_transit());

        // Mid-transit: everything but Hold is rejected.
        for action in [RobotAction::Intake, RobotAction::Shoot, RobotAction::Move(Zone::Neutral)] {
            assert_eq!(
                check(&topology, &state, RobotId::new(0), action),
                Err(IllegalAction::InTransit)
            );
        }
        let events = resolve(&topology, &mut state, &only(0, RobotAction::Intake));
        assert!(matches!(
            events[0],
            MatchEvent::ActionRejected {
                reason: IllegalAction::InTransit,
                ..
            }
        ));
        assert_eq!(state.robots[0].balls_held, 1);

        // Arrives at the start of the next tick and shoots immediately.
        let events = resolve(&topology, &mut state, &only(0, RobotAction::Shoot));
        assert_eq!(
            events[0],
            MatchEvent::RobotArrived {
                robot: RobotId::new(0),
                zone: Zone::Attacker
            }
        );
        assert!(matches!(events[1], MatchEvent::BallScored { .. }));
    }

    #[test]
    fn test_rejected_action_leaves_state_as_hold() {
        let (topology, mut state) = setup();
        let mut held = state.clone();

        resolve(&topology, &mut state, &only(0, RobotAction::Move(Zone::Neutral)));
        resolve(&topology, &mut held, &[RobotAction::Hold; ROBOT_COUNT]);

        assert_eq!(state, held);
    }

    // =========================================================================
    // Masks
    // =========================================================================

    #[test]
    fn test_legal_actions_at_start() {
        let (topology, state) = setup();

        let legal = legal_actions(&topology, &state, RobotId::new(0));

        assert_eq!(
            legal,
            vec![
                RobotAction::Hold,
                RobotAction::Move(Zone::Attacker),
                RobotAction::Move(Zone::Defender),
                RobotAction::Intake,
            ]
        );

        let mask = action_mask(&topology, &state, RobotId::new(0));
        assert_eq!(mask.iter().filter(|&&m| m).count(), 4);
        assert!(mask[0] && mask[1] && !mask[2] && mask[3] && mask[4]);
    }

    #[test]
    fn test_mask_sees_arrival() {
        let (topology, mut state) = setup();
        state.robots[0].balls_held = 2;
        state.initial_total_balls += 2;

        resolve(&topology, &mut state, &only(0, RobotAction::Move(Zone::Attacker)));
        let mask = action_mask(&topology, &state, RobotId::new(0));
        assert!(!mask[RobotAction::Shoot.index() as usize]);

        resolve(&topology, &mut state, &[RobotAction::Hold; ROBOT_COUNT]);
        // One tick left: arrives before anything else next tick.
        let mask = action_mask(&topology, &state, RobotId::new(0));
        assert!(mask[RobotAction::Shoot.index() as usize]);
        assert!(!mask[RobotAction::Intake.index() as usize]);
    }

    #[test]
    fn test_mask_agrees_with_resolver() {
        let (topology, mut state) = setup();
        state.robots[0].balls_held = 4;
        state.robots[0].zone = Zone::Attacker;
        state.initial_total_balls += 4;

        let mask = action_mask(&topology, &state, RobotId::new(0));
        for index in 0..ACTION_COUNT as u32 {
            let action = RobotAction::from_index(index).unwrap();
            let mut trial = state.clone();
            let events = resolve(&topology, &mut trial, &only(0, action));
            let rejected = events
                .iter()
                .any(|e| matches!(e, MatchEvent::ActionRejected { .. }));
            assert_eq!(mask[index as usize], !rejected, "index {}", index);
        }
    }
}
