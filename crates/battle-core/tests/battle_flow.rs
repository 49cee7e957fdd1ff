//! Full message-driven flow: board, listeners, events, and replay.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use battle_core::{
    ActionId, ActionRecord, Affiliation, AnimationListener, BattleContext, BattleEvent,
    BattleMessage, BattleState, ChallengeModifierKind, DegreeOfSuccess, EventEffect,
    EventMessageListener, EventTrigger, GridStore, MapCoordinate, MessageBoard, MessageKind,
    MessageListener, PendingCutscenes, SquaddieChange, SquaddieEventKind, SquaddieId,
    SquaddieRoster, TemplateId, TriggerCondition,
};

const HERO: SquaddieId = SquaddieId(1);
const BANDIT: SquaddieId = SquaddieId(9);

/// Captures turn-flow messages emitted by the core.
struct FlowRecorder {
    seen: Rc<RefCell<Vec<BattleMessage>>>,
}

impl MessageListener for FlowRecorder {
    fn name(&self) -> &'static str {
        "flow_recorder"
    }

    fn receive_message(&mut self, message: &BattleMessage, _context: &mut BattleContext<'_>) {
        self.seen.borrow_mut().push(message.clone());
    }
}

fn board_with_listeners(seen: Rc<RefCell<Vec<BattleMessage>>>) -> MessageBoard {
    let mut board = MessageBoard::new();
    board.add_listener(
        Box::new(AnimationListener::new()),
        [MessageKind::AnimationFinished],
    );
    board.add_listener(
        Box::new(EventMessageListener::new()),
        [
            MessageKind::PhaseStarted,
            MessageKind::SquaddieInjured,
            MessageKind::SquaddieDefeated,
            MessageKind::MissionResolved,
        ],
    );
    board.add_listener(
        Box::new(FlowRecorder { seen }),
        [MessageKind::SquaddieTurnEnded, MessageKind::NextActorChosen],
    );
    board
}

fn setup() -> (BattleState, GridStore, SquaddieRoster) {
    let mut grid = GridStore::new();
    grid.place(HERO, MapCoordinate::ORIGIN);
    grid.place(BANDIT, MapCoordinate::new(3, 0));

    let mut roster = SquaddieRoster::new();
    roster.add_squaddie(HERO, TemplateId(1), Affiliation::Player);
    roster.add_squaddie(BANDIT, TemplateId(40), Affiliation::Enemy);

    (BattleState::new(), grid, roster)
}

#[test]
fn defeat_message_queues_the_cutscene_while_the_action_is_still_pending() {
    let (mut state, mut grid, mut roster) = setup();

    let defeat_trigger = EventTrigger::new(TriggerCondition::Squaddie {
        event: SquaddieEventKind::Defeated,
        battle_ids: HashSet::from([BANDIT]),
        template_ids: HashSet::new(),
    })
    .unwrap();
    state.events.push(
        BattleEvent::builder()
            .trigger(defeat_trigger)
            .effect(EventEffect::cutscene("bandit_leader_falls"))
            .build()
            .unwrap(),
    );

    // The killing blow is enqueued and animating; the bandit is already
    // marked dead in the roster.
    state.ledger.enqueue(ActionRecord::named(
        HERO,
        ActionId(2),
        vec![SquaddieChange::new(
            BANDIT,
            14,
            DegreeOfSuccess::CriticalSuccess,
        )],
    ));
    roster.set_alive(BANDIT, false);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut board = board_with_listeners(seen.clone());
    let mut cutscenes = PendingCutscenes::new();

    let mut context =
        BattleContext::new(&mut state, &mut grid, &roster, &roster, Some(&mut cutscenes));
    board
        .send_message(
            &mut context,
            BattleMessage::SquaddieDefeated { ids: vec![BANDIT] },
        )
        .unwrap();
    board
        .send_message(&mut context, BattleMessage::AnimationFinished)
        .unwrap();

    let queued: Vec<_> = cutscenes.queued().iter().map(|id| id.as_str()).collect();
    assert_eq!(queued, vec!["bandit_leader_falls"]);

    // The animation-finished dispatch committed the attack and kept the
    // hero as the pending actor.
    assert_eq!(state.ledger.current_turn().len(), 1);
    assert_eq!(state.pending_actor, Some(HERO));
    assert_eq!(
        *seen.borrow(),
        vec![BattleMessage::NextActorChosen { squaddie: HERO }]
    );
}

#[test]
fn exhausted_actor_gets_a_turn_ended_notification() {
    let (mut state, mut grid, mut roster) = setup();
    roster.set_can_still_act(HERO, false);

    state
        .ledger
        .enqueue(ActionRecord::named(HERO, ActionId(2), vec![]));

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut board = board_with_listeners(seen.clone());
    let mut context = BattleContext::new(&mut state, &mut grid, &roster, &roster, None);
    board
        .send_message(&mut context, BattleMessage::AnimationFinished)
        .unwrap();

    assert_eq!(state.pending_actor, None);
    assert_eq!(
        *seen.borrow(),
        vec![BattleMessage::SquaddieTurnEnded { squaddie: HERO }]
    );
}

#[test]
fn phase_start_event_flips_training_wheels_exactly_once() {
    let (mut state, mut grid, roster) = setup();

    state.events.push(
        BattleEvent::builder()
            .trigger(EventTrigger::on_turn(0))
            .effect(EventEffect::challenge_modifier(
                ChallengeModifierKind::TrainingWheels,
                true,
            ))
            .build()
            .unwrap(),
    );

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut board = board_with_listeners(seen);

    let mut context = BattleContext::new(&mut state, &mut grid, &roster, &roster, None);
    board
        .send_message(&mut context, BattleMessage::PhaseStarted)
        .unwrap();
    assert!(
        state
            .modifiers
            .get_setting(ChallengeModifierKind::TrainingWheels)
    );

    // The orchestrator marks the effect durably applied, then the next
    // phase start must not re-apply it even after the flag is flipped back.
    state.events[0].effect_mut().mark_applied();
    state
        .modifiers
        .set_setting(ChallengeModifierKind::TrainingWheels, false);

    let mut context = BattleContext::new(&mut state, &mut grid, &roster, &roster, None);
    board
        .send_message(&mut context, BattleMessage::PhaseStarted)
        .unwrap();
    assert!(
        !state
            .modifiers
            .get_setting(ChallengeModifierKind::TrainingWheels)
    );
}

#[test]
fn mission_resolution_updates_state_and_fires_completion_events() {
    let (mut state, mut grid, roster) = setup();

    state.events.push(
        BattleEvent::builder()
            .trigger(EventTrigger::on_completion(
                battle_core::MissionCompletionStatus::Victory,
            ))
            .effect(EventEffect::cutscene("victory_march"))
            .build()
            .unwrap(),
    );

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut board = board_with_listeners(seen);
    let mut cutscenes = PendingCutscenes::new();

    let mut context =
        BattleContext::new(&mut state, &mut grid, &roster, &roster, Some(&mut cutscenes));
    board
        .send_message(
            &mut context,
            BattleMessage::MissionResolved {
                status: battle_core::MissionCompletionStatus::Victory,
            },
        )
        .unwrap();

    assert_eq!(
        state.completion,
        battle_core::MissionCompletionStatus::Victory
    );
    assert_eq!(cutscenes.drain().len(), 1);
}

#[test]
fn snapshots_are_independent_of_the_live_battle() {
    let config = battle_core::BattleConfig {
        max_message_chain: 8,
        training_wheels: true,
    };
    let mut state = BattleState::with_config(&config);
    let _board = MessageBoard::with_config(&config);

    let snapshot = state.clone();
    state
        .modifiers
        .set_setting(ChallengeModifierKind::TrainingWheels, false);
    state.ledger.end_turn();

    assert!(
        snapshot
            .modifiers
            .get_setting(ChallengeModifierKind::TrainingWheels)
    );
    assert!(snapshot.ledger.history().is_empty());
}

#[test]
fn archived_history_round_trips_through_json() {
    let (mut state, mut grid, roster) = setup();

    state.ledger.enqueue(ActionRecord::movement(
        HERO,
        MapCoordinate::ORIGIN,
        MapCoordinate::new(0, 1),
    ));
    grid.move_to(HERO, MapCoordinate::new(0, 1));
    battle_core::resolve_finished_animation(&mut state.ledger, &mut grid, &roster).unwrap();

    state.ledger.enqueue(ActionRecord::named(
        HERO,
        ActionId(2),
        vec![SquaddieChange::new(BANDIT, 5, DegreeOfSuccess::Success)],
    ));
    battle_core::resolve_finished_animation(&mut state.ledger, &mut grid, &roster).unwrap();
    state.ledger.end_turn();

    let json = serde_json::to_string(&state).unwrap();
    let replayed: BattleState = serde_json::from_str(&json).unwrap();
    assert_eq!(replayed, state);
    assert_eq!(replayed.ledger.history().len(), 1);
    assert_eq!(replayed.ledger.history()[0].len(), 2);
}
