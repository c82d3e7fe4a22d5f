//! Property-based tests for state machine invariants.
//!
//! These tests use proptest to drive machines with randomly generated
//! registrations and operation sequences.

use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use waypoint::{Event, State, StateMachine, TransitionError};

const STATE_COUNT: u8 = 6;

#[derive(Clone, Debug)]
enum Op {
    Activate(u8),
    Fire(u8),
}

prop_compose! {
    fn arbitrary_event()(
        name in 0..4u8,
        sources in prop::collection::vec(0..STATE_COUNT + 2, 0..4),
        destination in 0..STATE_COUNT + 2,
    ) -> (u8, Vec<u8>, u8) {
        (name, sources, destination)
    }
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..STATE_COUNT + 2).prop_map(Op::Activate),
        (0..5u8).prop_map(Op::Fire),
    ]
}

fn event_name(n: u8) -> String {
    format!("event-{n}")
}

fn machine_with_states() -> StateMachine<u8> {
    StateMachine::with_states(State::new(0), (1..STATE_COUNT).map(State::new))
}

proptest! {
    #[test]
    fn registered_states_stay_available(
        values in prop::collection::vec(0..20u8, 0..30)
    ) {
        let mut machine = StateMachine::with_initial_value(100u8);
        for value in &values {
            machine.add_state(State::new(*value));
            prop_assert!(machine.is_state_available(value));
        }

        for value in &values {
            prop_assert!(machine.is_state_available(value));
        }

        let mut unique = values.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(machine.available_states().len(), unique.len() + 1);
    }

    #[test]
    fn add_event_is_atomic(events in prop::collection::vec(arbitrary_event(), 0..12)) {
        let mut machine = machine_with_states();

        for (name, sources, destination) in events {
            let before = machine.events().len();
            let valid = !sources.is_empty()
                && sources.iter().all(|s| *s < STATE_COUNT)
                && destination < STATE_COUNT;

            let result = machine.add_event(Event::new(event_name(name), sources, destination));

            prop_assert_eq!(result.is_ok(), valid);
            let expected = if valid { before + 1 } else { before };
            prop_assert_eq!(machine.events().len(), expected);
        }
    }

    #[test]
    fn add_events_matches_individual_adds(events in prop::collection::vec(arbitrary_event(), 0..12)) {
        let mut batched = machine_with_states();
        let mut single = machine_with_states();

        let failures = batched.add_events(
            events
                .iter()
                .map(|(n, s, d)| Event::new(event_name(*n), s.clone(), *d)),
        );
        let single_failures = events
            .iter()
            .filter_map(|(n, s, d)| single.add_event(Event::new(event_name(*n), s.clone(), *d)).err())
            .count();

        prop_assert_eq!(failures.len(), single_failures);
        prop_assert_eq!(batched.events().len(), single.events().len());
    }

    #[test]
    fn current_state_is_always_registered(
        events in prop::collection::vec(arbitrary_event(), 0..12),
        ops in prop::collection::vec(arbitrary_op(), 0..40),
    ) {
        let mut machine = machine_with_states();
        machine.add_events(
            events
                .into_iter()
                .map(|(n, s, d)| Event::new(event_name(n), s, d)),
        );

        for op in ops {
            match op {
                Op::Activate(value) => machine.activate_state(&value),
                Op::Fire(name) => {
                    machine.fire_event(&event_name(name));
                }
            }
            prop_assert!(machine.is_state_available(machine.current_value()));
        }
    }

    #[test]
    fn fire_outcome_matches_preview(
        events in prop::collection::vec(arbitrary_event(), 0..12),
        ops in prop::collection::vec(arbitrary_op(), 0..40),
    ) {
        let mut machine = machine_with_states();
        machine.add_events(
            events
                .into_iter()
                .map(|(n, s, d)| Event::new(event_name(n), s, d)),
        );

        for op in ops {
            match op {
                Op::Activate(value) => machine.activate_state(&value),
                Op::Fire(name) => {
                    let name = event_name(name);
                    let before = *machine.current_value();
                    let preview = machine.possible_transition(&name);
                    let can_fire = machine.can_fire_event(&name);
                    let transition = machine.fire_event(&name);

                    prop_assert_eq!(&preview, &transition);
                    prop_assert_eq!(can_fire, transition.is_successful());
                    match transition.destination() {
                        Some(destination) => {
                            prop_assert_eq!(transition.source().map(|s| *s.value()), Some(before));
                            prop_assert!(machine.is_in_state(destination.value()));
                        }
                        None => prop_assert!(machine.is_in_state(&before)),
                    }
                }
            }
        }
    }

    #[test]
    fn unregistered_activation_changes_nothing(value in STATE_COUNT..u8::MAX) {
        let calls = Rc::new(Cell::new(0));
        let sink = Rc::clone(&calls);
        let mut machine = StateMachine::new(
            State::new(0u8).on_will_exit(move |_| sink.set(sink.get() + 1)),
        );

        machine.activate_state(&value);

        prop_assert!(machine.is_in_state(&0));
        prop_assert_eq!(calls.get(), 0);
        prop_assert!(machine.history().is_empty());
    }

    #[test]
    fn declining_guard_never_moves(fires in 1..20usize) {
        let mut machine = machine_with_states();
        machine
            .add_event(Event::new("blocked", [0u8], 1).when(|_| false))
            .unwrap();

        for _ in 0..fires {
            prop_assert_eq!(
                machine.fire_event("blocked").error(),
                Some(TransitionError::TransitionDeclined)
            );
        }
        prop_assert!(machine.is_in_state(&0));
    }

    #[test]
    fn history_never_exceeds_limit(
        limit in 0..8usize,
        targets in prop::collection::vec(0..STATE_COUNT, 0..30),
    ) {
        let mut machine = waypoint::StateMachineBuilder::new()
            .initial_value(0u8)
            .states((1..STATE_COUNT).map(State::new))
            .history_limit(limit)
            .build()
            .unwrap();

        for target in &targets {
            machine.activate_state(target);
        }

        prop_assert_eq!(machine.history().len(), targets.len().min(limit));
        if let (Some(last), Some(target)) = (machine.history().last(), targets.last()) {
            prop_assert_eq!(&last.to, target);
        }
    }
}
