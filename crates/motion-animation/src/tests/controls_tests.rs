use super::*;
use motion_core::{AnimationValue, ResolvedTransition, TransitionOptions};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Animate(String, String),
    Set(String, AnimationValue),
    Stop,
}

#[derive(Default)]
struct RecordingTarget {
    calls: RefCell<Vec<Call>>,
}

impl RecordingTarget {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl AnimationTarget for RecordingTarget {
    fn animate(&self, key: &str, transition: &ResolvedTransition) {
        self.calls.borrow_mut().push(Call::Animate(
            key.to_string(),
            transition.spec.type_name().to_string(),
        ));
    }

    fn set_value(&self, key: &str, value: &AnimationValue) {
        self.calls
            .borrow_mut()
            .push(Call::Set(key.to_string(), value.clone()));
    }

    fn stop(&self) {
        self.calls.borrow_mut().push(Call::Stop);
    }
}

fn animate(key: &str, kind: &str) -> Call {
    Call::Animate(key.to_string(), kind.to_string())
}

#[test]
fn start_before_mount_is_queued() {
    let controls = AnimationControls::new();
    let target = Rc::new(RecordingTarget::default());
    let _subscription = controls.subscribe(target.clone());

    let status = controls.start(AnimationDefinition::new().value("x", 100.0));
    assert_eq!(status, StartStatus::Queued);
    assert_eq!(controls.pending_count(), 1);
    assert!(target.calls().is_empty());
}

#[test]
fn mount_starts_queued_definitions_in_order() {
    let controls = AnimationControls::new();
    let target = Rc::new(RecordingTarget::default());
    let _subscription = controls.subscribe(target.clone());

    controls.start(AnimationDefinition::new().value("x", 100.0));
    controls.start(AnimationDefinition::new().value("opacity", 1.0));
    let _cleanup = controls.mount();

    assert!(controls.is_mounted());
    assert_eq!(controls.pending_count(), 0);
    assert_eq!(
        target.calls(),
        vec![animate("x", "spring"), animate("opacity", "keyframes")]
    );
}

#[test]
fn start_after_mount_reaches_every_subscriber() {
    let controls = AnimationControls::new();
    let first = Rc::new(RecordingTarget::default());
    let second = Rc::new(RecordingTarget::default());
    let _a = controls.subscribe(first.clone());
    let _b = controls.subscribe(second.clone());
    let _cleanup = controls.mount();

    let status = controls.start(AnimationDefinition::new().value("scale", 0.0));
    assert_eq!(status, StartStatus::Started(2));
    assert_eq!(first.calls(), vec![animate("scale", "spring")]);
    assert_eq!(second.calls(), first.calls());
}

#[test]
fn definition_transition_overrides_default() {
    let controls = AnimationControls::new();
    let target = Rc::new(RecordingTarget::default());
    let _subscription = controls.subscribe(target.clone());
    let _cleanup = controls.mount();

    controls.start(
        AnimationDefinition::new()
            .value("x", 10.0)
            .with_transition(TransitionOptions::tween(0.5)),
    );
    assert_eq!(target.calls(), vec![animate("x", "keyframes")]);
}

#[test]
fn values_that_cannot_animate_are_set_instantly() {
    let controls = AnimationControls::new();
    let target = Rc::new(RecordingTarget::default());
    let _subscription = controls.subscribe(target.clone());
    let _cleanup = controls.mount();

    controls.start(
        AnimationDefinition::new()
            .value("zIndex", 3.0)
            .value("display", "block")
            .value("width", "100px"),
    );
    assert_eq!(
        target.calls(),
        vec![
            Call::Set("zIndex".into(), AnimationValue::Number(3.0)),
            Call::Set("display".into(), AnimationValue::Text("block".into())),
            animate("width", "spring"),
        ]
    );
}

#[test]
fn set_requires_mount() {
    let controls = AnimationControls::new();
    let target = Rc::new(RecordingTarget::default());
    let _subscription = controls.subscribe(target.clone());
    let definition = AnimationDefinition::new().value("opacity", 0.5);

    let err = controls.set(&definition).unwrap_err();
    assert!(matches!(err, MotionError::NotMounted { operation: "set" }));
    assert!(target.calls().is_empty());

    let _cleanup = controls.mount();
    controls.set(&definition).unwrap();
    assert_eq!(
        target.calls(),
        vec![Call::Set("opacity".into(), AnimationValue::Number(0.5))]
    );
}

#[test]
fn dropping_subscription_removes_target() {
    let controls = AnimationControls::new();
    let target = Rc::new(RecordingTarget::default());
    let subscription = controls.subscribe(target.clone());
    let _cleanup = controls.mount();
    assert_eq!(controls.subscriber_count(), 1);

    drop(subscription);
    assert_eq!(controls.subscriber_count(), 0);
    assert_eq!(
        controls.start(AnimationDefinition::new().value("x", 1.0)),
        StartStatus::Started(0)
    );
    assert!(target.calls().is_empty());
}

#[test]
fn mount_cleanup_unmounts_and_stops() {
    let controls = AnimationControls::new();
    let target = Rc::new(RecordingTarget::default());
    let _subscription = controls.subscribe(target.clone());

    let cleanup = controls.mount();
    cleanup.run();
    assert!(!controls.is_mounted());
    assert_eq!(target.calls(), vec![Call::Stop]);
    assert_eq!(
        controls.start(AnimationDefinition::new().value("x", 1.0)),
        StartStatus::Queued
    );
}

#[test]
fn notifier_follows_first_and_last_subscriber() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let controls = {
        let events = events.clone();
        AnimationControls::with_notifier(move |_| {
            events.borrow_mut().push("start");
            let events = events.clone();
            Cleanup::new(move || events.borrow_mut().push("stop"))
        })
    };

    let first = controls.subscribe(Rc::new(RecordingTarget::default()));
    let second = controls.subscribe(Rc::new(RecordingTarget::default()));
    assert_eq!(*events.borrow(), vec!["start"]);

    first.cancel();
    assert_eq!(*events.borrow(), vec!["start"]);
    drop(second);
    assert_eq!(*events.borrow(), vec!["start", "stop"]);

    let _again = controls.subscribe(Rc::new(RecordingTarget::default()));
    assert_eq!(*events.borrow(), vec!["start", "stop", "start"]);
}

#[test]
fn subscription_outliving_controls_is_harmless() {
    let controls = AnimationControls::new();
    let subscription = controls.subscribe(Rc::new(RecordingTarget::default()));
    let weak = controls.downgrade();
    drop(controls);
    assert!(weak.upgrade().is_none());
    subscription.cancel();
}

#[test]
fn unsupported_transition_type_animates_with_default() {
    let controls = AnimationControls::new();
    let target = Rc::new(RecordingTarget::default());
    let _subscription = controls.subscribe(target.clone());
    let _cleanup = controls.mount();

    let definition =
        AnimationDefinition::from_json(r#"{"x": 100, "transition": {"type": "inertia"}}"#)
            .unwrap();
    assert_eq!(controls.start(definition), StartStatus::Started(1));
    assert_eq!(target.calls(), vec![animate("x", "spring")]);
}
