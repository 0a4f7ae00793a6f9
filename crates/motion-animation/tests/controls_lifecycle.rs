use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use motion_animation::prelude::*;
use motion_animation::Subscription;
use motion_core::{ResolvedEasing, ResolvedTransition};
use motion_runtime::{Runtime, RuntimeScheduler};

/// Stands in for a host event loop that flushes once per turn when asked.
#[derive(Default)]
struct EventLoop {
    flush_requested: AtomicBool,
}

impl EventLoop {
    fn take_flush_request(&self) -> bool {
        self.flush_requested.swap(false, Ordering::SeqCst)
    }
}

impl RuntimeScheduler for EventLoop {
    fn schedule_flush(&self) {
        self.flush_requested.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct Element {
    animations: RefCell<Vec<(String, ResolvedTransition)>>,
    stopped: RefCell<usize>,
}

impl AnimationTarget for Element {
    fn animate(&self, key: &str, transition: &ResolvedTransition) {
        self.animations
            .borrow_mut()
            .push((key.to_string(), transition.clone()));
    }

    fn set_value(&self, _key: &str, _value: &AnimationValue) {}

    fn stop(&self) {
        *self.stopped.borrow_mut() += 1;
    }
}

fn mount_element(controls: &AnimationControls) -> (Rc<Element>, Subscription) {
    let element = Rc::new(Element::default());
    let subscription = controls.subscribe(element.clone());
    (element, subscription)
}

#[test]
fn queued_start_runs_after_the_first_flush() {
    let scheduler = Arc::new(EventLoop::default());
    let runtime = Runtime::new(scheduler.clone());
    let animation = use_animation(&runtime.handle());
    let (element, _subscription) = mount_element(&animation);

    let definition = AnimationDefinition::from_json(
        r#"{"opacity": 1, "x": 100, "transition": {"ease": [0.4, 0, 0.2, 1], "duration": 0.6}}"#,
    )
    .unwrap();
    assert_eq!(animation.start(definition), StartStatus::Queued);
    assert!(element.animations.borrow().is_empty());

    assert!(scheduler.take_flush_request());
    runtime.flush();
    assert!(!scheduler.take_flush_request());
    assert_eq!(animation.phase(), LifecyclePhase::Mounted);

    let animations = element.animations.borrow();
    let keys: Vec<&str> = animations.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, vec!["opacity", "x"]);
    for (_, transition) in animations.iter() {
        let keyframes = transition.spec.as_keyframes().unwrap();
        assert_eq!(keyframes.duration, 0.6);
        let easing = transition.easing.as_ref().and_then(ResolvedEasing::as_single);
        let easing = easing.unwrap();
        assert_eq!(easing.ease(0.0), 0.0);
        assert_eq!(easing.ease(1.0), 1.0);
    }
}

#[test]
fn keyframe_targets_use_keyframes_with_per_segment_easing() {
    let runtime = Runtime::default();
    let animation = use_animation(&runtime.handle());
    let (element, _subscription) = mount_element(&animation);
    runtime.flush();

    let definition = AnimationDefinition::from_json(
        r#"{"x": [0, 50, 100], "transition": {"ease": ["easeIn", "easeOut"]}}"#,
    )
    .unwrap();
    assert_eq!(animation.start(definition), StartStatus::Started(1));

    let animations = element.animations.borrow();
    let (_, transition) = &animations[0];
    let keyframes = transition.spec.as_keyframes().unwrap();
    assert_eq!(keyframes.duration, 0.8);
    assert_eq!(keyframes.values.as_ref().map(Vec::len), Some(3));
    match transition.easing.as_ref().unwrap() {
        ResolvedEasing::Sequence(curves) => assert_eq!(curves.len(), 2),
        other => panic!("expected an easing per segment, got {other:?}"),
    }
}

#[test]
fn stop_reaches_every_element_and_cancel_keeps_the_rest_mounted() {
    let runtime = Runtime::default();
    let animation = use_animation(&runtime.handle());
    let (first, first_subscription) = mount_element(&animation);
    let (second, _second_subscription) = mount_element(&animation);
    runtime.flush();

    animation.stop();
    assert_eq!(*first.stopped.borrow(), 1);
    assert_eq!(*second.stopped.borrow(), 1);

    first_subscription.cancel();
    assert_eq!(animation.phase(), LifecyclePhase::Mounted);
    assert_eq!(animation.subscriber_count(), 1);
}

#[test]
fn remount_after_teardown_waits_for_another_flush() {
    let runtime = Runtime::default();
    let animation = use_animation(&runtime.handle());

    let (_, subscription) = mount_element(&animation);
    runtime.flush();
    drop(subscription);
    assert_eq!(animation.phase(), LifecyclePhase::Unmounted);
    assert!(animation.set(&AnimationDefinition::new().value("x", 1)).is_err());

    let (element, _subscription) = mount_element(&animation);
    assert_eq!(animation.phase(), LifecyclePhase::AwaitingFlush);
    animation.start(AnimationDefinition::new().value("rotate", 90));
    assert!(element.animations.borrow().is_empty());

    runtime.flush();
    assert_eq!(animation.phase(), LifecyclePhase::Mounted);
    let animations = element.animations.borrow();
    let spring = animations[0].1.spec.as_spring().unwrap();
    assert_eq!(spring.stiffness, 500.0);
    assert_eq!(spring.damping, 25.0);
}
