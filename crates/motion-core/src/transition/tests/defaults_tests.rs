use super::*;

fn spring(spec: &TransitionSpec) -> SpringTransition {
    *spec.as_spring().expect("spring transition")
}

#[test]
fn position_keys_use_under_damped_spring() {
    for key in ["x", "y", "z", "rotate", "rotateX", "rotateY", "rotateZ"] {
        let spec = get_default_transition(key, &AnimationValue::from(50));
        assert_eq!(spec.type_name(), "spring");
        assert_eq!(spec.to, AnimationValue::from(50));
        assert_eq!(
            spring(&spec),
            SpringTransition {
                stiffness: 500.0,
                damping: 25.0,
                rest_delta: 0.5,
                rest_speed: 10.0,
            },
            "{key}"
        );
    }
}

#[test]
fn scale_to_zero_is_critically_damped() {
    let spec = get_default_transition("scale", &AnimationValue::from(0));
    let params = spring(&spec);
    assert_eq!(params.stiffness, 550.0);
    assert_eq!(params.damping, 2.0 * 550f64.sqrt());
    assert_eq!(params.rest_delta, 0.01);
    assert_eq!(params.rest_speed, 10.0);

    let negative_zero = get_default_transition("scaleX", &AnimationValue::from(-0.0));
    assert_eq!(spring(&negative_zero).damping, 2.0 * 550f64.sqrt());
}

#[test]
fn scale_to_non_zero_uses_fixed_damping() {
    for to in [AnimationValue::from(0.5), AnimationValue::from("0")] {
        let spec = get_default_transition("scaleY", &to);
        assert_eq!(spring(&spec).damping, 30.0);
    }
}

#[test]
fn opacity_and_colours_tween_linearly() {
    for key in ["opacity", "backgroundColor", "color"] {
        let spec = get_default_transition(key, &AnimationValue::from(1));
        let tween = spec.as_keyframes().expect("keyframes transition");
        assert_eq!(spec.type_name(), "keyframes");
        assert_eq!(tween.duration, 0.3);
        assert_eq!(tween.ease, Some(EasingDescriptor::named("linear")));
        assert_eq!(tween.values, None);
        assert!(spec.as_spring().is_none());
    }
}

#[test]
fn unknown_keys_follow_the_scale_rule() {
    let spec = get_default_transition("unknownProp", &AnimationValue::from(5));
    assert_eq!(spec.kind, critically_damped_spring(&AnimationValue::from(5)));
    assert_eq!(spring(&spec).damping, 30.0);

    let zero = get_default_transition("borderRadius", &AnimationValue::from(0));
    assert_eq!(spring(&zero).damping, 2.0 * 550f64.sqrt());
}

#[test]
fn keyframe_targets_override_the_table() {
    let target = AnimationValue::from(vec![0, 1, 0]);
    for key in ["x", "scale", "opacity", "anything"] {
        let spec = get_default_transition(key, &target);
        let tween = spec.as_keyframes().expect("keyframes transition");
        assert_eq!(tween.duration, 0.8);
        assert_eq!(tween.ease, None);
        let expected = vec![
            AnimationValue::from(0),
            AnimationValue::from(1),
            AnimationValue::from(0),
        ];
        assert_eq!(tween.values.as_ref(), Some(&expected));
        assert_eq!(spec.to, target);
    }
}

#[test]
fn archetype_table_lookup() {
    assert_eq!(default_archetype("x"), Archetype::UnderDampedSpring);
    assert_eq!(default_archetype("color"), Archetype::LinearTween);
    assert_eq!(default_archetype("zIndex"), Archetype::CriticallyDampedSpring);
}
