use super::*;

#[test]
fn defaults_match_the_flex_subset() {
    let s = Style::default();
    assert_eq!(s.flex_direction, FlexDirection::Column);
    assert_eq!(s.align_items, Align::Stretch);
    assert_eq!(s.align_self, Align::Auto);
    assert_eq!(s.position_type, PositionType::Relative);
    assert!(is_undefined(s.width));
    assert!(is_undefined(s.max_height));
    assert_eq!(s.flex, 0.0);
}

#[test]
fn bound_ignores_undefined_limits() {
    let s = Style::default();
    assert_eq!(s.bound(Axis::Row, 42.0), 42.0);
    assert!(is_undefined(s.bound(Axis::Row, UNDEFINED)));
}

#[test]
fn bound_applies_min_after_max() {
    let s = Style {
        min_width: 50.0,
        max_width: 20.0,
        ..Style::default()
    };
    assert_eq!(s.bound(Axis::Row, 30.0), 50.0);
    assert_eq!(s.bound(Axis::Row, 100.0), 50.0);

    let s = Style {
        max_height: 20.0,
        ..Style::default()
    };
    assert_eq!(s.bound(Axis::Column, 30.0), 20.0);
}

#[test]
fn negative_dimensions_do_not_count_as_defined() {
    let s = Style {
        width: -1.0,
        height: 0.0,
        ..Style::default()
    };
    assert!(!s.is_dim_defined(Axis::Row));
    assert!(s.is_dim_defined(Axis::Column));
}

#[test]
fn relative_offset_prefers_leading_edge() {
    let s = Style {
        left: 5.0,
        right: 9.0,
        bottom: 3.0,
        ..Style::default()
    };
    assert_eq!(s.relative_offset(Axis::Row), 5.0);
    assert_eq!(s.relative_offset(Axis::Column), -3.0);
}

#[test]
fn align_self_overrides_parent_items() {
    let parent = Style {
        align_items: Align::Center,
        ..Style::default()
    };
    let child = Style::default();
    assert_eq!(child.align_in(&parent), Align::Center);
    let child = Style {
        align_self: Align::FlexEnd,
        ..Style::default()
    };
    assert_eq!(child.align_in(&parent), Align::FlexEnd);
}

#[test]
fn direction_inherits_ltr_at_root() {
    assert_eq!(Direction::Inherit.resolve(Direction::Inherit), Direction::Ltr);
    assert_eq!(Direction::Inherit.resolve(Direction::Rtl), Direction::Rtl);
    assert_eq!(Direction::Ltr.resolve(Direction::Rtl), Direction::Ltr);
}

#[test]
fn absolute_children_are_never_flexible() {
    let s = Style {
        flex: 1.0,
        position_type: PositionType::Absolute,
        ..Style::default()
    };
    assert!(!s.is_flex());
    assert!(s.is_absolute());
}
