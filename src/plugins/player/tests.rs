use bevy::prelude::*;

use crate::plugins::actors::{Hitbox, Movement};

use super::*;

fn behavior(window: u32) -> PlayerBehavior {
    PlayerBehavior::new(8.0, Rect::from_corners(Vec2::new(-100.0, -50.0), Vec2::new(0.0, 50.0)), window)
}

#[test]
fn keys_resolve_to_axis_intent() {
    assert_eq!(AxisIntent::from_keys(true, false), AxisIntent::Negative);
    assert_eq!(AxisIntent::from_keys(false, true), AxisIntent::Positive);
    assert_eq!(AxisIntent::from_keys(true, true), AxisIntent::Idle, "opposing keys cancel");
    assert_eq!(AxisIntent::from_keys(false, false), AxisIntent::Idle);
}

#[test]
fn intent_helpers_set_and_clear_axes() {
    let mut intent = PlayerIntent::default();
    intent.move_up();
    intent.move_left();
    assert_eq!((intent.vertical, intent.horizontal), (AxisIntent::Positive, AxisIntent::Negative));

    intent.move_down();
    intent.move_right();
    assert_eq!((intent.vertical, intent.horizontal), (AxisIntent::Negative, AxisIntent::Positive));

    intent.stop_vertical();
    intent.stop_horizontal();
    assert_eq!(intent, PlayerIntent::default());
}

#[test]
fn steer_overwrites_velocity_from_intent() {
    let b = behavior(0);
    let mut movement = Movement::new(Vec2::new(100.0, 100.0));
    let mut intent = PlayerIntent::default();
    intent.move_up();
    intent.move_right();

    b.steer(&intent, &mut movement);
    assert_eq!(movement.velocity, Vec2::new(8.0, 8.0));

    b.steer(&PlayerIntent::default(), &mut movement);
    assert_eq!(movement.velocity, Vec2::ZERO);
}

#[test]
fn leaving_bounds_rolls_back_only_the_offending_axis() {
    let b = behavior(0);
    let movement = Movement::new(Vec2::new(-8.0, 8.0));

    let mut pos = Vec2::new(-50.0, 45.0);
    b.update_position(&movement, &mut pos);
    assert_eq!(pos, Vec2::new(-58.0, 45.0), "y rolled back, x applied");

    let mut pos = Vec2::new(-95.0, 0.0);
    b.update_position(&movement, &mut pos);
    assert_eq!(pos, Vec2::new(-95.0, 8.0), "rolled back, not clamped to the edge");
}

#[test]
fn landing_exactly_on_the_bound_is_allowed() {
    let b = behavior(0);
    let mut pos = Vec2::new(-8.0, 0.0);
    b.update_position(&Movement::new(Vec2::new(8.0, 0.0)), &mut pos);
    assert_eq!(pos, Vec2::new(0.0, 0.0));
}

#[test]
fn invulnerability_window_covers_exactly_its_length_in_ticks() {
    let mut b = behavior(2);
    let mut hitbox = Hitbox::new(Vec2::splat(10.0), Vec2::ZERO);

    b.begin_invulnerability(&mut hitbox);
    assert!(b.is_invulnerable());
    assert!(!hitbox.enabled);

    // Two following ticks stay covered.
    for _ in 0..2 {
        b.tick_invulnerability(&mut hitbox);
        assert!(b.is_invulnerable());
        assert!(!hitbox.enabled);
    }

    b.tick_invulnerability(&mut hitbox);
    assert!(!b.is_invulnerable());
    assert!(hitbox.enabled);

    // Ticking with no open window leaves an externally disabled hitbox alone.
    hitbox.enabled = false;
    b.tick_invulnerability(&mut hitbox);
    assert!(!hitbox.enabled);
}

#[test]
fn one_tick_window_still_covers_the_next_tick() {
    let mut b = behavior(1);
    let mut hitbox = Hitbox::new(Vec2::splat(10.0), Vec2::ZERO);

    b.begin_invulnerability(&mut hitbox);
    b.tick_invulnerability(&mut hitbox);
    assert!(!hitbox.enabled);

    b.tick_invulnerability(&mut hitbox);
    assert!(hitbox.enabled);
}

#[test]
fn zero_length_window_never_opens() {
    let mut b = behavior(0);
    let mut hitbox = Hitbox::new(Vec2::splat(10.0), Vec2::ZERO);
    b.begin_invulnerability(&mut hitbox);
    assert!(!b.is_invulnerable());
    assert!(hitbox.enabled);
}
