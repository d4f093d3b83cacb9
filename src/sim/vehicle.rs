//! Car kinematics shared by the player and the computer
//!
//! Movement is a single scalar velocity along the heading; there is no
//! sideways slip or momentum vector.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::mask::{Mask, rotated_extent};
use crate::heading_step;

/// Which way to turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    /// Counter-clockwise (angle grows)
    Left,
    /// Clockwise (angle shrinks)
    Right,
}

/// Position and heading a car returns to on reset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Top-left corner of the unrotated sprite, track pixels
    pub pos: Vec2,
    /// Degrees, 0 = up, counter-clockwise positive
    pub angle: f32,
}

impl Pose {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            angle: 0.0,
        }
    }
}

/// Shared car state: pose, speed limits and silhouette
#[derive(Debug, Clone)]
pub struct Car {
    pub pos: Vec2,
    pub angle: f32,
    pub velocity: f32,
    pub max_velocity: f32,
    pub rotation_velocity: f32,
    pub acceleration: f32,
    start: Pose,
    sprite: Mask,
}

impl Car {
    pub fn new(
        start: Pose,
        sprite: Mask,
        max_velocity: f32,
        rotation_velocity: f32,
        acceleration: f32,
    ) -> Self {
        Self {
            pos: start.pos,
            angle: start.angle,
            velocity: 0.0,
            max_velocity,
            rotation_velocity,
            acceleration,
            start,
            sprite,
        }
    }

    pub fn start(&self) -> Pose {
        self.start
    }

    /// Unrotated sprite mask
    pub fn sprite(&self) -> &Mask {
        &self.sprite
    }

    /// Unrotated sprite size in pixels
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.sprite.width() as f32, self.sprite.height() as f32)
    }

    pub fn rotate(&mut self, turn: Turn) {
        match turn {
            Turn::Left => self.angle += self.rotation_velocity,
            Turn::Right => self.angle -= self.rotation_velocity,
        }
    }

    /// Advance one step along the heading at the current velocity
    pub fn step(&mut self) {
        self.pos += heading_step(self.angle, self.velocity);
    }

    pub fn accelerate_forward(&mut self) {
        self.velocity = (self.velocity + self.acceleration).min(self.max_velocity);
        self.step();
    }

    /// Reverse is capped at half the forward top speed
    pub fn accelerate_backward(&mut self) {
        self.velocity = (self.velocity - self.acceleration).max(-self.max_velocity / 2.0);
        self.step();
    }

    pub fn reset(&mut self) {
        self.pos = self.start.pos;
        self.angle = self.start.angle;
        self.velocity = 0.0;
    }

    /// Top-left of the rotated sprite when drawn spinning about the centre
    /// of the unrotated sprite rectangle
    pub fn rotated_origin(&self) -> Vec2 {
        let (w, h) = rotated_extent(self.sprite.width(), self.sprite.height(), self.angle);
        self.pos + self.size() / 2.0 - Vec2::new(w as f32, h as f32) / 2.0
    }

    /// Rotated sprite mask and its top-left corner, truncated to pixels
    pub fn silhouette(&self) -> (Mask, IVec2) {
        let origin = self.rotated_origin();
        (
            self.sprite.rotated(self.angle),
            IVec2::new(origin.x as i32, origin.y as i32),
        )
    }
}

/// Common surface of both car kinds
pub trait Vehicle {
    fn car(&self) -> &Car;
    fn car_mut(&mut self) -> &mut Car;

    /// Per-tick movement for this kind of car
    fn drive(&mut self);

    fn rotate(&mut self, turn: Turn) {
        self.car_mut().rotate(turn);
    }

    fn reset(&mut self) {
        self.car_mut().reset();
    }
}

/// The human-driven car
#[derive(Debug, Clone)]
pub struct PlayerCar {
    pub car: Car,
    /// Clock reading of the last crash sound
    pub last_crash_at: Option<f64>,
}

impl PlayerCar {
    pub fn new(start: Pose, sprite: Mask, max_velocity: f32, rotation_velocity: f32, acceleration: f32) -> Self {
        Self {
            car: Car::new(start, sprite, max_velocity, rotation_velocity, acceleration),
            last_crash_at: None,
        }
    }

    /// Coast: friction pulls velocity toward zero but never past it
    pub fn decelerate_passive(&mut self) {
        let car = &mut self.car;
        car.velocity = (car.velocity - car.acceleration / 2.0).max(0.0);
        car.step();
    }

    /// Reverse with damping and step away from whatever was hit.
    ///
    /// The reversed speed stays inside the reverse limit, so a full-speed
    /// hit backs off at `-max_velocity / 2`. Returns true when a crash sound
    /// should play: at most once per `cooldown` seconds.
    pub fn bounce(&mut self, damping: f32, now: f64, cooldown: f64) -> bool {
        let car = &mut self.car;
        car.velocity = (-car.velocity / damping).clamp(-car.max_velocity / 2.0, car.max_velocity);
        car.step();

        let due = self.last_crash_at.is_none_or(|last| now - last > cooldown);
        if due {
            self.last_crash_at = Some(now);
        }
        due
    }
}

impl Vehicle for PlayerCar {
    fn car(&self) -> &Car {
        &self.car
    }

    fn car_mut(&mut self) -> &mut Car {
        &mut self.car
    }

    fn drive(&mut self) {
        self.car.step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerCar {
        PlayerCar::new(Pose::at(100.0, 200.0), Mask::filled(10, 20), 4.0, 4.0, 0.1)
    }

    #[test]
    fn test_accelerate_forward_caps_at_max() {
        let mut p = player();
        for _ in 0..100 {
            p.car.accelerate_forward();
        }
        assert_eq!(p.car.velocity, 4.0);
        // Heading 0 drives up the image
        assert!(p.car.pos.y < 200.0);
        assert!((p.car.pos.x - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_accelerate_backward_caps_at_half_max() {
        let mut p = player();
        for _ in 0..100 {
            p.car.accelerate_backward();
        }
        assert_eq!(p.car.velocity, -2.0);
        assert!(p.car.pos.y > 200.0);
    }

    #[test]
    fn test_passive_deceleration_never_reverses() {
        let mut p = player();
        for _ in 0..50 {
            p.decelerate_passive();
            assert_eq!(p.car.velocity, 0.0);
        }
        assert_eq!(p.car.pos, Vec2::new(100.0, 200.0));

        p.car.velocity = 0.12;
        p.decelerate_passive();
        assert!((p.car.velocity - 0.07).abs() < 1e-6);
        p.decelerate_passive();
        assert!((p.car.velocity - 0.02).abs() < 1e-6);
        p.decelerate_passive();
        assert_eq!(p.car.velocity, 0.0);
    }

    #[test]
    fn test_passive_deceleration_from_reverse_goes_to_zero() {
        let mut p = player();
        p.car.velocity = -1.5;
        p.decelerate_passive();
        assert_eq!(p.car.velocity, 0.0);
    }

    #[test]
    fn test_bounce_reverses_and_damps() {
        let mut p = player();
        p.car.velocity = 3.0;
        p.bounce(1.5, 0.0, 0.3);
        assert_eq!(p.car.velocity, -2.0);
        // Stepped backward (down the image)
        assert!((p.car.pos.y - 202.0).abs() < 1e-4);
    }

    #[test]
    fn test_full_speed_bounce_capped_at_reverse_limit() {
        let mut p = player();
        p.car.velocity = 4.0;
        p.bounce(1.5, 0.0, 0.3);
        assert_eq!(p.car.velocity, -2.0);

        // Reversing into a wall comes back forward, uncapped
        p.car.velocity = -2.0;
        p.bounce(1.5, 1.0, 0.3);
        assert!((p.car.velocity - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_sound_is_debounced() {
        let mut p = player();
        assert!(p.bounce(1.5, 10.0, 0.3));
        assert!(!p.bounce(1.5, 10.1, 0.3));
        assert!(!p.bounce(1.5, 10.25, 0.3));
        assert!(p.bounce(1.5, 10.31, 0.3));
        assert_eq!(p.last_crash_at, Some(10.31));
    }

    #[test]
    fn test_rotate_is_unbounded() {
        let mut p = player();
        for _ in 0..100 {
            p.rotate(Turn::Left);
        }
        assert_eq!(p.car.angle, 400.0);
        p.rotate(Turn::Right);
        assert_eq!(p.car.angle, 396.0);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut p = player();
        p.rotate(Turn::Left);
        p.car.accelerate_forward();
        p.car.accelerate_forward();
        p.reset();
        assert_eq!(p.car.start(), Pose::at(100.0, 200.0));
        assert_eq!(p.car.pos, p.car.start().pos);
        assert_eq!(p.car.angle, p.car.start().angle);
        assert_eq!(p.car.velocity, 0.0);
    }

    #[test]
    fn test_silhouette_at_rest_is_sprite_at_position() {
        let p = player();
        let (mask, origin) = p.car.silhouette();
        assert_eq!(origin, IVec2::new(100, 200));
        assert_eq!((mask.width(), mask.height()), (10, 20));
    }

    #[test]
    fn test_silhouette_quarter_turn_stays_centred() {
        let mut p = player();
        p.car.angle = 90.0;
        let (mask, origin) = p.car.silhouette();
        assert_eq!((mask.width(), mask.height()), (20, 10));
        // Centre (105, 210) is preserved
        assert_eq!(origin, IVec2::new(95, 205));
    }
}
