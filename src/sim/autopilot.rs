//! Path-following computer car
//!
//! The computer steers toward one waypoint at a time, turning at most
//! `rotation_velocity` degrees per tick, and moves on to the next waypoint
//! once the point falls inside its sprite rectangle.

use glam::Vec2;

use super::mask::Mask;
use super::vehicle::{Car, Pose, Vehicle};

/// Heading in degrees that points from `from` toward `target`.
///
/// Uses `atan(dx / dy)` and flips by 180 when the target is below, so the
/// result lies in (-90, 270). A zero vertical difference takes the 90 degree
/// branch instead of dividing by zero.
pub fn desired_heading(from: Vec2, target: Vec2) -> f32 {
    let dx = target.x - from.x;
    let dy = target.y - from.y;

    let mut desired = if dy == 0.0 { 90.0 } else { (dx / dy).atan().to_degrees() };
    if target.y > from.y {
        desired += 180.0;
    }
    desired
}

/// Signed heading error. Positive means turn right.
///
/// Only one wrap is applied: errors of 180 or more lose a single turn.
/// Headings far outside one revolution are not folded back, so the car
/// may take the long way round.
pub fn heading_error(angle: f32, from: Vec2, target: Vec2) -> f32 {
    let mut diff = angle - desired_heading(from, target);
    if diff >= 180.0 {
        diff -= 360.0;
    }
    diff
}

/// Whether `point` lies in the axis-aligned sprite rectangle at `pos`
pub fn rect_contains(pos: Vec2, size: Vec2, point: Vec2) -> bool {
    let (x, y) = (pos.x as i32, pos.y as i32);
    let (w, h) = (size.x as i32, size.y as i32);
    let (px, py) = (point.x as i32, point.y as i32);
    px >= x && px < x + w && py >= y && py < y + h
}

/// The computer-driven car
#[derive(Debug, Clone)]
pub struct ComputerCar {
    pub car: Car,
    path: Vec<Vec2>,
    current_point: usize,
}

impl ComputerCar {
    /// Starts rolling at `max_velocity` straight away
    pub fn new(
        start: Pose,
        sprite: Mask,
        max_velocity: f32,
        rotation_velocity: f32,
        acceleration: f32,
        path: Vec<Vec2>,
    ) -> Self {
        let mut car = Car::new(start, sprite, max_velocity, rotation_velocity, acceleration);
        car.velocity = max_velocity;
        Self {
            car,
            path,
            current_point: 0,
        }
    }

    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    /// Index of the waypoint being steered toward
    pub fn current_point(&self) -> usize {
        self.current_point
    }

    /// Current target, or `None` once the path is exhausted
    pub fn target(&self) -> Option<Vec2> {
        self.path.get(self.current_point).copied()
    }

    pub fn finished_path(&self) -> bool {
        self.current_point >= self.path.len()
    }

    /// Turn toward the current waypoint, by no more than the turn rate
    pub fn calculate_angle(&mut self) {
        let Some(target) = self.target() else { return };
        let diff = heading_error(self.car.angle, self.car.pos, target);
        let turn = self.car.rotation_velocity.min(diff.abs());
        if diff > 0.0 {
            self.car.angle -= turn;
        } else {
            self.car.angle += turn;
        }
    }

    /// Move on to the next waypoint if the current one is under the car
    pub fn update_path_point(&mut self) {
        let Some(target) = self.target() else { return };
        if rect_contains(self.car.pos, self.car.size(), target) {
            self.current_point += 1;
            log::debug!("Computer reached waypoint {}/{}", self.current_point, self.path.len());
        }
    }

    /// Back to the start line with the speed for `level`
    pub fn next_level(&mut self, level: u32, level_speed_step: f32) {
        self.car.reset();
        self.car.velocity = self.car.max_velocity + level.saturating_sub(1) as f32 * level_speed_step;
        self.current_point = 0;
    }
}

impl Vehicle for ComputerCar {
    fn car(&self) -> &Car {
        &self.car
    }

    fn car_mut(&mut self) -> &mut Car {
        &mut self.car
    }

    /// Steer, check the waypoint, then step. Idle once the path runs out.
    fn drive(&mut self) {
        if self.finished_path() {
            return;
        }
        self.calculate_angle();
        self.update_path_point();
        self.car.step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computer(path: Vec<Vec2>) -> ComputerCar {
        ComputerCar::new(Pose::at(100.0, 100.0), Mask::filled(10, 20), 2.0, 4.0, 0.1, path)
    }

    #[test]
    fn test_desired_heading_quadrants() {
        let from = Vec2::new(100.0, 100.0);
        // Straight up
        assert!(desired_heading(from, Vec2::new(100.0, 50.0)).abs() < 1e-4);
        // Up and to the left is counter-clockwise
        assert!((desired_heading(from, Vec2::new(50.0, 50.0)) - 45.0).abs() < 1e-4);
        // Up and to the right
        assert!((desired_heading(from, Vec2::new(150.0, 50.0)) + 45.0).abs() < 1e-4);
        // Straight down
        assert!((desired_heading(from, Vec2::new(100.0, 150.0)) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_desired_heading_level_target_takes_ninety_branch() {
        let from = Vec2::new(100.0, 100.0);
        assert_eq!(desired_heading(from, Vec2::new(40.0, 100.0)), 90.0);
        assert_eq!(desired_heading(from, Vec2::new(160.0, 100.0)), 90.0);
    }

    #[test]
    fn test_calculate_angle_turns_by_at_most_rate() {
        let mut c = computer(vec![Vec2::new(50.0, 100.0)]);
        c.calculate_angle();
        assert_eq!(c.car.angle, 4.0);

        // Small error is closed exactly, no overshoot
        let mut c = computer(vec![Vec2::new(99.0, 0.0)]);
        c.calculate_angle();
        let desired = desired_heading(Vec2::new(100.0, 100.0), Vec2::new(99.0, 0.0));
        assert!((c.car.angle - desired).abs() < 1e-5);
    }

    #[test]
    fn test_heading_error_wraps_once() {
        let from = Vec2::new(100.0, 100.0);
        let up_right = Vec2::new(150.0, 50.0);
        assert!((heading_error(0.0, from, up_right) - 45.0).abs() < 1e-4);
        // 645 drops to 285, not to -75
        assert!((heading_error(600.0, from, up_right) - 285.0).abs() < 1e-3);
        // Large negative errors are left alone
        let below = Vec2::new(80.0, 200.0);
        assert!(heading_error(-80.0, from, below) < -180.0);
    }

    #[test]
    fn test_calculate_angle_direction_follows_single_wrap() {
        // Target up and to the right: turn clockwise
        let mut c = computer(vec![Vec2::new(150.0, 50.0)]);
        c.calculate_angle();
        assert!((c.car.angle + 4.0).abs() < 1e-5);

        // Heading -80, bearing ~169: error ~-249 stays negative, so the car
        // turns counter-clockwise
        let mut c = computer(vec![Vec2::new(80.0, 200.0)]);
        c.car.angle = -80.0;
        c.calculate_angle();
        assert!((c.car.angle + 76.0).abs() < 1e-4);

        // Heading 600, bearing -45: error 645 becomes 285, still positive
        let mut c = computer(vec![Vec2::new(150.0, 50.0)]);
        c.car.angle = 600.0;
        c.calculate_angle();
        assert!((c.car.angle - 596.0).abs() < 1e-4);
    }

    #[test]
    fn test_update_path_point_uses_sprite_rect() {
        let mut c = computer(vec![Vec2::new(105.0, 119.0), Vec2::new(0.0, 0.0)]);
        c.update_path_point();
        assert_eq!(c.current_point(), 1);
        // Second point is well outside
        c.update_path_point();
        assert_eq!(c.current_point(), 1);
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let pos = Vec2::new(10.0, 10.0);
        let size = Vec2::new(5.0, 5.0);
        assert!(rect_contains(pos, size, Vec2::new(10.0, 10.0)));
        assert!(rect_contains(pos, size, Vec2::new(14.0, 14.0)));
        assert!(!rect_contains(pos, size, Vec2::new(15.0, 10.0)));
        assert!(!rect_contains(pos, size, Vec2::new(10.0, 15.0)));
    }

    #[test]
    fn test_drive_stops_at_end_of_path() {
        let mut c = computer(vec![Vec2::new(105.0, 110.0)]);
        c.drive();
        assert_eq!(c.current_point(), 1);
        assert!(c.finished_path());

        let parked = c.car.pos;
        for _ in 0..10 {
            c.drive();
        }
        assert_eq!(c.car.pos, parked);
        assert_eq!(c.current_point(), 1);
    }

    #[test]
    fn test_empty_path_idles() {
        let mut c = computer(Vec::new());
        c.drive();
        assert_eq!(c.car.pos, Vec2::new(100.0, 100.0));
        assert!(c.target().is_none());
    }

    #[test]
    fn test_next_level_scales_speed() {
        let mut c = computer(vec![Vec2::new(105.0, 110.0), Vec2::new(0.0, 0.0)]);
        c.drive();
        c.car.angle = 33.0;
        c.next_level(3, 0.2);
        assert!((c.car.velocity - 2.4).abs() < 1e-6);
        assert_eq!(c.current_point(), 0);
        assert_eq!(c.car.pos, Vec2::new(100.0, 100.0));
        assert_eq!(c.car.angle, 0.0);

        c.next_level(1, 0.2);
        assert_eq!(c.car.velocity, 2.0);
    }

    #[test]
    fn test_follows_path_to_completion() {
        let path = vec![
            Vec2::new(100.0, 40.0),
            Vec2::new(40.0, 40.0),
            Vec2::new(40.0, 120.0),
        ];
        let mut c = computer(path);
        for _ in 0..2000 {
            let before = c.current_point();
            c.drive();
            assert!(c.current_point() >= before);
            if c.finished_path() {
                break;
            }
        }
        assert!(c.finished_path());
        assert_eq!(c.current_point(), 3);
    }
}
