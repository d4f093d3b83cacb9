//! Track layouts: border and finish masks, start poses, sprites and the
//! computer's waypoint path

use glam::{IVec2, UVec2, Vec2};

use super::collision::{CrossingRule, FinishLine};
use super::mask::Mask;
use super::vehicle::Pose;

/// Everything the simulation needs to know about a circuit
#[derive(Debug, Clone)]
pub struct Track {
    pub name: String,
    /// Track image size in pixels
    pub size: UVec2,
    /// Solid where cars must not drive
    pub border: Mask,
    pub finish: FinishLine,
    /// Waypoints for the computer car, in lap order
    pub path: Vec<Vec2>,
    pub player_start: Pose,
    pub computer_start: Pose,
    pub player_sprite: Mask,
    pub computer_sprite: Mask,
}

/// Waypoints of the classic circuit
pub const CLASSIC_PATH: [(f32, f32); 22] = [
    (175.0, 119.0),
    (110.0, 70.0),
    (56.0, 133.0),
    (70.0, 481.0),
    (318.0, 731.0),
    (404.0, 680.0),
    (418.0, 521.0),
    (507.0, 475.0),
    (600.0, 551.0),
    (613.0, 715.0),
    (736.0, 713.0),
    (734.0, 399.0),
    (611.0, 357.0),
    (409.0, 343.0),
    (433.0, 257.0),
    (697.0, 258.0),
    (738.0, 123.0),
    (581.0, 71.0),
    (303.0, 78.0),
    (275.0, 377.0),
    (176.0, 388.0),
    (178.0, 260.0),
];

/// Where the finish line image sits on the classic circuit
pub const CLASSIC_FINISH_POSITION: IVec2 = IVec2::new(130, 250);
pub const CLASSIC_PLAYER_START: (f32, f32) = (145.0, 200.0);
pub const CLASSIC_COMPUTER_START: (f32, f32) = (175.0, 200.0);

impl Track {
    /// The classic circuit, with masks decoded from its images
    pub fn classic(border: Mask, finish: Mask, player_sprite: Mask, computer_sprite: Mask) -> Self {
        let size = UVec2::new(border.width(), border.height());
        Self {
            name: "classic".to_string(),
            size,
            border,
            finish: FinishLine::new(finish, CLASSIC_FINISH_POSITION, CrossingRule::RejectRow(0)),
            path: CLASSIC_PATH.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
            player_start: Pose::at(CLASSIC_PLAYER_START.0, CLASSIC_PLAYER_START.1),
            computer_start: Pose::at(CLASSIC_COMPUTER_START.0, CLASSIC_COMPUTER_START.1),
            player_sprite,
            computer_sprite,
        }
    }

    /// A rectangular loop built in code, so the game runs without assets.
    ///
    /// 400x300 with an 80px lane; the lap runs clockwise and the finish line
    /// crosses the left lane below the start grid.
    pub fn demo() -> Self {
        const W: u32 = 400;
        const H: u32 = 300;
        let outer = (20, 20, 380, 280);
        let inner = (100, 100, 300, 200);

        let border = Mask::from_fn(W, H, |x, y| {
            let outside = x < outer.0 || y < outer.1 || x >= outer.2 || y >= outer.3;
            let infield = x >= inner.0 && y >= inner.1 && x < inner.2 && y < inner.3;
            outside || infield
        });

        let path = [
            (60.0, 60.0),
            (200.0, 45.0),
            (330.0, 60.0),
            (330.0, 220.0),
            (200.0, 235.0),
            (60.0, 220.0),
            (60.0, 120.0),
        ];

        Self {
            name: "demo".to_string(),
            size: UVec2::new(W, H),
            border,
            finish: FinishLine::new(Mask::filled(80, 6), IVec2::new(20, 150), CrossingRule::RejectRow(0)),
            path: path.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
            player_start: Pose::at(35.0, 110.0),
            computer_start: Pose::at(65.0, 110.0),
            player_sprite: car_sprite(12, 22),
            computer_sprite: car_sprite(10, 20),
        }
    }
}

/// Rectangle with the four corner pixels knocked off
fn car_sprite(width: u32, height: u32) -> Mask {
    Mask::from_fn(width, height, |x, y| {
        let edge_x = x == 0 || x == width - 1;
        let edge_y = y == 0 || y == height - 1;
        !(edge_x && edge_y)
    })
}
