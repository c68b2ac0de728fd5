use rand::Rng;

use super::{Fuel, Polygon, ShipState, Vec2};
use crate::error::Error;

pub(crate) mod defaults {
    pub const PAD_WIDTH: f64 = 20.;
    pub const PAD_HEIGHT: f64 = 5.;
    pub const PAD_SIDE_CLEARANCE: i64 = 200;
    pub const PAD_FLOOR_CLEARANCE: i64 = 100;
    pub const SHOULDER_MIN: i64 = 200;
    pub const SHOULDER_MAX: i64 = 1000;
    pub const START_Y: f64 = 30.;
    pub const START_V1: f64 = -0.1;
    pub const FUEL: u32 = 1000;
}

const MIN_ARENA_WIDTH: f64 = (2 * defaults::PAD_SIDE_CLEARANCE) as f64;
const MIN_ARENA_HEIGHT: f64 = (2 * defaults::PAD_FLOOR_CLEARANCE) as f64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn altitude(&self, y: f64) -> f64 {
        (y - self.height).abs()
    }
}

/// Landing target; `x, y` is the top-left corner of the pad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pad {
    pub x: f64,
    pub y: f64,
    pub left_shoulder: f64,
    pub right_shoulder: f64,
}

impl Pad {
    pub fn new(x: f64, y: f64, left_shoulder: f64, right_shoulder: f64) -> Self {
        Self {
            x,
            y,
            left_shoulder,
            right_shoulder,
        }
    }

    pub fn width(&self) -> f64 {
        defaults::PAD_WIDTH
    }

    pub fn height(&self) -> f64 {
        defaults::PAD_HEIGHT
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width() / 2.
    }

    /// Mountain under the pad, reaching the floor of the arena.
    pub fn terrain(&self, arena: &Arena) -> Polygon {
        let base = self.y + self.height();
        Polygon::new(vec![
            Vec2::new(self.x, base),
            Vec2::new(self.x - self.left_shoulder, arena.height),
            Vec2::new(self.x + self.right_shoulder, arena.height),
            Vec2::new(self.x + self.width(), base),
        ])
    }
}

#[derive(Debug, Clone)]
pub struct Level {
    pub arena: Arena,
    pub pad: Pad,
    pub terrain: Polygon,
    pub start: ShipState,
}

impl Level {
    pub fn new(arena: Arena, pad: Pad, start: ShipState) -> Self {
        Self {
            terrain: pad.terrain(&arena),
            arena,
            pad,
            start,
        }
    }

    /// Places the pad at random and the ship at the top centre of the arena.
    pub fn generate<R: Rng>(rng: &mut R, arena: Arena, fuel: Fuel) -> Result<Self, Error> {
        // Checked in f64: NaN and infinities must not reach the integer casts
        let fits = |size: f64, min: f64| size.is_finite() && size >= min;
        if !(fits(arena.width, MIN_ARENA_WIDTH) && fits(arena.height, MIN_ARENA_HEIGHT)) {
            return Err(Error::InvalidArena {
                width: arena.width,
                height: arena.height,
            });
        }
        let (width, height) = (arena.width as i64, arena.height as i64);

        let pad = Pad::new(
            rng.gen_range(defaults::PAD_SIDE_CLEARANCE..=width - defaults::PAD_SIDE_CLEARANCE)
                as f64,
            rng.gen_range(height / 2..=height - defaults::PAD_FLOOR_CLEARANCE) as f64,
            rng.gen_range(defaults::SHOULDER_MIN..=defaults::SHOULDER_MAX) as f64,
            rng.gen_range(defaults::SHOULDER_MIN..=defaults::SHOULDER_MAX) as f64,
        );
        log::debug!("Generated pad {pad:?} in arena {width}x{height}");

        Ok(Self::new(arena, pad, Self::default_start(&arena, fuel)))
    }

    pub fn default_start(arena: &Arena, fuel: Fuel) -> ShipState {
        ShipState::default()
            .with_x((arena.width as i64 / 2) as f64)
            .with_y(defaults::START_Y)
            .with_v1(defaults::START_V1)
            .with_fuel(fuel)
    }

    pub fn default_fuel() -> Fuel {
        Fuel::Limited(defaults::FUEL)
    }
}
