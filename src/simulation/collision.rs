use super::{segments_intersect, Level, Polygon, ShipState};

pub(crate) mod defaults {
    pub const SHIP_SIZE: f64 = 10.;
    pub const FLOOR_MARGIN: f64 = 15.;
    pub const MAX_LANDING_SPEED: f64 = 3.;
    pub const PERFECT_LANDING_SPEED: f64 = 1.;
    pub const GOOD_LANDING_SPEED: f64 = 2.;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingQuality {
    Perfect,
    Good,
    Terrible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    /// Touched the terrain anywhere but on the pad.
    OffPad,
    /// Reached the pad faster than the maximal landing speed.
    ExcessiveSpeed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Flying,
    LandedOk(LandingQuality),
    CrashedIntoTerrain(CrashCause),
    OutOfBounds,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Flying)
    }

    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::LandedOk(_))
    }
}

/// True when any pair of edges crosses or one polygon holds a vertex of the other.
///
/// Vertex containment is needed for polygons nested without crossing edges.
pub fn polygons_collide(a: &Polygon, b: &Polygon) -> bool {
    a.edges().any(|(p1, p2)| {
        b.edges()
            .any(|(p3, p4)| segments_intersect(p1, p2, p3, p4))
    }) || a.vertices.iter().any(|&p| b.contains(p))
        || b.vertices.iter().any(|&p| a.contains(p))
}

pub struct OutcomeClassifier {
    ship_size: f64,
    floor_margin: f64,
    max_landing_speed: f64,
    perfect_landing_speed: f64,
    good_landing_speed: f64,
}

impl Default for OutcomeClassifier {
    fn default() -> Self {
        Self {
            ship_size: defaults::SHIP_SIZE,
            floor_margin: defaults::FLOOR_MARGIN,
            max_landing_speed: defaults::MAX_LANDING_SPEED,
            perfect_landing_speed: defaults::PERFECT_LANDING_SPEED,
            good_landing_speed: defaults::GOOD_LANDING_SPEED,
        }
    }
}

impl OutcomeClassifier {
    pub fn ship_size(&self) -> f64 {
        self.ship_size
    }

    pub fn ship_polygon(&self, ship: &ShipState) -> Polygon {
        Polygon::square(ship.x, ship.y, self.ship_size)
    }

    /// Classifies the frame; the first matching rule wins.
    pub fn classify(&self, ship: &ShipState, level: &Level) -> Outcome {
        if ship.y + self.floor_margin >= level.arena.height {
            return Outcome::OutOfBounds;
        }

        if polygons_collide(&self.ship_polygon(ship), &level.terrain) {
            return Outcome::CrashedIntoTerrain(CrashCause::OffPad);
        }

        if self.touches_pad(ship, level) {
            return self.landing(ship.v1);
        }

        Outcome::Flying
    }

    fn touches_pad(&self, ship: &ShipState, level: &Level) -> bool {
        let pad = &level.pad;
        let bottom = ship.y + self.ship_size;
        pad.x <= ship.x + self.ship_size
            && ship.x <= pad.x + pad.width()
            && pad.y <= bottom
            && bottom < pad.y + pad.height()
    }

    fn landing(&self, v1: f64) -> Outcome {
        // Still ascending while inside the pad band: keep flying.
        if v1 < 0. {
            Outcome::Flying
        } else if v1 <= self.perfect_landing_speed {
            Outcome::LandedOk(LandingQuality::Perfect)
        } else if v1 <= self.good_landing_speed {
            Outcome::LandedOk(LandingQuality::Good)
        } else if v1 <= self.max_landing_speed {
            Outcome::LandedOk(LandingQuality::Terrible)
        } else {
            Outcome::CrashedIntoTerrain(CrashCause::ExcessiveSpeed)
        }
    }
}

#[cfg(test)]
mod polygon_collision_tests {
    use super::*;
    use crate::simulation::Vec2;

    #[test]
    fn disjoint_squares() {
        let a = Polygon::square(0., 0., 10.);
        let b = Polygon::square(20., 20., 10.);
        assert!(!polygons_collide(&a, &b));
    }

    #[test]
    fn overlapping_squares() {
        let a = Polygon::square(0., 0., 10.);
        let b = Polygon::square(5., 5., 10.);
        assert!(polygons_collide(&a, &b));
        assert!(polygons_collide(&b, &a));
    }

    #[test]
    fn containment_without_crossing() {
        let outer = Polygon::square(0., 0., 100.);
        let inner = Polygon::square(40., 40., 10.);
        assert!(polygons_collide(&outer, &inner));
        assert!(polygons_collide(&inner, &outer));
    }

    #[test]
    fn touching_corner() {
        let a = Polygon::square(0., 0., 10.);
        let b = Polygon::new(vec![
            Vec2::new(10., 10.),
            Vec2::new(20., 15.),
            Vec2::new(15., 20.),
        ]);
        assert!(polygons_collide(&a, &b));
    }

    #[test]
    fn empty_polygon_never_collides() {
        let a = Polygon::square(0., 0., 10.);
        assert!(!polygons_collide(&a, &Polygon::default()));
        assert!(!polygons_collide(&Polygon::default(), &a));
    }
}
