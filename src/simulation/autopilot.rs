use super::{Action, InputProvider, InputSnapshot, KeyBindings, Level, ShipState};

mod defaults {
    pub const LANDING_SPEED: f64 = 0.8;
    pub const MAX_DESCENT_SPEED: f64 = 3.;
    pub const DESCENT_GAIN: f64 = 0.01;
    pub const SAFE_HEIGHT: f64 = 50.;
    pub const ALIGNMENT_TOLERANCE: f64 = 5.;
    pub const MAX_APPROACH_SPEED: f64 = 2.;
    pub const APPROACH_GAIN: f64 = 0.02;
    pub const SPEED_TOLERANCE: f64 = 0.05;
}

/// Drifts the ship over the pad centre and slows the descent near the pad.
///
/// Descent speed scales with the height above the pad, down to the landing
/// speed. A ship that is not over the pad hovers once it gets below a safe
/// height.
pub struct Autopilot {
    bindings: KeyBindings,
    target_x: f64,
    pad_y: f64,
    ship_size: f64,
    landing_speed: f64,
}

impl Autopilot {
    pub fn new(level: &Level, ship_size: f64, bindings: KeyBindings) -> Self {
        Self {
            bindings,
            target_x: level.pad.center_x(),
            pad_y: level.pad.y,
            ship_size,
            landing_speed: defaults::LANDING_SPEED,
        }
    }

    pub fn with_landing_speed(self, landing_speed: f64) -> Self {
        Self {
            landing_speed,
            ..self
        }
    }

    fn target_descent_speed(&self, ship: &ShipState, error: f64) -> f64 {
        let height_above_pad = self.pad_y - (ship.y + self.ship_size);
        if error.abs() > defaults::ALIGNMENT_TOLERANCE && height_above_pad < defaults::SAFE_HEIGHT
        {
            0.
        } else {
            (height_above_pad * defaults::DESCENT_GAIN)
                .min(defaults::MAX_DESCENT_SPEED)
                .max(self.landing_speed)
        }
    }

    fn actions(&self, ship: &ShipState) -> Vec<Action> {
        let mut actions = Vec::new();
        let error = self.target_x - (ship.x + self.ship_size / 2.);

        if ship.v1 > self.target_descent_speed(ship, error) {
            actions.push(Action::Descend);
        }

        let wanted_v2 = (error * defaults::APPROACH_GAIN)
            .clamp(-defaults::MAX_APPROACH_SPEED, defaults::MAX_APPROACH_SPEED);
        if ship.v2 < wanted_v2 - defaults::SPEED_TOLERANCE {
            actions.push(Action::Right);
        } else if ship.v2 > wanted_v2 + defaults::SPEED_TOLERANCE {
            actions.push(Action::Left);
        }
        actions
    }
}

impl InputProvider for Autopilot {
    fn held_keys(&self, _: usize, ship: &ShipState) -> InputSnapshot {
        self.bindings.snapshot_for(self.actions(ship))
    }
}

/// Replays recorded frames, the last one is held forever.
pub struct Scripted {
    frames: Vec<InputSnapshot>,
}

impl Scripted {
    pub fn new(frames: Vec<InputSnapshot>) -> Self {
        Self { frames }
    }
}

impl InputProvider for Scripted {
    fn held_keys(&self, tick: usize, _: &ShipState) -> InputSnapshot {
        self.frames
            .get(tick)
            .or(self.frames.last())
            .cloned()
            .unwrap_or_default()
    }
}

pub struct NoInput;

impl InputProvider for NoInput {
    fn held_keys(&self, _: usize, _: &ShipState) -> InputSnapshot {
        InputSnapshot::default()
    }
}

#[cfg(test)]
mod autopilot_tests {
    use super::*;
    use crate::simulation::{Arena, ControlScheme, Fuel, Key, Pad};

    fn autopilot(scheme: ControlScheme) -> Autopilot {
        let level = Level::new(
            Arena::new(1000., 1000.),
            Pad::new(700., 900., 300., 300.),
            ShipState::default(),
        );
        Autopilot::new(&level, 10., KeyBindings::for_scheme(scheme))
    }

    fn ship(x: f64, v1: f64, v2: f64) -> ShipState {
        ship_at(x, 100., v1, v2)
    }

    fn ship_at(x: f64, y: f64, v1: f64, v2: f64) -> ShipState {
        ShipState::default()
            .with_x(x)
            .with_y(y)
            .with_v1(v1)
            .with_v2(v2)
            .with_fuel(Fuel::Limited(10))
    }

    #[test]
    fn brakes_when_falling_fast() {
        let pilot = autopilot(ControlScheme::Normal);
        assert!(pilot.held_keys(0, &ship(705., 3.5, 0.)).is_held(Key::Up));
        assert!(!pilot.held_keys(0, &ship(705., 2.5, 0.)).is_held(Key::Up));
    }

    #[test]
    fn slows_down_near_pad() {
        let pilot = autopilot(ControlScheme::Normal);
        assert!(pilot.held_keys(0, &ship_at(705., 880., 1., 0.)).is_held(Key::Up));
        assert!(!pilot.held_keys(0, &ship_at(705., 880., 0.7, 0.)).is_held(Key::Up));
    }

    #[test]
    fn hovers_until_over_pad() {
        let keys = autopilot(ControlScheme::Normal).held_keys(0, &ship_at(100., 860., 0.1, 0.));
        assert!(keys.is_held(Key::Up));
        assert!(keys.is_held(Key::Right));
    }

    #[test]
    fn custom_landing_speed() {
        let pilot = autopilot(ControlScheme::Normal).with_landing_speed(3.5);
        assert!(!pilot.held_keys(0, &ship_at(705., 880., 3.4, 0.)).is_held(Key::Up));
    }

    #[test]
    fn steers_toward_pad() {
        let pilot = autopilot(ControlScheme::Normal);
        let keys = pilot.held_keys(0, &ship(100., 0., 0.));
        assert!(keys.is_held(Key::Right));
        assert!(!keys.is_held(Key::Up));
        let keys = pilot.held_keys(0, &ship(900., 0., 0.));
        assert!(keys.is_held(Key::Left));
    }

    #[test]
    fn uses_session_bindings() {
        let keys = autopilot(ControlScheme::Privileged).held_keys(0, &ship(100., 3.5, 0.));
        assert!(keys.is_held(Key::Down));
        // privileged pushes right with the left arrow
        assert!(keys.is_held(Key::Left));
    }

    #[test]
    fn idle_over_pad() {
        let keys = autopilot(ControlScheme::Normal).held_keys(0, &ship(705., 0.5, 0.));
        assert!(keys.is_empty());
    }

    #[test]
    fn scripted_holds_last_frame() {
        let script = Scripted::new(vec![
            InputSnapshot::new([Key::W]),
            InputSnapshot::new([Key::D]),
        ]);
        let ship = ShipState::default();
        assert!(script.held_keys(0, &ship).is_held(Key::W));
        assert!(script.held_keys(1, &ship).is_held(Key::D));
        assert!(script.held_keys(50, &ship).is_held(Key::D));
        assert!(Scripted::new(vec![]).held_keys(3, &ship).is_empty());
        assert!(NoInput.held_keys(0, &ship).is_empty());
    }
}
