pub(crate) mod defaults {
    pub const GRAVITY: f64 = 3.;
    pub const THRUST: f64 = 6.;
    pub const TICK_RATE: f64 = 60.;
    pub const MAX_HORIZONTAL_SPEED: f64 = 20.;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fuel {
    Limited(u32),
    Unlimited,
}

impl Default for Fuel {
    fn default() -> Self {
        Fuel::Limited(0)
    }
}

impl Fuel {
    pub fn has_fuel(&self) -> bool {
        match self {
            Fuel::Limited(units) => *units > 0,
            Fuel::Unlimited => true,
        }
    }

    pub fn burn(&mut self, units: u32) {
        if let Fuel::Limited(remaining) = self {
            *remaining = remaining.saturating_sub(units);
        }
    }
}

impl std::fmt::Display for Fuel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fuel::Limited(units) => write!(f, "{units}"),
            Fuel::Unlimited => write!(f, "inf"),
        }
    }
}

/// Thrust axes engaged during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThrustCommand {
    pub descend: bool,
    pub left: bool,
    pub right: bool,
}

impl ThrustCommand {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_descend(self, descend: bool) -> Self {
        Self { descend, ..self }
    }

    pub fn with_left(self, left: bool) -> Self {
        Self { left, ..self }
    }

    pub fn with_right(self, right: bool) -> Self {
        Self { right, ..self }
    }
}

/// Ship position is its top-left corner in screen coordinates (y grows downward).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShipState {
    pub x: f64,
    pub y: f64,
    /// Vertical velocity, positive means falling.
    pub v1: f64,
    /// Horizontal velocity, positive means moving right.
    pub v2: f64,
    pub fuel: Fuel,
}

impl ShipState {
    pub fn with_x(self, x: f64) -> Self {
        Self { x, ..self }
    }

    pub fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }

    pub fn with_v1(self, v1: f64) -> Self {
        Self { v1, ..self }
    }

    pub fn with_v2(self, v2: f64) -> Self {
        Self { v2, ..self }
    }

    pub fn with_fuel(self, fuel: Fuel) -> Self {
        Self { fuel, ..self }
    }
}

#[derive(Clone, Debug)]
pub struct Physics {
    gravity: f64,
    thrust: f64,
    tick_rate: f64,
    max_horizontal_speed: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: defaults::GRAVITY,
            thrust: defaults::THRUST,
            tick_rate: defaults::TICK_RATE,
            max_horizontal_speed: defaults::MAX_HORIZONTAL_SPEED,
        }
    }
}

impl Physics {
    pub fn with_gravity(self, gravity: f64) -> Self {
        Self { gravity, ..self }
    }

    pub fn with_thrust(self, thrust: f64) -> Self {
        Self { thrust, ..self }
    }

    pub fn with_tick_rate(self, tick_rate: f64) -> Self {
        assert!(tick_rate > 0.);
        Self { tick_rate, ..self }
    }

    pub fn with_max_horizontal_speed(self, max_horizontal_speed: f64) -> Self {
        assert!(max_horizontal_speed > 0.);
        Self {
            max_horizontal_speed,
            ..self
        }
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn thrust(&self) -> f64 {
        self.thrust
    }

    pub fn tick_rate(&self) -> f64 {
        self.tick_rate
    }

    pub fn max_horizontal_speed(&self) -> f64 {
        self.max_horizontal_speed
    }

    /// Advances the ship by one fixed tick.
    pub fn iterate(&self, mut ship: ShipState, cmd: ThrustCommand) -> ShipState {
        // gravity acts even with empty tanks
        ship.v1 += self.gravity / self.tick_rate;
        ship.y += ship.v1;

        if ship.fuel.has_fuel() {
            let side_thrust = self.thrust / (2. * self.tick_rate);
            if cmd.descend {
                ship.v1 -= self.thrust / self.tick_rate;
                ship.fuel.burn(1);
            }
            if cmd.right {
                ship.v2 += side_thrust;
                ship.fuel.burn(1);
            }
            if cmd.left {
                ship.v2 -= side_thrust;
                ship.fuel.burn(1);
            }
        }

        ship.v2 = ship
            .v2
            .clamp(-self.max_horizontal_speed, self.max_horizontal_speed);
        ship.x += ship.v2;
        ship
    }
}
