use rand::{rngs::StdRng, SeedableRng};

use crate::error::Error;
use crate::simulation::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub gravity: f64,
    pub thrust: f64,
    pub tick_rate: f64,
    pub max_horizontal_speed: f64,
    pub control_scheme: ControlScheme,
}

impl Default for Settings {
    fn default() -> Self {
        let physics = Physics::default();
        Self {
            gravity: physics.gravity(),
            thrust: physics.thrust(),
            tick_rate: physics.tick_rate(),
            max_horizontal_speed: physics.max_horizontal_speed(),
            control_scheme: ControlScheme::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), Error> {
        let positive = |key, value: f64| {
            if value > 0. && value.is_finite() {
                Ok(())
            } else {
                Err(Error::InvalidValue {
                    key,
                    reason: format!("{value} has to be positive"),
                })
            }
        };
        let finite = |key, value: f64| {
            if value.is_finite() {
                Ok(())
            } else {
                Err(Error::InvalidValue {
                    key,
                    reason: format!("{value} is not a finite number"),
                })
            }
        };
        finite("/Gravity", self.gravity)?;
        finite("/Thrust", self.thrust)?;
        positive("/TickRate", self.tick_rate)?;
        positive("/MaxHorizontalSpeed", self.max_horizontal_speed)
    }

    pub fn physics(&self) -> Physics {
        Physics::default()
            .with_gravity(self.gravity)
            .with_thrust(self.thrust)
            .with_tick_rate(self.tick_rate)
            .with_max_horizontal_speed(self.max_horizontal_speed)
    }

    pub fn bindings(&self) -> KeyBindings {
        KeyBindings::for_scheme(self.control_scheme)
    }
}

pub struct App {
    session_runner: SessionRunner,
    flight_history: ShipHistory,
    ship_size: f64,
}

impl App {
    pub fn try_new(level: Level, settings: Settings) -> Result<Self, Error> {
        settings.validate()?;
        let classifier = OutcomeClassifier::default();
        let ship_size = classifier.ship_size();
        let flight_history = ShipHistory::with_initial_state(&level.start);
        log::info!(
            "New session: pad at ({}, {}), {:?} controls",
            level.pad.x,
            level.pad.y,
            settings.control_scheme
        );

        Ok(Self {
            session_runner: SessionRunner::new(
                level,
                settings.physics(),
                classifier,
                settings.bindings(),
            ),
            flight_history,
            ship_size,
        })
    }

    pub fn from_seed(
        seed: u64,
        arena: Arena,
        fuel: Fuel,
        settings: Settings,
    ) -> Result<Self, Error> {
        let level = Level::generate(&mut StdRng::seed_from_u64(seed), arena, fuel)?;
        Self::try_new(level, settings)
    }

    pub fn reset(&mut self) {
        self.session_runner.reinitialize();
        self.flight_history =
            ShipHistory::with_initial_state(self.session_runner.current_ship_state());
    }

    /// Runs the session until a terminal outcome or until `max_ticks` frames.
    pub fn run(&mut self, input: &impl InputProvider, max_ticks: usize) -> Result<Outcome, Error> {
        if self.get_outcome().is_terminal() {
            return Ok(self.get_outcome());
        }
        while self.session_runner.ticks() < max_ticks {
            let status = self.session_runner.iterate(input);
            self.flight_history
                .append_ship_state(self.session_runner.current_ship_state());
            if let ExecutionStatus::Finished = status {
                let outcome = self.session_runner.current_outcome();
                log::info!(
                    "Session ended with {outcome:?} after {} ticks",
                    self.session_runner.ticks()
                );
                return Ok(outcome);
            }
        }
        Err(Error::TickLimit(max_ticks))
    }

    pub fn autopilot(&self) -> Autopilot {
        Autopilot::new(
            self.session_runner.level(),
            self.ship_size,
            self.session_runner.bindings().clone(),
        )
    }

    pub fn get_level(&self) -> &Level {
        self.session_runner.level()
    }

    pub fn get_outcome(&self) -> Outcome {
        self.session_runner.current_outcome()
    }

    pub fn get_telemetry(&self) -> Telemetry {
        self.session_runner.telemetry()
    }

    pub fn get_route(&self) -> impl Iterator<Item = ShipState> + '_ {
        self.flight_history.iter_history()
    }

    pub fn print_flight_results(&self) {
        log::info!("\n{}", self.flight_history.pretty_to_string());
        log::info!(
            "Finished {:?}, {:?}",
            self.get_outcome(),
            self.get_telemetry()
        );
    }
}
