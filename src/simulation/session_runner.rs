use crate::simulation::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    InProgress,
    Finished,
}

/// Supplies the keys held during a given frame.
pub trait InputProvider {
    fn held_keys(&self, tick: usize, ship: &ShipState) -> InputSnapshot;
}

pub struct SessionRunner {
    level: Level,
    physics: Physics,
    classifier: OutcomeClassifier,
    bindings: KeyBindings,
    ship: ShipState,
    outcome: Outcome,
    tick: usize,
}

impl SessionRunner {
    pub fn new(
        level: Level,
        physics: Physics,
        classifier: OutcomeClassifier,
        bindings: KeyBindings,
    ) -> Self {
        Self {
            ship: level.start.clone(),
            level,
            physics,
            classifier,
            bindings,
            outcome: Outcome::Flying,
            tick: 0,
        }
    }

    pub fn reinitialize(&mut self) {
        self.ship = self.level.start.clone();
        self.outcome = Outcome::Flying;
        self.tick = 0;
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    pub fn current_ship_state(&self) -> &ShipState {
        &self.ship
    }

    pub fn current_outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn ticks(&self) -> usize {
        self.tick
    }

    /// Per-frame contract: integrate the ship, then classify where it ended up.
    pub fn step(&self, ship: &ShipState, snapshot: &InputSnapshot) -> (ShipState, Outcome) {
        let cmd = self.bindings.resolve(snapshot);
        let new_ship = self.physics.iterate(ship.clone(), cmd);
        let outcome = self.classifier.classify(&new_ship, &self.level);
        (new_ship, outcome)
    }

    pub fn iterate(&mut self, input: &impl InputProvider) -> ExecutionStatus {
        if self.outcome.is_terminal() {
            return ExecutionStatus::Finished;
        }

        let snapshot = input.held_keys(self.tick, &self.ship);
        let (ship, outcome) = self.step(&self.ship, &snapshot);
        log::trace!("tick {}: {ship:?} {outcome:?}", self.tick);

        self.ship = ship;
        self.outcome = outcome;
        self.tick += 1;

        if outcome.is_terminal() {
            log::debug!("Session finished after {} ticks: {outcome:?}", self.tick);
            ExecutionStatus::Finished
        } else {
            ExecutionStatus::InProgress
        }
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry::new(&self.ship, &self.level.arena)
    }
}

/// Readout shown next to the ship while flying.
#[derive(Debug, Clone, PartialEq)]
pub struct Telemetry {
    pub vertical_velocity: f64,
    pub horizontal_velocity: f64,
    pub altitude: f64,
    pub fuel: Fuel,
}

impl Telemetry {
    pub fn new(ship: &ShipState, arena: &Arena) -> Self {
        Self {
            vertical_velocity: ship.v1,
            horizontal_velocity: ship.v2,
            altitude: arena.altitude(ship.y),
            fuel: ship.fuel,
        }
    }
}

#[derive(Clone)]
pub struct ShipHistory {
    x: Vec<f64>,
    y: Vec<f64>,
    v1: Vec<f64>,
    v2: Vec<f64>,
    fuel: Vec<Fuel>,
}

impl ShipHistory {
    pub fn with_initial_state(state: &ShipState) -> Self {
        let ShipState { x, y, v1, v2, fuel } = *state;
        Self {
            x: vec![x],
            y: vec![y],
            v1: vec![v1],
            v2: vec![v2],
            fuel: vec![fuel],
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn pretty_to_string(&self) -> String {
        self.iter_history().fold(
            format!("{:>9}{:>9}{:>9}{:>9}{:>8}", "X", "Y", "V1", "V2", "FUEL"),
            |out, ShipState { x, y, v1, v2, fuel }| {
                out + &format!("\n{x:9.2}{y:9.2}{v1:9.3}{v2:9.3}{:>8}", fuel.to_string())
            },
        )
    }

    pub fn append_ship_state(&mut self, state: &ShipState) {
        self.x.push(state.x);
        self.y.push(state.y);
        self.v1.push(state.v1);
        self.v2.push(state.v2);
        self.fuel.push(state.fuel);
    }

    pub fn iter_history(&self) -> impl Iterator<Item = ShipState> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.v1)
            .zip(&self.v2)
            .zip(&self.fuel)
            .map(|((((x, y), v1), v2), fuel)| ShipState {
                x: *x,
                y: *y,
                v1: *v1,
                v2: *v2,
                fuel: *fuel,
            })
    }
}

#[cfg(test)]
mod session_runner_tests {
    use super::*;

    struct Hold(InputSnapshot);

    impl InputProvider for Hold {
        fn held_keys(&self, _: usize, _: &ShipState) -> InputSnapshot {
            self.0.clone()
        }
    }

    fn level() -> Level {
        Level::new(
            Arena::new(1000., 1000.),
            Pad::new(495., 900., 300., 300.),
            ShipState::default()
                .with_x(500.)
                .with_y(30.)
                .with_v1(-0.1)
                .with_fuel(Fuel::Limited(1000)),
        )
    }

    fn runner(scheme: ControlScheme) -> SessionRunner {
        SessionRunner::new(
            level(),
            Physics::default(),
            OutcomeClassifier::default(),
            KeyBindings::for_scheme(scheme),
        )
    }

    #[test]
    fn step_does_not_mutate_runner() {
        let runner = runner(ControlScheme::Normal);
        let (ship, outcome) = runner.step(runner.current_ship_state(), &InputSnapshot::default());
        assert_eq!(outcome, Outcome::Flying);
        assert!(ship.y < 30.);
        assert_eq!(runner.current_ship_state().y, 30.);
        assert_eq!(runner.ticks(), 0);
    }

    #[test]
    fn bindings_are_applied() {
        let runner = runner(ControlScheme::Privileged);
        let (ship, _) = runner.step(
            runner.current_ship_state(),
            &InputSnapshot::new([Key::Left]),
        );
        assert!(ship.v2 > 0.);
        let (ship, _) = runner.step(runner.current_ship_state(), &InputSnapshot::new([Key::D]));
        assert_eq!(ship.v2, 0.);
    }

    #[test]
    fn free_fall_ends_the_session() {
        let mut runner = runner(ControlScheme::Normal);
        let input = Hold(InputSnapshot::default());
        let mut guard = 0;
        while runner.iterate(&input) == ExecutionStatus::InProgress {
            guard += 1;
            assert!(guard < 10_000);
        }
        assert!(runner.current_outcome().is_terminal());
        assert!(!runner.current_outcome().is_win());

        // no further simulation once finished
        let ship = runner.current_ship_state().clone();
        assert_eq!(runner.iterate(&input), ExecutionStatus::Finished);
        assert_eq!(runner.current_ship_state(), &ship);
    }

    #[test]
    fn reinitialize_restores_start() {
        let mut runner = runner(ControlScheme::Normal);
        let input = Hold(InputSnapshot::new([Key::Right]));
        for _ in 0..10 {
            runner.iterate(&input);
        }
        assert_eq!(runner.ticks(), 10);
        assert_eq!(runner.current_ship_state().fuel, Fuel::Limited(990));
        runner.reinitialize();
        assert_eq!(runner.ticks(), 0);
        assert_eq!(runner.current_ship_state(), &level().start);
        assert_eq!(runner.current_outcome(), Outcome::Flying);
    }

    #[test]
    fn telemetry_readout() {
        let runner = runner(ControlScheme::Normal);
        let telemetry = runner.telemetry();
        assert_eq!(telemetry.altitude, 970.);
        assert_eq!(telemetry.vertical_velocity, -0.1);
        assert_eq!(telemetry.fuel, Fuel::Limited(1000));
    }

    #[test]
    fn history_records_states() {
        let start = level().start;
        let mut history = ShipHistory::with_initial_state(&start);
        history.append_ship_state(&start.clone().with_y(40.).with_fuel(Fuel::Unlimited));
        assert_eq!(history.len(), 2);
        let states: Vec<_> = history.iter_history().collect();
        assert_eq!(states[0], start);
        assert_eq!(states[1].y, 40.);

        let table = history.pretty_to_string();
        assert_eq!(table.lines().count(), 3);
        assert!(table.lines().last().unwrap().ends_with("inf"));
    }
}
