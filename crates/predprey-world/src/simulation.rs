//! Simulation driver: owns the current grid and the random source, and
//! advances the grid one generation at a time.

use crate::engine::{GridEngine, StepReport};
use crate::factory::GridFactory;
use crate::grid::Grid;
use predprey_core::{Census, Result, RunConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

pub struct Simulation {
    config: RunConfig,
    engine: GridEngine,
    grid: Grid,
    rng: ChaCha8Rng,
    step: u64,
    history: Vec<Census>,
    totals: StepTotals,
}

/// Running totals over every step since the last reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTotals {
    pub prey_born: u64,
    pub prey_squished: u64,
    pub prey_eaten: u64,
    pub meals: u64,
    pub predators_born: u64,
    pub predators_starved: u64,
}

impl StepTotals {
    fn record(&mut self, report: &StepReport) {
        self.prey_born += u64::from(report.prey_born);
        self.prey_squished += u64::from(report.prey_squished);
        self.prey_eaten += u64::from(report.prey_eaten);
        self.meals += u64::from(report.meals);
        self.predators_born += u64::from(report.predators_born);
        self.predators_starved += u64::from(report.predators_starved);
    }
}

impl Simulation {
    pub fn new(config: RunConfig) -> Result<Self> {
        let engine = GridEngine::new(config.sim.clone())?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let grid = GridFactory::generate(engine.config(), &mut rng)?;
        let initial = grid.census();

        info!(
            seed = config.seed,
            height = config.sim.height,
            width = config.sim.width,
            prey = initial.prey,
            predators = initial.predators,
            "Simulation created"
        );

        Ok(Self {
            config,
            engine,
            grid,
            rng,
            step: 0,
            history: vec![initial],
            totals: StepTotals::default(),
        })
    }

    /// Advance the simulation by `steps` generations
    pub fn advance(&mut self, steps: u64) -> Census {
        for _ in 0..steps {
            self.step_once();
        }
        self.census()
    }

    fn step_once(&mut self) {
        let before = self.history.last().copied().unwrap_or_default();
        let (next, report) = self.engine.step_with_report(&self.grid, &mut self.rng);
        self.grid = next;
        self.step += 1;
        self.totals.record(&report);

        let census = self.grid.census();
        self.history.push(census);

        if before.predators > 0 && census.predators == 0 {
            warn!(step = self.step, prey = census.prey, "Predators died out");
        }
        if before.prey > 0 && census.prey == 0 {
            warn!(step = self.step, predators = census.predators, "Prey died out");
        }

        let interval = self.config.report_interval;
        if interval > 0 && self.step % interval == 0 {
            self.emit_population_metrics(&report);
        }
    }

    /// Emit a population snapshot
    fn emit_population_metrics(&self, last: &StepReport) {
        let census = self.census();
        info!(
            event = "population_metrics",
            step = self.step,
            prey = census.prey,
            predators = census.predators,
            avg_predator_energy = format!("{:.2}", census.avg_predator_energy()),
            prey_born = last.prey_born,
            prey_eaten = last.prey_eaten,
            predators_born = last.predators_born,
            predators_starved = last.predators_starved,
            "Population snapshot"
        );
    }

    /// Start over with a freshly generated grid. The random stream continues,
    /// so a reset produces a different layout from the first one.
    pub fn reset(&mut self) -> Result<()> {
        self.grid = GridFactory::generate(self.engine.config(), &mut self.rng)?;
        self.step = 0;
        self.history = vec![self.grid.census()];
        self.totals = StepTotals::default();
        debug!("Simulation reset");
        Ok(())
    }

    /// Run for the configured number of steps and summarise
    #[instrument(skip(self), fields(num_steps = self.config.num_steps))]
    pub fn run(&mut self) -> SimulationResult {
        info!("Starting simulation for {} steps", self.config.num_steps);
        self.advance(self.config.num_steps);
        self.emit_run_summary();
        self.collect_results()
    }

    fn emit_run_summary(&self) {
        let census = self.census();
        let peak_prey = self.history.iter().map(|c| c.prey).max().unwrap_or(0);
        let peak_predators = self.history.iter().map(|c| c.predators).max().unwrap_or(0);

        info!(
            event = "run_summary",
            total_steps = self.step,
            final_prey = census.prey,
            final_predators = census.predators,
            peak_prey = peak_prey,
            peak_predators = peak_predators,
            prey_born = self.totals.prey_born,
            prey_eaten = self.totals.prey_eaten,
            prey_squished = self.totals.prey_squished,
            meals = self.totals.meals,
            predators_born = self.totals.predators_born,
            predators_starved = self.totals.predators_starved,
            "Run complete"
        );
    }

    fn collect_results(&self) -> SimulationResult {
        SimulationResult {
            total_steps: self.step,
            final_census: self.census(),
            totals: self.totals,
            history: self.history.clone(),
        }
    }

    pub fn census(&self) -> Census {
        self.grid.census()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn step_count(&self) -> u64 {
        self.step
    }

    /// Census after every step, starting with the initial grid
    pub fn history(&self) -> &[Census] {
        &self.history
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub total_steps: u64,
    pub final_census: Census,
    pub totals: StepTotals,
    pub history: Vec<Census>,
}
