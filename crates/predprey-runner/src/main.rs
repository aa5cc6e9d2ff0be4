//! Headless batch runner for the predator-prey automaton.
//!
//! Usage: `predprey-runner [config.json]`. Runs the configured number of
//! steps, then prints the final grid and a JSON summary line.

mod telemetry;

use anyhow::{Context, Result};
use predprey_core::RunConfig;
use predprey_world::{Simulation, SimulationResult};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
struct Summary {
    steps: u64,
    predators: usize,
    prey: usize,
    predators_born: u64,
    predators_starved: u64,
    prey_born: u64,
    prey_eaten: u64,
}

impl From<&SimulationResult> for Summary {
    fn from(result: &SimulationResult) -> Self {
        Self {
            steps: result.total_steps,
            predators: result.final_census.predators,
            prey: result.final_census.prey,
            predators_born: result.totals.predators_born,
            predators_starved: result.totals.predators_starved,
            prey_born: result.totals.prey_born,
            prey_eaten: result.totals.prey_eaten,
        }
    }
}

fn load_config(path: Option<String>) -> Result<RunConfig> {
    match path {
        Some(path) => RunConfig::load(&path)
            .with_context(|| format!("failed to load run configuration from {}", path)),
        None => Ok(RunConfig::default()),
    }
}

fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let config = load_config(std::env::args().nth(1))?;
    info!(
        num_steps = config.num_steps,
        seed = config.seed,
        "Starting predator-prey run"
    );

    let mut simulation = Simulation::new(config).context("invalid simulation configuration")?;
    let result = simulation.run();

    println!("{}", simulation.grid());
    println!("{}", serde_json::to_string(&Summary::from(&result))?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_without_path() {
        let config = load_config(None).unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("predprey-runner-{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{ "num_steps": 3, "sim": {{ "width": 8, "height": 6 }} }}"#).unwrap();
        drop(file);

        let config = load_config(Some(path.display().to_string())).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.num_steps, 3);
        assert_eq!(config.sim.width, 8);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_config(Some("/nonexistent/predprey.json".to_string())).is_err());
    }

    #[test]
    fn test_summary_from_result() {
        let config = RunConfig {
            num_steps: 4,
            seed: 2,
            ..Default::default()
        };
        let result = Simulation::new(config).unwrap().run();
        let summary = Summary::from(&result);
        assert_eq!(summary.steps, 4);
        assert_eq!(summary.prey, result.final_census.prey);
        assert!(serde_json::to_string(&summary).unwrap().contains("\"steps\":4"));
    }
}
