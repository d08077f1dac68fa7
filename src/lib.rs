pub mod component;
pub mod models;
pub mod settings;
pub mod simulation;
pub mod utils;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};

pub use component::{ChanceToBeat, EstimateDisplay, ResultSink, RunEvent};
pub use models::{Progress, Run, RunState, TimingMethod};
pub use settings::{ChanceSettings, SettingsStore};
pub use simulation::{estimate, EstimateConfig, FullHistory, SimulationConfig};

const USAGE: &str = "usage: chance-to-beat <run.json> [settings.json]";

fn load_run_state(path: &Path) -> Result<RunState> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read run from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse run from {}", path.display()))
}

/// Loads a run snapshot (and optionally stored settings), estimates once and
/// prints the labelled result.
pub fn run(args: Vec<String>) -> Result<()> {
    utils::init_logging();

    let (run_path, settings_path) = match args.as_slice() {
        [run] => (PathBuf::from(run), None),
        [run, settings] => (PathBuf::from(run), Some(PathBuf::from(settings))),
        _ => bail!(USAGE),
    };

    let state = load_run_state(&run_path)?;
    let settings = match settings_path {
        Some(path) => SettingsStore::new(path)?.settings()?,
        None => ChanceSettings::default(),
    };

    let component = ChanceToBeat::new(settings, &state);
    println!("{}: {}", component.name(), component.display().text());

    Ok(())
}
