use anyhow::{Context, Result};
use std::io;
use tracing::info;

use car_rental::{logging, RentalConfig, Roster, Shell, SystemClock, DEFAULT_CONFIG_FILE};

fn main() -> Result<()> {
    logging::init();

    let config = RentalConfig::load_or_default(DEFAULT_CONFIG_FILE)?;

    let roster = Roster::load(&config.roster_path, &config.roster_columns())
        .with_context(|| format!("Failed to load roster: {:?}", config.roster_path))?;

    let registry = config.build_registry(Box::new(SystemClock))?;
    info!(
        version = car_rental::VERSION,
        vehicles = registry.fleet().len(),
        reservations = registry.len(),
        "starting shell"
    );

    let mut shell = Shell::new(registry, roster, config.currency.clone());
    let stdin = io::stdin();
    shell.run(stdin.lock(), io::stdout().lock())?;

    Ok(())
}
