//! BDT command implementation

use std::collections::BTreeMap;

use adapter_loader::CsvLoader;
use infra_config::Settings;
use pricer_models::lattice::BdtQuote;
use pricer_optimiser::calibration::BdtCalibrator;

use crate::{BdtArgs, Result};

/// Term structure used when no input file is given.
pub fn default_quotes() -> BTreeMap<u32, BdtQuote> {
    BTreeMap::from([
        (1, BdtQuote::new(0.10, 0.20)),
        (2, BdtQuote::new(0.11, 0.19)),
        (3, BdtQuote::new(0.12, 0.18)),
        (4, BdtQuote::new(0.125, 0.17)),
        (5, BdtQuote::new(0.13, 0.16)),
    ])
}

/// Run the bdt command
pub fn run(settings: &Settings, args: BdtArgs) -> Result<()> {
    let quotes = match &args.input {
        Some(path) => CsvLoader::load_bdt_quotes(path)?,
        None => default_quotes(),
    };
    let max_tenor = args.max_tenor.unwrap_or(settings.bdt.max_tenor);

    let tree = BdtCalibrator::new().calibrate(&quotes, max_tenor)?;

    println!("BDT short rate tree ({} levels, rates in %)", tree.levels());
    print!("{}", tree);
    Ok(())
}
