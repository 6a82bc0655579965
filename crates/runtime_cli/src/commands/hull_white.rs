//! Hull-White command implementation
//!
//! Simulates short-rate paths on the bootstrapped Treasury curve and
//! compares Monte Carlo discount factors with the curve.

use std::path::Path;
use std::sync::Arc;

use infra_config::Settings;
use pricer_kernel::mc::{MonteCarloConfig, PathGenerator, PathMatrix};
use pricer_models::curves::YieldTermStructure;
use pricer_models::short_rate::HullWhite;
use tracing::info;

use crate::market;
use crate::{HullWhiteArgs, Result};

/// Run the hull-white command
pub async fn run(settings: &Settings, args: HullWhiteArgs) -> Result<()> {
    let market = market::bootstrap(settings, &args.market).await?;
    let curve = Arc::new(market.result.curve);

    let hw = &settings.hull_white;
    let model = HullWhite::new(
        curve.clone(),
        args.a.unwrap_or(hw.a),
        args.sigma.unwrap_or(hw.sigma),
    )?;
    let process = model.process()?;

    let config = MonteCarloConfig::builder()
        .n_paths(args.paths.unwrap_or(hw.num_paths))
        .n_steps(args.steps.unwrap_or(hw.time_steps))
        .horizon(args.horizon.unwrap_or(hw.horizon_years))
        .seed(args.seed.unwrap_or(hw.seed))
        .build()?;
    let generator = PathGenerator::new(config)?;
    let paths = generator.generate(&process)?;
    let mean = paths.mean_path();
    let mc_discounts = paths.discount_factors();

    println!(
        "Hull-White a = {}, sigma = {}: {} paths x {} steps over {} years",
        model.a(),
        model.sigma(),
        paths.n_paths(),
        paths.n_steps(),
        generator.config().horizon()
    );
    println!();
    println!(
        "{:>6}  {:>12}  {:>12}  {:>12}  {:>12}",
        "Years", "Mean r(%)", "Alpha(%)", "MC DF", "Curve DF"
    );

    let last_year = generator.config().horizon().floor() as usize;
    for year in 0..=last_year {
        let j = generator.grid().closest_index(year as f64);
        let t = paths.times()[j];
        println!(
            "{:>6.2}  {:>12.6}  {:>12.6}  {:>12.8}  {:>12.8}",
            t,
            mean[j] * 100.0,
            model.alpha(t)? * 100.0,
            mc_discounts[j],
            curve.discount(t)?
        );
    }

    if let Some(output) = &args.output {
        let path = market::output_path(settings, output)?;
        write_statistics(&path, &paths, curve.as_ref())?;
        info!(path = %path.display(), "wrote path statistics");
    }

    Ok(())
}

fn write_statistics<C: YieldTermStructure + ?Sized>(
    path: &Path,
    paths: &PathMatrix,
    curve: &C,
) -> Result<()> {
    let mean = paths.mean_path();
    let std_dev = paths.std_dev_path();
    let mc_discounts = paths.discount_factors();

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["time", "mean_rate", "std_dev_rate", "mc_discount", "curve_discount"])?;
    for (j, t) in paths.times().iter().enumerate() {
        writer.write_record([
            t.to_string(),
            mean[j].to_string(),
            std_dev[j].to_string(),
            mc_discounts[j].to_string(),
            curve.discount(*t)?.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
