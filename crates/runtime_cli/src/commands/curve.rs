//! Curve command implementation
//!
//! Bootstraps the Treasury par curve and prints pillar discount factors
//! followed by the monthly spot rate table.

use std::path::Path;

use infra_config::Settings;
use infra_master::Calendar;
use pricer_models::curves::YieldTermStructure;
use tracing::info;

use crate::market::{self, SpotRate};
use crate::{CurveArgs, Result};

/// Run the curve command
pub async fn run(settings: &Settings, args: CurveArgs) -> Result<()> {
    let market = market::bootstrap(settings, &args.market).await?;
    let curve = &market.result.curve;
    let conventions = market::conventions(settings);

    println!("Treasury par curve {} ({})", curve.reference_date(), curve.interpolation().name());
    println!();
    println!("{:>6}  {:>10}  {:>14}", "Tenor", "Maturity", "Discount");
    for (tenor, date, df) in market::pillar_discounts(curve, &market.helpers)? {
        println!("{:>6}  {:>10}  {:>14.10}", tenor, date, df);
    }
    println!();
    println!(
        "Bootstrap: {} sweeps, max clean price error {:.2e}",
        market.result.iterations, market.result.residual
    );
    println!();

    let months = args.months.unwrap_or(settings.curve.months);
    let spots = market::spot_rates(
        curve,
        curve.reference_date(),
        conventions.settlement_days,
        months,
        &Calendar::get(conventions.calendar),
        conventions.day_count,
    )?;

    println!("{:>12}  {:>14}", "Maturities", "Zero Rates(%)");
    for row in &spots {
        println!("{:>12.6}  {:>14.6}", row.maturity_years, row.zero_rate_pct);
    }

    if let Some(output) = &args.output {
        let path = market::output_path(settings, output)?;
        write_spots(&path, &spots)?;
        info!(path = %path.display(), rows = spots.len(), "wrote spot rates");
    }

    Ok(())
}

fn write_spots(path: &Path, spots: &[SpotRate]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Maturities", "Zero Rates(%)"])?;
    for row in spots {
        writer.write_record([row.maturity_years.to_string(), row.zero_rate_pct.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_spots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spots.csv");
        let spots = [
            SpotRate {
                maturity_years: 0.0,
                zero_rate_pct: 4.3,
            },
            SpotRate {
                maturity_years: 0.5,
                zero_rate_pct: 4.25,
            },
        ];
        write_spots(&path, &spots).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["Maturities,Zero Rates(%)", "0,4.3", "0.5,4.25"]);
    }
}
