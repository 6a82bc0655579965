//! Market inputs and curve construction shared by commands.

use std::path::{Path, PathBuf};
use std::time::Duration;

use adapter_feeds::{ParYieldCurveQuotes, UsTreasuryFeed};
use adapter_loader::CsvLoader;
use chrono::NaiveDate;
use infra_config::Settings;
use infra_master::{BusinessDayConvention, Calendar, Period};
use pricer_core::types::{Compounding, DayCountConvention, Frequency};
use pricer_models::curves::{CurveInterpolation, InterpolatedDiscountCurve, YieldTermStructure};
use pricer_optimiser::bootstrapping::{
    BondConventions, BootstrapConfig, BootstrapResult, CurveBootstrapper, FixedRateBondHelper,
};
use tracing::info;

use crate::{CliError, MarketArgs, Result};

/// Par yields from `--input`, or from the Treasury feed.
pub async fn par_yields(settings: &Settings, args: &MarketArgs) -> Result<ParYieldCurveQuotes> {
    match &args.input {
        Some(path) => {
            let quotes = CsvLoader::load_par_yields(path)?;
            info!(path = %path.display(), tenors = quotes.len(), "loaded par yields");
            Ok(ParYieldCurveQuotes::new(args.date, quotes))
        }
        None => {
            let feed = UsTreasuryFeed::new(
                settings.curve.feed_url.clone(),
                Duration::from_secs(settings.curve.request_timeout_secs),
            )?;
            Ok(feed.fetch_par_yields(args.date).await?)
        }
    }
}

pub fn conventions(settings: &Settings) -> BondConventions {
    BondConventions {
        settlement_days: settings.curve.settlement_days,
        face_amount: settings.curve.face_amount,
        ..BondConventions::us_treasury()
    }
}

pub fn interpolation(settings: &Settings, args: &MarketArgs) -> Result<CurveInterpolation> {
    let name = args
        .interpolation
        .as_deref()
        .unwrap_or(&settings.curve.interpolation);
    Ok(name.parse()?)
}

/// Bond helpers for every quoted tenor.
pub fn helpers(
    quotes: &ParYieldCurveQuotes,
    conventions: &BondConventions,
) -> Result<Vec<FixedRateBondHelper>> {
    quotes
        .quotes()
        .iter()
        .map(|q| {
            FixedRateBondHelper::new(q.yield_pct, q.tenor, quotes.as_of(), conventions)
                .map_err(CliError::from)
        })
        .collect()
}

/// Bootstrapped curve and the helpers it was fitted to.
pub struct MarketCurve {
    pub helpers: Vec<FixedRateBondHelper>,
    pub result: BootstrapResult,
}

pub async fn bootstrap(settings: &Settings, args: &MarketArgs) -> Result<MarketCurve> {
    let quotes = par_yields(settings, args).await?;
    let conventions = conventions(settings);
    let helpers = helpers(&quotes, &conventions)?;
    let bootstrapper = CurveBootstrapper::with_config(BootstrapConfig {
        interpolation: interpolation(settings, args)?,
        ..Default::default()
    });
    let result = bootstrapper.bootstrap(quotes.as_of(), &helpers, conventions.day_count)?;
    Ok(MarketCurve { helpers, result })
}

/// One row of the spot rate table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotRate {
    pub maturity_years: f64,
    pub zero_rate_pct: f64,
}

/// Monthly spot rates for `months` rows starting at month 0.
///
/// Row `m` takes the semiannual zero rate at `m / 12` years and restates it
/// over the actual period from the reference date (as-of plus
/// `settlement_days` calendar days) to that date advanced `m` months on
/// `calendar`. Row 0 spans no time and reports a rate of zero.
pub fn spot_rates<C: YieldTermStructure + ?Sized>(
    curve: &C,
    as_of: NaiveDate,
    settlement_days: u32,
    months: u32,
    calendar: &Calendar,
    day_count: DayCountConvention,
) -> Result<Vec<SpotRate>> {
    let reference = as_of + chrono::Duration::days(settlement_days as i64);
    let mut rows = Vec::with_capacity(months as usize);
    for month in 0..months {
        let years = month as f64 / 12.0;
        let end = calendar.advance(
            reference,
            Period::months(month as i32),
            BusinessDayConvention::Following,
            false,
        )?;
        let rate = if end > reference {
            curve
                .zero_rate(years, Compounding::Compounded, Frequency::Semiannual)?
                .equivalent_rate(
                    day_count,
                    Compounding::Compounded,
                    Frequency::Semiannual,
                    reference,
                    end,
                )?
                .rate()
        } else {
            0.0
        };
        rows.push(SpotRate {
            maturity_years: years,
            zero_rate_pct: rate * 100.0,
        });
    }
    Ok(rows)
}

/// Relative output paths land in `general.output_dir`, which is created on demand.
pub fn output_path(settings: &Settings, path: &Path) -> Result<PathBuf> {
    let resolved = if path.is_absolute() {
        path.to_path_buf()
    } else {
        settings.general.output_dir.join(path)
    };
    if let Some(parent) = resolved.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(resolved)
}

/// Discount factor at each helper's maturity.
pub fn pillar_discounts(
    curve: &InterpolatedDiscountCurve,
    helpers: &[FixedRateBondHelper],
) -> Result<Vec<(String, NaiveDate, f64)>> {
    let mut rows = Vec::with_capacity(helpers.len());
    for helper in helpers {
        let date = helper.maturity_date();
        rows.push((helper.tenor().to_string(), date, curve.discount_date(date)?));
    }
    Ok(rows)
}
