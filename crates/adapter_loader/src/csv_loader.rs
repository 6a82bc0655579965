//! CSV file loader.

use std::collections::BTreeMap;
use std::path::Path;

use adapter_feeds::ParYieldQuote;
use infra_master::Period;
use pricer_models::lattice::BdtQuote;
use serde::Deserialize;
use tracing::debug;

use crate::error::LoaderError;

/// CSV file loader for market quotes.
///
/// Headers are required and matched by name; surrounding whitespace in
/// headers and fields is ignored.
pub struct CsvLoader;

#[derive(Debug, Deserialize)]
struct ParYieldRow {
    tenor: String,
    #[serde(rename = "yield")]
    yield_pct: f64,
}

#[derive(Debug, Deserialize)]
struct BdtRow {
    tenor: u32,
    rate: f64,
    volatility: f64,
}

impl CsvLoader {
    /// Load raw records from a CSV file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    ///
    /// # Returns
    ///
    /// A vector of parsed records, or an error if loading fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<CsvRecord>, LoaderError> {
        let mut reader = open(path.as_ref())?;
        let mut records = Vec::new();

        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            records.push(CsvRecord {
                row: idx + 1,
                fields: record.iter().map(|s| s.to_string()).collect(),
            });
        }

        Ok(records)
    }

    /// Load par yields from columns `tenor,yield`, with yields in percent.
    ///
    /// Tenors use the period syntax (`1M`, `6W`, `10Y`). Order is preserved.
    pub fn load_par_yields<P: AsRef<Path>>(path: P) -> Result<Vec<ParYieldQuote>, LoaderError> {
        let path = path.as_ref();
        let mut reader = open(path)?;
        require_columns(&mut reader, &["tenor", "yield"])?;

        let mut quotes: Vec<ParYieldQuote> = Vec::new();
        for (idx, result) in reader.deserialize::<ParYieldRow>().enumerate() {
            let row = idx + 1;
            let record = result?;
            let tenor: Period = record.tenor.parse().map_err(|e| LoaderError::InvalidFormat {
                row,
                message: format!("tenor '{}': {}", record.tenor, e),
            })?;
            if tenor.length() <= 0 {
                return Err(LoaderError::InvalidFormat {
                    row,
                    message: format!("tenor {} must be positive", tenor),
                });
            }
            if !record.yield_pct.is_finite() {
                return Err(LoaderError::InvalidFormat {
                    row,
                    message: format!("yield {} is not finite", record.yield_pct),
                });
            }
            if quotes.iter().any(|q| q.tenor == tenor) {
                return Err(LoaderError::DuplicateTenor {
                    row,
                    tenor: tenor.to_string(),
                });
            }
            quotes.push(ParYieldQuote::new(tenor, record.yield_pct));
        }

        if quotes.is_empty() {
            return Err(LoaderError::Empty(path.display().to_string()));
        }
        debug!(path = %path.display(), quotes = quotes.len(), "loaded par yields");
        Ok(quotes)
    }

    /// Load BDT inputs from columns `tenor,rate,volatility`.
    ///
    /// Tenors are whole years; rates and volatilities are decimals.
    pub fn load_bdt_quotes<P: AsRef<Path>>(
        path: P,
    ) -> Result<BTreeMap<u32, BdtQuote>, LoaderError> {
        let path = path.as_ref();
        let mut reader = open(path)?;
        require_columns(&mut reader, &["tenor", "rate", "volatility"])?;

        let mut quotes = BTreeMap::new();
        for (idx, result) in reader.deserialize::<BdtRow>().enumerate() {
            let row = idx + 1;
            let record = result?;
            if record.tenor == 0 {
                return Err(LoaderError::InvalidFormat {
                    row,
                    message: "tenor must be at least 1 year".to_string(),
                });
            }
            if !(record.rate.is_finite() && record.volatility.is_finite()) {
                return Err(LoaderError::InvalidFormat {
                    row,
                    message: format!(
                        "rate {} and volatility {} must be finite",
                        record.rate, record.volatility
                    ),
                });
            }
            let quote = BdtQuote::new(record.rate, record.volatility);
            if quotes.insert(record.tenor, quote).is_some() {
                return Err(LoaderError::DuplicateTenor {
                    row,
                    tenor: record.tenor.to_string(),
                });
            }
        }

        if quotes.is_empty() {
            return Err(LoaderError::Empty(path.display().to_string()));
        }
        debug!(path = %path.display(), quotes = quotes.len(), "loaded BDT quotes");
        Ok(quotes)
    }
}

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>, LoaderError> {
    if !path.exists() {
        return Err(LoaderError::FileNotFound(path.display().to_string()));
    }
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?)
}

fn require_columns(
    reader: &mut csv::Reader<std::fs::File>,
    columns: &[&str],
) -> Result<(), LoaderError> {
    let headers = reader.headers()?;
    for column in columns {
        if !headers.iter().any(|h| h == *column) {
            return Err(LoaderError::MissingColumn((*column).to_string()));
        }
    }
    Ok(())
}

/// A single CSV record.
#[derive(Debug, Clone)]
pub struct CsvRecord {
    /// Row number (1-indexed)
    pub row: usize,
    /// Field values
    pub fields: Vec<String>,
}
