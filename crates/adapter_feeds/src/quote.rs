//! Par yield quotes.

use chrono::NaiveDate;
use infra_master::Period;

/// Par yield for one tenor, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParYieldQuote {
    pub tenor: Period,
    pub yield_pct: f64,
}

impl ParYieldQuote {
    pub fn new(tenor: Period, yield_pct: f64) -> Self {
        Self { tenor, yield_pct }
    }
}

/// Par yield curve observed on one date, ordered by tenor length.
#[derive(Debug, Clone, PartialEq)]
pub struct ParYieldCurveQuotes {
    as_of: NaiveDate,
    quotes: Vec<ParYieldQuote>,
}

impl ParYieldCurveQuotes {
    /// Sorts `quotes` by tenor length. A tenor quoted twice keeps the last value.
    pub fn new(as_of: NaiveDate, quotes: Vec<ParYieldQuote>) -> Self {
        let mut sorted: Vec<ParYieldQuote> = Vec::with_capacity(quotes.len());
        for quote in quotes {
            match sorted.iter_mut().find(|q| q.tenor == quote.tenor) {
                Some(existing) => existing.yield_pct = quote.yield_pct,
                None => sorted.push(quote),
            }
        }
        sorted.sort_by(|a, b| a.tenor.approx_years().total_cmp(&b.tenor.approx_years()));
        Self {
            as_of,
            quotes: sorted,
        }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn quotes(&self) -> &[ParYieldQuote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn get(&self, tenor: Period) -> Option<f64> {
        self.quotes
            .iter()
            .find(|q| q.tenor == tenor)
            .map(|q| q.yield_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_by_tenor() {
        let curve = ParYieldCurveQuotes::new(
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            vec![
                ParYieldQuote::new(Period::years(10), 4.21),
                ParYieldQuote::new(Period::weeks(6), 4.35),
                ParYieldQuote::new(Period::months(1), 4.36),
                ParYieldQuote::new(Period::months(2), 4.34),
            ],
        );
        let tenors: Vec<String> = curve.quotes().iter().map(|q| q.tenor.to_string()).collect();
        assert_eq!(tenors, vec!["1M", "6W", "2M", "10Y"]);
        assert_eq!(curve.get(Period::years(10)), Some(4.21));
        assert_eq!(curve.get(Period::years(30)), None);
    }

    #[test]
    fn test_duplicate_tenor_keeps_last() {
        let curve = ParYieldCurveQuotes::new(
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            vec![
                ParYieldQuote::new(Period::years(1), 4.0),
                ParYieldQuote::new(Period::years(1), 4.1),
            ],
        );
        assert_eq!(curve.len(), 1);
        assert_eq!(curve.get(Period::years(1)), Some(4.1));
    }
}
