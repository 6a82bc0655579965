//! US Treasury daily par yield curve feed.
//!
//! The Treasury publishes one Atom XML document per month. Each `entry`
//! carries an `m:properties` block with the observation date in
//! `d:NEW_DATE` and one `d:BC_<tenor>` element per curve point.

use std::time::Duration;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use infra_master::Period;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, info, warn};

use crate::error::FeedError;
use crate::quote::{ParYieldCurveQuotes, ParYieldQuote};

/// Base URL of the Treasury XML interest rate feed.
pub const DEFAULT_BASE_URL: &str =
    "https://home.treasury.gov/resource-center/data-chart-center/interest-rates/pages/xml";

/// Minimum number of tenors for a usable curve.
pub const MIN_TENORS: usize = 3;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// URL of the monthly document containing `date`.
pub fn month_url(base: &str, date: NaiveDate) -> String {
    format!(
        "{}?data=daily_treasury_yield_curve&field_tdr_date_value_month={}{:02}",
        base.trim_end_matches('/'),
        date.year(),
        date.month()
    )
}

/// Map a `BC_*` field name to its tenor. Returns `None` for fields that are
/// not curve points, such as `BC_30YEARDISPLAY`.
fn field_tenor(field: &str) -> Option<Period> {
    let code = field.strip_prefix("BC_")?;
    if code == "1_5MONTH" {
        return Some(Period::weeks(6));
    }
    if let Some(n) = code.strip_suffix("MONTH") {
        return n.parse().ok().map(Period::months);
    }
    if let Some(n) = code.strip_suffix("YEAR") {
        return n.parse().ok().map(Period::years);
    }
    None
}

#[derive(Default)]
struct Properties {
    date: Option<NaiveDate>,
    fields: Vec<(String, String)>,
}

/// Extract the par yields observed on `as_of` from a monthly feed document.
///
/// Null or empty values are skipped. An `as_of` absent from the document
/// yields an empty curve.
pub fn parse_par_yields(xml: &str, as_of: NaiveDate) -> Result<ParYieldCurveQuotes, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut quotes = Vec::new();
    let mut current: Option<Properties> = None;
    let mut field: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if name == "properties" {
                    current = Some(Properties::default());
                } else if current.is_some() {
                    field = Some(name);
                }
            }
            Event::Text(t) => {
                if let (Some(props), Some(name)) = (current.as_mut(), field.as_ref()) {
                    let text = t.unescape()?.into_owned();
                    if name == "NEW_DATE" {
                        let stamp = NaiveDateTime::parse_from_str(&text, DATE_FORMAT)
                            .map_err(|e| FeedError::Parse(format!("NEW_DATE '{}': {}", text, e)))?;
                        props.date = Some(stamp.date());
                    } else {
                        props.fields.push((name.clone(), text));
                    }
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"properties" {
                    if let Some(props) = current.take() {
                        if props.date == Some(as_of) {
                            collect_quotes(props.fields, &mut quotes)?;
                        }
                    }
                }
                field = None;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    debug!(%as_of, tenors = quotes.len(), "parsed treasury par yields");
    Ok(ParYieldCurveQuotes::new(as_of, quotes))
}

fn collect_quotes(
    fields: Vec<(String, String)>,
    quotes: &mut Vec<ParYieldQuote>,
) -> Result<(), FeedError> {
    for (name, value) in fields {
        let Some(tenor) = field_tenor(&name) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        let yield_pct: f64 = value
            .parse()
            .map_err(|_| FeedError::Parse(format!("{} = '{}' is not a number", name, value)))?;
        quotes.push(ParYieldQuote::new(tenor, yield_pct));
    }
    Ok(())
}

/// HTTP client for the Treasury par yield feed.
#[derive(Debug, Clone)]
pub struct UsTreasuryFeed {
    client: reqwest::Client,
    base_url: String,
}

impl UsTreasuryFeed {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Download the monthly document containing `as_of`.
    pub async fn fetch_month(&self, as_of: NaiveDate) -> Result<String, FeedError> {
        let url = month_url(&self.base_url, as_of);
        info!(%url, "fetching treasury par yields");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "treasury feed request failed");
            return Err(FeedError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response.text().await?)
    }

    /// Fetch and parse the par yields observed on `as_of`.
    ///
    /// Fails with `NoData` when fewer than [`MIN_TENORS`] tenors are quoted,
    /// which includes dates with no publication (weekends, holidays).
    pub async fn fetch_par_yields(&self, as_of: NaiveDate) -> Result<ParYieldCurveQuotes, FeedError> {
        let xml = self.fetch_month(as_of).await?;
        let curve = parse_par_yields(&xml, as_of)?;
        if curve.len() < MIN_TENORS {
            return Err(FeedError::NoData {
                date: as_of,
                found: curve.len(),
            });
        }
        info!(%as_of, tenors = curve.len(), "fetched treasury par yields");
        Ok(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8" standalone="yes"?>
<feed xml:base="https://home.treasury.gov/" xmlns:d="http://schemas.microsoft.com/ado/2007/08/dataservices" xmlns:m="http://schemas.microsoft.com/ado/2007/08/dataservices/metadata" xmlns="http://www.w3.org/2005/Atom">
  <title type="text">DailyTreasuryYieldCurveRateData</title>
  <entry>
    <id>https://home.treasury.gov/Entry(1)</id>
    <content type="application/xml">
      <m:properties>
        <d:Id m:type="Edm.Int32">8751</d:Id>
        <d:NEW_DATE m:type="Edm.DateTime">2025-02-28T00:00:00</d:NEW_DATE>
        <d:BC_1MONTH m:type="Edm.Double">4.36</d:BC_1MONTH>
        <d:BC_1YEAR m:type="Edm.Double">4.08</d:BC_1YEAR>
        <d:BC_10YEAR m:type="Edm.Double">4.24</d:BC_10YEAR>
      </m:properties>
    </content>
  </entry>
  <entry>
    <id>https://home.treasury.gov/Entry(2)</id>
    <content type="application/xml">
      <m:properties>
        <d:Id m:type="Edm.Int32">8752</d:Id>
        <d:NEW_DATE m:type="Edm.DateTime">2025-03-03T00:00:00</d:NEW_DATE>
        <d:BC_1MONTH m:type="Edm.Double">4.36</d:BC_1MONTH>
        <d:BC_1_5MONTH m:type="Edm.Double">4.35</d:BC_1_5MONTH>
        <d:BC_2MONTH m:type="Edm.Double">4.35</d:BC_2MONTH>
        <d:BC_3MONTH m:type="Edm.Double">4.33</d:BC_3MONTH>
        <d:BC_1YEAR m:type="Edm.Double">4.08</d:BC_1YEAR>
        <d:BC_10YEAR m:type="Edm.Double">4.18</d:BC_10YEAR>
        <d:BC_30YEAR m:type="Edm.Double">4.47</d:BC_30YEAR>
        <d:BC_30YEARDISPLAY m:type="Edm.Double">4.47</d:BC_30YEARDISPLAY>
        <d:BC_20YEAR m:type="Edm.Double" m:null="true" />
        <d:BC_7YEAR m:type="Edm.Double"></d:BC_7YEAR>
      </m:properties>
    </content>
  </entry>
</feed>"#;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_url() {
        assert_eq!(
            month_url(DEFAULT_BASE_URL, date(2025, 3, 3)),
            "https://home.treasury.gov/resource-center/data-chart-center/interest-rates/pages/xml?data=daily_treasury_yield_curve&field_tdr_date_value_month=202503"
        );
        assert!(month_url("http://localhost/xml/", date(2024, 11, 1)).starts_with("http://localhost/xml?"));
    }

    #[test]
    fn test_field_tenor() {
        assert_eq!(field_tenor("BC_1MONTH"), Some(Period::months(1)));
        assert_eq!(field_tenor("BC_1_5MONTH"), Some(Period::weeks(6)));
        assert_eq!(field_tenor("BC_30YEAR"), Some(Period::years(30)));
        assert_eq!(field_tenor("BC_30YEARDISPLAY"), None);
        assert_eq!(field_tenor("NEW_DATE"), None);
    }

    #[test]
    fn test_parse_selects_date() {
        let curve = parse_par_yields(SAMPLE, date(2025, 3, 3)).unwrap();
        assert_eq!(curve.as_of(), date(2025, 3, 3));

        let tenors: Vec<String> = curve.quotes().iter().map(|q| q.tenor.to_string()).collect();
        assert_eq!(tenors, vec!["1M", "6W", "2M", "3M", "1Y", "10Y", "30Y"]);
        assert_eq!(curve.get(Period::years(10)), Some(4.18));
        assert_eq!(curve.get(Period::years(20)), None);
        assert_eq!(curve.get(Period::years(7)), None);

        let earlier = parse_par_yields(SAMPLE, date(2025, 2, 28)).unwrap();
        assert_eq!(earlier.len(), 3);
        assert_eq!(earlier.get(Period::years(10)), Some(4.24));
    }

    #[test]
    fn test_parse_missing_date_is_empty() {
        let curve = parse_par_yields(SAMPLE, date(2025, 3, 1)).unwrap();
        assert!(curve.is_empty());
    }

    #[test]
    fn test_parse_bad_value() {
        let xml = SAMPLE.replace(">4.33<", ">n/a<");
        let result = parse_par_yields(&xml, date(2025, 3, 3));
        assert!(matches!(result, Err(FeedError::Parse(_))));
    }

    #[test]
    fn test_parse_bad_date() {
        let xml = SAMPLE.replace("2025-03-03T00:00:00", "03/03/2025");
        let result = parse_par_yields(&xml, date(2025, 3, 3));
        assert!(matches!(result, Err(FeedError::Parse(_))));
    }
}
