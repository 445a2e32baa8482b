use chrono::prelude::*;
use std::path::Path;
pub mod batch;
pub mod chart;
pub mod error;
pub mod plot;

pub use error::PlotError;

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// suffix of the per-site csv files exported from HERMES
pub const INPUT_SUFFIX: &str = "_timeseries_2km_Ktyear.csv";
pub const OUTPUT_SUBDIR: &str = "plots";
pub const TIME_COLUMN: &str = "time";
pub const VALUE_COLUMN: &str = "NO2_Ktyear";
pub const POLLUTANT: &str = "NO2";

pub const DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const DT_FORMATS: [&str; 4] = [
    DT_FORMAT,
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
const DATE_FORMAT: &str = "%Y-%m-%d";
const NA_VALUES: [&str; 6] = ["", "nan", "NaN", "NA", "N/A", "null"];

/// The main struct for the emission time series of one site
#[derive(Debug, Clone)]
pub struct TimeSeries {
    pub time: Vec<NaiveDateTime>,
    pub value: Vec<f64>,
}

impl TimeSeries {
    pub fn new(capacity: usize) -> TimeSeries {
        let time: Vec<NaiveDateTime> = Vec::with_capacity(capacity);
        let value: Vec<f64> = Vec::with_capacity(capacity);
        TimeSeries { time, value }
    }

    /// Init a TimeSeries from csv, reading the whole file.
    /// Missing values become NAN, any other unparsable cell is an error.
    /// The rows are kept in file order, no sorting nor continuity check.
    pub fn from_csv(
        fin: &Path,
        time_column: &str,
        value_column: &str,
    ) -> Result<TimeSeries, PlotError> {
        let csv_err = |source| PlotError::Csv {
            path: fin.to_path_buf(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(fin)
            .map_err(csv_err)?;
        let headers = reader.headers().map_err(csv_err)?.clone();
        let column_index = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| PlotError::MissingColumn {
                    path: fin.to_path_buf(),
                    column: name.to_string(),
                })
        };
        let it = column_index(time_column)?;
        let iv = column_index(value_column)?;

        let mut ts = TimeSeries::new(400);
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(csv_err)?;
            let row = i + 1;
            let t_str = record.get(it).unwrap_or_default();
            let v_str = record.get(iv).unwrap_or_default();
            let t = parse_datetime(t_str).ok_or_else(|| PlotError::Datetime {
                path: fin.to_path_buf(),
                row,
                value: t_str.to_string(),
            })?;
            let v = parse_value(v_str).ok_or_else(|| PlotError::Number {
                path: fin.to_path_buf(),
                row,
                value: v_str.to_string(),
            })?;
            ts.time.push(t);
            ts.value.push(v);
        }
        Ok(ts)
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// first and last datetime, None for an empty series
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        min_and_max(&self.time[..])
    }

    /// min and max ignoring the NAN values, None if there is no valid value
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let valid: Vec<f64> = self.value.iter().copied().filter(|v| !v.is_nan()).collect();
        min_and_max(&valid[..])
    }

    pub fn summary(&self) -> SeriesSummary {
        SeriesSummary {
            rows: self.len(),
            valid: self.value.iter().filter(|v| !v.is_nan()).count(),
            time_range: self.time_range(),
            value_range: self.value_range(),
        }
    }
}

/// Short description of a loaded series, logged before plotting
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub rows: usize,
    pub valid: usize,
    pub time_range: Option<(NaiveDateTime, NaiveDateTime)>,
    pub value_range: Option<(f64, f64)>,
}

impl std::fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} rows ({} valid)", self.rows, self.valid)?;
        if let Some((t0, t1)) = self.time_range {
            write!(f, ", from {} to {}", t0, t1)?;
        }
        if let Some((v0, v1)) = self.value_range {
            write!(f, ", min {} max {}", v0, v1)?;
        }
        Ok(())
    }
}

/// accepts full datetimes, with or without (fractional) seconds, RFC 3339 and plain dates (at midnight)
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in DT_FORMATS.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// NAN for the usual missing-value spellings, None if the cell is not a number
pub fn parse_value(s: &str) -> Option<f64> {
    let s = s.trim();
    if NA_VALUES.contains(&s) {
        return Some(f64::NAN);
    }
    s.parse::<f64>().ok()
}

pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

pub fn suitable_xfmt(d: chrono::Duration) -> &'static str {
    if d > chrono::Duration::days(366) {
        "%Y-%m"
    } else if d > chrono::Duration::weeks(1) {
        "%y-%m-%d"
    } else if d > chrono::Duration::days(1) {
        "%m-%d %H"
    } else {
        "%d %H:%M"
    }
}
