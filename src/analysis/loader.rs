use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use crate::error::LoadError;
use crate::types::{Dataset, Record};

/// Name of the single column parsed as a calendar date.
pub const DATE_COLUMN: &str = "dteday";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Where the dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    /// Interpret `source` as a URL when it has an http(s) scheme, otherwise as a path.
    pub fn parse(source: &str) -> Self {
        let lower = source.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(source.to_string())
        } else {
            DataSource::Path(PathBuf::from(source))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// A CSV row as it appears on disk.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    instant: Option<u32>,
    dteday: String,
    season: u8,
    yr: u8,
    mnth: u8,
    #[serde(default)]
    holiday: Option<u8>,
    weekday: u8,
    workingday: u8,
    weathersit: u8,
    temp: f64,
    atemp: f64,
    hum: f64,
    #[serde(default)]
    windspeed: Option<f64>,
    casual: u32,
    registered: u32,
    cnt: u32,
}

impl RawRow {
    fn into_record(self, line: usize) -> Result<Record, LoadError> {
        let date = NaiveDate::parse_from_str(self.dteday.trim(), DATE_FORMAT).map_err(|_| {
            LoadError::InvalidDate {
                line,
                value: self.dteday.clone(),
            }
        })?;

        if u64::from(self.casual) + u64::from(self.registered) != u64::from(self.cnt) {
            return Err(LoadError::InconsistentTotal {
                line,
                date,
                casual: self.casual,
                registered: self.registered,
                total: self.cnt,
            });
        }

        Ok(Record {
            instant: self.instant,
            date,
            year: self.yr,
            month: self.mnth,
            season: self.season,
            holiday: self.holiday.map(|v| parse_flag(line, "holiday", v)).transpose()?,
            weekday: self.weekday,
            working_day: parse_flag(line, "workingday", self.workingday)?,
            weather_sit: self.weathersit,
            temp: self.temp,
            atemp: self.atemp,
            humidity: self.hum,
            windspeed: self.windspeed,
            casual: self.casual,
            registered: self.registered,
            total: self.cnt,
        })
    }
}

fn parse_flag(line: usize, column: &'static str, value: u8) -> Result<bool, LoadError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(LoadError::InvalidFlag {
            line,
            column,
            value,
        }),
    }
}

/// Load the whole dataset from `source`.
pub fn load_dataset(source: &DataSource) -> Result<Dataset, LoadError> {
    let start_time = Instant::now();
    tracing::info!(%source, "loading dataset");

    let dataset = match source {
        DataSource::Path(path) => {
            let file = File::open(path).map_err(|e| LoadError::Io {
                path: path.clone(),
                source: e,
            })?;
            load_dataset_from_reader(file)?
        }
        DataSource::Url(url) => {
            let response = ureq::get(url).call().map_err(|e| LoadError::Http {
                url: url.clone(),
                reason: e.to_string(),
            })?;
            load_dataset_from_reader(response.into_reader())?
        }
    };

    tracing::info!(
        records = dataset.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "dataset loaded"
    );
    Ok(dataset)
}

/// Parse a dataset from any CSV byte stream with a header row.
pub fn load_dataset_from_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    if !csv_reader.headers()?.iter().any(|h| h == DATE_COLUMN) {
        return Err(LoadError::MissingDateColumn(DATE_COLUMN));
    }

    let mut records = Vec::new();
    for (idx, row) in csv_reader.deserialize::<RawRow>().enumerate() {
        // Line 1 is the header.
        let line = idx + 2;
        records.push(row?.into_record(line)?);
    }

    if records.is_empty() {
        return Err(LoadError::Empty);
    }

    Ok(Dataset::new(records))
}
