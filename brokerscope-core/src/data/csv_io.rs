//! CSV import and export of position records.
//!
//! Headers are matched by name, not position. Either the snake_case keys
//! (`date`, `broker`, `position`, `meal_basis`, ...) or the headers of the
//! original spreadsheet export are accepted. Signal columns and
//! `price_change_rate` may be absent from the file; the core columns may not.

use chrono::{NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

use super::store::{CleanedStore, RawObservation, RecordStore};
use crate::domain::{Action, Side, SignalColumn, SignalValues, UnknownCode};

/// Errors from reading or writing record files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': invalid value '{value}' ({reason})")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Core columns and the header spellings accepted for each.
const DATE: (&str, &[&str]) = ("date", &["date", "日期"]);
const BROKER: (&str, &[&str]) = ("broker", &["broker", "经纪商名称"]);
const CONTRACT: (&str, &[&str]) = ("contract", &["contract", "合约名称"]);
const SIDE: (&str, &[&str]) = ("side", &["side", "多/空头"]);
const ACTION: (&str, &[&str]) = ("action", &["action", "加/减仓"]);
const POSITION: (&str, &[&str]) = ("position", &["position", "持仓量"]);
const POSITION_CHANGE_RATE: (&str, &[&str]) =
    ("position_change_rate", &["position_change_rate", "变化率"]);
const PRICE: (&str, &[&str]) = ("price", &["price", "价格"]);
const PRICE_CHANGE_RATE: (&str, &[&str]) =
    ("price_change_rate", &["price_change_rate", "价格变化率"]);

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];

/// Resolved header positions.
struct ColumnMap {
    date: usize,
    broker: usize,
    contract: usize,
    side: usize,
    action: usize,
    position: usize,
    position_change_rate: usize,
    price: usize,
    price_change_rate: Option<usize>,
    signals: Vec<(SignalColumn, usize)>,
}

impl ColumnMap {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim() == *n))
        };
        let required = |(name, spellings): (&'static str, &[&str])| {
            find(spellings).ok_or(LoadError::MissingColumn(name))
        };

        let signals: Vec<(SignalColumn, usize)> = SignalColumn::ALL
            .into_iter()
            .filter_map(|col| find(&[col.key(), col.source_header()]).map(|i| (col, i)))
            .collect();
        if signals.len() < SignalColumn::COUNT {
            let missing: Vec<&str> = SignalColumn::ALL
                .into_iter()
                .filter(|col| !signals.iter().any(|(c, _)| c == col))
                .map(SignalColumn::key)
                .collect();
            tracing::warn!(?missing, "signal columns absent from file, treating as missing");
        }

        Ok(Self {
            date: required(DATE)?,
            broker: required(BROKER)?,
            contract: required(CONTRACT)?,
            side: required(SIDE)?,
            action: required(ACTION)?,
            position: required(POSITION)?,
            position_change_rate: required(POSITION_CHANGE_RATE)?,
            price: required(PRICE)?,
            price_change_rate: find(PRICE_CHANGE_RATE.1),
            signals,
        })
    }
}

/// Load a record file from disk.
pub fn load_csv(path: &Path) -> Result<CleanedStore, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let cleaned = read_csv(file)?;
    tracing::info!(
        path = %path.display(),
        rows = cleaned.store.len(),
        dropped = cleaned.dropped,
        "loaded record store"
    );
    Ok(cleaned)
}

/// Read records from any CSV source.
pub fn read_csv<R: Read>(reader: R) -> Result<CleanedStore, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnMap::resolve(rdr.headers()?)?;

    let mut raw = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        // 1-based, counting the header line
        let row = i + 2;
        if record.iter().all(str::is_empty) {
            continue;
        }
        raw.push(parse_row(&record, &columns, row)?);
    }

    Ok(RecordStore::from_raw(raw))
}

fn parse_row(
    record: &csv::StringRecord,
    columns: &ColumnMap,
    row: usize,
) -> Result<RawObservation, LoadError> {
    let field = |idx: usize| record.get(idx).unwrap_or("");

    let date = parse_date(field(columns.date)).ok_or_else(|| LoadError::InvalidField {
        row,
        column: DATE.0,
        value: field(columns.date).to_string(),
        reason: "expected a calendar date".into(),
    })?;

    let side = parse_code(field(columns.side), row, SIDE.0, Side::from_code)?;
    let action = parse_code(field(columns.action), row, ACTION.0, Action::from_code)?;

    let number = |idx: usize, column: &'static str| {
        parse_number(field(idx)).map_err(|reason| LoadError::InvalidField {
            row,
            column,
            value: field(idx).to_string(),
            reason,
        })
    };

    let mut signals = SignalValues::default();
    for &(col, idx) in &columns.signals {
        signals.set(col, number(idx, col.key())?);
    }

    Ok(RawObservation {
        date,
        broker: field(columns.broker).to_string(),
        contract: field(columns.contract).to_string(),
        side,
        action,
        position: number(columns.position, POSITION.0)?,
        position_change_rate: number(columns.position_change_rate, POSITION_CHANGE_RATE.0)?,
        price: number(columns.price, PRICE.0)?,
        price_change_rate: match columns.price_change_rate {
            Some(idx) => number(idx, PRICE_CHANGE_RATE.0)?,
            None => None,
        },
        signals,
    })
}

/// Blank and NaN cells are missing codes; anything else must decode.
fn parse_code<T>(
    value: &str,
    row: usize,
    column: &'static str,
    decode: impl Fn(&str) -> Result<T, UnknownCode>,
) -> Result<Option<T>, LoadError> {
    if is_missing(value.trim()) {
        return Ok(None);
    }
    decode(value).map(Some).map_err(|e| LoadError::InvalidField {
        row,
        column,
        value: e.code.clone(),
        reason: e.to_string(),
    })
}

fn is_missing(s: &str) -> bool {
    matches!(s, "" | "nan" | "NaN" | "NAN" | "null" | "NULL" | "-")
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Empty cells and NaN spellings are missing values, not errors.
fn parse_number(s: &str) -> Result<Option<f64>, String> {
    if is_missing(s) {
        return Ok(None);
    }
    let cleaned = s.replace(',', "");
    let (digits, scale) = match cleaned.strip_suffix('%') {
        Some(d) => (d, 0.01),
        None => (cleaned.as_str(), 1.0),
    };
    digits
        .trim()
        .parse::<f64>()
        .map(|v| Some(v * scale).filter(|v| v.is_finite()))
        .map_err(|e| e.to_string())
}

/// Write a store as CSV with snake_case headers.
pub fn write_csv<W: Write>(store: &RecordStore, writer: W) -> Result<(), LoadError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = vec![
        DATE.0,
        BROKER.0,
        CONTRACT.0,
        SIDE.0,
        ACTION.0,
        POSITION.0,
        POSITION_CHANGE_RATE.0,
        PRICE.0,
        PRICE_CHANGE_RATE.0,
    ];
    header.extend(SignalColumn::ALL.iter().map(|c| c.key()));
    wtr.write_record(&header)?;

    let opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    for obs in store.rows() {
        let mut record = vec![
            obs.date.format("%Y-%m-%d").to_string(),
            obs.broker.clone(),
            obs.contract.clone(),
            obs.side.code().to_string(),
            obs.action.code().to_string(),
            obs.position.to_string(),
            obs.position_change_rate.to_string(),
            obs.price.to_string(),
            opt(obs.price_change_rate),
        ];
        record.extend(SignalColumn::ALL.iter().map(|&c| opt(obs.signal(c))));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}
