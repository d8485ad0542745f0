//! Data loading utilities for the Ronda CLI.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use ronda_core::types::UNIX_EPOCH_DAYS_FROM_CE;
use ronda_core::{Panel, RondaError};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate, RondaError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| RondaError::InvalidDate(format!("{date_str}: {e}")))
}

/// Load the monthly return panel from a CSV file.
///
/// Keeps the {permno, date, ret} columns, coerces non-numeric returns to
/// missing and drops them, restricts to the [start, end] date range,
/// derives year/month columns, and sorts by (permno, year, month) so the
/// per-security time-series computations downstream see ordered history.
///
/// Files that fail to decode as UTF-8 are re-read with lossy decoding;
/// older archive extracts are not always UTF-8 encoded.
pub(crate) fn load_panel(
    path: &Path,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Panel, RondaError> {
    if start > end {
        return Err(RondaError::InvalidData(format!(
            "start date {start} is after end date {end}"
        )));
    }

    let raw =
        read_csv(path, CsvEncoding::Utf8).or_else(|_| read_csv(path, CsvEncoding::LossyUtf8))?;

    for col in ["permno", "date", "ret"] {
        if raw.column(col).is_err() {
            return Err(RondaError::MissingColumn(col.to_string()));
        }
    }

    let dates = column_dates(&raw)?;
    let ids: Vec<Option<i64>> = raw
        .column("permno")?
        .as_materialized_series()
        .i64()?
        .into_iter()
        .collect();
    let rets: Vec<Option<f64>> = raw
        .column("ret")?
        .as_materialized_series()
        .f64()?
        .into_iter()
        .collect();

    let mut out_ids: Vec<i64> = Vec::new();
    let mut out_days: Vec<i32> = Vec::new();
    let mut out_years: Vec<i32> = Vec::new();
    let mut out_months: Vec<i32> = Vec::new();
    let mut out_rets: Vec<f64> = Vec::new();

    for i in 0..raw.height() {
        let (Some(id), Some(date), Some(ret)) = (ids[i], dates[i], rets[i]) else {
            continue;
        };
        if ret.is_nan() || date < start || date > end {
            continue;
        }
        out_ids.push(id);
        out_days.push(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE);
        out_years.push(date.year());
        out_months.push(date.month() as i32);
        out_rets.push(ret);
    }

    let mut df = df! {
        "permno" => out_ids,
        "year" => out_years,
        "month" => out_months,
        "ret" => out_rets,
    }?;
    df.with_column(
        Int32Chunked::from_vec("date".into(), out_days)
            .into_date()
            .into_series(),
    )?;
    let df = df.select(["permno", "date", "year", "month", "ret"])?;
    let df = df.sort(["permno", "year", "month"], Default::default())?;

    Ok(Panel::new(df))
}

/// Write the cleaned panel to a spreadsheet-importable CSV file.
pub(crate) fn write_spreadsheet(panel: &Panel, path: &Path) -> Result<(), RondaError> {
    let mut file =
        File::create(path).map_err(|e| RondaError::DataLoad(format!("{}: {e}", path.display())))?;
    let mut df = panel.data().clone();
    CsvWriter::new(&mut file).finish(&mut df)?;
    Ok(())
}

fn read_csv(path: &Path, encoding: CsvEncoding) -> Result<DataFrame, RondaError> {
    // Force the identifier and return columns to stable types; unparseable
    // return codes become nulls and are dropped during cleaning.
    let overrides = Schema::from_iter([
        Field::new("permno".into(), DataType::Int64),
        Field::new("ret".into(), DataType::Float64),
    ]);

    let df = CsvReadOptions::default()
        .with_schema_overwrite(Some(Arc::new(overrides)))
        .with_ignore_errors(true)
        .with_infer_schema_length(Some(1000))
        .with_parse_options(
            CsvParseOptions::default()
                .with_try_parse_dates(true)
                .with_encoding(encoding),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Materialize the raw `date` column as calendar dates.
///
/// The column may arrive as a parsed Date, as strings, or as integer
/// YYYYMMDD values depending on how the source file was written.
fn column_dates(df: &DataFrame) -> Result<Vec<Option<NaiveDate>>, RondaError> {
    let series = df.column("date")?.as_materialized_series();
    match series.dtype() {
        DataType::Date => Ok(series
            .date()?
            .into_iter()
            .map(|d: Option<i32>| {
                d.and_then(|days| {
                    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
                })
            })
            .collect()),
        DataType::String => Ok(series
            .str()?
            .into_iter()
            .map(|s: Option<&str>| s.and_then(parse_flexible_date))
            .collect()),
        DataType::Int64 => Ok(series
            .i64()?
            .into_iter()
            .map(|v: Option<i64>| v.and_then(yyyymmdd_date))
            .collect()),
        other => Err(RondaError::InvalidData(format!(
            "unsupported date column type: {other}"
        ))),
    }
}

fn parse_flexible_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
        .ok()
}

fn yyyymmdd_date(value: i64) -> Option<NaiveDate> {
    let year = (value / 10_000) as i32;
    let month = ((value / 100) % 100) as u32;
    let day = (value % 100) as u32;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("1965-01-29").unwrap();
        assert_eq!(date.year(), 1965);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 29);
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("invalid").is_err());
    }

    #[test]
    fn test_parse_flexible_date() {
        let expected = NaiveDate::from_ymd_opt(1980, 12, 31).unwrap();
        assert_eq!(parse_flexible_date("1980-12-31"), Some(expected));
        assert_eq!(parse_flexible_date("19801231"), Some(expected));
        assert_eq!(parse_flexible_date("12/31/1980"), None);
    }

    #[test]
    fn test_yyyymmdd_date() {
        let expected = NaiveDate::from_ymd_opt(1975, 6, 30).unwrap();
        assert_eq!(yyyymmdd_date(19750630), Some(expected));
        assert_eq!(yyyymmdd_date(19751340), None);
    }

    #[test]
    fn test_load_panel_cleans_and_sorts() {
        let path = std::env::temp_dir().join(format!("ronda-panel-{}.csv", std::process::id()));
        let csv = "permno,date,ret\n\
                   20002,1980-02-29,0.02\n\
                   10001,1980-01-31,C\n\
                   10001,1980-02-29,0.01\n\
                   10001,1980-01-15,0.03\n\
                   10001,1995-01-31,0.05\n";
        std::fs::write(&path, csv).unwrap();

        let start = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(1989, 12, 31).unwrap();
        let panel = load_panel(&path, start, end).unwrap();
        let _ = std::fs::remove_file(&path);

        // The non-numeric return and the out-of-range row are gone.
        assert_eq!(panel.len(), 3);

        let ids: Vec<i64> = panel
            .data()
            .column("permno")
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(ids, vec![10001, 10001, 20002]);

        let months: Vec<i32> = panel
            .data()
            .column("month")
            .unwrap()
            .as_materialized_series()
            .i32()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(months, vec![1, 2, 2]);
    }

    #[test]
    fn test_load_panel_start_after_end() {
        let start = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
        let result = load_panel(Path::new("unused.csv"), start, end);
        assert!(matches!(result, Err(RondaError::InvalidData(_))));
    }
}
