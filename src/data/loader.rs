use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::model::{ChartDataset, ChartEntry};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded. All variants are fatal: the explorer
/// has nothing to show without its table.
#[derive(Debug, Error)]
pub enum DataError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("no usable rows in dataset")]
    Empty,
}

/// Columns the loader requires, by exact header name. Anything else in the
/// file (e.g. a pandas `Unnamed: 0` index artifact) is dropped.
const REQUIRED_COLUMNS: [&str; 15] = [
    "Country",
    "Country Name",
    "Weeknum",
    "Markets",
    "Artist Name",
    "Track Name",
    "ranking",
    "Popularity",
    "Danceability",
    "Energy",
    "Acousticness",
    "Instrumentalness",
    "Positiveness",
    "Liveness",
    "Speechiness",
];

// ---------------------------------------------------------------------------
// Raw record
// ---------------------------------------------------------------------------

/// One CSV row with every field read as text, so a single bad numeric cell
/// drops that row instead of failing the whole read.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Country Name")]
    country_name: String,
    #[serde(rename = "Weeknum")]
    week: String,
    #[serde(rename = "Markets")]
    markets: String,
    #[serde(rename = "Artist Name")]
    artist: String,
    #[serde(rename = "Track Name")]
    track: String,
    ranking: String,
    #[serde(rename = "Popularity")]
    popularity: String,
    #[serde(rename = "Danceability")]
    danceability: String,
    #[serde(rename = "Energy")]
    energy: String,
    #[serde(rename = "Acousticness")]
    acousticness: String,
    #[serde(rename = "Instrumentalness")]
    instrumentalness: String,
    #[serde(rename = "Positiveness")]
    positiveness: String,
    #[serde(rename = "Liveness")]
    liveness: String,
    #[serde(rename = "Speechiness")]
    speechiness: String,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean the chart table from a CSV file.
///
/// Cleaning, applied once here so the rest of the crate never revisits it:
/// * columns outside [`REQUIRED_COLUMNS`] are dropped,
/// * rows with a blank week are dropped (they cannot join any week grouping),
/// * `Weeknum` and `Markets` are normalized to canonical text,
/// * rows with an unparseable numeric field are skipped with a warning.
pub fn load_dataset(path: &Path) -> Result<ChartDataset, DataError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(DataError::MissingColumn(col));
        }
    }

    let mut entries = Vec::new();
    let mut blank_weeks = 0usize;
    let mut bad_rows = 0usize;

    for (row, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("row {row}: unreadable record, skipping: {e}");
                bad_rows += 1;
                continue;
            }
        };

        if raw.week.trim().is_empty() {
            blank_weeks += 1;
            continue;
        }

        match parse_entry(raw) {
            Ok(entry) => entries.push(entry),
            Err(field) => {
                log::warn!("row {row}: unparseable {field}, skipping");
                bad_rows += 1;
            }
        }
    }

    if blank_weeks > 0 {
        log::debug!("dropped {blank_weeks} rows without a week");
    }
    if entries.is_empty() {
        return Err(DataError::Empty);
    }

    Ok(ChartDataset {
        entries,
        dropped_rows: blank_weeks + bad_rows,
    })
}

// ---------------------------------------------------------------------------
// Row conversion
// ---------------------------------------------------------------------------

/// Convert a raw text row into a typed entry. The error names the offending
/// field and value for the skip log.
fn parse_entry(raw: RawRecord) -> Result<ChartEntry, String> {
    let num = |name: &str, s: &str| -> Result<f64, String> {
        s.trim()
            .parse::<f64>()
            .map_err(|_| format!("{name} = '{s}'"))
    };

    Ok(ChartEntry {
        country: raw.country.trim().to_string(),
        country_name: raw.country_name.trim().to_string(),
        week: normalize_token(&raw.week),
        markets: normalize_token(&raw.markets),
        artist: raw.artist.trim().to_string(),
        track: raw.track.trim().to_string(),
        ranking: num("ranking", &raw.ranking)?,
        popularity: num("Popularity", &raw.popularity)?,
        danceability: num("Danceability", &raw.danceability)?,
        energy: num("Energy", &raw.energy)?,
        acousticness: num("Acousticness", &raw.acousticness)?,
        instrumentalness: num("Instrumentalness", &raw.instrumentalness)?,
        positiveness: num("Positiveness", &raw.positiveness)?,
        liveness: num("Liveness", &raw.liveness)?,
        speechiness: num("Speechiness", &raw.speechiness)?,
    })
}

/// Collapse numeric text with an integral value to its integer form
/// ("3.0" → "3"), so a week serialized as a float matches the same week
/// serialized as an int. Non-numeric text passes through trimmed.
fn normalize_token(raw: &str) -> String {
    let t = raw.trim();
    if let Ok(v) = t.parse::<f64>() {
        if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            return (v as i64).to_string();
        }
    }
    t.to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "Unnamed: 0,Country,Country Name,Weeknum,Markets,\
Artist Name,Track Name,ranking,Popularity,Danceability,Energy,Acousticness,\
Instrumentalness,Positiveness,Liveness,Speechiness";

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("create temp file");
        writeln!(file, "{HEADER}").unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_and_normalizes_rows() {
        let file = write_csv(&[
            "0,us,United States,3.0,[us],Artist A,Track A,3,81,0.7,0.6,0.1,0.0,0.5,0.2,0.05",
            "1,gb,United Kingdom,4,[gb],Artist B,Track B,1,90,0.8,0.7,0.2,0.1,0.6,0.3,0.04",
        ]);

        let ds = load_dataset(file.path()).expect("load");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.entries[0].week, "3");
        assert_eq!(ds.entries[1].week, "4");
        assert_eq!(ds.entries[0].country, "us");
        assert_eq!(ds.country_display_name("gb"), Some("United Kingdom"));
        assert_eq!(ds.dropped_rows, 0);
    }

    #[test]
    fn drops_rows_without_a_week() {
        let file = write_csv(&[
            "0,us,United States,1,[us],Artist A,Track A,3,81,0.7,0.6,0.1,0.0,0.5,0.2,0.05",
            "1,us,United States,,[us],Artist B,Track B,5,70,0.6,0.5,0.2,0.0,0.4,0.1,0.03",
        ]);

        let ds = load_dataset(file.path()).expect("load");
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.entries[0].track, "Track A");
        assert_eq!(ds.dropped_rows, 1);
    }

    #[test]
    fn skips_rows_with_unparseable_numbers() {
        let file = write_csv(&[
            "0,us,United States,1,[us],Artist A,Track A,3,not-a-number,0.7,0.6,0.1,0.0,0.5,0.2,0.05",
            "1,us,United States,1,[us],Artist B,Track B,5,70,0.6,0.5,0.2,0.0,0.4,0.1,0.03",
        ]);

        let ds = load_dataset(file.path()).expect("load");
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.entries[0].track, "Track B");
        assert_eq!(ds.dropped_rows, 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_dataset(Path::new("/definitely/not/here.csv")).is_err());
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("create temp file");
        writeln!(file, "Country,Weeknum").unwrap();
        writeln!(file, "us,1").unwrap();
        file.flush().unwrap();

        match load_dataset(file.path()) {
            Err(DataError::MissingColumn(col)) => assert_eq!(col, "Country Name"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn dataset_with_no_usable_rows_is_an_error() {
        let file = write_csv(&[
            "0,us,United States,,[us],Artist A,Track A,3,81,0.7,0.6,0.1,0.0,0.5,0.2,0.05",
        ]);

        match load_dataset(file.path()) {
            Err(DataError::Empty) => {}
            other => panic!("expected Empty, got {other:?}"),
        }
    }
}
