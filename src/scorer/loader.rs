use crate::error::{DemocracyError, DsResult};
use crate::history::{Engagement, Leaning, ReadEvent};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

pub struct CsvHistory {
    pub events: Vec<ReadEvent>,
    pub skipped_rows: usize,
}

/// Dispatches on extension: `.json` (array of events) or `.csv`.
pub fn load_history_from_file<P: AsRef<Path>>(path: P) -> DsResult<Vec<ReadEvent>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    match ext.as_deref() {
        Some("json") => {
            let events = load_history_json(reader)?;
            info!("Loaded {} events from {}", events.len(), path.display());
            Ok(events)
        }
        Some("csv") => {
            let loaded = load_history_csv(reader)?;
            if loaded.skipped_rows > 0 {
                warn!(
                    "Skipped {} invalid rows in {}",
                    loaded.skipped_rows,
                    path.display()
                );
            }
            info!("Loaded {} events from {}", loaded.events.len(), path.display());
            Ok(loaded.events)
        }
        _ => Err(DemocracyError::Config(format!(
            "Unsupported history format '{}' (expected .json or .csv)",
            path.display()
        ))),
    }
}

pub fn load_history_json<R: Read>(reader: R) -> DsResult<Vec<ReadEvent>> {
    Ok(serde_json::from_reader(reader)?)
}

struct Columns {
    article_id: usize,
    source_id: usize,
    read_at: usize,
    category: Option<usize>,
    leaning: Option<usize>,
    topics: Option<usize>,
    dwell_seconds: Option<usize>,
    completed: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> DsResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                DemocracyError::Config(format!("History CSV is missing the '{}' column", name))
            })
        };

        Ok(Self {
            article_id: require("article_id")?,
            source_id: require("source_id")?,
            read_at: require("read_at")?,
            category: find("category"),
            leaning: find("leaning"),
            topics: find("topics"),
            dwell_seconds: find("dwell_seconds"),
            completed: find("completed"),
        })
    }
}

fn field<'r>(rec: &'r csv::StringRecord, idx: Option<usize>) -> Option<&'r str> {
    idx.and_then(|i| rec.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_row(rec: &csv::StringRecord, cols: &Columns) -> Result<ReadEvent, String> {
    let article_id = field(rec, Some(cols.article_id)).ok_or("missing article_id")?;
    let source_id = field(rec, Some(cols.source_id)).ok_or("missing source_id")?;
    let read_at_raw = field(rec, Some(cols.read_at)).ok_or("missing read_at")?;
    let read_at = DateTime::parse_from_rfc3339(read_at_raw)
        .map_err(|e| format!("bad read_at '{}': {}", read_at_raw, e))?
        .with_timezone(&Utc);

    let leaning = field(rec, cols.leaning)
        .map(Leaning::parse_lenient)
        .unwrap_or_default();

    let topics = field(rec, cols.topics)
        .map(|s| {
            s.split(';')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let dwell_seconds = match field(rec, cols.dwell_seconds) {
        Some(s) => Some(
            s.parse::<f32>()
                .map_err(|_| format!("bad dwell_seconds '{}'", s))?,
        ),
        None => None,
    };
    let completed = match field(rec, cols.completed) {
        Some(s) => Some(parse_bool(s).ok_or_else(|| format!("bad completed '{}'", s))?),
        None => None,
    };
    let engagement = if dwell_seconds.is_some() || completed.is_some() {
        Some(Engagement {
            dwell_seconds,
            completed,
        })
    } else {
        None
    };

    Ok(ReadEvent {
        article_id: article_id.to_string(),
        source_id: source_id.to_string(),
        category: field(rec, cols.category).unwrap_or_default().to_string(),
        leaning,
        topics,
        read_at,
        engagement,
    })
}

/// Header: `article_id,source_id,category,leaning,topics,read_at,dwell_seconds,completed`.
/// Column order is free; only `article_id`, `source_id` and `read_at` are required.
/// Rows that fail to parse are skipped and counted.
pub fn load_history_csv<R: Read>(reader: R) -> DsResult<CsvHistory> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let cols = Columns::from_headers(rdr.headers()?)?;

    let mut events = Vec::new();
    let mut skipped_rows = 0;
    let mut row_idx = 0;

    for result in rdr.records() {
        row_idx += 1;
        match result {
            Ok(rec) => match parse_row(&rec, &cols) {
                Ok(event) => events.push(event),
                Err(reason) => {
                    debug!("[Row {}] {}", row_idx, reason);
                    skipped_rows += 1;
                }
            },
            Err(e) => {
                debug!("[Row {}] CSV Parse Error: {}", row_idx, e);
                skipped_rows += 1;
            }
        }
    }

    Ok(CsvHistory {
        events,
        skipped_rows,
    })
}
