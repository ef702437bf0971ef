use crate::error::{DemocracyError, DsResult};
use crate::scorer::classify::normalize_tag;
use crate::scorer::loader;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

/// Default page size requested from a history source.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    EnumIter,
    EnumString,
    Display,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Leaning {
    Left,
    CenterLeft,
    Center,
    CenterRight,
    Right,
    #[default]
    Unknown,
}

impl Leaning {
    pub fn is_known(self) -> bool {
        self != Leaning::Unknown
    }

    /// Accepts `center-left`, `Center Left`, `center_left`, ... Anything
    /// unrecognised is [`Leaning::Unknown`].
    pub fn parse_lenient(raw: &str) -> Self {
        let key = normalize_tag(raw).replace('-', "_");
        Leaning::from_str(&key).unwrap_or(Leaning::Unknown)
    }
}

fn deserialize_leaning<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Leaning, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(Leaning::parse_lenient).unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engagement {
    #[serde(default)]
    pub dwell_seconds: Option<f32>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// One recorded read. Immutable once handed to the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadEvent {
    pub article_id: String,
    pub source_id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_leaning")]
    pub leaning: Leaning,
    #[serde(default)]
    pub topics: Vec<String>,
    pub read_at: DateTime<Utc>,
    #[serde(default)]
    pub engagement: Option<Engagement>,
}

impl ReadEvent {
    pub fn new(article_id: &str, source_id: &str, category: &str, read_at: DateTime<Utc>) -> Self {
        Self {
            article_id: article_id.to_string(),
            source_id: source_id.to_string(),
            category: category.to_string(),
            leaning: Leaning::Unknown,
            topics: Vec::new(),
            read_at,
            engagement: None,
        }
    }

    pub fn with_topics(mut self, topics: &[&str]) -> Self {
        self.topics = topics.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_leaning(mut self, leaning: Leaning) -> Self {
        self.leaning = leaning;
        self
    }

    pub fn with_dwell(mut self, seconds: f32) -> Self {
        self.engagement.get_or_insert_with(Engagement::default).dwell_seconds = Some(seconds);
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.engagement.get_or_insert_with(Engagement::default).completed = Some(completed);
        self
    }

    /// All tags the classifier looks at: the category first, then topics.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.category.as_str())
            .chain(self.topics.iter().map(|t| t.as_str()))
            .filter(|t| !t.trim().is_empty())
    }

    /// Structural check used by strict validation.
    pub fn validate(&self) -> Result<(), String> {
        if self.article_id.trim().is_empty() {
            return Err("missing article id".to_string());
        }
        if self.source_id.trim().is_empty() {
            return Err("missing source id".to_string());
        }
        if self.tags().next().is_none() {
            return Err("event has neither a category nor topics".to_string());
        }
        if let Some(dwell) = self.engagement.as_ref().and_then(|e| e.dwell_seconds) {
            if !dwell.is_finite() || dwell < 0.0 {
                return Err(format!("invalid dwell time {}", dwell));
            }
        }
        Ok(())
    }
}

/// A bounded, ordered slice of a user's history, materialized per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryWindow {
    events: Vec<ReadEvent>,
    limit: usize,
    offset: usize,
    #[serde(default)]
    as_of: Option<DateTime<Utc>>,
}

impl HistoryWindow {
    pub fn new(events: Vec<ReadEvent>) -> Self {
        let limit = events.len();
        Self {
            events,
            limit,
            offset: 0,
            as_of: None,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Wraps a fetched page. Events beyond `limit` are dropped so the scorer
    /// never sees more than was requested.
    pub fn from_page(mut events: Vec<ReadEvent>, limit: usize, offset: usize) -> Self {
        events.truncate(limit);
        Self {
            events,
            limit,
            offset,
            as_of: None,
        }
    }

    /// Enables recency weighting relative to `as_of`.
    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = Some(as_of);
        self
    }

    pub fn events(&self) -> &[ReadEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn as_of(&self) -> Option<DateTime<Utc>> {
        self.as_of
    }
}

/// Where reading history comes from. Failures surface as
/// [`DemocracyError::SourceUnavailable`]; callers fall back to an empty
/// history rather than failing the scoring path.
pub trait HistorySource: Send + Sync {
    fn fetch_history(&self, user_id: &str, limit: usize, offset: usize)
        -> DsResult<Vec<ReadEvent>>;
}

/// Newest-first page of `events`, matching "most recent N" semantics.
pub fn latest_page(mut events: Vec<ReadEvent>, limit: usize, offset: usize) -> Vec<ReadEvent> {
    events.sort_by(|a, b| b.read_at.cmp(&a.read_at));
    events.into_iter().skip(offset).take(limit).collect()
}

#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    histories: HashMap<String, Vec<ReadEvent>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, user_id: &str, events: Vec<ReadEvent>) {
        self.histories
            .entry(user_id.to_string())
            .or_default()
            .extend(events);
    }
}

impl HistorySource for InMemorySource {
    fn fetch_history(
        &self,
        user_id: &str,
        limit: usize,
        offset: usize,
    ) -> DsResult<Vec<ReadEvent>> {
        let events = self.histories.get(user_id).cloned().unwrap_or_default();
        Ok(latest_page(events, limit, offset))
    }
}

/// Reads `<root>/<user_id>.json` or `<root>/<user_id>.csv`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn user_file(&self, user_id: &str) -> DsResult<Option<PathBuf>> {
        if user_id.is_empty()
            || user_id.contains(&['/', '\\'][..])
            || user_id.starts_with('.')
        {
            return Err(DemocracyError::SourceUnavailable(format!(
                "invalid user id '{}'",
                user_id
            )));
        }
        for ext in ["json", "csv"] {
            let candidate = self.root.join(format!("{}.{}", user_id, ext));
            if candidate.is_file() {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    /// User ids with a history file in the directory, sorted.
    pub fn users(&self) -> DsResult<Vec<String>> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| {
            DemocracyError::SourceUnavailable(format!("{}: {}", self.root.display(), e))
        })?;

        let mut users = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let is_history = matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("json") | Some("csv")
            );
            if !is_history || !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                users.push(stem.to_string());
            }
        }
        users.sort();
        users.dedup();
        Ok(users)
    }
}

impl HistorySource for DirectorySource {
    fn fetch_history(
        &self,
        user_id: &str,
        limit: usize,
        offset: usize,
    ) -> DsResult<Vec<ReadEvent>> {
        let Some(path) = self.user_file(user_id)? else {
            debug!("No history file for user '{}'", user_id);
            return Ok(Vec::new());
        };

        let events = loader::load_history_from_file(&path).map_err(|e| {
            DemocracyError::SourceUnavailable(format!("{}: {}", path.display(), e))
        })?;

        Ok(latest_page(events, limit, offset))
    }
}
