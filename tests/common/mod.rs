#![allow(dead_code)] // Each test binary uses a different subset of helpers.

use chrono::{DateTime, Duration, TimeZone, Utc};
use democracy_score::history::{HistoryWindow, Leaning, ReadEvent};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

/// Builder for ReadEvent to keep tests short.
pub struct EventBuilder {
    event: ReadEvent,
}

impl EventBuilder {
    pub fn new(id: &str, source: &str, category: &str) -> Self {
        Self {
            event: ReadEvent::new(id, source, category, t0()),
        }
    }

    pub fn topics(mut self, topics: &[&str]) -> Self {
        self.event = self.event.with_topics(topics);
        self
    }

    pub fn leaning(mut self, leaning: Leaning) -> Self {
        self.event = self.event.with_leaning(leaning);
        self
    }

    pub fn days_ago(mut self, days: i64) -> Self {
        self.event.read_at = t0() - Duration::days(days);
        self
    }

    pub fn dwell(mut self, seconds: f32) -> Self {
        self.event = self.event.with_dwell(seconds);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.event = self.event.with_completed(completed);
        self
    }

    pub fn build(self) -> ReadEvent {
        self.event
    }
}

/// `count` events tagged `category`, spread round-robin over `sources` outlets.
pub fn tagged_history(category: &str, count: usize, sources: usize) -> Vec<ReadEvent> {
    (0..count)
        .map(|i| {
            EventBuilder::new(
                &format!("{}-{}", category, i),
                &format!("outlet-{}", i % sources.max(1)),
                category,
            )
            .build()
        })
        .collect()
}

pub fn window(events: Vec<ReadEvent>) -> HistoryWindow {
    HistoryWindow::new(events)
}
