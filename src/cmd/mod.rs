pub mod batch;
pub mod profile;
pub mod score;
pub mod simulate;

use chrono::{DateTime, Utc};
use democracy_score::error::DsResult;

/// `--as-of` accepts RFC 3339 or `now`. Absent means recency weighting is off.
pub fn parse_as_of(raw: Option<&str>) -> DsResult<Option<DateTime<Utc>>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("now") => Ok(Some(Utc::now())),
        Some(s) => Ok(Some(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))),
    }
}
