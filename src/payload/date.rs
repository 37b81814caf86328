//! # TIC Date Decoding
//!
//! Standard-mode timestamps are 13 characters: a season marker followed by
//! `YYMMDDHHMMSS` local time. An `H` (hiver) marker means winter time, UTC+1;
//! any other marker (`E` for été, or a lowercase degraded-clock variant) means
//! summer time, UTC+2.

use crate::constants::{
    TIC_DATE_LAYOUT, TIC_DATE_SUMMER_OFFSET_SECS, TIC_DATE_WINTER_MARKER,
    TIC_DATE_WINTER_OFFSET_SECS,
};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

/// Decodes a season-prefixed TIC timestamp. Malformed tokens yield `None`.
pub fn decode_date(token: &str) -> Option<DateTime<FixedOffset>> {
    let mut chars = token.chars();
    let season = chars.next()?;

    let offset_secs = if season.eq_ignore_ascii_case(&TIC_DATE_WINTER_MARKER) {
        TIC_DATE_WINTER_OFFSET_SECS
    } else {
        TIC_DATE_SUMMER_OFFSET_SECS
    };
    let offset = FixedOffset::east_opt(offset_secs)?;

    let local = NaiveDateTime::parse_from_str(chars.as_str(), TIC_DATE_LAYOUT).ok()?;
    offset.from_local_datetime(&local).single()
}
