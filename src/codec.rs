//! Record codec for the diary file format
//!
//! Each persisted record is one line: a type marker (`T:` for a trip header,
//! `P:` for a photo) followed by a fixed-arity, semicolon-separated field
//! list. Structural characters inside field values are substituted with named
//! escape tokens before joining, so splitting a line on `;` is lossless:
//!
//! - `\`  -> `\backslash`
//! - `;`  -> `\semicolon`
//! - `=`  -> `\equals`
//! - `\n` -> `\newline`
//!
//! The backslash is escaped first and unescaped last. That makes the round
//! trip unambiguous even when a field already contains literal token text
//! such as `\semicolon`: after encoding, every `\` in the line starts
//! exactly one token.
//!
//! Photo timestamps are encoded as `YYYYMMDDHHMMSS`, or the empty string
//! when the time is unknown.

use crate::error::TrailbookError;
use crate::model::{Photo, Trip};
use chrono::NaiveDateTime;

/// Marker prefix for trip header records
pub const TRIP_MARKER: &str = "T:";
/// Marker prefix for photo records
pub const PHOTO_MARKER: &str = "P:";

/// Wire format for photo timestamps
pub const DATETIME_FORMAT: &str = "%Y%m%d%H%M%S";

const TRIP_ARITY: usize = 3;
const PHOTO_ARITY: usize = 5;

/// Substitute structural characters in a field value with escape tokens
pub fn escape_field(value: &str) -> String {
    value
        .replace('\\', "\\backslash")
        .replace(';', "\\semicolon")
        .replace('=', "\\equals")
        .replace('\n', "\\newline")
}

/// Reverse [`escape_field`]
///
/// Named tokens are replaced first and `\backslash` last, mirroring the
/// encode order so that token text produced by the backslash pass is never
/// re-interpreted.
pub fn unescape_field(value: &str) -> String {
    value
        .replace("\\semicolon", ";")
        .replace("\\equals", "=")
        .replace("\\newline", "\n")
        .replace("\\backslash", "\\")
}

/// Encode a trip header as one `T:` line (without trailing newline)
pub fn encode_trip(trip: &Trip) -> String {
    format!(
        "{}{};{};{}",
        TRIP_MARKER,
        escape_field(&trip.name),
        escape_field(&trip.description),
        escape_field(&trip.location)
    )
}

/// Encode a photo as one `P:` line (without trailing newline)
pub fn encode_photo(photo: &Photo) -> String {
    let timestamp = photo
        .taken_at
        .map(|t| t.format(DATETIME_FORMAT).to_string())
        .unwrap_or_default();
    format!(
        "{}{};{};{};{};{}",
        PHOTO_MARKER,
        escape_field(&photo.file_path),
        escape_field(&photo.name),
        escape_field(&photo.caption),
        escape_field(&photo.location),
        timestamp
    )
}

/// Decode one `T:` line into a [`Trip`] with no photos
///
/// # Errors
///
/// Returns [`TrailbookError::MalformedRecord`] when the marker is wrong,
/// the field count is not exactly 3, or the decoded name is empty.
pub fn decode_trip_line(line: &str) -> Result<Trip, TrailbookError> {
    let body = line.strip_prefix(TRIP_MARKER).ok_or_else(|| {
        TrailbookError::MalformedRecord(format!("not a trip record: '{}'", line))
    })?;

    let fields: Vec<&str> = body.split(';').collect();
    if fields.len() != TRIP_ARITY {
        return Err(TrailbookError::MalformedRecord(format!(
            "trip record has {} fields, expected {}",
            fields.len(),
            TRIP_ARITY
        )));
    }

    let name = unescape_field(fields[0]);
    if name.is_empty() {
        return Err(TrailbookError::MalformedRecord(
            "trip record has an empty name".to_string(),
        ));
    }

    Ok(Trip::new(
        name,
        unescape_field(fields[1]),
        unescape_field(fields[2]),
    ))
}

/// Decode one `P:` line into a [`Photo`]
///
/// An empty timestamp field decodes to `taken_at = None`. A non-empty
/// timestamp that does not parse is tolerated: the photo is kept and the
/// time dropped, with a warning, so one bad field does not lose the record.
///
/// # Errors
///
/// Returns [`TrailbookError::MalformedRecord`] when the marker is wrong or
/// the field count is not exactly 5.
pub fn decode_photo_line(line: &str) -> Result<Photo, TrailbookError> {
    let body = line.strip_prefix(PHOTO_MARKER).ok_or_else(|| {
        TrailbookError::MalformedRecord(format!("not a photo record: '{}'", line))
    })?;

    let fields: Vec<&str> = body.split(';').collect();
    if fields.len() != PHOTO_ARITY {
        return Err(TrailbookError::MalformedRecord(format!(
            "photo record has {} fields, expected {}",
            fields.len(),
            PHOTO_ARITY
        )));
    }

    let taken_at = parse_timestamp_lenient(fields[4]);

    Ok(Photo {
        file_path: unescape_field(fields[0]),
        name: unescape_field(fields[1]),
        caption: unescape_field(fields[2]),
        location: unescape_field(fields[3]),
        taken_at,
    })
}

/// Parse a wire timestamp, dropping unparseable values with a warning
fn parse_timestamp_lenient(field: &str) -> Option<NaiveDateTime> {
    if field.is_empty() {
        return None;
    }
    match NaiveDateTime::parse_from_str(field, DATETIME_FORMAT) {
        Ok(t) => Some(t),
        Err(e) => {
            tracing::warn!("Dropping unparseable photo timestamp '{}': {}", field, e);
            None
        }
    }
}

/// Parse a user-supplied timestamp strictly
///
/// Used by the interactive `add_photo` command, where a typo should be
/// reported back rather than silently dropped.
pub fn parse_timestamp_strict(field: &str) -> Result<NaiveDateTime, TrailbookError> {
    NaiveDateTime::parse_from_str(field, DATETIME_FORMAT)
        .map_err(|_| TrailbookError::InvalidTimestamp(field.to_string()))
}
