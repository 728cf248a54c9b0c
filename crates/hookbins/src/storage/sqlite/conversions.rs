//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;
use uuid::Uuid;

use hookbins_core::bins::Bin;

/// Convert a SQLite row to a Bin.
///
/// Expected columns: id, account_id, title, created_at, updated_at
pub fn row_to_bin(row: &Row) -> rusqlite::Result<Bin> {
    let id: String = row.get(0)?;
    let account_id: String = row.get(1)?;
    let title: String = row.get(2)?;
    let created_at: String = row.get(3)?;
    let updated_at: String = row.get(4)?;

    Ok(Bin {
        id: parse_uuid(&id, 0)?,
        account_id,
        title,
        created_at: parse_datetime(&created_at, 3)?,
        updated_at: parse_datetime(&updated_at, 4)?,
    })
}

fn parse_uuid(s: &str, column: usize) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_datetime(s: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Formats a timestamp as fixed-width RFC 3339 with microseconds.
///
/// Fixed width keeps lexicographic order equal to chronological order,
/// which `ORDER BY created_at` relies on.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();

        assert_eq!(format_datetime(&dt), "2024-06-15T10:30:00.000000Z");
    }

    #[test]
    fn test_format_datetime_sorts_chronologically() {
        let earlier = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        let later = earlier + chrono::Duration::microseconds(1);

        assert!(format_datetime(&earlier) < format_datetime(&later));
    }

    #[test]
    fn test_datetime_round_trip_preserves_micros() {
        let now = Bin::now();

        let parsed = parse_datetime(&format_datetime(&now), 0).unwrap();

        assert_eq!(parsed, now);
    }

    #[test]
    fn test_parse_uuid_valid() {
        let id = Uuid::new_v4();

        assert_eq!(parse_uuid(&id.to_string(), 0).unwrap(), id);
    }

    #[test]
    fn test_parse_uuid_invalid() {
        let result = parse_uuid("not-a-uuid", 0);

        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(0, _, _))
        ));
    }

    #[test]
    fn test_parse_datetime_invalid() {
        let result = parse_datetime("yesterday", 3);

        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(3, _, _))
        ));
    }

    #[test]
    fn test_row_to_bin() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let id = Uuid::new_v4();

        let bin = conn
            .query_row(
                "SELECT ?1, 'acct-1', 'Invoice Hooks', '2024-06-15T10:30:00.000001Z', '2024-06-15T10:31:00.000000Z'",
                [id.to_string()],
                row_to_bin,
            )
            .unwrap();

        assert_eq!(bin.id, id);
        assert_eq!(bin.account_id, "acct-1");
        assert_eq!(bin.title, "Invoice Hooks");
        assert_eq!(
            bin.created_at,
            Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
                + chrono::Duration::microseconds(1)
        );
    }
}
