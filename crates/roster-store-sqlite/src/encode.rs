//! Encoding and decoding helpers between Rust domain types and the plain
//! column representations stored in SQLite.
//!
//! Timestamps are stored as epoch milliseconds. The favorite flag is stored
//! as `0`/`1`.

use chrono::{DateTime, Utc};
use roster_core::{Contact, ContactId};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> i64 { dt.timestamp_millis() }

pub fn decode_dt(millis: i64) -> Result<DateTime<Utc>> {
  DateTime::from_timestamp_millis(millis).ok_or(Error::Timestamp(millis))
}

// ─── Raw row ─────────────────────────────────────────────────────────────────

/// A `contacts` row exactly as read from SQLite, before timestamp decoding.
///
/// Decoding happens outside the connection closure so that our own error
/// type can be used.
pub struct RawContact {
  pub id:         ContactId,
  pub name:       String,
  pub phone:      String,
  pub email:      Option<String>,
  pub favorite:   bool,
  pub created_at: i64,
}

impl RawContact {
  /// Map a row selected with [`crate::schema::COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      phone:      row.get(2)?,
      email:      row.get(3)?,
      favorite:   row.get::<_, i64>(4)? != 0,
      created_at: row.get(5)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:         self.id,
      name:       self.name,
      phone:      self.phone,
      email:      self.email,
      favorite:   self.favorite,
      created_at: decode_dt(self.created_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dt_keeps_millisecond_precision() {
    let dt = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
    assert_eq!(decode_dt(encode_dt(dt)).unwrap(), dt);
  }

  #[test]
  fn out_of_range_millis_is_an_error() {
    assert!(matches!(decode_dt(i64::MAX), Err(Error::Timestamp(i64::MAX))));
  }
}
