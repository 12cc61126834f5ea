//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tracing::{debug, info};

use roster_core::{Contact, ContactId, NewContact, store::ContactStore};

use crate::{
  Result,
  encode::{RawContact, encode_dt},
  schema::{COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster contact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    info!(path = %path.display(), "contact store opened");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Close the underlying connection. Clones of this store fail with a
  /// database error afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    info!("contact store closed");
    Ok(())
  }

  /// Insert `seed` if, and only if, the table is empty. Returns the inserted
  /// contacts (empty when the store already held data).
  pub async fn seed_if_empty(&self, seed: Vec<NewContact>) -> Result<Vec<Contact>> {
    let created_at = encode_dt(Utc::now());

    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let count: i64 =
          tx.query_row("SELECT COUNT(*) FROM contacts", [], |r| r.get(0))?;
        if count > 0 {
          return Ok(Vec::new());
        }

        let mut inserted = Vec::with_capacity(seed.len());
        {
          let mut stmt = tx.prepare(
            "INSERT INTO contacts (name, phone, email, created_at) VALUES (?1, ?2, ?3, ?4)",
          )?;
          for input in seed {
            stmt.execute(rusqlite::params![input.name, input.phone, input.email, created_at])?;
            inserted.push(raw_from_input(tx.last_insert_rowid(), input, created_at));
          }
        }
        tx.commit()?;
        Ok(inserted)
      })
      .await?;

    if !raws.is_empty() {
      info!(count = raws.len(), "seeded empty contact store");
    }
    raws.into_iter().map(RawContact::into_contact).collect()
  }

  /// Number of stored contacts.
  pub async fn count(&self) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM contacts", [], |r| r.get(0))?))
      .await?;
    Ok(usize::try_from(n).unwrap_or_default())
  }

  /// Run a single-row `UPDATE` and read the row back if it matched.
  async fn update_and_fetch(
    &self,
    id: ContactId,
    sql: &'static str,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<Option<Contact>> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(sql, rusqlite::params_from_iter(params))?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(select_by_id(conn, id)?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }
}

/// The sample contacts written by `seed_if_empty` when demo seeding is on.
pub fn demo_contacts() -> Vec<NewContact> {
  vec![
    NewContact::new("Alice", "0123456789"),
    NewContact::new("Bob", "0987654321"),
  ]
}

fn raw_from_input(id: ContactId, input: NewContact, created_at: i64) -> RawContact {
  RawContact {
    id,
    name: input.name,
    phone: input.phone,
    email: input.email,
    favorite: false,
    created_at,
  }
}

fn select_by_id(
  conn: &rusqlite::Connection,
  id: ContactId,
) -> rusqlite::Result<Option<RawContact>> {
  conn
    .query_row(
      &format!("SELECT {COLUMNS} FROM contacts WHERE id = ?1"),
      rusqlite::params![id],
      RawContact::from_row,
    )
    .optional()
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn create(&self, input: NewContact) -> Result<Contact> {
    let created_at = encode_dt(Utc::now());

    let raw = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (name, phone, email, created_at) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![input.name, input.phone, input.email, created_at],
        )?;
        Ok(raw_from_input(conn.last_insert_rowid(), input, created_at))
      })
      .await?;

    debug!(id = raw.id, "contact created");
    raw.into_contact()
  }

  async fn update(&self, id: ContactId, input: NewContact) -> Result<Option<Contact>> {
    let updated = self
      .update_and_fetch(
        id,
        "UPDATE contacts SET name = ?1, phone = ?2, email = ?3 WHERE id = ?4",
        vec![
          input.name.into(),
          input.phone.into(),
          input.email.map_or(rusqlite::types::Value::Null, Into::into),
          id.into(),
        ],
      )
      .await?;

    debug!(id, found = updated.is_some(), "contact updated");
    Ok(updated)
  }

  async fn set_favorite(&self, id: ContactId, favorite: bool) -> Result<Option<Contact>> {
    let updated = self
      .update_and_fetch(
        id,
        "UPDATE contacts SET favorite = ?1 WHERE id = ?2",
        vec![i64::from(favorite).into(), id.into()],
      )
      .await?;

    debug!(id, favorite, found = updated.is_some(), "favorite set");
    Ok(updated)
  }

  async fn toggle_favorite(&self, id: ContactId) -> Result<Option<Contact>> {
    let updated = self
      .update_and_fetch(
        id,
        "UPDATE contacts SET favorite = 1 - favorite WHERE id = ?1",
        vec![id.into()],
      )
      .await?;

    debug!(id, found = updated.is_some(), "favorite toggled");
    Ok(updated)
  }

  async fn delete(&self, id: ContactId) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM contacts WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    debug!(id, removed, "contact deleted");
    Ok(removed > 0)
  }

  async fn insert_absent(&self, inputs: Vec<NewContact>) -> Result<Vec<Contact>> {
    let created_at = encode_dt(Utc::now());
    let offered = inputs.len();

    // One transaction for the whole batch: either every row lands or none.
    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut inserted = Vec::new();
        {
          let mut stmt = tx.prepare(
            "INSERT INTO contacts (name, phone, email, favorite, created_at)
             SELECT ?1, ?2, ?3, 0, ?4
             WHERE NOT EXISTS (SELECT 1 FROM contacts WHERE phone = ?2)",
          )?;
          for input in inputs {
            let n = stmt.execute(rusqlite::params![
              input.name,
              input.phone,
              input.email,
              created_at,
            ])?;
            if n == 1 {
              inserted.push(raw_from_input(tx.last_insert_rowid(), input, created_at));
            }
          }
        }
        tx.commit()?;
        Ok(inserted)
      })
      .await?;

    debug!(offered, inserted = raws.len(), "batch insert of absent phones");
    raws.into_iter().map(RawContact::into_contact).collect()
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get(&self, id: ContactId) -> Result<Option<Contact>> {
    let raw = self
      .conn
      .call(move |conn| Ok(select_by_id(conn, id)?))
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn list(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {COLUMNS} FROM contacts ORDER BY id DESC"))?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn find_by_phone(&self, phone: &str) -> Result<Option<Contact>> {
    let phone = phone.to_owned();

    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {COLUMNS} FROM contacts WHERE phone = ?1 ORDER BY id DESC LIMIT 1"
              ),
              rusqlite::params![phone],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }
}
