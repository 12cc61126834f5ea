//! Integration tests for `SqliteStore` against an in-memory database.

use std::path::{Path, PathBuf};

use roster_core::{NewContact, store::ContactStore};

use crate::{SqliteStore, demo_contacts};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn alice() -> NewContact { NewContact::new("Alice", "0123456789") }

fn bob() -> NewContact {
  NewContact::new("Bob", "0987654321").with_email("bob@example.com")
}

// ─── Create / list ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_list() {
  let s = store().await;

  let created = s.create(alice()).await.unwrap();
  assert_eq!(created.name, "Alice");
  assert!(!created.favorite);

  let all = s.list().await.unwrap();
  assert_eq!(all, vec![created]);
}

#[tokio::test]
async fn list_is_newest_first() {
  let s = store().await;
  let a = s.create(alice()).await.unwrap();
  let b = s.create(bob()).await.unwrap();

  let ids: Vec<_> = s.list().await.unwrap().iter().map(|c| c.id).collect();
  assert_eq!(ids, [b.id, a.id]);
}

#[tokio::test]
async fn ids_are_never_reused() {
  let s = store().await;
  let a = s.create(alice()).await.unwrap();
  assert!(s.delete(a.id).await.unwrap());

  let b = s.create(bob()).await.unwrap();
  assert!(b.id > a.id);
}

#[tokio::test]
async fn create_allows_duplicate_phone() {
  let s = store().await;
  s.create(alice()).await.unwrap();
  s.create(NewContact::new("Alice again", "0123456789")).await.unwrap();
  assert_eq!(s.count().await.unwrap(), 2);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(42).await.unwrap().is_none());
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_keeps_favorite_and_created_at() {
  let s = store().await;
  let original = s.create(alice()).await.unwrap();
  s.set_favorite(original.id, true).await.unwrap();

  let updated = s
    .update(
      original.id,
      NewContact::new("Alice Liddell", "111").with_email("alice@example.com"),
    )
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.id, original.id);
  assert_eq!(updated.name, "Alice Liddell");
  assert_eq!(updated.phone, "111");
  assert_eq!(updated.email.as_deref(), Some("alice@example.com"));
  assert!(updated.favorite);
  assert_eq!(updated.created_at, original.created_at);
}

#[tokio::test]
async fn update_can_clear_email() {
  let s = store().await;
  let b = s.create(bob()).await.unwrap();
  let updated = s
    .update(b.id, NewContact::new("Bob", "0987654321"))
    .await
    .unwrap()
    .unwrap();
  assert!(updated.email.is_none());
}

#[tokio::test]
async fn update_missing_is_noop() {
  let s = store().await;
  let a = s.create(alice()).await.unwrap();

  assert!(s.update(a.id + 1, bob()).await.unwrap().is_none());
  assert_eq!(s.list().await.unwrap(), vec![a]);
}

// ─── Favorite ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_twice_restores_original() {
  let s = store().await;
  let a = s.create(alice()).await.unwrap();

  let once = s.toggle_favorite(a.id).await.unwrap().unwrap();
  assert!(once.favorite);
  let twice = s.toggle_favorite(a.id).await.unwrap().unwrap();
  assert!(!twice.favorite);
  assert_eq!(twice, a);
}

#[tokio::test]
async fn toggle_missing_leaves_others_untouched() {
  let s = store().await;
  let a = s.create(alice()).await.unwrap();
  let b = s.create(bob()).await.unwrap();

  assert!(s.toggle_favorite(b.id + 100).await.unwrap().is_none());
  assert_eq!(s.list().await.unwrap(), vec![b, a]);
}

#[tokio::test]
async fn set_favorite_is_idempotent() {
  let s = store().await;
  let a = s.create(alice()).await.unwrap();

  s.set_favorite(a.id, true).await.unwrap();
  let again = s.set_favorite(a.id, true).await.unwrap().unwrap();
  assert!(again.favorite);

  assert!(s.set_favorite(a.id + 1, true).await.unwrap().is_none());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_is_idempotent() {
  let s = store().await;
  let a = s.create(alice()).await.unwrap();
  let b = s.create(bob()).await.unwrap();

  assert!(s.delete(a.id).await.unwrap());
  assert!(!s.delete(a.id).await.unwrap());
  assert_eq!(s.list().await.unwrap(), vec![b]);
}

// ─── Phone lookup / import path ──────────────────────────────────────────────

#[tokio::test]
async fn find_by_phone_returns_newest_match() {
  let s = store().await;
  s.create(alice()).await.unwrap();
  let second = s.create(NewContact::new("Other", "0123456789")).await.unwrap();

  let found = s.find_by_phone("0123456789").await.unwrap().unwrap();
  assert_eq!(found.id, second.id);
  assert!(s.find_by_phone("000").await.unwrap().is_none());
}

#[tokio::test]
async fn insert_absent_skips_present_and_repeated_phones() {
  let s = store().await;
  let existing = s.create(alice()).await.unwrap();

  let inserted = s
    .insert_absent(vec![
      NewContact::new("Imported Alice", "0123456789"),
      NewContact::new("Carol", "111"),
      NewContact::new("Carol twin", "111"),
      NewContact::new("Dave", "222"),
    ])
    .await
    .unwrap();

  let names: Vec<_> = inserted.iter().map(|c| c.name.as_str()).collect();
  assert_eq!(names, ["Carol", "Dave"]);
  assert!(inserted.iter().all(|c| !c.favorite));

  let kept = s.get(existing.id).await.unwrap().unwrap();
  assert_eq!(kept.name, "Alice");
  assert_eq!(s.count().await.unwrap(), 3);
}

#[tokio::test]
async fn insert_absent_with_nothing_new() {
  let s = store().await;
  s.create(alice()).await.unwrap();
  let inserted = s.insert_absent(vec![alice()]).await.unwrap();
  assert!(inserted.is_empty());
  assert!(s.insert_absent(Vec::new()).await.unwrap().is_empty());
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn seed_only_fills_empty_store() {
  let s = store().await;

  let seeded = s.seed_if_empty(demo_contacts()).await.unwrap();
  assert_eq!(seeded.len(), 2);

  let again = s.seed_if_empty(demo_contacts()).await.unwrap();
  assert!(again.is_empty());
  assert_eq!(s.count().await.unwrap(), 2);
}

fn temp_db_path(tag: &str) -> PathBuf {
  std::env::temp_dir().join(format!(
    "roster-store-{tag}-{}-{}.db",
    std::process::id(),
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
  ))
}

fn remove_db(path: &Path) {
  for suffix in ["", "-wal", "-shm"] {
    let mut p = path.as_os_str().to_owned();
    p.push(suffix);
    let _ = std::fs::remove_file(p);
  }
}

#[tokio::test]
async fn reopening_a_file_keeps_data() {
  let path = temp_db_path("reopen");

  let s = SqliteStore::open(&path).await.unwrap();
  let a = s.create(alice()).await.unwrap();
  s.close().await.unwrap();

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.list().await.unwrap(), vec![a]);
  s.close().await.unwrap();

  remove_db(&path);
}

#[tokio::test]
async fn insert_absent_rolls_back_on_failure() {
  let path = temp_db_path("rollback");
  let s = SqliteStore::open(&path).await.unwrap();
  s.create(alice()).await.unwrap();
  let before = s.list().await.unwrap();

  // Reject one phone from outside the store so the batch fails mid-way.
  rusqlite::Connection::open(&path)
    .unwrap()
    .execute_batch(
      "CREATE TRIGGER reject_666 BEFORE INSERT ON contacts
       WHEN NEW.phone = '666'
       BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
    )
    .unwrap();

  let result = s
    .insert_absent(vec![
      NewContact::new("C", "111"),
      NewContact::new("Bad", "666"),
      NewContact::new("D", "222"),
    ])
    .await;

  assert!(result.is_err());
  assert_eq!(s.list().await.unwrap(), before);
  assert!(s.find_by_phone("111").await.unwrap().is_none());

  s.close().await.unwrap();
  remove_db(&path);
}

#[tokio::test]
async fn closed_store_reports_errors() {
  let s = store().await;
  let handle = s.clone();
  s.close().await.unwrap();
  assert!(handle.list().await.is_err());
}
