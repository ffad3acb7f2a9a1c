use rusqlite::Connection;
use userdesk_core::db::migrations::{apply_migrations, latest_version, schema_version};
use userdesk_core::db::{open_db, open_db_in_memory, DbError};
use userdesk_core::{BlobError, BlobStore, SqliteBlobStore};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_blobs');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn reopening_a_file_keeps_schema_and_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blobs.db");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteBlobStore::try_new(&conn).unwrap();
        store.put("tasks", "[]").unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let store = SqliteBlobStore::try_new(&conn).unwrap();
    assert_eq!(store.get("tasks").unwrap().as_deref(), Some("[]"));
}

#[test]
fn newer_schema_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unmigrated_connection_is_rejected_by_blob_store() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteBlobStore::try_new(&conn).err().unwrap();
    assert!(matches!(err, BlobError::Unavailable(_)));
}

#[test]
fn apply_migrations_is_idempotent() {
    let mut conn = Connection::open_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    apply_migrations(&mut conn).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
}

#[test]
fn put_replaces_whole_value_per_key() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteBlobStore::try_new(&conn).unwrap();

    assert_eq!(store.get("tasks").unwrap(), None);
    store.put("tasks", "[1]").unwrap();
    store.put("tasks", "[1,2]").unwrap();
    store.put("other", "x").unwrap();

    assert_eq!(store.get("tasks").unwrap().as_deref(), Some("[1,2]"));
    assert_eq!(store.get("other").unwrap().as_deref(), Some("x"));
}
