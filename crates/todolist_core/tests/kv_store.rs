use rusqlite::Connection;
use todolist_core::db::migrations::latest_version;
use todolist_core::db::{open_db, open_db_in_memory};
use todolist_core::{
    DirectoryTransfer, KvError, PersistenceStore, SqliteKvStore, Task, TodoListService,
    EXPORT_FILE_NAME,
};

#[test]
fn missing_key_reads_as_none() {
    let store = SqliteKvStore::open_in_memory().unwrap();
    assert_eq!(store.get("todos").unwrap(), None);
}

#[test]
fn set_overwrites_previous_value() {
    let mut store = SqliteKvStore::open_in_memory().unwrap();
    store.set("todos", "[]").unwrap();
    store.set("todos", r#"[{"title":"a"}]"#).unwrap();
    assert_eq!(
        store.get("todos").unwrap().as_deref(),
        Some(r#"[{"title":"a"}]"#)
    );

    let conn = store.into_connection();
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn open_db_in_memory_applies_migrations() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteKvStore::try_new(conn).err().expect("unmigrated");
    assert!(matches!(
        err,
        KvError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        KvError::UnsupportedSchemaVersion {
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
fn reopening_file_restores_last_written_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todolist.sqlite3");

    {
        let store = SqliteKvStore::open(&path).unwrap();
        let mut service = TodoListService::open(store).unwrap();
        service.add(Task::new("A")).unwrap();
        service
            .add(Task::new("B").with_description("second"))
            .unwrap();
        service.add(Task::new("C")).unwrap();
        service.commit_order(&[2, 0, 1]).unwrap();
        service.delete(2).unwrap();
    }

    let service = TodoListService::open(SqliteKvStore::open(&path).unwrap()).unwrap();
    assert_eq!(service.tasks(), &[Task::new("C"), Task::new("A")]);
}

#[test]
fn export_then_import_through_directory() {
    let dir = tempfile::tempdir().unwrap();
    let transfer = DirectoryTransfer::new(dir.path().join("exports"));

    let mut source = TodoListService::open(SqliteKvStore::open_in_memory().unwrap()).unwrap();
    source
        .add(Task::new("Plan trip").with_date("2024-07-01"))
        .unwrap();
    source.add(Task::new("Pack")).unwrap();
    let path = source.export(&transfer).unwrap();
    assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);

    let mut target = TodoListService::open(SqliteKvStore::open_in_memory().unwrap()).unwrap();
    let count = target.import_file(&transfer, &path).unwrap();
    assert_eq!(count, 2);
    assert_eq!(target.tasks(), source.tasks());
}
