mod common;

use common::RecordingDriver;
use rowsql::{
    Adapter, DbError, Dialect, MysqlAdapter, Operation, SqliteAdapter, Value, fields, literal,
};

fn adapter() -> SqliteAdapter<RecordingDriver> {
    SqliteAdapter::new(RecordingDriver::new())
}

#[test]
fn update_binds_everything_under_value_prefix() {
    let db = adapter();
    let rows = db
        .update("foobar", &fields! { "foo" => "bar" }, &fields! { "foo" => "baz" }, false)
        .unwrap();

    assert_eq!(
        rows.sql,
        "UPDATE `foobar` SET `foo` = :value_0 WHERE `foo` = :value_1"
    );
    assert_eq!(rows.params.get("value_0"), Some(&Value::from("bar")));
    assert_eq!(rows.params.get("value_1"), Some(&Value::from("baz")));
}

#[test]
fn update_prepares_every_time() {
    let db = adapter();
    db.update("t", &fields! { "a" => 1 }, &fields! { "id" => 1 }, false)
        .unwrap();
    db.update("t", &fields! { "a" => 2 }, &fields! { "id" => 1 }, false)
        .unwrap();

    assert_eq!(db.driver().prepare_count(), 2);
}

#[test]
fn update_with_empty_where_is_rejected() {
    let db = adapter();
    let err = db
        .update("t", &fields! { "a" => 1 }, &fields! {}, false)
        .unwrap_err();

    assert!(matches!(err, DbError::EmptyWhereNotAllowed { .. }));
    assert!(db.driver().calls().is_empty());
}

#[test]
fn update_refuses_literals_without_driver_call() {
    let db = adapter();
    let err = db
        .update("t", &fields! { "a" => literal("NOW()") }, &fields! { "id" => 1 }, false)
        .unwrap_err();

    assert!(err.is_unsupported());
    assert!(db.driver().calls().is_empty());
}

#[test]
fn other_operations_are_unsupported() {
    let db = adapter();

    let results = [
        (Operation::Insert, db.insert("t", &fields! { "a" => 1 }).err()),
        (Operation::Select, db.select("t", &fields! { "a" => 1 }).err()),
        (Operation::Delete, db.delete("t", &fields! { "a" => 1 }, false).err()),
    ];

    for (expected, err) in results {
        match err {
            Some(DbError::Unsupported { dialect, operation }) => {
                assert_eq!(dialect, Dialect::Sqlite);
                assert_eq!(operation, expected);
            }
            other => panic!("expected Unsupported for {expected}, got {other:?}"),
        }
    }
    assert!(db.driver().calls().is_empty());
}

#[test]
fn unsupported_error_names_operation_and_dialect() {
    let err = adapter().insert("t", &fields! { "a" => 1 }).unwrap_err();
    assert_eq!(err.to_string(), "INSERT is not implemented for SQLite");
}

#[test]
fn capabilities_are_queryable() {
    let db = adapter();
    assert!(db.supports(Operation::Update));
    assert!(!db.supports(Operation::Insert));
    assert!(!db.supports(Operation::Select));
    assert!(!db.supports(Operation::Delete));
    assert_eq!(db.dialect(), Dialect::Sqlite);
}

/// Generic code can branch on capabilities instead of matching on errors.
fn find_by_id<A: Adapter>(db: &A, table: &str, id: i64) -> Option<A::Rows> {
    if !db.supports(Operation::Select) {
        return None;
    }
    db.select(table, &fields! { "id" => id }).ok()
}

#[test]
fn generic_callers_can_check_capabilities() {
    let sqlite = adapter();
    assert!(find_by_id(&sqlite, "t", 1).is_none());
    assert!(sqlite.driver().calls().is_empty());

    let mysql = MysqlAdapter::new(RecordingDriver::new());
    let rows = find_by_id(&mysql, "t", 1).unwrap();
    assert_eq!(rows.sql, "SELECT * FROM `t` WHERE `id` = :where_0");
}
