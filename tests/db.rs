use diesel::prelude::*;
use diesel::sql_types::Integer;
use hoots::db::run_migrations;

mod common;

#[derive(QueryableByName)]
struct Pragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new();
    let pool = test_db.pool();
    let conn = pool.get();
    assert!(conn.is_ok());
}

#[test]
fn pooled_connections_enforce_foreign_keys() {
    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().unwrap();
    let pragma: Pragma = diesel::sql_query("PRAGMA foreign_keys")
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(pragma.foreign_keys, 1);
}

#[test]
fn migrations_are_idempotent() {
    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().unwrap();
    assert!(run_migrations(&mut conn).is_ok());
}
