//! Полный цикл запросов через диспетчер

use super::common::{data_rows, TestDatabase};
use std::fs;

#[test]
fn test_round_trip() {
    let mut db = TestDatabase::with_database("school");
    db.ok("CREATE TABLE t (c1, c2);");
    db.ok("INSERT INTO t VALUES ('v1', 'v2');");
    assert_eq!(db.run("SELECT * FROM t;"), "[OK]\nid\tc1\tc2\n1\tv1\tv2");
}

#[test]
fn test_select_id_by_name() {
    let mut db = TestDatabase::with_database("school");
    db.seed_school();
    let response = db.ok("SELECT id FROM marks WHERE name == 'Simon';");
    let last_line = response.lines().last().unwrap();
    assert_eq!(last_line, "1");
    assert!(last_line.parse::<i64>().is_ok());
}

#[test]
fn test_delete_without_where_removes_nothing() {
    let mut db = TestDatabase::with_database("school");
    db.seed_school();
    db.ok("DELETE FROM marks;");
    assert_eq!(data_rows(&db.run("SELECT * FROM marks;")), 4);
}

#[test]
fn test_join_coursework_and_marks() {
    let mut db = TestDatabase::with_database("school");
    db.seed_school();
    assert_eq!(
        db.run("JOIN coursework AND marks ON submission AND id;"),
        "[OK]\n\
         id\tcoursework.task\tmarks.name\tmarks.mark\tmarks.pass\n\
         1\tOXO\tRob\t35\tFALSE\n\
         2\tDB\tSimon\t65\tTRUE\n\
         3\tOXO\tChris\t20\tFALSE\n\
         4\tSTAG\tSion\t55\tTRUE"
    );
}

#[test]
fn test_drop_database_then_use() {
    let mut db = TestDatabase::with_database("school");
    db.seed_school();
    db.ok("DROP DATABASE school;");
    assert!(!db.dir.path().join("school").exists());
    assert_eq!(db.executor.session().database(), None);

    assert_eq!(
        db.error("USE school;"),
        "[ERROR] Database 'school' does not exist."
    );
    assert_eq!(db.executor.session().database(), None);
}

#[test]
fn test_alter_keeps_row_width() {
    let mut db = TestDatabase::with_database("school");
    db.seed_school();
    db.ok("ALTER TABLE marks ADD age;");
    db.ok("UPDATE marks SET age = 21 WHERE name == 'Rob';");
    db.ok("ALTER TABLE marks DROP mark;");

    let content = fs::read_to_string(db.dir.path().join("school").join("marks")).unwrap();
    let mut lines = content.lines();
    let header = lines.next().unwrap();
    assert_eq!(header, "id\tname\tpass\tage");
    for line in lines {
        assert_eq!(line.split('\t').count(), 4, "{}", line);
    }
    assert_eq!(
        db.run("SELECT name, age FROM marks WHERE age != NULL;"),
        "[OK]\nname\tage\nRob\t21"
    );
}

#[test]
fn test_ids_not_renumbered_by_delete() {
    let mut db = TestDatabase::with_database("school");
    db.seed_school();
    db.ok("DELETE FROM marks WHERE name == 'Simon' OR name == 'Sion';");
    db.ok("INSERT INTO marks VALUES ('Dave', 71, TRUE);");
    assert_eq!(
        db.run("SELECT id, name FROM marks;"),
        "[OK]\nid\tname\n3\tRob\n4\tChris\n5\tDave"
    );
}

#[test]
fn test_storage_file_format() {
    let mut db = TestDatabase::with_database("school");
    db.ok("CREATE TABLE marks (name, mark);");
    db.ok("INSERT INTO marks VALUES ('Simon', 65);");
    let content = fs::read_to_string(db.dir.path().join("school").join("marks")).unwrap();
    assert_eq!(content, "id\tname\tmark\n1\tSimon\t65\n");
}

#[test]
fn test_parse_errors_leave_tables_untouched() {
    let mut db = TestDatabase::with_database("school");
    db.seed_school();
    let before = db.run("SELECT * FROM marks;");

    db.error("UPDATE marks SET mark = 0 WHERE (name == 'Rob';");
    db.error("DELETE FROM marks WHERE name == 'Rob'");
    db.error("INSERT INTO marks VALUES ('Eve', 1, TRUE) extra;");
    db.error("UPDATE marks SET id = 10;");

    assert_eq!(db.run("SELECT * FROM marks;"), before);
}

#[test]
fn test_error_messages() {
    let mut db = TestDatabase::new();
    assert_eq!(db.error("SELECT * FROM marks;"), "[ERROR] No database selected.");
    assert_eq!(db.error(""), "[ERROR] Empty command received.");
    assert_eq!(db.error("SHOW TABLES;"), "[ERROR] Unknown or invalid command.");
    assert_eq!(
        db.error("SELECT * FROM marks WHERE name == 'Rob;"),
        "[ERROR] Unterminated string literal."
    );
}
