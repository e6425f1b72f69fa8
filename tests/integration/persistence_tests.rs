//! Данные переживают перезапуск исполнителя

use super::common::TestDatabase;

#[test]
fn test_tables_survive_restart() {
    let mut db = TestDatabase::with_database("school");
    db.seed_school();
    db.ok("UPDATE marks SET mark = 38 WHERE name == 'Chris';");

    let mut reopened = db.reopen();
    assert_eq!(reopened.session().database(), None);
    assert!(reopened.execute("USE school;").is_ok());
    assert_eq!(
        reopened.context().known_tables(),
        ["coursework", "marks"]
    );
    assert_eq!(
        reopened
            .execute("SELECT mark FROM marks WHERE name == 'Chris';")
            .to_string(),
        "[OK]\nmark\n38"
    );

    assert!(reopened
        .execute("INSERT INTO marks VALUES ('Dave', 70, TRUE);")
        .is_ok());
    assert_eq!(
        reopened
            .execute("SELECT id FROM marks WHERE name == 'Dave';")
            .to_string(),
        "[OK]\nid\n5"
    );
}

#[test]
fn test_multiple_databases_are_isolated() {
    let mut db = TestDatabase::with_database("school");
    db.ok("CREATE TABLE marks (name);");
    db.ok("CREATE DATABASE work;");
    db.ok("USE work;");
    db.ok("CREATE TABLE marks (task);");
    db.ok("INSERT INTO marks VALUES ('report');");

    db.ok("USE school;");
    assert_eq!(db.run("SELECT * FROM marks;"), "[OK]\nid\tname");
    db.ok("USE work;");
    assert_eq!(db.run("SELECT * FROM marks;"), "[OK]\nid\ttask\n1\treport");
}
