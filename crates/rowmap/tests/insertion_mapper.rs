mod support;

use support::{Job, MockConnection, Post, User};

use pretty_assertions::assert_eq;
use rowmap::stmt::Value;
use rowmap::InsertionMapper;

fn juanf(job: Option<Job>) -> User {
    User {
        username: Some("juanf".to_string()),
        name: Some("Juan".to_string()),
        passwd: Some("1234".to_string()),
        job,
    }
}

#[tokio::test]
async fn insert_merges_scalar_and_foreign_key_columns() {
    let conn = MockConnection::new();

    InsertionMapper::new(&conn)
        .add(juanf(Some(Job::new(3, "Profesor"))))
        .insert()
        .await
        .unwrap();

    let log = conn.log();
    assert_eq!(
        log[0].0,
        "INSERT INTO Person (username, firstName, passwd, idJob) VALUES (?, ?, ?, ?)"
    );
    assert_eq!(
        log[0].1,
        vec![
            Value::from("juanf"),
            Value::from("Juan"),
            Value::from("1234"),
            Value::I64(3)
        ]
    );
}

#[tokio::test]
async fn null_relation_contributes_no_columns() {
    let conn = MockConnection::new();

    InsertionMapper::new(&conn).add(juanf(None)).insert().await.unwrap();

    let log = conn.log();
    assert_eq!(
        log[0].0,
        "INSERT INTO Person (username, firstName, passwd) VALUES (?, ?, ?)"
    );
    assert_eq!(log[0].1.len(), 3);
}

#[tokio::test]
async fn null_column_with_default_emits_the_default_keyword() {
    let conn = MockConnection::new();

    let post = Post {
        id: Some("post2".to_string()),
        publication_date: None,
        text: Some("Respuesta".to_string()),
    };
    InsertionMapper::new(&conn).add(post).insert().await.unwrap();

    let log = conn.log();
    assert_eq!(
        log[0].0,
        "INSERT INTO Post (id, publicationDate, text) VALUES (?, default, ?)"
    );
    // The default slot binds nothing; `text` shifts into the second slot.
    assert_eq!(log[0].1, vec![Value::from("post2"), Value::from("Respuesta")]);
}

#[tokio::test]
async fn present_value_overrides_the_default() {
    let conn = MockConnection::new();

    let when = chrono::DateTime::parse_from_rfc3339("2019-05-04T10:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    let post = Post {
        id: Some("post1".to_string()),
        publication_date: Some(when),
        text: Some("Pregunta".to_string()),
    };
    InsertionMapper::new(&conn).add(post).insert().await.unwrap();

    let log = conn.log();
    assert_eq!(
        log[0].0,
        "INSERT INTO Post (id, publicationDate, text) VALUES (?, ?, ?)"
    );
    assert_eq!(log[0].1[1], Value::Timestamp(when));
}

#[tokio::test]
async fn null_without_default_binds_null() {
    let conn = MockConnection::new();

    let job = Job {
        id: Some(7),
        name: None,
    };
    InsertionMapper::new(&conn).add(job).insert().await.unwrap();

    let log = conn.log();
    assert_eq!(log[0].0, "INSERT INTO Job (id, name) VALUES (?, ?)");
    assert_eq!(log[0].1, vec![Value::I64(7), Value::Null]);
}

#[tokio::test]
async fn pool_executes_one_statement_per_instance_in_order() {
    let conn = MockConnection::new();

    InsertionMapper::new(&conn)
        .add_all([Job::new(1, "Profesor"), Job::new(2, "Conserje")])
        .insert()
        .await
        .unwrap();

    let log = conn.log();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].1[0], Value::I64(1));
    assert_eq!(log[1].1[0], Value::I64(2));
}

#[tokio::test]
async fn failure_aborts_the_rest_of_the_pool() {
    let conn = MockConnection::new();
    conn.fail_at(2);

    let err = InsertionMapper::new(&conn)
        .add_all([
            Job::new(1, "Profesor"),
            Job::new(2, "Conserje"),
            Job::new(3, "Bedel"),
        ])
        .insert()
        .await
        .unwrap_err();

    assert!(err.is_statement());
    // The first statement ran; the third never did.
    assert_eq!(conn.log().len(), 1);
}
