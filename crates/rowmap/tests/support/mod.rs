#![allow(dead_code)]

//! Scripted mock connection plus the mapped fixtures shared by the
//! integration tests.

use rowmap::driver::{Capability, Connection, IsolationLevel, Rows, Statement};
use rowmap::schema::{EntityDef, FieldDef};
use rowmap::stmt::{Type, Value};
use rowmap::{Entity, EntityRef, Error, Mapped, Result};

use async_trait::async_trait;
use std::any::Any;
use std::collections::{HashMap, VecDeque};
use std::sync::{LazyLock, Mutex};

/// A connection that serves canned result sets keyed by statement text and
/// records every executed statement with its bound parameters.
#[derive(Debug)]
pub struct MockConnection {
    capability: Capability,
    isolation: Mutex<IsolationLevel>,
    responses: Mutex<HashMap<String, VecDeque<Rows>>>,
    log: Mutex<Vec<(String, Vec<Value>)>>,
    fail_at: Mutex<Option<usize>>,
    prepared: Mutex<usize>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::with_capability(Capability::POSTGRESQL)
    }

    pub fn with_capability(capability: Capability) -> Self {
        let isolation = capability.default_isolation;
        Self {
            capability,
            isolation: Mutex::new(isolation),
            responses: Mutex::new(HashMap::new()),
            log: Mutex::new(vec![]),
            fail_at: Mutex::new(None),
            prepared: Mutex::new(0),
        }
    }

    /// Rejects the `n`th prepared statement (1-based) with a driver error.
    pub fn fail_at(&self, n: usize) {
        *self.fail_at.lock().unwrap() = Some(n);
    }

    /// Queues a result set to serve for the given statement text.
    pub fn respond(&self, sql: &str, rows: Rows) {
        self.responses
            .lock()
            .unwrap()
            .entry(sql.to_string())
            .or_default()
            .push_back(rows);
    }

    /// Every executed statement with its bound parameters, in order.
    pub fn log(&self) -> Vec<(String, Vec<Value>)> {
        self.log.lock().unwrap().clone()
    }

    pub fn current_isolation(&self) -> IsolationLevel {
        *self.isolation.lock().unwrap()
    }

    fn record(&self, sql: &str, params: &[Value]) {
        self.log
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
    }

    fn take_response(&self, sql: &str) -> Rows {
        self.responses
            .lock()
            .unwrap()
            .get_mut(sql)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Connection for MockConnection {
    fn capability(&self) -> &Capability {
        &self.capability
    }

    fn isolation(&self) -> IsolationLevel {
        *self.isolation.lock().unwrap()
    }

    async fn set_isolation(&self, level: IsolationLevel) -> Result<()> {
        *self.isolation.lock().unwrap() = level;
        Ok(())
    }

    async fn prepare(&self, sql: &str) -> Result<Box<dyn Statement + '_>> {
        let mut prepared = self.prepared.lock().unwrap();
        *prepared += 1;
        if *self.fail_at.lock().unwrap() == Some(*prepared) {
            return Err(Error::statement(std::io::Error::new(
                std::io::ErrorKind::Other,
                "statement rejected",
            )));
        }
        drop(prepared);

        Ok(Box::new(MockStatement {
            conn: self,
            sql: sql.to_string(),
            params: vec![],
        }))
    }
}

struct MockStatement<'a> {
    conn: &'a MockConnection,
    sql: String,
    params: Vec<Value>,
}

#[async_trait]
impl Statement for MockStatement<'_> {
    fn bind(&mut self, params: &[Value]) -> Result<()> {
        self.params = params.to_vec();
        Ok(())
    }

    async fn execute(&mut self) -> Result<u64> {
        self.conn.record(&self.sql, &self.params);
        Ok(1)
    }

    async fn query(&mut self) -> Result<Rows> {
        self.conn.record(&self.sql, &self.params);
        Ok(self.conn.take_response(&self.sql))
    }
}

/// Shorthand for building a canned result set.
pub fn rows(columns: &[&str], values: Vec<Vec<Value>>) -> Rows {
    Rows::new(columns.iter().map(|c| c.to_string()).collect(), values)
}

// ---------------------------------------------------------------------------
// Mapped fixtures
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Job {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl Job {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id: Some(id),
            name: Some(name.to_string()),
        }
    }
}

impl Entity for Job {
    fn def(&self) -> &'static EntityDef {
        Self::entity_def()
    }

    fn get(&self, field: &str) -> Value {
        match field {
            "id" => self.id.into(),
            "name" => self.name.clone().into(),
            _ => Value::Null,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "id" => self.id = value.to_option_i64()?,
            "name" => self.name = value.to_option_string()?,
            _ => return Err(Error::unknown_field("Job", field)),
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Entity> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl Mapped for Job {
    fn entity_def() -> &'static EntityDef {
        static DEF: LazyLock<EntityDef> = LazyLock::new(|| {
            EntityDef::builder("Job")
                .table()
                .field(FieldDef::scalar("id", Type::I64).primary_key())
                .field(FieldDef::scalar("name", Type::String))
                .build()
        });
        &DEF
    }
}

/// Mapped onto the `Person` table; `job` dereferences through the
/// `idJob:id` column pair.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct User {
    pub username: Option<String>,
    pub name: Option<String>,
    pub passwd: Option<String>,
    pub job: Option<Job>,
}

impl Entity for User {
    fn def(&self) -> &'static EntityDef {
        Self::entity_def()
    }

    fn get(&self, field: &str) -> Value {
        match field {
            "username" => self.username.clone().into(),
            "name" => self.name.clone().into(),
            "passwd" => self.passwd.clone().into(),
            "job" => match &self.job {
                Some(job) => Value::entity(job.clone()),
                None => Value::Null,
            },
            _ => Value::Null,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "username" => self.username = value.to_option_string()?,
            "name" => self.name = value.to_option_string()?,
            "passwd" => self.passwd = value.to_option_string()?,
            "job" => self.job = value.to_option_entity()?,
            _ => return Err(Error::unknown_field("User", field)),
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Entity> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl Mapped for User {
    fn entity_def() -> &'static EntityDef {
        static DEF: LazyLock<EntityDef> = LazyLock::new(|| {
            EntityDef::builder("User")
                .table_named("Person")
                .field(FieldDef::scalar("username", Type::String).primary_key())
                .field(FieldDef::scalar("name", Type::String).column("firstName"))
                .field(FieldDef::scalar("passwd", Type::String))
                .field(FieldDef::foreign_key(
                    "job",
                    EntityRef::of::<Job>(),
                    "idJob:id",
                ))
                .build()
        });
        &DEF
    }
}

/// `publicationDate` carries a database-side default.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Post {
    pub id: Option<String>,
    pub publication_date: Option<chrono::DateTime<chrono::Utc>>,
    pub text: Option<String>,
}

impl Entity for Post {
    fn def(&self) -> &'static EntityDef {
        Self::entity_def()
    }

    fn get(&self, field: &str) -> Value {
        match field {
            "id" => self.id.clone().into(),
            "publication_date" => self.publication_date.into(),
            "text" => self.text.clone().into(),
            _ => Value::Null,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "id" => self.id = value.to_option_string()?,
            "publication_date" => self.publication_date = value.to_option_timestamp()?,
            "text" => self.text = value.to_option_string()?,
            _ => return Err(Error::unknown_field("Post", field)),
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Entity> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl Mapped for Post {
    fn entity_def() -> &'static EntityDef {
        static DEF: LazyLock<EntityDef> = LazyLock::new(|| {
            EntityDef::builder("Post")
                .table()
                .field(FieldDef::scalar("id", Type::String).primary_key())
                .field(
                    FieldDef::scalar("publication_date", Type::Timestamp)
                        .column("publicationDate")
                        .has_default(),
                )
                .field(FieldDef::scalar("text", Type::String))
                .build()
        });
        &DEF
    }
}

/// Composite primary key.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Enrollment {
    pub student: Option<String>,
    pub course: Option<i64>,
    pub grade: Option<f64>,
}

impl Entity for Enrollment {
    fn def(&self) -> &'static EntityDef {
        Self::entity_def()
    }

    fn get(&self, field: &str) -> Value {
        match field {
            "student" => self.student.clone().into(),
            "course" => self.course.into(),
            "grade" => self.grade.into(),
            _ => Value::Null,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "student" => self.student = value.to_option_string()?,
            "course" => self.course = value.to_option_i64()?,
            "grade" => self.grade = value.to_option_f64()?,
            _ => return Err(Error::unknown_field("Enrollment", field)),
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Entity> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl Mapped for Enrollment {
    fn entity_def() -> &'static EntityDef {
        static DEF: LazyLock<EntityDef> = LazyLock::new(|| {
            EntityDef::builder("Enrollment")
                .table()
                .field(FieldDef::scalar("student", Type::String).primary_key())
                .field(FieldDef::scalar("course", Type::I64).primary_key())
                .field(FieldDef::scalar("grade", Type::F64))
                .build()
        });
        &DEF
    }
}

/// No primary key declared; WHERE-requiring operations must refuse it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LogLine {
    pub message: Option<String>,
}

impl Entity for LogLine {
    fn def(&self) -> &'static EntityDef {
        Self::entity_def()
    }

    fn get(&self, field: &str) -> Value {
        match field {
            "message" => self.message.clone().into(),
            _ => Value::Null,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "message" => self.message = value.to_option_string()?,
            _ => return Err(Error::unknown_field("LogLine", field)),
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Entity> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl Mapped for LogLine {
    fn entity_def() -> &'static EntityDef {
        static DEF: LazyLock<EntityDef> = LazyLock::new(|| {
            EntityDef::builder("LogLine")
                .table_named("Log")
                .field(FieldDef::scalar("message", Type::String))
                .build()
        });
        &DEF
    }
}
