//! Fakes for the remote students collection.

use crate::{
    api::{DeleteOutcome, StudentsApi, WriteOutcome},
    data::student::{NewStudent, StudentId, StudentRecord, WeightKg},
    error::{RosterError, RosterResult},
};
use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Default)]
struct FakeCollection {
    students: Vec<Value>,
    next_id: i64,
    list_failure: Option<StatusCode>,
    write_rejection: Option<Value>,
    delete_status: Option<StatusCode>,
    last_write_body: Option<Value>,
}

type SharedCollection = Arc<Mutex<FakeCollection>>;

/// A throwaway HTTP server shaped like `/api/students/`, on a random port.
pub struct FakeStudentsServer {
    base_url: String,
    collection: SharedCollection,
}

impl FakeStudentsServer {
    pub async fn start() -> Self {
        let collection = SharedCollection::default();
        let app = Router::new()
            .route("/api/students/", get(list).post(create))
            .route(
                "/api/students/{id}/",
                get(fetch).patch(patch).delete(remove),
            )
            .with_state(collection.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            collection,
        }
    }

    pub fn students_url(&self) -> String {
        format!("{}/api/students/", self.base_url)
    }

    pub fn seed(&self, students: Value) {
        let mut collection = self.collection.lock().unwrap();
        let Value::Array(students) = students else {
            panic!("seed with an array");
        };
        collection.next_id = students
            .iter()
            .filter_map(|s| s["id"].as_i64())
            .max()
            .unwrap_or(0);
        collection.students = students;
    }

    pub fn fail_list(&self, status: StatusCode) {
        self.collection.lock().unwrap().list_failure = Some(status);
    }

    pub fn reject_writes(&self, body: Value) {
        self.collection.lock().unwrap().write_rejection = Some(body);
    }

    pub fn delete_status(&self, status: StatusCode) {
        self.collection.lock().unwrap().delete_status = Some(status);
    }

    pub fn last_write_body(&self) -> Option<Value> {
        self.collection.lock().unwrap().last_write_body.clone()
    }
}

async fn list(State(collection): State<SharedCollection>) -> Response {
    let collection = collection.lock().unwrap();
    if let Some(status) = collection.list_failure {
        return (status, "list unavailable").into_response();
    }
    Json(Value::Array(collection.students.clone())).into_response()
}

async fn create(State(collection): State<SharedCollection>, Json(body): Json<Value>) -> Response {
    let mut collection = collection.lock().unwrap();
    collection.last_write_body = Some(body.clone());
    if let Some(rejection) = collection.write_rejection.clone() {
        return (StatusCode::BAD_REQUEST, Json(rejection)).into_response();
    }

    collection.next_id += 1;
    let mut record = body;
    record["id"] = json!(collection.next_id);
    collection.students.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn fetch(State(collection): State<SharedCollection>, Path(id): Path<i64>) -> Response {
    let collection = collection.lock().unwrap();
    collection
        .students
        .iter()
        .find(|s| s["id"] == json!(id))
        .map_or_else(
            || StatusCode::NOT_FOUND.into_response(),
            |s| Json(s.clone()).into_response(),
        )
}

async fn patch(
    State(collection): State<SharedCollection>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut collection = collection.lock().unwrap();
    collection.last_write_body = Some(body.clone());
    if let Some(rejection) = collection.write_rejection.clone() {
        return (StatusCode::BAD_REQUEST, Json(rejection)).into_response();
    }

    let Some(existing) = collection.students.iter_mut().find(|s| s["id"] == json!(id)) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let (Value::Object(existing), Value::Object(changes)) = (&mut *existing, body) {
        existing.extend(changes);
    }
    Json(existing.clone()).into_response()
}

async fn remove(State(collection): State<SharedCollection>, Path(id): Path<i64>) -> StatusCode {
    let mut collection = collection.lock().unwrap();
    if let Some(status) = collection.delete_status {
        return status;
    }

    let before = collection.students.len();
    collection.students.retain(|s| s["id"] != json!(id));
    if collection.students.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

/// In-memory `StudentsApi` that records every call it sees.
#[derive(Default)]
pub struct FakeApi {
    pub students: Mutex<Vec<StudentRecord>>,
    pub calls: Mutex<Vec<&'static str>>,
    pub writes: Mutex<Vec<NewStudent>>,
    pub list_failure: Mutex<Option<StatusCode>>,
    pub write_outcome: Mutex<Option<WriteOutcome>>,
    pub delete_status: Mutex<Option<StatusCode>>,
}

impl FakeApi {
    pub fn with_students(students: Vec<StudentRecord>) -> Self {
        Self {
            students: Mutex::new(students),
            ..Self::default()
        }
    }

    pub fn calls_to(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == name).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }
}

#[async_trait]
impl StudentsApi for FakeApi {
    async fn list(&self) -> RosterResult<Vec<StudentRecord>> {
        self.record("list");
        if let Some(status) = *self.list_failure.lock().unwrap() {
            return Err(RosterError::UnexpectedStatus {
                status,
                what: "the student list",
            });
        }
        Ok(self.students.lock().unwrap().clone())
    }

    async fn get(&self, id: StudentId) -> RosterResult<Option<StudentRecord>> {
        self.record("get");
        Ok(self
            .students
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn create(&self, student: &NewStudent) -> RosterResult<WriteOutcome> {
        self.record("create");
        self.writes.lock().unwrap().push(student.clone());
        Ok(self
            .write_outcome
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(WriteOutcome::Saved(None)))
    }

    async fn update(&self, _id: StudentId, student: &NewStudent) -> RosterResult<WriteOutcome> {
        self.record("update");
        self.writes.lock().unwrap().push(student.clone());
        Ok(self
            .write_outcome
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(WriteOutcome::Saved(None)))
    }

    async fn delete(&self, id: StudentId) -> RosterResult<DeleteOutcome> {
        self.record("delete");
        let status = self.delete_status.lock().unwrap().unwrap_or_else(|| {
            let mut students = self.students.lock().unwrap();
            let before = students.len();
            students.retain(|s| s.id != id);
            if students.len() == before {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::NO_CONTENT
            }
        });

        Ok(if status == StatusCode::NO_CONTENT {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::Refused(status)
        })
    }
}

pub fn student(id: i64, first_name: &str, last_name: &str, address: &str) -> StudentRecord {
    StudentRecord {
        id: StudentId(id),
        first_name: first_name.into(),
        middle_name: None,
        last_name: last_name.into(),
        address: address.into(),
        gender: "F".into(),
        height_cm: 160,
        weight_kg: WeightKg::from(55.5),
        date_of_birth: "2001-05-09".into(),
    }
}
