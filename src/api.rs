//! The remote students collection, as seen from the record manager.

use crate::{
    data::{
        form::FieldErrors,
        student::{NewStudent, StudentId, StudentRecord},
    },
    error::RosterResult,
};
use async_trait::async_trait;
use axum::http::StatusCode;

pub mod http;

#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    ///the api accepted the write, and echoed the record back if it could be decoded
    Saved(Option<StudentRecord>),
    ///the api refused the write with a field-keyed error map
    Rejected(FieldErrors),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    ///anything other than `204 No Content`
    Refused(StatusCode),
}

/// List, get, create, partial-update and delete against one collection.
///
/// Transport failures are `Err`. Non-success statuses are `Err` on the list
/// path, `Ok(None)` for `get`, and structured outcomes for writes.
#[async_trait]
pub trait StudentsApi: Send + Sync {
    async fn list(&self) -> RosterResult<Vec<StudentRecord>>;
    async fn get(&self, id: StudentId) -> RosterResult<Option<StudentRecord>>;
    async fn create(&self, student: &NewStudent) -> RosterResult<WriteOutcome>;
    async fn update(&self, id: StudentId, student: &NewStudent) -> RosterResult<WriteOutcome>;
    async fn delete(&self, id: StudentId) -> RosterResult<DeleteOutcome>;
}
