//! Markup-free view-models the record manager hands to the presentation layer.

use crate::data::{
    form::{FieldErrors, StudentForm},
    student::{StudentId, StudentRecord},
};

pub const COLUMNS: [&str; 8] = [
    "ID",
    "Name",
    "Address",
    "Gender",
    "Height (cm)",
    "Weight (kg)",
    "Date of Birth",
    "Actions",
];

pub const NO_RESULTS_MESSAGE: &str = "No students found.";
pub const SEARCH_FAILED_MESSAGE: &str = "Error loading search results.";

#[derive(Clone, Debug, PartialEq)]
pub struct StudentRow {
    pub id: StudentId,
    pub full_name: String,
    pub address: String,
    pub gender: String,
    pub height_cm: String,
    pub weight_kg: String,
    pub date_of_birth: String,
}

impl From<&StudentRecord> for StudentRow {
    fn from(record: &StudentRecord) -> Self {
        Self {
            id: record.id,
            full_name: record.full_name(),
            address: record.address.clone(),
            gender: record.gender.clone(),
            height_cm: record.height_cm.to_string(),
            weight_kg: record.weight_kg.to_string(),
            date_of_birth: record.date_of_birth.clone(),
        }
    }
}

pub fn render_rows(records: &[StudentRecord]) -> Vec<StudentRow> {
    records.iter().map(StudentRow::from).collect()
}

#[derive(Clone, Debug, PartialEq)]
pub enum TableView {
    Rows(Vec<StudentRow>),
    ///a single row spanning every column instead of an empty body
    NoResults,
    Failed,
}

impl TableView {
    pub fn sentinel_message(&self) -> Option<&'static str> {
        match self {
            Self::Rows(_) => None,
            Self::NoResults => Some(NO_RESULTS_MESSAGE),
            Self::Failed => Some(SEARCH_FAILED_MESSAGE),
        }
    }
}

/// What the form popup should currently show.
#[derive(Clone, Debug, PartialEq)]
pub struct FormView {
    pub submit_label: &'static str,
    pub values: StudentForm,
    pub errors: FieldErrors,
    pub open: bool,
}
