use serde::Deserialize;

pub mod form;
pub mod student;

#[derive(Deserialize)]
pub struct IdForm {
    pub id: student::StudentId,
}
