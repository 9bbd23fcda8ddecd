use crate::{
    routes::{
        index::get_index_route,
        students::{
            delete_student, internal_get_edit_form, internal_get_new_form, internal_get_students,
            internal_get_students_table, internal_post_close_form, internal_post_submit,
        },
    },
    state::RosterState,
};
use axum::{
    Router,
    routing::{get, post},
};

pub mod index;
pub mod students;

pub fn router(state: RosterState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route(
            "/internal/students",
            get(internal_get_students).delete(delete_student),
        )
        .route("/internal/students/table", get(internal_get_students_table))
        .route("/internal/students/form", get(internal_get_new_form))
        .route("/internal/students/form/close", post(internal_post_close_form))
        .route("/internal/students/edit", get(internal_get_edit_form))
        .route("/internal/students/submit", post(internal_post_submit))
        .with_state(state)
}
