use crate::{
    data::{
        IdForm,
        form::{StudentField, StudentForm},
        student::StudentId,
    },
    error::RosterResult,
    manager::{EditOutcome, Notice, RemoveOutcome, SubmitOutcome, TableRefresh},
    maud_conveniences::{
        form_submit_button, gender_select, notice, render_table, render_table_body,
        simple_form_element, title,
    },
    state::RosterState,
    view::{FormView, TableView},
};
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

fn student_form_popup(form: &FormView) -> Markup {
    let values = &form.values;
    let errors = &form.errors;

    html! {
        @if form.open {
            div class="form-popup fixed inset-0 bg-black/60 flex items-center justify-center" {
                div class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full" {
                    (title(form.submit_label))
                    form id="studentForm" hx-post="/internal/students/submit" hx-target="#student_form" class="p-4" {
                        (simple_form_element(StudentField::FirstName, None, values, errors))
                        (simple_form_element(StudentField::MiddleName, None, values, errors))
                        (simple_form_element(StudentField::LastName, None, values, errors))
                        (simple_form_element(StudentField::Address, None, values, errors))
                        (gender_select(&values.gender, errors))
                        (simple_form_element(StudentField::HeightCm, None, values, errors))
                        (simple_form_element(StudentField::WeightKg, None, values, errors))
                        (simple_form_element(StudentField::DateOfBirth, Some("date"), values, errors))

                        div class="flex items-center justify-between" {
                            (form_submit_button(form.submit_label))
                            button type="button" id="closeForm" class="bg-gray-600 hover:bg-gray-700 font-bold py-2 px-4 rounded" hx-post="/internal/students/form/close" hx-target="#student_form" {
                                "Close"
                            }
                        }
                    }
                }
            }
        }
    }
}

///the main swap plus whatever notice and refreshed rows ride along out-of-band
fn with_side_effects(main: Markup, side_notice: Option<&Notice>, table: Option<TableRefresh>) -> Markup {
    html! {
        (main)
        @if let Some(side_notice) = side_notice {
            div id="notices" hx-swap-oob="innerHTML" {
                (notice(side_notice))
            }
        }
        @if let Some(TableRefresh::Current(table)) = table {
            tbody id="studentBody" hx-swap-oob="innerHTML" {
                (render_table_body(&table))
            }
        }
    }
}

fn table_response(refresh: TableRefresh, render: impl FnOnce(&TableView) -> Markup) -> Response {
    match refresh {
        TableRefresh::Current(table) => render(&table).into_response(),
        //htmx leaves the newer table alone on a 204
        TableRefresh::Superseded => StatusCode::NO_CONTENT.into_response(),
    }
}

#[derive(Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
}

pub async fn internal_get_students(
    State(state): State<RosterState>,
    Query(SearchQuery { q }): Query<SearchQuery>,
) -> RosterResult<Response> {
    let refresh = match q {
        Some(q) => state.search(&q).await,
        None => state.list().await?,
    };

    Ok(table_response(refresh, render_table_body))
}

pub async fn internal_get_students_table(State(state): State<RosterState>) -> RosterResult<Response> {
    Ok(table_response(state.list().await?, render_table))
}

pub async fn internal_get_new_form(State(state): State<RosterState>) -> Markup {
    student_form_popup(&state.begin_create())
}

pub async fn internal_post_close_form(State(state): State<RosterState>) -> Markup {
    student_form_popup(&state.close_form())
}

pub async fn internal_get_edit_form(
    State(state): State<RosterState>,
    Query(IdForm { id }): Query<IdForm>,
) -> RosterResult<Markup> {
    Ok(match state.begin_edit(id).await? {
        EditOutcome::Opened(form) => student_form_popup(&form),
        EditOutcome::NotLoaded(failure) => {
            with_side_effects(student_form_popup(&state.form_view()), Some(&failure), None)
        }
    })
}

pub async fn internal_post_submit(
    State(state): State<RosterState>,
    Form(form): Form<StudentForm>,
) -> Markup {
    match state.submit(form).await {
        SubmitOutcome::Invalid(form) | SubmitOutcome::Rejected(form) => student_form_popup(&form),
        SubmitOutcome::Saved {
            notice,
            table,
            form,
        } => with_side_effects(student_form_popup(&form), Some(&notice), table),
        SubmitOutcome::Unreachable { notice, form } => {
            with_side_effects(student_form_popup(&form), Some(&notice), None)
        }
    }
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    id: StudentId,
    #[serde(default)]
    confirmed: bool,
}

pub async fn delete_student(
    State(state): State<RosterState>,
    Query(DeleteQuery { id, confirmed }): Query<DeleteQuery>,
) -> RosterResult<Markup> {
    Ok(match state.remove(id, |_| confirmed).await? {
        RemoveOutcome::Declined => html! {},
        RemoveOutcome::Deleted {
            notice: deleted,
            table,
        } => with_side_effects(notice(&deleted), None, table),
        RemoveOutcome::Failed(failure) => notice(&failure),
    })
}
