use crate::{
    data::{
        form::{FieldErrors, StudentField, StudentForm},
        student::GENDER_OPTIONS,
    },
    manager::Notice,
    view::{COLUMNS, StudentRow, TableView},
};
use maud::{Markup, Render, html};

const INPUT_CLASSES: &str = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

///the slot a field's message lands in, present (if empty) for every field
pub fn error_slot(field: StudentField, errors: &FieldErrors) -> Markup {
    html! {
        p class="error text-red-400 text-sm mt-1" data-for=(field.name()) {
            @if let Some(message) = errors.get(field) {
                (message)
            }
        }
    }
}

pub fn form_element(field: StudentField, errors: &FieldErrors, input: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(field.name()) class="block text-sm font-bold mb-2 text-gray-300" {(field.label())}
            (input)
            (error_slot(field, errors))
        }
    }
}

pub fn simple_form_element(
    field: StudentField,
    input_type: Option<&str>,
    values: &StudentForm,
    errors: &FieldErrors,
) -> Markup {
    form_element(
        field,
        errors,
        html! {
            input type=(input_type.unwrap_or("text")) id=(field.name()) name=(field.name()) value=(values.value(field)) class=(INPUT_CLASSES);
        },
    )
}

pub fn gender_select(selected: &str, errors: &FieldErrors) -> Markup {
    //records from the api may carry a value the select doesn't offer
    let unlisted = !selected.is_empty() && GENDER_OPTIONS.iter().all(|(value, _)| *value != selected);

    form_element(
        StudentField::Gender,
        errors,
        html! {
            select id="gender" name="gender" class=(INPUT_CLASSES) {
                option value="" selected[selected.is_empty()] {"Select gender"}
                @for (value, label) in GENDER_OPTIONS {
                    option value=(value) selected[selected == value] {(label)}
                }
                @if unlisted {
                    option value=(selected) selected {(selected)}
                }
            }
        },
    )
}

pub fn form_submit_button(text: &str) -> Markup {
    html! {
        button type="submit" id="submitStudentBtn" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
            (text)
        }
    }
}

pub fn notice(notice: &Notice) -> Markup {
    let classes = if notice.is_success() {
        "bg-green-100 border border-green-400 text-green-700 px-4 py-3 rounded relative mb-4"
    } else {
        "bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4"
    };

    html! {
        div class=(classes) role="alert" {
            span {(notice.message())}
        }
    }
}

fn student_row(row: &StudentRow) -> Markup {
    let id = row.id.to_string();
    let id_vals = format!("{{\"id\": {id}}}");
    let delete_vals = format!("{{\"id\": {id}, \"confirmed\": true}}");

    html! {
        tr {
            @for col in [&id, &row.full_name, &row.address, &row.gender, &row.height_cm, &row.weight_kg, &row.date_of_birth] {
                td class="py-2 px-4 border-b border-gray-600 text-gray-200" {(col)}
            }
            td class="py-2 px-4 border-b border-gray-600 text-gray-200 space-x-2" {
                button class="bg-slate-600 hover:bg-slate-800 font-bold py-1 px-3 rounded" hx-get="/internal/students/edit" hx-vals=(id_vals) hx-target="#student_form" {
                    "Edit"
                }
                button class="bg-red-600 hover:bg-red-800 font-bold py-1 px-3 rounded" hx-delete="/internal/students" hx-vals=(delete_vals) hx-confirm="Are you sure you want to delete this student?" hx-target="#notices" {
                    "Delete"
                }
            }
        }
    }
}

///only the `tbody` contents, so that the table can be swapped wholesale
pub fn render_table_body(table: &TableView) -> Markup {
    html! {
        @match table {
            TableView::Rows(rows) => {
                @for row in rows {
                    (student_row(row))
                }
            },
            other => {
                tr {
                    td colspan=(COLUMNS.len()) class="py-2 px-4 text-center italic text-gray-300" {
                        (other.sentinel_message().unwrap_or_default())
                    }
                }
            }
        }
    }
}

pub fn render_table(table: &TableView) -> Markup {
    html! {
        div class="overflow-x-auto" {
            table class="min-w-full bg-gray-800 rounded shadow-md" {
                thead class="bg-gray-700" {
                    tr {
                        @for title in COLUMNS {
                            th class="py-2 px-4 text-left font-semibold text-gray-300" {(title)}
                        }
                    }
                }
                tbody id="studentBody" {
                    (render_table_body(table))
                }
            }
        }
    }
}
