use crate::{maud_conveniences::title, state::RosterState};
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_index_route(State(state): State<RosterState>) -> Markup {
    state.render(html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-6xl w-full flex flex-col space-y-4" {
            div class="flex flex-row items-center justify-between" {
                (title("Students"))
                button id="addStudentBtn" class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded" hx-get="/internal/students/form" hx-target="#student_form" {
                    "Add Student"
                }
            }
            div id="notices" {}
            input type="search" name="q" placeholder="Search by name or address..." hx-get="/internal/students" hx-trigger="input changed, keyup[key=='Enter']" hx-target="#studentBody" hx-sync="this:replace" class="search shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";
            div id="student_form" {}
            div id="student_table" hx-get="/internal/students/table" hx-trigger="load" {}
        }
    })
}
