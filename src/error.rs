use crate::data::student::StudentId;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse students API URL {:?}", original))]
    ParseApiUrl {
        source: url::ParseError,
        original: String,
    },
    #[snafu(display("Students API URL {:?} must end with a `/`", original))]
    ApiUrlMissingTrailingSlash { original: String },
    #[snafu(display("Unable to build HTTP client"))]
    BuildClient { source: reqwest::Error },
    #[snafu(display("Error reaching the students API: {}", source))]
    Transport { source: reqwest::Error },
    #[snafu(display("Error decoding students API response"))]
    Decode { source: reqwest::Error },
    #[snafu(display("Students API answered {} for {}", status, what))]
    UnexpectedStatus {
        status: StatusCode,
        what: &'static str,
    },
    #[snafu(display("Unable to build URL for student {}", id))]
    StudentUrl {
        source: url::ParseError,
        id: StudentId,
    },
}

impl IntoResponse for RosterError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const BG: StatusCode = StatusCode::BAD_GATEWAY; //upstream api misbehaved

        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Roster Error"}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::BadEnvVar { .. } => ISE,
            Self::ParseApiUrl { .. } | Self::ApiUrlMissingTrailingSlash { .. } => ISE,
            Self::BuildClient { .. } => ISE,
            Self::Transport { .. } | Self::Decode { .. } => BG,
            Self::UnexpectedStatus { .. } => BG,
            Self::StudentUrl { .. } => ISE,
        };

        error!(?self, "Error!");
        (status_code, Html(basic_error(self.to_string()))).into_response()
    }
}
