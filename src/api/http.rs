use crate::{
    api::{DeleteOutcome, StudentsApi, WriteOutcome},
    config::ApiConfig,
    data::{
        form::FieldErrors,
        student::{NewStudent, StudentId, StudentRecord},
    },
    error::{
        BuildClientSnafu, DecodeSnafu, RosterResult, StudentUrlSnafu, TransportSnafu,
        UnexpectedStatusSnafu,
    },
};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use snafu::{ResultExt, ensure};
use std::collections::HashMap;

/// `reqwest`-backed client for a `/api/students/`-shaped collection.
///
/// No timeout is configured: a hung api leaves the calling handler pending.
#[derive(Clone, Debug)]
pub struct HttpStudentsApi {
    students_url: Url,
    client: Client,
}

impl HttpStudentsApi {
    pub fn new(config: &ApiConfig) -> RosterResult<Self> {
        let client = Client::builder().build().context(BuildClientSnafu)?;
        Ok(Self {
            students_url: config.students_url().clone(),
            client,
        })
    }

    fn student_url(&self, id: StudentId) -> RosterResult<Url> {
        self.students_url
            .join(&format!("{id}/"))
            .context(StudentUrlSnafu { id })
    }

    async fn write_outcome(response: Response) -> WriteOutcome {
        let status = response.status();
        if status.is_success() {
            return match response.json::<StudentRecord>().await {
                Ok(record) => WriteOutcome::Saved(Some(record)),
                Err(e) => {
                    debug!(?e, "write succeeded but the echoed record didn't decode");
                    WriteOutcome::Saved(None)
                }
            };
        }

        match response.json::<HashMap<String, Vec<String>>>().await {
            Ok(payload) => WriteOutcome::Rejected(FieldErrors::from_server(payload)),
            Err(e) => {
                warn!(?e, %status, "write rejected without a field error map");
                WriteOutcome::Rejected(FieldErrors::default())
            }
        }
    }
}

#[async_trait]
impl StudentsApi for HttpStudentsApi {
    async fn list(&self) -> RosterResult<Vec<StudentRecord>> {
        debug!(url = %self.students_url, "listing students");
        let response = self
            .client
            .get(self.students_url.clone())
            .send()
            .await
            .context(TransportSnafu)?;

        let status = response.status();
        ensure!(
            status.is_success(),
            UnexpectedStatusSnafu {
                status,
                what: "the student list"
            }
        );

        response.json().await.context(DecodeSnafu)
    }

    async fn get(&self, id: StudentId) -> RosterResult<Option<StudentRecord>> {
        let url = self.student_url(id)?;
        debug!(%url, "fetching student");
        let response = self.client.get(url).send().await.context(TransportSnafu)?;

        if !response.status().is_success() {
            warn!(%id, status = %response.status(), "unable to load student");
            return Ok(None);
        }

        response.json().await.context(DecodeSnafu).map(Some)
    }

    async fn create(&self, student: &NewStudent) -> RosterResult<WriteOutcome> {
        debug!(url = %self.students_url, "creating student");
        let response = self
            .client
            .post(self.students_url.clone())
            .json(student)
            .send()
            .await
            .context(TransportSnafu)?;

        Ok(Self::write_outcome(response).await)
    }

    async fn update(&self, id: StudentId, student: &NewStudent) -> RosterResult<WriteOutcome> {
        let url = self.student_url(id)?;
        debug!(%url, "updating student");
        let response = self
            .client
            .patch(url)
            .json(student)
            .send()
            .await
            .context(TransportSnafu)?;

        Ok(Self::write_outcome(response).await)
    }

    async fn delete(&self, id: StudentId) -> RosterResult<DeleteOutcome> {
        let url = self.student_url(id)?;
        debug!(%url, "deleting student");
        let response = self.client.delete(url).send().await.context(TransportSnafu)?;

        Ok(match response.status() {
            StatusCode::NO_CONTENT => DeleteOutcome::Deleted,
            other => DeleteOutcome::Refused(other),
        })
    }
}
