use crate::{
    api::{DeleteOutcome, StudentsApi, WriteOutcome},
    data::{
        form::{FieldErrors, StudentForm},
        student::StudentId,
    },
    error::{RosterError, RosterResult},
    view::{FormView, TableView, render_rows},
};
use std::sync::{
    Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU64, Ordering},
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Creating,
    Editing(StudentId),
}

impl EditMode {
    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::Creating => "Add Student",
            Self::Editing(_) => "Update Student",
        }
    }
}

/// Everything the manager remembers between calls. Nothing here outlives the process.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub mode: EditMode,
    pub values: StudentForm,
    pub errors: FieldErrors,
    pub form_open: bool,
}

impl Session {
    pub fn form_view(&self) -> FormView {
        FormView {
            submit_label: self.mode.submit_label(),
            values: self.values.clone(),
            errors: self.errors.clone(),
            open: self.form_open,
        }
    }

    fn reset_form(&mut self) {
        self.values = StudentForm::default();
        self.errors.clear();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    StudentAdded,
    StudentUpdated,
    StudentDeleted,
    LoadFailed,
    DeleteFailed,
    NetworkError(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Self::StudentAdded => "Student added successfully!".into(),
            Self::StudentUpdated => "Student updated successfully!".into(),
            Self::StudentDeleted => "Student deleted successfully!".into(),
            Self::LoadFailed => "Failed to load student data.".into(),
            Self::DeleteFailed => "Failed to delete student.".into(),
            Self::NetworkError(message) => format!("Network error: {message}"),
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(
            self,
            Self::StudentAdded | Self::StudentUpdated | Self::StudentDeleted
        )
    }
}

/// A table fetched for a given ticket. Responses that come back after a newer
/// table was already published are dropped rather than shown.
#[derive(Clone, Debug, PartialEq)]
pub enum TableRefresh {
    Current(TableView),
    Superseded,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EditOutcome {
    Opened(FormView),
    NotLoaded(Notice),
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    ///local validation failed, nothing was sent
    Invalid(FormView),
    ///the api refused the write with field errors
    Rejected(FormView),
    Saved {
        notice: Notice,
        table: Option<TableRefresh>,
        form: FormView,
    },
    ///the request never got an answer; mode and popup are left as they were
    Unreachable { notice: Notice, form: FormView },
}

#[derive(Clone, Debug, PartialEq)]
pub enum RemoveOutcome {
    Declined,
    Deleted {
        notice: Notice,
        table: Option<TableRefresh>,
    },
    Failed(Notice),
}

/// Drives one form-and-table session against a remote students collection.
pub struct StudentRecordManager<A> {
    api: A,
    session: Mutex<Session>,
    issued_tickets: AtomicU64,
    published_ticket: AtomicU64,
}

impl<A: StudentsApi> StudentRecordManager<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            session: Mutex::new(Session::default()),
            issued_tickets: AtomicU64::new(0),
            published_ticket: AtomicU64::new(0),
        }
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub fn mode(&self) -> EditMode {
        self.session().mode
    }

    pub fn form_view(&self) -> FormView {
        self.session().form_view()
    }

    fn issue_ticket(&self) -> u64 {
        self.issued_tickets.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn publish(&self, ticket: u64, table: TableView) -> TableRefresh {
        let newest = self.published_ticket.fetch_max(ticket, Ordering::SeqCst);
        if newest > ticket {
            debug!(ticket, newest, "dropping superseded table");
            TableRefresh::Superseded
        } else {
            TableRefresh::Current(table)
        }
    }

    /// Every record, in the order the api gave them.
    pub async fn list(&self) -> RosterResult<TableRefresh> {
        let ticket = self.issue_ticket();
        let students = self.api.list().await?;
        Ok(self.publish(ticket, TableView::Rows(render_rows(&students))))
    }

    /// Case-insensitive substring search over full name and address.
    pub async fn search(&self, query: &str) -> TableRefresh {
        let ticket = self.issue_ticket();
        let query = query.trim().to_lowercase();

        let students = match self.api.list().await {
            Ok(students) => students,
            Err(e) => {
                error!(?e, "Error loading search results");
                return self.publish(ticket, TableView::Failed);
            }
        };

        let matching: Vec<_> = students
            .into_iter()
            .filter(|student| query.is_empty() || student.matches(&query))
            .collect();

        let table = if matching.is_empty() {
            TableView::NoResults
        } else {
            TableView::Rows(render_rows(&matching))
        };
        self.publish(ticket, table)
    }

    pub fn begin_create(&self) -> FormView {
        let mut session = self.session();
        session.mode = EditMode::Creating;
        session.reset_form();
        session.form_open = true;
        session.form_view()
    }

    pub async fn begin_edit(&self, id: StudentId) -> RosterResult<EditOutcome> {
        let Some(student) = self.api.get(id).await? else {
            return Ok(EditOutcome::NotLoaded(Notice::LoadFailed));
        };

        let mut session = self.session();
        session.mode = EditMode::Editing(id);
        session.values = StudentForm::from(&student);
        session.form_open = true;
        Ok(EditOutcome::Opened(session.form_view()))
    }

    pub fn close_form(&self) -> FormView {
        let mut session = self.session();
        session.form_open = false;
        session.form_view()
    }

    /// Validates `form` and sends it as a create or an update depending on the current mode.
    pub async fn submit(&self, form: StudentForm) -> SubmitOutcome {
        let (mode, student) = {
            let mut session = self.session();
            session.errors.clear();
            session.values = form;
            match session.values.validate() {
                Ok(student) => (session.mode, student),
                Err(e) => {
                    session.errors = FieldErrors::from(e);
                    return SubmitOutcome::Invalid(session.form_view());
                }
            }
        };

        let sent = match mode {
            EditMode::Creating => self.api.create(&student).await,
            EditMode::Editing(id) => self.api.update(id, &student).await,
        };

        match sent {
            Ok(WriteOutcome::Saved(echoed)) => {
                info!(?mode, id = ?echoed.map(|s| s.id), "saved student");
                let notice = match mode {
                    EditMode::Creating => Notice::StudentAdded,
                    EditMode::Editing(_) => Notice::StudentUpdated,
                };
                let table = self.reload().await;

                let mut session = self.session();
                session.reset_form();
                session.form_open = false;
                if matches!(mode, EditMode::Editing(_)) {
                    session.mode = EditMode::Creating;
                }
                SubmitOutcome::Saved {
                    notice,
                    table,
                    form: session.form_view(),
                }
            }
            Ok(WriteOutcome::Rejected(errors)) => {
                let mut session = self.session();
                session.errors = errors;
                SubmitOutcome::Rejected(session.form_view())
            }
            Err(e) => {
                warn!(?e, ?mode, "unable to send student");
                let message = match e {
                    RosterError::Transport { source } => source.to_string(),
                    other => other.to_string(),
                };
                SubmitOutcome::Unreachable {
                    notice: Notice::NetworkError(message),
                    form: self.form_view(),
                }
            }
        }
    }

    /// Deletes a student once `confirm` agrees. Declining sends nothing.
    pub async fn remove(
        &self,
        id: StudentId,
        confirm: impl FnOnce(StudentId) -> bool,
    ) -> RosterResult<RemoveOutcome> {
        if !confirm(id) {
            return Ok(RemoveOutcome::Declined);
        }

        match self.api.delete(id).await? {
            DeleteOutcome::Deleted => Ok(RemoveOutcome::Deleted {
                notice: Notice::StudentDeleted,
                table: self.reload().await,
            }),
            DeleteOutcome::Refused(status) => {
                warn!(%id, %status, "student was not deleted");
                Ok(RemoveOutcome::Failed(Notice::DeleteFailed))
            }
        }
    }

    ///`None` when the list fails; the table is left as it was
    async fn reload(&self) -> Option<TableRefresh> {
        match self.list().await {
            Ok(table) => Some(table),
            Err(e) => {
                warn!(?e, "unable to reload students after a change");
                None
            }
        }
    }
}
