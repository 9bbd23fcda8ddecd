use crate::{
    api::http::HttpStudentsApi, config::RuntimeConfiguration, error::RosterResult,
    manager::StudentRecordManager,
};
use maud::{DOCTYPE, Markup, html};
use std::{ops::Deref, sync::Arc};

pub type Manager = StudentRecordManager<HttpStudentsApi>;

#[derive(Clone)]
pub struct RosterState {
    manager: Arc<Manager>,
    config: RuntimeConfiguration,
}

impl RosterState {
    pub fn new(config: RuntimeConfiguration) -> RosterResult<Self> {
        let api = HttpStudentsApi::new(&config.api_config())?;
        info!(url = %config.api_config().students_url(), "Using students API");

        Ok(Self {
            manager: Arc::new(StudentRecordManager::new(api)),
            config,
        })
    }

    pub fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    #[allow(clippy::unused_self)] //in case self is ever needed :)
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Roster" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center justify-center text-white" {
                    (markup)
                }
            }
        }
    }
}

impl Deref for RosterState {
    type Target = Manager;

    fn deref(&self) -> &Self::Target {
        &self.manager
    }
}
