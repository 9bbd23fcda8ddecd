use crate::error::{ApiUrlMissingTrailingSlashSnafu, BadEnvVarSnafu, ParseApiUrlSnafu, RosterResult};
use dotenvy::var;
use reqwest::Url;
use snafu::{ResultExt, ensure};
use std::sync::Arc;

pub const DEFAULT_API_URL: &str = "https://threeb-final-lab1.onrender.com/api/students/";
pub const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    api_config: Arc<ApiConfig>,
    server_ip: String,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        let server_ip = optional_env_var("ROSTER_SERVER_IP")?
            .unwrap_or_else(|| DEFAULT_SERVER_IP.to_string());

        Ok(Self {
            api_config: Arc::new(ApiConfig::new()?),
            server_ip,
        })
    }

    #[cfg(test)]
    pub fn for_api(api_config: ApiConfig) -> Self {
        Self {
            api_config: Arc::new(api_config),
            server_ip: "127.0.0.1:0".to_string(),
        }
    }

    pub fn api_config(&self) -> Arc<ApiConfig> {
        self.api_config.clone()
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }
}

#[derive(Debug)]
pub struct ApiConfig {
    students_url: Url,
}

impl ApiConfig {
    pub fn new() -> RosterResult<Self> {
        let raw = optional_env_var("ROSTER_API_URL")?.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::from_raw(raw)
    }

    ///the collection URL, which has to end in a slash so that `{id}/` joins underneath it
    pub fn from_raw(raw: String) -> RosterResult<Self> {
        let raw = raw.trim().to_string();
        ensure!(
            raw.ends_with('/'),
            ApiUrlMissingTrailingSlashSnafu { original: raw }
        );
        let students_url = Url::parse(&raw).context(ParseApiUrlSnafu { original: raw })?;

        Ok(Self { students_url })
    }

    pub fn students_url(&self) -> &Url {
        &self.students_url
    }
}

fn optional_env_var(name: &'static str) -> RosterResult<Option<String>> {
    match var(name) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(e) => Err(e).context(BadEnvVarSnafu { name }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;

    #[test]
    fn default_api_url_is_valid() {
        let config = ApiConfig::from_raw(DEFAULT_API_URL.to_string()).unwrap();
        assert_eq!(config.students_url().path(), "/api/students/");
    }

    #[test]
    fn api_url_is_trimmed() {
        let config = ApiConfig::from_raw("  http://localhost:8000/api/students/\n".into()).unwrap();
        assert_eq!(config.students_url().as_str(), "http://localhost:8000/api/students/");
    }

    #[test]
    fn api_url_needs_trailing_slash() {
        let err = ApiConfig::from_raw("http://localhost:8000/api/students".into()).unwrap_err();
        assert!(matches!(err, RosterError::ApiUrlMissingTrailingSlash { .. }));
    }

    #[test]
    fn api_url_must_parse() {
        let err = ApiConfig::from_raw("not a url/".into()).unwrap_err();
        assert!(matches!(err, RosterError::ParseApiUrl { .. }));
    }
}
