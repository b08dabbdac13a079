use crate::error::{ClientError, Result};
use reqwest::Url;
use std::fmt;
use std::str::FromStr;

pub const LOCAL_BACKEND: &str = "http://localhost:8000";
pub const RUN_PATH: &str = "/hackrx/run";

/// Which request/response schema the backend speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendContract {
    /// `/upload_pdf` + JSON `/ask_question`, identifier field `filename`.
    Json,
    /// `/upload/` + URL-encoded `/ask/`, identifier field `file_id`.
    #[default]
    Form,
}

impl BackendContract {
    pub fn name(&self) -> &'static str {
        match self {
            BackendContract::Json => "json",
            BackendContract::Form => "form",
        }
    }

    pub fn upload_path(&self) -> &'static str {
        match self {
            BackendContract::Json => "/upload_pdf",
            BackendContract::Form => "/upload/",
        }
    }

    pub fn ask_path(&self) -> &'static str {
        match self {
            BackendContract::Json => "/ask_question",
            BackendContract::Form => "/ask/",
        }
    }

    pub fn batch_ask_path(&self) -> Option<&'static str> {
        match self {
            BackendContract::Json => None,
            BackendContract::Form => Some("/batch-ask/"),
        }
    }
}

impl fmt::Display for BackendContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendContract {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(BackendContract::Json),
            "form" => Ok(BackendContract::Form),
            other => Err(ClientError::Config(format!(
                "unknown backend contract '{}', expected 'json' or 'form'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    pub contract: BackendContract,
    pub api_token: Option<String>,
}

impl ClientConfig {
    /// Resolve the backend address from the origin the client is served from.
    pub fn new(origin: Option<&str>, contract: BackendContract, api_token: Option<String>) -> Result<Self> {
        Ok(Self {
            base_url: resolve_base_url(origin)?,
            contract,
            api_token,
        })
    }

    /// Talk to `base_url` directly, skipping origin resolution.
    pub fn with_base_url(base_url: &str, contract: BackendContract) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("invalid backend url '{}': {}", base_url, e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            contract,
            api_token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Local development hosts map to the local backend; any other URL is reduced to its origin.
pub fn resolve_base_url(origin: Option<&str>) -> Result<String> {
    let origin = match origin.map(str::trim).filter(|o| !o.is_empty()) {
        Some(origin) => origin,
        None => return Ok(LOCAL_BACKEND.to_string()),
    };

    let url = Url::parse(origin)
        .map_err(|e| ClientError::Config(format!("invalid origin '{}': {}", origin, e)))?;

    match url.host_str() {
        Some("localhost") | Some("127.0.0.1") | Some("[::1]") => Ok(LOCAL_BACKEND.to_string()),
        Some(_) => Ok(url.origin().ascii_serialization()),
        None => Err(ClientError::Config(format!("origin '{}' has no host", origin))),
    }
}
