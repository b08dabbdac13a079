use crate::config::{BackendContract, ClientConfig};
use crate::error::{ClientError, Result};
use crate::models::*;
use reqwest::Client;

pub struct QuestionService {
    client: Client,
    config: ClientConfig,
}

impl QuestionService {
    pub fn new(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn contract(&self) -> BackendContract {
        self.config.contract
    }

    /// Ask one question scoped to `identifier`. An empty answer counts as no answer.
    pub async fn ask(&self, question: &str, identifier: &str) -> Result<Option<String>> {
        let endpoint = self.config.endpoint(self.config.contract.ask_path());
        log::info!("Asking {} (document {})", endpoint, identifier);

        let request = self.client.post(&endpoint);
        let request = match self.config.contract {
            BackendContract::Json => request.json(&AskJsonRequest {
                question: question.to_string(),
                filename_filter: identifier.to_string(),
            }),
            BackendContract::Form => request.form(&AskFormRequest {
                question: question.to_string(),
                file_id: identifier.to_string(),
            }),
        };

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::transport(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint,
                status,
                detail: None,
            });
        }

        let body: AskResponse = response
            .json()
            .await
            .map_err(|e| ClientError::malformed(&endpoint, e.to_string()))?;

        Ok(body.answer.filter(|a| !a.is_empty()))
    }

    /// Ask several questions in one round trip. Only the form contract exposes this.
    pub async fn ask_batch(&self, questions: &[String], identifier: &str) -> Result<AnswerSet> {
        let path = self
            .config
            .contract
            .batch_ask_path()
            .ok_or(ClientError::Unsupported("batch ask", self.config.contract.name()))?;
        let endpoint = self.config.endpoint(path);

        log::info!("Asking {} questions at {} (document {})", questions.len(), endpoint, identifier);

        let response = self
            .client
            .post(&endpoint)
            .query(&[("file_id", identifier)])
            .json(questions)
            .send()
            .await
            .map_err(|e| ClientError::transport(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint,
                status,
                detail: None,
            });
        }

        let body: AnswersResponse = response
            .json()
            .await
            .map_err(|e| ClientError::malformed(&endpoint, e.to_string()))?;

        Ok(AnswerSet(body.answers))
    }
}
