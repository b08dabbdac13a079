use crate::config::{ClientConfig, RUN_PATH};
use crate::error::{ClientError, Result};
use crate::models::*;
use reqwest::Client;

pub struct BatchRunService {
    client: Client,
    config: ClientConfig,
}

impl BatchRunService {
    pub fn new(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    /// Send one document URL and all questions in a single request.
    pub async fn run(&self, url: &str, questions: &[String]) -> Result<AnswerSet> {
        let endpoint = self.config.endpoint(RUN_PATH);
        log::info!("Running {} questions against {} via {}", questions.len(), url, endpoint);

        let payload = BatchRunRequest {
            url: url.to_string(),
            questions: questions.to_vec(),
        };

        let mut request = self.client.post(&endpoint).json(&payload);
        match &self.config.api_token {
            Some(token) => request = request.bearer_auth(token),
            None => log::warn!("No API token configured, sending {} without Authorization", RUN_PATH),
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::transport(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            // Best effort: the body may not be JSON at all.
            let detail = match response.json::<ErrorResponse>().await {
                Ok(body) => body.detail_text(),
                Err(e) => {
                    log::debug!("Could not parse error body from {}: {}", endpoint, e);
                    None
                }
            };
            return Err(ClientError::Status {
                endpoint,
                status,
                detail,
            });
        }

        let body: AnswersResponse = response
            .json()
            .await
            .map_err(|e| ClientError::malformed(&endpoint, e.to_string()))?;

        if body.answers.len() != questions.len() {
            log::warn!(
                "Backend returned {} answers for {} questions",
                body.answers.len(),
                questions.len()
            );
        }

        Ok(AnswerSet(body.answers))
    }
}

/// Split a newline-delimited block into questions, dropping blank lines.
pub fn parse_questions(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pair every question with the answer at the same position.
pub fn pair_answers(questions: &[String], answers: &AnswerSet) -> Vec<QaPair> {
    questions
        .iter()
        .enumerate()
        .map(|(i, question)| QaPair {
            question: question.clone(),
            answer: answers
                .get(i)
                .filter(|a| !a.is_empty())
                .unwrap_or(NO_ANSWER)
                .to_string(),
        })
        .collect()
}
