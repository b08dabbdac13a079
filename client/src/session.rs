use crate::batch_service::{pair_answers, parse_questions, BatchRunService};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::models::*;
use crate::question_service::QuestionService;
use crate::upload_service::UploadService;
use crate::view::StatusView;
use reqwest::Client;
use std::path::Path;

pub const UPLOADING: &str = "Uploading...";
pub const UPLOAD_FAILED: &str = "❌ Upload failed.";
pub const GETTING_ANSWER: &str = "⏳ Getting answer...";
pub const ANSWER_FAILED: &str = "❌ Error getting answer.";
pub const RUNNING: &str = "⏳ Running...";
pub const RUN_FAILED: &str = "❌ Request failed.";
pub const RUN_MISSING_INPUT: &str = "Please provide both a document URL and at least one question.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading,
    Uploaded,
    UploadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AskState {
    #[default]
    Idle,
    Asking,
    Answered,
    AskFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    /// Input failed validation; nothing was sent.
    Rejected,
    Running,
    Completed,
    RunFailed,
}

/// The backend services a session talks to, sharing one HTTP client.
pub struct Services {
    pub upload: UploadService,
    pub question: QuestionService,
    pub batch: BatchRunService,
}

impl Services {
    pub fn new(config: ClientConfig) -> Self {
        let client = Client::new();
        Self {
            upload: UploadService::new(client.clone(), config.clone()),
            question: QuestionService::new(client.clone(), config.clone()),
            batch: BatchRunService::new(client, config),
        }
    }
}

/// Per-session state: the current document identifier and whether
/// questions may be asked yet. Every failure ends up as view text.
#[derive(Debug, Default)]
pub struct Session {
    identifier: Option<String>,
    qa_visible: bool,
    upload_state: UploadState,
    ask_state: AskState,
    run_state: RunState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue with a document uploaded earlier.
    pub fn resume(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
            qa_visible: true,
            upload_state: UploadState::Uploaded,
            ask_state: AskState::Idle,
            run_state: RunState::Idle,
        }
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn qa_visible(&self) -> bool {
        self.qa_visible
    }

    pub fn upload_state(&self) -> UploadState {
        self.upload_state
    }

    pub fn ask_state(&self) -> AskState {
        self.ask_state
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub async fn submit_upload(&mut self, services: &Services, view: &mut dyn StatusView, file_path: &Path) {
        self.upload_state = UploadState::Uploading;
        view.set_upload_status(UPLOADING);

        match services.upload.upload(file_path).await {
            Ok(result) => {
                view.set_upload_status(&format!("✅ Uploaded {} successfully.", result.identifier));
                self.identifier = Some(result.identifier);
                self.upload_state = UploadState::Uploaded;
                self.qa_visible = true;
                view.show_qa_section();
            }
            Err(e) => {
                log::error!("Upload failed: {}", e);
                self.upload_state = UploadState::UploadFailed;
                view.set_upload_status(UPLOAD_FAILED);
            }
        }
    }

    pub async fn submit_question(&mut self, services: &Services, view: &mut dyn StatusView, raw: &str) {
        let question = raw.trim();
        if question.is_empty() {
            return;
        }
        let identifier = match self.scope() {
            Some(identifier) => identifier,
            None => return,
        };

        self.ask_state = AskState::Asking;
        view.set_answer(GETTING_ANSWER);

        match services.question.ask(question, &identifier).await {
            Ok(answer) => {
                self.ask_state = AskState::Answered;
                view.set_answer(answer.as_deref().unwrap_or(NO_ANSWER));
            }
            Err(e) => {
                log::error!("Question failed: {}", e);
                self.ask_state = AskState::AskFailed;
                view.set_answer(ANSWER_FAILED);
            }
        }
    }

    /// Ask every non-blank line of `block` about the current document.
    pub async fn submit_questions(&mut self, services: &Services, view: &mut dyn StatusView, block: &str) {
        let questions = parse_questions(block);
        if questions.is_empty() {
            return;
        }
        let identifier = match self.scope() {
            Some(identifier) => identifier,
            None => return,
        };

        self.ask_state = AskState::Asking;
        view.set_answer(GETTING_ANSWER);

        match self.ask_all(services, &questions, &identifier).await {
            Ok(answers) => {
                self.ask_state = AskState::Answered;
                view.show_batch_results(&pair_answers(&questions, &answers));
            }
            Err(e) => {
                log::error!("Questions failed: {}", e);
                self.ask_state = AskState::AskFailed;
                view.set_answer(ANSWER_FAILED);
            }
        }
    }

    pub async fn submit_batch_run(
        &mut self,
        services: &Services,
        view: &mut dyn StatusView,
        document_url: &str,
        block: &str,
    ) {
        let document_url = document_url.trim();
        let questions = parse_questions(block);
        if document_url.is_empty() || questions.is_empty() {
            self.run_state = RunState::Rejected;
            view.set_batch_status(RUN_MISSING_INPUT);
            return;
        }

        self.run_state = RunState::Running;
        view.set_batch_status(RUNNING);

        match services.batch.run(document_url, &questions).await {
            Ok(answers) => {
                self.run_state = RunState::Completed;
                view.set_batch_status(&format!("✅ {} answers received.", answers.len()));
                view.show_batch_results(&pair_answers(&questions, &answers));
            }
            Err(e) => {
                log::error!("Batch run failed: {}", e);
                self.run_state = RunState::RunFailed;
                view.set_batch_status(&run_failure_text(&e));
            }
        }
    }

    // The question region is the only gate; the backend does its own checks.
    fn scope(&self) -> Option<String> {
        if !self.qa_visible {
            log::debug!("Question ignored, no document uploaded yet");
            return None;
        }
        Some(self.identifier.clone().unwrap_or_default())
    }

    async fn ask_all(&self, services: &Services, questions: &[String], identifier: &str) -> Result<AnswerSet> {
        if services.question.contract().batch_ask_path().is_some() {
            return services.question.ask_batch(questions, identifier).await;
        }

        let mut answers = Vec::with_capacity(questions.len());
        for question in questions {
            let answer = services.question.ask(question, identifier).await?;
            answers.push(answer.unwrap_or_default());
        }
        Ok(AnswerSet(answers))
    }
}

fn run_failure_text(error: &ClientError) -> String {
    match (error.detail(), error.status()) {
        (Some(detail), _) => format!("❌ {}", detail),
        (None, Some(status)) => format!("❌ Request failed ({}).", status),
        (None, None) => RUN_FAILED.to_string(),
    }
}
