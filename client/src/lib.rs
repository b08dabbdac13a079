pub mod models;
pub mod error;
pub mod config;
pub mod upload_service;
pub mod question_service;
pub mod batch_service;
pub mod session;
pub mod view;

pub use models::*;
pub use error::{ClientError, Result};
pub use config::{BackendContract, ClientConfig};
pub use upload_service::UploadService;
pub use question_service::QuestionService;
pub use batch_service::{pair_answers, parse_questions, BatchRunService};
pub use session::{AskState, RunState, Services, Session, UploadState};
pub use view::{StatusView, TerminalView};
