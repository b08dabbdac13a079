use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Upload documents and ask questions about them
#[derive(Parser, Debug)]
#[command(name = "docqa")]
#[command(version)]
#[command(about = "Client for the document question-answering backend", long_about = None)]
pub struct Cli {
    /// Origin the client is served from; localhost origins use the local backend
    #[arg(long, global = true, env = "DOCQA_ORIGIN")]
    pub origin: Option<String>,

    /// Talk to this backend directly instead of resolving it from the origin
    #[arg(long, global = true, env = "DOCQA_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Backend request/response schema: json or form
    #[arg(long, global = true, env = "DOCQA_CONTRACT")]
    pub contract: Option<String>,

    /// Bearer token for batch runs
    #[arg(long, global = true, env = "DOCQA_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a document, then ask questions about it interactively
    Upload(UploadArgs),

    /// Ask about a previously uploaded document
    Ask(AskArgs),

    /// Answer a list of questions about a document URL in one request
    Run(RunArgs),
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// File to upload
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Identifier the backend assigned on upload
    #[arg(long)]
    pub id: String,

    /// Questions to ask; several are sent together where the backend allows it
    #[arg(required = true)]
    pub questions: Vec<String>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// URL of the document to answer from
    #[arg(long)]
    pub url: String,

    /// Newline-separated questions
    #[arg(long, conflicts_with = "questions_file", required_unless_present = "questions_file")]
    pub questions: Option<String>,

    /// File with one question per line
    #[arg(long)]
    pub questions_file: Option<PathBuf>,
}
