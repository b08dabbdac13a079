mod args;
mod repl;

use anyhow::{bail, Context, Result};
use args::{AskArgs, Cli, Commands, RunArgs, UploadArgs};
use clap::Parser;
use docqa_client::{AskState, BackendContract, ClientConfig, RunState, Services, Session, TerminalView, UploadState};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    log::info!("Using {} backend at {}", config.contract, config.base_url());

    let services = Services::new(config);
    let mut view = TerminalView::new();

    match cli.command {
        Commands::Upload(args) => upload(&services, &mut view, args).await,
        Commands::Ask(args) => ask(&services, &mut view, args).await,
        Commands::Run(args) => run(&services, &mut view, args).await,
    }
}

fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let contract: BackendContract = match &cli.contract {
        Some(name) => name.parse()?,
        None => Default::default(),
    };

    let config = match &cli.backend_url {
        Some(url) => ClientConfig::with_base_url(url, contract)?,
        None => ClientConfig::new(cli.origin.as_deref(), contract, None)?,
    };

    Ok(match cli.token.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(token) => config.with_token(token),
        None => config,
    })
}

async fn upload(services: &Services, view: &mut TerminalView, args: UploadArgs) -> Result<()> {
    let mut session = Session::new();
    session.submit_upload(services, view, &args.file).await;

    if session.upload_state() == UploadState::UploadFailed {
        bail!("upload of {} failed", args.file.display());
    }

    repl::question_loop(&mut session, services, view, BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}

async fn ask(services: &Services, view: &mut TerminalView, args: AskArgs) -> Result<()> {
    let mut session = Session::resume(args.id);

    if let [question] = args.questions.as_slice() {
        session.submit_question(services, view, question).await;
    } else {
        session
            .submit_questions(services, view, &args.questions.join("\n"))
            .await;
    }

    if session.ask_state() == AskState::AskFailed {
        bail!("question failed");
    }
    Ok(())
}

async fn run(services: &Services, view: &mut TerminalView, args: RunArgs) -> Result<()> {
    let block = match (args.questions, args.questions_file) {
        (Some(block), _) => block,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read questions from {}", path.display()))?,
        (None, None) => String::new(),
    };

    let mut session = Session::new();
    session
        .submit_batch_run(services, view, &args.url, &block)
        .await;

    match session.run_state() {
        RunState::Completed => Ok(()),
        RunState::Rejected => bail!("a document URL and at least one question are required"),
        _ => bail!("batch run failed"),
    }
}
