use docqa_client::{Services, Session, StatusView};
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

#[derive(Debug, PartialEq, Eq)]
pub enum LoopCommand {
    Ask(String),
    /// Questions collected after `:batch`, one per line.
    Batch(String),
    Quit,
}

/// Read the next command; `None` at end of input.
pub async fn read_command<R>(lines: &mut Lines<R>) -> io::Result<Option<LoopCommand>>
where
    R: AsyncBufRead + Unpin,
{
    let line = match lines.next_line().await? {
        Some(line) => line,
        None => return Ok(None),
    };

    let command = match line.trim() {
        ":quit" | ":q" => LoopCommand::Quit,
        ":batch" => {
            let mut block = String::new();
            while let Some(next) = lines.next_line().await? {
                if next.trim().is_empty() {
                    break;
                }
                block.push_str(&next);
                block.push('\n');
            }
            LoopCommand::Batch(block)
        }
        _ => LoopCommand::Ask(line),
    };
    Ok(Some(command))
}

/// Ask questions read from `input` until `:quit` or end of input.
pub async fn question_loop<R>(
    session: &mut Session,
    services: &Services,
    view: &mut dyn StatusView,
    input: R,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(command) = read_command(&mut lines).await? {
        match command {
            LoopCommand::Quit => break,
            LoopCommand::Batch(block) => session.submit_questions(services, view, &block).await,
            LoopCommand::Ask(question) => session.submit_question(services, view, &question).await,
        }
    }
    Ok(())
}
