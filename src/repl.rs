use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::info;

use crate::assistant::Assistant;
use crate::interaction_log::InteractionLog;

const BANNER: &str = "Smart Assistant is ready!";
const PROMPT: &str = "Ask your question ('exit' to quit): ";
const FAREWELL: &str = "Exiting. Goodbye!";
const EXIT_COMMAND: &str = "exit";

pub async fn run_repl<A, R, W>(
    assistant: &A,
    log: &InteractionLog,
    mut input: R,
    mut output: W,
) -> Result<()>
where
    A: Assistant + ?Sized,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{BANNER}").context("Failed to write to stdout")?;

    loop {
        write!(output, "{PROMPT}").context("Failed to write to stdout")?;
        output.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Failed to read stdin")?;
        if read == 0 {
            info!("stdin closed; leaving interactive loop");
            break;
        }

        let question = strip_line_ending(&line);
        if is_exit_command(question) {
            writeln!(output, "{FAREWELL}").context("Failed to write to stdout")?;
            break;
        }

        let answer = assistant.ask(question).await;
        writeln!(output, "Answer: {answer}").context("Failed to write to stdout")?;
        log.append(question, &answer)?;
    }

    Ok(())
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(line)
}

fn is_exit_command(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(EXIT_COMMAND)
}
