//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::cli::keys::{Feedback, Key, apply, parse_keys};
use crate::cli::output::{
    OutputFormat, format_error, format_evaluate_error, format_evaluation, format_history,
    format_message, format_state,
};
use crate::cli::parser::{Cli, Commands};
use crate::engine::Engine;
use crate::error::Result;
use crate::storage::{HistoryStore, JsonHistoryStore, MemoryHistoryStore};
use std::io::{self, BufRead, IsTerminal, Write};

/// Prompt shown before each line when stdin is a terminal.
const PROMPT: &str = "> ";

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success. The interactive session writes
/// directly to stdout and returns an empty string.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    if cli.no_history {
        tracing::info!("history kept in memory for this run");
        run(cli, Engine::new(MemoryHistoryStore::new()), format)
    } else {
        let path = cli.get_history_path();
        tracing::info!(path = %path.display(), "using history file");
        run(cli, Engine::new(JsonHistoryStore::new(path)), format)
    }
}

fn run<S: HistoryStore>(cli: &Cli, mut engine: Engine<S>, format: OutputFormat) -> Result<String> {
    match &cli.command {
        Some(Commands::Eval { expression }) => cmd_eval(&mut engine, &expression.join(" "), format),
        Some(Commands::Keys { keys }) => cmd_keys(&mut engine, keys, format),
        Some(Commands::History { clear, limit }) => {
            Ok(cmd_history(&mut engine, *clear, *limit, format))
        }
        Some(Commands::Repl) | None => cmd_repl(&mut engine, format),
    }
}

/// Reads gestures from `input` line by line, writing the display after
/// each line to `output`.
///
/// Blank lines are skipped. A line with an unknown word is rejected as a
/// whole; the session continues. `quit` or end of input ends it.
///
/// # Errors
///
/// Returns an error only when reading input or writing output fails.
pub fn run_session<S, R, W>(
    engine: &mut Engine<S>,
    mut input: R,
    output: &mut W,
    format: OutputFormat,
    prompt: Option<&str>,
) -> Result<()>
where
    S: HistoryStore,
    R: BufRead,
    W: Write,
{
    let mut line = String::new();

    loop {
        if let Some(prompt) = prompt {
            write!(output, "{prompt}")?;
            output.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let feedback = match parse_keys(line.split_whitespace())
            .and_then(|keys| press_keys(engine, &keys))
        {
            Ok(Some(feedback)) => feedback,
            Ok(None) => continue,
            Err(e) => {
                tracing::debug!(error = %e, line = line.trim_end(), "line rejected");
                writeln!(output, "{}", format_error(&e, format).trim_end())?;
                continue;
            }
        };

        if feedback == Feedback::Quit {
            break;
        }

        write!(output, "{}", render(engine, &feedback, format))?;
        output.flush()?;
    }

    Ok(())
}

/// Applies keys in order and returns the feedback of the last one, or
/// `None` when there were no keys. Stops at `quit`.
fn press_keys<S: HistoryStore>(engine: &mut Engine<S>, keys: &[Key]) -> Result<Option<Feedback>> {
    let mut last = None;
    for key in keys {
        let feedback = apply(engine, key)?;
        let quit = feedback == Feedback::Quit;
        last = Some(feedback);
        if quit {
            break;
        }
    }
    Ok(last)
}

fn render<S: HistoryStore>(engine: &Engine<S>, feedback: &Feedback, format: OutputFormat) -> String {
    match feedback {
        Feedback::Display => format_state(engine, format),
        Feedback::Error(e) => format_evaluate_error(e, format),
        Feedback::History => format_history(engine.history_newest_first(), None, format),
        Feedback::Quit => String::new(),
    }
}

// ==================== Command Implementations ====================

fn cmd_eval<S: HistoryStore>(
    engine: &mut Engine<S>,
    expression: &str,
    format: OutputFormat,
) -> Result<String> {
    engine.append_value(expression);
    match engine.evaluate()? {
        Some(result) => Ok(format_evaluation(expression, &result, format)),
        None => Ok(format_state(engine, format)),
    }
}

fn cmd_keys<S: HistoryStore>(
    engine: &mut Engine<S>,
    words: &[String],
    format: OutputFormat,
) -> Result<String> {
    let keys = parse_keys(words.iter().map(String::as_str))?;
    let feedback = press_keys(engine, &keys)?.unwrap_or(Feedback::Display);
    Ok(render(engine, &feedback, format))
}

fn cmd_history<S: HistoryStore>(
    engine: &mut Engine<S>,
    clear: bool,
    limit: Option<usize>,
    format: OutputFormat,
) -> String {
    if clear {
        let removed = engine.history().len();
        engine.clear_history();
        return format_message(&format!("Cleared {removed} history entries."), format);
    }
    format_history(engine.history_newest_first(), limit, format)
}

fn cmd_repl<S: HistoryStore>(engine: &mut Engine<S>, format: OutputFormat) -> Result<String> {
    let prompt = io::stdin().is_terminal().then_some(PROMPT);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    run_session(engine, stdin.lock(), &mut output, format, prompt)?;
    Ok(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(input: &str) -> (Engine, String) {
        let mut engine = Engine::in_memory();
        let mut output = Vec::new();
        run_session(
            &mut engine,
            input.as_bytes(),
            &mut output,
            OutputFormat::Text,
            None,
        )
        .unwrap();
        (engine, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_session_prints_display_per_line() {
        let (engine, output) = session("2 + 3\n=\n");
        assert_eq!(output, "2 + 3\n5\n");
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_session_skips_blank_lines() {
        let (_, output) = session("\n   \n7\n");
        assert_eq!(output, "7\n");
    }

    #[test]
    fn test_session_reports_errors_and_continues() {
        let (engine, output) = session("8 / 0 =\nbogus\n4\n");
        assert_eq!(
            output,
            "Error: Division by zero\nError: command error: unknown key: bogus\n4\n"
        );
        assert_eq!(engine.expression(), "4");
    }

    #[test]
    fn test_session_rejects_whole_line_on_unknown_word() {
        let (engine, _) = session("1 + nope 2\n");
        assert_eq!(engine.expression(), "");
    }

    #[test]
    fn test_session_quit_stops_reading() {
        let (engine, output) = session("5\nquit\n6\n");
        assert_eq!(output, "5\n");
        assert_eq!(engine.expression(), "5");
    }

    #[test]
    fn test_session_history_listing() {
        let (_, output) = session("3 * 3 =\nhistory\n");
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("9"));
        let listing = lines.next().unwrap_or_default();
        assert!(listing.trim_start().starts_with("1  ["));
        assert!(listing.ends_with("3 × 3 = 9"));
    }

    #[test]
    fn test_session_writes_prompt() {
        let mut engine = Engine::in_memory();
        let mut output = Vec::new();
        run_session(
            &mut engine,
            "1\n".as_bytes(),
            &mut output,
            OutputFormat::Text,
            Some(PROMPT),
        )
        .unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "> 1\n> ");
    }

    #[test]
    fn test_cmd_eval() {
        let mut engine = Engine::in_memory();
        let output = cmd_eval(&mut engine, "2 ^ 10", OutputFormat::Text).unwrap();
        assert_eq!(output, "1024\n");
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_cmd_eval_error() {
        let mut engine = Engine::in_memory();
        assert!(cmd_eval(&mut engine, "1 +", OutputFormat::Text).is_err());
    }

    #[test]
    fn test_cmd_keys_renders_last_feedback() {
        let mut engine = Engine::in_memory();
        let words: Vec<String> = ["1", "/", "0", "="]
            .iter()
            .map(ToString::to_string)
            .collect();
        let output = cmd_keys(&mut engine, &words, OutputFormat::Text).unwrap();
        assert_eq!(output, "Error: Division by zero\n");
    }

    #[test]
    fn test_cmd_history_clear() {
        let mut engine = Engine::in_memory();
        cmd_eval(&mut engine, "1 + 1", OutputFormat::Text).unwrap();
        let output = cmd_history(&mut engine, true, None, OutputFormat::Text);
        assert_eq!(output, "Cleared 1 history entries.\n");
        assert!(engine.history().is_empty());
    }
}
