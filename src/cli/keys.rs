//! Gesture vocabulary for the terminal front end.
//!
//! Each whitespace-separated word of input is one keypad press. Words are
//! parsed into [`Key`]s up front, then applied to the engine one at a
//! time with [`apply`].

use crate::core::Base;
use crate::engine::{Constant, Engine, FunctionKey, Operator};
use crate::error::{CommandError, EvaluateError, Result};
use crate::storage::HistoryStore;
use std::str::FromStr;

/// One keypad press.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    /// Digits, decimal point or parentheses.
    Value(String),
    /// Binary operator.
    Operator(Operator),
    /// Function key.
    Function(FunctionKey),
    /// Constant key.
    Constant(Constant),
    /// `=`
    Evaluate,
    /// `C`
    Clear,
    /// `DEL`
    Delete,
    /// Undo.
    Undo,
    /// Redo.
    Redo,
    /// `M+`
    MemoryAdd,
    /// `M-`
    MemorySubtract,
    /// `MR`
    MemoryRecall,
    /// `MC`
    MemoryClear,
    /// Base conversion.
    Base(Base),
    /// Load history entry `n` (newest first, 1-based).
    LoadHistory(usize),
    /// Show the history listing.
    ShowHistory,
    /// Clear history.
    ClearHistory,
    /// End the session.
    Quit,
}

/// What the front end should render after a key.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    /// The engine display.
    Display,
    /// An evaluation error message in place of the display.
    Error(EvaluateError),
    /// The history listing.
    History,
    /// Nothing; the session ends.
    Quit,
}

impl Key {
    /// Parses a single word. Words taking an argument (`hist`, `load`)
    /// must go through [`parse_keys`].
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownKey`] for unrecognized words.
    pub fn parse(word: &str) -> Result<Self> {
        let lower = word.to_lowercase();
        let key = match lower.as_str() {
            "=" | "enter" => Self::Evaluate,
            "c" | "clear" => Self::Clear,
            "del" | "delete" | "backspace" => Self::Delete,
            "undo" => Self::Undo,
            "redo" => Self::Redo,
            "m+" => Self::MemoryAdd,
            "m-" => Self::MemorySubtract,
            "mr" => Self::MemoryRecall,
            "mc" => Self::MemoryClear,
            "history" => Self::ShowHistory,
            "clear-history" => Self::ClearHistory,
            "quit" | "exit" | "q" => Self::Quit,
            _ => return Self::parse_keypad(word, &lower),
        };
        Ok(key)
    }

    fn parse_keypad(word: &str, lower: &str) -> Result<Self> {
        if is_value_word(word) {
            return Ok(Self::Value(word.to_string()));
        }
        if let Ok(op) = Operator::from_str(lower) {
            return Ok(Self::Operator(op));
        }
        if let Ok(function) = FunctionKey::from_str(lower) {
            return Ok(Self::Function(function));
        }
        if let Ok(constant) = Constant::from_str(lower) {
            return Ok(Self::Constant(constant));
        }
        if let Ok(base) = Base::from_str(lower) {
            return Ok(Self::Base(base));
        }
        Err(CommandError::UnknownKey(word.to_string()).into())
    }
}

fn is_value_word(word: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '(' | ')'))
}

/// Parses a sequence of words into keys.
///
/// # Errors
///
/// Returns an error for unknown words, or for `hist`/`load` without a
/// positive entry number.
pub fn parse_keys<'a, I>(words: I) -> Result<Vec<Key>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut words = words.into_iter();
    let mut keys = Vec::new();

    while let Some(word) = words.next() {
        if matches!(word.to_lowercase().as_str(), "hist" | "load") {
            let arg = words
                .next()
                .ok_or_else(|| CommandError::MissingArgument(format!("{word} <n>")))?;
            let index = arg
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    CommandError::InvalidArgument(format!("history entry must be 1 or more: {arg}"))
                })?;
            keys.push(Key::LoadHistory(index));
        } else {
            keys.push(Key::parse(word)?);
        }
    }

    Ok(keys)
}

/// Applies one key to the engine.
///
/// Memory and base-conversion failures leave the engine unchanged and
/// are only logged.
///
/// # Errors
///
/// Returns [`CommandError::InvalidArgument`] when a history entry number
/// is past the end of the log.
pub fn apply<S: HistoryStore>(engine: &mut Engine<S>, key: &Key) -> Result<Feedback> {
    tracing::debug!(?key, buffer = %engine.expression(), "key");

    match key {
        Key::Value(text) => {
            engine.append_value(text);
        }
        Key::Operator(op) => {
            engine.append_operator(*op);
        }
        Key::Function(function) => {
            engine.append_function(*function);
        }
        Key::Constant(constant) => {
            engine.append_constant(*constant);
        }
        Key::Evaluate => {
            if let Err(e) = engine.evaluate() {
                return Ok(Feedback::Error(e));
            }
        }
        Key::Clear => {
            engine.clear();
        }
        Key::Delete => {
            engine.delete_last();
        }
        Key::Undo => {
            engine.undo();
        }
        Key::Redo => {
            engine.redo();
        }
        Key::MemoryAdd => {
            if let Err(e) = engine.memory_add() {
                tracing::debug!(error = %e, "M+ ignored");
            }
        }
        Key::MemorySubtract => {
            if let Err(e) = engine.memory_subtract() {
                tracing::debug!(error = %e, "M- ignored");
            }
        }
        Key::MemoryRecall => {
            engine.memory_recall();
        }
        Key::MemoryClear => engine.memory_clear(),
        Key::Base(base) => {
            if let Err(e) = engine.base_conversion(*base) {
                tracing::debug!(error = %e, %base, "base conversion ignored");
            }
        }
        Key::LoadHistory(index) => {
            let entry = index
                .checked_sub(1)
                .and_then(|i| engine.history_newest_first().nth(i))
                .cloned()
                .ok_or_else(|| {
                    CommandError::InvalidArgument(format!(
                        "no history entry {index} ({} recorded)",
                        engine.history().len()
                    ))
                })?;
            engine.load_from_history(&entry);
        }
        Key::ShowHistory => return Ok(Feedback::History),
        Key::ClearHistory => engine.clear_history(),
        Key::Quit => return Ok(Feedback::Quit),
    }

    Ok(Feedback::Display)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn press(engine: &mut Engine, line: &str) -> Feedback {
        let keys = parse_keys(line.split_whitespace()).unwrap();
        let mut feedback = Feedback::Display;
        for key in &keys {
            feedback = apply(engine, key).unwrap();
        }
        feedback
    }

    #[test]
    fn test_parse_vocabulary() {
        assert_eq!(Key::parse("12").unwrap(), Key::Value("12".to_string()));
        assert_eq!(Key::parse("(").unwrap(), Key::Value("(".to_string()));
        assert_eq!(Key::parse("*").unwrap(), Key::Operator(Operator::Multiply));
        assert_eq!(Key::parse("÷").unwrap(), Key::Operator(Operator::Divide));
        assert_eq!(Key::parse("-").unwrap(), Key::Operator(Operator::Subtract));
        assert_eq!(Key::parse("=").unwrap(), Key::Evaluate);
        assert_eq!(Key::parse("C").unwrap(), Key::Clear);
        assert_eq!(Key::parse("DEL").unwrap(), Key::Delete);
        assert_eq!(Key::parse("M+").unwrap(), Key::MemoryAdd);
        assert_eq!(Key::parse("M-").unwrap(), Key::MemorySubtract);
        assert_eq!(Key::parse("MR").unwrap(), Key::MemoryRecall);
        assert_eq!(Key::parse("hex").unwrap(), Key::Base(Base::Hex));
        assert_eq!(Key::parse("sqrt").unwrap(), Key::Function(FunctionKey::Sqrt));
        assert_eq!(Key::parse("x2").unwrap(), Key::Function(FunctionKey::Square));
        assert_eq!(Key::parse("1/x").unwrap(), Key::Function(FunctionKey::Reciprocal));
        assert_eq!(Key::parse("pi").unwrap(), Key::Constant(Constant::Pi));
        assert_eq!(Key::parse("e").unwrap(), Key::Constant(Constant::E));
        assert_eq!(Key::parse("quit").unwrap(), Key::Quit);
    }

    #[test]
    fn test_unknown_key() {
        let err = Key::parse("sinh").unwrap_err();
        assert!(matches!(err, Error::Command(CommandError::UnknownKey(ref w)) if w == "sinh"));
    }

    #[test]
    fn test_hist_takes_an_argument() {
        assert_eq!(
            parse_keys(["hist", "2"]).unwrap(),
            vec![Key::LoadHistory(2)]
        );
        assert!(parse_keys(["load"]).is_err());
        assert!(parse_keys(["hist", "0"]).is_err());
        assert!(parse_keys(["hist", "two"]).is_err());
    }

    #[test]
    fn test_typed_session() {
        let mut engine = Engine::in_memory();
        assert_eq!(press(&mut engine, "2 + 3 ="), Feedback::Display);
        assert_eq!(engine.display(), "5");
        press(&mut engine, "* 4 =");
        assert_eq!(engine.display(), "20");
        assert_eq!(engine.history().len(), 2);
    }

    #[test]
    fn test_function_key_session() {
        let mut engine = Engine::in_memory();
        press(&mut engine, "sqrt 16 ) =");
        assert_eq!(engine.display(), "4");
    }

    #[test]
    fn test_error_feedback() {
        let mut engine = Engine::in_memory();
        assert_eq!(
            press(&mut engine, "1 / 0 ="),
            Feedback::Error(EvaluateError::DivisionByZero)
        );
        assert_eq!(engine.display(), "0");
    }

    #[test]
    fn test_silent_failures() {
        let mut engine = Engine::in_memory();
        assert_eq!(press(&mut engine, "5 + M+"), Feedback::Display);
        assert!(engine.memory().abs() < f64::EPSILON);
        assert_eq!(press(&mut engine, "hex"), Feedback::Display);
        assert_eq!(engine.expression(), "5 + ");
    }

    #[test]
    fn test_memory_and_base_keys() {
        let mut engine = Engine::in_memory();
        press(&mut engine, "255 M+ C MR hex");
        assert_eq!(engine.display(), "0xff");
        press(&mut engine, "dec");
        assert_eq!(engine.display(), "255");
    }

    #[test]
    fn test_load_history_newest_first() {
        let mut engine = Engine::in_memory();
        press(&mut engine, "1 + 1 = C 2 + 2 = C");
        press(&mut engine, "hist 2");
        assert_eq!(engine.display(), "1 + 1");
        press(&mut engine, "load 1");
        assert_eq!(engine.display(), "2 + 2");

        for index in [0, 3] {
            let err = apply(&mut engine, &Key::LoadHistory(index)).unwrap_err();
            assert!(matches!(
                err,
                Error::Command(CommandError::InvalidArgument(_))
            ));
        }
        assert_eq!(engine.display(), "2 + 2");
    }

    #[test]
    fn test_history_and_quit_feedback() {
        let mut engine = Engine::in_memory();
        assert_eq!(press(&mut engine, "history"), Feedback::History);
        assert_eq!(press(&mut engine, "quit"), Feedback::Quit);
    }
}
