use rustyline::{error::ReadlineError, Editor};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error<E> {
    #[error(transparent)]
    Readline(ReadlineError),
    #[error("Command failed: {0:?}")]
    Command(E),
}

pub trait Repl {
    type Error: std::fmt::Debug;
    const PROMPT: &'static str = ">> ";
    const CONTINUATION_PROMPT: &'static str = ".. ";
    const HISTORY: Option<&'static str> = None;
    fn evaluate(&mut self, input: String) -> Result<(), Self::Error>;
}

/// Joins physical lines into one logical input. A line ending in `\` continues
/// on the next one.
#[derive(Default, Debug)]
struct Pending(Option<String>);
impl Pending {
    fn push(&mut self, mut line: String) -> Option<String> {
        if line.ends_with('\\') {
            line.pop();
            line.push('\n');
            match self.0.as_mut() {
                Some(input) => input.push_str(line.as_str()),
                None => self.0 = Some(line),
            }
            None
        } else if let Some(mut input) = self.0.take() {
            input.push_str(line.as_str());
            Some(input)
        } else {
            Some(line)
        }
    }

    fn is_continuing(&self) -> bool {
        self.0.is_some()
    }
}

pub fn start_repl<R: Repl>(mut repl: R) -> Result<(), Error<R::Error>> {
    let mut editor = Editor::<()>::new();
    if let Some(history) = R::HISTORY {
        editor.load_history(history).ok();
    }
    let mut pending = Pending::default();
    loop {
        let prompt = if pending.is_continuing() {
            R::CONTINUATION_PROMPT
        } else {
            R::PROMPT
        };
        match editor.readline(prompt) {
            Ok(line) => {
                let input = match pending.push(line) {
                    Some(input) if !input.trim().is_empty() => input,
                    _ => continue,
                };
                editor.add_history_entry(input.as_str());
                repl.evaluate(input).map_err(Error::Command)?;
                if let Some(history) = R::HISTORY {
                    editor.save_history(history).map_err(Error::Readline)?;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("Bye!");
                break Ok(());
            }
            Err(e) => break Err(Error::Readline(e)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pending() {
        let mut pending = Pending::default();
        assert_eq!(pending.push("a; b".into()), Some("a; b".to_string()));
        assert!(!pending.is_continuing());

        assert_eq!(pending.push("f(1,\\".into()), None);
        assert!(pending.is_continuing());
        assert_eq!(pending.push("  2)\\".into()), None);
        assert_eq!(pending.push("; g".into()), Some("f(1,\n  2)\n; g".to_string()));
        assert!(!pending.is_continuing());
    }
}
