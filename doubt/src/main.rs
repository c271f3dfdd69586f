use anyhow::Result;
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use chumsky::Parser;
use doubt::{diff, parser, prelude::*, rank, Term};
use util::repl;

fn describe_token(token: Option<&String>) -> &str {
    token.map_or("end of the input", String::as_str)
}

/// One-line summary of a parse error, used as the report headline.
fn describe(e: &Error) -> String {
    use chumsky::error::SimpleReason;
    match e.reason() {
        SimpleReason::Unexpected => {
            let mut expected = e
                .expected()
                .map(|t| describe_token(t.as_ref()))
                .collect::<Vec<_>>();
            expected.sort_unstable();
            let found = describe_token(e.found());
            if expected.is_empty() {
                format!("Unexpected {found}")
            } else {
                format!("Unexpected {found}, expected one of {}", expected.join(", "))
            }
        }
        SimpleReason::Unclosed { delimiter, .. } => format!("Unclosed delimiter {delimiter}"),
        SimpleReason::Custom(msg) => msg.clone(),
    }
}

fn build_report(e: &Error) -> Report<Span> {
    use chumsky::error::SimpleReason;
    let mut report = Report::build(ReportKind::Error, (), e.span().start).with_message(describe(e));
    let here = match e.reason() {
        SimpleReason::Unclosed { span, delimiter } => {
            report = report.with_label(
                Label::new(span.clone())
                    .with_message(format!("{} opened here", delimiter.fg(Color::Yellow)))
                    .with_color(Color::Yellow),
            );
            format!("close it before {}", describe_token(e.found()).fg(Color::Red))
        }
        SimpleReason::Unexpected => format!("found {}", describe_token(e.found()).fg(Color::Red)),
        SimpleReason::Custom(msg) => format!("{}", msg.fg(Color::Red)),
    };
    report
        .with_label(Label::new(e.span()).with_message(here).with_color(Color::Red))
        .finish()
}

type CommandResult<'a, T = ()> = Result<T, (&'a str, Vec<Error>)>;

fn whole_input(input: &str, msg: impl ToString) -> Error {
    Error::custom(0..input.chars().count(), msg)
}

#[derive(Default)]
struct Repl;
impl Repl {
    fn tokenize(input: &str) -> CommandResult {
        let tokens = parser::lexer()
            .parse(input)
            .map_err(|es| {
                (
                    input,
                    es.into_iter().map(|e| e.map(|e| e.to_string())).collect(),
                )
            })?
            .iter()
            .map(Spanned::value)
            .cloned()
            .collect::<Vec<_>>();
        println!("{tokens:?}");
        Ok(())
    }

    fn parse(input: &str) -> CommandResult {
        let term = parser::parse_term(input).map_err(|es| (input, es))?;
        println!("{term}");
        println!("{:?}", term.value());
        Ok(())
    }

    /// Parses exactly two `;`-separated terms: the old one and the new one.
    fn pair(input: &str) -> CommandResult<(Term, Term)> {
        let terms = parser::parse_terms(input).map_err(|es| (input, es))?;
        match <[_; 2]>::try_from(terms) {
            Ok([old, new]) => Ok((old.forget_span(), new.forget_span())),
            Err(terms) => Err((
                input,
                vec![whole_input(
                    input,
                    format!(
                        "Expected two terms separated by `;`, found {}",
                        terms.len()
                    ),
                )],
            )),
        }
    }

    fn markup(input: &str) -> CommandResult {
        let (old, new) = Self::pair(input)?;
        println!("{}", diff(&old, &new));
        Ok(())
    }

    fn debug(input: &str) -> CommandResult {
        let (old, new) = Self::pair(input)?;
        println!("{}", diff(&old, &new).debug_text());
        Ok(())
    }

    fn cost(input: &str) -> CommandResult {
        let (old, new) = Self::pair(input)?;
        println!("{}", diff(&old, &new).magnitude());
        Ok(())
    }

    fn ranking(input: &str) -> CommandResult {
        let terms = parser::parse_terms(input).map_err(|es| (input, es))?;
        let (old, candidates) = terms.split_first().ok_or_else(|| {
            (
                input,
                vec![whole_input(input, "Expected a term to rank candidates against")],
            )
        })?;
        for (candidate, diff) in rank(old.value(), candidates.iter().map(Spanned::value)) {
            println!("{}\t{candidate}\t{diff}", diff.magnitude());
        }
        Ok(())
    }

    fn show_help() {
        println!(
            "{}",
            r#"
old; new            -- same as :diff old; new
:tokenize   term    -- show tokenized term
:parse      term    -- show parsed term and its structure
:diff       old; new
                    -- show the diff as markup, {-removed-}{+added+}
:debug      old; new
                    -- show the structure of the diff
:cost       old; new
                    -- show the number of patches in the diff
:rank       old; new; ...
                    -- order candidates by the cost of their diff from old
:help               -- show this message
        "#
            .trim()
        );
    }

    fn handle_repl_input(input: &str) -> CommandResult {
        let (cmd, input) = if let Some(stripped) = input.strip_prefix(':') {
            stripped
                .trim_start()
                .split_once(' ')
                .unwrap_or((stripped, ""))
        } else {
            ("", input)
        };
        match cmd {
            "to" | "tokenize" => {
                Self::tokenize(input)?;
            }
            "p" | "parse" => {
                Self::parse(input)?;
            }
            "" | "d" | "diff" => {
                Self::markup(input)?;
            }
            "debug" => {
                Self::debug(input)?;
            }
            "c" | "cost" => {
                Self::cost(input)?;
            }
            "r" | "rank" => {
                Self::ranking(input)?;
            }
            "h" | "he" | "hel" | "help" => {
                Self::show_help();
            }
            _ => {
                eprintln!("Unknown command {cmd}");
                Self::show_help();
            }
        }
        Ok(())
    }
}
impl repl::Repl for Repl {
    type Error = anyhow::Error;
    const HISTORY: Option<&'static str> = Some("/tmp/doubt.history");
    fn evaluate(&mut self, input: String) -> Result<(), Self::Error> {
        if let Err((input, es)) = Self::handle_repl_input(&input) {
            for e in es {
                build_report(&e).eprint(Source::from(&input))?;
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    println!("Hi, this is a structural diff REPL. :h to show help");
    println!();
    repl::start_repl(Repl::default())?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pair() {
        let (old, new) = Repl::pair("f(1, 2); f(1, 3)").unwrap();
        assert_eq!(old.to_string(), "f(1, 2)");
        assert_eq!(new.to_string(), "f(1, 3)");

        let (input, es) = Repl::pair("f(1, 2)").unwrap_err();
        assert_eq!(input, "f(1, 2)");
        assert_eq!(es.len(), 1);
        assert_eq!(es[0].span(), 0..7);
        assert!(Repl::pair("a; b; c").is_err());
        assert!(Repl::pair("f(1; 2").is_err());
    }

    #[test]
    fn test_commands() {
        assert!(Repl::handle_repl_input("f(1, 2); f(1, 3)").is_ok());
        assert!(Repl::handle_repl_input(":cost x; y").is_ok());
        assert!(Repl::handle_repl_input(":debug x; y").is_ok());
        assert!(Repl::handle_repl_input(":rank x; y; x").is_ok());
        assert!(Repl::handle_repl_input(":p lambda x. x").is_ok());
        assert!(Repl::handle_repl_input(":to lambda x. x").is_ok());
        assert!(Repl::handle_repl_input(":rank").is_err());
        assert!(Repl::handle_repl_input(":cost x").is_err());
        assert!(Repl::handle_repl_input(":unknown").is_ok());
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&whole_input("ab", "boom")), "boom");

        let es = parser::parse_terms("f(1,").unwrap_err();
        assert!(!es.is_empty());
        assert!(describe(&es[0]).contains("end of the input"), "{}", describe(&es[0]));

        let es = parser::parse_terms("f(1; 2").unwrap_err();
        assert!(describe(&es[0]).starts_with("Un"), "{}", describe(&es[0]));
    }
}
