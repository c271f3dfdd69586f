use chumsky::prelude::*;

use crate::{
    prelude::*,
    syntax::{Syntax, Value},
    term::Term,
};

#[derive(PartialEq, Eq, Hash, Clone, derive_more::Display, Debug)]
pub enum Token {
    #[display(fmt = "(")]
    LParen,
    #[display(fmt = ")")]
    RParen,
    #[display(fmt = "{{")]
    LBrace,
    #[display(fmt = "}}")]
    RBrace,
    #[display(fmt = "[")]
    LBracket,
    #[display(fmt = "]")]
    RBracket,
    #[display(fmt = ",")]
    Comma,
    #[display(fmt = ".")]
    Dot,
    #[display(fmt = ";")]
    Semicolon,
    #[display(fmt = "=")]
    Equal,
    #[display(fmt = "_")]
    Underscore,

    #[display(fmt = "lambda")]
    Lambda,

    #[display(fmt = "{_0}")]
    Literal(Value),
    #[display(fmt = "{_0}")]
    Ident(Name),
}

pub trait SimpleParser<I: Clone + std::hash::Hash, O>:
    Parser<I, O, Error = Error<I>> + Clone
{
    #[allow(clippy::type_complexity)]
    fn spanned(self) -> chumsky::combinator::MapWithSpan<Self, fn(O, Span) -> Spanned<O>, O>
    where
        Self: Sized,
        I: std::cmp::Eq,
    {
        self.map_with_span(|value, span| Spanned { span, value })
    }
}
impl<I: Clone + std::hash::Hash, O, T> SimpleParser<I, O> for T where
    T: Parser<I, O, Error = Error<I>> + Clone
{
}

pub fn lexer() -> impl SimpleParser<char, Vec<Spanned<Token>>> {
    let symbols = choice((
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just('{').to(Token::LBrace),
        just('}').to(Token::RBrace),
        just('[').to(Token::LBracket),
        just(']').to(Token::RBracket),
        just(',').to(Token::Comma),
        just('.').to(Token::Dot),
        just(';').to(Token::Semicolon),
        just('=').to(Token::Equal),
    ));
    let keywords = choice((
        text::keyword("lambda").to(Token::Lambda),
        text::keyword("unit").to(Token::Literal(Value::Unit)),
        text::keyword("true").to(Token::Literal(Value::Bool(true))),
        text::keyword("false").to(Token::Literal(Value::Bool(false))),
    ));
    let nat = text::int::<char, _>(10)
        .from_str()
        .try_map(|r, span| r.map_err(|e| Error::custom(span, format!("{e}"))))
        .map(|n| Token::Literal(Value::Nat(n)));
    let escape = just('\\').ignore_then(choice((
        just('\\'),
        just('"'),
        just('n').to('\n'),
        just('t').to('\t'),
    )));
    let string = just('"')
        .ignore_then(
            filter(|c: &char| *c != '\\' && *c != '"')
                .or(escape)
                .repeated(),
        )
        .then_ignore(just('"'))
        .collect::<String>()
        .map(|s| Token::Literal(Value::Text(Name::new(s))))
        .labelled("string");
    // `_` on its own is the empty term; `_x` is an ordinary identifier.
    let ident = text::ident().map(|ident: String| {
        if ident == "_" {
            Token::Underscore
        } else {
            Token::Ident(Name::new(ident))
        }
    });
    let token = choice((symbols, keywords, nat, string, ident));
    token.spanned().padded().repeated().then_ignore(end())
}

fn term_parser() -> impl SimpleParser<Token, Term> {
    recursive(|term: Recursive<_, Term, _>| {
        let ident = select! { Token::Ident(ident) => ident, };

        // 1, true, "text", unit
        let literal = select! { Token::Literal(value) => value, }
            .map(|value| Term::from(Syntax::Literal(value)))
            .labelled("literal");

        let variable = ident
            .clone()
            .map(|name| Term::from(Syntax::Variable(name)))
            .labelled("variable");

        let empty = just(Token::Underscore).to(Term::Empty).labelled("empty");

        let terms = term
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing();

        // [term, ...] { term }
        let group = terms
            .clone()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .then(
                term.clone()
                    .delimited_by(just(Token::LBrace), just(Token::RBrace)),
            )
            .map(|(tag, value)| Term::group(tag, value))
            .labelled("group");

        let parenthesized = term
            .clone()
            .delimited_by(just(Token::LParen), just(Token::RParen));

        let atom = choice((literal, empty, variable, group, parenthesized));

        // atom(term, ...)(term, ...)
        let apply = atom
            .then(
                terms
                    .delimited_by(just(Token::LParen), just(Token::RParen))
                    .repeated(),
            )
            .foldl(Term::apply);

        // lambda term, ... . term
        let lambda = just(Token::Lambda)
            .ignore_then(apply.clone().separated_by(just(Token::Comma)))
            .then_ignore(just(Token::Dot))
            .then(term.clone())
            .map(|(params, body)| Term::lambda(params, body))
            .labelled("abstract");

        // ident = term
        let assign = ident
            .then_ignore(just(Token::Equal))
            .then(term)
            .map(|(name, value)| Term::from(Syntax::Assign(name, value)))
            .labelled("assign");

        choice((lambda, assign, apply))
    })
    .labelled("term")
}

fn terms_parser() -> impl SimpleParser<Token, Vec<Spanned<Term>>> {
    term_parser()
        .spanned()
        .separated_by(just(Token::Semicolon))
        .allow_trailing()
}

fn parse_full<T>(s: &str, parser: impl SimpleParser<Token, T>) -> Result<T, Vec<Error<String>>> {
    let len = s.chars().count();
    let eoi = Span {
        start: len,
        end: len + 1,
    };
    let tokens = lexer().parse(s).map_err(|es| {
        es.into_iter()
            .map(|e| e.map(|e| e.to_string()))
            .collect::<Vec<_>>()
    })?;
    let value = parser
        .then_ignore(end())
        .parse(chumsky::Stream::from_iter(
            eoi,
            tokens
                .into_iter()
                .map(|Spanned { span, value }| (value, span)),
        ))
        .map_err(|es| {
            es.into_iter()
                .map(|e| e.map(|e| e.to_string()))
                .collect::<Vec<_>>()
        })?;
    Ok(value)
}

pub fn parse_term(s: &str) -> Result<Spanned<Term>, Vec<Error<String>>> {
    parse_full(s, term_parser().spanned())
}

pub fn parse_terms(s: &str) -> Result<Vec<Spanned<Term>>, Vec<Error<String>>> {
    parse_full(s, terms_parser())
}

#[cfg(test)]
mod test {
    use super::*;
    fn lex(s: &str) -> Result<Vec<Token>, Vec<Error<char>>> {
        Ok(lexer()
            .parse(s)?
            .iter()
            .map(Spanned::value)
            .cloned()
            .collect::<Vec<_>>())
    }

    fn reprint(s: &str) -> String {
        parse_term(s).unwrap().forget_span().to_string()
    }

    #[test]
    fn test_lexer() {
        assert_eq!(
            lex("lambda lambdax _ _x").unwrap(),
            vec![
                Token::Lambda,
                Token::Ident(Name::new("lambdax".into())),
                Token::Underscore,
                Token::Ident(Name::new("_x".into())),
            ]
        );
        assert_eq!(
            lex(r#"12 "hi there" unit"#).unwrap(),
            vec![
                Token::Literal(Value::Nat(12)),
                Token::Literal(Value::Text(Name::new("hi there".into()))),
                Token::Literal(Value::Unit),
            ]
        );
        assert_eq!(
            lex("f(x)=[]{}").unwrap(),
            vec![
                Token::Ident(Name::new("f".into())),
                Token::LParen,
                Token::Ident(Name::new("x".into())),
                Token::RParen,
                Token::Equal,
                Token::LBracket,
                Token::RBracket,
                Token::LBrace,
                Token::RBrace,
            ]
        );
        assert_eq!(
            lex(r#""a\\b \"q\"\n\t""#).unwrap(),
            vec![Token::Literal(Value::Text(Name::new("a\\b \"q\"\n\t".into())))]
        );
        assert!(lex(r#""unterminated"#).is_err());
        assert!(lex(r#""bad \x escape""#).is_err());
    }

    #[test]
    fn test_term_parser() {
        assert_eq!(reprint("f(1, x = true)"), "f(1, x = true)");
        assert_eq!(reprint("lambda x, y. g(x)(y)"), "lambda x, y. g(x)(y)");
        assert_eq!(reprint("lambda. 0"), "lambda. 0");
        assert_eq!(reprint(r#"[a, "b"] { unit }"#), r#"[a, "b"] { unit }"#);
        assert_eq!(reprint("(f)(x,)"), "f(x)");
        assert_eq!(reprint("  x  =  y  "), "x = y");
        assert_eq!(
            format!("{:?}", parse_term("x = f(_)").unwrap().value),
            r#"Assign("x", Apply(Variable("f"), [Empty]))"#
        );
        assert_eq!(format!("{:?}", parse_term("_").unwrap().value), "Empty");
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(reprint("f(_)"), "f(_)");
        assert_eq!(reprint("(lambda x. x)(y)"), "(lambda x. x)(y)");
        assert_eq!(reprint(r#""a\\b""#), r#""a\\b""#);
        for input in [
            "f(_)",
            "_(x)",
            "(lambda x. x)(y)",
            "(x = 1)(2)",
            "lambda (lambda y. y), (x = 1). _",
            "[_, a = b] { _ }",
            "g(x)(lambda. 0)",
            "x = lambda y. z = y",
            r#"f("a\\b \"q\"\n\t")"#,
        ] {
            let term = parse_term(input).unwrap().forget_span();
            let printed = term.to_string();
            assert_eq!(printed, input);
            assert_eq!(parse_term(&printed).unwrap().forget_span(), term);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_term("f(1,").is_err());
        assert!(parse_term("lambda x y. z").is_err());
        assert!(parse_term("x; y").is_err());
        assert!(parse_term("").is_err());
    }

    #[test]
    fn test_terms_parser() {
        let terms = parse_terms("f(1, 2); f(1, 3)").unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].value.to_string(), "f(1, 2)");
        assert_eq!(terms[1].value.to_string(), "f(1, 3)");
        assert!(terms[0].span().end <= terms[1].span().start);
        assert!(parse_terms("").unwrap().is_empty());
    }
}
