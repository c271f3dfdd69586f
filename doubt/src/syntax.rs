use crate::{
    doc::{Doc, Pretty},
    prelude::*,
};

#[derive(PartialEq, Eq, Hash, Clone)]
pub enum Value {
    Unit,
    Bool(bool),
    Nat(Nat),
    Text(Name),
}
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Unit => f.write_str("unit"),
            Value::Bool(v) => f.write_fmt(format_args!("{v}")),
            Value::Nat(v) => f.write_fmt(format_args!("{v}")),
            // Only the escapes the lexer reads back.
            Value::Text(text) => {
                f.write_str("\"")?;
                for c in text.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        c => f.write_fmt(format_args!("{c}"))?,
                    }
                }
                f.write_str("\"")
            }
        }
    }
}
impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}
impl From<Nat> for Value {
    fn from(v: Nat) -> Self {
        Value::Nat(v)
    }
}
impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(Name::new(v.to_string()))
    }
}

/// One layer of the expression language, generic over what sits in the child
/// positions: `Term` for plain trees and `Diff` for the inside of a copy.
#[derive(PartialEq, Eq, Clone)]
pub enum Syntax<A> {
    Apply(A, Vec<A>),
    Abstract(Vec<A>, A),
    Assign(Name, A),
    Variable(Name),
    Literal(Value),
    Group(Vec<A>, A),
}

impl<A> Syntax<A> {
    pub fn as_ref(&self) -> Syntax<&A> {
        match self {
            Syntax::Apply(callee, args) => Syntax::Apply(callee, args.iter().collect()),
            Syntax::Abstract(params, body) => Syntax::Abstract(params.iter().collect(), body),
            Syntax::Assign(name, value) => Syntax::Assign(name.clone(), value),
            Syntax::Variable(name) => Syntax::Variable(name.clone()),
            Syntax::Literal(value) => Syntax::Literal(value.clone()),
            Syntax::Group(tag, value) => Syntax::Group(tag.iter().collect(), value),
        }
    }

    /// Rebuilds the same variant with every child transformed, visiting children
    /// in field order.
    pub fn map<B>(self, mut f: impl FnMut(A) -> B) -> Syntax<B> {
        match self {
            Syntax::Apply(callee, args) => {
                let callee = f(callee);
                Syntax::Apply(callee, args.into_iter().map(f).collect())
            }
            Syntax::Abstract(params, body) => {
                let params = params.into_iter().map(&mut f).collect();
                Syntax::Abstract(params, f(body))
            }
            Syntax::Assign(name, value) => Syntax::Assign(name, f(value)),
            Syntax::Variable(name) => Syntax::Variable(name),
            Syntax::Literal(value) => Syntax::Literal(value),
            Syntax::Group(tag, value) => {
                let tag = tag.into_iter().map(&mut f).collect();
                Syntax::Group(tag, f(value))
            }
        }
    }

    /// Children in field-then-position order.
    pub fn children(&self) -> Vec<&A> {
        match self {
            Syntax::Apply(callee, args) => std::iter::once(callee).chain(args).collect(),
            Syntax::Abstract(params, body) => params.iter().chain(std::iter::once(body)).collect(),
            Syntax::Assign(_, value) => vec![value],
            Syntax::Variable(_) | Syntax::Literal(_) => vec![],
            Syntax::Group(tag, value) => tag.iter().chain(std::iter::once(value)).collect(),
        }
    }
}

impl Syntax<Doc> {
    pub fn into_doc(self) -> Doc {
        match self {
            Syntax::Apply(callee, args) => {
                Doc::horizontal([callee, Doc::wrap("(", Doc::join(", ", args), ")")])
            }
            Syntax::Abstract(params, body) if params.is_empty() => {
                Doc::horizontal([Doc::text("lambda. "), body])
            }
            Syntax::Abstract(params, body) => Doc::horizontal([
                Doc::text("lambda "),
                Doc::join(", ", params),
                Doc::text(". "),
                body,
            ]),
            Syntax::Assign(name, value) => {
                Doc::horizontal([Doc::text(name.as_str()), Doc::text(" = "), value])
            }
            Syntax::Variable(name) => Doc::text(name.as_str()),
            Syntax::Literal(value) => Doc::text(value.to_string()),
            Syntax::Group(tag, value) => Doc::horizontal([
                Doc::wrap("[", Doc::join(", ", tag), "]"),
                Doc::wrap(" { ", value, " }"),
            ]),
        }
    }
}

impl<A: Pretty> Pretty for Syntax<A> {
    fn doc(&self) -> Doc {
        // A callee or parameter is followed by more syntax, so a child that
        // extends to the right must be parenthesised there.
        let closed = |child: &A| {
            if child.is_open() {
                Doc::wrap("(", child.doc(), ")")
            } else {
                child.doc()
            }
        };
        match self {
            Syntax::Apply(callee, args) => {
                Syntax::Apply(closed(callee), args.iter().map(|arg| arg.doc()).collect())
            }
            Syntax::Abstract(params, body) => {
                Syntax::Abstract(params.iter().map(closed).collect(), body.doc())
            }
            _ => self.as_ref().map(|child| child.doc()),
        }
        .into_doc()
    }

    fn is_open(&self) -> bool {
        matches!(self, Syntax::Abstract(..) | Syntax::Assign(..))
    }
}

impl<A: std::fmt::Debug> std::fmt::Debug for Syntax<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Syntax::Apply(callee, args) => f.debug_tuple("Apply").field(callee).field(args).finish(),
            Syntax::Abstract(params, body) => {
                f.debug_tuple("Abstract").field(params).field(body).finish()
            }
            Syntax::Assign(name, value) => f.debug_tuple("Assign").field(name).field(value).finish(),
            Syntax::Variable(name) => f.debug_tuple("Variable").field(name).finish(),
            Syntax::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Syntax::Group(tag, value) => f.debug_tuple("Group").field(tag).field(value).finish(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Syntax::*, *};

    fn name(s: &str) -> Name {
        Name::new(s.to_string())
    }

    #[test]
    fn test_children_order() {
        assert_eq!(Apply(1, vec![2, 3]).children(), vec![&1, &2, &3]);
        assert_eq!(Abstract(vec![1, 2], 3).children(), vec![&1, &2, &3]);
        assert_eq!(Group(vec![1], 2).children(), vec![&1, &2]);
        assert_eq!(Assign(name("x"), 1).children(), vec![&1]);
        assert!(Variable::<i32>(name("x")).children().is_empty());
        assert!(Literal::<i32>(Value::Unit).children().is_empty());
    }

    #[test]
    fn test_map() {
        let mut visited = vec![];
        let mapped = Abstract(vec![1, 2], 3).map(|n| {
            visited.push(n);
            n * 10
        });
        assert_eq!(mapped, Abstract(vec![10, 20], 30));
        assert_eq!(visited, vec![1, 2, 3]);

        assert_eq!(
            Assign(name("x"), 1).map(|n| n.to_string()),
            Assign(name("x"), "1".to_string())
        );
        assert_eq!(Variable::<i32>(name("x")).map(|n| n + 1), Variable(name("x")));
    }

    #[test]
    fn test_debug() {
        assert_eq!(
            format!("{:?}", Apply(Variable::<()>(name("f")), vec![])),
            r#"Apply(Variable("f"), [])"#
        );
        assert_eq!(format!("{:?}", Literal::<()>(Value::Nat(1))), "Literal(1)");
        assert_eq!(format!("{:?}", Literal::<()>("a".into())), r#"Literal("a")"#);
        assert_eq!(format!("{:?}", Literal::<()>(true.into())), "Literal(true)");
    }

    #[test]
    fn test_doc() {
        let doc = |s: Syntax<&str>| s.map(Doc::text).into_doc().to_string();
        assert_eq!(doc(Apply("f", vec!["x", "y"])), "f(x, y)");
        assert_eq!(doc(Apply("f", vec![])), "f()");
        assert_eq!(doc(Abstract(vec!["x", "y"], "x")), "lambda x, y. x");
        assert_eq!(doc(Abstract(vec![], "x")), "lambda. x");
        assert_eq!(doc(Assign(name("x"), "1")), "x = 1");
        assert_eq!(doc(Literal(Value::Unit)), "unit");
        assert_eq!(doc(Literal("hi".into())), r#""hi""#);
        assert_eq!(doc(Literal("a\\b \"q\"\n".into())), r#""a\\b \"q\"\n""#);
        assert_eq!(doc(Group(vec!["a", "b"], "v")), "[a, b] { v }");
    }
}
