use std::rc::Rc;

use crate::{
    doc::{Doc, Pretty},
    prelude::*,
    syntax::{Syntax, Value},
};

/// An expression tree: either absent, or one layer of `Syntax` over further terms.
#[derive(PartialEq, Eq, Clone, Default)]
pub enum Term {
    #[default]
    Empty,
    Roll(Rc<Syntax<Term>>),
}

impl Term {
    pub fn apply(callee: Term, args: Vec<Term>) -> Self {
        Syntax::Apply(callee, args).into()
    }
    pub fn lambda(params: Vec<Term>, body: Term) -> Self {
        Syntax::Abstract(params, body).into()
    }
    pub fn assign(name: impl Into<String>, value: Term) -> Self {
        Syntax::Assign(Name::new(name.into()), value).into()
    }
    pub fn variable(name: impl Into<String>) -> Self {
        Syntax::Variable(Name::new(name.into())).into()
    }
    pub fn literal(value: impl Into<Value>) -> Self {
        Syntax::Literal(value.into()).into()
    }
    pub fn group(tag: Vec<Term>, value: Term) -> Self {
        Syntax::Group(tag, value).into()
    }

    pub fn syntax(&self) -> Option<&Syntax<Term>> {
        match self {
            Term::Empty => None,
            Term::Roll(syntax) => Some(syntax),
        }
    }
}

impl From<Syntax<Term>> for Term {
    fn from(syntax: Syntax<Term>) -> Self {
        Term::Roll(syntax.into())
    }
}

impl Pretty for Term {
    fn doc(&self) -> Doc {
        match self {
            Term::Empty => Doc::text("_"),
            Term::Roll(syntax) => syntax.doc(),
        }
    }

    fn is_open(&self) -> bool {
        self.syntax().map_or(false, Pretty::is_open)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", self.doc()))
    }
}

impl std::fmt::Debug for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Empty => f.write_str("Empty"),
            Term::Roll(syntax) => std::fmt::Debug::fmt(syntax, f),
        }
    }
}
