//! Structural diff of two terms.
//!
//! A diff mirrors the shape the two terms share. Wherever their outer
//! constructors agree the diff copies that constructor and recurses into the
//! children; wherever they disagree the whole subtree is patched, i.e. deleted
//! and re-inserted as a unit.

use std::{cmp::Ordering, rc::Rc};

use crate::{
    doc::{Doc, Pretty},
    syntax::Syntax,
    term::Term,
};

#[derive(PartialEq, Eq, Clone)]
pub enum Diff {
    /// Both sides are absent.
    Empty,
    /// Replace the first term with the second.
    Patch(Term, Term),
    /// Same constructor on both sides; the children are diffs.
    Copy(Rc<Syntax<Diff>>),
}

impl Diff {
    pub fn insert(term: Term) -> Self {
        Diff::Patch(Term::Empty, term)
    }

    pub fn delete(term: Term) -> Self {
        Diff::Patch(term, Term::Empty)
    }

    pub fn new(old: &Term, new: &Term) -> Self {
        use Syntax::*;
        let (a, b) = match (old, new) {
            (Term::Empty, Term::Empty) => return Diff::Empty,
            (Term::Roll(a), Term::Roll(b)) => (a.as_ref(), b.as_ref()),
            _ => return Diff::Patch(old.clone(), new.clone()),
        };
        let syntax = match (a, b) {
            (Apply(f1, args1), Apply(f2, args2)) => {
                Apply(Diff::new(f1, f2), diff_sequence(args1, args2))
            }
            (Abstract(params1, body1), Abstract(params2, body2)) => {
                Abstract(diff_sequence(params1, params2), Diff::new(body1, body2))
            }
            (Assign(n1, v1), Assign(n2, v2)) if n1 == n2 => Assign(n2.clone(), Diff::new(v1, v2)),
            (Variable(n1), Variable(n2)) if n1 == n2 => Variable(n2.clone()),
            (Literal(v1), Literal(v2)) if v1 == v2 => Literal(v2.clone()),
            (Group(tag1, v1), Group(tag2, v2)) => {
                Group(diff_sequence(tag1, tag2), Diff::new(v1, v2))
            }
            _ => return Diff::Patch(old.clone(), new.clone()),
        };
        Diff::Copy(syntax.into())
    }

    /// Number of patches in the diff. A patch counts once however large the
    /// subtrees it replaces are.
    pub fn magnitude(&self) -> usize {
        match self {
            Diff::Empty => 0,
            Diff::Patch(_, _) => 1,
            Diff::Copy(syntax) => syntax.children().into_iter().map(Diff::magnitude).sum(),
        }
    }

    /// Orders diffs by magnitude alone. Distinct diffs of equal magnitude compare
    /// `Equal`.
    pub fn cmp_magnitude(&self, other: &Self) -> Ordering {
        self.magnitude().cmp(&other.magnitude())
    }

    pub fn debug_text(&self) -> String {
        format!("{self:?}")
    }
}

pub fn diff(old: &Term, new: &Term) -> Diff {
    Diff::new(old, new)
}

/// Pairs two sequences by index. Surplus elements on either side become pure
/// deletions or insertions, in order.
pub fn diff_sequence(old: &[Term], new: &[Term]) -> Vec<Diff> {
    let mut diffs = Vec::with_capacity(std::cmp::max(old.len(), new.len()));
    let (mut old, mut new) = (old.iter(), new.iter());
    loop {
        match (old.next(), new.next()) {
            (Some(a), Some(b)) => diffs.push(Diff::new(a, b)),
            (Some(a), None) => {
                diffs.extend(std::iter::once(a).chain(old).cloned().map(Diff::delete));
                break;
            }
            (None, Some(b)) => {
                diffs.extend(std::iter::once(b).chain(new).cloned().map(Diff::insert));
                break;
            }
            (None, None) => break,
        }
    }
    diffs
}

/// Diffs every candidate against `old` and orders the results by magnitude,
/// cheapest first. The sort is stable, so candidates of equal magnitude keep
/// their input order.
pub fn rank<'a>(
    old: &Term,
    candidates: impl IntoIterator<Item = &'a Term>,
) -> Vec<(&'a Term, Diff)> {
    let mut ranked = candidates
        .into_iter()
        .map(|candidate| (candidate, Diff::new(old, candidate)))
        .collect::<Vec<_>>();
    ranked.sort_by(|(_, lhs), (_, rhs)| lhs.cmp_magnitude(rhs));
    ranked
}

impl Pretty for Diff {
    fn doc(&self) -> Doc {
        match self {
            Diff::Empty => Doc::Empty,
            Diff::Patch(a, b) => {
                // An absent side is shown as empty brackets rather than `_`.
                let side = |term: &Term| match term {
                    Term::Empty => Doc::Empty,
                    term => term.doc(),
                };
                Doc::horizontal([
                    Doc::wrap("{-", side(a), "-}"),
                    Doc::wrap("{+", side(b), "+}"),
                ])
            }
            Diff::Copy(syntax) => syntax.doc(),
        }
    }

    fn is_open(&self) -> bool {
        match self {
            Diff::Copy(syntax) => syntax.is_open(),
            Diff::Empty | Diff::Patch(..) => false,
        }
    }
}

impl std::fmt::Display for Diff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", self.doc()))
    }
}

impl std::fmt::Debug for Diff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diff::Empty => f.write_str("Empty"),
            Diff::Patch(a, b) => f.debug_tuple("Patch").field(a).field(b).finish(),
            Diff::Copy(syntax) => f.debug_tuple("Copy").field(syntax).finish(),
        }
    }
}
