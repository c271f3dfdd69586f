//! A minimal document tree for the markup view.
//!
//! Layout is flat: `Display` concatenates fragments left to right.

#[derive(PartialEq, Eq, Clone, Default, Debug)]
pub enum Doc {
    #[default]
    Empty,
    Text(String),
    Horizontal(Vec<Doc>),
    Wrap(String, Box<Doc>, String),
}

impl Doc {
    pub fn text(text: impl Into<String>) -> Self {
        Doc::Text(text.into())
    }

    pub fn horizontal(docs: impl IntoIterator<Item = Doc>) -> Self {
        Doc::Horizontal(docs.into_iter().collect())
    }

    pub fn wrap(open: impl Into<String>, inner: Doc, close: impl Into<String>) -> Self {
        Doc::Wrap(open.into(), inner.into(), close.into())
    }

    /// Interleaves `separator` between `docs`.
    pub fn join(separator: &str, docs: impl IntoIterator<Item = Doc>) -> Self {
        let mut joined = Vec::new();
        for (i, doc) in docs.into_iter().enumerate() {
            if i > 0 {
                joined.push(Doc::text(separator));
            }
            joined.push(doc);
        }
        Doc::Horizontal(joined)
    }
}

impl std::fmt::Display for Doc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Doc::Empty => Ok(()),
            Doc::Text(text) => f.write_str(text),
            Doc::Horizontal(docs) => docs
                .iter()
                .try_for_each(|doc| std::fmt::Display::fmt(doc, f)),
            Doc::Wrap(open, inner, close) => f.write_fmt(format_args!("{open}{inner}{close}")),
        }
    }
}

/// Types with a markup rendering.
pub trait Pretty {
    fn doc(&self) -> Doc;

    /// Whether the rendering runs on to the right, like `lambda x. body` or
    /// `x = value`, and so needs parentheses before further syntax.
    fn is_open(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Doc::Empty.to_string(), "");
        assert_eq!(
            Doc::horizontal([
                Doc::wrap("{-", Doc::text("2"), "-}"),
                Doc::wrap("{+", Doc::text("3"), "+}"),
            ])
            .to_string(),
            "{-2-}{+3+}"
        );
        assert_eq!(Doc::wrap("(", Doc::Empty, ")").to_string(), "()");
    }

    #[test]
    fn test_join() {
        let docs = ["a", "b", "c"].into_iter().map(Doc::text);
        assert_eq!(Doc::join(", ", docs).to_string(), "a, b, c");
        assert_eq!(Doc::join(", ", Vec::new()).to_string(), "");
        assert_eq!(Doc::join(", ", [Doc::text("a")]).to_string(), "a");
    }
}
