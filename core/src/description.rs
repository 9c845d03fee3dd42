//! `Description` — Append-only text sink for expectation and mismatch text
//!
//! Matchers never build strings directly. They append fragments to a
//! [`Description`], which the assertion entry point renders once a match fails.
//!
//! # Nesting
//!
//! Composite matchers can contain other composites. The sink tracks how deep
//! the current rendering is, so only the outermost composite appends its
//! terminator (see [`Description::nested`]).

use std::fmt::{self, Debug};

/// Something that can describe itself into a [`Description`].
///
/// Every [`Matcher`](crate::Matcher) is self-describing: `describe_to` renders
/// the expectation ("with status code <200>").
pub trait SelfDescribing {
    /// Append a description of `self` to `description`.
    fn describe_to(&self, description: &mut Description);
}

impl<S: SelfDescribing + ?Sized> SelfDescribing for Box<S> {
    fn describe_to(&self, description: &mut Description) {
        (**self).describe_to(description);
    }
}

/// Append-only text builder for human-readable matcher output.
///
/// # Example
///
/// ```
/// use assay::Description;
///
/// let mut description = Description::new();
/// description.append_text("status code ").append_value(&200);
/// assert_eq!(description.as_str(), "status code <200>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    text: String,
    depth: usize,
}

impl Description {
    /// Create an empty, top-level description.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append literal text.
    pub fn append_text(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self
    }

    /// Append a value rendered as `<{value:?}>`.
    pub fn append_value<V: Debug + ?Sized>(&mut self, value: &V) -> &mut Self {
        use std::fmt::Write;
        // Writing into a String cannot fail.
        let _ = write!(self.text, "<{value:?}>");
        self
    }

    /// Append the self-description of `value`.
    pub fn append_description_of<S: SelfDescribing + ?Sized>(&mut self, value: &S) -> &mut Self {
        value.describe_to(self);
        self
    }

    /// Append `items` as `start item1 separator item2 ... end`.
    pub fn append_list<I, S>(&mut self, start: &str, separator: &str, end: &str, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.text.push_str(start);
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.text.push_str(separator);
            }
            self.text.push_str(item.as_ref());
        }
        self.text.push_str(end);
        self
    }

    /// Run `f` one nesting level deeper.
    ///
    /// Composite matchers render their children inside `nested`, so a child
    /// composite sees [`is_top_level`](Self::is_top_level) as `false` and
    /// leaves the terminator to its parent.
    pub fn nested<F: FnOnce(&mut Self)>(&mut self, f: F) -> &mut Self {
        self.depth += 1;
        f(self);
        self.depth -= 1;
        self
    }

    /// An empty description one level deeper than `self`.
    ///
    /// Used to render a child fragment in isolation before joining it.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            text: String::new(),
            depth: self.depth + 1,
        }
    }

    /// `true` when no enclosing composite is rendering.
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.depth == 0
    }

    /// `true` if nothing has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The text rendered so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume the description, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render `value`'s self-description into a fresh string.
#[must_use]
pub fn description_of<S: SelfDescribing + ?Sized>(value: &S) -> String {
    let mut description = Description::new();
    value.describe_to(&mut description);
    description.into_string()
}
