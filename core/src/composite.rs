//! `Composite` — Aggregate of plugins with a kind precondition
//!
//! A composite registers plugins in order, evaluates every one of them
//! against a candidate, and renders a combined description:
//!
//! ```text
//! <preamble> <plugin 1><separator><plugin 2>...<terminator>
//! ```
//!
//! # Evaluation
//!
//! - Every plugin runs, in registration order. A failing plugin does not stop
//!   the next one, so all mismatch fragments are collected.
//! - The verdict is the AND of all plugin results. Zero plugins match any
//!   candidate of the right kind.
//! - The first hard error ([`MatchError`]) aborts evaluation.
//! - Through [`Composite::evaluate_any`] (or [`Erased`]) a candidate of the
//!   wrong kind short-circuits with a single fragment, and no plugin runs.
//!
//! # Nesting
//!
//! `Composite<T>` is itself a [`Matcher<T>`], so it can be the expectation of
//! a [`FieldPlugin`](crate::FieldPlugin) on an outer composite. Only the
//! outermost composite appends its terminator.

use crate::{Description, EvalTrace, MatchError, Matcher, PluginTrace, SelfDescribing, Verdict};
use std::any::Any;
use std::fmt::{self, Debug};
use tracing::{debug, trace};

/// Default separator between plugin fragments.
pub const DEFAULT_SEPARATOR: &str = "; ";

/// Default terminator appended by the outermost composite.
pub const DEFAULT_TERMINATOR: &str = ".";

/// Ordered plugins over candidates of type `T`.
///
/// Built with a consuming chain. Once borrowed for matching, a composite
/// cannot change; [`register`](Self::register) takes `self` by value and
/// returns a new composite.
///
/// # Example
///
/// ```
/// use assay::{description_of, Composite, FieldPlugin, Matcher};
///
/// #[derive(Debug)]
/// struct Point { x: i64, y: i64 }
///
/// let m = Composite::new("Point", "A Point")
///     .register(FieldPlugin::new("x", |p: &Point| Some(p.x), 1i64))
///     .register(FieldPlugin::new("y", |p: &Point| Some(p.y), 2i64));
///
/// assert_eq!(description_of(&m), "A Point with x <1>; with y <2>.");
/// assert!(m.matches(&Point { x: 1, y: 2 }).unwrap());
///
/// let verdict = m.verdict(&Point { x: 0, y: 0 }).unwrap();
/// assert_eq!(verdict.mismatch.as_deref(), Some("x was <0>; y was <0>."));
/// ```
pub struct Composite<T: ?Sized> {
    kind: String,
    preamble: String,
    separator: String,
    terminator: String,
    plugins: Vec<Box<dyn Matcher<T>>>,
}

impl<T: ?Sized> Composite<T> {
    /// Create an empty composite guarding candidates of `kind`.
    #[must_use]
    pub fn new(kind: impl Into<String>, preamble: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            preamble: preamble.into(),
            separator: DEFAULT_SEPARATOR.to_string(),
            terminator: DEFAULT_TERMINATOR.to_string(),
            plugins: Vec::new(),
        }
    }

    /// Set the separator between fragments.
    #[must_use]
    pub fn separated_by(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the terminator appended at the top level.
    #[must_use]
    pub fn terminated_by(mut self, terminator: impl Into<String>) -> Self {
        self.terminator = terminator.into();
        self
    }

    /// Append a plugin. Registration order is evaluation and rendering order.
    #[must_use]
    pub fn register(mut self, plugin: impl Matcher<T> + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// The candidate kind this composite guards.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// `true` if no plugin is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Evaluate every plugin against `actual`.
    ///
    /// Returns a fresh [`EvalTrace`]; nothing is stored on the composite.
    ///
    /// # Errors
    ///
    /// Returns the first hard error raised by a plugin.
    pub fn evaluate(&self, actual: &T) -> Result<EvalTrace, MatchError> {
        let mut steps = Vec::with_capacity(self.plugins.len());
        for (index, plugin) in self.plugins.iter().enumerate() {
            let step = Self::evaluate_plugin(index, &**plugin, actual).inspect_err(|err| {
                debug!(kind = %self.kind, index, error = %err, "plugin evaluation failed");
            })?;
            trace!(kind = %self.kind, index, matched = step.matched, "plugin evaluated");
            steps.push(step);
        }
        Ok(EvalTrace::from_steps(steps))
    }

    fn evaluate_plugin(
        index: usize,
        plugin: &dyn Matcher<T>,
        actual: &T,
    ) -> Result<PluginTrace, MatchError> {
        let root = Description::new();
        let mut expectation = root.child();
        plugin.describe_to(&mut expectation);

        let matched = plugin.matches(actual)?;
        let mismatch = if matched {
            None
        } else {
            let mut fragment = root.child();
            plugin.describe_mismatch(actual, &mut fragment)?;
            Some(fragment.into_string())
        };
        Ok(PluginTrace {
            index,
            matched,
            expectation: expectation.into_string(),
            mismatch,
        })
    }

    fn render_fragments<'a, I>(&self, fragments: I, description: &mut Description)
    where
        I: IntoIterator<Item = &'a str>,
    {
        description.append_list("", &self.separator, "", fragments);
        if description.is_top_level() {
            description.append_text(&self.terminator);
        }
    }
}

impl<T: 'static> Composite<T> {
    /// Evaluate a candidate of unknown type.
    ///
    /// A candidate that is not a `T` yields a trace with the single fragment
    /// `The item is not an instance of <kind>` and no plugin is evaluated.
    ///
    /// # Errors
    ///
    /// Returns the first hard error raised by a plugin.
    pub fn evaluate_any(&self, actual: &dyn Any) -> Result<EvalTrace, MatchError> {
        match actual.downcast_ref::<T>() {
            Some(candidate) => self.evaluate(candidate),
            None => {
                debug!(kind = %self.kind, "candidate is of the wrong kind");
                Ok(EvalTrace::kind_mismatch(format!(
                    "The item is not an instance of {}",
                    self.kind
                )))
            }
        }
    }

    /// Wrap into a matcher over `dyn Any`, checking the kind first.
    #[must_use]
    pub fn erased(self) -> Erased<T> {
        Erased { inner: self }
    }
}

impl<T: ?Sized> Debug for Composite<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("kind", &self.kind)
            .field("plugins", &self.plugins)
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized> SelfDescribing for Composite<T> {
    fn describe_to(&self, description: &mut Description) {
        description.append_text(&self.preamble);
        if !self.plugins.is_empty() {
            description.append_text(" ");
            let parts: Vec<String> = self
                .plugins
                .iter()
                .map(|plugin| {
                    let mut part = description.child();
                    plugin.describe_to(&mut part);
                    part.into_string()
                })
                .collect();
            description.append_list("", &self.separator, "", parts);
        }
        if description.is_top_level() {
            description.append_text(&self.terminator);
        }
    }
}

impl<T: ?Sized> Matcher<T> for Composite<T> {
    fn matches(&self, actual: &T) -> Result<bool, MatchError> {
        Ok(self.evaluate(actual)?.matched)
    }

    fn describe_mismatch(&self, actual: &T, description: &mut Description) -> Result<(), MatchError> {
        let trace = self.evaluate(actual)?;
        self.render_fragments(trace.fragments(), description);
        Ok(())
    }

    fn verdict(&self, actual: &T) -> Result<Verdict, MatchError> {
        let trace = self.evaluate(actual)?;
        if trace.matched {
            return Ok(Verdict::matched());
        }
        let mut description = Description::new();
        self.render_fragments(trace.fragments(), &mut description);
        Ok(Verdict::mismatched(description.into_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Erased
// ═══════════════════════════════════════════════════════════════════════════════

/// A [`Composite<T>`] matching candidates of any type.
///
/// Candidates that are not a `T` fail with a single kind fragment.
///
/// # Example
///
/// ```
/// use assay::{Composite, Matcher};
/// use std::any::Any;
///
/// let m = Composite::<String>::new("String", "A String").erased();
/// let wrong: &dyn Any = &42u8;
/// let verdict = m.verdict(wrong).unwrap();
/// assert_eq!(verdict.mismatch.as_deref(), Some("The item is not an instance of String."));
/// ```
pub struct Erased<T> {
    inner: Composite<T>,
}

impl<T: 'static> Erased<T> {
    /// The wrapped composite.
    #[must_use]
    pub fn inner(&self) -> &Composite<T> {
        &self.inner
    }

    /// Unwrap back into the typed composite.
    #[must_use]
    pub fn into_inner(self) -> Composite<T> {
        self.inner
    }
}

impl<T> Debug for Erased<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Erased").field(&self.inner).finish()
    }
}

impl<T> SelfDescribing for Erased<T> {
    fn describe_to(&self, description: &mut Description) {
        self.inner.describe_to(description);
    }
}

impl<T: 'static> Matcher<dyn Any> for Erased<T> {
    fn matches(&self, actual: &dyn Any) -> Result<bool, MatchError> {
        Ok(self.inner.evaluate_any(actual)?.matched)
    }

    fn describe_mismatch(&self, actual: &dyn Any, description: &mut Description) -> Result<(), MatchError> {
        let trace = self.inner.evaluate_any(actual)?;
        self.inner.render_fragments(trace.fragments(), description);
        Ok(())
    }

    fn verdict(&self, actual: &dyn Any) -> Result<Verdict, MatchError> {
        let trace = self.inner.evaluate_any(actual)?;
        if trace.matched {
            return Ok(Verdict::matched());
        }
        let mut description = Description::new();
        self.inner.render_fragments(trace.fragments(), &mut description);
        Ok(Verdict::mismatched(description.into_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{description_of, mismatch_of, FieldPlugin, FlagPlugin};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: String,
        size: i64,
        fresh: bool,
    }

    fn item() -> Item {
        Item {
            name: "apple".into(),
            size: 3,
            fresh: true,
        }
    }

    fn name(expected: &str) -> FieldPlugin<Item, String> {
        FieldPlugin::new("name", |i: &Item| Some(i.name.clone()), expected)
    }

    fn size(expected: i64) -> FieldPlugin<Item, i64> {
        FieldPlugin::new("size", |i: &Item| Some(i.size), expected)
    }

    fn fresh(expected: bool) -> FlagPlugin<Item> {
        FlagPlugin::new("fresh", |i: &Item| i.fresh, expected)
    }

    #[test]
    fn empty_composite_matches_right_kind() {
        let m = Composite::<Item>::new("Item", "An Item");
        assert!(m.is_empty());
        assert!(m.matches(&item()).unwrap());
        assert_eq!(description_of(&m), "An Item.");
    }

    #[test]
    fn describe_joins_plugins() {
        let m = Composite::new("Item", "An Item")
            .register(name("apple"))
            .register(fresh(true));
        assert_eq!(m.len(), 2);
        assert_eq!(description_of(&m), "An Item with name <\"apple\">; is fresh.");
    }

    #[test]
    fn describe_is_idempotent() {
        let m = Composite::new("Item", "An Item").register(size(3));
        assert_eq!(description_of(&m), description_of(&m));
    }

    #[test]
    fn mismatch_lists_only_failing_plugins() {
        let m = Composite::new("Item", "An Item")
            .register(name("pear"))
            .register(size(3))
            .register(fresh(false));
        assert!(!m.matches(&item()).unwrap());
        assert_eq!(
            mismatch_of(&m, &item()).unwrap(),
            "name was <\"apple\">; is fresh."
        );
    }

    #[test]
    fn fragments_follow_registration_order() {
        let forward = Composite::new("Item", "An Item")
            .register(size(1))
            .register(name("pear"));
        let backward = Composite::new("Item", "An Item")
            .register(name("pear"))
            .register(size(1));

        let forward = forward.evaluate(&item()).unwrap();
        let backward = backward.evaluate(&item()).unwrap();
        assert_eq!(
            forward.fragments().collect::<Vec<_>>(),
            vec!["size was <3>", "name was <\"apple\">"]
        );
        assert_eq!(
            backward.fragments().collect::<Vec<_>>(),
            vec!["name was <\"apple\">", "size was <3>"]
        );
    }

    #[test]
    fn every_plugin_runs_after_a_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let m = Composite::new("Item", "An Item")
            .register(size(100))
            .register(FieldPlugin::new(
                "name",
                move |i: &Item| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Some(i.name.clone())
                },
                "apple",
            ));
        let trace = m.evaluate(&item()).unwrap();
        assert!(!trace.matched);
        assert_eq!(trace.steps.len(), 2);
        assert!(trace.steps[1].matched);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reuse_yields_fresh_traces() {
        let m = Composite::new("Item", "An Item").register(size(3));
        let small = Item { size: 1, ..item() };
        assert_eq!(
            m.verdict(&small).unwrap(),
            Verdict::mismatched("size was <1>.")
        );
        assert_eq!(m.verdict(&item()).unwrap(), Verdict::matched());
    }

    #[test]
    fn hard_error_aborts() {
        let m = Composite::new("Item", "An Item")
            .register(FieldPlugin::try_new(
                "size",
                |_: &Item| -> Result<Option<i64>, MatchError> {
                    Err(MatchError::InvalidCandidate {
                        reason: "unreadable".into(),
                    })
                },
                3i64,
            ))
            .register(name("apple"));
        assert!(matches!(
            m.evaluate(&item()),
            Err(MatchError::InvalidCandidate { .. })
        ));
        assert!(m.verdict(&item()).is_err());
    }

    #[test]
    fn wrong_kind_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let m = Composite::new("Item", "An Item")
            .register(FieldPlugin::new(
                "size",
                move |i: &Item| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Some(i.size)
                },
                3i64,
            ))
            .erased();

        let wrong: &dyn Any = &"not an item";
        let trace = m.inner().evaluate_any(wrong).unwrap();
        assert!(!trace.matched);
        assert_eq!(
            trace.fragments().collect::<Vec<_>>(),
            vec!["The item is not an instance of Item"]
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let right: &dyn Any = &item();
        assert!(m.matches(right).unwrap());
    }

    #[test]
    fn nested_composite_renders_without_inner_terminator() {
        #[derive(Debug)]
        struct Basket {
            item: Item,
        }

        let inner = Composite::new("Item", "An Item")
            .separated_by(", ")
            .register(name("pear"))
            .register(size(5));
        let outer = Composite::new("Basket", "A Basket").register(
            FieldPlugin::new("item:", |b: &Basket| Some(b.item.clone()), inner),
        );

        assert_eq!(
            description_of(&outer),
            "A Basket with item: An Item with name <\"pear\">, with size <5>."
        );
        let basket = Basket { item: item() };
        assert_eq!(
            mismatch_of(&outer, &basket).unwrap(),
            "item: name was <\"apple\">, size was <3>."
        );
    }

    #[test]
    fn custom_separator_and_terminator() {
        let m = Composite::new("Item", "An Item")
            .separated_by(" / ")
            .terminated_by("!")
            .register(size(1))
            .register(fresh(false));
        assert_eq!(description_of(&m), "An Item with size <1> / is not fresh!");
    }
}
