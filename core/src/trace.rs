//! Evaluation trace types for explaining composite verdicts.
//!
//! Every call to [`Composite::evaluate`](crate::Composite::evaluate) returns a
//! fresh [`EvalTrace`]. Nothing is recorded on the matcher itself, so one
//! matcher can be evaluated against any number of candidates.
//!
//! # Example
//!
//! ```ignore
//! let trace = matcher.evaluate(&response)?;
//! println!("Result: {}", trace.matched);
//! for step in &trace.steps {
//!     println!("  plugin[{}]: matched={}", step.index, step.matched);
//! }
//! ```

use std::fmt;

/// Trace of one composite evaluation.
#[derive(Clone, PartialEq, Eq)]
pub struct EvalTrace {
    /// Whether every plugin matched.
    pub matched: bool,
    /// Set when the candidate was of the wrong kind. No plugin ran.
    pub kind_mismatch: Option<String>,
    /// One step per plugin, in registration order.
    pub steps: Vec<PluginTrace>,
}

impl EvalTrace {
    /// Build a trace from evaluated plugin steps.
    #[must_use]
    pub fn from_steps(steps: Vec<PluginTrace>) -> Self {
        Self {
            matched: steps.iter().all(|step| step.matched),
            kind_mismatch: None,
            steps,
        }
    }

    /// A trace for a candidate that failed the kind precondition.
    #[must_use]
    pub fn kind_mismatch(fragment: impl Into<String>) -> Self {
        Self {
            matched: false,
            kind_mismatch: Some(fragment.into()),
            steps: Vec::new(),
        }
    }

    /// Mismatch fragments in registration order.
    ///
    /// Yields the single kind fragment for a wrong-kind candidate, otherwise
    /// one fragment per failing plugin.
    pub fn fragments(&self) -> impl Iterator<Item = &str> + '_ {
        self.kind_mismatch.as_deref().into_iter().chain(
            self.steps
                .iter()
                .filter_map(|step| step.mismatch.as_deref()),
        )
    }
}

impl fmt::Debug for EvalTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalTrace")
            .field("matched", &self.matched)
            .field("kind_mismatch", &self.kind_mismatch)
            .field("steps", &self.steps)
            .finish()
    }
}

/// Trace of one plugin within a composite.
#[derive(Clone, PartialEq, Eq)]
pub struct PluginTrace {
    /// Index of the plugin in registration order.
    pub index: usize,
    /// Whether the plugin matched.
    pub matched: bool,
    /// The plugin's self-description.
    pub expectation: String,
    /// The plugin's mismatch fragment, present only when it failed.
    pub mismatch: Option<String>,
}

impl fmt::Debug for PluginTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginTrace")
            .field("index", &self.index)
            .field("matched", &self.matched)
            .field("expectation", &self.expectation)
            .field("mismatch", &self.mismatch)
            .finish()
    }
}
