//! Config types for data-driven expectations.
//!
//! A [`ValueConfig`] is what a user writes for one expectation in YAML or
//! JSON: either a bare literal or a single-key rule map.
//!
//! ```yaml
//! status: 200                     # literal
//! content: { contains: "dude" }   # rule
//! header: { prefix: "APP", ignore_case: true }
//! max_age: { gt: 30 }
//! ```
//!
//! # Rule keys
//!
//! | Value type | Keys |
//! |------------|------|
//! | `String` | `equal_to`, `prefix`, `suffix`, `contains`, `regex`, `anything` |
//! | `i64`, `u16` | `equal_to`, `gt`, `ge`, `lt`, `le`, `anything` |
//!
//! `ignore_case: bool` is a modifier for string rules and does not count as a
//! key. Zero keys is [`MatchError::MissingExpectation`]; more than one is
//! [`MatchError::AmbiguousExpectation`]. Both surface when the config is
//! compiled, never at match time.

use crate::{
    anything, at_least, at_most, greater_than, less_than, wrap, MatchError, Matchable,
    StringMatcher,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Modifier key accepted next to a string rule.
pub const IGNORE_CASE_KEY: &str = "ignore_case";

/// A literal value or a single-key rule map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ValueConfig<V> {
    /// Bare literal, compared by equality.
    Literal(V),
    /// `{ <rule>: <argument> }`, optionally with `ignore_case`.
    Rule(BTreeMap<String, Value>),
}

/// Value types a [`ValueConfig`] can compile to.
pub trait ConfigValue: Sized + Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Type name used in error messages.
    const TYPE_NAME: &'static str;

    /// Compile one rule key and its argument.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfig`] for an unknown key or a bad
    /// argument, and [`MatchError::InvalidPattern`] for a bad regex.
    fn compile_rule(
        field: &str,
        key: &str,
        argument: &Value,
        ignore_case: bool,
    ) -> Result<Matchable<Self>, MatchError>;
}

impl<V: ConfigValue> ValueConfig<V> {
    /// Compile into a [`Matchable`].
    ///
    /// `field` names the expectation in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::MissingExpectation`],
    /// [`MatchError::AmbiguousExpectation`], [`MatchError::InvalidConfig`] or
    /// [`MatchError::InvalidPattern`].
    pub fn compile(&self, field: &str) -> Result<Matchable<V>, MatchError> {
        let rule = match self {
            Self::Literal(value) => return Ok(Matchable::Literal(value.clone())),
            Self::Rule(rule) => rule,
        };

        let ignore_case = match rule.get(IGNORE_CASE_KEY) {
            None => false,
            Some(Value::Bool(flag)) => *flag,
            Some(other) => {
                return Err(invalid(field, format!("{IGNORE_CASE_KEY} must be a bool, got {other}")))
            }
        };

        let keys: Vec<(&String, &Value)> = rule
            .iter()
            .filter(|(key, _)| key.as_str() != IGNORE_CASE_KEY)
            .collect();
        match keys.as_slice() {
            [] => Err(MatchError::MissingExpectation {
                field: field.to_string(),
            }),
            [(key, argument)] => V::compile_rule(field, key, argument, ignore_case),
            many => Err(MatchError::AmbiguousExpectation {
                field: field.to_string(),
                found: many.iter().map(|(key, _)| (*key).clone()).collect(),
            }),
        }
    }
}

pub(crate) fn invalid(field: &str, message: impl std::fmt::Display) -> MatchError {
    MatchError::InvalidConfig {
        reason: format!("{field}: {message}"),
    }
}

impl ConfigValue for String {
    const TYPE_NAME: &'static str = "string";

    fn compile_rule(
        field: &str,
        key: &str,
        argument: &Value,
        ignore_case: bool,
    ) -> Result<Matchable<Self>, MatchError> {
        if key == "anything" {
            return compile_anything(field, argument);
        }
        let value = argument
            .as_str()
            .ok_or_else(|| invalid(field, format!("`{key}` expects a string, got {argument}")))?;
        let matcher = match key {
            "equal_to" if !ignore_case => return Ok(Matchable::Literal(value.to_string())),
            "equal_to" => StringMatcher::exact(value, true),
            "prefix" => StringMatcher::prefix(value, ignore_case),
            "suffix" => StringMatcher::suffix(value, ignore_case),
            "contains" => StringMatcher::contains(value, ignore_case),
            "regex" if ignore_case => StringMatcher::regex_ignore_case(value)?,
            "regex" => StringMatcher::regex(value)?,
            other => {
                return Err(invalid(
                    field,
                    format!("unknown {} rule `{other}`", Self::TYPE_NAME),
                ))
            }
        };
        Ok(wrap(matcher))
    }
}

/// `anything: true` is the only accepted form.
fn compile_anything<V: ConfigValue>(field: &str, argument: &Value) -> Result<Matchable<V>, MatchError> {
    match argument {
        Value::Bool(true) => Ok(wrap(anything())),
        other => Err(invalid(field, format!("`anything` expects true, got {other}"))),
    }
}

fn compile_number<N>(field: &str, key: &str, argument: &Value, ignore_case: bool) -> Result<Matchable<N>, MatchError>
where
    N: ConfigValue + PartialOrd + TryFrom<i64>,
{
    if ignore_case {
        return Err(invalid(field, format!("{IGNORE_CASE_KEY} applies only to string rules")));
    }
    if key == "anything" {
        return compile_anything(field, argument);
    }
    let bound = argument
        .as_i64()
        .and_then(|raw| N::try_from(raw).ok())
        .ok_or_else(|| invalid(field, format!("`{key}` expects a {}, got {argument}", N::TYPE_NAME)))?;
    match key {
        "equal_to" => Ok(Matchable::Literal(bound)),
        "gt" => Ok(wrap(greater_than(bound))),
        "ge" => Ok(wrap(at_least(bound))),
        "lt" => Ok(wrap(less_than(bound))),
        "le" => Ok(wrap(at_most(bound))),
        other => Err(invalid(
            field,
            format!("unknown {} rule `{other}`", N::TYPE_NAME),
        )),
    }
}

impl ConfigValue for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn compile_rule(
        field: &str,
        key: &str,
        argument: &Value,
        ignore_case: bool,
    ) -> Result<Matchable<Self>, MatchError> {
        compile_number(field, key, argument, ignore_case)
    }
}

impl ConfigValue for u16 {
    const TYPE_NAME: &'static str = "status code";

    fn compile_rule(
        field: &str,
        key: &str,
        argument: &Value,
        ignore_case: bool,
    ) -> Result<Matchable<Self>, MatchError> {
        compile_number(field, key, argument, ignore_case)
    }
}
