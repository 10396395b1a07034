// vim: tw=80
//! Argument matchers and their composition.

use std::fmt;

use predicates::Predicate;
use predicates_tree::CaseTreeExt;

/// A predicate over one actual argument value.
///
/// Matchers are immutable once built and free of side effects, so they may
/// be evaluated any number of times and shared across expectations.  Bare
/// values convert into the [`Identical`](Matcher::Identical) variant via
/// `From`, which is how literals passed to [`Mock::expects`] become
/// matchers.
///
/// [`Mock::expects`]: crate::Mock::expects
pub enum Matcher<V> {
    /// Matches iff the argument equals the wrapped value.
    Identical(V),
    /// Matches iff the wrapped [`Predicate`] accepts the argument.
    Predicate(Box<dyn Predicate<V>>),
    /// Matches iff every child matches.  Evaluation stops at the first
    /// child that rejects.
    AllOf(Vec<Matcher<V>>),
    /// Matches iff at least one child matches.  Evaluation stops at the
    /// first child that accepts.
    AnyOf(Vec<Matcher<V>>),
    /// Matches iff no child matches.
    NoneOf(Vec<Matcher<V>>),
}

impl<V> Matcher<V> {
    /// An exact-value matcher.  Equivalent to `value.into()`.
    pub fn identical_to(value: V) -> Self {
        Matcher::Identical(value)
    }

    /// Wrap any [`Predicate`] as a matcher.
    pub fn matching<P>(pred: P) -> Self
        where P: Predicate<V> + 'static
    {
        Matcher::Predicate(Box::new(pred))
    }

    /// A matcher accepting only what every child accepts.
    pub fn all_of(children: Vec<Matcher<V>>) -> Self {
        Matcher::AllOf(children)
    }

    /// A matcher accepting what any child accepts.
    pub fn any_of(children: Vec<Matcher<V>>) -> Self {
        Matcher::AnyOf(children)
    }

    /// A matcher rejecting what any child accepts.
    pub fn none_of(children: Vec<Matcher<V>>) -> Self {
        Matcher::NoneOf(children)
    }
}

impl<V: PartialEq> Matcher<V> {
    /// Evaluate the matcher against one actual argument.
    pub fn matches(&self, value: &V) -> bool {
        match self {
            Matcher::Identical(expected) => value == expected,
            Matcher::Predicate(p) => p.eval(value),
            Matcher::AllOf(ms) => ms.iter().all(|m| m.matches(value)),
            Matcher::AnyOf(ms) => ms.iter().any(|m| m.matches(value)),
            Matcher::NoneOf(ms) => !ms.iter().any(|m| m.matches(value)),
        }
    }
}

impl<V: PartialEq + fmt::Debug> Matcher<V> {
    /// Explain why `value` was rejected, or `None` if it wasn't.
    pub(crate) fn mismatch(&self, value: &V) -> Option<String> {
        if self.matches(value) {
            return None;
        }
        let why = match self {
            Matcher::Identical(expected) => {
                format!("expected {:?}, got {:?}", expected, value)
            },
            Matcher::Predicate(p) => match p.find_case(false, value) {
                Some(c) => c.tree().to_string(),
                None => format!("{} rejected {:?}", p, value),
            },
            _ => format!("{} rejected {:?}", self, value),
        };
        Some(why)
    }
}

impl<V> From<V> for Matcher<V> {
    fn from(value: V) -> Self {
        Matcher::Identical(value)
    }
}

impl<V: fmt::Debug> fmt::Display for Matcher<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Identical(v) => write!(f, "{:?}", v),
            Matcher::Predicate(p) => write!(f, "{}", p),
            Matcher::AllOf(ms) => write_group(f, "all_of", ms),
            Matcher::AnyOf(ms) => write_group(f, "any_of", ms),
            Matcher::NoneOf(ms) => write_group(f, "none_of", ms),
        }
    }
}

fn write_group<V: fmt::Debug>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    children: &[Matcher<V>]) -> fmt::Result
{
    write!(f, "{}(", name)?;
    for (i, m) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", m)?;
    }
    f.write_str(")")
}
