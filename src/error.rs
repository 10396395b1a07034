// vim: tw=80
//! Failure types for invocation and verification.

use std::fmt;

use thiserror::Error;

use crate::ExpectedCount;

/// Render actual arguments for a failure message.
pub(crate) fn render_args<V: fmt::Debug>(args: &[V]) -> String {
    let mut s = String::new();
    for (i, a) in args.iter().enumerate() {
        if i > 0 {
            s.push_str(", ");
        }
        s.push_str(&format!("{:?}", a));
    }
    s
}

/// One expectation whose matched count did not satisfy its expected count
/// at verification time.
#[derive(Clone, Debug)]
pub struct Unsatisfied {
    /// Identifier of the target the expectation was registered on.
    pub target: String,
    /// The required call count.
    pub expected: ExpectedCount,
    /// How many invocations the expectation actually resolved.
    pub actual: usize,
    /// The rendered argument pattern.
    pub pattern: String,
}

impl fmt::Display for Unsatisfied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expectation {} matched {} time(s), expected {}",
               self.target, self.pattern, self.actual, self.expected)
    }
}

/// An invocation- or verification-time failure.
///
/// Everything here propagates to the immediate caller; nothing is retried
/// or swallowed.  Misconfigured registrations (an empty sequential or
/// mapped return) are programming errors and panic at the offending call
/// instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A blocking mock received a call that no expectation applies to.
    #[error("{target}: no matching expectation for call \
             with arguments ({args}){detail}")]
    UnexpectedCall {
        target: String,
        /// The rendered actual arguments.
        args: String,
        /// Per-expectation explanations of why nothing matched.
        detail: String,
    },

    /// A mapped return strategy computed a key absent from its entries.
    #[error("{target}: no return value mapped for key {key}")]
    UnresolvedKey {
        target: String,
        key: String,
    },

    /// An expectation was resolved before any return strategy was set.
    #[error("{target}: expectation resolved before a return value was set")]
    MissingReturn {
        target: String,
    },

    /// Verification found expectations whose call counts were not met.
    /// Carries every failure found in the pass, not just the first.
    #[error("{}", render_unsatisfied(.0))]
    Unsatisfied(Vec<Unsatisfied>),
}

fn render_unsatisfied(failures: &[Unsatisfied]) -> String {
    let mut s = String::from("unsatisfied expectations:");
    for u in failures {
        s.push_str("\n  ");
        s.push_str(&u.to_string());
    }
    s
}
