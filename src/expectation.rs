// vim: tw=80
//! Expectations: an argument pattern, a call count policy, and a return
//! strategy.

use std::fmt;

use crate::matcher::Matcher;
use crate::ExpectedCount;

/// How an [`Expectation`] decides whether it applies to an invocation.
pub enum ArgumentPattern<V> {
    /// Accept every invocation, regardless of arity.
    Any,
    /// Accept invocations carrying exactly one argument per matcher, each
    /// accepted by the matcher at its position.  Order is significant;
    /// there is no reordering or named-argument matching.
    Positional(Vec<Matcher<V>>),
}

impl<V: PartialEq> ArgumentPattern<V> {
    pub fn matches(&self, args: &[V]) -> bool {
        match self {
            ArgumentPattern::Any => true,
            ArgumentPattern::Positional(ms) => {
                ms.len() == args.len() &&
                    ms.iter().zip(args).all(|(m, a)| m.matches(a))
            },
        }
    }
}

impl<V: PartialEq + fmt::Debug> ArgumentPattern<V> {
    /// Explain why `args` were rejected, or `None` if they weren't.
    pub(crate) fn mismatch(&self, args: &[V]) -> Option<String> {
        match self {
            ArgumentPattern::Any => None,
            ArgumentPattern::Positional(ms) => {
                if ms.len() != args.len() {
                    return Some(format!("expected {} argument(s), got {}",
                                        ms.len(), args.len()));
                }
                ms.iter().zip(args).enumerate().find_map(|(i, (m, a))| {
                    m.mismatch(a)
                        .map(|why| format!("argument {}: {}", i, why))
                })
            },
        }
    }
}

impl<V: fmt::Debug> fmt::Display for ArgumentPattern<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentPattern::Any => f.write_str("(<any arguments>)"),
            ArgumentPattern::Positional(ms) => {
                f.write_str("(")?;
                for (i, m) in ms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", m)?;
                }
                f.write_str(")")
            },
        }
    }
}

/// Computes a lookup key from the actual call arguments.
pub type KeyFn<V> = Box<dyn Fn(&[V]) -> V>;

/// Computes a return value from the actual call arguments.
pub type CallbackFn<V> = Box<dyn FnMut(&[V]) -> V>;

/// How an [`Expectation`] produces the value a resolved invocation hands
/// back.
///
/// A closed set with exhaustive dispatch in
/// [`Expectation::resolve`](Expectation), so every resolution site handles
/// every strategy.
pub enum ReturnStrategy<V> {
    /// Nothing configured yet.  Resolving is an error.
    Unset,
    /// Produce no value.
    Void,
    /// Always produce a clone of the same value.
    Value(V),
    /// Produce successive elements of the sequence, wrapping around after
    /// the last.  Must be non-empty; use
    /// [`sequential`](ReturnStrategy::sequential).
    Sequential(Vec<V>),
    /// Compute a key from the arguments and produce the value it maps to.
    /// Must be non-empty; use [`mapped`](ReturnStrategy::mapped).
    Mapped(Vec<(V, V)>, KeyFn<V>),
    /// Forward the arguments to the callback and produce its result.
    Callback(CallbackFn<V>),
}

impl<V> ReturnStrategy<V> {
    /// A [`Sequential`](ReturnStrategy::Sequential) strategy over a
    /// non-empty sequence.
    ///
    /// # Panics
    ///
    /// If `values` is empty.
    pub fn sequential(values: Vec<V>) -> Self {
        assert!(!values.is_empty(),
            "a sequential return requires at least one value");
        ReturnStrategy::Sequential(values)
    }

    /// A [`Mapped`](ReturnStrategy::Mapped) strategy over a non-empty
    /// entry list.  Lookup compares keys with `PartialEq`, in entry order.
    ///
    /// # Panics
    ///
    /// If `entries` is empty.
    pub fn mapped<F>(entries: Vec<(V, V)>, key_fn: F) -> Self
        where F: Fn(&[V]) -> V + 'static
    {
        assert!(!entries.is_empty(),
            "a mapped return requires at least one entry");
        ReturnStrategy::Mapped(entries, Box::new(key_fn))
    }
}

/// Resolution failures that the owning mock decorates with its target
/// identifier.
pub(crate) enum ResolveError {
    MissingReturn,
    UnresolvedKey(String),
}

/// One registered rule: an argument pattern, an expected call count, the
/// count of matches so far, and a return strategy.
///
/// Built by the registration methods on [`Mock`](crate::Mock), mutated
/// only by successful resolutions, and read back by verification.
pub struct Expectation<V> {
    pattern: ArgumentPattern<V>,
    count: ExpectedCount,
    matched: usize,
    strategy: ReturnStrategy<V>,
}

impl<V> Expectation<V>
    where V: Clone + PartialEq + fmt::Debug + 'static
{
    /// A new expectation with an unlimited expected count and no return
    /// strategy.
    pub fn new(pattern: ArgumentPattern<V>) -> Self {
        Expectation {
            pattern,
            count: ExpectedCount::Unlimited,
            matched: 0,
            strategy: ReturnStrategy::Unset,
        }
    }

    /// Whether this expectation applies to an invocation with `args`.
    ///
    /// Pure and idempotent: evaluating it never changes the matched
    /// count.
    pub fn matches(&self, args: &[V]) -> bool {
        self.pattern.matches(args)
    }

    /// Whether the matched count satisfies the expected count right now.
    ///
    /// Re-evaluable at any time, both mid-session and at teardown.
    pub fn is_satisfied(&self) -> bool {
        self.count.is_satisfied_by(self.matched)
    }

    /// Whether another match may be counted without overshooting.  Gates
    /// selection on consuming mocks.
    pub(crate) fn has_capacity(&self) -> bool {
        self.count.has_capacity(self.matched)
    }

    pub fn pattern(&self) -> &ArgumentPattern<V> {
        &self.pattern
    }

    pub fn expected_count(&self) -> ExpectedCount {
        self.count
    }

    /// How many invocations this expectation has resolved so far.
    pub fn matched_count(&self) -> usize {
        self.matched
    }

    pub(crate) fn set_count(&mut self, count: ExpectedCount) {
        self.count = count;
    }

    pub(crate) fn set_return(&mut self, strategy: ReturnStrategy<V>) {
        self.strategy = strategy;
    }

    /// Produce the value for an invocation this expectation matched.
    ///
    /// Must only be called after [`matches`](Expectation::matches)
    /// returned true.  Increments the matched count, then dispatches on
    /// the return strategy; the call that pushes the count to 1 yields a
    /// sequential strategy's first element.
    pub(crate) fn resolve(&mut self, args: &[V])
        -> Result<Option<V>, ResolveError>
    {
        self.matched += 1;
        match &mut self.strategy {
            ReturnStrategy::Unset => Err(ResolveError::MissingReturn),
            ReturnStrategy::Void => Ok(None),
            ReturnStrategy::Value(v) => Ok(Some(v.clone())),
            ReturnStrategy::Sequential(values) => {
                Ok(Some(values[(self.matched - 1) % values.len()].clone()))
            },
            ReturnStrategy::Mapped(entries, key_fn) => {
                let key = key_fn(args);
                entries.iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, v)| Some(v.clone()))
                    .ok_or_else(|| {
                        ResolveError::UnresolvedKey(format!("{:?}", key))
                    })
            },
            ReturnStrategy::Callback(f) => Ok(Some(f(args))),
        }
    }
}
