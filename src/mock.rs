// vim: tw=80
//! The per-target dispatcher: an ordered expectation list plus the
//! blocking and consuming invocation policies.

use std::fmt;

use crate::error::{render_args, Error, Unsatisfied};
use crate::expectation::{
    ArgumentPattern, Expectation, ResolveError, ReturnStrategy,
};
use crate::matcher::Matcher;
use crate::ExpectedCount;

type Forwarder<V> = Box<dyn FnMut(&[V]) -> Option<V>>;

/// A test double for one callable target.
///
/// Owns the target's expectations in registration order.  On each
/// invocation the first expectation that applies resolves the call; when
/// none applies the mock either fails (blocking, the default) or forwards
/// to the original target (non-blocking).
///
/// Registration is fluent: [`expects`](Mock::expects) starts a new
/// expectation, and the count- and return-setters configure the most
/// recently started one, so chains read like the rule they register.
pub struct Mock<V> {
    target: String,
    expectations: Vec<Expectation<V>>,
    blocking: bool,
    consuming: bool,
    original: Option<Forwarder<V>>,
}

impl<V> Mock<V>
    where V: Clone + PartialEq + fmt::Debug + 'static
{
    /// A mock for `target` with no expectations, blocking, and
    /// non-consuming.
    pub fn new(target: &str) -> Self {
        Mock {
            target: target.to_owned(),
            expectations: Vec::new(),
            blocking: true,
            consuming: false,
            original: None,
        }
    }

    /// The identifier of the mocked target.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Wire up the original, un-redirected target.  A non-blocking mock
    /// forwards unmatched calls here.
    pub fn set_original<F>(&mut self, f: F)
        where F: FnMut(&[V]) -> Option<V> + 'static
    {
        self.original = Some(Box::new(f));
    }

    /// Start a new expectation matching invocations whose arguments are
    /// accepted position by position.
    ///
    /// Accepts bare values and [`Matcher`]s interchangeably; values are
    /// wrapped in exact-value matchers here, once, so everything
    /// downstream deals in matchers only.
    pub fn expects<M, I>(&mut self, matchers: I) -> &mut Self
        where M: Into<Matcher<V>>, I: IntoIterator<Item = M>
    {
        let ms: Vec<Matcher<V>> =
            matchers.into_iter().map(Into::into).collect();
        self.expectations
            .push(Expectation::new(ArgumentPattern::Positional(ms)));
        self
    }

    /// Start a new expectation matching every invocation, regardless of
    /// arity.
    pub fn expects_any(&mut self) -> &mut Self {
        self.expectations.push(Expectation::new(ArgumentPattern::Any));
        self
    }

    /// The most recently started expectation, implicitly starting a
    /// wildcard one when none exists yet.
    fn pending(&mut self) -> &mut Expectation<V> {
        if self.expectations.is_empty() {
            self.expectations.push(Expectation::new(ArgumentPattern::Any));
        }
        let l = self.expectations.len();
        &mut self.expectations[l - 1]
    }

    /// Require the pending expectation to match exactly `n` times.
    pub fn times(&mut self, n: usize) -> &mut Self {
        self.pending().set_count(ExpectedCount::Exact(n));
        self
    }

    /// Shortcut for [`times(1)`](Mock::times).
    pub fn once(&mut self) -> &mut Self {
        self.times(1)
    }

    /// Shortcut for [`times(2)`](Mock::times).
    pub fn twice(&mut self) -> &mut Self {
        self.times(2)
    }

    /// Forbid the pending expectation from ever matching.  Shortcut for
    /// [`times(0)`](Mock::times).
    pub fn never(&mut self) -> &mut Self {
        self.times(0)
    }

    /// Configure the pending expectation's return strategy directly.
    pub fn returning_with(&mut self, strategy: ReturnStrategy<V>)
        -> &mut Self
    {
        self.pending().set_return(strategy);
        self
    }

    /// Resolve matched invocations to a clone of `value`.
    pub fn returning(&mut self, value: V) -> &mut Self {
        self.returning_with(ReturnStrategy::Value(value))
    }

    /// Resolve matched invocations to no value.
    pub fn returning_void(&mut self) -> &mut Self {
        self.returning_with(ReturnStrategy::Void)
    }

    /// Resolve matched invocations to successive elements of `values`,
    /// wrapping around after the last.
    ///
    /// # Panics
    ///
    /// If `values` is empty.
    pub fn returning_from(&mut self, values: Vec<V>) -> &mut Self {
        self.returning_with(ReturnStrategy::sequential(values))
    }

    /// Resolve matched invocations by computing a key from the arguments
    /// and looking it up in `entries`.  An absent key is an invocation
    /// error.
    ///
    /// # Panics
    ///
    /// If `entries` is empty.
    pub fn returning_mapped_value_from<F>(
        &mut self,
        entries: Vec<(V, V)>,
        key_fn: F) -> &mut Self
        where F: Fn(&[V]) -> V + 'static
    {
        self.returning_with(ReturnStrategy::mapped(entries, key_fn))
    }

    /// Resolve matched invocations by forwarding the arguments to `f`.
    pub fn returning_using<F>(&mut self, f: F) -> &mut Self
        where F: FnMut(&[V]) -> V + 'static
    {
        self.returning_with(ReturnStrategy::Callback(Box::new(f)))
    }

    /// Fail unmatched calls.  The default.
    pub fn blocking(&mut self) -> &mut Self {
        self.blocking = true;
        self
    }

    /// Forward unmatched calls to the original target.
    pub fn without_blocking(&mut self) -> &mut Self {
        self.blocking = false;
        self
    }

    /// Skip expectations that have already matched their expected count,
    /// letting later expectations take over.
    pub fn consuming(&mut self) -> &mut Self {
        self.consuming = true;
        self
    }

    /// Keep selecting the first match even once its count is exhausted.
    /// The default.
    pub fn without_consuming(&mut self) -> &mut Self {
        self.consuming = false;
        self
    }

    /// Dispatch one invocation.
    ///
    /// Expectations are consulted in registration order and the first one
    /// that matches (and, on a consuming mock, still has capacity)
    /// resolves the call; later expectations are never consulted once one
    /// is selected.  `Ok(None)` means the resolved strategy produces no
    /// value.
    pub fn invoke(&mut self, args: &[V]) -> Result<Option<V>, Error> {
        let consuming = self.consuming;
        let target = &self.target;
        if let Some(e) = self.expectations.iter_mut()
            .find(|e| e.matches(args) && (!consuming || e.has_capacity()))
        {
            return e.resolve(args).map_err(|re| match re {
                ResolveError::MissingReturn => Error::MissingReturn {
                    target: target.clone(),
                },
                ResolveError::UnresolvedKey(key) => Error::UnresolvedKey {
                    target: target.clone(),
                    key,
                },
            });
        }
        if !self.blocking {
            if let Some(f) = self.original.as_mut() {
                return Ok(f(args));
            }
        }
        Err(Error::UnexpectedCall {
            target: self.target.clone(),
            args: render_args(args),
            detail: self.explain(args),
        })
    }

    /// Per-expectation explanations for an unmatched call.
    fn explain(&self, args: &[V]) -> String {
        let mut out = String::new();
        for e in &self.expectations {
            if e.matches(args) {
                // only reachable when consuming skipped it for capacity
                out.push_str(&format!(
                    "\n  {}: matched, but already resolved {} time(s)",
                    e.pattern(), e.matched_count()));
            } else if let Some(why) = e.pattern().mismatch(args) {
                out.push_str(&format!("\n  {}: {}", e.pattern(), why));
            } else {
                out.push_str(&format!("\n  {}: did not match", e.pattern()));
            }
        }
        out
    }

    /// Every expectation whose matched count does not satisfy its expected
    /// count, as verification records.
    pub fn unsatisfied(&self) -> Vec<Unsatisfied> {
        self.expectations.iter()
            .filter(|e| !e.is_satisfied())
            .map(|e| Unsatisfied {
                target: self.target.clone(),
                expected: e.expected_count(),
                actual: e.matched_count(),
                pattern: e.pattern().to_string(),
            })
            .collect()
    }

    /// Verify all current expectations immediately, then clear them so the
    /// mock can be reprogrammed and keep serving calls.
    pub fn checkpoint(&mut self) -> Result<(), Error> {
        let failures = self.unsatisfied();
        self.expectations.clear();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Unsatisfied(failures))
        }
    }
}
