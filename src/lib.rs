// vim: tw=80
//! A stub and expectation engine for building test doubles.
//!
//! Standin resolves live invocations of a callable target against the
//! expectations registered for it.  Each expectation carries argument
//! matchers, a call count policy, and a return strategy; the first
//! registered expectation that accepts a call resolves it, and a session
//! verifies every expectation's call count at teardown.
//!
//! The crate deliberately stops at the engine: intercepting a real callable
//! and redirecting it here is the job of a host-specific shim, consumed
//! through the [`Interceptor`] trait.
//!
//! # Getting started
//!
//! A [`Mock`] owns the expectations for one target.  Register an
//! expectation, then feed invocations through [`invoke`](Mock::invoke):
//!
//! ```
//! use standin::Mock;
//!
//! let mut mock = Mock::new("Calculator::add");
//! mock.expects([2, 3])
//!     .returning(5);
//!
//! assert_eq!(Some(5), mock.invoke(&[2, 3]).unwrap());
//! ```
//!
//! A mock blocks by default: a call that no expectation accepts is an
//! error, not a silent pass-through.
//!
//! ```
//! use standin::Mock;
//!
//! let mut mock = Mock::new("Calculator::add");
//! mock.expects([2, 3]).returning(5);
//!
//! assert!(mock.invoke(&[2, 4]).is_err());
//! ```
//!
//! # Matching arguments
//!
//! Literal arguments are matched exactly.  Anything implementing
//! [`Predicate`] can be used instead, and matchers compose with
//! [`all_of`](Matcher::all_of), [`any_of`](Matcher::any_of), and
//! [`none_of`](Matcher::none_of):
//!
//! ```
//! use standin::{predicate, Matcher, Mock};
//!
//! let mut mock = Mock::new("Inventory::reserve");
//! mock.expects([
//!         Matcher::matching(predicate::ge(1)),
//!         Matcher::any_of(vec![7.into(), 8.into()]),
//!     ])
//!     .returning(1);
//!
//! assert_eq!(Some(1), mock.invoke(&[3, 8]).unwrap());
//! ```
//!
//! An expectation registered with [`expects_any`](Mock::expects_any)
//! accepts every invocation, whatever its arity.  Expectations are
//! consulted in registration order and the first match wins, so specific
//! expectations go first and fallbacks last.
//!
//! # Call counts
//!
//! By default an expectation may match any number of times.
//! [`times`](Mock::times), [`once`](Mock::once), [`twice`](Mock::twice),
//! and [`never`](Mock::never) pin the count down; the count is checked at
//! session close, or eagerly with [`checkpoint`](Mock::checkpoint):
//!
//! ```
//! use standin::Mock;
//!
//! let mut mock = Mock::new("Greeter::hello");
//! mock.expects(["world".to_string()])
//!     .times(2)
//!     .returning("hi".to_string());
//!
//! mock.invoke(&["world".to_string()]).unwrap();
//! mock.invoke(&["world".to_string()]).unwrap();
//! assert!(mock.checkpoint().is_ok());
//! ```
//!
//! # Return strategies
//!
//! Besides a fixed value, an expectation can produce no value
//! ([`returning_void`](Mock::returning_void)), successive elements of a
//! sequence that wraps around ([`returning_from`](Mock::returning_from)),
//! a value looked up by a key computed from the arguments
//! ([`returning_mapped_value_from`](Mock::returning_mapped_value_from)),
//! or whatever a callback computes
//! ([`returning_using`](Mock::returning_using)):
//!
//! ```
//! use standin::Mock;
//!
//! let mut mock = Mock::new("Feed::next");
//! mock.expects_any()
//!     .returning_from(vec![1, 2, 3]);
//!
//! assert_eq!(Some(1), mock.invoke(&[]).unwrap());
//! assert_eq!(Some(2), mock.invoke(&[]).unwrap());
//! ```
//!
//! # Blocking and forwarding
//!
//! A non-blocking mock forwards unmatched calls to the original,
//! un-redirected target instead of failing:
//!
//! ```
//! use standin::Mock;
//!
//! let mut mock = Mock::new("Clock::now");
//! mock.without_blocking();
//! mock.set_original(|_args| Some(1234));
//!
//! assert_eq!(Some(1234), mock.invoke(&[]).unwrap());
//! ```
//!
//! # Consuming
//!
//! A consuming mock skips expectations that have already matched their
//! expected count, letting later expectations take over:
//!
//! ```
//! use standin::Mock;
//!
//! let mut mock = Mock::new("Queue::pop");
//! mock.consuming();
//! mock.expects_any().once().returning(1);
//! mock.expects_any().returning(2);
//!
//! assert_eq!(Some(1), mock.invoke(&[]).unwrap());
//! assert_eq!(Some(2), mock.invoke(&[]).unwrap());
//! ```
//!
//! # Sessions
//!
//! A [`Session`] pairs every mock with the interception shim that
//! redirects the target's calls, and verifies every expectation when
//! closed:
//!
//! ```
//! use standin::{Interceptor, Session};
//!
//! struct NullShim;
//! impl Interceptor<i32> for NullShim {
//!     fn install(&mut self, _target: &str) {}
//!     fn uninstall(&mut self, _target: &str) {}
//!     fn call_original(&mut self, _target: &str, _args: &[i32])
//!         -> Option<i32>
//!     {
//!         None
//!     }
//! }
//!
//! let mut session = Session::new(NullShim);
//! session.mock("Calculator::add")
//!     .expects([2, 3])
//!     .once()
//!     .returning(5);
//!
//! assert_eq!(Some(5), session.dispatch("Calculator::add", &[2, 3]).unwrap());
//! assert!(session.close().is_ok());
//! ```
//!
//! # Threading
//!
//! The engine is a synchronous, single-threaded decision procedure.  A
//! [`Mock`] and its expectations belong to one logical test execution at a
//! time; nothing here is `Send` or `Sync`.

use core::fmt;

mod error;
mod expectation;
mod matcher;
mod mock;
mod session;

pub use error::{Error, Unsatisfied};
pub use expectation::{
    ArgumentPattern, CallbackFn, Expectation, KeyFn, ReturnStrategy,
};
pub use matcher::Matcher;
pub use mock::Mock;
pub use session::{Interceptor, Session};

pub use predicates::prelude::{predicate, Predicate};

/// How many times an expectation must match over its lifetime.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ExpectedCount {
    /// Any number of matches is acceptable.  The default.
    #[default]
    Unlimited,
    /// Exactly this many matches are required.
    Exact(usize),
}

impl ExpectedCount {
    /// Whether `matched` satisfies this policy.
    ///
    /// A pure function of the arguments, re-evaluable at any time: an
    /// exact policy that was satisfied stops being satisfied again when
    /// the count overshoots.
    pub fn is_satisfied_by(self, matched: usize) -> bool {
        match self {
            ExpectedCount::Unlimited => true,
            ExpectedCount::Exact(n) => matched == n,
        }
    }

    /// Whether one more match can be counted without overshooting.
    pub fn has_capacity(self, matched: usize) -> bool {
        match self {
            ExpectedCount::Unlimited => true,
            ExpectedCount::Exact(n) => matched < n,
        }
    }
}

impl fmt::Display for ExpectedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedCount::Unlimited => f.write_str("any number of times"),
            ExpectedCount::Exact(1) => f.write_str("exactly 1 time"),
            ExpectedCount::Exact(n) => write!(f, "exactly {} times", n),
        }
    }
}
