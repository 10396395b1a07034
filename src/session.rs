// vim: tw=80
//! Sessions: pairing mocks with their interception shim and verifying
//! them at teardown.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{render_args, Error};
use crate::mock::Mock;

/// The host-specific facility that redirects a callable target into the
/// engine.
///
/// The engine drives it sparingly: one [`install`](Interceptor::install)
/// when a mock is created, one [`uninstall`](Interceptor::uninstall) when
/// the mock is removed or the session closes, and one
/// [`call_original`](Interceptor::call_original) per call a non-blocking
/// mock forwards.
pub trait Interceptor<V> {
    /// Redirect invocations of `target` into
    /// [`Session::dispatch`](Session::dispatch).
    fn install(&mut self, target: &str);

    /// Remove the redirection for `target`.
    fn uninstall(&mut self, target: &str);

    /// Invoke the original, un-redirected target.
    fn call_original(&mut self, target: &str, args: &[V]) -> Option<V>;
}

/// The set of mocks sharing one interception shim and one teardown
/// boundary.
pub struct Session<V> {
    interceptor: Rc<RefCell<dyn Interceptor<V>>>,
    mocks: Vec<Mock<V>>,
}

impl<V> Session<V>
    where V: Clone + PartialEq + fmt::Debug + 'static
{
    pub fn new<I>(interceptor: I) -> Self
        where I: Interceptor<V> + 'static
    {
        Session {
            interceptor: Rc::new(RefCell::new(interceptor)),
            mocks: Vec::new(),
        }
    }

    /// The mock for `target`, creating it on first use.
    ///
    /// Creation installs the interception exactly once and wires the
    /// mock's forwarder to the shim's original-call facility.
    pub fn mock(&mut self, target: &str) -> &mut Mock<V> {
        if let Some(i) = self.mocks.iter()
            .position(|m| m.target() == target)
        {
            return &mut self.mocks[i];
        }
        self.interceptor.borrow_mut().install(target);
        let mut mock = Mock::new(target);
        let shim = Rc::clone(&self.interceptor);
        let name = target.to_owned();
        mock.set_original(move |args| {
            shim.borrow_mut().call_original(&name, args)
        });
        self.mocks.push(mock);
        let l = self.mocks.len();
        &mut self.mocks[l - 1]
    }

    /// The entry point the shim redirects intercepted calls into.
    pub fn dispatch(&mut self, target: &str, args: &[V])
        -> Result<Option<V>, Error>
    {
        match self.mocks.iter_mut().find(|m| m.target() == target) {
            Some(m) => m.invoke(args),
            None => Err(Error::UnexpectedCall {
                target: target.to_owned(),
                args: render_args(args),
                detail: String::new(),
            }),
        }
    }

    /// Drop the mock for `target` and remove its interception, without
    /// verifying its expectations.
    pub fn remove(&mut self, target: &str) {
        if let Some(i) = self.mocks.iter()
            .position(|m| m.target() == target)
        {
            self.interceptor.borrow_mut().uninstall(target);
            self.mocks.remove(i);
        }
    }

    /// Remove every mock's interception, then verify every expectation.
    ///
    /// All unsatisfied expectations across all mocks are collected into a
    /// single [`Error::Unsatisfied`], so one failed teardown reports the
    /// whole picture.
    pub fn close(self) -> Result<(), Error> {
        let mut shim = self.interceptor.borrow_mut();
        let mut failures = Vec::new();
        for m in &self.mocks {
            shim.uninstall(m.target());
            failures.extend(m.unsatisfied());
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Unsatisfied(failures))
        }
    }
}
