//! Thread-local runtime for scope bindings and deferred transitions.
//!
//! The runtime is the ambient mechanism that makes a container visible to an
//! arbitrary-depth subtree without explicit passing. Each provider pushes a
//! binding frame onto a thread-local stack while it evaluates its children,
//! and accessors resolve the nearest enclosing frame for their scope.
//!
//! Dispatched actions are not applied inline. A dispatch enqueues the action
//! on its container and schedules an applier here; [`flush_updates`] is the
//! host's commit point, after which readers observe the new state.
//!
//! Everything is single-threaded (`Rc`/`RefCell`): all mutation funnels
//! through the applier path drained by [`flush_updates`], so no locking is
//! needed or provided.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Unique identifier for a scope definition.
///
/// Every scope definition gets its own id; providers bind containers under
/// it and accessors look the id up on the binding stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScopeId(u64);

thread_local! {
	static NEXT_SCOPE_ID: Cell<u64> = const { Cell::new(0) };
}

impl ScopeId {
	/// Allocates a fresh id.
	pub(crate) fn new() -> Self {
		NEXT_SCOPE_ID.with(|next| {
			let id = next.get();
			next.set(id + 1);
			ScopeId(id)
		})
	}
}

/// Type alias for scheduled transition appliers.
type Applier = Box<dyn Fn()>;

/// The thread-local runtime state.
pub(crate) struct Runtime {
	/// Active scope bindings, innermost last.
	bindings: RefCell<Vec<(ScopeId, Rc<dyn Any>)>>,
	/// Transition appliers scheduled by dispatches, in dispatch order.
	pending: RefCell<Vec<Applier>>,
	/// Reentrancy guard for [`Runtime::flush`].
	flushing: Cell<bool>,
}

thread_local! {
	static RUNTIME: Runtime = Runtime::new();
}

/// Runs a closure with the thread-local runtime.
pub(crate) fn with_runtime<R>(f: impl FnOnce(&Runtime) -> R) -> R {
	RUNTIME.with(f)
}

impl Runtime {
	fn new() -> Self {
		Self {
			bindings: RefCell::new(Vec::new()),
			pending: RefCell::new(Vec::new()),
			flushing: Cell::new(false),
		}
	}

	/// Pushes a scope binding for the duration of a provider's children
	/// evaluation.
	pub(crate) fn push_binding(&self, id: ScopeId, binding: Rc<dyn Any>) {
		self.bindings.borrow_mut().push((id, binding));
	}

	/// Pops the most recent scope binding.
	pub(crate) fn pop_binding(&self) {
		self.bindings.borrow_mut().pop();
	}

	/// Resolves the nearest enclosing binding for the given scope.
	///
	/// The stack is searched innermost-first, so a nested provider of the
	/// same scope shadows an outer one.
	pub(crate) fn lookup_binding(&self, id: ScopeId) -> Option<Rc<dyn Any>> {
		self.bindings
			.borrow()
			.iter()
			.rev()
			.find(|(bound, _)| *bound == id)
			.map(|(_, binding)| Rc::clone(binding))
	}

	/// Schedules a transition applier for the next flush.
	pub(crate) fn schedule(&self, applier: Applier) {
		self.pending.borrow_mut().push(applier);
	}

	/// Drains scheduled appliers in schedule order until quiescent.
	pub(crate) fn flush(&self) {
		if self.flushing.get() {
			return;
		}
		self.flushing.set(true);

		loop {
			let pending = std::mem::take(&mut *self.pending.borrow_mut());
			if pending.is_empty() {
				break;
			}
			for applier in pending {
				applier();
			}
		}

		self.flushing.set(false);
	}
}

/// Commits all pending state transitions.
///
/// Dispatch is deferred: calling a [`Dispatch`](crate::store::Dispatch)
/// handle schedules a state replacement that only becomes visible to readers
/// after this function runs. Hosts call it in their commit phase; tests call
/// it between render passes.
///
/// Appliers run in dispatch order, so actions dispatched in sequence on one
/// container are applied to its effective reducer in that same sequence.
pub fn flush_updates() {
	with_runtime(|rt| rt.flush());
}

#[cfg(test)]
mod tests {
	use super::*;
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_scope_ids_are_unique() {
		let a = ScopeId::new();
		let b = ScopeId::new();
		assert_ne!(a, b);
	}

	#[test]
	#[serial]
	fn test_lookup_resolves_innermost_binding() {
		let id = ScopeId::new();
		with_runtime(|rt| {
			rt.push_binding(id, Rc::new(1u32));
			rt.push_binding(id, Rc::new(2u32));

			let found = rt.lookup_binding(id).unwrap();
			assert_eq!(*found.downcast::<u32>().unwrap(), 2);

			rt.pop_binding();
			let found = rt.lookup_binding(id).unwrap();
			assert_eq!(*found.downcast::<u32>().unwrap(), 1);

			rt.pop_binding();
			assert!(rt.lookup_binding(id).is_none());
		});
	}

	#[test]
	#[serial]
	fn test_lookup_ignores_other_scopes() {
		let mine = ScopeId::new();
		let other = ScopeId::new();
		with_runtime(|rt| {
			rt.push_binding(other, Rc::new(7u32));
			assert!(rt.lookup_binding(mine).is_none());
			rt.pop_binding();
		});
	}

	#[test]
	#[serial]
	fn test_flush_runs_appliers_in_schedule_order() {
		let order = Rc::new(RefCell::new(Vec::new()));
		with_runtime(|rt| {
			for n in 0..3 {
				let order = Rc::clone(&order);
				rt.schedule(Box::new(move || order.borrow_mut().push(n)));
			}
		});

		flush_updates();
		assert_eq!(*order.borrow(), vec![0, 1, 2]);
	}

	#[test]
	#[serial]
	fn test_flush_drains_appliers_scheduled_during_flush() {
		let ran = Rc::new(Cell::new(false));
		with_runtime(|rt| {
			let ran = Rc::clone(&ran);
			rt.schedule(Box::new(move || {
				let ran = Rc::clone(&ran);
				with_runtime(|rt| {
					rt.schedule(Box::new(move || ran.set(true)));
				});
			}));
		});

		flush_updates();
		assert!(ran.get());
	}
}
