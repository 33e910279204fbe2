//! Scoped container runtime unit.
//!
//! A container is one mounted instance of a scope: the current state value,
//! the action queue, and the effective reducer composed at mount time. Its
//! lifetime is bound to its provider's mount; a remount is a fresh container
//! with the original initial state.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use tracing::debug;

use super::reducer::Reducer;
use crate::runtime::with_runtime;

/// One mounted scope instance.
///
/// State is owned exclusively by the container and replaced, never mutated in
/// place: every accepted transition runs the effective reducer against the
/// current value and swaps the result in.
pub(crate) struct Container<S, A> {
	state: RefCell<S>,
	queue: RefCell<VecDeque<A>>,
	reducer: Reducer<S, A>,
}

impl<S: 'static, A: 'static> Container<S, A> {
	pub(crate) fn new(initial: S, reducer: Reducer<S, A>) -> Rc<Self> {
		Rc::new(Self {
			state: RefCell::new(initial),
			queue: RefCell::new(VecDeque::new()),
			reducer,
		})
	}

	/// Returns a clone of the current state.
	pub(crate) fn state(&self) -> S
	where
		S: Clone,
	{
		self.state.borrow().clone()
	}

	/// Applies every queued action through the effective reducer, in FIFO
	/// order.
	///
	/// A container can be scheduled more than once per flush; later appliers
	/// find an empty queue and do nothing.
	pub(crate) fn apply_queued(&self) {
		loop {
			// Keep the queue borrow out of the reducer call.
			let action = self.queue.borrow_mut().pop_front();
			let Some(action) = action else { break };
			let next = {
				let state = self.state.borrow();
				(self.reducer)(&state, &action)
			};
			*self.state.borrow_mut() = next;
		}
	}
}

/// The dispatch entry point of one container.
///
/// Cloneable and usable from anywhere that obtained it while inside the
/// scope; each call schedules a transition that becomes visible after
/// [`flush_updates`](crate::runtime::flush_updates). A dispatch cannot be
/// retracted.
pub struct Dispatch<A> {
	inner: Rc<dyn Fn(A)>,
}

impl<A> Clone for Dispatch<A> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<A> Dispatch<A> {
	/// Dispatches one action against the container this handle belongs to.
	pub fn call(&self, action: A) {
		(self.inner)(action);
	}
}

impl<A> std::fmt::Debug for Dispatch<A> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Dispatch").finish_non_exhaustive()
	}
}

/// Builds the dispatch handle for a container.
///
/// The handle holds the container weakly: a dispatch that outlives its
/// provider's mount is dropped, never applied to a destroyed container.
pub(crate) fn make_dispatch<S: 'static, A: 'static>(container: &Rc<Container<S, A>>) -> Dispatch<A> {
	let weak: Weak<Container<S, A>> = Rc::downgrade(container);
	Dispatch {
		inner: Rc::new(move |action: A| {
			let Some(container) = weak.upgrade() else {
				debug!("dispatch against an unmounted container dropped");
				return;
			};
			container.queue.borrow_mut().push_back(action);

			let weak = Weak::clone(&weak);
			with_runtime(|rt| {
				rt.schedule(Box::new(move || {
					if let Some(container) = weak.upgrade() {
						container.apply_queued();
					}
				}));
			});
		}),
	}
}

/// Everything a provider exposes to the subtree it wraps.
pub(crate) struct ScopeBinding<S, A, Acts> {
	pub(crate) container: Rc<Container<S, A>>,
	pub(crate) dispatch: Dispatch<A>,
	/// Bound actions object, present iff the scope was configured with an
	/// action-creator factory.
	pub(crate) actions: Option<Rc<Acts>>,
}
