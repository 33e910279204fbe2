//! Scope definitions, providers, and accessors.
//!
//! [`create_scope`] is the container factory: given an initial state and a
//! base reducer (plus optional decorators and an optional action-creator
//! factory) it builds a [`Scope`] definition. A scope hands out
//! [`ScopeProvider`] values, tree-scoping wrappers that own one container
//! each, and accessor operations that resolve the nearest enclosing
//! container for code rendered beneath a provider.
//!
//! ## Example
//!
//! ```ignore
//! use scoped_store::store::create_scope;
//! use scoped_store::view::{IntoView, View};
//!
//! #[derive(Clone)]
//! enum CounterAction { Increment, Decrement }
//!
//! let counter = create_scope(0i64, |state, action| match action {
//!     CounterAction::Increment => state + 1,
//!     CounterAction::Decrement => state - 1,
//! })
//! .build();
//!
//! let provider = counter.provider();
//! let view = provider.provide(&|| {
//!     let count = counter.use_state().unwrap();
//!     format!("count: {count}").into_view()
//! });
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use super::container::{Container, Dispatch, ScopeBinding, make_dispatch};
use super::reducer::{DecorationChain, Decorator, Reducer};
use crate::error::{Result, ScopeError};
use crate::provider::Provider;
use crate::runtime::{ScopeId, with_runtime};
use crate::view::View;

/// Type alias for action-creator factories.
///
/// Invoked exactly once per container mount with that container's dispatch
/// handle, so every invoker in the produced object closes over the right
/// instance.
pub type ActionFactory<A, Acts> = Rc<dyn Fn(Dispatch<A>) -> Acts>;

/// The immutable definition shared by a scope and all of its providers.
struct ScopeDef<S, A, Acts> {
	id: ScopeId,
	initial: S,
	reducer: Reducer<S, A>,
	chain: DecorationChain<S, A>,
	actions: Option<ActionFactory<A, Acts>>,
}

/// Starts building a scope from an initial state and a base reducer.
///
/// The reducer must be total over the actions it claims to handle and return
/// the input state unchanged for unrecognized actions.
pub fn create_scope<S, A>(
	initial: S,
	reducer: impl Fn(&S, &A) -> S + 'static,
) -> ScopeBuilder<S, A, ()> {
	ScopeBuilder {
		initial,
		reducer: Rc::new(reducer),
		chain: DecorationChain::new(),
		actions: None,
	}
}

/// Builder for [`Scope`] definitions.
pub struct ScopeBuilder<S, A, Acts = ()> {
	pub(super) initial: S,
	pub(super) reducer: Reducer<S, A>,
	pub(super) chain: DecorationChain<S, A>,
	pub(super) actions: Option<ActionFactory<A, Acts>>,
}

impl<S, A> ScopeBuilder<S, A, ()> {
	/// Configures the action-creator factory for this scope.
	///
	/// The factory runs once per container mount and receives that
	/// container's dispatch handle.
	pub fn with_actions<Acts>(
		self,
		factory: impl Fn(Dispatch<A>) -> Acts + 'static,
	) -> ScopeBuilder<S, A, Acts> {
		ScopeBuilder {
			initial: self.initial,
			reducer: self.reducer,
			chain: self.chain,
			actions: Some(Rc::new(factory)),
		}
	}
}

impl<S, A, Acts> ScopeBuilder<S, A, Acts> {
	/// Appends one decorator to the decoration chain.
	pub fn with_decorator(mut self, decorator: Decorator<S, A>) -> Self {
		self.chain.push(decorator);
		self
	}

	/// Appends decorators to the decoration chain, normalized from a single
	/// decorator, a vector, or another chain.
	pub fn with_decorators(mut self, decorators: impl Into<DecorationChain<S, A>>) -> Self {
		self.chain.extend(decorators.into());
		self
	}

	/// Finalizes the scope definition.
	pub fn build(self) -> Scope<S, A, Acts> {
		Scope {
			def: Rc::new(ScopeDef {
				id: ScopeId::new(),
				initial: self.initial,
				reducer: self.reducer,
				chain: self.chain,
				actions: self.actions,
			}),
		}
	}
}

/// A scope definition: the factory output.
///
/// Cheap to clone; all clones denote the same scope and resolve the same
/// providers. `Acts` is the type of the bound actions object, `()` for
/// scopes built without one.
pub struct Scope<S, A, Acts = ()> {
	def: Rc<ScopeDef<S, A, Acts>>,
}

impl<S, A, Acts> Clone for Scope<S, A, Acts> {
	fn clone(&self) -> Self {
		Self {
			def: Rc::clone(&self.def),
		}
	}
}

impl<S, A, Acts> std::fmt::Debug for Scope<S, A, Acts> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Scope")
			.field("has_actions", &self.def.actions.is_some())
			.field("decorators", &self.def.chain.len())
			.finish()
	}
}

impl<S, A, Acts> Scope<S, A, Acts>
where
	S: Clone + 'static,
	A: 'static,
	Acts: 'static,
{
	/// Creates one tree-scoping wrapper instance.
	///
	/// Each provider value is an independent mount: its container is created
	/// on the first `provide` call, survives re-renders of the same value,
	/// and is destroyed when the provider is dropped. Two providers from the
	/// same scope definition never share state.
	pub fn provider(&self) -> ScopeProvider<S, A, Acts> {
		ScopeProvider {
			def: Rc::clone(&self.def),
			mounted: RefCell::new(None),
		}
	}

	fn binding(&self, accessor: &'static str) -> Result<Rc<ScopeBinding<S, A, Acts>>> {
		with_runtime(|rt| rt.lookup_binding(self.def.id))
			.and_then(|any| any.downcast::<ScopeBinding<S, A, Acts>>().ok())
			.ok_or(ScopeError::OutsideProvider { accessor })
	}

	/// Returns the nearest enclosing container's current state.
	pub fn use_state(&self) -> Result<S> {
		Ok(self.binding("use_state")?.container.state())
	}

	/// Returns the nearest enclosing container's dispatch handle.
	pub fn use_dispatch(&self) -> Result<Dispatch<A>> {
		Ok(self.binding("use_dispatch")?.dispatch.clone())
	}

	/// Convenience pair of [`Scope::use_state`] and [`Scope::use_dispatch`].
	pub fn use_reducer(&self) -> Result<(S, Dispatch<A>)> {
		let binding = self.binding("use_reducer")?;
		Ok((binding.container.state(), binding.dispatch.clone()))
	}

	/// Returns the nearest enclosing container's bound actions object.
	///
	/// Fails with [`ScopeError::NoActionsConfigured`] when the scope was
	/// built without an action-creator factory (even inside a provider) and
	/// with [`ScopeError::OutsideProvider`] when the scope has actions but
	/// no provider encloses the caller.
	pub fn use_actions(&self) -> Result<Rc<Acts>> {
		if self.def.actions.is_none() {
			return Err(ScopeError::NoActionsConfigured);
		}
		let binding = self.binding("use_actions")?;
		// The factory ran at mount, so an actions-capable binding always
		// carries the object.
		binding.actions.clone().ok_or(ScopeError::NoActionsConfigured)
	}

	/// Convenience pair of [`Scope::use_state`] and [`Scope::use_actions`].
	pub fn use_scope(&self) -> Result<(S, Rc<Acts>)> {
		if self.def.actions.is_none() {
			return Err(ScopeError::NoActionsConfigured);
		}
		let binding = self.binding("use_scope")?;
		let actions = binding.actions.clone().ok_or(ScopeError::NoActionsConfigured)?;
		Ok((binding.container.state(), actions))
	}
}

/// A tree-scoping wrapper: one mount of one scope.
pub struct ScopeProvider<S, A, Acts = ()>
where
	S: Clone + 'static,
	A: 'static,
	Acts: 'static,
{
	def: Rc<ScopeDef<S, A, Acts>>,
	mounted: RefCell<Option<Rc<ScopeBinding<S, A, Acts>>>>,
}

impl<S, A, Acts> ScopeProvider<S, A, Acts>
where
	S: Clone + 'static,
	A: 'static,
	Acts: 'static,
{
	/// Returns the mounted binding, creating the container on first use.
	fn mount(&self) -> Rc<ScopeBinding<S, A, Acts>> {
		if let Some(binding) = &*self.mounted.borrow() {
			return Rc::clone(binding);
		}

		// Compose the decoration chain once per mount; an empty chain skips
		// composition and uses the base reducer directly.
		let effective = if self.def.chain.is_empty() {
			Rc::clone(&self.def.reducer)
		} else {
			self.def.chain.compose(Rc::clone(&self.def.reducer))
		};

		let container = Container::new(self.def.initial.clone(), effective);
		let dispatch = make_dispatch(&container);
		let actions = self
			.def
			.actions
			.as_ref()
			.map(|factory| Rc::new(factory(dispatch.clone())));

		debug!(scope = ?self.def.id, "scoped container mounted");
		let binding = Rc::new(ScopeBinding {
			container,
			dispatch,
			actions,
		});
		*self.mounted.borrow_mut() = Some(Rc::clone(&binding));
		binding
	}
}

impl<S, A, Acts> Provider for ScopeProvider<S, A, Acts>
where
	S: Clone + 'static,
	A: 'static,
	Acts: 'static,
{
	fn provide(&self, children: &dyn Fn() -> View) -> View {
		let binding = self.mount();

		// Pop on unwind too: a panicking child must not leave the binding
		// visible to later renders on this thread.
		struct PopOnDrop;
		impl Drop for PopOnDrop {
			fn drop(&mut self) {
				with_runtime(|rt| rt.pop_binding());
			}
		}

		with_runtime(|rt| rt.push_binding(self.def.id, binding));
		let _guard = PopOnDrop;
		children()
	}
}

impl<S, A, Acts> Drop for ScopeProvider<S, A, Acts>
where
	S: Clone + 'static,
	A: 'static,
	Acts: 'static,
{
	fn drop(&mut self) {
		if self.mounted.borrow().is_some() {
			debug!(scope = ?self.def.id, "scoped container unmounted");
		}
	}
}
