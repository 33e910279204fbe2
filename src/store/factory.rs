//! Default decorator binding for the scope factory.
//!
//! A [`ScopeFactory`] wraps [`create_scope`](super::create_scope) so that
//! every scope it creates automatically carries a fixed set of decorators
//! ahead of any per-scope ones. Per the chain's left-to-right composition
//! rule, the defaults become the innermost layers and per-scope decorators
//! the outermost.

use super::reducer::{DecorationChain, Reducer};
use super::scope::ScopeBuilder;
use std::rc::Rc;

/// A scope factory with a bound set of default decorators.
///
/// The factory is monomorphic over `(S, A)`: Rust cannot hold a decorator
/// set that is generic over every future state type, so one factory serves
/// one state/action pair.
///
/// ## Example
///
/// ```ignore
/// use scoped_store::store::{DecorationChain, ScopeFactory, decorator, reducer};
///
/// let factory = ScopeFactory::with_defaults(DecorationChain::from(decorator(logging)));
///
/// // Every scope from this factory is logged; `validate` wraps the logging
/// // layer from outside.
/// let scope = factory
///     .create_scope(0i64, |state, action| state + action)
///     .with_decorator(decorator(validate))
///     .build();
/// ```
pub struct ScopeFactory<S, A> {
	defaults: DecorationChain<S, A>,
}

impl<S, A> ScopeFactory<S, A> {
	/// Creates a factory with no default decorators.
	///
	/// Scopes built from it behave exactly like plain
	/// [`create_scope`](super::create_scope) output.
	pub fn new() -> Self {
		Self {
			defaults: DecorationChain::new(),
		}
	}

	/// Creates a factory whose scopes all prepend the given decorators,
	/// normalized from a single decorator, a vector, or a chain.
	pub fn with_defaults(defaults: impl Into<DecorationChain<S, A>>) -> Self {
		Self {
			defaults: defaults.into(),
		}
	}

	/// Starts building a scope whose chain is pre-seeded with the defaults.
	///
	/// Per-scope decorators added on the returned builder land after the
	/// defaults, so the effective sequence is `defaults ++ per-scope`. With
	/// neither present the chain stays empty and no composition happens at
	/// mount.
	pub fn create_scope(
		&self,
		initial: S,
		reducer: impl Fn(&S, &A) -> S + 'static,
	) -> ScopeBuilder<S, A, ()> {
		ScopeBuilder {
			initial,
			reducer: Rc::new(reducer) as Reducer<S, A>,
			chain: self.defaults.clone(),
			actions: None,
		}
	}
}

impl<S, A> Default for ScopeFactory<S, A> {
	fn default() -> Self {
		Self::new()
	}
}

impl<S, A> Clone for ScopeFactory<S, A> {
	fn clone(&self) -> Self {
		Self {
			defaults: self.defaults.clone(),
		}
	}
}
