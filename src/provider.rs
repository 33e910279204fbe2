//! Provider composition.
//!
//! A provider is any tree-scoping wrapper: it takes the subtree beneath it as
//! a lazily evaluated closure, makes whatever it scopes available while that
//! closure runs, and passes the resulting view through. [`multi_provider`]
//! and [`provide_scopes`] nest an ordered list of providers into a single
//! declarative step.

mod stack;

pub use stack::{Leaf, multi_provider, provide_scopes};

use std::rc::Rc;

use crate::view::View;

/// A tree-scoping wrapper component.
///
/// Implementations evaluate `children` exactly once, inside whatever scope
/// they establish, and return the produced view unchanged.
/// [`ScopeProvider`](crate::store::ScopeProvider) is the canonical
/// implementation; anything with the same shape composes with it.
pub trait Provider {
	/// Renders the wrapped subtree inside this provider's scope.
	fn provide(&self, children: &dyn Fn() -> View) -> View;
}

/// An ordered list of providers; order is outer-to-inner nesting order.
#[derive(Clone, Default)]
pub struct ProviderList {
	providers: Vec<Rc<dyn Provider>>,
}

impl ProviderList {
	/// Creates an empty list.
	pub fn new() -> Self {
		Self {
			providers: Vec::new(),
		}
	}

	/// Appends a provider at the innermost position so far.
	pub fn with(mut self, provider: impl Provider + 'static) -> Self {
		self.providers.push(Rc::new(provider));
		self
	}

	/// Returns the number of providers in the list.
	pub fn len(&self) -> usize {
		self.providers.len()
	}

	/// Returns whether the list is empty.
	pub fn is_empty(&self) -> bool {
		self.providers.is_empty()
	}

	pub(crate) fn as_slice(&self) -> &[Rc<dyn Provider>] {
		&self.providers
	}
}

impl std::fmt::Debug for ProviderList {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ProviderList")
			.field("len", &self.providers.len())
			.finish()
	}
}

// A single provider or a vector both normalize to a list.

impl From<Rc<dyn Provider>> for ProviderList {
	fn from(provider: Rc<dyn Provider>) -> Self {
		Self {
			providers: vec![provider],
		}
	}
}

impl From<Vec<Rc<dyn Provider>>> for ProviderList {
	fn from(providers: Vec<Rc<dyn Provider>>) -> Self {
		Self { providers }
	}
}

impl FromIterator<Rc<dyn Provider>> for ProviderList {
	fn from_iter<I: IntoIterator<Item = Rc<dyn Provider>>>(iter: I) -> Self {
		Self {
			providers: iter.into_iter().collect(),
		}
	}
}
