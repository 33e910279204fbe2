//! Provider stack building.
//!
//! Nests an ordered list of providers into a single wrapper by structural
//! recursion: every provider except the last is instantiated with no
//! properties of its own around the recursion on the remaining list; the
//! last provider receives the innermost content.
//!
//! Two entry points share the recursion:
//!
//! - [`multi_provider`] inserts an already-built (lazily evaluated) subtree
//!   at the innermost slot.
//! - [`provide_scopes`] is a two-stage combinator that wraps a leaf
//!   component and forwards the properties passed to the composite down to
//!   that leaf.
//!
//! An empty provider list is identity: the innermost content renders with no
//! wrapper inserted.

use std::rc::Rc;

use tracing::warn;

use super::{Provider, ProviderList};
use crate::view::{IntoView, View};

/// The innermost content of a wrapped stack.
///
/// The caller states up front whether the leaf is a component to instantiate
/// with the forwarded properties or a pre-built subtree, instead of the
/// stack inspecting it at runtime.
pub enum Leaf<P> {
	/// A leaf component; instantiated with the forwarded properties bag.
	Component(Rc<dyn Fn(&P) -> View>),
	/// A pre-built subtree; properties cannot be forwarded into it.
	Element(View),
}

impl<P> Leaf<P> {
	/// Wraps a component function as the leaf.
	pub fn component(render: impl Fn(&P) -> View + 'static) -> Self {
		Leaf::Component(Rc::new(render))
	}

	/// Wraps a pre-built subtree as the leaf.
	pub fn element(view: impl IntoView) -> Self {
		Leaf::Element(view.into_view())
	}
}

impl<P> Clone for Leaf<P> {
	fn clone(&self) -> Self {
		match self {
			Leaf::Component(render) => Leaf::Component(Rc::clone(render)),
			Leaf::Element(view) => Leaf::Element(view.clone()),
		}
	}
}

impl<P> std::fmt::Debug for Leaf<P> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Leaf::Component(_) => f.write_str("Leaf::Component"),
			Leaf::Element(view) => f.debug_tuple("Leaf::Element").field(view).finish(),
		}
	}
}

/// Nests `providers` outer-to-inner around `innermost`.
fn nest(providers: &[Rc<dyn Provider>], innermost: &dyn Fn() -> View) -> View {
	match providers.split_first() {
		None => innermost(),
		Some((outer, rest)) => outer.provide(&|| nest(rest, innermost)),
	}
}

/// Renders `children` inside the full provider stack.
///
/// `children` is evaluated exactly once, at the innermost position, so
/// accessors called inside it observe every provider in the list.
///
/// # Example
///
/// ```ignore
/// use scoped_store::provider::{ProviderList, multi_provider};
///
/// let providers = ProviderList::new()
///     .with(theme.provider())
///     .with(session.provider());
///
/// let view = multi_provider(&providers, || app_view());
/// ```
pub fn multi_provider(providers: &ProviderList, children: impl Fn() -> View) -> View {
	nest(providers.as_slice(), &children)
}

/// Two-stage leaf-wrapping combinator.
///
/// The first stage takes one provider or an ordered list; the second takes
/// the leaf; the result renders the full nested stack for a given properties
/// bag, delivering the bag to the leaf at the innermost slot.
///
/// Passing a pre-built [`Leaf::Element`] is advisory-warned: properties
/// cannot be forwarded into an already-built subtree, and memoization should
/// wrap the output of the whole composition, not the leaf being wrapped. The
/// subtree is still inserted best-effort.
///
/// # Example
///
/// ```ignore
/// use scoped_store::provider::{Leaf, provide_scopes};
///
/// let wrapped = provide_scopes(providers)(Leaf::component(|props: &PanelProps| {
///     panel_view(props)
/// }));
///
/// let view = wrapped(PanelProps { x: 1 });
/// ```
pub fn provide_scopes<P: Clone + 'static>(
	providers: impl Into<ProviderList>,
) -> impl Fn(Leaf<P>) -> Box<dyn Fn(P) -> View> {
	let providers = providers.into();
	move |leaf: Leaf<P>| {
		let providers = providers.clone();
		Box::new(move |props: P| {
			nest(providers.as_slice(), &|| match &leaf {
				Leaf::Component(render) => render(&props),
				Leaf::Element(view) => {
					warn!(
						"pre-built element passed as wrapped leaf; properties are not \
						 forwarded - memoize the composition output, not the leaf"
					);
					view.clone()
				}
			})
		})
	}
}
