//! Reducers and reducer decoration.
//!
//! A reducer is a pure transition function over an application-defined state
//! value. Decorators wrap a reducer to add cross-cutting behavior (logging,
//! validation, state shape enforcement) without the wrapped reducer's
//! knowledge. An ordered sequence of decorators forms a [`DecorationChain`]
//! with a single, order-sensitive composition rule.
//!
//! ## Composition order
//!
//! `DecorationChain::compose` applies decorators left-to-right: the first
//! decorator in the chain becomes the innermost wrapping layer and the last
//! becomes the outermost. Reordering the chain changes observable behavior
//! whenever decorators have side effects or short-circuit conditions.
//!
//! ## Example
//!
//! ```ignore
//! use scoped_store::store::{DecorationChain, Reducer, decorator, reducer};
//!
//! let base = reducer(|state: &i32, action: &i32| state + action);
//! let chain = DecorationChain::from(decorator(|inner: Reducer<i32, i32>| {
//!     reducer(move |state, action| inner(state, action) * 2)
//! }));
//!
//! let effective = chain.compose(base);
//! assert_eq!(effective(&1, &2), 6);
//! ```

use std::rc::Rc;

/// A shared pure transition function `(state, action) -> state`.
///
/// Reducers must be total over the action shapes they claim to handle;
/// unrecognized actions must return the input state unchanged.
pub type Reducer<S, A> = Rc<dyn Fn(&S, &A) -> S>;

/// A reducer-transforming function (meta-reducer).
pub type Decorator<S, A> = Rc<dyn Fn(Reducer<S, A>) -> Reducer<S, A>>;

/// Wraps a closure into a shared [`Reducer`].
pub fn reducer<S, A>(f: impl Fn(&S, &A) -> S + 'static) -> Reducer<S, A> {
	Rc::new(f)
}

/// Wraps a closure into a shared [`Decorator`].
pub fn decorator<S, A>(f: impl Fn(Reducer<S, A>) -> Reducer<S, A> + 'static) -> Decorator<S, A> {
	Rc::new(f)
}

/// An ordered sequence of decorators.
///
/// The chain is fixed when a scope is created; the effective reducer is
/// composed exactly once per container mount, never per transition.
pub struct DecorationChain<S, A> {
	decorators: Vec<Decorator<S, A>>,
}

impl<S, A> DecorationChain<S, A> {
	/// Creates an empty chain (no decoration).
	pub fn new() -> Self {
		Self {
			decorators: Vec::new(),
		}
	}

	/// Appends a decorator to the end of the chain (outermost so far).
	pub fn push(&mut self, decorator: Decorator<S, A>) {
		self.decorators.push(decorator);
	}

	/// Appends every decorator of `other` after the ones already present.
	pub fn extend(&mut self, other: DecorationChain<S, A>) {
		self.decorators.extend(other.decorators);
	}

	/// Returns whether the chain contains no decorators.
	pub fn is_empty(&self) -> bool {
		self.decorators.is_empty()
	}

	/// Returns the number of decorators in the chain.
	pub fn len(&self) -> usize {
		self.decorators.len()
	}

	/// Composes the chain around a base reducer.
	///
	/// Left fold in chain order: `effective := base`, then for each decorator
	/// `d`, `effective := d(effective)`. For a chain `[d1, d2, .., dn]` the
	/// result is `dn(..(d2(d1(base))))`.
	pub fn compose(&self, base: Reducer<S, A>) -> Reducer<S, A> {
		self.decorators
			.iter()
			.fold(base, |effective, decorator| decorator(effective))
	}
}

impl<S, A> Default for DecorationChain<S, A> {
	fn default() -> Self {
		Self::new()
	}
}

impl<S, A> Clone for DecorationChain<S, A> {
	fn clone(&self) -> Self {
		Self {
			decorators: self.decorators.clone(),
		}
	}
}

impl<S, A> std::fmt::Debug for DecorationChain<S, A> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DecorationChain")
			.field("len", &self.decorators.len())
			.finish()
	}
}

// A single decorator, a vector, or an iterator all normalize to a chain.

impl<S, A> From<Decorator<S, A>> for DecorationChain<S, A> {
	fn from(decorator: Decorator<S, A>) -> Self {
		Self {
			decorators: vec![decorator],
		}
	}
}

impl<S, A> From<Vec<Decorator<S, A>>> for DecorationChain<S, A> {
	fn from(decorators: Vec<Decorator<S, A>>) -> Self {
		Self { decorators }
	}
}

impl<S, A, const N: usize> From<[Decorator<S, A>; N]> for DecorationChain<S, A> {
	fn from(decorators: [Decorator<S, A>; N]) -> Self {
		Self {
			decorators: decorators.into(),
		}
	}
}

impl<S, A> FromIterator<Decorator<S, A>> for DecorationChain<S, A> {
	fn from_iter<I: IntoIterator<Item = Decorator<S, A>>>(iter: I) -> Self {
		Self {
			decorators: iter.into_iter().collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	/// Decorator that appends a marker to the state after the inner reducer
	/// has run, so outer layers append later.
	fn tagging(marker: &'static str) -> Decorator<Vec<&'static str>, ()> {
		decorator(move |inner: Reducer<Vec<&'static str>, ()>| {
			reducer(move |state, action| {
				let mut next = inner(state, action);
				next.push(marker);
				next
			})
		})
	}

	fn identity_base() -> Reducer<Vec<&'static str>, ()> {
		reducer(|state: &Vec<&'static str>, _: &()| state.clone())
	}

	#[test]
	fn test_empty_chain_composes_to_base() {
		let chain: DecorationChain<i32, i32> = DecorationChain::new();
		assert!(chain.is_empty());

		let effective = chain.compose(reducer(|state, action| state + action));
		assert_eq!(effective(&40, &2), 42);
	}

	#[test]
	fn test_first_decorator_is_innermost() {
		let chain = DecorationChain::from(vec![tagging("d1"), tagging("d2"), tagging("d3")]);
		let effective = chain.compose(identity_base());

		// d1 wraps the base directly, so its marker lands first.
		assert_eq!(effective(&Vec::new(), &()), vec!["d1", "d2", "d3"]);
	}

	#[test]
	fn test_reordering_is_observable() {
		let forward = DecorationChain::from(vec![tagging("a"), tagging("b")]);
		let reversed = DecorationChain::from(vec![tagging("b"), tagging("a")]);

		assert_eq!(forward.compose(identity_base())(&Vec::new(), &()), vec!["a", "b"]);
		assert_eq!(reversed.compose(identity_base())(&Vec::new(), &()), vec!["b", "a"]);
	}

	#[test]
	fn test_single_decorator_normalizes_to_chain() {
		let chain = DecorationChain::from(tagging("only"));
		assert_eq!(chain.len(), 1);

		let effective = chain.compose(identity_base());
		assert_eq!(effective(&Vec::new(), &()), vec!["only"]);
	}

	#[test]
	fn test_short_circuit_layer_hides_inner_layers() {
		// An outer layer that refuses the transition must win over inner ones.
		let chain = DecorationChain::from(vec![
			tagging("inner"),
			decorator(|_inner: Reducer<Vec<&'static str>, ()>| {
				reducer(|state: &Vec<&'static str>, _| state.clone())
			}),
		]);

		let effective = chain.compose(identity_base());
		assert_eq!(effective(&Vec::new(), &()), Vec::<&'static str>::new());
	}

	proptest! {
		#[test]
		fn prop_fold_matches_manual_nesting(markers in proptest::collection::vec(0usize..8, 0..6)) {
			let labels = ["m0", "m1", "m2", "m3", "m4", "m5", "m6", "m7"];

			let chain: DecorationChain<Vec<&'static str>, ()> =
				markers.iter().map(|&i| tagging(labels[i])).collect();
			let folded = chain.compose(identity_base())(&Vec::new(), &());

			// Manual nesting: dn(..(d1(base))) appends markers in list order.
			let expected: Vec<&'static str> = markers.iter().map(|&i| labels[i]).collect();
			prop_assert_eq!(folded, expected);
		}
	}
}
