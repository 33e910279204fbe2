//! scoped-store - Scoped State Containers for Tree-Structured UIs
//!
//! A factory for building isolated units of mutable state, each paired with
//! a change-dispatch mechanism and an optional bound set of named actions,
//! exposed to a subtree of a component tree without prop threading - plus a
//! composition utility that nests many independent scopes into one ordered
//! stack.
//!
//! ## Architecture
//!
//! - [`store`]: the container factory - reducers, decoration chains,
//!   scope definitions, providers, and accessors
//! - [`provider`]: the provider seam and the stack builder that nests an
//!   ordered list of providers around a leaf
//! - [`view`]: the minimal renderable tree providers wrap
//! - [`runtime`]: thread-local scope bindings and the deferred-dispatch
//!   commit point
//! - [`error`]: the [`ScopeError`] taxonomy for accessor misuse
//!
//! ## Example
//!
//! ```ignore
//! use scoped_store::{create_scope, flush_updates};
//! use scoped_store::view::{IntoView, View};
//!
//! #[derive(Clone)]
//! enum Action { Increment }
//!
//! let counter = create_scope(0i64, |state, action| match action {
//!     Action::Increment => state + 1,
//! })
//! .build();
//!
//! let provider = counter.provider();
//! provider.provide(&|| {
//!     let (count, dispatch) = counter.use_reducer().unwrap();
//!     dispatch.call(Action::Increment);
//!     format!("count: {count}").into_view()
//! });
//!
//! // Host commit phase: transitions become visible to the next render.
//! flush_updates();
//! ```
//!
//! ## Dispatch model
//!
//! Dispatch is synchronous from the caller's perspective but deferred in
//! visibility: it schedules a state replacement that readers observe on
//! their next read after [`flush_updates`]. Actions dispatched in sequence
//! on one container are applied in that sequence; nothing is reordered,
//! coalesced, or batched beyond that.

pub mod error;
pub mod provider;
pub mod runtime;
pub mod store;
pub mod view;

pub use error::ScopeError;
pub use provider::{Leaf, Provider, ProviderList, multi_provider, provide_scopes};
pub use runtime::flush_updates;
pub use store::{
	DecorationChain, Dispatch, Scope, ScopeFactory, ScopeProvider, create_scope, decorator,
	reducer,
};
pub use view::{IntoView, View, ViewElement};
