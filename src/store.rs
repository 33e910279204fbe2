//! Scoped state containers.
//!
//! The factory ([`create_scope`]) pairs an initial state value with a base
//! reducer, an optional decoration chain, and an optional action-creator
//! factory, and produces a [`Scope`]: a definition that hands out providers
//! and accessors. [`ScopeFactory`] binds a default decorator set ahead of
//! any per-scope decorators.

mod container;
mod factory;
mod reducer;
mod scope;

pub use container::Dispatch;
pub use factory::ScopeFactory;
pub use reducer::{DecorationChain, Decorator, Reducer, decorator, reducer};
pub use scope::{ActionFactory, Scope, ScopeBuilder, ScopeProvider, create_scope};
