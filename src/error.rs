//! Error types for scoped-store

use thiserror::Error;

/// Error type for scope accessor operations.
///
/// Both variants signal a structural wiring defect in the calling code, not a
/// transient condition. Nothing inside this crate catches or retries them;
/// they must surface to the caller so that misuse of the scoping discipline
/// is obvious during development.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScopeError {
	/// An accessor was called with no matching enclosing provider.
	///
	/// The fix is to wrap the calling subtree in the scope's provider.
	#[error("{accessor} must be used within its provider")]
	OutsideProvider {
		/// Name of the accessor that was called.
		accessor: &'static str,
	},

	/// The actions accessor was called on a scope that was created without
	/// an action-creator factory.
	///
	/// The fix is to configure the scope with `with_actions` at creation
	/// time, not to add a provider ancestor.
	#[error("no actions were configured when this scope was created")]
	NoActionsConfigured,
}

/// Result type for scope accessor operations.
pub type Result<T> = std::result::Result<T, ScopeError>;
