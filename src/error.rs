//! Error types exposed by the tagdoc crate.

use thiserror::Error;

/// Aggregate errors produced while resolving names or augmenting doclets.
#[derive(Debug, Error)]
pub enum TagdocError {
	/// A `@scope` tag used a name outside the recognized set.
	#[error(
		"the scope name {scope:?} is not recognized; use one of: global, inner, instance, static{}",
		.filepath.as_deref().map(|path| format!(" (source file: {path})")).unwrap_or_default()
	)]
	InvalidScope {
		/// The unrecognized scope name.
		scope: String,
		/// Source file of the offending doclet, when known.
		filepath: Option<String>,
	},

	/// Augmentation relationships form a cycle, so no safe processing order exists.
	#[error("dependency cycle detected: {}", .chain.join(" -> "))]
	DependencyCycle {
		/// The longnames participating in the cycle, first node repeated at the end.
		chain: Vec<String>,
	},

	/// Failed to encode or decode doclet JSON.
	#[error(transparent)]
	Serialization(#[from] serde_json::Error),

	/// Failed to perform IO operations.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Result type returned by the tagdoc library.
pub type Result<T> = std::result::Result<T, TagdocError>;
