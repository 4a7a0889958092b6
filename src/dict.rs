//! The slice of the tag dictionary the core consumes.
//!
//! The full tag dictionary is an external policy table that maps tags to
//! doclet fields. The core only needs one ruling from it: which kinds act as
//! namespaces and therefore carry a `kind:` prefix on their longnames.

use crate::doclet::Kind;

/// Namespace rules consulted during longname assignment.
#[derive(Debug, Clone)]
pub struct TagDictionary {
	namespace_kinds: Vec<Kind>,
}

impl Default for TagDictionary {
	fn default() -> Self {
		Self {
			namespace_kinds: vec![Kind::Event, Kind::External, Kind::Module],
		}
	}
}

impl TagDictionary {
	/// Create a dictionary with the built-in namespace kinds
	/// (`event`, `external`, `module`).
	pub fn new() -> Self {
		Self::default()
	}

	/// Register an additional kind as a namespace.
	pub fn with_namespace_kind(mut self, kind: Kind) -> Self {
		if !self.namespace_kinds.contains(&kind) {
			self.namespace_kinds.push(kind);
		}
		self
	}

	/// Whether longnames of this kind carry a namespace prefix.
	pub fn is_namespace(&self, kind: Kind) -> bool {
		self.namespace_kinds.contains(&kind)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builtin_namespace_kinds() {
		let dict = TagDictionary::new();
		assert!(dict.is_namespace(Kind::Module));
		assert!(dict.is_namespace(Kind::Event));
		assert!(dict.is_namespace(Kind::External));
		assert!(!dict.is_namespace(Kind::Class));
	}

	#[test]
	fn extended_namespace_kinds() {
		let dict = TagDictionary::new().with_namespace_kind(Kind::Mixin);
		assert!(dict.is_namespace(Kind::Mixin));
	}
}
