//! Navigation tree built from longnames.
//!
//! Renderers need a nested parent/child view of the documented symbols to
//! build navigation. The tree splits each longname into chunks on scope
//! punctuation plus the filepath separator, so `module:foo/bar~Baz#qux`
//! nests four levels deep.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{NameParts, SCOPE_PUNC_WITH_FILEPATH, shorten_with};

/// One node in the navigation tree produced by [`longnames_to_tree`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
	/// Full longname of the symbol at this node.
	pub longname: String,
	/// Parent longname, or empty at the roots.
	pub memberof: String,
	/// Punctuation joining this node to its parent.
	pub scope: String,
	/// Basename of the symbol.
	pub name: String,
	/// Overload variation, when present.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub variation: Option<String>,
	/// Child nodes keyed by their `scope + name` chunk.
	#[serde(skip_serializing_if = "BTreeMap::is_empty")]
	pub children: BTreeMap<String, TreeNode>,
}

/// Slice a longname into its chunks, root first.
pub(crate) fn split_longname(longname: &str) -> Vec<NameParts> {
	let mut chunks = Vec::new();
	let mut previous = longname.to_string();

	loop {
		let parts = shorten_with(&previous, SCOPE_PUNC_WITH_FILEPATH, None);
		previous = parts.memberof.clone();
		chunks.push(parts);
		if previous.is_empty() {
			break;
		}
	}

	chunks.reverse();
	chunks
}

/// Build a nested navigation tree from a set of longnames.
///
/// Nodes are keyed by their `scope + name` chunk; the stored longname lets
/// callers look the corresponding doclets back up in the store.
pub fn longnames_to_tree<I, S>(longnames: I) -> BTreeMap<String, TreeNode>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut tree: BTreeMap<String, TreeNode> = BTreeMap::new();

	for longname in longnames {
		let mut current = &mut tree;
		for parts in split_longname(longname.as_ref()) {
			let chunk = format!("{}{}", parts.scope, parts.name);
			let node = current.entry(chunk).or_insert_with(|| TreeNode {
				longname: parts.longname.clone(),
				memberof: parts.memberof.clone(),
				scope: parts.scope.clone(),
				name: parts.name.clone(),
				variation: parts.variation.clone(),
				children: BTreeMap::new(),
			});
			current = &mut node.children;
		}
	}

	tree
}
