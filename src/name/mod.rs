//! The longname grammar.
//!
//! A longname is the fully-qualified string identity of a documented symbol:
//! the parent's longname, one scope punctuation mark, the basename, and an
//! optional parenthesized variation for overloads (`a.b#c(2)`). This module
//! decomposes longnames ([`shorten`]), reassembles them
//! ([`NameParts::combine`]), applies namespace prefixes, walks ancestor
//! chains, and resolves a raw doclet's identity fields ([`resolve`]).

mod atoms;
mod resolve;
mod tree;

#[cfg(test)]
mod tests;

use std::fmt::Write as _;

use bitflags::bitflags;
use once_cell::sync::Lazy;
use regex::Regex;

pub use resolve::resolve;
pub use tree::{TreeNode, longnames_to_tree};

/// Longname used for doclets that cannot be named, such as anonymous functions.
pub const ANONYMOUS_LONGNAME: &str = "<anonymous>";

/// Longname that represents the global scope.
pub const GLOBAL_LONGNAME: &str = "<global>";

/// Namespace prefix that marks a module longname.
pub const MODULE_NAMESPACE: &str = "module:";

/// Punctuation that marks an inner member (`Foo~bar`).
pub const SCOPE_PUNC_INNER: char = '~';
/// Punctuation that marks an instance member (`Foo#bar`).
pub const SCOPE_PUNC_INSTANCE: char = '#';
/// Punctuation that marks a static member (`Foo.bar`).
pub const SCOPE_PUNC_STATIC: char = '.';
/// Punctuation that separates a filepath-style parent from its members.
pub const SCOPE_PUNC_FILEPATH: char = '/';

/// The scope punctuation characters recognized when splitting a longname.
pub const SCOPE_PUNC: &[char] = &[SCOPE_PUNC_INNER, SCOPE_PUNC_INSTANCE, SCOPE_PUNC_STATIC];

/// Scope punctuation plus the filepath separator, used when slicing a
/// longname all the way down to its root chunk.
pub(crate) const SCOPE_PUNC_WITH_FILEPATH: &[char] = &[
	SCOPE_PUNC_INNER,
	SCOPE_PUNC_INSTANCE,
	SCOPE_PUNC_STATIC,
	SCOPE_PUNC_FILEPATH,
];

static PROTOTYPE_SEGMENT: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"(?:^|\.)prototype\.?").expect("valid regex"));

static NAMESPACED_NAME: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^[A-Za-z]+:.+$").expect("valid regex"));

static NAME_AND_DESCRIPTION: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^(\[[^\]]+\]|\S+)((?:[ \t]*-\s*|\s+)(\S[\s\S]*))?$").expect("valid regex"));

/// Scope of a symbol relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
	/// A member of the global scope; no punctuation.
	Global,
	/// An inner member, reachable only from inside its parent (`~`).
	Inner,
	/// An instance member (`#`).
	Instance,
	/// A static member (`.`).
	Static,
}

impl Scope {
	/// The scope assumed when a member gives no other indication.
	pub const DEFAULT: Scope = Scope::Static;

	/// The scope's lowercase name as it appears in `@scope`-style tags.
	pub fn name(self) -> &'static str {
		match self {
			Self::Global => "global",
			Self::Inner => "inner",
			Self::Instance => "instance",
			Self::Static => "static",
		}
	}

	/// The punctuation mark that represents this scope in a longname.
	/// Global scope has none.
	pub fn punc(self) -> Option<char> {
		match self {
			Self::Global => None,
			Self::Inner => Some(SCOPE_PUNC_INNER),
			Self::Instance => Some(SCOPE_PUNC_INSTANCE),
			Self::Static => Some(SCOPE_PUNC_STATIC),
		}
	}

	/// Look up the scope that a longname punctuation mark stands for.
	pub fn from_punc(punc: char) -> Option<Self> {
		match punc {
			SCOPE_PUNC_INNER => Some(Self::Inner),
			SCOPE_PUNC_INSTANCE => Some(Self::Instance),
			SCOPE_PUNC_STATIC => Some(Self::Static),
			_ => None,
		}
	}

	/// Look up a scope by its tag name. Anything outside the fixed set is
	/// rejected; see [`crate::doclet::Doclet::set_scope`] for the error path.
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"global" => Some(Self::Global),
			"inner" => Some(Self::Inner),
			"instance" => Some(Self::Instance),
			"static" => Some(Self::Static),
			_ => None,
		}
	}

	/// The single-scope [`ScopeSet`] containing this scope.
	pub fn flag(self) -> ScopeSet {
		match self {
			Self::Global => ScopeSet::GLOBAL,
			Self::Inner => ScopeSet::INNER,
			Self::Instance => ScopeSet::INSTANCE,
			Self::Static => ScopeSet::STATIC,
		}
	}
}

bitflags! {
	/// Set of scopes used to filter member lookups.
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	pub struct ScopeSet: u8 {
		/// Global members.
		const GLOBAL = 1 << 0;
		/// Inner members.
		const INNER = 1 << 1;
		/// Instance members.
		const INSTANCE = 1 << 2;
		/// Static members.
		const STATIC = 1 << 3;
	}
}

/// Decomposed form of a longname.
///
/// Produced by [`shorten`]; [`NameParts::combine`] is its exact inverse for
/// any longname `shorten` produces, quoted-literal segments included.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameParts {
	/// The normalized longname the parts were sliced from.
	pub longname: String,
	/// The parent's longname, or empty for top-level symbols.
	pub memberof: String,
	/// The scope punctuation between parent and name, or empty.
	pub scope: String,
	/// The basename. May contain a quoted literal, which is atomic.
	pub name: String,
	/// Disambiguating suffix for overloaded symbols, without parentheses.
	pub variation: Option<String>,
}

impl NameParts {
	/// Reassemble the longname: `memberof + scope + name + "(variation)"`.
	pub fn combine(&self) -> String {
		let mut longname = format!("{}{}{}", self.memberof, self.scope, self.name);
		if let Some(variation) = &self.variation {
			let _ = write!(longname, "({variation})");
		}
		longname
	}

	/// The scope punctuation as a char, when present.
	pub fn scope_punc(&self) -> Option<char> {
		self.scope.chars().next()
	}
}

/// Rewrite `prototype` path segments to instance punctuation, so
/// `MyClass.prototype.method` becomes `MyClass#method`.
///
/// A name that is exactly `prototype` refers to the prototype itself and is
/// left alone.
pub fn prototype_to_punc(name: &str) -> String {
	if name == "prototype" {
		return name.to_string();
	}
	PROTOTYPE_SEGMENT.replace_all(name, "#").into_owned()
}

/// Slice a longname like `a.b#c(2)` into memberof, scope, name, and variation.
pub fn shorten(longname: &str) -> NameParts {
	shorten_with(longname, SCOPE_PUNC, None)
}

/// Slice a longname under an explicit parent, as when an `@memberof` tag
/// overrides the heuristics. The text after `forced_memberof` becomes the
/// name; the parent's trailing punctuation, if any, becomes the scope.
pub fn shorten_within(longname: &str, forced_memberof: &str) -> NameParts {
	shorten_with(longname, SCOPE_PUNC, Some(forced_memberof))
}

pub(crate) fn shorten_with(
	longname: &str,
	slice_chars: &[char],
	forced_memberof: Option<&str>,
) -> NameParts {
	let atomized = atoms::tokenize(longname);
	let text = prototype_to_punc(&atomized.text);

	let mut memberof = String::new();
	let mut scope = String::new();
	let mut name = String::new();

	if let Some(forced) = forced_memberof {
		name = text.get(forced.len()..).unwrap_or("").to_string();
		let (stem, punc) = split_trailing_punc(forced, slice_chars);
		if !stem.is_empty() {
			memberof = stem.to_string();
		}
		if let Some(punc) = punc {
			scope = punc.to_string();
		}
	} else if !text.is_empty() {
		match last_interior_punc(&text, slice_chars) {
			Some((at, punc)) => {
				memberof = text[..at].to_string();
				scope = punc.to_string();
				name = text[at + punc.len_utf8()..].to_string();
			}
			None => name = text.clone(),
		}
	}

	// like /** @name foo.bar(2) */
	let mut variation = None;
	if let Some((stem, suffix)) = extract_variation(&name) {
		name = stem;
		variation = Some(suffix);
	}

	NameParts {
		longname: atoms::restore(&text, &atomized.tokens),
		memberof: atoms::restore(&memberof, &atomized.tokens),
		scope: atoms::restore(&scope, &atomized.tokens),
		name: atoms::restore(&name, &atomized.tokens),
		variation,
	}
}

/// Find the last slice-punctuation mark with at least one character on each
/// side. Leading and trailing punctuation never splits.
fn last_interior_punc(text: &str, slice_chars: &[char]) -> Option<(usize, char)> {
	for (at, ch) in text.char_indices().rev() {
		if slice_chars.contains(&ch) && at > 0 && at + ch.len_utf8() < text.len() {
			return Some((at, ch));
		}
	}
	None
}

fn split_trailing_punc<'a>(text: &'a str, slice_chars: &[char]) -> (&'a str, Option<char>) {
	match text.chars().last() {
		Some(ch) if slice_chars.contains(&ch) => (&text[..text.len() - ch.len_utf8()], Some(ch)),
		_ => (text, None),
	}
}

/// Extract a trailing `(variation)` group from a name, if well formed: a
/// non-empty prefix and non-empty parenthesized text with no nested `)`.
fn extract_variation(name: &str) -> Option<(String, String)> {
	let stripped = name.strip_suffix(')')?;
	let open = stripped.rfind('(')?;
	if open == 0 {
		return None;
	}
	let suffix = &stripped[open + 1..];
	if suffix.is_empty() || suffix.contains(')') {
		return None;
	}
	Some((stripped[..open].to_string(), suffix.to_string()))
}

/// True when `name` is already a complete longname nested under `memberof`,
/// i.e. it starts with `memberof` followed by scope punctuation.
pub(crate) fn name_is_longname(name: &str, memberof: &str) -> bool {
	name.strip_prefix(memberof)
		.and_then(|rest| rest.chars().next())
		.is_some_and(|ch| SCOPE_PUNC.contains(&ch))
}

/// True when the longname ends with a scope punctuation mark, as in
/// `@memberof foo#`.
pub(crate) fn ends_with_scope_punc(longname: &str) -> bool {
	longname
		.chars()
		.last()
		.is_some_and(|ch| SCOPE_PUNC.contains(&ch))
}

/// Insert a namespace prefix directly before the basename, so
/// `apply_namespace("foo.bar", "module")` yields `foo.module:bar`.
///
/// A basename that already carries a namespace prefix passes through
/// unchanged.
pub fn apply_namespace(longname: &str, ns: &str) -> String {
	let parts = shorten(longname);
	if NAMESPACED_NAME.is_match(&parts.name) {
		return parts.longname;
	}
	match parts.longname.strip_suffix(parts.name.as_str()) {
		Some(stem) => format!("{stem}{ns}:{}", parts.name),
		// A variation suffix keeps the basename away from the end; leave
		// the longname alone rather than splice into the middle.
		None => parts.longname,
	}
}

/// True when `parent` appears somewhere in `child`'s memberof chain.
///
/// A symbol is not its own ancestor, and empty names never match. The string
/// prefix check is a fast reject: a child's longname always begins with its
/// ancestors' longnames.
pub fn has_ancestor(parent: &str, child: &str) -> bool {
	if parent.is_empty() || child.is_empty() {
		return false;
	}
	if !child.starts_with(parent) {
		return false;
	}

	let mut memberof = shorten(child).memberof;
	while !memberof.is_empty() {
		if memberof == parent {
			return true;
		}
		memberof = shorten(&memberof).memberof;
	}
	false
}

/// A tag value split into its leading name and trailing description.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitName {
	/// The name portion, brackets included for optional names like `[foo]`.
	pub name: String,
	/// The free-text description, or empty.
	pub description: String,
}

/// Split text that starts with a name and ends with a description, like
/// `name`, `[name]`, `name text`, or `[name] - text`.
///
/// The hyphen separator must be on the same line as the name, so a Markdown
/// dash later in the description is not mistaken for a separator.
pub fn split_name(name_desc: &str) -> SplitName {
	match NAME_AND_DESCRIPTION.captures(name_desc) {
		Some(caps) => SplitName {
			name: caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default(),
			description: caps.get(3).map(|m| m.as_str().to_string()).unwrap_or_default(),
		},
		None => SplitName::default(),
	}
}
