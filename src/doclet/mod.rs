//! The doclet record: one documented (or placeholder undocumented) symbol.
//!
//! Doclets arrive from an external parser as JSON, get their identity fields
//! canonicalized by [`crate::name::resolve`], and are then synthesized or
//! annotated by the augmentation engine. The engine only touches the common
//! base (identity, relationship lists, propagation metadata); the
//! documentation body is carried opaquely.

mod merge;

pub use merge::merge_doclets;

use serde::{Deserialize, Serialize};

use crate::dict::TagDictionary;
use crate::error::TagdocError;
use crate::name::{self, GLOBAL_LONGNAME, SCOPE_PUNC, SCOPE_PUNC_STATIC, Scope};

/// Classified kind of a documented symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
	/// Class definition.
	Class,
	/// Constant value.
	Constant,
	/// Event fired by a symbol.
	Event,
	/// Symbol defined outside the documented source.
	External,
	/// Source file overview.
	File,
	/// Free function or method.
	Function,
	/// Interface definition.
	Interface,
	/// Plain member; the default for symbols with no stronger classification.
	#[default]
	Member,
	/// Mixin whose static members are copied into other symbols.
	Mixin,
	/// Module namespace.
	Module,
	/// Plain namespace.
	Namespace,
	/// Package overview.
	Package,
	/// Type definition.
	Typedef,
}

impl Kind {
	/// The kind's lowercase name, which doubles as its namespace prefix for
	/// namespace kinds (`module:`, `event:`, `external:`).
	pub fn name(self) -> &'static str {
		match self {
			Self::Class => "class",
			Self::Constant => "constant",
			Self::Event => "event",
			Self::External => "external",
			Self::File => "file",
			Self::Function => "function",
			Self::Interface => "interface",
			Self::Member => "member",
			Self::Mixin => "mixin",
			Self::Module => "module",
			Self::Namespace => "namespace",
			Self::Package => "package",
			Self::Typedef => "typedef",
		}
	}

	/// Kinds that participate in the augmentation dependency graph.
	pub fn is_augmentable(self) -> bool {
		matches!(self, Self::Class | Self::External | Self::Interface | Self::Mixin)
	}
}

/// Access level attached to a doclet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
	/// Visible to the containing package only.
	Package,
	/// Not part of the public API.
	Private,
	/// Visible to subclasses.
	Protected,
	/// Public API.
	Public,
}

/// A documented type expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeInfo {
	/// The type names, in declaration order.
	pub names: Vec<String>,
}

/// One documented parameter or property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Param {
	/// Parameter name, when given.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Declared type.
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub type_info: Option<TypeInfo>,
	/// Free-text description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Whether the parameter may be omitted.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub optional: Option<bool>,
	/// Default value rendered as text.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub defaultvalue: Option<String>,
}

/// One documented return value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Return {
	/// Declared type.
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub type_info: Option<TypeInfo>,
	/// Free-text description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// Documentation fields carried opaquely through augmentation.
///
/// The merge policy in [`merge_doclets`] is the only place that looks inside:
/// a descendant's `Some` value beats the ancestor's for every field here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocBody {
	/// One-line summary.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub summary: Option<String>,
	/// Full description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Class-level description, distinct from the constructor's.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub classdesc: Option<String>,
	/// Documented parameters.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub params: Option<Vec<Param>>,
	/// Documented properties.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub properties: Option<Vec<Param>>,
	/// Documented return values.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub returns: Option<Vec<Return>>,
	/// Usage examples, verbatim.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub examples: Option<Vec<String>>,
	/// Cross references.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub see: Option<Vec<String>>,
	/// Deprecation notice.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub deprecated: Option<String>,
	/// Version the symbol first appeared in.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub since: Option<String>,
	/// Access level.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub access: Option<Access>,
	/// Whether the member is read-only.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub readonly: Option<bool>,
	/// Declared type of the member itself.
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub type_info: Option<TypeInfo>,
}

/// An `@borrows`-style record: copy `from`'s doclets onto the borrower,
/// optionally under a new name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borrow {
	/// Longname of the lent symbol.
	pub from: String,
	/// Name the symbol is borrowed as; defaults to `from`.
	#[serde(rename = "as", skip_serializing_if = "Option::is_none", default)]
	pub target: Option<String>,
}

/// Information about the code symbol a doclet was extracted from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeInfo {
	/// The symbol's name as written in the source.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Longname of the enclosing function scope, when the symbol is a
	/// member of a var in an outer function.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub funcscope: Option<String>,
}

impl CodeInfo {
	fn is_empty(&self) -> bool {
		self.name.is_none() && self.funcscope.is_none()
	}
}

/// Source metadata attached to a doclet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
	/// Basename of the source file.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub filename: Option<String>,
	/// One-indexed line number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub lineno: Option<u32>,
	/// Directory of the source file.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,
	/// Code-level symbol information.
	#[serde(skip_serializing_if = "CodeInfo::is_empty")]
	pub code: CodeInfo,
}

fn is_false(flag: &bool) -> bool {
	!*flag
}

/// The structured record of documentation extracted for one source symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Doclet {
	/// The symbol's basename.
	pub name: String,
	/// The fully resolved symbol identity; empty until resolution, and empty
	/// afterwards for symbols no rule could name.
	pub longname: String,
	/// Longname of the containing symbol, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub memberof: Option<String>,
	/// Classified kind.
	pub kind: Kind,
	/// Scope relative to the containing symbol.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scope: Option<Scope>,
	/// Disambiguating suffix for overloads.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub variation: Option<String>,
	/// Canonical home for a symbol documented under another name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub alias: Option<String>,
	/// Whether an explicit `@memberof` tag must override naming heuristics.
	#[serde(rename = "forceMemberof", skip_serializing_if = "is_false")]
	pub force_memberof: bool,

	/// Longnames of base symbols this one augments.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub augments: Vec<String>,
	/// Longnames of mixins this symbol mixes in; doubles as the reported
	/// chain of immediate mixin sources on mixed-in members.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub mixes: Vec<String>,
	/// Longnames of interfaces this symbol implements; doubles as the
	/// back-reference list on implementing members.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub implements: Vec<String>,
	/// Symbols borrowed by this one, consumed by borrow resolution.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub borrowed: Vec<Borrow>,

	/// Whether the doclet was synthesized from an ancestor's member.
	#[serde(skip_serializing_if = "is_false")]
	pub inherited: bool,
	/// Longname of the original, most-distant source of an inherited member.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub inherits: Option<String>,
	/// Longname of the ancestor member this doclet overrides.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub overrides: Option<String>,
	/// Whether the doclet was synthesized from a mixin's member.
	#[serde(skip_serializing_if = "is_false")]
	pub mixed: bool,
	/// Suppressed from rendering, but never deleted.
	#[serde(skip_serializing_if = "is_false")]
	pub ignore: bool,
	/// Placeholder record for a symbol the user never documented.
	#[serde(skip_serializing_if = "is_false")]
	pub undocumented: bool,
	/// Declared abstract; stripped when an inherited replacement applies.
	#[serde(rename = "virtual", skip_serializing_if = "is_false")]
	pub virtual_: bool,
	/// The doclet asks to inherit its ancestor's documentation wholesale.
	#[serde(skip_serializing_if = "is_false")]
	pub inheritdoc: bool,
	/// The doclet marks an override and asks for the ancestor's docs.
	#[serde(rename = "override", skip_serializing_if = "is_false")]
	pub override_: bool,

	/// Source metadata.
	#[serde(skip_serializing_if = "Meta::is_empty")]
	pub meta: Meta,

	/// Documentation fields, opaque to the augmentation engine.
	#[serde(flatten)]
	pub docs: DocBody,
}

impl Meta {
	fn is_empty(&self) -> bool {
		self.filename.is_none() && self.lineno.is_none() && self.path.is_none() && self.code.is_empty()
	}
}

impl Doclet {
	/// Create a doclet of the given kind and basename, everything else unset.
	pub fn new(kind: Kind, name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			kind,
			..Self::default()
		}
	}

	/// Whether the doclet carries user-written documentation.
	pub fn is_documented(&self) -> bool {
		!self.undocumented
	}

	/// Path of the source file the doclet came from, when known.
	pub fn filepath(&self) -> Option<String> {
		match (&self.meta.path, &self.meta.filename) {
			(Some(path), Some(filename)) => Some(format!("{path}/{filename}")),
			(None, Some(filename)) => Some(filename.clone()),
			_ => None,
		}
	}

	/// Set the containing symbol. A `<global>` parent collapses to the top
	/// level, and `prototype` segments are normalized to instance punctuation.
	pub fn set_memberof(&mut self, sid: &str) {
		let stripped = match sid.strip_prefix(GLOBAL_LONGNAME) {
			Some(rest) => rest.strip_prefix(SCOPE_PUNC).unwrap_or(rest),
			None => sid,
		};
		let normalized = name::prototype_to_punc(stripped);
		self.memberof = if normalized.is_empty() {
			None
		} else {
			Some(normalized)
		};
	}

	/// Set the fully resolved longname, stripping a `<global>` prefix and
	/// applying the kind's namespace prefix when the dictionary calls for it.
	pub fn set_longname(&mut self, longname: impl Into<String>, dict: &TagDictionary) {
		let longname = longname.into();
		let stripped = match longname.strip_prefix(GLOBAL_LONGNAME) {
			Some(rest) => rest.strip_prefix(SCOPE_PUNC_STATIC).unwrap_or(rest),
			None => longname.as_str(),
		};
		self.longname = stripped.to_string();
		if dict.is_namespace(self.kind) {
			self.longname = name::apply_namespace(&self.longname, self.kind.name());
		}
	}

	/// Set the scope from a tag value. Anything outside the recognized set is
	/// a fatal error naming the offending doclet's source file when available.
	pub fn set_scope(&mut self, scope_name: &str) -> Result<(), TagdocError> {
		match Scope::from_name(scope_name) {
			Some(scope) => {
				self.scope = Some(scope);
				Ok(())
			}
			None => Err(TagdocError::InvalidScope {
				scope: scope_name.to_string(),
				filepath: self.filepath(),
			}),
		}
	}

	/// Record a base symbol this one augments.
	pub fn augment(&mut self, base: impl Into<String>) {
		self.augments.push(base.into());
	}

	/// Record a mixin this symbol mixes in.
	pub fn mix(&mut self, source: impl Into<String>) {
		self.mixes.push(source.into());
	}

	/// Record an interface this symbol implements.
	pub fn implement(&mut self, interface: impl Into<String>) {
		self.implements.push(interface.into());
	}

	/// Record a borrowed symbol, optionally under a new name.
	pub fn borrow(&mut self, from: impl Into<String>, target: Option<String>) {
		self.borrowed.push(Borrow {
			from: from.into(),
			target,
		});
	}
}
