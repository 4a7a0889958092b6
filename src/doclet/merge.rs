//! The shared merge policy for combining two doclet records.

use super::{DocBody, Doclet};

/// Combine an ancestor's doclet with whatever the descendant wrote.
///
/// The result starts as a deep copy of the ancestor. For every documentation
/// field, a value the descendant set wins; anything the descendant left unset
/// falls back to the ancestor. Identity fields are left for the caller to
/// rewrite into the descendant's context. Passing `None` for the descendant
/// (a brand-new synthetic member, or one whose own docs were discarded by an
/// inherit-from-parent tag) yields the ancestor's documentation unchanged.
pub fn merge_doclets(descendant: Option<&Doclet>, ancestor: &Doclet) -> Doclet {
	let mut merged = ancestor.clone();
	if let Some(descendant) = descendant {
		merged.docs = merge_bodies(&descendant.docs, &ancestor.docs);
	}
	merged
}

fn merge_bodies(descendant: &DocBody, ancestor: &DocBody) -> DocBody {
	DocBody {
		summary: pick(&descendant.summary, &ancestor.summary),
		description: pick(&descendant.description, &ancestor.description),
		classdesc: pick(&descendant.classdesc, &ancestor.classdesc),
		params: pick(&descendant.params, &ancestor.params),
		properties: pick(&descendant.properties, &ancestor.properties),
		returns: pick(&descendant.returns, &ancestor.returns),
		examples: pick(&descendant.examples, &ancestor.examples),
		see: pick(&descendant.see, &ancestor.see),
		deprecated: pick(&descendant.deprecated, &ancestor.deprecated),
		since: pick(&descendant.since, &ancestor.since),
		access: pick(&descendant.access, &ancestor.access),
		readonly: pick(&descendant.readonly, &ancestor.readonly),
		type_info: pick(&descendant.type_info, &ancestor.type_info),
	}
}

fn pick<T: Clone>(descendant: &Option<T>, ancestor: &Option<T>) -> Option<T> {
	descendant.clone().or_else(|| ancestor.clone())
}
