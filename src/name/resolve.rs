//! Full identity resolution for raw doclets.
//!
//! An external parser hands over doclets whose `name`, `memberof`, `scope`,
//! and `alias` fields are only partially resolved. [`resolve`] turns that
//! combination into the canonical `name`/`memberof`/`scope`/`longname`,
//! trying a fixed priority order of rules. A doclet no rule can name keeps
//! an empty longname and drops out of name-based lookups silently.

use super::{
	GLOBAL_LONGNAME, MODULE_NAMESPACE, NameParts, SCOPE_PUNC, SCOPE_PUNC_INNER, SCOPE_PUNC_STATIC,
	Scope, ends_with_scope_punc, name_is_longname, prototype_to_punc, shorten, shorten_within,
};
use crate::dict::TagDictionary;
use crate::doclet::Doclet;

/// Resolve the longname, memberof, scope, variation, and name of a doclet.
pub fn resolve(doclet: &mut Doclet, dict: &TagDictionary) {
	let memberof = doclet.memberof.clone().unwrap_or_default();
	let mut name = doclet.name.clone();

	// change MyClass.prototype.method to MyClass#method
	if !name.is_empty() {
		name = prototype_to_punc(&name);
	}
	doclet.name = name.clone();

	let about = if let Some(alias) = doclet.alias.clone() {
		// an @alias names the symbol's canonical home directly
		shorten(&alias)
	} else {
		// member of a var in an outer function scope?
		if !name.is_empty() && memberof.is_empty() {
			if let Some(funcscope) = doclet.meta.code.funcscope.clone() {
				name = format!("{funcscope}{SCOPE_PUNC_INNER}{name}");
				doclet.name = name.clone();
				doclet.longname = name.clone();
			}
		}

		if !memberof.is_empty() || doclet.force_memberof {
			let memberof = prototype_to_punc(&memberof);
			resolve_with_memberof(doclet, &name, &memberof)
		} else {
			shorten(&name)
		}
	};

	if !about.name.is_empty() {
		doclet.name = about.name.clone();
	}
	if !about.memberof.is_empty() {
		doclet.set_memberof(&about.memberof);
	}
	if !about.longname.is_empty() && (doclet.longname.is_empty() || doclet.longname == doclet.name) {
		doclet.set_longname(about.longname.clone(), dict);
	}

	if doclet.scope == Some(Scope::Global) {
		// a @global tag always wins: the longname is the bare name
		let bare = doclet.name.clone();
		doclet.set_longname(bare, dict);
		doclet.memberof = None;
	} else if !about.scope.is_empty() {
		if about.memberof == GLOBAL_LONGNAME {
			// via @memberof <global>
			doclet.scope = Some(Scope::Global);
		} else if let Some(punc) = about.scope_punc() {
			doclet.scope = Scope::from_punc(punc);
		}
	} else if !doclet.name.is_empty() && doclet.memberof.is_some() && doclet.longname.is_empty() {
		let leading = doclet.name.chars().next().filter(|ch| SCOPE_PUNC.contains(ch));
		if let Some(punc) = leading {
			// a name fragment like #method carries its own scope
			doclet.scope = Scope::from_punc(punc);
			doclet.name = doclet.name[punc.len_utf8()..].to_string();
		} else if code_name_marks_instance(doclet) {
			// an ES class that is itself a static member can still hold
			// instance members; the code-level name ends with #name
			doclet.scope = Some(Scope::Instance);
		} else {
			doclet.scope = Some(Scope::DEFAULT);
		}

		let memberof = doclet.memberof.clone().unwrap_or_default();
		let punc = doclet
			.scope
			.and_then(Scope::punc)
			.map(String::from)
			.unwrap_or_default();
		let longname = format!("{memberof}{punc}{}", doclet.name);
		doclet.set_longname(longname, dict);
	}

	if about.variation.is_some() {
		doclet.variation = about.variation;
	}

	// if no rule produced a longname, the doclet keeps the empty string and
	// is effectively undocumented-by-name
}

/// Apply the `@memberof` rules, in priority order.
fn resolve_with_memberof(doclet: &mut Doclet, name: &str, memberof: &str) -> NameParts {
	let forced = doclet.force_memberof.then_some(memberof);
	let slice = |longname: &str| match forced {
		Some(forced) => shorten_within(longname, forced),
		None => shorten(longname),
	};

	if name.is_empty() {
		return NameParts::default();
	}

	if name_is_longname(name, memberof) && name != memberof {
		// the name is a complete longname, like @name foo.bar, @memberof foo
		slice(name)
	} else if name == memberof && name.starts_with(MODULE_NAMESPACE) {
		// name and memberof both denote the same module, probably a member
		// like 'var exports'
		slice(name)
	} else if name == memberof {
		// the name and memberof are identical, like @name foo, @memberof foo
		let scope = *doclet.scope.get_or_insert(Scope::DEFAULT);
		let punc = scope.punc().unwrap_or(SCOPE_PUNC_STATIC);
		slice(&format!("{memberof}{punc}{name}"))
	} else if ends_with_scope_punc(memberof) {
		// like @memberof foo# or @memberof foo~
		slice(&format!("{memberof}{name}"))
	} else if let Some(scope) = doclet.scope {
		let punc = scope.punc().map(String::from).unwrap_or_default();
		slice(&format!("{memberof}{punc}{name}"))
	} else {
		NameParts::default()
	}
}

fn code_name_marks_instance(doclet: &Doclet) -> bool {
	doclet
		.meta
		.code
		.name
		.as_deref()
		.is_some_and(|code_name| code_name.ends_with(&format!("#{}", doclet.name)))
}
