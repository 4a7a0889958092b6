//! Resolution of borrowed symbols.
//!
//! A doclet can declare that it borrows another symbol's documentation,
//! optionally under a new name. Resolution copies every doclet of the lent
//! symbol onto the borrower, renames it, and detects instance scope from a
//! leading `prototype.` or `#` in the target name. The borrow list is
//! consumed in the process.

use crate::name::Scope;
use crate::store::DocletStore;

/// Copy the doclets of borrowed symbols onto their borrowers.
pub fn resolve_borrows(store: &mut DocletStore) {
	for id in 0..store.len() {
		let borrowed = std::mem::take(&mut store.get_mut(id).borrowed);
		if borrowed.is_empty() {
			continue;
		}
		let owner = store.get(id).longname.clone();

		for entry in borrowed {
			let lent_ids = store.by_longname(&entry.from).to_vec();
			if lent_ids.is_empty() {
				continue;
			}

			let target = entry.target.clone().unwrap_or_else(|| entry.from.clone());
			let target = match target.strip_prefix("prototype.") {
				Some(rest) => format!("#{rest}"),
				None => target,
			};
			let segments: Vec<&str> = target.split('#').collect();
			let scope = if segments.len() == 2 {
				Scope::Instance
			} else {
				Scope::Static
			};
			let name = segments.last().copied().unwrap_or_default().to_string();
			let punc = scope.punc().expect("instance and static scopes have punctuation");

			for lent_id in lent_ids {
				let mut clone = store.get(lent_id).clone();
				clone.name = name.clone();
				clone.scope = Some(scope);
				clone.memberof = Some(owner.clone());
				clone.longname = format!("{owner}{punc}{name}");
				store.push(clone);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::doclet::{Doclet, Kind};

	fn util_fn(longname: &str, name: &str) -> Doclet {
		let mut doclet = Doclet::new(Kind::Function, name);
		doclet.longname = longname.to_string();
		doclet.docs.description = Some(format!("Docs for {longname}."));
		doclet
	}

	#[test]
	fn borrowed_symbols_are_copied_under_the_borrower() {
		let mut owner = Doclet::new(Kind::Namespace, "util");
		owner.longname = "util".to_string();
		owner.borrow("trstr", None);

		let mut store = DocletStore::from_doclets(vec![owner, util_fn("trstr", "trstr")]);
		resolve_borrows(&mut store);

		let ids = store.by_longname("util.trstr").to_vec();
		assert_eq!(ids.len(), 1);
		let copied = store.get(ids[0]);
		assert_eq!(copied.memberof.as_deref(), Some("util"));
		assert_eq!(copied.scope, Some(Scope::Static));
		assert_eq!(copied.docs.description.as_deref(), Some("Docs for trstr."));
	}

	#[test]
	fn the_as_target_renames_the_borrowed_symbol() {
		let mut owner = Doclet::new(Kind::Namespace, "util");
		owner.longname = "util".to_string();
		owner.borrow("trstr", Some("trim".to_string()));

		let mut store = DocletStore::from_doclets(vec![owner, util_fn("trstr", "trstr")]);
		resolve_borrows(&mut store);

		assert!(store.has_longname("util.trim"));
		assert!(!store.has_longname("util.trstr"));
	}

	#[test]
	fn a_prototype_target_becomes_an_instance_member() {
		let mut owner = Doclet::new(Kind::Class, "Cat");
		owner.longname = "Cat".to_string();
		owner.borrow("speak", Some("prototype.meow".to_string()));

		let mut store = DocletStore::from_doclets(vec![owner, util_fn("speak", "speak")]);
		resolve_borrows(&mut store);

		let ids = store.by_longname("Cat#meow").to_vec();
		assert_eq!(ids.len(), 1);
		assert_eq!(store.get(ids[0]).scope, Some(Scope::Instance));
	}

	#[test]
	fn borrow_lists_are_consumed() {
		let mut owner = Doclet::new(Kind::Namespace, "util");
		owner.longname = "util".to_string();
		owner.borrow("missing", None);

		let mut store = DocletStore::from_doclets(vec![owner]);
		resolve_borrows(&mut store);

		assert!(store.get(0).borrowed.is_empty());
		assert_eq!(store.len(), 1);
	}
}
