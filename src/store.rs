//! The working set of doclets for one documentation run.
//!
//! The store owns an append-only vector of doclets plus three derived
//! indices: by longname, by parent longname, and by "already documented".
//! All mutation goes through the store, so the indices are consistent by
//! construction; the augmentation engine reads members and documented
//! entries through them and annotates existing doclets in place via ids.

use std::collections::HashMap;

use crate::doclet::Doclet;
use crate::name::ScopeSet;

/// Identifier of a doclet within a [`DocletStore`]: its index in the
/// append-only doclet vector.
pub type DocletId = usize;

/// Doclet collection plus derived indices, owned by one documentation run.
#[derive(Debug, Default)]
pub struct DocletStore {
	doclets: Vec<Doclet>,
	by_longname: HashMap<String, Vec<DocletId>>,
	by_memberof: HashMap<String, Vec<DocletId>>,
	documented: HashMap<String, Vec<DocletId>>,
}

impl DocletStore {
	/// Create an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a store from an already-resolved doclet collection.
	pub fn from_doclets(doclets: Vec<Doclet>) -> Self {
		let mut store = Self::new();
		for doclet in doclets {
			store.push(doclet);
		}
		store
	}

	/// Append a doclet and reflect it in all three indices.
	pub fn push(&mut self, doclet: Doclet) -> DocletId {
		let id = self.doclets.len();

		self.by_longname
			.entry(doclet.longname.clone())
			.or_default()
			.push(id);
		if let Some(memberof) = &doclet.memberof {
			self.by_memberof.entry(memberof.clone()).or_default().push(id);
		}
		if doclet.is_documented() {
			self.documented
				.entry(doclet.longname.clone())
				.or_default()
				.push(id);
		}

		self.doclets.push(doclet);
		id
	}

	/// Number of doclets in the store.
	pub fn len(&self) -> usize {
		self.doclets.len()
	}

	/// Whether the store holds no doclets.
	pub fn is_empty(&self) -> bool {
		self.doclets.is_empty()
	}

	/// All doclets, in insertion order.
	pub fn doclets(&self) -> &[Doclet] {
		&self.doclets
	}

	/// Consume the store, yielding the doclets in insertion order.
	pub fn into_doclets(self) -> Vec<Doclet> {
		self.doclets
	}

	/// The doclet with the given id. Ids come from this store and are always
	/// valid for its lifetime.
	pub fn get(&self, id: DocletId) -> &Doclet {
		&self.doclets[id]
	}

	/// Mutable access to the doclet with the given id.
	pub fn get_mut(&mut self, id: DocletId) -> &mut Doclet {
		&mut self.doclets[id]
	}

	/// Ids of every doclet sharing the given longname.
	pub fn by_longname(&self, longname: &str) -> &[DocletId] {
		self.by_longname
			.get(longname)
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	/// Whether any doclet carries the given longname.
	pub fn has_longname(&self, longname: &str) -> bool {
		self.by_longname
			.get(longname)
			.is_some_and(|ids| !ids.is_empty())
	}

	/// Ids of the doclets whose `memberof` is the given longname, optionally
	/// restricted to a set of scopes. A doclet without a scope only matches
	/// when no filter is given.
	pub fn members_of(&self, longname: &str, scopes: Option<ScopeSet>) -> Vec<DocletId> {
		let Some(ids) = self.by_memberof.get(longname) else {
			return Vec::new();
		};

		ids.iter()
			.copied()
			.filter(|&id| match scopes {
				None => true,
				Some(set) => self.doclets[id]
					.scope
					.is_some_and(|scope| set.contains(scope.flag())),
			})
			.collect()
	}

	/// Ids of the documented (non-placeholder) doclets at the given longname.
	pub fn documented(&self, longname: &str) -> &[DocletId] {
		self.documented
			.get(longname)
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	/// The most recently pushed documented doclet at the given longname.
	pub fn latest_documented(&self, longname: &str) -> Option<&Doclet> {
		self.documented(longname)
			.last()
			.map(|&id| &self.doclets[id])
	}
}
