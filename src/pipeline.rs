//! High-level pipeline for one documentation run.

use tracing::{debug, info};

use crate::augment;
use crate::borrow;
use crate::dict::TagDictionary;
use crate::doclet::Doclet;
use crate::error::Result;
use crate::name;
use crate::store::DocletStore;

/// Tagdoc canonicalizes doclet identities and augments the collection across
/// inheritance, mixin, and interface-implementation relationships.
///
/// The pipeline is UI-agnostic and can be driven by any frontend (CLI, docs
/// server, test harness). It runs synchronously over one batch of doclets:
/// resolve every identity, index the collection, augment it, and resolve
/// borrowed symbols.
#[derive(Debug, Clone)]
pub struct Tagdoc {
	/// Namespace rules applied while assigning longnames.
	dictionary: TagDictionary,

	/// Whether to run the augmentation passes.
	augment: bool,

	/// Whether to resolve borrowed symbols after augmentation.
	resolve_borrows: bool,
}

impl Default for Tagdoc {
	fn default() -> Self {
		Self::new()
	}
}

impl Tagdoc {
	/// Create a pipeline with the default tag dictionary and every stage
	/// enabled.
	pub fn new() -> Self {
		Self {
			dictionary: TagDictionary::default(),
			augment: true,
			resolve_borrows: true,
		}
	}

	/// Replace the tag dictionary consulted for namespace rules.
	pub fn with_dictionary(mut self, dictionary: TagDictionary) -> Self {
		self.dictionary = dictionary;
		self
	}

	/// Enable or disable the augmentation passes.
	pub fn with_augmentation(mut self, enabled: bool) -> Self {
		self.augment = enabled;
		self
	}

	/// Enable or disable borrow resolution.
	pub fn with_borrow_resolution(mut self, enabled: bool) -> Self {
		self.resolve_borrows = enabled;
		self
	}

	/// The tag dictionary currently in use.
	pub fn dictionary(&self) -> &TagDictionary {
		&self.dictionary
	}

	/// Run the pipeline over a batch of raw doclets.
	///
	/// Every doclet's identity fields are canonicalized in place, the
	/// collection is indexed, and augmentation appends synthesized doclets.
	/// The returned store owns the final collection; callers that only need
	/// the doclets can take them back with [`DocletStore::into_doclets`].
	pub fn process(&self, mut doclets: Vec<Doclet>) -> Result<DocletStore> {
		info!(doclets = doclets.len(), "resolving doclet identities");
		for doclet in &mut doclets {
			name::resolve(doclet, &self.dictionary);
		}

		let mut store = DocletStore::from_doclets(doclets);

		if self.augment {
			let before = store.len();
			augment::augment_all(&mut store)?;
			debug!(added = store.len() - before, "augmentation complete");
		}

		if self.resolve_borrows {
			borrow::resolve_borrows(&mut store);
		}

		Ok(store)
	}
}
