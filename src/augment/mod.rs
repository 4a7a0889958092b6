//! The doclet augmentation engine.
//!
//! Augmentation walks the dependency graph of `augments`/`mixes`/`implements`
//! relationships in dependencies-first order and, for each dependent symbol,
//! synthesizes or annotates member doclets: inherited members get copies
//! under the descendant's longname, mixed-in static members are copied (and
//! become instance members on classes), and interface members attach their
//! documentation to the implementing symbol. One generic procedure covers
//! all three relationships; they differ only in which members are fetched
//! and which metadata the copies carry.

mod graph;

use std::collections::HashMap;

use tracing::debug;

use crate::doclet::{Doclet, Kind, merge_doclets};
use crate::error::Result;
use crate::name::{SCOPE_PUNC_INSTANCE, Scope, ScopeSet, shorten};
use crate::store::{DocletId, DocletStore};

use graph::DependencyGraph;

/// The three relationship properties augmentation propagates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
	/// Class or interface inheritance (`@augments`).
	Augments,
	/// Mixin inclusion (`@mixes`).
	Mixes,
	/// Interface implementation (`@implements`).
	Implements,
}

impl Relation {
	/// The dependent doclet's list of this relationship's targets.
	fn list(self, doclet: &Doclet) -> &[String] {
		match self {
			Self::Augments => &doclet.augments,
			Self::Mixes => &doclet.mixes,
			Self::Implements => &doclet.implements,
		}
	}

	/// Scopes of the ancestor members this relationship copies.
	fn member_scopes(self) -> ScopeSet {
		match self {
			Self::Augments | Self::Implements => ScopeSet::INSTANCE,
			Self::Mixes => ScopeSet::STATIC,
		}
	}
}

/// Add doclets to reflect class and interface inheritance.
///
/// If `ClassA` has the instance member `m` and `ClassB` augments `ClassA`,
/// this adds a doclet for `ClassB#m` unless `ClassB` documents its own.
pub fn add_inherited(store: &mut DocletStore) -> Result<()> {
	augment(store, Relation::Augments)
}

/// Add doclets to reflect mixins. A mixin's static members are copied onto
/// the mixing symbol; when that symbol is a class, the copies become
/// instance members.
pub fn add_mixed_in(store: &mut DocletStore) -> Result<()> {
	augment(store, Relation::Mixes)
}

/// Add and update doclets to reflect interface implementations. Interface
/// member documentation attaches to the implementing members, which record
/// what they implement.
pub fn add_implemented(store: &mut DocletStore) -> Result<()> {
	augment(store, Relation::Implements)
}

/// Run every augmentation pass in the required order.
///
/// The second implementation pass is not redundant: inheriting a class or
/// interface can make interface members reachable that were not when the
/// first pass ran.
pub fn augment_all(store: &mut DocletStore) -> Result<()> {
	add_mixed_in(store)?;
	add_implemented(store)?;
	add_inherited(store)?;
	add_implemented(store)
}

fn augment(store: &mut DocletStore, relation: Relation) -> Result<()> {
	let graph = DependencyGraph::build(store, relation);
	let order = graph.sorted()?;
	debug!(?relation, nodes = order.len(), "augmenting in dependency order");

	for dependent in order {
		let additions = collect_additions(store, &dependent, relation);
		if !additions.is_empty() {
			debug!(
				dependent = %dependent,
				additions = additions.len(),
				"indexing synthesized member doclets"
			);
		}
		for addition in additions {
			store.push(addition);
		}
	}
	Ok(())
}

/// Compute the doclets one dependent symbol gains from its ancestors.
///
/// At most one addition is produced per member longname; when several
/// ancestors in the relationship list supply the same member, the last one
/// listed wins, tracked through a longname-to-index map that is reset for
/// each dependent.
fn collect_additions(store: &mut DocletStore, dependent: &str, relation: Relation) -> Vec<Doclet> {
	let mut additions: Vec<Doclet> = Vec::new();
	let mut addition_indexes: HashMap<String, usize> = HashMap::new();

	let dependent_ids = store.by_longname(dependent).to_vec();
	for dependent_id in dependent_ids {
		let doclet = store.get(dependent_id);
		if relation == Relation::Augments && !matches!(doclet.kind, Kind::Class | Kind::Interface) {
			continue;
		}
		let dependent_kind = doclet.kind;
		let ancestors = relation.list(doclet).to_vec();

		for ancestor_longname in ancestors {
			let member_ids = store.members_of(&ancestor_longname, Some(relation.member_scopes()));
			for member_id in member_ids {
				// only documented symbols propagate
				if store.get(member_id).undocumented {
					continue;
				}
				add_member(
					store,
					relation,
					dependent,
					dependent_kind,
					member_id,
					&mut additions,
					&mut addition_indexes,
				);
			}
		}
	}

	additions
}

fn add_member(
	store: &mut DocletStore,
	relation: Relation,
	dependent: &str,
	dependent_kind: Kind,
	member_id: DocletId,
	additions: &mut Vec<Doclet>,
	addition_indexes: &mut HashMap<String, usize>,
) {
	let ancestor = store.get(member_id).clone();
	let ancestor_longname = ancestor.longname.clone();

	// the would-be member longname under the dependent: same scope and
	// basename, reparented
	let mut parts = shorten(&ancestor_longname);
	parts.memberof = dependent.to_string();
	let rewrite_to_instance = relation == Relation::Mixes && dependent_kind == Kind::Class;
	if rewrite_to_instance {
		parts.scope = SCOPE_PUNC_INSTANCE.to_string();
	}
	let child_longname = parts.combine();

	let child_exists = store.has_longname(&child_longname);
	// interface docs only attach to members the implementation actually has
	if relation == Relation::Implements && !child_exists {
		return;
	}

	let documented_ids = store.documented(&child_longname).to_vec();

	if documented_ids.is_empty() {
		// nothing written by the descendant: synthesize the member outright
		let merged = synthesize(
			relation,
			&ancestor,
			dependent,
			&child_longname,
			rewrite_to_instance,
			child_exists,
		);
		update_added_doclets(merged, additions, addition_indexes);
	} else if explicitly_inherits(store, &documented_ids) {
		// the descendant asked for the ancestor's docs; suppress its own and
		// let the copy stand in
		for &id in &documented_ids {
			store.get_mut(id).ignore = true;
		}
		let mut merged = synthesize(
			relation,
			&ancestor,
			dependent,
			&child_longname,
			rewrite_to_instance,
			child_exists,
		);
		merged.virtual_ = false;
		merged.inheritdoc = false;
		merged.override_ = false;
		update_added_doclets(merged, additions, addition_indexes);
	} else {
		// the descendant documented the member on its own; record the
		// back-reference and leave its docs alone
		for &id in &documented_ids {
			let existing = store.get_mut(id);
			match relation {
				Relation::Augments => existing.overrides = Some(ancestor_longname.clone()),
				Relation::Implements => update_implements(existing, &ancestor_longname),
				Relation::Mixes => update_mixes(existing, &ancestor_longname),
			}
		}
	}
}

/// Build the synthetic member doclet for one ancestor member.
fn synthesize(
	relation: Relation,
	ancestor: &Doclet,
	dependent: &str,
	child_longname: &str,
	rewrite_to_instance: bool,
	child_exists: bool,
) -> Doclet {
	let mut merged = merge_doclets(None, ancestor);
	merged.memberof = Some(dependent.to_string());
	merged.longname = child_longname.to_string();

	match relation {
		Relation::Augments => {
			// keep the original, most-distant source through multi-level
			// chains: only the first copy records where the docs came from
			if !ancestor.inherited {
				merged.inherits = Some(ancestor.longname.clone());
			}
			merged.inherited = true;
			merged.overrides = child_exists.then(|| ancestor.longname.clone());
		}
		Relation::Mixes => {
			update_mixes(&mut merged, &ancestor.longname);
			merged.mixed = true;
			if rewrite_to_instance {
				merged.scope = Some(Scope::Instance);
			}
		}
		Relation::Implements => {
			update_implements(&mut merged, &ancestor.longname);
		}
	}

	merged
}

/// Record a mixed-in source on a doclet's `mixes` chain.
///
/// A multi-level chain reports the immediate source only: a previous entry
/// with the same basename is dropped before the new one is pushed, so mixing
/// `m` into `MixinC` from `MixinB` hides `MixinA.m` even when `MixinB` got
/// the member from `MixinA`.
fn update_mixes(doclet: &mut Doclet, mixed_longname: &str) {
	if doclet.mixes.is_empty() {
		doclet.mixes = vec![mixed_longname.to_string()];
		return;
	}

	let mixed_name = shorten(mixed_longname).name;
	if let Some(at) = doclet
		.mixes
		.iter()
		.position(|entry| shorten(entry).name == mixed_name)
	{
		doclet.mixes.remove(at);
	}
	doclet.mixes.push(mixed_longname.to_string());
}

/// Record an implemented interface member on a doclet, without duplicates.
fn update_implements(doclet: &mut Doclet, implemented_longname: &str) {
	if !doclet
		.implements
		.iter()
		.any(|entry| entry == implemented_longname)
	{
		doclet.implements.push(implemented_longname.to_string());
	}
}

/// Whether any of the doclets carries an inherit-from-parent tag.
fn explicitly_inherits(store: &DocletStore, ids: &[DocletId]) -> bool {
	ids.iter().any(|&id| {
		let doclet = store.get(id);
		doclet.inheritdoc || doclet.override_
	})
}

fn update_added_doclets(
	doclet: Doclet,
	additions: &mut Vec<Doclet>,
	indexes: &mut HashMap<String, usize>,
) {
	match indexes.get(&doclet.longname) {
		Some(&at) => additions[at] = doclet,
		None => {
			indexes.insert(doclet.longname.clone(), additions.len());
			additions.push(doclet);
		}
	}
}
