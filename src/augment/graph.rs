//! Dependency graph over augmentation relationships.
//!
//! Nodes are the longnames of class, interface, mixin, and external doclets;
//! edges point from a dependent symbol to every symbol named in the
//! relationship list being processed. The sort emits a node only after
//! everything it depends on, so a base's members are fully resolved before
//! its dependents copy them.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::TagdocError;
use crate::store::DocletStore;

use super::Relation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
	InProgress,
	Done,
}

/// Relationship graph for one augmentation pass.
#[derive(Debug)]
pub(crate) struct DependencyGraph {
	/// Node longnames, in doclet insertion order.
	nodes: Vec<String>,
	/// Outgoing edges per node, duplicates removed, declaration order kept.
	edges: HashMap<String, Vec<String>>,
}

impl DependencyGraph {
	/// Collect nodes and edges from every augmentable doclet in the store.
	/// Doclets sharing a longname contribute the union of their edges.
	pub fn build(store: &DocletStore, relation: Relation) -> Self {
		let mut nodes: Vec<String> = Vec::new();
		let mut edges: HashMap<String, Vec<String>> = HashMap::new();

		for doclet in store.doclets() {
			if !doclet.kind.is_augmentable() {
				continue;
			}

			let deps = match edges.entry(doclet.longname.clone()) {
				Entry::Occupied(entry) => entry.into_mut(),
				Entry::Vacant(entry) => {
					nodes.push(doclet.longname.clone());
					entry.insert(Vec::new())
				}
			};
			for dependency in relation.list(doclet) {
				if !deps.contains(dependency) {
					deps.push(dependency.clone());
				}
			}
		}

		Self { nodes, edges }
	}

	/// Produce a dependencies-first order over every node and every name a
	/// node depends on, each exactly once.
	///
	/// The traversal is an iterative depth-first search with an explicit
	/// three-state marker per name. Reaching a name that is still in
	/// progress means the relationships form a real cycle, which is an
	/// error: no processing order could resolve a base before its dependent.
	pub fn sorted(&self) -> Result<Vec<String>, TagdocError> {
		let mut state: HashMap<&str, Mark> = HashMap::new();
		let mut sorted: Vec<String> = Vec::new();

		for root in &self.nodes {
			if state.contains_key(root.as_str()) {
				continue;
			}
			state.insert(root, Mark::InProgress);
			let mut stack: Vec<(&str, usize)> = vec![(root, 0)];

			while let Some(&(node, next)) = stack.last() {
				let deps = self.edges.get(node).map(Vec::as_slice).unwrap_or(&[]);
				match deps.get(next) {
					Some(dependency) => {
						stack.last_mut().expect("stack is non-empty").1 += 1;
						match state.get(dependency.as_str()) {
							None => {
								state.insert(dependency, Mark::InProgress);
								stack.push((dependency, 0));
							}
							Some(Mark::InProgress) => {
								let start = stack
									.iter()
									.position(|&(name, _)| name == dependency.as_str())
									.unwrap_or(0);
								let mut chain: Vec<String> =
									stack[start..].iter().map(|&(name, _)| name.to_string()).collect();
								chain.push(dependency.clone());
								return Err(TagdocError::DependencyCycle { chain });
							}
							Some(Mark::Done) => {}
						}
					}
					None => {
						state.insert(node, Mark::Done);
						sorted.push(node.to_string());
						stack.pop();
					}
				}
			}
		}

		Ok(sorted)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::doclet::{Doclet, Kind};

	fn class_with(longname: &str, augments: &[&str]) -> Doclet {
		let mut doclet = Doclet::new(Kind::Class, longname);
		doclet.longname = longname.to_string();
		for base in augments {
			doclet.augment(*base);
		}
		doclet
	}

	fn sorted_for(doclets: Vec<Doclet>) -> Vec<String> {
		let store = DocletStore::from_doclets(doclets);
		DependencyGraph::build(&store, Relation::Augments)
			.sorted()
			.expect("acyclic graph")
	}

	fn position(order: &[String], name: &str) -> usize {
		order.iter().position(|entry| entry == name).expect(name)
	}

	#[test]
	fn dependencies_come_before_dependents() {
		let order = sorted_for(vec![
			class_with("C", &["B"]),
			class_with("B", &["A"]),
			class_with("A", &[]),
		]);

		assert!(position(&order, "A") < position(&order, "B"));
		assert!(position(&order, "B") < position(&order, "C"));
	}

	#[test]
	fn diamond_graphs_resolve_each_node_once() {
		let order = sorted_for(vec![
			class_with("D", &["B", "C"]),
			class_with("B", &["A"]),
			class_with("C", &["A"]),
			class_with("A", &[]),
		]);

		assert_eq!(order.len(), 4);
		assert!(position(&order, "A") < position(&order, "B"));
		assert!(position(&order, "A") < position(&order, "C"));
		assert!(position(&order, "B") < position(&order, "D"));
		assert!(position(&order, "C") < position(&order, "D"));
	}

	#[test]
	fn standalone_nodes_appear_exactly_once() {
		let order = sorted_for(vec![class_with("Lonely", &[])]);
		assert_eq!(order, vec!["Lonely".to_string()]);
	}

	#[test]
	fn unknown_dependency_names_are_still_visited() {
		let order = sorted_for(vec![class_with("B", &["Undocumented"])]);
		assert!(position(&order, "Undocumented") < position(&order, "B"));
	}

	#[test]
	fn non_augmentable_kinds_contribute_no_nodes() {
		let mut member = Doclet::new(Kind::Member, "m");
		member.longname = "A#m".to_string();
		let order = sorted_for(vec![member, class_with("A", &[])]);
		assert_eq!(order, vec!["A".to_string()]);
	}

	#[test]
	fn cycles_are_reported_with_their_chain() {
		let store = DocletStore::from_doclets(vec![
			class_with("A", &["B"]),
			class_with("B", &["C"]),
			class_with("C", &["A"]),
		]);
		let err = DependencyGraph::build(&store, Relation::Augments)
			.sorted()
			.unwrap_err();

		match err {
			TagdocError::DependencyCycle { chain } => {
				assert_eq!(chain.first(), chain.last());
				assert!(chain.len() >= 4, "chain names every participant: {chain:?}");
			}
			other => panic!("expected a dependency cycle, got {other}"),
		}
	}

	#[test]
	fn self_cycles_are_reported() {
		let store = DocletStore::from_doclets(vec![class_with("A", &["A"])]);
		let err = DependencyGraph::build(&store, Relation::Augments)
			.sorted()
			.unwrap_err();
		assert!(matches!(err, TagdocError::DependencyCycle { .. }));
	}
}
