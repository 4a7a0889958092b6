//! Unit tests for the longname grammar.

use pretty_assertions::assert_eq;

use super::*;
use crate::dict::TagDictionary;
use crate::doclet::{Doclet, Kind};

fn parts(longname: &str, memberof: &str, scope: &str, name: &str) -> NameParts {
	NameParts {
		longname: longname.to_string(),
		memberof: memberof.to_string(),
		scope: scope.to_string(),
		name: name.to_string(),
		variation: None,
	}
}

#[test]
fn shorten_splits_on_the_last_scope_punc() {
	assert_eq!(shorten("a.b.c"), parts("a.b.c", "a.b", ".", "c"));
	assert_eq!(shorten("a.b#c"), parts("a.b#c", "a.b", "#", "c"));
	assert_eq!(shorten("a~b"), parts("a~b", "a", "~", "b"));
}

#[test]
fn shorten_extracts_a_variation() {
	let mut expected = parts("a.b#c(2)", "a.b", "#", "c");
	expected.variation = Some("2".to_string());
	assert_eq!(shorten("a.b#c(2)"), expected);
}

#[test]
fn shorten_leaves_unqualified_names_whole() {
	assert_eq!(shorten("foo"), parts("foo", "", "", "foo"));
	assert_eq!(shorten(""), parts("", "", "", ""));
}

#[test]
fn shorten_never_splits_on_leading_or_trailing_punc() {
	assert_eq!(shorten("#foo"), parts("#foo", "", "", "#foo"));
	assert_eq!(shorten("foo#"), parts("foo#", "", "", "foo#"));
}

#[test]
fn shorten_normalizes_prototype_to_instance_punc() {
	assert_eq!(
		shorten("Foo.prototype.bar"),
		parts("Foo#bar", "Foo", "#", "bar")
	);
}

#[test]
fn shorten_does_not_mangle_the_name_prototype() {
	assert_eq!(shorten("prototype"), parts("prototype", "", "", "prototype"));
}

#[test]
fn shorten_treats_quoted_names_as_atomic() {
	assert_eq!(
		shorten(r##"chat."#channel".open"##),
		parts(
			r##"chat."#channel".open"##,
			r##"chat."#channel""##,
			".",
			"open"
		)
	);
	assert_eq!(
		shorten(r#"Foo#"weird name""#),
		parts(r#"Foo#"weird name""#, "Foo", "#", r#""weird name""#)
	);
}

#[test]
fn shorten_collapses_bracketed_literals_to_scope_punc() {
	// no prefix: a static member
	assert_eq!(
		shorten(r#"foo["bar"]"#),
		parts(r#"foo."bar""#, "foo", ".", r#""bar""#)
	);
	// prototype prefix: an instance member
	assert_eq!(
		shorten(r#"foo.prototype["bar"]"#),
		parts(r#"foo#"bar""#, "foo", "#", r#""bar""#)
	);
	assert_eq!(
		shorten(r#"foo#["bar"]"#),
		parts(r#"foo#"bar""#, "foo", "#", r#""bar""#)
	);
}

#[test]
fn combine_is_the_inverse_of_shorten() {
	let longnames = [
		"foo",
		"foo.bar",
		"foo#bar",
		"foo~bar",
		"a.b#c(2)",
		"module:foo/bar~baz",
		r#"foo."bar""#,
		r#"Foo#"weird name""#,
		r##"chat."#channel"#open"##,
	];
	for longname in longnames {
		assert_eq!(shorten(longname).combine(), longname, "round trip of {longname}");
	}
}

#[test]
fn shorten_within_a_forced_memberof() {
	let got = shorten_within("ns.Retriever#data", "ns.Retriever#");
	assert_eq!(got, parts("ns.Retriever#data", "ns.Retriever", "#", "data"));
}

#[test]
fn apply_namespace_inserts_before_the_basename() {
	assert_eq!(apply_namespace("foo.bar", "module"), "foo.module:bar");
	assert_eq!(apply_namespace("bar", "event"), "event:bar");
}

#[test]
fn apply_namespace_passes_through_namespaced_basenames() {
	assert_eq!(apply_namespace("foo.module:bar", "module"), "foo.module:bar");
	assert_eq!(apply_namespace("event:bar", "event"), "event:bar");
}

#[test]
fn has_ancestor_walks_the_memberof_chain() {
	assert!(has_ancestor("module:a", "module:a~b"));
	assert!(has_ancestor("module:a", "module:a~b#c"));
	assert!(has_ancestor("module:a~b", "module:a~b#c"));
}

#[test]
fn has_ancestor_rejects_prefix_only_matches() {
	// "module:another" starts with "module:a" but is not a descendant
	assert!(!has_ancestor("module:a", "module:another~b"));
}

#[test]
fn has_ancestor_rejects_self_and_empty() {
	assert!(!has_ancestor("foo", "foo"));
	assert!(!has_ancestor("", "foo"));
	assert!(!has_ancestor("foo", ""));
}

#[test]
fn split_name_handles_each_separator_style() {
	let got = split_name("foo The description");
	assert_eq!(got.name, "foo");
	assert_eq!(got.description, "The description");

	let got = split_name("[foo] - The description");
	assert_eq!(got.name, "[foo]");
	assert_eq!(got.description, "The description");

	let got = split_name("foo");
	assert_eq!(got.name, "foo");
	assert_eq!(got.description, "");
}

#[test]
fn split_name_keeps_markdown_dashes_out_of_the_separator() {
	// the hyphen is on the next line, so it belongs to the description
	let got = split_name("foo\n- first bullet");
	assert_eq!(got.name, "foo");
	assert_eq!(got.description, "- first bullet");
}

#[test]
fn longnames_to_tree_nests_by_chunk() {
	let tree = longnames_to_tree(["module:a/b~c#d", "module:a/b~c", "module:a/b"]);

	let root = tree.get("module:a").expect("root chunk");
	assert_eq!(root.longname, "module:a");

	let file = root.children.get("/b").expect("filepath chunk");
	assert_eq!(file.longname, "module:a/b");

	let inner = file.children.get("~c").expect("inner chunk");
	assert_eq!(inner.longname, "module:a/b~c");
	assert_eq!(inner.memberof, "module:a/b");

	let member = inner.children.get("#d").expect("instance chunk");
	assert_eq!(member.longname, "module:a/b~c#d");
	assert!(member.children.is_empty());
}

#[test]
fn scope_punc_round_trips() {
	for scope in [Scope::Inner, Scope::Instance, Scope::Static] {
		let punc = scope.punc().expect("punctuated scope");
		assert_eq!(Scope::from_punc(punc), Some(scope));
	}
	assert_eq!(Scope::Global.punc(), None);
	assert_eq!(Scope::from_name("instance"), Some(Scope::Instance));
	assert_eq!(Scope::from_name("lexical"), None);
}

// --- resolve ---

fn resolved(mut doclet: Doclet) -> Doclet {
	resolve(&mut doclet, &TagDictionary::default());
	doclet
}

#[test]
fn resolve_member_with_plain_memberof() {
	let mut raw = Doclet::new(Kind::Member, "bar");
	raw.memberof = Some("Foo".to_string());
	let doclet = resolved(raw);

	assert_eq!(doclet.longname, "Foo.bar");
	assert_eq!(doclet.scope, Some(Scope::Static));
	assert_eq!(doclet.memberof.as_deref(), Some("Foo"));
}

#[test]
fn resolve_leading_scope_punc_on_the_name() {
	let mut raw = Doclet::new(Kind::Function, "#bar");
	raw.memberof = Some("Foo".to_string());
	let doclet = resolved(raw);

	assert_eq!(doclet.name, "bar");
	assert_eq!(doclet.longname, "Foo#bar");
	assert_eq!(doclet.scope, Some(Scope::Instance));
}

#[test]
fn resolve_name_that_is_already_a_longname() {
	let mut raw = Doclet::new(Kind::Member, "Foo.bar");
	raw.memberof = Some("Foo".to_string());
	let doclet = resolved(raw);

	assert_eq!(doclet.name, "bar");
	assert_eq!(doclet.longname, "Foo.bar");
	assert_eq!(doclet.scope, Some(Scope::Static));
}

#[test]
fn resolve_memberof_with_trailing_scope_punc() {
	let mut raw = Doclet::new(Kind::Member, "bar");
	raw.memberof = Some("Foo#".to_string());
	let doclet = resolved(raw);

	assert_eq!(doclet.longname, "Foo#bar");
	assert_eq!(doclet.scope, Some(Scope::Instance));
	assert_eq!(doclet.memberof.as_deref(), Some("Foo"));
}

#[test]
fn resolve_explicit_scope_tag_concatenates() {
	let mut raw = Doclet::new(Kind::Member, "bar");
	raw.memberof = Some("Foo".to_string());
	raw.scope = Some(Scope::Inner);
	let doclet = resolved(raw);

	assert_eq!(doclet.longname, "Foo~bar");
	assert_eq!(doclet.scope, Some(Scope::Inner));
}

#[test]
fn resolve_prototype_memberof() {
	let mut raw = Doclet::new(Kind::Function, "bar");
	raw.memberof = Some("Foo.prototype".to_string());
	let doclet = resolved(raw);

	assert_eq!(doclet.longname, "Foo#bar");
	assert_eq!(doclet.scope, Some(Scope::Instance));
}

#[test]
fn resolve_self_referential_memberof() {
	let mut raw = Doclet::new(Kind::Member, "Foo");
	raw.memberof = Some("Foo".to_string());
	let doclet = resolved(raw);

	assert_eq!(doclet.longname, "Foo.Foo");
	assert_eq!(doclet.scope, Some(Scope::Static));
}

#[test]
fn resolve_module_self_reference() {
	let mut raw = Doclet::new(Kind::Member, "module:color/mixer");
	raw.memberof = Some("module:color/mixer".to_string());
	let doclet = resolved(raw);

	assert_eq!(doclet.longname, "module:color/mixer");
	assert_eq!(doclet.name, "module:color/mixer");
}

#[test]
fn resolve_forced_memberof() {
	let mut raw = Doclet::new(Kind::Member, "data");
	raw.memberof = Some("ns.Retriever#".to_string());
	raw.force_memberof = true;
	let doclet = resolved(raw);

	assert_eq!(doclet.longname, "ns.Retriever#data");
	assert_eq!(doclet.memberof.as_deref(), Some("ns.Retriever"));
	assert_eq!(doclet.scope, Some(Scope::Instance));
}

#[test]
fn resolve_alias_wins_over_everything_else() {
	let mut raw = Doclet::new(Kind::Function, "whatever");
	raw.alias = Some("Foo#bar".to_string());
	raw.memberof = Some("Ignored".to_string());
	let doclet = resolved(raw);

	assert_eq!(doclet.name, "bar");
	assert_eq!(doclet.longname, "Foo#bar");
	assert_eq!(doclet.scope, Some(Scope::Instance));
}

#[test]
fn resolve_global_tag_discards_memberof() {
	let mut raw = Doclet::new(Kind::Function, "bar");
	raw.scope = Some(Scope::Global);
	let doclet = resolved(raw);

	assert_eq!(doclet.longname, "bar");
	assert_eq!(doclet.memberof, None);
	assert_eq!(doclet.scope, Some(Scope::Global));
}

#[test]
fn resolve_funcscope_nests_under_the_enclosing_function() {
	let mut raw = Doclet::new(Kind::Member, "bar");
	raw.meta.code.funcscope = Some("outer".to_string());
	let doclet = resolved(raw);

	assert_eq!(doclet.longname, "outer~bar");
	assert_eq!(doclet.name, "bar");
	assert_eq!(doclet.memberof.as_deref(), Some("outer"));
	assert_eq!(doclet.scope, Some(Scope::Inner));
}

#[test]
fn resolve_static_es_class_with_instance_members() {
	let mut raw = Doclet::new(Kind::Function, "send");
	raw.memberof = Some("Socket".to_string());
	raw.meta.code.name = Some("Socket#send".to_string());
	let doclet = resolved(raw);

	assert_eq!(doclet.longname, "Socket#send");
	assert_eq!(doclet.scope, Some(Scope::Instance));
}

#[test]
fn resolve_module_kind_gains_the_namespace_prefix() {
	let raw = Doclet::new(Kind::Module, "color/mixer");
	let doclet = resolved(raw);

	assert_eq!(doclet.longname, "module:color/mixer");
}

#[test]
fn resolve_variation_from_the_name() {
	let raw = Doclet::new(Kind::Function, "foo.bar(2)");
	let doclet = resolved(raw);

	assert_eq!(doclet.name, "bar");
	assert_eq!(doclet.variation.as_deref(), Some("2"));
	assert_eq!(doclet.longname, "foo.bar(2)");
}

#[test]
fn resolve_without_any_name_leaves_the_longname_empty() {
	let raw = Doclet::new(Kind::Member, "");
	let doclet = resolved(raw);

	assert_eq!(doclet.longname, "");
}
