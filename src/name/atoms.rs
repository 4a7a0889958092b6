//! Tokenization of quoted and bracketed literal segments inside longnames.
//!
//! Quoted property names (`foo["bar"]`, `Foo#"odd name"`) are atomic: their
//! content must never be split on scope punctuation. Before any punctuation
//! handling, every literal segment is swapped for an opaque `@{N}@` token;
//! after splitting, the tokens are restored in reverse insertion order so a
//! token like `@{1}@` never clobbers the prefix of `@{10}@`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::SCOPE_PUNC_INSTANCE;
use super::SCOPE_PUNC_STATIC;

/// Matches an optional `prototype`/`#` prefix followed by a quoted literal,
/// optionally wrapped in brackets.
static QUOTED_SEGMENT: Lazy<Regex> =
	Lazy::new(|| Regex::new(r#"(\.?prototype|#)?(\[?["'].+?["']\]?)"#).expect("valid regex"));

/// A longname with its literal segments replaced by placeholder tokens.
#[derive(Debug, Clone)]
pub(crate) struct Atomized {
	/// The longname text with `@{N}@` tokens in place of literals.
	pub text: String,
	/// Literal content for each token, in insertion order.
	pub tokens: Vec<String>,
}

/// Replace every quoted or bracketed literal segment with a placeholder token.
///
/// A bracketed segment collapses to scope punctuation plus the token: instance
/// punctuation when the brackets were preceded by `prototype` or `#`, static
/// punctuation otherwise. The stored literal keeps its quotes but loses the
/// brackets, so `foo["bar"]` becomes `foo.@{0}@` with token `"bar"`. A bare
/// quoted segment keeps whatever preceded it untouched.
pub(crate) fn tokenize(longname: &str) -> Atomized {
	let mut tokens: Vec<String> = Vec::new();

	let text = QUOTED_SEGMENT.replace_all(longname, |caps: &Captures<'_>| {
		let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
		let literal = caps.get(2).map(|m| m.as_str()).unwrap_or("");

		let (lead, content) = if literal.starts_with('[') {
			let punc = if prefix.is_empty() {
				SCOPE_PUNC_STATIC
			} else {
				SCOPE_PUNC_INSTANCE
			};
			let content = literal.trim_start_matches('[').trim_end_matches(']');
			(punc.to_string(), content)
		} else {
			(prefix.to_string(), literal)
		};

		let token = format!("@{{{}}}@", tokens.len());
		tokens.push(content.to_string());
		format!("{lead}{token}")
	});

	Atomized {
		text: text.into_owned(),
		tokens,
	}
}

/// Restore placeholder tokens back into `text`, in reverse insertion order.
pub(crate) fn restore(text: &str, tokens: &[String]) -> String {
	let mut restored = text.to_string();
	for (i, token) in tokens.iter().enumerate().rev() {
		restored = restored.replace(&format!("@{{{i}}}@"), token);
	}
	restored
}
