//! # pwl
//!
//! A **Personal Word List**: a user-maintained dictionary answering three
//! questions about Unicode words -- *is this word known?*, *what known
//! words resemble it?*, and *add/remove this word* -- backed by a flat
//! UTF-8 text file that survives across process lifetimes.
//!
//! The core is an in-memory word index and fuzzy-match engine: a
//! prefix-compressed [`trie`] over Unicode scalar values, and a
//! bounded-error [`matcher`] that enumerates trie strings within a small
//! edit distance of a query, using transposition-aware
//! Damerau-Levenshtein distance ([`edit_distance`]) under the
//! case-folding and Unicode-normalization policies in [`case`]. The
//! [`pwl`] module ties these together behind [`Pwl`], the public facade.
//!
//! ## Example
//!
//! ```
//! use pwl::Pwl;
//!
//! let mut list = Pwl::new();
//! list.add("hello");
//!
//! assert!(list.check("hello"));
//! assert!(list.check("HELLO")); // all-caps falls back to lowercase
//!
//! let suggestions = list.suggest("helo", &[]);
//! assert!(suggestions.contains(&"hello".to_string()));
//! ```
//!
//! ## Features
//! - exact, case-aware membership checks via [`Pwl::check`]
//! - bounded fuzzy suggestions via [`Pwl::suggest`], ranked by edit
//!   distance and re-cased to match the query
//! - an optional backing text file (see [`Pwl::with_file`]) that is
//!   transparently reloaded whenever it changes on disk
//!
//! ## Non-goals
//! No phonetic/soundex ranking, no concurrent multi-writer semantics, no
//! persistence beyond append/rewrite of a flat text file. See
//! `SPEC_FULL.md` for the full design rationale.
//!
//! ## License
//!
//! The software is licensed under the MIT license.

mod case;
mod edit_distance;
mod error;
mod file_store;
mod limits;
mod matcher;
mod pwl;
mod trie;
mod trie_node;

pub use error::PwlError;
pub use limits::{PWL_MAX_ERRORS, PWL_MAX_SUGGS};
pub use pwl::Pwl;
