//! The PWL facade: owns the trie, deduplicates original-cased words, and
//! orchestrates `check`/`suggest`/`add`/`remove` against an optional
//! backing file.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fxhash::FxHashMap;

use crate::case;
use crate::edit_distance;
use crate::error::PwlError;
use crate::file_store;
use crate::limits::{PWL_MAX_ERRORS, PWL_MAX_SUGGS};
use crate::matcher::{self, Mode};
use crate::trie::Trie;

/// A user-maintained, optionally file-backed personal word list.
///
/// `Pwl` normalizes every word it is given to NFD before touching its
/// internal [`Trie`], and keeps a side table of first-seen original
/// casing so [`Pwl::suggest`] can hand back words the way the user
/// originally typed them.
#[derive(Debug, Default)]
pub struct Pwl {
    trie: Trie,
    original_forms: FxHashMap<String, String>,
    source_path: Option<PathBuf>,
    last_mtime: Option<SystemTime>,
}

impl Pwl {
    /// An empty PWL with no backing file.
    pub fn new() -> Self {
        Pwl::default()
    }

    /// A PWL bound to `path`, creating the file if it doesn't exist yet.
    /// Returns [`PwlError::IoUnavailable`] if the file can't be created
    /// or opened.
    pub fn with_file(path: impl AsRef<Path>) -> Result<Self, PwlError> {
        let path = path.as_ref().to_path_buf();
        file_store::ensure_exists(&path)?;

        let mut pwl = Pwl {
            source_path: Some(path),
            ..Pwl::default()
        };
        pwl.refresh();
        Ok(pwl)
    }

    /// True iff `word` (or, for title-case/all-caps inputs, one of its
    /// lowercased/title-cased fallbacks) is present in the list.
    pub fn check(&mut self, word: &str) -> bool {
        self.refresh();

        if self.trie.contains(word) {
            return true;
        }

        if case::is_title_case(word) {
            let lowered = case::lowercase(word);
            return self.trie.contains(&lowered);
        }

        if case::is_all_caps(word) {
            let lowered = case::lowercase(word);
            if self.trie.contains(&lowered) {
                return true;
            }
            let titled = case::to_titlecase(word);
            if self.trie.contains(&titled) {
                return true;
            }
        }

        false
    }

    /// Up to [`PWL_MAX_SUGGS`] known words within bounded edit distance
    /// of `word`, closest first, re-cased to match the query's casing
    /// convention. `baseline` (suggestions already produced by some
    /// other provider) caps how far the search radius can extend; pass
    /// an empty slice to use the full [`PWL_MAX_ERRORS`] budget.
    pub fn suggest(&mut self, word: &str, baseline: &[String]) -> Vec<String> {
        self.refresh();

        let normalized_query = case::normalize(word);

        let max_dist = baseline
            .iter()
            .map(|s| edit_distance::distance(&case::normalize(s), &normalized_query))
            .min()
            .map(|best| best.min(PWL_MAX_ERRORS))
            .unwrap_or(PWL_MAX_ERRORS);

        let lowered_query = case::lowercase(&normalized_query);

        let mut ranked: Vec<(String, usize)> = Vec::new();
        for (candidate, errors) in matcher::matches(&self.trie_root(), &lowered_query, max_dist, Mode::CaseInsensitive)
        {
            insert_ranked(&mut ranked, candidate, errors);
        }

        let query_is_title = case::is_title_case(word);
        let query_is_caps = case::is_all_caps(word);

        ranked
            .into_iter()
            .map(|(candidate, _)| self.recase(&candidate, query_is_title, query_is_caps))
            .collect()
    }

    /// Adds `word`. A word already present (by its exact original
    /// casing) is a no-op, including toward the backing file, so adding
    /// the same word twice never grows the file.
    pub fn add(&mut self, word: &str) {
        self.refresh();

        let key = case::normalize(word);
        let is_new = !self.original_forms.contains_key(&key);

        if is_new {
            self.original_forms.insert(key.clone(), word.to_string());
        }
        self.trie.insert(&key);

        if is_new {
            if let Some(path) = self.source_path.clone() {
                match file_store::append(&path, word) {
                    Ok(()) => {
                        if let Ok(mtime) = file_store::mtime(&path) {
                            self.last_mtime = Some(mtime);
                        }
                    }
                    Err(err) => log::warn!("failed to append {word:?} to {}: {err}", path.display()),
                }
            }
        }
    }

    /// Removes `word` if it (by its exact original casing) is present.
    /// The backing file is rewritten only when something was actually
    /// removed, so the file never grows -- and never shrinks -- from a
    /// `remove` of a word that wasn't really there.
    pub fn remove(&mut self, word: &str) {
        if !self.check(word) {
            return;
        }

        let key = case::normalize(word);
        let had_entry = self.original_forms.remove(&key).is_some();
        if !had_entry {
            return;
        }
        self.trie.remove(&key);

        if let Some(path) = self.source_path.clone() {
            match file_store::rewrite_dropping(&path, word) {
                Ok(()) => {
                    if let Ok(mtime) = file_store::mtime(&path) {
                        self.last_mtime = Some(mtime);
                    }
                }
                Err(err) => log::warn!("failed to rewrite {} after removing {word:?}: {err}", path.display()),
            }
        }
    }

    fn trie_root(&self) -> &crate::trie_node::Node {
        &self.trie.root
    }

    fn recase(&self, candidate: &str, query_is_title: bool, query_is_caps: bool) -> String {
        let original = self
            .original_forms
            .get(candidate)
            .cloned()
            .unwrap_or_else(|| candidate.to_string());

        if query_is_title {
            case::to_titlecase(&original)
        } else if query_is_caps && !case::is_all_caps(&original) {
            case::uppercase(&original)
        } else {
            original
        }
    }

    /// Rebuilds `trie`/`original_forms` from the backing file if its
    /// mtime has changed since the last refresh. A failed read leaves
    /// the in-memory state untouched -- better a stale answer than none.
    fn refresh(&mut self) {
        let Some(path) = self.source_path.clone() else {
            return;
        };

        let current_mtime = file_store::mtime(&path).ok();
        if self.last_mtime.is_some() && current_mtime == self.last_mtime {
            return;
        }

        match file_store::load(&path) {
            Ok(words) => {
                log::debug!("rebuilding PWL from {}", path.display());
                let mut trie = Trie::new();
                let mut forms = FxHashMap::default();
                for word in words {
                    let key = case::normalize(&word);
                    forms.entry(key.clone()).or_insert_with(|| word.clone());
                    trie.insert(&key);
                }
                self.trie = trie;
                self.original_forms = forms;
                self.last_mtime = current_mtime;
            }
            Err(err) => {
                log::warn!("failed to refresh PWL from {}: {err}", path.display());
            }
        }
    }
}

/// Applies the ranking rule from `SPEC_FULL.md` section 4.E: keep the
/// list sorted by ascending error count, drop a re-emitted candidate
/// that's already recorded at an equal-or-better count, and otherwise
/// insert it at the first position with a strictly greater count,
/// discarding everything from that point on (the matcher is understood
/// to progressively tighten toward the best seen). Capped at
/// [`PWL_MAX_SUGGS`] entries.
fn insert_ranked(list: &mut Vec<(String, usize)>, candidate: String, errors: usize) {
    if let Some((_, existing_errors)) = list.iter().find(|(s, _)| *s == candidate) {
        if *existing_errors <= errors {
            return;
        }
    }

    let pos = list.iter().position(|(_, e)| *e > errors).unwrap_or(list.len());
    list.truncate(pos);
    list.push((candidate, errors));
    list.truncate(PWL_MAX_SUGGS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_check_exact_case() {
        let mut pwl = Pwl::new();
        pwl.add("hello");
        assert!(pwl.check("hello"));
    }

    #[test]
    fn check_title_case_falls_back_to_lowercase() {
        let mut pwl = Pwl::new();
        pwl.add("hello");
        assert!(pwl.check("Hello"));
    }

    #[test]
    fn check_all_caps_falls_back_to_lowercase_then_titlecase() {
        let mut pwl = Pwl::new();
        pwl.add("hello");
        assert!(pwl.check("HELLO"));
    }

    #[test]
    fn check_is_case_sensitive_at_baseline() {
        let mut pwl = Pwl::new();
        pwl.add("Hello");
        assert!(!pwl.check("hello"));
    }

    #[test]
    fn suggest_finds_one_substitution_away() {
        let mut pwl = Pwl::new();
        pwl.add("hello");
        let suggestions = pwl.suggest("helo", &[]);
        assert!(suggestions.contains(&"hello".to_string()));
    }

    #[test]
    fn suggest_orders_by_distance() {
        let mut pwl = Pwl::new();
        pwl.add("hello");
        pwl.add("help");
        let suggestions = pwl.suggest("helo", &[]);
        assert!(suggestions.contains(&"hello".to_string()));
        assert!(suggestions.contains(&"help".to_string()));
    }

    #[test]
    fn remove_then_check_not_found() {
        let mut pwl = Pwl::new();
        pwl.add("hello");
        pwl.remove("hello");
        assert!(!pwl.check("hello"));
    }

    #[test]
    fn baseline_caps_the_search_radius() {
        let mut pwl = Pwl::new();
        pwl.add("hello");
        // "zzzzz" is far from "helo"; an empty baseline still finds
        // "hello" at distance 1 within the default budget of 3.
        let suggestions = pwl.suggest("helo", &["help".to_string()]);
        assert!(suggestions.contains(&"hello".to_string()));
    }

    #[test]
    fn suggest_recases_title_case_query() {
        let mut pwl = Pwl::new();
        pwl.add("hello");
        let suggestions = pwl.suggest("Helo", &[]);
        assert_eq!(suggestions, vec!["Hello".to_string()]);
    }

    #[test]
    fn suggest_recases_all_caps_query() {
        let mut pwl = Pwl::new();
        pwl.add("hello");
        let suggestions = pwl.suggest("HELO", &[]);
        assert_eq!(suggestions, vec!["HELLO".to_string()]);
    }
}
