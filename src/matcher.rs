//! The bounded-error matcher: a branch-and-bound walk over a [`crate::trie::Trie`]
//! that interleaves exact descent with insert/delete/substitute/transpose
//! error moves, enumerating every stored string within `max_errors` of a
//! query.
//!
//! Callers are expected to have already NFD-normalized `query`, and, for
//! [`Mode::CaseInsensitive`], already lowercased it -- the matcher itself
//! only lowercases trie-side `Leaf` values and tries an uppercase
//! fallback when descending through a `Branch`, per the case-insensitive
//! traversal rule.

use crate::case;
use crate::edit_distance;
use crate::trie_node::{array_key, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Exact,
    CaseInsensitive,
}

/// Enumerates every string stored under `root` within `max_errors` of
/// `query`, as `(matched_string, errors)` pairs. The walk is bounded (by
/// `max_errors`, which in this crate never exceeds
/// [`crate::limits::PWL_MAX_ERRORS`]), so it is simplest -- and no less
/// correct -- to run it eagerly into a `Vec` and hand back its iterator,
/// rather than build a true coroutine; callers never see the difference.
pub(crate) fn matches(
    root: &Node,
    query: &str,
    max_errors: usize,
    mode: Mode,
) -> std::vec::IntoIter<(String, usize)> {
    let query_scalars: Vec<char> = query.chars().collect();
    let mut out = Vec::new();
    let mut path = String::new();
    search(root, &query_scalars, 0, &mut path, 0, max_errors, mode, &mut out);
    out.into_iter()
}

/// True iff `query_scalar` matches `trie_scalar` exactly, or -- in
/// [`Mode::CaseInsensitive`] -- matches it up to an uppercase fold. Used
/// by the transposition move when the second half of the swap has to be
/// read directly out of a `Leaf`'s suffix rather than via a `Branch`
/// child lookup.
fn scalar_eq(trie_scalar: char, query_scalar: char, mode: Mode) -> bool {
    if trie_scalar == query_scalar {
        return true;
    }
    mode == Mode::CaseInsensitive && trie_scalar.to_uppercase().eq(query_scalar.to_uppercase())
}

#[allow(clippy::too_many_arguments)]
fn search(
    node: &Node,
    query: &[char],
    word_pos: usize,
    path: &mut String,
    num_errors: usize,
    max_errors: usize,
    mode: Mode,
    out: &mut Vec<(String, usize)>,
) {
    if num_errors > max_errors {
        return;
    }

    match node {
        Node::Empty => {}

        Node::Leaf(v) => {
            let remaining = &query[word_pos.min(query.len())..];
            let compare_source = if mode == Mode::CaseInsensitive {
                case::lowercase(v)
            } else {
                v.clone()
            };
            let compare_chars: Vec<char> = compare_source.chars().collect();
            let d = edit_distance::distance_scalars(&compare_chars, remaining);
            let total = num_errors + d;
            if total <= max_errors {
                out.push((format!("{path}{v}"), total));
            }
        }

        Node::Branch(children) => {
            let c = query.get(word_pos).copied();

            let matched_key = c.and_then(|ch| {
                let key = array_key(ch);
                if children.contains_key(&key) {
                    return Some(key);
                }
                if mode == Mode::CaseInsensitive {
                    for upper in ch.to_uppercase() {
                        let upper_key = array_key(upper);
                        if children.contains_key(&upper_key) {
                            return Some(upper_key);
                        }
                    }
                }
                None
            });

            if let Some(key) = matched_key {
                let child = &children[&key];
                let pushed = key.len();
                path.push_str(&key);
                search(child, query, word_pos + 1, path, num_errors, max_errors, mode, out);
                path.truncate(path.len() - pushed);
            }

            let next_errors = num_errors + 1;
            if next_errors > max_errors {
                return;
            }

            if c.is_some() {
                // Insertion: treat the query's next scalar as spurious.
                search(node, query, word_pos + 1, path, next_errors, max_errors, mode, out);
            }

            for (k, sub) in children.iter() {
                if Some(*k) == matched_key {
                    continue;
                }

                let pushed = k.len();
                path.push_str(k);

                // Deletion: the trie has an extra scalar `k`.
                search(sub, query, word_pos, path, next_errors, max_errors, mode, out);

                // Substitution: swap the query's next scalar for `k`.
                if c.is_some() {
                    search(sub, query, word_pos + 1, path, next_errors, max_errors, mode, out);
                }

                path.truncate(path.len() - pushed);

                // Transposition: query's next two scalars are swapped
                // relative to the trie (k then c, descending through
                // both at once, as a single error).
                if word_pos + 1 < query.len() {
                    let first = query[word_pos];
                    let second = query[word_pos + 1];
                    if array_key(second) == *k {
                        match sub {
                            Node::Branch(sub_children) => {
                                let first_key = array_key(first);
                                if let Some(inner) = sub_children.get(&first_key) {
                                    let pushed = k.len() + first_key.len();
                                    path.push_str(k);
                                    path.push_str(&first_key);
                                    search(
                                        inner,
                                        query,
                                        word_pos + 2,
                                        path,
                                        next_errors,
                                        max_errors,
                                        mode,
                                        out,
                                    );
                                    path.truncate(path.len() - pushed);
                                }
                            }
                            Node::Leaf(v) => {
                                // The trie string ends right after `k`, so
                                // there's no child to descend into -- the
                                // swap's second half has to be consumed
                                // directly out of the leaf's own suffix.
                                let mut chars = v.chars();
                                let leads_with_first = chars
                                    .clone()
                                    .next()
                                    .is_some_and(|lc| scalar_eq(lc, first, mode));
                                if leads_with_first {
                                    let consumed = chars.next().expect("checked above");
                                    let remainder: String = chars.collect();
                                    let pushed = k.len() + consumed.len_utf8();
                                    path.push_str(k);
                                    path.push(consumed);
                                    search(
                                        &Node::Leaf(remainder),
                                        query,
                                        word_pos + 2,
                                        path,
                                        next_errors,
                                        max_errors,
                                        mode,
                                        out,
                                    );
                                    path.truncate(path.len() - pushed);
                                }
                            }
                            Node::Empty => {}
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::Trie;

    fn best_distance(trie: &Trie, query: &str, word: &str) -> Option<usize> {
        matches(&trie.root, query, 3, Mode::CaseInsensitive)
            .filter(|(s, _)| s == word)
            .map(|(_, e)| e)
            .min()
    }

    #[test]
    fn exact_mode_with_zero_budget_is_containment() {
        let mut trie = Trie::new();
        trie.insert("hello");
        let found: Vec<_> = matches(&trie.root, "hello", 0, Mode::Exact).collect();
        assert_eq!(found, vec![("hello".to_string(), 0)]);

        let found: Vec<_> = matches(&trie.root, "hallo", 0, Mode::Exact).collect();
        assert!(found.is_empty());
    }

    #[test]
    fn one_substitution_away() {
        let mut trie = Trie::new();
        trie.insert("hello");
        assert_eq!(best_distance(&trie, "helo", "hello"), Some(1));
    }

    #[test]
    fn transposition_is_a_single_error() {
        let mut trie = Trie::new();
        trie.insert("ab");
        trie.insert("ba");
        let found: Vec<_> = matches(&trie.root, "ab", 1, Mode::Exact).collect();
        assert!(found.contains(&("ba".to_string(), 1)));
    }

    #[test]
    fn case_insensitive_descent_tolerates_capitalization_for_free() {
        let mut trie = Trie::new();
        trie.insert("Hello");
        let found: Vec<_> = matches(&trie.root, "hello", 0, Mode::CaseInsensitive).collect();
        assert_eq!(found, vec![("Hello".to_string(), 0)]);
    }

    #[test]
    fn budget_of_zero_prunes_everything_else() {
        let mut trie = Trie::new();
        trie.insert("hello");
        trie.insert("help");
        let found: Vec<_> = matches(&trie.root, "helo", 0, Mode::CaseInsensitive).collect();
        assert!(found.is_empty());
    }
}
