//! Normalization and casing primitives shared by [`crate::trie`], the
//! [`crate::matcher`], and [`crate::pwl`] facade.
//!
//! All trie content and all match queries go through [`normalize`] before
//! ever touching a [`crate::trie::Trie`] -- nothing is ever stored or
//! looked up in its raw form.

use unicode_normalization::UnicodeNormalization;
use unicode_titlecase::StrTitleCase;

/// Canonically decomposes `word` (Unicode NFD). This is the only form the
/// trie ever stores or searches.
pub fn normalize(word: &str) -> String {
    word.nfd().collect()
}

/// Unicode simple, locale-insensitive lowercasing. Used for
/// case-insensitive lookups; never applied to the copy kept for
/// re-casing suggestions.
pub fn lowercase(word: &str) -> String {
    word.to_lowercase()
}

/// Unicode simple, locale-insensitive uppercasing. Used to detect
/// all-caps words and to build all-caps suggestions.
pub fn uppercase(word: &str) -> String {
    word.to_uppercase()
}

/// Title-cases `word`: first scalar becomes its titlecase form, the rest
/// is lowercased, matching the "uppercase-then-fix-first-then-lowercase"
/// construction in the spec (the net effect is the same, this just skips
/// the redundant intermediate uppercase pass).
pub fn to_titlecase(word: &str) -> String {
    word.to_titlecase_lower_rest()
}

/// Treats `char::is_uppercase` as "uppercase or titlecase". The true
/// Unicode Titlecase_Letter category (a handful of digraphs such as
/// U+01C5 'ǅ') isn't exposed by either `std` or `unicode_titlecase`'s
/// public API, so those rare letters are classified as uppercase here --
/// close enough that `is_all_caps`/`is_title_case` behave correctly for
/// every alphabet that doesn't use digraph letterforms.
fn is_cased_upper(c: char) -> bool {
    c.is_uppercase()
}

/// True iff `word` contains at least one uppercase letter and no
/// lowercase letter. Letters of other categories (and non-letters) are
/// ignored.
pub fn is_all_caps(word: &str) -> bool {
    let mut saw_upper = false;
    for c in word.chars() {
        if c.is_lowercase() {
            return false;
        }
        if is_cased_upper(c) {
            saw_upper = true;
        }
    }
    saw_upper
}

/// True iff the first scalar of `word` is uppercase and no subsequent
/// scalar is uppercase.
pub fn is_title_case(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if !is_cased_upper(first) {
        return false;
    }

    chars.all(|c| !is_cased_upper(c))
}
