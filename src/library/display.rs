use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const SEPARATOR_DECORATION: &str = "=====";

/// Label of the separator entry that opens an artist group.
pub fn separator_label(artist: &str) -> String {
    format!("{SEPARATOR_DECORATION}{artist}{SEPARATOR_DECORATION}")
}

/// Build the playlist label for a track.
///
/// When the owning artist's tracks come from more than one folder the folder
/// name is appended in brackets so same-titled tracks can be told apart.
pub fn track_label(title: &str, folder: &str, disambiguate: bool) -> String {
    if disambiguate {
        format!("{title} [{folder}]")
    } else {
        title.to_string()
    }
}

/// Ordering used for artist names and titles.
///
/// Approximates a root-locale collator in three levels: base letters with
/// accents and case folded away, then accents, then case with lowercase first.
/// The raw strings break any remaining tie so the order stays total.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| secondary_key(a).cmp(secondary_key(b)))
        .then_with(|| case_key(a).cmp(case_key(b)))
        .then_with(|| a.cmp(b))
}

/// Decomposed, lowercased, combining marks dropped: `"Édith"` and `"edith"` agree.
fn primary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Decomposed and lowercased, marks kept.
fn secondary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// One flag per decomposed char; `false` (not uppercase) sorts first.
fn case_key(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.nfd().map(char::is_uppercase)
}
