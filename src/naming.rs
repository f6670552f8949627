//! Site-name normalization for cross-dataset joins.
//!
//! Site names arrive from shapefiles, chemistry tables, and discharge
//! records with inconsistent casing, accents, and punctuation. Every
//! dataset is folded onto one `[a-z0-9_]` identifier so rows can be
//! joined by site.

use std::collections::{BTreeMap, BTreeSet};

use unicode_normalization::UnicodeNormalization;

/// Convert a free-text site name to its canonical identifier.
///
/// The result only ever contains `a-z`, `0-9`, and single `_`
/// separators, with no leading or trailing underscore. The function is
/// total and idempotent; names with no representable characters (for
/// example fully non-Latin scripts) normalize to the empty string.
///
/// # Examples
///
/// ```
/// use silica::naming::normalize_site_name;
///
/// assert_eq!(normalize_site_name("Ahtavanjoen vesistoalue"), "ahtavanjoen_vesistoalue");
/// assert_eq!(normalize_site_name("Vilajoen vesistöalue"), "vilajoen_vesistoalue");
/// assert_eq!(normalize_site_name("Marshall Gulch - Granite"), "marshall_gulch_granite");
/// assert_eq!(normalize_site_name("V301502401 (Ratier)"), "v301502401_ratier");
/// ```
pub fn normalize_site_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut pending_separator = false;

    // NFKD first, so accented letters decompose into a base letter plus
    // combining marks; everything outside ASCII is then dropped.
    for c in name.nfkd().filter(char::is_ascii) {
        let c = c.to_ascii_lowercase();
        match c {
            'a'..='z' | '0'..='9' => {
                if pending_separator && !normalized.is_empty() {
                    normalized.push('_');
                }
                pending_separator = false;
                normalized.push(c);
            }
            // Separator characters collapse into a single underscore,
            // never at the start or end.
            '_' | '-' | '.' | '(' | ')' => pending_separator = true,
            c if c.is_ascii_whitespace() => pending_separator = true,
            // Remaining punctuation and control characters are deleted.
            _ => {}
        }
    }

    normalized
}

/// Map each original name to its normalized identifier.
///
/// Duplicate originals collapse into a single entry; the map is ordered
/// by original name.
pub fn build_name_map<'a, I>(names: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .map(|name| (name.to_string(), normalize_site_name(name)))
        .collect()
}

/// Find distinct originals that collapse onto the same identifier.
///
/// Returns `normalized -> originals` for every identifier claimed by
/// more than one distinct original name. Collisions are worth a warning
/// before the identifiers are used as join keys.
pub fn find_collisions<'a, I>(names: I) -> BTreeMap<String, Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut by_normalized: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for name in names {
        by_normalized
            .entry(normalize_site_name(name))
            .or_default()
            .insert(name.to_string());
    }

    by_normalized
        .into_iter()
        .filter(|(_, originals)| originals.len() > 1)
        .map(|(normalized, originals)| (normalized, originals.into_iter().collect()))
        .collect()
}
