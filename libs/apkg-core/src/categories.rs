//! Category taxonomy reconstruction from deck names.
//!
//! Deck names encode hierarchy as `"Root::Leaf"`. Only two levels are
//! supported: the first segment is the root, the last segment the leaf, and
//! top-level decks (no delimiter) contribute no category at all.

use std::collections::{BTreeMap, BTreeSet};

use crate::archive::Collection;
use crate::error::Result;

/// Delimiter separating hierarchy levels in deck names.
pub const HIERARCHY_DELIMITER: &str = "::";

/// Root deck name of the supported package; its subdecks become the
/// user-facing categories.
pub const DEFAULT_ROOT_DECK: &str = "MileDown's MCAT Decks";

/// Static category list surfaced when extraction fails.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Biology",
    "Chemistry",
    "Physics",
    "Psychology",
    "General Knowledge",
];

/// Rebuild the category tree from the collection's deck names.
///
/// The result lists each root followed by its `"root::leaf"` entries, both
/// levels lexicographically sorted and de-duplicated.
pub fn category_tree(collection: &Collection) -> Result<Vec<String>> {
    let decks = collection.decks()?;

    let mut roots: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for deck in decks.values() {
        if let Some((root, leaf)) = split_levels(&deck.name) {
            roots
                .entry(root.to_string())
                .or_default()
                .insert(leaf.to_string());
        }
    }

    let mut tree = Vec::new();
    for (root, leaves) in &roots {
        tree.push(root.clone());
        for leaf in leaves {
            tree.push(format!("{root}{HIERARCHY_DELIMITER}{leaf}"));
        }
    }
    Ok(tree)
}

/// Leaf names only, stripped of their root prefix: the view surfaced to
/// end users. Root-level entries drop out.
pub fn leaves(tree: &[String]) -> Vec<String> {
    tree.iter()
        .filter_map(|entry| split_levels(entry))
        .map(|(_, leaf)| leaf.to_string())
        .collect()
}

/// Split a deck name into (root, leaf). None when the name has no
/// delimiter; middle segments of deeper names are discarded.
fn split_levels(name: &str) -> Option<(&str, &str)> {
    let (root, rest) = name.split_once(HIERARCHY_DELIMITER)?;
    let leaf = rest.rsplit(HIERARCHY_DELIMITER).next().unwrap_or(rest);
    Some((root, leaf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_ignores_top_level_names() {
        assert_eq!(split_levels("Default"), None);
        assert_eq!(split_levels(""), None);
    }

    #[test]
    fn split_takes_first_and_last_segments() {
        assert_eq!(split_levels("Root::Leaf"), Some(("Root", "Leaf")));
        assert_eq!(split_levels("Root::Mid::Leaf"), Some(("Root", "Leaf")));
    }

    #[test]
    fn leaves_strip_root_prefixes() {
        let tree = vec![
            "Root".to_string(),
            "Root::Biology".to_string(),
            "Root::Chemistry".to_string(),
        ];
        assert_eq!(leaves(&tree), vec!["Biology", "Chemistry"]);
    }
}
