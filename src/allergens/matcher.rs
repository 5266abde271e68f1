//! Fuzzy cross-reference between a user's canonical allergen keys
//! (`"en:milk"`) and a product's allergen metadata. Product hierarchies use
//! the same namespace but vary in specificity (`"en:milk-and-milk-products"`),
//! and some products only carry a free-text ingredient note, so matching
//! degrades from exact, to bidirectional substring, to free-text containment.

use crate::catalog::Catalog;

/// Returns the display names of the user's allergens that appear to be
/// present in the product, deduplicated, matching case-insensitively on
/// trimmed keys.
pub fn find_matching_allergens(
    hierarchy: Option<&[String]>,
    free_text: Option<&str>,
    user_keys: &[String],
    catalog: &Catalog,
) -> Vec<String> {
    let mut detected: Vec<String> = Vec::new();
    let free_text_lower = free_text.map(str::to_lowercase);

    for user_key in user_keys {
        let user = user_key.trim().to_lowercase();
        if user.is_empty() {
            continue;
        }

        let mut found = false;

        if let Some(entries) = hierarchy {
            for entry in entries {
                let product = entry.trim().to_lowercase();
                if product == user || product.contains(&user) || user.contains(&product) {
                    found = true;
                    break;
                }
            }
        }

        if !found {
            if let Some(text) = free_text_lower.as_deref() {
                if text.contains(&user) {
                    found = true;
                } else {
                    // "en:milk" won't appear verbatim in "contains milk";
                    // retry with the namespace stripped.
                    let core = user.strip_prefix("en:").unwrap_or(&user).trim();
                    if !core.is_empty() && text.contains(core) {
                        found = true;
                    }
                }
            }
        }

        if found {
            let name = catalog.allergen_display_name(user_key);
            if !detected.contains(&name) {
                detected.push(name);
            }
        }
    }

    detected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    fn keys(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_hierarchy_match() {
        let hierarchy = keys(&["en:milk"]);
        let detected =
            find_matching_allergens(Some(&hierarchy), None, &keys(&["en:milk"]), &catalog());
        assert_eq!(detected, vec!["Milk"]);
    }

    #[test]
    fn broader_hierarchy_entry_matches_by_substring() {
        let hierarchy = keys(&["en:milk-and-milk-products"]);
        let detected =
            find_matching_allergens(Some(&hierarchy), None, &keys(&["en:milk"]), &catalog());
        assert_eq!(detected, vec!["Milk"]);
    }

    #[test]
    fn free_text_fallback_with_namespace_stripped() {
        let detected = find_matching_allergens(
            None,
            Some("contains milk and traces of hazelnut"),
            &keys(&["en:milk"]),
            &catalog(),
        );
        assert_eq!(detected, vec!["Milk"]);
    }

    #[test]
    fn unrelated_key_does_not_match() {
        let hierarchy = keys(&["en:eggs"]);
        let detected = find_matching_allergens(
            Some(&hierarchy),
            Some("contains eggs"),
            &keys(&["en:fish"]),
            &catalog(),
        );
        assert!(detected.is_empty());
    }

    #[test]
    fn matching_is_case_insensitive_and_trimmed() {
        let hierarchy = keys(&["EN:Milk"]);
        let detected =
            find_matching_allergens(Some(&hierarchy), None, &keys(&["  en:MILK "]), &catalog());
        assert_eq!(detected, vec!["Milk"]);
    }

    #[test]
    fn duplicates_are_collapsed() {
        let hierarchy = keys(&["en:milk", "en:milk-and-milk-products"]);
        let detected = find_matching_allergens(
            Some(&hierarchy),
            Some("contains milk"),
            &keys(&["en:milk", "en:milk"]),
            &catalog(),
        );
        assert_eq!(detected, vec!["Milk"]);
    }

    #[test]
    fn untranslatable_key_passes_through_raw() {
        let hierarchy = keys(&["en:buckwheat"]);
        let detected =
            find_matching_allergens(Some(&hierarchy), None, &keys(&["en:buckwheat"]), &catalog());
        assert_eq!(detected, vec!["en:buckwheat"]);
    }

    #[test]
    fn empty_user_list_yields_nothing() {
        let hierarchy = keys(&["en:milk"]);
        let detected = find_matching_allergens(Some(&hierarchy), None, &[], &catalog());
        assert!(detected.is_empty());
    }
}
