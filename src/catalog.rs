//! Static reference data: the allergen taxonomy the client renders in its
//! preference UI, and human-readable descriptions for E-number additive tags.
//!
//! Built once at startup and held in `AppState` as an `Arc<Catalog>` so tests
//! can substitute a smaller table instead of reaching into globals.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct AllergenInfo {
    pub name: &'static str,
    pub emoji: &'static str,
}

pub struct Catalog {
    allergens: HashMap<&'static str, AllergenInfo>,
    additives: HashMap<&'static str, &'static str>,
}

/// Canonical Open Food Facts allergen keys with display names.
const ALLERGENS: &[(&str, &str, &str)] = &[
    ("en:milk", "Milk", "🥛"),
    ("en:gluten", "Gluten", "🌾"),
    ("en:soybeans", "Soy", "🫘"),
    ("en:nuts", "Tree Nuts", "🥜"),
    ("en:eggs", "Eggs", "🥚"),
    ("en:fish", "Fish", "🐟"),
    ("en:peanuts", "Peanuts", "🥜"),
    ("en:celery", "Celery", "🥬"),
    ("en:mustard", "Mustard", "🟡"),
    ("en:sesame-seeds", "Sesame", "🌰"),
    ("en:sulphur-dioxide-and-sulphites", "Sulphites", "⚗️"),
    ("en:lupin", "Lupin", "🌱"),
    ("en:molluscs", "Molluscs", "🐚"),
    ("en:crustaceans", "Crustaceans", "🦐"),
];

const ADDITIVES: &[(&str, &str)] = &[
    ("e100", "Curcumin — natural yellow colouring"),
    ("e101", "Riboflavin (vitamin B2) — natural yellow colouring"),
    ("e102", "Tartrazine — artificial yellow colouring ⚠️"),
    ("e104", "Quinoline yellow — artificial colouring ⚠️"),
    ("e110", "Sunset yellow — artificial colouring ⚠️"),
    ("e120", "Carmine — natural red colouring"),
    ("e122", "Azorubine — artificial red colouring ⚠️"),
    ("e129", "Allura red — artificial red colouring ⚠️"),
    ("e131", "Patent blue — artificial blue colouring ⚠️"),
    ("e133", "Brilliant blue — artificial blue colouring ⚠️"),
    ("e140", "Chlorophyll — natural green colouring"),
    ("e150a", "Plain caramel — natural colouring"),
    ("e150d", "Sulphite ammonia caramel — colouring"),
    ("e160a", "Beta-carotene — natural orange colouring (vitamin A)"),
    ("e160b", "Annatto — natural orange colouring"),
    ("e160c", "Paprika oleoresin — natural red colouring"),
    ("e171", "Titanium dioxide — white colouring ⚠️"),
    ("e200", "Sorbic acid — preservative"),
    ("e202", "Potassium sorbate — preservative"),
    ("e210", "Benzoic acid — preservative ⚠️"),
    ("e211", "Sodium benzoate — preservative ⚠️"),
    ("e220", "Sulphur dioxide — preservative/antioxidant ⚠️"),
    ("e223", "Sodium metabisulphite — preservative ⚠️"),
    ("e234", "Nisin — natural preservative"),
    ("e250", "Sodium nitrite — preservative (cured meats) ⚠️"),
    ("e251", "Sodium nitrate — preservative ⚠️"),
    ("e260", "Acetic acid — acidity regulator"),
    ("e270", "Lactic acid — acidity regulator"),
    ("e300", "Ascorbic acid (vitamin C) — antioxidant"),
    ("e306", "Tocopherol (vitamin E) — natural antioxidant"),
    ("e319", "TBHQ — artificial antioxidant ⚠️"),
    ("e320", "BHA — artificial antioxidant ⚠️"),
    ("e321", "BHT — artificial antioxidant ⚠️"),
    ("e322", "Lecithin — emulsifier (natural, usually from soy)"),
    ("e330", "Citric acid — acidity regulator"),
    ("e331", "Sodium citrate — acidity regulator"),
    ("e334", "Tartaric acid — acidity regulator"),
    ("e338", "Phosphoric acid — acidity regulator (cola drinks) ⚠️"),
    ("e339", "Sodium phosphate — emulsifier"),
    ("e400", "Alginic acid — thickener"),
    ("e406", "Agar — natural gelatine alternative"),
    ("e407", "Carrageenan — thickener ⚠️"),
    ("e410", "Locust bean gum — natural thickener"),
    ("e412", "Guar gum — natural thickener"),
    ("e414", "Gum arabic — natural thickener"),
    ("e415", "Xanthan gum — thickener"),
    ("e420", "Sorbitol — sweetener (sugar alcohol)"),
    ("e422", "Glycerol — humectant"),
    ("e440", "Pectin — natural gelling agent"),
    ("e450", "Diphosphates — raising agent"),
    ("e460", "Cellulose — bulking agent"),
    ("e466", "Carboxymethyl cellulose — thickener"),
    ("e471", "Mono- and diglycerides — emulsifier"),
    ("e472e", "DATEM — emulsifier (baked goods)"),
    ("e500", "Sodium carbonates — raising agent"),
    ("e501", "Potassium carbonates — raising agent"),
    ("e509", "Calcium chloride — firming agent"),
    ("e620", "Glutamic acid — flavour enhancer"),
    ("e621", "Monosodium glutamate (MSG) — flavour enhancer ⚠️"),
    ("e627", "Disodium guanylate — flavour enhancer"),
    ("e631", "Disodium inosinate — flavour enhancer"),
    ("e900", "Dimethyl polysiloxane — anti-foaming agent"),
    ("e901", "Beeswax — glazing agent"),
    ("e903", "Carnauba wax — glazing agent"),
    ("e904", "Shellac — glazing agent"),
    ("e950", "Acesulfame K — artificial sweetener ⚠️"),
    ("e951", "Aspartame — artificial sweetener ⚠️"),
    ("e954", "Saccharin — artificial sweetener ⚠️"),
    ("e955", "Sucralose — artificial sweetener"),
    ("e960", "Steviol glycosides (stevia) — natural sweetener"),
    ("e965", "Maltitol — sweetener (sugar alcohol)"),
    ("e967", "Xylitol — sweetener (sugar alcohol)"),
    ("e1400", "Dextrin — modified starch"),
    ("e1442", "Hydroxypropyl distarch phosphate — modified starch"),
    ("e1450", "Starch sodium octenyl succinate — emulsifier"),
];

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            allergens: ALLERGENS
                .iter()
                .map(|&(key, name, emoji)| (key, AllergenInfo { name, emoji }))
                .collect(),
            additives: ADDITIVES.iter().copied().collect(),
        }
    }

    /// All known allergen keys with display info, in a stable order.
    pub fn allergens(&self) -> Vec<(&'static str, &AllergenInfo)> {
        let mut entries: Vec<_> = self.allergens.iter().map(|(k, v)| (*k, v)).collect();
        entries.sort_by_key(|(k, _)| *k);
        entries
    }

    /// Localized display name for an allergen key; unknown keys pass through.
    pub fn allergen_display_name(&self, key: &str) -> String {
        let normalized = key.trim().to_lowercase();
        match self.allergens.get(normalized.as_str()) {
            Some(info) => info.name.to_string(),
            None => key.to_string(),
        }
    }

    /// Human-readable description for an additive tag like "en:e330".
    pub fn additive_description(&self, tag: &str) -> String {
        let code = tag
            .trim()
            .to_lowercase()
            .replace("en:", "")
            .replace("fr:", "");
        match self.additives.get(code.as_str()) {
            Some(desc) => format!("{}: {}", code.to_uppercase(), desc),
            None => format!("{}: no information available", code.to_uppercase()),
        }
    }

    pub fn additive_descriptions(&self, tags: Option<&[String]>) -> Vec<String> {
        match tags {
            Some(tags) => tags.iter().map(|t| self.additive_description(t)).collect(),
            None => Vec::new(),
        }
    }
}
