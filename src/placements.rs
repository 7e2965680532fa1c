use crate::locale::Locale;

pub const FALLBACK_ICON: &str = "megaphone";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Awareness,
    Buyer,
}

impl Intent {
    pub fn label(&self, locale: Locale) -> &'static str {
        let messages = locale.messages();
        match self {
            Intent::Awareness => messages.awareness,
            Intent::Buyer => messages.buyer,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Localized {
    pub en: &'static str,
    pub nl: &'static str,
}

impl Localized {
    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::Nl => self.nl,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlacementInfo {
    pub key: &'static str,
    pub icon: &'static str,
    pub label: Localized,
    pub description: Localized,
    pub intent: Intent,
    pub reach: &'static str,
}

pub const PLACEMENTS: [PlacementInfo; 5] = [
    PlacementInfo {
        key: "blog_sidebar",
        icon: "panel-right",
        label: Localized {
            en: "Blog sidebar",
            nl: "Blog zijbalk",
        },
        description: Localized {
            en: "Shown next to every blog article about pet care.",
            nl: "Naast elk blogartikel over dierenverzorging.",
        },
        intent: Intent::Awareness,
        reach: "~12,000 views/month",
    },
    PlacementInfo {
        key: "blog_inline",
        icon: "file-text",
        label: Localized {
            en: "In-article",
            nl: "In artikel",
        },
        description: Localized {
            en: "Native card between paragraphs of blog articles.",
            nl: "Kaart tussen de alinea's van blogartikelen.",
        },
        intent: Intent::Awareness,
        reach: "~8,000 views/month",
    },
    PlacementInfo {
        key: "directory_sidebar",
        icon: "map-pin",
        label: Localized {
            en: "Directory sidebar",
            nl: "Gids zijbalk",
        },
        description: Localized {
            en: "Next to local listings of pet sitters and groomers.",
            nl: "Naast lokale vermeldingen van oppassers en trimsalons.",
        },
        intent: Intent::Buyer,
        reach: "~5,000 views/month",
    },
    PlacementInfo {
        key: "search_results",
        icon: "search",
        label: Localized {
            en: "Search results",
            nl: "Zoekresultaten",
        },
        description: Localized {
            en: "Sponsored slot at the top of service search results.",
            nl: "Gesponsorde plek bovenaan de zoekresultaten.",
        },
        intent: Intent::Buyer,
        reach: "~4,000 searches/month",
    },
    PlacementInfo {
        key: "homepage_featured",
        icon: "star",
        label: Localized {
            en: "Homepage featured",
            nl: "Uitgelicht op homepage",
        },
        description: Localized {
            en: "Featured card on the homepage.",
            nl: "Uitgelichte kaart op de homepage.",
        },
        intent: Intent::Awareness,
        reach: "~20,000 views/month",
    },
];

pub fn lookup<'a>(table: &'a [PlacementInfo], key: &str) -> Option<&'a PlacementInfo> {
    table.iter().find(|info| info.key == key)
}

/// A placement key resolved for display. Unknown keys keep the raw key as
/// their label and carry no intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementLabel {
    pub key: String,
    pub label: String,
    pub icon: &'static str,
    pub description: Option<&'static str>,
    pub intent: Option<Intent>,
    pub reach: Option<&'static str>,
}

impl PlacementLabel {
    pub fn resolve(table: &[PlacementInfo], key: &str, locale: Locale) -> Self {
        match lookup(table, key) {
            Some(info) => PlacementLabel {
                key: key.to_string(),
                label: info.label.get(locale).to_string(),
                icon: info.icon,
                description: Some(info.description.get(locale)),
                intent: Some(info.intent),
                reach: Some(info.reach),
            },
            None => PlacementLabel {
                key: key.to_string(),
                label: key.to_string(),
                icon: FALLBACK_ICON,
                description: None,
                intent: None,
                reach: None,
            },
        }
    }

    pub fn display_intent(&self) -> Intent {
        self.intent.unwrap_or(Intent::Awareness)
    }
}

/// Splits a package's comma-separated placement list, keeping order.
pub fn included_placements(raw: &str, locale: Locale) -> Vec<PlacementLabel> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| PlacementLabel::resolve(&PLACEMENTS, token, locale))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_unique_keys() {
        for (index, info) in PLACEMENTS.iter().enumerate() {
            assert!(PLACEMENTS[index + 1..].iter().all(|other| other.key != info.key));
        }
    }

    #[test]
    fn known_keys_resolve_per_locale() {
        let label = PlacementLabel::resolve(&PLACEMENTS, "search_results", Locale::Nl);
        assert_eq!(label.label, "Zoekresultaten");
        assert_eq!(label.intent, Some(Intent::Buyer));
        assert_eq!(label.icon, "search");
    }

    #[test]
    fn unknown_key_passes_through() {
        let label = PlacementLabel::resolve(&PLACEMENTS, "newsletter", Locale::En);
        assert_eq!(label.label, "newsletter");
        assert_eq!(label.icon, FALLBACK_ICON);
        assert_eq!(label.intent, None);
        assert_eq!(label.display_intent(), Intent::Awareness);
    }

    #[test]
    fn included_placements_preserve_order() {
        let labels = included_placements("search_results,blog_sidebar, newsletter,", Locale::En);
        let keys: Vec<&str> = labels.iter().map(|label| label.label.as_str()).collect();
        assert_eq!(keys, vec!["Search results", "Blog sidebar", "newsletter"]);
    }

    #[test]
    fn empty_placement_list_yields_nothing() {
        assert!(included_placements("", Locale::En).is_empty());
    }
}
