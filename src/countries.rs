// =============================================================================
// countries.rs — THE ATLAS
// =============================================================================
//
// Every provider has its own idea of what "India" is called. The trends
// service wants a lowercase locale slug, the X API wants a Yahoo WOEID.
// This table is the single place those mappings live, and its order is the
// order the driver walks countries in.
// =============================================================================

/// Locale used by the search-trends source when a country has no slug.
pub const DEFAULT_LOCALE: &str = "united_states";

/// One row of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, also the `country` field of every batch.
    pub code: &'static str,
    /// Locale slug understood by the search-trends service.
    pub locale: &'static str,
    /// Numeric place identifier (WOEID) for the social-trends API, if it has one.
    pub place_id: Option<u64>,
}

pub const COUNTRIES: &[Country] = &[
    Country { code: "IN", locale: "india", place_id: Some(23424848) },
    Country { code: "US", locale: "united_states", place_id: Some(23424977) },
    Country { code: "CN", locale: "china", place_id: None },
    Country { code: "JP", locale: "japan", place_id: None },
    Country { code: "GB", locale: "united_kingdom", place_id: Some(23424975) },
    Country { code: "DE", locale: "germany", place_id: Some(23424829) },
    Country { code: "CA", locale: "canada", place_id: Some(23424775) },
    Country { code: "KR", locale: "south_korea", place_id: None },
    Country { code: "FR", locale: "france", place_id: Some(23424819) },
];

/// Look a country up by code. Case-sensitive, codes are stored upper-case.
pub fn lookup(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code == code)
}

/// Locale slug for the search-trends source, falling back to [`DEFAULT_LOCALE`].
pub fn locale_for(code: &str) -> &'static str {
    lookup(code).map(|c| c.locale).unwrap_or(DEFAULT_LOCALE)
}

/// Place identifier for the social-trends source.
pub fn place_id_for(code: &str) -> Option<u64> {
    lookup(code).and_then(|c| c.place_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_is_stable() {
        let codes: Vec<&str> = COUNTRIES.iter().map(|c| c.code).collect();
        assert_eq!(codes, ["IN", "US", "CN", "JP", "GB", "DE", "CA", "KR", "FR"]);
    }

    #[test]
    fn test_locale_fallback() {
        assert_eq!(locale_for("JP"), "japan");
        assert_eq!(locale_for("BR"), DEFAULT_LOCALE);
    }

    #[test]
    fn test_place_ids() {
        assert_eq!(place_id_for("IN"), Some(23424848));
        assert_eq!(place_id_for("CN"), None);
        assert_eq!(place_id_for("ZZ"), None);
    }
}
