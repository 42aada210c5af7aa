use serde::Deserialize;
use std::cmp::Ordering;

/// Area of Lithuania in km², the cut-off for the area filter.
pub const LITHUANIA_AREA: f64 = 65_300.0;

/// Region name matched by the Oceania filter.
pub const OCEANIA: &str = "Oceania";

/// A single country record as returned by the directory endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Country {
    pub name: String,
    #[serde(default)]
    pub region: String,
    /// Missing for a handful of territories.
    #[serde(default)]
    pub area: Option<f64>,
}

impl Country {
    /// Area formatted for display, empty when unknown.
    pub fn area_label(&self) -> String {
        self.area.map(|a| a.to_string()).unwrap_or_default()
    }
}

/// The two fixed filters offered by the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CountryFilter {
    SmallerThanLithuania,
    OceaniaRegion,
}

impl CountryFilter {
    pub fn matches(self, country: &Country) -> bool {
        match self {
            // An unknown area never compares smaller.
            Self::SmallerThanLithuania => country.area.is_some_and(|a| a < LITHUANIA_AREA),
            Self::OceaniaRegion => country.region == OCEANIA,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SmallerThanLithuania => "Smaller than Lithuania",
            Self::OceaniaRegion => "Oceania Region",
        }
    }

    /// Keyboard shortcut for the filter's button.
    pub fn key(self) -> char {
        match self {
            Self::SmallerThanLithuania => 'a',
            Self::OceaniaRegion => 'o',
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub const ALL: [CountryFilter; 2] = [Self::SmallerThanLithuania, Self::OceaniaRegion];
}

/// Direction applied by the next sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ascending => "Sort Ascending",
            Self::Descending => "Sort Descending",
        }
    }
}

/// Compare two names the way a human-facing directory expects: case and
/// common Latin accents are ignored first, then the raw strings break ties.
pub fn collate(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(fold_char)
        .cmp(b.chars().flat_map(fold_char));
    primary.then_with(|| a.cmp(b))
}

/// Reduce a character to its base lowercase letters.
fn fold_char(c: char) -> impl Iterator<Item = char> {
    let folded: &'static str = match c {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'Æ' | 'æ' => "ae",
        'Ç' | 'ç' => "c",
        'È' | 'É' | 'Ê' | 'Ë' | 'è' | 'é' | 'ê' | 'ë' => "e",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'ì' | 'í' | 'î' | 'ï' => "i",
        'Ñ' | 'ñ' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'ù' | 'ú' | 'û' | 'ü' => "u",
        'Ý' | 'ý' | 'ÿ' => "y",
        'ß' => "ss",
        _ => "",
    };
    let (folded, fallback) = if folded.is_empty() {
        (None, Some(c.to_lowercase()))
    } else {
        (Some(folded.chars()), None)
    };
    folded.into_iter().flatten().chain(fallback.into_iter().flatten())
}

#[cfg(test)]
pub(crate) fn fixture(name: &str, region: &str, area: f64) -> Country {
    Country {
        name: name.to_string(),
        region: region.to_string(),
        area: Some(area),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smaller_than_lithuania() {
        let f = CountryFilter::SmallerThanLithuania;
        assert!(f.matches(&fixture("A", "Europe", 100.0)));
        assert!(f.matches(&fixture("C", "Europe", 65_299.0)));
        assert!(!f.matches(&fixture("L", "Europe", 65_300.0)));
        assert!(!f.matches(&fixture("B", "Europe", 70_000.0)));
    }

    #[test]
    fn test_unknown_area_is_never_small() {
        let country = Country {
            name: "Nowhere".to_string(),
            region: "Polar".to_string(),
            area: None,
        };
        assert!(!CountryFilter::SmallerThanLithuania.matches(&country));
        assert_eq!(country.area_label(), "");
    }

    #[test]
    fn test_oceania_is_exact_match() {
        let f = CountryFilter::OceaniaRegion;
        assert!(f.matches(&fixture("Fiji", "Oceania", 18_272.0)));
        assert!(!f.matches(&fixture("X", "oceania", 1.0)));
        assert!(!f.matches(&fixture("Y", "Europe", 1.0)));
    }

    #[test]
    fn test_area_label_drops_trailing_zero() {
        assert_eq!(fixture("Afghanistan", "Asia", 652_230.0).area_label(), "652230");
        assert_eq!(fixture("Holy See", "Europe", 0.44).area_label(), "0.44");
    }

    #[test]
    fn test_filter_keys() {
        for filter in CountryFilter::ALL {
            assert_eq!(CountryFilter::from_key(filter.key()), Some(filter));
        }
        assert_eq!(CountryFilter::from_key('s'), None);
    }

    #[test]
    fn test_sort_order_toggle() {
        assert_eq!(SortOrder::Ascending.toggled(), SortOrder::Descending);
        assert_eq!(SortOrder::Descending.toggled(), SortOrder::Ascending);
        assert_eq!(SortOrder::Ascending.label(), "Sort Ascending");
    }

    #[test]
    fn test_collate_ignores_case_and_accents() {
        let mut names = vec!["Albania", "Åland Islands", "afghanistan", "Zambia", "Côte d'Ivoire", "Costa Rica"];
        names.sort_by(|a, b| collate(a, b));
        assert_eq!(
            names,
            vec!["afghanistan", "Åland Islands", "Albania", "Costa Rica", "Côte d'Ivoire", "Zambia"]
        );
    }

    #[test]
    fn test_collate_breaks_ties_deterministically() {
        assert_eq!(collate("Niger", "Niger"), Ordering::Equal);
        assert_ne!(collate("Cote", "Côte"), Ordering::Equal);
        assert_eq!(collate("Cote", "Côte"), collate("Cote", "Côte"));
    }
}
