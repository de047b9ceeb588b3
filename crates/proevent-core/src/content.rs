//! Service catalog — the fixed set of offerings a lead can ask about.
//!
//! The offering list is content configuration: it is supplied at
//! construction and never changes during a controller's lifetime. The
//! standard catalog mirrors the services the business actually sells.

use tracing::debug;

/// One offering in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOffering {
    /// Stable key stored on lead records (e.g. `fabrication`).
    pub key: String,
    /// Display title.
    pub title: String,
    /// One-line description.
    pub summary: String,
}

impl ServiceOffering {
    fn new(key: &str, title: &str, summary: &str) -> Self {
        Self {
            key: key.to_owned(),
            title: title.to_owned(),
            summary: summary.to_owned(),
        }
    }
}

/// The fixed, configuration-supplied offering set with a default
/// selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCatalog {
    offerings: Vec<ServiceOffering>,
    default_key: String,
}

impl ServiceCatalog {
    /// Build a catalog from an offering list and a default key.
    ///
    /// `default_key` should name one of the offerings; requests for
    /// unknown keys resolve to it.
    #[must_use]
    pub fn new(offerings: Vec<ServiceOffering>, default_key: impl Into<String>) -> Self {
        Self {
            offerings,
            default_key: default_key.into(),
        }
    }

    /// The catalog the production site ships with.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            vec![
                ServiceOffering::new(
                    "fabrication",
                    "Stall Fabrication & Setup",
                    "Octonorm & wooden stalls, custom design, flooring, partitions, and storage.",
                ),
                ServiceOffering::new(
                    "printing",
                    "Printing & Branding",
                    "Flex, vinyl, sunboard, foam board, standees, backdrops, signage.",
                ),
                ServiceOffering::new(
                    "displays",
                    "Display & LED Screens",
                    "LED TVs with stands, large LED walls, HDMI playback.",
                ),
                ServiceOffering::new(
                    "furniture",
                    "Furniture & Lighting",
                    "Chairs, sofas, tables, counters, brochure stands, par lights, focus lights.",
                ),
                ServiceOffering::new(
                    "manpower",
                    "Manpower & Hospitality",
                    "Hostesses, promoters, tea/coffee setup, cleaning staff.",
                ),
                ServiceOffering::new(
                    "others",
                    "Others",
                    "Generators, carpets, flower decor, logistics, and transport.",
                ),
            ],
            "fabrication",
        )
    }

    /// All offerings, in display order.
    #[must_use]
    pub fn offerings(&self) -> &[ServiceOffering] {
        &self.offerings
    }

    /// The key applied when a form leaves the service unselected.
    #[must_use]
    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// Whether the catalog contains the given key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.offerings.iter().any(|o| o.key == key)
    }

    /// Resolve a requested service key to a catalog key.
    ///
    /// `None` and the empty string resolve to the default selection.
    /// Unknown keys also resolve to the default — the catalog is a closed
    /// set and a stale or mistyped key is not worth failing a lead over.
    #[must_use]
    pub fn resolve(&self, requested: Option<&str>) -> String {
        match requested {
            Some(key) if self.contains(key) => key.to_owned(),
            Some(key) if !key.is_empty() => {
                debug!(service = %key, "unknown service key, using default");
                self.default_key.clone()
            }
            _ => self.default_key.clone(),
        }
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_default_offering() {
        let catalog = ServiceCatalog::standard();
        assert!(catalog.contains(catalog.default_key()));
        assert_eq!(catalog.offerings().len(), 6);
    }

    #[test]
    fn resolve_keeps_known_keys() {
        let catalog = ServiceCatalog::standard();
        assert_eq!(catalog.resolve(Some("printing")), "printing");
    }

    #[test]
    fn resolve_falls_back_to_default() {
        let catalog = ServiceCatalog::standard();
        assert_eq!(catalog.resolve(None), "fabrication");
        assert_eq!(catalog.resolve(Some("")), "fabrication");
        assert_eq!(catalog.resolve(Some("catering")), "fabrication");
    }
}
