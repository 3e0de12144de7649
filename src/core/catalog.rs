use crate::config::toml_config::EstimatorConfig;
use crate::domain::model::Category;
use crate::utils::error::{QuoteError, Result};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceEntry {
    pub category: Category,
    pub variant: String,
    pub unit_price: f64,
    /// Size description shown to the user.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KitchenTier {
    pub key: String,
    pub price_per_sq_meter: f64,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandardSize {
    pub key: String,
    pub length: f64,
    pub height: f64,
    pub label: String,
}

/// Area-based kitchen pricing: `(length * height / area_divisor) * price_per_sq_meter`.
#[derive(Debug, Clone, PartialEq)]
pub struct KitchenPricingRule {
    pub tiers: Vec<KitchenTier>,
    pub min_length: f64,
    pub max_length: f64,
    pub standard_height: f64,
    pub length_step: f64,
    pub area_divisor: f64,
}

impl KitchenPricingRule {
    pub fn tier(&self, kitchen_type: &str) -> Result<&KitchenTier> {
        self.tiers
            .iter()
            .find(|t| t.key == kitchen_type)
            .ok_or_else(|| QuoteError::UnknownType {
                kitchen_type: kitchen_type.to_string(),
            })
    }

    pub fn is_valid_length(&self, length: f64) -> bool {
        length.is_finite()
            && length >= self.min_length
            && length <= self.max_length
            && length % self.length_step == 0.0
    }

    pub fn check_length(&self, length: f64) -> Result<()> {
        if self.is_valid_length(length) {
            Ok(())
        } else {
            Err(QuoteError::InvalidLength {
                length,
                min: self.min_length,
                max: self.max_length,
                step: self.length_step,
            })
        }
    }

    /// Wall area in square meters at the standard height.
    pub fn area_sq_meter(&self, length: f64) -> f64 {
        length * self.standard_height / self.area_divisor
    }

    pub fn cost(&self, length: f64, kitchen_type: &str) -> Result<f64> {
        let tier = self.tier(kitchen_type)?;
        self.check_length(length)?;
        Ok(self.area_sq_meter(length) * tier.price_per_sq_meter)
    }
}

/// Immutable price table, validated when built.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: BTreeMap<Category, Vec<PriceEntry>>,
    kitchen: KitchenPricingRule,
    standard_sizes: Vec<StandardSize>,
}

impl Catalog {
    pub fn from_config(config: &EstimatorConfig) -> Result<Self> {
        config.validate_config()?;

        let mut entries = BTreeMap::new();

        for (key, variants) in &config.furniture {
            let category = Category::from_str(key).ok_or_else(|| {
                QuoteError::InvalidConfigValueError {
                    field: "furniture".to_string(),
                    value: key.clone(),
                    reason: "Unknown furniture category".to_string(),
                }
            })?;

            let prices = variants
                .iter()
                .map(|v| PriceEntry {
                    category,
                    variant: v.variant.clone(),
                    unit_price: v.price,
                    label: v.label.clone(),
                })
                .collect::<Vec<_>>();
            entries.insert(category, prices);
        }

        if let Some(missing) = Category::ALL.iter().find(|c| !entries.contains_key(*c)) {
            return Err(QuoteError::MissingConfigError {
                field: format!("furniture.{}", missing),
            });
        }

        let limits = &config.kitchen.limits;
        let kitchen = KitchenPricingRule {
            tiers: config
                .kitchen
                .types
                .iter()
                .map(|t| KitchenTier {
                    key: t.key.clone(),
                    price_per_sq_meter: t.price_per_sq_meter,
                    label: t.label.clone(),
                    description: t.description.clone().unwrap_or_default(),
                })
                .collect(),
            min_length: limits.min_length,
            max_length: limits.max_length,
            standard_height: limits.standard_height,
            length_step: config.length_step(),
            area_divisor: config.area_divisor(),
        };

        let standard_sizes = config
            .kitchen
            .standard_sizes
            .iter()
            .map(|s| StandardSize {
                key: s.key.clone(),
                length: s.length,
                height: s.height,
                label: s.label.clone(),
            })
            .collect();

        let variant_count: usize = entries.values().map(Vec::len).sum();
        tracing::debug!(
            "Catalog loaded: {} furniture variants, {} kitchen types",
            variant_count,
            kitchen.tiers.len()
        );

        Ok(Self {
            entries,
            kitchen,
            standard_sizes,
        })
    }

    pub fn lookup(&self, category: Category, variant: &str) -> Result<&PriceEntry> {
        self.variants(category)
            .iter()
            .find(|entry| entry.variant == variant)
            .ok_or_else(|| QuoteError::NotFound {
                category: category.to_string(),
                variant: variant.to_string(),
            })
    }

    /// Variants of a category in declared order.
    pub fn variants(&self, category: Category) -> &[PriceEntry] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn kitchen(&self) -> &KitchenPricingRule {
        &self.kitchen
    }

    pub fn kitchen_cost(&self, length: f64, kitchen_type: &str) -> Result<f64> {
        self.kitchen.cost(length, kitchen_type)
    }

    pub fn kitchen_types(&self) -> &[KitchenTier] {
        &self.kitchen.tiers
    }

    pub fn standard_sizes(&self) -> &[StandardSize] {
        &self.standard_sizes
    }

    pub fn standard_size(&self, key: &str) -> Result<&StandardSize> {
        self.standard_sizes
            .iter()
            .find(|s| s.key == key)
            .ok_or_else(|| QuoteError::NotFound {
                category: "kitchen size".to_string(),
                variant: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let config = EstimatorConfig::embedded().unwrap();
        Catalog::from_config(&config).unwrap()
    }

    #[test]
    fn test_every_listed_variant_has_positive_price() {
        let catalog = catalog();
        for category in Category::ALL {
            let variants = catalog.variants(category);
            assert!(!variants.is_empty(), "{} has no variants", category);
            for entry in variants {
                let found = catalog.lookup(category, &entry.variant).unwrap();
                assert!(found.unit_price > 0.0);
            }
        }
    }

    #[test]
    fn test_lookup_known_price() {
        let catalog = catalog();
        assert_eq!(
            catalog.lookup(Category::Cupboard, "twoDoor").unwrap().unit_price,
            51267.0
        );
        assert_eq!(catalog.lookup(Category::Bed, "queen").unwrap().unit_price, 50000.0);
    }

    #[test]
    fn test_lookup_unknown_variant_is_not_found() {
        let catalog = catalog();
        assert!(matches!(
            catalog.lookup(Category::Bed, "twoDoor"),
            Err(QuoteError::NotFound { .. })
        ));
        assert!(matches!(
            catalog.lookup(Category::Sofa, ""),
            Err(QuoteError::NotFound { .. })
        ));
    }

    #[test]
    fn test_variants_keep_declared_order() {
        let catalog = catalog();
        let keys: Vec<&str> = catalog
            .variants(Category::Cupboard)
            .iter()
            .map(|e| e.variant.as_str())
            .collect();
        assert_eq!(keys, vec!["twoDoor", "threeDoor", "fourDoor"]);
    }

    #[test]
    fn test_kitchen_cost_for_modular_250() {
        let catalog = catalog();
        let area = catalog.kitchen().area_sq_meter(250.0);
        assert_eq!(area, 2.0);
        assert_eq!(catalog.kitchen_cost(250.0, "modular").unwrap(), 66306.0);
    }

    #[test]
    fn test_kitchen_cost_rejects_out_of_range_lengths() {
        let catalog = catalog();
        for length in [50.0, 99.0, 501.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                catalog.kitchen_cost(length, "modular"),
                Err(QuoteError::InvalidLength { .. })
            ));
        }
        assert!(catalog.kitchen_cost(100.0, "modular").is_ok());
        assert!(catalog.kitchen_cost(500.0, "premium").is_ok());
    }

    #[test]
    fn test_kitchen_cost_rejects_off_step_length() {
        let catalog = catalog();
        assert!(matches!(
            catalog.kitchen_cost(212.5, "modular"),
            Err(QuoteError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_kitchen_cost_unknown_type() {
        let catalog = catalog();
        assert!(matches!(
            catalog.kitchen_cost(250.0, "granite"),
            Err(QuoteError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_kitchen_cost_is_monotonic_in_length() {
        let catalog = catalog();
        for tier in catalog.kitchen_types() {
            let mut previous = 0.0;
            for length in 0..=600 {
                let cost = catalog
                    .kitchen_cost(f64::from(length), &tier.key)
                    .unwrap_or(0.0);
                if (100..=500).contains(&length) {
                    assert!(cost >= previous, "cost dropped at {}cm", length);
                    previous = cost;
                } else {
                    assert_eq!(cost, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_standard_size_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.standard_size("250").unwrap().length, 250.0);
        assert!(catalog.standard_size("300").is_err());
        assert_eq!(catalog.standard_sizes().len(), 2);
    }

    #[test]
    fn test_missing_category_fails_to_load() {
        let mut config = EstimatorConfig::embedded().unwrap();
        config.furniture.remove("sofa");
        assert!(matches!(
            Catalog::from_config(&config),
            Err(QuoteError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_unknown_category_fails_to_load() {
        let mut config = EstimatorConfig::embedded().unwrap();
        let beds = config.furniture["bed"].clone();
        config.furniture.insert("chair".to_string(), beds);
        assert!(matches!(
            Catalog::from_config(&config),
            Err(QuoteError::InvalidConfigValueError { .. })
        ));
    }
}
