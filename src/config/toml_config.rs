use crate::domain::model::Letterhead;
use crate::domain::ports::ConfigProvider;
use crate::utils::currency::{Grouping, MoneyFormat};
use crate::utils::error::{QuoteError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Duration;

/// Configuration compiled into the binary; used when no `--config` is given.
pub const DEFAULT_CONFIG: &str = include_str!("../../config/estimator.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorConfig {
    pub estimator: EstimatorInfo,
    pub letterhead: Letterhead,
    pub furniture: BTreeMap<String, Vec<VariantConfig>>,
    pub kitchen: KitchenConfig,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorInfo {
    pub name: String,
    pub currency_prefix: Option<String>,
    pub grouping: Option<Grouping>,
    pub validity_days: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantConfig {
    pub variant: String,
    pub price: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenConfig {
    pub area_divisor: Option<f64>,
    pub limits: KitchenLimits,
    pub types: Vec<KitchenTypeConfig>,
    #[serde(default)]
    pub standard_sizes: Vec<StandardSizeConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenLimits {
    pub min_length: f64,
    pub max_length: f64,
    pub standard_height: f64,
    pub length_step: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenTypeConfig {
    pub key: String,
    pub price_per_sq_meter: f64,
    pub label: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardSizeConfig {
    pub key: String,
    pub length: f64,
    pub height: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub render_timeout_ms: Option<u64>,
}

const DEFAULT_OUTPUT_PATH: &str = "./quotes";
const DEFAULT_RENDER_TIMEOUT_MS: u64 = 500;
const DEFAULT_VALIDITY_DAYS: u32 = 30;
const DEFAULT_AREA_DIVISOR: f64 = 10_000.0;

impl EstimatorConfig {
    /// Loads and env-substitutes a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuoteError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QuoteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// The configuration shipped with the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Replaces `${VAR}` placeholders (e.g. `${COMPANY_PHONE}`) from the environment.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QuoteError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("estimator.name", &self.estimator.name)?;
        validation::validate_range("estimator.validity_days", self.validity_days(), 1, 365)?;

        let letterhead = &self.letterhead;
        validation::validate_non_empty_string("letterhead.company_name", &letterhead.company_name)?;
        validation::validate_non_empty_string("letterhead.title", &letterhead.title)?;
        validation::validate_url("letterhead.website_url", &letterhead.website_url)?;
        validation::validate_url("letterhead.whatsapp_url", &letterhead.whatsapp_url)?;

        validation::validate_path("output.path", self.output_path())?;

        for (category, variants) in &self.furniture {
            if variants.is_empty() {
                return Err(QuoteError::MissingConfigError {
                    field: format!("furniture.{}", category),
                });
            }

            let mut seen = HashSet::new();
            for variant in variants {
                let field = format!("furniture.{}.{}", category, variant.variant);
                validation::validate_non_empty_string(&field, &variant.variant)?;
                validation::validate_positive_amount(&field, variant.price)?;
                if !seen.insert(variant.variant.as_str()) {
                    return Err(QuoteError::ConfigValidationError {
                        field,
                        message: "duplicate variant".to_string(),
                    });
                }
            }
        }

        self.validate_kitchen()
    }

    fn validate_kitchen(&self) -> Result<()> {
        let limits = &self.kitchen.limits;
        validation::validate_positive_amount("kitchen.limits.min_length", limits.min_length)?;
        validation::validate_positive_amount("kitchen.limits.max_length", limits.max_length)?;
        validation::validate_positive_amount(
            "kitchen.limits.standard_height",
            limits.standard_height,
        )?;
        validation::validate_positive_amount("kitchen.limits.length_step", self.length_step())?;
        validation::validate_positive_amount("kitchen.area_divisor", self.area_divisor())?;

        if limits.min_length > limits.max_length {
            return Err(QuoteError::ConfigValidationError {
                field: "kitchen.limits".to_string(),
                message: format!(
                    "min_length {} is greater than max_length {}",
                    limits.min_length, limits.max_length
                ),
            });
        }

        if self.kitchen.types.is_empty() {
            return Err(QuoteError::MissingConfigError {
                field: "kitchen.types".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for tier in &self.kitchen.types {
            let field = format!("kitchen.types.{}", tier.key);
            validation::validate_non_empty_string(&field, &tier.key)?;
            validation::validate_positive_amount(&field, tier.price_per_sq_meter)?;
            if !seen.insert(tier.key.as_str()) {
                return Err(QuoteError::ConfigValidationError {
                    field,
                    message: "duplicate kitchen type".to_string(),
                });
            }
        }

        for size in &self.kitchen.standard_sizes {
            let field = format!("kitchen.standard_sizes.{}", size.key);
            validation::validate_range(&field, size.length, limits.min_length, limits.max_length)?;
            validation::validate_positive_amount(&field, size.height)?;
        }

        Ok(())
    }

    pub fn validity_days(&self) -> u32 {
        self.estimator.validity_days.unwrap_or(DEFAULT_VALIDITY_DAYS)
    }

    pub fn length_step(&self) -> f64 {
        self.kitchen.limits.length_step.unwrap_or(1.0)
    }

    pub fn area_divisor(&self) -> f64 {
        self.kitchen.area_divisor.unwrap_or(DEFAULT_AREA_DIVISOR)
    }

    pub fn money_format(&self) -> MoneyFormat {
        MoneyFormat {
            prefix: self
                .estimator
                .currency_prefix
                .clone()
                .unwrap_or_else(|| MoneyFormat::default().prefix),
            grouping: self.estimator.grouping.unwrap_or_default(),
        }
    }

    /// Overrides the document output directory (CLI `--output`).
    pub fn set_output_path(&mut self, path: impl Into<String>) {
        let render_timeout_ms = self.output.as_ref().and_then(|o| o.render_timeout_ms);
        self.output = Some(OutputConfig {
            path: path.into(),
            render_timeout_ms,
        });
    }
}

impl ConfigProvider for EstimatorConfig {
    fn output_path(&self) -> &str {
        self.output
            .as_ref()
            .map(|o| o.path.as_str())
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn render_timeout(&self) -> Duration {
        let millis = self
            .output
            .as_ref()
            .and_then(|o| o.render_timeout_ms)
            .unwrap_or(DEFAULT_RENDER_TIMEOUT_MS);
        Duration::from_millis(millis)
    }

    fn letterhead(&self) -> &Letterhead {
        &self.letterhead
    }
}

impl Validate for EstimatorConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
