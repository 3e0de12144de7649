use crate::adapters::{BundleRenderer, LocalStorage, PdfRenderer, SimplePdfRenderer};
use crate::config::{load_changes, load_selections, CliConfig, Command, EstimatorConfig};
use crate::core::{ConfigProvider, DocumentRenderer, Storage};
use crate::domain::model::{Category, Quote};
use crate::utils::currency::MoneyFormat;
use crate::utils::error::{ErrorSeverity, QuoteError};
use crate::utils::validation::Validate;
use crate::{Catalog, DocumentPublisher, QuoteSession};
use std::io::Write;
use std::path::Path;

/// Process exit code for a failed run, by error severity.
pub fn exit_code(err: &QuoteError) -> i32 {
    match err.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<EstimatorConfig> {
    let config = match path {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            EstimatorConfig::from_file(path)?
        }
        None => {
            tracing::info!("📁 Using built-in catalog");
            EstimatorConfig::embedded()?
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e.into());
    }

    Ok(config)
}

/// Runs one CLI command, writing its report to `out`.
pub async fn run<W: Write>(cli: CliConfig, out: &mut W) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    let catalog = Catalog::from_config(&config)?;
    let money = config.money_format();

    match cli.command {
        Command::Catalog => print_catalog(&catalog, &money, out)?,

        Command::Total {
            selections,
            changes,
        } => {
            let selections = load_selections(&selections)?;
            let mut session = QuoteSession::with_selections(&catalog, money.clone(), selections);
            writeln!(out, "Total: {}", session.display_total())?;

            if let Some(path) = changes {
                for change in load_changes(&path)? {
                    let outcome = session
                        .on_selection_changed(change.clone())
                        .map(|quote| quote.total);
                    match outcome {
                        Ok(total) => {
                            writeln!(out, "{:?} -> {}", change, money.format_rounded(total))?
                        }
                        Err(e) => {
                            tracing::warn!("⚠️  Change {:?} rejected: {}", change, e);
                            writeln!(out, "{:?} rejected: {}", change, e.user_friendly_message())?;
                        }
                    }
                }
            }
        }

        Command::Quote {
            selections,
            output,
            dry_run,
            bundle,
        } => {
            if let Some(output) = output {
                tracing::info!("🔧 Output directory overridden to: {}", output);
                config.set_output_path(output);
            }

            let selections = load_selections(&selections)?;
            let session = QuoteSession::with_selections(&catalog, money.clone(), selections);
            let quote = session.request_quote()?;
            writeln!(out, "{}", quote.summary(&money))?;

            if dry_run {
                tracing::info!("🔍 Dry run: no document written");
                return Ok(());
            }

            publish(&config, &quote, bundle, out).await?;
        }
    }

    Ok(())
}

async fn publish<W: Write>(
    config: &EstimatorConfig,
    quote: &Quote,
    bundle: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let storage = LocalStorage::new(config.output_path());
    let publisher = DocumentPublisher::new(
        PdfRenderer::from_config(config),
        SimplePdfRenderer::new(config.money_format()),
        storage.clone(),
        config,
    );

    let published = publisher.publish(quote).await?;
    if published.used_fallback {
        writeln!(out, "⚠️  Detailed quotation unavailable, saved the simplified version")?;
    }
    writeln!(out, "✅ Quotation generated with {}", published.renderer)?;
    writeln!(out, "📁 Output saved to: {}", published.path)?;

    if bundle {
        let document = BundleRenderer::from_config(config).render(quote).await?;
        storage
            .write_file(&document.file_name, &document.bytes)
            .await?;
        writeln!(
            out,
            "📦 Bundle saved to: {}/{}",
            config.output_path(),
            document.file_name
        )?;
    }

    Ok(())
}

fn print_catalog<W: Write>(
    catalog: &Catalog,
    money: &MoneyFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    for category in Category::ALL {
        writeln!(out, "{} ({})", category.display_name(), category)?;
        for entry in catalog.variants(category) {
            writeln!(
                out,
                "  {:<16}{:>14}  {}",
                entry.variant,
                money.format(entry.unit_price),
                entry.label
            )?;
        }
    }

    let rule = catalog.kitchen();
    writeln!(
        out,
        "Kitchen (per sq.m, length {}-{}cm, height {}cm)",
        rule.min_length, rule.max_length, rule.standard_height
    )?;
    for tier in catalog.kitchen_types() {
        writeln!(
            out,
            "  {:<16}{:>14}  {}",
            tier.key,
            money.format(tier.price_per_sq_meter),
            tier.label
        )?;
    }
    for size in catalog.standard_sizes() {
        writeln!(out, "  size {:<11}{}", size.key, size.label)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::{Builder, NamedTempFile, TempDir};

    const TWO_BHK: &str = r#"{
        "propertyType": "2bhk",
        "bedrooms": [
            {"slots": [{"category": "cupboard", "included": true, "variant": "twoDoor"}]}
        ],
        "livingRoom": {"slots": [{"category": "sofa", "included": true, "variant": "threeSeater"}]},
        "kitchens": [{"size": {"standard": "250"}, "kitchenType": "modular"}]
    }"#;

    fn json_file(content: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn cli(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("interior-quote").chain(args.iter().copied()))
            .unwrap()
    }

    async fn run_to_string(args: &[&str]) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(cli(args), &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_exit_code_by_severity() {
        let pricing = QuoteError::UnknownType {
            kitchen_type: "marble".to_string(),
        };
        let rendering = QuoteError::DocumentGenerationFailed {
            primary: "a".to_string(),
            fallback: "b".to_string(),
        };
        let system = QuoteError::PdfError {
            message: "font".to_string(),
        };

        assert_eq!(exit_code(&pricing), 0);
        assert_eq!(exit_code(&QuoteError::EmptyQuote), 2);
        assert_eq!(exit_code(&rendering), 1);
        assert_eq!(exit_code(&system), 3);
    }

    #[tokio::test]
    async fn test_catalog_lists_categories_and_kitchen() {
        let text = run_to_string(&["catalog"]).await.unwrap();
        assert!(text.contains("Cupboard (cupboard)"));
        assert!(text.contains("Kitchen (per sq.m"));
    }

    #[tokio::test]
    async fn test_total_replays_changes_in_order() {
        let selections = json_file(TWO_BHK);
        let changes = json_file(
            r#"[
                {"change": "chooseVariant", "room": {"bedroom": 1},
                 "category": "bed", "variant": "queen"},
                {"change": "toggleSlot", "room": {"bedroom": 1},
                 "category": "bed", "included": true},
                {"change": "setRoomCounts", "bedrooms": 4, "kitchens": 1}
            ]"#,
        );

        let text = run_to_string(&[
            "total",
            "--selections",
            selections.path().to_str().unwrap(),
            "--changes",
            changes.path().to_str().unwrap(),
        ])
        .await
        .unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Total: Rs. "));
        assert!(lines[1].starts_with("ChooseVariant"));
        assert!(lines[2].starts_with("ToggleSlot"));
        assert!(lines[3].starts_with("SetRoomCounts") && lines[3].contains("rejected"));

        let total = |line: &str| line.rsplit("Rs. ").next().unwrap().replace(',', "");
        let before: i64 = total(lines[1]).parse().unwrap();
        let after: i64 = total(lines[2]).parse().unwrap();
        assert!(after > before);
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let selections = json_file(TWO_BHK);
        let output = TempDir::new().unwrap();

        let text = run_to_string(&[
            "quote",
            "--selections",
            selections.path().to_str().unwrap(),
            "--output",
            output.path().to_str().unwrap(),
            "--dry-run",
        ])
        .await
        .unwrap();

        assert!(!text.contains("Output saved to"));
        assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_quote_writes_pdf_to_output_directory() {
        let selections = json_file(TWO_BHK);
        let output = TempDir::new().unwrap();

        let text = run_to_string(&[
            "quote",
            "--selections",
            selections.path().to_str().unwrap(),
            "--output",
            output.path().to_str().unwrap(),
            "--bundle",
        ])
        .await
        .unwrap();
        assert!(text.contains("Quotation generated with pdf"));

        let mut names: Vec<String> = std::fs::read_dir(output.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names.len(), 2);
        assert!(names[0].starts_with("Interior_Quote_") && names[0].ends_with(".pdf"));
        assert!(names[1].starts_with("Interior_Quote_") && names[1].ends_with(".zip"));

        let pdf = std::fs::read(output.path().join(&names[0])).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_empty_quote_maps_to_selection_exit_code() {
        let selections = json_file(r#"{"propertyType": "1bhk"}"#);
        let output = TempDir::new().unwrap();

        let err = run_to_string(&[
            "quote",
            "--selections",
            selections.path().to_str().unwrap(),
            "--output",
            output.path().to_str().unwrap(),
        ])
        .await
        .unwrap_err();

        let quote_error = err.downcast_ref::<QuoteError>().unwrap();
        assert!(matches!(quote_error, QuoteError::EmptyQuote));
        assert_eq!(exit_code(quote_error), 2);
    }

    #[tokio::test]
    async fn test_oversized_apartment_snapshot_is_priced_on_fixed_layout() {
        let selections = json_file(
            r#"{
                "propertyType": "1bhk",
                "bedrooms": [
                    {"slots": [{"category": "cupboard", "included": true, "variant": "twoDoor"}]},
                    {"slots": [{"category": "bed", "included": true, "variant": "king"}]}
                ]
            }"#,
        );

        let text = run_to_string(&[
            "quote",
            "--selections",
            selections.path().to_str().unwrap(),
            "--dry-run",
        ])
        .await
        .unwrap();

        assert!(text.contains("Bedroom 1"));
        assert!(!text.contains("Bedroom 2"));
    }
}
