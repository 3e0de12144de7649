use super::sheet::QuotationSheet;
use crate::config::toml_config::EstimatorConfig;
use crate::domain::model::{Quote, RenderedDocument};
use crate::domain::ports::DocumentRenderer;
use crate::utils::currency::round_amount;
use crate::utils::error::{QuoteError, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

#[derive(Debug, Serialize)]
struct ItemRow<'a> {
    room: &'a str,
    item: &'a str,
    specification: &'a str,
    cost: f64,
    amount: i64,
}

/// Machine-readable companion to the PDF: a zip holding the quote as JSON,
/// the line items as CSV and the quotation sheet as text.
#[derive(Debug, Clone)]
pub struct BundleRenderer {
    sheet: QuotationSheet,
}

impl BundleRenderer {
    pub fn new(sheet: QuotationSheet) -> Self {
        Self { sheet }
    }

    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self::new(QuotationSheet::from_config(config))
    }

    fn items_csv(&self, quote: &Quote) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for item in &quote.items {
            writer.serialize(ItemRow {
                room: &item.room,
                item: item.category.display_name(),
                specification: &item.size,
                cost: item.cost,
                amount: round_amount(item.cost),
            })?;
        }
        writer
            .into_inner()
            .map_err(|e| QuoteError::IoError(e.into_error()))
    }
}

#[async_trait]
impl DocumentRenderer for BundleRenderer {
    fn name(&self) -> &str {
        "bundle"
    }

    async fn ready(&self) -> Result<()> {
        Ok(())
    }

    async fn render(&self, quote: &Quote) -> Result<RenderedDocument> {
        tracing::debug!("Building quotation bundle for {} items", quote.items.len());

        let quote_json = serde_json::to_string_pretty(quote)?;
        let items_csv = self.items_csv(quote)?;
        let sheet = self.sheet.text(quote);

        let bytes = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("quote.json", FileOptions::default())?;
            zip.write_all(quote_json.as_bytes())?;

            zip.start_file::<_, ()>("items.csv", FileOptions::default())?;
            zip.write_all(&items_csv)?;

            zip.start_file::<_, ()>("quotation.txt", FileOptions::default())?;
            zip.write_all(sheet.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        Ok(RenderedDocument {
            file_name: format!("{}.zip", quote.file_stem()),
            media_type: "application/zip",
            bytes,
        })
    }
}
