use super::sheet::{LineStyle, QuotationSheet, SheetLine};
use crate::config::toml_config::EstimatorConfig;
use crate::domain::model::{Quote, RenderedDocument};
use crate::domain::ports::DocumentRenderer;
use crate::utils::currency::MoneyFormat;
use crate::utils::error::{QuoteError, Result};
use async_trait::async_trait;
use printpdf::{BuiltinFont, Mm, PdfDocument};

pub const SIMPLE_PDF_FILE_NAME: &str = "Interior_Quote.pdf";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const PT_TO_MM: f32 = 0.3528;
const LINE_SPACING: f32 = 1.4;

fn pdf_error<E: std::fmt::Debug>(e: E) -> QuoteError {
    QuoteError::PdfError {
        message: format!("{:?}", e),
    }
}

/// Built-in PDF fonts only cover Latin-1; anything else is replaced.
fn pdf_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '•' => '-',
            c if c.is_ascii() => c,
            _ => '?',
        })
        .collect()
}

fn style_font(style: LineStyle) -> (BuiltinFont, f32) {
    match style {
        LineStyle::Title => (BuiltinFont::HelveticaBold, 16.0),
        LineStyle::Heading => (BuiltinFont::HelveticaBold, 11.0),
        LineStyle::Body => (BuiltinFont::Helvetica, 9.0),
        LineStyle::Table => (BuiltinFont::Courier, 8.0),
    }
}

/// Typesets sheet lines top to bottom on A4 pages, breaking pages as needed.
pub fn write_pdf(title: &str, lines: &[SheetLine]) -> Result<Vec<u8>> {
    let (doc, page, layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;
    let mono = doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(pdf_error)?;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT - MARGIN;
    let mut pages = 1;

    for line in lines {
        let (builtin, size) = style_font(line.style);
        let font = match builtin {
            BuiltinFont::HelveticaBold => &bold,
            BuiltinFont::Courier => &mono,
            _ => &regular,
        };

        let advance = size * PT_TO_MM * LINE_SPACING;
        if y - advance < MARGIN {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            current = doc.get_page(page).get_layer(layer);
            y = PAGE_HEIGHT - MARGIN;
            pages += 1;
        }
        y -= advance;

        if !line.text.is_empty() {
            current.use_text(pdf_text(&line.text), size, Mm(MARGIN), Mm(y), font);
        }
    }

    tracing::debug!("Laid out {} lines on {} pages", lines.len(), pages);
    doc.save_to_bytes().map_err(pdf_error)
}

/// The detailed quotation as `Interior_Quote_<date>.pdf`.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    sheet: QuotationSheet,
}

impl PdfRenderer {
    pub fn new(sheet: QuotationSheet) -> Self {
        Self { sheet }
    }

    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self::new(QuotationSheet::from_config(config))
    }
}

#[async_trait]
impl DocumentRenderer for PdfRenderer {
    fn name(&self) -> &str {
        "pdf"
    }

    async fn ready(&self) -> Result<()> {
        Ok(())
    }

    async fn render(&self, quote: &Quote) -> Result<RenderedDocument> {
        let title = format!("{} - {}", self.sheet.letterhead().title, quote.file_stem());
        let bytes = write_pdf(&title, &self.sheet.lines(quote))?;

        Ok(RenderedDocument {
            file_name: format!("{}.pdf", quote.file_stem()),
            media_type: "application/pdf",
            bytes,
        })
    }
}

/// Single-page fallback: total, date and one line per item.
#[derive(Debug, Clone, Default)]
pub struct SimplePdfRenderer {
    money: MoneyFormat,
}

impl SimplePdfRenderer {
    pub fn new(money: MoneyFormat) -> Self {
        Self { money }
    }

    pub fn lines(&self, quote: &Quote) -> Vec<SheetLine> {
        let body = |text: String| SheetLine {
            style: LineStyle::Body,
            text,
        };

        let mut lines = vec![
            SheetLine {
                style: LineStyle::Title,
                text: "Interior Design Quotation".to_string(),
            },
            body(String::new()),
            body(format!(
                "Total Amount: {}",
                self.money.format_rounded(quote.total)
            )),
            body(format!("Generated: {}", quote.generated_at.format("%Y-%m-%d"))),
            body(String::new()),
            body("Items:".to_string()),
        ];
        lines.extend(quote.items.iter().map(|item| {
            body(format!(
                "{}: {} - {}",
                item.room,
                item.category.as_str(),
                self.money.format(item.cost)
            ))
        }));
        lines
    }
}

#[async_trait]
impl DocumentRenderer for SimplePdfRenderer {
    fn name(&self) -> &str {
        "simple-pdf"
    }

    async fn ready(&self) -> Result<()> {
        Ok(())
    }

    async fn render(&self, quote: &Quote) -> Result<RenderedDocument> {
        let bytes = write_pdf("Interior Design Quotation", &self.lines(quote))?;

        Ok(RenderedDocument {
            file_name: SIMPLE_PDF_FILE_NAME.to_string(),
            media_type: "application/pdf",
            bytes,
        })
    }
}
