use crate::config::toml_config::EstimatorConfig;
use crate::domain::model::{Letterhead, Quote, SelectionItem};
use crate::domain::ports::ConfigProvider;
use crate::utils::currency::MoneyFormat;

const SPEC_COLUMN_WIDTH: usize = 40;
const MAX_SPEC_LINES: usize = 3;
const RULE_WIDTH: usize = 78;

/// How a sheet line is typeset. Table rows rely on a fixed-width font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading,
    Body,
    Table,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLine {
    pub style: LineStyle,
    pub text: String,
}

impl SheetLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(LineStyle::Body, "")
    }
}

/// Layout of the detailed quotation: letterhead, quote details, one table per
/// room with subtotals, cost summary, terms and footer.
#[derive(Debug, Clone)]
pub struct QuotationSheet {
    letterhead: Letterhead,
    money: MoneyFormat,
    validity_days: u32,
}

impl QuotationSheet {
    pub fn new(letterhead: Letterhead, money: MoneyFormat, validity_days: u32) -> Self {
        Self {
            letterhead,
            money,
            validity_days,
        }
    }

    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self::new(
            config.letterhead().clone(),
            config.money_format(),
            config.validity_days(),
        )
    }

    pub fn letterhead(&self) -> &Letterhead {
        &self.letterhead
    }

    pub fn lines(&self, quote: &Quote) -> Vec<SheetLine> {
        let lh = &self.letterhead;
        let rule = || SheetLine::new(LineStyle::Table, "-".repeat(RULE_WIDTH));

        let mut lines = vec![
            SheetLine::new(LineStyle::Title, lh.title.clone()),
            SheetLine::new(LineStyle::Heading, lh.company_name.clone()),
        ];
        if !lh.strapline.is_empty() {
            lines.push(SheetLine::new(LineStyle::Body, lh.strapline.clone()));
        }

        for (label, value) in [
            ("Address", &lh.address),
            ("Phone", &lh.phone),
            ("Email", &lh.email),
            ("Website", &lh.website),
        ] {
            if !value.is_empty() {
                lines.push(SheetLine::new(LineStyle::Body, format!("{}: {}", label, value)));
            }
        }

        lines.push(SheetLine::blank());
        lines.push(SheetLine::new(
            LineStyle::Body,
            format!("Quote Date: {}", quote.generated_at.format("%Y-%m-%d")),
        ));
        lines.push(SheetLine::new(
            LineStyle::Body,
            format!(
                "Property Type: {}",
                quote.property_type.as_str().to_uppercase()
            ),
        ));
        lines.push(SheetLine::new(
            LineStyle::Body,
            format!(
                "Valid Until: {}",
                quote.valid_until(self.validity_days).format("%Y-%m-%d")
            ),
        ));

        lines.push(SheetLine::blank());
        lines.push(SheetLine::new(LineStyle::Heading, "Items & Pricing:"));
        for room in quote.room_totals() {
            lines.push(rule());
            lines.push(SheetLine::new(LineStyle::Heading, room.room.clone()));
            lines.push(SheetLine::new(
                LineStyle::Table,
                format!("  {:<18}{:<42}{:>16}", "Item", "Specification", "Amount"),
            ));

            let items = quote.items.iter().filter(|item| item.room == room.room);
            for item in items {
                lines.extend(self.item_lines(item));
            }
            lines.push(SheetLine::new(
                LineStyle::Table,
                format!("  {:>60}{:>16}", "Subtotal:", self.money.format(room.amount)),
            ));
            lines.push(SheetLine::blank());
        }

        lines.push(SheetLine::new(LineStyle::Heading, "Cost Summary:"));
        lines.push(SheetLine::new(LineStyle::Body, "Room-wise Totals:"));
        for room in quote.room_totals() {
            lines.push(SheetLine::new(
                LineStyle::Body,
                format!("  {}: {}", room.room, self.money.format(room.amount)),
            ));
        }
        lines.push(rule());
        lines.push(SheetLine::new(
            LineStyle::Heading,
            format!("Total Amount: {}", self.money.format_rounded(quote.total)),
        ));

        if !lh.terms.is_empty() {
            lines.push(SheetLine::blank());
            lines.push(SheetLine::new(LineStyle::Heading, "Terms & Conditions:"));
            for term in &lh.terms {
                lines.push(SheetLine::new(LineStyle::Body, format!("  • {}", term)));
            }
        }

        lines.push(SheetLine::blank());
        lines.push(rule());
        if !lh.footer.is_empty() {
            lines.push(SheetLine::new(LineStyle::Body, lh.footer.clone()));
        }
        lines.push(SheetLine::new(
            LineStyle::Body,
            format!("Visit: {}", lh.website_url),
        ));
        lines.push(SheetLine::new(
            LineStyle::Body,
            format!("WhatsApp: {}", link_without_query(&lh.whatsapp_url)),
        ));

        lines
    }

    /// The sheet as plain text, one line per sheet line.
    pub fn text(&self, quote: &Quote) -> String {
        let mut text = self
            .lines(quote)
            .into_iter()
            .map(|line| line.text)
            .collect::<Vec<_>>()
            .join("\n");
        text.push('\n');
        text
    }

    fn item_lines(&self, item: &SelectionItem) -> Vec<SheetLine> {
        let spec = wrap_specification(&item.size, SPEC_COLUMN_WIDTH);
        spec.iter()
            .enumerate()
            .map(|(index, line)| {
                let text = if index == 0 {
                    format!(
                        "  {:<18}{:<42}{:>16}",
                        item.category.display_name(),
                        line,
                        self.money.format(item.cost)
                    )
                } else {
                    format!("  {:<18}{}", "", line)
                };
                SheetLine::new(LineStyle::Table, text)
            })
            .collect()
    }
}

fn link_without_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Splits a specification into at most three lines no wider than `max_width`,
/// breaking on commas when present and on spaces otherwise. A single part
/// longer than `max_width` keeps its own line.
pub fn wrap_specification(text: &str, max_width: usize) -> Vec<String> {
    let clean = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if clean.is_empty() {
        return vec![String::new()];
    }

    let (parts, separator): (Vec<&str>, &str) = if clean.contains(',') {
        (clean.split(',').map(str::trim).collect(), ", ")
    } else {
        (clean.split(' ').collect(), " ")
    };

    let mut lines = Vec::new();
    let mut current = String::new();
    for part in parts {
        if current.is_empty() {
            current.push_str(part);
            continue;
        }
        let width = current.chars().count() + separator.len() + part.chars().count();
        if width <= max_width {
            current.push_str(separator);
            current.push_str(part);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(part);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.truncate(MAX_SPEC_LINES);
    lines
}
