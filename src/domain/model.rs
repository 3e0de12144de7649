use crate::utils::currency::MoneyFormat;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// A furniture class with its own set of priced variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Cupboard,
    Bed,
    Wardrobe,
    SideTable,
    DressingTable,
    StudyTable,
    TvUnit,
    Sofa,
    Table,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Self::Cupboard,
        Self::Bed,
        Self::Wardrobe,
        Self::SideTable,
        Self::DressingTable,
        Self::StudyTable,
        Self::TvUnit,
        Self::Sofa,
        Self::Table,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cupboard => "cupboard",
            Self::Bed => "bed",
            Self::Wardrobe => "wardrobe",
            Self::SideTable => "sideTable",
            Self::DressingTable => "dressingTable",
            Self::StudyTable => "studyTable",
            Self::TvUnit => "tvUnit",
            Self::Sofa => "sofa",
            Self::Table => "table",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Cupboard => "Cupboard",
            Self::Bed => "Bed",
            Self::Wardrobe => "Wardrobe",
            Self::SideTable => "Side Table",
            Self::DressingTable => "Dressing Table",
            Self::StudyTable => "Study Table",
            Self::TvUnit => "TV Unit",
            Self::Sofa => "Sofa",
            Self::Table => "Table",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of bedrooms and kitchens in a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomLayout {
    pub bedrooms: usize,
    pub kitchens: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    #[serde(rename = "1bhk")]
    OneBhk,
    #[serde(rename = "2bhk")]
    TwoBhk,
    #[serde(rename = "3bhk")]
    ThreeBhk,
    #[serde(rename = "4bhk")]
    FourBhk,
    #[serde(rename = "individual")]
    Individual,
    #[serde(rename = "custom")]
    Custom,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneBhk => "1bhk",
            Self::TwoBhk => "2bhk",
            Self::ThreeBhk => "3bhk",
            Self::FourBhk => "4bhk",
            Self::Individual => "individual",
            Self::Custom => "custom",
        }
    }

    /// Apartments come with a fixed layout that cannot be edited.
    pub fn fixed_layout(&self) -> Option<RoomLayout> {
        let bedrooms = match self {
            Self::OneBhk => 1,
            Self::TwoBhk => 2,
            Self::ThreeBhk => 3,
            Self::FourBhk => 4,
            Self::Individual | Self::Custom => return None,
        };
        Some(RoomLayout {
            bedrooms,
            kitchens: 1,
        })
    }

    /// Layout applied when the property type is chosen.
    pub fn default_layout(&self) -> Option<RoomLayout> {
        match self {
            Self::Individual => Some(RoomLayout {
                bedrooms: 3,
                kitchens: 1,
            }),
            Self::Custom => None,
            apartment => apartment.fixed_layout(),
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const BEDROOM_SLOTS: [Category; 6] = [
    Category::Cupboard,
    Category::Bed,
    Category::SideTable,
    Category::DressingTable,
    Category::StudyTable,
    Category::Wardrobe,
];

pub const LIVING_ROOM_SLOTS: [Category; 3] = [Category::TvUnit, Category::Sofa, Category::Table];

/// What a quote line prices: a furniture category or a kitchen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Furniture(Category),
    Kitchen,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Furniture(category) => category.as_str(),
            Self::Kitchen => "kitchen",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Furniture(category) => category.display_name(),
            Self::Kitchen => "Kitchen",
        }
    }
}

impl Serialize for ItemKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenDetails {
    pub length: f64,
    pub height: f64,
    pub area_sq_meter: f64,
    pub kitchen_type: String,
    pub price_per_sq_meter: f64,
}

/// One priced line of a quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionItem {
    pub category: ItemKind,
    pub room: String,
    /// Unrounded; rounding happens once, on the quote total.
    pub cost: f64,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<KitchenDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomTotal {
    pub room: String,
    pub amount: f64,
}

/// The computed summary of a session's selections.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub items: Vec<SelectionItem>,
    pub total: i64,
    pub generated_at: DateTime<Utc>,
    pub property_type: PropertyType,
}

impl Quote {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unrounded_total(&self) -> f64 {
        self.items.iter().map(|item| item.cost).sum()
    }

    /// Subtotals per room, in the order rooms first appear.
    pub fn room_totals(&self) -> Vec<RoomTotal> {
        let mut totals: Vec<RoomTotal> = Vec::new();
        for item in &self.items {
            match totals.iter_mut().find(|t| t.room == item.room) {
                Some(total) => total.amount += item.cost,
                None => totals.push(RoomTotal {
                    room: item.room.clone(),
                    amount: item.cost,
                }),
            }
        }
        totals
    }

    pub fn valid_until(&self, validity_days: u32) -> DateTime<Utc> {
        self.generated_at + Duration::days(i64::from(validity_days))
    }

    /// `Interior_Quote_<YYYY-MM-DD>`
    pub fn file_stem(&self) -> String {
        format!("Interior_Quote_{}", self.generated_at.format("%Y-%m-%d"))
    }

    pub fn summary(&self, money: &MoneyFormat) -> String {
        let mut lines = vec![
            "Quotation Summary:".to_string(),
            "==================".to_string(),
            format!("Property Type: {}", self.property_type.as_str().to_uppercase()),
            format!("Generated: {}", self.generated_at.format("%Y-%m-%d")),
            String::new(),
            "Items:".to_string(),
        ];

        for item in &self.items {
            lines.push(format!(
                "- {}: {} ({}) - {}",
                item.room,
                item.category.display_name(),
                item.size,
                money.format(item.cost)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {}", money.format_rounded(self.total)));
        lines.join("\n")
    }
}

/// Company details printed on every quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Letterhead {
    pub company_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub website_url: String,
    pub whatsapp_url: String,
    pub title: String,
    pub strapline: String,
    pub footer: String,
    #[serde(default)]
    pub terms: Vec<String>,
}

/// Bytes produced by a renderer, ready to be stored.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedDocument {
    pub path: String,
    pub file_name: String,
    pub renderer: String,
    pub used_fallback: bool,
}
