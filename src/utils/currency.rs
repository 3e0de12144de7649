use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

/// Digit grouping used when displaying rounded amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// 12,34,567 (lakh/crore)
    #[default]
    Indian,
    /// 1,234,567
    Western,
}

/// How amounts are shown to the user: prefix plus grouped, rounded digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyFormat {
    pub prefix: String,
    pub grouping: Grouping,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self {
            prefix: "Rs. ".to_string(),
            grouping: Grouping::Indian,
        }
    }
}

impl MoneyFormat {
    pub fn format(&self, amount: f64) -> String {
        format!("{}{}", self.prefix, format_amount(amount, self.grouping))
    }

    pub fn format_rounded(&self, amount: i64) -> String {
        format!("{}{}", self.prefix, group_digits(amount, self.grouping))
    }
}

/// Rounds to the nearest whole currency unit.
pub fn round_amount(value: f64) -> i64 {
    value.round() as i64
}

pub fn group_digits(value: i64, grouping: Grouping) -> String {
    let locale = match grouping {
        Grouping::Indian => Locale::en_IN,
        Grouping::Western => Locale::en,
    };
    value.to_formatted_string(&locale)
}

pub fn format_amount(value: f64, grouping: Grouping) -> String {
    group_digits(round_amount(value), grouping)
}
