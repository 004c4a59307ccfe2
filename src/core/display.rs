//! Display classification and formatting.
//!
//! Category styling is a fixed lookup. The raw-string lookups never fail: any
//! value outside the known categories gets the neutral default style, so a
//! stray string from the store or an old client cannot break rendering.

use crate::core::{
    money::Money,
    records::{DonationCategory, ExpenseCategory},
};
use chrono::NaiveDate;

/// Donations shown on the public dashboard before "show all".
pub const PUBLIC_DONATION_LIMIT: usize = 8;
/// Expenses shown on the public dashboard before "show all".
pub const PUBLIC_EXPENSE_LIMIT: usize = 6;
/// Records of each kind shown on the admin overview.
pub const ADMIN_OVERVIEW_LIMIT: usize = 5;

/// Badge colour family for a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BadgeColor {
    /// Individual donations
    Green,
    /// Family donations, supplies
    Blue,
    /// Business donations, cultural programs
    Purple,
    /// Anonymous donations and the neutral default
    Gray,
    /// Decorations
    Pink,
    /// Food and prasadam
    Orange,
    /// Utilities
    Yellow,
}

impl BadgeColor {
    /// RGB value for Discord embeds.
    #[must_use]
    pub const fn rgb(self) -> u32 {
        match self {
            Self::Green => 0x0015_803D,
            Self::Blue => 0x001D_4ED8,
            Self::Purple => 0x007E_22CE,
            Self::Gray => 0x0037_4151,
            Self::Pink => 0x00BE_185D,
            Self::Orange => 0x00C2_410C,
            Self::Yellow => 0x00A1_6207,
        }
    }
}

/// Icon and colour for one category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CategoryStyle {
    /// Emoji icon
    pub icon: &'static str,
    /// Badge colour
    pub color: BadgeColor,
}

const DEFAULT_DONATION_STYLE: CategoryStyle = CategoryStyle {
    icon: "👤",
    color: BadgeColor::Green,
};

const DEFAULT_EXPENSE_STYLE: CategoryStyle = CategoryStyle {
    icon: "📋",
    color: BadgeColor::Gray,
};

impl DonationCategory {
    /// Icon and badge colour for this category.
    #[must_use]
    pub const fn style(self) -> CategoryStyle {
        match self {
            Self::Family => CategoryStyle {
                icon: "👨‍👩‍👧‍👦",
                color: BadgeColor::Blue,
            },
            Self::Business => CategoryStyle {
                icon: "🏢",
                color: BadgeColor::Purple,
            },
            Self::Anonymous => CategoryStyle {
                icon: "🤝",
                color: BadgeColor::Gray,
            },
            Self::Individual => DEFAULT_DONATION_STYLE,
        }
    }
}

impl ExpenseCategory {
    /// Icon and badge colour for this category.
    #[must_use]
    pub const fn style(self) -> CategoryStyle {
        match self {
            Self::Decorations => CategoryStyle {
                icon: "🎨",
                color: BadgeColor::Pink,
            },
            Self::FoodPrasadam => CategoryStyle {
                icon: "🍽️",
                color: BadgeColor::Orange,
            },
            Self::CulturalPrograms => CategoryStyle {
                icon: "🎭",
                color: BadgeColor::Purple,
            },
            Self::Utilities => CategoryStyle {
                icon: "⚡",
                color: BadgeColor::Yellow,
            },
            Self::Supplies => CategoryStyle {
                icon: "📦",
                color: BadgeColor::Blue,
            },
            Self::Other => DEFAULT_EXPENSE_STYLE,
        }
    }
}

/// Style for a raw donation category string; unknown values get the default.
#[must_use]
pub fn donation_category_style(raw: &str) -> CategoryStyle {
    raw.parse::<DonationCategory>()
        .map_or(DEFAULT_DONATION_STYLE, DonationCategory::style)
}

/// Style for a raw expense category string; unknown values get the default.
#[must_use]
pub fn expense_category_style(raw: &str) -> CategoryStyle {
    raw.parse::<ExpenseCategory>()
        .map_or(DEFAULT_EXPENSE_STYLE, ExpenseCategory::style)
}

/// Formats money as Indian rupees with lakh/crore digit grouping, e.g.
/// `₹1,50,000.00`.
#[must_use]
pub fn format_inr(amount: Money) -> String {
    let minor = amount.minor();
    let magnitude = minor.unsigned_abs();
    let whole = (magnitude / 100).to_string();
    let paise = magnitude % 100;

    let grouped = if whole.len() <= 3 {
        whole
    } else {
        let (head, last_three) = whole.split_at(whole.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{last_three}", groups.join(","))
    };

    let sign = if minor < 0 { "-" } else { "" };
    format!("{sign}₹{grouped}.{paise:02}")
}

/// Formats a remaining balance as its magnitude plus a surplus/deficit label,
/// the way the dashboard card shows it.
#[must_use]
pub fn format_balance(balance: Money) -> String {
    let label = if balance.is_negative() {
        "Deficit"
    } else {
        "Surplus"
    };
    format!("{} ({label})", format_inr(balance.abs()))
}

/// Short date like `27 Aug 2025`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80%`. The percentage
/// is clamped to `[0, 100]` for both the bar and the label.
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = if progress_percent.is_nan() {
        0.0
    } else {
        progress_percent.clamp(0.0, 100.0)
    };

    // Cast safety: clamped_progress ∈ [0, 100], length is small (10-20).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {clamped_progress:.0}%")
}

/// The first `limit` records of an already date-sorted list.
#[must_use]
pub fn most_recent<T>(records: &[T], limit: usize) -> &[T] {
    &records[..records.len().min(limit)]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_donation_styles() {
        assert_eq!(DonationCategory::Family.style().icon, "👨‍👩‍👧‍👦");
        assert_eq!(DonationCategory::Business.style().color, BadgeColor::Purple);
        assert_eq!(DonationCategory::Anonymous.style().color.rgb(), 0x0037_4151);
        assert_eq!(DonationCategory::Individual.style(), DEFAULT_DONATION_STYLE);
    }

    #[test]
    fn test_expense_styles() {
        assert_eq!(ExpenseCategory::FoodPrasadam.style().color, BadgeColor::Orange);
        assert_eq!(ExpenseCategory::Utilities.style().icon, "⚡");
        assert_eq!(ExpenseCategory::Other.style(), DEFAULT_EXPENSE_STYLE);
    }

    #[test]
    fn test_raw_lookup_falls_back_on_unknown_values() {
        assert_eq!(donation_category_style("Sponsor"), DEFAULT_DONATION_STYLE);
        assert_eq!(donation_category_style(""), DEFAULT_DONATION_STYLE);
        assert_eq!(expense_category_style("Fireworks"), DEFAULT_EXPENSE_STYLE);
        assert_eq!(
            expense_category_style("Cultural Programs").color,
            BadgeColor::Purple
        );
        assert_eq!(donation_category_style("business").icon, "🏢");
    }

    #[test]
    fn test_format_inr_grouping() {
        assert_eq!(format_inr(Money::ZERO), "₹0.00");
        assert_eq!(format_inr(Money::from_minor(5)), "₹0.05");
        assert_eq!(format_inr(Money::from_major_units(999)), "₹999.00");
        assert_eq!(format_inr(Money::from_major_units(1500)), "₹1,500.00");
        assert_eq!(format_inr(Money::from_major_units(150_000)), "₹1,50,000.00");
        assert_eq!(
            format_inr(Money::from_minor(1_234_567_850)),
            "₹1,23,45,678.50"
        );
        assert_eq!(format_inr(Money::from_major_units(-1500)), "-₹1,500.00");
    }

    #[test]
    fn test_format_balance_labels() {
        assert_eq!(
            format_balance(Money::from_major_units(1200)),
            "₹1,200.00 (Surplus)"
        );
        assert_eq!(
            format_balance(Money::from_major_units(-150)),
            "₹150.00 (Deficit)"
        );
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
        assert_eq!(format_date(date), "7 Aug 2025");
    }

    #[test]
    fn test_format_progress_bar() {
        assert_eq!(format_progress_bar(100.0, Some(10)), "[██████████] 100%");
        assert_eq!(format_progress_bar(50.0, Some(10)), "[█████░░░░░] 50%");
        assert_eq!(format_progress_bar(0.0, Some(10)), "[░░░░░░░░░░] 0%");
        assert_eq!(format_progress_bar(250.0, Some(4)), "[████] 100%");
        assert_eq!(format_progress_bar(f64::NAN, Some(4)), "[░░░░] 0%");
    }

    #[test]
    fn test_most_recent_truncates() {
        let items = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        assert_eq!(most_recent(&items, PUBLIC_DONATION_LIMIT).len(), 8);
        assert_eq!(most_recent(&items, PUBLIC_EXPENSE_LIMIT), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(most_recent(&items[..2], ADMIN_OVERVIEW_LIMIT), &[1, 2]);
    }
}
