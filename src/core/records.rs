//! Typed ledger records and the validated inputs used to write them.
//!
//! Rows coming back from the store are converted with `TryFrom` and checked
//! again, so an out-of-band bad row (say a zero amount) surfaces as
//! [`Error::InvalidRecord`] instead of silently skewing the totals.

use crate::{
    core::money::Money,
    entities::{donation, expense, festival_settings},
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Display name used in place of the donor's name for anonymous donations.
pub const ANONYMOUS_DONOR: &str = "Anonymous Donor";

/// Earliest festival year the settings form accepts.
pub const MIN_FESTIVAL_YEAR: i32 = 2020;

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $label)] $variant),+
        }

        impl $name {
            /// Every variant, in form order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The string stored in the database and shown to users.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| Error::validation($field, format!("unknown value '{wanted}'")))
            }
        }
    };
}

string_enum! {
    /// Who the donation came from.
    DonationCategory, "category" {
        /// A single person
        Individual => "Individual",
        /// A household
        Family => "Family",
        /// A shop or company
        Business => "Business",
        /// Donor chose not to be named
        Anonymous => "Anonymous",
    }
}

string_enum! {
    /// How the donation was paid.
    PaymentMethod, "payment_method" {
        /// Cash in hand
        Cash => "Cash",
        /// UPI, bank transfer and similar
        Online => "Online",
        /// Cheque
        Check => "Check",
        /// Anything else
        Other => "Other",
    }
}

string_enum! {
    /// What the money was spent on.
    ExpenseCategory, "category" {
        /// Pandal and idol decorations
        Decorations => "Decorations",
        /// Food and prasadam
        FoodPrasadam => "Food/Prasadam",
        /// Music, dance and other programs
        CulturalPrograms => "Cultural Programs",
        /// Electricity, water, sound
        Utilities => "Utilities",
        /// Puja and general supplies
        Supplies => "Supplies",
        /// Anything else
        Other => "Other",
    }
}

/// A donation as read back from the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Donation {
    /// Opaque store-assigned id
    pub id: String,
    /// Stored donor name (may be empty when anonymous)
    pub donor_name: String,
    /// Contact phone
    pub donor_phone: Option<String>,
    /// Contact email
    pub donor_email: Option<String>,
    /// Always positive
    pub amount: Money,
    /// Donor category
    pub category: DonationCategory,
    /// Hide the donor name in listings
    pub is_anonymous: bool,
    /// Payment method
    pub payment_method: PaymentMethod,
    /// Free-text notes
    pub notes: Option<String>,
    /// When the donation was received
    pub donation_date: NaiveDate,
    /// Store-assigned creation time
    pub created_at: DateTime<Utc>,
    /// Store-assigned modification time
    pub updated_at: DateTime<Utc>,
}

impl Donation {
    /// Name to show publicly: the stored name, or [`ANONYMOUS_DONOR`] when the
    /// anonymous flag is set, whatever the category.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.is_anonymous {
            ANONYMOUS_DONOR
        } else {
            &self.donor_name
        }
    }
}

impl TryFrom<donation::Model> for Donation {
    type Error = Error;

    fn try_from(model: donation::Model) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidRecord {
            kind: "donation",
            id: model.id.clone(),
            reason,
        };
        let amount = Money::from_minor(model.amount_minor);
        if !amount.is_positive() {
            return Err(invalid(format!("non-positive amount {amount}")));
        }
        if !amount.is_in_range() {
            return Err(invalid(format!("amount {amount} out of range")));
        }
        let category = model
            .category
            .parse::<DonationCategory>()
            .map_err(|e| invalid(e.to_string()))?;
        let payment_method = model
            .payment_method
            .parse::<PaymentMethod>()
            .map_err(|e| invalid(e.to_string()))?;
        if !model.is_anonymous && model.donor_name.trim().is_empty() {
            return Err(invalid("missing donor name".to_string()));
        }

        Ok(Self {
            id: model.id,
            donor_name: model.donor_name,
            donor_phone: model.donor_phone,
            donor_email: model.donor_email,
            amount,
            category,
            is_anonymous: model.is_anonymous,
            payment_method,
            notes: model.notes,
            donation_date: model.donation_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// An expense as read back from the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Expense {
    /// Opaque store-assigned id
    pub id: String,
    /// Short title
    pub title: String,
    /// Longer description
    pub description: Option<String>,
    /// Always positive
    pub amount: Money,
    /// Expense category
    pub category: ExpenseCategory,
    /// Who was paid
    pub vendor_name: Option<String>,
    /// Receipt reference
    pub receipt_number: Option<String>,
    /// When the expense was incurred
    pub expense_date: NaiveDate,
    /// Store-assigned creation time
    pub created_at: DateTime<Utc>,
    /// Store-assigned modification time
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<expense::Model> for Expense {
    type Error = Error;

    fn try_from(model: expense::Model) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidRecord {
            kind: "expense",
            id: model.id.clone(),
            reason,
        };
        let amount = Money::from_minor(model.amount_minor);
        if !amount.is_positive() {
            return Err(invalid(format!("non-positive amount {amount}")));
        }
        if !amount.is_in_range() {
            return Err(invalid(format!("amount {amount} out of range")));
        }
        let category = model
            .category
            .parse::<ExpenseCategory>()
            .map_err(|e| invalid(e.to_string()))?;
        if model.title.trim().is_empty() {
            return Err(invalid("missing title".to_string()));
        }

        Ok(Self {
            id: model.id,
            title: model.title,
            description: model.description,
            amount,
            category,
            vendor_name: model.vendor_name,
            receipt_number: model.receipt_number,
            expense_date: model.expense_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// The festival settings singleton.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FestivalSettings {
    /// Festival name
    pub festival_name: String,
    /// Festival year
    pub festival_year: i32,
    /// Venue
    pub location: String,
    /// Public description
    pub description: String,
    /// First day
    pub start_date: NaiveDate,
    /// Last day
    pub end_date: NaiveDate,
    /// Fundraising target; zero means "no goal"
    pub fundraising_goal: Money,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<festival_settings::Model> for FestivalSettings {
    type Error = Error;

    fn try_from(model: festival_settings::Model) -> Result<Self> {
        let fundraising_goal = Money::from_minor(model.fundraising_goal_minor);
        let reason = if fundraising_goal.is_negative() {
            Some("negative fundraising goal")
        } else if !fundraising_goal.is_in_range() {
            Some("fundraising goal out of range")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(Error::InvalidRecord {
                kind: "festival settings",
                id: model.id.to_string(),
                reason: reason.to_string(),
            });
        }
        Ok(Self {
            festival_name: model.festival_name,
            festival_year: model.festival_year,
            location: model.location,
            description: model.description,
            start_date: model.start_date,
            end_date: model.end_date,
            fundraising_goal,
            updated_at: model.updated_at,
        })
    }
}

/// Trims a string and maps blanks to `None`.
#[must_use]
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Fields an admin supplies when adding or editing a donation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DonationInput {
    /// Donor name; required unless `is_anonymous`
    pub donor_name: String,
    /// Contact phone
    pub donor_phone: Option<String>,
    /// Contact email
    pub donor_email: Option<String>,
    /// Must be positive
    pub amount: Money,
    /// Donor category
    pub category: DonationCategory,
    /// Hide the donor name in listings
    pub is_anonymous: bool,
    /// Payment method
    pub payment_method: PaymentMethod,
    /// Free-text notes
    pub notes: Option<String>,
    /// When the donation was received
    pub donation_date: NaiveDate,
}

impl DonationInput {
    /// A cash donation from an individual with no contact details.
    #[must_use]
    pub fn new(donor_name: impl Into<String>, amount: Money, donation_date: NaiveDate) -> Self {
        Self {
            donor_name: donor_name.into(),
            donor_phone: None,
            donor_email: None,
            amount,
            category: DonationCategory::Individual,
            is_anonymous: false,
            payment_method: PaymentMethod::Cash,
            notes: None,
            donation_date,
        }
    }

    /// Checks every field and returns the normalized input.
    ///
    /// # Errors
    /// * [`Error::InvalidAmount`] if the amount is not positive or out of range
    /// * [`Error::Validation`] for a missing donor name or malformed email
    pub fn validate(self) -> Result<Self> {
        if !self.amount.is_positive() || !self.amount.is_in_range() {
            return Err(Error::InvalidAmount {
                amount: self.amount.to_major(),
            });
        }
        let donor_name = self.donor_name.trim().to_string();
        if donor_name.is_empty() && !self.is_anonymous {
            return Err(Error::validation(
                "donor_name",
                "donor name is required unless the donation is anonymous",
            ));
        }
        let donor_email = normalize_optional(self.donor_email);
        if let Some(email) = &donor_email {
            if !email.contains('@') {
                return Err(Error::validation(
                    "donor_email",
                    format!("'{email}' is not an email address"),
                ));
            }
        }

        Ok(Self {
            donor_name,
            donor_phone: normalize_optional(self.donor_phone),
            donor_email,
            notes: normalize_optional(self.notes),
            ..self
        })
    }
}

/// Fields an admin supplies when adding or editing an expense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseInput {
    /// Required title
    pub title: String,
    /// Longer description
    pub description: Option<String>,
    /// Must be positive
    pub amount: Money,
    /// Expense category
    pub category: ExpenseCategory,
    /// Who was paid
    pub vendor_name: Option<String>,
    /// Receipt reference
    pub receipt_number: Option<String>,
    /// When the expense was incurred
    pub expense_date: NaiveDate,
}

impl ExpenseInput {
    /// An expense with only the required fields set.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        amount: Money,
        category: ExpenseCategory,
        expense_date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            amount,
            category,
            vendor_name: None,
            receipt_number: None,
            expense_date,
        }
    }

    /// Checks every field and returns the normalized input.
    ///
    /// # Errors
    /// * [`Error::InvalidAmount`] if the amount is not positive or out of range
    /// * [`Error::Validation`] if the title is blank
    pub fn validate(self) -> Result<Self> {
        if !self.amount.is_positive() || !self.amount.is_in_range() {
            return Err(Error::InvalidAmount {
                amount: self.amount.to_major(),
            });
        }
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(Error::validation("title", "expense title is required"));
        }

        Ok(Self {
            title,
            description: normalize_optional(self.description),
            vendor_name: normalize_optional(self.vendor_name),
            receipt_number: normalize_optional(self.receipt_number),
            ..self
        })
    }
}

/// Fields written by the settings upsert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsInput {
    /// Festival name
    pub festival_name: String,
    /// Festival year, at least [`MIN_FESTIVAL_YEAR`]
    pub festival_year: i32,
    /// Venue
    pub location: String,
    /// Public description
    pub description: String,
    /// First day
    pub start_date: NaiveDate,
    /// Last day, not before `start_date`
    pub end_date: NaiveDate,
    /// Non-negative target
    pub fundraising_goal: Money,
}

impl SettingsInput {
    /// Checks every field and returns the normalized input.
    ///
    /// # Errors
    /// [`Error::Validation`] or [`Error::InvalidAmount`] describing the first bad field.
    pub fn validate(self) -> Result<Self> {
        let festival_name = self.festival_name.trim().to_string();
        if festival_name.is_empty() {
            return Err(Error::validation(
                "festival_name",
                "festival name is required",
            ));
        }
        if self.festival_year < MIN_FESTIVAL_YEAR {
            return Err(Error::validation(
                "festival_year",
                format!("year must be {MIN_FESTIVAL_YEAR} or later"),
            ));
        }
        if self.end_date < self.start_date {
            return Err(Error::validation(
                "end_date",
                "end date is before the start date",
            ));
        }
        if self.fundraising_goal.is_negative() || !self.fundraising_goal.is_in_range() {
            return Err(Error::InvalidAmount {
                amount: self.fundraising_goal.to_major(),
            });
        }

        Ok(Self {
            festival_name,
            location: self.location.trim().to_string(),
            description: self.description.trim().to_string(),
            ..self
        })
    }
}

impl From<&Donation> for DonationInput {
    fn from(donation: &Donation) -> Self {
        Self {
            donor_name: donation.donor_name.clone(),
            donor_phone: donation.donor_phone.clone(),
            donor_email: donation.donor_email.clone(),
            amount: donation.amount,
            category: donation.category,
            is_anonymous: donation.is_anonymous,
            payment_method: donation.payment_method,
            notes: donation.notes.clone(),
            donation_date: donation.donation_date,
        }
    }
}

impl From<&Expense> for ExpenseInput {
    fn from(expense: &Expense) -> Self {
        Self {
            title: expense.title.clone(),
            description: expense.description.clone(),
            amount: expense.amount,
            category: expense.category,
            vendor_name: expense.vendor_name.clone(),
            receipt_number: expense.receipt_number.clone(),
            expense_date: expense.expense_date,
        }
    }
}

impl From<&FestivalSettings> for SettingsInput {
    fn from(settings: &FestivalSettings) -> Self {
        Self {
            festival_name: settings.festival_name.clone(),
            festival_year: settings.festival_year,
            location: settings.location.clone(),
            description: settings.description.clone(),
            start_date: settings.start_date,
            end_date: settings.end_date,
            fundraising_goal: settings.fundraising_goal,
        }
    }
}
