//! Shared test utilities for the festival ledger.
//!
//! This module provides helpers for setting up in-memory databases, building
//! records with sensible defaults, and a scripted [`LedgerStore`] whose reads can
//! be delayed or failed on demand for engine tests.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        donation, expense,
        money::Money,
        records::{
            Donation, DonationCategory, DonationInput, Expense, ExpenseCategory, ExpenseInput,
            FestivalSettings, PaymentMethod, SettingsInput,
        },
    },
    errors::{Error, Result},
    store::{
        ChangeEvent, ChangeFeed, ChangeKind, ChangeSubscription, ChangeTable, LedgerStore,
        SeaOrmStore,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sea_orm::DatabaseConnection;
use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tracing_subscriber::EnvFilter;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all database tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A [`SeaOrmStore`] over a fresh in-memory database.
pub async fn setup_test_store() -> Result<SeaOrmStore> {
    Ok(SeaOrmStore::new(setup_test_db().await?, 16))
}

/// Installs a test-writer subscriber; safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// A day in August 2025, the month the sample festival runs.
pub fn test_date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, day).unwrap()
}

fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap()
}

/// An in-memory donation; no database involved.
///
/// # Defaults
/// * donor: "Donor", Individual, Cash, not anonymous
/// * date: 27 August 2025
pub fn sample_donation(id: &str, amount: Money) -> Donation {
    Donation {
        id: id.to_string(),
        donor_name: "Donor".to_string(),
        donor_phone: None,
        donor_email: None,
        amount,
        category: DonationCategory::Individual,
        is_anonymous: false,
        payment_method: PaymentMethod::Cash,
        notes: None,
        donation_date: test_date(27),
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

/// An in-memory expense in the Decorations category.
pub fn sample_expense(id: &str, amount: Money) -> Expense {
    Expense {
        id: id.to_string(),
        title: "Expense".to_string(),
        description: None,
        amount,
        category: ExpenseCategory::Decorations,
        vendor_name: None,
        receipt_number: None,
        expense_date: test_date(26),
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

/// In-memory settings with the given goal.
pub fn sample_settings(goal_rupees: i64) -> FestivalSettings {
    FestivalSettings {
        festival_name: "Vinayaka Chavithi".to_string(),
        festival_year: 2025,
        location: "Community Hall".to_string(),
        description: "Test festival".to_string(),
        start_date: test_date(27),
        end_date: test_date(31),
        fundraising_goal: Money::from_major_units(goal_rupees),
        updated_at: fixed_timestamp(),
    }
}

/// Creates a donation in the database with default category and method.
pub async fn create_test_donation(
    db: &DatabaseConnection,
    name: &str,
    rupees: i64,
) -> Result<Donation> {
    donation::create_donation(
        db,
        DonationInput::new(name, Money::from_major_units(rupees), test_date(27)),
    )
    .await
}

/// Creates a Decorations expense in the database.
pub async fn create_test_expense(
    db: &DatabaseConnection,
    title: &str,
    rupees: i64,
) -> Result<Expense> {
    expense::create_expense(
        db,
        ExpenseInput::new(
            title,
            Money::from_major_units(rupees),
            ExpenseCategory::Decorations,
            test_date(26),
        ),
    )
    .await
}

/// Valid settings input with the given goal.
pub fn test_settings_input(goal_rupees: i64) -> SettingsInput {
    SettingsInput::from(&sample_settings(goal_rupees))
}

fn connection_reset() -> Error {
    Error::Database(sea_orm::DbErr::Custom("connection reset".to_string()))
}

/// One scripted answer to a read.
struct Scripted<T> {
    delay: Duration,
    outcome: Result<T>,
}

/// Fake [`LedgerStore`] for engine and scheduler tests.
///
/// Reads return the current in-memory contents unless a scripted response has
/// been queued, in which case the next read sleeps for the scripted delay and
/// returns the scripted outcome instead. Writes mutate the in-memory lists and
/// publish change events like the real store.
pub struct ScriptedStore {
    donations: Mutex<Vec<Donation>>,
    expenses: Mutex<Vec<Expense>>,
    settings: Mutex<Option<FestivalSettings>>,
    donation_script: Mutex<VecDeque<Scripted<Vec<Donation>>>>,
    expense_script: Mutex<VecDeque<Scripted<Vec<Expense>>>>,
    settings_script: Mutex<VecDeque<Scripted<Option<FestivalSettings>>>>,
    donation_reads: AtomicUsize,
    feed: ChangeFeed,
}

impl Default for ScriptedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedStore {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            donations: Mutex::new(Vec::new()),
            expenses: Mutex::new(Vec::new()),
            settings: Mutex::new(None),
            donation_script: Mutex::new(VecDeque::new()),
            expense_script: Mutex::new(VecDeque::new()),
            settings_script: Mutex::new(VecDeque::new()),
            donation_reads: AtomicUsize::new(0),
            feed: ChangeFeed::new(16),
        }
    }

    /// Store preloaded with records.
    pub fn with_records(
        donations: Vec<Donation>,
        expenses: Vec<Expense>,
        settings: Option<FestivalSettings>,
    ) -> Self {
        let store = Self::new();
        *store.donations.lock().unwrap() = donations;
        *store.expenses.lock().unwrap() = expenses;
        *store.settings.lock().unwrap() = settings;
        store
    }

    /// Queues a delayed donation-list response.
    pub fn script_donations(&self, delay: Duration, donations: Vec<Donation>) {
        self.donation_script.lock().unwrap().push_back(Scripted {
            delay,
            outcome: Ok(donations),
        });
    }

    /// Makes the next donation-list read fail after `delay`.
    pub fn fail_next_donations(&self, delay: Duration) {
        self.donation_script.lock().unwrap().push_back(Scripted {
            delay,
            outcome: Err(connection_reset()),
        });
    }

    /// Queues a delayed expense-list response.
    pub fn script_expenses(&self, delay: Duration, expenses: Vec<Expense>) {
        self.expense_script.lock().unwrap().push_back(Scripted {
            delay,
            outcome: Ok(expenses),
        });
    }

    /// Queues a delayed settings response.
    pub fn script_settings(&self, delay: Duration, settings: Option<FestivalSettings>) {
        self.settings_script.lock().unwrap().push_back(Scripted {
            delay,
            outcome: Ok(settings),
        });
    }

    /// Makes the next settings read fail after `delay`.
    pub fn fail_next_settings(&self, delay: Duration) {
        self.settings_script.lock().unwrap().push_back(Scripted {
            delay,
            outcome: Err(connection_reset()),
        });
    }

    /// How many times the donation list has been read.
    pub fn donation_reads(&self) -> usize {
        self.donation_reads.load(Ordering::SeqCst)
    }

    /// Replaces the current donations without publishing a change.
    pub fn set_donations(&self, donations: Vec<Donation>) {
        *self.donations.lock().unwrap() = donations;
    }

    fn notify(&self, table: ChangeTable, kind: ChangeKind) {
        self.feed.publish(ChangeEvent::new(table, kind));
    }
}

#[async_trait]
impl LedgerStore for ScriptedStore {
    async fn list_donations(&self) -> Result<Vec<Donation>> {
        self.donation_reads.fetch_add(1, Ordering::SeqCst);
        let scripted = self.donation_script.lock().unwrap().pop_front();
        match scripted {
            Some(Scripted { delay, outcome }) => {
                tokio::time::sleep(delay).await;
                outcome
            }
            None => Ok(self.donations.lock().unwrap().clone()),
        }
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let scripted = self.expense_script.lock().unwrap().pop_front();
        match scripted {
            Some(Scripted { delay, outcome }) => {
                tokio::time::sleep(delay).await;
                outcome
            }
            None => Ok(self.expenses.lock().unwrap().clone()),
        }
    }

    async fn get_settings(&self) -> Result<Option<FestivalSettings>> {
        let scripted = self.settings_script.lock().unwrap().pop_front();
        match scripted {
            Some(Scripted { delay, outcome }) => {
                tokio::time::sleep(delay).await;
                outcome
            }
            None => Ok(self.settings.lock().unwrap().clone()),
        }
    }

    async fn get_donation(&self, id: &str) -> Result<Option<Donation>> {
        Ok(self.donations.lock().unwrap().iter().find(|d| d.id == id).cloned())
    }

    async fn get_expense(&self, id: &str) -> Result<Option<Expense>> {
        Ok(self.expenses.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn create_donation(&self, input: DonationInput) -> Result<Donation> {
        let input = input.validate()?;
        let id = format!("d-{}", self.donations.lock().unwrap().len() + 1);
        let donation = Donation {
            id,
            donor_name: input.donor_name,
            donor_phone: input.donor_phone,
            donor_email: input.donor_email,
            amount: input.amount,
            category: input.category,
            is_anonymous: input.is_anonymous,
            payment_method: input.payment_method,
            notes: input.notes,
            donation_date: input.donation_date,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        {
            let mut donations = self.donations.lock().unwrap();
            donations.push(donation.clone());
            donations.sort_by(|a, b| b.donation_date.cmp(&a.donation_date));
        }
        self.notify(ChangeTable::Donations, ChangeKind::Insert);
        Ok(donation)
    }

    async fn update_donation(&self, id: &str, input: DonationInput) -> Result<Donation> {
        let input = input.validate()?;
        let updated = {
            let mut donations = self.donations.lock().unwrap();
            let existing = donations
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or_else(|| Error::NotFound {
                    kind: "donation",
                    id: id.to_string(),
                })?;
            existing.donor_name = input.donor_name;
            existing.donor_phone = input.donor_phone;
            existing.donor_email = input.donor_email;
            existing.notes = input.notes;
            existing.amount = input.amount;
            existing.category = input.category;
            existing.is_anonymous = input.is_anonymous;
            existing.payment_method = input.payment_method;
            existing.donation_date = input.donation_date;
            existing.updated_at = Utc::now();
            existing.clone()
        };
        self.notify(ChangeTable::Donations, ChangeKind::Update);
        Ok(updated)
    }

    async fn delete_donation(&self, id: &str) -> Result<()> {
        {
            let mut donations = self.donations.lock().unwrap();
            let before = donations.len();
            donations.retain(|d| d.id != id);
            if donations.len() == before {
                return Err(Error::NotFound {
                    kind: "donation",
                    id: id.to_string(),
                });
            }
        }
        self.notify(ChangeTable::Donations, ChangeKind::Delete);
        Ok(())
    }

    async fn create_expense(&self, input: ExpenseInput) -> Result<Expense> {
        let input = input.validate()?;
        let id = format!("e-{}", self.expenses.lock().unwrap().len() + 1);
        let expense = Expense {
            id,
            title: input.title,
            description: input.description,
            amount: input.amount,
            category: input.category,
            vendor_name: input.vendor_name,
            receipt_number: input.receipt_number,
            expense_date: input.expense_date,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.expenses.lock().unwrap().push(expense.clone());
        self.notify(ChangeTable::Expenses, ChangeKind::Insert);
        Ok(expense)
    }

    async fn update_expense(&self, id: &str, input: ExpenseInput) -> Result<Expense> {
        let input = input.validate()?;
        let updated = {
            let mut expenses = self.expenses.lock().unwrap();
            let existing = expenses
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| Error::NotFound {
                    kind: "expense",
                    id: id.to_string(),
                })?;
            existing.title = input.title;
            existing.description = input.description;
            existing.vendor_name = input.vendor_name;
            existing.receipt_number = input.receipt_number;
            existing.amount = input.amount;
            existing.category = input.category;
            existing.expense_date = input.expense_date;
            existing.updated_at = Utc::now();
            existing.clone()
        };
        self.notify(ChangeTable::Expenses, ChangeKind::Update);
        Ok(updated)
    }

    async fn delete_expense(&self, id: &str) -> Result<()> {
        {
            let mut expenses = self.expenses.lock().unwrap();
            let before = expenses.len();
            expenses.retain(|e| e.id != id);
            if expenses.len() == before {
                return Err(Error::NotFound {
                    kind: "expense",
                    id: id.to_string(),
                });
            }
        }
        self.notify(ChangeTable::Expenses, ChangeKind::Delete);
        Ok(())
    }

    async fn upsert_settings(&self, input: SettingsInput) -> Result<FestivalSettings> {
        let input = input.validate()?;
        let settings = FestivalSettings {
            festival_name: input.festival_name,
            festival_year: input.festival_year,
            location: input.location,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            fundraising_goal: input.fundraising_goal,
            updated_at: Utc::now(),
        };
        *self.settings.lock().unwrap() = Some(settings.clone());
        self.notify(ChangeTable::Settings, ChangeKind::Update);
        Ok(settings)
    }

    fn subscribe_to_changes(&self) -> ChangeSubscription {
        self.feed.subscribe()
    }
}
