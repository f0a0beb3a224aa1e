use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    /// ISO dates ("YYYY-MM-DD") the habit was checked off, stored as a
    /// JSON array column.
    pub completed_dates: Vec<String>,
    pub is_archived: bool,
    pub archived_at: Option<DateTime<Utc>>,
    pub is_paused: bool,
    pub paused_at: Option<DateTime<Utc>>,
}

impl Habit {
    /// Active habits appear on the main dashboard section.
    pub fn is_active(&self) -> bool {
        !self.is_archived && !self.is_paused
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        let key = date.to_string();
        self.completed_dates.iter().any(|d| *d == key)
    }

    /// Flip the completion mark for `date`: absent dates are added,
    /// present ones removed. Returns the updated list.
    pub fn toggled_dates(&self, date: NaiveDate) -> Vec<String> {
        let key = date.to_string();
        let mut dates = self.completed_dates.clone();
        match dates.iter().position(|d| *d == key) {
            Some(idx) => {
                dates.remove(idx);
            }
            None => dates.push(key),
        }
        dates
    }
}

/// Fields supplied when creating a habit; the storage layer fills in
/// id, timestamps and lifecycle flags.
#[derive(Debug, Clone, Default)]
pub struct NewHabit {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodEntry {
    pub id: i64,
    pub mood: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub payer: String,
    pub participants: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Per-person share; computed, never stored. Zero participants
    /// cannot be inserted, but guard the division regardless.
    pub fn share_per_person(&self) -> f64 {
        if self.participants.is_empty() {
            return 0.0;
        }
        self.amount / self.participants.len() as f64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub prep_time: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    pub email: String,
    pub theme: Option<String>,
    pub has_seen_tutorial: bool,
}
