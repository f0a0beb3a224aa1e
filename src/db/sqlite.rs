use crate::db::models::{Expense, Habit, MoodEntry, NewHabit, Recipe, UserPreferences};
use crate::db::schema::SQLITE_INIT;
use crate::error::TrackleError;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct TrackerStorage {
    pool: SqlitePool,
}

impl TrackerStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), TrackleError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    // === habits ===

    pub async fn insert_habit(&self, habit: NewHabit) -> Result<i64, TrackleError> {
        let created_at = Utc::now().to_rfc3339();
        let res = sqlx::query(
            r#"INSERT INTO habits (name, description, category, created_at, completed_dates)
               VALUES (?, ?, ?, ?, '[]')"#,
        )
        .bind(habit.name)
        .bind(habit.description)
        .bind(habit.category)
        .bind(created_at)
        .execute(&self.pool)
        .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn get_habit(&self, id: i64) -> Result<Habit, TrackleError> {
        let row = sqlx::query(
            r#"SELECT id, name, description, category, created_at, completed_dates,
               is_archived, archived_at, is_paused, paused_at
               FROM habits WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => Self::row_to_habit(row),
            None => Err(TrackleError::NotFound("habit")),
        }
    }

    /// All habits that belong on the dashboard (active and paused
    /// sections); archived rows are excluded regardless of pause state.
    pub async fn list_dashboard_habits(&self) -> Result<Vec<Habit>, TrackleError> {
        let rows = sqlx::query(
            r#"SELECT id, name, description, category, created_at, completed_dates,
               is_archived, archived_at, is_paused, paused_at
               FROM habits WHERE is_archived = 0 ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_habit).collect()
    }

    pub async fn list_archived_habits(&self) -> Result<Vec<Habit>, TrackleError> {
        let rows = sqlx::query(
            r#"SELECT id, name, description, category, created_at, completed_dates,
               is_archived, archived_at, is_paused, paused_at
               FROM habits WHERE is_archived = 1 ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_habit).collect()
    }

    /// Rename a habit, optionally replacing description and category.
    pub async fn update_habit(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
        category: Option<&str>,
    ) -> Result<(), TrackleError> {
        let res = sqlx::query(
            r#"UPDATE habits SET
                name = ?,
                description = COALESCE(?, description),
                category = COALESCE(?, category)
              WHERE id = ?"#,
        )
        .bind(name)
        .bind(description)
        .bind(category)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if res.rows_affected() == 0 {
            return Err(TrackleError::NotFound("habit"));
        }
        Ok(())
    }

    pub async fn delete_habit(&self, id: i64) -> Result<(), TrackleError> {
        let res = sqlx::query("DELETE FROM habits WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(TrackleError::NotFound("habit"));
        }
        Ok(())
    }

    pub async fn set_completed_dates(
        &self,
        id: i64,
        dates: &[String],
    ) -> Result<(), TrackleError> {
        let json = serde_json::to_string(dates)?;
        let res = sqlx::query("UPDATE habits SET completed_dates = ? WHERE id = ?")
            .bind(json)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(TrackleError::NotFound("habit"));
        }
        Ok(())
    }

    /// Archiving stamps `archived_at`; unarchiving clears it.
    pub async fn set_archived(&self, id: i64, archived: bool) -> Result<(), TrackleError> {
        let at = archived.then(|| Utc::now().to_rfc3339());
        let res = sqlx::query("UPDATE habits SET is_archived = ?, archived_at = ? WHERE id = ?")
            .bind(archived as i64)
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(TrackleError::NotFound("habit"));
        }
        Ok(())
    }

    pub async fn set_paused(&self, id: i64, paused: bool) -> Result<(), TrackleError> {
        let at = paused.then(|| Utc::now().to_rfc3339());
        let res = sqlx::query("UPDATE habits SET is_paused = ?, paused_at = ? WHERE id = ?")
            .bind(paused as i64)
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(TrackleError::NotFound("habit"));
        }
        Ok(())
    }

    fn row_to_habit(row: SqliteRow) -> Result<Habit, TrackleError> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let description: Option<String> = row.try_get("description")?;
        let category: Option<String> = row.try_get("category")?;
        let created_at_str: String = row.try_get("created_at")?;
        let completed_json: String = row.try_get("completed_dates")?;
        let is_archived_i: i64 = row.try_get("is_archived")?;
        let archived_at_str: Option<String> = row.try_get("archived_at")?;
        let is_paused_i: i64 = row.try_get("is_paused")?;
        let paused_at_str: Option<String> = row.try_get("paused_at")?;

        let completed_dates: Vec<String> = serde_json::from_str(&completed_json)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Habit {
            id,
            name,
            description,
            category,
            created_at: Self::parse_rfc3339(&created_at_str)?,
            completed_dates,
            is_archived: is_archived_i != 0,
            archived_at: archived_at_str
                .as_deref()
                .map(Self::parse_rfc3339)
                .transpose()?,
            is_paused: is_paused_i != 0,
            paused_at: paused_at_str
                .as_deref()
                .map(Self::parse_rfc3339)
                .transpose()?,
        })
    }

    fn parse_rfc3339(s: &str) -> Result<DateTime<Utc>, TrackleError> {
        let dt = chrono::DateTime::parse_from_rfc3339(s)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(dt.with_timezone(&Utc))
    }

    // === mood entries ===

    pub async fn insert_mood(
        &self,
        mood: &str,
        notes: Option<&str>,
    ) -> Result<i64, TrackleError> {
        let res = sqlx::query("INSERT INTO mood_entries (mood, notes, created_at) VALUES (?, ?, ?)")
            .bind(mood)
            .bind(notes)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn list_moods(&self) -> Result<Vec<MoodEntry>, TrackleError> {
        let rows =
            sqlx::query("SELECT id, mood, notes, created_at FROM mood_entries ORDER BY id DESC")
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter()
            .map(|row| {
                let created_at_str: String = row.try_get("created_at")?;
                Ok(MoodEntry {
                    id: row.try_get("id")?,
                    mood: row.try_get("mood")?,
                    notes: row.try_get("notes")?,
                    created_at: Self::parse_rfc3339(&created_at_str)?,
                })
            })
            .collect()
    }

    pub async fn delete_mood(&self, id: i64) -> Result<(), TrackleError> {
        let res = sqlx::query("DELETE FROM mood_entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(TrackleError::NotFound("mood entry"));
        }
        Ok(())
    }

    // === expenses ===

    pub async fn insert_expense(
        &self,
        description: &str,
        amount: f64,
        payer: &str,
        participants: &[String],
    ) -> Result<i64, TrackleError> {
        let participants_json = serde_json::to_string(participants)?;
        let res = sqlx::query(
            r#"INSERT INTO expenses (description, amount, payer, participants, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(description)
        .bind(amount)
        .bind(payer)
        .bind(participants_json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn list_expenses(&self) -> Result<Vec<Expense>, TrackleError> {
        let rows = sqlx::query(
            "SELECT id, description, amount, payer, participants, created_at FROM expenses ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|row| {
                let participants_json: String = row.try_get("participants")?;
                let participants: Vec<String> = serde_json::from_str(&participants_json)
                    .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
                let created_at_str: String = row.try_get("created_at")?;
                Ok(Expense {
                    id: row.try_get("id")?,
                    description: row.try_get("description")?,
                    amount: row.try_get("amount")?,
                    payer: row.try_get("payer")?,
                    participants,
                    created_at: Self::parse_rfc3339(&created_at_str)?,
                })
            })
            .collect()
    }

    pub async fn delete_expense(&self, id: i64) -> Result<(), TrackleError> {
        let res = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(TrackleError::NotFound("expense"));
        }
        Ok(())
    }

    // === recipes ===

    pub async fn insert_recipe(
        &self,
        name: &str,
        ingredients: Option<&str>,
        instructions: Option<&str>,
        prep_time: Option<i64>,
    ) -> Result<i64, TrackleError> {
        let res = sqlx::query(
            r#"INSERT INTO recipes (name, ingredients, instructions, prep_time, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(name)
        .bind(ingredients)
        .bind(instructions)
        .bind(prep_time)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, TrackleError> {
        let rows = sqlx::query(
            "SELECT id, name, ingredients, instructions, prep_time, created_at FROM recipes ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|row| {
                let created_at_str: String = row.try_get("created_at")?;
                Ok(Recipe {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    ingredients: row.try_get("ingredients")?,
                    instructions: row.try_get("instructions")?,
                    prep_time: row.try_get("prep_time")?,
                    created_at: Self::parse_rfc3339(&created_at_str)?,
                })
            })
            .collect()
    }

    pub async fn delete_recipe(&self, id: i64) -> Result<(), TrackleError> {
        let res = sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(TrackleError::NotFound("recipe"));
        }
        Ok(())
    }

    // === user preferences ===

    pub async fn get_preferences(
        &self,
        email: &str,
    ) -> Result<Option<UserPreferences>, TrackleError> {
        let row = sqlx::query(
            "SELECT email, theme, has_seen_tutorial FROM user_preferences WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|row| {
            let seen_i: i64 = row.try_get("has_seen_tutorial")?;
            Ok(UserPreferences {
                email: row.try_get("email")?,
                theme: row.try_get("theme")?,
                has_seen_tutorial: seen_i != 0,
            })
        })
        .transpose()
    }

    /// Upsert by email; only replaces the theme column.
    pub async fn upsert_theme(&self, email: &str, theme: &str) -> Result<(), TrackleError> {
        sqlx::query(
            r#"INSERT INTO user_preferences (email, theme) VALUES (?, ?)
               ON CONFLICT(email) DO UPDATE SET theme = excluded.theme"#,
        )
        .bind(email)
        .bind(theme)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn mark_tutorial_seen(&self, email: &str) -> Result<(), TrackleError> {
        sqlx::query(
            r#"INSERT INTO user_preferences (email, has_seen_tutorial) VALUES (?, 1)
               ON CONFLICT(email) DO UPDATE SET has_seen_tutorial = 1"#,
        )
        .bind(email)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
