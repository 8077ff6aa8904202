use crate::config::DatabaseSettings;
use crate::core::conflict::ConflictWindow;
use crate::core::eligibility::EligibilityPredicate;
use crate::models::{BookedSession, CounsellorId, CounsellorProfile, GenderPreference, Role, SessionStatus, WeeklySchedule};
use crate::services::repository::{CounsellorRepository, RepositoryError, SessionRepository};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::str::FromStr;
use std::time::Duration;

/// Role, gender and category clauses; ordered by id so repeated reads agree
const ELIGIBLE_COUNSELLORS_SQL: &str = r#"
    SELECT id, role, gender_preference, preferred_category_ids, schedule
    FROM users
    WHERE role = $1
      AND gender_preference = ANY($2)
      AND ($3::text IS NULL OR $3 = ANY(preferred_category_ids))
    ORDER BY id
"#;

const SESSIONS_IN_WINDOW_SQL: &str = r#"
    SELECT id, counsellor_id, start_time, end_time, status
    FROM sessions
    WHERE counsellor_id = ANY($1)
      AND start_time BETWEEN $2 AND $3
    ORDER BY start_time, id
"#;

/// Read-only PostgreSQL access to the user and session stores.
///
/// Both tables belong to the surrounding application; this client never
/// writes and never runs migrations. Expected columns:
///
/// - `users(id, role, gender_preference, preferred_category_ids text[], schedule jsonb)`
/// - `sessions(id, counsellor_id, start_time timestamptz, end_time timestamptz, status)`
#[derive(Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, RepositoryError> {
        tracing::info!(
            "Connecting to PostgreSQL (max: {} connections)",
            settings.max_connections
        );

        Self::new(
            &settings.url,
            settings.max_connections,
            settings.min_connections,
            Duration::from_secs(settings.acquire_timeout_secs),
        )
        .await
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, RepositoryError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Parse a text column into one of the domain enums
fn decode_enum<T>(column: &str, value: &str) -> Result<T, RepositoryError>
where
    T: FromStr<Err = String>,
{
    value
        .parse::<T>()
        .map_err(|e| RepositoryError::Decode(format!("{}: {}", column, e)))
}

fn decode_counsellor(row: &PgRow) -> Result<CounsellorProfile, RepositoryError> {
    let role: String = row.try_get("role")?;
    let gender: String = row.try_get("gender_preference")?;
    let categories: Vec<String> = row.try_get("preferred_category_ids")?;
    let schedule: Option<Json<WeeklySchedule>> = row.try_get("schedule")?;

    Ok(CounsellorProfile {
        id: row.try_get("id")?,
        role: decode_enum::<Role>("role", &role)?,
        gender_preference: decode_enum::<GenderPreference>("gender_preference", &gender)?,
        preferred_category_ids: categories.into_iter().collect(),
        schedule: schedule.map(|Json(s)| s).unwrap_or_default(),
    })
}

fn decode_session(row: &PgRow) -> Result<BookedSession, RepositoryError> {
    let status: String = row.try_get("status")?;

    Ok(BookedSession {
        id: row.try_get("id")?,
        counsellor_id: row.try_get("counsellor_id")?,
        start_instant: row.try_get("start_time")?,
        end_instant: row.try_get("end_time")?,
        status: decode_enum::<SessionStatus>("status", &status)?,
    })
}

#[async_trait]
impl CounsellorRepository for PostgresRepository {
    /// Role, gender and category clauses run in SQL; the schedule clause is
    /// evaluated on the decoded JSONB schedule.
    async fn find_eligible(&self, predicate: &EligibilityPredicate) -> Result<Vec<CounsellorProfile>, RepositoryError> {
        let genders: Vec<String> = predicate
            .accepted_genders
            .iter()
            .map(|g| g.as_str().to_string())
            .collect();

        let rows = sqlx::query(ELIGIBLE_COUNSELLORS_SQL)
            .bind(predicate.role.as_str())
            .bind(&genders)
            .bind(predicate.category_id.as_deref())
            .fetch_all(&self.pool)
            .await?;

        let fetched = rows.len();
        let mut eligible = Vec::with_capacity(fetched);
        for row in &rows {
            let profile = decode_counsellor(row)?;
            if predicate.matches_schedule(&profile) {
                eligible.push(profile);
            }
        }

        tracing::debug!(
            "{} of {} counsellors have an opening on {} from {}",
            eligible.len(),
            fetched,
            predicate.weekday,
            predicate.earliest_start
        );

        Ok(eligible)
    }
}

#[async_trait]
impl SessionRepository for PostgresRepository {
    async fn find_by_counsellors_in_window(
        &self,
        counsellor_ids: &[CounsellorId],
        window: &ConflictWindow,
    ) -> Result<Vec<BookedSession>, RepositoryError> {
        let rows = sqlx::query(SESSIONS_IN_WINDOW_SQL)
            .bind(counsellor_ids)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(decode_session).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_enum_accepts_stored_values() {
        assert_eq!(decode_enum::<Role>("role", "counsellor").unwrap(), Role::Counsellor);
        assert_eq!(
            decode_enum::<GenderPreference>("gender_preference", "both").unwrap(),
            GenderPreference::Both
        );
        assert_eq!(
            decode_enum::<SessionStatus>("status", "cancelled").unwrap(),
            SessionStatus::Cancelled
        );
    }

    #[test]
    fn test_decode_enum_names_the_bad_column() {
        let err = decode_enum::<GenderPreference>("gender_preference", "any").unwrap_err();
        assert!(matches!(err, RepositoryError::Decode(ref msg) if msg.starts_with("gender_preference")));

        assert!(decode_enum::<Role>("role", "admin").is_err());
        assert!(decode_enum::<SessionStatus>("status", "").is_err());
    }

    #[test]
    fn test_queries_have_stable_order() {
        assert!(ELIGIBLE_COUNSELLORS_SQL.trim_end().ends_with("ORDER BY id"));
        assert!(SESSIONS_IN_WINDOW_SQL.trim_end().ends_with("ORDER BY start_time, id"));
    }
}
