use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::lunch::{CreateLunchWeekRequest, LunchDay, LunchWeek, NewLunchDay};

/// Queries over the `lunch_week` and `lunch_day` tables.
///
/// Each method is a single statement. Failures are not classified here;
/// the HTTP layer decides how to report them.
#[async_trait]
pub trait LunchStore: Send + Sync {
    /// Round-trip to the backing store, used by the health check.
    async fn ping(&self) -> anyhow::Result<()>;

    /// All weeks, ordered by `week_of` ascending.
    async fn list_weeks(&self) -> anyhow::Result<Vec<LunchWeek>>;

    /// `None` when no row matches.
    async fn get_week(&self, lunch_week_id: i32) -> anyhow::Result<Option<LunchWeek>>;

    /// Returns the id assigned by the store.
    async fn create_week(&self, req: &CreateLunchWeekRequest) -> anyhow::Result<i32>;

    /// Overwrites the row matching `lunch_week_id`. Returns the affected row count.
    async fn update_week(&self, lunch_week_id: i32, week: &LunchWeek) -> anyhow::Result<u64>;

    async fn delete_week(&self, lunch_week_id: i32) -> anyhow::Result<u64>;

    async fn create_day(&self, day: &NewLunchDay) -> anyhow::Result<i32>;

    async fn update_day(&self, lunch_day_id: i32, day: &LunchDay) -> anyhow::Result<u64>;

    /// Days belonging to a week, in insertion order.
    async fn list_days(&self, lunch_week_id: i32) -> anyhow::Result<Vec<LunchDay>>;
}

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgLunchStore {
    pool: PgPool,
}

impl PgLunchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LunchStore for PgLunchStore {
    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_weeks(&self) -> anyhow::Result<Vec<LunchWeek>> {
        let weeks = sqlx::query_as::<_, LunchWeek>(
            "SELECT lunch_week_id, week_of, is_published
             FROM lunch_week
             ORDER BY week_of",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(weeks)
    }

    async fn get_week(&self, lunch_week_id: i32) -> anyhow::Result<Option<LunchWeek>> {
        let week = sqlx::query_as::<_, LunchWeek>(
            "SELECT lunch_week_id, week_of, is_published
             FROM lunch_week
             WHERE lunch_week_id = $1",
        )
        .bind(lunch_week_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(week)
    }

    async fn create_week(&self, req: &CreateLunchWeekRequest) -> anyhow::Result<i32> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO lunch_week (week_of, is_published)
             VALUES ($1, $2)
             RETURNING lunch_week_id",
        )
        .bind(req.week_of)
        .bind(req.is_published)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_week(&self, lunch_week_id: i32, week: &LunchWeek) -> anyhow::Result<u64> {
        tracing::debug!(lunch_week_id, ?week, "updating lunch week");
        let result = sqlx::query(
            "UPDATE lunch_week
             SET week_of = $1,
                 is_published = $2
             WHERE lunch_week_id = $3",
        )
        .bind(week.week_of)
        .bind(week.is_published)
        .bind(lunch_week_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_week(&self, lunch_week_id: i32) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM lunch_week WHERE lunch_week_id = $1")
            .bind(lunch_week_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn create_day(&self, day: &NewLunchDay) -> anyhow::Result<i32> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO lunch_day (lunch_week_id, day, menu_details)
             VALUES ($1, $2, $3)
             RETURNING lunch_day_id",
        )
        .bind(day.lunch_week_id)
        .bind(day.day)
        .bind(&day.menu_details)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_day(&self, lunch_day_id: i32, day: &LunchDay) -> anyhow::Result<u64> {
        let result = sqlx::query(
            "UPDATE lunch_day
             SET lunch_week_id = $1,
                 day = $2,
                 menu_details = $3
             WHERE lunch_day_id = $4",
        )
        .bind(day.lunch_week_id)
        .bind(day.day)
        .bind(&day.menu_details)
        .bind(lunch_day_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn list_days(&self, lunch_week_id: i32) -> anyhow::Result<Vec<LunchDay>> {
        let days = sqlx::query_as::<_, LunchDay>(
            "SELECT lunch_day_id, lunch_week_id, day, menu_details
             FROM lunch_day
             WHERE lunch_week_id = $1
             ORDER BY lunch_day_id",
        )
        .bind(lunch_week_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::db;

    /// Connects to `DATABASE_URL` and applies migrations; `None` when unset.
    async fn pg_store() -> Option<PgLunchStore> {
        let url = std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty())?;
        let pool = db::create_pool(&url, 2).await.unwrap();
        db::run_migrations(&pool).await.unwrap();
        Some(PgLunchStore::new(pool))
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_pg_statements_match_schema() {
        let Some(store) = pg_store().await else {
            eprintln!("DATABASE_URL not set, skipping Postgres store test");
            return;
        };
        store.ping().await.unwrap();

        let later = store
            .create_week(&CreateLunchWeekRequest {
                week_of: date("2099-03-09"),
                is_published: false,
            })
            .await
            .unwrap();
        let earlier = store
            .create_week(&CreateLunchWeekRequest {
                week_of: date("2099-03-02"),
                is_published: true,
            })
            .await
            .unwrap();

        let weeks = store.list_weeks().await.unwrap();
        assert!(weeks.windows(2).all(|w| w[0].week_of <= w[1].week_of));
        let pos = |id| weeks.iter().position(|w| w.lunch_week_id == id).unwrap();
        assert!(pos(earlier) < pos(later));

        let week = store.get_week(earlier).await.unwrap().unwrap();
        assert_eq!(week.week_of, date("2099-03-02"));
        assert!(week.is_published);

        let updated = LunchWeek {
            lunch_week_id: later,
            week_of: date("2099-03-16"),
            is_published: true,
        };
        assert_eq!(store.update_week(later, &updated).await.unwrap(), 1);
        assert_eq!(store.get_week(later).await.unwrap(), Some(updated));

        let first = store
            .create_day(&NewLunchDay {
                lunch_week_id: earlier,
                day: date("2099-03-02"),
                menu_details: Some("Pizza".into()),
            })
            .await
            .unwrap();
        let second = store
            .create_day(&NewLunchDay {
                lunch_week_id: earlier,
                day: date("2099-03-03"),
                menu_details: None,
            })
            .await
            .unwrap();

        let moved = LunchDay {
            lunch_day_id: second,
            lunch_week_id: earlier,
            day: date("2099-03-04"),
            menu_details: Some("Tacos".into()),
        };
        assert_eq!(store.update_day(second, &moved).await.unwrap(), 1);

        let days = store.list_days(earlier).await.unwrap();
        let ids: Vec<i32> = days.iter().map(|d| d.lunch_day_id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(days[1], moved);

        assert!(store
            .create_day(&NewLunchDay {
                lunch_week_id: -1,
                day: date("2099-03-02"),
                menu_details: None,
            })
            .await
            .is_err());

        assert_eq!(store.delete_week(earlier).await.unwrap(), 1);
        assert!(store.get_week(earlier).await.unwrap().is_none());
        assert!(store.list_days(earlier).await.unwrap().is_empty());
        assert_eq!(store.delete_week(later).await.unwrap(), 1);
    }
}
