use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    models::lunch::{CreateLunchWeekRequest, LunchDay, LunchWeek, NewLunchDay},
    services::lunch::LunchStore,
};

/// In-process store with the same rules as the Postgres schema:
/// serial ids, a foreign key from days to weeks, and cascading week deletes.
#[derive(Default)]
pub struct MemoryLunchStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    weeks: BTreeMap<i32, LunchWeek>,
    days: BTreeMap<i32, LunchDay>,
    last_week_id: i32,
    last_day_id: i32,
}

impl MemoryLunchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn missing_week(lunch_week_id: i32) -> anyhow::Error {
    anyhow::anyhow!(
        "insert or update on table \"lunch_day\" violates foreign key constraint: \
         lunch_week_id {lunch_week_id} does not exist"
    )
}

#[async_trait]
impl LunchStore for MemoryLunchStore {
    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn list_weeks(&self) -> anyhow::Result<Vec<LunchWeek>> {
        let tables = self.tables.read().await;
        let mut weeks: Vec<LunchWeek> = tables.weeks.values().cloned().collect();
        weeks.sort_by_key(|w| w.week_of);
        Ok(weeks)
    }

    async fn get_week(&self, lunch_week_id: i32) -> anyhow::Result<Option<LunchWeek>> {
        Ok(self.tables.read().await.weeks.get(&lunch_week_id).cloned())
    }

    async fn create_week(&self, req: &CreateLunchWeekRequest) -> anyhow::Result<i32> {
        let mut tables = self.tables.write().await;
        tables.last_week_id += 1;
        let id = tables.last_week_id;
        tables.weeks.insert(
            id,
            LunchWeek {
                lunch_week_id: id,
                week_of: req.week_of,
                is_published: req.is_published,
            },
        );
        Ok(id)
    }

    async fn update_week(&self, lunch_week_id: i32, week: &LunchWeek) -> anyhow::Result<u64> {
        tracing::debug!(lunch_week_id, ?week, "updating lunch week");
        let mut tables = self.tables.write().await;
        match tables.weeks.get_mut(&lunch_week_id) {
            Some(row) => {
                row.week_of = week.week_of;
                row.is_published = week.is_published;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_week(&self, lunch_week_id: i32) -> anyhow::Result<u64> {
        let mut tables = self.tables.write().await;
        if tables.weeks.remove(&lunch_week_id).is_none() {
            return Ok(0);
        }
        tables.days.retain(|_, d| d.lunch_week_id != lunch_week_id);
        Ok(1)
    }

    async fn create_day(&self, day: &NewLunchDay) -> anyhow::Result<i32> {
        let mut tables = self.tables.write().await;
        if !tables.weeks.contains_key(&day.lunch_week_id) {
            return Err(missing_week(day.lunch_week_id));
        }
        tables.last_day_id += 1;
        let id = tables.last_day_id;
        tables.days.insert(
            id,
            LunchDay {
                lunch_day_id: id,
                lunch_week_id: day.lunch_week_id,
                day: day.day,
                menu_details: day.menu_details.clone(),
            },
        );
        Ok(id)
    }

    async fn update_day(&self, lunch_day_id: i32, day: &LunchDay) -> anyhow::Result<u64> {
        let mut tables = self.tables.write().await;
        if !tables.days.contains_key(&lunch_day_id) {
            return Ok(0);
        }
        if !tables.weeks.contains_key(&day.lunch_week_id) {
            return Err(missing_week(day.lunch_week_id));
        }
        if let Some(row) = tables.days.get_mut(&lunch_day_id) {
            row.lunch_week_id = day.lunch_week_id;
            row.day = day.day;
            row.menu_details = day.menu_details.clone();
        }
        Ok(1)
    }

    async fn list_days(&self, lunch_week_id: i32) -> anyhow::Result<Vec<LunchDay>> {
        let tables = self.tables.read().await;
        Ok(tables
            .days
            .values()
            .filter(|d| d.lunch_week_id == lunch_week_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn week_req(week_of: &str) -> CreateLunchWeekRequest {
        CreateLunchWeekRequest {
            week_of: date(week_of),
            is_published: false,
        }
    }

    #[tokio::test]
    async fn test_ids_are_assigned_sequentially() {
        let store = MemoryLunchStore::new();
        assert_eq!(store.create_week(&week_req("2020-10-05")).await.unwrap(), 1);
        assert_eq!(store.create_week(&week_req("2020-10-12")).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = MemoryLunchStore::new();
        let id = store.create_week(&week_req("2020-10-05")).await.unwrap();
        store.delete_week(id).await.unwrap();
        let next = store.create_week(&week_req("2020-10-12")).await.unwrap();
        assert_ne!(id, next);
    }

    #[tokio::test]
    async fn test_list_weeks_orders_by_week_of() {
        let store = MemoryLunchStore::new();
        store.create_week(&week_req("2020-10-19")).await.unwrap();
        store.create_week(&week_req("2020-10-05")).await.unwrap();
        store.create_week(&week_req("2020-10-12")).await.unwrap();

        let weeks = store.list_weeks().await.unwrap();
        let dates: Vec<_> = weeks.iter().map(|w| w.week_of).collect();
        assert_eq!(
            dates,
            vec![date("2020-10-05"), date("2020-10-12"), date("2020-10-19")]
        );
    }

    #[tokio::test]
    async fn test_day_requires_existing_week() {
        let store = MemoryLunchStore::new();
        let result = store
            .create_day(&NewLunchDay {
                lunch_week_id: 42,
                day: date("2020-10-05"),
                menu_details: None,
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_week_cascades_to_days() {
        let store = MemoryLunchStore::new();
        let week_id = store.create_week(&week_req("2020-10-05")).await.unwrap();
        store
            .create_day(&NewLunchDay {
                lunch_week_id: week_id,
                day: date("2020-10-05"),
                menu_details: Some("Pizza".into()),
            })
            .await
            .unwrap();

        assert_eq!(store.delete_week(week_id).await.unwrap(), 1);
        assert!(store.list_days(week_id).await.unwrap().is_empty());
        assert_eq!(store.delete_week(week_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_rows_affects_nothing() {
        let store = MemoryLunchStore::new();
        let week = LunchWeek {
            lunch_week_id: 7,
            week_of: date("2020-10-05"),
            is_published: true,
        };
        assert_eq!(store.update_week(7, &week).await.unwrap(), 0);
        assert!(store.get_week(7).await.unwrap().is_none());
    }
}
