//! Demo data seed script
//!
//! Seeds three lunch weeks in October 2020 (two published, one draft),
//! each with a Monday-to-Friday menu.
//!
//! Usage:
//!   DATABASE_URL=... ./seed-demo [--reset]

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use clap::Parser;

use lunch_week_api::{
    db,
    models::lunch::{CreateLunchWeekRequest, NewLunchDay},
    services::{LunchStore, PgLunchStore},
};

#[derive(Parser)]
#[command(name = "seed-demo", about = "Seed demo lunch weeks into the database")]
struct Args {
    /// Empty lunch_week and lunch_day before seeding
    #[arg(long)]
    reset: bool,
}

const WEEKS: [(&str, bool); 3] = [
    ("2020-10-05", true),
    ("2020-10-12", true),
    ("2020-10-19", false),
];

const MENUS: [&str; 5] = [
    "Chicken nuggets, green beans, apple slices",
    "Cheese pizza, garden salad, orange wedges",
    "Beef tacos, black beans, corn",
    "Spaghetti with meat sauce, steamed broccoli",
    "Grilled cheese, tomato soup, grapes",
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL required")?;

    let pool = db::create_pool(&database_url, 5)
        .await
        .context("Failed to connect to database")?;
    db::run_migrations(&pool).await?;

    if args.reset {
        tracing::info!("Truncating lunch tables...");
        sqlx::query("TRUNCATE lunch_day, lunch_week RESTART IDENTITY")
            .execute(&pool)
            .await
            .context("Failed to truncate lunch tables")?;
    }

    let store = PgLunchStore::new(pool);
    for (week_of, is_published) in WEEKS {
        let week_of = NaiveDate::parse_from_str(week_of, "%Y-%m-%d")?;
        let lunch_week_id = store
            .create_week(&CreateLunchWeekRequest { week_of, is_published })
            .await
            .with_context(|| format!("Failed to insert week of {week_of}"))?;

        for (offset, menu) in MENUS.iter().enumerate() {
            store
                .create_day(&NewLunchDay {
                    lunch_week_id,
                    day: week_of + Duration::days(offset as i64),
                    menu_details: Some(menu.to_string()),
                })
                .await
                .with_context(|| format!("Failed to insert day for week {lunch_week_id}"))?;
        }
        tracing::info!(lunch_week_id, %week_of, is_published, "Seeded lunch week");
    }

    tracing::info!("Seed complete");
    Ok(())
}
