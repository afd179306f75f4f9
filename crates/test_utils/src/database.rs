//! Database test harness
//!
//! Starts a throwaway PostgreSQL container, applies the schema, and hands
//! out a pool plus seeding helpers, so integration suites can exercise the
//! real transactions without any shared environment.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

use core_kernel::{ItemId, Role, UserId};
use domain_items::{Category, ItemType};

const POSTGRES_USER: &str = "test_user";
const POSTGRES_PASSWORD: &str = "test_password";
const POSTGRES_DB: &str = "lostfound_test";

/// A PostgreSQL container with the schema applied
pub struct TestDatabase {
    _container: ContainerAsync<Postgres>,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Starts a fresh container and initializes the schema
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let container = Postgres::default()
            .with_db_name(POSTGRES_DB)
            .with_user(POSTGRES_USER)
            .with_password(POSTGRES_PASSWORD)
            .start()
            .await?;

        let port = container.get_host_port_ipv4(5432).await?;
        let host = container.get_host().await?.to_string();
        let url = format!(
            "postgres://{POSTGRES_USER}:{POSTGRES_PASSWORD}@{host}:{port}/{POSTGRES_DB}"
        );

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&url)
            .await?;

        let schema = include_str!("../../../migrations/0001_init.sql");
        sqlx::raw_sql(schema).execute(&pool).await?;

        Ok(Self {
            _container: container,
            pool,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Inserts an account with a fixed id so tests can reference it
    pub async fn seed_user(
        &self,
        id: UserId,
        full_name: &str,
        email: &str,
        role: Role,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO users (id, full_name, email, password_hash, role) \
             VALUES ($1, $2, $3, 'x', $4)",
        )
        .bind(id)
        .bind(full_name)
        .bind(email)
        .bind(role)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Inserts an open item report and returns its id
    pub async fn seed_item(
        &self,
        reporter: UserId,
        title: &str,
    ) -> Result<ItemId, sqlx::Error> {
        let (id,): (ItemId,) = sqlx::query_as(
            "INSERT INTO items (reporter_id, title, category, item_type, occurred_at) \
             VALUES ($1, $2, $3, $4, now()) RETURNING id",
        )
        .bind(reporter)
        .bind(title)
        .bind(Category::Bags)
        .bind(ItemType::Found)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }
}
