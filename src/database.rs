// src/database.rs
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Creates all tables if they don't exist. Idempotent, runs at startup.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            first_name VARCHAR(255) NOT NULL,
            last_name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS customers (
            id UUID PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            instagram_account VARCHAR(255) NOT NULL UNIQUE,
            phone BIGINT,
            address VARCHAR(255) NOT NULL,
            city VARCHAR(255) NOT NULL,
            department VARCHAR(255) NOT NULL,
            comments VARCHAR(255) NOT NULL,
            cc VARCHAR(255) NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS products (
            id UUID PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            price BIGINT NOT NULL,
            image VARCHAR(255) NOT NULL,
            available_colors TEXT[] NOT NULL DEFAULT '{}',
            description TEXT,
            is_catalog_ready BOOLEAN NOT NULL DEFAULT FALSE,
            catalog_variants JSONB,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )"#,
    )
    .execute(pool)
    .await?;

    // Priced, colored instances of a product, created only when a sale is recorded
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS product_variations (
            id UUID PRIMARY KEY,
            product_id UUID NOT NULL REFERENCES products(id),
            color VARCHAR(20) NOT NULL,
            price BIGINT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )"#,
    )
    .execute(pool)
    .await?;

    // Sale header carries a snapshot of the customer's contact fields at sale
    // time, so later customer edits never alter historical sales
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS sales (
            id UUID PRIMARY KEY,
            customer_id UUID NOT NULL REFERENCES customers(id),
            customer_name VARCHAR(255) NOT NULL,
            customer_instagram_account VARCHAR(255) NOT NULL,
            customer_phone BIGINT,
            customer_address VARCHAR(255) NOT NULL,
            customer_city VARCHAR(255) NOT NULL,
            customer_department VARCHAR(255) NOT NULL,
            customer_comments VARCHAR(255) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS sale_products (
            sale_id UUID REFERENCES sales(id),
            product_variation_id UUID REFERENCES product_variations(id),
            PRIMARY KEY (sale_id, product_variation_id)
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS expenses (
            id UUID PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            price BIGINT NOT NULL,
            type VARCHAR(255) NOT NULL,
            description VARCHAR(255) NOT NULL,
            currency VARCHAR(255) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )"#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
