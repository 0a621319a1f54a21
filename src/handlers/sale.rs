use std::collections::HashMap;

use axum::extract::State;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dtos::sale::{CreateSaleRequest, SaleResponse, SaleVariationResponse};
use crate::error::AppError;
use crate::extract::{Json, Path};
use crate::models::customer::Customer;
use crate::models::sale::{SaleAggregate, SaleLineItem};
use crate::state::AppState;

// POST /sales - Record a new sale and return the persisted view
pub async fn create_sale(
    State(AppState { db_pool }): State<AppState>,
    Json(req): Json<CreateSaleRequest>,
) -> Result<Json<SaleResponse>, AppError> {
    let line_items = req
        .products
        .into_iter()
        .map(|p| SaleLineItem {
            product_id: p.product_id,
            color: p.color,
            price: p.price,
        })
        .collect();

    let aggregate = SaleAggregate::build(req.customer_id, line_items)?;

    let sale_id = record_sale(&db_pool, &aggregate).await?;

    // Recovering the sale from DB so the response reflects stored state
    fetch_sale_by_id(&db_pool, sale_id).await.map(Json)
}

// GET /sales/:id - Get single sale with its variations
pub async fn get_sale(
    State(AppState { db_pool }): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaleResponse>, AppError> {
    fetch_sale_by_id(&db_pool, id).await.map(Json)
}

// GET /sales - List all sales, newest first. No pagination yet; revisit when
// the sale count warrants it.
pub async fn list_sales(
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<Vec<SaleResponse>>, AppError> {
    let headers = sqlx::query_as::<_, SaleRow>(&format!(
        "SELECT {SALE_COLUMNS} FROM sales ORDER BY created_at DESC, id"
    ))
    .fetch_all(&db_pool)
    .await?;

    let variations = sqlx::query_as::<_, VariationRow>(&format!(
        "SELECT {VARIATION_COLUMNS}
         FROM sale_products sp
         JOIN product_variations pv ON sp.product_variation_id = pv.id
         LEFT JOIN products p ON pv.product_id = p.id
         ORDER BY pv.created_at, pv.id"
    ))
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(assemble_sale_views(headers, variations)))
}

/// Persists a sale aggregate: the product variations, the sale header with
/// the customer snapshot, and the join rows, all in one transaction. Any
/// failure drops the transaction, which rolls everything back.
///
/// Variation ids are generated here, before insertion, so they are known
/// without re-querying and concurrent sales can never pick up each other's
/// rows.
pub async fn record_sale(db_pool: &PgPool, aggregate: &SaleAggregate) -> Result<Uuid, AppError> {
    let mut tx = db_pool.begin().await?;

    let variation_ids: Vec<Uuid> = aggregate
        .line_items
        .iter()
        .map(|_| Uuid::new_v4())
        .collect();
    let product_ids: Vec<Uuid> = aggregate.line_items.iter().map(|i| i.product_id).collect();
    let colors: Vec<String> = aggregate.line_items.iter().map(|i| i.color.clone()).collect();
    let prices: Vec<i64> = aggregate.line_items.iter().map(|i| i.price).collect();

    // One batched insert regardless of line-item count
    sqlx::query(
        "INSERT INTO product_variations (id, product_id, color, price)
         SELECT * FROM UNNEST($1::UUID[], $2::UUID[], $3::TEXT[], $4::BIGINT[])",
    )
    .bind(&variation_ids)
    .bind(&product_ids)
    .bind(&colors)
    .bind(&prices)
    .execute(&mut *tx)
    .await?;

    // Snapshot source. A missing customer aborts the transaction, taking the
    // variations inserted above with it.
    let customer = sqlx::query_as::<_, Customer>(
        "SELECT id, name, instagram_account, phone, address, city, department, comments, cc,
                created_at, updated_at
         FROM customers WHERE id = $1",
    )
    .bind(aggregate.customer_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::not_found("Customer not found"))?;

    let sale_id: Uuid = sqlx::query_scalar(
        "INSERT INTO sales
         (id, customer_id, customer_name, customer_instagram_account, customer_phone,
          customer_address, customer_city, customer_department, customer_comments)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(customer.id)
    .bind(&customer.name)
    .bind(&customer.instagram_account)
    .bind(customer.phone)
    .bind(&customer.address)
    .bind(&customer.city)
    .bind(&customer.department)
    .bind(&customer.comments)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO sale_products (sale_id, product_variation_id)
         SELECT $1, vid FROM UNNEST($2::UUID[]) AS t(vid)",
    )
    .bind(sale_id)
    .bind(&variation_ids)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(%sale_id, items = aggregate.line_items.len(), "Sale recorded");

    Ok(sale_id)
}

const SALE_COLUMNS: &str =
    "id, customer_id, customer_name, customer_instagram_account, customer_phone, \
     customer_address, customer_city, customer_department, customer_comments, \
     created_at, updated_at";

const VARIATION_COLUMNS: &str =
    "sp.sale_id, pv.id, pv.product_id, p.name AS product_name, p.image AS product_image, \
     pv.color, pv.price, pv.created_at";

pub async fn fetch_sale_by_id(db_pool: &PgPool, id: Uuid) -> Result<SaleResponse, AppError> {
    let header = sqlx::query_as::<_, SaleRow>(&format!(
        "SELECT {SALE_COLUMNS} FROM sales WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Sale not found"))?;

    let variations = sqlx::query_as::<_, VariationRow>(&format!(
        "SELECT {VARIATION_COLUMNS}
         FROM sale_products sp
         JOIN product_variations pv ON sp.product_variation_id = pv.id
         LEFT JOIN products p ON pv.product_id = p.id
         WHERE sp.sale_id = $1
         ORDER BY pv.created_at, pv.id"
    ))
    .bind(id)
    .fetch_all(db_pool)
    .await?;

    let products = variations.into_iter().map(SaleVariationResponse::from).collect();
    Ok(header.into_response(products))
}

#[derive(FromRow)]
struct SaleRow {
    id: Uuid,
    customer_id: Uuid,
    customer_name: String,
    customer_instagram_account: String,
    customer_phone: Option<i64>,
    customer_address: String,
    customer_city: String,
    customer_department: String,
    customer_comments: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SaleRow {
    fn into_response(self, products: Vec<SaleVariationResponse>) -> SaleResponse {
        SaleResponse {
            id: self.id,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            customer_instagram_account: self.customer_instagram_account,
            customer_phone: self.customer_phone,
            customer_address: self.customer_address,
            customer_city: self.customer_city,
            customer_department: self.customer_department,
            customer_comments: self.customer_comments,
            created_at: self.created_at,
            updated_at: self.updated_at,
            products,
        }
    }
}

#[derive(FromRow)]
struct VariationRow {
    sale_id: Uuid,
    id: Uuid,
    product_id: Uuid,
    product_name: Option<String>,
    product_image: Option<String>,
    color: String,
    price: i64,
    created_at: DateTime<Utc>,
}

impl From<VariationRow> for SaleVariationResponse {
    fn from(v: VariationRow) -> Self {
        Self {
            id: v.id,
            product_id: v.product_id,
            product_name: v.product_name,
            product_image: v.product_image,
            color: v.color,
            price: v.price,
            created_at: v.created_at,
        }
    }
}

/// Groups a flat variation list under its sale headers, preserving the
/// query's per-sale ordering. Sales with no variations get an empty list,
/// though the coordinator never produces one.
fn assemble_sale_views(headers: Vec<SaleRow>, variations: Vec<VariationRow>) -> Vec<SaleResponse> {
    let mut by_sale: HashMap<Uuid, Vec<SaleVariationResponse>> = HashMap::new();
    for v in variations {
        let sale_id = v.sale_id;
        by_sale.entry(sale_id).or_default().push(v.into());
    }

    headers
        .into_iter()
        .map(|h| {
            let products = by_sale.remove(&h.id).unwrap_or_default();
            h.into_response(products)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(id: Uuid) -> SaleRow {
        let now = Utc::now();
        SaleRow {
            id,
            customer_id: Uuid::new_v4(),
            customer_name: "Ana".to_string(),
            customer_instagram_account: "@ana".to_string(),
            customer_phone: Some(3001234567),
            customer_address: "Calle 1".to_string(),
            customer_city: "Bogota".to_string(),
            customer_department: "Cundinamarca".to_string(),
            customer_comments: "".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn variation(sale_id: Uuid, color: &str, price: i64) -> VariationRow {
        VariationRow {
            sale_id,
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            product_name: Some("Bolso".to_string()),
            product_image: None,
            color: color.to_string(),
            price,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn variations_group_under_their_sale() {
        let sale_a = Uuid::new_v4();
        let sale_b = Uuid::new_v4();
        let views = assemble_sale_views(
            vec![header(sale_a), header(sale_b)],
            vec![
                variation(sale_a, "Rojo", 1000),
                variation(sale_b, "Negro", 5000),
                variation(sale_a, "Azul", 2000),
            ],
        );

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, sale_a);
        assert_eq!(views[0].products.len(), 2);
        assert_eq!(views[1].products.len(), 1);
        assert_eq!(views[1].products[0].price, 5000);
    }

    #[test]
    fn per_sale_variation_order_is_preserved() {
        let sale = Uuid::new_v4();
        let views = assemble_sale_views(
            vec![header(sale)],
            vec![
                variation(sale, "Rojo", 1000),
                variation(sale, "Azul", 2000),
            ],
        );

        let colors: Vec<&str> = views[0].products.iter().map(|p| p.color.as_str()).collect();
        assert_eq!(colors, vec!["Rojo", "Azul"]);
        let total: i64 = views[0].products.iter().map(|p| p.price).sum();
        assert_eq!(total, 3000);
    }

    #[test]
    fn sale_without_variations_gets_empty_list() {
        let views = assemble_sale_views(vec![header(Uuid::new_v4())], vec![]);
        assert!(views[0].products.is_empty());
    }

    // Store-backed tests. Run with a live Postgres:
    //   DATABASE_URL=postgres://... cargo test -- --ignored

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for store tests");
        let pool = crate::database::create_pool(&url)
            .await
            .expect("Failed to connect to test database");
        crate::database::init_schema(&pool)
            .await
            .expect("Failed to initialize schema");
        pool
    }

    async fn seed_customer(pool: &PgPool, name: &str, city: &str) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO customers (id, name, instagram_account, phone, address, city, department, comments, cc)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(id)
        .bind(name)
        .bind(format!("@{name}-{id}"))
        .bind(3001234567i64)
        .bind("Calle 1")
        .bind(city)
        .bind("Cundinamarca")
        .bind("")
        .bind("")
        .execute(pool)
        .await
        .expect("seed customer");
        id
    }

    async fn seed_product(pool: &PgPool, name: &str, price: i64) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO products (id, name, price, image) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(name)
            .bind(price)
            .bind("bolso.jpg")
            .execute(pool)
            .await
            .expect("seed product");
        id
    }

    async fn count_variations(pool: &PgPool, product_id: Uuid) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM product_variations WHERE product_id = $1")
            .bind(product_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    #[ignore = "needs a live Postgres via DATABASE_URL"]
    async fn missing_customer_rolls_back_inserted_variations() {
        let pool = test_pool().await;
        let product_id = seed_product(&pool, "Bolso", 45000).await;

        let aggregate = SaleAggregate::build(
            Uuid::new_v4(), // no such customer
            vec![
                SaleLineItem { product_id, color: "Rojo".to_string(), price: 1000 },
                SaleLineItem { product_id, color: "Azul".to_string(), price: 2000 },
            ],
        )
        .unwrap();

        let result = record_sale(&pool, &aggregate).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        // The variations inserted before the customer lookup must be gone
        assert_eq!(count_variations(&pool, product_id).await, 0);
    }

    #[tokio::test]
    #[ignore = "needs a live Postgres via DATABASE_URL"]
    async fn recorded_sale_round_trips_and_keeps_customer_snapshot() {
        let pool = test_pool().await;
        let customer_id = seed_customer(&pool, "Ana", "Bogota").await;
        let bolso = seed_product(&pool, "Bolso", 45000).await;
        let cartera = seed_product(&pool, "Cartera", 60000).await;

        let aggregate = SaleAggregate::build(
            customer_id,
            vec![
                SaleLineItem { product_id: bolso, color: "Rojo".to_string(), price: 1000 },
                SaleLineItem { product_id: cartera, color: "Azul".to_string(), price: 2000 },
            ],
        )
        .unwrap();

        let sale_id = record_sale(&pool, &aggregate).await.unwrap();

        // Exactly one variation and one join row per line item
        assert_eq!(count_variations(&pool, bolso).await, 1);
        assert_eq!(count_variations(&pool, cartera).await, 1);
        let join_rows: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sale_products WHERE sale_id = $1")
                .bind(sale_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(join_rows, 2);

        let view = fetch_sale_by_id(&pool, sale_id).await.unwrap();
        assert_eq!(view.customer_id, customer_id);
        assert_eq!(view.customer_name, "Ana");
        assert_eq!(view.customer_city, "Bogota");

        let mut got: Vec<(Uuid, String, i64)> = view
            .products
            .iter()
            .map(|p| (p.product_id, p.color.clone(), p.price))
            .collect();
        got.sort();
        let mut want = vec![
            (bolso, "Rojo".to_string(), 1000),
            (cartera, "Azul".to_string(), 2000),
        ];
        want.sort();
        assert_eq!(got, want);

        // Editing the customer afterwards must not rewrite the snapshot
        sqlx::query("UPDATE customers SET city = 'Medellin', updated_at = NOW() WHERE id = $1")
            .bind(customer_id)
            .execute(&pool)
            .await
            .unwrap();
        let view = fetch_sale_by_id(&pool, sale_id).await.unwrap();
        assert_eq!(view.customer_city, "Bogota");

        // Unknown ids stay NotFound
        let missing = fetch_sale_by_id(&pool, Uuid::new_v4()).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
