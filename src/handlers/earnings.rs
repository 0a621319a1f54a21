use axum::extract::State;
use chrono::{DateTime, Utc};
use sqlx::types::Json as SqlJson;
use sqlx::FromRow;

use crate::dtos::earnings::{
    CitySales, CurrencyExpenseSummary, DepartmentSales, MonthExpense, MonthlyEarnings,
    PurchasedProductSummary,
};
use crate::error::AppError;
use crate::extract::Json;
use crate::state::AppState;

/// Net earnings are computed against this currency; expenses in other
/// currencies appear in the summary but do not reduce earnings.
const REFERENCE_CURRENCY: &str = "COP";

/// Monthly net earnings, floored at zero.
fn net_earnings(income: i64, reference_expense: i64) -> i64 {
    (income - reference_expense).max(0)
}

// GET /earnings - Whole-history monthly rollup, ascending by month.
// A month appears if ANY source (expenses, variation income, sales) has rows
// in it; missing aggregates default to 0 / empty lists.
pub async fn get_earnings(
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<Vec<MonthlyEarnings>>, AppError> {
    // Income is keyed on product_variation creation time, not the sale
    // header's; within one recorded sale the two always land in the same
    // month because they share a transaction.
    let rows = sqlx::query_as::<_, EarningsRow>(
        r#"
        WITH monthly_expenses AS (
            SELECT
                DATE_TRUNC('month', e.created_at) AS month,
                e.currency,
                SUM(e.price)::BIGINT AS total_expense
            FROM expenses e
            GROUP BY month, e.currency
        ),
        monthly_income AS (
            SELECT
                DATE_TRUNC('month', pv.created_at) AS month,
                SUM(pv.price)::BIGINT AS total_income
            FROM product_variations pv
            GROUP BY month
        ),
        reference_expenses AS (
            SELECT
                DATE_TRUNC('month', e.created_at) AS month,
                SUM(CASE WHEN e.currency = $1 THEN e.price ELSE 0 END)::BIGINT AS total_reference_expense
            FROM expenses e
            GROUP BY month
        ),
        sales_count AS (
            SELECT
                DATE_TRUNC('month', s.created_at) AS month,
                COUNT(*)::BIGINT AS total_sales_in_month
            FROM sales s
            GROUP BY DATE_TRUNC('month', s.created_at)
        ),
        total_product_variations AS (
            SELECT
                DATE_TRUNC('month', pv.created_at) AS month,
                COUNT(*)::BIGINT AS total_variations
            FROM product_variations pv
            GROUP BY DATE_TRUNC('month', pv.created_at)
        ),
        total_sales_by_city AS (
            SELECT
                DATE_TRUNC('month', s.created_at) AS month,
                s.customer_city AS city,
                COUNT(*)::BIGINT AS sales
            FROM sales s
            GROUP BY DATE_TRUNC('month', s.created_at), s.customer_city
        ),
        total_sales_by_department AS (
            SELECT
                DATE_TRUNC('month', s.created_at) AS month,
                s.customer_department AS department,
                COUNT(*)::BIGINT AS sales
            FROM sales s
            GROUP BY DATE_TRUNC('month', s.created_at), s.customer_department
        ),
        purchased_products AS (
            SELECT
                DATE_TRUNC('month', pv.created_at) AS month,
                p.name AS name,
                p.id,
                pv.color,
                pv.price,
                p.image,
                COUNT(*)::BIGINT AS quantity
            FROM product_variations pv
            JOIN products p ON pv.product_id = p.id
            GROUP BY DATE_TRUNC('month', pv.created_at), p.name, pv.color, pv.price, p.image, p.id
        ),
        -- Union, not intersection: a month with expenses but no sales still
        -- gets a row
        distinct_months AS (
            SELECT DISTINCT month FROM (
                SELECT month FROM monthly_expenses
                UNION
                SELECT month FROM monthly_income
                UNION
                SELECT month FROM sales_count
            ) AS all_months
        )
        SELECT
            dm.month AS sort_by_month,
            COALESCE(
                (
                    SELECT JSON_AGG(jsonb_build_object('currency', me.currency, 'value', me.total_expense))
                    FROM monthly_expenses me
                    WHERE me.month = dm.month
                ),
                '[]'
            ) AS expenses_summary,
            COALESCE(
                (
                    SELECT JSON_AGG(jsonb_build_object(
                        'id', e.id,
                        'name', e.name,
                        'price', e.price,
                        'type', e.type,
                        'description', e.description,
                        'currency', e.currency,
                        'created_at', e.created_at,
                        'updated_at', e.updated_at
                    ))
                    FROM expenses e
                    WHERE DATE_TRUNC('month', e.created_at) = dm.month
                ),
                '[]'
            ) AS all_expenses_in_month,
            COALESCE(mi.total_income, 0) AS income,
            COALESCE(re.total_reference_expense, 0) AS reference_expense,
            COALESCE(sc.total_sales_in_month, 0) AS total_sales_in_month,
            COALESCE(tpv.total_variations, 0) AS total_product_variations_in_month,
            COALESCE(
                (
                    SELECT JSON_AGG(jsonb_build_object('name', city, 'sales', sales))
                    FROM total_sales_by_city c
                    WHERE c.month = dm.month
                ),
                '[]'
            ) AS cities,
            COALESCE(
                (
                    SELECT JSON_AGG(jsonb_build_object('name', department, 'sales', sales))
                    FROM total_sales_by_department d
                    WHERE d.month = dm.month
                ),
                '[]'
            ) AS departments,
            COALESCE(
                (
                    SELECT JSON_AGG(jsonb_build_object(
                        'name', pp.name,
                        'id', pp.id,
                        'color', pp.color,
                        'price', pp.price,
                        'image', pp.image,
                        'quantity', pp.quantity
                    ))
                    FROM purchased_products pp
                    WHERE pp.month = dm.month
                ),
                '[]'
            ) AS purchased_products
        FROM distinct_months dm
        LEFT JOIN monthly_income mi ON dm.month = mi.month
        LEFT JOIN reference_expenses re ON dm.month = re.month
        LEFT JOIN sales_count sc ON dm.month = sc.month
        LEFT JOIN total_product_variations tpv ON dm.month = tpv.month
        ORDER BY dm.month
        "#,
    )
    .bind(REFERENCE_CURRENCY)
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(rows.into_iter().map(MonthlyEarnings::from).collect()))
}

#[derive(FromRow)]
struct EarningsRow {
    sort_by_month: DateTime<Utc>,
    expenses_summary: SqlJson<Vec<CurrencyExpenseSummary>>,
    all_expenses_in_month: SqlJson<Vec<MonthExpense>>,
    income: i64,
    reference_expense: i64,
    total_sales_in_month: i64,
    total_product_variations_in_month: i64,
    cities: SqlJson<Vec<CitySales>>,
    departments: SqlJson<Vec<DepartmentSales>>,
    purchased_products: SqlJson<Vec<PurchasedProductSummary>>,
}

impl From<EarningsRow> for MonthlyEarnings {
    fn from(row: EarningsRow) -> Self {
        Self {
            sort_by_month: row.sort_by_month,
            expenses_summary: row.expenses_summary.0,
            all_expenses_in_month: row.all_expenses_in_month.0,
            income: row.income,
            cop_expense: row.reference_expense,
            earnings: net_earnings(row.income, row.reference_expense),
            total_sales_in_month: row.total_sales_in_month,
            total_product_variations_in_month: row.total_product_variations_in_month,
            cities: row.cities.0,
            departments: row.departments.0,
            purchased_products: row.purchased_products.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earnings_are_income_minus_reference_expense() {
        assert_eq!(net_earnings(3000, 1000), 2000);
    }

    #[test]
    fn earnings_never_go_negative() {
        // A month with expenses but no income floors at zero
        assert_eq!(net_earnings(0, 45000), 0);
        assert_eq!(net_earnings(1000, 1000), 0);
    }

    #[test]
    fn income_only_month_keeps_full_income() {
        assert_eq!(net_earnings(3000, 0), 3000);
    }
}
