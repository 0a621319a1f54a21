use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

// These structs double as the wire format and the decode target for the
// JSON_AGG columns the earnings query produces, hence Deserialize everywhere.

#[derive(Debug, Serialize, Deserialize)]
pub struct CurrencyExpenseSummary {
    pub currency: String,
    pub value: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthExpense {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub description: String,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CitySales {
    pub name: String,
    pub sales: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DepartmentSales {
    pub name: String,
    pub sales: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PurchasedProductSummary {
    pub name: String,
    pub id: Uuid,
    pub color: String,
    pub price: i64,
    pub image: String,
    pub quantity: i64,
}

/// One derived record per calendar month, never persisted.
#[derive(Debug, Serialize)]
pub struct MonthlyEarnings {
    pub sort_by_month: DateTime<Utc>,
    pub expenses_summary: Vec<CurrencyExpenseSummary>,
    pub all_expenses_in_month: Vec<MonthExpense>,
    pub income: i64,
    pub cop_expense: i64,
    pub earnings: i64,
    pub total_sales_in_month: i64,
    pub total_product_variations_in_month: i64,
    pub cities: Vec<CitySales>,
    pub departments: Vec<DepartmentSales>,
    pub purchased_products: Vec<PurchasedProductSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_expense_decodes_postgres_json_agg_shape() {
        // Timestamps below match how Postgres renders timestamptz inside
        // jsonb_build_object.
        let value = serde_json::json!([{
            "id": "7f2c1a34-9f7e-4d2b-8f5c-1a2b3c4d5e6f",
            "name": "Envio",
            "price": 15000,
            "type": "logistica",
            "description": "Envio nacional",
            "currency": "COP",
            "created_at": "2024-03-05T10:23:54+00:00",
            "updated_at": "2024-03-05T10:23:54+00:00"
        }]);

        let expenses: Vec<MonthExpense> = serde_json::from_value(value).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].price, 15000);
        assert_eq!(expenses[0].expense_type, "logistica");
    }

    #[test]
    fn breakdowns_decode_from_json_agg() {
        let cities: Vec<CitySales> =
            serde_json::from_value(serde_json::json!([{ "name": "Bogota", "sales": 3 }])).unwrap();
        assert_eq!(cities[0].sales, 3);

        let products: Vec<PurchasedProductSummary> = serde_json::from_value(serde_json::json!([{
            "name": "Bolso",
            "id": "0e8b2c11-2233-4455-8677-889900aabbcc",
            "color": "Negro",
            "price": 45000,
            "image": "https://assets.example.com/bolso.jpg",
            "quantity": 2
        }]))
        .unwrap();
        assert_eq!(products[0].quantity, 2);
    }
}
