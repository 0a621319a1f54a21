use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct CreateSaleRequest {
    pub customer_id: Uuid,
    pub products: Vec<SaleVariationRequest>,
}

#[derive(Deserialize)]
pub struct SaleVariationRequest {
    pub product_id: Uuid,
    pub color: String,
    pub price: i64,
}

/// Full sale view: header with the customer snapshot taken at sale time,
/// plus the product variations sold.
#[derive(Serialize)]
pub struct SaleResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub customer_instagram_account: String,
    pub customer_phone: Option<i64>,
    pub customer_address: String,
    pub customer_city: String,
    pub customer_department: String,
    pub customer_comments: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub products: Vec<SaleVariationResponse>,
}

#[derive(Serialize)]
pub struct SaleVariationResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: Option<String>,
    pub product_image: Option<String>,
    pub color: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_sale_request_parses_wire_shape() {
        let body = serde_json::json!({
            "customer_id": "7f2c1a34-9f7e-4d2b-8f5c-1a2b3c4d5e6f",
            "products": [
                { "product_id": "0e8b2c11-2233-4455-8677-889900aabbcc", "color": "Rojo", "price": 1000 },
                { "product_id": "0e8b2c11-2233-4455-8677-889900aabbcd", "color": "Azul", "price": 2000 }
            ]
        });

        let req: CreateSaleRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.products.len(), 2);
        assert_eq!(req.products[0].color, "Rojo");
        assert_eq!(req.products[1].price, 2000);
    }
}
