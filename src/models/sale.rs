use uuid::Uuid;
use crate::error::AppError;

/// One requested line of a sale: a product in a given color at the price
/// agreed at sale time.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleLineItem {
    pub product_id: Uuid,
    pub color: String,
    pub price: i64,
}

/// The in-memory sale aggregate: a customer reference plus at least one line
/// item. The id stays nil until the transaction coordinator persists it.
#[derive(Debug)]
pub struct SaleAggregate {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub line_items: Vec<SaleLineItem>,
}

impl SaleAggregate {
    /// Validates the request and builds the aggregate. No I/O.
    pub fn build(customer_id: Uuid, line_items: Vec<SaleLineItem>) -> Result<Self, AppError> {
        if customer_id.is_nil() {
            return Err(AppError::validation("customer_id is required"));
        }
        if line_items.is_empty() {
            return Err(AppError::validation("Sale must contain at least one product"));
        }

        Ok(Self {
            id: Uuid::nil(),
            customer_id,
            line_items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: i64) -> SaleLineItem {
        SaleLineItem {
            product_id: Uuid::new_v4(),
            color: "Rojo".to_string(),
            price,
        }
    }

    #[test]
    fn build_requires_customer_id() {
        let err = SaleAggregate::build(Uuid::nil(), vec![line(1000)]);
        assert!(matches!(err, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn build_requires_at_least_one_line_item() {
        let err = SaleAggregate::build(Uuid::new_v4(), vec![]);
        assert!(matches!(err, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn build_keeps_line_items_and_leaves_id_unassigned() {
        let customer_id = Uuid::new_v4();
        let items = vec![line(1000), line(2000)];
        let aggregate = SaleAggregate::build(customer_id, items.clone()).unwrap();

        assert!(aggregate.id.is_nil());
        assert_eq!(aggregate.customer_id, customer_id);
        assert_eq!(aggregate.line_items, items);
    }
}
