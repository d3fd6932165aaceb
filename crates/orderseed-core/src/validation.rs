//! # Validation Module
//!
//! Invariant checks for generated and reloaded records.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  generator tests        every fake_* output must pass                   │
//! │  Seeder::verify         a sample of orders read back from the database │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use orderseed_core::validation::validate_quantity;
//!
//! validate_quantity(5).unwrap();
//! assert!(validate_quantity(11).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Address, Customer, Order, Product, Store};
use crate::{
    EMAILS_PER_CUSTOMER, MAX_DETAIL_QUANTITY, MAX_ORDER_DETAILS, MIN_ORDER_DETAILS,
    PHONES_PER_CUSTOMER, PURCHASE_ORDER_LEN,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn in_range(field: &str, value: i64, min: i64, max: i64) -> ValidationResult<()> {
    if value < min || value > max {
        return Err(ValidationError::out_of_range(field, min, max, value));
    }
    Ok(())
}

fn exact_count(field: &str, actual: usize, expected: usize) -> ValidationResult<()> {
    if actual != expected {
        return Err(ValidationError::CardinalityMismatch {
            field: field.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn validate_price(field: &str, price: crate::Money) -> ValidationResult<()> {
    in_range(
        field,
        price.cents(),
        crate::money::MIN_PRICE_CENTS,
        crate::money::MAX_PRICE_CENTS,
    )
}

/// Validates a line-item quantity (1..=10).
pub fn validate_quantity(quantity: i32) -> ValidationResult<()> {
    in_range(
        "details.quantity",
        i64::from(quantity),
        1,
        i64::from(MAX_DETAIL_QUANTITY),
    )
}

/// Validates that every address part is filled in.
pub fn validate_address(address: &Address) -> ValidationResult<()> {
    require("address.street", &address.street)?;
    require("address.city", &address.city)?;
    require("address.state", &address.state)?;
    require("address.zip", &address.zip)?;
    require("address.country", &address.country)?;
    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a customer.
///
/// ## Rules
/// - first/last name and title are non-empty
/// - exactly 2 phones and 3 emails
/// - every email contains `@`
pub fn validate_customer(customer: &Customer) -> ValidationResult<()> {
    require("firstName", &customer.first_name)?;
    require("lastName", &customer.last_name)?;
    require("title", &customer.title)?;
    validate_address(&customer.address)?;
    exact_count("phones", customer.phones.len(), PHONES_PER_CUSTOMER)?;
    exact_count("emails", customer.emails.len(), EMAILS_PER_CUSTOMER)?;

    for phone in &customer.phones {
        require("phones.number", &phone.number)?;
    }
    for email in &customer.emails {
        if !email.email.contains('@') {
            return Err(ValidationError::InvalidFormat {
                field: "emails.email".to_string(),
                reason: format!("'{}' is not an email address", email.email),
            });
        }
    }

    Ok(())
}

/// Validates a product: dept 1..=100, price $0.01..=$10,000.00.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    require("name", &product.name)?;
    in_range("dept", i64::from(product.dept), 1, 100)?;
    validate_price("price", product.price)?;
    Ok(())
}

/// Validates a store: square footage 1000..=10000.
pub fn validate_store(store: &Store) -> ValidationResult<()> {
    require("name", &store.name)?;
    require("managerName", &store.manager_name)?;
    validate_address(&store.address)?;
    in_range("sqFt", i64::from(store.sq_ft), 1000, 10_000)?;
    Ok(())
}

/// Validates an order.
///
/// ## Rules
/// - 1..=30 details, each quantity 1..=10
/// - scalar ids and counters inside their generated ranges
/// - purchase order is 15 ASCII letters/digits
/// - shipping address equals the embedded customer's address
/// - embedded product and store snapshots are themselves valid
pub fn validate_order(order: &Order) -> ValidationResult<()> {
    in_range(
        "details",
        order.details.len() as i64,
        MIN_ORDER_DETAILS as i64,
        MAX_ORDER_DETAILS as i64,
    )?;
    for detail in &order.details {
        validate_quantity(detail.quantity)?;
        validate_product(&detail.product)?;
    }

    in_range("warehouseId", i64::from(order.warehouse_id), 1, 9999)?;
    in_range("invoiceId", i64::from(order.invoice_id), 1, 9999)?;
    in_range("weight", i64::from(order.weight), 1, 9999)?;
    in_range("totalPieces", i64::from(order.total_pieces), 1, 9999)?;
    in_range("billingDept", i64::from(order.billing_dept), 1, 9999)?;
    in_range("orderType", i64::from(order.order_type), 1, 10)?;
    in_range("employeeId", i64::from(order.employee_id), 1, 234)?;
    validate_price("total", order.total)?;
    in_range("store.sqFt", i64::from(order.store.sq_ft), 1000, 10_000)?;

    if order.purchase_order.len() != PURCHASE_ORDER_LEN
        || !order.purchase_order.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(ValidationError::InvalidFormat {
            field: "purchaseOrder".to_string(),
            reason: format!("expected {PURCHASE_ORDER_LEN} alphanumeric characters"),
        });
    }

    if order.shipping_address != order.customer.address {
        return Err(ValidationError::Mismatch {
            field: "shippingAddress".to_string(),
            other: "customer.address".to_string(),
        });
    }

    exact_count("customer.emails", order.customer.emails.len(), EMAILS_PER_CUSTOMER)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{fake_customer, fake_order, fake_product, fake_store};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_order() -> Order {
        let mut rng = StdRng::seed_from_u64(3);
        let customers = vec![fake_customer(&mut rng).snapshot()];
        let stores = vec![fake_store(&mut rng).snapshot()];
        let products = vec![fake_product(&mut rng), fake_product(&mut rng)];
        fake_order(&mut rng, &customers, &stores, &products, chrono::Utc::now()).unwrap()
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(10).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(11).is_err());
    }

    #[test]
    fn test_validate_order_detail_bounds() {
        let mut order = sample_order();
        assert!(validate_order(&order).is_ok());

        let detail = order.details[0].clone();
        order.details.clear();
        assert!(validate_order(&order).is_err());

        order.details = vec![detail.clone(); MAX_ORDER_DETAILS];
        assert!(validate_order(&order).is_ok());

        order.details.push(detail);
        assert!(validate_order(&order).is_err());
    }

    #[test]
    fn test_validate_order_rejects_bad_quantity() {
        let mut order = sample_order();
        order.details[0].quantity = MAX_DETAIL_QUANTITY + 1;
        assert!(matches!(
            validate_order(&order),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "details.quantity"
        ));
    }

    #[test]
    fn test_validate_order_shipping_address_mismatch() {
        let mut order = sample_order();
        order.shipping_address.zip = "00000-bad".to_string();
        assert!(matches!(
            validate_order(&order),
            Err(ValidationError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_validate_order_purchase_order_format() {
        let mut order = sample_order();
        order.purchase_order = "short".to_string();
        assert!(validate_order(&order).is_err());

        order.purchase_order = "ABCDEFGHIJKLMN!".to_string();
        assert!(validate_order(&order).is_err());
    }

    #[test]
    fn test_validate_customer_cardinality() {
        let mut customer = fake_customer(&mut StdRng::seed_from_u64(5));
        assert!(validate_customer(&customer).is_ok());

        customer.phones.pop();
        assert!(matches!(
            validate_customer(&customer),
            Err(ValidationError::CardinalityMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_validate_store_square_footage() {
        let mut store = fake_store(&mut StdRng::seed_from_u64(6));
        store.sq_ft = 999;
        assert!(validate_store(&store).is_err());
        store.sq_ft = 10_000;
        assert!(validate_store(&store).is_ok());
    }

    #[test]
    fn test_validate_product_ranges() {
        let mut product = fake_product(&mut StdRng::seed_from_u64(8));
        product.dept = 101;
        assert!(validate_product(&product).is_err());
        product.dept = 1;
        product.price = crate::Money::from_cents(0);
        assert!(validate_product(&product).is_err());
    }
}
