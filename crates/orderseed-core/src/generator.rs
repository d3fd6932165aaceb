//! # Fake-Data Generators
//!
//! Builds synthetic entities from a caller-supplied random number generator.
//! Personal data (names, addresses, phones, emails, company names, lorem
//! text) comes from the `fake` crate. Product names and closed value sets are
//! picked from the word lists below.
//!
//! ## Determinism
//! Every function takes `&mut R where R: Rng`. Pass a seeded `StdRng` and the
//! same seed yields the same field values. ObjectIds are the exception: they
//! embed a timestamp and a process counter.
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use orderseed_core::generator::fake_product;
//!
//! let a = fake_product(&mut StdRng::seed_from_u64(1));
//! let b = fake_product(&mut StdRng::seed_from_u64(1));
//! assert_eq!(a.name, b.name);
//! assert_eq!(a.price, b.price);
//! ```

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use fake::faker::address::en::{BuildingNumber, CityName, CountryCode, StateAbbr, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::FreeEmail;
use fake::faker::job::en::Title as JobTitle;
use fake::faker::lorem::en::Paragraph;
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, MAX_PRICE_CENTS, MIN_PRICE_CENTS};
use crate::types::*;
use crate::{
    EMAILS_PER_CUSTOMER, MAX_DETAIL_QUANTITY, MAX_ORDER_DETAILS, MIN_ORDER_DETAILS,
    PHONES_PER_CUSTOMER, PURCHASE_ORDER_LEN,
};

// =============================================================================
// Word Lists
// =============================================================================

const PRODUCT_ADJECTIVES: &[&str] = &[
    "Small", "Ergonomic", "Rustic", "Intelligent", "Gorgeous", "Incredible", "Fantastic",
    "Practical", "Sleek", "Awesome", "Generic", "Handcrafted", "Handmade", "Licensed",
    "Refined", "Unbranded", "Tasty", "Oriental", "Modern", "Elegant",
];

const PRODUCT_MATERIALS: &[&str] = &[
    "Steel", "Wooden", "Concrete", "Plastic", "Cotton", "Granite", "Rubber", "Metal", "Soft",
    "Fresh", "Frozen", "Bronze", "Marble",
];

const PRODUCT_NOUNS: &[&str] = &[
    "Chair", "Car", "Computer", "Keyboard", "Mouse", "Bike", "Ball", "Gloves", "Pants", "Shirt",
    "Table", "Shoes", "Hat", "Towels", "Soap", "Tuna", "Chicken", "Fish", "Cheese", "Bacon",
    "Pizza", "Salad", "Sausages", "Chips",
];

const DEPARTMENTS: &[&str] = &[
    "Automotive", "Baby", "Beauty", "Books", "Clothing", "Computers", "Electronics", "Games",
    "Garden", "Grocery", "Health", "Home", "Industrial", "Jewelery", "Kids", "Movies", "Music",
    "Outdoors", "Shoes", "Sports", "Tools", "Toys",
];

const FRUITS: &[&str] = &[
    "Apple", "Apricot", "Banana", "Blueberry", "Cherry", "Coconut", "Lemon", "Lime", "Mango",
    "Orange", "Peach", "Pear", "Pumpkin", "Raspberry", "Strawberry",
];

const DISH_ADJECTIVES: &[&str] = &[
    "Crispy", "Grilled", "Roasted", "Smoked", "Spicy", "Stewed", "Tangy", "Zesty",
];

const MEATS: &[&str] = &["Beef", "Chicken", "Duck", "Lamb", "Pork", "Salmon", "Turkey"];

const VEGETABLES: &[&str] = &[
    "Asparagus", "Broccoli", "Carrots", "Leeks", "Mushrooms", "Peppers", "Potatoes", "Spinach",
];

const CLASSIC_DISHES: &[&str] = &[
    "Caesar Salad", "Chicken Milanese", "Fish and Chips", "Lasagne", "Pad Thai", "Paella",
    "Ramen", "Risotto", "Shepherd's Pie", "Tacos",
];

// =============================================================================
// Helpers
// =============================================================================

/// Picks one value from a non-empty constant set.
fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

/// A random price between $0.01 and $10,000.00.
pub fn fake_price<R: Rng + ?Sized>(rng: &mut R) -> Money {
    Money::from_cents(rng.gen_range(MIN_PRICE_CENTS..=MAX_PRICE_CENTS))
}

/// `len` random ASCII letters and digits.
pub fn fake_alphanumeric<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

// =============================================================================
// Product Names
// =============================================================================

/// "Sleek Granite Keyboard"
pub fn fake_commerce_product_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        pick(rng, PRODUCT_ADJECTIVES),
        pick(rng, PRODUCT_MATERIALS),
        pick(rng, PRODUCT_NOUNS)
    )
}

/// "Mango Pie", "Smoked Duck with Leeks", or a classic dish.
pub fn fake_dish<R: Rng + ?Sized>(rng: &mut R) -> String {
    match rng.gen_range(0..3) {
        0 => format!("{} Pie", pick(rng, FRUITS)),
        1 => format!(
            "{} {} with {}",
            pick(rng, DISH_ADJECTIVES),
            pick(rng, MEATS),
            pick(rng, VEGETABLES)
        ),
        _ => pick(rng, CLASSIC_DISHES).to_string(),
    }
}

pub fn fake_department<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, DEPARTMENTS).to_string()
}

/// A product name drawn uniformly from one of three sources.
pub fn fake_product_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    match rng.gen_range(0..3) {
        0 => fake_commerce_product_name(rng),
        1 => fake_dish(rng),
        _ => fake_department(rng),
    }
}

// =============================================================================
// Entities
// =============================================================================

pub fn fake_address<R: Rng + ?Sized>(rng: &mut R) -> Address {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);

    Address {
        city: CityName().fake_with_rng(rng),
        country: CountryCode().fake_with_rng(rng),
        state: StateAbbr().fake_with_rng(rng),
        street: format!("{number} {street}"),
        zip: ZipCode().fake_with_rng(rng),
    }
}

/// A customer with one address, 2 phones and 3 emails.
pub fn fake_customer<R: Rng + ?Sized>(rng: &mut R) -> Customer {
    let address = fake_address(rng);

    let phones = (0..PHONES_PER_CUSTOMER)
        .map(|_| Phone {
            kind: pick(rng, ContactType::ALL),
            number: PhoneNumber().fake_with_rng(rng),
        })
        .collect();

    let emails = (0..EMAILS_PER_CUSTOMER)
        .map(|_| Email {
            kind: pick(rng, ContactType::ALL),
            email: FreeEmail().fake_with_rng(rng),
        })
        .collect();

    Customer {
        id: ObjectId::new(),
        first_name: FirstName().fake_with_rng(rng),
        last_name: LastName().fake_with_rng(rng),
        title: JobTitle().fake_with_rng(rng),
        address,
        phones,
        emails,
    }
}

pub fn fake_product<R: Rng + ?Sized>(rng: &mut R) -> Product {
    Product {
        id: ObjectId::new(),
        name: fake_product_name(rng),
        dept: rng.gen_range(1..=100),
        price: fake_price(rng),
        description: Paragraph(1..4).fake_with_rng(rng),
    }
}

pub fn fake_store<R: Rng + ?Sized>(rng: &mut R) -> Store {
    Store {
        id: ObjectId::new(),
        name: CompanyName().fake_with_rng(rng),
        address: fake_address(rng),
        manager_name: Name().fake_with_rng(rng),
        region: pick(rng, Region::ALL),
        store_type: pick(rng, StoreType::ALL),
        sq_ft: rng.gen_range(1000..=10_000),
    }
}

/// An order referencing a random customer, a random store and 1..=30 random
/// products.
///
/// Every date field is set to `now`. The shipping address is the chosen
/// customer's address.
///
/// ## Errors
/// `CoreError::EmptyPool` when any of the three pools is empty.
pub fn fake_order<R: Rng + ?Sized>(
    rng: &mut R,
    customers: &[CustomerSnapshot],
    stores: &[StoreSnapshot],
    products: &[Product],
    now: DateTime<Utc>,
) -> CoreResult<Order> {
    let customer = customers
        .choose(rng)
        .ok_or_else(|| CoreError::empty_pool("customers"))?
        .clone();
    let store = stores
        .choose(rng)
        .ok_or_else(|| CoreError::empty_pool("stores"))?
        .clone();
    if products.is_empty() {
        return Err(CoreError::empty_pool("products"));
    }

    let detail_count = rng.gen_range(MIN_ORDER_DETAILS..=MAX_ORDER_DETAILS);
    let details = (0..detail_count)
        .map(|_| OrderDetail {
            quantity: rng.gen_range(1..=MAX_DETAIL_QUANTITY),
            product: products[rng.gen_range(0..products.len())].clone(),
        })
        .collect();

    Ok(Order {
        id: ObjectId::new(),
        order_date: now,
        warehouse_id: rng.gen_range(1..=9999),
        fill_date: now,
        purchase_order: fake_alphanumeric(rng, PURCHASE_ORDER_LEN),
        invoice_id: rng.gen_range(1..=9999),
        invoice_date: now,
        delivery_method: pick(rng, DeliveryMethod::ALL),
        weight: rng.gen_range(1..=9999),
        total_pieces: rng.gen_range(1..=9999),
        pick_date: now,
        shipping_method: pick(rng, ShippingMethod::ALL),
        billing_dept: rng.gen_range(1..=9999),
        order_status: pick(rng, OrderStatus::ALL),
        shipping_status: pick(rng, ShippingStatus::ALL),
        delivery_date: now,
        order_type: rng.gen_range(1..=10),
        employee_id: rng.gen_range(1..=234),
        total: fake_price(rng),
        details,
        shipping_address: customer.address.clone(),
        customer,
        store,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_customer, validate_order, validate_product, validate_store};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_generated_entities_pass_validation() {
        let mut rng = rng();
        for _ in 0..200 {
            validate_customer(&fake_customer(&mut rng)).unwrap();
            validate_product(&fake_product(&mut rng)).unwrap();
            validate_store(&fake_store(&mut rng)).unwrap();
        }
    }

    #[test]
    fn test_product_names_come_from_three_sources() {
        let mut rng = rng();
        let names: Vec<String> = (0..500).map(|_| fake_product_name(&mut rng)).collect();

        assert!(names.iter().any(|n| DEPARTMENTS.contains(&n.as_str())));
        assert!(names.iter().any(|n| n.ends_with(" Pie") || n.contains(" with ")));
        assert!(names.iter().any(|n| n.split(' ').count() == 3
            && PRODUCT_NOUNS.iter().any(|noun| n.ends_with(noun))));
    }

    #[test]
    fn test_fruit_pies_cover_query_probes() {
        let mut rng = rng();
        let pies: std::collections::HashSet<String> = (0..2000)
            .map(|_| fake_dish(&mut rng))
            .filter(|d| d.ends_with(" Pie"))
            .collect();

        for name in crate::plan::DEFAULT_PROBE_PRODUCTS {
            assert!(pies.contains(*name), "{name} never generated");
        }
    }

    #[test]
    fn test_order_references_pool_entries() {
        let mut rng = rng();
        let customers: Vec<CustomerSnapshot> =
            (0..5).map(|_| fake_customer(&mut rng).snapshot()).collect();
        let stores: Vec<StoreSnapshot> = (0..5).map(|_| fake_store(&mut rng).snapshot()).collect();
        let products: Vec<Product> = (0..20).map(|_| fake_product(&mut rng)).collect();
        let now = bson::DateTime::now().to_chrono();

        for _ in 0..100 {
            let order = fake_order(&mut rng, &customers, &stores, &products, now).unwrap();
            validate_order(&order).unwrap();

            assert!(customers.contains(&order.customer));
            assert!(stores.contains(&order.store));
            assert!(order.details.iter().all(|d| products.contains(&d.product)));
            assert_eq!(order.shipping_address, order.customer.address);
            assert_eq!(order.order_date, now);
            assert_eq!(order.delivery_date, now);
        }
    }

    #[test]
    fn test_order_needs_every_pool() {
        let mut rng = rng();
        let customers = vec![fake_customer(&mut rng).snapshot()];
        let stores = vec![fake_store(&mut rng).snapshot()];
        let products = vec![fake_product(&mut rng)];
        let now = Utc::now();

        let err = fake_order(&mut rng, &[], &stores, &products, now).unwrap_err();
        assert!(matches!(err, CoreError::EmptyPool { ref entity } if entity == "customers"));

        let err = fake_order(&mut rng, &customers, &[], &products, now).unwrap_err();
        assert!(matches!(err, CoreError::EmptyPool { ref entity } if entity == "stores"));

        let err = fake_order(&mut rng, &customers, &stores, &[], now).unwrap_err();
        assert!(matches!(err, CoreError::EmptyPool { ref entity } if entity == "products"));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = fake_customer(&mut StdRng::seed_from_u64(9));
        let b = fake_customer(&mut StdRng::seed_from_u64(9));
        assert_eq!(a.first_name, b.first_name);
        assert_eq!(a.address, b.address);
        assert_eq!(a.emails, b.emails);
    }

    #[test]
    fn test_purchase_order_is_alphanumeric() {
        let code = fake_alphanumeric(&mut rng(), PURCHASE_ORDER_LEN);
        assert_eq!(code.len(), 15);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
