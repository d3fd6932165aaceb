//! # Domain Types
//!
//! The four entity kinds written by the seeder, plus the partial snapshots
//! that orders embed.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │     Product     │   │      Store      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  _id            │   │  _id            │   │  _id            │       │
//! │  │  address        │   │  dept  1..=100  │   │  region   (9)   │       │
//! │  │  phones  ×2     │   │  price "12.34"  │   │  storeType(6)   │       │
//! │  │  emails  ×3     │   │  description    │   │  sqFt           │       │
//! │  └────────┬────────┘   └────────┬────────┘   └────────┬────────┘       │
//! │           │ minus phones        │ full copy           │ minus address  │
//! │           ▼                     ▼                     ▼                │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │ Order: customer snapshot, store snapshot, details[1..=30]        │  │
//! │  │        (quantity + product snapshot), shippingAddress            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orders carry full copies of what they reference rather than foreign keys.
//! Field names are camelCase in documents.

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Closed Value Sets
// =============================================================================

/// Declares a closed set of string values with a stable wire name per variant.
macro_rules! value_set {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The value as stored in documents.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

value_set! {
    /// Kind of a phone number or email address.
    ContactType {
        Work => "work",
        Home => "home",
        Mobile => "mobile",
    }
}

value_set! {
    /// Sales region of a store.
    Region {
        Midwest => "Midwest",
        South => "South",
        West => "West",
        North => "North",
        GreatLakes => "Great Lakes",
        SunBelt => "Sun Belt",
        SoCal => "SoCal",
        NorCal => "NorCal",
        NewEngland => "New England",
    }
}

value_set! {
    /// Store format.
    StoreType {
        SuperStore => "Super Store",
        Standard => "Standard",
        Small => "Small",
        Urban => "Urban",
        Custom => "Custom",
        Embedded => "Embedded",
    }
}

value_set! {
    DeliveryMethod {
        DoorDash => "Door Dash",
        Uber => "Uber",
        Local => "Local",
        Truck => "Truck",
        CargoShip => "Cargo Ship",
        Plane => "Plane",
        Rail => "Rail",
    }
}

value_set! {
    ShippingMethod {
        Drop => "Drop",
        Freight => "Freight",
        Carrier => "Carrier",
        Usps => "USPS",
    }
}

value_set! {
    /// Fulfilment state of an order.
    OrderStatus {
        Received => "Received",
        Accepted => "Accepted",
        Processed => "Processed",
        Filling => "Filling",
        Filled => "Filled",
        Packed => "Packed",
        Shipped => "Shipped",
        Cancelled => "Cancelled",
    }
}

value_set! {
    /// Carrier state of an order.
    ShippingStatus {
        Ticketed => "Ticketed",
        InTransit => "In Transit",
        AtWarehouse => "At Warehouse",
        OutForDelivery => "Out for Delivery",
        Delivered => "Delivered",
        Delayed => "Delayed",
        Cancelled => "Cancelled",
    }
}

// =============================================================================
// Shared Parts
// =============================================================================

/// A postal address shared by customers and stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    /// ISO 3166 alpha-2 code.
    pub country: String,
    /// Two-letter state abbreviation.
    pub state: String,
    pub street: String,
    pub zip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phone {
    #[serde(rename = "type")]
    pub kind: ContactType,
    pub number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    #[serde(rename = "type")]
    pub kind: ContactType,
    pub email: String,
}

// =============================================================================
// Customer
// =============================================================================

/// A synthetic customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    /// Job title.
    pub title: String,
    pub address: Address,
    pub phones: Vec<Phone>,
    pub emails: Vec<Email>,
}

impl Customer {
    /// The copy of this customer that orders embed.
    pub fn snapshot(&self) -> CustomerSnapshot {
        CustomerSnapshot {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            title: self.title.clone(),
            address: self.address.clone(),
            emails: self.emails.clone(),
        }
    }
}

/// A customer without its phone list, as loaded for order generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSnapshot {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub address: Address,
    pub emails: Vec<Email>,
}

// =============================================================================
// Product
// =============================================================================

/// A synthetic product. Orders embed the full document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    /// Department id, 1..=100.
    pub dept: i32,
    pub price: Money,
    pub description: String,
}

// =============================================================================
// Store
// =============================================================================

/// A synthetic store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub address: Address,
    pub manager_name: String,
    pub region: Region,
    pub store_type: StoreType,
    /// Square footage, 1000..=10000.
    pub sq_ft: i32,
}

impl Store {
    /// The copy of this store that orders embed.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            id: self.id,
            name: self.name.clone(),
            manager_name: self.manager_name.clone(),
            region: self.region,
            store_type: self.store_type,
            sq_ft: self.sq_ft,
        }
    }
}

/// A store without its address, as loaded for order generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub manager_name: String,
    pub region: Region,
    pub store_type: StoreType,
    pub sq_ft: i32,
}

// =============================================================================
// Order
// =============================================================================

/// One line item: a quantity of a product copied into the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    /// 1..=10.
    pub quantity: i32,
    pub product: Product,
}

/// A synthetic order.
///
/// All date fields hold the same instant, the moment the order was generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub order_date: DateTime<Utc>,
    pub warehouse_id: i32,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub fill_date: DateTime<Utc>,
    pub purchase_order: String,
    pub invoice_id: i32,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub invoice_date: DateTime<Utc>,
    pub delivery_method: DeliveryMethod,
    pub weight: i32,
    pub total_pieces: i32,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub pick_date: DateTime<Utc>,
    pub shipping_method: ShippingMethod,
    pub billing_dept: i32,
    pub order_status: OrderStatus,
    pub shipping_status: ShippingStatus,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub delivery_date: DateTime<Utc>,
    pub order_type: i32,
    pub employee_id: i32,
    pub total: Money,
    pub details: Vec<OrderDetail>,
    pub customer: CustomerSnapshot,
    pub shipping_address: Address,
    pub store: StoreSnapshot,
}

// =============================================================================
// Unit Tests
// =============================================================================
