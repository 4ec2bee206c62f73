//! Sample entity types
//!
//! A small domain used by the command-line front end and the test
//! suites. It covers every shape the engine knows: atomic fields of
//! several categories, an enumeration, nullable and nested composites,
//! collections, self-reference and ignore markers.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reflect::{Reflect, TypeInfo};
use crate::schema::SchemaRegistry;
use crate::{impl_filter_enum, impl_record};

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Active,
    Suspended,
    Closed,
}

impl_filter_enum!(Status { Active, Suspended, Closed });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    pub country: String,
}

impl_record! {
    Address {
        street: String,
        city: String,
        postal_code as "postalCode": Option<String>,
        country: String,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    #[serde(default)]
    pub external_id: Option<String>,
    pub status: Status,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub born_on: Option<NaiveDate>,
    #[serde(default)]
    pub manager: Option<Box<Person>>,
    #[serde(default, skip_serializing)]
    pub password_hash: String,
}

impl_record! {
    Person {
        id: Uuid,
        name: String,
        age: i32,
        external_id as "externalId": Option<String>,
        status: Status,
        address: Option<Address>,
        tags: Vec<String>,
        born_on as "bornOn": Option<NaiveDate>,
        manager: Option<Box<Person>>,
        #[ignore] password_hash as "passwordHash": String,
    }
}

impl Person {
    /// Creates an active person with no optional data
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            age,
            external_id: None,
            status: Status::Active,
            address: None,
            tags: Vec::new(),
            born_on: None,
            manager: None,
            password_hash: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub sku: String,
    pub quantity: u16,
    pub unit_price: Decimal,
}

impl_record! {
    OrderLine {
        sku: String,
        quantity: u16,
        unit_price as "unitPrice": Decimal,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub number: u64,
    pub placed_at: NaiveDateTime,
    #[serde(default)]
    pub shipped_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub delivery_cutoff: Option<NaiveTime>,
    pub total: Decimal,
    #[serde(default)]
    pub discount: Option<f64>,
    pub paid: bool,
    #[serde(default)]
    pub priority: Option<char>,
    #[serde(default)]
    pub lines: Vec<OrderLine>,
    #[serde(default)]
    pub customer: Option<Person>,
}

impl_record! {
    Order {
        id: Uuid,
        number: u64,
        placed_at as "placedAt": NaiveDateTime,
        shipped_at as "shippedAt": Option<DateTime<FixedOffset>>,
        delivery_cutoff as "deliveryCutoff": Option<NaiveTime>,
        total: Decimal,
        discount: Option<f64>,
        paid: bool,
        priority: Option<char>,
        lines: Vec<OrderLine>,
        customer: Option<Person>,
    }
}

/// Self-referential category tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub parent: Option<Box<Category>>,
    #[serde(default)]
    pub children: Vec<Category>,
}

impl_record! {
    Category {
        id: i64,
        name: String,
        parent: Option<Box<Category>>,
        children: Vec<Category>,
    }
}

/// Internal audit record, hidden from schema discovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub actor: String,
    pub action: String,
    pub recorded_at: DateTime<FixedOffset>,
}

impl_record! {
    #[ignore]
    AuditEntry {
        actor: String,
        action: String,
        recorded_at as "recordedAt": DateTime<FixedOffset>,
    }
}

/// Demo types selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoType {
    Person,
    Address,
    Order,
    Category,
    Audit,
}

impl DemoType {
    pub fn type_info(&self) -> TypeInfo {
        match self {
            DemoType::Person => Person::type_info(),
            DemoType::Address => Address::type_info(),
            DemoType::Order => Order::type_info(),
            DemoType::Category => Category::type_info(),
            DemoType::Audit => AuditEntry::type_info(),
        }
    }
}

/// Marks every demo type for compilation
pub fn register(registry: &SchemaRegistry) {
    registry.mark::<Person>();
    registry.mark::<Address>();
    registry.mark::<Order>();
    registry.mark::<Category>();
    registry.mark::<AuditEntry>();
}
