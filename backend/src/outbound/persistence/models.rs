//! Internal Diesel row structs for the traveler tables.
//!
//! These types never leave the persistence layer.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool, Text};

use super::schema::traveler_documents;

/// Row read from `traveler_documents`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = traveler_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TravelerDocumentRow {
    pub partition_key: String,
    pub body: serde_json::Value,
}

/// Insertable document row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = traveler_documents)]
pub(crate) struct NewTravelerDocumentRow<'a> {
    pub partition_key: &'a str,
    pub id: &'a str,
    pub body: serde_json::Value,
}

/// Row read from `travelers` through raw SQL, price cast to text.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct TravelerRow {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = Text)]
    pub country: String,
    #[diesel(sql_type = Bool)]
    pub is_new_client: bool,
    #[diesel(sql_type = Text)]
    pub total_tickets_gross_price: String,
}

/// `RETURNING id` row.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub(crate) struct InsertedId {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
}
