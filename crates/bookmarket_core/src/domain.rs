//! crates/bookmarket_core/src/domain.rs
//!
//! Defines the pure, core data structures for the marketplace.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Status a freshly published book starts in.
pub const BOOK_STATUS_AVAILABLE: &str = "available";

/// Status every new transaction starts in.
pub const TRANSACTION_STATUS_PENDING: &str = "pending";

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a mock external identity for a caller.
///
/// Real identity would come from an OAuth exchange; this system deliberately
/// substitutes a random identifier instead.
pub fn mock_openid() -> String {
    format!("user_{}", Uuid::new_v4())
}

/// A book listed for sale.
#[derive(Debug, Clone)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub image_url: String,
    /// Open-ended tag ("available", "sold", "reserved", ...); never validated.
    pub status: String,
    pub seller_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn new(
        title: String,
        price: f64,
        description: String,
        image_url: String,
        status: Option<String>,
        seller_id: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: fresh_id(),
            title,
            price,
            description,
            image_url,
            status: status.unwrap_or_else(|| BOOK_STATUS_AVAILABLE.to_string()),
            seller_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An exchange between a buyer and a seller over one book.
///
/// The `book_id` / `seller_id` / `buyer_id` references are advisory; nothing
/// checks they point at real documents.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: String,
    pub book_id: String,
    pub seller_id: String,
    pub buyer_id: String,
    pub buyer_amount: f64,
    pub seller_amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        book_id: String,
        seller_id: String,
        buyer_id: String,
        buyer_amount: f64,
        seller_amount: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: fresh_id(),
            book_id,
            seller_id,
            buyer_id,
            buyer_amount,
            seller_amount,
            status: TRANSACTION_STATUS_PENDING.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A marketplace user, keyed for upsert by the external identity.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub openid: String,
    /// Opaque profile payload supplied by the client; stored as-is.
    pub user_info: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(openid: String, user_info: Value) -> Self {
        let now = Utc::now();
        Self {
            id: fresh_id(),
            openid,
            user_info,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A message exchanged between two users, tied to a transaction.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub transaction_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        transaction_id: String,
        sender_id: String,
        receiver_id: String,
        content: String,
        is_read: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: fresh_id(),
            transaction_id,
            sender_id,
            receiver_id,
            content,
            is_read,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Which side of a transaction a user is on, for filtered listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionRole {
    Buyer,
    Seller,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn book_ids_are_unique_and_non_empty() {
        let a = Book::new(
            "Go in Action".into(),
            19.99,
            String::new(),
            "http://x/y.png".into(),
            None,
            None,
        );
        let b = Book::new(
            "Go in Action".into(),
            19.99,
            String::new(),
            "http://x/y.png".into(),
            None,
            None,
        );
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn book_defaults_to_available() {
        let book = Book::new(
            "Rust".into(),
            10.0,
            String::new(),
            "http://img".into(),
            None,
            None,
        );
        assert_eq!(book.status, BOOK_STATUS_AVAILABLE);
        assert_eq!(book.created_at, book.updated_at);
    }

    #[test]
    fn book_keeps_explicit_status() {
        let book = Book::new(
            "Rust".into(),
            10.0,
            String::new(),
            "http://img".into(),
            Some("reserved".into()),
            Some("seller-1".into()),
        );
        assert_eq!(book.status, "reserved");
    }

    #[test]
    fn transaction_starts_pending() {
        let t = Transaction::new("b1".into(), "s1".into(), "u1".into(), 5.0, 4.5);
        assert_eq!(t.status, TRANSACTION_STATUS_PENDING);
        assert!(!t.id.is_empty());
    }

    #[test]
    fn user_carries_opaque_info() {
        let u = User::new("user_abc".into(), json!({"nick": "ada"}));
        assert_eq!(u.user_info["nick"], "ada");
    }

    #[test]
    fn mock_openids_differ() {
        let a = mock_openid();
        let b = mock_openid();
        assert!(a.starts_with("user_"));
        assert_ne!(a, b);
    }
}
