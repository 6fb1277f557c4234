//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `MarketStore` port from the `core` crate. It handles all interactions
//! with the MongoDB document store.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, to_bson};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use bookmarket_core::domain::{
    Book, Message, Transaction, TransactionRole, User, BOOK_STATUS_AVAILABLE,
};
use bookmarket_core::ports::{MarketStore, PortError, PortResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `MarketStore` port.
#[derive(Clone)]
pub struct MongoAdapter {
    db: Database,
}

impl MongoAdapter {
    /// Creates a new `MongoAdapter` over an already-selected database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn books(&self) -> Collection<BookRecord> {
        self.db.collection("books")
    }

    fn transactions(&self) -> Collection<TransactionRecord> {
        self.db.collection("transactions")
    }

    fn users(&self) -> Collection<UserRecord> {
        self.db.collection("users")
    }

    fn messages(&self) -> Collection<MessageRecord> {
        self.db.collection("messages")
    }
}

fn storage_err(e: mongodb::error::Error) -> PortError {
    PortError::Storage(e.to_string())
}

/// Timestamps are stored as RFC 3339 strings at a fixed millisecond
/// precision. The precision must not vary: the list queries sort these
/// strings lexicographically, and a shorter fraction would sort after a
/// longer one that is chronologically earlier.
mod rfc3339_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

fn now_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookRecord {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    price: f64,
    description: String,
    image_url: String,
    status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seller_id: Option<String>,
    #[serde(with = "rfc3339_millis")]
    created_at: DateTime<Utc>,
    #[serde(with = "rfc3339_millis")]
    updated_at: DateTime<Utc>,
}

impl BookRecord {
    fn from_domain(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            price: book.price,
            description: book.description.clone(),
            image_url: book.image_url.clone(),
            status: book.status.clone(),
            seller_id: book.seller_id.clone(),
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }

    fn to_domain(self) -> Book {
        Book {
            id: self.id,
            title: self.title,
            price: self.price,
            description: self.description,
            image_url: self.image_url,
            status: self.status,
            seller_id: self.seller_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRecord {
    #[serde(rename = "_id")]
    id: String,
    book_id: String,
    seller_id: String,
    buyer_id: String,
    buyer_amount: f64,
    seller_amount: f64,
    status: String,
    #[serde(with = "rfc3339_millis")]
    created_at: DateTime<Utc>,
    #[serde(with = "rfc3339_millis")]
    updated_at: DateTime<Utc>,
}

impl TransactionRecord {
    fn from_domain(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id.clone(),
            book_id: transaction.book_id.clone(),
            seller_id: transaction.seller_id.clone(),
            buyer_id: transaction.buyer_id.clone(),
            buyer_amount: transaction.buyer_amount,
            seller_amount: transaction.seller_amount,
            status: transaction.status.clone(),
            created_at: transaction.created_at,
            updated_at: transaction.updated_at,
        }
    }

    fn to_domain(self) -> Transaction {
        Transaction {
            id: self.id,
            book_id: self.book_id,
            seller_id: self.seller_id,
            buyer_id: self.buyer_id,
            buyer_amount: self.buyer_amount,
            seller_amount: self.seller_amount,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    #[serde(rename = "_id")]
    id: String,
    // The external identity keeps its historical storage name.
    #[serde(rename = "_openid")]
    openid: String,
    user_info: Value,
    #[serde(with = "rfc3339_millis")]
    created_at: DateTime<Utc>,
    #[serde(with = "rfc3339_millis")]
    updated_at: DateTime<Utc>,
}

impl UserRecord {
    fn from_domain(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            openid: user.openid.clone(),
            user_info: user.user_info.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageRecord {
    #[serde(rename = "_id")]
    id: String,
    transaction_id: String,
    sender_id: String,
    receiver_id: String,
    content: String,
    is_read: bool,
    #[serde(with = "rfc3339_millis")]
    created_at: DateTime<Utc>,
    #[serde(with = "rfc3339_millis")]
    updated_at: DateTime<Utc>,
}

impl MessageRecord {
    fn from_domain(message: &Message) -> Self {
        Self {
            id: message.id.clone(),
            transaction_id: message.transaction_id.clone(),
            sender_id: message.sender_id.clone(),
            receiver_id: message.receiver_id.clone(),
            content: message.content.clone(),
            is_read: message.is_read,
            created_at: message.created_at,
            updated_at: message.updated_at,
        }
    }

    fn to_domain(self) -> Message {
        Message {
            id: self.id,
            transaction_id: self.transaction_id,
            sender_id: self.sender_id,
            receiver_id: self.receiver_id,
            content: self.content,
            is_read: self.is_read,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

//=========================================================================================
// `MarketStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl MarketStore for MongoAdapter {
    async fn insert_book(&self, book: &Book) -> PortResult<()> {
        self.books()
            .insert_one(BookRecord::from_domain(book))
            .await
            .map_err(storage_err)?;
        Ok(())
    }

    async fn get_book(&self, book_id: &str) -> PortResult<Option<Book>> {
        let record = self
            .books()
            .find_one(doc! { "_id": book_id })
            .await
            .map_err(storage_err)?;
        Ok(record.map(BookRecord::to_domain))
    }

    async fn list_books(&self, status: Option<&str>) -> PortResult<Vec<Book>> {
        let mut filter = doc! {};
        if let Some(status) = status {
            filter.insert("status", status);
        }

        let records: Vec<BookRecord> = self
            .books()
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(storage_err)?
            .try_collect()
            .await
            .map_err(storage_err)?;

        Ok(records.into_iter().map(BookRecord::to_domain).collect())
    }

    async fn list_books_by_seller(
        &self,
        seller_id: &str,
        status: Option<&str>,
    ) -> PortResult<Vec<Book>> {
        let mut filter = doc! { "sellerId": seller_id };
        if let Some(status) = status {
            filter.insert("status", status);
        }

        let records: Vec<BookRecord> = self
            .books()
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(storage_err)?
            .try_collect()
            .await
            .map_err(storage_err)?;

        Ok(records.into_iter().map(BookRecord::to_domain).collect())
    }

    async fn search_available_book(&self, title: &str) -> PortResult<Option<Book>> {
        let filter = doc! {
            "title": { "$regex": title, "$options": "i" },
            "status": BOOK_STATUS_AVAILABLE,
        };
        let record = self.books().find_one(filter).await.map_err(storage_err)?;
        Ok(record.map(BookRecord::to_domain))
    }

    async fn update_book_status(&self, book_id: &str, status: &str) -> PortResult<()> {
        self.books()
            .update_one(
                doc! { "_id": book_id },
                doc! { "$set": { "status": status, "updatedAt": now_string() } },
            )
            .await
            .map_err(storage_err)?;
        Ok(())
    }

    async fn newest_available_books(&self, limit: i64) -> PortResult<Vec<Book>> {
        let records: Vec<BookRecord> = self
            .books()
            .find(doc! { "status": BOOK_STATUS_AVAILABLE })
            .sort(doc! { "createdAt": -1 })
            .limit(limit)
            .await
            .map_err(storage_err)?
            .try_collect()
            .await
            .map_err(storage_err)?;

        Ok(records.into_iter().map(BookRecord::to_domain).collect())
    }

    async fn insert_transaction(&self, transaction: &Transaction) -> PortResult<()> {
        self.transactions()
            .insert_one(TransactionRecord::from_domain(transaction))
            .await
            .map_err(storage_err)?;
        Ok(())
    }

    async fn get_transaction(&self, transaction_id: &str) -> PortResult<Option<Transaction>> {
        let record = self
            .transactions()
            .find_one(doc! { "_id": transaction_id })
            .await
            .map_err(storage_err)?;
        Ok(record.map(TransactionRecord::to_domain))
    }

    async fn list_user_transactions(
        &self,
        user_id: &str,
        role: Option<TransactionRole>,
    ) -> PortResult<Vec<Transaction>> {
        let filter = match role {
            Some(TransactionRole::Buyer) => doc! { "buyerId": user_id },
            Some(TransactionRole::Seller) => doc! { "sellerId": user_id },
            None => doc! {
                "$or": [ { "buyerId": user_id }, { "sellerId": user_id } ]
            },
        };

        let records: Vec<TransactionRecord> = self
            .transactions()
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(storage_err)?
            .try_collect()
            .await
            .map_err(storage_err)?;

        Ok(records
            .into_iter()
            .map(TransactionRecord::to_domain)
            .collect())
    }

    async fn upsert_user(&self, openid: &str, user_info: Value) -> PortResult<()> {
        let users = self.users();
        let existing = users
            .find_one(doc! { "_openid": openid })
            .await
            .map_err(storage_err)?;

        if existing.is_some() {
            let info = to_bson(&user_info).map_err(|e| PortError::Storage(e.to_string()))?;
            users
                .update_one(
                    doc! { "_openid": openid },
                    doc! { "$set": { "userInfo": info, "updatedAt": now_string() } },
                )
                .await
                .map_err(storage_err)?;
        } else {
            let user = User::new(openid.to_string(), user_info);
            users
                .insert_one(UserRecord::from_domain(&user))
                .await
                .map_err(storage_err)?;
        }

        Ok(())
    }

    async fn insert_message(&self, message: &Message) -> PortResult<()> {
        self.messages()
            .insert_one(MessageRecord::from_domain(message))
            .await
            .map_err(storage_err)?;
        Ok(())
    }

    async fn list_messages_for_receiver(&self, receiver_id: &str) -> PortResult<Vec<Message>> {
        let records: Vec<MessageRecord> = self
            .messages()
            .find(doc! { "receiverId": receiver_id })
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(storage_err)?
            .try_collect()
            .await
            .map_err(storage_err)?;

        Ok(records.into_iter().map(MessageRecord::to_domain).collect())
    }

    async fn mark_message_read(&self, message_id: &str) -> PortResult<()> {
        // No existence check: an absent id is a silent no-op.
        self.messages()
            .update_one(
                doc! { "_id": message_id },
                doc! { "$set": { "isRead": true, "updatedAt": now_string() } },
            )
            .await
            .map_err(storage_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use mongodb::bson::to_document;

    fn book_at(created_at: DateTime<Utc>) -> Book {
        Book {
            id: "book-1".to_string(),
            title: "Calculus".to_string(),
            price: 12.5,
            description: String::new(),
            image_url: "https://img.example/calculus.png".to_string(),
            status: "available".to_string(),
            seller_id: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn stored_timestamps_keep_fixed_precision() {
        let base = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        // 123.44 ms: rendered naively this would carry five fractional
        // digits and compare after a plain ".124" string despite being
        // chronologically earlier.
        let fine = base + Duration::nanoseconds(123_440_000);
        let coarse = base + Duration::milliseconds(124);

        let earlier = to_document(&BookRecord::from_domain(&book_at(fine))).unwrap();
        let later = to_document(&BookRecord::from_domain(&book_at(coarse))).unwrap();

        let earlier_str = earlier.get_str("createdAt").unwrap();
        let later_str = later.get_str("createdAt").unwrap();

        assert_eq!(earlier_str, "2026-01-02T03:04:05.123Z");
        assert_eq!(later_str, "2026-01-02T03:04:05.124Z");
        assert!(earlier_str < later_str);
    }

    #[test]
    fn stored_timestamps_round_trip() {
        let created = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap()
            + Duration::milliseconds(89);
        let doc = to_document(&BookRecord::from_domain(&book_at(created))).unwrap();
        let record: BookRecord = mongodb::bson::from_document(doc).unwrap();
        assert_eq!(record.to_domain().created_at, created);
    }

    #[test]
    fn now_string_has_millisecond_precision() {
        let stamp = now_string();
        assert!(stamp.ends_with('Z'));
        let fraction = stamp.rsplit('.').next().unwrap();
        // Three digits plus the trailing 'Z'.
        assert_eq!(fraction.len(), 4);
    }
}
