//! crates/bookmarket_core/src/ports.rs
//!
//! Defines the storage contract (trait) for the marketplace.
//! The trait forms the boundary of the hexagonal architecture, allowing the
//! handlers to be independent of the concrete document store.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Book, Message, Transaction, TransactionRole};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors of the backing store.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("storage error: {0}")]
    Storage(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Storage Port (Trait)
//=========================================================================================

/// One method per storage operation the API performs.
///
/// Lookups return `Ok(None)` when nothing matches; absence is not an error.
/// Every list method sorts by creation time, newest first.
#[async_trait]
pub trait MarketStore: Send + Sync {
    // --- Books ---
    async fn insert_book(&self, book: &Book) -> PortResult<()>;

    async fn get_book(&self, book_id: &str) -> PortResult<Option<Book>>;

    async fn list_books(&self, status: Option<&str>) -> PortResult<Vec<Book>>;

    async fn list_books_by_seller(
        &self,
        seller_id: &str,
        status: Option<&str>,
    ) -> PortResult<Vec<Book>>;

    /// First case-insensitive substring match on title among `available`
    /// books. Single-result by design.
    async fn search_available_book(&self, title: &str) -> PortResult<Option<Book>>;

    /// Sets the status tag and refreshes `updatedAt`. No existence check; a
    /// missing id is a silent no-op.
    async fn update_book_status(&self, book_id: &str, status: &str) -> PortResult<()>;

    /// The newest `available` books, capped at `limit`.
    async fn newest_available_books(&self, limit: i64) -> PortResult<Vec<Book>>;

    // --- Transactions ---
    async fn insert_transaction(&self, transaction: &Transaction) -> PortResult<()>;

    async fn get_transaction(&self, transaction_id: &str) -> PortResult<Option<Transaction>>;

    /// Transactions where the user is the buyer, the seller, or (with no
    /// role) either side.
    async fn list_user_transactions(
        &self,
        user_id: &str,
        role: Option<TransactionRole>,
    ) -> PortResult<Vec<Transaction>>;

    // --- Users ---
    /// Upsert keyed on the external identity: refresh `userInfo` and
    /// `updatedAt` if the user exists, insert otherwise.
    async fn upsert_user(&self, openid: &str, user_info: Value) -> PortResult<()>;

    // --- Messages ---
    async fn insert_message(&self, message: &Message) -> PortResult<()>;

    async fn list_messages_for_receiver(&self, receiver_id: &str) -> PortResult<Vec<Message>>;

    /// Sets `isRead` and refreshes `updatedAt`. No existence check.
    async fn mark_message_read(&self, message_id: &str) -> PortResult<()>;
}
