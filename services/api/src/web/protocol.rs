//! services/api/src/web/protocol.rs
//!
//! Wire types shared by all endpoints: the uniform response envelope, the
//! typed request payloads, and the response DTOs.

use bookmarket_core::domain::{Book, Message, Transaction};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

//=========================================================================================
// Response Envelope
//=========================================================================================

/// The uniform `{success, data, message}` wrapper every endpoint returns.
#[derive(Serialize, ToSchema)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
}

impl<T> Envelope<T> {
    pub fn ok(data: T, message: &str) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.to_string(),
        }
    }

    /// Success with a null payload. Lookups that find nothing are not errors;
    /// callers check for null.
    pub fn null(message: &str) -> Self {
        Self {
            success: true,
            data: None,
            message: message.to_string(),
        }
    }
}

//=========================================================================================
// Response DTOs
//=========================================================================================

/// A book as it appears on the wire.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub image_url: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            price: book.price,
            description: book.description,
            image_url: book.image_url,
            status: book.status,
            seller_id: book.seller_id,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
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

impl From<Transaction> for TransactionDto {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            book_id: transaction.book_id,
            seller_id: transaction.seller_id,
            buyer_id: transaction.buyer_id,
            buyer_amount: transaction.buyer_amount,
            seller_amount: transaction.seller_amount,
            status: transaction.status,
            created_at: transaction.created_at,
            updated_at: transaction.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub transaction_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Message> for MessageDto {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            transaction_id: message.transaction_id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content,
            is_read: message.is_read,
            created_at: message.created_at,
            updated_at: message.updated_at,
        }
    }
}

/// The payload carrying an external identity back to the caller.
#[derive(Serialize, ToSchema)]
pub struct OpenidDto {
    pub openid: String,
}

//=========================================================================================
// Request Payloads
//=========================================================================================

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListBooksPayload {
    pub status: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchBookPayload {
    pub title: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishBookPayload {
    pub title: String,
    #[serde(deserialize_with = "number_or_string")]
    pub price: f64,
    pub description: Option<String>,
    pub image_url: String,
    pub status: Option<String>,
    pub seller_id: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetBookByIdPayload {
    pub book_id: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookStatusPayload {
    pub book_id: String,
    pub status: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBooksPayload {
    pub user_id: String,
    pub status: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionPayload {
    pub book_id: String,
    pub seller_id: String,
    pub buyer_id: String,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub buyer_amount: Option<f64>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub seller_amount: Option<f64>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetTransactionByIdPayload {
    pub transaction_id: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserTransactionsPayload {
    pub user_id: String,
    /// "buyer" or "seller"; anything else (or absent) matches either side.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveUserPayload {
    pub openid: String,
    pub user_info: Value,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessagePayload {
    pub transaction_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub is_read: Option<bool>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserMessagesPayload {
    pub user_id: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkMessageReadPayload {
    pub message_id: String,
}

//=========================================================================================
// Amount Coercion
//=========================================================================================

/// Clients send amounts either as JSON numbers or as numeric strings
/// (`"19.99"`); both decode to `f64`.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("'{}' is not a number", s))),
        }
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrString::deserialize(deserializer)?.into_f64()
}

fn opt_number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrString>::deserialize(deserializer)?
        .map(NumberOrString::into_f64)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_accepts_number_or_numeric_string() {
        let from_number: PublishBookPayload =
            serde_json::from_str(r#"{"title":"t","price":19.99,"imageUrl":"u"}"#).unwrap();
        assert_eq!(from_number.price, 19.99);

        let from_string: PublishBookPayload =
            serde_json::from_str(r#"{"title":"t","price":"19.99","imageUrl":"u"}"#).unwrap();
        assert_eq!(from_string.price, 19.99);
    }

    #[test]
    fn price_rejects_garbage() {
        let result = serde_json::from_str::<PublishBookPayload>(
            r#"{"title":"t","price":"cheap","imageUrl":"u"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn missing_amounts_decode_as_none() {
        let payload: CreateTransactionPayload =
            serde_json::from_str(r#"{"bookId":"b","sellerId":"s","buyerId":"u"}"#).unwrap();
        assert!(payload.buyer_amount.is_none());
        assert!(payload.seller_amount.is_none());
    }
}
