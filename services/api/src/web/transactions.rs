//! services/api/src/web/transactions.rs
//!
//! Handlers for the transaction endpoints.

use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use bookmarket_core::domain::{Transaction, TransactionRole};

use crate::error::ApiError;
use crate::web::extract::ApiJson;
use crate::web::protocol::{
    CreateTransactionPayload, Envelope, GetTransactionByIdPayload, TransactionDto,
    UserTransactionsPayload,
};
use crate::web::state::AppState;

/// Open a transaction between a buyer and a seller. Amounts are recorded, not
/// settled; the book/user references are never checked.
#[utoipa::path(
    post,
    path = "/api/createTransaction",
    request_body = CreateTransactionPayload,
    responses(
        (status = 200, description = "The created transaction", body = Envelope<TransactionDto>),
        (status = 400, description = "Missing bookId, sellerId or buyerId")
    )
)]
pub async fn create_transaction_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateTransactionPayload>,
) -> Result<Json<Envelope<TransactionDto>>, ApiError> {
    if payload.book_id.trim().is_empty()
        || payload.seller_id.trim().is_empty()
        || payload.buyer_id.trim().is_empty()
    {
        return Err(ApiError::Validation(
            "bookId, sellerId and buyerId are required".to_string(),
        ));
    }

    let transaction = Transaction::new(
        payload.book_id,
        payload.seller_id,
        payload.buyer_id,
        payload.buyer_amount.unwrap_or(0.0),
        payload.seller_amount.unwrap_or(0.0),
    );
    state.store.insert_transaction(&transaction).await?;

    Ok(Json(Envelope::ok(transaction.into(), "created")))
}

/// Exact-id lookup; an unknown id is a success with null data.
#[utoipa::path(
    post,
    path = "/api/getTransactionById",
    request_body = GetTransactionByIdPayload,
    responses((status = 200, description = "The transaction, or null data", body = Envelope<TransactionDto>))
)]
pub async fn get_transaction_by_id_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<GetTransactionByIdPayload>,
) -> Result<Json<Envelope<TransactionDto>>, ApiError> {
    let transaction = state.store.get_transaction(&payload.transaction_id).await?;
    Ok(Json(match transaction {
        Some(transaction) => Envelope::ok(transaction.into(), "fetched"),
        None => Envelope::null("fetched"),
    }))
}

/// A user's transactions. `type` narrows to the buyer or seller side; any
/// other value, or no value, matches either.
#[utoipa::path(
    post,
    path = "/api/getUserTransactions",
    request_body = UserTransactionsPayload,
    responses((status = 200, description = "Matching transactions", body = Envelope<Vec<TransactionDto>>))
)]
pub async fn get_user_transactions_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<UserTransactionsPayload>,
) -> Result<Json<Envelope<Vec<TransactionDto>>>, ApiError> {
    let role = payload.kind.as_deref().and_then(|kind| match kind {
        "buyer" => Some(TransactionRole::Buyer),
        "seller" => Some(TransactionRole::Seller),
        _ => None,
    });

    let transactions = state
        .store
        .list_user_transactions(&payload.user_id, role)
        .await?;

    Ok(Json(Envelope::ok(
        transactions.into_iter().map(TransactionDto::from).collect(),
        "fetched",
    )))
}
