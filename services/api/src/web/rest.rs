//! services/api/src/web/rest.rs
//!
//! The application router and the master definition for the OpenAPI
//! specification. The router is a plain function so the binary and the
//! integration tests share one route table.

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::web::protocol::{
    BookDto, CreateMessagePayload, CreateTransactionPayload, Envelope, GetBookByIdPayload,
    GetTransactionByIdPayload, ListBooksPayload, MarkMessageReadPayload, MessageDto, OpenidDto,
    PublishBookPayload, SaveUserPayload, SearchBookPayload, TransactionDto,
    UpdateBookStatusPayload, UserBooksPayload, UserMessagesPayload, UserTransactionsPayload,
};
use crate::web::state::AppState;
use crate::web::{books, health, messages, transactions, users};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        users::get_openid_handler,
        users::save_user_handler,
        books::get_books_handler,
        books::search_book_handler,
        books::publish_book_handler,
        books::get_book_by_id_handler,
        books::update_book_status_handler,
        books::get_user_books_handler,
        books::get_hot_books_handler,
        books::get_popular_books_handler,
        transactions::create_transaction_handler,
        transactions::get_transaction_by_id_handler,
        transactions::get_user_transactions_handler,
        messages::create_message_handler,
        messages::get_user_messages_handler,
        messages::mark_message_read_handler,
        health::health_handler,
    ),
    components(
        schemas(
            Envelope<BookDto>,
            Envelope<Vec<BookDto>>,
            Envelope<TransactionDto>,
            Envelope<Vec<TransactionDto>>,
            Envelope<MessageDto>,
            Envelope<Vec<MessageDto>>,
            Envelope<OpenidDto>,
            ListBooksPayload,
            SearchBookPayload,
            PublishBookPayload,
            GetBookByIdPayload,
            UpdateBookStatusPayload,
            UserBooksPayload,
            CreateTransactionPayload,
            GetTransactionByIdPayload,
            UserTransactionsPayload,
            SaveUserPayload,
            CreateMessagePayload,
            UserMessagesPayload,
            MarkMessageReadPayload,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "Book Market API", description = "Endpoints for the secondhand-book marketplace.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Router
//=========================================================================================

/// Builds the full application router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/getOpenid", get(users::get_openid_handler))
        .route("/saveUser", post(users::save_user_handler))
        .route("/getBooks", post(books::get_books_handler))
        .route("/searchBook", post(books::search_book_handler))
        .route("/publishBook", post(books::publish_book_handler))
        .route("/getBookById", post(books::get_book_by_id_handler))
        .route("/updateBookStatus", post(books::update_book_status_handler))
        .route("/getUserBooks", post(books::get_user_books_handler))
        .route("/getHotBooks", post(books::get_hot_books_handler))
        .route("/getPopularBooks", post(books::get_popular_books_handler))
        .route(
            "/createTransaction",
            post(transactions::create_transaction_handler),
        )
        .route(
            "/getTransactionById",
            post(transactions::get_transaction_by_id_handler),
        )
        .route(
            "/getUserTransactions",
            post(transactions::get_user_transactions_handler),
        )
        .route("/createMessage", post(messages::create_message_handler))
        .route(
            "/getUserMessages",
            post(messages::get_user_messages_handler),
        )
        .route(
            "/markMessageAsRead",
            post(messages::mark_message_read_handler),
        );

    Router::new()
        .nest("/api", api)
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .with_state(state)
}
