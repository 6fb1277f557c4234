//! services/api/src/web/books.rs
//!
//! Handlers for the book endpoints.

use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use bookmarket_core::domain::Book;

use crate::error::ApiError;
use crate::web::extract::ApiJson;
use crate::web::protocol::{
    BookDto, Envelope, GetBookByIdPayload, ListBooksPayload, PublishBookPayload,
    SearchBookPayload, UpdateBookStatusPayload, UserBooksPayload,
};
use crate::web::state::AppState;

/// How many books the hot/popular queries return.
const HOT_BOOKS_LIMIT: i64 = 10;

fn into_dtos(books: Vec<Book>) -> Vec<BookDto> {
    books.into_iter().map(BookDto::from).collect()
}

/// List books, optionally filtered by status, newest first.
#[utoipa::path(
    post,
    path = "/api/getBooks",
    request_body = ListBooksPayload,
    responses((status = 200, description = "Matching books", body = Envelope<Vec<BookDto>>))
)]
pub async fn get_books_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<ListBooksPayload>,
) -> Result<Json<Envelope<Vec<BookDto>>>, ApiError> {
    let books = state.store.list_books(payload.status.as_deref()).await?;
    Ok(Json(Envelope::ok(into_dtos(books), "fetched")))
}

/// Find the first available book whose title contains the query,
/// case-insensitively. Single-result by design.
#[utoipa::path(
    post,
    path = "/api/searchBook",
    request_body = SearchBookPayload,
    responses(
        (status = 200, description = "First match, or null data", body = Envelope<BookDto>),
        (status = 400, description = "Empty title")
    )
)]
pub async fn search_book_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<SearchBookPayload>,
) -> Result<Json<Envelope<BookDto>>, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation("title must not be empty".to_string()));
    }

    let found = state.store.search_available_book(&payload.title).await?;
    Ok(Json(match found {
        Some(book) => Envelope::ok(book.into(), "search complete"),
        None => Envelope::null("search complete"),
    }))
}

/// Publish a new book listing.
#[utoipa::path(
    post,
    path = "/api/publishBook",
    request_body = PublishBookPayload,
    responses(
        (status = 200, description = "The created book", body = Envelope<BookDto>),
        (status = 400, description = "Missing title, price or imageUrl")
    )
)]
pub async fn publish_book_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<PublishBookPayload>,
) -> Result<Json<Envelope<BookDto>>, ApiError> {
    if payload.title.trim().is_empty() || payload.image_url.trim().is_empty() {
        return Err(ApiError::Validation(
            "title, price and imageUrl are required".to_string(),
        ));
    }

    let book = Book::new(
        payload.title,
        payload.price,
        payload.description.unwrap_or_default(),
        payload.image_url,
        payload.status,
        payload.seller_id,
    );
    state.store.insert_book(&book).await?;

    Ok(Json(Envelope::ok(book.into(), "published")))
}

/// Exact-id lookup; an unknown id is a success with null data.
#[utoipa::path(
    post,
    path = "/api/getBookById",
    request_body = GetBookByIdPayload,
    responses((status = 200, description = "The book, or null data", body = Envelope<BookDto>))
)]
pub async fn get_book_by_id_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<GetBookByIdPayload>,
) -> Result<Json<Envelope<BookDto>>, ApiError> {
    if payload.book_id.trim().is_empty() {
        return Err(ApiError::Validation("bookId must not be empty".to_string()));
    }

    let book = state.store.get_book(&payload.book_id).await?;
    Ok(Json(match book {
        Some(book) => Envelope::ok(book.into(), "fetched"),
        None => Envelope::null("fetched"),
    }))
}

/// Set a book's status tag. No existence or enum check.
#[utoipa::path(
    post,
    path = "/api/updateBookStatus",
    request_body = UpdateBookStatusPayload,
    responses((status = 200, description = "Always null data"))
)]
pub async fn update_book_status_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<UpdateBookStatusPayload>,
) -> Result<Json<Envelope<()>>, ApiError> {
    state
        .store
        .update_book_status(&payload.book_id, &payload.status)
        .await?;
    Ok(Json(Envelope::null("updated")))
}

/// Books listed by one seller, optionally filtered by status.
#[utoipa::path(
    post,
    path = "/api/getUserBooks",
    request_body = UserBooksPayload,
    responses((status = 200, description = "The seller's books", body = Envelope<Vec<BookDto>>))
)]
pub async fn get_user_books_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<UserBooksPayload>,
) -> Result<Json<Envelope<Vec<BookDto>>>, ApiError> {
    let books = state
        .store
        .list_books_by_seller(&payload.user_id, payload.status.as_deref())
        .await?;
    Ok(Json(Envelope::ok(into_dtos(books), "fetched")))
}

async fn top_available_books(state: &AppState) -> Result<Vec<BookDto>, ApiError> {
    let books = state.store.newest_available_books(HOT_BOOKS_LIMIT).await?;
    Ok(into_dtos(books))
}

/// The ten newest available books.
#[utoipa::path(
    post,
    path = "/api/getHotBooks",
    responses((status = 200, description = "Newest available books", body = Envelope<Vec<BookDto>>))
)]
pub async fn get_hot_books_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<BookDto>>>, ApiError> {
    Ok(Json(Envelope::ok(
        top_available_books(&state).await?,
        "fetched",
    )))
}

/// Same query as `getHotBooks`; kept as a second named route because clients
/// call both.
#[utoipa::path(
    post,
    path = "/api/getPopularBooks",
    responses((status = 200, description = "Newest available books", body = Envelope<Vec<BookDto>>))
)]
pub async fn get_popular_books_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<BookDto>>>, ApiError> {
    Ok(Json(Envelope::ok(
        top_available_books(&state).await?,
        "fetched",
    )))
}
