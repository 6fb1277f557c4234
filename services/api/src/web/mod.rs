pub mod books;
pub mod extract;
pub mod health;
pub mod messages;
pub mod protocol;
pub mod rest;
pub mod state;
pub mod transactions;
pub mod users;

// Re-export the router builder and the OpenAPI definition so the binaries
// and the integration tests reach them without digging through submodules.
pub use rest::{router, ApiDoc};
