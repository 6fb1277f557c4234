pub mod domain;
pub mod ports;

pub use domain::{
    mock_openid, Book, Message, Transaction, TransactionRole, User, BOOK_STATUS_AVAILABLE,
    TRANSACTION_STATUS_PENDING,
};
pub use ports::{MarketStore, PortError, PortResult};
