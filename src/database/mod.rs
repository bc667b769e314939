pub mod connection;
pub mod movies;
pub mod ratings;
pub mod setup;
pub mod store;
pub mod users;

pub use connection::{DbConn, DbPool, create_memory_pool, create_pool, get_connection};
pub use store::LocalRatingStore;
