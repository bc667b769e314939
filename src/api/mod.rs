pub mod handlers;
pub mod ratings_client;
pub mod routes;
pub mod source;

pub use handlers::AppState;
pub use ratings_client::RemoteRatingStore;
pub use routes::create_router;
pub use source::RatingSource;
