pub mod schema;
pub mod connection;
pub mod repositories;
pub mod store;

pub use connection::{Database, DbConnection, DbPool};
pub use store::SocialStore;
