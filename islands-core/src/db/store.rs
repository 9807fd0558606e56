use anyhow::Result;

use islands_types::{Comment, Connection, Post, User, View};

use crate::db::repositories::{
    CommentRepository, ConnectionRepository, PostRepository, UserRepository, ViewRepository,
};
use crate::db::Database;

/// Read and lifecycle surface the rest of the crate needs from a store.
///
/// Every fetch returns the whole table in insertion order.
pub trait SocialStore {
    fn users(&self) -> Result<Vec<User>>;

    fn connections(&self) -> Result<Vec<Connection>>;

    fn posts(&self) -> Result<Vec<Post>>;

    fn comments(&self) -> Result<Vec<Comment>>;

    fn views(&self) -> Result<Vec<View>>;

    /// Create missing tables and seed an empty store
    fn ensure_schema(&self) -> Result<()>;

    /// Drop everything, recreate and reseed
    fn reset(&self) -> Result<()>;
}

impl SocialStore for Database {
    fn users(&self) -> Result<Vec<User>> {
        UserRepository::new(self.pool.clone()).get_all()
    }

    fn connections(&self) -> Result<Vec<Connection>> {
        ConnectionRepository::new(self.pool.clone()).get_all()
    }

    fn posts(&self) -> Result<Vec<Post>> {
        PostRepository::new(self.pool.clone()).get_all()
    }

    fn comments(&self) -> Result<Vec<Comment>> {
        CommentRepository::new(self.pool.clone()).get_all()
    }

    fn views(&self) -> Result<Vec<View>> {
        ViewRepository::new(self.pool.clone()).get_all()
    }

    fn ensure_schema(&self) -> Result<()> {
        Database::ensure_schema(self)
    }

    fn reset(&self) -> Result<()> {
        Database::reset(self)
    }
}
