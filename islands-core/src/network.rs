use anyhow::{Context, Result};
use std::collections::BTreeSet;

use islands_types::{Comment, Connection, ConnectionType, Post, User, UserField, View};

use crate::db::SocialStore;

/// All five collections, fully materialized in memory
#[derive(Debug, Clone, Default)]
pub struct SocialNetwork {
    pub users: Vec<User>,
    pub connections: Vec<Connection>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
    pub views: Vec<View>,
}

impl SocialNetwork {
    /// Read every table from the store
    pub fn load<S: SocialStore + ?Sized>(store: &S) -> Result<Self> {
        let network = Self {
            users: store.users().context("Failed to load users")?,
            connections: store.connections().context("Failed to load connections")?,
            posts: store.posts().context("Failed to load posts")?,
            comments: store.comments().context("Failed to load comments")?,
            views: store.views().context("Failed to load views")?,
        };

        tracing::debug!(
            users = network.users.len(),
            connections = network.connections.len(),
            posts = network.posts.len(),
            comments = network.comments.len(),
            views = network.views.len(),
            "Loaded social network"
        );
        Ok(network)
    }

    pub fn user(&self, user_id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.user_id == user_id)
    }

    pub fn comments_for(&self, post_id: i64) -> Vec<&Comment> {
        self.comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .collect()
    }

    /// Connections in insertion order, optionally limited to one source user
    /// and one type
    pub fn find_connections(
        &self,
        user_id: Option<i64>,
        connection_type: Option<ConnectionType>,
    ) -> Vec<&Connection> {
        self.connections
            .iter()
            .filter(|c| user_id.map_or(true, |id| c.user_id == id))
            .filter(|c| connection_type.map_or(true, |t| c.connection_type == t))
            .collect()
    }

    /// Distinct set values of a user field, sorted (ages numerically)
    pub fn attribute_values(&self, field: UserField) -> Vec<String> {
        let values: Vec<String> = if field == UserField::Age {
            self.users
                .iter()
                .filter_map(|u| u.age)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(|age| age.to_string())
                .collect()
        } else {
            self.users
                .iter()
                .filter_map(|u| u.field_value(field))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        };

        tracing::debug!(field = %field, count = values.len(), "Collected attribute values");
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn seeded_network() -> SocialNetwork {
        let db = Database::in_memory().unwrap();
        db.ensure_schema().unwrap();
        SocialNetwork::load(&db).unwrap()
    }

    #[test]
    fn test_load_reads_every_table() {
        let network = seeded_network();
        assert_eq!(network.users.len(), 10);
        assert_eq!(network.connections.len(), 16);
        assert_eq!(network.posts.len(), 13);
        assert_eq!(network.comments.len(), 12);
        assert_eq!(network.views.len(), 27);
    }

    #[test]
    fn test_attribute_values() {
        let network = seeded_network();
        assert_eq!(network.attribute_values(UserField::Gender), vec!["Female", "Male"]);
        assert_eq!(
            network.attribute_values(UserField::Location),
            vec!["BRA", "CHN", "IND", "KOR", "MEX", "RUS", "TTO", "USA"]
        );

        let ages = network.attribute_values(UserField::Age);
        assert_eq!(ages.first().map(String::as_str), Some("16"));
        assert_eq!(ages.last().map(String::as_str), Some("70"));
        assert_eq!(ages.len(), 10);
    }

    #[test]
    fn test_attribute_values_skip_unset_columns() {
        let db = Database::in_memory().unwrap();
        db.ensure_schema().unwrap();
        db.connection()
            .unwrap()
            .execute("INSERT INTO users (user_id, user_name) VALUES (11, 'ghost')", [])
            .unwrap();
        let network = SocialNetwork::load(&db).unwrap();

        assert_eq!(network.users.len(), 11);
        assert_eq!(network.attribute_values(UserField::Gender), vec!["Female", "Male"]);
        assert_eq!(network.attribute_values(UserField::Age).len(), 10);
        assert_eq!(network.attribute_values(UserField::UserName).len(), 11);
    }

    #[test]
    fn test_lookups() {
        let network = seeded_network();
        assert_eq!(network.user(8).map(|u| u.user_name.as_str()), Some("elon_musk"));
        assert!(network.user(42).is_none());
        assert_eq!(network.comments_for(1).len(), 2);
        assert!(network.comments_for(13).is_empty());

        let elena = network.find_connections(Some(6), None);
        assert_eq!(elena.len(), 3);
        let blocked = network.find_connections(Some(6), Some(ConnectionType::Blocked));
        assert_eq!(blocked.len(), 1);
        assert_eq!(blocked[0].target_user_id, 2);

        assert_eq!(network.find_connections(None, None).len(), 16);
        let read = network.find_connections(None, Some(ConnectionType::HasReadPostsBy));
        assert_eq!(read.len(), 2);
    }
}
