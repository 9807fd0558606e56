use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::enums::{ConnectionType, UserField};

/// Layout SQLite uses for `CURRENT_TIMESTAMP` and the seed rows
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a stored timestamp string, `None` if it is not in [`TIMESTAMP_FORMAT`]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub user_name: String,
    // Descriptive columns are nullable; `None` never matches a filter.
    pub real_name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub job: Option<String>,
    pub location: Option<String>,
}

impl User {
    /// Value of a filterable field rendered as text, `None` when unset
    pub fn field_value(&self, field: UserField) -> Option<String> {
        match field {
            UserField::UserName => Some(self.user_name.clone()),
            UserField::RealName => self.real_name.clone(),
            UserField::Age => self.age.map(|age| age.to_string()),
            UserField::Gender => self.gender.clone(),
            UserField::Job => self.job.clone(),
            UserField::Location => self.location.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub connection_id: i64,
    pub user_id: i64,
    pub target_user_id: i64,
    pub connection_type: ConnectionType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub post_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub content: String,
    pub comment_date: String,
}

/// A single view of a post. Views carry no identity of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    pub post_id: i64,
    pub user_id: i64,
    pub view_time: String,
}
