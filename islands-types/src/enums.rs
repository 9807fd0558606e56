use serde::{Deserialize, Serialize};

/// Relationship tag between two users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionType {
    Follows,
    Friends,
    CoWorker,
    Blocked,
    HasReadPostsBy,
}

impl ConnectionType {
    pub const ALL: [ConnectionType; 5] = [
        ConnectionType::Follows,
        ConnectionType::Friends,
        ConnectionType::CoWorker,
        ConnectionType::Blocked,
        ConnectionType::HasReadPostsBy,
    ];

    /// The value stored in the `connection_type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionType::Follows => "follows",
            ConnectionType::Friends => "friends",
            ConnectionType::CoWorker => "co-worker",
            ConnectionType::Blocked => "blocked",
            ConnectionType::HasReadPostsBy => "has read posts by",
        }
    }

    /// Accepts the stored form as well as the hyphenated CLI form
    /// (`has-read-posts-by`), case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', " ").as_str() {
            "follows" => Some(ConnectionType::Follows),
            "friends" => Some(ConnectionType::Friends),
            "co worker" | "coworker" => Some(ConnectionType::CoWorker),
            "blocked" => Some(ConnectionType::Blocked),
            "has read posts by" => Some(ConnectionType::HasReadPostsBy),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User record fields that posts can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserField {
    UserName,
    RealName,
    Age,
    Gender,
    Job,
    Location,
}

impl UserField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserField::UserName => "user_name",
            UserField::RealName => "real_name",
            UserField::Age => "age",
            UserField::Gender => "gender",
            UserField::Job => "job",
            UserField::Location => "location",
        }
    }
}

impl std::fmt::Display for UserField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
