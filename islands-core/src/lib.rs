//! Store, trend scoring and post filtering for the islands social network.

pub mod config;
pub mod db;
pub mod error;
pub mod network;
pub mod report;
pub mod trend;
pub mod wordcloud;

pub use db::{Database, SocialStore};
pub use error::{IslandsError, IslandsResult};
pub use network::SocialNetwork;
pub use trend::{TrendQuery, TrendReport, UserFilter, UserPredicate};
