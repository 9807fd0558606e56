//! Trend scoring and post filtering.
//!
//! A post's trend score is `view_weight * views + comments`. Filtering applies
//! an include keyword, an exclude keyword and a set of author predicates, all
//! of which must hold for a post to survive.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use islands_types::{Comment, Post, User, UserField, View};

use crate::error::{IslandsError, IslandsResult};
use crate::network::SocialNetwork;

/// View weight used when nothing else is configured
pub const DEFAULT_VIEW_WEIGHT: f64 = 1.0;

/// A declarative condition on a post's author
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UserPredicate {
    /// Field equals value exactly
    Equals { field: UserField, value: String },
    /// Inclusive age range
    AgeBetween { min: i64, max: i64 },
}

impl UserPredicate {
    /// Build an equality predicate. Age values must be integers and are
    /// normalized so `"030"` matches an age of 30.
    pub fn equals(field: UserField, value: impl Into<String>) -> IslandsResult<Self> {
        let value = value.into();
        let value = if field == UserField::Age {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| IslandsError::InvalidFilter(format!("age '{}' is not a number", value)))?
                .to_string()
        } else {
            value
        };
        Ok(UserPredicate::Equals { field, value })
    }

    pub fn age_between(min: i64, max: i64) -> IslandsResult<Self> {
        if min > max {
            return Err(IslandsError::InvalidFilter(format!(
                "minimum age {} is greater than maximum age {}",
                min, max
            )));
        }
        Ok(UserPredicate::AgeBetween { min, max })
    }

    pub fn matches(&self, user: &User) -> bool {
        match self {
            UserPredicate::Equals { field, value } => {
                user.field_value(*field).as_deref() == Some(value.as_str())
            }
            UserPredicate::AgeBetween { min, max } => {
                user.age.is_some_and(|age| (*min..=*max).contains(&age))
            }
        }
    }
}

/// Conjunction of author predicates; empty means "no user filter"
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserFilter {
    predicates: Vec<UserPredicate>,
}

impl UserFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, predicate: UserPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn push(&mut self, predicate: UserPredicate) {
        self.predicates.push(predicate);
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn predicates(&self) -> &[UserPredicate] {
        &self.predicates
    }

    /// A missing author never satisfies a non-empty filter
    pub fn matches(&self, author: Option<&User>) -> bool {
        if self.is_empty() {
            return true;
        }
        match author {
            Some(user) => self.predicates.iter().all(|p| p.matches(user)),
            None => false,
        }
    }
}

/// Everything that decides which posts survive and how they are ordered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendQuery {
    pub include_keyword: Option<String>,
    pub exclude_keyword: Option<String>,
    pub user_filter: UserFilter,
    pub view_weight: f64,
    pub ranked: bool,
}

impl Default for TrendQuery {
    fn default() -> Self {
        Self {
            include_keyword: None,
            exclude_keyword: None,
            user_filter: UserFilter::default(),
            view_weight: DEFAULT_VIEW_WEIGHT,
            ranked: true,
        }
    }
}

impl TrendQuery {
    pub fn include(mut self, keyword: impl Into<String>) -> Self {
        self.include_keyword = Some(keyword.into());
        self
    }

    pub fn exclude(mut self, keyword: impl Into<String>) -> Self {
        self.exclude_keyword = Some(keyword.into());
        self
    }

    pub fn with_user_filter(mut self, user_filter: UserFilter) -> Self {
        self.user_filter = user_filter;
        self
    }

    pub fn with_view_weight(mut self, view_weight: f64) -> Self {
        self.view_weight = view_weight;
        self
    }

    pub fn ranked(mut self, ranked: bool) -> Self {
        self.ranked = ranked;
        self
    }
}

/// Surviving posts plus the score of every post that was considered
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendReport {
    pub posts: Vec<Post>,
    pub scores: BTreeMap<i64, f64>,
}

impl TrendReport {
    pub fn score(&self, post_id: i64) -> f64 {
        self.scores.get(&post_id).copied().unwrap_or_default()
    }
}

/// Score every post: `view_weight * views + comments`
pub fn score_posts(
    posts: &[Post],
    views: &[View],
    comments: &[Comment],
    view_weight: f64,
) -> BTreeMap<i64, f64> {
    let mut view_counts: HashMap<i64, usize> = HashMap::new();
    for view in views {
        *view_counts.entry(view.post_id).or_default() += 1;
    }

    let mut comment_counts: HashMap<i64, usize> = HashMap::new();
    for comment in comments {
        *comment_counts.entry(comment.post_id).or_default() += 1;
    }

    posts
        .iter()
        .map(|post| {
            let views = view_counts.get(&post.post_id).copied().unwrap_or_default();
            let comments = comment_counts.get(&post.post_id).copied().unwrap_or_default();
            (post.post_id, view_weight * views as f64 + comments as f64)
        })
        .collect()
}

/// Lowercased keyword, or `None` when blank. Surrounding spaces are kept
/// and take part in the match.
fn normalized_keyword(keyword: Option<&str>) -> Option<String> {
    keyword
        .filter(|k| !k.trim().is_empty())
        .map(str::to_lowercase)
}

/// Keep the posts that satisfy every predicate of `query`, in source order
pub fn filter_posts(posts: &[Post], users: &[User], query: &TrendQuery) -> Vec<Post> {
    let include = normalized_keyword(query.include_keyword.as_deref());
    let exclude = normalized_keyword(query.exclude_keyword.as_deref());
    let authors: HashMap<i64, &User> = users.iter().map(|u| (u.user_id, u)).collect();

    posts
        .iter()
        .filter(|post| {
            let content = post.content.to_lowercase();

            if let Some(keyword) = &include {
                if !content.contains(keyword.as_str()) {
                    return false;
                }
            }
            if let Some(keyword) = &exclude {
                if content.contains(keyword.as_str()) {
                    return false;
                }
            }

            let author = authors.get(&post.user_id).copied();
            if author.is_none() && !query.user_filter.is_empty() {
                tracing::debug!(post_id = post.post_id, user_id = post.user_id, "Author not found, excluding post");
            }
            query.user_filter.matches(author)
        })
        .cloned()
        .collect()
}

/// Stable sort by score, highest first
pub fn rank_posts(posts: &mut [Post], scores: &BTreeMap<i64, f64>) {
    let score = |post: &Post| scores.get(&post.post_id).copied().unwrap_or_default();
    posts.sort_by(|a, b| score(b).total_cmp(&score(a)));
}

/// Score all posts, filter them and rank the survivors when asked to
pub fn trending_posts(network: &SocialNetwork, query: &TrendQuery) -> TrendReport {
    let scores = score_posts(
        &network.posts,
        &network.views,
        &network.comments,
        query.view_weight,
    );
    let mut posts = filter_posts(&network.posts, &network.users, query);

    if query.ranked {
        rank_posts(&mut posts, &scores);
    }

    tracing::info!(
        considered = network.posts.len(),
        surviving = posts.len(),
        ranked = query.ranked,
        "Computed trending posts"
    );
    TrendReport { posts, scores }
}
