use anyhow::Result;
use std::io::Write;

use islands_types::{parse_timestamp, Connection};

use crate::network::SocialNetwork;
use crate::trend::TrendReport;

pub const UNKNOWN_USER: &str = "Unknown User";
pub const UNKNOWN_AGE: &str = "Unknown Age";

const RULE_WIDTH: usize = 50;

/// `2024-01-01 12:00`, or the stored string when it does not parse
fn display_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn user_name(network: &SocialNetwork, user_id: i64) -> &str {
    network
        .user(user_id)
        .map(|u| u.user_name.as_str())
        .unwrap_or(UNKNOWN_USER)
}

/// Every post with its author, followed by its comments
pub fn write_posts_with_comments<W: Write>(out: &mut W, network: &SocialNetwork) -> Result<()> {
    for post in &network.posts {
        let author = network.user(post.user_id);
        let age = author
            .and_then(|u| u.age)
            .map(|age| age.to_string())
            .unwrap_or_else(|| UNKNOWN_AGE.to_string());

        writeln!(
            out,
            "Post ID: {}, User: {}, Age: {}, Date: {}",
            post.post_id,
            user_name(network, post.user_id),
            age,
            display_date(&post.post_date)
        )?;
        writeln!(out, "Content: {}", post.content)?;

        let comments = network.comments_for(post.post_id);
        if comments.is_empty() {
            writeln!(out, "  No comments.")?;
        } else {
            writeln!(out, "  Comments:")?;
            for comment in comments {
                writeln!(
                    out,
                    "    Comment ID: {}, User: {}, Date: {}",
                    comment.comment_id,
                    user_name(network, comment.user_id),
                    display_date(&comment.comment_date)
                )?;
                writeln!(out, "    Content: {}", comment.content)?;
            }
        }

        writeln!(out, "\n{}\n", "-".repeat(RULE_WIDTH))?;
    }
    Ok(())
}

pub fn write_trend_report<W: Write>(out: &mut W, report: &TrendReport) -> Result<()> {
    if report.posts.is_empty() {
        writeln!(out, "\nNo posts match the criteria.")?;
        return Ok(());
    }

    writeln!(out, "\nTrending Posts:")?;
    for post in &report.posts {
        writeln!(
            out,
            "Post ID: {}, Trend Score: {:.2}",
            post.post_id,
            report.score(post.post_id)
        )?;
    }
    Ok(())
}

/// One `source -[type]-> target` line per connection, names looked up in `network`
pub fn write_connections<W: Write>(
    out: &mut W,
    network: &SocialNetwork,
    connections: &[&Connection],
) -> Result<()> {
    for connection in connections {
        writeln!(
            out,
            "{} -[{}]-> {}",
            user_name(network, connection.user_id),
            connection.connection_type,
            user_name(network, connection.target_user_id)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use islands_types::{Comment, ConnectionType, Post, User};
    use std::collections::BTreeMap;

    fn network() -> SocialNetwork {
        SocialNetwork {
            users: vec![
                User {
                    user_id: 1,
                    user_name: "john_doe".to_string(),
                    real_name: Some("John Doe".to_string()),
                    age: Some(30),
                    gender: Some("Male".to_string()),
                    job: Some("Doctor".to_string()),
                    location: Some("USA".to_string()),
                },
                User {
                    user_id: 3,
                    user_name: "ghost".to_string(),
                    real_name: None,
                    age: None,
                    gender: None,
                    job: None,
                    location: None,
                },
            ],
            connections: vec![Connection {
                connection_id: 1,
                user_id: 1,
                target_user_id: 2,
                connection_type: ConnectionType::Follows,
            }],
            posts: vec![
                Post {
                    post_id: 1,
                    user_id: 1,
                    content: "Blah".to_string(),
                    post_date: "2024-01-01 12:00:00".to_string(),
                },
                Post {
                    post_id: 2,
                    user_id: 7,
                    content: "Orphan".to_string(),
                    post_date: "sometime".to_string(),
                },
                Post {
                    post_id: 3,
                    user_id: 3,
                    content: "Quiet".to_string(),
                    post_date: "2024-01-02 08:30:00".to_string(),
                },
            ],
            comments: vec![Comment {
                comment_id: 1,
                user_id: 9,
                post_id: 1,
                content: "Nice".to_string(),
                comment_date: "2024-01-01 13:00:00".to_string(),
            }],
            views: vec![],
        }
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_posts_with_comments() {
        let network = network();
        let output = render(|out| write_posts_with_comments(out, &network));

        assert!(output.contains("Post ID: 1, User: john_doe, Age: 30, Date: 2024-01-01 12:00"));
        assert!(output.contains("    Comment ID: 1, User: Unknown User, Date: 2024-01-01 13:00"));
        assert!(output.contains("Post ID: 2, User: Unknown User, Age: Unknown Age, Date: sometime"));
        assert!(output.contains("Post ID: 3, User: ghost, Age: Unknown Age, Date: 2024-01-02 08:30"));
        assert!(output.contains("  No comments."));
        assert_eq!(output.matches(&"-".repeat(RULE_WIDTH)).count(), 3);
    }

    #[test]
    fn test_trend_report() {
        let network = network();
        let mut scores = BTreeMap::new();
        scores.insert(1, 1.5);
        let report = TrendReport {
            posts: vec![network.posts[0].clone()],
            scores,
        };

        let output = render(|out| write_trend_report(out, &report));
        assert_eq!(output, "\nTrending Posts:\nPost ID: 1, Trend Score: 1.50\n");

        let output = render(|out| write_trend_report(out, &TrendReport::default()));
        assert!(output.contains("No posts match the criteria."));
    }

    #[test]
    fn test_connections() {
        let network = network();
        let connections = network.find_connections(None, None);
        let output = render(|out| write_connections(out, &network, &connections));
        assert_eq!(output, "john_doe -[follows]-> Unknown User\n");
    }
}
