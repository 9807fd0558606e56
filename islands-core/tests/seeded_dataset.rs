// Scenario tests against the seeded dataset
// Each test builds a fresh in-memory store, so they are independent of each other

use islands_core::trend::{filter_posts, trending_posts};
use islands_core::{Database, SocialNetwork, SocialStore, TrendQuery, UserFilter, UserPredicate};
use islands_types::UserField;

fn seeded_network() -> SocialNetwork {
    let db = Database::in_memory().expect("Failed to create database");
    db.ensure_schema().expect("Failed to initialize schema");
    SocialNetwork::load(&db).expect("Failed to load network")
}

fn post_ids(network: &SocialNetwork, query: &TrendQuery) -> Vec<i64> {
    filter_posts(&network.posts, &network.users, query)
        .iter()
        .map(|p| p.post_id)
        .collect()
}

#[test]
fn test_seed_shape() {
    let network = seeded_network();
    assert_eq!(network.users.len(), 10);
    assert_eq!(network.posts.len(), 13);

    // One post per user, plus extras by users 1, 8 and 10
    let mut extra_authors: Vec<i64> = network.posts[10..].iter().map(|p| p.user_id).collect();
    extra_authors.sort();
    assert_eq!(extra_authors, vec![1, 8, 10]);
    for (i, post) in network.posts[..10].iter().enumerate() {
        assert_eq!(post.user_id, i as i64 + 1);
    }
}

#[test]
fn test_include_doctor_returns_post_one() {
    let network = seeded_network();
    let ids = post_ids(&network, &TrendQuery::default().include("DoCtOr"));
    assert_eq!(ids, vec![1]);
    assert!(network.posts[0].content.starts_with("As a doctor, I am constantly inspired"));
}

#[test]
fn test_exclude_music_drops_post_ten() {
    let network = seeded_network();
    let ids = post_ids(&network, &TrendQuery::default().exclude("music"));
    assert_eq!(ids.len(), 12);
    assert!(!ids.contains(&10));
}

#[test]
fn test_female_authors() {
    let network = seeded_network();
    let filter = UserFilter::new()
        .with(UserPredicate::equals(UserField::Gender, "Female").expect("valid predicate"));
    let query = TrendQuery::default().with_user_filter(filter);

    let posts = filter_posts(&network.posts, &network.users, &query);
    let mut authors: Vec<i64> = posts.iter().map(|p| p.user_id).collect();
    authors.dedup();
    assert_eq!(authors, vec![2, 4, 5, 6, 10]);
    assert_eq!(
        posts.iter().map(|p| p.post_id).collect::<Vec<_>>(),
        vec![2, 4, 5, 6, 10, 13]
    );
}

#[test]
fn test_ranked_scores_with_unit_weight() {
    let network = seeded_network();
    let report = trending_posts(&network, &TrendQuery::default());

    let ids: Vec<i64> = report.posts.iter().map(|p| p.post_id).collect();
    assert_eq!(ids, vec![8, 1, 10, 12, 2, 4, 9, 3, 5, 6, 7, 11, 13]);
    assert_eq!(report.score(8), 7.0);
    assert_eq!(report.score(1), 6.0);
    assert_eq!(report.score(13), 1.0);
}

#[test]
fn test_ranked_scores_with_half_weight() {
    let network = seeded_network();
    let report = trending_posts(&network, &TrendQuery::default().with_view_weight(0.5));

    let ids: Vec<i64> = report.posts.iter().map(|p| p.post_id).collect();
    assert_eq!(ids, vec![8, 1, 10, 12, 2, 4, 9, 3, 5, 6, 7, 11, 13]);
    assert_eq!(report.score(8), 4.5);
    assert_eq!(report.score(10), 3.5);
    assert_eq!(report.score(6), 0.5);
}

#[test]
fn test_filtered_report_keeps_all_scores() {
    let network = seeded_network();
    let filter = UserFilter::new()
        .with(UserPredicate::equals(UserField::Gender, "Female").expect("valid predicate"));
    let report = trending_posts(&network, &TrendQuery::default().with_user_filter(filter));

    let ids: Vec<i64> = report.posts.iter().map(|p| p.post_id).collect();
    assert_eq!(ids, vec![10, 2, 4, 5, 6, 13]);
    assert_eq!(report.scores.len(), 13);
}

#[test]
fn test_no_match_is_empty_not_error() {
    let network = seeded_network();
    let report = trending_posts(&network, &TrendQuery::default().include("blockchain"));
    assert!(report.posts.is_empty());
}

#[test]
fn test_reset_twice_through_store_trait() {
    let db = Database::in_memory().expect("Failed to create database");
    let store: &dyn SocialStore = &db;
    store.ensure_schema().expect("Failed to initialize schema");
    store.reset().expect("Failed to reset");
    store.reset().expect("Failed to reset again");

    let network = SocialNetwork::load(store).expect("Failed to load network");
    assert_eq!(network.users.len(), 10);
    assert_eq!(network.posts.len(), 13);
    assert_eq!(network.comments.len(), 12);
    assert_eq!(network.views.len(), 27);
    assert_eq!(network.connections.len(), 16);
}

#[test]
fn test_author_with_unset_attributes_is_filtered_out() {
    let db = Database::in_memory().expect("Failed to create database");
    db.ensure_schema().expect("Failed to initialize schema");
    db.connection()
        .expect("Failed to get connection")
        .execute_batch(
            "INSERT INTO users (user_id, user_name) VALUES (11, 'quiet_one');
             INSERT INTO posts (post_id, user_id, content, post_date)
             VALUES (14, 11, 'Hello from nowhere', '2024-01-04 09:00:00');",
        )
        .expect("Failed to insert user without attributes");
    let network = SocialNetwork::load(&db).expect("Failed to load network");

    let young = UserFilter::new().with(UserPredicate::age_between(0, 20).expect("valid range"));
    let ids = post_ids(&network, &TrendQuery::default().with_user_filter(young));
    assert_eq!(ids, vec![5]);

    let blank_gender =
        UserFilter::new().with(UserPredicate::equals(UserField::Gender, "").expect("valid predicate"));
    let ids = post_ids(&network, &TrendQuery::default().with_user_filter(blank_gender));
    assert!(ids.is_empty());

    // No user filter: the post still takes part
    assert!(post_ids(&network, &TrendQuery::default()).contains(&14));
}
