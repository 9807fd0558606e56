// Quick diagnostic to check database state
use anyhow::Context;
use islands_core::config::Settings;
use islands_core::db::repositories::{
    ConnectionRepository, PostRepository, UserRepository, ViewRepository,
};
use islands_core::Database;

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => Settings::new()?.database.path,
    };
    if path.trim() != ":memory:" && !std::path::Path::new(&path).exists() {
        anyhow::bail!("Database file not found: {}", path);
    }

    let db = Database::new(&path).with_context(|| format!("Failed to open {}", path))?;

    println!("=== Database Diagnostic: {} ===\n", path);

    println!("=== Row counts ===");
    for (table, count) in db.table_counts()? {
        println!("  {:<12} {}", table, count);
    }

    println!("\n=== Connections by type ===");
    for (kind, count) in ConnectionRepository::new(db.pool.clone()).count_by_type()? {
        println!("  {:<18} {}", kind.as_str(), count);
    }

    let posts = PostRepository::new(db.pool.clone()).get_all()?;

    println!("\n=== Views per post ===");
    let views = ViewRepository::new(db.pool.clone());
    for post in &posts {
        println!("  post {:<4} {}", post.post_id, views.count_for_post(post.post_id)?);
    }

    // Posts whose author row is missing
    println!("\n=== Posts without a matching user ===");
    let users = UserRepository::new(db.pool.clone());
    let mut orphaned = 0;
    for post in &posts {
        if users.get_by_id(post.user_id)?.is_none() {
            orphaned += 1;
            println!("  post {} (user {})", post.post_id, post.user_id);
        }
    }
    println!("Orphaned posts: {}", orphaned);

    Ok(())
}
