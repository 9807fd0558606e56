/// SQL schema for the islands database
/// Creates all tables with foreign keys and the indexes the bulk reads use
pub const SCHEMA: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY,
    user_name TEXT UNIQUE NOT NULL,
    real_name TEXT,
    age INTEGER,
    gender TEXT,
    job TEXT,
    location TEXT
);

-- Connections table (duplicate source/type/target rows are allowed)
CREATE TABLE IF NOT EXISTS connections (
    connection_id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    target_user_id INTEGER NOT NULL,
    connection_type TEXT NOT NULL CHECK (connection_type IN ('follows', 'friends', 'co-worker', 'blocked', 'has read posts by')),
    FOREIGN KEY (user_id) REFERENCES users(user_id),
    FOREIGN KEY (target_user_id) REFERENCES users(user_id)
);

-- Posts table
CREATE TABLE IF NOT EXISTS posts (
    post_id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    content TEXT NOT NULL,
    post_date TEXT DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (user_id) REFERENCES users(user_id)
);

-- Comments table
CREATE TABLE IF NOT EXISTS comments (
    comment_id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    post_id INTEGER NOT NULL,
    content TEXT NOT NULL,
    comment_date TEXT DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (user_id) REFERENCES users(user_id),
    FOREIGN KEY (post_id) REFERENCES posts(post_id)
);

-- Views table
CREATE TABLE IF NOT EXISTS views (
    view_id INTEGER PRIMARY KEY,
    post_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    view_time TEXT DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (post_id) REFERENCES posts(post_id),
    FOREIGN KEY (user_id) REFERENCES users(user_id)
);

CREATE INDEX IF NOT EXISTS idx_connections_user ON connections(user_id);
CREATE INDEX IF NOT EXISTS idx_posts_user ON posts(user_id);
CREATE INDEX IF NOT EXISTS idx_comments_post ON comments(post_id);
CREATE INDEX IF NOT EXISTS idx_views_post ON views(post_id);
"#;

/// Drops every table, children first so foreign keys never dangle mid-reset
pub const DROP_ALL: &str = r#"
DROP TABLE IF EXISTS views;
DROP TABLE IF EXISTS comments;
DROP TABLE IF EXISTS posts;
DROP TABLE IF EXISTS connections;
DROP TABLE IF EXISTS users;
"#;

/// Tables in dependency order, used by diagnostics
pub const TABLES: [&str; 5] = ["users", "connections", "posts", "comments", "views"];

/// Seed data for the exercises
/// - 10 users
/// - 16 connections, including one duplicated follow
/// - 13 posts: one per user plus extras by users 1, 8 and 10
/// - 12 comments, 27 views
pub const SEED_DATA: &str = r#"
-- ============================================================================
-- USERS
-- ============================================================================
INSERT INTO users (user_id, user_name, real_name, age, gender, job, location) VALUES
    (1, 'john_doe', 'John Doe', 30, 'Male', 'Doctor', 'USA'),
    (2, 'jane_doe', 'Jane Doe', 28, 'Female', 'Teacher', 'USA'),
    (3, 'mohammad_singh', 'Mohammad Singh', 27, 'Male', 'Engineer', 'IND'),
    (4, 'susan_kim', 'Susan Kim', 38, 'Female', 'Nurse', 'KOR'),
    (5, 'ana_souza', 'Ana Souza', 16, 'Female', 'Student', 'BRA'),
    (6, 'elena_martinez', 'Elena Martinez', 25, 'Female', 'Designer', 'MEX'),
    (7, 'sergei_petrov', 'Sergei Petrov', 45, 'Male', 'Entrepreneur', 'RUS'),
    (8, 'elon_musk', 'Elon Musk', 53, 'Male', 'CEO', 'USA'),
    (9, 'jackie_chan', 'Jackie Chan', 70, 'Male', 'Actor', 'CHN'),
    (10, 'nicki_minaj', 'Nicki Minaj', 41, 'Female', 'Singer', 'TTO');

-- ============================================================================
-- CONNECTIONS
-- ============================================================================
INSERT INTO connections (user_id, target_user_id, connection_type) VALUES
    -- John and Jane follow each other, Ana follows Nicki (recorded twice)
    (1, 2, 'follows'),
    (2, 1, 'follows'),
    (5, 10, 'follows'),
    (5, 10, 'follows'),
    -- Susan and Elena, Elon and Jackie
    (4, 6, 'friends'),
    (6, 4, 'friends'),
    (8, 9, 'friends'),
    (9, 8, 'friends'),
    -- Mohammad and Sergei, John and Susan
    (3, 7, 'co-worker'),
    (7, 3, 'co-worker'),
    (1, 4, 'co-worker'),
    (4, 1, 'co-worker'),
    -- Nicki blocked Elon, Elena blocked Jane
    (10, 8, 'blocked'),
    (6, 2, 'blocked'),
    -- Elena has read Jackie, Mohammad has read Elon
    (6, 9, 'has read posts by'),
    (3, 8, 'has read posts by');

-- ============================================================================
-- POSTS
-- ============================================================================
INSERT INTO posts (post_id, user_id, content, post_date) VALUES
    (1, 1, 'As a doctor, I am constantly inspired by the resilience of my patients. Each day brings new challenges, but also incredible opportunities to make a difference in someone''s life.', '2024-01-01 12:00:00'),
    (2, 2, 'Teaching young minds is both a privilege and a responsibility. I love finding creative ways to make learning fun and impactful for my students.', '2024-01-02 12:00:00'),
    (3, 3, 'Engineering has taught me to think critically and solve problems effectively. Today, I''m working on an innovative project that could positively impact millions.', '2024-01-03 12:00:00'),
    (4, 4, 'Nursing is not just a job, it''s a calling. Helping patients recover and seeing their smiles reminds me why I chose this path.', '2024-01-04 12:00:00'),
    (5, 5, 'Life as a student is a whirlwind of exams, friendships, and endless possibilities. I''m excited about what the future holds!', '2024-01-05 12:00:00'),
    (6, 6, 'Designing is my passion. I love creating visuals that not only look good but also tell a compelling story.', '2024-01-06 12:00:00'),
    (7, 7, 'Entrepreneurship is a journey of constant learning and adapting. I''m excited to share some new insights from my latest venture.', '2024-01-07 12:00:00'),
    (8, 8, 'Innovation is the driving force of progress. Today, I want to share some thoughts on sustainable energy solutions for a better tomorrow.', '2024-01-08 12:00:00'),
    (9, 9, 'Martial arts taught me discipline and perseverance. These lessons have shaped who I am both on and off the screen.', '2024-01-09 12:00:00'),
    (10, 10, 'Music is my sanctuary. Through every note and lyric, I strive to connect with people and share my story.', '2024-01-10 12:00:00'),
    (11, 1, 'Long shift at the hospital today, but seeing patients walk out healthy makes it all worth it.', '2024-01-11 12:00:00'),
    (12, 8, 'Loving my new Apple gadget!', '2024-01-12 12:00:00'),
    (13, 10, 'New album dropping soon! Thank you to every fan who has supported my journey.', '2024-01-13 12:00:00');

-- ============================================================================
-- COMMENTS
-- ============================================================================
INSERT INTO comments (comment_id, user_id, post_id, content, comment_date) VALUES
    (1, 4, 1, 'Proud to work alongside you!', '2024-01-01 13:00:00'),
    (2, 2, 1, 'Your patients are lucky to have you.', '2024-01-01 14:30:00'),
    (3, 1, 2, 'Your students are lucky too!', '2024-01-02 15:00:00'),
    (4, 7, 3, 'Let''s talk about that project at the office.', '2024-01-03 16:00:00'),
    (5, 6, 4, 'You are an inspiration, Susan.', '2024-01-04 13:15:00'),
    (6, 10, 5, 'The future is bright!', '2024-01-05 18:00:00'),
    (7, 9, 8, 'Sustainable energy is the way forward.', '2024-01-08 13:00:00'),
    (8, 3, 8, 'Looking forward to the details.', '2024-01-08 14:00:00'),
    (9, 8, 9, 'Legendary discipline.', '2024-01-09 20:00:00'),
    (10, 5, 10, 'Your songs got me through exam season!', '2024-01-10 12:30:00'),
    (11, 6, 10, 'Can''t wait for the next album.', '2024-01-10 13:45:00'),
    (12, 9, 12, 'Which gadget?', '2024-01-12 12:10:00');

-- ============================================================================
-- VIEWS
-- ============================================================================
INSERT INTO views (post_id, user_id, view_time) VALUES
    (1, 2, '2024-01-01 12:05:00'),
    (1, 4, '2024-01-01 12:40:00'),
    (1, 3, '2024-01-01 15:00:00'),
    (1, 7, '2024-01-02 09:00:00'),
    (2, 1, '2024-01-02 12:30:00'),
    (2, 5, '2024-01-02 19:00:00'),
    (3, 7, '2024-01-03 15:30:00'),
    (4, 1, '2024-01-04 12:10:00'),
    (4, 6, '2024-01-04 13:00:00'),
    (5, 10, '2024-01-05 17:45:00'),
    (6, 4, '2024-01-06 14:00:00'),
    (7, 3, '2024-01-07 12:20:00'),
    (8, 3, '2024-01-08 12:01:00'),
    (8, 9, '2024-01-08 12:30:00'),
    (8, 7, '2024-01-08 13:10:00'),
    (8, 1, '2024-01-08 18:00:00'),
    (8, 2, '2024-01-09 08:00:00'),
    (9, 8, '2024-01-09 19:30:00'),
    (9, 6, '2024-01-09 21:00:00'),
    (10, 5, '2024-01-10 12:15:00'),
    (10, 6, '2024-01-10 13:30:00'),
    (10, 2, '2024-01-10 16:00:00'),
    (11, 4, '2024-01-11 13:00:00'),
    (12, 9, '2024-01-12 12:05:00'),
    (12, 3, '2024-01-12 12:45:00'),
    (12, 7, '2024-01-12 14:00:00'),
    (13, 5, '2024-01-13 12:02:00');
"#;
