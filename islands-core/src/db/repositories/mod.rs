mod user_repository;
mod connection_repository;
mod post_repository;
mod comment_repository;
mod view_repository;

pub use user_repository::UserRepository;
pub use connection_repository::ConnectionRepository;
pub use post_repository::PostRepository;
pub use comment_repository::CommentRepository;
pub use view_repository::ViewRepository;
