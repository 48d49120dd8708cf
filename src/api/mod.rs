pub mod handlers;
pub mod types;

pub use handlers::{get_movies, get_trending, live_search};
