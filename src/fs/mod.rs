pub mod bookmarks;

pub use bookmarks::{default_bookmarks_path, load};
