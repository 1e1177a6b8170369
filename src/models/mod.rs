pub mod instagram;

pub use instagram::{Credentials, DisplayConfig, FeedResponse, ImageEntry};
