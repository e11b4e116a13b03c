//! Screen controllers consuming the feed and like store

pub mod feed;
pub mod profile;

pub use feed::FeedController;
pub use profile::{ProfileController, UserProfile};
