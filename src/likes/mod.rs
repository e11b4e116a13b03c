pub mod store;

pub use store::{LikeState, LikeStore, COUNTS_KEY, LIKES_KEY};
