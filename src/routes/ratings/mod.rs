mod create_rating;
mod delete_rating;
mod get_rating;
mod list_ratings;
mod types;
mod update_rating;
mod util;

pub use create_rating::*;
pub use delete_rating::*;
pub use get_rating::*;
pub use list_ratings::*;
pub use types::*;
pub use update_rating::*;
pub use util::*;
