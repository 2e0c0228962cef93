mod create_review;
mod delete_review;
mod get_review;
mod list_reviews;
mod mark_helpful;
mod types;
mod update_review;
mod util;

pub use create_review::*;
pub use delete_review::*;
pub use get_review::*;
pub use list_reviews::*;
pub use mark_helpful::*;
pub use types::*;
pub use update_review::*;
pub use util::*;
