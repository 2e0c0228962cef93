mod create_comment;
mod delete_comment;
mod get_comment;
mod list_comments;
mod types;
mod update_comment;
mod util;

pub use create_comment::*;
pub use delete_comment::*;
pub use get_comment::*;
pub use list_comments::*;
pub use types::*;
pub use update_comment::*;
pub use util::*;
