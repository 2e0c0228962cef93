mod create_movie;
mod delete_movie;
mod get_average_rating;
mod get_movie;
mod list_movies;
mod types;
mod update_movie;
mod util;

pub use create_movie::*;
pub use delete_movie::*;
pub use get_average_rating::*;
pub use get_movie::*;
pub use list_movies::*;
pub use types::*;
pub use update_movie::*;
pub use util::*;
