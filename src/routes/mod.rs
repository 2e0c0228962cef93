pub mod comments;
pub mod home;
pub mod movies;
pub mod ratings;
pub mod reviews;

pub use comments::*;
pub use home::*;
pub use movies::*;
pub use ratings::*;
pub use reviews::*;
