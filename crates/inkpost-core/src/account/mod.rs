pub mod model;
pub mod repository;

pub use model::{ContactMessage, Profile, Registration};
pub use repository::{AccountApi, AuthApi};
