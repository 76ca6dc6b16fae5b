pub mod auth;
pub mod calculations;

pub use auth::AuthService;
