pub mod calculations;
pub mod health;
pub mod users;
