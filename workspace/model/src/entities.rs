//! Root for all SeaORM entity modules of the calculation bookkeeping service.
//!
//! Two tables exist: `users` holding identities and their current bearer token,
//! and `calculations` holding computed operations, optionally owned by a user.

pub mod calculation;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::calculation::Entity as Calculation;
    pub use super::user::Entity as User;
}
