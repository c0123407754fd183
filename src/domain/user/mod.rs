//! User domain
//!
//! Account entity, storage trait and input validation for sign-up and sign-in.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId};
pub use repository::UserRepository;
pub use validation::{
    normalize_email, validate_email, validate_name, validate_password, UserValidationError,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
