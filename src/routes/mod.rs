//! HTTP route handlers.

pub mod address;
pub mod current_login;
pub mod departments;
pub mod health;
pub mod login;
pub mod logout;
pub mod users;
