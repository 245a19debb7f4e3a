pub mod admin;
pub mod health;
pub mod helpers;
pub mod register;
pub mod users;
