//! API route handlers

pub mod alarm;
pub mod clock;
pub mod health;
