//! Route handlers.

pub mod dev;
pub mod health;
pub mod proxy;
