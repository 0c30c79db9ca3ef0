//! Route handlers grouped by resource

pub mod health;
pub mod organizations;
pub mod services;
pub mod users;
pub mod versions;
