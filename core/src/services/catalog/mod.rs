//! Service catalog: services of an organization and their versions

mod service;

#[cfg(test)]
mod tests;

pub use service::{CatalogService, VersionUpdate};
