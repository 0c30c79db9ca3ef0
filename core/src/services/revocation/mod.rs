//! Token revocation: the blacklist store and its background reaper

mod reaper;
mod store;

#[cfg(test)]
mod tests;

pub use reaper::RevocationReaper;
pub use store::RevocationStore;
