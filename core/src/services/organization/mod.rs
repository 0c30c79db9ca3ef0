//! Organization management

mod service;


pub use service::OrganizationService;
