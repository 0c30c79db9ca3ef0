pub mod auth;
pub mod cors;
pub mod org_access;
pub mod trace;

pub use auth::{AuthContext, JwtAuth};
pub use cors::create_cors;
pub use org_access::OrgAccess;
pub use trace::TraceIdScope;
