//! Application state shared by handlers and middleware

use std::sync::Arc;

use kn_core::clock::Clock;
use kn_core::repositories::{
    MemoryStore, OrganizationRepository, RevokedTokenRepository, ServiceRepository,
    ServiceVersionRepository, UserRepository,
};
use kn_core::services::{
    AuthService, AuthServiceConfig, CatalogService, MembershipGate, OrganizationService,
    RevocationStore, TokenService, TokenServiceConfig,
};
use kn_infra::{
    DatabasePool, PgOrganizationRepository, PgRevokedTokenRepository, PgServiceRepository,
    PgServiceVersionRepository, PgUserRepository,
};

/// One handle per repository trait
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub organizations: Arc<dyn OrganizationRepository>,
    pub services: Arc<dyn ServiceRepository>,
    pub versions: Arc<dyn ServiceVersionRepository>,
    pub revoked_tokens: Arc<dyn RevokedTokenRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool
    pub fn postgres(pool: &DatabasePool) -> Self {
        let pool = pool.get_pool();
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            organizations: Arc::new(PgOrganizationRepository::new(pool.clone())),
            services: Arc::new(PgServiceRepository::new(pool.clone())),
            versions: Arc::new(PgServiceVersionRepository::new(pool.clone())),
            revoked_tokens: Arc::new(PgRevokedTokenRepository::new(pool.clone())),
        }
    }

    /// Repositories backed by a single in-memory store
    pub fn in_memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            organizations: Arc::new(store.clone()),
            services: Arc::new(store.clone()),
            versions: Arc::new(store.clone()),
            revoked_tokens: Arc::new(store),
        }
    }
}

/// Services handed to every request through `web::Data`
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub organization_service: Arc<OrganizationService>,
    pub catalog_service: Arc<CatalogService>,
    pub membership_gate: Arc<MembershipGate>,
    pub token_service: Arc<TokenService>,
    pub revocation_store: Arc<RevocationStore>,
}

impl AppState {
    pub fn new(
        repositories: Repositories,
        token_config: TokenServiceConfig,
        auth_config: AuthServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let token_service = Arc::new(TokenService::new(token_config, clock.clone()));
        let revocation_store = Arc::new(RevocationStore::new(
            repositories.revoked_tokens.clone(),
            clock.clone(),
        ));
        let auth_service = Arc::new(AuthService::new(
            repositories.users.clone(),
            token_service.clone(),
            revocation_store.clone(),
            clock.clone(),
            auth_config,
        ));

        Self {
            auth_service,
            organization_service: Arc::new(OrganizationService::new(
                repositories.organizations.clone(),
                clock.clone(),
            )),
            catalog_service: Arc::new(CatalogService::new(
                repositories.services.clone(),
                repositories.versions.clone(),
                clock,
            )),
            membership_gate: Arc::new(MembershipGate::new(repositories.organizations)),
            token_service,
            revocation_store,
        }
    }
}
