use std::sync::Arc;

use axum::Router;
use ebooks_sdk::EbooksClientV1;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigrationTrait;
use tracing::{debug, info};

use crate::api::rest::auth::{AuthState, authn_middleware};
use crate::api::rest::openapi::OpenApiRegistry;
use crate::api::rest::routes;
use crate::config::EbooksConfig;
use crate::domain::local_client::EbooksLocalClient;
use crate::domain::service::{AppServices, ServiceConfig};
use crate::infra::auth::{AuthConfig, StaticTokenAuthenticator};
use crate::infra::storage::{OrmEbooksRepository, OrmReviewsRepository};

/// Type alias for the concrete `AppServices` type used with ORM repositories.
/// Lives in the composition root to keep infra types out of the domain.
pub(crate) type ConcreteAppServices = AppServices<OrmEbooksRepository, OrmReviewsRepository>;

/// Ebooks module: owns the services and exposes them over REST and as an
/// in-process [`EbooksClientV1`].
pub struct EbooksModule {
    // Read-mostly after init.
    service: arc_swap::ArcSwapOption<ConcreteAppServices>,
}

impl Default for EbooksModule {
    fn default() -> Self {
        Self {
            service: arc_swap::ArcSwapOption::from(None),
        }
    }
}

impl Clone for EbooksModule {
    fn clone(&self) -> Self {
        Self {
            service: arc_swap::ArcSwapOption::new(self.service.load().as_ref().map(Clone::clone)),
        }
    }
}

impl EbooksModule {
    /// Build the services over `db`. Must run before [`Self::register_rest`]
    /// and [`Self::client`].
    pub fn init(&self, db: DatabaseConnection, cfg: &EbooksConfig) {
        info!("Initializing ebooks module");
        debug!(
            "Loaded ebooks config: max_title_length={}, max_author_length={}",
            cfg.max_title_length, cfg.max_author_length
        );

        let service_config = ServiceConfig {
            max_title_length: cfg.max_title_length,
            max_author_length: cfg.max_author_length,
        };

        let services = Arc::new(AppServices::new(
            OrmEbooksRepository::new(),
            OrmReviewsRepository::new(),
            db,
            service_config,
        ));

        self.service.store(Some(services));
    }

    #[must_use]
    pub fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        use sea_orm_migration::MigratorTrait;
        crate::infra::storage::migrations::Migrator::migrations()
    }

    /// In-process client applying the same policies as the REST surface.
    pub fn client(&self) -> anyhow::Result<Arc<dyn EbooksClientV1>> {
        let services = self.services()?;
        Ok(Arc::new(EbooksLocalClient::new(services)))
    }

    /// Mount every endpoint plus the `OpenAPI` document on `router`, behind
    /// the bearer-token middleware.
    pub fn register_rest(&self, router: Router, auth: &AuthConfig) -> anyhow::Result<Router> {
        info!("Registering ebooks REST routes");

        let services = self.services()?;
        let mut openapi = OpenApiRegistry::default();
        let router = routes::register_routes(router, &mut openapi, services)?;
        let operations = openapi.operations().len();
        let router = openapi.into_router(router);

        let state = AuthState {
            authenticator: Arc::new(StaticTokenAuthenticator::from_config(auth)),
        };
        let router = router.layer(axum::middleware::from_fn_with_state(state, authn_middleware));

        info!(operations, "Ebooks REST routes registered successfully");
        Ok(router)
    }

    fn services(&self) -> anyhow::Result<Arc<ConcreteAppServices>> {
        self.service
            .load()
            .as_ref()
            .map(Arc::clone)
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }
}
