//! Dependency Injection Container
//!
//! Manages creation and wiring of all application components.

use std::sync::Arc;

use crate::application::use_cases::{AutoTradeController, PlaceOrderUseCase};
use crate::config::Config;
use crate::infrastructure::execution::SimulatedExecutionBackend;
use crate::infrastructure::http::AppState;
use crate::infrastructure::identity::StaticIdentityResolver;
use crate::infrastructure::persistence::{
    InMemoryAutoTradeRuleRepository, InMemoryRecentOrderStore,
};
use crate::infrastructure::signals::InMemorySignalRegistry;

/// Concrete type alias for the place order use case.
pub type GatewayPlaceOrderUseCase =
    PlaceOrderUseCase<InMemoryRecentOrderStore, SimulatedExecutionBackend>;

/// Concrete type alias for the auto-trade controller.
pub type GatewayAutoTradeController = AutoTradeController<
    StaticIdentityResolver,
    InMemorySignalRegistry,
    InMemoryAutoTradeRuleRepository,
>;

/// Concrete type alias for the HTTP state.
pub type GatewayState = AppState<
    InMemoryRecentOrderStore,
    SimulatedExecutionBackend,
    StaticIdentityResolver,
    InMemorySignalRegistry,
    InMemoryAutoTradeRuleRepository,
>;

/// Dependency injection container.
///
/// Holds the in-process adapters and the use cases wired on top of them.
pub struct Container {
    // Adapters
    recent_orders: Arc<InMemoryRecentOrderStore>,
    backend: Arc<SimulatedExecutionBackend>,
    signals: Arc<InMemorySignalRegistry>,
    rules: Arc<InMemoryAutoTradeRuleRepository>,

    // Use cases
    place_order: Arc<GatewayPlaceOrderUseCase>,
    auto_trade: Arc<GatewayAutoTradeController>,
}

impl Container {
    /// Wire every component from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let recent_orders = Arc::new(InMemoryRecentOrderStore::new(config.dedup.retention()));
        let backend = Arc::new(SimulatedExecutionBackend::from_config(&config.backend));
        let identity = Arc::new(StaticIdentityResolver::new(
            config.identity.known_users.iter().cloned(),
        ));
        let signals = Arc::new(InMemorySignalRegistry::new());
        let rules = Arc::new(InMemoryAutoTradeRuleRepository::new());

        let place_order = Arc::new(PlaceOrderUseCase::new(
            Arc::clone(&recent_orders),
            Arc::clone(&backend),
            config.routing.retry_policy(),
        ));
        let auto_trade = Arc::new(AutoTradeController::new(
            identity,
            Arc::clone(&signals),
            Arc::clone(&rules),
        ));

        Self {
            recent_orders,
            backend,
            signals,
            rules,
            place_order,
            auto_trade,
        }
    }

    /// Get the recent-order store.
    #[must_use]
    pub fn recent_orders(&self) -> Arc<InMemoryRecentOrderStore> {
        Arc::clone(&self.recent_orders)
    }

    /// Get the execution backend.
    #[must_use]
    pub fn backend(&self) -> Arc<SimulatedExecutionBackend> {
        Arc::clone(&self.backend)
    }

    /// Get the signal registry.
    #[must_use]
    pub fn signals(&self) -> Arc<InMemorySignalRegistry> {
        Arc::clone(&self.signals)
    }

    /// Get the auto-trade rule repository.
    #[must_use]
    pub fn rules(&self) -> Arc<InMemoryAutoTradeRuleRepository> {
        Arc::clone(&self.rules)
    }

    /// Get the place order use case.
    #[must_use]
    pub fn place_order_use_case(&self) -> Arc<GatewayPlaceOrderUseCase> {
        Arc::clone(&self.place_order)
    }

    /// Get the auto-trade controller.
    #[must_use]
    pub fn auto_trade_controller(&self) -> Arc<GatewayAutoTradeController> {
        Arc::clone(&self.auto_trade)
    }

    /// Build the HTTP state.
    #[must_use]
    pub fn app_state(&self, version: impl Into<String>) -> GatewayState {
        AppState {
            place_order: self.place_order_use_case(),
            auto_trade: self.auto_trade_controller(),
            version: version.into(),
        }
    }
}
