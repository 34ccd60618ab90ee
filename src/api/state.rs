//! Application state for the payroll engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::orchestrator::CalculatorFactory;

/// Shared application state.
///
/// Holds the calculator factory, which resolves statutory rules per
/// jurisdiction from the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    factory: Arc<CalculatorFactory<ConfigLoader>>,
}

impl AppState {
    /// Creates a new application state from a loaded configuration.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            factory: Arc::new(CalculatorFactory::new(config)),
        }
    }

    /// Returns the calculator factory.
    pub fn factory(&self) -> &CalculatorFactory<ConfigLoader> {
        &self.factory
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ConfigLoader {
        self.factory.resolver()
    }
}
