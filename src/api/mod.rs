//! HTTP API for the payroll engine.
//!
//! Endpoints:
//!
//! - `POST /calculate` computes one employee's monthly payroll and validates it
//! - `POST /gratuity` computes gratuity accrued, and payable on exit
//! - `POST /validate-run` validates a set of computed components as a run

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, GratuityRequest, ValidateRunRequest};
pub use response::{ApiError, CalculationResponse, ValidateRunResponse};
pub use state::AppState;
