//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{GratuityResult, PayrollComponent};
use crate::orchestrator::CalculatorFactory;
use crate::validation::{has_critical_errors, summarize_errors};

use super::request::{
    CalculationRequest, GratuityRequest, ValidateRunRequest, jurisdiction_or_default,
};
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, ValidateRunResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/gratuity", post(gratuity_handler))
        .route("/validate-run", post(validate_run_handler))
        .with_state(state)
}

/// Handler for POST /calculate.
///
/// Computes one employee's monthly payroll and validates the result.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match perform_calculation(state.factory(), request) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                gross_amount = %response.result.gross_amount,
                net_pay = %response.result.net_pay,
                errors = response.summary.errors,
                warnings = response.summary.warnings,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Calculation failed");
            error_response(err)
        }
    }
}

/// Handler for POST /gratuity.
///
/// Computes gratuity accrued to `as_of`, plus the payout when an exit reason
/// is given.
async fn gratuity_handler(
    State(state): State<AppState>,
    payload: Result<Json<GratuityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing gratuity request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match perform_gratuity(state.factory(), request) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %result.employee_id,
                is_eligible = result.is_eligible,
                accrued_amount = %result.accrued_amount,
                "Gratuity calculated"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Gratuity calculation failed");
            error_response(err)
        }
    }
}

/// Handler for POST /validate-run.
///
/// Runs run-level and component-level validation over submitted components.
async fn validate_run_handler(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing run validation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match perform_run_validation(state.factory(), request) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                errors = response.summary.errors,
                warnings = response.summary.warnings,
                has_critical_errors = response.has_critical_errors,
                "Run validation completed"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Run validation failed");
            error_response(err)
        }
    }
}

fn perform_calculation(
    factory: &CalculatorFactory<ConfigLoader>,
    request: CalculationRequest,
) -> EngineResult<CalculationResponse> {
    let jurisdiction = jurisdiction_or_default(&request.jurisdiction);
    let result = factory.compute_for_employee(
        &request.employee,
        &request.salary_structure,
        &request.attendance,
        jurisdiction,
    )?;
    let validator = factory.create_validator(jurisdiction)?;

    let component = PayrollComponent::from_result(
        request.employee.id.clone(),
        request.salary_structure.id.clone(),
        request.attendance,
        result,
    );
    let validations = validator.validate_component(
        &component,
        Some(&request.employee),
        Some(&request.salary_structure),
    );

    Ok(CalculationResponse {
        summary: summarize_errors(&validations),
        result: component.result,
        validations,
    })
}

fn perform_gratuity(
    factory: &CalculatorFactory<ConfigLoader>,
    request: GratuityRequest,
) -> EngineResult<GratuityResult> {
    if request.monthly_basic < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "monthly_basic".to_string(),
            message: "must not be negative".to_string(),
        });
    }

    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let calculator =
        factory.create_gratuity_calculator(jurisdiction_or_default(&request.jurisdiction))?;

    Ok(match request.exit_reason {
        Some(reason) => calculator.payable(
            &request.employee,
            request.monthly_basic,
            Some(reason),
            as_of,
        ),
        None => calculator.accrue(&request.employee, request.monthly_basic, as_of),
    })
}

fn perform_run_validation(
    factory: &CalculatorFactory<ConfigLoader>,
    request: ValidateRunRequest,
) -> EngineResult<ValidateRunResponse> {
    let validator = factory.create_validator(jurisdiction_or_default(&request.jurisdiction))?;
    let validations = validator.validate_all(&request.components, &request.period);

    Ok(ValidateRunResponse {
        summary: summarize_errors(&validations),
        has_critical_errors: has_critical_errors(&validations),
        validations,
    })
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    let api_error = ApiErrorResponse::bad_request(error);
    json_response(api_error.status, api_error.error)
}

fn error_response(err: EngineError) -> Response {
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_payroll;
    use crate::config::StatutoryRuleSet;
    use crate::models::{Employee, ExitReason, PayrollInput, SalaryStructure};
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/india").expect("Failed to load config");
        AppState::new(config)
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_valid_request() -> CalculationRequest {
        CalculationRequest {
            jurisdiction: None,
            employee: Employee::new("emp_001", make_date("2020-04-01")),
            salary_structure: SalaryStructure::basic_only(dec("20000")),
            attendance: PayrollInput::full_month(30),
        }
    }

    async fn post_json(router: Router, uri: &str, body: String) -> Response {
        router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn read_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_calculate_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&create_valid_request()).unwrap();

        let response = post_json(router, "/calculate", body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let response: CalculationResponse = read_body(response).await;
        assert_eq!(response.result.gross_amount, dec("20000.00"));
        assert_eq!(response.result.pf_employee, dec("1800.00"));
        assert_eq!(response.result.esi_employee, dec("150.00"));
        assert_eq!(response.result.professional_tax, dec("150.00"));
        assert_eq!(response.result.tds, Decimal::ZERO);
        assert_eq!(response.result.net_pay, dec("17900.00"));
        assert_eq!(response.summary.errors, 0);
        assert!(response.validations.iter().any(|v| v.code == "MISSING_PAN"));
    }

    #[tokio::test]
    async fn test_calculate_uses_jurisdiction_slabs() {
        let router = create_router(create_test_state());
        let mut request = create_valid_request();
        request.jurisdiction = Some("KA".to_string());
        let body = serde_json::to_string(&request).unwrap();

        let response = post_json(router, "/calculate", body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let response: CalculationResponse = read_body(response).await;
        assert_eq!(response.result.professional_tax, Decimal::ZERO);
        assert_eq!(response.result.net_pay, dec("18050.00"));
    }

    #[tokio::test]
    async fn test_calculate_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = post_json(router, "/calculate", "{invalid json".to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_calculate_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let body = r#"{
            "employee": {
                "employment_status": "active",
                "date_of_joining": "2020-04-01"
            },
            "salary_structure": { "monthly_basic": "20000" },
            "attendance": { "days_worked": 30, "days_in_month": 30 }
        }"#;

        let response = post_json(router, "/calculate", body.to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("id"));
    }

    #[tokio::test]
    async fn test_calculate_invalid_attendance_returns_400() {
        let router = create_router(create_test_state());
        let mut request = create_valid_request();
        request.attendance.days_in_month = 0;
        let body = serde_json::to_string(&request).unwrap();

        let response = post_json(router, "/calculate", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "INVALID_ATTENDANCE");
    }

    #[tokio::test]
    async fn test_calculate_huge_absent_days_reports_mismatch() {
        let router = create_router(create_test_state());
        let mut request = create_valid_request();
        request.attendance.days_absent = i32::MAX;
        let body = serde_json::to_string(&request).unwrap();

        let response = post_json(router, "/calculate", body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let response: CalculationResponse = read_body(response).await;
        assert!(
            response
                .validations
                .iter()
                .any(|v| v.code == "DAYS_TOTAL_MISMATCH")
        );
    }

    #[tokio::test]
    async fn test_gratuity_resignation_pays_half() {
        let router = create_router(create_test_state());
        let joining = make_date("2018-01-01");
        let request = GratuityRequest {
            jurisdiction: None,
            employee: Employee::new("emp_001", joining),
            monthly_basic: dec("20000"),
            exit_reason: Some(ExitReason::Resignation),
            as_of: Some(joining + chrono::Duration::days(2192)),
        };
        let body = serde_json::to_string(&request).unwrap();

        let response = post_json(router, "/gratuity", body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let result: GratuityResult = read_body(response).await;
        assert!(result.is_eligible);
        assert_eq!(result.accrued_amount, dec("60013.99"));
        assert_eq!(result.payable_amount, Some(dec("30007.00")));
    }

    #[tokio::test]
    async fn test_gratuity_without_exit_reason_is_accrual_only() {
        let router = create_router(create_test_state());
        let joining = make_date("2018-01-01");
        let request = GratuityRequest {
            jurisdiction: None,
            employee: Employee::new("emp_001", joining),
            monthly_basic: dec("20000"),
            exit_reason: None,
            as_of: Some(joining + chrono::Duration::days(2192)),
        };
        let body = serde_json::to_string(&request).unwrap();

        let response = post_json(router, "/gratuity", body).await;

        let result: GratuityResult = read_body(response).await;
        assert_eq!(result.accrued_amount, dec("60013.99"));
        assert_eq!(result.payable_amount, None);
    }

    #[tokio::test]
    async fn test_gratuity_negative_basic_returns_400() {
        let router = create_router(create_test_state());
        let request = GratuityRequest {
            jurisdiction: None,
            employee: Employee::new("emp_001", make_date("2018-01-01")),
            monthly_basic: dec("-1"),
            exit_reason: None,
            as_of: Some(make_date("2024-01-02")),
        };
        let body = serde_json::to_string(&request).unwrap();

        let response = post_json(router, "/gratuity", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "INVALID_INPUT");
        assert!(error.message.contains("monthly_basic"));
    }

    #[tokio::test]
    async fn test_gratuity_joining_after_as_of_has_no_service() {
        let router = create_router(create_test_state());
        let request = GratuityRequest {
            jurisdiction: None,
            employee: Employee::new("emp_001", make_date("2020-04-01")),
            monthly_basic: dec("20000"),
            exit_reason: None,
            as_of: Some(make_date("2019-01-01")),
        };
        let body = serde_json::to_string(&request).unwrap();

        let response = post_json(router, "/gratuity", body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let result: GratuityResult = read_body(response).await;
        assert!(!result.is_eligible);
        assert_eq!(result.service_months, 0);
        assert_eq!(result.accrued_amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_validate_run_empty_is_critical() {
        let router = create_router(create_test_state());
        let request = ValidateRunRequest {
            jurisdiction: None,
            period: "2024-03".to_string(),
            components: vec![],
        };
        let body = serde_json::to_string(&request).unwrap();

        let response = post_json(router, "/validate-run", body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let response: ValidateRunResponse = read_body(response).await;
        assert!(response.has_critical_errors);
        assert_eq!(response.validations.len(), 1);
        assert_eq!(response.validations[0].code, "NO_COMPONENTS");
    }

    #[tokio::test]
    async fn test_validate_run_clean_component() {
        let router = create_router(create_test_state());
        let rules = StatutoryRuleSet::india_default();
        let employee = Employee::new("emp_001", make_date("2020-04-01"));
        let salary = SalaryStructure::basic_only(dec("20000"));
        let input = PayrollInput::full_month(30);
        let result = calculate_payroll(&employee, &salary, &input, &rules);
        let mut component = PayrollComponent::from_result("emp_001", None, input, result);
        component.is_validated = true;

        let request = ValidateRunRequest {
            jurisdiction: None,
            period: "2024-03".to_string(),
            components: vec![component],
        };
        let body = serde_json::to_string(&request).unwrap();

        let response = post_json(router, "/validate-run", body).await;

        let response: ValidateRunResponse = read_body(response).await;
        assert!(!response.has_critical_errors);
        assert_eq!(response.summary.errors, 0);
        assert_eq!(response.summary.warnings, 0);
        assert!(
            response
                .validations
                .iter()
                .any(|v| v.code == "PF_WAGE_CAPPED")
        );
    }
}
