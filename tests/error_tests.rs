//! Error handling tests

use axum::http::StatusCode;
use axum::response::IntoResponse;
use milecount::providers::ProviderError;
use milecount::services::CalculationError;
use milecount::utils::error::helpers::*;
use milecount::utils::error::*;

#[test]
fn test_app_error_status_codes() {
    let test_cases = vec![
        (AppError::Authentication("test".to_string()), StatusCode::UNAUTHORIZED),
        (AppError::Validation("test".to_string()), StatusCode::BAD_REQUEST),
        (AppError::NotFound("test".to_string()), StatusCode::NOT_FOUND),
        (AppError::NoData("test".to_string()), StatusCode::NOT_FOUND),
        (AppError::Conflict("test".to_string()), StatusCode::CONFLICT),
        (AppError::Timeout, StatusCode::GATEWAY_TIMEOUT),
        (AppError::ServiceUnavailable("test".to_string()), StatusCode::SERVICE_UNAVAILABLE),
        (AppError::ExternalApi("test".to_string()), StatusCode::BAD_GATEWAY),
        (AppError::Internal("test".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        (AppError::Config(anyhow::anyhow!("test")), StatusCode::INTERNAL_SERVER_ERROR),
        (AppError::Database(sqlx::Error::RowNotFound), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, expected_status) in test_cases {
        assert_eq!(error.status_code(), expected_status, "{}", error);
    }
}

#[test]
fn test_app_error_types() {
    let test_cases = vec![
        (AppError::Authentication("test".to_string()), "authentication_error"),
        (AppError::Validation("test".to_string()), "invalid_request_error"),
        (AppError::NotFound("test".to_string()), "not_found_error"),
        (AppError::NoData("test".to_string()), "no_data_error"),
        (AppError::Conflict("test".to_string()), "conflict_error"),
        (AppError::Timeout, "timeout_error"),
        (AppError::ServiceUnavailable("test".to_string()), "unavailable_error"),
        (AppError::ExternalApi("test".to_string()), "upstream_error"),
        (AppError::Internal("test".to_string()), "api_error"),
    ];

    for (error, expected_type) in test_cases {
        assert_eq!(error.error_type(), expected_type);
    }
}

#[test]
fn test_should_log_details() {
    assert!(!AppError::Authentication("test".to_string()).should_log_details());
    assert!(AppError::Validation("test".to_string()).should_log_details());
    assert!(AppError::NoData("test".to_string()).should_log_details());
}

#[test]
fn test_error_response_body() {
    let response = AppError::Validation("year must be a 4-digit number".to_string()).to_error_response();

    assert_eq!(response.response_type, "error");
    assert_eq!(response.error.error_type, "invalid_request_error");
    assert_eq!(
        response.error.message,
        "Request validation failed: year must be a 4-digit number"
    );

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["type"], "error");
    assert_eq!(json["error"]["type"], "invalid_request_error");
}

#[tokio::test]
async fn test_into_response() {
    let response = no_data_error("no fuel price for region NUS").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"]["type"], "no_data_error");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("region NUS"));
}

#[test]
fn test_error_helpers() {
    assert!(matches!(auth_error("bad password"), AppError::Authentication(_)));
    assert!(matches!(validation_error("Missing field"), AppError::Validation(_)));
    assert!(matches!(conflict_error("taken"), AppError::Conflict(_)));
    assert!(matches!(internal_error("boom"), AppError::Internal(_)));
    assert!(matches!(
        service_unavailable_error("No database configured"),
        AppError::ServiceUnavailable(_)
    ));

    assert_eq!(
        conflict_error("An account for a@b.c already exists").to_string(),
        "Conflict: An account for a@b.c already exists"
    );
}

#[test]
fn test_error_context_trait() {
    let parse: Result<i64, std::num::ParseIntError> = "12a".parse();
    match parse.validation_context("Invalid user id") {
        Err(AppError::Validation(msg)) => assert!(msg.contains("Invalid user id")),
        other => panic!("Expected validation error, got {:?}", other),
    }

    let json: Result<serde_json::Value, serde_json::Error> = serde_json::from_str("{invalid");
    match json.external_api_context("Failed to decode upstream body") {
        Err(AppError::ExternalApi(msg)) => assert!(msg.contains("Failed to decode upstream body")),
        other => panic!("Expected external API error, got {:?}", other),
    }

    let fmt: Result<(), std::fmt::Error> = Err(std::fmt::Error);
    assert!(matches!(
        fmt.internal_context("Formatting failed"),
        Err(AppError::Internal(_))
    ));
}

#[test]
fn test_calculation_error_conversion() {
    let err: AppError = CalculationError::FuelEconomyUnavailable("2016 Ford Fusion".to_string()).into();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    assert!(err.to_string().contains("2016 Ford Fusion"));
}

#[test]
fn test_provider_error_messages() {
    assert_eq!(
        ProviderError::MissingApiKey("EIA").to_string(),
        "EIA API key not configured"
    );
    assert_eq!(
        ProviderError::Status {
            status: 403,
            body: "forbidden".to_string()
        }
        .to_string(),
        "upstream returned status 403: forbidden"
    );
}
