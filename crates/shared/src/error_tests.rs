use super::*;
use rstest::rstest;

#[rstest]
#[case(AppError::NotFound("x".into()), 404, "NOT_FOUND")]
#[case(AppError::Validation("x".into()), 400, "VALIDATION_ERROR")]
#[case(AppError::MissingInput("x".into()), 400, "MISSING_INPUT")]
#[case(AppError::Conflict("x".into()), 409, "CONFLICT")]
#[case(AppError::ExternalService("x".into()), 502, "EXTERNAL_SERVICE_ERROR")]
fn test_app_error_status_and_code(
    #[case] error: AppError,
    #[case] status: u16,
    #[case] code: &str,
) {
    assert_eq!(error.status_code(), status);
    assert_eq!(error.error_code(), code);
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        format!("{}", AppError::NotFound("msg".into())),
        "Not found: msg"
    );
    assert_eq!(
        format!("{}", AppError::MissingInput("date".into())),
        "Missing input: date"
    );
    assert_eq!(
        format!("{}", AppError::Conflict("msg".into())),
        "Conflict: msg"
    );
    assert_eq!(
        format!("{}", AppError::ExternalService("msg".into())),
        "External service error: msg"
    );
}
