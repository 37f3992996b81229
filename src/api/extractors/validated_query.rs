//! Validated query string.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::format_validation_errors;
use crate::errors::AppError;

/// Query parameters that have passed their `Validate` rules.
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaginationParams;
    use axum::http::Request;

    async fn extract(uri: &str) -> Result<PaginationParams, AppError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        ValidatedQuery::<PaginationParams>::from_request_parts(&mut parts, &())
            .await
            .map(|ValidatedQuery(params)| params)
    }

    #[tokio::test]
    async fn test_defaults_applied() {
        let params = extract("/customers/").await.unwrap();
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, 100);
    }

    #[tokio::test]
    async fn test_limit_out_of_range_rejected() {
        let err = extract("/customers/?limit=0").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = extract("/customers/?limit=1001").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_malformed_number_rejected() {
        let err = extract("/customers/?skip=-1").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
