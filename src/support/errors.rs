use thiserror::Error;

/// Message returned for every lookup miss. The unmatched route is not echoed.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "freight route not found";

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("freight route not found")]
    RouteNotFound,

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Storage: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_not_found_message_is_fixed() {
        assert_eq!(DomainError::RouteNotFound.to_string(), ROUTE_NOT_FOUND_MESSAGE);
    }

    #[test]
    fn app_error_is_transparent() {
        let err: AppError = DomainError::Validation("weight must be positive".into()).into();
        assert_eq!(err.to_string(), "Validation: weight must be positive");
    }
}
