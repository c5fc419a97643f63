use actix_web::{error, HttpResponse};
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use derive_more::{Display, Error};
use log::error;
use crate::server::repository::RepositoryError;

#[derive(Debug, Display, Error)]
pub(crate) enum CustomError {
    #[display("server is busy")]
    ServerIsBusy,
    #[display("invalid request: {reason}")]
    BadRequest {
        #[error(not(source))]
        reason: String,
    },
    #[display("resource not found")]
    ResourceNotFound,
    #[display("Invalid credentials")]
    Unauthorized,
    #[display("{what} already exists")]
    Conflict {
        #[error(not(source))]
        what: String,
    },
    #[display("database error")]
    DbError,
    #[display("timeout occurred")]
    Timeout,
    #[display("internal server error")]
    InternalError,
}

impl CustomError {
    pub(crate) fn bad_request(reason: impl Into<String>) -> Self {
        CustomError::BadRequest { reason: reason.into() }
    }
}

impl From<RepositoryError> for CustomError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::PoolExhausted => CustomError::ServerIsBusy,
            RepositoryError::Timeout => CustomError::Timeout,
            RepositoryError::Conflict { what } => CustomError::Conflict { what },
            RepositoryError::Db { source } => {
                error!("repository failed, {}", source);
                CustomError::DbError
            }
        }
    }
}

impl From<argon2::password_hash::Error> for CustomError {
    fn from(e: argon2::password_hash::Error) -> Self {
        error!("password hashing failed, {}", e);
        CustomError::InternalError
    }
}

impl error::ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match *self {
            CustomError::ServerIsBusy | CustomError::DbError | CustomError::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            CustomError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            CustomError::ResourceNotFound => StatusCode::NOT_FOUND,
            CustomError::Unauthorized => StatusCode::UNAUTHORIZED,
            CustomError::Conflict { .. } => StatusCode::CONFLICT,
            CustomError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;

    #[actix_web::test]
    async fn maps_repository_errors() {
        assert_eq!(CustomError::from(RepositoryError::PoolExhausted).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(CustomError::from(RepositoryError::Timeout).status_code(), StatusCode::GATEWAY_TIMEOUT);

        let conflict = CustomError::from(RepositoryError::Conflict { what: "user ana".to_string() });
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);
        let body = to_bytes(conflict.error_response().into_body()).await.unwrap();
        assert_eq!(body, "user ana already exists");
    }

    #[test]
    fn hashing_failure_is_a_server_fault() {
        let err = CustomError::from(argon2::password_hash::Error::Password);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "internal server error");
    }

    #[test]
    fn unauthorized_body_is_stable() {
        assert_eq!(CustomError::Unauthorized.to_string(), "Invalid credentials");
    }
}
