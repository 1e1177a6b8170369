use crate::config::ConfigError;
use crate::feed::FeedError;
use crate::forms::FormError;
use crate::http::TransportError;
use crate::store::StoreError;
use rocket::http::{ContentType, Status};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    FeedError(FeedError),
    StoreError(StoreError),
    FormError(FormError),
    ConfigError(ConfigError),
}

impl From<FeedError> for ApiError {
    fn from(error: FeedError) -> Self {
        ApiError::FeedError(error)
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        ApiError::StoreError(error)
    }
}

impl From<FormError> for ApiError {
    fn from(error: FormError) -> Self {
        ApiError::FormError(error)
    }
}

impl From<ConfigError> for ApiError {
    fn from(error: ConfigError) -> Self {
        ApiError::ConfigError(error)
    }
}

fn json_response(status: Status, error: &str, message: String) -> rocket::response::Result<'static> {
    let body = json!({
        "error": error,
        "message": message
    })
    .to_string();

    rocket::Response::build()
        .status(status)
        .header(ContentType::JSON)
        .sized_body(body.len(), std::io::Cursor::new(body))
        .ok()
}

impl<'r> rocket::response::Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        match self {
            ApiError::FeedError(FeedError::FetchError {
                source: TransportError::Timeout,
                url,
            }) => json_response(
                Status::GatewayTimeout,
                "Instagram timeout",
                format!("Instagram did not answer in time ({})", url),
            ),
            ApiError::FeedError(error @ FeedError::FetchError { .. }) => {
                json_response(Status::BadGateway, "Instagram fetch error", error.to_string())
            }
            ApiError::FeedError(error @ FeedError::MalformedResponseError { .. }) => {
                json_response(Status::BadGateway, "Malformed Instagram response", error.to_string())
            }
            ApiError::FeedError(error @ FeedError::InvalidUserIdError { .. }) => {
                json_response(Status::InternalServerError, "Invalid Instagram settings", error.to_string())
            }
            ApiError::StoreError(error) => {
                json_response(Status::InternalServerError, "Settings error", error.to_string())
            }
            ApiError::FormError(error) => {
                json_response(Status::UnprocessableEntity, "Invalid form", error.to_string())
            }
            ApiError::ConfigError(error) => {
                json_response(Status::InternalServerError, "Configuration error", error.to_string())
            }
        }
    }
}
