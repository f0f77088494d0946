use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing or invalid API key")]
    Unauthenticated,
    #[error("API key is not authorized to access restaurant {restaurant_id}")]
    Forbidden { restaurant_id: String },
}
