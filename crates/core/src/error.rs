use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Invalid page: {0}")]
    InvalidPage(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
