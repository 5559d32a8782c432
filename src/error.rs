use thiserror::Error;

/// Rejected form input. Raised before anything touches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please provide a category.")]
    MissingCategory,

    #[error("Please provide a valid {}.", .field.to_lowercase())]
    MissingAmount { field: &'static str },

    #[error("{field} '{input}' is not a number.")]
    InvalidAmount { field: &'static str, input: String },

    #[error("{field} must be greater than zero.")]
    NonPositive { field: &'static str },

    #[error("{field} can have at most two decimal places.")]
    TooPrecise { field: &'static str },

    #[error("{field} must be less than 1,000,000,000,000.")]
    TooLarge { field: &'static str },
}
