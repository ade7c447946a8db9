use thiserror::Error;

/// Errors that can occur when translating a where filter
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("The filter does not contain the where key")]
    MissingWhereClause,

    #[error("The where object does not have one key (found {0})")]
    InvalidKeyCount(usize),

    #[error("The where object key is invalid")]
    InvalidKey,

    #[error("The object value for '{field}' is invalid: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("The filter where does not support a parameter: '{0}'")]
    ParameterNotSupported(String),

    #[error("An invalid operator for the object value of '{field}': expected one key, found {count}")]
    InvalidOperatorShape { field: String, count: usize },

    #[error("The key {0} operator is not supported by the filter where")]
    UnsupportedOperator(String),

    #[error("The combination operator: {0} is not supported by the filter where")]
    UnsupportedCombinationOperator(String),

    #[error("The combination operator: {combinator} should have two conditions, found {count}")]
    WrongCombinationArity { combinator: String, count: usize },
}
