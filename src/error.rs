//! Error types for the value runtime

use thiserror::Error;

use crate::value::{JsString, JsValue};

/// Result of any runtime operation that can fail.
pub type JsResult<T = JsValue> = Result<T, JsError>;

/// Classification of a [`JsError`], independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    WrongReceiverType,
    IndexOutOfBounds,
    InvalidArgument,
    NotCallable,
    Syntax,
    Thrown,
}

/// Main error type for the runtime
#[derive(Debug, Clone, Error)]
pub enum JsError {
    /// A built-in was invoked on a receiver of the wrong variant
    #[error("TypeError: {message}")]
    WrongReceiverType { message: String },

    /// Numeric read past the end of an Array or ByteBuffer
    #[error("RangeError: index {index} out of bounds for length {length}")]
    IndexOutOfBounds { index: f64, length: usize },

    #[error("TypeError: {message}")]
    InvalidArgument { message: String },

    #[error("TypeError: {what} is not a function")]
    NotCallable { what: String },

    #[error("SyntaxError: {message}")]
    Syntax { message: String },

    /// A script-level `throw` carrying an arbitrary value
    #[error("Uncaught {}", .0.to_js_string())]
    Thrown(JsValue),
}

impl JsError {
    pub fn wrong_receiver(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::debug!(%message, "wrong receiver type");
        JsError::WrongReceiverType { message }
    }

    pub fn index_out_of_bounds(index: f64, length: usize) -> Self {
        tracing::debug!(index, length, "index out of bounds");
        JsError::IndexOutOfBounds { index, length }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        JsError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_callable(what: impl Into<String>) -> Self {
        JsError::NotCallable { what: what.into() }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        JsError::Syntax {
            message: message.into(),
        }
    }

    /// Wrap a script value as a propagating error
    pub fn thrown(value: JsValue) -> Self {
        tracing::debug!(value = ?value, "value thrown");
        JsError::Thrown(value)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            JsError::WrongReceiverType { .. } => ErrorKind::WrongReceiverType,
            JsError::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            JsError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            JsError::NotCallable { .. } => ErrorKind::NotCallable,
            JsError::Syntax { .. } => ErrorKind::Syntax,
            JsError::Thrown(_) => ErrorKind::Thrown,
        }
    }

    /// The value a script observes when it catches this error.
    ///
    /// Thrown values come back unchanged; runtime failures become their
    /// rendered message.
    pub fn into_value(self) -> JsValue {
        match self {
            JsError::Thrown(value) => value,
            other => JsValue::String(JsString::from(other.to_string())),
        }
    }
}
