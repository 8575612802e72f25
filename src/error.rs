//! Contains the `Error` and `Result` types that `mongodb_connection_string` uses.

use thiserror::Error;

/// The result type for all methods that can return an error in the `mongodb_connection_string`
/// crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while parsing a connection string. The inner
/// [`ErrorKind`](enum.ErrorKind.html) is wrapped in a `Box` to keep the `Result` small.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{kind}")]
#[non_exhaustive]
pub struct Error {
    /// The type of error that occurred.
    pub kind: Box<ErrorKind>,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }

    pub(crate) fn invalid_format(connection_string: impl Into<String>) -> Self {
        ErrorKind::InvalidFormat {
            connection_string: connection_string.into(),
        }
        .into()
    }

    pub(crate) fn invalid_host(host: impl Into<String>) -> Self {
        ErrorKind::InvalidHost { host: host.into() }.into()
    }

    pub(crate) fn invalid_option_value(
        option: impl Into<String>,
        value: impl Into<String>,
        expected: ValueType,
    ) -> Self {
        ErrorKind::InvalidOptionValue {
            option: option.into(),
            value: value.into(),
            expected,
        }
        .into()
    }

    /// Whether the input did not match the connection string grammar at all.
    pub fn is_format_error(&self) -> bool {
        matches!(self.kind.as_ref(), ErrorKind::InvalidFormat { .. })
    }

    /// Whether one of the hosts in the connection string was syntactically invalid.
    pub fn is_invalid_host(&self) -> bool {
        matches!(self.kind.as_ref(), ErrorKind::InvalidHost { .. })
    }

    /// Whether a recognized option carried a value that could not be converted to its type.
    pub fn is_invalid_option_value(&self) -> bool {
        matches!(self.kind.as_ref(), ErrorKind::InvalidOptionValue { .. })
    }
}

impl<E> From<E> for Error
where
    ErrorKind: From<E>,
{
    fn from(err: E) -> Self {
        Self::new(err.into())
    }
}

impl std::ops::Deref for Error {
    type Target = ErrorKind;

    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

/// The types of errors that can occur.
#[allow(missing_docs)]
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input does not match the `mongodb://` connection string grammar.
    #[error("The connection string '{connection_string}' is not valid.")]
    #[non_exhaustive]
    InvalidFormat { connection_string: String },

    /// A host in the host list is not a valid hostname, IP literal or port.
    #[error("Host '{host}' is not valid.")]
    #[non_exhaustive]
    InvalidHost { host: String },

    /// A recognized option had a value that could not be converted to the option's type.
    #[error("{option} has an invalid {expected} value of {value}.")]
    #[non_exhaustive]
    InvalidOptionValue {
        option: String,
        value: String,
        expected: ValueType,
    },
}

/// The type a recognized option's value was expected to convert to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Display)]
#[non_exhaustive]
pub enum ValueType {
    /// `true` or `false`.
    #[display("boolean")]
    Boolean,

    /// A signed 32-bit decimal integer.
    #[display("int32")]
    Int32,

    /// A duration, optionally suffixed with a unit or written as `hh:mm:ss`.
    #[display("TimeSpan")]
    Duration,

    /// A comma-separated list of `key:value` tags.
    #[display("tag set")]
    TagSet,

    /// A member of the named enumeration.
    #[display("{_0}")]
    Enum(&'static str),
}
