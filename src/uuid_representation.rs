use std::str::FromStr;

use crate::{
    connection_string::convert::UriEnum,
    error::{Error, Result, ValueType},
};

/// The byte layout used when encoding a UUID as BSON binary data, selected by the `uuidRepresentation`
/// (or legacy `guids`) connection string option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, derive_more::Display)]
#[non_exhaustive]
pub enum UuidRepresentation {
    /// No representation was chosen; encoding a UUID is an error.
    #[display("unspecified")]
    Unspecified,

    /// The standard RFC 4122 layout (binary subtype 4).
    #[display("standard")]
    Standard,

    /// The layout historically used by the C# driver (binary subtype 3).
    #[display("csharpLegacy")]
    CSharpLegacy,

    /// The layout historically used by the Java driver (binary subtype 3).
    #[display("javaLegacy")]
    JavaLegacy,

    /// The layout historically used by the Python driver (binary subtype 3).
    #[display("pythonLegacy")]
    PythonLegacy,
}

impl UriEnum for UuidRepresentation {
    const TYPE_NAME: &'static str = "UuidRepresentation";
    const MEMBERS: &'static [(&'static str, Self)] = &[
        ("unspecified", Self::Unspecified),
        ("standard", Self::Standard),
        ("csharpLegacy", Self::CSharpLegacy),
        ("javaLegacy", Self::JavaLegacy),
        ("pythonLegacy", Self::PythonLegacy),
    ];
}

impl UuidRepresentation {
    /// Looks up a representation by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as UriEnum>::lookup(name)
    }

    /// The canonical camelCase name of the representation.
    pub fn as_str(&self) -> &'static str {
        <Self as UriEnum>::name_of(*self)
    }
}

impl FromStr for UuidRepresentation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| {
            Error::invalid_option_value("uuidRepresentation", s, ValueType::Enum(Self::TYPE_NAME))
        })
    }
}
