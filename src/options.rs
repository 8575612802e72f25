//! Contains the types that make up a parsed [`ConnectionString`](crate::ConnectionString).
//!
//! The consumer-facing structs in this module use the
//! [`typed-builder`](https://crates.io/crates/typed-builder) crate to derive a type-safe builder
//! API on them. For example, to create a [`WriteConcern`](struct.WriteConcern.html) with only `w`
//! and `journal` set:
//!
//! ```rust
//! use mongodb_connection_string::options::{Acknowledgment, WriteConcern};
//!
//! let write_concern = WriteConcern::builder()
//!                         .w(Acknowledgment::Majority)
//!                         .journal(true)
//!                         .build();
//! ```

pub use crate::{
    concern::*,
    connection_string::{Credential, HostKind, OptionMap, ServerAddress, DEFAULT_PORT},
    selection_criteria::*,
    uuid_representation::*,
};
