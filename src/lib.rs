#![doc = include_str!("../README.md")]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
#![allow(
    clippy::unreadable_literal,
    clippy::float_cmp,
    clippy::derive_partial_eq_without_eq
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod options;

mod concern;
mod connection_string;
pub mod error;
mod selection_criteria;
mod serde_util;
mod trace;
mod uuid_representation;

pub use crate::connection_string::ConnectionString;
