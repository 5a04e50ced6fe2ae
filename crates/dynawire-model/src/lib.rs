//! Value model, wire codec and request/response shapes for dynawire.
//!
//! - [`Value`], [`Number`] and [`Document`] form the dynamic value model.
//! - [`codec`] converts between that model and the typed JSON wire format
//!   ([`WireValue`]).
//! - [`ExpressionAttributes`] holds copy-on-write expression parameters.
//! - [`input`], [`output`] and [`types`] are the per-operation JSON bodies.
//! - [`ErrorKind`] is the service error taxonomy.
#![allow(clippy::doc_markdown)]
#![allow(clippy::struct_excessive_bools)]

pub mod codec;
pub mod document;
pub mod error;
pub mod input;
pub mod number;
pub mod operations;
pub mod output;
pub mod params;
pub mod types;
pub mod value;
pub mod wire;

pub use codec::{decode, decode_document, decode_json, encode, encode_document};
pub use document::{Document, list_as_documents};
pub use error::{
    DecodeError, DocumentError, EncodeError, ErrorKind, ErrorResponse, NumberError, ParamError,
};
pub use number::Number;
pub use operations::{Operation, TARGET_PREFIX};
pub use params::{ExpressionAttributes, IntoParams, Param};
pub use value::{TIME_FORMAT, Value, to_document};
pub use wire::WireValue;
