//! Storage driver boundary.
//!
//! A storage driver hands values to and from the holder as [`DriverValue`]s.
//! Sealed envelopes always leave as [`DriverValue::Blob`] and are stored
//! as-is in a binary column; no text encoding is applied. On the way in a
//! blob is used directly and a text value is taken as its raw UTF-8 bytes.

use crate::error::{CoreError, CoreResult};
use crate::field::SecureField;
use secfield_codec::{Decode, Encode};

/// A value exchanged with a storage driver.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverValue {
    /// SQL NULL.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit integer.
    Integer(i64),
    /// 64-bit float.
    Real(f64),
    /// Text column.
    Text(String),
    /// Binary column.
    Blob(Vec<u8>),
}

impl DriverValue {
    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
        }
    }

    /// Returns the raw bytes of a blob or text value.
    ///
    /// Text is returned as its UTF-8 bytes without any decoding. Other
    /// variants return `None`.
    #[must_use]
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Self::Blob(bytes) => Some(bytes),
            Self::Text(text) => Some(text.into_bytes()),
            _ => None,
        }
    }

}

impl From<Vec<u8>> for DriverValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Blob(bytes)
    }
}

impl From<&[u8]> for DriverValue {
    fn from(bytes: &[u8]) -> Self {
        Self::Blob(bytes.to_vec())
    }
}

impl From<String> for DriverValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for DriverValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<i64> for DriverValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for DriverValue {
    fn from(n: f64) -> Self {
        Self::Real(n)
    }
}

impl From<bool> for DriverValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Converts a value into what the driver writes to storage.
pub trait ToDriverValue {
    /// Produces the storage representation.
    fn to_driver_value(&self) -> CoreResult<DriverValue>;
}

/// Loads a value from what the driver read from storage.
///
/// Implementations report their own setup errors before looking at `src`.
pub trait Scan {
    /// Replaces the receiver's contents with `src`.
    fn scan(&mut self, src: DriverValue) -> CoreResult<()>;
}

impl<T: Encode> ToDriverValue for SecureField<T> {
    fn to_driver_value(&self) -> CoreResult<DriverValue> {
        self.seal().map(DriverValue::Blob)
    }
}

impl<T: Decode> Scan for SecureField<T> {
    /// Opens a blob or text envelope.
    ///
    /// Any other source is rejected with
    /// [`CoreError::UnsupportedSourceType`] and leaves the holder untouched.
    ///
    /// The cached cipher setup error takes precedence over the source type:
    /// a holder with a bad secret returns that error for every source,
    /// including [`DriverValue::Null`].
    fn scan(&mut self, src: DriverValue) -> CoreResult<()> {
        self.check()?;
        let type_name = src.type_name();
        let envelope = src
            .into_bytes()
            .ok_or_else(|| CoreError::unsupported_source_type(type_name))?;
        self.open(&envelope)
    }
}
