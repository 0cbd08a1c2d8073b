//! Structured fallback encoding.
//!
//! Types without a dedicated byte layout are serialized with CBOR through
//! `serde`. The format is self-describing, so nested structures, maps and
//! optional fields round-trip without a schema. Decoding must consume the
//! whole payload.

use crate::error::{CodecError, CodecResult};
use crate::{Decode, Encode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ops::{Deref, DerefMut};

/// Serialize any `serde` value to CBOR bytes.
///
/// # Errors
///
/// Returns [`CodecError::EncodingFailed`] if the value cannot be serialized.
pub fn to_structured<T: Serialize + ?Sized>(value: &T) -> CodecResult<Vec<u8>> {
    let mut buffer = Vec::new();
    ciborium::ser::into_writer(value, &mut buffer)
        .map_err(|e| CodecError::encoding_failed(e.to_string()))?;
    Ok(buffer)
}

/// Deserialize a `serde` value from CBOR bytes.
///
/// # Errors
///
/// Returns [`CodecError::DecodingFailed`] if the bytes are not CBOR, do not
/// match the shape of `T`, or carry data after the first item.
pub fn from_structured<T: DeserializeOwned>(bytes: &[u8]) -> CodecResult<T> {
    let mut reader = bytes;
    let value = ciborium::de::from_reader(&mut reader)
        .map_err(|e| CodecError::decoding_failed(e.to_string()))?;
    if !reader.is_empty() {
        return Err(CodecError::decoding_failed(format!(
            "{} trailing bytes after structured value",
            reader.len()
        )));
    }
    Ok(value)
}

/// Wrapper that routes any `serde` type through the structured encoding.
///
/// ```
/// use secfield_codec::{Decode, Encode, Structured};
/// use std::collections::BTreeMap;
///
/// let mut tags = BTreeMap::new();
/// tags.insert("tier".to_string(), 3u32);
///
/// let bytes = Structured(tags.clone()).encode().unwrap();
/// let back = Structured::<BTreeMap<String, u32>>::decode(&bytes).unwrap();
/// assert_eq!(back.into_inner(), tags);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Structured<T>(pub T);

impl<T> Structured<T> {
    /// Unwraps the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Structured<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Deref for Structured<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Structured<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: Serialize> Encode for Structured<T> {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        to_structured(&self.0)
    }
}

impl<T: DeserializeOwned> Decode for Structured<T> {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        from_structured(bytes).map(Self)
    }
}

// bool has no fixed-width layout of its own.
impl Encode for bool {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        to_structured(self)
    }
}

impl Decode for bool {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        from_structured(bytes)
    }
}

/// Implements [`Encode`] and [`Decode`] for `serde` types using the
/// structured encoding.
///
/// ```
/// use secfield_codec::{structured_codec, Decode, Encode};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Address {
///     street: String,
///     zip: u32,
/// }
///
/// structured_codec!(Address);
///
/// let addr = Address { street: "Main".into(), zip: 12345 };
/// let bytes = addr.encode().unwrap();
/// assert_eq!(Address::decode(&bytes).unwrap(), addr);
/// ```
#[macro_export]
macro_rules! structured_codec {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Encode for $ty {
                fn encode(&self) -> $crate::CodecResult<::std::vec::Vec<u8>> {
                    $crate::to_structured(self)
                }
            }

            impl $crate::Decode for $ty {
                fn decode(bytes: &[u8]) -> $crate::CodecResult<Self> {
                    $crate::from_structured(bytes)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        age: u8,
        emails: Vec<String>,
        manager: Option<Box<Profile>>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    crate::structured_codec!(Point);

    fn sample() -> Profile {
        Profile {
            name: "Alice".into(),
            age: 30,
            emails: vec!["a@example.com".into(), "alice@example.org".into()],
            manager: Some(Box::new(Profile {
                name: "Bob".into(),
                age: 50,
                emails: vec![],
                manager: None,
            })),
        }
    }

    #[test]
    fn nested_struct_roundtrip() {
        let profile = sample();
        let bytes = Structured(profile.clone()).encode().unwrap();
        let decoded = Structured::<Profile>::decode(&bytes).unwrap();
        assert_eq!(decoded.into_inner(), profile);
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = Structured(sample()).encode().unwrap();
        let b = Structured(sample()).encode().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn map_roundtrip() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), vec![1i64, -2, 3]);
        map.insert("b".to_string(), vec![]);
        let bytes = to_structured(&map).unwrap();
        let back: BTreeMap<String, Vec<i64>> = from_structured(&bytes).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn macro_implements_codec() {
        let p = Point { x: -3, y: 9 };
        let bytes = p.encode().unwrap();
        assert_eq!(Point::decode(&bytes).unwrap(), p);
    }

    #[test]
    fn mismatched_shape_fails() {
        let bytes = Point { x: 1, y: 2 }.encode().unwrap();
        let err = Structured::<Profile>::decode(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::DecodingFailed { .. }));
    }

    #[test]
    fn garbage_fails() {
        let err = Point::decode(&[0xff, 0x00, 0x13]).unwrap_err();
        assert!(matches!(err, CodecError::DecodingFailed { .. }));
    }

    #[test]
    fn empty_payload_fails() {
        assert!(Point::decode(&[]).is_err());
    }

    #[test]
    fn trailing_bytes_fail() {
        let mut bytes = Point { x: 1, y: 2 }.encode().unwrap();
        bytes.push(0x00);
        let err = Point::decode(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::DecodingFailed { .. }));
    }

    #[test]
    fn bool_uses_structured_path() {
        assert_eq!(true.encode().unwrap(), vec![0xf5]);
        assert_eq!(false.encode().unwrap(), vec![0xf4]);
        assert!(bool::decode(&[0xf5]).unwrap());
        assert!(bool::decode(&[0x01]).is_err());
    }

    #[test]
    fn wrapper_derefs() {
        let mut s = Structured(vec![1u8, 2]);
        s.push(3);
        assert_eq!(s.len(), 3);
        let from: Structured<u8> = 5u8.into();
        assert_eq!(*from, 5);
    }
}
