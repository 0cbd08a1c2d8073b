//! Fixed-width numeric encoding.
//!
//! Every numeric type is written big-endian at its natural width. Platform
//! sized integers are normalized to 64 bits so the encoding does not depend
//! on the target architecture.

use crate::error::{CodecError, CodecResult};
use crate::{Decode, Encode};

/// A type whose canonical encoding always has the same length.
pub trait FixedWidth {
    /// Number of bytes in the canonical encoding.
    const WIDTH: usize;
}

macro_rules! impl_fixed_width {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FixedWidth for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();
            }

            impl Encode for $ty {
                fn encode(&self) -> CodecResult<Vec<u8>> {
                    Ok(self.to_be_bytes().to_vec())
                }
            }

            impl Decode for $ty {
                fn decode(bytes: &[u8]) -> CodecResult<Self> {
                    let array: [u8; std::mem::size_of::<$ty>()] =
                        bytes.try_into().map_err(|_| {
                            CodecError::width_mismatch(
                                stringify!($ty),
                                <$ty as FixedWidth>::WIDTH,
                                bytes.len(),
                            )
                        })?;
                    Ok(<$ty>::from_be_bytes(array))
                }
            }
        )*
    };
}

impl_fixed_width!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl FixedWidth for isize {
    const WIDTH: usize = <i64 as FixedWidth>::WIDTH;
}

impl Encode for isize {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        let wide = i64::try_from(*self)
            .map_err(|_| CodecError::encoding_failed("isize does not fit in i64"))?;
        wide.encode()
    }
}

impl Decode for isize {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        let wide = decode_normalized::<i64>("isize", bytes)?;
        isize::try_from(wide).map_err(|_| {
            CodecError::decoding_failed(format!("{wide} does not fit in isize on this platform"))
        })
    }
}

impl FixedWidth for usize {
    const WIDTH: usize = <u64 as FixedWidth>::WIDTH;
}

impl Encode for usize {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        let wide = u64::try_from(*self)
            .map_err(|_| CodecError::encoding_failed("usize does not fit in u64"))?;
        wide.encode()
    }
}

impl Decode for usize {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        let wide = decode_normalized::<u64>("usize", bytes)?;
        usize::try_from(wide).map_err(|_| {
            CodecError::decoding_failed(format!("{wide} does not fit in usize on this platform"))
        })
    }
}

/// Decodes the 64-bit form of a platform-sized integer, reporting width
/// errors against the platform type name.
fn decode_normalized<W>(type_name: &'static str, bytes: &[u8]) -> CodecResult<W>
where
    W: Decode + FixedWidth,
{
    if bytes.len() != W::WIDTH {
        return Err(CodecError::width_mismatch(type_name, W::WIDTH, bytes.len()));
    }
    W::decode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int64_is_big_endian() {
        assert_eq!(42i64.encode().unwrap(), vec![0, 0, 0, 0, 0, 0, 0, 0x2a]);
        assert_eq!(i64::decode(&[0, 0, 0, 0, 0, 0, 0, 0x2a]).unwrap(), 42);
    }

    #[test]
    fn natural_widths() {
        assert_eq!((-1i8).encode().unwrap(), vec![0xff]);
        assert_eq!(0x0102i16.encode().unwrap(), vec![0x01, 0x02]);
        assert_eq!(0x0102_0304u32.encode().unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(u64::MAX.encode().unwrap(), vec![0xff; 8]);
        assert_eq!(1.0f32.encode().unwrap(), vec![0x3f, 0x80, 0, 0]);
        assert_eq!(
            1.0f64.encode().unwrap(),
            vec![0x3f, 0xf0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn negative_integers_use_twos_complement() {
        assert_eq!((-2i32).encode().unwrap(), vec![0xff, 0xff, 0xff, 0xfe]);
        assert_eq!(i32::decode(&[0xff, 0xff, 0xff, 0xfe]).unwrap(), -2);
    }

    #[test]
    fn short_payload_is_width_mismatch() {
        let err = i32::decode(&[1, 2, 3]).unwrap_err();
        assert_eq!(err, CodecError::width_mismatch("i32", 4, 3));

        let err = u32::decode(&[1, 2, 3]).unwrap_err();
        assert_eq!(err, CodecError::width_mismatch("u32", 4, 3));
    }

    #[test]
    fn long_payload_is_width_mismatch() {
        let err = u16::decode(&[1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::WidthMismatch {
                expected: 2,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn empty_payload_into_number_fails() {
        assert!(u8::decode(&[]).is_err());
        assert!(f64::decode(&[]).is_err());
    }

    #[test]
    fn platform_integers_are_normalized() {
        assert_eq!(42isize.encode().unwrap(), 42i64.encode().unwrap());
        assert_eq!(7usize.encode().unwrap(), 7u64.encode().unwrap());
        assert_eq!(<isize as FixedWidth>::WIDTH, 8);
        assert_eq!(<usize as FixedWidth>::WIDTH, 8);

        let bytes = (-5i64).encode().unwrap();
        assert_eq!(isize::decode(&bytes).unwrap(), -5);
    }

    #[test]
    fn platform_integer_width_error_names_platform_type() {
        let err = usize::decode(&[0, 1, 2, 3]).unwrap_err();
        assert_eq!(err, CodecError::width_mismatch("usize", 8, 4));
    }

    #[test]
    fn float_bits_are_preserved() {
        let bytes = f64::NAN.encode().unwrap();
        assert!(f64::decode(&bytes).unwrap().is_nan());

        let bytes = (-0.0f32).encode().unwrap();
        let back = f32::decode(&bytes).unwrap();
        assert_eq!(back.to_bits(), (-0.0f32).to_bits());
    }
}
