//! Codec implementations for length-prefixed byte types.
//!
//! The length is written as a `varuint32`. For portability, lengths must fit within a [u32].

use crate::{util::at_least, varint, EncodeSize, Error, RangeCfg, Read, Write};
use bytes::{Buf, BufMut, Bytes};

fn read_len(buf: &mut impl Buf, range: &RangeCfg) -> Result<usize, Error> {
    let len32 = varint::read::<u32>(buf)?;
    let len = usize::try_from(len32).map_err(|_| Error::InvalidVarint)?;
    if !range.contains(&len) {
        return Err(Error::InvalidLength(len));
    }
    at_least(buf, len)?;
    Ok(len)
}

fn prefix_size(len: usize) -> usize {
    let len = u32::try_from(len).expect("length exceeds u32");
    varint::size(len)
}

impl Write for Bytes {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        let len = u32::try_from(self.len()).expect("Bytes length exceeds u32");
        varint::write(len, buf);
        buf.put_slice(self);
    }
}

impl EncodeSize for Bytes {
    #[inline]
    fn encode_size(&self) -> usize {
        prefix_size(self.len()) + self.len()
    }
}

impl Read for Bytes {
    type Cfg = RangeCfg;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, range: &RangeCfg) -> Result<Self, Error> {
        let len = read_len(buf, range)?;
        Ok(buf.copy_to_bytes(len))
    }
}

impl Write for String {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        let len = u32::try_from(self.len()).expect("String length exceeds u32");
        varint::write(len, buf);
        buf.put_slice(self.as_bytes());
    }
}

impl EncodeSize for String {
    #[inline]
    fn encode_size(&self) -> usize {
        prefix_size(self.len()) + self.len()
    }
}

impl Read for String {
    type Cfg = RangeCfg;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, range: &RangeCfg) -> Result<Self, Error> {
        let len = read_len(buf, range)?;
        let bytes = buf.copy_to_bytes(len);
        String::from_utf8(bytes.to_vec()).map_err(|_| Error::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Decode, Encode};

    #[test]
    fn test_bytes() {
        let values = [
            Bytes::new(),
            Bytes::from_static(&[1, 2, 3]),
            Bytes::from(vec![0; 300]),
        ];
        for value in values {
            let encoded = value.encode();
            assert_eq!(
                encoded.len(),
                varint::size(value.len() as u64) + value.len()
            );
            let len = value.len();

            // Valid decoding
            let decoded = Bytes::decode_cfg(encoded, &RangeCfg::from(len..=len)).unwrap();
            assert_eq!(value, decoded);

            // Failure for too long
            assert!(matches!(
                Bytes::decode_cfg(value.encode(), &RangeCfg::from(..len)),
                Err(Error::InvalidLength(_))
            ));

            // Failure for too short
            assert!(matches!(
                Bytes::decode_cfg(value.encode(), &RangeCfg::from(len + 1..)),
                Err(Error::InvalidLength(_))
            ));
        }
    }

    #[test]
    fn test_string() {
        let value = String::from("hello");
        let encoded = value.encode();
        assert_eq!(&encoded[..], b"\x05hello");
        let decoded = String::decode_cfg(encoded, &RangeCfg::default()).unwrap();
        assert_eq!(decoded, value);

        let invalid = Bytes::from_static(&[0x02, 0xC3, 0x28]);
        assert!(matches!(
            String::decode_cfg(invalid, &RangeCfg::default()),
            Err(Error::InvalidUtf8)
        ));
    }

    #[test]
    fn test_truncated() {
        let truncated = Bytes::from_static(&[0x05, b'h', b'i']);
        assert!(matches!(
            Bytes::decode_cfg(truncated, &RangeCfg::default()),
            Err(Error::EndOfBuffer)
        ));
    }
}
