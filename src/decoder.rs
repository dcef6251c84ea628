use byteorder::{ByteOrder, LittleEndian};

use crate::common::CvarInfo;
use crate::errors::DecodeError;

/// Cursor over one raw response buffer.
///
/// Every read advances the cursor by exactly the bytes it consumed.
/// Reads past the end of the buffer fail with [`DecodeError::Truncated`]
/// and leave the cursor where it was.
pub struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(buf: &'a [u8]) -> Decoder<'a> {
        Decoder { buf, pos: 0 }
    }

    /// Current read offset into the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, width: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < width {
            return Err(DecodeError::Truncated {
                offset: self.pos,
                needed: width,
                available: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + width];
        self.pos += width;
        Ok(bytes)
    }

    pub fn read_byte(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    /// One byte, any value >= 1 is true.
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_byte()? >= 1)
    }

    /// Two bytes, little endian, signed.
    pub fn read_short(&mut self) -> Result<i16, DecodeError> {
        Ok(LittleEndian::read_i16(self.take(2)?))
    }

    /// Four bytes, little endian, signed.
    pub fn read_long(&mut self) -> Result<i32, DecodeError> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    /// Bytes up to the next NUL, exclusive. The cursor ends up past the
    /// terminator.
    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        let start = self.pos;
        match self.buf[start..].iter().position(|&b| b == 0) {
            Some(len) => {
                self.pos = start + len + 1;
                Ok(String::from_utf8(self.buf[start..start + len].to_vec())?)
            }
            None => Err(DecodeError::UnterminatedString { offset: start }),
        }
    }

    /// One cvar value from the stream, paired with its table name.
    pub fn read_cvar(&mut self, name: &str) -> Result<CvarInfo, DecodeError> {
        Ok(CvarInfo {
            name: name.to_string(),
            value: self.read_bool()?,
        })
    }

    /// A count byte used to size a collection.
    ///
    /// The wire value is not trusted verbatim: every entry consumes at
    /// least one byte, so a count above `remaining()` cannot be satisfied
    /// by this reply and is rejected before anything is allocated.
    pub fn read_count(&mut self, what: &'static str) -> Result<usize, DecodeError> {
        let count = self.read_byte()? as usize;
        if count > self.remaining() {
            return Err(DecodeError::CountOutOfRange {
                what,
                count,
                limit: self.remaining(),
            });
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn string_stops_at_nul() {
        let mut dec = Decoder::new(b"abc\0");
        assert_eq!(dec.read_string().unwrap(), "abc");
        assert_eq!(dec.position(), 4);
    }

    #[test]
    fn empty_string_is_just_a_terminator() {
        let mut dec = Decoder::new(&[0, 7]);
        assert_eq!(dec.read_string().unwrap(), "");
        assert_eq!(dec.read_byte().unwrap(), 7);
        assert_eq!(dec.remaining(), 0);
    }

    #[test]
    fn shorts_and_longs_are_little_endian() {
        let mut dec = Decoder::new(&[0x01, 0x02, 0x01, 0x00, 0x00, 0x00]);
        assert_eq!(dec.read_short().unwrap(), 513);
        assert_eq!(dec.read_long().unwrap(), 1);
        assert_eq!(dec.position(), 6);
    }

    #[test]
    fn negative_values_keep_their_sign() {
        let mut dec = Decoder::new(&[0xff, 0xff, 0xfe, 0xff, 0xff, 0xff]);
        assert_eq!(dec.read_short().unwrap(), -1);
        assert_eq!(dec.read_long().unwrap(), -2);
    }

    #[test]
    fn bool_is_true_for_any_nonzero_byte() {
        let mut dec = Decoder::new(&[0, 1, 2, 255]);
        assert!(!dec.read_bool().unwrap());
        assert!(dec.read_bool().unwrap());
        assert!(dec.read_bool().unwrap());
        assert!(dec.read_bool().unwrap());
    }

    #[test]
    fn reads_past_the_end_are_truncation_errors() {
        let mut dec = Decoder::new(&[0x01]);
        match dec.read_long() {
            Err(DecodeError::Truncated {
                offset: 0,
                needed: 4,
                available: 1,
            }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        // A failed read must not move the cursor.
        assert_eq!(dec.position(), 0);
        assert_eq!(dec.read_byte().unwrap(), 1);
    }

    #[test]
    fn missing_terminator_is_reported() {
        let mut dec = Decoder::new(b"abc");
        match dec.read_string() {
            Err(DecodeError::UnterminatedString { offset: 0 }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn cvar_takes_its_value_from_the_stream() {
        let mut dec = Decoder::new(&[1]);
        let cvar = dec.read_cvar("sv_allowjump").unwrap();
        assert_eq!(cvar.name, "sv_allowjump");
        assert!(cvar.value);
    }

    #[test]
    fn counts_larger_than_the_buffer_are_rejected() {
        let mut dec = Decoder::new(&[9, 0, 0]);
        match dec.read_count("wads") {
            Err(DecodeError::CountOutOfRange {
                what: "wads",
                count: 9,
                limit: 2,
            }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn counts_within_the_buffer_pass() {
        let mut dec = Decoder::new(&[2, 0, 0]);
        assert_eq!(dec.read_count("wads").unwrap(), 2);
    }
}
