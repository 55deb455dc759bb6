use super::error::ProtocolError;
use super::layout;

pub struct ArtNetReader<'a> {
    payload: &'a [u8],
}

impl<'a> ArtNetReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), ProtocolError> {
        if self.payload.len() < needed {
            return Err(ProtocolError::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u16_le(&self, range: std::ops::Range<usize>) -> Result<u16, ProtocolError> {
        let bytes = self.read_slice(range)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u16_be(&self, range: std::ops::Range<usize>) -> Result<u16, ProtocolError> {
        let bytes = self.read_slice(range)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, ProtocolError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(ProtocolError::TooShort {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    /// A zero byte in a sequence slot means the sender does not count frames.
    pub fn read_optional_nonzero_u8(&self, offset: usize) -> Result<Option<u8>, ProtocolError> {
        let value = self.read_u8(offset)?;
        Ok(if value == 0 { None } else { Some(value) })
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], ProtocolError> {
        self.payload
            .get(range.clone())
            .ok_or(ProtocolError::TooShort {
                needed: range.end,
                actual: self.payload.len(),
            })
    }

    pub fn read_signature(&self) -> Result<&'a [u8], ProtocolError> {
        self.read_slice(0..layout::ARTNET_ID.len())
    }
}
