/// Growable byte writer used to build envelopes.
///
/// Writes never fail; the encoders that sit on top of it only reject values
/// whose length cannot be expressed in a tag header.
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn position(&self) -> usize {
        self.buf.len()
    }

    pub fn as_written(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_all(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    pub fn write_be_u16(&mut self, value: u16) {
        self.write_all(&value.to_be_bytes());
    }

    pub fn write_be_u32(&mut self, value: u32) {
        self.write_all(&value.to_be_bytes());
    }
}
