/// Contiguous byte storage backing an attribute's value array.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DataBuffer {
    data: Vec<u8>,
}

impl DataBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn resize(&mut self, new_size: usize) {
        self.data.resize(new_size, 0);
    }

    /// Copies `out_data.len()` bytes starting at `byte_pos`.
    ///
    /// Returns false when the range runs past the end of the buffer.
    pub fn read(&self, byte_pos: usize, out_data: &mut [u8]) -> bool {
        match self.data.get(byte_pos..byte_pos + out_data.len()) {
            Some(src) => {
                out_data.copy_from_slice(src);
                true
            }
            None => false,
        }
    }

    /// Writes `in_data` at `byte_pos`, growing the buffer when needed.
    pub fn write(&mut self, byte_pos: usize, in_data: &[u8]) {
        let end = byte_pos + in_data.len();
        if end > self.data.len() {
            self.data.resize(end, 0);
        }
        self.data[byte_pos..end].copy_from_slice(in_data);
    }

    pub fn slice(&self, byte_pos: usize, len: usize) -> Option<&[u8]> {
        self.data.get(byte_pos..byte_pos + len)
    }

    pub fn data_size(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
