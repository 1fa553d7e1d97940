/// An ordered sequence of bits, indexable at bit granularity.
///
/// The backing storage is byte-packed: bit `i` lives in byte `i / 8` at bit
/// position `i % 8`, least significant bit first. This matches the layout the
/// decode layer produces, so a sequence whose length is a multiple of 8
/// converts to bytes without any shifting.
///
/// Unused bits past `len` in the last byte are always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSequence {
    bytes: Vec<u8>,
    len: usize,
}

impl BitSequence {
    /// A sequence of `len` zero bits.
    pub fn zeroed(len: usize) -> Self {
        Self {
            bytes: vec![0u8; len.div_ceil(8)],
            len,
        }
    }

    /// Interpret a byte buffer as one flat bit stream of length `8 * bytes.len()`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            len: bytes.len() * 8,
        }
    }

    /// Length in bits.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the bit at `index`.
    ///
    /// # Panics
    ///
    /// If `index >= self.len()`
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index {index} out of range {}", self.len);

        (self.bytes[index / 8] >> (index % 8)) & 1 != 0
    }

    /// Write the bit at `index`.
    ///
    /// # Panics
    ///
    /// If `index >= self.len()`
    pub fn set(&mut self, index: usize, value: bool) {
        assert!(index < self.len, "bit index {index} out of range {}", self.len);

        let mask = 1u8 << (index % 8);

        if value {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }

    /// Copy of the contiguous bit range `[skip, skip + take)` as a new sequence.
    ///
    /// # Panics
    ///
    /// If `skip + take` exceeds `self.len()`
    pub fn slice(&self, skip: usize, take: usize) -> Self {
        assert!(
            skip.checked_add(take).is_some_and(|end| end <= self.len),
            "bit range {skip}..+{take} out of range {}",
            self.len
        );

        let mut out = Self::zeroed(take);

        for i in 0..take {
            if self.get(skip + i) {
                out.set(i, true);
            }
        }

        out
    }

    /// The backing bytes. Only meaningful as whole bytes when `len` is a
    /// multiple of 8; the packer checks that before calling this.
    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
