//! Packed bit storage.
//!
//! Fixed length, one bit per logical cell, 64 cells per `u64` word.
//! The allocation is owned by the store and released on drop.

const WORD_BITS: usize = 64;

/// Fixed-length packed sequence of bits.
///
/// Indices must satisfy `index < len()`. An out-of-range index is a bug in
/// the caller and panics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitStore {
    words: Vec<u64>,
    len: usize,
}

impl BitStore {
    /// Create a store of `len` bits, all clear.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0u64; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    /// Create a store of `len` bits where bit `i` is `f(i)`.
    pub fn from_fn(len: usize, mut f: impl FnMut(usize) -> bool) -> Self {
        let mut store = Self::new(len);
        for index in 0..len {
            if f(index) {
                store.words[index / WORD_BITS] |= 1u64 << (index % WORD_BITS);
            }
        }
        store
    }

    /// Create a store from a slice of booleans.
    pub fn from_bools(bits: &[bool]) -> Self {
        Self::from_fn(bits.len(), |i| bits[i])
    }

    /// Logical length in bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read bit `index`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.check(index);
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 == 1
    }

    /// Write bit `index`.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        self.check(index);
        let mask = 1u64 << (index % WORD_BITS);
        let word = &mut self.words[index / WORD_BITS];
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterate over the indices of set bits in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(word_index, &word)| {
                let mut remaining = word;
                std::iter::from_fn(move || {
                    if remaining == 0 {
                        return None;
                    }
                    let bit = remaining.trailing_zeros() as usize;
                    remaining &= remaining - 1;
                    Some(word_index * WORD_BITS + bit)
                })
            })
    }

    /// Bytes held by the backing buffer.
    pub fn heap_bytes(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>()
    }

    #[inline]
    fn check(&self, index: usize) {
        assert!(
            index < self.len,
            "bit index {index} out of range for BitStore of length {}",
            self.len
        );
    }
}
