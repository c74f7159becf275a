/// Fixed-width bit set backed by `Vec<u64>`.
///
/// One `BitSet` per item column holds the ids of the transactions that
/// contain the item, so a candidate's support count is the popcount of
/// the AND of its columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSet {
    blocks: Vec<u64>,
    len: usize,
}

impl BitSet {
    pub fn new(num_bits: usize) -> Self {
        BitSet {
            blocks: vec![0; num_bits.div_ceil(64)],
            len: num_bits,
        }
    }

    /// Number of addressable bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn set(&mut self, bit: usize) {
        debug_assert!(bit < self.len);
        self.blocks[bit / 64] |= 1 << (bit % 64);
    }

    #[inline]
    pub fn get(&self, bit: usize) -> bool {
        bit < self.len && self.blocks[bit / 64] & (1 << (bit % 64)) != 0
    }

    #[inline]
    pub fn count_ones(&self) -> u64 {
        self.blocks.iter().map(|b| b.count_ones() as u64).sum()
    }

    /// Popcount of the intersection of `sets`, computed block by block
    /// without materialising the intersection.
    ///
    /// All sets must have the same width. An empty slice counts zero.
    pub fn intersection_count(sets: &[&BitSet]) -> u64 {
        let Some((first, rest)) = sets.split_first() else {
            return 0;
        };
        let mut count = 0u64;
        for (i, &block) in first.blocks.iter().enumerate() {
            let mut v = block;
            for other in rest {
                v &= other.blocks[i];
                if v == 0 {
                    break;
                }
            }
            count += v.count_ones() as u64;
        }
        count
    }
}
