use crate::construct::construct;
#[cfg(feature = "pack")]
use crate::packed_sa::PackedIndex;
use crate::utils::{trunc, window};
#[cfg(feature = "pack")]
use std::io::Read;
use std::io::{Result, Write};
use std::ops::Range;

/// Suffix array for searching byte strings.
///
/// Holds the ranked suffix positions together with the inverse permutation
/// (the rank of every position), both of the length of the byte string.
#[derive(Clone)]
pub struct SuffixArray<'s> {
    s: &'s [u8],
    sa: Vec<u32>,
    rank: Vec<u32>,
}

impl<'s> SuffixArray<'s> {
    // Construct new suffix array for a byte string.
    pub fn new(s: &'s [u8]) -> Self {
        let mut sa = vec![0; s.len()];
        let mut rank = vec![0; s.len()];
        construct(s, &mut sa[..], &mut rank[..]);
        SuffixArray { s, sa, rank }
    }

    // Construct suffix array in place.
    pub fn set(&mut self, s: &'s [u8]) {
        self.s = s;
        self.sa.resize(s.len(), 0);
        self.rank.resize(s.len(), 0);
        construct(s, &mut self.sa[..], &mut self.rank[..]);
    }

    // Release the unused memory of the arrays.
    pub fn fit(&mut self) {
        self.sa.shrink_to_fit();
        self.rank.shrink_to_fit();
    }

    /// Length of the underlying byte string.
    pub fn len(&self) -> usize {
        self.s.len()
    }

    /// Test if the underlying byte string is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take out the byte string, the suffix array and its inverse.
    pub fn into_parts(self) -> (&'s [u8], Vec<u32>, Vec<u32>) {
        (self.s, self.sa, self.rank)
    }

    /// Compose an existing suffix array, its inverse and the corresponding
    /// byte string together, and check the integrity.
    pub fn from_parts(s: &'s [u8], sa: Vec<u32>, rank: Vec<u32>) -> Option<Self> {
        let compose = SuffixArray { s, sa, rank };
        if compose.check_integrity() {
            Some(compose)
        } else {
            None
        }
    }

    /// Compose an existing suffix array, its inverse and the corresponding
    /// byte string together without integrity check.
    pub unsafe fn unchecked_from_parts(s: &'s [u8], sa: Vec<u32>, rank: Vec<u32>) -> Self {
        SuffixArray { s, sa, rank }
    }

    fn check_integrity(&self) -> bool {
        if self.sa.len() != self.s.len() || self.rank.len() != self.s.len() {
            return false;
        }
        for r in 1..self.sa.len() {
            let x = &self.s[self.sa[r - 1] as usize..];
            let y = &self.s[self.sa[r] as usize..];
            if x >= y {
                return false;
            }
        }
        self.sa
            .iter()
            .enumerate()
            .all(|(r, &i)| self.rank[i as usize] as usize == r)
    }

    /// Starting position of the suffix holding rank `r`, or `None` when `r`
    /// is out of range.
    pub fn suffix_at_rank(&self, r: usize) -> Option<usize> {
        self.sa.get(r).map(|&i| i as usize)
    }

    /// Rank of the suffix starting at position `i`, or `None` when `i` is
    /// out of range.
    pub fn rank_of_suffix(&self, i: usize) -> Option<usize> {
        self.rank.get(i).map(|&r| r as usize)
    }

    /// Smallest rank whose suffix is lexicographically greater than or equal
    /// to the pattern, or the text length when no such rank exists.
    pub fn lower_bound(&self, pat: &[u8]) -> usize {
        let mut i = 0;
        let mut k = self.sa.len();
        while i < k {
            let m = i + (k - i) / 2;
            if pat > &self.s[self.sa[m] as usize..] {
                i = m + 1;
            } else {
                k = m;
            }
        }
        i
    }

    /// Test if contains given pattern.
    pub fn contains(&self, pat: &[u8]) -> bool {
        self.sa
            .binary_search_by_key(&pat, |&i| trunc(&self.s[i as usize..], pat.len()))
            .is_ok()
    }

    /// Search for one occurrence of the given pattern.
    ///
    /// Returns the text position of an arbitrary occurrence within the
    /// matched range of ranks.
    pub fn search_one(&self, pat: &[u8]) -> Option<usize> {
        self.sa
            .binary_search_by_key(&pat, |&i| trunc(&self.s[i as usize..], pat.len()))
            .ok()
            .map(|r| self.sa[r] as usize)
    }

    /// Search for all the unsorted overlapping occurrences of given pattern.
    pub fn search_all(&self, pat: &[u8]) -> &[u32] {
        let i = self.lower_bound(pat);
        let mut j = i;
        let mut k = self.sa.len();
        while j < k {
            let m = j + (k - j) / 2;
            if self.s[self.sa[m] as usize..].starts_with(pat) {
                j = m + 1;
            } else {
                k = m;
            }
        }
        &self.sa[i..j]
    }

    /// Keyword in context: the text windows of `width` bytes around every
    /// occurrence of the pattern, in the lexicographic order of the matched
    /// suffixes.
    pub fn search_context(&self, pat: &[u8], width: usize) -> Vec<Range<usize>> {
        let mut windows = Vec::new();
        let mut r = self.lower_bound(pat);
        while r < self.sa.len() {
            let i = self.sa[r] as usize;
            if !self.s[i..].starts_with(pat) {
                break;
            }
            windows.push(window(self.s.len(), i, pat.len(), width));
            r += 1;
        }
        windows
    }

    /// Write the suffix array and its inverse as human readable text, one
    /// rank per line.
    pub fn dump_debug<W: Write>(&self, mut file: W) -> Result<()> {
        writeln!(file, "rank\tsuffix\trank_of_pos")?;
        for (r, &i) in self.sa.iter().enumerate() {
            writeln!(file, "{}\t{}\t{}", r, i, self.rank[r])?;
        }
        Ok(())
    }

    /// Write the bit-packed suffix array (without the byte string).
    #[cfg(feature = "pack")]
    pub fn dump<W: Write>(&self, file: W) -> Result<()> {
        PackedIndex::from_sa(&self.sa[..]).dump(file)
    }

    /// Dump the bit-packed suffix array as bytes (without the byte string).
    #[cfg(feature = "pack")]
    pub fn dump_bytes(&self) -> Result<Vec<u8>> {
        PackedIndex::from_sa(&self.sa[..]).dump_bytes()
    }

    /// Read a bit-packed suffix array and recompute its inverse.
    #[cfg(feature = "pack")]
    pub fn load<R: Read>(s: &'s [u8], file: R) -> Result<Self> {
        let sa = PackedIndex::load(file)?.into_sa();
        Self::compose_loaded(s, sa)
    }

    /// Load a bit-packed suffix array from bytes and recompute its inverse.
    #[cfg(feature = "pack")]
    pub fn load_bytes(s: &'s [u8], bytes: &[u8]) -> Result<Self> {
        let sa = PackedIndex::load_bytes(bytes)?.into_sa();
        Self::compose_loaded(s, sa)
    }

    #[cfg(feature = "pack")]
    fn compose_loaded(s: &'s [u8], sa: Vec<u32>) -> Result<Self> {
        use std::io::{Error, ErrorKind};

        invert(&sa[..])
            .and_then(|rank| SuffixArray::from_parts(s, sa, rank))
            .ok_or_else(|| Error::new(ErrorKind::InvalidData, "inconsistent suffix array"))
    }
}

impl<'s> AsRef<[u8]> for SuffixArray<'s> {
    fn as_ref(&self) -> &[u8] {
        self.s
    }
}

/// Invert a rank-to-position permutation, or `None` if any position is out
/// of bounds.
#[cfg(feature = "pack")]
fn invert(sa: &[u32]) -> Option<Vec<u32>> {
    let mut rank = vec![0u32; sa.len()];
    for (r, &i) in sa.iter().enumerate() {
        *rank.get_mut(i as usize)? = r as u32;
    }
    Some(rank)
}
