//! Prefix doubling suffix sorting for read-only byte strings, as described
//! in [Manber, U. and Myers, G. 1993. Suffix Arrays: A New Method for
//! On-Line String Searches](https://doi.org/10.1137/0222058).
//!
//! Suffixes are first distributed into buckets by their leading byte, then
//! repeatedly refined: the ordering by the first h bytes yields the ordering
//! by the first 2h bytes, for h = 1, 2, 4, ... until every bucket holds a
//! single suffix.

mod bitmap;
mod buckets;

#[cfg(test)]
mod tests;

use self::bitmap::BitMap;
use self::buckets::Buckets;

/// Sort the suffixes of `s`, leaving the suffix positions in rank order in
/// `sa` and the rank of every position in `rank`.
pub(super) fn doubling(s: &[u8], sa: &mut [u32], rank: &mut [u32]) {
    debug_assert_eq!(s.len(), sa.len());
    debug_assert_eq!(s.len(), rank.len());

    let n = s.len();
    if n == 0 {
        return;
    }

    // bh[r] marks rank r as the first of a bucket of suffixes sharing their
    // first h bytes; b2h collects the finer starts found within a stage.
    let mut bh = BitMap::new(n);
    let mut b2h = BitMap::new(n);
    first_stage(s, sa, rank, &mut bh);

    let mut count = vec![0u32; n];
    let mut next = vec![0u32; n];

    let mut h = 1;
    while h < n {
        if link_buckets(&bh, &mut next[..]) == n {
            break;
        }

        refine(&sa[..], rank, &bh, &mut b2h, &mut count[..], &next[..], h);

        // rank now holds the 2h-order; rebuild sa from it and commit the
        // bucket starts found this stage.
        for i in 0..n {
            sa[rank[i] as usize] = i as u32;
        }
        bh.merge_clear(&mut b2h);
        h *= 2;
    }

    // every bucket is a singleton once the loop exits
    debug_assert_eq!(link_buckets(&bh, &mut next[..]), n);
}

/// Place every suffix into the bucket of its leading byte, in text order.
///
/// Text order keeps the placement stable; ties inside a bucket are broken by
/// the refinement stages.
fn first_stage(s: &[u8], sa: &mut [u32], rank: &mut [u32], bh: &mut BitMap) {
    // about 2k memory, recomputed on every construction
    let mut bkt = Buckets::compute(s);

    for start in bkt.starts() {
        bh.set(start);
    }
    for i in 0..s.len() {
        bkt.place(s, sa, rank, i);
    }
}

/// Chain every bucket start to the next one over `next`, returning the
/// number of buckets.
///
/// Sorting is finished exactly when every bucket is a singleton, i.e. the
/// bucket count reaches the text length.
fn link_buckets(bh: &BitMap, next: &mut [u32]) -> usize {
    let n = next.len();
    let mut buckets = 0;
    let mut start = 0;
    for r in 1..=n {
        if r == n || bh.get(r) {
            next[start] = r as u32;
            buckets += 1;
            start = r;
        }
    }
    buckets
}

/// One doubling stage: refine the h-order in `sa` into the 2h-order in
/// `rank`, marking the newly found bucket starts in `b2h`.
///
/// A suffix starting at i orders within its bucket by the h-order of its
/// tail at i + h, which is already known. Scanning suffixes j in h-order and
/// pulling j - h one slot deeper into its own bucket therefore distributes
/// every bucket's members in 2h-order.
fn refine(
    sa: &[u32],
    rank: &mut [u32],
    bh: &BitMap,
    b2h: &mut BitMap,
    count: &mut [u32],
    next: &[u32],
    h: usize,
) {
    let n = sa.len();

    // rank temporarily maps each position to the left boundary of its
    // bucket, count[l] to the number of suffixes already re-placed there.
    let mut l = 0;
    while l < n {
        let r = next[l] as usize;
        count[l] = 0;
        for k in l..r {
            rank[sa[k] as usize] = l as u32;
        }
        l = r;
    }

    // The suffix with no tail beyond the text orders first in its bucket.
    place(rank, b2h, count, n - h);

    let mut l = 0;
    while l < n {
        let r = next[l] as usize;

        for k in l..r {
            let j = sa[k] as usize;
            if j >= h {
                place(rank, b2h, count, j - h);
            }
        }

        // Suffixes pulled in from this bucket share their first 2h bytes
        // whenever they landed in one bucket; keep only the first start of
        // each such run.
        for k in l..r {
            let j = sa[k] as usize;
            if j < h {
                continue;
            }
            let p = rank[j - h] as usize;
            if !b2h.get(p) {
                continue;
            }
            let mut f = p + 1;
            while f < n && !bh.get(f) && b2h.get(f) {
                b2h.clear(f);
                f += 1;
            }
        }

        l = r;
    }
}

/// Deposit suffix `i` at the next free slot inside its own bucket and mark
/// that slot as a refined bucket start.
#[inline]
fn place(rank: &mut [u32], b2h: &mut BitMap, count: &mut [u32], i: usize) {
    let l = rank[i] as usize;
    rank[i] += count[l];
    count[l] += 1;
    b2h.set(rank[i] as usize);
}
