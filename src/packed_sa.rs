use bitpacking::{BitPacker, BitPacker4x as Packer};
use serde::{Deserialize, Serialize};
use std::io::prelude::*;
use std::io::{Error, ErrorKind, Result};

// Little endian of b"SDP1", i.e. bit-packed suffix array frames.
const MAGIC_SDP1: u32 = 827343955;

/// Bit-packed form of a suffix array.
///
/// Positions are packed in frames of `Packer::BLOCK_LEN` integers, every
/// position taking just enough bits for the largest one. The inverse
/// permutation is not stored; it is recomputed from the positions on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackedIndex {
    magic: u32,
    length: u32,
    frames: Vec<u8>,
}

impl PackedIndex {
    pub fn from_sa(sa: &[u32]) -> Self {
        assert!(sa.len() as u64 <= std::u32::MAX as u64);

        let length = sa.len() as u32;
        let bits = frame_bits(length);
        let frame_size = bits as usize * Packer::BLOCK_LEN / 8;

        let packer = Packer::new();
        let mut frames = Vec::with_capacity(packed_size(length));
        let mut buf = vec![0u8; frame_size];
        let mut chunks = sa.chunks_exact(Packer::BLOCK_LEN);
        for chunk in &mut chunks {
            packer.compress(chunk, &mut buf[..], bits);
            frames.extend_from_slice(&buf[..]);
        }
        let rest = chunks.remainder();
        if !rest.is_empty() {
            let mut last = vec![0u32; Packer::BLOCK_LEN];
            last[..rest.len()].copy_from_slice(rest);
            packer.compress(&last[..], &mut buf[..], bits);
            frames.extend_from_slice(&buf[..]);
        }

        PackedIndex {
            magic: MAGIC_SDP1,
            length,
            frames,
        }
    }

    pub fn into_sa(self) -> Vec<u32> {
        debug_assert_eq!(self.frames.len(), packed_size(self.length));

        let bits = frame_bits(self.length);
        let frame_size = bits as usize * Packer::BLOCK_LEN / 8;

        let packer = Packer::new();
        let mut sa = Vec::with_capacity(self.length as usize);
        let mut buf = vec![0u32; Packer::BLOCK_LEN];
        for frame in self.frames.chunks_exact(frame_size) {
            packer.decompress(frame, &mut buf[..], bits);
            let take = Ord::min(Packer::BLOCK_LEN, self.length as usize - sa.len());
            sa.extend_from_slice(&buf[..take]);
        }
        sa
    }

    pub fn dump<W: Write>(&self, file: W) -> Result<()> {
        bincode::serialize_into(file, self).map_err(error_conv)
    }

    pub fn dump_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(error_conv)
    }

    pub fn load<R: Read>(file: R) -> Result<Self> {
        let packed: PackedIndex = bincode::deserialize_from(file).map_err(error_conv)?;
        packed.validate()
    }

    pub fn load_bytes(bytes: &[u8]) -> Result<Self> {
        let packed: PackedIndex = bincode::deserialize(bytes).map_err(error_conv)?;
        packed.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.magic != MAGIC_SDP1 {
            return Err(Error::new(ErrorKind::InvalidData, "bad packed array magic"));
        }
        if self.frames.len() != packed_size(self.length) {
            return Err(Error::new(
                ErrorKind::InvalidData,
                "truncated packed array frames",
            ));
        }
        Ok(self)
    }
}

/// Bits required for the largest position, at least one for the packer.
fn frame_bits(length: u32) -> u8 {
    Ord::max(1, 32 - length.saturating_sub(1).leading_zeros()) as u8
}

/// Total packed size of the frames holding `length` positions.
fn packed_size(length: u32) -> usize {
    let frames = ceiling_div(length as usize, Packer::BLOCK_LEN);
    frames * frame_bits(length) as usize * Packer::BLOCK_LEN / 8
}

fn ceiling_div(x: usize, y: usize) -> usize {
    x / y + usize::from(x % y != 0)
}

fn error_conv(err: bincode::Error) -> Error {
    use bincode::ErrorKind as BincodeErrorKind;

    match *err {
        BincodeErrorKind::Io(e) => e,
        BincodeErrorKind::SizeLimit => Error::new(ErrorKind::Other, BincodeErrorKind::SizeLimit),
        BincodeErrorKind::Custom(e) => Error::new(ErrorKind::Other, e),
        e => Error::new(ErrorKind::InvalidData, e),
    }
}
