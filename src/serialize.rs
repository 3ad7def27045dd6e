//! Binary dump/restore for an `Lps`.
//!
//! No magic number and no version tag — the original tool's `.lcpt` format
//! is just a level, a core count, and the core records themselves, all
//! little-endian fixed width. Restoring a stream produced by something
//! other than `dump` is undefined; `restore` only guards against a
//! truncated or short-read stream.

use std::io::{Read,Write};
use crate::core::Core;
use crate::error::Error;
use crate::lps::Lps;

/// Write `lps` as `i32 level, i32 count` followed by one record per core:
/// `u32 bit_size, u64 bit_rep, u32 label, u64 start, u64 end`.
pub fn dump<W: Write>(lps: &Lps, w: &mut W) -> Result<(),Error> {
    w.write_all(&(lps.level as i32).to_le_bytes())?;
    w.write_all(&(lps.cores.len() as i32).to_le_bytes())?;
    for core in &lps.cores {
        w.write_all(&core.bit_size.to_le_bytes())?;
        w.write_all(&core.bit_rep.to_le_bytes())?;
        w.write_all(&core.label.to_le_bytes())?;
        w.write_all(&core.start.to_le_bytes())?;
        w.write_all(&core.end.to_le_bytes())?;
    }
    Ok(())
}

/// Inverse of `dump`. Fails with `Error::BadStream` on a short read or a
/// negative level/count (the original format predates any validity check,
/// so a negative count here is always evidence of a garbled stream).
pub fn restore<R: Read>(r: &mut R) -> Result<Lps,Error> {
    let level = read_i32(r)?;
    let count = read_i32(r)?;
    if level < 0 || count < 0 {
        return Err(Error::BadStream);
    }
    let mut cores = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let bit_size = read_u32(r)?;
        let bit_rep = read_u64(r)?;
        let label = read_u32(r)?;
        let start = read_u64(r)?;
        let end = read_u64(r)?;
        cores.push(Core::from_parts(bit_size,bit_rep,label,start,end));
    }
    Ok(Lps { level: level as u32, cores })
}

fn read_i32<R: Read>(r: &mut R) -> Result<i32,Error> {
    let mut buf = [0u8;4];
    r.read_exact(&mut buf).map_err(|_| Error::BadStream)?;
    Ok(i32::from_le_bytes(buf))
}
fn read_u32<R: Read>(r: &mut R) -> Result<u32,Error> {
    let mut buf = [0u8;4];
    r.read_exact(&mut buf).map_err(|_| Error::BadStream)?;
    Ok(u32::from_le_bytes(buf))
}
fn read_u64<R: Read>(r: &mut R) -> Result<u64,Error> {
    let mut buf = [0u8;8];
    r.read_exact(&mut buf).map_err(|_| Error::BadStream)?;
    Ok(u64::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;

    #[test]
    fn round_trips_a_parse() {
        let alphabet = Alphabet::default();
        let seq = b"GGGACCTGGTGACCCCAGCCCACGACAGCCAAGCGCCAGCTGAGCTCAGGTGTGAGGAGATCACAGTCCT";
        let mut lps = Lps::from_symbols(seq,0,&alphabet);
        lps.deepen_to(2).unwrap();

        let mut buf = Vec::new();
        dump(&lps,&mut buf).unwrap();
        let restored = restore(&mut &buf[..]).unwrap();

        assert_eq!(restored.level,lps.level);
        assert_eq!(restored.cores.len(),lps.cores.len());
        for (a,b) in lps.cores.iter().zip(restored.cores.iter()) {
            assert_eq!(a.bit_rep,b.bit_rep);
            assert_eq!(a.bit_size,b.bit_size);
            assert_eq!(a.label,b.label);
            assert_eq!(a.start,b.start);
            assert_eq!(a.end,b.end);
        }
    }

    #[test]
    fn rejects_truncated_stream() {
        let buf = vec![1,0,0,0, 2,0,0,0, 0,0];
        let err = restore(&mut &buf[..]).unwrap_err();
        assert!(matches!(err,Error::BadStream));
    }

    #[test]
    fn empty_parse_round_trips() {
        let lps = Lps { level: 1, cores: Vec::new() };
        let mut buf = Vec::new();
        dump(&lps,&mut buf).unwrap();
        let restored = restore(&mut &buf[..]).unwrap();
        assert_eq!(restored.level,1);
        assert!(restored.cores.is_empty());
    }

    #[test]
    fn dump_matches_golden_byte_layout() {
        // one level-1 core: bit_size=6, bit_rep=0x8000000000000061, label=0x61, start=0, end=3
        let core = Core::from_parts(6,0x8000000000000061,0x61,0,3);
        let lps = Lps { level: 1, cores: vec![core] };

        let mut buf = Vec::new();
        dump(&lps,&mut buf).unwrap();

        let golden = "01000000 01000000 \
                       06000000 6100000000000080 61000000 0000000000000000 0300000000000000";
        assert_eq!(buf,hex::decode(golden.replace(' ',"")).unwrap());
    }
}
