//! Chunked driver: run the parser over an input of any length by
//! processing overlapping windows and stitching the results together.
//!
//! The local patterns in `parser` all look at most 2 symbols to either
//! side, so carrying 2 cores of overlap between chunks is enough to
//! guarantee every core lands at the position a single-pass parse would
//! have given it (see `Core::start`/`Core::end` invariants).

use crate::alphabet::Alphabet;
use crate::core::Core;
use crate::error::Error;
use crate::lps::Lps;

/// Parse `seq` in windows of `chunk_size` symbols, deepened to
/// `target_level`, and return the stitched core sequence as if the whole
/// input had been parsed in one pass.
pub fn parse(seq: &[u8], chunk_size: usize, target_level: u32, alphabet: &Alphabet) -> Result<Vec<Core>,Error> {
    if chunk_size < 3 {
        return Err(Error::BadInput("chunk size must be at least 3".to_string()));
    }
    if target_level < 1 {
        return Err(Error::BadInput(format!("requested level {} is below 1",target_level)));
    }
    if seq.is_empty() {
        return Ok(Vec::new());
    }

    let len = seq.len();
    let first_end = chunk_size.min(len);
    let mut lps = Lps::from_symbols(&seq[0..first_end],0,alphabet);
    lps.deepen_to(target_level)?;
    let mut output = lps.cores;

    let mut next_start = match penultimate_start(&output) {
        Some(s) => s,
        None => {
            log::warn!("first chunk produced no cores, nothing more to stitch");
            return Ok(output);
        }
    };

    let mut chunk_end = first_end as u64;
    log::debug!("chunked parse: {} symbols, chunk_size {}, target level {}",len,chunk_size,target_level);

    while (chunk_end as usize) < len {
        let start = next_start as usize;
        let end = (start + chunk_size).min(len);
        chunk_end = end as u64;

        let mut chunk_lps = Lps::from_symbols(&seq[start..end],next_start,alphabet);
        chunk_lps.deepen_to(target_level)?;
        let chunk_output = chunk_lps.cores;

        let mut overlap = 0usize;
        if let Some(first) = chunk_output.first() {
            for &o in &[2usize,1] {
                if output.len() >= o && output[output.len()-o].start == first.start {
                    overlap = o;
                    break;
                }
            }
        }

        let new_cores = &chunk_output[overlap.min(chunk_output.len())..];
        output.extend_from_slice(new_cores);

        if !new_cores.is_empty() {
            next_start = penultimate_start(&output).unwrap_or(chunk_end);
        } else {
            next_start = match scan_backwards_for_invalid(&seq[start..end],alphabet) {
                Some(idx) => {
                    log::warn!("chunk at {} produced no new cores, resuming after invalid symbol at {}",start,start+idx);
                    (start + idx + 1) as u64
                }
                None => {
                    log::warn!("chunk at {} produced no new cores and no invalid symbol to resume from; advancing by chunk_size",start);
                    chunk_end
                }
            };
            if next_start as usize <= start {
                break;
            }
        }
    }

    Ok(output)
}

fn penultimate_start(cores: &[Core]) -> Option<u64> {
    if cores.len() >= 2 {
        Some(cores[cores.len()-2].start)
    } else {
        cores.last().map(|c| c.start)
    }
}

fn scan_backwards_for_invalid(chunk: &[u8], alphabet: &Alphabet) -> Option<usize> {
    chunk.iter().rposition(|&b| alphabet.code(b) == -1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQ: &[u8] = b"GGGACCTGGTGACCCCAGCCCACGACAGCCAAGCGCCAGCTGAGCTCAGGTGTGAGGAGATCACAGTCCT";

    #[test]
    fn property_p4_chunked_matches_single_pass() {
        let alphabet = Alphabet::default();
        let mut single = Lps::from_symbols(SEQ,0,&alphabet);
        single.deepen_to(2).unwrap();

        let chunked = parse(SEQ,20,2,&alphabet).unwrap();

        assert_eq!(chunked.len(),single.cores.len());
        for (a,b) in single.cores.iter().zip(chunked.iter()) {
            assert_eq!(a.bit_rep,b.bit_rep);
            assert_eq!(a.start,b.start);
            assert_eq!(a.end,b.end);
        }
    }

    #[test]
    fn rejects_small_chunk_size() {
        let alphabet = Alphabet::default();
        assert!(matches!(parse(SEQ,2,1,&alphabet),Err(Error::BadInput(_))));
    }

    #[test]
    fn rejects_level_below_one() {
        let alphabet = Alphabet::default();
        assert!(matches!(parse(SEQ,10,0,&alphabet),Err(Error::BadInput(_))));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let alphabet = Alphabet::default();
        assert!(parse(b"",10,1,&alphabet).unwrap().is_empty());
    }

    #[test]
    fn single_chunk_covering_whole_input() {
        let alphabet = Alphabet::default();
        let whole = parse(SEQ,SEQ.len(),1,&alphabet).unwrap();
        let direct = Lps::from_symbols(SEQ,0,&alphabet);
        assert_eq!(whole.len(),direct.cores.len());
    }
}
