//! The level-1 (raw symbol) and level-N (core run) scanners.
//!
//! Both scanners share one state machine: scan left-to-right, recognise
//! RINT/LMIN/LMAX in priority order, and back-fill a SSEQ connector core
//! whenever a gap opened up since the last emission. The level-1 scanner
//! additionally tracks the most recent out-of-alphabet symbol so that a
//! SSEQ connector is never built across an invalid symbol.

use crate::alphabet::Alphabet;
use crate::core::Core;

/// Scan `seq` (forward alphabet) and emit level-1 cores, with absolute
/// coordinates shifted by `offset`.
pub fn parse_level1(seq: &[u8], offset: u64, alphabet: &Alphabet) -> Vec<Core> {
    parse_level1_generic(seq, offset, |b| alphabet.code(b), |s,a,b| Core::from_symbols(s,alphabet,a,b))
}

/// Scan the literal reverse of `seq` (reverse-complement alphabet) and
/// emit level-1 cores. Coordinates are in the *reversed* buffer, i.e. the
/// caller wanting original-string positions must apply `pos -> len - pos`
/// (see property P5 in the design notes) — this mirrors the original
/// tool, which never performed that remap internally either.
pub fn parse_level1_rc(seq: &[u8], alphabet: &Alphabet) -> Vec<Core> {
    let rev: Vec<u8> = seq.iter().rev().copied().collect();
    parse_level1_generic(&rev, 0, |b| alphabet.rc_code(b), |s,a,b| Core::from_symbols_rc(s,alphabet,a,b))
}

fn parse_level1_generic(
    seq: &[u8],
    offset: u64,
    code_of: impl Fn(u8) -> i32,
    make_core: impl Fn(&[u8],u64,u64) -> Core,
) -> Vec<Core> {
    let mut cores = Vec::new();
    let end = seq.len();
    if end < 3 {
        return cores;
    }

    let mut it1: usize = 0;
    let mut it2: i64 = end as i64;
    let mut last_invalid: i64 = -1;

    while it1 + 2 < end {
        let c0 = code_of(seq[it1]);
        if c0 == -1 {
            last_invalid = it1 as i64;
            it1 += 1;
            continue;
        }
        let c1 = code_of(seq[it1+1]);
        if c0 == c1 {
            it1 += 1;
            continue;
        }
        let c2 = code_of(seq[it1+2]);

        // RINT: right-interior run
        if c1 == c2 {
            let mut middle_count: u64 = 1;
            let mut temp = it1 + 2;
            while temp < end && code_of(seq[temp-1]) == code_of(seq[temp]) {
                temp += 1;
                middle_count += 1;
            }
            if temp != end {
                if it2 < it1 as i64 && last_invalid < it2 - 1 {
                    let j = it2 as usize;
                    let backfill = make_core(&seq[j-1..it1+1], j as u64 - 1 + offset, it1 as u64 + 1 + offset);
                    log::trace!("SSEQ back-fill before RINT at {}: {}",it1,backfill.bit_string());
                    cores.push(backfill);
                }
                it2 = (it1 + 2 + middle_count as usize) as i64;
                let core = make_core(&seq[it1..it2 as usize], it1 as u64 + offset, it2 as u64 + offset);
                log::trace!("emitted RINT core at {}: {}",it1,core.bit_string());
                cores.push(core);
                it1 += 1;
                continue;
            }
        }

        // LMIN: local minimum
        if c0 > c1 && c1 < c2 {
            if it2 < it1 as i64 && last_invalid < it2 - 1 {
                let j = it2 as usize;
                let backfill = make_core(&seq[j-1..it1+1], j as u64 - 1 + offset, it1 as u64 + 1 + offset);
                log::trace!("SSEQ back-fill before LMIN at {}: {}",it1,backfill.bit_string());
                cores.push(backfill);
            }
            it2 = (it1 + 3) as i64;
            let core = make_core(&seq[it1..it1+3], it1 as u64 + offset, (it1+3) as u64 + offset);
            log::trace!("emitted LMIN core at {}: {}",it1,core.bit_string());
            cores.push(core);
            it1 += 1;
            continue;
        }

        if it1 == 0 {
            it1 += 1;
            continue;
        }

        // LMAX: local maximum, needs one symbol of context on each side
        if it1 + 3 < end {
            let c_prev = code_of(seq[it1-1]);
            let c3 = code_of(seq[it1+3]);
            if c0 < c1 && c1 > c2 && c_prev <= c0 && c2 >= c3 {
                if it2 < it1 as i64 && last_invalid < it2 - 1 {
                    let j = it2 as usize;
                    let backfill = make_core(&seq[j-1..it1+1], j as u64 - 1 + offset, it1 as u64 + 1 + offset);
                    log::trace!("SSEQ back-fill before LMAX at {}: {}",it1,backfill.bit_string());
                    cores.push(backfill);
                }
                it2 = (it1 + 3) as i64;
                let core = make_core(&seq[it1..it1+3], it1 as u64 + offset, (it1+3) as u64 + offset);
                log::trace!("emitted LMAX core at {}: {}",it1,core.bit_string());
                cores.push(core);
            }
        }
        it1 += 1;
    }

    cores
}

/// Scan a slice of already DCT-compressed cores and emit the next
/// level's cores, each built from a run of at least 3 children.
pub fn parse_level_n(cores: &[Core]) -> Vec<Core> {
    let mut out = Vec::new();
    let end = cores.len();
    if end < 3 {
        return out;
    }

    let mut it1: usize = 0;
    let mut it2: i64 = end as i64;

    while it1 + 2 < end {
        if cores[it1] == cores[it1+1] {
            it1 += 1;
            continue;
        }

        if cores[it1+1] == cores[it1+2] {
            let mut middle_count = 1usize;
            let mut temp = it1 + 2;
            while temp < end && cores[temp-1] == cores[temp] {
                temp += 1;
                middle_count += 1;
            }
            if temp != end {
                if it2 < it1 as i64 {
                    let j = it2 as usize;
                    out.push(Core::from_children(&cores[j-1..it1+1]));
                }
                it2 = (it1 + 2 + middle_count) as i64;
                out.push(Core::from_children(&cores[it1..it2 as usize]));
                it1 += 1;
                continue;
            }
        }

        if cores[it1] > cores[it1+1] && cores[it1+1] < cores[it1+2] {
            if it2 < it1 as i64 {
                let j = it2 as usize;
                out.push(Core::from_children(&cores[j-1..it1+1]));
            }
            it2 = (it1 + 3) as i64;
            out.push(Core::from_children(&cores[it1..it1+3]));
            it1 += 1;
            continue;
        }

        if it1 == 0 {
            it1 += 1;
            continue;
        }

        if it1 + 3 < end
            && cores[it1] < cores[it1+1] && cores[it1+1] > cores[it1+2]
            && cores[it1-1] <= cores[it1] && cores[it1+2] >= cores[it1+3] {
            if it2 < it1 as i64 {
                let j = it2 as usize;
                out.push(Core::from_children(&cores[j-1..it1+1]));
            }
            it2 = (it1 + 3) as i64;
            out.push(Core::from_children(&cores[it1..it1+3]));
        }
        it1 += 1;
    }

    out
}
