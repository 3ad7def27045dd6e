//! `Lps`: an ordered run of cores at a given level, and the deepening
//! operation that advances it to the next level via DCT + re-parse.

use crate::alphabet::Alphabet;
use crate::core::Core;
use crate::dct;
use crate::error::Error;
use crate::parser;
use crate::tools::capacity;

/// DCT runs a single pass per level (the original's `DCT_ITERATION_COUNT`).
const DCT_ITERATION_COUNT: usize = 1;

/// A position-stable parse of one input at one level.
#[derive(Clone,Debug)]
pub struct Lps {
    pub level: u32,
    pub cores: Vec<Core>,
}

impl Lps {
    /// Parse `seq` at level 1, with absolute coordinates starting at `offset`.
    pub fn from_symbols(seq: &[u8], offset: u64, alphabet: &Alphabet) -> Self {
        let mut cores = Vec::with_capacity(capacity::initial_capacity(seq.len()));
        cores.extend(parser::parse_level1(seq,offset,alphabet));
        Self { level: 1, cores }
    }

    /// Parse the reverse complement of `seq` at level 1. See
    /// `parser::parse_level1_rc` for the coordinate-system caveat.
    pub fn from_symbols_rc(seq: &[u8], alphabet: &Alphabet) -> Self {
        let mut cores = Vec::with_capacity(capacity::initial_capacity(seq.len()));
        cores.extend(parser::parse_level1_rc(seq,alphabet));
        Self { level: 1, cores }
    }

    /// Advance by exactly one level: DCT-compress every core but the first
    /// against its left neighbour, then re-parse the compressed run.
    ///
    /// Returns `false` (and empties the parse) when fewer than two cores
    /// are available to compress — there is nothing left to deepen.
    pub fn deepen_once(&mut self) -> bool {
        if self.cores.len() < DCT_ITERATION_COUNT + 1 {
            log::debug!("level {} has {} cores, cannot deepen further",self.level,self.cores.len());
            self.cores.clear();
            self.level += 1;
            return false;
        }

        let before = self.cores.len();
        for i in (DCT_ITERATION_COUNT..self.cores.len()).rev() {
            let (left_part,right_part) = self.cores.split_at_mut(i);
            dct::compress(&left_part[i-1],&mut right_part[0]);
        }

        let next = parser::parse_level_n(&self.cores[DCT_ITERATION_COUNT..]);
        log::debug!("deepened level {} -> {}: {} cores -> {} cores",self.level,self.level+1,before,next.len());
        self.cores = next;
        capacity::shrink_if_sparse(&mut self.cores);
        self.level += 1;
        true
    }

    /// Repeatedly deepen until `target_level` is reached.
    ///
    /// Returns `Ok(false)` without modifying the parse if `target_level` is
    /// already at or below the current level (a no-op). Fails with
    /// `Error::BadInput` if `target_level < 1`.
    pub fn deepen_to(&mut self, target_level: u32) -> Result<bool,Error> {
        if target_level < 1 {
            return Err(Error::BadInput(format!("requested level {} is below 1",target_level)));
        }
        if target_level <= self.level {
            return Ok(false);
        }
        while self.level < target_level && self.deepen_once() {}
        Ok(true)
    }

    /// Approximate heap footprint in bytes: one `Core` per entry plus the
    /// vector's spare capacity. Debug/diagnostic use only.
    pub fn memory_size(&self) -> usize {
        self.cores.capacity() * std::mem::size_of::<Core>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq1() -> &'static [u8] {
        b"GGGACCTGGTGACCCCAGCCCACGACAGCCAAGCGCCAGCTGAGCTCAGGTGTGAGGAGATCACAGTCCT"
    }

    #[test]
    fn scenario_2_deepen_to_level_2() {
        let alphabet = Alphabet::default();
        let mut lps = Lps::from_symbols(seq1(),0,&alphabet);
        assert!(lps.deepen_once());
        assert_eq!(lps.level,2);
        assert_eq!(lps.cores.len(),12);
    }

    #[test]
    fn scenario_3_deepen_to_level_3() {
        let alphabet = Alphabet::default();
        let mut lps = Lps::from_symbols(seq1(),0,&alphabet);
        assert!(lps.deepen_to(3).unwrap());
        assert_eq!(lps.level,3);
        assert_eq!(lps.cores.len(),4);
    }

    #[test]
    fn scenario_5_deepen_to_lower_level_is_noop() {
        let alphabet = Alphabet::default();
        let mut lps = Lps::from_symbols(seq1(),0,&alphabet);
        lps.deepen_to(3).unwrap();
        let before = lps.cores.len();
        let progressed = lps.deepen_to(2).unwrap();
        assert!(!progressed);
        assert_eq!(lps.level,3);
        assert_eq!(lps.cores.len(),before);
    }

    #[test]
    fn deepen_to_rejects_level_below_one() {
        let alphabet = Alphabet::default();
        let mut lps = Lps::from_symbols(seq1(),0,&alphabet);
        assert!(matches!(lps.deepen_to(0),Err(Error::BadInput(_))));
    }

    #[test]
    fn deepening_past_exhaustion_empties_the_parse() {
        let alphabet = Alphabet::default();
        let mut lps = Lps::from_symbols(b"ACGTACGT",0,&alphabet);
        while lps.deepen_once() {}
        assert!(lps.cores.is_empty());
    }

    #[test]
    fn memory_size_scales_with_capacity() {
        let alphabet = Alphabet::default();
        let lps = Lps::from_symbols(seq1(),0,&alphabet);
        assert_eq!(lps.memory_size(),lps.cores.capacity() * std::mem::size_of::<Core>());
        assert!(lps.memory_size() > 0);

        let empty = Lps { level: 1, cores: Vec::new() };
        assert_eq!(empty.memory_size(),0);
    }
}
