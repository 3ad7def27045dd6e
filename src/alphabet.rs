//! Symbol-to-code tables (forward and reverse-complement).
//!
//! Mirrors the `alphabet`/`rc_alphabet` globals of the original C
//! implementation, but as a plain value rather than process-wide mutable
//! state: every parsing entry point takes an `&Alphabet` so that multiple
//! parses (possibly on different threads) can run against different
//! tables without any risk of one reinitializing another's state mid-parse.

use std::io::{BufRead,BufReader};
use std::path::Path;
use crate::error::Error;

/// A symbol code in `{0,1,2,3}`, or `-1` for a symbol outside the alphabet.
pub type Code = i32;

/// Forward and reverse-complement symbol→code tables, 128 entries each
/// (indexed by the symbol's byte value; non-ASCII bytes are always invalid).
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct Alphabet {
    fwd: [Code;128],
    rc: [Code;128],
}

impl Default for Alphabet {
    /// Standard DNA encoding: `{A,a}->0, {C,c}->1, {G,g}->2, {T,t}->3` forward;
    /// `{A,a}->3, {C,c}->2, {G,g}->1, {T,t}->0` reverse-complement.
    fn default() -> Self {
        let mut fwd = [-1;128];
        let mut rc = [-1;128];
        for (c,f,r) in [('A',0,3),('a',0,3),('C',1,2),('c',1,2),('G',2,1),('g',2,1),('T',3,0),('t',3,0)] {
            fwd[c as usize] = f;
            rc[c as usize] = r;
        }
        Self { fwd, rc }
    }
}

impl Alphabet {
    /// Forward code for a raw symbol byte, `-1` if out of alphabet or non-ASCII.
    pub fn code(&self, symbol: u8) -> Code {
        if symbol < 128 { self.fwd[symbol as usize] } else { -1 }
    }
    /// Reverse-complement code for a raw symbol byte.
    pub fn rc_code(&self, symbol: u8) -> Code {
        if symbol < 128 { self.rc[symbol as usize] } else { -1 }
    }
    /// Load a custom mapping from a whitespace-separated text file, one
    /// line per character: `SYMBOL FWD RC`. Blank lines are ignored.
    /// Unknown symbols remain at code `-1`. Fails with `Error::BadEncoding`
    /// unless the widest mapped code needs exactly two bits (fewer, e.g.
    /// all codes 0, is rejected just like more than two).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self,Error> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let mut fwd = [-1;128];
        let mut rc = [-1;128];
        let mut max_code: Code = -1;
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut parts = line.split_whitespace();
            let symbol = parts.next().and_then(|s| s.chars().next());
            let fwd_code: Option<Code> = parts.next().and_then(|s| s.parse().ok());
            let rc_code: Option<Code> = parts.next().and_then(|s| s.parse().ok());
            let (symbol,fc,rcc) = match (symbol,fwd_code,rc_code) {
                (Some(s),Some(fc),Some(rcc)) => (s,fc,rcc),
                _ => {
                    log::warn!("ignoring malformed alphabet line: {}",line);
                    continue;
                }
            };
            if symbol as u32 >= 128 {
                continue;
            }
            fwd[symbol as usize] = fc;
            rc[symbol as usize] = rcc;
            max_code = max_code.max(fc).max(rcc);
        }
        let mut bit_count = 0;
        let mut m = max_code;
        while m > 0 {
            bit_count += 1;
            m /= 2;
        }
        if bit_count != 2 {
            return Err(Error::BadEncoding);
        }
        log::debug!("loaded custom alphabet, max code bit width {}",bit_count);
        Ok(Self { fwd, rc })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_forward_codes() {
        let a = Alphabet::default();
        assert_eq!(a.code(b'A'),0);
        assert_eq!(a.code(b'a'),0);
        assert_eq!(a.code(b'C'),1);
        assert_eq!(a.code(b'G'),2);
        assert_eq!(a.code(b'T'),3);
        assert_eq!(a.code(b'N'),-1);
        assert_eq!(a.code(200),-1);
    }

    #[test]
    fn default_rc_codes() {
        let a = Alphabet::default();
        assert_eq!(a.rc_code(b'A'),3);
        assert_eq!(a.rc_code(b'C'),2);
        assert_eq!(a.rc_code(b'G'),1);
        assert_eq!(a.rc_code(b'T'),0);
    }

    #[test]
    fn loads_custom_file() {
        let dir = std::env::temp_dir();
        let path = dir.join("falcpt_test_alphabet.txt");
        std::fs::write(&path,"A 0 3\nC 1 2\n\nG 2 1\nT 3 0\n").unwrap();
        let a = Alphabet::from_file(&path).unwrap();
        assert_eq!(a.code(b'A'),0);
        assert_eq!(a.rc_code(b'T'),0);
        assert_eq!(a.code(b'N'),-1);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn rejects_wide_codes() {
        let dir = std::env::temp_dir();
        let path = dir.join("falcpt_test_alphabet_bad.txt");
        std::fs::write(&path,"A 0 3\nC 4 2\n").unwrap();
        let err = Alphabet::from_file(&path).unwrap_err();
        assert!(matches!(err,Error::BadEncoding));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn rejects_narrow_codes() {
        // every mapped code is 0: max_code=0, bit_count=0, still not exactly 2 bits
        let dir = std::env::temp_dir();
        let path = dir.join("falcpt_test_alphabet_narrow.txt");
        std::fs::write(&path,"A 0 0\nC 0 0\nG 0 0\nT 0 0\n").unwrap();
        let err = Alphabet::from_file(&path).unwrap_err();
        assert!(matches!(err,Error::BadEncoding));
        std::fs::remove_file(&path).unwrap();
    }
}
