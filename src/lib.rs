//! # falcpt
//!
//! Locally consistent parsing (LCP) of DNA sequences into hierarchical
//! cores, plus deterministic coin-tossing (DCT) compression between
//! levels.
//!
//! A level-1 parse scans raw symbols for local minima, local maxima, and
//! interior runs (`parser::parse_level1`); each subsequent level runs DCT
//! compression (`dct::compress`) over the previous level's cores and
//! reparses the compressed run (`parser::parse_level_n`). `Lps` ties the
//! two steps together and tracks the current level; `chunked` drives the
//! same process over inputs too large to hold as one parse at once.
//!
//! ## Example
//!
//! ```rs
//! use falcpt::{alphabet::Alphabet,lps::Lps};
//! let alphabet = Alphabet::default();
//! let mut lps = Lps::from_symbols(b"GGGACCTGGTGACCCCAGCCCACGACAGCCAAGC",0,&alphabet);
//! lps.deepen_to(2).expect("level 2 is valid");
//! println!("{} cores at level {}",lps.cores.len(),lps.level);
//! ```

pub mod alphabet;
pub mod chunked;
pub mod core;
pub mod dct;
pub mod error;
pub mod lps;
pub mod parser;
pub mod serialize;
pub mod tools;

pub use crate::error::Error;
