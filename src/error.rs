//! Error types shared across the crate.

/// Errors surfaced by the alphabet, core, parser, and serialization layers.
///
/// Invalid input symbols are *not* an error condition (see the skip rule
/// in `parser`); these variants cover malformed configuration, malformed
/// serialized streams, and malformed caller-supplied parameters.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("alphabet encoding requires more than two bits per symbol")]
    BadEncoding,
    #[error("serialized parse stream is truncated or malformed")]
    BadStream,
    #[error("bad input: {0}")]
    BadInput(String),
    #[error(transparent)]
    Io(#[from] std::io::Error)
}
