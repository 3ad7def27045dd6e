//! Small standalone mechanics shared by the rest of the crate.

pub mod capacity;
