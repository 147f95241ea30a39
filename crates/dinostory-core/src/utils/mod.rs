//! Small pure helpers used across crates.

pub mod text;

pub use text::{
    DIAGNOSTIC_DETAIL_CHARS, Segment, sentence_segments, split_into_chunks, truncate_chars,
    truncate_detail,
};
