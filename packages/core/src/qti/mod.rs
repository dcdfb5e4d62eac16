//! QTI 1.2 (Canvas flavor) parsing and serialization.
//!
//! The parser and writer are independent, symmetric transforms over the
//! document model in [`crate::types`]. What the parser reads verbatim into
//! the metadata maps, the writer re-emits, so unknown Canvas extension
//! fields survive a parse → edit → serialize round-trip.

pub mod parser;
pub mod writer;
