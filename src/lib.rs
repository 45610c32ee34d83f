#![warn(rust_2018_idioms)]

//! # CFF glyphs
//!
//! Reading of Compact Font Format font programs, either bare or as the `CFF ` table of an
//! OpenType font, and interpretation of their Type 1 and Type 2 charstrings into glyph paths,
//! advance widths and bounding boxes.
//!
//! ```no_run
//! use cff_glyphs::cff::CFF;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let buffer = std::fs::read("font.cff")?;
//!     let cff = CFF::read_source(&buffer[..])?;
//!     let font = &cff.fonts[0];
//!     let glyph = font.glyph_by_name("A")?;
//!     println!("advance {} bbox {:?}", glyph.advance_width, glyph.bbox);
//!     Ok(())
//! }
//! ```

/// Reading of binary data.
pub mod binary;
pub mod cff;
pub mod error;
pub mod outline;
pub mod tables;
pub mod tag;
/// Shared test code.
#[cfg(test)]
pub mod tests;
