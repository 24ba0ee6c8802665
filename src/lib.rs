//! # tetrachord
//!
//! A crate for naming things in tonal music: intervals, notes, scales and
//! chords.
//!
//! Notes are spelled by letter and accidentals, so `F#` and `Gb` are
//! different names for one pitch. Scales are a small set of canonical
//! heptatonic, hexatonic, pentatonic and octatonic patterns and their modes,
//! reached through an alias table and a reverse pattern search. Chord
//! symbols are decoded into interval names and named back again.
//!
//! ```
//! use tetrachord::chord::resolve_chord_symbol;
//! use tetrachord::resolve::{describe_heptatonic_scale, resolve_generic_scale_request};
//!
//! let chord = resolve_chord_symbol("F#m7b5").unwrap();
//! assert_eq!(chord.note_names, ["F#", "A", "C", "E"]);
//!
//! let (keynote, scale) = resolve_generic_scale_request("Eb lydian dominant").unwrap();
//! assert_eq!(scale.to_string(), "altered mixolydian");
//!
//! let described = describe_heptatonic_scale(keynote, "lydian dominant", None).unwrap();
//! assert_eq!(described.note_names, ["Eb", "F", "G", "A", "Bb", "C", "Db"]);
//! ```

pub mod alias;
pub mod chord;
pub mod chordify;
pub mod convert;
pub mod error;
pub mod interval;
pub mod note;
mod parser;
pub mod resolve;
pub mod scale;
pub mod spelling;

pub use crate::error::{Error, Result};
