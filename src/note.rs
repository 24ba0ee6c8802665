//! Note names: a natural letter plus a signed count of accidentals.
//!
//! ```
//! use tetrachord::note::{Letter, NoteName};
//!
//! let note: NoteName = "Gb".parse().unwrap();
//! assert_eq!(note, NoteName::new(Letter::G, -1));
//! assert_eq!(note.to_string(), "Gb");
//! assert_eq!(note.split_binomial().unwrap().1.to_string(), "F#");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::parser;

/// Semitones in an octave.
pub const SEMITONES: i32 = 12;

/// Semitone offsets of the natural letters measured from `C`.
pub const DIATONIC: [i32; LETTER_COUNT] = [0, 2, 4, 5, 7, 9, 11];

/// The total number of `Letter` elements.
pub const LETTER_COUNT: usize = 7;

/// A single note without accidentals.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    C, D, E, F, G, A, B
}

impl Letter {
    /// Every letter in ascending order starting from `C`.
    pub const ALL: [Letter; LETTER_COUNT] = [
        Letter::C, Letter::D, Letter::E, Letter::F, Letter::G, Letter::A, Letter::B,
    ];

    /// Construct a `Letter` from a char representation.
    pub fn from_char(input: char) -> Option<Letter> {
        use self::Letter::*;

        match input {
            'C' => Some(C),
            'D' => Some(D),
            'E' => Some(E),
            'F' => Some(F),
            'G' => Some(G),
            'A' => Some(A),
            'B' => Some(B),
            _   => None
        }
    }

    /// Construct a `Letter` from its position counted from `C`.
    pub fn from_index(index: usize) -> Option<Letter> {
        Letter::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn to_char(self) -> char {
        "CDEFGAB".as_bytes()[self.index()] as char
    }

    /// The letter `steps` positions above this one, wrapping at the octave.
    pub fn offset(self, steps: i32) -> Letter {
        let index = (self.index() as i32 + steps).rem_euclid(LETTER_COUNT as i32);
        Letter::ALL[index as usize]
    }

    /// Semitones above `C` of the natural note.
    pub fn semitones(self) -> i32 {
        DIATONIC[self.index()]
    }
}

/// Represents an alteration of a base `Letter`.
///
/// Positive values are repeated sharps, negative values repeated flats.
pub type Accidentals = i32;

/// A single note which may have applied accidentals.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NoteName {
    pub letter: Letter,
    pub accidentals: Accidentals,
}

impl NoteName {
    pub fn new(letter: Letter, accidentals: Accidentals) -> NoteName {
        NoteName { letter, accidentals }
    }

    pub fn natural(letter: Letter) -> NoteName {
        NoteName::new(letter, 0)
    }

    /// Pitch class of the note in `0..12`, with `C` at zero.
    pub fn pitch_class(&self) -> i32 {
        (self.letter.semitones() + self.accidentals).rem_euclid(SEMITONES)
    }

    /// Returns the simplest enharmonic equivalent.
    ///
    /// A natural is preferred. Failing that the result carries a single
    /// accidental: a sharp when the input had more than one sharp, a flat
    /// otherwise (so `C#` becomes `Db`).
    pub fn simplify(&self) -> NoteName {
        if self.accidentals == 0 {
            return *self;
        }

        let value = self.pitch_class();
        if let Some(letter) = natural_at(value) {
            return NoteName::natural(letter);
        }

        match (self.accidentals > 1, natural_at(value - 1), natural_at(value + 1)) {
            (true, Some(letter), _) => NoteName::new(letter, 1),
            (false, _, Some(letter)) => NoteName::new(letter, -1),
            // Every non-natural pitch class sits between two naturals.
            _ => *self,
        }
    }

    /// True if the note sounds the same as some natural.
    pub fn is_enharmonically_natural(&self) -> bool {
        self.simplify().accidentals == 0
    }

    /// Returns the note together with its enharmonic partner, e.g. `G#` with
    /// `Ab`.
    ///
    /// Names with more than one accidental are returned unchanged as both
    /// elements.
    pub fn split_binomial(&self) -> Result<(NoteName, NoteName)> {
        if self.is_enharmonically_natural() {
            return Err(Error::Argument(format!(
                "{} has no accidental enharmonic partner", self
            )));
        }

        let other = match self.accidentals {
            1 => NoteName::new(self.letter.offset(1), -1),
            -1 => NoteName::new(self.letter.offset(-1), 1),
            _ => *self,
        };
        Ok((*self, other))
    }

    pub fn is_sharp(&self) -> bool {
        self.accidentals > 0
    }

    pub fn is_flat(&self) -> bool {
        self.accidentals < 0
    }
}

fn natural_at(value: i32) -> Option<Letter> {
    DIATONIC
        .iter()
        .position(|&semitones| semitones == value)
        .and_then(Letter::from_index)
}

/// Write the accidentals of a note or interval name, sharps as `#` and flats
/// as `b`.
pub(crate) fn write_accidentals(f: &mut fmt::Formatter, accidentals: Accidentals) -> fmt::Result {
    let symbol = if accidentals > 0 { '#' } else { 'b' };
    for _ in 0..accidentals.unsigned_abs() {
        write!(f, "{}", symbol)?;
    }
    Ok(())
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter.to_char())?;
        write_accidentals(f, self.accidentals)
    }
}

impl FromStr for NoteName {
    type Err = Error;

    fn from_str(s: &str) -> Result<NoteName> {
        parser::parse_note_name(s)
    }
}

/// Parse a note name such as `C`, `F#` or `Bbb`.
pub fn decode_note_name(text: &str) -> Result<NoteName> {
    text.parse()
}

pub fn encode_note_name(note: NoteName) -> String {
    note.to_string()
}
