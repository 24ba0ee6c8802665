//! Interval names and the arithmetic between note names.
//!
//! An interval name is a scale degree with accidentals applied, written as an
//! accidental prefix followed by the degree digit, e.g. `b3`, `#11` or `bb7`.
//! Degrees above the octave are only used for the chord extensions `9`, `11`
//! and `13`.

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::note::{self, Accidentals, NoteName, DIATONIC, LETTER_COUNT, SEMITONES};
use crate::parser;
use crate::spelling;

/// A scale degree relative to some root.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Degree {
    N1, N2, N3, N4, N5, N6, N7, N9, N11, N13
}

impl Degree {
    pub const SIMPLE: [Degree; LETTER_COUNT] = [
        Degree::N1, Degree::N2, Degree::N3, Degree::N4, Degree::N5, Degree::N6, Degree::N7,
    ];

    /// Construct a `Degree` from its digit, e.g. `11`.
    pub fn from_number(number: u8) -> Option<Degree> {
        use self::Degree::*;

        match number {
            1  => Some(N1),
            2  => Some(N2),
            3  => Some(N3),
            4  => Some(N4),
            5  => Some(N5),
            6  => Some(N6),
            7  => Some(N7),
            9  => Some(N9),
            11 => Some(N11),
            13 => Some(N13),
            _  => None
        }
    }

    /// The degree reached after `step` letters above the root.
    ///
    /// Only the chord extensions keep their compound number, so step `8` is
    /// `9` while step `7` folds back to `1`.
    pub fn from_step(step: usize) -> Degree {
        match step {
            8  => Degree::N9,
            10 => Degree::N11,
            12 => Degree::N13,
            _  => Degree::SIMPLE[step % LETTER_COUNT],
        }
    }

    pub fn number(self) -> u8 {
        use self::Degree::*;

        match self {
            N1  => 1,
            N2  => 2,
            N3  => 3,
            N4  => 4,
            N5  => 5,
            N6  => 6,
            N7  => 7,
            N9  => 9,
            N11 => 11,
            N13 => 13,
        }
    }

    /// Number of letters between the root and this degree within one octave.
    pub fn letter_steps(self) -> usize {
        (self.number() as usize - 1) % LETTER_COUNT
    }

    /// The same degree folded into the first octave.
    pub fn simple(self) -> Degree {
        Degree::SIMPLE[self.letter_steps()]
    }

    pub fn is_compound(self) -> bool {
        self.number() > 7
    }

    /// Returns the number of semi-tones a natural degree spans.
    pub fn natural_semitones(self) -> i32 {
        let octave = if self.is_compound() { SEMITONES } else { 0 };
        DIATONIC[self.letter_steps()] + octave
    }

    /// Returns the run of stacked thirds implied by an extension.
    ///
    /// For example, a `C11` chord implicitly includes the lower extended
    /// intervals of the `7`th and `9`th within its representation.
    pub fn extended_chain(self) -> &'static [Degree] {
        use self::Degree::*;

        static CHAIN: [Degree; 4] = [N7, N9, N11, N13];

        match self {
            N7  => &CHAIN[..1],
            N9  => &CHAIN[..2],
            N11 => &CHAIN[..3],
            N13 => &CHAIN[..4],
            _   => &[]
        }
    }
}

/// A degree with applied accidentals.
///
/// Interval names are totally ordered: by the number of semitones they span,
/// then by degree, so that `#4` sorts before `b5` and `7` before `b9`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IntervalName {
    pub degree: Degree,
    pub accidentals: Accidentals,
}

impl IntervalName {
    pub const fn new(degree: Degree, accidentals: Accidentals) -> IntervalName {
        IntervalName { degree, accidentals }
    }

    pub const fn natural(degree: Degree) -> IntervalName {
        IntervalName::new(degree, 0)
    }

    pub fn is_natural(&self) -> bool {
        self.accidentals == 0
    }

    /// Semitones spanned by the interval, which may exceed an octave.
    pub fn semitones(&self) -> i32 {
        self.degree.natural_semitones() + self.accidentals
    }

    pub fn pitch_class(&self) -> i32 {
        self.semitones().rem_euclid(SEMITONES)
    }

    fn sort_key(&self) -> (i32, u8) {
        (self.semitones(), self.degree.number())
    }
}

impl Ord for IntervalName {
    fn cmp(&self, other: &IntervalName) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for IntervalName {
    fn partial_cmp(&self, other: &IntervalName) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for IntervalName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        note::write_accidentals(f, self.accidentals)?;
        write!(f, "{}", self.degree.number())
    }
}

impl FromStr for IntervalName {
    type Err = Error;

    fn from_str(s: &str) -> Result<IntervalName> {
        parser::parse_interval_name(s)
    }
}

impl TryFrom<String> for IntervalName {
    type Error = Error;

    fn try_from(value: String) -> Result<IntervalName> {
        value.parse()
    }
}

impl From<IntervalName> for String {
    fn from(value: IntervalName) -> String {
        value.to_string()
    }
}

/// Parse a whitespace or comma separated list of interval names.
pub fn parse_interval_names(text: &str) -> Result<Vec<IntervalName>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|name| !name.is_empty())
        .map(str::parse)
        .collect()
}

/// The distance between two notes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalData {
    /// Semitones in `0..12`.
    pub absolute: i32,
    /// Spelled interval respecting the letters of both notes.
    pub relative: IntervalName,
}

/// Describe the interval from `lower` up to `higher`.
///
/// The letter distance gives the degree; the deviation from the major scale
/// of `lower` gives the accidentals. Enharmonic spellings therefore differ
/// by name but not by value: `C -> F#` is `#4`, `C -> Gb` is `b5`.
pub fn calculate_interval(lower: NoteName, higher: NoteName) -> IntervalData {
    let steps = (higher.letter.index() as i32 - lower.letter.index() as i32)
        .rem_euclid(LETTER_COUNT as i32) as usize;
    let expected = spelling::spell(lower, &DIATONIC)[steps];
    let accidentals = higher.accidentals - expected.accidentals;

    IntervalData {
        absolute: (DIATONIC[steps] + accidentals).rem_euclid(SEMITONES),
        relative: IntervalName::new(Degree::SIMPLE[steps], accidentals),
    }
}

/// Sort interval names into ascending order.
///
/// Duplicates are kept.
pub fn sort_interval_names<I>(names: I) -> Vec<IntervalName>
    where I: IntoIterator<Item = IntervalName>
{
    let mut names: Vec<_> = names.into_iter().collect();
    names.sort();
    names
}

/// Names used for integer-only input, one per semitone.
pub fn interval_names_from_semitones(structure: &[i32]) -> Vec<IntervalName> {
    use self::Degree::*;

    const NAMES: [IntervalName; 12] = [
        IntervalName::natural(N1),
        IntervalName::new(N2, -1),
        IntervalName::natural(N2),
        IntervalName::new(N3, -1),
        IntervalName::natural(N3),
        IntervalName::natural(N4),
        IntervalName::new(N5, -1),
        IntervalName::natural(N5),
        IntervalName::new(N5, 1),
        IntervalName::natural(N6),
        IntervalName::new(N7, -1),
        IntervalName::natural(N7),
    ];

    structure
        .iter()
        .map(|semitones| NAMES[semitones.rem_euclid(SEMITONES) as usize])
        .collect()
}

/// Name the steps between successive degrees of a scale, closing at the
/// octave.
///
/// ```
/// use tetrachord::interval::step_formula;
///
/// let formula = step_formula(&[0, 3, 5, 6, 7, 10]).unwrap();
/// assert_eq!(formula, ["hemiolion", "tone", "semitone", "semitone", "hemiolion", "tone"]);
/// ```
pub fn step_formula(structure: &[i32]) -> Result<Vec<&'static str>> {
    const STEPS: [&str; 12] = [
        "semitone",
        "tone",
        "hemiolion",
        "ditone",
        "diatessaron",
        "tritone",
        "diapente",
        "diapente + semitone",
        "diapente + tone",
        "diapente + hemiolion",
        "diapente + ditone",
        "diapason",
    ];

    let mut sorted = structure.to_vec();
    sorted.sort_unstable();
    sorted.push(SEMITONES);

    let mut previous = 0;
    let mut formula = Vec::with_capacity(sorted.len());
    for value in sorted.into_iter().filter(|&value| value > 0) {
        let step = value - previous;
        previous = value;
        if !(1..=SEMITONES).contains(&step) {
            return Err(Error::Argument(format!(
                "step of {} semitones in {:?} cannot be named", step, structure
            )));
        }
        formula.push(STEPS[step as usize - 1]);
    }
    Ok(formula)
}

/// Extend a scale to two octaves.
pub fn double_octave(structure: &[i32]) -> Vec<i32> {
    structure
        .iter()
        .copied()
        .chain(structure.iter().map(|semitones| semitones + SEMITONES))
        .collect()
}
