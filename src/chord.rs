//! Chord symbols: decoding a symbol into its intervals and naming a set of
//! intervals.
//!
//! These can be generated manually, but often one would want to decode a
//! symbol such as `F#mmaj9(#11)/C#` into its intervals.
//!
//! ```
//! use tetrachord::chord::{decode_chord_symbol, encode_chord_symbol, ChordStyle};
//! use tetrachord::interval::parse_interval_names;
//!
//! let names = decode_chord_symbol("Ebm7b5").unwrap();
//! assert_eq!(names, parse_interval_names("1 b3 b5 b7").unwrap());
//!
//! let suffix = encode_chord_symbol(&names, &ChordStyle::default());
//! assert_eq!(suffix, "min7b5");
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::convert;
use crate::error::{Error, Result};
use crate::interval::{calculate_interval, Degree, IntervalName};
use crate::note::NoteName;
use crate::parser::{self, ChordSymbolParts, Extension, Modification};

/// The triad quality named right after the root.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Quality {
    Major,
    Minor,
    Diminished,
    Augmented,
    HalfDiminished,
}

/// The root or bass of a chord, named alphabetically or as a Roman numeral
/// degree of the key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChordRoot {
    Alphabetic(NoteName),
    Roman(IntervalName),
}

pub const MAJOR_SYMBOLS: [&str; 4] = ["maj", "Maj", "M", "Δ"];
pub const MINOR_SYMBOLS: [&str; 3] = ["min", "m", "-"];
pub const DIMINISHED_SYMBOLS: [&str; 3] = ["dim", "o", "°"];

/// Every quality symbol, longest spellings first.
pub const QUALITY_SYMBOLS: [(&str, Quality); 13] = [
    ("maj", Quality::Major),
    ("Maj", Quality::Major),
    ("M", Quality::Major),
    ("Δ", Quality::Major),
    ("min", Quality::Minor),
    ("m", Quality::Minor),
    ("-", Quality::Minor),
    ("dim", Quality::Diminished),
    ("o", Quality::Diminished),
    ("°", Quality::Diminished),
    ("aug", Quality::Augmented),
    ("+", Quality::Augmented),
    ("ø", Quality::HalfDiminished),
];

const ROOT: IntervalName = IntervalName::natural(Degree::N1);
const THIRD: IntervalName = IntervalName::natural(Degree::N3);
const MINOR_THIRD: IntervalName = IntervalName::new(Degree::N3, -1);
const FIFTH: IntervalName = IntervalName::natural(Degree::N5);
const FLAT_FIFTH: IntervalName = IntervalName::new(Degree::N5, -1);
const SHARP_FIFTH: IntervalName = IntervalName::new(Degree::N5, 1);
const SIXTH: IntervalName = IntervalName::natural(Degree::N6);
const SEVENTH: IntervalName = IntervalName::natural(Degree::N7);
const MINOR_SEVENTH: IntervalName = IntervalName::new(Degree::N7, -1);
const DIMINISHED_SEVENTH: IntervalName = IntervalName::new(Degree::N7, -2);
const SUSPENDED_FOURTH: IntervalName = IntervalName::natural(Degree::N4);

const ALTERED_FIFTHS: [IntervalName; 4] = [
    FLAT_FIFTH,
    SHARP_FIFTH,
    IntervalName::new(Degree::N5, -2),
    IntervalName::new(Degree::N5, 2),
];

/// Intervals that can stand in for a missing third, in order of preference.
const SUSPENSIONS: [IntervalName; 8] = [
    IntervalName::new(Degree::N3, 1),
    IntervalName::new(Degree::N2, 1),
    IntervalName::natural(Degree::N2),
    IntervalName::new(Degree::N2, -1),
    IntervalName::new(Degree::N3, -2),
    IntervalName::new(Degree::N4, 1),
    IntervalName::new(Degree::N4, -1),
    IntervalName::natural(Degree::N4),
];

/// The symbols used when naming a chord.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChordStyle {
    pub use_slash: bool,
    pub major_symbol: String,
    pub minor_symbol: String,
    pub diminished_symbol: String,
}

impl Default for ChordStyle {
    fn default() -> ChordStyle {
        ChordStyle {
            use_slash: false,
            major_symbol: MAJOR_SYMBOLS[0].to_string(),
            minor_symbol: MINOR_SYMBOLS[0].to_string(),
            diminished_symbol: DIMINISHED_SYMBOLS[0].to_string(),
        }
    }
}

impl ChordStyle {
    /// Load a style from TOML, missing keys keeping their defaults.
    ///
    /// ```
    /// use tetrachord::chord::ChordStyle;
    ///
    /// let style = ChordStyle::from_toml("minor_symbol = \"-\"").unwrap();
    /// assert_eq!(style.minor_symbol, "-");
    /// assert_eq!(style.major_symbol, "maj");
    /// ```
    pub fn from_toml(text: &str) -> Result<ChordStyle> {
        let style: ChordStyle = toml::from_str(text).map_err(|err| Error::Style(err.to_string()))?;
        style.validate()?;
        debug!(?style, "loaded chord style");
        Ok(style)
    }

    /// Check every symbol is one the decoder reads back.
    pub fn validate(&self) -> Result<()> {
        let checks: [(&str, &String, &[&str]); 3] = [
            ("major", &self.major_symbol, &MAJOR_SYMBOLS),
            ("minor", &self.minor_symbol, &MINOR_SYMBOLS),
            ("diminished", &self.diminished_symbol, &DIMINISHED_SYMBOLS),
        ];

        for (kind, symbol, allowed) in checks.iter() {
            if !allowed.contains(&symbol.as_str()) {
                return Err(Error::Style(format!(
                    "{:?} is not a {} symbol, expected one of {:?}", symbol, kind, allowed
                )));
            }
        }
        Ok(())
    }
}

/// A chord with its notes spelled out.
///
/// The note names, interval names and interval structure are index aligned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordData {
    pub chord_symbol: String,
    pub note_names: Vec<String>,
    pub interval_names: Vec<IntervalName>,
    pub interval_structure: Vec<i32>,
}

/// The stacked intervals implied by an extension such as `9`, with the given
/// seventh.
fn extension_chain(degree: Degree, seventh: i32) -> impl Iterator<Item = IntervalName> {
    degree.extended_chain().iter().map(move |&degree| match degree {
        Degree::N7 => IntervalName::new(Degree::N7, seventh),
        _ => IntervalName::natural(degree),
    })
}

fn decode_parts(text: &str) -> Result<(ChordSymbolParts, Vec<IntervalName>)> {
    let parts = parser::parse_chord_symbol(text)?;
    trace!(?parts, "chord symbol slots");

    let mut names: BTreeSet<IntervalName> = [ROOT, FIFTH].iter().copied().collect();
    let mut extension = parts.extension;

    // A plain extension after a quality takes the quality's seventh.
    let mut take_plain_extension = |names: &mut BTreeSet<IntervalName>, seventh: i32| {
        if let Some(Extension { marker: None, degree }) = extension {
            names.extend(extension_chain(degree, seventh));
            extension = None;
        }
    };

    match parts.quality.map(|(quality, _)| quality) {
        None => {
            names.insert(THIRD);
            take_plain_extension(&mut names, -1);
        }
        Some(Quality::Major) => {
            names.insert(THIRD);
            take_plain_extension(&mut names, 0);
        }
        Some(Quality::Minor) => {
            names.insert(MINOR_THIRD);
        }
        Some(Quality::Diminished) => {
            names.remove(&FIFTH);
            names.extend([MINOR_THIRD, FLAT_FIFTH]);
            take_plain_extension(&mut names, -2);
        }
        Some(Quality::Augmented) => {
            names.remove(&FIFTH);
            names.extend([THIRD, SHARP_FIFTH]);
        }
        Some(Quality::HalfDiminished) => {
            names.remove(&FIFTH);
            names.extend([MINOR_THIRD, FLAT_FIFTH]);
        }
    }

    if let Some(Extension { marker, degree }) = extension {
        let seventh = if marker.is_some() { 0 } else { -1 };
        names.extend(extension_chain(degree, seventh));
    }

    let mut removals = Vec::new();
    for modification in &parts.modifications {
        match *modification {
            Modification::Sus(interval) => {
                names.insert(interval.unwrap_or(SUSPENDED_FOURTH));
                removals.extend([THIRD, MINOR_THIRD]);
            }
            Modification::Add(interval) => {
                names.insert(interval);
            }
            Modification::Omit(interval) => {
                removals.push(interval);
            }
            Modification::Augment => {
                names.remove(&FIFTH);
                names.insert(SHARP_FIFTH);
            }
            Modification::Interval(interval) => {
                if interval.degree == Degree::N5 && !interval.is_natural() {
                    names.remove(&FIFTH);
                }
                names.insert(interval);
            }
        }
    }
    for removal in &removals {
        names.remove(removal);
    }

    let mut names: Vec<IntervalName> = names.into_iter().collect();
    if let Some(bass) = slash_interval(text, &parts)? {
        match names.iter().position(|&name| name == bass) {
            Some(index) => names.rotate_left(index),
            None => names.insert(0, bass),
        }
    }

    Ok((parts, names))
}

/// The interval from the root up to the slash bass, if there is one.
///
/// Only alphabetic chords take a bass note.
fn slash_interval(text: &str, parts: &ChordSymbolParts) -> Result<Option<IntervalName>> {
    match (parts.root, parts.slash) {
        (_, None) => Ok(None),
        (ChordRoot::Alphabetic(root), Some(ChordRoot::Alphabetic(bass))) => {
            Ok(Some(calculate_interval(root, bass).relative))
        }
        _ => Err(Error::SlashNotation(text.to_string())),
    }
}

/// Decode a chord symbol into its interval names.
///
/// Without a slash the names are sorted. A slash bass found in the chord is
/// rotated to the front; any other bass is added below the chord.
///
/// ```
/// use tetrachord::chord::decode_chord_symbol;
/// use tetrachord::interval::parse_interval_names;
///
/// let names = decode_chord_symbol("Amin7/G").unwrap();
/// assert_eq!(names, parse_interval_names("b7 1 b3 5").unwrap());
/// ```
pub fn decode_chord_symbol(text: &str) -> Result<Vec<IntervalName>> {
    decode_parts(text).map(|(_, names)| names)
}

/// The slots of an encoded chord suffix, in output order.
#[derive(Debug, Default)]
struct Suffix {
    third: String,
    primary: String,
    secondary: String,
    sus: String,
    no3: String,
    no5: String,
    alt5: String,
    alt7: String,
    extensions: String,
    additions: String,
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let slots = [
            &self.third,
            &self.primary,
            &self.secondary,
            &self.sus,
            &self.no3,
            &self.no5,
            &self.alt5,
            &self.alt7,
            &self.extensions,
            &self.additions,
        ];
        for slot in slots.iter() {
            f.write_str(slot)?;
        }
        Ok(())
    }
}

/// Name a set of intervals as a chord suffix, e.g. `[1, b3, b5, bb7]` is
/// `dim7`.
///
/// The root is not written; prefix the root note or numeral to get a full
/// symbol. Decoding the result gives back the sorted input.
pub fn encode_chord_symbol(names: &[IntervalName], style: &ChordStyle) -> String {
    let input: BTreeSet<IntervalName> = names.iter().copied().collect();
    let mut pending = input.clone();
    pending.remove(&ROOT);

    let mut suffix = Suffix::default();
    let mut additions: Vec<String> = Vec::new();
    let mut primary: Option<&str> = None;

    let diminished = [MINOR_THIRD, FLAT_FIFTH, DIMINISHED_SEVENTH]
        .iter()
        .all(|name| input.contains(name));
    let dominant = input.contains(&THIRD) && input.contains(&MINOR_SEVENTH);

    if diminished {
        suffix.third = style.diminished_symbol.clone();
        primary = Some("");
        for name in [MINOR_THIRD, FLAT_FIFTH, DIMINISHED_SEVENTH].iter() {
            pending.remove(name);
        }
    } else {
        if pending.remove(&DIMINISHED_SEVENTH) {
            suffix.alt7 = DIMINISHED_SEVENTH.to_string();
        }
        if let Some(fifth) = ALTERED_FIFTHS.iter().find(|&name| input.contains(name)) {
            suffix.alt5 = fifth.to_string();
            pending.remove(fifth);
        } else if !pending.remove(&FIFTH) {
            suffix.no5 = "no5".to_string();
        }
    }

    if dominant {
        primary = Some("");
        pending.remove(&THIRD);
        pending.remove(&MINOR_SEVENTH);
    }

    match [THIRD, MINOR_THIRD].iter().find(|&name| input.contains(name)) {
        Some(_) if diminished || dominant => {}
        Some(&third) => {
            if third == THIRD {
                suffix.third = style.major_symbol.clone();
                if pending.remove(&SEVENTH) {
                    primary = Some("");
                }
            } else {
                suffix.third = style.minor_symbol.clone();
                if pending.remove(&SEVENTH) {
                    primary = Some(style.major_symbol.as_str());
                } else if pending.remove(&MINOR_SEVENTH) {
                    primary = Some("");
                }
            }
            pending.remove(&third);
        }
        None => {
            let mut candidates = SUSPENSIONS.iter().filter(|&name| input.contains(name));
            match candidates.next() {
                Some(sus) => {
                    suffix.sus = format!("sus{}", sus);
                    pending.remove(sus);
                    for extra in candidates {
                        additions.push(format!("add{}", extra));
                        pending.remove(extra);
                    }
                    if pending.remove(&SEVENTH) {
                        primary = Some(style.major_symbol.as_str());
                    } else if pending.remove(&MINOR_SEVENTH) {
                        primary = Some("");
                    }
                }
                None => suffix.no3 = "no3".to_string(),
            }
        }
    }

    if let Some(marker) = primary {
        // The chain of stacked thirds only collapses while it is unbroken.
        let mut largest = Degree::N7;
        let mut unbroken = true;
        for &degree in [Degree::N9, Degree::N11, Degree::N13].iter() {
            if pending.remove(&IntervalName::natural(degree)) {
                if unbroken {
                    largest = degree;
                } else {
                    additions.push(format!("add{}", degree.number()));
                }
            } else {
                unbroken = false;
            }
        }
        suffix.primary = format!("{}{}", marker, largest.number());
    }

    if pending.remove(&SIXTH) {
        if primary.is_some() {
            additions.push(format!("add{}", SIXTH));
        } else {
            suffix.secondary = SIXTH.to_string();
        }
    }

    let naturals: Vec<IntervalName> = pending.iter().copied().filter(IntervalName::is_natural).collect();
    for name in naturals {
        additions.push(format!("add{}", name));
        pending.remove(&name);
    }

    suffix.extensions = pending.iter().map(ToString::to_string).collect();
    suffix.additions = additions.concat();

    trace!(?suffix, "encoded chord suffix");
    suffix.to_string()
}

/// Decode a chord symbol and spell out its notes.
///
/// Alphabetic roots give note names; Roman numeral roots give the numeral
/// of each interval counted from the chord root.
///
/// ```
/// use tetrachord::chord::resolve_chord_symbol;
///
/// let chord = resolve_chord_symbol("Cmaj7/E").unwrap();
/// assert_eq!(chord.note_names, ["E", "G", "B", "C"]);
/// assert_eq!(chord.interval_structure, [0, 3, 7, 8]);
///
/// let chord = resolve_chord_symbol("iim7").unwrap();
/// assert_eq!(chord.note_names, ["I", "bIII", "V", "bVII"]);
/// ```
pub fn resolve_chord_symbol(text: &str) -> Result<ChordData> {
    let (parts, interval_names) = decode_parts(text)?;

    let (note_names, interval_structure) = match parts.root {
        ChordRoot::Alphabetic(root) => {
            let notes = convert::interval_names_to_note_names(root, &interval_names);
            let structure = convert::note_names_to_integers(&notes);
            (notes.iter().map(ToString::to_string).collect(), structure)
        }
        ChordRoot::Roman(_) => {
            let numerals = interval_names.iter().map(|&name| convert::interval_name_to_roman(name)).collect();
            (numerals, convert::interval_names_to_integers(&interval_names))
        }
    };

    Ok(ChordData {
        chord_symbol: text.to_string(),
        note_names,
        interval_names,
        interval_structure,
    })
}

/// Read the symbols a chord symbol was written with.
///
/// Symbols the chord does not use keep their defaults.
pub fn chord_style_of(text: &str) -> Result<ChordStyle> {
    let parts = parser::parse_chord_symbol(text)?;
    let mut style = ChordStyle { use_slash: parts.slash.is_some(), ..ChordStyle::default() };

    match parts.quality {
        Some((Quality::Major, symbol)) => style.major_symbol = symbol.to_string(),
        Some((Quality::Minor, symbol)) => style.minor_symbol = symbol.to_string(),
        Some((Quality::Diminished, symbol)) => style.diminished_symbol = symbol.to_string(),
        _ => {}
    }
    if let Some(Extension { marker: Some(symbol), .. }) = parts.extension {
        style.major_symbol = symbol.to_string();
    }
    Ok(style)
}
