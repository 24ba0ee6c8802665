//! Conversions between note names, interval names, Roman numerals and
//! semitone offsets.

use crate::error::{Error, Result, Syntax};
use crate::interval::{calculate_interval, IntervalName};
use crate::note::{Letter, NoteName, DIATONIC, SEMITONES};
use crate::parser;
use crate::spelling;

const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Note names of the intervals above `root`.
///
/// Compound degrees land on the same letter as their simple degree, so the
/// `9` of `C` is `D`.
pub fn interval_names_to_note_names(root: NoteName, names: &[IntervalName]) -> Vec<NoteName> {
    let major = spelling::spell(root, &DIATONIC);

    names
        .iter()
        .map(|name| {
            let expected = major[name.degree.letter_steps()];
            NoteName::new(expected.letter, expected.accidentals + name.accidentals)
        })
        .collect()
}

/// Semitone offsets of a sequence of notes.
///
/// The first note is the unison and every note sounds above the one before
/// it, so `A E A A` gives `0 7 12 24`.
pub fn note_names_to_integers(names: &[NoteName]) -> Vec<i32> {
    let root = match names.first() {
        Some(root) => *root,
        None => return Vec::new(),
    };

    let mut values = Vec::with_capacity(names.len());
    let mut highest = 0;
    let mut octave = 0;
    values.push(0);

    for name in &names[1..] {
        let mut value = calculate_interval(root, *name).absolute + octave;
        if value <= highest {
            octave += SEMITONES;
            value += SEMITONES;
        }
        highest = value;
        values.push(value);
    }
    values
}

/// Semitone offsets of a sequence of intervals, read as notes above `C`.
///
/// The first interval is treated as the unison.
pub fn interval_names_to_integers(names: &[IntervalName]) -> Vec<i32> {
    note_names_to_integers(&interval_names_to_note_names(NoteName::natural(Letter::C), names))
}

/// Intervals of each note measured from the first.
pub fn note_names_to_interval_names(names: &[NoteName]) -> Vec<IntervalName> {
    match names.first() {
        Some(&root) => names
            .iter()
            .map(|&name| calculate_interval(root, name).relative)
            .collect(),
        None => Vec::new(),
    }
}

/// Write an interval with an upper case Roman numeral, e.g. `bVII`.
///
/// Extensions reduce to their simple degree.
pub fn interval_name_to_roman(name: IntervalName) -> String {
    let accidentals = name.to_string();
    let accidentals = accidentals.trim_end_matches(|c: char| c.is_ascii_digit());
    format!("{}{}", accidentals, NUMERALS[name.degree.letter_steps()])
}

/// Read an interval written with a Roman numeral of either case.
pub fn roman_to_interval_name(text: &str) -> Result<IntervalName> {
    parser::parse_roman_name(&text.to_lowercase())
        .map_err(|_| Error::format(Syntax::RomanNumeral, text))
}

const ROMAN_VALUES: [(&str, u32); 13] = [
    ("M", 1000), ("CM", 900), ("D", 500), ("CD", 400),
    ("C", 100), ("XC", 90), ("L", 50), ("XL", 40),
    ("X", 10), ("IX", 9), ("V", 5), ("IV", 4),
    ("I", 1),
];

/// Write a number between 1 and 3999 in Roman numerals.
///
/// ```
/// use tetrachord::convert::encode_roman_numeral;
///
/// assert_eq!(encode_roman_numeral(1449).unwrap(), "MCDXLIX");
/// assert!(encode_roman_numeral(4000).is_err());
/// ```
pub fn encode_roman_numeral(number: u32) -> Result<String> {
    if !(1..=3999).contains(&number) {
        return Err(Error::Argument(format!(
            "{} cannot be written in Roman numerals", number
        )));
    }

    let mut remaining = number;
    let mut numeral = String::new();
    for &(symbol, value) in ROMAN_VALUES.iter() {
        while remaining >= value {
            numeral.push_str(symbol);
            remaining -= value;
        }
    }
    Ok(numeral)
}

/// Read a Roman numeral in canonical form, in either case.
pub fn decode_roman_numeral(text: &str) -> Result<u32> {
    let upper = text.to_uppercase();

    let mut rest = upper.as_str();
    let mut number = 0;
    for &(symbol, value) in ROMAN_VALUES.iter() {
        while let Some(tail) = rest.strip_prefix(symbol) {
            number += value;
            rest = tail;
        }
    }

    // Reject leftovers and non-canonical forms such as `IIII` or `VX`.
    match encode_roman_numeral(number) {
        Ok(canonical) if rest.is_empty() && canonical == upper => Ok(number),
        _ => Err(Error::format(Syntax::RomanNumeral, text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::interval::parse_interval_names;

    fn notes(text: &str) -> Vec<NoteName> {
        text.split_whitespace().map(|name| name.parse().unwrap()).collect()
    }

    fn spelled(names: &[NoteName]) -> String {
        names.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn intervals_to_notes() {
        let names = parse_interval_names("1 b3 b5 bb7 b9 #11").unwrap();
        assert_eq!(
            spelled(&interval_names_to_note_names("F#".parse().unwrap(), &names)),
            "F# A C Eb G B#"
        );

        let names = parse_interval_names("b7 1 b3 5").unwrap();
        assert_eq!(
            spelled(&interval_names_to_note_names("A".parse().unwrap(), &names)),
            "G A C E"
        );
    }

    #[test]
    fn notes_ascend() {
        assert_eq!(note_names_to_integers(&notes("A E A A")), vec![0, 7, 12, 24]);
        assert_eq!(note_names_to_integers(&notes("E G C")), vec![0, 3, 8]);
        assert_eq!(note_names_to_integers(&notes("C Cb")), vec![0, 11]);
        assert!(note_names_to_integers(&[]).is_empty());
    }

    #[test]
    fn intervals_to_integers() {
        let names = parse_interval_names("1 3 5 7 9 #11 13").unwrap();
        assert_eq!(interval_names_to_integers(&names), vec![0, 4, 7, 11, 14, 18, 21]);

        let names = parse_interval_names("3 5 1").unwrap();
        assert_eq!(interval_names_to_integers(&names), vec![0, 3, 8]);
    }

    #[test]
    fn notes_to_intervals() {
        assert_eq!(
            note_names_to_interval_names(&notes("D F# A C")),
            parse_interval_names("1 3 5 b7").unwrap()
        );
    }

    #[test]
    fn roman_intervals() {
        assert_eq!(interval_name_to_roman("b7".parse().unwrap()), "bVII");
        assert_eq!(interval_name_to_roman("#11".parse().unwrap()), "#IV");
        assert_eq!(interval_name_to_roman("1".parse().unwrap()), "I");
        assert_eq!(roman_to_interval_name("bIII"), Ok("b3".parse().unwrap()));
        assert_eq!(roman_to_interval_name("#iv"), Ok("#4".parse().unwrap()));
        assert!(roman_to_interval_name("IIX").is_err());
    }

    #[test]
    fn roman_numbers() {
        assert_eq!(encode_roman_numeral(1318).unwrap(), "MCCCXVIII");
        assert_eq!(encode_roman_numeral(959).unwrap(), "CMLIX");
        assert_eq!(encode_roman_numeral(3999).unwrap(), "MMMCMXCIX");
        assert!(encode_roman_numeral(0).is_err());

        assert_eq!(decode_roman_numeral("CCLXIII"), Ok(263));
        assert_eq!(decode_roman_numeral("mcdxlix"), Ok(1449));
        assert!(decode_roman_numeral("IIII").is_err());
        assert!(decode_roman_numeral("VX").is_err());
        assert!(decode_roman_numeral("").is_err());
    }

    #[test]
    fn roman_numbers_round_trip() {
        for number in 1..=3999 {
            let numeral = encode_roman_numeral(number).unwrap();
            assert_eq!(decode_roman_numeral(&numeral), Ok(number));
        }
    }
}
