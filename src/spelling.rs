//! Letter spelling of heptatonic scales.
//!
//! A heptatonic scale uses every letter exactly once, so spelling it from a
//! keynote is mechanical: letters advance one at a time and the accidentals
//! make up the difference to the requested pitch. Choosing the keynote's own
//! spelling is not, and `best_heptatonic_note_names` decides between the two
//! enharmonic names of an accidental keynote.

use std::collections::BTreeSet;
use std::convert::TryFrom;

use crate::error::{Error, Result};
use crate::interval::{Degree, IntervalName};
use crate::note::{NoteName, DIATONIC, LETTER_COUNT, SEMITONES};

/// Semitone offsets of a seven note scale.
pub type Heptatonic = [i32; LETTER_COUNT];

/// True for seven distinct offsets including the unison.
pub fn validate_heptatonic_structure(structure: &[i32]) -> bool {
    let unique: BTreeSet<_> = structure.iter().collect();
    structure.len() == LETTER_COUNT && unique.len() == LETTER_COUNT && unique.contains(&0)
}

/// True for seven names sounding seven different pitch classes.
pub fn validate_heptatonic_spelling(names: &[NoteName]) -> bool {
    let unique: BTreeSet<_> = names.iter().map(NoteName::pitch_class).collect();
    names.len() == LETTER_COUNT && unique.len() == LETTER_COUNT
}

pub(crate) fn as_heptatonic(structure: &[i32]) -> Result<&Heptatonic> {
    if !validate_heptatonic_structure(structure) {
        return Err(Error::Argument(format!(
            "{:?} is not a heptatonic interval structure", structure
        )));
    }
    <&Heptatonic>::try_from(structure)
        .map_err(|_| Error::Argument(format!("{:?} does not have seven degrees", structure)))
}

pub(crate) fn spell(keynote: NoteName, structure: &Heptatonic) -> [NoteName; LETTER_COUNT] {
    let root = keynote.letter.semitones() + keynote.accidentals;

    std::array::from_fn(|i| {
        let letter = keynote.letter.offset(i as i32);
        let octave = ((keynote.letter.index() + i) / LETTER_COUNT) as i32 * SEMITONES;
        NoteName::new(letter, root + structure[i] - (letter.semitones() + octave))
    })
}

/// Spell a heptatonic scale upwards from `keynote`, keeping its spelling.
///
/// ```
/// use tetrachord::note::NoteName;
/// use tetrachord::spelling::heptatonic_note_names;
///
/// let keynote: NoteName = "F#".parse().unwrap();
/// let names = heptatonic_note_names(keynote, &[0, 2, 3, 5, 7, 8, 10]).unwrap();
/// let names: Vec<_> = names.iter().map(ToString::to_string).collect();
/// assert_eq!(names, ["F#", "G#", "A", "B", "C#", "D", "E"]);
/// ```
pub fn heptatonic_note_names(keynote: NoteName, structure: &[i32]) -> Result<[NoteName; LETTER_COUNT]> {
    Ok(spell(keynote, as_heptatonic(structure)?))
}

/// Spell a heptatonic scale with the simplest choice of keynote.
///
/// Naturals keep their name. An accidental keynote is tried with both of
/// its enharmonic names and the spelling wins which has
///
/// 1. fewer accidentals in total, then
/// 2. does not mix sharps with flats, then
/// 3. is the sharp keynote.
pub fn best_heptatonic_note_names(keynote: NoteName, structure: &[i32]) -> Result<[NoteName; LETTER_COUNT]> {
    let structure = as_heptatonic(structure)?;
    let note = keynote.simplify();
    if note.accidentals == 0 {
        return Ok(spell(note, structure));
    }

    let (first, second) = note.split_binomial()?;
    let a = spell(first, structure);
    let b = spell(second, structure);

    let best = match total_accidentals(&a).cmp(&total_accidentals(&b)) {
        std::cmp::Ordering::Less => a,
        std::cmp::Ordering::Greater => b,
        std::cmp::Ordering::Equal => match (mixes_accidentals(&a), mixes_accidentals(&b)) {
            (true, false) => b,
            (false, true) => a,
            _ if first.is_sharp() => a,
            _ => b,
        },
    };
    Ok(best)
}

fn total_accidentals(names: &[NoteName]) -> u32 {
    names.iter().map(|name| name.accidentals.unsigned_abs()).sum()
}

fn mixes_accidentals(names: &[NoteName]) -> bool {
    names.iter().any(NoteName::is_sharp) && names.iter().any(NoteName::is_flat)
}

/// The interval name of scale `step`, counted in letters above the root.
///
/// Steps beyond the octave wrap onto the same offsets; steps `8`, `10` and
/// `12` are named as the extensions `9`, `11` and `13`.
pub(crate) fn step_interval_name(structure: &Heptatonic, step: usize) -> IntervalName {
    let index = step % LETTER_COUNT;
    let accidentals = structure[index].rem_euclid(SEMITONES) - DIATONIC[index];
    IntervalName::new(Degree::from_step(step), accidentals)
}

/// Interval names of the seven degrees of a heptatonic scale.
pub fn heptatonic_interval_names(structure: &[i32]) -> Result<[IntervalName; LETTER_COUNT]> {
    let structure = as_heptatonic(structure)?;
    Ok(std::array::from_fn(|step| step_interval_name(structure, step)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::interval::parse_interval_names;

    fn spelled(names: &[NoteName]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn best(keynote: &str, structure: &[i32]) -> Vec<String> {
        spelled(&best_heptatonic_note_names(keynote.parse().unwrap(), structure).unwrap())
    }

    #[test]
    fn spell_from_keynote() {
        let names = heptatonic_note_names("Cb".parse().unwrap(), &DIATONIC).unwrap();
        assert_eq!(spelled(&names), ["Cb", "Db", "Eb", "Fb", "Gb", "Ab", "Bb"]);

        let names = heptatonic_note_names("A".parse().unwrap(), &[0, 2, 4, 5, 7, 8, 11]).unwrap();
        assert_eq!(spelled(&names), ["A", "B", "C#", "D", "E", "F", "G#"]);
    }

    #[test]
    fn rejects_non_heptatonic() {
        assert!(heptatonic_note_names("C".parse().unwrap(), &[0, 2, 4]).is_err());
        assert!(heptatonic_note_names("C".parse().unwrap(), &[1, 2, 3, 4, 5, 6, 7]).is_err());
        assert!(best_heptatonic_note_names("C".parse().unwrap(), &[0, 2, 2, 5, 7, 9, 11]).is_err());
    }

    #[test]
    fn best_spelling_prefers_fewer_accidentals() {
        assert_eq!(best("C#", &DIATONIC), ["Db", "Eb", "F", "Gb", "Ab", "Bb", "C"]);
        assert_eq!(best("A#", &DIATONIC), ["Bb", "C", "D", "Eb", "F", "G", "A"]);
        assert_eq!(best("Gb", &[0, 2, 3, 5, 7, 8, 10]), ["F#", "G#", "A", "B", "C#", "D", "E"]);
        assert_eq!(best("E#", &DIATONIC), ["F", "G", "A", "Bb", "C", "D", "E"]);
    }

    #[test]
    fn best_spelling_avoids_mixed_accidentals() {
        // Both spellings carry seven accidentals, only C# mixes them.
        assert_eq!(
            best("C#", &[0, 2, 4, 6, 7, 8, 11]),
            ["Db", "Eb", "F", "G", "Ab", "Bbb", "Cbb"]
        );
    }

    #[test]
    fn best_spelling_ties_go_to_sharps() {
        assert_eq!(
            best("Db", &[0, 2, 4, 5, 7, 8, 11]),
            ["C#", "D#", "E#", "F#", "G#", "A", "B#"]
        );
    }

    #[test]
    fn interval_names() {
        let names = heptatonic_interval_names(&[0, 1, 3, 4, 6, 8, 10]).unwrap();
        assert_eq!(names.to_vec(), parse_interval_names("1 b2 b3 b4 b5 b6 b7").unwrap());

        let structure: &Heptatonic = &DIATONIC;
        assert_eq!(step_interval_name(structure, 8).to_string(), "9");
        assert_eq!(step_interval_name(structure, 7).to_string(), "1");
        assert_eq!(step_interval_name(&[0, 2, 3, 5, 7, 8, 10], 12).to_string(), "b13");
    }

    #[test]
    fn spelling_validation() {
        let names = heptatonic_note_names("D".parse().unwrap(), &DIATONIC).unwrap();
        assert!(validate_heptatonic_spelling(&names));

        let bad: Vec<NoteName> = ["C", "D", "E", "F", "G", "A", "B#"]
            .iter()
            .map(|name| name.parse().unwrap())
            .collect();
        assert!(!validate_heptatonic_spelling(&bad));
    }
}
