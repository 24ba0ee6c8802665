//! Chord scales: the chords built on every degree of a heptatonic scale, and
//! their inversions and drop voicings.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chord::{encode_chord_symbol, ChordData, ChordStyle};
use crate::error::{Error, Result};
use crate::interval::double_octave;
use crate::note::{decode_note_name, NoteName, LETTER_COUNT, SEMITONES};
use crate::resolve::resolve_heptatonic_scale;
use crate::scale::rotate_interval_structure;
use crate::spelling::{as_heptatonic, heptatonic_note_names, spell, step_interval_name};

/// Scale steps of a chord stacked in thirds.
const TERTIAL: [usize; LETTER_COUNT] = [0, 2, 4, 6, 8, 10, 12];

/// Build the chord on every degree of a scale from the scale steps in
/// `pattern`, which reach into the second octave.
fn chordify(keynote: NoteName, structure: &[i32], pattern: &[usize], style: &ChordStyle) -> Result<Vec<ChordData>> {
    let roots = heptatonic_note_names(keynote, structure)?;

    (0..LETTER_COUNT)
        .map(|degree| {
            let rotated = rotate_interval_structure(structure, degree);
            let modal = as_heptatonic(&rotated)?;
            let notes = spell(roots[degree], modal);
            let values = double_octave(modal);

            let interval_names: Vec<_> = pattern.iter().map(|&step| step_interval_name(modal, step)).collect();
            let symbol = encode_chord_symbol(&interval_names, style);

            Ok(ChordData {
                chord_symbol: format!("{}{}", roots[degree], symbol),
                note_names: pattern.iter().map(|&step| notes[step % LETTER_COUNT].to_string()).collect(),
                interval_structure: pattern.iter().map(|&step| values[step]).collect(),
                interval_names,
            })
        })
        .collect()
}

fn check_size(size: usize) -> Result<()> {
    if !(1..=LETTER_COUNT).contains(&size) {
        return Err(Error::Argument(format!(
            "chords are built from 1 to {} notes, not {}", LETTER_COUNT, size
        )));
    }
    Ok(())
}

/// The chords of `size` notes stacked in thirds on each degree of a
/// heptatonic scale.
///
/// ```
/// use tetrachord::chord::ChordStyle;
/// use tetrachord::chordify::chordify_heptatonic_tertial;
///
/// let keynote = "C".parse().unwrap();
/// let chords = chordify_heptatonic_tertial(keynote, &[0, 2, 4, 5, 7, 9, 11], 4, &ChordStyle::default()).unwrap();
/// let symbols: Vec<_> = chords.iter().map(|chord| chord.chord_symbol.as_str()).collect();
/// assert_eq!(symbols, ["Cmaj7", "Dmin7", "Emin7", "Fmaj7", "G7", "Amin7", "Bmin7b5"]);
/// ```
pub fn chordify_heptatonic_tertial(
    keynote: NoteName,
    structure: &[i32],
    size: usize,
    style: &ChordStyle,
) -> Result<Vec<ChordData>> {
    check_size(size)?;
    chordify(keynote, structure, &TERTIAL[..size], style)
}

/// Like `chordify_heptatonic_tertial`, with the third of every chord
/// replaced by the second (`sus` 2) or the fourth (`sus` 4).
pub fn chordify_heptatonic_sus(
    keynote: NoteName,
    structure: &[i32],
    size: usize,
    sus: u8,
    style: &ChordStyle,
) -> Result<Vec<ChordData>> {
    check_size(size)?;

    let mut pattern = TERTIAL;
    pattern[1] = match sus {
        2 => 1,
        4 => 3,
        _ => return Err(Error::Argument(format!("cannot suspend to {}, only 2 or 4", sus))),
    };
    chordify(keynote, structure, &pattern[..size], style)
}

fn rotated<T: Clone>(items: &[T], index: usize) -> Vec<T> {
    let mut items = items.to_vec();
    if !items.is_empty() {
        let len = items.len();
        items.rotate_left(index % len);
    }
    items
}

/// Invert a chord so that the note at `index` is in the bass.
///
/// The interval structure is measured from the new bass and every note sits
/// above the one before it.
pub fn rotate_chord(chord: &ChordData, index: usize) -> ChordData {
    let values = rotated(&chord.interval_structure, index);
    let bass = values.first().copied().unwrap_or(0);

    let mut previous = None;
    let interval_structure = values
        .iter()
        .map(|value| {
            let mut value = value - bass;
            if let Some(previous) = previous {
                while value <= previous {
                    value += SEMITONES;
                }
            }
            previous = Some(value);
            value
        })
        .collect();

    ChordData {
        chord_symbol: chord.chord_symbol.clone(),
        note_names: rotated(&chord.note_names, index),
        interval_names: rotated(&chord.interval_names, index),
        interval_structure,
    }
}

/// Move `item` to the end of `list`, returning whether it was there.
fn move_to_end<T: PartialEq + Clone>(list: &mut Vec<T>, item: &T) -> bool {
    match list.iter().position(|other| other == item) {
        Some(position) => {
            let item = list.remove(position);
            list.push(item);
            true
        }
        None => false,
    }
}

/// Raise the notes at `indices` an octave, keeping the bass.
///
/// Indices refer to the chord as given, not as it is being voiced. Index `0`
/// is the bass and cannot be raised; indices past the top are ignored.
///
/// ```
/// use tetrachord::chord::resolve_chord_symbol;
/// use tetrachord::chordify::apply_drop_voicing;
///
/// let chord = resolve_chord_symbol("Cmaj7").unwrap();
/// let drop2 = apply_drop_voicing(&chord, &[1]).unwrap();
/// assert_eq!(drop2.note_names, ["C", "G", "B", "E"]);
/// assert_eq!(drop2.interval_structure, [0, 7, 11, 16]);
/// ```
pub fn apply_drop_voicing(chord: &ChordData, indices: &[usize]) -> Result<ChordData> {
    let mut voiced = chord.clone();

    for &index in indices {
        if index == 0 {
            return Err(Error::Argument(format!(
                "the bass cannot be raised in a drop voicing, got {:?}", indices
            )));
        }

        if let Some(&value) = chord.interval_structure.get(index) {
            if move_to_end(&mut voiced.interval_structure, &value) {
                if let Some(last) = voiced.interval_structure.last_mut() {
                    *last += SEMITONES;
                }
            }
        }
        if let Some(name) = chord.note_names.get(index) {
            move_to_end(&mut voiced.note_names, name);
        }
        if let Some(name) = chord.interval_names.get(index) {
            move_to_end(&mut voiced.interval_names, name);
        }
    }
    Ok(voiced)
}

/// How the notes of a chord are spread above its bass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voicing {
    Close,
    Open,
    D2,
    D3,
    D23,
    D24,
}

impl Default for Voicing {
    fn default() -> Voicing {
        Voicing::Close
    }
}

impl Voicing {
    /// The indices `apply_drop_voicing` raises for a chord of `size` notes.
    ///
    /// Triads have no third or fourth note from the top to drop, so every
    /// drop voicing of a triad is the drop 2.
    pub fn drop_indices(self, size: usize) -> Vec<usize> {
        match self {
            Voicing::Close => vec![],
            Voicing::Open => (1..size).step_by(2).collect(),
            Voicing::D2 => vec![1],
            _ if size <= 3 => vec![1],
            Voicing::D3 => vec![1, 2],
            Voicing::D23 => vec![2],
            Voicing::D24 => vec![1, 3],
        }
    }
}

/// The interval the chords of a chord scale are stacked in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordStructureKind {
    Tertial,
    Sus2,
    Sus4,
}

impl Default for ChordStructureKind {
    fn default() -> ChordStructureKind {
        ChordStructureKind::Tertial
    }
}

/// A single chord taken from a heptatonic scale.
///
/// Every field has a default, so a request read from TOML only needs the
/// fields that differ from a root position C major triad.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeptatonicChordRequest {
    pub keynote: String,
    pub scale: String,
    pub mode: String,
    /// The scale degree of the chord root, from 1.
    pub degree: usize,
    pub size: usize,
    pub inversion: usize,
    pub voicing: Voicing,
    pub structure: ChordStructureKind,
    pub style: ChordStyle,
}

impl Default for HeptatonicChordRequest {
    fn default() -> HeptatonicChordRequest {
        HeptatonicChordRequest {
            keynote: "C".to_string(),
            scale: "diatonic".to_string(),
            mode: "ionian".to_string(),
            degree: 1,
            size: 3,
            inversion: 0,
            voicing: Voicing::default(),
            structure: ChordStructureKind::default(),
            style: ChordStyle::default(),
        }
    }
}

impl HeptatonicChordRequest {
    pub fn from_toml(text: &str) -> Result<HeptatonicChordRequest> {
        let request: HeptatonicChordRequest =
            toml::from_str(text).map_err(|err| Error::Argument(err.to_string()))?;
        request.style.validate()?;
        Ok(request)
    }
}

/// Build the chord a request describes.
///
/// With `style.use_slash` an inverted chord is written over its bass note.
///
/// ```
/// use tetrachord::chordify::{heptatonic_chord, HeptatonicChordRequest};
///
/// let request = HeptatonicChordRequest::from_toml(r#"
///     keynote = "Eb"
///     degree = 5
///     size = 4
///     inversion = 1
///     style = { use_slash = true }
/// "#).unwrap();
///
/// let chord = heptatonic_chord(&request).unwrap();
/// assert_eq!(chord.chord_symbol, "Bb7/D");
/// assert_eq!(chord.note_names, ["D", "F", "Ab", "Bb"]);
/// ```
pub fn heptatonic_chord(request: &HeptatonicChordRequest) -> Result<ChordData> {
    debug!(?request, "building heptatonic chord");

    if !(1..=LETTER_COUNT).contains(&request.degree) {
        return Err(Error::Argument(format!("scale degree must be 1 to 7, not {}", request.degree)));
    }
    if !(3..=LETTER_COUNT).contains(&request.size) {
        return Err(Error::Argument(format!("chord size must be 3 to 7, not {}", request.size)));
    }
    if request.inversion >= request.size {
        return Err(Error::Argument(format!(
            "a chord of {} notes has no inversion {}", request.size, request.inversion
        )));
    }

    let keynote = decode_note_name(request.keynote.trim())?;
    let mode = Some(request.mode.trim()).filter(|mode| !mode.is_empty());
    let structure = resolve_heptatonic_scale(&request.scale, mode)?;

    let style = &request.style;
    let chords = match request.structure {
        ChordStructureKind::Tertial => chordify_heptatonic_tertial(keynote, &structure, request.size, style)?,
        ChordStructureKind::Sus2 => chordify_heptatonic_sus(keynote, &structure, request.size, 2, style)?,
        ChordStructureKind::Sus4 => chordify_heptatonic_sus(keynote, &structure, request.size, 4, style)?,
    };

    let mut chord = chords[request.degree - 1].clone();
    if request.inversion > 0 {
        chord = rotate_chord(&chord, request.inversion);
        if style.use_slash {
            chord.chord_symbol = format!("{}/{}", chord.chord_symbol, chord.note_names[0]);
        }
    }

    let indices = request.voicing.drop_indices(request.size);
    if indices.is_empty() {
        Ok(chord)
    } else {
        apply_drop_voicing(&chord, &indices)
    }
}
