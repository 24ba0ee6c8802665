//! Canonical scales, their modes and rotation between modes.
//!
//! Every named scale in this crate is a rotation of one of the canonical
//! base patterns below. Heptatonic rotations are named by `Mode`; other
//! families are rotated by a plain count.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::note::{DIATONIC, SEMITONES};

/// The number of notes a scale has per octave.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Heptatonic,
    Hexatonic,
    Pentatonic,
    Octatonic,
}

/// A canonical scale pattern.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Diatonic,
    Altered,
    Hemitonic,
    Hemiolic,
    Diminished,
    Augmented,
    Harmonic,
    Biseptimal,
    Paleochromatic,
    Enigmatic,
    DoubleHarmonic,
    Neapolitan,
    Hungarian,
    Persian,
    Romanian,
    Istrian,
    WholeTone,
    Blues,
    MajorBlues,
    MinorPentatonic,
    PelogPentatonic,
    In,
    Insen,
    Iwato,
    DominantPentatonic,
    #[serde(rename = "maj_6_diminished")]
    Maj6Diminished,
    #[serde(rename = "min_6_diminished")]
    Min6Diminished,
    #[serde(rename = "dom_7_diminished")]
    Dom7Diminished,
    #[serde(rename = "dom_7_flat_5_diminished")]
    Dom7Flat5Diminished,
}

impl Scale {
    /// Heptatonic scales in lookup priority order.
    pub const HEPTATONIC: [Scale; 15] = [
        Scale::Diatonic,
        Scale::Altered,
        Scale::Hemitonic,
        Scale::Hemiolic,
        Scale::Diminished,
        Scale::Augmented,
        Scale::Harmonic,
        Scale::Biseptimal,
        Scale::Paleochromatic,
        Scale::Enigmatic,
        Scale::DoubleHarmonic,
        Scale::Neapolitan,
        Scale::Hungarian,
        Scale::Persian,
        Scale::Romanian,
    ];

    /// Every scale in lookup priority order.
    pub const ALL: [Scale; 29] = [
        Scale::Diatonic,
        Scale::Altered,
        Scale::Hemitonic,
        Scale::Hemiolic,
        Scale::Diminished,
        Scale::Augmented,
        Scale::Harmonic,
        Scale::Biseptimal,
        Scale::Paleochromatic,
        Scale::Enigmatic,
        Scale::DoubleHarmonic,
        Scale::Neapolitan,
        Scale::Hungarian,
        Scale::Persian,
        Scale::Romanian,
        Scale::Istrian,
        Scale::WholeTone,
        Scale::Blues,
        Scale::MajorBlues,
        Scale::MinorPentatonic,
        Scale::PelogPentatonic,
        Scale::In,
        Scale::Insen,
        Scale::Iwato,
        Scale::DominantPentatonic,
        Scale::Maj6Diminished,
        Scale::Min6Diminished,
        Scale::Dom7Diminished,
        Scale::Dom7Flat5Diminished,
    ];

    pub fn name(self) -> &'static str {
        use self::Scale::*;

        match self {
            Diatonic => "diatonic",
            Altered => "altered",
            Hemitonic => "hemitonic",
            Hemiolic => "hemiolic",
            Diminished => "diminished",
            Augmented => "augmented",
            Harmonic => "harmonic",
            Biseptimal => "biseptimal",
            Paleochromatic => "paleochromatic",
            Enigmatic => "enigmatic",
            DoubleHarmonic => "double_harmonic",
            Neapolitan => "neapolitan",
            Hungarian => "hungarian",
            Persian => "persian",
            Romanian => "romanian",
            Istrian => "istrian",
            WholeTone => "whole_tone",
            Blues => "blues",
            MajorBlues => "major_blues",
            MinorPentatonic => "minor_pentatonic",
            PelogPentatonic => "pelog_pentatonic",
            In => "in",
            Insen => "insen",
            Iwato => "iwato",
            DominantPentatonic => "dominant_pentatonic",
            Maj6Diminished => "maj_6_diminished",
            Min6Diminished => "min_6_diminished",
            Dom7Diminished => "dom_7_diminished",
            Dom7Flat5Diminished => "dom_7_flat_5_diminished",
        }
    }

    /// Look up a scale by its canonical snake case name.
    pub fn from_name(name: &str) -> Option<Scale> {
        Scale::ALL.iter().copied().find(|scale| scale.name() == name)
    }

    /// Semitone offsets of the unrotated pattern.
    pub fn base(self) -> &'static [i32] {
        use self::Scale::*;

        match self {
            Diatonic => &DIATONIC,
            Altered => &[0, 1, 3, 4, 6, 8, 10],
            Hemitonic => &[0, 1, 4, 5, 7, 9, 11],
            Hemiolic => &[0, 3, 4, 5, 7, 9, 11],
            Diminished => &[0, 2, 4, 5, 6, 9, 11],
            Augmented => &[0, 2, 4, 5, 8, 9, 11],
            Harmonic => &[0, 2, 4, 5, 7, 8, 11],
            Biseptimal => &[0, 2, 4, 5, 7, 10, 11],
            Paleochromatic => &[0, 1, 4, 5, 6, 9, 11],
            Enigmatic => &[0, 1, 4, 6, 8, 10, 11],
            DoubleHarmonic => &[0, 1, 4, 5, 7, 8, 11],
            Neapolitan => &[0, 1, 3, 5, 7, 9, 11],
            Hungarian => &[0, 3, 4, 6, 7, 9, 10],
            Persian => &[0, 1, 4, 5, 6, 8, 11],
            Romanian => &[0, 1, 4, 6, 7, 9, 10],
            Istrian => &[0, 1, 3, 4, 6, 7],
            WholeTone => &[0, 2, 4, 6, 8, 10],
            Blues => &[0, 3, 5, 6, 7, 10],
            MajorBlues => &[0, 2, 3, 4, 7, 9],
            MinorPentatonic => &[0, 3, 5, 7, 10],
            PelogPentatonic => &[0, 1, 3, 7, 8],
            In => &[0, 1, 5, 7, 8],
            Insen => &[0, 1, 5, 7, 10],
            Iwato => &[0, 1, 5, 6, 10],
            DominantPentatonic => &[0, 2, 4, 7, 10],
            Maj6Diminished => &[0, 2, 4, 5, 7, 8, 9, 11],
            Min6Diminished => &[0, 2, 3, 5, 7, 8, 9, 11],
            Dom7Diminished => &[0, 2, 4, 5, 7, 8, 10, 11],
            Dom7Flat5Diminished => &[0, 2, 4, 5, 6, 8, 10, 11],
        }
    }

    pub fn family(self) -> Family {
        match self.base().len() {
            5 => Family::Pentatonic,
            6 => Family::Hexatonic,
            8 => Family::Octatonic,
            _ => Family::Heptatonic,
        }
    }

    pub fn is_heptatonic(self) -> bool {
        self.family() == Family::Heptatonic
    }

    /// The pattern heard from its `rotation`-th degree.
    pub fn rotate(self, rotation: usize) -> Vec<i32> {
        rotate_interval_structure(self.base(), rotation)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rotations of a heptatonic scale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Ionian,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Aeolian,
        Mode::Locrian,
    ];

    pub fn from_rotation(rotation: usize) -> Mode {
        Mode::ALL[rotation % Mode::ALL.len()]
    }

    pub fn rotation(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        use self::Mode::*;

        match self {
            Ionian => "ionian",
            Dorian => "dorian",
            Phrygian => "phrygian",
            Lydian => "lydian",
            Mixolydian => "mixolydian",
            Aeolian => "aeolian",
            Locrian => "locrian",
        }
    }

    /// Look up a mode by its full lower case name.
    pub fn from_name(name: &str) -> Option<Mode> {
        Mode::ALL.iter().copied().find(|mode| mode.name() == name)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A canonical scale heard from one of its degrees.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScaleId {
    pub scale: Scale,
    pub rotation: usize,
}

impl ScaleId {
    /// The rotation wraps at the size of the scale.
    pub fn new(scale: Scale, rotation: usize) -> ScaleId {
        ScaleId { scale, rotation: rotation % scale.base().len() }
    }

    pub fn modal(scale: Scale, mode: Mode) -> ScaleId {
        ScaleId::new(scale, mode.rotation())
    }

    /// The heptatonic mode, if the scale has seven degrees.
    pub fn mode(&self) -> Option<Mode> {
        if self.scale.is_heptatonic() {
            Some(Mode::from_rotation(self.rotation))
        } else {
            None
        }
    }

    /// The mode name, or the rotation count for scales that are not
    /// heptatonic.
    pub fn mode_name(&self) -> String {
        match self.mode() {
            Some(mode) => mode.name().to_string(),
            None => self.rotation.to_string(),
        }
    }

    pub fn interval_structure(&self) -> Vec<i32> {
        self.scale.rotate(self.rotation)
    }
}

impl fmt::Display for ScaleId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.scale, self.mode_name())
    }
}

/// Rephrase a pattern from the perspective of the degree at `rotation`.
///
/// Degrees that wrap past the end move up an octave, so the result keeps
/// ascending from zero.
pub fn rotate_interval_structure(structure: &[i32], rotation: usize) -> Vec<i32> {
    let len = structure.len();
    if len == 0 {
        return Vec::new();
    }

    let rotation = rotation % len;
    let offset = structure[rotation];
    (0..len)
        .map(|i| {
            let octave = ((i + rotation) / len) as i32 * SEMITONES;
            structure[(i + rotation) % len] - offset + octave
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_modes() {
        assert_eq!(Scale::Diatonic.rotate(1), vec![0, 2, 3, 5, 7, 9, 10]);
        assert_eq!(Scale::Diatonic.rotate(6), vec![0, 1, 3, 5, 6, 8, 10]);
        assert_eq!(Scale::Altered.rotate(1), vec![0, 2, 3, 5, 7, 9, 11]);
        assert_eq!(Scale::MinorPentatonic.rotate(1), vec![0, 2, 4, 7, 9]);
        assert_eq!(rotate_interval_structure(&[0, 4, 7], 2), vec![0, 5, 9]);
        assert_eq!(rotate_interval_structure(&[0, 4, 7], 3), vec![0, 4, 7]);
    }

    #[test]
    fn rotation_returns_home() {
        for scale in Scale::ALL.iter() {
            let len = scale.base().len();
            let there = rotate_interval_structure(scale.base(), 1);
            let back = rotate_interval_structure(&there, len - 1);
            assert_eq!(back, scale.base(), "{}", scale);
        }
    }

    #[test]
    fn families() {
        assert_eq!(Scale::Romanian.family(), Family::Heptatonic);
        assert_eq!(Scale::Blues.family(), Family::Hexatonic);
        assert_eq!(Scale::Iwato.family(), Family::Pentatonic);
        assert_eq!(Scale::Dom7Diminished.family(), Family::Octatonic);
        assert!(Scale::HEPTATONIC.iter().all(|scale| scale.is_heptatonic()));
    }

    #[test]
    fn names_round_trip() {
        for scale in Scale::ALL.iter() {
            assert_eq!(Scale::from_name(scale.name()), Some(*scale));
        }
        assert_eq!(Scale::from_name("Diatonic"), None);
        assert_eq!(Mode::from_name("lydian"), Some(Mode::Lydian));
    }

    #[test]
    fn scale_ids() {
        let id = ScaleId::modal(Scale::Altered, Mode::Dorian);
        assert_eq!(id.to_string(), "altered dorian");
        assert_eq!(id.interval_structure(), vec![0, 2, 3, 5, 7, 9, 11]);

        let id = ScaleId::new(Scale::MinorPentatonic, 6);
        assert_eq!(id.rotation, 1);
        assert_eq!(id.mode(), None);
        assert_eq!(id.to_string(), "minor_pentatonic 1");
    }
}
