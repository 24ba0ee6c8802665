use tetrachord::chord::{decode_chord_symbol, encode_chord_symbol, resolve_chord_symbol, ChordStyle};
use tetrachord::chordify::{
    chordify_heptatonic_sus, chordify_heptatonic_tertial, heptatonic_chord, rotate_chord,
    ChordStructureKind, HeptatonicChordRequest,
};
use tetrachord::interval::{parse_interval_names, sort_interval_names, IntervalName};
use tetrachord::note::NoteName;
use tetrachord::scale::Scale;
use tetrachord::Error;

fn names(text: &str) -> Vec<IntervalName> {
    parse_interval_names(text).unwrap()
}

#[test]
fn decode_examples() {
    assert_eq!(decode_chord_symbol("Cmaj7").unwrap(), names("1 3 5 7"));
    assert_eq!(decode_chord_symbol("Ebm7b5").unwrap(), names("1 b3 b5 b7"));
    assert_eq!(decode_chord_symbol("Amin7/G").unwrap(), names("b7 1 b3 5"));
    assert_eq!(decode_chord_symbol("G/C").unwrap(), names("4 1 3 5"));
    assert_eq!(decode_chord_symbol("F#mmaj9(#11)/C#").unwrap(), names("5 7 9 #11 1 b3"));
    assert_eq!(decode_chord_symbol("C9/D").unwrap(), names("2 1 3 5 b7 9"));
    assert_eq!(decode_chord_symbol("C13/A").unwrap(), names("6 1 3 5 b7 9 11 13"));
}

#[test]
fn encode_examples() {
    let style = ChordStyle::default();
    assert_eq!(encode_chord_symbol(&names("1 b3 b5 bb7"), &style), "dim7");
    assert_eq!(encode_chord_symbol(&names("1 3 5 b7 9 #11 13"), &style), "9#11add13");
}

#[test]
fn slash_must_not_mix_notations() {
    assert!(matches!(decode_chord_symbol("Cmaj7/iii"), Err(Error::SlashNotation(_))));
    assert!(matches!(decode_chord_symbol("bVI7/I"), Err(Error::SlashNotation(_))));
    assert!(matches!(decode_chord_symbol("iv7/I"), Err(Error::SlashNotation(_))));
    assert!(decode_chord_symbol("bVI7").is_ok());
}

/// Every chord of every heptatonic chord scale names itself with a symbol
/// that decodes back to its intervals.
#[test]
fn chord_scales_decode_to_their_intervals() {
    let style = ChordStyle::default();
    let keynotes: [NoteName; 2] = ["C".parse().unwrap(), "Gb".parse().unwrap()];

    for keynote in keynotes.iter() {
        for scale in Scale::HEPTATONIC.iter() {
            let structure = scale.base();
            for size in 1..=7 {
                let mut chords = chordify_heptatonic_tertial(*keynote, structure, size, &style).unwrap();
                chords.extend(chordify_heptatonic_sus(*keynote, structure, size, 2, &style).unwrap());
                chords.extend(chordify_heptatonic_sus(*keynote, structure, size, 4, &style).unwrap());

                for chord in chords {
                    let decoded = decode_chord_symbol(&chord.chord_symbol).unwrap();
                    let expected = sort_interval_names(chord.interval_names.iter().copied());
                    assert_eq!(decoded, expected, "{} in {} {}", chord.chord_symbol, keynote, scale);
                }
            }
        }
    }
}

#[test]
fn chord_scales_resolve_to_their_notes() {
    let style = ChordStyle::default();
    let keynote = "Eb".parse().unwrap();

    for scale in Scale::HEPTATONIC.iter() {
        for size in 3..=7 {
            for chord in chordify_heptatonic_tertial(keynote, scale.base(), size, &style).unwrap() {
                let resolved = resolve_chord_symbol(&chord.chord_symbol).unwrap();
                assert_eq!(resolved.note_names, chord.note_names, "{}", chord.chord_symbol);
                assert_eq!(resolved.interval_structure, chord.interval_structure, "{}", chord.chord_symbol);
            }
        }
    }
}

/// Inverted chords written over their bass decode to the inversion.
///
/// A bass note names a simple interval, so only inversions over a chord
/// tone below the ninth come back unchanged.
#[test]
fn slash_inversions_decode() {
    let structures = [ChordStructureKind::Tertial, ChordStructureKind::Sus4, ChordStructureKind::Sus2];

    for scale in ["diatonic", "harmonic minor", "hungarian major"].iter() {
        for structure in structures.iter() {
            for degree in 1..=7 {
                for size in 3..=7 {
                    for inversion in 0..size.min(4) {
                        let request = HeptatonicChordRequest {
                            keynote: "A".to_string(),
                            scale: scale.to_string(),
                            mode: String::new(),
                            degree,
                            size,
                            inversion,
                            structure: *structure,
                            style: ChordStyle { use_slash: true, ..ChordStyle::default() },
                            ..HeptatonicChordRequest::default()
                        };
                        let chord = heptatonic_chord(&request).unwrap();
                        assert_eq!(
                            decode_chord_symbol(&chord.chord_symbol).unwrap(),
                            chord.interval_names,
                            "{}",
                            chord.chord_symbol
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn ninth_in_the_bass_is_added_below() {
    let request = HeptatonicChordRequest {
        keynote: "C".to_string(),
        size: 5,
        inversion: 4,
        style: ChordStyle { use_slash: true, ..ChordStyle::default() },
        ..HeptatonicChordRequest::default()
    };
    let chord = heptatonic_chord(&request).unwrap();
    assert_eq!(chord.chord_symbol, "Cmaj9/D");
    assert_eq!(decode_chord_symbol(&chord.chord_symbol).unwrap(), names("2 1 3 5 7 9"));
}

#[test]
fn inversions_keep_ascending() {
    let style = ChordStyle::default();
    let chords = chordify_heptatonic_tertial("D".parse().unwrap(), Scale::Altered.base(), 7, &style).unwrap();

    for chord in chords.iter() {
        for index in 0..7 {
            let inverted = rotate_chord(chord, index);
            assert_eq!(inverted.interval_structure[0], 0);
            assert!(inverted.interval_structure.windows(2).all(|pair| pair[0] < pair[1]));
            assert_eq!(inverted.note_names[0], chord.note_names[index]);
        }
    }
}

#[test]
fn style_round_trip() {
    let style = tetrachord::chord::chord_style_of("Ebm7/Gb").unwrap();
    assert!(style.use_slash);

    let symbol = encode_chord_symbol(&names("1 b3 5 b7 9"), &style);
    assert_eq!(symbol, "m9");
}
