use std::collections::BTreeSet;

use tetrachord::alias::SCALE_ALIASES;
use tetrachord::interval::{parse_interval_names, sort_interval_names};
use tetrachord::note::{Letter, NoteName};
use tetrachord::resolve::{
    describe_heptatonic_scale, resolve_generic_scale_request, resolve_heptatonic_scale,
    resolve_scale_alias, resolve_scale_pattern,
};
use tetrachord::scale::{Mode, Scale, ScaleId};
use tetrachord::spelling::{best_heptatonic_note_names, heptatonic_note_names, validate_heptatonic_spelling};

fn keynotes() -> Vec<NoteName> {
    Letter::ALL
        .iter()
        .flat_map(|&letter| (-1..=1).map(move |accidentals| NoteName::new(letter, accidentals)))
        .collect()
}

#[test]
fn every_letter_once() {
    for scale in Scale::HEPTATONIC.iter() {
        for rotation in 0..7 {
            let structure = scale.rotate(rotation);
            for keynote in keynotes() {
                for names in [
                    heptatonic_note_names(keynote, &structure).unwrap(),
                    best_heptatonic_note_names(keynote, &structure).unwrap(),
                ]
                .iter()
                {
                    let letters: BTreeSet<_> = names.iter().map(|name| name.letter).collect();
                    assert_eq!(letters.len(), 7, "{} {} from {}", scale, rotation, keynote);
                    assert!(validate_heptatonic_spelling(names));
                }
            }
        }
    }
}

#[test]
fn aliases_resolve_to_their_targets() {
    for rule in SCALE_ALIASES.iter() {
        assert_eq!(resolve_scale_alias(rule.name), Ok(rule.target), "{}", rule.name);
    }
    assert_eq!(
        resolve_scale_alias("melodic minor"),
        Ok(ScaleId::modal(Scale::Altered, Mode::Dorian))
    );
}

#[test]
fn heptatonic_aliases_agree_with_patterns() {
    for rule in SCALE_ALIASES.iter().filter(|rule| rule.target.scale.is_heptatonic()) {
        let structure = resolve_heptatonic_scale(rule.name, None).unwrap();
        assert_eq!(structure, rule.target.interval_structure(), "{}", rule.name);

        let found = resolve_scale_pattern(structure).unwrap();
        assert_eq!(found.scale_id(), rule.target, "{}", rule.name);
        assert!(found.aliases.iter().any(|name| name == rule.name), "{}", rule.name);
    }
}

#[test]
fn every_heptatonic_mode_is_found_by_pattern() {
    for scale in Scale::HEPTATONIC.iter() {
        for mode in Mode::ALL.iter() {
            let id = ScaleId::modal(*scale, *mode);
            let found = resolve_scale_pattern(id.interval_structure()).unwrap();
            assert_eq!(found.scale_id(), id);
            assert_eq!(found.mode_name, mode.name());

            let text = format!("{} {}", scale.name(), mode.name());
            assert_eq!(resolve_generic_scale_request(&text).unwrap().1, id, "{}", text);
        }
    }
}

#[test]
fn heptatonic_examples() {
    assert_eq!(resolve_heptatonic_scale("altered", Some("dorian")).unwrap(), [0, 2, 3, 5, 7, 9, 11]);
    assert_eq!(resolve_heptatonic_scale("diatonic", Some("locrian")).unwrap(), [0, 1, 3, 5, 6, 8, 10]);
    assert_eq!(resolve_heptatonic_scale("diatonic", Some("6")).unwrap(), [0, 1, 3, 5, 6, 8, 10]);
}

#[test]
fn modified_modes_are_named() {
    let cases = [
        ("dorian b2", ScaleId::modal(Scale::Altered, Mode::Phrygian)),
        ("mixolydian b6", ScaleId::modal(Scale::Altered, Mode::Aeolian)),
        ("aeolian natural 7", ScaleId::modal(Scale::Augmented, Mode::Aeolian)),
        ("ionian #5", ScaleId::modal(Scale::Augmented, Mode::Ionian)),
        ("mixolydian #5", ScaleId::modal(Scale::Hemiolic, Mode::Mixolydian)),
    ];
    for (text, id) in cases.iter() {
        assert_eq!(resolve_scale_alias(text), Ok(*id), "{}", text);
    }
}

#[test]
fn requests_with_keynotes() {
    let (keynote, id) = resolve_generic_scale_request("F# melodic minor").unwrap();
    assert_eq!(keynote.to_string(), "F#");
    assert_eq!(id, ScaleId::modal(Scale::Altered, Mode::Dorian));

    let (keynote, id) = resolve_generic_scale_request("dorian").unwrap();
    assert_eq!(keynote.to_string(), "C");
    assert_eq!(id, ScaleId::modal(Scale::Diatonic, Mode::Dorian));

    assert!(resolve_generic_scale_request("Gb nonsense").is_err());
}

#[test]
fn described_scales_read_well() {
    let described = describe_heptatonic_scale("G#".parse().unwrap(), "major", None).unwrap();
    assert_eq!(described.recommended_keynote, "Ab");
    assert_eq!(described.recommended_note_names, ["Ab", "Bb", "C", "Db", "Eb", "F", "G"]);
    assert_eq!(described.note_names, ["G#", "A#", "B#", "C#", "D#", "E#", "F##"]);
    assert_eq!(described.roman_names, ["I", "II", "III", "IV", "V", "VI", "VII"]);
    assert_eq!(described.formula, ["tone", "tone", "semitone", "tone", "tone", "tone", "semitone"]);
}

#[test]
fn sorting_is_idempotent() {
    let names = parse_interval_names("13 #4 b5 4 #3 3 b3 #2 9 b9 7 1").unwrap();
    let sorted = sort_interval_names(names);
    assert_eq!(sorted, parse_interval_names("1 #2 b3 3 #3 4 #4 b5 7 b9 9 13").unwrap());
    assert_eq!(sort_interval_names(sorted.clone()), sorted);
}
