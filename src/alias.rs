//! Alternative names of scales and the word lists used to recognize them.
//!
//! Scale names are free text: `"Ukr Dor"`, `"ukrainian_dorian"` and
//! `"UkranianDorian"` all name the same scale. Each alias is a sequence of
//! words, each word has a list of accepted spellings, and any run of spaces
//! or underscores may separate them. Matching ignores case.

use lazy_static::lazy_static;
use regex::Regex;

use crate::scale::{Mode, Scale, ScaleId};

pub(crate) const IONIAN: &str = "ionian|ion";
pub(crate) const DORIAN: &str = "dorian|dor";
pub(crate) const PHRYGIAN: &str = "phrygian|phryg|phry|phr";
pub(crate) const LYDIAN: &str = "lydian|lyd";
pub(crate) const MIXOLYDIAN: &str = "mixolydian|mixolyd|mixo|mix";
pub(crate) const AEOLIAN: &str = "aeolian|aeol|aeo";
pub(crate) const LOCRIAN: &str = "locrian|locr|loc";

/// Spellings of each mode, in rotation order.
pub(crate) const MODE_WORDS: [&str; 7] = [IONIAN, DORIAN, PHRYGIAN, LYDIAN, MIXOLYDIAN, AEOLIAN, LOCRIAN];

const MAJOR: &str = "major|maj";
const DOMINANT: &str = "dominant|dom";
const MINOR: &str = "minor|min";
const PENTATONIC: &str = "pentatonic|pent";
const SUPER: &str = "super|sup";
const NATURAL: &str = "natural|nat|n";
const MELODIC: &str = "melodic|melod|mel";
const HARMONIC: &str = "harmonic|harmon|harm";
const AUGMENTED: &str = "augmented|aug";
const DIMINISHED: &str = "diminished|dimin|dim";
const ALTERED: &str = "altered|alt";
const ULTRA: &str = "ultra|ult";
const NEAPOLITAN: &str = "neapolitan|neapolit|neapol|neap|nea";
const UKRAINIAN: &str = "ukrainian|ukranian|ukran|ukr";
const HUNGARIAN: &str = "hungarian|hungar|hung|hun";
const GYPSY: &str = "gypsy|gyp|romani|rom";
const BLUES: &str = "blues|blu";

/// Spellings of each heptatonic scale name, in `Scale::HEPTATONIC` order.
pub(crate) const SCALE_WORDS: [&str; 15] = [
    "diatonic|diaton|dia",
    ALTERED,
    "hemitonic|hemiton",
    "hemiolic|hemiol",
    DIMINISHED,
    AUGMENTED,
    HARMONIC,
    "biseptimal|bisept|bs",
    "paleochromatic|paleoch|paleo|pal",
    "enigmatic|enigmat|enigma|enig",
    "(?:double|doubl|doub|dub)[ _]*(?:harmonic|harmon|harm)",
    NEAPOLITAN,
    HUNGARIAN,
    "persian",
    "romanian",
];

/// Words which may open a scale name and also begin with a note letter.
///
/// `"Dorian"` is a mode, not the keynote `D` followed by `"orian"`.
pub(crate) const KEYNOTE_LOOKALIKES: &str = "\
    dorian|dor|dominant|dom|diminished|dimin|dim|diatonic|diaton|dia|\
    double|doubl|doub|dub|\
    aeolian|aeol|aeo|augmented|aug|altered|alt|acoustic|acoust|acou|\
    african|afric|afr|add|\
    blues|blu|byzantine|byzant|byzan|byz|biseptimal|bisept|\
    enigmatic|enigmat|enigma|enig|\
    freygish|\
    gypsy|gyp";

/// A named scale and the phrase that recognizes it.
#[derive(Clone, Debug)]
pub struct ScaleAliasRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub target: ScaleId,
}

impl ScaleAliasRule {
    fn new(name: &'static str, words: &[&str], target: ScaleId) -> ScaleAliasRule {
        ScaleAliasRule { name, pattern: phrase(words), target }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Build a case insensitive regex matching the words in order, separated by
/// any number of spaces or underscores and covering the whole input.
pub(crate) fn phrase(words: &[&str]) -> Regex {
    let body = words
        .iter()
        .map(|word| format!("(?:{})", word))
        .collect::<Vec<_>>()
        .join("[ _]*");

    Regex::new(&format!("(?i)^[ _]*{}[ _]*$", body)).expect("alias phrase is a valid regex")
}

lazy_static! {
    /// Every alias in priority order. The first matching rule wins.
    pub static ref SCALE_ALIASES: Vec<ScaleAliasRule> = {
        use crate::scale::Mode::*;
        use crate::scale::Scale::*;

        let modal = ScaleId::modal;
        let rotated = ScaleId::new;

        vec![
            ScaleAliasRule::new("major", &[MAJOR], modal(Diatonic, Ionian)),
            ScaleAliasRule::new("dominant", &[DOMINANT], modal(Diatonic, Mixolydian)),
            ScaleAliasRule::new("minor", &[MINOR], modal(Diatonic, Aeolian)),

            ScaleAliasRule::new("minor pentatonic", &[MINOR, PENTATONIC], rotated(MinorPentatonic, 0)),
            ScaleAliasRule::new("major pentatonic", &[MAJOR, PENTATONIC], rotated(MinorPentatonic, 1)),
            ScaleAliasRule::new("minor blues", &[MINOR, BLUES], rotated(Blues, 0)),
            ScaleAliasRule::new("blues", &[BLUES], rotated(Blues, 0)),
            ScaleAliasRule::new("major blues", &[MAJOR, BLUES], rotated(MajorBlues, 0)),
            ScaleAliasRule::new("whole tone", &["whole", "tone"], rotated(WholeTone, 0)),
            ScaleAliasRule::new("istrian", &["istrian"], rotated(Istrian, 0)),
            ScaleAliasRule::new("african pentatonic", &["african|afric|afr", PENTATONIC], rotated(DominantPentatonic, 0)),
            ScaleAliasRule::new("dominant pentatonic", &[DOMINANT, PENTATONIC], rotated(DominantPentatonic, 0)),
            ScaleAliasRule::new("pelog pentatonic", &["pelog", PENTATONIC], rotated(PelogPentatonic, 0)),
            ScaleAliasRule::new("phrygian pentatonic", &[PHRYGIAN, PENTATONIC], rotated(PelogPentatonic, 0)),
            ScaleAliasRule::new("in", &["in"], rotated(In, 0)),
            ScaleAliasRule::new("insen", &["insen"], rotated(Insen, 0)),
            ScaleAliasRule::new("iwato", &["iwato"], rotated(Iwato, 0)),

            ScaleAliasRule::new("super locrian", &[SUPER, LOCRIAN], modal(Altered, Ionian)),
            ScaleAliasRule::new("altered dominant", &[ALTERED, DOMINANT], modal(Altered, Ionian)),
            ScaleAliasRule::new("melodic minor", &[MELODIC, MINOR], modal(Altered, Dorian)),
            ScaleAliasRule::new("jazz minor", &["jazz", MINOR], modal(Altered, Dorian)),
            ScaleAliasRule::new("lydian augmented", &[LYDIAN, AUGMENTED], modal(Altered, Lydian)),
            ScaleAliasRule::new("lydian dominant", &[LYDIAN, DOMINANT], modal(Altered, Mixolydian)),
            ScaleAliasRule::new("acoustic", &["acoustic|acoust|acou", "(?:scale)?"], modal(Altered, Mixolydian)),
            ScaleAliasRule::new("aeolian dominant", &[AEOLIAN, DOMINANT], modal(Altered, Aeolian)),
            ScaleAliasRule::new("half diminished", &["half", DIMINISHED], modal(Altered, Locrian)),

            ScaleAliasRule::new("augmented major", &[AUGMENTED, MAJOR], modal(Augmented, Ionian)),
            ScaleAliasRule::new("ukrainian dorian", &[UKRAINIAN, DORIAN], modal(Augmented, Dorian)),
            ScaleAliasRule::new("romanian minor", &["romanian", MINOR], modal(Augmented, Dorian)),
            ScaleAliasRule::new("phrygian dominant", &[PHRYGIAN, DOMINANT], modal(Augmented, Phrygian)),
            ScaleAliasRule::new("freygish", &["freygish"], modal(Augmented, Phrygian)),
            ScaleAliasRule::new("harmonic minor", &[HARMONIC, MINOR], modal(Augmented, Aeolian)),
            ScaleAliasRule::new("super locrian bb7", &[SUPER, LOCRIAN, "bb7"], modal(Augmented, Mixolydian)),
            ScaleAliasRule::new("altered diminished bb7", &[ALTERED, DIMINISHED, "bb7"], modal(Augmented, Mixolydian)),

            ScaleAliasRule::new("ultra locrian", &[ULTRA, LOCRIAN], modal(Hemiolic, Dorian)),
            ScaleAliasRule::new("altered diminished", &[ALTERED, DIMINISHED], modal(Hemiolic, Dorian)),
            ScaleAliasRule::new("neapolitan minor", &[NEAPOLITAN, MINOR], modal(Hemiolic, Phrygian)),
            ScaleAliasRule::new("mixolydian augmented", &[MIXOLYDIAN, AUGMENTED], modal(Hemiolic, Mixolydian)),
            ScaleAliasRule::new("gypsy minor", &[GYPSY, MINOR], modal(Hemiolic, Aeolian)),
            ScaleAliasRule::new("locrian dominant", &[LOCRIAN, DOMINANT], modal(Hemiolic, Locrian)),

            ScaleAliasRule::new("harmonic major", &[HARMONIC, MAJOR], modal(Harmonic, Ionian)),

            ScaleAliasRule::new("neapolitan major", &[NEAPOLITAN, MAJOR], modal(Neapolitan, Ionian)),
            ScaleAliasRule::new("leading whole tone", &["leading|lead", "whole|wh", "tone"], modal(Neapolitan, Dorian)),
            ScaleAliasRule::new("lydian augmented #6", &[LYDIAN, AUGMENTED, "#6"], modal(Neapolitan, Dorian)),
            ScaleAliasRule::new("lydian augmented dominant", &[LYDIAN, AUGMENTED, DOMINANT], modal(Neapolitan, Phrygian)),
            ScaleAliasRule::new("lydian dominant b6", &[LYDIAN, DOMINANT, "b6"], modal(Neapolitan, Lydian)),
            ScaleAliasRule::new("major locrian", &[MAJOR, LOCRIAN], modal(Neapolitan, Mixolydian)),
            ScaleAliasRule::new("half diminished b4", &["half", DIMINISHED, "b4"], modal(Neapolitan, Aeolian)),
            ScaleAliasRule::new("altered dominant #2", &[ALTERED, DOMINANT, "#2"], modal(Neapolitan, Aeolian)),
            ScaleAliasRule::new("altered dominant bb3", &[ALTERED, DOMINANT, "bb3"], modal(Neapolitan, Locrian)),

            ScaleAliasRule::new("byzantine", &["byzantine|byzant|byzan|byz"], modal(DoubleHarmonic, Ionian)),
            ScaleAliasRule::new("gypsy major", &[GYPSY, MAJOR], modal(DoubleHarmonic, Ionian)),
            ScaleAliasRule::new("hungarian minor", &[HUNGARIAN, MINOR], modal(DoubleHarmonic, Lydian)),
            ScaleAliasRule::new("ultra phrygian", &[ULTRA, PHRYGIAN], modal(DoubleHarmonic, Phrygian)),

            ScaleAliasRule::new("hungarian major", &[HUNGARIAN, MAJOR], modal(Hungarian, Ionian)),
            ScaleAliasRule::new("altered diminished bb6", &[ALTERED, DIMINISHED, "bb6"], modal(Hungarian, Dorian)),
            ScaleAliasRule::new("harmonic minor b5", &[HARMONIC, MINOR, "b5"], modal(Hungarian, Phrygian)),
            ScaleAliasRule::new("altered dominant natural 6", &[ALTERED, DOMINANT, NATURAL, "6"], modal(Hungarian, Lydian)),
            ScaleAliasRule::new("melodic minor #5", &[MELODIC, MINOR, "#5"], modal(Hungarian, Mixolydian)),
            ScaleAliasRule::new("ukrainian dorian b2", &[UKRAINIAN, DORIAN, "b2"], modal(Hungarian, Aeolian)),
            ScaleAliasRule::new("lydian augmented #3", &[LYDIAN, AUGMENTED, "#3"], modal(Hungarian, Locrian)),

            ScaleAliasRule::new("lydian dominant b9", &[LYDIAN, DOMINANT, "b9"], modal(Romanian, Ionian)),
            ScaleAliasRule::new("super lydian augmented natural 6", &[SUPER, LYDIAN, AUGMENTED, NATURAL, "6"], modal(Romanian, Dorian)),
            ScaleAliasRule::new("super locrian bb6", &[SUPER, LOCRIAN, "bb6"], modal(Romanian, Lydian)),
            ScaleAliasRule::new("jeth's mode", &["jeth(?:'s|s|s'|s's)?", "mode"], modal(Romanian, Mixolydian)),
            ScaleAliasRule::new("melodic minor b5", &[MELODIC, MINOR, "b5"], modal(Romanian, Mixolydian)),
            ScaleAliasRule::new("jazz minor b5", &["jazz", MINOR, "b5"], modal(Romanian, Mixolydian)),
            ScaleAliasRule::new("javanese b4", &["javanese|java", "b4"], modal(Romanian, Aeolian)),
            ScaleAliasRule::new("super phrygian natural 6", &[SUPER, PHRYGIAN, NATURAL, "6"], modal(Romanian, Aeolian)),
            ScaleAliasRule::new("lydian augmented b3", &[LYDIAN, AUGMENTED, "b3"], modal(Romanian, Locrian)),
        ]
    };

    /// A canonical heptatonic scale name, optionally followed by a mode.
    pub(crate) static ref CANONICAL_PAIR: Regex = {
        let scales = SCALE_WORDS
            .iter()
            .enumerate()
            .map(|(i, words)| format!("(?P<s{}>{})", i, words))
            .collect::<Vec<_>>()
            .join("|");
        let modes = MODE_WORDS
            .iter()
            .enumerate()
            .map(|(i, words)| format!("(?P<m{}>{})", i, words))
            .collect::<Vec<_>>()
            .join("|");

        Regex::new(&format!("(?i)^[ _]*(?:{})(?:[ _]*(?:{}))?[ _]*$", scales, modes))
            .expect("canonical scale expression is a valid regex")
    };

    /// Any mode name appearing in free text.
    ///
    /// Mixolydian is listed before lydian so the leftmost match consumes the
    /// whole word and `lydian` is never found inside it.
    pub(crate) static ref MODE_NAME: Regex = {
        let order = [4, 0, 1, 2, 3, 5, 6];
        let modes = order
            .iter()
            .map(|&i| format!("(?P<m{}>{})", i, MODE_WORDS[i]))
            .collect::<Vec<_>>()
            .join("|");

        Regex::new(&format!("(?i){}", modes)).expect("mode expression is a valid regex")
    };

    pub(crate) static ref KEYNOTE_LOOKALIKE: Regex =
        Regex::new(&format!("(?i)^(?:{})", KEYNOTE_LOOKALIKES))
            .expect("keynote lookalike expression is a valid regex");
}

/// Which of the numbered groups `prefix0`, `prefix1`, ... took part in a
/// match.
pub(crate) fn matched_group(captures: &regex::Captures, prefix: &str, count: usize) -> Option<usize> {
    (0..count).find(|i| captures.name(&format!("{}{}", prefix, i)).is_some())
}

/// Find the first alias rule recognizing `text`.
pub fn match_alias(text: &str) -> Option<&'static ScaleAliasRule> {
    SCALE_ALIASES.iter().find(|rule| rule.is_match(text))
}

/// Names of every alias of a scale, in table order.
pub fn aliases_of(id: ScaleId) -> Vec<&'static str> {
    SCALE_ALIASES
        .iter()
        .filter(|rule| rule.target == id)
        .map(|rule| rule.name)
        .collect()
}

/// Read a canonical `scale mode` pair such as `"hemitonic lydian"` or
/// `"Dub_Harm"`.
pub(crate) fn match_canonical_pair(text: &str) -> Option<ScaleId> {
    let captures = CANONICAL_PAIR.captures(text)?;
    let scale = Scale::HEPTATONIC[matched_group(&captures, "s", SCALE_WORDS.len())?];
    let mode = matched_group(&captures, "m", MODE_WORDS.len())
        .map(Mode::from_rotation)
        .unwrap_or(Mode::Ionian);

    Some(ScaleId::modal(scale, mode))
}
