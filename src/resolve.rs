//! Resolve scale names, modified modes and scale patterns to canonical scales.
//!
//! A request is tried against progressively looser readings: a canonical
//! `scale mode` pair, then the alias table, then a mode name with modifiers
//! whose structure is looked up by pattern.

use std::collections::BTreeSet;
use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alias::{self, MODE_NAME, MODE_WORDS};
use crate::convert::{self, interval_names_to_integers};
use crate::error::{Error, Result, Syntax};
use crate::interval::{step_formula, IntervalName};
use crate::note::{Letter, NoteName, SEMITONES};
use crate::parser;
use crate::scale::{Mode, Scale, ScaleId};
use crate::spelling::{best_heptatonic_note_names, heptatonic_interval_names, heptatonic_note_names};

lazy_static! {
    static ref ADDED: Regex = Regex::new(r"(?i:add)[ _]*([b#]*[1-7])").expect("valid regex");
    static ref OMITTED: Regex = Regex::new(r"(?i:no)[ _]*([b#]*[1-7])").expect("valid regex");
    static ref ALTERED: Regex = Regex::new(r"([b#]+[1-7])").expect("valid regex");
    static ref NATURAL: Regex =
        Regex::new(r"(?:(?i:natural|nat|n)[ _]*)?([1-7])").expect("valid regex");
    static ref FILLER: Regex = Regex::new(r"(?i)^(?:[\s_,.\-]|scale|mode)*$").expect("valid regex");
}

/// Resolve a heptatonic scale to its interval structure.
///
/// `scale_name` is a canonical scale (`"hungarian"`), a mode of the
/// diatonic scale (`"dorian"`) or anything `resolve_scale_alias` accepts.
/// `mode_name` is a mode or a rotation count and rotates further from the
/// named scale's first degree; `None` leaves it unrotated.
///
/// ```
/// use tetrachord::resolve::resolve_heptatonic_scale;
///
/// let structure = resolve_heptatonic_scale("altered", Some("dorian")).unwrap();
/// assert_eq!(structure, [0, 2, 3, 5, 7, 9, 11]);
/// ```
pub fn resolve_heptatonic_scale(scale_name: &str, mode_name: Option<&str>) -> Result<Vec<i32>> {
    let rotation = match mode_name {
        None => 0,
        Some(mode) => mode_rotation(mode)?,
    };

    let lower = scale_name.trim().to_lowercase();
    let id = if let Some(scale) = Scale::from_name(&lower) {
        ScaleId::new(scale, 0)
    } else if let Some(mode) = Mode::from_name(&lower) {
        ScaleId::modal(Scale::Diatonic, mode)
    } else {
        resolve_scale_alias(scale_name)?
    };

    if !id.scale.is_heptatonic() {
        return Err(Error::Argument(format!("{} is not a heptatonic scale", id.scale)));
    }
    let rotation = rotation % id.scale.base().len();
    Ok(ScaleId::new(id.scale, id.rotation + rotation).interval_structure())
}

fn mode_rotation(mode: &str) -> Result<usize> {
    let mode = mode.trim();
    if let Ok(rotation) = mode.parse::<usize>() {
        return Ok(rotation);
    }
    Mode::from_name(&mode.to_lowercase())
        .map(Mode::rotation)
        .ok_or_else(|| Error::format(Syntax::ModeName, mode))
}

/// Resolve a scale alias such as `"melodic minor"` to a canonical scale.
///
/// Names missing from the alias table are read as modified mode names and
/// looked up by pattern.
pub fn resolve_scale_alias(name: &str) -> Result<ScaleId> {
    if let Some(rule) = alias::match_alias(name) {
        return Ok(rule.target);
    }

    debug!(name, "no alias matched, reading as a modified mode");
    let unknown = |err: Error| Error::UnknownScale(format!("{:?} ({})", name, err));
    let names = resolve_modal_name(name).map_err(unknown)?;
    let structure = interval_names_to_integers(&names);

    debug!(name, ?structure, "searching scale patterns");
    resolve_scale_pattern(structure).map(|data| data.scale_id()).map_err(unknown)
}

/// Read a mode name with modifiers into its interval names.
///
/// The mode defaults to ionian. Altered intervals (`#4`) and naturals
/// (`natural 7`, `nat7`, `n7` or a bare `7`) replace the degree of the
/// mode, `add X` adds an interval and `no X` removes one. Words may be
/// abbreviated and joined by spaces, underscores or nothing at all.
///
/// ```
/// use tetrachord::interval::parse_interval_names;
/// use tetrachord::resolve::resolve_modal_name;
///
/// let names = resolve_modal_name("lydian #5 no6").unwrap();
/// assert_eq!(names, parse_interval_names("1 2 3 #4 #5 7").unwrap());
/// ```
pub fn resolve_modal_name(text: &str) -> Result<Vec<IntervalName>> {
    let mut masked = text.to_string();

    let mut modes = BTreeSet::new();
    let mut spans = Vec::new();
    for captures in MODE_NAME.captures_iter(text) {
        if let (Some(whole), Some(mode)) = (captures.get(0), alias::matched_group(&captures, "m", MODE_WORDS.len())) {
            modes.insert(mode);
            spans.push(whole.range());
        }
    }
    mask(&mut masked, spans);

    let mode = match modes.len() {
        0 => Mode::Ionian,
        1 => modes.iter().next().copied().map(Mode::from_rotation).unwrap_or(Mode::Ionian),
        _ => {
            return Err(Error::Argument(format!("{:?} names more than one mode", text)));
        }
    };

    let additions = take(&mut masked, &ADDED, text)?;
    let omissions = take(&mut masked, &OMITTED, text)?;
    let mut substitutions = take(&mut masked, &ALTERED, text)?;
    substitutions.extend(take(&mut masked, &NATURAL, text)?);

    if !FILLER.is_match(&masked) {
        return Err(Error::format(Syntax::ModeName, text));
    }

    let base = heptatonic_interval_names(&Scale::Diatonic.rotate(mode.rotation()))?;
    let mut names = Vec::with_capacity(base.len() + additions.len());
    for name in base.iter() {
        let mut replaced = false;
        for substitute in substitutions.iter().filter(|sub| sub.degree == name.degree) {
            if !names.contains(substitute) {
                names.push(*substitute);
            }
            replaced = true;
        }
        if !replaced {
            names.push(*name);
        }
    }
    names.extend(additions);

    for omitted in omissions {
        if let Some(index) = names.iter().position(|name| *name == omitted) {
            names.remove(index);
        }
    }

    names.sort();
    Ok(names)
}

/// Replace the byte ranges of `text` with spaces.
fn mask(text: &mut String, spans: Vec<Range<usize>>) {
    for span in spans {
        let blank = " ".repeat(span.len());
        text.replace_range(span, &blank);
    }
}

/// Parse the interval captured by every match of `pattern`, then blank the
/// matches out.
fn take(masked: &mut String, pattern: &Regex, text: &str) -> Result<Vec<IntervalName>> {
    let mut names = Vec::new();
    let mut spans = Vec::new();
    for captures in pattern.captures_iter(masked.as_str()) {
        if let (Some(whole), Some(interval)) = (captures.get(0), captures.get(1)) {
            let name = interval
                .as_str()
                .parse()
                .map_err(|_| Error::format(Syntax::ModeName, text))?;
            names.push(name);
            spans.push(whole.range());
        }
    }
    mask(masked, spans);
    Ok(names)
}

/// The input to a scale pattern search.
#[derive(Clone, Debug, PartialEq)]
pub enum PatternQuery {
    /// Semitone offsets from the keynote, in any octave and order.
    Intervals(Vec<i32>),
    /// Bit `n` set for each offset `n`, so bit 0 is the unison.
    Bitmask(u16),
}

impl From<Vec<i32>> for PatternQuery {
    fn from(intervals: Vec<i32>) -> PatternQuery {
        PatternQuery::Intervals(intervals)
    }
}

impl<'a> From<&'a [i32]> for PatternQuery {
    fn from(intervals: &'a [i32]) -> PatternQuery {
        PatternQuery::Intervals(intervals.to_vec())
    }
}

impl From<u16> for PatternQuery {
    fn from(bitmask: u16) -> PatternQuery {
        PatternQuery::Bitmask(bitmask)
    }
}

impl PatternQuery {
    /// Sorted distinct offsets within one octave.
    fn pitch_classes(&self) -> Result<Vec<i32>> {
        let classes: BTreeSet<i32> = match *self {
            PatternQuery::Intervals(ref intervals) => {
                intervals.iter().map(|value| value.rem_euclid(SEMITONES)).collect()
            }
            PatternQuery::Bitmask(mask) => {
                if mask & 1 == 0 || mask >> SEMITONES != 0 {
                    return Err(Error::Argument(format!(
                        "scale bitmask {:#b} must be odd and fit in twelve bits", mask
                    )));
                }
                (0..SEMITONES).filter(|bit| mask & (1 << bit) != 0).collect()
            }
        };

        if !classes.contains(&0) {
            return Err(Error::Argument(format!(
                "scale pattern {:?} does not contain the unison", self
            )));
        }
        Ok(classes.into_iter().collect())
    }
}

/// A scale found by its pattern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalePatternData {
    pub interval_structure: Vec<i32>,
    pub scale: Scale,
    pub rotation: usize,
    pub mode_name: String,
    pub aliases: Vec<String>,
}

impl ScalePatternData {
    pub fn scale_id(&self) -> ScaleId {
        ScaleId::new(self.scale, self.rotation)
    }
}

/// Find the canonical scale and rotation of a pattern.
///
/// Scales are searched heptatonic first, then hexatonic, pentatonic and
/// octatonic, each in table order; the first rotation that matches wins.
///
/// ```
/// use tetrachord::resolve::resolve_scale_pattern;
/// use tetrachord::scale::Scale;
///
/// let data = resolve_scale_pattern(0b1010_1011_0101u16).unwrap();
/// assert_eq!(data.scale, Scale::Diatonic);
/// assert_eq!(data.mode_name, "ionian");
/// ```
pub fn resolve_scale_pattern<Q: Into<PatternQuery>>(query: Q) -> Result<ScalePatternData> {
    let query = query.into();
    let classes = query.pitch_classes()?;

    for &scale in Scale::ALL.iter() {
        if scale.base().len() != classes.len() {
            continue;
        }
        for rotation in 0..classes.len() {
            if scale.rotate(rotation) == classes {
                let id = ScaleId::new(scale, rotation);
                return Ok(ScalePatternData {
                    interval_structure: classes,
                    scale,
                    rotation,
                    mode_name: id.mode_name(),
                    aliases: alias::aliases_of(id).into_iter().map(String::from).collect(),
                });
            }
        }
    }

    Err(Error::UnknownScale(format!("{:?}", classes)))
}

/// Split a request such as `"Eb ukrainian dorian"` into its keynote and
/// scale.
///
/// The keynote is optional and defaults to `C`. The scale may be a canonical
/// `scale mode` pair (the mode defaults to ionian), an alias or a modified
/// mode name.
///
/// ```
/// use tetrachord::resolve::resolve_generic_scale_request;
/// use tetrachord::scale::{Mode, Scale, ScaleId};
///
/// let (keynote, id) = resolve_generic_scale_request("E_UkrDor").unwrap();
/// assert_eq!(keynote.to_string(), "E");
/// assert_eq!(id, ScaleId::modal(Scale::Augmented, Mode::Dorian));
/// ```
pub fn resolve_generic_scale_request(text: &str) -> Result<(NoteName, ScaleId)> {
    let trimmed = text.trim_start_matches(|c: char| c.is_whitespace() || c == '_');
    let default = (NoteName::natural(Letter::C), trimmed);

    let candidates = match parser::split_note_prefix(trimmed) {
        None => vec![default],
        Some(keyed) if alias::KEYNOTE_LOOKALIKE.is_match(trimmed) => vec![default, keyed],
        Some(keyed) => vec![keyed, default],
    };

    let mut first_error = None;
    for (keynote, rest) in candidates {
        match resolve_scale_name(rest) {
            Ok(id) => {
                debug!(text, %keynote, %id, "resolved scale request");
                return Ok((keynote, id));
            }
            Err(err) => {
                debug!(text, %keynote, rest, %err, "scale request reading rejected");
                first_error.get_or_insert(err);
            }
        }
    }
    Err(first_error.unwrap_or_else(|| Error::UnknownScale(text.to_string())))
}

fn resolve_scale_name(text: &str) -> Result<ScaleId> {
    if text.trim_matches(|c: char| c.is_whitespace() || c == '_').is_empty() {
        return Ok(ScaleId::modal(Scale::Diatonic, Mode::Ionian));
    }
    match alias::match_canonical_pair(text) {
        Some(id) => Ok(id),
        None => resolve_scale_alias(text),
    }
}

/// Everything worth knowing about a heptatonic scale on a keynote.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeptatonicScaleData {
    pub interval_structure: Vec<i32>,
    pub interval_names: Vec<IntervalName>,
    pub roman_names: Vec<String>,
    /// Spelled from the keynote as given.
    pub note_names: Vec<String>,
    /// Spelled from whichever enharmonic keynote reads best.
    pub recommended_note_names: Vec<String>,
    pub recommended_keynote: String,
    pub formula: Vec<String>,
}

/// Describe a heptatonic scale on `keynote`, see `resolve_heptatonic_scale`
/// for the accepted names.
pub fn describe_heptatonic_scale(
    keynote: NoteName,
    scale_name: &str,
    mode_name: Option<&str>,
) -> Result<HeptatonicScaleData> {
    let structure = resolve_heptatonic_scale(scale_name, mode_name)?;
    let interval_names = heptatonic_interval_names(&structure)?.to_vec();
    let note_names = heptatonic_note_names(keynote, &structure)?;
    let recommended = best_heptatonic_note_names(keynote, &structure)?;
    let to_strings = |names: &[NoteName]| names.iter().map(ToString::to_string).collect::<Vec<_>>();

    Ok(HeptatonicScaleData {
        roman_names: interval_names.iter().map(|&name| convert::interval_name_to_roman(name)).collect(),
        formula: step_formula(&structure)?.into_iter().map(String::from).collect(),
        note_names: to_strings(&note_names),
        recommended_note_names: to_strings(&recommended),
        recommended_keynote: recommended[0].to_string(),
        interval_names,
        interval_structure: structure,
    })
}
