//! Handles parsing of note names, interval names and chord symbols.
//
// Scale names are matched against regular expressions in `alias` instead,
// since those are phrases rather than a fixed grammar.

use combine::error::ParseError;
use combine::parser::char::string;
use combine::{
    attempt, choice, eof, many, many1, one_of, optional, satisfy_map, skip_many, token, value,
    Parser, Stream,
};

use crate::chord::{ChordRoot, Quality, MAJOR_SYMBOLS, QUALITY_SYMBOLS};
use crate::error::{Error, Result, Syntax};
use crate::interval::{Degree, IntervalName};
use crate::note::{Accidentals, Letter, NoteName};

/// Parses a run of accidentals of a single kind.
///
/// ```text
/// Accidentals : ('#' | '♯')+
///             | ('b' | '♭')+
///             | ε
///             ;
/// ```
fn accidentals<Input>() -> impl Parser<Input, Output = Accidentals>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    choice((
        many1(one_of("#♯".chars())).map(|signs: Vec<char>| signs.len() as Accidentals),
        many1(one_of("b♭".chars())).map(|signs: Vec<char>| -(signs.len() as Accidentals)),
        value(0),
    ))
}

/// Parses a note letter plus its accidentals.
///
/// An example of a note is `Bbb`. Sharps and flats may not be mixed.
///
/// ```text
/// Note : [A-G] Accidentals
///      ;
/// ```
pub(crate) fn note<Input>() -> impl Parser<Input, Output = NoteName>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let letter = satisfy_map(Letter::from_char).expected("Note: [A-G]");

    (letter, accidentals()).map(|(letter, accidentals)| NoteName::new(letter, accidentals))
}

/// Parses a degree digit.
///
/// ```text
/// Degree : '13' | '11' | '9' | [1-7]
///        ;
/// ```
fn degree<Input>() -> impl Parser<Input, Output = Degree>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    choice((
        attempt(string("13")).map(|_| Degree::N13),
        attempt(string("11")).map(|_| Degree::N11),
        satisfy_map(|c: char| c.to_digit(10).and_then(|d| Degree::from_number(d as u8))),
    ))
    .expected("Degree: 1-7, 9, 11 or 13")
}

/// Parses an interval name such as `b3` or `#11`.
///
/// ```text
/// Interval : Accidentals Degree
///          ;
/// ```
fn interval_name<Input>() -> impl Parser<Input, Output = IntervalName>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    (accidentals(), degree()).map(|(accidentals, degree)| IntervalName::new(degree, accidentals))
}

/// Parses an upper or lower case Roman numeral with its accidentals.
///
/// ```text
/// Numeral : 'VII' | 'VI' | 'V' | 'IV' | 'III' | 'II' | 'I'
///         | 'vii' | 'vi' | 'v' | 'iv' | 'iii' | 'ii' | 'i'
///         ;
///
/// Roman : Accidentals Numeral
///       ;
/// ```
fn roman_name<Input>() -> impl Parser<Input, Output = IntervalName>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    use crate::interval::Degree::*;

    const NUMERALS: [(&str, Degree); 14] = [
        ("VII", N7), ("vii", N7), ("VI", N6), ("vi", N6), ("V", N5), ("v", N5),
        ("IV", N4), ("iv", N4), ("III", N3), ("iii", N3), ("II", N2), ("ii", N2),
        ("I", N1), ("i", N1),
    ];

    let numeral = choice(NUMERALS.map(|(numeral, degree)| attempt(string(numeral)).map(move |_| degree)))
        .expected("Roman numeral: I-VII");

    (accidentals(), numeral).map(|(accidentals, degree)| IntervalName::new(degree, accidentals))
}

/// Parses the root or bass of a chord.
///
/// ```text
/// Root : Note | Roman
///      ;
/// ```
fn chord_root<Input>() -> impl Parser<Input, Output = ChordRoot>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    choice((
        note().map(ChordRoot::Alphabetic),
        roman_name().map(ChordRoot::Roman),
    ))
}

/// Parses the main quality symbol of a chord.
///
/// ```text
/// Quality : 'maj' | 'Maj' | 'M' | 'Δ'
///         | 'min' | 'm' | '-'
///         | 'dim' | 'o' | '°'
///         | 'aug' | '+'
///         | 'ø'
///         ;
/// ```
fn quality<Input>() -> impl Parser<Input, Output = (Quality, &'static str)>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    choice(QUALITY_SYMBOLS.map(|(symbol, quality)| {
        attempt(string(symbol)).map(move |_| (quality, symbol))
    }))
}

/// The stacked extension of a chord, e.g. the `maj9` in `Cmmaj9`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Extension {
    pub marker: Option<&'static str>,
    pub degree: Degree,
}

/// Parses an extension, optionally marked as having a major seventh.
///
/// ```text
/// Extension : ('maj' | 'Maj' | 'M' | 'Δ')? ('13' | '11' | '9' | '7')
///           ;
/// ```
fn extension<Input>() -> impl Parser<Input, Output = Extension>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let marker = choice(MAJOR_SYMBOLS.map(|symbol| attempt(string(symbol)).map(move |_| symbol)));

    let degree = choice((
        attempt(string("13")).map(|_| Degree::N13),
        attempt(string("11")).map(|_| Degree::N11),
        token('9').map(|_| Degree::N9),
        token('7').map(|_| Degree::N7),
    ));

    attempt((optional(marker), degree)).map(|(marker, degree)| Extension { marker, degree })
}

/// A single alteration following the chord quality and extension.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Modification {
    /// `sus` on its own suspends the fourth.
    Sus(Option<IntervalName>),
    Add(IntervalName),
    Omit(IntervalName),
    Augment,
    Interval(IntervalName),
}

/// Parses a set of chord alterations that may appear at the end of a chord.
///
/// ```text
/// Modification : 'sus' Interval?
///              | 'add' Interval
///              | 'no' Interval
///              | 'aug' | '+'
///              | Interval
///              ;
/// ```
fn modification<Input>() -> impl Parser<Input, Output = Modification>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    choice((
        attempt(string("sus")).with(optional(interval_name())).map(Modification::Sus),
        attempt(string("add")).with(interval_name()).map(Modification::Add),
        attempt(string("no")).with(interval_name()).map(Modification::Omit),
        attempt(string("aug")).map(|_| Modification::Augment),
        token('+').map(|_| Modification::Augment),
        interval_name().map(Modification::Interval),
    ))
}

/// Spaces, commas and parentheses between modifications carry no meaning.
fn separators<Input>() -> impl Parser<Input, Output = ()>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    skip_many(one_of(" ,()".chars()))
}

/// The slots of a chord symbol in the order they appear.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ChordSymbolParts {
    pub root: ChordRoot,
    pub quality: Option<(Quality, &'static str)>,
    pub extension: Option<Extension>,
    pub modifications: Vec<Modification>,
    pub slash: Option<ChordRoot>,
}

/// Recognizes an entire chord symbol.
///
/// An example of a chord this parser recognizes is `F#mmaj9(#11)/C#`.
///
/// ```text
/// Chord : Root Quality? Extension? (Separator* Modification)* Separator* ('/' Root)?
///       ;
/// ```
fn chord_symbol<Input>() -> impl Parser<Input, Output = ChordSymbolParts>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    (
        chord_root(),
        optional(quality()),
        optional(extension()),
        many::<Vec<_>, _, _>(attempt(separators().with(modification()))),
        separators(),
        optional(token('/').with(chord_root())),
        eof(),
    )
        .map(|(root, quality, extension, modifications, _, slash, _)| ChordSymbolParts {
            root,
            quality,
            extension,
            modifications,
            slash,
        })
}

pub(crate) fn parse_note_name(text: &str) -> Result<NoteName> {
    note()
        .skip(eof())
        .parse(text)
        .map(|(note, _)| note)
        .map_err(|_| Error::format(Syntax::NoteName, text))
}

pub(crate) fn parse_interval_name(text: &str) -> Result<IntervalName> {
    interval_name()
        .skip(eof())
        .parse(text)
        .map(|(interval, _)| interval)
        .map_err(|_| Error::format(Syntax::IntervalName, text))
}

pub(crate) fn parse_roman_name(text: &str) -> Result<IntervalName> {
    roman_name()
        .skip(eof())
        .parse(text)
        .map(|(interval, _)| interval)
        .map_err(|_| Error::format(Syntax::RomanNumeral, text))
}

pub(crate) fn parse_chord_symbol(text: &str) -> Result<ChordSymbolParts> {
    chord_symbol()
        .parse(text)
        .map(|(parts, _)| parts)
        .map_err(|_| Error::format(Syntax::ChordSymbol, text))
}

/// Split a leading note name from `text`.
pub(crate) fn split_note_prefix(text: &str) -> Option<(NoteName, &str)> {
    note().parse(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::interval::Degree::*;
    use crate::note::Letter::*;

    fn interval(degree: Degree, accidentals: Accidentals) -> IntervalName {
        IntervalName::new(degree, accidentals)
    }

    #[test]
    fn parse_note_no_accidentals() {
        let result = note().parse("A");
        assert_eq!(result, Ok((NoteName::new(A, 0), "")));

        let result = note().parse("G");
        assert_eq!(result, Ok((NoteName::new(G, 0), "")));
    }

    #[test]
    fn parse_note_unicode_accidentals() {
        let result = note().parse("A♯#");
        assert_eq!(result, Ok((NoteName::new(A, 2), "")));

        let result = note().parse("G♭");
        assert_eq!(result, Ok((NoteName::new(G, -1), "")));
    }

    #[test]
    fn parse_note_invalid_root() {
        assert!(note().parse("I").is_err());
        assert!(parse_note_name("a").is_err());
    }

    #[test]
    fn parse_note_trailing_junk() {
        let result = note().parse("Bbasd");
        assert_eq!(result, Ok((NoteName::new(B, -1), "asd")));

        assert_eq!(
            parse_note_name("Bbasd"),
            Err(Error::format(Syntax::NoteName, "Bbasd"))
        );
    }

    #[test]
    fn parse_note_mixed_accidentals() {
        let result = note().parse("F#bb");
        assert_eq!(result, Ok((NoteName::new(F, 1), "bb")));
        assert!(parse_note_name("F#bb").is_err());
    }

    #[test]
    fn parse_intervals() {
        assert_eq!(parse_interval_name("1"), Ok(interval(N1, 0)));
        assert_eq!(parse_interval_name("13"), Ok(interval(N13, 0)));
        assert_eq!(parse_interval_name("##5"), Ok(interval(N5, 2)));
        assert!(parse_interval_name("12").is_err());
        assert!(parse_interval_name("10").is_err());
        assert!(parse_interval_name("b").is_err());
    }

    #[test]
    fn parse_roman() {
        assert_eq!(parse_roman_name("bIII"), Ok(interval(N3, -1)));
        assert_eq!(parse_roman_name("#iv"), Ok(interval(N4, 1)));
        assert_eq!(parse_roman_name("vii"), Ok(interval(N7, 0)));
        assert_eq!(parse_roman_name("VI"), Ok(interval(N6, 0)));
        assert!(parse_roman_name("Vii").is_err());
        assert!(parse_roman_name("VIII").is_err());
    }

    #[test]
    fn parse_simple_chord() {
        let parts = parse_chord_symbol("A#").unwrap();
        assert_eq!(parts.root, ChordRoot::Alphabetic(NoteName::new(A, 1)));
        assert_eq!(parts.quality, None);
        assert_eq!(parts.extension, None);
        assert!(parts.modifications.is_empty());
        assert_eq!(parts.slash, None);
    }

    #[test]
    fn parse_quality_prefers_longest_symbol() {
        let parts = parse_chord_symbol("Cmaj7").unwrap();
        assert_eq!(parts.quality, Some((Quality::Major, "maj")));
        assert_eq!(parts.extension, Some(Extension { marker: None, degree: N7 }));

        let parts = parse_chord_symbol("Cmin9").unwrap();
        assert_eq!(parts.quality, Some((Quality::Minor, "min")));

        let parts = parse_chord_symbol("C°7").unwrap();
        assert_eq!(parts.quality, Some((Quality::Diminished, "°")));
    }

    #[test]
    fn parse_minor_major_seventh() {
        let parts = parse_chord_symbol("CmMaj7").unwrap();
        assert_eq!(parts.quality, Some((Quality::Minor, "m")));
        assert_eq!(parts.extension, Some(Extension { marker: Some("Maj"), degree: N7 }));

        let parts = parse_chord_symbol("Cm11").unwrap();
        assert_eq!(parts.extension, Some(Extension { marker: None, degree: N11 }));
    }

    #[test]
    fn parse_modifications() {
        let parts = parse_chord_symbol("C7sus4b9add13no5+").unwrap();
        assert_eq!(
            parts.modifications,
            vec![
                Modification::Sus(Some(interval(N4, 0))),
                Modification::Interval(interval(N9, -1)),
                Modification::Add(interval(N13, 0)),
                Modification::Omit(interval(N5, 0)),
                Modification::Augment,
            ]
        );

        let parts = parse_chord_symbol("Csus").unwrap();
        assert_eq!(parts.modifications, vec![Modification::Sus(None)]);
    }

    #[test]
    fn parse_alterations_multi_spaced() {
        let parts = parse_chord_symbol("CMaj7( b5,   #11 , b9)").unwrap();
        assert_eq!(parts.quality, Some((Quality::Major, "Maj")));
        assert_eq!(
            parts.modifications,
            vec![
                Modification::Interval(interval(N5, -1)),
                Modification::Interval(interval(N11, 1)),
                Modification::Interval(interval(N9, -1)),
            ]
        );
    }

    #[test]
    fn parse_roman_chords() {
        let parts = parse_chord_symbol("bVIImaj7").unwrap();
        assert_eq!(parts.root, ChordRoot::Roman(interval(N7, -1)));
        assert_eq!(parts.quality, Some((Quality::Major, "maj")));

        let parts = parse_chord_symbol("iv7/I").unwrap();
        assert_eq!(parts.root, ChordRoot::Roman(interval(N4, 0)));
        assert_eq!(parts.slash, Some(ChordRoot::Roman(interval(N1, 0))));
    }

    #[test]
    fn parse_slash() {
        let parts = parse_chord_symbol("Amin7/G").unwrap();
        assert_eq!(parts.slash, Some(ChordRoot::Alphabetic(NoteName::new(G, 0))));

        let parts = parse_chord_symbol("C7(b9)/Bb").unwrap();
        assert_eq!(parts.slash, Some(ChordRoot::Alphabetic(NoteName::new(B, -1))));
    }

    #[test]
    fn parse_invalid_chords() {
        assert!(parse_chord_symbol("").is_err());
        assert!(parse_chord_symbol("H7").is_err());
        assert!(parse_chord_symbol("Cmaj7x").is_err());
        assert!(parse_chord_symbol("Cadd").is_err());
        assert!(parse_chord_symbol("C/").is_err());
        assert!(parse_chord_symbol("C#b5").is_ok());
        assert!(parse_chord_symbol("C#bb").is_err());
    }

    #[test]
    fn split_keynote() {
        assert_eq!(
            split_note_prefix("Eb dorian"),
            Some((NoteName::new(E, -1), " dorian"))
        );
        assert_eq!(split_note_prefix("dorian"), None);
    }
}
