//! The compact range encoding used by the dataset, e.g. `0-1:おとな;2:が`.
//!
//! Ranges are 0-based, inclusive and count characters (Unicode scalar values).

use crate::{
    error::ParseError,
    normalize::{self, Slot},
    Furigana, Ruby,
};
use std::{fmt, str::FromStr};

/// A single `N:RT` or `N-M:RT` spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSpec {
    pub start: usize,
    /// Inclusive.
    pub end: usize,
    pub rt: String,
}

impl FromStr for RangeSpec {
    type Err = ParseError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let Some((range, rt)) = spec
            .split_once(':')
            .filter(|(range, rt)| !range.is_empty() && !rt.is_empty())
        else {
            return Err(ParseError::MissingPart {
                spec: spec.to_string(),
            });
        };

        // `0:abc` is equivalent to `0-0:abc`
        let (left, right) = match range.split_once('-') {
            Some((left, right)) if !right.is_empty() => (left, right),
            Some((left, _)) => (left, left),
            None => (range, range),
        };
        let start = parse_bound(spec, left)?;
        let end = parse_bound(spec, right)?;
        if end < start {
            return Err(ParseError::ReversedRange {
                spec: spec.to_string(),
            });
        }

        Ok(Self {
            start,
            end,
            rt: rt.to_string(),
        })
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}:{}", self.start, self.rt)
        } else {
            write!(f, "{}-{}:{}", self.start, self.end, self.rt)
        }
    }
}

fn parse_bound(spec: &str, bound: &str) -> Result<usize, ParseError> {
    bound.parse().map_err(|source| ParseError::InvalidBound {
        spec: spec.to_string(),
        bound: bound.to_string(),
        source,
    })
}

/// Parses a `;`-separated list of range specs.
pub fn parse_range_specs(s: &str) -> Result<Vec<RangeSpec>, ParseError> {
    s.split(';').map(str::parse).collect()
}

/// Marks the characters of `text` covered by each spec.
///
/// Ranges outside the text and ranges overlapping an earlier spec are rejected.
pub fn claim(text: &str, specs: &[RangeSpec]) -> Result<Vec<Slot>, ParseError> {
    let chars = text.chars().collect::<Vec<_>>();
    let mut slots = chars.iter().copied().map(Slot::Unclaimed).collect::<Vec<_>>();

    for spec in specs {
        // the fields are public, so specs built by hand skip the check in `from_str`
        if spec.end < spec.start {
            return Err(ParseError::ReversedRange {
                spec: spec.to_string(),
            });
        }
        if spec.end >= chars.len() {
            return Err(ParseError::OutOfBounds {
                spec: spec.to_string(),
                text: text.to_string(),
                len: chars.len(),
            });
        }
        let span = &mut slots[spec.start..=spec.end];
        if span.iter().any(|s| !matches!(s, Slot::Unclaimed(_))) {
            return Err(ParseError::Overlap {
                spec: spec.to_string(),
                text: text.to_string(),
            });
        }

        let ruby = chars[spec.start..=spec.end].iter().collect::<String>();
        span[0] = Slot::Claimed(Ruby::new(ruby, spec.rt.clone()));
        span[1..].fill(Slot::Absorbed);
    }

    Ok(slots)
}

/// Decodes the range specs `s` over `text` into a normalised furigana sequence.
pub fn decode(text: &str, s: &str) -> Result<Vec<Furigana>, ParseError> {
    let specs = parse_range_specs(s)?;
    let slots = claim(text, &specs)?;
    Ok(normalize::normalize(slots))
}

/// Converts a furigana sequence to the range specs describing its ruby tokens.
/// Empty ruby tokens cover no characters and produce no spec.
pub fn to_range_specs(furigana: &[Furigana]) -> Vec<RangeSpec> {
    let mut specs = vec![];
    let mut idx = 0;
    for f in furigana {
        let len = f.text().chars().count();
        if let Furigana::Ruby(ruby) = f {
            if len > 0 {
                specs.push(RangeSpec {
                    start: idx,
                    end: idx + len - 1,
                    rt: ruby.rt.clone(),
                });
            }
        }
        idx += len;
    }
    specs
}

/// Renders a furigana sequence in the range encoding, e.g. `0-1:おとな;2:が`.
pub fn encode(furigana: &[Furigana]) -> String {
    to_range_specs(furigana)
        .iter()
        .map(RangeSpec::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_single_and_ranged_specs() {
        let specs = parse_range_specs("0-1:おとな;2:が").unwrap();
        assert_eq!(
            specs,
            vec![
                RangeSpec {
                    start: 0,
                    end: 1,
                    rt: "おとな".to_string()
                },
                RangeSpec {
                    start: 2,
                    end: 2,
                    rt: "が".to_string()
                },
            ]
        );
    }

    #[test]
    fn single_index_equals_degenerate_range() {
        let text = "お買い物";
        assert_eq!(decode(text, "3:もの"), decode(text, "3-3:もの"));
        assert_eq!(
            decode(text, "3:もの").unwrap(),
            vec![Furigana::from("お買い"), Ruby::new("物", "もの").into()]
        );
    }

    #[test]
    fn rejects_missing_parts() {
        for spec in ["0", "0:", ":が", ""] {
            assert!(
                matches!(spec.parse::<RangeSpec>(), Err(ParseError::MissingPart { .. })),
                "{spec}"
            );
        }
    }

    #[test]
    fn rejects_invalid_bounds() {
        for spec in ["a:が", "-1:が", "0-b:が", "1.5:が"] {
            assert!(
                matches!(spec.parse::<RangeSpec>(), Err(ParseError::InvalidBound { .. })),
                "{spec}"
            );
        }
    }

    #[test]
    fn rejects_reversed_range() {
        assert!(matches!(
            "2-1:が".parse::<RangeSpec>(),
            Err(ParseError::ReversedRange { .. })
        ));
        let reversed = RangeSpec {
            start: 1,
            end: 0,
            rt: "じ".to_string(),
        };
        assert!(matches!(
            claim("漢字", &[reversed]),
            Err(ParseError::ReversedRange { .. })
        ));
    }

    #[test]
    fn rejects_out_of_bounds() {
        let err = decode("漢字", "1-2:じ").unwrap_err();
        assert!(matches!(err, ParseError::OutOfBounds { len: 2, .. }));
    }

    #[test]
    fn rejects_overlap() {
        let err = decode("大人買い", "0-1:おとな;1:と").unwrap_err();
        assert!(matches!(err, ParseError::Overlap { .. }));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let furigana = decode("𠮟る", "0:しか").unwrap();
        assert_eq!(furigana, vec![Furigana::from(Ruby::new("𠮟", "しか")), "る".into()]);
    }

    #[test]
    fn encodes_ruby_positions() {
        let furigana = vec![
            Furigana::from("お"),
            Ruby::new("大人", "おとな").into(),
            Ruby::new("買", "が").into(),
            "い".into(),
        ];
        assert_eq!(encode(&furigana), "1-2:おとな;3:が");
        assert_eq!(decode("お大人買い", &encode(&furigana)).unwrap(), furigana);
    }
}
