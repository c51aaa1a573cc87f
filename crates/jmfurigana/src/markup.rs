//! Converts furigana to and from `{ruby}^{rt}` bracket markup,
//! e.g. `{大人}^{おとな}{買}^{が}い`.
//!
//! `{` and `}` are reserved and there is no escaping, so plain text containing
//! them cannot be encoded.

use crate::{error::UnsafeContentError, normalize::Normalizer, Furigana, Ruby};
use regex::Regex;
use std::sync::LazyLock;

// `.` does not match a newline, so neither the ruby nor the reading can span lines
static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(.+?)\}\^\{(.+?)\}").expect("Failed to compile markup regex")
});

/// Renders furigana as bracket markup.
///
/// Fails on tokens that would not decode back to themselves: text containing
/// braces, and rubies with an empty or multi-line ruby or reading.
pub fn furigana_to_string(furigana: &[Furigana]) -> Result<String, UnsafeContentError> {
    if let Some(token) = furigana.iter().find(|f| !is_encodable(f)) {
        let token = match token {
            Furigana::Plain(plain) => plain.clone(),
            Furigana::Ruby(ruby) => format!("{} ({})", ruby.ruby, ruby.rt),
        };
        return Err(UnsafeContentError { token });
    }

    let mut s = String::new();
    for f in furigana {
        match f {
            Furigana::Plain(plain) => s.push_str(plain),
            Furigana::Ruby(ruby) => {
                s.push('{');
                s.push_str(&ruby.ruby);
                s.push_str("}^{");
                s.push_str(&ruby.rt);
                s.push('}');
            }
        }
    }
    Ok(s)
}

fn is_encodable(furigana: &Furigana) -> bool {
    let has_brace = |s: &str| s.contains(['{', '}']);
    let is_ruby_part = |s: &str| !s.is_empty() && !s.contains('\n') && !has_brace(s);
    match furigana {
        Furigana::Plain(plain) => !has_brace(plain),
        Furigana::Ruby(ruby) => is_ruby_part(&ruby.ruby) && is_ruby_part(&ruby.rt),
    }
}

/// Parses bracket markup into normalised furigana.
///
/// Each leftmost `{X}^{Y}` with non-empty `X` and `Y` becomes a ruby, taking
/// the shortest `X` and `Y` that match. Neither may span a newline.
/// Everything else is plain text.
pub fn string_to_furigana(s: &str) -> Vec<Furigana> {
    let mut normalizer = Normalizer::new();
    let mut plain_start = 0;
    for captures in MARKUP.captures_iter(s) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let (_, [ruby, rt]) = captures.extract();
        normalizer.push_plain(&s[plain_start..whole.start()]);
        normalizer.push_ruby(Ruby::new(ruby, rt));
        plain_start = whole.end();
    }
    normalizer.push_plain(&s[plain_start..]);
    normalizer.finish()
}

#[cfg(test)]
mod test {
    use super::*;

    fn otonagai() -> Vec<Furigana> {
        vec![
            Ruby::new("大人", "おとな").into(),
            Ruby::new("買", "が").into(),
            "い".into(),
        ]
    }

    #[test]
    fn encodes() {
        assert_eq!(
            furigana_to_string(&otonagai()).unwrap(),
            "{大人}^{おとな}{買}^{が}い"
        );
    }

    #[test]
    fn decodes() {
        assert_eq!(string_to_furigana("{大人}^{おとな}{買}^{が}い"), otonagai());
    }

    #[test]
    fn round_trips() {
        let cases = [
            otonagai(),
            vec![Furigana::from("お"), Ruby::new("見舞", "みま").into(), "い".into()],
            vec![Furigana::from("ひらがなだけ")],
            vec![Ruby::new("明後日", "あさって").into()],
            vec![],
        ];
        for furigana in cases {
            let s = furigana_to_string(&furigana).unwrap();
            assert_eq!(string_to_furigana(&s), furigana, "{s}");
        }
    }

    #[test]
    fn rejects_braces() {
        let err = furigana_to_string(&[Furigana::from("a{b")]).unwrap_err();
        assert_eq!(err.token, "a{b");
        assert!(furigana_to_string(&[Furigana::from(Ruby::new("字", "}"))]).is_err());
    }

    #[test]
    fn rejects_tokens_that_do_not_round_trip() {
        for ruby in [
            Ruby::new("", "じ"),
            Ruby::new("字", ""),
            Ruby::new("字\n", "じ"),
            Ruby::new("字", "じ\n"),
        ] {
            let err = furigana_to_string(&[Furigana::from(ruby.clone())]).unwrap_err();
            assert_eq!(err.token, format!("{} ({})", ruby.ruby, ruby.rt));
        }
        // newlines are fine in plain text
        assert_eq!(
            furigana_to_string(&[Furigana::from("あ\nい")]).unwrap(),
            "あ\nい"
        );
    }

    #[test]
    fn leaves_incomplete_markup_as_text() {
        assert_eq!(string_to_furigana("{字}じ"), vec![Furigana::from("{字}じ")]);
        assert_eq!(string_to_furigana("{}^{じ}"), vec![Furigana::from("{}^{じ}")]);
        assert_eq!(string_to_furigana("{字}^{}"), vec![Furigana::from("{字}^{}")]);
        assert_eq!(
            string_to_furigana("{字\n}^{じ}"),
            vec![Furigana::from("{字\n}^{じ}")]
        );
    }

    #[test]
    fn takes_shortest_match() {
        assert_eq!(
            string_to_furigana("あ{字}^{じ}}い"),
            vec![Furigana::from("あ"), Ruby::new("字", "じ").into(), "}い".into()]
        );
    }

    #[test]
    fn reading_ends_at_first_closing_brace() {
        assert_eq!(
            string_to_furigana("{a}^{b}^{c}"),
            vec![Furigana::from(Ruby::new("a", "b")), "^{c}".into()]
        );
        // the reading is at least one character long, even if that character is a brace
        assert_eq!(
            string_to_furigana("{a}^{}^{b}"),
            vec![Furigana::from(Ruby::new("a", "}^{b"))]
        );
        assert_eq!(
            string_to_furigana("{a}^{\n}^{b}"),
            vec![Furigana::from("{a}^{\n}^{b}")]
        );
    }
}
