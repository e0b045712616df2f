//! Regex substitution on file names.
//!
//! Replacement templates use the backslash dialect typed on the command line
//! (`\1`, `\g<0>`, `\g<name>`) and are translated once into the `regex`
//! crate's `${group}` syntax. Literal `$` in the input is escaped so it can
//! never be read as a group reference.

use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

use crate::errors::XmvError;

/// Compiled pattern plus its translated replacement template.
#[derive(Debug, Clone)]
pub struct Substitution {
    regex: Regex,
    template: String,
}

impl Substitution {
    /// Compile `pattern` and translate `replacement` against its capture groups.
    pub fn new(pattern: &str, replacement: &str, ignore_case: bool) -> Result<Self, XmvError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()
            .map_err(|e| XmvError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        let template = translate_template(replacement, &regex)?;
        Ok(Self { regex, template })
    }

    /// Replace every non-overlapping match in `name`.
    pub fn apply<'h>(&self, name: &'h str) -> Cow<'h, str> {
        self.regex.replace_all(name, self.template.as_str())
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Template in `regex` crate syntax.
    pub fn template(&self) -> &str {
        &self.template
    }
}

/// Translate a backslash-style template into `regex` expansion syntax.
///
/// - `\N` / `\NN`: numbered group (`\0` is the whole match)
/// - `\g<N>` / `\g<name>`: numbered or named group
/// - `\\`, `\n`, `\t`, `\r`: escapes
/// - `$`: literal dollar
/// - any other `\x` is kept as-is
pub fn translate_template(replacement: &str, regex: &Regex) -> Result<String, XmvError> {
    let invalid = |reason: String| XmvError::InvalidReplacement {
        replacement: replacement.to_string(),
        reason,
    };

    let mut out = String::with_capacity(replacement.len() + 8);
    let mut chars = replacement.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '$' => out.push_str("$$"),
            '\\' => match chars.next() {
                None => return Err(invalid("trailing backslash".into())),
                Some(d) if d.is_ascii_digit() => {
                    let mut num = String::from(d);
                    if let Some(&next) = chars.peek() {
                        if next.is_ascii_digit() {
                            num.push(next);
                            chars.next();
                        }
                    }
                    check_index(&num, regex).map_err(invalid)?;
                    push_group(&mut out, &num);
                }
                Some('g') => {
                    if chars.next() != Some('<') {
                        return Err(invalid("expected '<' after \\g".into()));
                    }
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('>') => break,
                            Some(ch) => name.push(ch),
                            None => return Err(invalid("unterminated \\g<...> reference".into())),
                        }
                    }
                    if name.is_empty() {
                        return Err(invalid("empty \\g<> reference".into()));
                    }
                    if name.chars().all(|ch| ch.is_ascii_digit()) {
                        check_index(&name, regex).map_err(invalid)?;
                    } else if !regex.capture_names().flatten().any(|n| n == name) {
                        return Err(invalid(format!("unknown group name '{name}'")));
                    }
                    push_group(&mut out, &name);
                }
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('\\') => out.push('\\'),
                Some('$') => out.push_str("\\$$"),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
            },
            other => out.push(other),
        }
    }

    Ok(out)
}

fn check_index(num: &str, regex: &Regex) -> Result<(), String> {
    let idx: usize = num
        .parse()
        .map_err(|_| format!("invalid group reference '{num}'"))?;
    if idx >= regex.captures_len() {
        return Err(format!("invalid group reference {idx}"));
    }
    Ok(())
}

#[inline]
fn push_group(out: &mut String, group: &str) {
    out.push_str("${");
    out.push_str(group);
    out.push('}');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(pattern: &str, replacement: &str, name: &str) -> String {
        Substitution::new(pattern, replacement, false)
            .unwrap()
            .apply(name)
            .into_owned()
    }

    #[test]
    fn numbered_backreference() {
        assert_eq!(sub(r"^HIM-(.+)$", r"HIM/\1", "HIM-song.mp3"), "HIM/song.mp3");
    }

    #[test]
    fn full_match_reference() {
        assert_eq!(sub(r"^\d+", r"track-\g<0>", "07 intro.ogg"), "track-07 intro.ogg");
        assert_eq!(sub(r"^\d+", r"[\0]", "07.ogg"), "[07].ogg");
    }

    #[test]
    fn named_group_reference() {
        assert_eq!(
            sub(r"^(?P<artist>\w+)-(?P<title>\w+)", r"\g<title>-\g<artist>", "him-song.mp3"),
            "song-him.mp3"
        );
    }

    #[test]
    fn group_followed_by_letters_is_not_ambiguous() {
        // `$1abc` would read group "1abc" in regex syntax
        assert_eq!(sub(r"^(\w)", r"\1abc", "x.txt"), "xabc.txt");
    }

    #[test]
    fn dollar_is_literal() {
        assert_eq!(sub(r"^a", "$1", "a.txt"), "$1.txt");
    }

    #[test]
    fn replaces_every_match() {
        assert_eq!(sub(" ", "_", "a b c.txt"), "a_b_c.txt");
    }

    #[test]
    fn unknown_escape_kept() {
        assert_eq!(sub("x", r"\q", "x"), r"\q");
        assert_eq!(sub("x", r"\\", "x"), r"\");
    }

    #[test]
    fn case_insensitive() {
        let s = Substitution::new("^him-", "", true).unwrap();
        assert_eq!(s.apply("HIM-song.mp3"), "song.mp3");
        let s = Substitution::new("^him-", "", false).unwrap();
        assert_eq!(s.apply("HIM-song.mp3"), "HIM-song.mp3");
    }

    #[test]
    fn rejects_missing_group() {
        let err = Substitution::new("^(a)", r"\2", false).unwrap_err();
        assert!(matches!(err, XmvError::InvalidReplacement { .. }));
        let err = Substitution::new("^(a)", r"\g<nope>", false).unwrap_err();
        assert!(matches!(err, XmvError::InvalidReplacement { .. }));
    }

    #[test]
    fn rejects_malformed_g_reference() {
        for bad in [r"\g", r"\g<1", r"\g<>", "x\\"] {
            let err = Substitution::new("(a)", bad, false).unwrap_err();
            assert!(matches!(err, XmvError::InvalidReplacement { .. }), "{bad}");
        }
    }

    #[test]
    fn rejects_bad_pattern() {
        let err = Substitution::new("(", "", false).unwrap_err();
        assert!(matches!(err, XmvError::InvalidPattern { .. }));
        assert!(err.is_config_error());
    }
}
