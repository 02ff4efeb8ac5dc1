//! The fixed, ordered substitution table.
//!
//! Entries are applied top to bottom; each one sees the output of the entry
//! before it. The whitespace collapse is last so that spaces restored from
//! checkmark markers are collapsed together with spaces already present.

use std::fmt;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use serde::Serialize;

/// Pipeline stage a substitution belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Markers,
    Operators,
    Quotes,
    LineEndings,
    Whitespace,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Markers => "markers",
            Stage::Operators => "operators",
            Stage::Quotes => "quotes",
            Stage::LineEndings => "line_endings",
            Stage::Whitespace => "whitespace",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub enum Matcher {
    Literal(&'static str),
    Pattern(Regex),
}

impl Matcher {
    /// Printable form of the pattern: literals are quoted with non-ASCII and
    /// control characters escaped, regexes are wrapped in slashes.
    pub fn display_pattern(&self) -> String {
        match self {
            Matcher::Literal(needle) => format!("\"{}\"", escape(needle)),
            Matcher::Pattern(re) => format!("/{}/", re.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Substitution {
    pub stage: Stage,
    pub matcher: Matcher,
    pub replacement: &'static str,
}

impl Substitution {
    fn literal(stage: Stage, needle: &'static str, replacement: &'static str) -> Self {
        Self {
            stage,
            matcher: Matcher::Literal(needle),
            replacement,
        }
    }

    /// Apply this rule once over `text`, returning the result and the number
    /// of non-overlapping matches replaced.
    ///
    /// When nothing matches, `text` is handed back without reallocating.
    pub fn apply(&self, text: String) -> (String, usize) {
        match &self.matcher {
            Matcher::Literal(needle) => {
                let count = text.matches(needle).count();
                if count == 0 {
                    return (text, 0);
                }
                (text.replace(needle, self.replacement), count)
            }
            Matcher::Pattern(re) => {
                let count = re.find_iter(&text).count();
                if count == 0 {
                    return (text, 0);
                }
                let replaced = re.replace_all(&text, NoExpand(self.replacement)).into_owned();
                (replaced, count)
            }
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "{} {} -> \"{}\"",
            self.stage,
            self.matcher.display_pattern(),
            escape(self.replacement)
        )
    }
}

#[derive(Debug, Clone)]
pub struct SubstitutionTable(Vec<Substitution>);

impl SubstitutionTable {
    pub fn new(entries: Vec<Substitution>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Substitution> {
        self.0.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a> IntoIterator for &'a SubstitutionTable {
    type Item = &'a Substitution;
    type IntoIter = std::slice::Iter<'a, Substitution>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

static DEFAULT_TABLE: LazyLock<SubstitutionTable> = LazyLock::new(build_default_table);

/// The restoration table used by the CLI.
pub fn default_table() -> &'static SubstitutionTable {
    &DEFAULT_TABLE
}

fn build_default_table() -> SubstitutionTable {
    use Stage::{LineEndings, Markers, Operators, Quotes, Whitespace};

    SubstitutionTable::new(vec![
        Substitution::literal(Markers, "\u{2713}", " "),
        Substitution::literal(Markers, "\u{274C}", "X"),
        Substitution::literal(Operators, "\u{1F4CB}", "="),
        Substitution::literal(Operators, "\u{1F50D}", "<"),
        Substitution::literal(Operators, "\u{1F9F9}", ">"),
        Substitution::literal(Operators, "\u{1F4CA}", "9"),
        Substitution::literal(Quotes, "\u{2018}", "'"),
        Substitution::literal(Quotes, "\u{2019}", "'"),
        Substitution::literal(Quotes, "\u{201C}", "\""),
        Substitution::literal(Quotes, "\u{201D}", "\""),
        // CRLF must go before lone CR, otherwise it would become two newlines.
        Substitution::literal(LineEndings, "\r\n", "\n"),
        Substitution::literal(LineEndings, "\r", "\n"),
        Substitution {
            stage: Whitespace,
            matcher: Matcher::Pattern(Regex::new(" {3,}").unwrap()),
            replacement: "  ",
        },
    ])
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '"' => out.push_str("\\\""),
            c if c == ' ' || c.is_ascii_graphic() => out.push(c),
            c => out.push_str(&format!("\\u{{{:04X}}}", c as u32)),
        }
    }
    out
}
