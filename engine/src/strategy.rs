//! Naming strategies: pure functions mapping an ordered file list to an
//! ordered list of proposed names.
//!
//! Strategy selection is a closed enum dispatched through one exhaustive
//! match, so an unknown mode is a compile-time impossibility rather than a
//! silently ignored string tag. All strategies return exactly one name per
//! input file, in input order, and never inspect file contents.

use chrono::Local;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EngineError;
use crate::format::human_size;
use crate::model::FileEntry;

/// Case transformation applied to the file stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    /// Lowercase the whole stem
    Lower,
    /// Uppercase the whole stem
    Upper,
    /// Capitalize each whitespace/underscore/hyphen-delimited word
    Title,
    /// camelCase: first segment lowercased, later segments capitalized,
    /// separators removed
    Camel,
}

impl fmt::Display for CaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lower => write!(f, "lower"),
            Self::Upper => write!(f, "upper"),
            Self::Title => write!(f, "title"),
            Self::Camel => write!(f, "camel"),
        }
    }
}

impl CaseMode {
    /// Parse a mode from its CLI/settings spelling. Unknown spellings are
    /// rejected here instead of silently passing names through unchanged.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lower" => Some(Self::Lower),
            "upper" => Some(Self::Upper),
            "title" => Some(Self::Title),
            "camel" => Some(Self::Camel),
            _ => None,
        }
    }
}

/// A batch renaming strategy with its parameters.
#[derive(Debug, Clone)]
pub enum NamingStrategy {
    /// `base_name_NNN.ext` with a zero-padded counter
    Sequential { base_name: String, start_number: u32 },

    /// Template substitution over `{name} {ext} {counter} {date} {time} {size}`
    Template { template: String },

    /// Case transformation of the stem, extension untouched
    CaseTransform { mode: CaseMode },

    /// Regex substitution over the full file name including extension
    RegexReplace { pattern: String, replacement: String },
}

impl NamingStrategy {
    /// Propose one new name per file, in input order.
    ///
    /// # Errors
    /// - `EngineError::Template` for unknown placeholders or unbalanced braces
    /// - `EngineError::InvalidPattern` when the regex fails to compile
    pub fn propose(&self, files: &[FileEntry]) -> Result<Vec<String>, EngineError> {
        match self {
            Self::Sequential {
                base_name,
                start_number,
            } => Ok(propose_sequential(files, base_name, *start_number)),
            Self::Template { template } => propose_template(files, template),
            Self::CaseTransform { mode } => Ok(propose_case(files, *mode)),
            Self::RegexReplace {
                pattern,
                replacement,
            } => propose_regex(files, pattern, replacement),
        }
    }
}

fn propose_sequential(files: &[FileEntry], base_name: &str, start_number: u32) -> Vec<String> {
    files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            // Widened so a start near u32::MAX cannot overflow
            let number = start_number as u64 + i as u64;
            format!("{}_{:03}{}", base_name, number, file.extension())
        })
        .collect()
}

/// One parsed template piece.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Placeholder(Placeholder),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Name,
    Ext,
    Counter,
    Date,
    Time,
    Size,
}

impl Placeholder {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "ext" => Some(Self::Ext),
            "counter" => Some(Self::Counter),
            "date" => Some(Self::Date),
            "time" => Some(Self::Time),
            "size" => Some(Self::Size),
            _ => None,
        }
    }
}

/// Parse a template into literal and placeholder tokens.
///
/// `{{` and `}}` escape literal braces; any other stray brace or an unknown
/// placeholder name is a template error.
fn parse_template(template: &str) -> Result<Vec<Token>, EngineError> {
    let err = |reason: String| EngineError::Template {
        template: template.to_string(),
        reason,
    };

    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    literal.push('{');
                    continue;
                }

                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => return Err(err(format!("unclosed placeholder '{{{}'", name))),
                    }
                }

                let placeholder = Placeholder::parse(&name)
                    .ok_or_else(|| err(format!("unknown placeholder '{{{}}}'", name)))?;

                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Placeholder(placeholder));
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    literal.push('}');
                } else {
                    return Err(err("unmatched '}'".to_string()));
                }
            }
            c => literal.push(c),
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }

    Ok(tokens)
}

fn propose_template(files: &[FileEntry], template: &str) -> Result<Vec<String>, EngineError> {
    let tokens = parse_template(template)?;

    // One timestamp for the whole batch: every file in a single invocation
    // carries the stamp of this batch operation.
    let now = Local::now();
    let date = now.format("%Y-%m-%d").to_string();
    let time = now.format("%H-%M-%S").to_string();

    let names = files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let mut name = String::new();
            for token in &tokens {
                match token {
                    Token::Literal(text) => name.push_str(text),
                    Token::Placeholder(Placeholder::Name) => name.push_str(file.stem()),
                    Token::Placeholder(Placeholder::Ext) => name.push_str(file.extension()),
                    Token::Placeholder(Placeholder::Counter) => {
                        name.push_str(&format!("{:03}", i + 1))
                    }
                    Token::Placeholder(Placeholder::Date) => name.push_str(&date),
                    Token::Placeholder(Placeholder::Time) => name.push_str(&time),
                    Token::Placeholder(Placeholder::Size) => {
                        name.push_str(&human_size(file.size))
                    }
                }
            }
            name
        })
        .collect();

    Ok(names)
}

fn propose_case(files: &[FileEntry], mode: CaseMode) -> Vec<String> {
    files
        .iter()
        .map(|file| {
            let stem = file.stem();
            let transformed = match mode {
                CaseMode::Lower => stem.to_lowercase(),
                CaseMode::Upper => stem.to_uppercase(),
                CaseMode::Title => title_case(stem),
                CaseMode::Camel => camel_case(stem),
            };
            format!("{}{}", transformed, file.extension())
        })
        .collect()
}

fn is_separator(c: char) -> bool {
    c == '_' || c == '-' || c.is_whitespace()
}

/// Capitalize the first letter of each separator-delimited word and
/// lowercase the rest; separators are kept in place.
fn title_case(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut word_start = true;

    for c in stem.chars() {
        if is_separator(c) {
            out.push(c);
            word_start = true;
        } else if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}

/// Join separator-delimited segments: first segment lowercased, later
/// segments capitalized on their first letter with the remainder unchanged.
fn camel_case(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());

    for (i, segment) in stem
        .split(is_separator)
        .filter(|s| !s.is_empty())
        .enumerate()
    {
        if i == 0 {
            out.push_str(&segment.to_lowercase());
        } else {
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }

    out
}

/// Rewrite `\1`-style backreferences into the `${1}` form the regex crate
/// expands. `\\` escapes a literal backslash.
fn normalize_backrefs(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            Some(d) if d.is_ascii_digit() => {
                out.push_str("${");
                while let Some(&d) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    out.push(d);
                    chars.next();
                }
                out.push('}');
            }
            Some('\\') => {
                chars.next();
                out.push('\\');
            }
            _ => out.push('\\'),
        }
    }

    out
}

fn propose_regex(
    files: &[FileEntry],
    pattern: &str,
    replacement: &str,
) -> Result<Vec<String>, EngineError> {
    let compiled = Regex::new(pattern).map_err(|e| EngineError::InvalidPattern {
        pattern: pattern.to_string(),
        source: Box::new(e),
    })?;

    let replacement = normalize_backrefs(replacement);

    Ok(files
        .iter()
        .map(|file| {
            compiled
                .replace_all(&file.file_name, replacement.as_str())
                .into_owned()
        })
        .collect())
}
