#![forbid(unsafe_code)]

//! Compound CSS selector matching for the synthetic document.
//!
//! Supported: one compound selector made of an optional tag name followed by
//! any number of `#id`, `.class`, and `[attr="value"]` / `[attr]` parts, e.g.
//! `a[href="#intro"]`, `li.toc#intro`, `.nav-link`. Combinators (whitespace,
//! `>`, `+`, `~`) and selector lists (`,`) are rejected with
//! [`SelectorError::Unsupported`].

use core::fmt;

/// Selector parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// The selector was empty.
    Empty,
    /// A construct outside the supported compound subset.
    Unsupported(String),
    /// Syntax error at the given byte offset.
    Malformed { selector: String, offset: usize },
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty selector"),
            Self::Unsupported(sel) => write!(f, "unsupported selector: {sel}"),
            Self::Malformed { selector, offset } => {
                write!(f, "malformed selector `{selector}` at byte {offset}")
            }
        }
    }
}

impl std::error::Error for SelectorError {}

/// One attribute condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrMatch {
    /// `[name]`
    Present(String),
    /// `[name="value"]`
    Equals(String, String),
}

/// A parsed compound selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrMatch>,
}

/// What an element exposes to selector matching.
pub trait Matchable {
    fn tag(&self) -> &str;
    fn id(&self) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
    fn attr(&self, name: &str) -> Option<&str>;
}

impl Selector {
    /// Parse a compound selector.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut parser = Parser {
            src: input,
            pos: 0,
        };
        parser.compound()
    }

    /// Whether `element` satisfies every part of this selector.
    pub fn matches<E: Matchable + ?Sized>(&self, element: &E) -> bool {
        if let Some(tag) = &self.tag
            && !tag.eq_ignore_ascii_case(element.tag())
        {
            return false;
        }
        if let Some(id) = &self.id
            && element.id() != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|attr| match attr {
            AttrMatch::Present(name) => element.attr(name).is_some(),
            AttrMatch::Equals(name, value) => element.attr(name) == Some(value.as_str()),
        })
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn malformed(&self) -> SelectorError {
        SelectorError::Malformed {
            selector: self.src.to_owned(),
            offset: self.pos,
        }
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '-' || ch == '_' {
                self.bump();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.malformed());
        }
        Ok(self.src[start..self.pos].to_owned())
    }

    fn compound(&mut self) -> Result<Selector, SelectorError> {
        let mut selector = Selector::default();
        if self.peek().is_some_and(|c| c.is_alphabetic()) {
            selector.tag = Some(self.ident()?.to_ascii_lowercase());
        } else if self.peek() == Some('*') {
            self.bump();
        }

        while let Some(ch) = self.peek() {
            match ch {
                '#' => {
                    self.bump();
                    selector.id = Some(self.ident()?);
                }
                '.' => {
                    self.bump();
                    selector.classes.push(self.ident()?);
                }
                '[' => {
                    self.bump();
                    selector.attrs.push(self.attr()?);
                }
                c if c.is_whitespace() || matches!(c, '>' | '+' | '~' | ',') => {
                    return Err(SelectorError::Unsupported(self.src.to_owned()));
                }
                _ => return Err(self.malformed()),
            }
        }
        Ok(selector)
    }

    fn attr(&mut self) -> Result<AttrMatch, SelectorError> {
        let name = self.ident()?;
        match self.bump() {
            Some(']') => Ok(AttrMatch::Present(name)),
            Some('=') => {
                let value = match self.peek() {
                    Some(quote @ ('"' | '\'')) => {
                        self.bump();
                        let start = self.pos;
                        while self.peek().is_some_and(|c| c != quote) {
                            self.bump();
                        }
                        let value = self.src[start..self.pos].to_owned();
                        if self.bump() != Some(quote) {
                            return Err(self.malformed());
                        }
                        value
                    }
                    _ => self.ident()?,
                };
                if self.bump() != Some(']') {
                    return Err(self.malformed());
                }
                Ok(AttrMatch::Equals(name, value))
            }
            _ => Err(self.malformed()),
        }
    }
}
