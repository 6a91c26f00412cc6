//! RFC 6901 JSON pointers.
//!
//! A pointer is a sequence of reference tokens, written as `/`-separated
//! segments. Inside a segment `~` is written `~0` and `/` is written `~1`.
//! The empty string is the root pointer and addresses the whole document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// A location inside a value tree.
///
/// Segments are stored unescaped; escaping happens only in [`Display`] and
/// parsing.
///
/// [`Display`]: fmt::Display
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsonPointer {
    segments: Vec<String>,
}

impl JsonPointer {
    /// The root pointer (`""`).
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns `true` if this pointer addresses the whole document.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The unescaped segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The last segment, if any.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Append a segment in place.
    pub fn push(&mut self, key: impl Into<String>) {
        self.segments.push(key.into());
    }

    /// Remove and return the last segment.
    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }

    /// A new pointer one level below this one.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.push(key);
        next
    }

    /// Parse a pointer from its RFC 6901 string form.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsondelta_types::JsonPointer;
    ///
    /// let ptr = JsonPointer::parse("/a~1b/c~0d").unwrap();
    /// assert_eq!(ptr.segments(), ["a/b", "c~d"]);
    /// assert!(JsonPointer::parse("").unwrap().is_root());
    /// assert!(JsonPointer::parse("no-slash").is_err());
    /// assert!(JsonPointer::parse("/bad~2").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = s.strip_prefix('/') else {
            return Err(TypeError::InvalidPointer(s.to_string()));
        };

        let mut segments = Vec::new();
        // Byte offset of the current segment within `s`.
        let mut offset = 1;
        for raw in rest.split('/') {
            segments.push(unescape(raw, s, offset)?);
            offset += raw.len() + 1;
        }
        Ok(Self { segments })
    }
}

fn unescape(raw: &str, pointer: &str, offset: usize) -> Result<String, TypeError> {
    if !raw.contains('~') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();
    while let Some((i, ch)) = chars.next() {
        if ch != '~' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some((_, '0')) => out.push('~'),
            Some((_, '1')) => out.push('/'),
            _ => {
                return Err(TypeError::InvalidEscape {
                    pointer: pointer.to_string(),
                    position: offset + i,
                })
            }
        }
    }
    Ok(out)
}

fn escape(segment: &str) -> std::borrow::Cow<'_, str> {
    if segment.contains(['~', '/']) {
        segment.replace('~', "~0").replace('/', "~1").into()
    } else {
        segment.into()
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", escape(segment))?;
        }
        Ok(())
    }
}

impl fmt::Debug for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsonPointer({:?})", self.to_string())
    }
}

impl FromStr for JsonPointer {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<S: Into<String>> FromIterator<S> for JsonPointer {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Serialize for JsonPointer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for JsonPointer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
