//! Property path tokenization
//!
//! Splits dotted, optionally indexed property paths such as
//! `orders[0].items[1].name` into segments. Each tokenizer value is one
//! segment plus the unparsed remainder; advancing re-parses the remainder
//! into a fresh value, so a path is a lazy, forward-only sequence of
//! immutable segments. A `.` preceded by `\` is literal content, not a
//! separator.

use crate::error::ReflectError;

/// One parsed segment of a property path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyTokenizer {
    name: String,
    indexed_name: String,
    index: Option<String>,
    children: Option<String>,
}

impl PropertyTokenizer {
    /// Parse the first segment of a path
    pub fn new(fullname: &str) -> Self {
        let (head, children) = match find_unescaped_dot(fullname) {
            Some(pos) => (&fullname[..pos], Some(fullname[pos + 1..].to_string())),
            None => (fullname, None),
        };

        let indexed_name = head.to_string();
        let (name, index) = match head.find('[') {
            Some(open) => {
                let inner = &head[open + 1..];
                let close = inner.rfind(']').unwrap_or(inner.len());
                (head[..open].to_string(), Some(inner[..close].to_string()))
            }
            None => (head.to_string(), None),
        };

        Self {
            name,
            indexed_name,
            index,
            children,
        }
    }

    /// Property name of this segment, with any index stripped
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index or key text found inside `[...]`, if any
    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// The segment as originally written, index brackets included
    pub fn indexed_name(&self) -> &str {
        &self.indexed_name
    }

    /// Unparsed path after the first separator, absent at the last segment
    pub fn children(&self) -> Option<&str> {
        self.children.as_deref()
    }

    /// Whether a further segment follows
    pub fn has_next(&self) -> bool {
        self.children.is_some()
    }

    /// Parse the next segment out of the remainder
    pub fn advance(&self) -> Option<PropertyTokenizer> {
        self.children.as_deref().map(PropertyTokenizer::new)
    }

    /// Iterate the remaining segments, this one included
    pub fn segments(self) -> Segments {
        Segments {
            current: Some(self),
        }
    }
}

impl IntoIterator for PropertyTokenizer {
    type Item = PropertyTokenizer;
    type IntoIter = Segments;

    fn into_iter(self) -> Segments {
        self.segments()
    }
}

/// Forward-only iterator over path segments
///
/// Segments are read-only views over the original string; the sequence can
/// only be walked from the front, and removal is rejected.
#[derive(Debug, Clone)]
pub struct Segments {
    current: Option<PropertyTokenizer>,
}

impl Segments {
    /// Removing a segment has no meaning for a path view
    pub fn remove(&mut self) -> Result<(), ReflectError> {
        Err(ReflectError::UnsupportedOperation {
            operation: "remove a property path segment".to_string(),
        })
    }
}

impl Iterator for Segments {
    type Item = PropertyTokenizer;

    fn next(&mut self) -> Option<PropertyTokenizer> {
        let current = self.current.take()?;
        self.current = current.advance();
        Some(current)
    }
}

/// Position of the first `.` that is not preceded by a `\` escape
fn find_unescaped_dot(path: &str) -> Option<usize> {
    let mut escaped = false;
    for (pos, ch) in path.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '.' => return Some(pos),
            _ => {}
        }
    }
    None
}
