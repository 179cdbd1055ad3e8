// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use indexmap::IndexMap;

use crate::parser::coerce;

/// A typed scalar inferred from a raw token.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// One entry of a document. The shape depends on how often the key occurs
/// at its nesting level and whether its value is a block.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    Scalar(ScalarValue),
    ScalarList(Vec<ScalarValue>), // repeated key, e.g. two `wwid` lines
    Section(Document),
    SectionList(Vec<Document>), // repeated block, e.g. several `multipath { }`
}

/// An ordered mapping from key to node. Keys are unique per level.
///
/// Scalars read from text also keep the word as it was written, so `007` or
/// `true` can be recovered exactly through [`Document::verbatim`]. Equality
/// compares the typed entries only.
#[derive(Debug, Clone, Default)]
pub struct Document {
    entries: IndexMap<String, DocumentNode>,
    spellings: IndexMap<String, Vec<String>>,
}

impl ScalarValue {
    pub fn as_bool(&self) -> Option<bool> {
        if let ScalarValue::Bool(b) = self { Some(*b) } else { None }
    }

    pub fn as_int(&self) -> Option<i64> {
        if let ScalarValue::Int(n) = self { Some(*n) } else { None }
    }

    /// Integers widen to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ScalarValue::Float(f) => Some(*f),
            ScalarValue::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        if let ScalarValue::Text(s) = self { Some(s) } else { None }
    }
}

/// Renders the value the way it is written in a config file: booleans as
/// `yes`/`no`, floats always with a fractional part so they re-coerce as floats.
impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Bool(true) => f.write_str("yes"),
            ScalarValue::Bool(false) => f.write_str("no"),
            ScalarValue::Int(n) => write!(f, "{}", n),
            ScalarValue::Float(x) => write!(f, "{:?}", x),
            ScalarValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Bool(b)
    }
}

impl From<i64> for ScalarValue {
    fn from(n: i64) -> Self {
        ScalarValue::Int(n)
    }
}

impl From<i32> for ScalarValue {
    fn from(n: i32) -> Self {
        ScalarValue::Int(n as i64)
    }
}

impl From<f64> for ScalarValue {
    fn from(x: f64) -> Self {
        ScalarValue::Float(x)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::Text(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::Text(s)
    }
}

impl DocumentNode {
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        if let DocumentNode::Scalar(v) = self { Some(v) } else { None }
    }

    pub fn as_section(&self) -> Option<&Document> {
        if let DocumentNode::Section(d) = self { Some(d) } else { None }
    }

    /// True for `Section` and `SectionList`.
    pub fn is_section(&self) -> bool {
        matches!(self, DocumentNode::Section(_) | DocumentNode::SectionList(_))
    }

    /// All scalars held by this node; a single scalar yields one element,
    /// sections yield none.
    pub fn scalars(&self) -> Vec<&ScalarValue> {
        match self {
            DocumentNode::Scalar(v) => vec![v],
            DocumentNode::ScalarList(vs) => vs.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// All sections held by this node; a single section yields one element.
    pub fn sections(&self) -> Vec<&Document> {
        match self {
            DocumentNode::Section(d) => vec![d],
            DocumentNode::SectionList(ds) => ds.iter().collect(),
            _ => Vec::new(),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&DocumentNode> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Store `node` under `key`, replacing whatever was there.
    pub fn insert(&mut self, key: impl Into<String>, node: DocumentNode) -> Option<DocumentNode> {
        let key = key.into();
        self.spellings.swap_remove(&key);
        self.entries.insert(key, node)
    }

    /// Store `node` under `key`, promoting to a list if the key already exists.
    pub fn push(&mut self, key: impl Into<String>, node: DocumentNode) {
        let key = key.into();
        let written: Vec<String> = node.scalars().iter().map(|v| v.to_string()).collect();
        let replaces_spelled = node.is_section();

        crate::parser::insert_or_promote(self, key.clone(), node);

        if replaces_spelled {
            self.spellings.swap_remove(&key);
        } else if let Some(words) = self.spellings.get_mut(&key) {
            words.extend(written);
        }
    }

    /// Store a scalar read from text under `key`: coerced for typed access,
    /// with `raw` kept as its written form.
    pub fn push_word(&mut self, key: impl Into<String>, raw: &str) {
        let key = key.into();
        let before = self.scalars(&key);
        if self.spellings.get(&key).map_or(0, Vec::len) != before.len() {
            let written = before.iter().map(|v| v.to_string()).collect();
            self.spellings.insert(key.clone(), written);
        }

        crate::parser::insert_or_promote(self, key.clone(), DocumentNode::Scalar(coerce(raw)));
        self.spellings.entry(key).or_default().push(raw.to_string());
    }

    /// Mutable access to an entry. Its written form is forgotten, since the
    /// caller may change the value.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut DocumentNode> {
        self.spellings.swap_remove(key);
        self.entries.get_mut(key)
    }

    /// Entry access for promotion, leaving written forms alone.
    pub(crate) fn slot_mut(&mut self, key: &str) -> Option<&mut DocumentNode> {
        self.entries.get_mut(key)
    }

    pub(crate) fn insert_slot(&mut self, key: String, node: DocumentNode) {
        self.entries.insert(key, node);
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DocumentNode)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn scalar(&self, key: &str) -> Option<&ScalarValue> {
        self.get(key).and_then(DocumentNode::as_scalar)
    }

    pub fn section(&self, key: &str) -> Option<&Document> {
        self.get(key).and_then(DocumentNode::as_section)
    }

    /// Scalars under `key` whether it occurred once or repeatedly.
    pub fn scalars(&self, key: &str) -> Vec<&ScalarValue> {
        self.get(key).map(DocumentNode::scalars).unwrap_or_default()
    }

    /// Sections under `key` whether it occurred once or repeatedly.
    pub fn sections(&self, key: &str) -> Vec<&Document> {
        self.get(key).map(DocumentNode::sections).unwrap_or_default()
    }

    /// Scalars under `key` as they were written in the parsed text. Values
    /// that did not come from text are rendered with `Display`.
    pub fn verbatim(&self, key: &str) -> Vec<String> {
        let scalars = self.scalars(key);
        match self.spellings.get(key) {
            Some(words) if words.len() == scalars.len() => words.clone(),
            _ => scalars.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// The single scalar under `key` as written, like [`Document::scalar`].
    pub fn verbatim_scalar(&self, key: &str) -> Option<String> {
        let value = self.scalar(key)?;
        let written = self
            .spellings
            .get(key)
            .filter(|words| words.len() == 1)
            .and_then(|words| words.first());
        Some(written.cloned().unwrap_or_else(|| value.to_string()))
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

/// Nested sections are moved onto a heap stack before they are freed, so
/// dropping a deeply nested document does not recurse.
impl Drop for Document {
    fn drop(&mut self) {
        let mut pending = detach_sections(&mut self.entries);
        while let Some(mut doc) = pending.pop() {
            pending.extend(detach_sections(&mut doc.entries));
        }
    }
}

fn detach_sections(entries: &mut IndexMap<String, DocumentNode>) -> Vec<Document> {
    let mut out = Vec::new();
    for (_, node) in entries.drain(..) {
        match node {
            DocumentNode::Section(doc) => out.push(doc),
            DocumentNode::SectionList(docs) => out.extend(docs),
            DocumentNode::Scalar(_) | DocumentNode::ScalarList(_) => {}
        }
    }
    out
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a DocumentNode);
    type IntoIter = indexmap::map::Iter<'a, String, DocumentNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
