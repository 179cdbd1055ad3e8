use super::*;
use crate::ast::{DocumentNode, ScalarValue};

/// Whatever a dot path points at.
///
/// Numeric path segments index into repeated keys and repeated sections,
/// so `multipaths.multipath.1.alias` reaches the second `multipath` block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Document(&'a Document),
    Node(&'a DocumentNode),
    Scalar(&'a ScalarValue),
}

impl<'a> Lookup<'a> {
    fn child(self, segment: &str) -> Option<Lookup<'a>> {
        match self {
            Lookup::Document(doc) | Lookup::Node(DocumentNode::Section(doc)) => {
                doc.get(segment).map(Lookup::Node)
            }
            Lookup::Node(DocumentNode::SectionList(docs)) => {
                let index = segment.parse::<usize>().ok()?;
                docs.get(index).map(Lookup::Document)
            }
            Lookup::Node(DocumentNode::ScalarList(values)) => {
                let index = segment.parse::<usize>().ok()?;
                values.get(index).map(Lookup::Scalar)
            }
            Lookup::Node(DocumentNode::Scalar(_)) | Lookup::Scalar(_) => None,
        }
    }

    fn scalar(self) -> Option<&'a ScalarValue> {
        match self {
            Lookup::Scalar(v) | Lookup::Node(DocumentNode::Scalar(v)) => Some(v),
            _ => None,
        }
    }

    fn document(self) -> Option<&'a Document> {
        match self {
            Lookup::Document(doc) | Lookup::Node(DocumentNode::Section(doc)) => Some(doc),
            _ => None,
        }
    }
}

impl MultipathConfig {
    /// Get a typed value using dot notation.
    ///
    /// # Examples
    /// ```no_run
    /// # use mpath_cfg::MultipathConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = MultipathConfig::from_file("/etc/multipath.conf")?;
    /// let interval: u32 = config.get("defaults.polling_interval")?;
    /// let friendly: bool = config.get("defaults.user_friendly_names")?;
    /// let alias: String = config.get("multipaths.multipath.0.alias")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns error if the path doesn't exist, names a repeated key or a
    /// section, or the value can't be converted to `T`.
    pub fn get<T>(&self, path: &str) -> Result<T>
    where
        T: TryFrom<ScalarValue, Error = MpathError>,
    {
        let lookup = self.lookup(path)?;
        let value = lookup.scalar().ok_or_else(|| self.type_error(path, &lookup))?;
        T::try_from(value.clone()).map_err(|e| helpers::with_line_info(e, path, &self.raw_content))
    }

    /// Get an optional typed value - returns `None` if the path doesn't exist.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>>
    where
        T: TryFrom<ScalarValue, Error = MpathError>,
    {
        match self.get(path) {
            Ok(value) => Ok(Some(value)),
            Err(MpathError::PathNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    ///
    /// # Examples
    /// ```no_run
    /// # use mpath_cfg::MultipathConfig;
    /// # let config = MultipathConfig::from_file("/etc/multipath.conf").unwrap();
    /// let checker = config.get_or("defaults.path_checker", "tur".to_string());
    /// ```
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<ScalarValue, Error = MpathError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// Get every value of a possibly repeated key. A key that occurs once
    /// gives a one-element list.
    pub fn get_list<T>(&self, path: &str) -> Result<Vec<T>>
    where
        T: TryFrom<ScalarValue, Error = MpathError>,
    {
        let lookup = self.lookup(path)?;
        let values: Vec<&ScalarValue> = match lookup {
            Lookup::Node(node @ (DocumentNode::Scalar(_) | DocumentNode::ScalarList(_))) => node.scalars(),
            Lookup::Scalar(v) => vec![v],
            _ => return Err(self.type_error(path, &lookup)),
        };

        values
            .into_iter()
            .map(|v| T::try_from(v.clone()).map_err(|e| helpers::with_line_info(e, path, &self.raw_content)))
            .collect()
    }

    /// Get the blocks under a possibly repeated section name.
    pub fn get_sections(&self, path: &str) -> Result<Vec<&Document>> {
        match self.lookup(path)? {
            Lookup::Document(doc) => Ok(vec![doc]),
            Lookup::Node(node) if node.is_section() => Ok(node.sections()),
            other => Err(self.type_error(path, &other)),
        }
    }

    /// Resolve a dot path. An empty path is the whole document.
    pub fn lookup(&self, path: &str) -> Result<Lookup<'_>> {
        let mut current = Lookup::Document(&self.document);

        for segment in path.split('.').filter(|s| !s.is_empty()) {
            current = current.child(segment).ok_or_else(|| MpathError::PathNotFound {
                path: path.to_string(),
                hint: Some(format!("No entry named '{}' at this level", segment)),
                code: Some(304),
            })?;
        }

        Ok(current)
    }

    /// Get all keys of the section at a given path.
    ///
    /// # Examples
    /// ```no_run
    /// # use mpath_cfg::MultipathConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = MultipathConfig::from_file("/etc/multipath.conf")?;
    /// for key in config.get_keys("defaults")? {
    ///     println!("defaults.{}", key);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_keys(&self, path: &str) -> Result<Vec<String>> {
        let lookup = self.lookup(path)?;
        match lookup.document() {
            Some(doc) => Ok(doc.keys().cloned().collect()),
            None => Err(MpathError::TypeError {
                message: format!("Path '{}' is not a single section", path),
                line: helpers::find_config_line(path, &self.raw_content).0,
                hint: Some("Only sections have keys; index repeated sections like 'multipath.0'".into()),
                code: Some(306),
            }),
        }
    }

    /// Check if a configuration path exists.
    pub fn has(&self, path: &str) -> bool {
        self.lookup(path).is_ok()
    }

    fn type_error(&self, path: &str, found: &Lookup<'_>) -> MpathError {
        let (message, hint) = match found {
            Lookup::Node(DocumentNode::ScalarList(values)) => (
                format!("'{}' is repeated {} times", path, values.len()),
                "Use get_list, or index a single occurrence like 'wwid.0'",
            ),
            Lookup::Node(DocumentNode::Scalar(_)) | Lookup::Scalar(_) => {
                (format!("'{}' is a value, not a section", path), "Drop the last path segment")
            }
            _ => (format!("'{}' is a section, not a value", path), "Add the key of a value inside it"),
        };
        MpathError::TypeError {
            message,
            line: helpers::find_config_line(path, &self.raw_content).0,
            hint: Some(hint.into()),
            code: Some(305),
        }
    }
}
