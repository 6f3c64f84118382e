//! The catalog of selectable API documents.
//!
//! A [`DocumentCatalog`] is the ordered list of named documents shown in the
//! viewer's top-bar selector. Order is display order and names are unique.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DocsError, DocsResult};

/// Document shown when the page is opened without a `url` override.
pub const DEFAULT_DOCUMENT_URL: &str = "/openapi/authn.v1.yaml";

/// The built-in IAM documents, in display order.
const IAM_DOCUMENTS: [(&str, &str); 4] = [
    ("AuthN", "/openapi/authn.v1.yaml"),
    ("Identity", "/openapi/identity.v1.yaml"),
    ("AuthZ", "/openapi/authz.v1.yaml"),
    ("IDP", "/openapi/idp.v1.yaml"),
];

/// A named OpenAPI document.
///
/// Serializes to the element shape of Swagger UI's `urls` option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentEntry {
    /// Human-readable label shown in the selector.
    pub name: String,
    /// Path or absolute URL of the document.
    pub url: String,
}

impl DocumentEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Ordered set of documents keyed by name.
///
/// # Example
///
/// ```
/// use iam_docs::DocumentCatalog;
///
/// let catalog = DocumentCatalog::iam();
/// let names: Vec<_> = catalog.iter().map(|e| e.name.as_str()).collect();
/// assert_eq!(names, ["AuthN", "Identity", "AuthZ", "IDP"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<DocumentEntry>", into = "Vec<DocumentEntry>")]
pub struct DocumentCatalog {
    entries: IndexMap<String, DocumentEntry>,
}

impl DocumentCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The four IAM platform documents: AuthN, Identity, AuthZ and IDP.
    #[must_use]
    pub fn iam() -> Self {
        let entries = IAM_DOCUMENTS
            .iter()
            .map(|(name, url)| ((*name).to_string(), DocumentEntry::new(*name, *url)))
            .collect();
        Self { entries }
    }

    /// Build a catalog from entries, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::InvalidEntry`] for an empty name or url and
    /// [`DocsError::DuplicateEntry`] when a name repeats.
    pub fn from_entries<I>(entries: I) -> DocsResult<Self>
    where
        I: IntoIterator<Item = DocumentEntry>,
    {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.push(entry)?;
        }
        Ok(catalog)
    }

    /// Append an entry at the end of the display order.
    ///
    /// # Errors
    ///
    /// Same conditions as [`DocumentCatalog::from_entries`].
    pub fn push(&mut self, entry: DocumentEntry) -> DocsResult<()> {
        if entry.name.trim().is_empty() {
            return Err(DocsError::invalid_entry(&entry.name, "name must not be empty"));
        }
        if entry.url.trim().is_empty() {
            return Err(DocsError::invalid_entry(&entry.name, "url must not be empty"));
        }
        if self.entries.contains_key(&entry.name) {
            return Err(DocsError::DuplicateEntry { name: entry.name });
        }
        self.entries.insert(entry.name.clone(), entry);
        Ok(())
    }

    /// Look up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DocumentEntry> {
        self.entries.get(name)
    }

    /// Find the first entry pointing at `url`.
    #[must_use]
    pub fn find_by_url(&self, url: &str) -> Option<&DocumentEntry> {
        self.entries.values().find(|entry| entry.url == url)
    }

    /// Iterate entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &DocumentEntry> {
        self.entries.values()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<DocumentEntry>> for DocumentCatalog {
    type Error = DocsError;

    fn try_from(entries: Vec<DocumentEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<DocumentCatalog> for Vec<DocumentEntry> {
    fn from(catalog: DocumentCatalog) -> Self {
        catalog.entries.into_values().collect()
    }
}

impl<'a> IntoIterator for &'a DocumentCatalog {
    type Item = &'a DocumentEntry;
    type IntoIter = indexmap::map::Values<'a, String, DocumentEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
