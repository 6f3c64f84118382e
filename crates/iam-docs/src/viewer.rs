//! Viewer configuration handed to the rendering collaborator.
//!
//! [`ViewerConfig`] serializes to the option object accepted by
//! `SwaggerUIBundle`. Presets and plugins are collaborator namespaces and
//! are attached by the backend, not serialized here.

use serde::{Deserialize, Serialize, Serializer};

use crate::catalog::DocumentCatalog;

/// Id of the element the viewer mounts into.
pub const DEFAULT_RENDER_TARGET: &str = "swagger-ui";

/// Top-level layout component used by the viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    /// Layout with the top bar and document selector.
    #[default]
    #[serde(rename = "StandaloneLayout")]
    Standalone,
    /// Bare layout without the top bar.
    #[serde(rename = "BaseLayout")]
    Base,
}

impl Layout {
    /// The component name understood by the viewer.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standalone => "StandaloneLayout",
            Self::Base => "BaseLayout",
        }
    }
}

/// Default expansion of operations in the viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocExpansion {
    /// Show all operations collapsed.
    None,
    /// Show only the list of operations.
    #[default]
    List,
    /// Expand all operations fully.
    Full,
}

impl DocExpansion {
    /// The option value understood by the viewer.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::List => "list",
            Self::Full => "full",
        }
    }
}

impl std::str::FromStr for DocExpansion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "list" => Ok(Self::List),
            "full" => Ok(Self::Full),
            other => Err(format!("unknown doc expansion '{other}'")),
        }
    }
}

/// Named behavior options passed to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorFlags {
    /// Reflect the selected operation in the page URL.
    pub deep_linking: bool,
    /// Layout component.
    pub layout: Layout,
    /// Default operation expansion.
    pub doc_expansion: DocExpansion,
    /// Show request durations in "try it out" responses.
    pub display_request_duration: bool,
}

impl Default for BehaviorFlags {
    fn default() -> Self {
        Self {
            deep_linking: true,
            layout: Layout::Standalone,
            doc_expansion: DocExpansion::List,
            display_request_duration: false,
        }
    }
}

impl BehaviorFlags {
    /// Set the default operation expansion.
    #[must_use]
    pub fn doc_expansion(mut self, expansion: DocExpansion) -> Self {
        self.doc_expansion = expansion;
        self
    }

    /// Enable or disable request duration display.
    #[must_use]
    pub fn display_request_duration(mut self, enabled: bool) -> Self {
        self.display_request_duration = enabled;
        self
    }

    /// Force deep linking on and the standalone layout.
    #[must_use]
    pub(crate) fn pinned(mut self) -> Self {
        self.deep_linking = true;
        self.layout = Layout::Standalone;
        self
    }
}

/// Configuration for a single viewer initialization.
///
/// Built once per page load by the
/// [`DocumentSourceSelector`](crate::DocumentSourceSelector) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewerConfig {
    /// Document loaded first.
    #[serde(rename = "url")]
    pub initial_url: String,

    /// Selectable documents in display order.
    #[serde(rename = "urls")]
    pub entries: DocumentCatalog,

    /// Id of the element the viewer renders into.
    #[serde(rename = "dom_id", serialize_with = "serialize_dom_selector")]
    pub render_target_id: String,

    /// Behavior options.
    #[serde(flatten)]
    pub flags: BehaviorFlags,

    /// Catalog entry matching `initial_url`, if any.
    #[serde(rename = "urls.primaryName", skip_serializing_if = "Option::is_none")]
    pub primary_name: Option<String>,
}

impl ViewerConfig {
    /// CSS selector for the render target (`#` + id).
    #[must_use]
    pub fn dom_selector(&self) -> String {
        format!("#{}", self.render_target_id)
    }

    /// Serialize to the viewer's JSON option object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn serialize_dom_selector<S: Serializer>(id: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("#{id}"))
}
