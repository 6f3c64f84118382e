//! Swagger UI backend.
//!
//! [`SwaggerUi`] is the production [`ViewerBackend`]. Initializing it with a
//! [`ViewerConfig`] yields a [`SwaggerPage`]: the initializer script that
//! calls `SwaggerUIBundle` once, and a complete HTML page that loads the
//! Swagger UI bundle from a CDN and runs that script on load.
//!
//! ## Usage
//!
//! ```
//! use iam_docs::{DocumentSourceSelector, QueryParams, SwaggerUi};
//!
//! let swagger = SwaggerUi::new().title("IAM API Reference");
//! let ctx = DocumentSourceSelector::iam()
//!     .load(&swagger, &QueryParams::parse("url=/openapi/authz.v1.yaml"))
//!     .unwrap();
//!
//! let html = ctx.handle().html();
//! assert!(html.contains("SwaggerUIBundle("));
//! assert!(html.contains("/openapi/authz.v1.yaml"));
//! ```

use crate::context::ViewerBackend;
use crate::error::DocsResult;
use crate::viewer::ViewerConfig;

/// Swagger UI dist version loaded when none is configured.
pub const DEFAULT_SWAGGER_VERSION: &str = "5.18.2";

/// Preset namespaces handed to `SwaggerUIBundle`.
const PRESETS: [&str; 2] = ["SwaggerUIBundle.presets.apis", "SwaggerUIStandalonePreset"];

/// Plugin namespaces handed to `SwaggerUIBundle`.
const PLUGINS: [&str; 1] = ["SwaggerUIBundle.plugins.DownloadUrl"];

/// Swagger UI page settings.
///
/// Everything that varies per page load lives in [`ViewerConfig`]; this
/// type only carries the page chrome and asset locations.
#[derive(Debug, Clone)]
pub struct SwaggerUi {
    /// Title for the HTML page.
    title: String,
    /// Swagger UI version to use from the CDN.
    swagger_version: String,
    /// Base URL for the dist assets. Derived from the version when unset.
    asset_base_url: Option<String>,
}

impl Default for SwaggerUi {
    fn default() -> Self {
        Self::new()
    }
}

impl SwaggerUi {
    /// Create a backend with default title and CDN assets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "API Reference - Swagger UI".to_string(),
            swagger_version: DEFAULT_SWAGGER_VERSION.to_string(),
            asset_base_url: None,
        }
    }

    /// Set the page title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the Swagger UI version to use.
    #[must_use]
    pub fn swagger_version(mut self, version: impl Into<String>) -> Self {
        self.swagger_version = version.into();
        self
    }

    /// Load assets from `base_url` instead of the public CDN.
    #[must_use]
    pub fn asset_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.asset_base_url = Some(base_url.into());
        self
    }

    /// Page title.
    #[must_use]
    pub fn page_title(&self) -> &str {
        &self.title
    }

    /// Base URL the dist assets are loaded from.
    #[must_use]
    pub fn assets_url(&self) -> String {
        match &self.asset_base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://unpkg.com/swagger-ui-dist@{}", self.swagger_version),
        }
    }

    /// Generate the initializer script for `config`.
    ///
    /// The script waits for `window.onload` and then calls `SwaggerUIBundle`
    /// exactly once, keeping the result on `window.ui`.
    pub fn initializer_js(&self, config: &ViewerConfig) -> DocsResult<String> {
        let options = script_safe_json(&config.to_json()?);

        Ok(format!(
            r"window.onload = function() {{
    const config = {options};
    config.presets = [
        {presets}
    ];
    config.plugins = [
        {plugins}
    ];

    window.ui = SwaggerUIBundle(config);
}};
",
            options = options,
            presets = PRESETS.join(",\n        "),
            plugins = PLUGINS.join(",\n        "),
        ))
    }

    /// Generate the complete HTML page for `config`.
    pub fn html(&self, config: &ViewerConfig) -> DocsResult<String> {
        let script = self.initializer_js(config)?;
        Ok(self.render_page(config, &script))
    }

    /// Wrap an already generated initializer `script` in the HTML page.
    fn render_page(&self, config: &ViewerConfig, script: &str) -> String {
        let assets = html_escape(&self.assets_url());

        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{assets}/swagger-ui.css" />
    <style>
        html {{
            box-sizing: border-box;
            overflow: -moz-scrollbars-vertical;
            overflow-y: scroll;
        }}
        *,
        *:before,
        *:after {{
            box-sizing: inherit;
        }}
        body {{
            margin: 0;
            background: #fafafa;
        }}
    </style>
</head>
<body>
    <div id="{target}"></div>
    <script src="{assets}/swagger-ui-bundle.js" charset="UTF-8"></script>
    <script src="{assets}/swagger-ui-standalone-preset.js" charset="UTF-8"></script>
    <script>
{script}    </script>
</body>
</html>"##,
            title = html_escape(&self.title),
            assets = assets,
            target = html_escape(&config.render_target_id),
            script = script,
        )
    }
}

impl ViewerBackend for SwaggerUi {
    type Handle = SwaggerPage;

    fn init(&self, config: &ViewerConfig) -> DocsResult<SwaggerPage> {
        let initializer_js = self.initializer_js(config)?;
        let html = self.render_page(config, &initializer_js);
        Ok(SwaggerPage {
            initializer_js,
            html,
        })
    }
}

/// A rendered Swagger UI page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwaggerPage {
    initializer_js: String,
    html: String,
}

impl SwaggerPage {
    /// The complete HTML document.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// The initializer script alone.
    #[must_use]
    pub fn initializer_js(&self) -> &str {
        &self.initializer_js
    }

    /// The HTML document as bytes for HTTP responses.
    #[must_use]
    pub fn into_html_bytes(self) -> Vec<u8> {
        self.html.into_bytes()
    }
}

/// Escape JSON for inclusion in an inline `<script>` block.
///
/// `<`, `>` and `&` only occur inside JSON strings, where the unicode
/// escapes are equivalent.
fn script_safe_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

/// Simple HTML escape for text and attribute values.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryParams;
    use crate::selector::DocumentSourceSelector;

    fn config_for(query: &str) -> ViewerConfig {
        DocumentSourceSelector::iam().configuration(&QueryParams::parse(query))
    }

    #[test]
    fn test_swagger_ui_defaults() {
        let swagger = SwaggerUi::new();
        assert_eq!(swagger.swagger_version, DEFAULT_SWAGGER_VERSION);
        assert_eq!(
            swagger.assets_url(),
            "https://unpkg.com/swagger-ui-dist@5.18.2"
        );
    }

    #[test]
    fn test_swagger_ui_customization() {
        let swagger = SwaggerUi::new()
            .title("IAM")
            .swagger_version("5.0.0")
            .asset_base_url("/assets/swagger/");

        assert_eq!(swagger.page_title(), "IAM");
        assert_eq!(swagger.assets_url(), "/assets/swagger");
    }

    #[test]
    fn test_initializer_calls_bundle_once() {
        let js = SwaggerUi::new().initializer_js(&config_for("")).unwrap();

        assert_eq!(js.matches("SwaggerUIBundle(").count(), 1);
        assert!(js.contains("window.ui = SwaggerUIBundle(config)"));
        assert!(js.contains("SwaggerUIBundle.presets.apis"));
        assert!(js.contains("SwaggerUIStandalonePreset"));
        assert!(js.contains("SwaggerUIBundle.plugins.DownloadUrl"));
        assert!(js.contains(r#""deepLinking":true"#));
        assert!(js.contains(r#""layout":"StandaloneLayout""#));
    }

    #[test]
    fn test_html_generation() {
        let html = SwaggerUi::new()
            .title("IAM API Reference")
            .html(&config_for("url=/openapi/identity.v1.yaml"))
            .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>IAM API Reference</title>"));
        assert!(html.contains(r#"<div id="swagger-ui"></div>"#));
        assert!(html.contains("swagger-ui-dist@5.18.2/swagger-ui-bundle.js"));
        assert!(html.contains(r#""url":"/openapi/identity.v1.yaml""#));
        assert!(html.contains(r#""urls.primaryName":"Identity""#));
    }

    #[test]
    fn test_override_cannot_break_out_of_script() {
        let html = SwaggerUi::new()
            .html(&config_for("url=%3C%2Fscript%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E"))
            .unwrap();

        assert_eq!(html.matches("</script>").count(), 3);
        assert!(html.contains("\\u003c/script\\u003e"));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = SwaggerUi::new()
            .title("<b>Docs</b>")
            .html(&config_for(""))
            .unwrap();
        assert!(html.contains("<title>&lt;b&gt;Docs&lt;/b&gt;</title>"));
    }

    #[test]
    fn test_init_returns_page() {
        let config = config_for("");
        let swagger = SwaggerUi::new();
        let page = swagger.init(&config).unwrap();

        assert_eq!(page.initializer_js(), swagger.initializer_js(&config).unwrap());
        assert!(page.html().contains(page.initializer_js()));
        assert!(!page.into_html_bytes().is_empty());
    }

    #[test]
    fn test_init_page_matches_html() {
        let config = config_for("url=/openapi/idp.v1.yaml");
        let swagger = SwaggerUi::new().title("IAM");
        let page = swagger.init(&config).unwrap();

        assert_eq!(page.html(), swagger.html(&config).unwrap());
        assert_eq!(page.html().matches("SwaggerUIBundle(").count(), 1);
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_script_safe_json() {
        assert_eq!(
            script_safe_json(r#"{"a":"</script>&"}"#),
            r#"{"a":"\u003c/script\u003e\u0026"}"#
        );
    }
}
