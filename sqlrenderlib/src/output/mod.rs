//! Output formatting: turn a result set into bytes.
//!
//! Every format is a [`Renderer`]. A [`RendererRegistry`] maps format
//! identifiers to renderers, so adding a format means registering one more
//! implementation rather than editing a central match.
//!
//! - **table / markdown / html / csv**: [`TabularRenderer`] over [`TextTable`]
//! - **json / yaml / xml**: [`JsonRenderer`], [`YamlRenderer`], [`XmlRenderer`]
//! - **xlsx**: [`SheetRenderer`]
//! - **plain**: [`PlainRenderer`]
//!
//! ## Example
//!
//! ```rust
//! use sqlrenderlib::{render, RenderOptions, ResultSet, Value};
//!
//! let rs = ResultSet::build(vec!["id".into()], vec![vec![Value::from(1)]]).unwrap();
//! let bytes = render(&rs, "plain", &RenderOptions::new()).unwrap();
//! assert_eq!(bytes, b"id=1\n");
//! ```

pub mod plain;
pub mod sheet;
pub mod structured;
pub mod table;
pub mod tabular;

use std::collections::BTreeMap;

use tracing::debug;

use crate::data::ResultSet;
use crate::error::RenderError;
use crate::options::{Format, RenderOptions};
use crate::Result;

pub use plain::PlainRenderer;
pub use sheet::SheetRenderer;
pub use structured::{JsonRenderer, XmlRenderer, YamlRenderer};
pub use table::{Align, Span, TableCell, TextTable};
pub use tabular::{TableStyle, TabularRenderer};

/// A format-specific conversion of a result set into bytes.
///
/// Implementations build their whole output in memory and only return it
/// on success, so a failed render never yields partial output.
pub trait Renderer {
    fn render(&self, rs: &ResultSet, options: &RenderOptions) -> Result<Vec<u8>>;
}

/// Format identifier to renderer mapping.
pub struct RendererRegistry {
    renderers: BTreeMap<String, Box<dyn Renderer>>,
}

impl RendererRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            renderers: BTreeMap::new(),
        }
    }

    /// Create a registry holding every built-in format
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for format in Format::ALL {
            registry.register(format.as_str(), builtin(format));
        }
        registry
    }

    /// Register (or replace) the renderer for a format identifier. Built-in
    /// aliases are stored under their canonical name.
    pub fn register(&mut self, name: impl Into<String>, renderer: Box<dyn Renderer>) -> &mut Self {
        self.renderers.insert(canonical_name(&name.into()), renderer);
        self
    }

    /// Look up a renderer. Built-in aliases (`md`, `excel`, ...) resolve to
    /// their canonical identifier.
    pub fn get(&self, name: &str) -> Option<&dyn Renderer> {
        self.renderers
            .get(&canonical_name(name))
            .map(|renderer| renderer.as_ref())
    }

    /// Registered format identifiers, sorted
    pub fn formats(&self) -> Vec<&str> {
        self.renderers.keys().map(String::as_str).collect()
    }

    /// Render a result set in the named format
    pub fn render(&self, name: &str, rs: &ResultSet, options: &RenderOptions) -> Result<Vec<u8>> {
        let renderer = self
            .get(name)
            .ok_or_else(|| RenderError::UnsupportedFormat(name.to_string()))?;

        debug!(
            format = name,
            columns = rs.columns().len(),
            rows = rs.len(),
            "rendering result set"
        );
        let output = renderer.render(rs, options)?;
        debug!(format = name, bytes = output.len(), "rendered result set");

        Ok(output)
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Render a result set with the built-in renderers.
pub fn render(rs: &ResultSet, format: &str, options: &RenderOptions) -> Result<Vec<u8>> {
    RendererRegistry::with_defaults().render(format, rs, options)
}

fn builtin(format: Format) -> Box<dyn Renderer> {
    match format {
        Format::Table => Box::new(TabularRenderer::new(TableStyle::Table)),
        Format::Markdown => Box::new(TabularRenderer::new(TableStyle::Markdown)),
        Format::Html => Box::new(TabularRenderer::new(TableStyle::Html)),
        Format::Csv => Box::new(TabularRenderer::new(TableStyle::Csv)),
        Format::Json => Box::new(JsonRenderer),
        Format::Yaml => Box::new(YamlRenderer),
        Format::Xml => Box::new(XmlRenderer),
        Format::Xlsx => Box::new(SheetRenderer),
        Format::Plain => Box::new(PlainRenderer),
    }
}

fn canonical_name(name: &str) -> String {
    name.parse::<Format>()
        .map(|format| format.as_str().to_string())
        .unwrap_or_else(|_| name.to_lowercase())
}
