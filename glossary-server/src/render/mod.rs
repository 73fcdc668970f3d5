//! HTML rendering with Handlebars
//!
//! Templates are compiled into the binary with `include_str!` and
//! registered once when the [`Renderer`] is built. Handlers pass plain
//! serializable data; the templates only iterate and escape.

use std::sync::Arc;

use handlebars::Handlebars;
use serde::Serialize;

/// Page templates, by name
const TEMPLATES: &[(&str, &str)] = &[
    ("index", include_str!("../../templates/index.hbs")),
    ("detail", include_str!("../../templates/detail.hbs")),
    ("term_form", include_str!("../../templates/term_form.hbs")),
    ("add_section", include_str!("../../templates/add_section.hbs")),
];

/// Partials shared by every page
const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("../../templates/header.hbs")),
    ("footer", include_str!("../../templates/footer.hbs")),
];

/// Rendering error type
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template '{name}' failed to compile: {source}")]
    Template {
        name: &'static str,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("rendering '{name}' failed: {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

/// Compiled template registry, cheap to clone
#[derive(Clone)]
pub struct Renderer {
    registry: Arc<Handlebars<'static>>,
}

impl Renderer {
    /// Compile every page and partial.
    pub fn new() -> Result<Self, RenderError> {
        let mut hb = Handlebars::new();
        hb.set_strict_mode(true); // fail if a variable is missing

        for &(name, source) in PARTIALS {
            hb.register_partial(name, source)
                .map_err(|e| RenderError::Template {
                    name,
                    source: Box::new(e),
                })?;
        }
        for &(name, source) in TEMPLATES {
            hb.register_template_string(name, source)
                .map_err(|e| RenderError::Template {
                    name,
                    source: Box::new(e),
                })?;
        }

        Ok(Self {
            registry: Arc::new(hb),
        })
    }

    /// Render the page `name` with `ctx`.
    pub fn render<T: Serialize>(&self, name: &str, ctx: &T) -> Result<String, RenderError> {
        self.registry
            .render(name, ctx)
            .map_err(|e| RenderError::Render {
                name: name.to_owned(),
                source: Box::new(e),
            })
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("templates", &TEMPLATES.len())
            .finish()
    }
}
