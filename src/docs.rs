//! Registration of the documentation routes and the work done per request.
//!
//! [`register`] validates the options, adds the static asset middleware and the two
//! `GET` routes to the application's router, and hands back a [`Documentation`] that
//! answers those routes. Every call to [`Documentation::json`] walks the routing tree
//! and assembles a new document; nothing is cached between requests.

use crate::config::{DocsOptions, Expanded, Lang, Settings, SortEndpoints};
use crate::error::Result;
use crate::router::{App, Handler};
use crate::swagger_builder::{assemble, SwaggerDocument};
use crate::walker::walk;
use log::{debug, info};
use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Name of the handler registered for the viewer page
pub const DOCUMENTATION_HANDLER: &str = "documentation";
/// Name of the handler registered for the JSON document
pub const DATA_HANDLER: &str = "data";
/// Name prefix of the static asset middleware
pub const STATIC_HANDLER: &str = "serveStatic";

/// Middleware name recording the directory a static node serves
pub fn static_handler_name(dir: &Path) -> String {
    format!("{}({})", STATIC_HANDLER, dir.display())
}

/// Answers the documentation routes of one application.
#[derive(Debug, Clone)]
pub struct Documentation {
    settings: Settings,
}

/// Values handed to the viewer template
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerContext {
    pub lang: Lang,
    pub sort_tags: String,
    pub sort_endpoints: SortEndpoints,
    pub expanded: Expanded,
    pub json_path: String,
    pub info: ViewerInfo,
    #[serde(rename = "swaggerUIPath")]
    pub swagger_ui_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerInfo {
    pub title: String,
}

/// Register the documentation routes on `app`.
///
/// Fails without touching `app` when the options do not validate.
pub fn register(app: &mut App, options: DocsOptions) -> Result<Documentation> {
    let settings = options.resolve()?;

    info!(
        "Registering documentation at {} (document at {})",
        settings.documentation_path, settings.json_path
    );

    let router = app.router_mut();
    router
        .use_middleware(
            settings.assets_path.clone(),
            static_handler_name(&settings.public_path),
        )
        .use_middleware(
            settings.assets_path.clone(),
            static_handler_name(&settings.swagger_ui_path),
        )
        .get(
            settings.documentation_path.clone(),
            [Handler::new(DOCUMENTATION_HANDLER)],
        )
        .get(settings.json_path.clone(), [Handler::new(DATA_HANDLER)]);

    Ok(Documentation { settings })
}

impl Documentation {
    /// Build the document describing `app` as it is right now
    pub fn json(&self, app: &App) -> SwaggerDocument {
        let routes = walk(app);
        debug!("Walked {} routes", routes.len());

        assemble(
            &routes,
            &self.settings.documentation_path,
            &self.settings.json_path,
        )
    }

    pub fn viewer_context(&self) -> ViewerContext {
        ViewerContext {
            lang: self.settings.lang,
            sort_tags: "default".to_string(),
            sort_endpoints: self.settings.sort_endpoints,
            expanded: self.settings.expanded,
            json_path: self.settings.json_path.clone(),
            info: ViewerInfo {
                title: self.settings.title.clone(),
            },
            swagger_ui_path: self.settings.assets_path.clone(),
        }
    }

    /// Render the viewer page from `template`; the context is available as `viewer`.
    ///
    /// Values are HTML-escaped; use `|safe` to opt out.
    pub fn render_page(&self, template: &str) -> Result<String> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template("index.html", template)?;
        let page = env
            .get_template("index.html")?
            .render(minijinja::context! { viewer => self.viewer_context() })?;
        Ok(page)
    }

    /// Render `<swaggerUIPath>/index.html`
    pub fn render_page_from_disk(&self) -> Result<String> {
        let path = self.settings.swagger_ui_path.join("index.html");
        debug!("Rendering viewer template {}", path.display());
        let template = fs::read_to_string(&path)?;
        self.render_page(&template)
    }
}
