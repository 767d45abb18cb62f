//! Registration options for the documentation routes.
//!
//! Options are plain serde data with camelCase keys so they can be loaded from the
//! same JSON or YAML files an operator already keeps next to the service. Unknown keys
//! and values outside the enumerated sets are rejected when the file is read;
//! [`DocsOptions::resolve`] performs the remaining checks and produces the
//! [`Settings`] the rest of the crate works with.

use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Initial expansion state of the viewer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expanded {
    None,
    #[default]
    List,
    Full,
}

/// Route ordering in the viewer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortEndpoints {
    #[default]
    Path,
    Method,
    Ordered,
}

/// Viewer UI language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Es,
    Fr,
    It,
    Ja,
    Pl,
    Pt,
    Ru,
    Tr,
    #[serde(rename = "zh-cn")]
    ZhCn,
}

/// Options accepted when registering the documentation routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct DocsOptions {
    /// URL prefix the viewer assets are served under
    pub assets_path: String,
    /// Route serving the viewer page
    pub documentation_path: String,
    /// Route serving the generated document
    pub json_path: String,
    pub expanded: Expanded,
    pub sort_endpoints: SortEndpoints,
    pub lang: Lang,
    /// Document and page title
    pub title: String,
    /// Directory holding the viewer's own assets
    pub public_path: PathBuf,
    /// Directory holding the Swagger UI bundle and its `index.html` template
    #[serde(rename = "swaggerUIPath")]
    pub swagger_ui_path: PathBuf,
}

impl Default for DocsOptions {
    fn default() -> Self {
        Self {
            assets_path: "/documentation/assets".to_string(),
            documentation_path: "/documentation".to_string(),
            json_path: "/documentation/json".to_string(),
            expanded: Expanded::default(),
            sort_endpoints: SortEndpoints::default(),
            lang: Lang::default(),
            title: "API Documentation".to_string(),
            public_path: PathBuf::from("public"),
            swagger_ui_path: PathBuf::from("public").join("swaggerui"),
        }
    }
}

/// Validated options, ready for registration.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Always ends with `/`
    pub assets_path: String,
    pub documentation_path: String,
    pub json_path: String,
    pub expanded: Expanded,
    pub sort_endpoints: SortEndpoints,
    pub lang: Lang,
    pub title: String,
    pub public_path: PathBuf,
    pub swagger_ui_path: PathBuf,
}

impl DocsOptions {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load options from a `.json`, `.yaml` or `.yml` file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading documentation options from {}", path.display());
        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Err(Error::invalid_option(
                "file",
                format!("unsupported options file: {}", path.display()),
            )),
        }
    }

    /// Validate the options and normalize them into [`Settings`]
    pub fn resolve(self) -> Result<Settings> {
        check_route("assetsPath", &self.assets_path)?;
        check_route("documentationPath", &self.documentation_path)?;
        check_route("jsonPath", &self.json_path)?;

        if self.title.trim().is_empty() {
            return Err(Error::invalid_option("title", "must not be empty"));
        }

        let mut assets_path = self.assets_path;
        if !assets_path.ends_with('/') {
            assets_path.push('/');
        }

        Ok(Settings {
            assets_path,
            documentation_path: self.documentation_path,
            json_path: self.json_path,
            expanded: self.expanded,
            sort_endpoints: self.sort_endpoints,
            lang: self.lang,
            title: self.title,
            public_path: self.public_path,
            swagger_ui_path: self.swagger_ui_path,
        })
    }
}

fn check_route(option: &str, path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(Error::invalid_option(
            option,
            format!("\"{}\" must start with '/'", path),
        ));
    }
    Ok(())
}
