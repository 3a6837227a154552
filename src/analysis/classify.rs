//! Derives the Technology and Component labels of a changed file.
//!
//! Both lookups are total: a path that matches nothing is labelled
//! [`OTHER`](crate::types::OTHER).

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{ClassifiedRow, FileChangeRow, OTHER};

/// Maps a file extension to a technology label.
///
/// The extension is whatever follows the final `.` of the path, compared
/// case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TechnologyMap {
    by_extension: BTreeMap<String, String>,
}

impl TechnologyMap {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            by_extension: entries
                .into_iter()
                .map(|(ext, label)| (ext.into(), label.into()))
                .collect(),
        }
    }

    pub fn technology_for<'a>(&'a self, path: &str) -> &'a str {
        path.rsplit_once('.')
            .and_then(|(_, extension)| self.by_extension.get(extension))
            .map(String::as_str)
            .unwrap_or(OTHER)
    }
}

impl Default for TechnologyMap {
    fn default() -> Self {
        Self::new([
            ("rb", "Ruby"),
            ("html", "HTML"),
            ("haml", "HTML"),
            ("erb", "Embedded Ruby"),
            ("js", "Javascript"),
            ("jsx", "Javascript"),
            ("ts", "Typescript"),
            ("tsx", "Typescript"),
            ("scss", "Saas"),
        ])
    }
}

/// A path fragment and the component it identifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRule {
    pub fragment: String,
    pub component: String,
}

/// Ordered component rules; the first fragment contained in a path wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentRules {
    rules: Vec<ComponentRule>,
}

impl ComponentRules {
    pub fn new<I, F, C>(rules: I) -> Self
    where
        I: IntoIterator<Item = (F, C)>,
        F: Into<String>,
        C: Into<String>,
    {
        Self {
            rules: rules
                .into_iter()
                .map(|(fragment, component)| ComponentRule {
                    fragment: fragment.into(),
                    component: component.into(),
                })
                .collect(),
        }
    }

    pub fn component_for<'a>(&'a self, path: &str) -> &'a str {
        self.rules
            .iter()
            .find(|rule| path.contains(rule.fragment.as_str()))
            .map(|rule| rule.component.as_str())
            .unwrap_or(OTHER)
    }
}

impl Default for ComponentRules {
    fn default() -> Self {
        Self::new([
            ("app/controllers", "controllers"),
            ("app/helpers", "helpers"),
            ("app/lib", "lib"),
            ("app/models", "models"),
            ("app/policies", "policies"),
            ("app/serializers", "serializers"),
            ("app/services", "services"),
            ("app/views", "views"),
            ("app/workers", "workers"),
            ("app/javascript/mastodon", "frontend"),
            ("app/javascript/packs", "non-react frontend"),
            ("app/javascript/styles", "styles"),
        ])
    }
}

/// Applies both lookups to every row.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    pub technologies: TechnologyMap,
    pub components: ComponentRules,
}

impl Classifier {
    pub fn new(technologies: TechnologyMap, components: ComponentRules) -> Self {
        Self {
            technologies,
            components,
        }
    }

    pub fn classify_row(&self, change: FileChangeRow) -> ClassifiedRow {
        let technology = self.technologies.technology_for(&change.file).to_string();
        let component = self.components.component_for(&change.file).to_string();
        ClassifiedRow {
            change,
            technology,
            component,
        }
    }

    pub fn classify(&self, rows: Vec<FileChangeRow>) -> Vec<ClassifiedRow> {
        let classified: Vec<ClassifiedRow> =
            rows.into_iter().map(|row| self.classify_row(row)).collect();
        info!(
            "Classified {} rows ({} without technology, {} without component)",
            classified.len(),
            classified.iter().filter(|r| r.technology == OTHER).count(),
            classified.iter().filter(|r| r.component == OTHER).count(),
        );
        classified
    }
}
