//! Classification and cleaning tables.
//!
//! The built-in defaults describe a Rails + React code base. Other code bases
//! can supply a TOML file:
//!
//! ```toml
//! [technologies]
//! rs = "Rust"
//! toml = "Config"
//!
//! [[components]]
//! fragment = "src/analysis"
//! component = "analysis"
//!
//! [clean]
//! author_substrings = ["bot"]
//! message_substrings = ["cargo fmt"]
//! ```
//!
//! Every section is optional. A section that is present replaces the
//! corresponding default entirely.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::{Classifier, CleanRules, ComponentRules, TechnologyMap};
use crate::error::{GoldmineError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub technologies: TechnologyMap,
    pub components: ComponentRules,
    pub clean: CleanRules,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| GoldmineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| GoldmineError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.technologies.clone(), self.components.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OTHER;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("");
        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_sections_replace_defaults() {
        let file = write_config(
            r#"
[technologies]
rs = "Rust"

[[components]]
fragment = "src/analysis"
component = "analysis"

[[components]]
fragment = "src"
component = "core"

[clean]
message_substrings = ["cargo fmt"]
"#,
        );
        let config = Config::load_from_file(file.path()).unwrap();
        let classifier = config.classifier();

        assert_eq!(classifier.technologies.technology_for("src/lib.rs"), "Rust");
        assert_eq!(classifier.technologies.technology_for("app/models/a.rb"), OTHER);
        assert_eq!(classifier.components.component_for("src/analysis/parser.rs"), "analysis");
        assert_eq!(classifier.components.component_for("src/main.rs"), "core");

        assert_eq!(config.clean.message_substrings, vec!["cargo fmt".to_string()]);
        assert_eq!(config.clean.author_substrings, vec!["bot".to_string()]);
        assert!(config.clean.drop_other_component);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let file = write_config("[technologies\nrb = ");
        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, GoldmineError::Config { .. }));
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        let file = write_config("[colours]\nrb = \"red\"\n");
        assert!(Config::load_from_file(file.path()).is_err());
    }
}
