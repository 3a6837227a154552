use log::info;
use serde::{Deserialize, Serialize};

use crate::types::{ClassifiedRow, OTHER};

/// Row filters applied after classification.
///
/// Substrings are matched case-insensitively. A missing author or message
/// never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanRules {
    pub drop_other_technology: bool,
    pub drop_other_component: bool,
    pub author_substrings: Vec<String>,
    pub message_substrings: Vec<String>,
}

impl Default for CleanRules {
    fn default() -> Self {
        Self {
            drop_other_technology: true,
            drop_other_component: true,
            author_substrings: vec!["bot".to_string()],
            message_substrings: vec!["ESLint".to_string(), "Enforce stricter rules".to_string()],
        }
    }
}

impl CleanRules {
    pub fn keeps(&self, row: &ClassifiedRow) -> bool {
        if self.drop_other_technology && row.technology == OTHER {
            return false;
        }
        if self.drop_other_component && row.component == OTHER {
            return false;
        }
        if contains_any(row.author(), &self.author_substrings) {
            return false;
        }
        !contains_any(row.change.commit.message.as_deref(), &self.message_substrings)
    }
}

fn contains_any(haystack: Option<&str>, needles: &[String]) -> bool {
    let Some(haystack) = haystack else {
        return false;
    };
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

/// Drops unclassified rows, bot commits and style-only commits.
pub fn clean_log(rows: Vec<ClassifiedRow>, rules: &CleanRules) -> Vec<ClassifiedRow> {
    let before = rows.len();
    let kept: Vec<ClassifiedRow> = rows.into_iter().filter(|row| rules.keeps(row)).collect();
    info!("Cleaning kept {} of {} rows", kept.len(), before);
    kept
}
