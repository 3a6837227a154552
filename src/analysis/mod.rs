pub mod classify;
pub mod clean;
pub mod parser;


pub use classify::{Classifier, ComponentRule, ComponentRules, TechnologyMap};
pub use clean::{clean_log, CleanRules};
pub use parser::{parse_git_log, parse_git_log_str, ParseOptions};
