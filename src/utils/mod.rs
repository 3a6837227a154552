pub mod aggregation;
pub mod treemap;

pub use aggregation::{
    commits_per_component, commits_per_month, lines_added_per_quarter, most_changed_files,
    unique_authors_per_component, unique_authors_per_file, GroupBy, StackedSeries,
};
pub use treemap::{treemap, Rect};
