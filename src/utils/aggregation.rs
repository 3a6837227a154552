use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::types::{ClassifiedRow, Month, Quarter};

/// Categorical column used to split a stacked series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Technology,
    Component,
}

impl GroupBy {
    pub fn key<'a>(&self, row: &'a ClassifiedRow) -> &'a str {
        match self {
            GroupBy::Technology => &row.technology,
            GroupBy::Component => &row.component,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupBy::Technology => "Technology",
            GroupBy::Component => "Component",
        }
    }
}

/// Per-period totals for each group; `values[period][group]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackedSeries<P> {
    pub periods: Vec<P>,
    pub groups: Vec<String>,
    pub values: Vec<Vec<i64>>,
}

impl<P> StackedSeries<P> {
    pub fn period_total(&self, index: usize) -> i64 {
        self.values
            .get(index)
            .map(|v| v.iter().fold(0, |acc: i64, x| acc.saturating_add(*x)))
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// Rows with a hash per calendar month, with empty months between the first
/// and last filled with zero.
pub fn commits_per_month(rows: &[ClassifiedRow]) -> Vec<(Month, usize)> {
    let mut counts: BTreeMap<Month, usize> = BTreeMap::new();
    for row in rows.iter().filter(|row| row.hash().is_some()) {
        *counts.entry(Month::of(row.date())).or_insert(0) += 1;
    }

    let (Some(&first), Some(&last)) = (counts.keys().next(), counts.keys().next_back()) else {
        return Vec::new();
    };

    let mut series = Vec::new();
    let mut month = first;
    while month <= last {
        series.push((month, counts.get(&month).copied().unwrap_or(0)));
        month = month.succ();
    }
    series
}

/// Lines added per quarter per group. Rows without an `Added` count are
/// skipped.
pub fn lines_added_per_quarter(rows: &[ClassifiedRow], group_by: GroupBy) -> StackedSeries<Quarter> {
    let mut sums: HashMap<(Quarter, &str), i64> = HashMap::new();
    let mut groups: BTreeSet<&str> = BTreeSet::new();
    let mut range: Option<(Quarter, Quarter)> = None;

    for row in rows {
        let Some(added) = row.change.added else {
            continue;
        };
        let quarter = Quarter::of(row.date());
        let group = group_by.key(row);
        let sum = sums.entry((quarter, group)).or_insert(0);
        *sum = sum.saturating_add(added);
        groups.insert(group);
        range = Some(match range {
            None => (quarter, quarter),
            Some((lo, hi)) => (lo.min(quarter), hi.max(quarter)),
        });
    }

    let Some((first, last)) = range else {
        return StackedSeries {
            periods: Vec::new(),
            groups: Vec::new(),
            values: Vec::new(),
        };
    };

    let mut periods = Vec::new();
    let mut quarter = first;
    while quarter <= last {
        periods.push(quarter);
        quarter = quarter.succ();
    }

    let values: Vec<Vec<i64>> = periods
        .iter()
        .map(|q| {
            groups
                .iter()
                .map(|g| sums.get(&(*q, *g)).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    StackedSeries {
        periods,
        groups: groups.into_iter().map(str::to_string).collect(),
        values,
    }
}

/// Files ordered by number of rows that touch them, most first.
pub fn most_changed_files(rows: &[ClassifiedRow], top_n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.file()).or_insert(0) += 1;
    }
    top_by_count(counts, false, top_n)
}

/// Files ordered by number of distinct authors.
pub fn unique_authors_per_file(rows: &[ClassifiedRow], ascending: bool, top_n: usize) -> Vec<(String, usize)> {
    top_by_count(distinct_per_key(rows, |r| r.file(), |r| r.author()), ascending, top_n)
}

/// Distinct authors per component, ordered by component name.
pub fn unique_authors_per_component(rows: &[ClassifiedRow]) -> Vec<(String, usize)> {
    by_name(distinct_per_key(rows, |r| r.component.as_str(), |r| r.author()))
}

/// Distinct commit hashes per component, ordered by component name.
pub fn commits_per_component(rows: &[ClassifiedRow]) -> Vec<(String, usize)> {
    by_name(distinct_per_key(rows, |r| r.component.as_str(), |r| r.hash()))
}

fn distinct_per_key<'a, K, V>(rows: &'a [ClassifiedRow], key: K, value: V) -> HashMap<&'a str, usize>
where
    K: Fn(&'a ClassifiedRow) -> &'a str,
    V: Fn(&'a ClassifiedRow) -> Option<&'a str>,
{
    let mut seen: HashMap<&str, HashSet<&str>> = HashMap::new();
    for row in rows {
        let entry = seen.entry(key(row)).or_default();
        if let Some(v) = value(row) {
            entry.insert(v);
        }
    }
    seen.into_iter().map(|(k, v)| (k, v.len())).collect()
}

fn top_by_count(counts: HashMap<&str, usize>, ascending: bool, top_n: usize) -> Vec<(String, usize)> {
    let mut sorted: Vec<(&str, usize)> = counts.into_iter().collect();
    sorted.sort_by(|(a_name, a), (b_name, b)| {
        let by_count = if ascending { a.cmp(b) } else { b.cmp(a) };
        by_count.then_with(|| a_name.cmp(b_name))
    });
    sorted
        .into_iter()
        .take(top_n)
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}

fn by_name(counts: HashMap<&str, usize>) -> Vec<(String, usize)> {
    let sorted: BTreeMap<&str, usize> = counts.into_iter().collect();
    sorted
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommitInfo, FileChangeRow};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn row(hash: &str, author: &str, date: (i32, u32, u32), file: &str, added: Option<i64>) -> ClassifiedRow {
        let (y, m, d) = date;
        ClassifiedRow {
            change: FileChangeRow {
                commit: CommitInfo {
                    hash: Some(hash.to_string()),
                    author: Some(author.to_string()),
                    date: NaiveDate::from_ymd_opt(y, m, d)
                        .unwrap()
                        .and_hms_opt(9, 0, 0)
                        .unwrap(),
                    message: None,
                    extra: BTreeMap::new(),
                },
                added,
                deleted: None,
                file: file.to_string(),
            },
            technology: if file.ends_with(".rb") { "Ruby" } else { "Javascript" }.to_string(),
            component: if file.contains("models") { "models" } else { "frontend" }.to_string(),
        }
    }

    fn sample() -> Vec<ClassifiedRow> {
        vec![
            row("a", "Jane", (2023, 1, 5), "app/models/user.rb", Some(10)),
            row("a", "Jane", (2023, 1, 5), "app/javascript/mastodon/a.js", Some(4)),
            row("b", "John", (2023, 3, 20), "app/models/user.rb", Some(6)),
            row("c", "Jane", (2023, 7, 1), "app/models/post.rb", None),
            row("d", "Ann", (2023, 7, 2), "app/models/user.rb", Some(1)),
        ]
    }

    #[test]
    fn test_commits_per_month_fills_gaps() {
        let series = commits_per_month(&sample());
        let counts: Vec<usize> = series.iter().map(|(_, c)| *c).collect();
        assert_eq!(counts, vec![2, 0, 1, 0, 0, 0, 2]);
        assert_eq!(series[0].0.to_string(), "2023-01");
        assert_eq!(series[6].0.to_string(), "2023-07");
    }

    #[test]
    fn test_commits_per_month_skips_rows_without_hash() {
        let mut rows = sample();
        rows[1].change.commit.hash = None;
        let series = commits_per_month(&rows);
        assert_eq!(series[0], (Month { year: 2023, month: 1 }, 1));

        for row in &mut rows {
            row.change.commit.hash = None;
        }
        assert!(commits_per_month(&rows).is_empty());
    }

    #[test]
    fn test_lines_added_saturates_instead_of_overflowing() {
        let rows = vec![
            row("a", "Jane", (2023, 1, 5), "app/models/user.rb", Some(i64::MAX)),
            row("b", "John", (2023, 2, 5), "app/models/post.rb", Some(i64::MAX)),
            row("c", "Ann", (2023, 2, 6), "app/javascript/mastodon/a.js", Some(i64::MAX)),
        ];
        let series = lines_added_per_quarter(&rows, GroupBy::Technology);
        assert_eq!(series.values, vec![vec![i64::MAX, i64::MAX]]);
        assert_eq!(series.period_total(0), i64::MAX);
    }

    #[test]
    fn test_empty_data() {
        assert!(commits_per_month(&[]).is_empty());
        assert!(lines_added_per_quarter(&[], GroupBy::Technology).is_empty());
        assert!(most_changed_files(&[], 10).is_empty());
        assert!(commits_per_component(&[]).is_empty());
    }

    #[test]
    fn test_lines_added_per_quarter_by_technology() {
        let series = lines_added_per_quarter(&sample(), GroupBy::Technology);
        let labels: Vec<String> = series.periods.iter().map(|q| q.to_string()).collect();
        assert_eq!(labels, vec!["Q1/2023", "Q2/2023", "Q3/2023"]);
        assert_eq!(series.groups, vec!["Javascript".to_string(), "Ruby".to_string()]);
        assert_eq!(series.values, vec![vec![4, 16], vec![0, 0], vec![0, 1]]);
        assert_eq!(series.period_total(0), 20);
    }

    #[test]
    fn test_lines_added_per_quarter_by_component() {
        let series = lines_added_per_quarter(&sample(), GroupBy::Component);
        assert_eq!(series.groups, vec!["frontend".to_string(), "models".to_string()]);
        assert_eq!(series.values[0], vec![4, 16]);
    }

    #[test]
    fn test_most_changed_files() {
        let top = most_changed_files(&sample(), 2);
        assert_eq!(
            top,
            vec![
                ("app/models/user.rb".to_string(), 3),
                ("app/javascript/mastodon/a.js".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_unique_authors_per_file() {
        let most = unique_authors_per_file(&sample(), false, 1);
        assert_eq!(most, vec![("app/models/user.rb".to_string(), 3)]);

        let least = unique_authors_per_file(&sample(), true, 2);
        assert_eq!(
            least,
            vec![
                ("app/javascript/mastodon/a.js".to_string(), 1),
                ("app/models/post.rb".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_per_component_distinct_counts() {
        assert_eq!(
            unique_authors_per_component(&sample()),
            vec![("frontend".to_string(), 1), ("models".to_string(), 3)]
        );
        assert_eq!(
            commits_per_component(&sample()),
            vec![("frontend".to_string(), 1), ("models".to_string(), 4)]
        );
    }
}
