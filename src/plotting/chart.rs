use log::info;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use super::styles::{ChartStyle, ChartTheme, ColorScale};
use crate::types::ClassifiedRow;
use crate::utils::{
    commits_per_component, commits_per_month, lines_added_per_quarter, most_changed_files, treemap,
    unique_authors_per_component, unique_authors_per_file, GroupBy,
};

pub type PlotError = Box<dyn Error + Send + Sync>;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const LEGEND_WIDTH: i32 = 110;

/// Renders PNG charts of a cleaned table.
pub struct Charts {
    pub theme: ChartTheme,
    pub style: ChartStyle,
    pub top_changed_files: usize,
    pub top_files_most_authors: usize,
    pub top_files_least_authors: usize,
}

impl Default for Charts {
    fn default() -> Self {
        Self {
            theme: ChartTheme::default(),
            style: ChartStyle::default(),
            top_changed_files: 50,
            top_files_most_authors: 10,
            top_files_least_authors: 50,
        }
    }
}

impl Charts {
    /// Write every chart into `dir`, creating it if needed.
    pub fn render_all(&self, rows: &[ClassifiedRow], dir: &Path) -> Result<Vec<PathBuf>, PlotError> {
        fs::create_dir_all(dir)?;

        let paths: Vec<PathBuf> = [
            "commit_trend.png",
            "lines_added_per_quarter_per_technology.png",
            "lines_added_per_quarter_per_component.png",
            "most_changed_files.png",
            "files_with_most_authors.png",
            "files_with_least_authors.png",
            "treemap_authors_per_component.png",
            "treemap_commits_per_component.png",
        ]
        .iter()
        .map(|name| dir.join(name))
        .collect();

        self.plot_commit_trend(rows, &paths[0])?;
        self.plot_lines_added_per_quarter(rows, GroupBy::Technology, &paths[1])?;
        self.plot_lines_added_per_quarter(rows, GroupBy::Component, &paths[2])?;
        self.plot_most_changed_files(rows, self.top_changed_files, &paths[3])?;
        self.plot_authors_per_file(rows, false, self.top_files_most_authors, &paths[4])?;
        self.plot_authors_per_file(rows, true, self.top_files_least_authors, &paths[5])?;
        self.plot_treemap_by_authors(rows, &paths[6])?;
        self.plot_treemap_by_commits(rows, &paths[7])?;

        info!("Wrote {} charts to {}", paths.len(), dir.display());
        Ok(paths)
    }

    /// Line chart of rows per month.
    pub fn plot_commit_trend(&self, rows: &[ClassifiedRow], path: &Path) -> Result<(), PlotError> {
        let series = commits_per_month(rows);
        let labels: Vec<String> = series.iter().map(|(month, _)| month.to_string()).collect();
        let points: Vec<(f64, f64)> = series
            .iter()
            .enumerate()
            .map(|(i, (_, count))| (i as f64, *count as f64))
            .collect();
        let max = points.iter().map(|(_, y)| *y).fold(0.0, f64::max);

        let root = self.open(path)?;
        if points.is_empty() {
            return self.finish_empty(&root, "Commits trend");
        }

        let mut chart = ChartBuilder::on(&root)
            .caption("Commits trend", self.caption_font())
            .margin(self.style.margin)
            .set_all_label_area_size(self.style.label_area_size)
            .build_cartesian_2d(category_range(labels.len()), 0f64..nice_max(max))?;
        self.draw_mesh(&mut chart, &labels, "Month", "Number of Commits")?;

        let line_color = self.theme.line_color;
        chart.draw_series(LineSeries::new(
            points.clone(),
            line_color.stroke_width(self.style.line_width),
        ))?;
        chart.draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 4, line_color.filled())),
        )?;

        root.present()?;
        Ok(())
    }

    /// Stacked bars of lines added per quarter, one stack segment per group.
    pub fn plot_lines_added_per_quarter(
        &self,
        rows: &[ClassifiedRow],
        group_by: GroupBy,
        path: &Path,
    ) -> Result<(), PlotError> {
        let series = lines_added_per_quarter(rows, group_by);
        let title = format!("Lines Added per Quarter per {}", group_by.label());
        let labels: Vec<String> = series.periods.iter().map(|q| q.to_string()).collect();
        let max = (0..series.periods.len())
            .map(|i| series.period_total(i))
            .max()
            .unwrap_or(0) as f64;

        let root = self.open(path)?;
        if series.is_empty() {
            return self.finish_empty(&root, &title);
        }

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, self.caption_font())
            .margin(self.style.margin)
            .set_all_label_area_size(self.style.label_area_size)
            .build_cartesian_2d(category_range(labels.len()), 0f64..nice_max(max))?;
        self.draw_mesh(&mut chart, &labels, "Quarter", "Lines Added")?;

        for (g, group) in series.groups.iter().enumerate() {
            let color = self.theme.series_color(g);
            chart
                .draw_series(series.values.iter().enumerate().map(|(i, totals)| {
                    let base = totals[..g].iter().fold(0, |acc: i64, x| acc.saturating_add(*x));
                    let top = base.saturating_add(totals[g]);
                    let x = i as f64;
                    Rectangle::new([(x - 0.4, base as f64), (x + 0.4, top as f64)], color.filled())
                }))?
                .label(group.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(self.theme.background_color)
            .border_style(self.theme.axis_color)
            .label_font(self.label_font())
            .draw()?;

        root.present()?;
        Ok(())
    }

    /// Bars of the `top_n` files touched by the most rows.
    pub fn plot_most_changed_files(
        &self,
        rows: &[ClassifiedRow],
        top_n: usize,
        path: &Path,
    ) -> Result<(), PlotError> {
        let bars = most_changed_files(rows, top_n);
        let title = format!("Top {top_n} Most Changed Files");
        self.plot_file_bars(&bars, &title, "Number of Changes", path)
    }

    /// Bars of the `top_n` files with the most (or, with `ascending`, least)
    /// distinct authors.
    pub fn plot_authors_per_file(
        &self,
        rows: &[ClassifiedRow],
        ascending: bool,
        top_n: usize,
        path: &Path,
    ) -> Result<(), PlotError> {
        let bars = unique_authors_per_file(rows, ascending, top_n);
        let most_least = if ascending { "Least" } else { "Most" };
        let title = format!("Top {top_n} Files with {most_least} changes from Unique Authors");
        self.plot_file_bars(&bars, &title, "Number of Unique Authors", path)
    }

    pub fn plot_treemap_by_authors(&self, rows: &[ClassifiedRow], path: &Path) -> Result<(), PlotError> {
        let counts = unique_authors_per_component(rows);
        self.plot_treemap(
            &counts,
            "Number of Unique Authors by Component",
            ColorScale::BLUES,
            path,
        )
    }

    pub fn plot_treemap_by_commits(&self, rows: &[ClassifiedRow], path: &Path) -> Result<(), PlotError> {
        let counts = commits_per_component(rows);
        self.plot_treemap(&counts, "Number of Commits by Component", ColorScale::REDS, path)
    }

    fn plot_file_bars(
        &self,
        bars: &[(String, usize)],
        title: &str,
        y_desc: &str,
        path: &Path,
    ) -> Result<(), PlotError> {
        let labels: Vec<String> = bars
            .iter()
            .map(|(file, _)| shorten(file, self.style.max_label_chars))
            .collect();
        let max = bars.iter().map(|(_, count)| *count).max().unwrap_or(0) as f64;

        let root = self.open(path)?;
        if bars.is_empty() {
            return self.finish_empty(&root, title);
        }

        let mut chart = ChartBuilder::on(&root)
            .caption(title, self.caption_font())
            .margin(self.style.margin)
            .y_label_area_size(self.style.label_area_size)
            .x_label_area_size(self.style.path_label_area_size)
            .build_cartesian_2d(category_range(labels.len()), 0f64..nice_max(max))?;
        self.draw_mesh(&mut chart, &labels, "Files", y_desc)?;

        let color = self.theme.bar_color;
        chart.draw_series(bars.iter().enumerate().map(|(i, (_, count))| {
            let x = i as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *count as f64)], color.filled())
        }))?;

        root.present()?;
        Ok(())
    }

    fn plot_treemap(
        &self,
        counts: &[(String, usize)],
        title: &str,
        scale: ColorScale,
        path: &Path,
    ) -> Result<(), PlotError> {
        let root = self.open(path)?;
        if counts.iter().all(|(_, count)| *count == 0) {
            return self.finish_empty(&root, title);
        }

        let area = root.titled(title, self.caption_font())?;
        let (width, _) = area.dim_in_pixel();
        let (map_area, legend_area) = area.split_horizontally(width as i32 - LEGEND_WIDTH);
        let (map_width, map_height) = map_area.dim_in_pixel();

        let values: Vec<f64> = counts.iter().map(|(_, count)| *count as f64).collect();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(0.0, f64::max);

        for (index, rect) in treemap(&values, map_width as f64, map_height as f64) {
            let (name, count) = &counts[index];
            let t = ColorScale::normalize(*count as f64, min, max);
            let fill = scale.at(t);
            let top_left = (rect.x.round() as i32, rect.y.round() as i32);
            let bottom_right = (
                (rect.x + rect.dx).round() as i32,
                (rect.y + rect.dy).round() as i32,
            );

            map_area.draw(&Rectangle::new([top_left, bottom_right], fill.mix(0.8).filled()))?;
            map_area.draw(&Rectangle::new(
                [top_left, bottom_right],
                self.theme.background_color.stroke_width(2),
            ))?;

            let text_color = if t > 0.5 { WHITE } else { BLACK };
            let font = ("sans-serif", self.style.font_size)
                .into_font()
                .color(&text_color);
            map_area.draw(&Text::new(
                name.clone(),
                (top_left.0 + 6, top_left.1 + 6),
                font.clone(),
            ))?;
            map_area.draw(&Text::new(
                count.to_string(),
                (top_left.0 + 6, top_left.1 + 8 + self.style.font_size as i32),
                font,
            ))?;
        }

        self.draw_color_legend(&legend_area, scale, min, max)?;
        root.present()?;
        Ok(())
    }

    fn draw_color_legend(&self, area: &Area, scale: ColorScale, min: f64, max: f64) -> Result<(), PlotError> {
        const STEPS: i32 = 100;
        let (_, height) = area.dim_in_pixel();
        let top = 30;
        let bottom = height as i32 - 30;
        let step = ((bottom - top) as f64 / STEPS as f64).max(1.0);

        for i in 0..STEPS {
            let y0 = top + (i as f64 * step) as i32;
            let y1 = top + ((i + 1) as f64 * step) as i32;
            let color = scale.at(1.0 - i as f64 / (STEPS - 1) as f64);
            area.draw(&Rectangle::new([(10, y0), (35, y1)], color.filled()))?;
        }

        area.draw(&Text::new(format_count(max), (40, top), self.label_font()))?;
        area.draw(&Text::new(
            format_count(min),
            (40, bottom - self.style.font_size as i32),
            self.label_font(),
        ))?;
        Ok(())
    }

    fn draw_mesh(
        &self,
        chart: &mut ChartContext<BitMapBackend, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
        labels: &[String],
        x_desc: &str,
        y_desc: &str,
    ) -> Result<(), PlotError> {
        let x_label_formatter = |x: &f64| category_label(labels, *x);
        let y_label_formatter = |y: &f64| format_count(*y);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(TRANSPARENT)
            .bold_line_style(self.theme.grid_color)
            .axis_style(self.theme.axis_color)
            .x_labels(labels.len().max(1))
            .x_label_formatter(&x_label_formatter)
            .y_label_formatter(&y_label_formatter)
            .x_desc(x_desc)
            .y_desc(y_desc)
            .label_style(self.label_font())
            .axis_desc_style(self.label_font())
            .x_label_style(
                self.label_font()
                    .transform(FontTransform::Rotate90)
                    .pos(Pos::new(HPos::Left, VPos::Center)),
            )
            .draw()?;
        Ok(())
    }

    fn open<'a>(&self, path: &'a Path) -> Result<Area<'a>, PlotError> {
        let root = BitMapBackend::new(path, (self.style.width, self.style.height)).into_drawing_area();
        root.fill(&self.theme.background_color)?;
        Ok(root)
    }

    fn finish_empty(&self, root: &Area, title: &str) -> Result<(), PlotError> {
        let area = root.titled(title, self.caption_font())?;
        let (width, height) = area.dim_in_pixel();
        area.draw(&Text::new(
            "No data",
            (width as i32 / 2 - 30, height as i32 / 2),
            self.label_font(),
        ))?;
        root.present()?;
        Ok(())
    }

    fn caption_font(&self) -> TextStyle<'static> {
        ("sans-serif", self.style.caption_size)
            .into_font()
            .color(&self.theme.text_color)
    }

    fn label_font(&self) -> TextStyle<'static> {
        ("sans-serif", self.style.font_size)
            .into_font()
            .color(&self.theme.text_color)
    }
}

/// X range that centers `n` categories on the integers `0..n`.
fn category_range(n: usize) -> std::ops::Range<f64> {
    -0.5..(n.max(1) as f64 - 0.5)
}

fn category_label(labels: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

fn nice_max(max: f64) -> f64 {
    if max <= 0.0 {
        1.0
    } else {
        max * 1.1
    }
}

/// Keep the tail of a long path, which carries the file name.
fn shorten(label: &str, max_chars: usize) -> String {
    let count = label.chars().count();
    if count <= max_chars || max_chars < 4 {
        return label.to_string();
    }
    let tail: String = label.chars().skip(count - (max_chars - 3)).collect();
    format!("...{tail}")
}

/// Use K/M formatting for large numbers
fn format_count(y: f64) -> String {
    if y.abs() >= 1_000_000.0 {
        format!("{:.1}M", y / 1_000_000.0)
    } else if y.abs() >= 1_000.0 {
        format!("{:.1}K", y / 1_000.0)
    } else {
        format!("{:.0}", y)
    }
}
