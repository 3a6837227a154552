use plotters::style::{Palette, Palette99, RGBAColor, RGBColor};

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
    pub line_color: RGBColor,
    pub bar_color: RGBColor,
}

impl ChartTheme {
    /// Color of the `index`-th group in a stacked chart
    pub fn series_color(&self, index: usize) -> RGBColor {
        let (r, g, b) = Palette99::COLORS[index % Palette99::COLORS.len()];
        RGBColor(r, g, b)
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(0, 0, 0, 0.94),
            text_color: RGBAColor(255, 255, 255, 0.8),
            grid_color: RGBAColor(255, 255, 255, 0.15),
            axis_color: RGBAColor(255, 255, 255, 0.8),
            line_color: RGBColor(135, 206, 250),
            bar_color: RGBColor(100, 149, 237),
        }
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub line_width: u32,
    pub font_size: u32,
    pub caption_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
    /// Bottom label area for charts whose x labels are file paths
    pub path_label_area_size: u32,
    /// File paths longer than this are shortened from the left
    pub max_label_chars: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 700,
            line_width: 2,
            font_size: 15,
            caption_size: 30,
            margin: 10,
            label_area_size: 60,
            path_label_area_size: 260,
            max_label_chars: 45,
        }
    }
}

/// Linear two-stop color ramp used by the treemaps.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    pub low: RGBColor,
    pub high: RGBColor,
}

impl ColorScale {
    pub const BLUES: ColorScale = ColorScale {
        low: RGBColor(222, 235, 247),
        high: RGBColor(8, 48, 107),
    };

    pub const REDS: ColorScale = ColorScale {
        low: RGBColor(254, 224, 210),
        high: RGBColor(103, 0, 13),
    };

    /// Color at position `t`, clamped to `0.0..=1.0`
    pub fn at(&self, t: f64) -> RGBColor {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        RGBColor(
            lerp(self.low.0, self.high.0),
            lerp(self.low.1, self.high.1),
            lerp(self.low.2, self.high.2),
        )
    }

    /// Position of `value` between `min` and `max`; a flat range maps to the top.
    pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
        if max > min {
            (value - min) / (max - min)
        } else {
            1.0
        }
    }
}
