mod chart;
pub mod styles;


pub use chart::{Charts, PlotError};
pub use styles::{ChartStyle, ChartTheme, ColorScale};
