//! Series colours and continuous colour scales

use eframe::egui::Color32;

/// Categorical palette for series, cycled by index
pub fn series_color(index: usize) -> Color32 {
    let colors = [
        Color32::from_rgb(31, 119, 180),  // Blue
        Color32::from_rgb(255, 127, 14),  // Orange
        Color32::from_rgb(44, 160, 44),   // Green
        Color32::from_rgb(214, 39, 40),   // Red
        Color32::from_rgb(148, 103, 189), // Purple
        Color32::from_rgb(140, 86, 75),   // Brown
        Color32::from_rgb(227, 119, 194), // Pink
        Color32::from_rgb(127, 127, 127), // Gray
        Color32::from_rgb(188, 189, 34),  // Yellow
        Color32::from_rgb(23, 190, 207),  // Cyan
    ];
    colors[index % colors.len()]
}

/// Continuous scales used by the heatmaps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    YlGnBu,
    Spectral,
    Plasma,
    RdBu,
}

impl ColorScale {
    fn stops(self) -> &'static [[u8; 3]] {
        match self {
            ColorScale::YlGnBu => &[
                [255, 255, 217],
                [199, 233, 180],
                [127, 205, 187],
                [65, 182, 196],
                [29, 145, 192],
                [34, 94, 168],
                [8, 29, 88],
            ],
            ColorScale::Spectral => &[
                [158, 1, 66],
                [244, 109, 67],
                [254, 224, 139],
                [255, 255, 191],
                [230, 245, 152],
                [102, 194, 165],
                [94, 79, 162],
            ],
            ColorScale::Plasma => &[
                [13, 8, 135],
                [106, 0, 168],
                [177, 42, 144],
                [225, 100, 98],
                [252, 166, 54],
                [240, 249, 33],
            ],
            ColorScale::RdBu => &[
                [103, 0, 31],
                [214, 96, 77],
                [253, 219, 199],
                [247, 247, 247],
                [209, 229, 240],
                [67, 147, 195],
                [5, 48, 97],
            ],
        }
    }

    /// Colour at position `t` in [0, 1]; out-of-range values are clamped
    pub fn sample(self, t: f64) -> Color32 {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let scaled = t * (stops.len() - 1) as f64;
        let lo = scaled.floor() as usize;
        let hi = (lo + 1).min(stops.len() - 1);
        let frac = scaled - lo as f64;

        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        let (a, b) = (stops[lo], stops[hi]);
        Color32::from_rgb(mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2]))
    }

    /// Colour for `value` within `[min, max]`
    pub fn color_for(self, value: f64, min: f64, max: f64) -> Color32 {
        if max > min {
            self.sample((value - min) / (max - min))
        } else {
            self.sample(0.5)
        }
    }
}

/// Black or white, whichever reads better on `background`
pub fn contrasting_text(background: Color32) -> Color32 {
    let luminance = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luminance > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}
