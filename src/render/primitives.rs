use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Parses a CSS color: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)`
    /// or a common named color.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(hex) = input.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lowered = input.to_ascii_lowercase();
        if let Some(args) = lowered
            .strip_prefix("rgba(")
            .or_else(|| lowered.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_function(args);
        }
        named_color(&lowered).and_then(parse_hex)
    }

    /// CSS representation: `#rrggbb` when opaque, `rgba(..)` otherwise.
    #[must_use]
    pub fn to_css(self) -> String {
        let [red, green, blue] = [self.red, self.green, self.blue].map(channel_to_u8);
        if self.alpha >= 1.0 {
            format!("#{red:02x}{green:02x}{blue:02x}")
        } else {
            format!("rgba({red},{green},{blue},{})", round3(self.alpha))
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn channel_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |index: usize| u8::from_str_radix(&hex[index..=index], 16).ok();
    let byte = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16).ok();
    match hex.len() {
        3 => Some(Color::from_rgb8(
            nibble(0)? * 17,
            nibble(1)? * 17,
            nibble(2)? * 17,
        )),
        6 => Some(Color::from_rgb8(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(
            Color::from_rgb8(byte(0)?, byte(2)?, byte(4)?)
                .with_alpha(f64::from(byte(6)?) / 255.0),
        ),
        _ => None,
    }
}

fn parse_rgb_function(args: &str) -> Option<Color> {
    let parts = args
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?;
    let (channels, alpha) = match parts.as_slice() {
        [r, g, b] => ([*r, *g, *b], 1.0),
        [r, g, b, a] => ([*r, *g, *b], *a),
        _ => return None,
    };
    if channels.iter().any(|c| !(0.0..=255.0).contains(c)) || !(0.0..=1.0).contains(&alpha) {
        return None;
    }
    Some(Color::rgba(
        channels[0] / 255.0,
        channels[1] / 255.0,
        channels[2] / 255.0,
        alpha,
    ))
}

fn named_color(name: &str) -> Option<&'static str> {
    let hex = match name {
        "black" => "000000",
        "white" => "ffffff",
        "red" => "ff0000",
        "green" => "008000",
        "blue" => "0000ff",
        "yellow" => "ffff00",
        "orange" => "ffa500",
        "purple" => "800080",
        "gray" | "grey" => "808080",
        "lightgray" | "lightgrey" => "d3d3d3",
        "darkgray" | "darkgrey" => "a9a9a9",
        "steelblue" => "4682b4",
        "navy" => "000080",
        "teal" => "008080",
        "crimson" => "dc143c",
        "tomato" => "ff6347",
        "gold" => "ffd700",
        "salmon" => "fa8072",
        "coral" => "ff7f50",
        "skyblue" => "87ceeb",
        "seagreen" => "2e8b57",
        "slategray" | "slategrey" => "708090",
        "brown" => "a52a2a",
        "pink" => "ffc0cb",
        "magenta" | "fuchsia" => "ff00ff",
        "cyan" | "aqua" => "00ffff",
        "lime" => "00ff00",
        "olive" => "808000",
        "maroon" => "800000",
        "silver" => "c0c0c0",
        _ => return None,
    };
    Some(hex)
}

/// Stroke pattern used by line and rectangle border primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStrokeStyle {
    /// Dash pattern in pixels for a given stroke width; empty for solid lines.
    #[must_use]
    pub fn dash_pattern(self, stroke_width: f64) -> Vec<f64> {
        let unit = stroke_width.max(1.0);
        match self {
            Self::Solid => Vec::new(),
            Self::Dashed => vec![4.0 * unit, 4.0 * unit],
            Self::Dotted => vec![unit, 2.0 * unit],
        }
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub stroke_style: LineStrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            stroke_style: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub const fn with_stroke_style(mut self, stroke_style: LineStrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one filled rectangle in pixel space.
///
/// `transition_ms` asks animating backends to interpolate `opacity` changes
/// over that duration; static backends draw the final value.
#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub border_width: f64,
    pub border_color: Color,
    pub border_style: LineStrokeStyle,
    /// Explicit dash lengths in pixels; overrides `border_style` when set.
    pub border_dash: SmallVec<[f64; 4]>,
    pub corner_radius: f64,
    pub opacity: f64,
    pub transition_ms: Option<u32>,
    pub element_id: Option<String>,
}

impl RectPrimitive {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            border_width: 0.0,
            border_color: fill_color,
            border_style: LineStrokeStyle::Solid,
            border_dash: SmallVec::new(),
            corner_radius: 0.0,
            opacity: 1.0,
            transition_ms: None,
            element_id: None,
        }
    }

    #[must_use]
    pub fn with_border(mut self, border_width: f64, border_color: Color) -> Self {
        self.border_width = border_width;
        self.border_color = border_color;
        self
    }

    #[must_use]
    pub fn with_border_style(mut self, border_style: LineStrokeStyle) -> Self {
        self.border_style = border_style;
        self
    }

    #[must_use]
    pub fn with_border_dash(mut self, dash: impl IntoIterator<Item = f64>) -> Self {
        self.border_dash = dash.into_iter().collect();
        if !self.border_dash.is_empty() {
            self.border_style = LineStrokeStyle::Dashed;
        }
        self
    }

    /// Dash pattern the border is stroked with; empty for solid borders.
    #[must_use]
    pub fn border_dash_pattern(&self) -> Vec<f64> {
        if self.border_dash.is_empty() {
            self.border_style.dash_pattern(self.border_width)
        } else {
            self.border_dash.to_vec()
        }
    }

    #[must_use]
    pub fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_transition_ms(mut self, transition_ms: Option<u32>) -> Self {
        self.transition_ms = transition_ms;
        self
    }

    #[must_use]
    pub fn with_element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "rect coordinates must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(ChartError::InvalidData(
                "rect border width must be finite and >= 0".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "rect corner radius must be finite and >= 0".to_owned(),
            ));
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(ChartError::InvalidData(
                "rect opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        if self
            .border_dash
            .iter()
            .any(|length| !length.is_finite() || *length < 0.0)
            || (!self.border_dash.is_empty() && self.border_dash.iter().all(|length| *length == 0.0))
        {
            return Err(ChartError::InvalidData(
                "rect border dash lengths must be finite, >= 0 and not all zero".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.border_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextVAlign {
    Top,
    Middle,
    #[default]
    Baseline,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
    /// Clockwise rotation around `(x, y)` in degrees.
    pub rotation_deg: f64,
    pub font_family: Option<String>,
    pub bold: bool,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            v_align: TextVAlign::Baseline,
            rotation_deg: 0.0,
            font_family: None,
            bold: false,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_v_align(mut self, v_align: TextVAlign) -> Self {
        self.v_align = v_align;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    #[must_use]
    pub fn with_font_family(mut self, font_family: Option<String>) -> Self {
        self.font_family = font_family;
        self
    }

    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.rotation_deg.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn parses_css_color_forms() {
        assert_eq!(Color::parse("#fff"), Some(Color::rgb(1.0, 1.0, 1.0)));
        assert_eq!(Color::parse("#ff0000").map(Color::to_css).as_deref(), Some("#ff0000"));
        assert_eq!(
            Color::parse("steelblue").map(Color::to_css).as_deref(),
            Some("#4682b4")
        );
        assert_eq!(
            Color::parse("rgba(0, 0, 255, 0.5)").map(Color::to_css).as_deref(),
            Some("rgba(0,0,255,0.5)")
        );
        assert_eq!(Color::parse("not-a-color"), None);
        assert_eq!(Color::parse("#12345"), None);
    }
}
