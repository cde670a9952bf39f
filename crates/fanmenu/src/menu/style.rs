use super::TITLE_LABEL_INSET;
use crate::config::LabelConfig;
use orbit::Size;
use palette::Srgba;

/// Appearance of generated title labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub font_family: String,
    pub font_size: f64,
    pub text_color: Srgba<f64>,
    pub background: Srgba<f64>,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self::from(&LabelConfig::default())
    }
}

impl From<&LabelConfig> for LabelStyle {
    fn from(config: &LabelConfig) -> Self {
        Self {
            font_family: config.font_family.clone(),
            font_size: config.font_size,
            text_color: Srgba::new(0.0, 0.0, 0.0, 1.0),
            background: Srgba::new(1.0, 1.0, 1.0, 0.85),
        }
    }
}

impl LabelStyle {
    /// Pill around measured text: padded top and bottom, with room for the
    /// rounded caps on either side.
    pub fn pill_size(&self, text: Size) -> Size {
        let height = text.height + TITLE_LABEL_INSET * 2.0;
        Size::new(text.width + height * 0.8, height)
    }

    /// Rough metrics for hosts without a text engine.
    pub fn estimate_text_size(&self, text: &str) -> Size {
        Size::new(
            text.chars().count() as f64 * self.font_size * 0.5,
            self.font_size * 1.2,
        )
    }
}

/// Fixed colors of the widget's own chrome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuColors {
    pub scrim: Srgba<f64>,
    pub indicator_border: Srgba<f64>,
    pub highlight_overlay: Srgba<f64>,
}

impl Default for MenuColors {
    fn default() -> Self {
        Self {
            scrim: Srgba::new(0.0, 0.0, 0.0, 0.4),
            indicator_border: Srgba::new(1.0, 1.0, 1.0, 0.75),
            highlight_overlay: Srgba::new(0.0, 0.0, 0.0, 0.7),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pill_size() {
        let style = LabelStyle::default();
        let pill = style.pill_size(Size::new(40.0, 10.0));
        assert_eq!(pill.height, 20.0);
        assert_eq!(pill.width, 56.0);
    }

    #[test]
    fn test_style_from_config() {
        let config = LabelConfig {
            font_family: "Inter".to_string(),
            font_size: 16.0,
        };
        let style = LabelStyle::from(&config);
        assert_eq!(style.font_family, "Inter");
        assert_eq!(style.estimate_text_size("Like"), Size::new(32.0, 19.2));
    }
}
