use crate::config::TextConfig;

const LINE_SPACING: f32 = 1.2;

/// Placement of multi-line text on the offscreen bitmap
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub width: u32,
    pub height: u32,
    pub font_px: f32,
}

/// A single line and where its vertical middle sits on the bitmap
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine<'a> {
    pub text: &'a str,
    pub center_x: f32,
    pub middle_y: f32,
}

impl TextLayout {
    pub fn from_config(config: &TextConfig) -> Self {
        Self {
            width: config.canvas_width,
            height: config.canvas_height,
            font_px: config.font_px,
        }
    }

    /// Lines centred horizontally, 1.2 line-heights apart, block centred vertically
    pub fn place_lines<'a>(&self, text: &'a str) -> Vec<PlacedLine<'a>> {
        let lines: Vec<&str> = text.split('\n').collect();
        let count = lines.len() as f32;
        let center_x = self.width as f32 / 2.0;
        let middle = self.height as f32 / 2.0;

        lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| PlacedLine {
                text: line,
                center_x,
                middle_y: middle + (i as f32 - (count - 1.0) / 2.0) * self.font_px * LINE_SPACING,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_is_centred() {
        let layout = TextLayout::from_config(&TextConfig::default());
        let lines = layout.place_lines("HELLO");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].center_x, 500.0);
        assert_eq!(lines[0].middle_y, 150.0);
    }

    #[test]
    fn test_two_lines_straddle_middle() {
        let layout = TextLayout::from_config(&TextConfig::default());
        let lines = layout.place_lines("MERRY CHRISTMAS\n Yuki");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, " Yuki");
        // half of 80px * 1.2 either side of 150
        assert!((lines[0].middle_y - 102.0).abs() < 1e-4);
        assert!((lines[1].middle_y - 198.0).abs() < 1e-4);
    }

    #[test]
    fn test_three_lines_keep_spacing() {
        let layout = TextLayout { width: 200, height: 400, font_px: 10.0 };
        let lines = layout.place_lines("a\nb\nc");
        assert!((lines[0].middle_y - 188.0).abs() < 1e-4);
        assert_eq!(lines[1].middle_y, 200.0);
        assert!((lines[2].middle_y - 212.0).abs() < 1e-4);
    }
}
