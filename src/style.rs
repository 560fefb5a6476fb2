// src/style.rs

use crate::surface::PenStyle;

/// File name used by the Download control.
pub const DEFAULT_FILENAME: &str = "signature.png";

/// Visual customization for the signature canvas area.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureStyle {
    /// Canvas border CSS, e.g. "2px dashed #2b8a3e"
    pub border:     String,
    /// Canvas background CSS color, e.g. "#fff"
    pub background: String,
    /// Initial canvas size in CSS pixels; width follows the container once
    /// laid out
    pub width:      u32,
    pub height:     u32,
    pub pen:        PenStyle,
    /// Name of the downloaded PNG
    pub filename:   String
}

impl Default for SignatureStyle {
    fn default() -> Self {
        Self {
            border:     "2px dashed #888".into(),
            background: "#fff".into(),
            width:      520,
            height:     220,
            pen:        PenStyle::default(),
            filename:   DEFAULT_FILENAME.into()
        }
    }
}

impl SignatureStyle {
    /// Inline CSS for the <canvas> element.
    pub fn canvas_css(&self) -> String {
        format!(
            "display:block;width:100%;max-width:{}px;height:{}px;background:{};border:{};touch-action:none;",
            self.width, self.height, self.background, self.border
        )
    }

    pub fn fallback_size(&self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }
}

/// Label text, with a marker when the field is mandatory.
pub fn label_text(label: &str, required: bool) -> String {
    if required {
        format!("{label} *")
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test_log::test]
    fn defaults_match_the_signature_field() {
        let style = SignatureStyle::default();
        assert_eq!(style.filename, "signature.png");
        assert_eq!(style.pen, PenStyle::default());
        assert_eq!(style.fallback_size(), (520.0, 220.0));
    }

    #[test_log::test]
    fn canvas_css_disables_touch_scrolling() {
        let css = SignatureStyle::default().canvas_css();
        assert!(css.contains("touch-action:none;"));
        assert!(css.contains("height:220px;"));
        assert!(css.contains("border:2px dashed #888;"));
    }

    #[test_log::test]
    fn required_label_is_marked() {
        assert_eq!(label_text("Signature", true), "Signature *");
        assert_eq!(label_text("Signature", false), "Signature");
    }
}
