use std::fmt;
use std::ops::Deref;

use log::warn;
use colored::*;

/// Maximum label length in bytes.
pub const MAX_LABEL_LEN: usize = 250;

/// Provenance text of a parameter file, at most [`MAX_LABEL_LEN`] bytes.
///
/// Longer input is cut at the last UTF-8 character boundary that fits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    pub fn new(text: &str) -> Self {
        let mut end = text.len().min(MAX_LABEL_LEN);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        if end < text.len() {
            warn!("{} label truncated from {} to {} bytes", "WARNING:".red(), text.len(), end);
        }
        Label(text[..end].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Label {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label_is_kept() {
        let label = Label::new("Xia et al. 1998");
        assert_eq!(label.as_str(), "Xia et al. 1998");
    }

    #[test]
    fn test_long_label_is_truncated() {
        let text = "x".repeat(MAX_LABEL_LEN + 17);
        let label = Label::new(&text);
        assert_eq!(label.len(), MAX_LABEL_LEN);
        assert!(text.starts_with(label.as_str()));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 'Δ' is two bytes, so the cut lands in the middle of the last one.
        let text = "Δ".repeat(MAX_LABEL_LEN / 2 + 1);
        let text = format!("a{}", text);
        let label = Label::new(&text);
        assert!(label.len() <= MAX_LABEL_LEN);
        assert_eq!(label.len(), MAX_LABEL_LEN - 1);
        assert!(label.ends_with('Δ'));
    }
}
