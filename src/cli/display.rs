// src/cli/display.rs
use crossterm::style::{Color, Stylize};
use std::fmt::{Display, Write};
use std::io::{self, IsTerminal};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::tagged_assets::TaggedAssetMap;

static STDOUT_COLOR: AtomicBool = AtomicBool::new(false);
static STDERR_COLOR: AtomicBool = AtomicBool::new(false);

/// Enables colour per stream: only when not disabled and the stream is a terminal
pub fn init_color(no_color: bool) {
    STDOUT_COLOR.store(!no_color && io::stdout().is_terminal(), Ordering::Relaxed);
    STDERR_COLOR.store(!no_color && io::stderr().is_terminal(), Ordering::Relaxed);
}

pub fn stdout_color() -> bool {
    STDOUT_COLOR.load(Ordering::Relaxed)
}

fn styled(text: impl Display, color: Color, enabled: bool) -> String {
    if enabled {
        text.to_string().with(color).to_string()
    } else {
        text.to_string()
    }
}

/// Colours text bound for stderr; plain when colour is off for stderr
pub fn paint(text: impl Display, color: Color) -> String {
    styled(text, color, STDERR_COLOR.load(Ordering::Relaxed))
}

/// Human-readable listing: one header per tag, its URLs indented below
pub fn format_images(images: Option<&TaggedAssetMap>, color: bool) -> String {
    let mut output = String::new();
    let Some(images) = images else {
        return output;
    };

    for (tag, urls) in images.iter().filter(|(_, urls)| !urls.is_empty()) {
        let header = if color {
            tag.with(Color::Green).bold().to_string()
        } else {
            tag.to_string()
        };
        let _ = writeln!(output, "{} ({})", header, urls.len());
        for url in urls {
            let _ = writeln!(output, "  {}", url);
        }
    }
    output
}

/// Tag names with their counts, most populated first, insertion order on ties
pub fn format_tag_counts(tags: &[(String, usize)], color: bool) -> String {
    let mut sorted = tags.to_vec();
    sorted.sort_by(|(_, count_a), (_, count_b)| count_b.cmp(count_a));

    let mut output = String::new();
    for (tag, count) in sorted {
        let _ = writeln!(output, "  {} ({})", styled(&tag, Color::Green, color), count);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tagged_assets::add_images_to_tag;

    #[test]
    fn given_absent_map_when_format_images_then_empty() {
        assert!(format_images(None, false).is_empty());
    }

    #[test]
    fn given_map_when_format_images_then_lists_every_url() {
        let map = add_images_to_tag(None, "Exterior", &["u1".to_string(), "u2".to_string()]);
        let output = format_images(Some(&map), false);
        assert_eq!(output, "Exterior (2)\n  u1\n  u2\n");
    }

    #[test]
    fn given_counts_when_format_then_highest_first_stable_on_ties() {
        let tags = vec![
            ("a".to_string(), 1),
            ("b".to_string(), 3),
            ("c".to_string(), 1),
        ];
        let output = format_tag_counts(&tags, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec!["  b (3)", "  a (1)", "  c (1)"]);
    }

    #[test]
    fn given_color_disabled_when_format_then_no_escape_sequences() {
        let map = add_images_to_tag(None, "Exterior", &["u1".to_string()]);
        let tags = vec![("Exterior".to_string(), 1)];
        assert!(!format_images(Some(&map), false).contains('\x1b'));
        assert!(!format_tag_counts(&tags, false).contains('\x1b'));
        assert!(!styled("Exterior", Color::Green, false).contains('\x1b'));
    }

    #[test]
    fn given_color_enabled_when_format_then_tag_is_styled() {
        crossterm::style::force_color_output(true);
        let tags = vec![("Exterior".to_string(), 1)];
        assert!(format_tag_counts(&tags, true).contains('\x1b'));
    }
}
