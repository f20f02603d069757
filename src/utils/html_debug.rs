// src/utils/html_debug.rs
use crate::utils::error::AppError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Saves an HTML document to a file with debug highlights wrapped around the
/// given byte ranges. Used to diagnose selector drift: when a new site version
/// stops matching, the annotated copy shows which regions were still located.
pub fn save_debug_html(
    html: &str,
    filename: &str,
    highlights: &[(usize, usize, &str)],
) -> Result<(), AppError> {
    let path = Path::new(filename);
    let mut file = File::create(path)?;

    // Add debug styling in head
    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");

    // CSS for highlight colors
    debug_html.push_str(".highlight-section { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-title { background-color: #FFA500; }\n");
    debug_html.push_str(".highlight-account { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-toggle { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    // Create the modified HTML with markers
    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0); // Sort by position

    for (start, end, highlight_type) in sorted_highlights {
        // Overlapping matches would splice mid-span; keep the earlier one.
        if start < last_pos || end < start {
            continue;
        }

        // Add content before the highlight
        if start > last_pos {
            debug_html.push_str(&html[last_pos..start]);
        }

        // Determine CSS class based on highlight type
        let css_class = match highlight_type {
            "section" => "highlight-section",
            "title" => "highlight-title",
            "account" => "highlight-account",
            "toggle" => "highlight-toggle",
            _ => "highlight-custom",
        };

        // Add the highlighted region with a marker
        debug_html.push_str(&format!(
            "<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, highlight_type
        ));
        debug_html.push_str(&html[start..end]);
        debug_html.push_str("</span>");

        last_pos = end;
    }

    // Add any remaining content
    if last_pos < html.len() {
        debug_html.push_str(&html[last_pos..]);
    }

    // Close the HTML document
    debug_html.push_str("\n</body>\n</html>");

    // Write to file
    file.write_all(debug_html.as_bytes())?;

    tracing::info!("Saved debug HTML to {}", path.display());
    Ok(())
}

/// Creates a debug copy of the report document with the locations of the
/// given regex patterns highlighted.
pub fn create_debug_html(
    html: &str,
    filename: &str,
    patterns: &[(&str, &str)],
) -> Result<(), AppError> {
    use regex::Regex;

    let mut highlights = Vec::new();

    // Find all matches for each pattern and add them to highlights
    for (pattern, highlight_type) in patterns {
        let re = Regex::new(pattern).map_err(|e| {
            AppError::Config(format!("Invalid regex pattern '{}': {}", pattern, e))
        })?;

        for mat in re.find_iter(html) {
            highlights.push((mat.start(), mat.end(), *highlight_type));
        }
    }

    save_debug_html(html, filename, &highlights)
}

/// Patterns matching the structural anchors of the report document, for use
/// with [`create_debug_html`]. Kept next to the annotator so a selector
/// rename in `config::selectors` has one more place to update.
pub const REPORT_DEBUG_PATTERNS: &[(&str, &str)] = &[
    (r#"(?i)<div[^>]*class="[^"]*rpt-section[^"]*"[^>]*>"#, "section"),
    (
        r#"(?i)<[a-z0-9]+[^>]*class="[^"]*section-title[^"]*"[^>]*>[^<]*"#,
        "title",
    ),
    (
        r#"(?i)<div[^>]*class="[^"]*account-block[^"]*"[^>]*>"#,
        "account",
    ),
    (
        r#"(?i)<(?:button|a)[^>]*class="[^"]*reveal-toggle[^"]*"[^>]*>[^<]*"#,
        "toggle",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_patterns_mark_report_anchors() {
        let html = r#"<div class="rpt-section"><div class="section-title">Summary</div></div>
            <div class="account-block"></div>
            <button class="reveal-toggle">Show All</button>"#;

        let dir = std::env::temp_dir().join("credit_extractor_debug_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("annotated.html");

        create_debug_html(html, path.to_str().unwrap(), REPORT_DEBUG_PATTERNS).unwrap();

        let annotated = std::fs::read_to_string(&path).unwrap();
        assert!(annotated.contains("highlight-section"));
        assert!(annotated.contains("highlight-title"));
        assert!(annotated.contains("highlight-account"));
        assert!(annotated.contains("highlight-toggle"));
    }
}
