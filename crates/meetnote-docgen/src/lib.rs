//! Document export: turns model response text into a minimally styled
//! `.docx` — one heading, then one justified paragraph per non-empty line,
//! Arial 12pt black. Embedded markup in the text is written verbatim as
//! plain paragraph text; there is no markdown rendering.

use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

/// MIME type for the exported word-processing documents.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

// Run sizes are half-points: 24 = 12pt body, 32 = 16pt heading.
const BODY_SIZE_HALF_POINTS: usize = 24;
const HEADING_SIZE_HALF_POINTS: usize = 32;
const BODY_FONT: &str = "Arial";
const BODY_COLOR: &str = "000000";

#[derive(Debug, thiserror::Error)]
pub enum DocgenError {
    #[error("Failed to assemble document: {0}")]
    Pack(String),
}

/// Split response text into the lines that become paragraphs: every
/// non-blank line, in order, kept verbatim (whitespace-only lines dropped).
pub fn body_paragraphs(content: &str) -> Vec<&str> {
    content
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Render response text into docx bytes with `title` as the heading.
pub fn render(title: &str, content: &str) -> Result<Vec<u8>, DocgenError> {
    let mut docx = Docx::new()
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .size(HEADING_SIZE_HALF_POINTS)
                .bold(),
        )
        .add_paragraph(
            Paragraph::new()
                .style("Heading1")
                .add_run(Run::new().add_text(title)),
        );

    for line in body_paragraphs(content) {
        docx = docx.add_paragraph(
            Paragraph::new().align(AlignmentType::Justified).add_run(
                Run::new()
                    .add_text(line)
                    .size(BODY_SIZE_HALF_POINTS)
                    .fonts(RunFonts::new().ascii(BODY_FONT))
                    .color(BODY_COLOR),
            ),
        );
    }

    let mut buffer = std::io::Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| DocgenError::Pack(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_are_skipped() {
        assert_eq!(body_paragraphs("A\n\nB"), vec!["A", "B"]);
        assert_eq!(body_paragraphs("A\n   \n\t\nB\n"), vec!["A", "B"]);
    }

    #[test]
    fn test_paragraph_order_preserved() {
        let text = "first\nsecond\nthird";
        assert_eq!(body_paragraphs(text), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_markup_kept_verbatim() {
        let text = "## Heading\n- *item* one";
        assert_eq!(body_paragraphs(text), vec!["## Heading", "- *item* one"]);
    }

    #[test]
    fn test_empty_content_has_no_paragraphs() {
        assert!(body_paragraphs("").is_empty());
        assert!(body_paragraphs("\n\n  \n").is_empty());
    }

    #[test]
    fn test_render_produces_docx_bytes() {
        let bytes = render("Meeting Minutes", "point one\npoint two").unwrap();
        // docx files are zip archives
        assert_eq!(&bytes[..2], b"PK");
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_render_is_deterministic_per_content() {
        let first = render("Meeting Minutes", "alpha").unwrap();
        let again = render("Meeting Minutes", "alpha").unwrap();
        let other = render("Meeting Minutes", "beta and some much longer content").unwrap();

        assert_eq!(first, again);
        assert_ne!(first, other);
    }

    #[test]
    fn test_render_with_empty_content_still_has_heading() {
        let bytes = render("Action Items", "").unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
