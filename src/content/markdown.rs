//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::helpers::{html_escape, strip_html};

/// Marker separating the teaser from the rest of a post body
pub const MORE_MARKER: &str = "<!-- more -->";

const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl MarkdownRenderer {
    /// Create a renderer with the default highlight theme
    pub fn new() -> Self {
        Self::with_theme(DEFAULT_THEME)
    }

    /// Create a renderer with a named syntect theme, falling back to the
    /// default theme when the name is unknown
    pub fn with_theme(theme_name: &str) -> Self {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = theme_set
            .themes
            .remove(theme_name)
            .or_else(|| {
                tracing::warn!("Unknown highlight theme {:?}, using default", theme_name);
                theme_set.themes.remove(DEFAULT_THEME)
            })
            .unwrap_or_default();

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let mut events: Vec<Event> = Vec::new();
        let mut code_lang: Option<String> = None;
        let mut code_buf: Option<String> = None;

        for event in Parser::new_ext(markdown, Self::options()) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_buf = Some(String::new());
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(code) = code_buf.take() {
                        let highlighted = self.highlight_code(&code, code_lang.take().as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_buf.is_some() => {
                    if let Some(buf) = code_buf.as_mut() {
                        buf.push_str(&text);
                    }
                }
                event => {
                    if code_buf.is_none() {
                        events.push(event);
                    }
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let class = html_escape(lang);
        match highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme) {
            Ok(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                class, highlighted
            ),
            Err(e) => {
                tracing::debug!("Highlighting {} failed: {}", lang, e);
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    class,
                    html_escape(code)
                )
            }
        }
    }

    /// Split a body at the `<!-- more -->` marker.
    /// Returns the teaser (if any) and the body with the marker removed.
    pub fn split_more(content: &str) -> (Option<&str>, String) {
        match content.split_once(MORE_MARKER) {
            Some((teaser, rest)) => (
                Some(teaser.trim()),
                format!("{}\n\n{}", teaser.trim(), rest.trim()),
            ),
            None => (None, content.to_string()),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Text content of a markdown snippet, with markup dropped and whitespace
/// collapsed. Code blocks are skipped.
pub fn plain_text(markdown: &str) -> String {
    let mut text = String::new();
    let mut in_code_block = false;

    for event in Parser::new_ext(markdown, MarkdownRenderer::options()) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(t) | Event::Code(t) if !in_code_block => {
                text.push_str(&t);
                text.push(' ');
            }
            Event::Html(h) | Event::InlineHtml(h) if !in_code_block => {
                text.push_str(&strip_html(&h));
                text.push(' ');
            }
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First paragraph of a markdown body as plain text
pub fn first_paragraph(markdown: &str) -> String {
    markdown
        .split("\n\n")
        .map(plain_text)
        .find(|p| !p.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("```yaml\napiVersion: apps/v1\nkind: Deployment\n```")
            .unwrap();
        assert!(html.contains(r#"<figure class="highlight yaml">"#));
        assert!(html.contains("Deployment"));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_plain_text_strips_inline_html() {
        let text = plain_text("Run **kubectl** with <kbd>Ctrl</kbd>+C.\n\n```sh\nrm -rf /\n```");
        assert_eq!(text, "Run kubectl with Ctrl +C.");
    }

    #[test]
    fn test_code_fence_language_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\"><script>\nx = 1\n```").unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"<figure class="highlight &quot;&gt;&lt;script&gt;">"#));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let renderer = MarkdownRenderer::with_theme("no-such-theme");
        let html = renderer.render("```sh\nkubectl get pods\n```").unwrap();
        assert!(html.contains("kubectl"));
    }

    #[test]
    fn test_split_more() {
        let content = "This is the teaser.\n<!-- more -->\nThis is more content.";
        let (teaser, full) = MarkdownRenderer::split_more(content);
        assert_eq!(teaser, Some("This is the teaser."));
        assert!(full.contains("This is the teaser."));
        assert!(full.contains("This is more content."));
        assert!(!full.contains(MORE_MARKER));

        let (teaser, full) = MarkdownRenderer::split_more("No marker");
        assert_eq!(teaser, None);
        assert_eq!(full, "No marker");
    }

    #[test]
    fn test_plain_text() {
        let text = plain_text("Use **[Terraform](https://terraform.io)** with `aws`.\n\n```\nskipped\n```");
        assert_eq!(text, "Use Terraform with aws .");
    }

    #[test]
    fn test_first_paragraph() {
        let body = "\n\n## Intro\n\nSecond block.";
        assert_eq!(first_paragraph(body), "Intro");
        assert_eq!(first_paragraph(""), "");
    }
}
