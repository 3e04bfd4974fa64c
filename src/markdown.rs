use gray_matter::{engine::YAML, Matter};
use pulldown_cmark::{html, CowStr, Event, Options, Parser};
use serde::de::IgnoredAny;
use tracing::warn;

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_MATH);
    options
}

/// Converts a post body to HTML. A leading YAML front-matter block is dropped.
pub fn markdown_to_html(markdown: &str) -> String {
    let body = strip_front_matter(markdown);
    let normalized = normalize_latex_delimiters(&body);
    let parser = Parser::new_ext(&normalized, markdown_options()).map(|event| match event {
        Event::InlineMath(math) => Event::Html(CowStr::Boxed(math_html(&math, false).into_boxed_str())),
        Event::DisplayMath(math) => Event::Html(CowStr::Boxed(math_html(&math, true).into_boxed_str())),
        other => other,
    });

    let mut html_out = String::new();
    html::push_html(&mut html_out, parser);
    html_out
}

fn strip_front_matter(markdown: &str) -> String {
    let matter = Matter::<YAML>::new();
    match matter.parse::<IgnoredAny>(markdown) {
        Ok(parsed) => parsed.content,
        Err(e) => {
            warn!("Ignoring unreadable front matter: {}", e);
            markdown.to_string()
        }
    }
}

/// Rewrites `\(..\)` and `\[..\]` into the dollar delimiters pulldown-cmark understands.
fn normalize_latex_delimiters(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while !rest.is_empty() {
        if let Some((close, display)) = opening_delimiter(rest) {
            let inner = &rest[2..];
            if let Some(end) = inner.find(close) {
                let math = &inner[..end];
                let fence = if display || math.contains('\n') { "$$" } else { "$" };
                out.push_str(fence);
                out.push_str(math);
                out.push_str(fence);
                rest = &inner[end + close.len()..];
                continue;
            }
        }

        let Some(ch) = rest.chars().next() else { break };
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}

fn opening_delimiter(tail: &str) -> Option<(&'static str, bool)> {
    if tail.starts_with("\\(") {
        Some(("\\)", false))
    } else if tail.starts_with("\\[") {
        Some(("\\]", true))
    } else {
        None
    }
}

fn math_html(source: &str, display_mode: bool) -> String {
    let mut opts = katex::Opts::builder();
    opts.display_mode(display_mode);

    opts.build()
        .ok()
        .and_then(|opts| katex::render_with_opts(source, opts).ok())
        .unwrap_or_else(|| {
            let class_name = if display_mode { "math math-display" } else { "math math-inline" };
            format!("<span class=\"{class_name}\">{}</span>", htmlescape::encode_minimal(source))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markdown() {
        let html = markdown_to_html("# Title\n\nSome *emphasis* and ~~strike~~.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
        assert!(html.contains("<del>strike</del>"));
    }

    #[test]
    fn renders_tables() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn strips_front_matter() {
        let html = markdown_to_html("---\ntitle: Hidden\n---\nVisible body\n");
        assert!(!html.contains("Hidden"));
        assert!(html.contains("Visible body"));
    }

    #[test]
    fn normalizes_paren_and_bracket_delimiters() {
        assert_eq!(normalize_latex_delimiters("a \\(x^2\\) b"), "a $x^2$ b");
        assert_eq!(normalize_latex_delimiters("\\[y\\]"), "$$y$$");
        assert_eq!(normalize_latex_delimiters("\\(a\nb\\)"), "$$a\nb$$");
        assert_eq!(normalize_latex_delimiters("unclosed \\(x"), "unclosed \\(x");
    }

    #[test]
    fn renders_math_with_katex() {
        let output = markdown_to_html("\\(x^2\\) and \\[y^2\\]");
        assert!(output.contains("katex"));
    }

    #[test]
    fn renders_sample_post() {
        let post = include_str!("../content/site/posts/welcome.md");
        let output = markdown_to_html(post);
        assert!(output.contains("<h1>Welcome to goodread</h1>"));
        assert!(output.contains("katex"));
    }
}
