use htmlescape::{encode_attribute, encode_minimal};

use crate::config::SiteLink;
use crate::models::ThemeMode;

pub const FALLBACK_LIST_TEXT: &str = "src.json is bad!!";
pub const CONTENT_ERROR_TEXT: &str = "Error! fetching MD file!";
pub const DARK_MODE_CLASS: &str = "dark-mode";
pub const DARK_ICON: &str = "dark.png";
pub const LIGHT_ICON: &str = "light.png";

const HOT_RELOAD_SCRIPT: &str = r#"
<script>
    const socket = new WebSocket("ws://" + window.location.host + "/ws");
    socket.onmessage = (event) => {
        if (event.data === "reload") {
            window.location.reload();
        }
    };
</script>
"#;

/// Token handed out per content request; only the latest one may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub text: String,
    /// Manifest position the item activates; `None` for the fallback item.
    pub index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Footer {
    pub year_text: String,
    pub link: SiteLink,
}

/// Server-side view of the page elements: `year`, `version`, `ul_list`,
/// `content-area`, `header`, `theme-icon` and the body class list.
#[derive(Debug, Clone)]
pub struct Page {
    pub path: String,
    pub footer: Option<Footer>,
    pub version: String,
    pub list: Vec<ListItem>,
    pub content_html: String,
    pub header: String,
    pub body_classes: Vec<String>,
    pub theme_icon: String,
    generation: u64,
}

impl Page {
    pub fn new(path: impl Into<String>) -> Self {
        Page {
            path: path.into(),
            footer: None,
            version: String::new(),
            list: Vec::new(),
            content_html: String::new(),
            header: String::new(),
            body_classes: Vec::new(),
            theme_icon: LIGHT_ICON.to_string(),
            generation: 0,
        }
    }

    pub fn has_body_class(&self, class: &str) -> bool {
        self.body_classes.iter().any(|c| c == class)
    }

    pub fn theme(&self) -> ThemeMode {
        if self.has_body_class(DARK_MODE_CLASS) {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn next_token(&mut self) -> RequestToken {
        self.generation += 1;
        RequestToken(self.generation)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.generation
    }
}

fn theme_query(theme: ThemeMode) -> String {
    match theme {
        ThemeMode::Light => String::new(),
        ThemeMode::Dark => format!("?theme={}", theme.as_str()),
    }
}

fn render_list(page: &Page) -> String {
    let query = theme_query(page.theme());
    let mut list_items = String::new();
    for item in &page.list {
        match item.index {
            Some(index) => list_items.push_str(&format!(
                "<li><a href=\"/read/{}{}\">{}</a></li>",
                index,
                encode_attribute(&query),
                encode_minimal(&item.text)
            )),
            None => list_items.push_str(&format!("<li>{}</li>", encode_minimal(&item.text))),
        }
    }
    list_items
}

fn render_footer(footer: &Option<Footer>) -> String {
    match footer {
        Some(footer) => format!(
            "{}<a href=\"{}\">{}</a>",
            encode_minimal(&footer.year_text),
            encode_attribute(&footer.link.href),
            encode_minimal(&footer.link.name)
        ),
        None => String::new(),
    }
}

/// Replaces every `{{ name }}` token in one pass. Substituted values are never rescanned;
/// tokens `lookup` does not know are kept verbatim.
fn fill_placeholders(layout: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(layout.len());
    let mut rest = layout;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let inner = &rest[start + 2..];
        let Some(end) = inner.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        match lookup(inner[..end].trim()) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &inner[end + 2..];
    }

    out.push_str(rest);
    out
}

/// Fills the layout placeholders from the page.
pub fn render_with_layout(layout: &str, page: &Page, is_development: bool) -> String {
    let toggle_href = format!(
        "{}?theme={}",
        page.path,
        page.theme().opposite().as_str()
    );

    let mut html = fill_placeholders(layout, |name| match name {
        "body_class" => Some(encode_attribute(&page.body_classes.join(" "))),
        "year" => Some(render_footer(&page.footer)),
        "version" => Some(encode_minimal(&page.version)),
        "posts" => Some(render_list(page)),
        "header" => Some(encode_minimal(&page.header)),
        "theme_icon" => Some(encode_attribute(&page.theme_icon)),
        "theme_toggle" => Some(encode_attribute(&toggle_href)),
        "content" => Some(page.content_html.clone()),
        _ => None,
    });

    if is_development {
        if let Some(pos) = html.rfind("</body>") {
            html.insert_str(pos, HOT_RELOAD_SCRIPT);
        }
    }

    html
}
