use std::collections::HashMap;

use crate::models::ImageEntry;

pub const BLOCK_STYLESHEET: &str = "/instagram/css/block.css";

/// Stylesheet served for the block.
pub const BLOCK_CSS: &str = include_str!("../../css/block.css");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBlock {
    /// `(id, markup)` pairs in display order
    pub children: Vec<(String, String)>,
    pub stylesheets: Vec<String>,
}

impl RenderedBlock {
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn to_html(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut html = String::new();
        for href in &self.stylesheets {
            html.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">\n", escape(href)));
        }
        html.push_str("<div class=\"instagram-block\">\n");
        for (_, markup) in &self.children {
            html.push_str("  ");
            html.push_str(markup);
            html.push('\n');
        }
        html.push_str("</div>\n");
        html
    }
}

pub trait Renderer: Send + Sync {
    fn render(&self, entries: &[ImageEntry]) -> RenderedBlock;
}

pub struct HtmlRenderer {
    stylesheet: String,
}

impl HtmlRenderer {
    pub fn new(stylesheet: impl Into<String>) -> Self {
        Self {
            stylesheet: stylesheet.into(),
        }
    }

    fn render_image(entry: &ImageEntry) -> String {
        format!(
            "<a class=\"instagram-block__image\" href=\"{}\" data-id=\"{}\"><img src=\"{}\" width=\"{}\" height=\"{}\" alt=\"\"></a>",
            escape(&entry.link),
            escape(&entry.id),
            escape(&entry.thumbnail_url),
            entry.width,
            entry.height,
        )
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(BLOCK_STYLESHEET)
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, entries: &[ImageEntry]) -> RenderedBlock {
        let mut block = RenderedBlock::default();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for entry in entries {
            let markup = Self::render_image(entry);
            // A repeated id takes over the slot of the first occurrence
            match positions.get(entry.id.as_str()) {
                Some(&position) => block.children[position].1 = markup,
                None => {
                    positions.insert(entry.id.as_str(), block.children.len());
                    block.children.push((entry.id.clone(), markup));
                }
            }
        }

        if !block.is_empty() {
            block.stylesheets.push(self.stylesheet.clone());
        }

        block
    }
}

/// Escapes text for use in HTML element content and quoted attribute values.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
