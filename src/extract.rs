use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

const MAIN_CONTENT_ID: &str = "mw-content-text";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContent {
    pub main_text: String,
    pub headings: Vec<String>,
}

/// How `h2` and `h3` headings are interleaved in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingOrder {
    /// Every `h2` in document order, then every `h3`.
    #[default]
    ByLevel,
    /// Headings as they appear in the document.
    Document,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContentExtractor {
    order: HeadingOrder,
}

impl ContentExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(order: HeadingOrder) -> Self {
        Self { order }
    }

    /// Best-effort: malformed markup is repaired by the parser, a missing
    /// content element yields empty text.
    pub fn extract(&self, html: &str) -> ExtractedContent {
        let doc = Html::parse_document(html);

        let main_selector = selector(&format!("#{}", MAIN_CONTENT_ID));
        let main_text = doc
            .select(&main_selector)
            .next()
            .map(text_content)
            .unwrap_or_default();

        let headings = match self.order {
            HeadingOrder::ByLevel => {
                let mut headings = texts(&doc, "h2");
                headings.extend(texts(&doc, "h3"));
                headings
            }
            HeadingOrder::Document => texts(&doc, "h2, h3"),
        };

        ExtractedContent {
            main_text,
            headings,
        }
    }
}

/// Shorthand for `ContentExtractor::new().extract(html)`.
pub fn extract(html: &str) -> ExtractedContent {
    ContentExtractor::new().extract(html)
}

fn texts(doc: &Html, css: &str) -> Vec<String> {
    doc.select(&selector(css)).map(text_content).collect()
}

fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn selector(css: &str) -> Selector {
    // only called with the fixed selectors above
    Selector::parse(css).expect("static selector")
}
