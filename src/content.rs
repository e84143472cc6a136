//! Sub-document content classification and de-rendering

use crate::types::DocumentContent;
use crate::xml;
use regex::Regex;
use std::sync::OnceLock;

/// Element names that mark a body as HTML
const HTML_ELEMENTS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
    "blockquote", "body", "br", "button", "canvas", "caption", "center", "cite", "code", "col",
    "colgroup", "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt",
    "em", "embed", "fieldset", "figcaption", "figure", "font", "footer", "form", "h1", "h2",
    "h3", "h4", "h5", "h6", "head", "header", "hgroup", "hr", "html", "i", "iframe", "img",
    "input", "ins", "kbd", "label", "legend", "li", "link", "main", "map", "mark", "math",
    "menu", "meta", "meter", "nav", "noscript", "object", "ol", "optgroup", "option", "output",
    "p", "param", "picture", "pre", "progress", "q", "rp", "rt", "ruby", "s", "samp", "script",
    "section", "select", "slot", "small", "source", "span", "strong", "style", "sub", "summary",
    "sup", "svg", "table", "tbody", "td", "template", "textarea", "tfoot", "th", "thead",
    "time", "title", "tr", "track", "u", "ul", "var", "video", "wbr",
];

struct Patterns {
    html_basic: Regex,
    html_element: Regex,
    table_tag: Regex,
    script_style: Regex,
    comment: Regex,
    block_break: Regex,
    tag: Regex,
    paragraph_break: Regex,
    page_marker: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let element_alternation = HTML_ELEMENTS.join("|");
        Patterns {
            html_basic: Regex::new(r"(?i)<!doctype html>|<html\b[^>]*>|<body\b[^>]*>|<x-[^>]+>")
                .expect("valid html regex"),
            html_element: Regex::new(&format!(r"(?i)<(?:{})(?:[\s/][^>]*)?>", element_alternation))
                .expect("valid element regex"),
            table_tag: Regex::new(r"(?i)<(/?)table\b[^>]*>").expect("valid table regex"),
            script_style: Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>")
                .expect("valid script regex"),
            comment: Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"),
            block_break: Regex::new(r"(?i)<br\s*/?>|</(?:p|div|tr|li|h[1-6])\s*>")
                .expect("valid block regex"),
            tag: Regex::new(r"</?[A-Za-z!?][^>]*>").expect("valid tag regex"),
            paragraph_break: Regex::new(r"\n\s+").expect("valid whitespace regex"),
            page_marker: Regex::new(r"<PAGE>[^\n]*").expect("valid page regex"),
        }
    })
}

/// True when the text contains recognizable HTML element syntax
pub fn looks_like_html(text: &str) -> bool {
    let p = patterns();
    p.html_basic.is_match(text) || p.html_element.is_match(text)
}

/// Decide the content class of a sub-document and de-render its body.
///
/// HTML-looking text wins over an XML block, which wins over plain text.
pub fn classify(text: &str, xml_block: Option<&str>) -> DocumentContent {
    if looks_like_html(text) {
        DocumentContent::Html {
            pages: non_empty(vec![html_to_text(text)]),
        }
    } else if let Some(block) = xml_block {
        let body = xml::strip_declaration(block);
        let parsed = match xml::parse(&body) {
            Ok(tree) => Some(tree),
            Err(e) => {
                log::warn!("Skipping XML body: {}", e);
                None
            }
        };
        DocumentContent::Xml { parsed }
    } else {
        DocumentContent::Plain {
            pages: plain_pages(text),
        }
    }
}

/// Entity decoding rounds for double-escaped markup such as `&amp;nbsp;`
const MAX_UNESCAPE_PASSES: usize = 3;

/// Reduce an HTML body to prose: tables, scripts and markup are dropped and
/// entities decoded. Closing block elements become line breaks.
pub fn html_to_text(html: &str) -> String {
    let p = patterns();
    let text = strip_tables(html);
    let text = p.script_style.replace_all(&text, "");
    let text = p.comment.replace_all(&text, "");
    let text = p.block_break.replace_all(&text, "\n");

    let mut text = strip_tags(&text);
    for _ in 0..MAX_UNESCAPE_PASSES {
        let decoded = html_escape::decode_html_entities(&text).into_owned();
        if decoded == text {
            break;
        }
        text = strip_tags(&decoded);
    }

    p.paragraph_break.replace_all(&text, "\n\n").trim().to_string()
}

/// Remove every outermost `<table>` region, nested tables included.
/// An unclosed table runs to the end of the text.
fn strip_tables(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut depth = 0usize;
    let mut kept_from = 0;

    for caps in patterns().table_tag.captures_iter(html) {
        let Some(tag) = caps.get(0) else { continue };
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());

        if closing {
            if depth == 0 {
                continue;
            }
            depth -= 1;
            if depth == 0 {
                kept_from = tag.end();
            }
        } else {
            if depth == 0 {
                out.push_str(&html[kept_from..tag.start()]);
            }
            depth += 1;
        }
    }

    if depth == 0 {
        out.push_str(&html[kept_from..]);
    }
    out
}

pub fn strip_tags(text: &str) -> String {
    patterns().tag.replace_all(text, "").into_owned()
}

/// Pages of a plain-text body. Whatever precedes the first `<PAGE>` marker
/// is cover boilerplate and is discarded.
pub fn plain_pages(text: &str) -> Vec<String> {
    let pages = patterns()
        .page_marker
        .split(text)
        .skip(1)
        .map(str::to_string)
        .collect();
    non_empty(pages)
}

fn non_empty(pages: Vec<String>) -> Vec<String> {
    pages
        .into_iter()
        .map(|page| page.trim().to_string())
        .filter(|page| !page.is_empty())
        .collect()
}
