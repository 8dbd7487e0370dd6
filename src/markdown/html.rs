use std::collections::HashSet;
use std::fmt::Write;

use ammonia::Builder as HtmlSanitizer;

use crate::markdown::block::{Block, Inline};
use crate::markdown::rules::{ElementKind, StyleRules};
use crate::view::escape::{escape_attr, escape_html};

/// The only schemes a link may carry. Scheme-less hrefs are relative.
const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Render blocks and pass the result through the sanitizer, so an href the
/// writer let through still cannot carry a script URL.
pub fn to_html(blocks: &[Block], rules: &StyleRules) -> String {
    let mut out = String::new();
    for block in blocks {
        write_block(&mut out, block, rules);
    }
    sanitize(&out)
}

fn sanitize(html: &str) -> String {
    HtmlSanitizer::default()
        .url_schemes(HashSet::from(SAFE_SCHEMES))
        .link_rel(None)
        .add_generic_attributes(&["class"])
        .add_tag_attributes("a", &["target", "rel"])
        .add_tag_attributes("code", &["data-language"])
        .clean(html)
        .to_string()
}

/// Absolute and protocol-relative links leave the site.
pub fn is_external(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//")
}

/// Browsers drop ASCII whitespace and control characters from a URL before
/// reading its scheme, so the check runs on the href without them.
pub fn is_safe_href(href: &str) -> bool {
    let cleaned: String = href
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    let Some(colon) = cleaned.find(':') else {
        return true;
    };
    let scheme = &cleaned[..colon];
    // A colon after a path, query or fragment delimiter is not a scheme.
    scheme.contains(['/', '?', '#']) || SAFE_SCHEMES.contains(&scheme)
}

fn open(out: &mut String, tag: &str, kind: ElementKind, rules: &StyleRules) {
    let _ = write!(out, "<{tag} class=\"{}\">", escape_attr(rules.class_for(kind)));
}

fn write_block(out: &mut String, block: &Block, rules: &StyleRules) {
    match block {
        Block::Heading { level, content } => {
            let level = (*level).clamp(1, 6);
            let tag = format!("h{level}");
            open(out, &tag, ElementKind::Heading(level), rules);
            write_inlines(out, content, rules);
            let _ = write!(out, "</{tag}>");
        }
        Block::Paragraph(content) => {
            open(out, "p", ElementKind::Paragraph, rules);
            write_inlines(out, content, rules);
            out.push_str("</p>");
        }
        Block::Text(content) => write_inlines(out, content, rules),
        Block::List {
            ordered,
            start,
            items,
        } => {
            if *ordered {
                let _ = write!(
                    out,
                    "<ol class=\"{}\" start=\"{start}\">",
                    escape_attr(rules.class_for(ElementKind::OrderedList))
                );
            } else {
                open(out, "ul", ElementKind::UnorderedList, rules);
            }
            for item in items {
                open(out, "li", ElementKind::ListItem, rules);
                for block in item {
                    write_block(out, block, rules);
                }
                out.push_str("</li>");
            }
            out.push_str(if *ordered { "</ol>" } else { "</ul>" });
        }
        Block::CodeBlock { language, code } => {
            open(out, "pre", ElementKind::Pre, rules);
            let _ = write!(
                out,
                "<code class=\"{}\"",
                escape_attr(rules.class_for(ElementKind::CodeBlock))
            );
            if let Some(language) = language {
                let _ = write!(out, " data-language=\"{}\"", escape_attr(language));
            }
            let _ = write!(out, ">{}</code></pre>", escape_html(code));
        }
        Block::BlockQuote(blocks) => {
            open(out, "blockquote", ElementKind::BlockQuote, rules);
            for block in blocks {
                write_block(out, block, rules);
            }
            out.push_str("</blockquote>");
        }
        Block::Table { head, rows } => {
            open(out, "div", ElementKind::TableWrapper, rules);
            open(out, "table", ElementKind::Table, rules);
            if !head.is_empty() {
                open(out, "thead", ElementKind::TableHead, rules);
                open(out, "tr", ElementKind::TableRow, rules);
                for cell in head {
                    open(out, "th", ElementKind::TableHeader, rules);
                    write_inlines(out, cell, rules);
                    out.push_str("</th>");
                }
                out.push_str("</tr></thead>");
            }
            open(out, "tbody", ElementKind::TableBody, rules);
            for row in rows {
                open(out, "tr", ElementKind::TableRow, rules);
                for cell in row {
                    open(out, "td", ElementKind::TableCell, rules);
                    write_inlines(out, cell, rules);
                    out.push_str("</td>");
                }
                out.push_str("</tr>");
            }
            out.push_str("</tbody></table></div>");
        }
        Block::Rule => {
            let _ = write!(
                out,
                "<hr class=\"{}\">",
                escape_attr(rules.class_for(ElementKind::Rule))
            );
        }
    }
}

fn write_inlines(out: &mut String, inlines: &[Inline], rules: &StyleRules) {
    for inline in inlines {
        write_inline(out, inline, rules);
    }
}

fn write_inline(out: &mut String, inline: &Inline, rules: &StyleRules) {
    match inline {
        Inline::Text(text) => out.push_str(&escape_html(text)),
        Inline::Emphasis(content) => {
            open(out, "em", ElementKind::Emphasis, rules);
            write_inlines(out, content, rules);
            out.push_str("</em>");
        }
        Inline::Strong(content) => {
            open(out, "strong", ElementKind::Strong, rules);
            write_inlines(out, content, rules);
            out.push_str("</strong>");
        }
        Inline::Code(code) => {
            open(out, "code", ElementKind::InlineCode, rules);
            out.push_str(&escape_html(code));
            out.push_str("</code>");
        }
        Inline::Link { href, content } if !is_safe_href(href) => write_inlines(out, content, rules),
        Inline::Link { href, content } => {
            let _ = write!(
                out,
                "<a class=\"{}\" href=\"{}\"",
                escape_attr(rules.class_for(ElementKind::Link)),
                escape_attr(href)
            );
            if is_external(href) {
                out.push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
            }
            out.push('>');
            write_inlines(out, content, rules);
            out.push_str("</a>");
        }
        Inline::LineBreak => out.push_str("<br>"),
    }
}
