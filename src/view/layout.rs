use chrono::{Datelike, Utc};

use crate::article::Article;
use crate::view::escape::{escape_attr, escape_html};

pub const SITE_TITLE: &str = "Trending Stories";
const TRENDS_URL: &str = "https://trends.google.com/trends/trendingsearches/daily";

/// Shown when an article has no image or its image fails to load.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iODgiIGhlaWdodD0iODgiIHhtbG5zPSJodHRwOi8vd3d3LnczLm9yZy8yMDAwL3N2ZyIgc3Ryb2tlPSIjMDAwIiBzdHJva2UtbGluZWpvaW49InJvdW5kIiBvcGFjaXR5PSIuMyIgZmlsbD0ibm9uZSIgc3Ryb2tlLXdpZHRoPSIzLjciPjxyZWN0IHg9IjE2IiB5PSIxNiIgd2lkdGg9IjU2IiBoZWlnaHQ9IjU2IiByeD0iNiIvPjxwYXRoIGQ9Im0xNiA1OCAxNi0xOCAzMiAzMiIvPjxjaXJjbGUgY3g9IjUzIiBjeT0iMzUiIHI9IjciLz48L3N2Zz4K";

/// Client half of navigation state: reports departures, restores scroll,
/// drives back controls, and swaps broken images for the placeholder.
const NAV_SCRIPT: &str = r#"
document.addEventListener('click', function (event) {
  var back = event.target.closest('[data-action="back"]');
  if (back) {
    event.preventDefault();
    history.back();
    return;
  }
  var link = event.target.closest('a[data-nav="internal"]');
  if (!link || event.defaultPrevented || event.button !== 0 || event.metaKey || event.ctrlKey || event.shiftKey) {
    return;
  }
  event.preventDefault();
  fetch('/api/navigation/departure', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ path: location.pathname, offsetY: Math.round(window.scrollY) }),
    credentials: 'same-origin',
    keepalive: true
  }).catch(function () {}).finally(function () { location.href = link.href; });
});
document.addEventListener('error', function (event) {
  var img = event.target;
  if (img.tagName === 'IMG' && img.dataset.fallback && img.src !== img.dataset.fallback) {
    img.dataset.originalUrl = img.src;
    img.src = img.dataset.fallback;
    img.alt = '';
  }
}, true);
window.addEventListener('load', function () {
  var offset = document.body.dataset.restoreScroll;
  if (offset) {
    window.scrollTo(0, Number(offset));
  }
});
"#;

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub title: String,
    pub body: String,
    /// Scroll offset to restore once the page has loaded.
    pub restore_scroll: Option<i64>,
}

impl Page {
    pub fn new(title: impl Into<String>, body: String) -> Self {
        Self {
            title: title.into(),
            body,
            restore_scroll: None,
        }
    }

    pub fn restore_scroll(mut self, offset: Option<i64>) -> Self {
        self.restore_scroll = offset;
        self
    }
}

pub fn render_page(page: &Page) -> String {
    let title = if page.title.is_empty() {
        SITE_TITLE.to_string()
    } else {
        format!("{} | {SITE_TITLE}", page.title)
    };
    let restore = page
        .restore_scroll
        .map(|offset| format!(" data-restore-scroll=\"{offset}\""))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="min-h-screen bg-background"{restore}>
{header}
<main>
{body}
</main>
{footer}
<script>{NAV_SCRIPT}</script>
</body>
</html>
"#,
        title = escape_html(&title),
        header = header(),
        body = page.body,
        footer = footer(),
    )
}

fn header() -> String {
    format!(
        r#"<header class="border-b bg-background sticky top-0 z-50">
<div class="container mx-auto px-4 py-4 flex items-center justify-between">
<div class="flex items-end">
<h1 class="text-2xl font-bold text-primary"><a href="/">{SITE_TITLE}</a></h1>
<span class="ml-2 text-sm text-muted-foreground">Explore the stories behind daily <a href="{TRENDS_URL}" target="_blank" rel="noopener noreferrer">U.S. Google Trends (excluding sports news)</a></span>
</div>
<input type="search" placeholder="Search news..." aria-label="Search news" class="hidden md:block w-64 rounded-md border px-3 py-1 text-sm">
</div>
</header>"#
    )
}

fn footer() -> String {
    format!(
        r#"<footer class="text-black text-center py-4 mt-8"><p>Copyright (c) {} <a href="https://github.com/sudoghut" target="_blank" rel="noopener noreferrer">oopus</a></p></footer>"#,
        Utc::now().year()
    )
}

/// Article image, or the placeholder with empty alt text when there is none.
pub fn article_image(article: &Article, class: &str, lazy: bool) -> String {
    let (src, alt) = if article.has_image() {
        (article.image_url.as_str(), article.title.as_str())
    } else {
        (PLACEHOLDER_IMAGE, "")
    };
    format!(
        r#"<img src="{}" alt="{}" class="{}" data-fallback="{PLACEHOLDER_IMAGE}"{}>"#,
        escape_attr(src),
        escape_attr(alt),
        escape_attr(class),
        if lazy { r#" loading="lazy""# } else { "" },
    )
}

pub fn category_badge(category: &str, class: &str) -> String {
    format!(
        r#"<span class="inline-flex items-center rounded-md px-2 py-0.5 text-xs font-medium {}">{}</span>"#,
        escape_attr(class),
        escape_html(category)
    )
}

/// Large centered message used for errors and empty states.
pub fn notice(class: &str, message: &str) -> String {
    format!(
        r#"<div class="{} text-center py-8">{}</div>"#,
        escape_attr(class),
        escape_html(message)
    )
}
