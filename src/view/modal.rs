use crate::article::Article;
use crate::markdown::{self, StyleRules};
use crate::resolve::DateParam;
use crate::view::escape::{encode_query, escape_attr, escape_html};
use crate::view::grid::detail_href;
use crate::view::layout::{article_image, category_badge};

/// Dialog overlay for one article of a date listing.
pub fn article_modal(article: &Article, day: &DateParam, rules: &StyleRules) -> String {
    let body = markdown::to_html(&markdown::render(&article.body), rules);
    let close = format!("/date/{day}");
    let related = format!("/date/{day}?category={}", encode_query(&article.category));

    format!(
        r#"<div role="dialog" aria-modal="true" aria-labelledby="article-modal-title" class="fixed inset-0 z-50 flex items-center justify-center bg-black/80">
<div class="relative max-w-4xl max-h-[90vh] w-full overflow-y-auto rounded-lg bg-background p-6 shadow-lg">
<a href="{close}" data-nav="internal" aria-label="Close" class="absolute right-4 top-4 text-xl">&times;</a>
<div class="space-y-4">
<div class="relative aspect-video overflow-hidden rounded-lg">{image}{badge}</div>
<h2 id="article-modal-title" class="text-left text-2xl leading-tight">{title}</h2>
<div class="flex items-center space-x-4 text-sm text-muted-foreground border-b pb-4"><span>By {author}</span><span>{published}</span></div>
</div>
<div class="space-y-4 text-foreground leading-relaxed mt-4">{body}</div>
<div class="border-t pt-6 mt-8 flex items-center justify-between">
<div class="text-sm text-muted-foreground">Published on {published} in {category}</div>
<div class="space-x-2"><a href="{related}" data-nav="internal" class="rounded-md border px-3 py-1 text-sm">Related Articles</a><a href="{detail}" data-nav="internal" class="rounded-md border px-3 py-1 text-sm">Read full article</a></div>
</div>
</div>
</div>"#,
        close = escape_attr(&close),
        related = escape_attr(&related),
        detail = escape_attr(&detail_href(article)),
        image = article_image(article, "w-full h-full object-cover", false),
        badge = category_badge(&article.category, "absolute top-4 left-4 bg-background/90 text-foreground"),
        title = escape_html(&article.title),
        author = escape_html(&article.author),
        published = escape_html(&article.published_at),
        category = escape_html(&article.category),
    )
}
