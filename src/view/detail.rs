use crate::article::Article;
use crate::markdown::{self, StyleRules};
use crate::resolve::ResolveError;
use crate::view::escape::escape_html;
use crate::view::layout::{article_image, category_badge, notice};

/// Full article page. The back control only appears when the reader arrived
/// from another page of this site.
pub fn article_page(article: &Article, show_back: bool, rules: &StyleRules) -> String {
    let back = if show_back {
        r#"<button type="button" data-action="back" class="mb-6 inline-flex items-center text-sm hover:underline">&larr; Back</button>"#
    } else {
        r#"<a href="/" class="mb-6 inline-flex items-center text-sm hover:underline">&larr; Home</a>"#
    };
    let body = markdown::to_html(&markdown::render(&article.body), rules);

    format!(
        r#"<div class="container mx-auto px-4 py-8">
<article class="max-w-4xl mx-auto">
{back}
<div class="relative aspect-video overflow-hidden rounded-lg mb-6">{image}{badge}</div>
<h1 class="text-3xl font-bold mb-4 leading-tight">{title}</h1>
<div class="flex items-center space-x-4 text-sm text-muted-foreground border-b pb-4 mb-6"><span>By {author}</span><span>{published}</span></div>
<div class="space-y-4 text-foreground leading-relaxed">{body}</div>
<div class="border-t pt-6 mt-8"><div class="text-sm text-muted-foreground">Published on {published} in {category}</div></div>
</article>
</div>"#,
        image = article_image(article, "w-full h-full object-cover", false),
        badge = category_badge(&article.category, "absolute top-4 left-4 bg-background/90 text-foreground"),
        title = escape_html(&article.title),
        author = escape_html(&article.author),
        published = escape_html(&article.published_at),
        category = escape_html(&article.category),
    )
}

pub fn article_error(error: &ResolveError) -> String {
    match error {
        ResolveError::NotFound(_) => r#"<div class="container mx-auto px-4 py-12 text-center">
<h2 class="text-2xl font-semibold mb-2">Article not found</h2>
<p class="text-muted-foreground mb-6">We couldn't find this story. It may have been removed or the link is incorrect.</p>
<a href="/" class="underline mr-4">Back to Home</a><button type="button" data-action="back" class="underline">Go Back</button>
</div>"#
            .to_string(),
        ResolveError::InvalidDateFormat(_) => notice("text-red-600", &error.to_string()),
        ResolveError::Transport(_) => notice("text-red-600", &format!("Error: {error}")),
    }
}
