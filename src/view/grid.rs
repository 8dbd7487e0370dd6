use crate::article::Article;
use crate::markdown;
use crate::resolve::DateParam;
use crate::view::escape::{escape_attr, escape_html};
use crate::view::layout::{article_image, category_badge};

const EXCERPT_CHARS: usize = 180;

/// Where a card leads when clicked.
#[derive(Debug, Clone, Copy)]
pub enum CardTarget<'a> {
    /// The full article page.
    Detail,
    /// The modal over a date listing.
    Modal(&'a DateParam),
}

/// `/article/{id}?date=yyyymmdd` when the published date has a day, else `/article/{id}`.
pub fn detail_href(article: &Article) -> String {
    match DateParam::from_published(&article.published_at) {
        Some(day) => format!("/article/{}?date={day}", article.id),
        None => format!("/article/{}", article.id),
    }
}

pub fn card_href(article: &Article, target: CardTarget<'_>) -> String {
    match target {
        CardTarget::Detail => detail_href(article),
        CardTarget::Modal(day) => format!("/date/{day}?article={}", article.id),
    }
}

pub fn news_card(article: &Article, target: CardTarget<'_>) -> String {
    format!(
        r#"<a href="{href}" data-nav="internal" class="group block">
<div class="overflow-hidden rounded-lg border bg-card shadow-sm hover:shadow-lg transition-shadow cursor-pointer">
<div class="relative aspect-video overflow-hidden">{image}{badge}</div>
<div class="p-4 space-y-3">
<h3 class="line-clamp-2 group-hover:text-primary transition-colors">{title}</h3>
<p class="text-muted-foreground line-clamp-3">{excerpt}</p>
<div class="flex items-center justify-between text-sm text-muted-foreground"><span>{author}</span><span>{published}</span></div>
</div>
</div>
</a>"#,
        href = escape_attr(&card_href(article, target)),
        image = article_image(
            article,
            "w-full h-full object-cover group-hover:scale-105 transition-transform duration-300",
            true
        ),
        badge = category_badge(&article.category, "absolute top-3 left-3 bg-background/90 text-foreground"),
        title = escape_html(&article.title),
        excerpt = escape_html(&markdown::excerpt(&article.body, EXCERPT_CHARS)),
        author = escape_html(&article.author),
        published = escape_html(&article.published_at),
    )
}

pub fn news_grid<'a>(
    articles: impl IntoIterator<Item = &'a Article>,
    target: CardTarget<'_>,
) -> String {
    let cards: String = articles
        .into_iter()
        .map(|article| news_card(article, target))
        .collect();

    if cards.is_empty() {
        return r#"<div class="text-center py-12"><p class="text-muted-foreground">No news articles available at the moment.</p></div>"#
            .to_string();
    }

    format!(
        r#"<div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-6">{cards}</div>"#
    )
}
