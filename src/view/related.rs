use crate::article::Article;
use crate::resolve::DateParam;
use crate::view::escape::escape_html;
use crate::view::grid::{news_grid, CardTarget};

/// Cosmetic page size for the "Showing n of m" label.
const PAGE_SIZE: usize = 20;

/// Articles whose category matches, ignoring case.
pub fn filter_by_category<'a>(articles: &'a [Article], category: &str) -> Vec<&'a Article> {
    let wanted = category.to_lowercase();
    articles
        .iter()
        .filter(|article| article.category.to_lowercase() == wanted)
        .collect()
}

pub fn related_view(category: &str, articles: &[Article], day: &DateParam) -> String {
    let related = filter_by_category(articles, category);
    let total = related.len();
    let category = escape_html(category);
    let back = format!(
        r#"<a href="/date/{day}" data-nav="internal" class="inline-flex items-center text-sm hover:underline">&larr; Back</a>"#
    );

    let header = format!(
        r#"<div class="border-b bg-background">
<div class="container mx-auto px-4 py-6">
<div class="flex items-center justify-between">
<div class="flex items-center space-x-4">{back}<h1 class="text-2xl">Related Articles</h1><span class="rounded-md bg-muted px-3 py-1 text-sm">{category}</span></div>
<span class="text-sm text-muted-foreground">{total} articles found</span>
</div>
<div class="mt-4 p-4 bg-muted/30 rounded-lg"><p class="text-muted-foreground">Discover more stories from our <span class="text-foreground font-medium">{category}</span> section.</p></div>
</div>
</div>"#
    );

    let content = if related.is_empty() {
        format!(
            r#"<div class="text-center py-16"><div class="max-w-md mx-auto space-y-4">
<h3 class="text-xl">No related articles found</h3>
<p class="text-muted-foreground">We couldn't find any articles in the <span class="font-medium">{category}</span> category at the moment. Check back later for new content.</p>
<a href="/date/{day}" data-nav="internal" class="inline-block rounded-md border px-4 py-2">Browse All Articles</a>
</div></div>"#
        )
    } else {
        format!(
            r#"{grid}
<div class="text-center pt-12"><button type="button" class="rounded-md border px-6 py-2">Load More Articles</button>
<p class="text-sm text-muted-foreground mt-3">Showing {shown} of {total} articles</p></div>"#,
            grid = news_grid(related.iter().copied(), CardTarget::Modal(day)),
            shown = total.min(PAGE_SIZE),
        )
    };

    format!(r#"{header}<div class="container mx-auto px-4 py-8">{content}</div>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::AUTHOR;

    fn article(id: i64, category: &str) -> Article {
        Article {
            id,
            title: format!("Story {id}"),
            body: String::new(),
            image_url: String::new(),
            category: category.to_string(),
            author: AUTHOR.to_string(),
            published_at: String::new(),
        }
    }

    #[test]
    fn test_filter_ignores_case() {
        let articles = vec![article(1, "Tech"), article(2, "Science"), article(3, "tech")];
        let ids: Vec<i64> = filter_by_category(&articles, "TECH").iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_related_view_counts_and_empty_state() {
        let day = DateParam::parse("20250918").unwrap();
        let articles = vec![article(1, "Tech"), article(2, "Science")];

        let html = related_view("tech", &articles, &day);
        assert!(html.contains("1 articles found"));
        assert!(html.contains("Showing 1 of 1 articles"));

        let html = related_view("Sports", &articles, &day);
        assert!(html.contains("0 articles found"));
        assert!(html.contains("No related articles found"));
    }
}
