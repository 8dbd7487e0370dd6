use crate::article::Article;
use crate::resolve::ResolveError;
use crate::view::grid::{news_grid, CardTarget};
use crate::view::layout::notice;

pub fn home_page(outcome: &Result<Vec<Article>, ResolveError>) -> String {
    let content = match outcome {
        Ok(articles) => news_grid(articles, CardTarget::Detail),
        Err(e) => notice("text-red-600", &format!("Error: {e}")),
    };

    format!(
        r#"<div class="container mx-auto px-4 py-8">
<div class="mb-8"><p class="text-muted-foreground">Explore the stories behind daily <a href="https://trends.google.com/trends/trendingsearches/daily" target="_blank" rel="noopener noreferrer">U.S. Google Trends</a></p></div>
{content}
</div>"#
    )
}
