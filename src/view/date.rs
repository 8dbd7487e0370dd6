use crate::article::Article;
use crate::markdown::StyleRules;
use crate::resolve::{DateParam, ResolveError};
use crate::view::escape::escape_html;
use crate::view::grid::{news_grid, CardTarget};
use crate::view::layout::notice;
use crate::view::modal::article_modal;
use crate::view::related::related_view;

/// What the date page shows on top of the day's batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateSelection {
    #[default]
    Grid,
    Related(String),
    Article(i64),
}

impl DateSelection {
    /// `?category=` wins over `?article=`; a non-numeric article id falls back to the grid.
    pub fn from_query(category: Option<&str>, article: Option<&str>) -> Self {
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            return DateSelection::Related(category.to_string());
        }
        article
            .and_then(|raw| raw.parse().ok())
            .map(DateSelection::Article)
            .unwrap_or_default()
    }
}

pub fn date_page(
    raw_date: &str,
    outcome: &Result<Vec<Article>, ResolveError>,
    selection: &DateSelection,
    rules: &StyleRules,
) -> String {
    let day = match DateParam::parse(raw_date) {
        Ok(day) => day,
        Err(e) => return notice("text-red-600", &e.to_string()),
    };

    let articles = match outcome {
        Ok(articles) => articles,
        Err(ResolveError::NotFound(_)) => return no_data_panel(&day),
        Err(e @ ResolveError::InvalidDateFormat(_)) => return notice("text-red-600", &e.to_string()),
        Err(ResolveError::Transport(_)) => {
            return notice("text-red-600", "Failed to fetch news for the specified date")
        }
    };

    if let DateSelection::Related(category) = selection {
        return related_view(category, articles, &day);
    }

    let listing = if articles.is_empty() {
        notice("text-muted-foreground", "No records available for this date")
    } else {
        news_grid(articles, CardTarget::Modal(&day))
    };

    let modal = match selection {
        DateSelection::Article(id) => articles
            .iter()
            .find(|article| article.id == *id)
            .map(|article| article_modal(article, &day, rules))
            .unwrap_or_default(),
        _ => String::new(),
    };

    format!(
        r#"<div class="container mx-auto px-4 py-8">
<div class="mb-8"><h2 class="text-3xl font-bold mb-2">Trends for {display}</h2><p class="text-muted-foreground">Date: {day}</p></div>
{listing}
</div>
{modal}"#,
        display = escape_html(&day.display()),
    )
}

fn no_data_panel(day: &DateParam) -> String {
    format!(
        r#"<div class="container mx-auto px-4 py-12">
<div class="max-w-2xl mx-auto text-center rounded-lg border p-8">
<h2 class="text-2xl font-semibold mb-4">No Data Available</h2>
<p class="text-muted-foreground mb-4">Sorry, we don't have any trending stories for <span class="font-medium">{display}</span> ({day}).</p>
<div class="text-left text-sm text-muted-foreground mb-6">
<p class="mb-2">This could be because:</p>
<ul class="list-disc pl-6 space-y-1">
<li>The date is outside our data collection period</li>
<li>Data for this date hasn't been processed yet</li>
<li>There were no significant trends on this date</li>
</ul>
</div>
<a href="/" class="inline-block rounded-md border px-4 py-2 mr-2">Back to Home</a><button type="button" data-action="back" class="rounded-md border px-4 py-2">Go Back</button>
</div>
</div>"#,
        display = escape_html(&day.display()),
    )
}
