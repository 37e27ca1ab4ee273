use colored::Colorize;
use trend_common::{PageSize, PageToken, Pagination};

/// Results summary, page controls and page-size options; nothing at all
/// when there is only one page.
pub fn render(bar: &Pagination) -> String {
    if !bar.is_visible() {
        return String::new();
    }

    let (first, last) = bar.item_range();
    let info = format!(
        "Showing {first} to {last} of {} results",
        bar.total_elements
    );

    let previous = if bar.has_previous() {
        "‹ Previous".normal()
    } else {
        "‹ Previous".dimmed()
    };
    let next = if bar.has_next() {
        "Next ›".normal()
    } else {
        "Next ›".dimmed()
    };

    let mut controls = vec![previous.to_string()];
    controls.extend(bar.tokens().into_iter().map(|token| match token {
        PageToken::Page(label) if label == bar.current_page + 1 => {
            format!("[{label}]").blue().bold().to_string()
        }
        PageToken::Page(label) => label.to_string(),
        PageToken::Ellipsis => "...".to_string(),
    }));
    controls.push(next.to_string());

    let sizes = PageSize::ALL
        .iter()
        .map(|size| {
            if *size == bar.page_size {
                format!("[{size}]").bold().to_string()
            } else {
                size.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!("{info}\n{}    Show: {sizes}", controls.join(" "))
}
