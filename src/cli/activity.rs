use super::ui;
use crate::core::client::ConsoleApi;
use crate::feed::FeedEntry;
use crate::query::LedgerQuery;
use anyhow::Result;
use comfy_table::Cell;

pub fn display_feed_as_table(feed: &[FeedEntry], year: &str) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Investment"),
        ui::header_cell("Month"),
        ui::header_cell("Activity"),
        ui::header_cell("Amount"),
    ]);

    for entry in feed {
        table.add_row(vec![
            Cell::new(entry.created_at.format("%Y-%m-%d %H:%M").to_string()),
            Cell::new(&entry.investment_title),
            Cell::new(&entry.month),
            Cell::new(entry.text.as_deref().unwrap_or("")),
            ui::format_optional_cell(entry.amount, |a| format!("{a:.2}")),
        ]);
    }

    let mut output = format!(
        "Activity: {}\n\n",
        ui::style_text(year, ui::StyleType::Title)
    );
    output.push_str(&table.to_string());

    if feed.is_empty() {
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text("No activity for this year", ui::StyleType::Subtle)
        ));
    }

    output
}

pub async fn run(api: &(dyn ConsoleApi), investor_id: &str, year: &str) -> Result<()> {
    let pb = ui::new_spinner("Fetching transactions...");
    let query = LedgerQuery::new(api);
    let feed = query.activity(investor_id, year).await;
    pb.finish_and_clear();

    let feed = feed?;
    println!("{}", display_feed_as_table(&feed, year));
    Ok(())
}
