use super::ui;
use crate::core::client::{ConsoleApi, PageParams};
use crate::core::model::{Investment, RecordStatus};
use crate::query::LedgerQuery;
use anyhow::Result;
use comfy_table::Cell;

pub fn display_offers_as_table(offers: &[Investment]) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Investment"),
        ui::header_cell("Details"),
        ui::header_cell("Required"),
    ]);

    for offer in offers {
        table.add_row(vec![
            Cell::new(&offer.title),
            Cell::new(offer.details.as_deref().unwrap_or("")),
            ui::format_optional_cell(offer.amount_required, |a| format!("{a:.2}")),
        ]);
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Open Offers", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());

    if offers.is_empty() {
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text("No open offers", ui::StyleType::Subtle)
        ));
    }

    output
}

pub async fn run(
    api: &(dyn ConsoleApi),
    investor_id: &str,
    params: &PageParams,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching offers...");
    let query = LedgerQuery::new(api);
    let offers = query
        .open_offers(investor_id, RecordStatus::Active, params)
        .await;
    pb.finish_and_clear();

    let offers = offers?;
    println!("{}", display_offers_as_table(&offers));
    Ok(())
}
