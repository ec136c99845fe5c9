use super::ui;
use crate::core::client::{ConsoleApi, Page, PageParams};
use crate::core::model::Referral;
use crate::query::LedgerQuery;
use anyhow::Result;
use comfy_table::Cell;

pub fn display_referrals_as_table(page: &Page<Referral>) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![ui::header_cell("Name"), ui::header_cell("Email")]);

    for referral in &page.items {
        table.add_row(vec![
            Cell::new(referral.name.as_deref().unwrap_or("")),
            Cell::new(referral.email.as_deref().unwrap_or("")),
        ]);
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Referrals", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\n{}: {}",
        ui::style_text("Total referrals", ui::StyleType::TotalLabel),
        ui::style_text(&page.meta.total.to_string(), ui::StyleType::TotalValue)
    ));

    output
}

pub async fn run(api: &(dyn ConsoleApi), agent_id: &str, params: &PageParams) -> Result<()> {
    let pb = ui::new_spinner("Fetching referrals...");
    let query = LedgerQuery::new(api);
    let page = query.referrals(agent_id, params).await;
    pb.finish_and_clear();

    let page = page?;
    println!("{}", display_referrals_as_table(&page));
    Ok(())
}
