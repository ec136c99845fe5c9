use super::ui;
use crate::core::client::{ConsoleApi, PageParams};
use crate::query::{Dashboard, LedgerQuery};
use anyhow::Result;
use comfy_table::Cell;

impl Dashboard {
    pub fn display_as_table(&self, investor_id: &str) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Investment"),
            ui::header_cell("Invested"),
            ui::header_cell("Due"),
            ui::header_cell("Paid"),
            ui::header_cell("Share (%)"),
        ]);

        for row in &self.rows {
            let participation = &row.participation;
            table.add_row(vec![
                Cell::new(&participation.investment.title),
                ui::amount_cell(&format!("{:.2}", participation.amount)),
                ui::amount_cell(&format!("{:.2}", participation.total_due)),
                ui::amount_cell(&format!("{:.2}", participation.total_paid)),
                ui::share_cell(&row.share),
            ]);
        }

        // Investor identity at top
        let mut output = format!(
            "Investor: {}\n\n",
            ui::style_text(investor_id, ui::StyleType::Title)
        );

        // Table in the middle
        output.push_str(&table.to_string());

        // Ledger totals at bottom
        output.push_str(&format!(
            "\n\n{}: {}    {}: {}    {}: {}    {}: {}",
            ui::style_text("Projects", ui::StyleType::TotalLabel),
            self.summary.total_projects,
            ui::style_text("Invested", ui::StyleType::TotalLabel),
            ui::style_text(
                &format!("{:.2}", self.summary.total_invested),
                ui::StyleType::TotalValue
            ),
            ui::style_text("Due", ui::StyleType::TotalLabel),
            format!("{:.2}", self.summary.total_due),
            ui::style_text("Paid", ui::StyleType::TotalLabel),
            ui::style_text(
                &format!("{:.2}", self.summary.total_paid),
                ui::StyleType::TotalValue
            ),
        ));

        if self.meta.total_page > 1 {
            output.push_str(&format!(
                "\n{}",
                ui::style_text(
                    &format!(
                        "Showing {} of {} participations",
                        self.rows.len(),
                        self.meta.total
                    ),
                    ui::StyleType::Subtle
                )
            ));
        }

        output
    }
}

pub async fn run(
    api: &(dyn ConsoleApi),
    investor_id: &str,
    params: &PageParams,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching ledger...");
    let query = LedgerQuery::new(api);
    let dashboard = query.dashboard(investor_id, params).await;
    pb.finish_and_clear();

    let dashboard = dashboard?;
    println!("{}", dashboard.display_as_table(investor_id));
    Ok(())
}
