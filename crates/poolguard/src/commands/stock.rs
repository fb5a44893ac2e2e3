//! Stock command handlers.

use tabled::Tabled;

use poolguard_core::{InventoryItem, Session, Unit};

use crate::cli::{GlobalOpts, StockArgs, StockCommand};
use crate::error::CliError;
use crate::output::{self, Palette};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct StockRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl StockRow {
    fn new(item: &InventoryItem, palette: Palette) -> Self {
        let status = if item.is_short() {
            palette.warn(&format!("short {}", output::fmt_amount(item.shortfall())))
        } else {
            palette.good("ok")
        };
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            quantity: output::fmt_amount(item.quantity),
            target: output::fmt_amount(item.target_quantity),
            unit: item.unit.to_string(),
            status,
        }
    }
}

fn print_items(items: &[InventoryItem], global: &GlobalOpts) -> Result<(), CliError> {
    let palette = Palette::new(&global.color);
    let out = output::render_list(
        &global.output,
        items,
        |i| StockRow::new(i, palette),
        |i| i.id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn print_item(item: &InventoryItem, global: &GlobalOpts) -> Result<(), CliError> {
    print_items(std::slice::from_ref(item), global)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &mut Session,
    args: StockArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        StockCommand::List => print_items(session.ledger().items(), global),

        StockCommand::Shortages => {
            let short: Vec<InventoryItem> = session.shortages().into_iter().cloned().collect();
            if short.is_empty() {
                output::notice("✓ Every item is at or above its target", global.quiet);
            }
            print_items(&short, global)
        }

        StockCommand::Adjust { item, delta } => {
            let delta = util::require_finite("delta", delta)?;
            let id = util::resolve_item_id(session, &item)?;
            let updated = session
                .adjust_quantity(&id, delta)
                .await
                .ok_or_else(|| CliError::Internal(format!("stock item {id} vanished")))?;
            util::report_sync(session, global);
            print_item(&updated, global)
        }

        StockCommand::Target { item, delta } => {
            let delta = util::require_finite("delta", delta)?;
            let id = util::resolve_item_id(session, &item)?;
            let updated = session
                .adjust_target(&id, delta)
                .await
                .ok_or_else(|| CliError::Internal(format!("stock item {id} vanished")))?;
            util::report_sync(session, global);
            print_item(&updated, global)
        }

        StockCommand::Add {
            name,
            quantity,
            target,
            unit,
        } => {
            if name.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "name".into(),
                    reason: "cannot be blank".into(),
                });
            }
            let quantity = util::require_finite("quantity", quantity)?;
            let target = util::require_finite("target", target)?;
            let added = session
                .add_item(&name, quantity, target, Unit::from(unit))
                .await;
            util::report_sync(session, global);
            print_item(&added, global)
        }

        StockCommand::Remove { item } => {
            let id = util::resolve_item_id(session, &item)?;
            if !util::confirm(
                &format!("Remove '{item}' from stock?"),
                "stock remove",
                global.yes,
            )? {
                return Ok(());
            }
            if let Some(removed) = session.remove_item(&id).await {
                util::report_sync(session, global);
                output::notice(&format!("✓ Removed {}", removed.name), global.quiet);
            }
            Ok(())
        }
    }
}
