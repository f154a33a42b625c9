use super::context::AppContext;
use crate::output::{styled_table, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use review_dash_core::{ApprovalError, ApprovalStore, SnapshotSource};
use serde_json::json;

/// Single ids go through add/remove; several ids are one bulk update.
pub fn update_approvals(store: &dyn ApprovalStore, ids: &[u64], approved: bool) -> Result<usize, ApprovalError> {
    match (ids, approved) {
        ([id], true) => store.add(*id),
        ([id], false) => store.remove(*id),
        (ids, approved) => store.bulk_set(ids, approved),
    }
}

pub fn run_set_approval(ids: Vec<u64>, approved: bool, ctx: &AppContext, output: &Output) -> Result<()> {
    let store = ctx.approval_store();

    let total = match update_approvals(&store, &ids, approved) {
        Ok(total) => total,
        Err(e) => {
            output.error(format!("approval update failed: {}", e));
            return Err(eyre!("approval update failed"));
        }
    };

    if output.is_human() {
        let verb = if approved { "Approved" } else { "Unapproved" };
        let list = ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ");
        output.success(format!("{} {} ({} approved in total)", verb, list, total));
    } else {
        output.data(&json!({
            "success": true,
            "data": {
                "reviewIds": ids,
                "approved": approved,
                "updatedCount": ids.len(),
                "totalApproved": total,
            }
        }));
    }
    Ok(())
}

pub fn run_list_approvals(ctx: &AppContext, output: &Output) -> Result<()> {
    let snapshot = ctx.approval_snapshot();

    if !output.is_human() {
        output.data(&json!({ "success": true, "data": snapshot.ids }));
        return Ok(());
    }

    if snapshot.source == SnapshotSource::Defaults {
        output.warn("Approval state could not be read; showing the bootstrap list");
    }

    let mut table = styled_table(["Approved review ID"]);
    for id in &snapshot.ids {
        table.add_row(vec![Cell::new(id)]);
    }
    output.table(&table);
    output.info(format!("{} approved", snapshot.ids.len()));
    Ok(())
}
