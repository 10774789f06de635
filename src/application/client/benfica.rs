//! Benfica lift-and-shift report.
//!
//! Reads the exported `packs` and `order_details` tables, keeps completed
//! orders and joins them with their packs.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::error::{Error, Result};

/// Order status kept by the join.
pub const COMPLETE: &str = "COMPLETE";

/// One row of the exported `packs` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pack {
    pub pack_id: i64,
    #[serde(default)]
    pub pack_serial: Option<i64>,
    #[serde(default)]
    pub pack_edition_rid: Option<i64>,
    /// Order the pack was sold in, if any.
    #[serde(default)]
    pub order_rid: Option<i64>,
    #[serde(default)]
    pub is_sold: bool,
    #[serde(default)]
    pub is_opened: bool,
    #[serde(default)]
    pub pack_opened_date: Option<String>,
}

/// One row of the exported `order_details` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderDetail {
    pub order_id: i64,
    #[serde(default)]
    pub user_reg_rid: Option<i64>,
    #[serde(default)]
    pub pack_edition_rid: Option<i64>,
    #[serde(default)]
    pub no_of_packs: Option<i64>,
    #[serde(default)]
    pub total_value: Option<f64>,
    pub tx_status: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl OrderDetail {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.tx_status == COMPLETE
    }
}

/// A completed order with the packs sold in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub details: OrderDetail,
    pub packs: Vec<Pack>,
}

/// Counts produced by [`lift_and_shift`].
#[derive(Debug, Clone, PartialEq)]
pub struct LiftAndShiftReport {
    pub packs: usize,
    pub order_details: usize,
    pub completed: usize,
    pub orders: Vec<Order>,
}

/// Join completed orders with their packs. Orders without packs are dropped.
#[must_use]
pub fn join_orders(packs: &[Pack], order_details: Vec<OrderDetail>) -> Vec<Order> {
    order_details
        .into_iter()
        .filter(OrderDetail::is_complete)
        .filter_map(|details| {
            let packs: Vec<Pack> = packs
                .iter()
                .filter(|pack| pack.order_rid == Some(details.order_id))
                .cloned()
                .collect();
            (!packs.is_empty()).then_some(Order { details, packs })
        })
        .collect()
}

/// Load `packs.json` and `order_details.json` from `data_dir` and join them.
///
/// # Errors
///
/// Returns an IO error when a file is missing and a JSON error when a file
/// does not hold the expected table.
pub fn lift_and_shift(data_dir: &Path) -> Result<LiftAndShiftReport> {
    let packs: Vec<Pack> = read_table(data_dir, "packs")?;
    let order_details: Vec<OrderDetail> = read_table(data_dir, "order_details")?;
    let total_details = order_details.len();
    let completed = order_details.iter().filter(|o| o.is_complete()).count();
    debug!(
        component = "benfica",
        method = "lift_and_shift",
        completed,
        "Completed orders"
    );

    let orders = join_orders(&packs, order_details);
    info!(
        component = "benfica",
        method = "lift_and_shift",
        packs = packs.len(),
        order_details = total_details,
        completed,
        orders = orders.len(),
        "Orders joined"
    );

    Ok(LiftAndShiftReport {
        packs: packs.len(),
        order_details: total_details,
        completed,
        orders,
    })
}

/// Read `<table>.json`, whose rows sit under a top-level `<table>` key.
fn read_table<T: DeserializeOwned>(data_dir: &Path, table: &str) -> Result<Vec<T>> {
    let path = data_dir.join(format!("{table}.json"));
    let content = std::fs::read_to_string(&path).map_err(|e| {
        error!(
            component = "benfica",
            method = "read_table",
            path = %path.display(),
            error = %e,
            "Failed to read table"
        );
        e
    })?;

    let mut document: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&content)?;
    let rows = document
        .remove(table)
        .ok_or_else(|| Error::Parse(format!("{} has no {table} key", path.display())))?;
    let rows: Vec<T> = serde_json::from_value(rows)?;

    debug!(
        component = "benfica",
        method = "read_table",
        table,
        rows = rows.len(),
        "Table loaded"
    );
    Ok(rows)
}
