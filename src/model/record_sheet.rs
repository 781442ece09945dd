// src/model/record_sheet.rs

use serde::Serialize;

/// Standard Beer Game costs: $0.50 per case held, $1.00 per case backlogged.
pub const INVENTORY_COST_PER_CASE: f64 = 0.50;
pub const BACKLOG_COST_PER_CASE: f64 = 1.00;

/// One week of one role's ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeeklyRecord {
    pub week: u32,
    pub inventory: u32,
    pub backlog: u32,
    pub order_placed: u32,
    pub cost: f64,
}

impl WeeklyRecord {
    /// Inventory minus backlog; negative in a backlog week.
    pub fn effective_inventory(&self) -> i64 {
        i64::from(self.inventory) - i64::from(self.backlog)
    }
}

/// Append-only weekly ledger kept by a single role.
#[derive(Debug, Clone, Default)]
pub struct RecordSheet {
    records: Vec<WeeklyRecord>,
}

impl RecordSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weekly_cost(inventory: u32, backlog: u32) -> f64 {
        (f64::from(inventory) * INVENTORY_COST_PER_CASE) + (f64::from(backlog) * BACKLOG_COST_PER_CASE)
    }

    /// Appends a week. Weeks must arrive in non-decreasing order; the owning
    /// `Role` records each week once, right after its fill step.
    pub fn record(&mut self, week: u32, inventory: u32, backlog: u32, order_placed: u32) -> WeeklyRecord {
        debug_assert!(
            self.latest().map_or(true, |last| last.week <= week),
            "week {} recorded after week {}",
            week,
            self.records.last().map_or(0, |last| last.week)
        );
        let record = WeeklyRecord {
            week,
            inventory,
            backlog,
            order_placed,
            cost: Self::weekly_cost(inventory, backlog),
        };
        self.records.push(record);
        record
    }

    pub fn records(&self) -> &[WeeklyRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&WeeklyRecord> {
        self.records.last()
    }

    pub fn week(&self, week: u32) -> Option<&WeeklyRecord> {
        self.records.iter().find(|record| record.week == week)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_cost(&self) -> f64 {
        self.records.iter().map(|record| record.cost).sum()
    }

    pub fn total_inventory(&self) -> u64 {
        self.records.iter().map(|record| u64::from(record.inventory)).sum()
    }

    pub fn total_backlog(&self) -> u64 {
        self.records.iter().map(|record| u64::from(record.backlog)).sum()
    }

    pub fn orders_history(&self) -> Vec<u32> {
        self.records.iter().map(|record| record.order_placed).collect()
    }

    pub fn effective_inventory_history(&self) -> Vec<i64> {
        self.records.iter().map(WeeklyRecord::effective_inventory).collect()
    }
}
