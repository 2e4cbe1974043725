//! Console text for footprint summaries and bills.
//!
//! Everything here returns owned strings so the binary decides where they go.

use std::fmt::Write;

use serde::Serialize;

use crate::billing::BillBreakdown;
use crate::emission::{FootprintSummary, OFFSET_RUPEES_PER_TONNE};
use crate::store::{BillRow, ConsumerRecord};

pub const NO_FOOTPRINT_DATA: &str = "No data available. Please input at least one source.";
pub const NO_BILLS: &str = "No bills to display.";

const RULE: &str = "-------------------------------";
const TABLE_RULE: &str = "-----------------------------------------------------";

pub fn footprint_text(summary: &FootprintSummary) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "==== Annual Footprint ====");
    for line in &summary.lines {
        let label = format!("{}:", line.category.label());
        let _ = writeln!(s, "{:<15}{:.2} kg CO2", label, line.kg_co2);
    }
    let _ = writeln!(s, "{RULE}");
    let _ = writeln!(
        s,
        "{:<15}{:.2} kg CO2  (≈ {:.2} t)",
        "Total:", summary.total_kg, summary.tons
    );
    let _ = writeln!(s);
    let _ = writeln!(
        s,
        "Approx. offset cost @ Rs.{}/t = Rs.{}",
        OFFSET_RUPEES_PER_TONNE, summary.offset_cost_rupees
    );
    s
}

/// Figures of one bill, one per line; zero surcharge and fixed lines are omitted.
pub fn breakdown_text(breakdown: &BillBreakdown) -> String {
    let tariff = breakdown.category.tariff();
    let mut s = String::new();
    let _ = writeln!(s, "{:<18}{}", "Type:", breakdown.category.label());
    let _ = writeln!(s, "{:<18}{}", "Units:", breakdown.units);
    let _ = writeln!(s, "{:<18}Rs.{:.2}", "Energy charge:", breakdown.subtotal);
    if tariff.surcharge_rate > 0.0 {
        let _ = writeln!(
            s,
            "{:<18}Rs.{:.2}",
            format!("{}:", tariff.surcharge_label),
            breakdown.surcharge
        );
    }
    if tariff.fixed_charge > 0.0 {
        let _ = writeln!(
            s,
            "{:<18}Rs.{:.2}",
            format!("{}:", tariff.fixed_label),
            breakdown.fixed_charge
        );
    }
    let _ = writeln!(s, "{:<18}Rs.{:.2}", "Total Bill:", breakdown.total);
    s
}

pub fn bill_details_text(record: &ConsumerRecord) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "---- Bill Details ----");
    let _ = writeln!(s, "Consumer: {} [{}]", record.name(), record.id());
    s.push_str(&breakdown_text(&record.breakdown()));
    s
}

pub fn bill_table_text(rows: &[BillRow]) -> String {
    if rows.is_empty() {
        return format!("{NO_BILLS}\n");
    }
    let mut s = String::new();
    let _ = writeln!(
        s,
        "{:<10} {:<15} {:<10} {:<12} {:<10}",
        "ID", "Name", "Units", "Type", "Bill (Rs.)"
    );
    let _ = writeln!(s, "{TABLE_RULE}");
    for row in rows {
        let _ = writeln!(
            s,
            "{:<10} {:<15} {:<10} {:<12} Rs.{:.2}",
            row.id, row.name, row.units, row.category, row.amount
        );
    }
    s
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
