use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::billing::{check_units, BillBreakdown, ConsumerCategory};
use crate::emission::{EmissionCategory, EmissionRecord};
use crate::error::InvalidInput;

/// Latest emission record per category. Re-entering a category replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmissionLedger {
    records: BTreeMap<EmissionCategory, EmissionRecord>,
}

impl EmissionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` under its category and returns the one it replaced.
    /// An invalid record is rejected and the ledger is left as it was.
    pub fn upsert(&mut self, record: EmissionRecord) -> Result<Option<EmissionRecord>, InvalidInput> {
        record.validate()?;
        let category = record.category();
        let previous = self.records.insert(category, record);
        if previous.is_some() {
            warn!(category = category.label(), "replaced existing emission record");
        } else {
            info!(category = category.label(), "stored emission record");
        }
        Ok(previous)
    }

    pub fn get(&self, category: EmissionCategory) -> Option<&EmissionRecord> {
        self.records.get(&category)
    }

    /// Records in category order: transport, electricity, diet.
    pub fn iter(&self) -> impl Iterator<Item = &EmissionRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A validated consumer; the bill is derived from category and units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumerRecord {
    id: String,
    name: String,
    category: ConsumerCategory,
    units: u64,
}

impl ConsumerRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ConsumerCategory,
        units: i64,
    ) -> Result<Self, InvalidInput> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(InvalidInput::EmptyId);
        }
        let units = check_units(units)?;
        Ok(Self {
            id,
            name: name.into().trim().to_string(),
            category,
            units,
        })
    }

    /// Builds a record from raw menu input (category as its menu code).
    pub fn from_code(
        id: impl Into<String>,
        name: impl Into<String>,
        category_code: i64,
        units: i64,
    ) -> Result<Self, InvalidInput> {
        let category = ConsumerCategory::from_code(category_code)?;
        Self::new(id, name, category, units)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> ConsumerCategory {
        self.category
    }

    pub fn units(&self) -> u64 {
        self.units
    }

    pub fn breakdown(&self) -> BillBreakdown {
        self.category.tariff().breakdown(self.category, self.units)
    }

    pub fn bill_amount(&self) -> f64 {
        self.breakdown().total
    }
}

/// One line of the bill listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillRow {
    pub id: String,
    pub name: String,
    pub units: u64,
    pub category: &'static str,
    pub amount: f64,
}

impl From<&ConsumerRecord> for BillRow {
    fn from(record: &ConsumerRecord) -> Self {
        BillRow {
            id: record.id.clone(),
            name: record.name.clone(),
            units: record.units,
            category: record.category.label(),
            amount: record.bill_amount(),
        }
    }
}

/// Append-only list of generated bills, unique by consumer id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillRegister {
    consumers: Vec<ConsumerRecord>,
}

impl BillRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: ConsumerRecord) -> Result<&ConsumerRecord, InvalidInput> {
        if self.find(record.id()).is_some() {
            warn!(id = record.id(), "rejected duplicate consumer id");
            return Err(InvalidInput::DuplicateId(record.id));
        }
        info!(
            id = record.id(),
            category = record.category.label(),
            units = record.units,
            "generated bill"
        );
        self.consumers.push(record);
        Ok(&self.consumers[self.consumers.len() - 1])
    }

    /// Validates raw menu input and appends the resulting record.
    pub fn generate(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        category_code: i64,
        units: i64,
    ) -> Result<&ConsumerRecord, InvalidInput> {
        let record = ConsumerRecord::from_code(id, name, category_code, units)?;
        self.add(record)
    }

    pub fn find(&self, id: &str) -> Option<&ConsumerRecord> {
        self.consumers.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConsumerRecord> {
        self.consumers.iter()
    }

    /// Listing rows in insertion order.
    pub fn rows(&self) -> Vec<BillRow> {
        self.consumers.iter().map(BillRow::from).collect()
    }

    pub fn len(&self) -> usize {
        self.consumers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emission::VehicleKind;

    #[test]
    fn ledger_keeps_latest_per_category() {
        let mut ledger = EmissionLedger::new();
        let first = EmissionRecord::transport(1, 100.0).unwrap();
        let second = EmissionRecord::transport(5, 250.0).unwrap();

        assert_eq!(ledger.upsert(first).unwrap(), None);
        assert_eq!(ledger.upsert(second).unwrap(), Some(first));
        ledger.upsert(EmissionRecord::electricity(10.0).unwrap()).unwrap();
        ledger.upsert(EmissionRecord::diet(1).unwrap()).unwrap();
        ledger.upsert(EmissionRecord::diet(3).unwrap()).unwrap();

        assert_eq!(ledger.len(), 3);
        assert_eq!(
            ledger.get(EmissionCategory::Transport),
            Some(&EmissionRecord::Transport {
                vehicle: VehicleKind::Train,
                annual_km: 250.0
            })
        );
    }

    #[test]
    fn ledger_rejects_invalid_record_unchanged() {
        let mut ledger = EmissionLedger::new();
        ledger.upsert(EmissionRecord::electricity(10.0).unwrap()).unwrap();
        let before = ledger.clone();

        let bad = EmissionRecord::Electricity { annual_kwh: -1.0 };
        assert!(ledger.upsert(bad).is_err());
        assert_eq!(ledger, before);
    }

    #[test]
    fn register_lists_in_insertion_order() {
        let mut register = BillRegister::new();
        register.generate("C1", "Asha", 1, 300).unwrap();
        register.generate("C2", "Ravi Traders", 2, 100).unwrap();
        register.generate("C3", "Steelworks", 3, 500).unwrap();

        let rows = register.rows();
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["C1", "C2", "C3"]);
        assert_eq!(rows[0].amount, 650.0);
        assert_eq!(rows[1].category, "Commercial");
        assert_eq!(rows[1].amount, 715.0);
        assert_eq!(rows[2].amount, 2875.0);
    }

    #[test]
    fn unknown_category_leaves_register_unchanged() {
        let mut register = BillRegister::new();
        register.generate("C1", "Asha", 1, 120).unwrap();
        let before = register.clone();

        assert_eq!(
            register.generate("C2", "Nobody", 9, 10).unwrap_err(),
            InvalidInput::UnknownCode {
                kind: "consumer type",
                code: 9
            }
        );
        assert!(register.generate("C3", "Nobody", 1, -4).is_err());
        assert_eq!(register, before);
    }

    #[test]
    fn duplicate_or_blank_ids_rejected() {
        let mut register = BillRegister::new();
        register.generate("C1", "Asha", 1, 10).unwrap();
        assert_eq!(
            register.generate(" C1 ", "Again", 2, 10).unwrap_err(),
            InvalidInput::DuplicateId("C1".to_string())
        );
        assert_eq!(
            register.generate("   ", "Blank", 2, 10).unwrap_err(),
            InvalidInput::EmptyId
        );
        assert_eq!(register.len(), 1);
    }

    #[test]
    fn bill_amount_is_derived() {
        let record = ConsumerRecord::new("D9", "Meena", ConsumerCategory::Domestic, 600).unwrap();
        assert_eq!(record.bill_amount(), 2050.0);
        assert_eq!(record.breakdown().subtotal, 2050.0);
    }
}
