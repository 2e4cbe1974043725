#![forbid(unsafe_code)]

//! Carbon-footprint and electricity-bill rate calculators.
//!
//! Records are validated on construction, amounts are derived on demand, and
//! the stores are plain values owned by the caller.

pub mod billing;
pub mod emission;
pub mod error;
pub mod report;
pub mod store;

pub use billing::{
    bill_breakdown, compute_bill, compute_bill_for_code, BillBreakdown, ConsumerCategory, Tariff,
    Tier,
};
pub use emission::{
    aggregate, compute_emission, DietKind, EmissionCategory, EmissionRecord, FootprintLine,
    FootprintSummary, VehicleKind,
};
pub use error::InvalidInput;
pub use store::{BillRegister, BillRow, ConsumerRecord, EmissionLedger};
