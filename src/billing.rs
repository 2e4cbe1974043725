use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InvalidInput;

/// Consumer tariff class.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ConsumerCategory {
    Domestic,
    Commercial,
    Industrial,
}

/// One rate band. `upper` is the last unit billed at `rate`; `None` is open-ended.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tier {
    pub upper: Option<u64>,
    pub rate: f64,
}

/// Tier table, then a percentage surcharge on the tiered subtotal, then a
/// fixed charge added last outside the surcharge base.
#[derive(Debug, Clone, PartialEq)]
pub struct Tariff {
    pub tiers: &'static [Tier],
    pub surcharge_rate: f64,
    pub surcharge_label: &'static str,
    pub fixed_charge: f64,
    pub fixed_label: &'static str,
}

pub const DOMESTIC_TARIFF: Tariff = Tariff {
    tiers: &[
        Tier {
            upper: Some(100),
            rate: 1.5,
        },
        Tier {
            upper: Some(300),
            rate: 2.5,
        },
        Tier {
            upper: Some(500),
            rate: 4.0,
        },
        Tier {
            upper: None,
            rate: 6.0,
        },
    ],
    surcharge_rate: 0.0,
    surcharge_label: "Surcharge",
    fixed_charge: 0.0,
    fixed_label: "Fixed charge",
};

pub const COMMERCIAL_TARIFF: Tariff = Tariff {
    tiers: &[Tier {
        upper: None,
        rate: 6.5,
    }],
    surcharge_rate: 0.10,
    surcharge_label: "Tax (10%)",
    fixed_charge: 0.0,
    fixed_label: "Fixed charge",
};

pub const INDUSTRIAL_TARIFF: Tariff = Tariff {
    tiers: &[
        Tier {
            upper: Some(500),
            rate: 5.0,
        },
        Tier {
            upper: Some(1500),
            rate: 6.5,
        },
        Tier {
            upper: None,
            rate: 8.0,
        },
    ],
    surcharge_rate: 0.05,
    surcharge_label: "Fuel charge (5%)",
    fixed_charge: 250.0,
    fixed_label: "Demand charge",
};

impl ConsumerCategory {
    pub const ALL: [ConsumerCategory; 3] = [
        ConsumerCategory::Domestic,
        ConsumerCategory::Commercial,
        ConsumerCategory::Industrial,
    ];

    pub fn from_code(code: i64) -> Result<Self, InvalidInput> {
        match code {
            1 => Ok(ConsumerCategory::Domestic),
            2 => Ok(ConsumerCategory::Commercial),
            3 => Ok(ConsumerCategory::Industrial),
            _ => Err(InvalidInput::UnknownCode {
                kind: "consumer type",
                code,
            }),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            ConsumerCategory::Domestic => 1,
            ConsumerCategory::Commercial => 2,
            ConsumerCategory::Industrial => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConsumerCategory::Domestic => "Domestic",
            ConsumerCategory::Commercial => "Commercial",
            ConsumerCategory::Industrial => "Industrial",
        }
    }

    pub fn tariff(self) -> &'static Tariff {
        match self {
            ConsumerCategory::Domestic => &DOMESTIC_TARIFF,
            ConsumerCategory::Commercial => &COMMERCIAL_TARIFF,
            ConsumerCategory::Industrial => &INDUSTRIAL_TARIFF,
        }
    }
}

impl fmt::Display for ConsumerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts a menu code ("2") or a label in any case ("commercial").
impl FromStr for ConsumerCategory {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return Self::from_code(code);
        }
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidInput::UnknownName {
                kind: "consumer type",
                name: s.to_string(),
            })
    }
}

impl Tariff {
    /// Progressive sum: each tier's rate applies only to the units inside it.
    pub fn tiered_subtotal(&self, units: u64) -> f64 {
        let mut subtotal = 0.0;
        let mut lower = 0u64;
        for tier in self.tiers {
            if units <= lower {
                break;
            }
            let upper = tier.upper.map_or(units, |u| u.min(units));
            subtotal += (upper - lower) as f64 * tier.rate;
            lower = upper;
        }
        subtotal
    }

    pub fn breakdown(&self, category: ConsumerCategory, units: u64) -> BillBreakdown {
        let subtotal = self.tiered_subtotal(units);
        let surcharge = subtotal * self.surcharge_rate;
        let total = subtotal + surcharge + self.fixed_charge;
        BillBreakdown {
            category,
            units,
            subtotal,
            surcharge,
            fixed_charge: self.fixed_charge,
            total,
        }
    }
}

/// Intermediate figures of one bill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillBreakdown {
    pub category: ConsumerCategory,
    pub units: u64,
    pub subtotal: f64,
    pub surcharge: f64,
    pub fixed_charge: f64,
    pub total: f64,
}

pub(crate) fn check_units(units: i64) -> Result<u64, InvalidInput> {
    u64::try_from(units).map_err(|_| InvalidInput::Negative {
        field: "units consumed",
        value: units as f64,
    })
}

pub fn bill_breakdown(category: ConsumerCategory, units: i64) -> Result<BillBreakdown, InvalidInput> {
    let units = check_units(units)?;
    let breakdown = category.tariff().breakdown(category, units);
    debug!(
        category = category.label(),
        units,
        total = breakdown.total,
        "computed bill"
    );
    Ok(breakdown)
}

pub fn compute_bill(category: ConsumerCategory, units: i64) -> Result<f64, InvalidInput> {
    Ok(bill_breakdown(category, units)?.total)
}

/// Same as [`compute_bill`] but takes the raw menu code for the category.
pub fn compute_bill_for_code(category_code: i64, units: i64) -> Result<f64, InvalidInput> {
    compute_bill(ConsumerCategory::from_code(category_code)?, units)
}
