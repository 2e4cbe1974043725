use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{check_quantity, InvalidInput};
use crate::store::EmissionLedger;

/// Grid emission factor, kg CO2 per kWh.
pub const GRID_KG_PER_KWH: f64 = 0.82;

/// Offset price in rupees per tonne of CO2.
pub const OFFSET_RUPEES_PER_TONNE: f64 = 850.0;

/// Ledger key: at most one record per category.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum EmissionCategory {
    Transport,
    Electricity,
    Diet,
}

impl EmissionCategory {
    pub fn label(self) -> &'static str {
        match self {
            EmissionCategory::Transport => "Transport",
            EmissionCategory::Electricity => "Electricity",
            EmissionCategory::Diet => "Diet",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    PetrolCar,
    DieselCar,
    Motorbike,
    Bus,
    Train,
    Flight,
}

/// Menu code, label and kg CO2 per km, indexed by `VehicleKind as usize`.
const VEHICLE_TABLE: [(i64, &str, f64); 6] = [
    (1, "Petrol Car", 0.192),
    (2, "Diesel Car", 0.171),
    (3, "Motorbike", 0.072),
    (4, "Bus", 0.027),
    (5, "Train", 0.041),
    (6, "Flight", 0.255),
];

impl VehicleKind {
    pub const ALL: [VehicleKind; 6] = [
        VehicleKind::PetrolCar,
        VehicleKind::DieselCar,
        VehicleKind::Motorbike,
        VehicleKind::Bus,
        VehicleKind::Train,
        VehicleKind::Flight,
    ];

    pub fn from_code(code: i64) -> Result<Self, InvalidInput> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or(InvalidInput::UnknownCode {
                kind: "vehicle type",
                code,
            })
    }

    pub fn code(self) -> i64 {
        VEHICLE_TABLE[self as usize].0
    }

    pub fn label(self) -> &'static str {
        VEHICLE_TABLE[self as usize].1
    }

    pub fn kg_per_km(self) -> f64 {
        VEHICLE_TABLE[self as usize].2
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DietKind {
    MeatHeavy,
    Average,
    Vegetarian,
    Vegan,
}

/// Menu code, label and flat annual kg CO2, indexed by `DietKind as usize`.
const DIET_TABLE: [(i64, &str, f64); 4] = [
    (1, "Meat heavy", 3200.0),
    (2, "Average", 2500.0),
    (3, "Vegetarian", 1700.0),
    (4, "Vegan", 1500.0),
];

impl DietKind {
    pub const ALL: [DietKind; 4] = [
        DietKind::MeatHeavy,
        DietKind::Average,
        DietKind::Vegetarian,
        DietKind::Vegan,
    ];

    pub fn from_code(code: i64) -> Result<Self, InvalidInput> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or(InvalidInput::UnknownCode {
                kind: "diet type",
                code,
            })
    }

    pub fn code(self) -> i64 {
        DIET_TABLE[self as usize].0
    }

    pub fn label(self) -> &'static str {
        DIET_TABLE[self as usize].1
    }

    pub fn annual_kg(self) -> f64 {
        DIET_TABLE[self as usize].2
    }
}

/// One emission source, annual basis.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum EmissionRecord {
    Transport { vehicle: VehicleKind, annual_km: f64 },
    Electricity { annual_kwh: f64 },
    Diet { diet: DietKind },
}

impl EmissionRecord {
    /// Builds a transport record from a vehicle menu code.
    pub fn transport(vehicle_code: i64, annual_km: f64) -> Result<Self, InvalidInput> {
        let vehicle = VehicleKind::from_code(vehicle_code)?;
        let annual_km = check_quantity("annual km", annual_km)?;
        Ok(EmissionRecord::Transport { vehicle, annual_km })
    }

    pub fn electricity(annual_kwh: f64) -> Result<Self, InvalidInput> {
        let annual_kwh = check_quantity("annual kWh", annual_kwh)?;
        Ok(EmissionRecord::Electricity { annual_kwh })
    }

    /// Builds a diet record from a diet menu code.
    pub fn diet(diet_code: i64) -> Result<Self, InvalidInput> {
        Ok(EmissionRecord::Diet {
            diet: DietKind::from_code(diet_code)?,
        })
    }

    pub fn category(&self) -> EmissionCategory {
        match self {
            EmissionRecord::Transport { .. } => EmissionCategory::Transport,
            EmissionRecord::Electricity { .. } => EmissionCategory::Electricity,
            EmissionRecord::Diet { .. } => EmissionCategory::Diet,
        }
    }

    /// Re-checks the quantity fields; the variants are public so a record
    /// can be assembled without going through the constructors.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        match *self {
            EmissionRecord::Transport { annual_km, .. } => {
                check_quantity("annual km", annual_km)?;
            }
            EmissionRecord::Electricity { annual_kwh } => {
                check_quantity("annual kWh", annual_kwh)?;
            }
            EmissionRecord::Diet { .. } => {}
        }
        Ok(())
    }

    /// Formula per tag. Only called on validated records.
    pub(crate) fn kg_co2(&self) -> f64 {
        match *self {
            EmissionRecord::Transport { vehicle, annual_km } => annual_km * vehicle.kg_per_km(),
            EmissionRecord::Electricity { annual_kwh } => annual_kwh * GRID_KG_PER_KWH,
            EmissionRecord::Diet { diet } => diet.annual_kg(),
        }
    }
}

/// Annual kg CO2 for one record.
pub fn compute_emission(record: &EmissionRecord) -> Result<f64, InvalidInput> {
    record.validate()?;
    let kg = record.kg_co2();
    debug!(category = record.category().label(), kg, "computed emission");
    Ok(kg)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootprintLine {
    pub category: EmissionCategory,
    pub kg_co2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootprintSummary {
    pub lines: Vec<FootprintLine>,
    pub total_kg: f64,
    pub tons: f64,
    pub offset_cost_rupees: i64,
}

/// Sums the ledger. `None` means no source has been entered yet, which is
/// reported as "no data" rather than a zero footprint.
pub fn aggregate(ledger: &EmissionLedger) -> Option<FootprintSummary> {
    if ledger.is_empty() {
        return None;
    }
    let lines: Vec<FootprintLine> = ledger
        .iter()
        .map(|record| FootprintLine {
            category: record.category(),
            kg_co2: record.kg_co2(),
        })
        .collect();
    let total_kg: f64 = lines.iter().map(|l| l.kg_co2).sum();
    let tons = total_kg / 1000.0;
    let offset_cost_rupees = offset_cost_rupees(tons);
    debug!(total_kg, tons, offset_cost_rupees, "aggregated footprint");
    Some(FootprintSummary {
        lines,
        total_kg,
        tons,
        offset_cost_rupees,
    })
}

/// Nearest whole rupee; halves round up.
pub fn offset_cost_rupees(tons: f64) -> i64 {
    (tons * OFFSET_RUPEES_PER_TONNE + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn transport_is_linear_in_km() {
        for kind in VehicleKind::ALL {
            let zero = EmissionRecord::transport(kind.code(), 0.0).unwrap();
            assert_eq!(compute_emission(&zero).unwrap(), 0.0);

            let one = compute_emission(&EmissionRecord::transport(kind.code(), 1.0).unwrap())
                .unwrap();
            let many =
                compute_emission(&EmissionRecord::transport(kind.code(), 12_000.0).unwrap())
                    .unwrap();
            assert!(close(one, kind.kg_per_km()));
            assert!(close(many, 12_000.0 * kind.kg_per_km()));
        }
    }

    #[test]
    fn vehicle_factors_match_table() {
        let expected = [0.192, 0.171, 0.072, 0.027, 0.041, 0.255];
        for (code, factor) in (1..=6).zip(expected) {
            assert_eq!(VehicleKind::from_code(code).unwrap().kg_per_km(), factor);
        }
        assert_eq!(VehicleKind::from_code(6).unwrap(), VehicleKind::Flight);
        assert_eq!(VehicleKind::Flight.label(), "Flight");
    }

    #[test]
    fn electricity_uses_grid_factor() {
        let r = EmissionRecord::electricity(1000.0).unwrap();
        assert!(close(compute_emission(&r).unwrap(), 820.0));
    }

    #[test]
    fn diet_is_flat_lookup() {
        let vegan = EmissionRecord::diet(4).unwrap();
        assert_eq!(compute_emission(&vegan).unwrap(), 1500.0);
        let totals: Vec<f64> = DietKind::ALL.iter().map(|d| d.annual_kg()).collect();
        assert_eq!(totals, vec![3200.0, 2500.0, 1700.0, 1500.0]);
    }

    #[test]
    fn negative_quantities_are_rejected() {
        assert!(matches!(
            EmissionRecord::transport(1, -5.0),
            Err(InvalidInput::Negative { .. })
        ));
        assert!(matches!(
            EmissionRecord::electricity(-0.5),
            Err(InvalidInput::Negative { .. })
        ));

        let forged = EmissionRecord::Electricity { annual_kwh: -10.0 };
        assert!(matches!(
            compute_emission(&forged),
            Err(InvalidInput::Negative { .. })
        ));
        let forged = EmissionRecord::Transport {
            vehicle: VehicleKind::Bus,
            annual_km: f64::NAN,
        };
        assert!(matches!(
            compute_emission(&forged),
            Err(InvalidInput::NotFinite { .. })
        ));
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(
            EmissionRecord::transport(0, 10.0),
            Err(InvalidInput::UnknownCode {
                kind: "vehicle type",
                code: 0
            })
        );
        assert_eq!(
            EmissionRecord::transport(7, 10.0),
            Err(InvalidInput::UnknownCode {
                kind: "vehicle type",
                code: 7
            })
        );
        assert_eq!(
            EmissionRecord::diet(9),
            Err(InvalidInput::UnknownCode {
                kind: "diet type",
                code: 9
            })
        );
    }

    #[test]
    fn empty_ledger_has_no_summary() {
        assert_eq!(aggregate(&EmissionLedger::new()), None);
    }

    #[test]
    fn summary_totals_and_offset() {
        let mut ledger = EmissionLedger::new();
        ledger
            .upsert(EmissionRecord::transport(1, 10_000.0).unwrap())
            .unwrap();
        ledger.upsert(EmissionRecord::electricity(1200.0).unwrap()).unwrap();
        ledger.upsert(EmissionRecord::diet(2).unwrap()).unwrap();

        let summary = aggregate(&ledger).unwrap();
        // 1920 + 984 + 2500
        assert!(close(summary.total_kg, 5404.0));
        assert!(close(summary.tons, 5.404));
        // 5.404 t * 850 = 4593.4
        assert_eq!(summary.offset_cost_rupees, 4593);
        let categories: Vec<_> = summary.lines.iter().map(|l| l.category).collect();
        assert_eq!(
            categories,
            vec![
                EmissionCategory::Transport,
                EmissionCategory::Electricity,
                EmissionCategory::Diet
            ]
        );
    }

    #[test]
    fn offset_cost_rounds_half_up() {
        assert_eq!(offset_cost_rupees(0.0), 0);
        // 1.5 t -> 1275
        assert_eq!(offset_cost_rupees(1.5), 1275);
        // 0.001 t -> 0.85 -> 1
        assert_eq!(offset_cost_rupees(0.001), 1);
        // 0.0005 t -> 0.425 -> 0
        assert_eq!(offset_cost_rupees(0.0005), 0);
    }
}
