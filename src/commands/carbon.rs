use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use footprint_tariff::report::{self, NO_FOOTPRINT_DATA};
use footprint_tariff::{aggregate, DietKind, EmissionLedger, EmissionRecord, VehicleKind};

use super::report_invalid;
use crate::prompt::Prompter;
use crate::settings::Settings;

const MENU: [&str; 5] = [
    "Enter / Modify Transport Data",
    "Enter / Modify Electricity Data",
    "Enter / Modify Diet Data",
    "Calculate Carbon Footprint & Offset Cost",
    "Exit",
];

/// `footprint-tariff carbon`: menu loop until Exit; returns the final ledger.
pub fn run_session(
    prompter: &mut impl Prompter,
    out: &mut impl Write,
    settings: &Settings,
) -> Result<EmissionLedger> {
    let mut ledger = EmissionLedger::new();
    loop {
        writeln!(out)?;
        writeln!(out, "{}", "CARBON FOOTPRINT MENU".bold().cyan())?;
        let outcome = match prompter.select("Choose option", &MENU)? {
            0 => enter_transport(prompter, out, &mut ledger),
            1 => enter_electricity(prompter, out, &mut ledger),
            2 => enter_diet(prompter, out, &mut ledger),
            3 => print_footprint(out, &ledger, settings),
            _ => {
                writeln!(out, "Exiting... Goodbye!")?;
                return Ok(ledger);
            }
        };
        report_invalid(out, outcome)?;
    }
}

fn vehicle_menu() -> String {
    let options: Vec<String> = VehicleKind::ALL
        .iter()
        .map(|v| format!("{} {}", v.code(), v.label()))
        .collect();
    format!("Vehicle type? ({})", options.join(", "))
}

fn diet_menu() -> String {
    let options: Vec<String> = DietKind::ALL
        .iter()
        .map(|d| format!("{} {}", d.code(), d.label()))
        .collect();
    format!("Diet type? ({})", options.join(", "))
}

fn enter_transport(
    prompter: &mut impl Prompter,
    out: &mut impl Write,
    ledger: &mut EmissionLedger,
) -> Result<()> {
    writeln!(out, "\n{}", "-- Transport Data --".bold())?;
    let code = prompter.integer(&vehicle_menu())?;
    let km = prompter.number("Annual kilometres")?;
    ledger.upsert(EmissionRecord::transport(code, km)?)?;
    writeln!(out, "{}", "Saved.".green())?;
    Ok(())
}

fn enter_electricity(
    prompter: &mut impl Prompter,
    out: &mut impl Write,
    ledger: &mut EmissionLedger,
) -> Result<()> {
    writeln!(out, "\n{}", "-- Electricity Data --".bold())?;
    let kwh = prompter.number("Annual kWh consumption")?;
    ledger.upsert(EmissionRecord::electricity(kwh)?)?;
    writeln!(out, "{}", "Saved.".green())?;
    Ok(())
}

fn enter_diet(
    prompter: &mut impl Prompter,
    out: &mut impl Write,
    ledger: &mut EmissionLedger,
) -> Result<()> {
    writeln!(out, "\n{}", "-- Diet Data --".bold())?;
    let code = prompter.integer(&diet_menu())?;
    ledger.upsert(EmissionRecord::diet(code)?)?;
    writeln!(out, "{}", "Saved.".green())?;
    Ok(())
}

pub fn print_footprint(
    out: &mut impl Write,
    ledger: &EmissionLedger,
    settings: &Settings,
) -> Result<()> {
    match aggregate(ledger) {
        None => writeln!(out, "{}", NO_FOOTPRINT_DATA.yellow())?,
        Some(summary) if settings.json => writeln!(out, "{}", report::to_json(&summary)?)?,
        Some(summary) => {
            writeln!(out)?;
            write!(out, "{}", report::footprint_text(&summary))?;
        }
    }
    Ok(())
}

/// `footprint-tariff estimate`: one-shot footprint from flags.
pub fn run_estimate(
    out: &mut impl Write,
    settings: &Settings,
    transport: Option<(i64, f64)>,
    kwh: Option<f64>,
    diet: Option<i64>,
) -> Result<()> {
    let mut ledger = EmissionLedger::new();
    if let Some((code, km)) = transport {
        ledger.upsert(EmissionRecord::transport(code, km)?)?;
    }
    if let Some(kwh) = kwh {
        ledger.upsert(EmissionRecord::electricity(kwh)?)?;
    }
    if let Some(code) = diet {
        ledger.upsert(EmissionRecord::diet(code)?)?;
    }
    print_footprint(out, &ledger, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::scripted::{Answer::*, Scripted};
    use footprint_tariff::EmissionCategory;

    fn plain() -> Settings {
        Settings {
            color: false,
            ..Settings::default()
        }
    }

    #[test]
    fn empty_session_reports_no_data() {
        let mut prompter = Scripted::new(vec![Choice(3), Choice(4)]);
        let mut out = Vec::new();
        let ledger = run_session(&mut prompter, &mut out, &plain()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(ledger.is_empty());
        assert!(text.contains(NO_FOOTPRINT_DATA));
        assert!(text.contains("Exiting... Goodbye!"));
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn reentry_overwrites_and_bad_input_is_reported() {
        let mut prompter = Scripted::new(vec![
            Choice(0),
            Integer(1),
            Number(1000.0),
            Choice(0),
            Integer(5),
            Number(2000.0),
            // unknown vehicle code
            Choice(0),
            Integer(9),
            Number(50.0),
            // negative kWh
            Choice(1),
            Number(-3.0),
            Choice(2),
            Integer(4),
            Choice(3),
            Choice(4),
        ]);
        let mut out = Vec::new();
        let ledger = run_session(&mut prompter, &mut out, &plain()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(
            ledger.get(EmissionCategory::Transport),
            Some(&EmissionRecord::transport(5, 2000.0).unwrap())
        );
        assert!(ledger.get(EmissionCategory::Electricity).is_none());
        assert!(text.contains("unknown vehicle type code 9"));
        assert!(text.contains("annual kWh cannot be negative"));
        // 2000 km by train = 82 kg, vegan 1500 kg
        assert!(text.contains("Total:         1582.00 kg CO2"));
    }

    #[test]
    fn exhausted_prompter_ends_session_with_error() {
        let mut prompter = Scripted::new(vec![Choice(1)]);
        let mut out = Vec::new();
        assert!(run_session(&mut prompter, &mut out, &plain()).is_err());
    }

    #[test]
    fn estimate_prints_json_summary() {
        let settings = Settings {
            json: true,
            ..plain()
        };
        let mut out = Vec::new();
        run_estimate(&mut out, &settings, None, Some(1000.0), Some(1)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["offset_cost_rupees"], 3417);
        assert_eq!(value["lines"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn estimate_rejects_unknown_diet() {
        let mut out = Vec::new();
        let err = run_estimate(&mut out, &plain(), None, None, Some(0)).unwrap_err();
        assert!(err.downcast_ref::<footprint_tariff::InvalidInput>().is_some());
    }
}
