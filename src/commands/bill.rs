use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use footprint_tariff::report::{self, NO_BILLS};
use footprint_tariff::{bill_breakdown, BillRegister, ConsumerCategory};

use super::report_invalid;
use crate::prompt::Prompter;
use crate::settings::Settings;

const MENU: [&str; 3] = ["Generate New Bill", "Display All Bills", "Exit"];

/// `footprint-tariff bill`: menu loop until Exit; returns every bill generated.
pub fn run_session(
    prompter: &mut impl Prompter,
    out: &mut impl Write,
    settings: &Settings,
) -> Result<BillRegister> {
    let mut register = BillRegister::new();
    loop {
        writeln!(out)?;
        writeln!(out, "{}", "ELECTRICITY BILL MENU".bold().cyan())?;
        let outcome = match prompter.select("Enter option", &MENU)? {
            0 => generate_bill(prompter, out, &mut register, settings),
            1 => display_bills(out, &register, settings),
            _ => {
                writeln!(out, "Exiting...")?;
                return Ok(register);
            }
        };
        report_invalid(out, outcome)?;
    }
}

fn type_prompt() -> String {
    let options: Vec<String> = ConsumerCategory::ALL
        .iter()
        .map(|c| format!("{}-{}", c.code(), c.label()))
        .collect();
    format!("Enter Type ({})", options.join(", "))
}

fn generate_bill(
    prompter: &mut impl Prompter,
    out: &mut impl Write,
    register: &mut BillRegister,
    settings: &Settings,
) -> Result<()> {
    let id = prompter.text("Enter Consumer ID")?;
    let name = prompter.text("Enter Name")?;
    let units = prompter.integer("Enter Units Consumed")?;
    let code = prompter.integer(&type_prompt())?;

    let record = register.generate(id, name, code, units)?;
    writeln!(out)?;
    if settings.json {
        writeln!(out, "{}", report::to_json(&record.breakdown())?)?;
    } else {
        write!(out, "{}", report::bill_details_text(record))?;
    }
    Ok(())
}

fn display_bills(out: &mut impl Write, register: &BillRegister, settings: &Settings) -> Result<()> {
    if register.is_empty() {
        writeln!(out, "{}", NO_BILLS.yellow())?;
        return Ok(());
    }
    let rows = register.rows();
    writeln!(out)?;
    if settings.json {
        writeln!(out, "{}", report::to_json(&rows)?)?;
    } else {
        write!(out, "{}", report::bill_table_text(&rows))?;
    }
    Ok(())
}

/// `footprint-tariff quote`: one bill with its breakdown, nothing stored.
pub fn run_quote(out: &mut impl Write, settings: &Settings, category: &str, units: i64) -> Result<()> {
    let category: ConsumerCategory = category.parse()?;
    let breakdown = bill_breakdown(category, units)?;
    if settings.json {
        writeln!(out, "{}", report::to_json(&breakdown)?)?;
    } else {
        write!(out, "{}", report::breakdown_text(&breakdown))?;
    }
    Ok(())
}
