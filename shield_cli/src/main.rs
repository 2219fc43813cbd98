//! # Shieldsim CLI Application
//!
//! Terminal front end for the dose simulator.
//!
//! ```text
//! shield_cli                  interactive dose report
//! shield_cli curve            dose-vs-distance table (CSV on stdout)
//! shield_cli ask <question>   offline assistant
//! shield_cli preset <name>    write a coefficient preset as the override
//! shield_cli reset-override   delete the coefficient override
//! ```
//!
//! Settings come from `settings.json` in the working directory (or the
//! path in `SHIELDSIM_SETTINGS`). Logs go to stderr, filtered by `RUST_LOG`.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use shield_core::calculations::{calculate, dose_curve, HazardDetector, ShieldLayer};
use shield_core::config::SimulatorSettings;
use shield_core::file_io::{
    load_coefficient_table, load_index, load_settings, reset_override, save_override,
};
use shield_core::materials::{CoefficientPreset, CoefficientTable, RadiationType, BASE_COEFFICIENTS};
use shield_core::SimError;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const MAX_LAYERS: usize = 3;
const TOP_ANSWERS: usize = 3;

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn prompt_radiation_type(default: RadiationType) -> RadiationType {
    let prompt = format!("Radiation type (gamma/beta/alpha/neutron) [{}]: ", default);
    match prompt_line(&prompt) {
        Some(s) if !s.is_empty() => RadiationType::from_str_flexible(&s).unwrap_or_else(|e| {
            eprintln!("{}; using {}", e, default);
            default
        }),
        _ => default,
    }
}

fn prompt_layers(table: &CoefficientTable) -> Vec<ShieldLayer> {
    println!("Materials: {}", table.materials().join(", "));

    let mut layers = Vec::new();
    while layers.len() < MAX_LAYERS {
        let i = layers.len() + 1;
        let typed = match prompt_line(&format!("Layer {} material (blank to finish): ", i)) {
            Some(s) if !s.is_empty() => s,
            _ => break,
        };
        let Some(material) = table.canonical_name(&typed) else {
            warn!(material = %typed, "unknown material; it would not attenuate anything");
            eprintln!("Unknown material '{}'. Choose one of the listed materials.", typed);
            continue;
        };
        let thickness = prompt_f64(&format!("Layer {} thickness (cm) [1.0]: ", i), 1.0);
        layers.push(ShieldLayer::new(material, thickness));
    }
    layers
}

fn settings_path() -> PathBuf {
    std::env::var_os("SHIELDSIM_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let settings = match load_settings(&settings_path()) {
        Ok(settings) => settings,
        Err(e) => return report_error(&e),
    };
    debug!(?settings, "settings loaded");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = match args.first().map(String::as_str) {
        None | Some("simulate") => run_simulation(&settings),
        Some("curve") => run_curve(&settings),
        Some("ask") => run_ask(&settings, &args[1..].join(" ")),
        Some("preset") => run_preset(&settings, args.get(1).map(String::as_str)),
        Some("reset-override") => reset_override(&settings.paths.override_path).map(|()| {
            println!("Coefficient override removed.");
        }),
        Some(other) => Err(SimError::invalid_input(
            "command",
            other,
            "Expected simulate, curve, ask, preset or reset-override",
        )),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(&e),
    }
}

fn report_error(e: &SimError) -> ExitCode {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
    ExitCode::FAILURE
}

fn run_simulation(settings: &SimulatorSettings) -> Result<(), SimError> {
    println!("Shieldsim - Educational Dose Simulator");
    println!("======================================");
    println!();

    let mut input = settings.simulation_input(Vec::new());
    input.label = "CLI".to_string();
    input.k = prompt_f64(&format!("Source strength k [{}]: ", settings.k), settings.k);
    input.r_m = prompt_f64(&format!("Distance r (m) [{}]: ", settings.r_m), settings.r_m);
    input.d_safe = prompt_f64(
        &format!("Safety threshold D_safe [{}]: ", settings.d_safe),
        settings.d_safe,
    );
    input.radiation_type = prompt_radiation_type(settings.radiation_type);

    let table = load_coefficient_table(&settings.paths.override_path);
    input.layers = prompt_layers(&table);
    let result = calculate(&input, &table, &HazardDetector::default())?;

    println!();
    println!("═══════════════════════════════════════");
    println!("  DOSE REPORT");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  k:         {}", input.k);
    println!("  r:         {} m", input.r_m);
    println!("  D_safe:    {}", input.d_safe);
    println!("  Radiation: {}", input.radiation_type.display_name());
    println!();
    println!("Shielding:");
    if result.attenuation.terms.is_empty() {
        println!("  (none)");
    }
    for term in &result.attenuation.terms {
        println!(
            "  {:<14} μ={:.3} x={:.2} cm  μx={:.3}",
            term.material, term.mu, term.thickness_cm, term.contribution
        );
    }
    println!(
        "  τ = {:.3}, transmission = {:.4}",
        result.attenuation.optical_depth, result.attenuation.transmission
    );
    println!();
    println!("Dose:");
    println!(
        "  D = {:.4} ({}) {}",
        result.dose,
        result.zone.display_name(),
        status_icon(result.passes())
    );
    println!();
    println!("Thickness to reach D_safe (single material):");
    let rows = result.recommendation.rows();
    if rows.is_empty() {
        println!("  undefined for k <= 0");
    }
    for row in rows {
        println!("  {:<14} {} cm", row.material, row.outcome.format_cm());
    }
    println!();
    println!("Cost:");
    println!("  Total:     {:.2}", result.cost.total_cost);
    println!("  ΔD:        {:.4}", result.cost.dose_reduction);
    match result.cost.benefit_per_cost {
        Some(ratio) => println!("  ΔD / cost: {:.6}", ratio),
        None => println!("  ΔD / cost: —"),
    }

    if !result.hazards.is_empty() {
        println!();
        println!("Hazards:");
        for message in &result.hazards {
            println!("  [WARN] {}", message);
        }
    }

    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  RESULT: {}",
        if result.passes() { "SAFE" } else { "NOT SAFE" }
    );
    println!("═══════════════════════════════════════");

    println!();
    println!("JSON Output (for LLM/API use):");
    let json =
        serde_json::to_string_pretty(&result).map_err(|e| SimError::serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn run_curve(settings: &SimulatorSettings) -> Result<(), SimError> {
    let table = load_coefficient_table(&settings.paths.override_path);
    let curve = dose_curve(
        &table,
        settings.k,
        &[],
        settings.curve.r_min_m,
        settings.curve.r_max_m,
        settings.curve.samples,
        settings.radiation_type,
    );

    println!("r_m,dose");
    for (r, d) in curve.points() {
        println!("{},{}", r, d);
    }
    Ok(())
}

fn run_ask(settings: &SimulatorSettings, question: &str) -> Result<(), SimError> {
    let question = if question.trim().is_empty() {
        prompt_line("Question: ").unwrap_or_default()
    } else {
        question.to_string()
    };

    let index = load_index(&settings.paths.corpus_path);
    let matches = index.query(&question, TOP_ANSWERS);
    if matches.is_empty() {
        println!("No answers available.");
        return Ok(());
    }

    for (rank, m) in matches.iter().enumerate() {
        println!("{}. {} (similarity {:.2})", rank + 1, m.question, m.similarity);
        println!("   {}", m.answer);
    }
    Ok(())
}

fn run_preset(settings: &SimulatorSettings, name: Option<&str>) -> Result<(), SimError> {
    let Some(name) = name else {
        let names: Vec<String> = CoefficientPreset::ALL
            .iter()
            .map(|p| format!("{:?}", p).to_lowercase())
            .collect();
        return Err(SimError::invalid_input(
            "preset",
            "",
            format!("Expected one of: {}", names.join(", ")),
        ));
    };

    let preset = CoefficientPreset::from_str_flexible(name)?;
    let overrides = preset.apply(&BASE_COEFFICIENTS);
    save_override(&overrides, &settings.paths.override_path)?;

    let table = CoefficientTable::with_overrides(&overrides);
    println!("Preset '{}' saved to {}", name, settings.paths.override_path.display());
    for rt in RadiationType::ALL {
        let values: Vec<String> = table
            .materials()
            .iter()
            .map(|m| format!("{}={}", m, table.resolve(m, rt)))
            .collect();
        println!("  {:<8} {}", rt.code(), values.join("  "));
    }
    Ok(())
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
