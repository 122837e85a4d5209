mod cli;
mod config;
mod error;
mod fuzzy;
mod models;
mod session;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use dialoguer::{Input, Select};
use error::Result;
use fuzzy::{InferenceEngine, InferenceResult};
use models::{extreme_scenarios, sample_scenarios, Scenario, SimulationRecord};
use session::SessionLogger;
use tracing_subscriber::EnvFilter;

fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config)?;

    let engine = InferenceEngine::greenhouse(config.engine.output_resolution)?;

    let log_dir = match cli.log_dir {
        Some(dir) => dir,
        None => config.log_dir()?,
    };

    match cli.command {
        Some(Commands::Eval {
            soil_moisture,
            temperature,
            radiation,
            diagnostics,
        }) => {
            let result = engine.evaluate(soil_moisture, temperature, radiation);
            print_result(&result);
            if diagnostics {
                print_diagnostics(&result);
            }

            let mut logger = SessionLogger::start(&log_dir, &config.session.prefix)?;
            logger.log(SimulationRecord::new(
                "cli eval",
                soil_moisture,
                temperature,
                radiation,
                result.duration,
            ))?;
            logger.save_summary()?;
        }
        Some(Commands::Cases) => {
            let mut logger = SessionLogger::start(&log_dir, &config.session.prefix)?;
            run_batch(&engine, &mut logger, &sample_scenarios())?;
            logger.save_summary()?;
        }
        Some(Commands::Extremes) => {
            let mut logger = SessionLogger::start(&log_dir, &config.session.prefix)?;
            run_batch(&engine, &mut logger, &extreme_scenarios())?;
            logger.save_summary()?;
        }
        Some(Commands::Info) => {
            print_system_info(&engine);
        }
        Some(Commands::Chart { inputs }) => {
            let simulation = inputs.and_then(|v| match v[..] {
                [soil, temp, rad] => Some((engine.evaluate(soil, temp, rad), (soil, temp, rad))),
                _ => None,
            });
            ui::run_chart(&engine, simulation)?;
        }
        None => {
            let mut logger = SessionLogger::start(&log_dir, &config.session.prefix)?;
            interactive_menu(&engine, &mut logger)?;
            let summary = logger.save_summary()?;
            println!(
                "Session saved: {} simulations, summary at {}",
                summary.num_simulations,
                logger.json_path().display()
            );
        }
    }

    Ok(())
}

fn interactive_menu(engine: &InferenceEngine, logger: &mut SessionLogger) -> Result<()> {
    println!("Greenhouse Irrigation Fuzzy Controller");
    println!("Inputs: soil moisture 0-100%, temperature 0-40°C, radiation 0-1000 W/m²");
    println!("Output: irrigation duration 0-30 min\n");

    let options = [
        "Run predefined test cases",
        "Run extreme cases",
        "Enter custom readings",
        "View membership functions",
        "Simulate and chart",
        "System info",
        "Session summary",
        "Exit",
    ];

    loop {
        let choice = Select::new()
            .with_prompt("Select an option")
            .items(&options)
            .default(0)
            .interact()
            .map_err(|e| error::IrrigoError::Config(format!("Input error: {}", e)))?;

        match choice {
            0 => {
                run_batch(engine, logger, &sample_scenarios())?;
            }
            1 => {
                run_batch(engine, logger, &extreme_scenarios())?;
            }
            2 => {
                let scenario = prompt_scenario()?;
                let result =
                    engine.evaluate(scenario.soil_moisture, scenario.temperature, scenario.radiation);
                print_result(&result);
                print_diagnostics(&result);
                logger.log(SimulationRecord::new(
                    scenario.name.clone(),
                    scenario.soil_moisture,
                    scenario.temperature,
                    scenario.radiation,
                    result.duration,
                ))?;
            }
            3 => {
                ui::run_chart(engine, None)?;
            }
            4 => {
                let scenario = prompt_scenario()?;
                let result =
                    engine.evaluate(scenario.soil_moisture, scenario.temperature, scenario.radiation);
                logger.log(SimulationRecord::new(
                    scenario.name.clone(),
                    scenario.soil_moisture,
                    scenario.temperature,
                    scenario.radiation,
                    result.duration,
                ))?;
                let inputs = (
                    scenario.soil_moisture,
                    scenario.temperature,
                    scenario.radiation,
                );
                ui::run_chart(engine, Some((result, inputs)))?;
            }
            5 => {
                print_system_info(engine);
            }
            6 => {
                print_session_summary(logger);
            }
            _ => break,
        }
    }

    Ok(())
}

fn prompt_scenario() -> Result<Scenario> {
    let input_err = |e| error::IrrigoError::Config(format!("Input error: {}", e));

    let soil_moisture: f64 = Input::new()
        .with_prompt("Soil moisture (0-100%)")
        .validate_with(range_validator(0.0, 100.0))
        .interact_text()
        .map_err(input_err)?;

    let temperature: f64 = Input::new()
        .with_prompt("Ambient temperature (0-40°C)")
        .validate_with(range_validator(0.0, 40.0))
        .interact_text()
        .map_err(input_err)?;

    let radiation: f64 = Input::new()
        .with_prompt("Solar radiation (0-1000 W/m²)")
        .validate_with(range_validator(0.0, 1000.0))
        .interact_text()
        .map_err(input_err)?;

    Ok(Scenario::new(
        "Custom input",
        soil_moisture,
        temperature,
        radiation,
    ))
}

fn range_validator(min: f64, max: f64) -> impl FnMut(&f64) -> std::result::Result<(), String> {
    move |value: &f64| {
        if (min..=max).contains(value) {
            Ok(())
        } else {
            Err(format!("value must be between {} and {}", min, max))
        }
    }
}

fn run_batch(
    engine: &InferenceEngine,
    logger: &mut SessionLogger,
    scenarios: &[Scenario],
) -> Result<()> {
    println!("\nRunning {} simulations", scenarios.len());

    for (i, scenario) in scenarios.iter().enumerate() {
        let result =
            engine.evaluate(scenario.soil_moisture, scenario.temperature, scenario.radiation);
        println!("[{}/{}] {}", i + 1, scenarios.len(), scenario);
        if result.fallback {
            println!("      -> no rule fired, midpoint fallback");
        }
        println!("      -> irrigation duration = {:.2} min", result.duration);

        logger.log(SimulationRecord::new(
            scenario.name.clone(),
            scenario.soil_moisture,
            scenario.temperature,
            scenario.radiation,
            result.duration,
        ))?;
    }

    println!("Done: {} simulations logged\n", scenarios.len());
    Ok(())
}

fn print_result(result: &InferenceResult) {
    if result.fallback {
        println!(
            "No rule fired for these readings; falling back to the domain midpoint: {:.2} min",
            result.duration
        );
    } else {
        println!("Irrigation duration: {:.2} min", result.duration);
    }
}

fn print_diagnostics(result: &InferenceResult) {
    println!("\nMembership degrees:");
    for var in &result.input_degrees {
        let degrees: Vec<String> = var
            .degrees
            .iter()
            .map(|(term, d)| format!("{}={:.3}", term, d))
            .collect();
        println!("  {:<14} {}", var.variable, degrees.join("  "));
    }

    println!("\nRule strengths:");
    for rs in &result.rule_strengths {
        println!("  {:<40} {:.3} -> {}", rs.label, rs.strength, rs.consequent);
    }
    println!();
}

fn display_name(variable: &str) -> &str {
    match variable {
        "soil_moisture" => "Soil Moisture (%)",
        "temperature" => "Ambient Temperature (°C)",
        "radiation" => "Solar Radiation (W/m²)",
        "irrigation_duration" => "Irrigation Duration (min)",
        other => other,
    }
}

fn print_system_info(engine: &InferenceEngine) {
    println!("\nMamdani fuzzy inference system");
    println!("Rules: {}", engine.rules().len());

    println!("\nInput variables:");
    for var in engine.inputs() {
        let terms: Vec<&str> = var.terms().iter().map(|(name, _)| *name).collect();
        println!(
            "  {:<28} [{} - {}]  terms: {}",
            display_name(var.name()),
            var.universe().min(),
            var.universe().max(),
            terms.join(", ")
        );
    }

    let output = engine.output();
    let terms: Vec<&str> = output.terms().iter().map(|(name, _)| *name).collect();
    println!("\nOutput variable:");
    println!(
        "  {:<28} [{} - {}]  terms: {}",
        display_name(output.name()),
        output.universe().min(),
        output.universe().max(),
        terms.join(", ")
    );

    println!("\nRule table:");
    for rule in engine.rules() {
        println!("  {} -> {}", rule.label, rule.consequent);
    }
    println!();
}

fn print_session_summary(logger: &SessionLogger) {
    let records = logger.records();
    if records.is_empty() {
        println!("\nNo results recorded yet.\n");
        return;
    }

    println!("\nSession: {}", logger.session_id());
    println!(
        "{:<4} {:<28} {:>6} {:>6} {:>8} {:>10}",
        "#", "Scenario", "H%", "T°C", "R W/m²", "Dur (min)"
    );
    for (i, r) in records.iter().enumerate() {
        println!(
            "{:<4} {:<28} {:>6.1} {:>6.1} {:>8.0} {:>10.2}",
            i + 1,
            r.scenario,
            r.soil_moisture,
            r.temperature,
            r.radiation,
            r.duration_min
        );
    }

    let stats = models::SessionStats::from_records(records);
    println!(
        "Duration min/max/mean: {:.2} / {:.2} / {:.2} min\n",
        stats.duration_min, stats.duration_max, stats.duration_mean
    );
}
