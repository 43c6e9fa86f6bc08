//! Xăm Hường odds analyzer CLI.
//!
//! Usage:
//!   cargo run --bin analyze -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin analyze                              # Fair dice, full rule table
//!   cargo run --bin analyze -- --preset FOLK_VILLAGE     # Heritage variant
//!   cargo run --bin analyze -- --solve-edge 0.05 --apply # Tune p4 to a 5% edge

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::path::PathBuf;
use std::process;
use xamhuong::engine::CalibrationTarget;
use xamhuong::report::{calibration_text, conditional_text, StatsReport};
use xamhuong::rules::display_name;
use xamhuong::{Analyzer, EngineSettings, Result};

#[derive(Debug, Default)]
struct CliOptions {
    config_path: Option<PathBuf>,
    preset: Option<String>,
    die_count: Option<u32>,
    weights: Option<Vec<f64>>,
    prefix: Option<Vec<u8>>,
    solve_rule: Option<String>,
    target_rate: f64,
    solve_edge: Option<f64>,
    apply: bool,
    bankroll: f64,
    bet: f64,
    target_profit: Option<f64>,
    rolls: u32,
    seed: Option<u64>,
    json: bool,
    csv: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);

    if let Err(e) = run(&options) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(options: &CliOptions) -> Result<()> {
    let settings = match &options.config_path {
        Some(path) => EngineSettings::load(path)?,
        None => EngineSettings::default(),
    };
    let mut analyzer = Analyzer::new(settings.into_config()?);

    if let Some(preset) = &options.preset {
        analyzer.apply_preset(preset)?;
    }
    if let Some(n) = options.die_count {
        analyzer.set_die_count(n)?;
    }
    if let Some(weights) = &options.weights {
        analyzer.set_face_weights(weights)?;
    }

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              XĂM HƯỜNG ODDS ANALYZER                          ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();

    let calibration_target = match (&options.solve_rule, options.solve_edge) {
        (Some(rule_id), _) => Some(CalibrationTarget::EventProbability {
            rule_id: rule_id.clone(),
            target: options.target_rate,
        }),
        (None, Some(edge)) => Some(CalibrationTarget::HouseEdge { target: edge }),
        (None, None) => None,
    };
    if let Some(target) = calibration_target {
        println!("Running optimization...");
        let calibration = analyzer.calibrate(&target)?;
        print!("{}", calibration_text(&calibration));
        if options.apply {
            analyzer.apply_distinguished_weight(calibration.parameter)?;
            println!("Applied p4 = {:.6}", calibration.parameter);
        }
        println!();
    }

    let stats = analyzer.compute_exact_statistics()?;
    let target_profit = options.target_profit.unwrap_or(options.bankroll * 0.5);
    let ruin = analyzer.estimate_risk_of_ruin(options.bankroll, options.bet, target_profit)?;
    let config = analyzer.config();
    let report = StatsReport::new(&stats, config.rules(), config.weights()).with_risk_of_ruin(ruin);

    println!("{}", report.to_text());

    if let Some(prefix) = &options.prefix {
        let conditional = analyzer.compute_conditional(prefix)?;
        println!("{}", conditional_text(&conditional, 0.005));
    }

    if options.rolls > 0 {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        println!("── LIVE ROUNDS ──");
        for i in 0..options.rolls {
            let outcome = analyzer.play_round(&mut rng)?;
            println!(
                "  Round {:3}: {}  →  {} ({})",
                i + 1,
                outcome.counts,
                display_name(outcome.best),
                outcome.payout
            );
        }
        println!();
    }

    let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    if options.json {
        let filename = format!("xamhuong_report_N{}_{}.json", stats.die_count, stamp);
        std::fs::write(&filename, report.to_json())?;
        println!("JSON report saved to: {}", filename);
    }
    if options.csv {
        let filename = format!("xamhuong_data_N{}_{}.csv", stats.die_count, stamp);
        std::fs::write(&filename, report.to_csv())?;
        println!("CSV data saved to: {}", filename);
    }

    Ok(())
}

fn parse_list<T: std::str::FromStr>(raw: &str) -> Option<Vec<T>> {
    raw.split(',').map(|part| part.trim().parse().ok()).collect()
}

fn parse_args(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        target_rate: 0.5,
        bankroll: 1000.0,
        bet: 10.0,
        ..Default::default()
    };

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "-c" | "--config" => {
                if let Some(v) = value {
                    options.config_path = Some(PathBuf::from(v));
                    i += 1;
                }
            }
            "-p" | "--preset" => {
                if let Some(v) = value {
                    options.preset = Some(v.clone());
                    i += 1;
                }
            }
            "-n" | "--dice" => {
                if let Some(v) = value {
                    options.die_count = v.parse().ok();
                    i += 1;
                }
            }
            "-w" | "--weights" => {
                if let Some(v) = value {
                    options.weights = parse_list(v);
                    i += 1;
                }
            }
            "--prefix" => {
                if let Some(v) = value {
                    options.prefix = parse_list(v);
                    i += 1;
                }
            }
            "--solve-rule" => {
                if let Some(v) = value {
                    options.solve_rule = Some(v.to_uppercase());
                    i += 1;
                }
            }
            "--target" => {
                if let Some(v) = value {
                    options.target_rate = v.parse().unwrap_or(0.5);
                    i += 1;
                }
            }
            "--solve-edge" => {
                if let Some(v) = value {
                    options.solve_edge = v.parse().ok();
                    i += 1;
                }
            }
            "--apply" => {
                options.apply = true;
            }
            "--bankroll" => {
                if let Some(v) = value {
                    options.bankroll = v.parse().unwrap_or(1000.0);
                    i += 1;
                }
            }
            "--bet" => {
                if let Some(v) = value {
                    options.bet = v.parse().unwrap_or(10.0);
                    i += 1;
                }
            }
            "--profit" => {
                if let Some(v) = value {
                    options.target_profit = v.parse().ok();
                    i += 1;
                }
            }
            "-r" | "--roll" => {
                options.rolls = 1;
                if let Some(count) = value.and_then(|v| v.parse::<u32>().ok()) {
                    options.rolls = count;
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if let Some(v) = value {
                    options.seed = v.parse().ok();
                    i += 1;
                }
            }
            "--json" => {
                options.json = true;
            }
            "--csv" => {
                options.csv = true;
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            other => {
                eprintln!("Ignoring unknown option: {}", other);
            }
        }
        i += 1;
    }

    options
}

fn print_help() {
    println!("Xăm Hường Odds Analyzer");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin analyze -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>     JSON settings file");
    println!("    -p, --preset <ID>       HUE_COURT, FOLK_VILLAGE or COMPETITIVE");
    println!("    -n, --dice <N>          Dice per round (default: 6)");
    println!("    -w, --weights <W,..>    Six face weights, normalized automatically");
    println!("    --prefix <F,..>         Odds given these faces already showing");
    println!("    --solve-rule <ID>       Find p4 giving --target probability for a pattern");
    println!("    --target <P>            Target probability (default: 0.5)");
    println!("    --solve-edge <E>        Find p4 giving house edge E");
    println!("    --apply                 Use the solved p4 for the report");
    println!("    --bankroll <B>          Bankroll for risk of ruin (default: 1000)");
    println!("    --bet <B>               Bet per round (default: 10)");
    println!("    --profit <P>            Target profit (default: half the bankroll)");
    println!("    -r, --roll [K]          Play K live rounds (default: 1)");
    println!("    -s, --seed <S>          Random seed for live rounds");
    println!("    --json                  Save JSON report");
    println!("    --csv                   Save per-pattern CSV");
    println!("    -h, --help              Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin analyze -- --prefix 4,4");
    println!("    cargo run --bin analyze -- --solve-rule LUC_HUONG --target 0.01");
    println!("    cargo run --bin analyze -- -w 1,1,1,2,1,1 --roll 5 --seed 42");
}
