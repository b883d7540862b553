//! # Mechanics Tutor CLI
//!
//! Command-line front end for the lab engine: list labs, evaluate slider
//! settings, render diagrams to PNG, check answers and build the chat
//! context line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use tutor_core::render::render_placeholder;
use tutor_core::tutoring::{annotate_message, last_number};
use tutor_core::{
    check_numeric_match, evaluate, render_with, ChatTranscript, DerivedQuantities, LabTopic, Quantity, SessionReport,
    SliderInputs, TutorError, TutorSettings,
};

/// Interactive strength-of-materials lab, from the terminal
#[derive(Parser)]
#[command(name = "mechanics-tutor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Evaluate mechanics labs and render their diagrams", long_about = None)]
struct Cli {
    /// Settings file (JSON); defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the labs and their sliders
    Labs {
        #[arg(long)]
        json: bool,
    },
    /// Evaluate a lab for the given slider values
    Evaluate {
        #[command(flatten)]
        lab: LabArgs,
        #[arg(long)]
        json: bool,
    },
    /// Render a lab diagram to a PNG file
    Render {
        #[command(flatten)]
        lab: LabArgs,
        /// Output file
        #[arg(short, long, default_value = "diagram.png")]
        out: PathBuf,
    },
    /// Check a numeric answer against a derived quantity
    Check {
        #[command(flatten)]
        lab: LabArgs,
        /// Quantity to compare, by name (e.g. "MaxMoment") or symbol (e.g. "Mmax")
        #[arg(short, long)]
        target: String,
        /// The student's answer; the last number in it is compared
        #[arg(short, long)]
        answer: String,
        /// Relative tolerance; the settings value when omitted
        #[arg(long)]
        tolerance: Option<f64>,
    },
    /// Print a student message prefixed with the lab context
    Context {
        #[command(flatten)]
        lab: LabArgs,
        #[arg(short, long, default_value = "")]
        message: String,
    },
    /// Build the instructor report from a saved transcript
    Report {
        /// Lab id or key
        topic: String,
        /// Transcript JSON file
        #[arg(long)]
        transcript: PathBuf,
        #[arg(long)]
        student: String,
        #[arg(long, default_value = "")]
        feedback: String,
        #[arg(long)]
        json: bool,
    },
    /// Write the default settings file
    InitConfig {
        #[arg(default_value = "tutor_settings.json")]
        path: PathBuf,
    },
}

#[derive(Args)]
struct LabArgs {
    /// Lab id (SM_1..SM_7) or key (e.g. shear_and_moment)
    topic: String,
    /// Slider value, repeatable (e.g. --set P=30 --set L_pos=250)
    #[arg(short, long = "set", value_parser = parse_slider)]
    sliders: Vec<(String, f64)>,
}

impl LabArgs {
    fn topic(&self) -> Result<LabTopic> {
        Ok(LabTopic::from_id(&self.topic)?)
    }

    fn inputs(&self, topic: LabTopic) -> Result<SliderInputs> {
        let pairs: Vec<(&str, f64)> = self.sliders.iter().map(|(key, value)| (key.as_str(), *value)).collect();
        SliderInputs::from_pairs(topic, &pairs).with_context(|| {
            let keys: Vec<&str> = topic.sliders().iter().map(|spec| spec.key).collect();
            format!("{} sliders are {}", topic.id(), keys.join(", "))
        })
    }

    fn evaluate(&self) -> Result<(LabTopic, SliderInputs, DerivedQuantities)> {
        let topic = self.topic()?;
        let inputs = self.inputs(topic)?;
        let derived = evaluate(topic, &inputs).with_context(|| format!("evaluating {}", topic.id()))?;
        Ok((topic, inputs, derived))
    }
}

fn parse_slider(raw: &str) -> std::result::Result<(String, f64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    Ok((key.trim().to_string(), value))
}

fn load_settings(path: Option<&Path>) -> Result<TutorSettings> {
    match path {
        Some(path) => Ok(TutorSettings::load(path)?),
        None => Ok(TutorSettings::default()),
    }
}

/// Match a quantity by variant name, readable name or symbol
fn find_quantity(derived: &DerivedQuantities, wanted: &str) -> Option<(Quantity, f64)> {
    let normalized = |s: &str| s.replace(['_', ' '], "").to_lowercase();
    let wanted_norm = normalized(wanted);
    derived.quantities().into_iter().find(|(quantity, _)| {
        normalized(&format!("{:?}", quantity)) == wanted_norm
            || normalized(quantity.name()) == wanted_norm
            || quantity.symbol() == wanted.trim()
    })
}

fn print_quantities(topic: LabTopic, inputs: &SliderInputs, derived: &DerivedQuantities) {
    println!("═══════════════════════════════════════");
    println!("  {} {}", topic.id(), topic.title());
    println!("═══════════════════════════════════════");
    println!();
    println!("Sliders:");
    for (spec, value) in inputs.pairs() {
        println!("  {:<8} = {:>12.4} {}", spec.key, value, spec.unit);
    }
    println!();
    println!("Derived:");
    for (quantity, value) in derived.quantities() {
        println!(
            "  {:<8} = {:>12.4} {:<6} ({})",
            quantity.symbol(),
            value,
            quantity.unit(),
            quantity.name()
        );
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Command::Labs { json } => {
            if json {
                let labs: Vec<serde_json::Value> = LabTopic::ALL
                    .iter()
                    .map(|topic| {
                        serde_json::json!({
                            "id": topic.id(),
                            "key": topic.key(),
                            "title": topic.title(),
                            "sliders": topic.sliders(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&labs)?);
            } else {
                for topic in LabTopic::ALL {
                    println!("{}  {:<20} {}", topic.id(), topic.key(), topic.title());
                    for spec in topic.sliders() {
                        println!(
                            "      {:<8} {} [{} .. {}] default {} {}",
                            spec.key, spec.label, spec.min, spec.max, spec.default, spec.unit
                        );
                    }
                }
            }
        }

        Command::Evaluate { lab, json } => {
            let (topic, inputs, derived) = lab.evaluate()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&derived)?);
            } else {
                print_quantities(topic, &inputs, &derived);
            }
        }

        Command::Render { lab, out } => {
            let png = match lab.topic() {
                Ok(topic) => {
                    let inputs = lab.inputs(topic)?;
                    let derived = evaluate(topic, &inputs).with_context(|| format!("evaluating {}", topic.id()))?;
                    render_with(&settings.render, topic, &inputs, &derived)
                }
                Err(error) => {
                    log::warn!("{}, writing placeholder", error);
                    render_placeholder(&settings.render, lab.topic.trim())
                }
            };
            fs::write(&out, &png).with_context(|| format!("writing {}", out.display()))?;
            println!("wrote {} ({} bytes)", out.display(), png.len());
        }

        Command::Check {
            lab,
            target,
            answer,
            tolerance,
        } => {
            let (topic, _, derived) = lab.evaluate()?;
            let (quantity, expected) = find_quantity(&derived, &target).ok_or_else(|| {
                let available: Vec<String> = derived
                    .quantities()
                    .into_iter()
                    .map(|(quantity, _)| format!("{:?}", quantity))
                    .collect();
                anyhow!("{} has no quantity '{}' (available: {})", topic.id(), target, available.join(", "))
            })?;
            let tolerance = tolerance.unwrap_or(settings.answer_tolerance);
            let Some(given) = last_number(&answer) else {
                bail!("no number found in answer '{}'", answer);
            };
            let correct = check_numeric_match(&answer, expected, tolerance);
            log::debug!("{:?}: given {} expected {} tolerance {}", quantity, given, expected, tolerance);
            if correct {
                println!("correct: {} = {} {}", quantity.symbol(), given, quantity.unit());
            } else {
                println!(
                    "not quite: {} {} is outside {:.0}% of the expected value",
                    given,
                    quantity.unit(),
                    tolerance * 100.0
                );
                std::process::exit(1);
            }
        }

        Command::Context { lab, message } => {
            let (topic, inputs, derived) = lab.evaluate()?;
            println!("{}", annotate_message(topic, &inputs, &derived, &message));
        }

        Command::Report {
            topic,
            transcript,
            student,
            feedback,
            json,
        } => {
            let topic = LabTopic::from_id(&topic)?;
            let contents =
                fs::read_to_string(&transcript).with_context(|| format!("reading {}", transcript.display()))?;
            let chat: ChatTranscript = serde_json::from_str(&contents)
                .with_context(|| format!("parsing transcript {}", transcript.display()))?;
            let report = SessionReport::compose(&student, topic, &chat, &feedback);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.to_markdown());
            }
        }

        Command::InitConfig { path } => {
            settings.validate()?;
            settings.save(&path)?;
            println!("wrote {}", path.display());
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);

    if let Err(error) = run(cli) {
        eprintln!("Error: {:#}", error);
        if let Some(tutor_error) = error.downcast_ref::<TutorError>() {
            if let Ok(json) = serde_json::to_string_pretty(tutor_error) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slider() {
        assert_eq!(parse_slider("P=30"), Ok(("P".to_string(), 30.0)));
        assert_eq!(parse_slider(" L_pos = 250.5 "), Ok(("L_pos".to_string(), 250.5)));
        assert!(parse_slider("P").is_err());
        assert!(parse_slider("P=lots").is_err());
    }

    #[test]
    fn test_find_quantity_by_name_or_symbol() {
        let topic = LabTopic::ShearAndMoment;
        let derived = evaluate(topic, &SliderInputs::defaults(topic)).unwrap();
        assert_eq!(find_quantity(&derived, "MaxMoment"), Some((Quantity::MaxMoment, 5.5)));
        assert_eq!(find_quantity(&derived, "max_moment"), Some((Quantity::MaxMoment, 5.5)));
        assert_eq!(find_quantity(&derived, "Mmax"), Some((Quantity::MaxMoment, 5.5)));
        assert_eq!(find_quantity(&derived, "left reaction"), Some((Quantity::ReactionLeft, 11.0)));
        assert_eq!(find_quantity(&derived, "Sigma1"), None);
    }

    #[test]
    fn test_cli_parses_repeated_sliders() {
        let cli = Cli::parse_from(["mechanics-tutor", "evaluate", "SM_4", "--set", "P=30", "-s", "L_pos=250"]);
        let Command::Evaluate { lab, json } = cli.command else {
            panic!("expected evaluate");
        };
        assert!(!json);
        let inputs = lab.inputs(lab.topic().unwrap()).unwrap();
        assert_eq!(inputs.value("P"), Some(30.0));
        assert_eq!(inputs.value("L_pos"), Some(250.0));
    }
}
