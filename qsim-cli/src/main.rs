//! qsim - Quantum protocol simulator
//! Command-line driver for the CHSH game and superdense coding

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use qsim_core::{Circuit, MAX_QUBITS, SIMULATOR_CONFIG, Simulator, SimulatorConfig};
use qsim_protocols::chsh::{self, ChshInputs, ChshRound, ChshStrategy};
use qsim_protocols::superdense::{self, Message, SuperdenseRound};
use qsim_protocols::Bit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "qsim")]
#[command(author = "qsim Contributors")]
#[command(version = "2026.1.16")]
#[command(about = "qsim - CHSH game and superdense coding on a state-vector simulator", long_about = None)]
struct Cli {
    /// Seed for the random source (bits and measurement draw)
    #[arg(long, global = true, env = "QSIM_SEED")]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Print the circuit before running it
    #[arg(long, global = true)]
    show_circuit: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one round of the CHSH game
    Chsh {
        /// Alice's input bit (random if omitted)
        #[arg(long, value_name = "BIT")]
        x: Option<Bit>,

        /// Bob's input bit (random if omitted)
        #[arg(long, value_name = "BIT")]
        y: Option<Bit>,

        /// Preparation used by Alice
        #[arg(long, value_enum, default_value = "alice-flip")]
        strategy: StrategyArg,
    },

    /// Send two classical bits through one qubit
    Superdense {
        /// First bit, encoded with Z (random if omitted)
        #[arg(long, value_name = "BIT")]
        c: Option<Bit>,

        /// Second bit, encoded with X (random if omitted)
        #[arg(long, value_name = "BIT")]
        d: Option<Bit>,
    },

    /// Show simulator limits and active configuration
    Info,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    AliceFlip,
    Optimal,
}

impl From<StrategyArg> for ChshStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::AliceFlip => ChshStrategy::AliceFlip,
            StrategyArg::Optimal => ChshStrategy::Optimal,
        }
    }
}

#[derive(Serialize)]
struct ChshReport<'a> {
    strategy: ChshStrategy,
    #[serde(flatten)]
    round: &'a ChshRound,
    win_probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    circuit: Option<&'a Circuit>,
}

#[derive(Serialize)]
struct SuperdenseReport<'a> {
    #[serde(flatten)]
    round: &'a SuperdenseRound,
    correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    circuit: Option<&'a Circuit>,
}

#[derive(Serialize)]
struct InfoReport {
    version: &'static str,
    max_qubits: usize,
    config: SimulatorConfig,
    classical_win_rate: f64,
    quantum_win_rate: f64,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qsim=info,qsim_core=info,qsim_protocols=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => {
            info!(seed, "using seeded random source");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let out = Output {
        json: cli.json,
        show_circuit: cli.show_circuit,
    };

    match cli.command {
        Commands::Chsh { x, y, strategy } => {
            let inputs = ChshInputs::new(
                x.unwrap_or_else(|| Bit::random(&mut rng)),
                y.unwrap_or_else(|| Bit::random(&mut rng)),
            );
            chsh_command(&out, inputs, strategy.into(), &mut rng)
        }

        Commands::Superdense { c, d } => {
            let message = Message::new(
                c.unwrap_or_else(|| Bit::random(&mut rng)),
                d.unwrap_or_else(|| Bit::random(&mut rng)),
            );
            superdense_command(&out, message, &mut rng)
        }

        Commands::Info => info_command(out.json),
    }
}

struct Output {
    json: bool,
    show_circuit: bool,
}

fn chsh_command(
    out: &Output,
    inputs: ChshInputs,
    strategy: ChshStrategy,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    let simulator = Simulator::new();
    let circuit = chsh::chsh_circuit_with(inputs, strategy).context("building CHSH circuit")?;
    debug!(gates = circuit.len(), "circuit ready");

    let outcome = simulator.run(&circuit, rng).context("running CHSH round")?;
    let round = chsh::evaluate(inputs, &outcome)?;
    let probability = chsh::circuit_win_probability(&simulator, inputs, &circuit)?;
    debug!(%inputs, %strategy, win = round.win, "chsh round");

    if out.json {
        let report = ChshReport {
            strategy,
            round: &round,
            win_probability: probability,
            circuit: out.show_circuit.then_some(&circuit),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if out.show_circuit {
        println!("{}", circuit.to_string().dimmed());
    }

    println!("{} {}", "          Inputs".green().bold(), inputs.to_string().cyan());
    println!("{} {}", "        Strategy".green().bold(), strategy);
    println!("{} {}", "     Measurement".green().bold(), round.register.cyan());
    println!("{} {}", "  Alice's output".green().bold(), round.a);
    println!("{} {}", "    Bob's output".green().bold(), round.b);

    let verdict = if round.win {
        "WIN".green().bold()
    } else {
        "LOSE".red().bold()
    };
    println!(
        "{} {} (a ⊕ b = {}, x ∧ y = {})",
        "          Result".green().bold(),
        verdict,
        round.a ^ round.b,
        inputs.target_parity()
    );
    println!(
        "{} {:.4} (classical bound {:.2})",
        " Win probability".green().bold(),
        probability,
        chsh::CLASSICAL_WIN_RATE
    );

    Ok(())
}

fn superdense_command(out: &Output, message: Message, rng: &mut StdRng) -> anyhow::Result<()> {
    let simulator = Simulator::new();
    let circuit = superdense::superdense_circuit(message).context("building superdense circuit")?;
    debug!(gates = circuit.len(), "circuit ready");

    let outcome = simulator.run(&circuit, rng).context("running superdense round")?;
    let round = superdense::evaluate(message, &outcome)?;

    if out.json {
        let report = SuperdenseReport {
            round: &round,
            correct: round.is_correct(),
            circuit: out.show_circuit.then_some(&circuit),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if out.show_circuit {
        println!("{}", circuit.to_string().dimmed());
    }

    println!("{} {}", "Alice sends bits".green().bold(), round.sent.to_string().cyan());
    println!("{} {}", "     Measurement".green().bold(), round.register.cyan());
    println!("{} {}", "    Bob received".green().bold(), round.received.to_string().cyan());

    if !round.is_correct() {
        anyhow::bail!("message corrupted: sent {}, received {}", round.sent, round.received);
    }

    Ok(())
}

fn info_command(json: bool) -> anyhow::Result<()> {
    let report = InfoReport {
        version: env!("CARGO_PKG_VERSION"),
        max_qubits: MAX_QUBITS,
        config: *SIMULATOR_CONFIG,
        classical_win_rate: chsh::CLASSICAL_WIN_RATE,
        quantum_win_rate: chsh::quantum_win_rate(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {}", "qsim".cyan().bold(), report.version);
    println!();
    println!("{}", "Simulator:".bold());
    println!("  max qubits             {}", report.max_qubits);
    println!("  normalization epsilon  {:e}", report.config.normalization_epsilon);
    println!("  drift ceiling          {:e}", report.config.drift_ceiling);
    println!("  check every gate       {}", report.config.check_every_gate);
    println!();
    println!("{}", "CHSH:".bold());
    println!("  classical win rate     {:.4}", report.classical_win_rate);
    println!("  quantum win rate       {:.4}", report.quantum_win_rate);

    Ok(())
}
