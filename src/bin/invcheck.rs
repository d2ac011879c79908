//! `invcheck`: verify, time and apply the Fermat inversion chains.
//!
//! With no arguments beyond `verify`, this checks every registered chain against the
//! arbitrary-precision oracle over every structured population, then keeps checking 32-byte
//! blocks read from stdin until it is closed:
//!
//! ```text
//! head -c 3200000 /dev/urandom | invcheck verify
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use fermat_chain::{
    Error, MODULI, ModulusId, U256,
    bench::{Probe, Timer, probe_inversion},
    harness::{Harness, HarnessConfig, Population, ReaderSource, RngSource},
};
use rand_core::{OsRng, TryRngCore};
use std::{io, process::ExitCode};

#[derive(Parser, Debug)]
#[command(name = "invcheck")]
#[command(about = "Constant-time Fermat inversion for 256-bit prime fields", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the chains against the reference oracle
    Verify(VerifyArgs),

    /// Time inversions with the cycle counter (or a monotonic clock where there is none)
    Bench {
        /// Modulus to time
        #[arg(short, long, value_enum, ignore_case = true, default_value = "Curve25519_p")]
        modulus: ModulusId,

        /// Samples per measurement
        #[arg(short = 'n', long, default_value_t = 100)]
        iterations: usize,
    },

    /// Invert one value, given as 64 hex digits of its little-endian encoding
    Invert {
        /// Modulus to invert in
        #[arg(value_enum, ignore_case = true)]
        modulus: ModulusId,

        /// Little-endian hex input
        value: String,
    },

    /// List the registered moduli and their chains
    List {
        /// Also print every chain step
        #[arg(long)]
        steps: bool,
    },
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Modulus to verify; repeat for several (default: all)
    #[arg(short, long = "modulus", value_enum, ignore_case = true)]
    moduli: Vec<ModulusId>,

    /// Structured population to run; repeat for several (default: all)
    #[arg(short, long = "population", value_enum)]
    populations: Vec<Population>,

    /// Half-width of the near-modulus, near-ceiling and scaled-residue windows (at most 2^32)
    #[arg(long, default_value_t = 1000)]
    window: u64,

    /// Number of powers of two in the scaled-residue population (at most 256)
    #[arg(long, default_value_t = 256)]
    powers: u32,

    /// Lowest leading bit in the low-Hamming-weight population
    #[arg(long, default_value_t = 10)]
    low_weight_bottom: u32,

    /// Highest leading bit in the low-Hamming-weight population (at most 63)
    #[arg(long, default_value_t = 63)]
    low_weight_top: u32,

    /// Skip the structured populations and go straight to streaming
    #[arg(long)]
    skip_structured: bool,

    /// Where streamed inputs come from
    #[arg(long, value_enum, default_value_t = Stream::Stdin)]
    stream: Stream,

    /// Stop streaming after this many blocks
    #[arg(long)]
    limit: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Stream {
    /// 32-byte blocks from standard input
    Stdin,
    /// The operating system's random number generator
    Random,
    /// No streamed population
    None,
}

impl VerifyArgs {
    fn config(&self) -> HarnessConfig {
        let defaults = HarnessConfig::default();
        HarnessConfig {
            moduli: if self.moduli.is_empty() {
                defaults.moduli
            } else {
                self.moduli.clone()
            },
            populations: if self.populations.is_empty() {
                defaults.populations
            } else {
                self.populations.clone()
            },
            window: self.window,
            powers: self.powers,
            low_weight_bits: self.low_weight_bottom..=self.low_weight_top,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Verify(args) => verify(&args),
        Command::Bench {
            modulus,
            iterations,
        } => {
            bench(modulus, iterations);
            Ok(())
        }
        Command::Invert { modulus, value } => invert(modulus, &value),
        Command::List { steps } => {
            list(steps);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn verify(args: &VerifyArgs) -> Result<(), Error> {
    let config = args.config();
    config.validate()?;
    let harness = Harness::new(config);

    if !args.skip_structured {
        let checked = harness.run_structured()?;
        log::info!("structured populations passed ({checked} inputs)");
    }

    let streamed = match args.stream {
        Stream::Stdin => {
            let mut source = ReaderSource::new(io::stdin().lock());
            harness.run_stream(&mut source, args.limit)?
        }
        Stream::Random => {
            let mut source = RngSource::new(OsRng.unwrap_err());
            harness.run_stream(&mut source, args.limit)?
        }
        Stream::None => 0,
    };
    log::info!("streamed population passed ({streamed} inputs)");

    Ok(())
}

fn bench(modulus: ModulusId, iterations: usize) {
    let probe = Probe::new(Timer::detect(), iterations);
    let seed = U256::from_u64(0x5eed);
    println!("{}", probe_inversion(&probe, modulus.modulus(), &seed));
}

fn invert(modulus: ModulusId, value: &str) -> Result<(), Error> {
    let digits = value.trim();
    let x = U256::from_le_hex(digits.strip_prefix("0x").unwrap_or(digits))?;
    println!("{}", to_hex(&modulus.modulus().invert(&x).to_le_bytes()));
    Ok(())
}

fn list(steps: bool) {
    for modulus in MODULI {
        let chain = modulus.chain();
        println!(
            "{modulus}: {} squarings, {} multiplications, {} registers",
            chain.squarings(),
            chain.multiplications(),
            chain.registers()
        );
        if steps {
            println!("  {chain}");
        }
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
