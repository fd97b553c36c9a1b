use clap::{Parser, Subcommand};
use lootreel::assign::TierAssignment;
use lootreel::config;
use lootreel::events::AppEvent;
use lootreel::select::CaseSelector;
use lootreel::source::{Library, TextFileSource};
use lootreel::sys::server::SOCKET_PATH;
use lootreel::{TIER_TABLE, Tier};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lootreel", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
struct LibraryArgs {
    /// Item list to read (defaults to the configured one)
    #[arg(short = 'i', long)]
    items: Option<PathBuf>,

    /// Seed for reproducible draws (defaults to the configured one)
    #[arg(short = 's', long)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Open a case in the running desktop app.
    Open,
    /// Make the desktop app re-read its item list.
    Reload,
    /// Switch the desktop app to another item list.
    Load { path: PathBuf },
    /// Open cases without animation and print the results.
    Roll {
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        #[command(flatten)]
        library: LibraryArgs,
    },
    /// Print which items landed in which tier.
    Tiers {
        #[command(flatten)]
        library: LibraryArgs,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Open => send_event(&AppEvent::Open),
        Commands::Reload => send_event(&AppEvent::ItemsChanged),
        Commands::Load { path } => send_event(&AppEvent::LoadItems(path.canonicalize()?)),
        Commands::Roll { count, library } => roll(count, library),
        Commands::Tiers { library } => tiers(library),
    }
}

fn load_library(args: LibraryArgs) -> anyhow::Result<(Library, ChaCha20Rng)> {
    let config = config::load_or_default();
    let path = args.items.unwrap_or_else(|| config.items_path());
    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let library = Library::load(&TextFileSource::new(&path), &mut rng)?;
    log::info!("{} items from {} (seed {seed})", library.len(), path.display());
    Ok((library, rng))
}

fn roll(count: usize, args: LibraryArgs) -> anyhow::Result<()> {
    let (library, mut rng) = load_library(args)?;
    if library.is_empty() {
        anyhow::bail!("The item list is empty. Add one item per line first.");
    }

    let selector = CaseSelector::new(&TIER_TABLE, library.assignment(), library.items());
    let mut histogram = [0usize; lootreel::tier::TIER_COUNT];
    for _ in 0..count {
        let result = selector.open(&mut rng);
        histogram[result.tier.as_index()] += 1;
        println!("{:<24} {}", result.tier.to_string(), result.item);
    }

    if count > 1 {
        println!();
        for entry in TIER_TABLE.entries() {
            let hits = histogram[entry.tier.as_index()];
            println!(
                "{:<24} {:>6} {:>7.2}% (expected {:.2}%)",
                entry.tier.to_string(),
                hits,
                hits as f64 * 100.0 / count as f64,
                entry.probability
            );
        }
    }
    Ok(())
}

fn tiers(args: LibraryArgs) -> anyhow::Result<()> {
    let (library, _) = load_library(args)?;
    print_assignment(library.assignment());
    Ok(())
}

fn print_assignment(assignment: &TierAssignment) {
    for (tier, bucket) in assignment.iter() {
        let color = TIER_TABLE.entry(tier).hex();
        println!("{} {} ({})", color, tier, bucket.len());
        for item in bucket {
            println!("    {}", item);
        }
    }
    if assignment.bucket(Tier::ExceedinglyRare).is_empty() {
        println!("(no {} items yet)", TIER_TABLE.rarest());
    }
}

fn send_event(event: &AppEvent) -> anyhow::Result<()> {
    let Some(line) = event.to_command() else {
        anyhow::bail!("{:?} cannot be sent over the socket", event);
    };
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to lootreel at {}: {}. Is lootreel-gtk running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", line)?;
    Ok(())
}
