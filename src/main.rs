//! `chordbook` - command line front end for chord sheets.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use chordbook::config::Config;
use chordbook::constants::transpose::{MAX_OFFSET, MIN_OFFSET, SEMITONES_PER_OCTAVE};
use chordbook::library::{load_song_file, SongLibrary};
use chordbook::song::Song;
use chordbook::theory::{format_key, transposed_key};
use chordbook::{render_song, transpose_chord, KeyDetector, KeyStrategy, StrategyKind};

#[derive(Parser, Debug)]
#[command(name = "chordbook")]
#[command(about = "Parse, transpose and key chord sheets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a chord sheet, optionally transposed
    Render {
        #[command(flatten)]
        source: SongSource,

        /// Semitones to transpose by (defaults to DEFAULT_TRANSPOSE)
        #[arg(short, long, allow_hyphen_values = true)]
        transpose: Option<i32>,

        /// Print the structured lines as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Detect the key of a chord sheet
    Key {
        #[command(flatten)]
        source: SongSource,

        /// Detection strategy (defaults to KEY_STRATEGY)
        #[arg(short, long)]
        strategy: Option<StrategyKind>,
    },

    /// Transpose a single chord symbol
    Transpose {
        /// Chord symbol, e.g. F#m7 or G/B
        chord: String,

        /// Semitones to transpose by
        #[arg(allow_hyphen_values = true)]
        semitones: i32,
    },

    /// List the songs in the song library
    List,
}

#[derive(Args, Debug)]
struct SongSource {
    /// Chord sheet file to read
    #[arg(required_unless_present = "song", conflicts_with = "song")]
    file: Option<PathBuf>,

    /// Title of a song in the song library
    #[arg(long)]
    song: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    tracing::debug!("{} {} starting", config.app_name(), config.app_version());

    match cli.command {
        Command::Render { source, transpose, json } => {
            let song = resolve_song(&config, &source, &KeyDetector::new(config.key_strategy))?;
            let semitones = transpose.unwrap_or(config.default_transpose);
            if !(MIN_OFFSET..=MAX_OFFSET).contains(&semitones) {
                tracing::info!(
                    "Transposing by {semitones} wraps to {} semitones",
                    semitones.rem_euclid(SEMITONES_PER_OCTAVE)
                );
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&song.structured_content)?);
            } else {
                let key = format_key(&transposed_key(&song.display_key(), semitones));
                println!("{} - Key of {key}", song.title);
                println!();
                println!("{}", render_song(&song.structured_content, semitones));
            }
        }
        Command::Key { source, strategy } => {
            let detector = KeyDetector::new(strategy.unwrap_or(config.key_strategy));
            let song = resolve_song(&config, &source, &detector)?;
            let result = detector.detect(&song.structured_content);

            match result.key {
                Some(key) if detector.kind() == StrategyKind::Scale => {
                    println!("{key} ({}% confidence)", result.confidence);
                }
                Some(key) => println!("{key}"),
                None => println!("No key detected"),
            }
            for alt in &result.alternatives {
                println!("  {} ({})", alt.key, alt.score);
            }
        }
        Command::Transpose { chord, semitones } => {
            println!("{}", transpose_chord(&chord, semitones));
        }
        Command::List => {
            let mut library = open_library(&config, KeyDetector::new(config.key_strategy))?;
            for song in library.songs() {
                if song.artist.is_empty() {
                    println!("{} [{}]", song.title, song.display_key());
                } else {
                    println!("{} - {} [{}]", song.title, song.artist, song.display_key());
                }
            }
        }
    }

    Ok(())
}

fn open_library(config: &Config, detector: KeyDetector) -> Result<SongLibrary> {
    match &config.song_library_path {
        Some(path) if config.has_song_library() => Ok(SongLibrary::new(path.clone(), detector)),
        _ => bail!("No song library found; set SONG_LIBRARY_PATH or create ~/Documents/Songs"),
    }
}

fn resolve_song(config: &Config, source: &SongSource, detector: &KeyDetector) -> Result<Song> {
    if let Some(path) = &source.file {
        return Ok(load_song_file(path, detector)?);
    }

    let title = source.song.as_deref().unwrap_or_default();
    let mut library = open_library(config, detector.clone())?;
    library
        .lookup(title)
        .cloned()
        .with_context(|| format!("No song matching '{title}' in {}", library.path().display()))
}
