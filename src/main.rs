//! morse - command line front end
//!
//! Encodes and decodes Morse code and keys sequences out through the
//! default audio output.

use clap::{Parser, Subcommand};
use std::error::Error;
use std::thread;
use std::time::Duration;

use morse_rs::player::OptionsError;
use morse_rs::settings::settings_path;
use morse_rs::{
    decode, encode, AppSettings, AudioConfig, AudioEngine, PlayOptions, Player, UnmappedSymbol,
};

/// How often to check whether playback has finished
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Time for the output device to drain its last buffer after completion
const DRAIN_TAIL: Duration = Duration::from_millis(200);

/// Emergency signal timing
const SOS_UNIT_MS: u32 = 100;
const SOS_FREQUENCY: u32 = 600;

#[derive(Parser)]
#[command(name = "morse", about = "Morse code translator and tone player")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text into a Morse sequence
    Encode {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Decode a Morse sequence into text
    Decode {
        #[arg(required = true, allow_hyphen_values = true)]
        sequence: Vec<String>,
    },
    /// Play a Morse sequence through the default audio output
    ///
    /// Quote the sequence as one argument. If it starts with a dash, put it
    /// after `--`, e.g. `morse play -u 60 -- "-.-. --.-"`.
    Play {
        #[arg(required = true)]
        sequence: Vec<String>,
        /// Treat the input as plain text and encode it first
        #[arg(short, long)]
        text: bool,
        /// Unit length in milliseconds (overrides config)
        #[arg(short, long)]
        unit: Option<u32>,
        /// Tone frequency in Hz (overrides config)
        #[arg(short, long)]
        freq: Option<u32>,
        /// How to play symbols that are neither dot nor dash: skip or rest
        #[arg(long)]
        unmapped: Option<UnmappedSymbol>,
    },
    /// Send the SOS emergency signal
    Sos,
    /// Player configuration
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
}

#[derive(Subcommand)]
enum ConfigCmd {
    /// Show the current settings
    Show,
    /// Update and save settings
    Set {
        #[arg(short, long)]
        unit: Option<u32>,
        #[arg(short, long)]
        freq: Option<u32>,
        #[arg(long)]
        unmapped: Option<UnmappedSymbol>,
        /// Master volume (0.0 to 1.0)
        #[arg(long)]
        volume: Option<f32>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { text } => {
            println!("{}", encode(text.join(" ").trim()));
        }
        Commands::Decode { sequence } => {
            println!("{}", decode(sequence.join(" ").trim()));
        }
        Commands::Play {
            sequence,
            text,
            unit,
            freq,
            unmapped,
        } => {
            let settings = AppSettings::load();
            let input = sequence.join(" ");
            let input = input.trim();
            let morse = if text { encode(input) } else { input.to_string() };

            let options = play_options(&settings, unit, freq, unmapped)?;

            println!("{}", morse);
            play_and_wait(&morse, &options, &settings);
        }
        Commands::Sos => {
            let settings = AppSettings::load();
            let options = PlayOptions::new(SOS_UNIT_MS, SOS_FREQUENCY)?;
            let morse = encode("SOS");
            println!("{}", morse);
            play_and_wait(&morse, &options, &settings);
        }
        Commands::Config { action } => match action {
            ConfigCmd::Show => {
                let settings = AppSettings::load();
                println!("# {}", settings_path().display());
                println!("{}", serde_json::to_string_pretty(&settings)?);
            }
            ConfigCmd::Set {
                unit,
                freq,
                unmapped,
                volume,
            } => {
                let mut settings = AppSettings::load();
                if let Some(unit) = unit {
                    settings.unit_ms = unit;
                }
                if let Some(freq) = freq {
                    settings.frequency = freq;
                }
                if let Some(unmapped) = unmapped {
                    settings.unmapped_symbol = unmapped;
                }
                if let Some(volume) = volume {
                    settings.volume = volume;
                }
                let path = settings.sanitized().save()?;
                println!("Saved {}", path.display());
            }
        },
    }

    Ok(())
}

/// Settings-derived options with any command line overrides applied
fn play_options(
    settings: &AppSettings,
    unit: Option<u32>,
    freq: Option<u32>,
    unmapped: Option<UnmappedSymbol>,
) -> Result<PlayOptions, OptionsError> {
    let base = settings.play_options();
    Ok(PlayOptions::new(
        unit.unwrap_or(base.unit_ms()),
        freq.unwrap_or(base.frequency()),
    )?
    .unmapped(unmapped.unwrap_or(base.unmapped_policy())))
}

/// Open the audio output, play `morse` and block until it finishes
fn play_and_wait(morse: &str, options: &PlayOptions, settings: &AppSettings) {
    let config = AudioConfig {
        volume: settings.volume,
        ..Default::default()
    };
    let engine = match AudioEngine::open(config) {
        Ok(engine) => Some(engine),
        Err(e) => {
            log::warn!("Audio unavailable: {}", e);
            None
        }
    };

    let player = Player::new(engine);
    player.play(morse, options);
    if !player.is_playing() {
        eprintln!("Playback did not start: no audio output available");
        return;
    }

    while player.is_playing() {
        thread::sleep(POLL_INTERVAL);
    }
    thread::sleep(DRAIN_TAIL);
}
