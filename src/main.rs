use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use log::error;
use plasma_prp::classes::{display_name, parse_class, SOUND_BUFFER};
use plasma_prp::{Key, Page, PageHeader, SoundBuffer};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prp", about = "Inspect Plasma engine page (.prp) files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the page header and per-class key counts
    Info {
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// List keys, optionally restricted to one class
    Keys {
        input: PathBuf,
        /// Class id (decimal, 0x-hex) or class name, e.g. plSoundBuffer
        #[arg(short, long)]
        class: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Decode every sound buffer in the page
    Sounds {
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Textual overview of every object, stable enough to diff
    Dump {
        input: PathBuf,
    },
}

#[derive(Serialize)]
struct InfoReport<'a> {
    header: &'a PageHeader,
    expected_file_name: String,
    classes: Vec<ClassCount>,
}

#[derive(Serialize)]
struct ClassCount {
    class_type: u16,
    name: String,
    keys: usize,
}

fn init_logger() {
    // RUST_LOG overrides, e.g. RUST_LOG=debug prp info page.prp
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run(Cli::parse()) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {

        // ── Info ─────────────────────────────────────────────────────────────
        Commands::Info { input, json } => {
            let page = Page::open(&input)?;
            let classes: Vec<ClassCount> = page.keyring().iter()
                .map(|(class_type, keys)| ClassCount {
                    class_type,
                    name: display_name(class_type),
                    keys: keys.len(),
                })
                .collect();

            if json {
                let report = InfoReport {
                    header: page.header(),
                    expected_file_name: page.expected_file_name(),
                    classes,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            let h = page.header();
            println!("── Page ─────────────────────────────────────────────────");
            println!("  Path             {}", input.display());
            println!("  Age              {}", h.age_name);
            println!("  Page             {}", h.page_name);
            println!("  Location         {} flags {:#06x}", h.location, h.location.flags);
            println!("  Version          {} (internal {})", h.version, h.internal_version);
            println!("  Checksum         {:#010x}", h.checksum);
            println!("  Data start       {:#x}", h.data_start);
            println!("  Index offset     {:#x}", h.index_offset);
            println!("  Expected name    {}", page.expected_file_name());
            println!("  Keys             {}", page.keyring().len());
            for c in &classes {
                println!("    {:<24} {:>6}", c.name, c.keys);
            }
        }

        // ── Keys ─────────────────────────────────────────────────────────────
        Commands::Keys { input, class, json } => {
            let page = Page::open(&input)?;
            let filter = match class {
                Some(s) => Some(parse_class(&s).ok_or_else(|| format!("unknown class '{s}'"))?),
                None    => None,
            };
            let keys: Vec<&Key> = page.keyring().iter()
                .filter(|(class_type, _)| filter.map_or(true, |f| f == *class_type))
                .flat_map(|(_, keys)| keys.iter())
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&keys)?);
                return Ok(());
            }

            println!("{}", page);
            println!("{:<24} {:<32} {:>10} {:>8}", "Class", "Name", "Offset", "Length");
            for key in keys {
                println!("{:<24} {:<32} {:>#10x} {:>8}",
                    display_name(key.class_type()), key.name(), key.offset, key.length);
            }
        }

        // ── Sounds ───────────────────────────────────────────────────────────
        Commands::Sounds { input, json } => {
            let mut page = Page::open(&input)?;
            let keys = page.keys_of(SOUND_BUFFER).to_vec();
            let mut sounds: Vec<SoundBuffer> = Vec::with_capacity(keys.len());
            for key in &keys {
                if let Some(sfx) = page.decode(key)?.into_sound_buffer() {
                    sounds.push(sfx);
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&sounds)?);
                return Ok(());
            }

            println!("{}", page);
            println!();
            println!("Sound Buffers:");
            for sfx in &sounds {
                println!("[OBJ: {}] [FILE: {}] [EXT: {}] [STREAM: {}] [{} ch @ {} Hz, {} bit]",
                    sfx.uoid.name, sfx.file_name,
                    sfx.has_external_audio_file(), sfx.is_streamed_and_compressed(),
                    sfx.channel_count, sfx.sample_rate, sfx.bits_per_sample);
            }
        }

        // ── Dump ─────────────────────────────────────────────────────────────
        Commands::Dump { input } => {
            let mut page = Page::open(&input)?;
            dump(&mut page, &mut io::stdout().lock())?;
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

/// One section per class, keys sorted by name.  A record that fails to
/// decode gets an `error:` line and the dump moves on.
fn dump<W: Write>(page: &mut Page, out: &mut W) -> io::Result<()> {
    let buckets: Vec<(u16, Vec<Key>)> = page.keyring().iter()
        .map(|(class_type, keys)| (class_type, keys.to_vec()))
        .collect();

    for (class_type, mut keys) in buckets {
        writeln!(out, "Type: {}", display_name(class_type))?;
        keys.sort_by(|a, b| a.name().cmp(b.name()));
        for key in &keys {
            writeln!(out, "\t{} : {}", key.name(), key.uoid)?;
            match describe(page, key) {
                Ok(line) => writeln!(out, "\t\t{line}")?,
                Err(e) => writeln!(out, "\t\terror: {e}")?,
            }
        }
    }
    Ok(())
}

/// Full JSON for decodable objects, a BLAKE3 digest of the raw record for
/// everything else.
fn describe(page: &mut Page, key: &Key) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match page.decode_supported(key)? {
        Some(obj) => serde_json::to_string(&obj)?,
        None => {
            let record = page.read_record(key)?;
            format!("blake3:{}", hex::encode(blake3::hash(&record).as_bytes()))
        }
    })
}
