//! lzs-cli - Command-line interface for LZS
//!
//! A command-line tool for compressing and decompressing text files with the
//! LZ-String format, optionally scrambled with numeric keys.

use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use lzs::{
    compress_scrambled, compress_with_stats, decompress, decompress_scrambled, derive_keys,
    Alphabet,
};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "lzs-cli")]
#[command(about = "A CLI tool for LZ-String compression and decompression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (also enables debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a UTF-8 text file
    Compress {
        /// Input text file
        input: PathBuf,

        /// Output compressed file
        output: PathBuf,

        #[command(flatten)]
        codec: CodecOptions,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a file back to UTF-8 text
    Decompress {
        /// Input compressed file
        input: PathBuf,

        /// Output text file
        output: PathBuf,

        #[command(flatten)]
        codec: CodecOptions,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Try to decode a compressed file in every alphabet
    Info {
        /// Compressed file to analyze
        input: PathBuf,

        #[command(flatten)]
        keys: KeyOptions,
    },
}

#[derive(Args)]
struct CodecOptions {
    /// Output alphabet (ignored when keys are given)
    #[arg(short, long, value_enum, default_value_t = CliAlphabet::Utf16)]
    alphabet: CliAlphabet,

    #[command(flatten)]
    keys: KeyOptions,
}

#[derive(Args)]
struct KeyOptions {
    /// Scrambler key; repeat or separate with commas for several keys
    #[arg(short, long = "key", value_delimiter = ',', allow_negative_numbers = true)]
    keys: Vec<i64>,

    /// Derive scrambler keys from a passphrase
    #[arg(short, long, conflicts_with = "keys")]
    passphrase: Option<String>,

    /// Number of keys to derive from the passphrase
    #[arg(long, default_value_t = 1)]
    key_count: usize,
}

impl KeyOptions {
    fn resolve(&self) -> Vec<i64> {
        match &self.passphrase {
            Some(passphrase) => derive_keys(passphrase, self.key_count),
            None => self.keys.clone(),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CliAlphabet {
    /// 16 bits per code unit, stored as UTF-16LE
    Raw,
    /// 15 bits per code unit, valid UTF-16 text - Default
    Utf16,
    /// Base64 characters padded with '='
    Base64,
    /// URL-safe characters terminated with '+'
    UriSafe,
}

impl From<CliAlphabet> for Alphabet {
    fn from(alphabet: CliAlphabet) -> Self {
        match alphabet {
            CliAlphabet::Raw => Alphabet::Raw,
            CliAlphabet::Utf16 => Alphabet::Utf16,
            CliAlphabet::Base64 => Alphabet::Base64,
            CliAlphabet::UriSafe => Alphabet::UriSafe,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            codec,
            force,
        } => compress_file(
            &input,
            &output,
            codec.alphabet.into(),
            &codec.keys.resolve(),
            force,
            cli.verbose,
            cli.quiet,
        ),
        Commands::Decompress {
            input,
            output,
            codec,
            force,
        } => decompress_file(
            &input,
            &output,
            codec.alphabet.into(),
            &codec.keys.resolve(),
            force,
            cli.verbose,
            cli.quiet,
        ),
        Commands::Info { input, keys } => show_file_info(&input, &keys.resolve(), cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Check the input exists and the output may be written
fn check_paths(input: &PathBuf, output: &PathBuf, force: bool) -> Result<(), String> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()));
    }
    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        ));
    }
    Ok(())
}

fn progress_bar(
    input_size: usize,
    quiet: bool,
    message: &'static str,
) -> Result<Option<ProgressBar>, Box<dyn std::error::Error>> {
    if quiet || input_size <= 1024 * 1024 {
        return Ok(None);
    }
    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    Ok(Some(pb))
}

/// Storage form of a payload: scrambled payloads are always valid UTF-16
fn storage_alphabet(alphabet: Alphabet, keys: &[i64]) -> Alphabet {
    if keys.is_empty() {
        alphabet
    } else {
        Alphabet::Utf16
    }
}

fn compress_file(
    input: &PathBuf,
    output: &PathBuf,
    alphabet: Alphabet,
    keys: &[i64],
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    if verbose {
        println!(
            "Compressing '{}' to '{}'",
            input.display(),
            output.display()
        );
        if keys.is_empty() {
            println!("Alphabet: {}", alphabet);
        } else {
            println!("Scrambled with {} key(s)", keys.len());
        }
    }

    let start_time = Instant::now();

    let text = fs::read_to_string(input)?;
    let input_size = text.len();

    if verbose {
        println!("Input size: {} bytes", input_size);
    }

    let progress = progress_bar(input_size, quiet, "Compressing...")?;
    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let units: Vec<u16> = text.encode_utf16().collect();
    let packed = if keys.is_empty() {
        let (packed, stats) = compress_with_stats(&units, alphabet);
        if verbose {
            println!(
                "Dictionary: {} codes, final code width {} bits",
                stats.dictionary_size, stats.code_bits
            );
        }
        packed
    } else {
        compress_scrambled(&units, keys)
    };
    let compressed_data = storage_alphabet(alphabet, keys).to_storage_bytes(&packed)?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Compression complete");
    }

    fs::write(output, &compressed_data)?;

    let compression_time = start_time.elapsed();
    let output_size = compressed_data.len();

    if !quiet {
        println!("✓ Compression successful!");
        println!("  Input:  {} bytes ({} code units)", input_size, units.len());
        println!("  Output: {} bytes ({} symbols)", output_size, packed.len());
        if input_size > 0 {
            let compression_ratio = (output_size as f64 / input_size as f64) * 100.0;
            println!("  Ratio:  {:.1}%", compression_ratio);
            if compression_ratio > 100.0 {
                println!("  Note: File expanded during compression (common for short inputs)");
            }
        }
        println!("  Time:   {:.2?}", compression_time);
    }

    Ok(())
}

fn decompress_file(
    input: &PathBuf,
    output: &PathBuf,
    alphabet: Alphabet,
    keys: &[i64],
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    if verbose {
        println!(
            "Decompressing '{}' to '{}'",
            input.display(),
            output.display()
        );
    }

    let start_time = Instant::now();

    let compressed_data = fs::read(input)?;
    let input_size = compressed_data.len();

    if verbose {
        println!("Compressed size: {} bytes", input_size);
    }

    let progress = progress_bar(input_size, quiet, "Decompressing...")?;
    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let payload = storage_alphabet(alphabet, keys).from_storage_bytes(&compressed_data)?;
    let units = if keys.is_empty() {
        decompress(&payload, alphabet)
    } else {
        decompress_scrambled(&payload, keys)
    }
    .map_err(|e| format!("Decompression failed: {}", e))?;
    let text = String::from_utf16(&units)?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decompression complete");
    }

    fs::write(output, &text)?;

    let decompression_time = start_time.elapsed();
    let output_size = text.len();

    if !quiet {
        println!("✓ Decompression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        if output_size > 0 {
            let compression_ratio = (input_size as f64 / output_size as f64) * 100.0;
            println!("  Ratio:  {:.1}%", compression_ratio);
        }
        println!("  Time:   {:.2?}", decompression_time);
    }

    Ok(())
}

fn show_file_info(
    input: &PathBuf,
    keys: &[i64],
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;

    println!("LZS File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", data.len());

    // The payload does not record its alphabet, so try each one
    let mut valid = 0;
    for alphabet in Alphabet::ALL {
        let decoded = alphabet
            .from_storage_bytes(&data)
            .and_then(|payload| decompress(&payload, alphabet));
        match decoded {
            Ok(units) => {
                valid += 1;
                println!("  {:>9}: ✓ decodes to {} code units", alphabet, units.len());
            }
            Err(e) => {
                println!("  {:>9}: ✗ not valid", alphabet);
                if verbose {
                    println!("             {}", e);
                }
            }
        }
    }

    if !keys.is_empty() {
        let decoded = Alphabet::Utf16
            .from_storage_bytes(&data)
            .and_then(|payload| decompress_scrambled(&payload, keys));
        match decoded {
            Ok(units) => {
                valid += 1;
                println!("  scrambled: ✓ decodes to {} code units", units.len());
            }
            Err(e) => {
                println!("  scrambled: ✗ not valid with the given keys");
                if verbose {
                    println!("             {}", e);
                }
            }
        }
    }

    if valid == 0 {
        println!("  Status: ✗ Not a valid LZS payload in any known form");
    } else {
        println!("  Note: a successful decode does not prove which form was used");
    }

    Ok(())
}
