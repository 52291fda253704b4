//! OxiHuff CLI - one-pass adaptive Huffman coder
//!
//! Reads stdin and writes stdout unless `-i`/`-o` name files.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use commands::{cmd_codes, cmd_decode, cmd_encode, cmd_info};
use oxihuff_vitter::VitterConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(author, version, about = "One-pass adaptive Huffman coder")]
#[command(long_about = "
OxiHuff is a Pure Rust adaptive (FGK/Vitter) Huffman coder.
No frequency table is stored: the code tree is rebuilt symbol by symbol.

Examples:
  oxihuff encode -i book.txt -o book.vhuf
  oxihuff decode -i book.vhuf -o book.txt
  cat book.txt | oxihuff encode --raw > book.raw
  oxihuff decode --raw --length 4096 -i book.raw
  oxihuff info book.vhuf --json
  oxihuff codes -i book.txt
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable log output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a byte stream
    #[command(alias = "e")]
    Encode {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a headerless stream instead of a VHUF frame
        #[arg(long)]
        raw: bool,

        /// Verify the code tree after every symbol
        #[arg(long)]
        check: bool,
    },

    /// Decode a stream produced by `encode`
    #[command(alias = "d")]
    Decode {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Read a headerless stream (requires --length)
        #[arg(long)]
        raw: bool,

        /// Number of bytes to decode from a raw stream
        #[arg(short = 'n', long, requires = "raw")]
        length: Option<u64>,

        /// Accept non-zero padding and trailing bytes
        #[arg(long)]
        lenient: bool,

        /// Verify the code tree after every symbol
        #[arg(long)]
        check: bool,
    },

    /// Show information about a VHUF frame
    #[command(alias = "i")]
    Info {
        /// Framed file to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Print the final code table for an input
    #[command(alias = "c")]
    Codes {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Also print the weight/kind blocks of the tree
        #[arg(long)]
        blocks: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            raw,
            check,
        } => {
            let config = VitterConfig::DEFAULT.with_invariant_checks(check);
            cmd_encode(input.as_deref(), output.as_deref(), raw, config)
        }
        Commands::Decode {
            input,
            output,
            raw,
            length,
            lenient,
            check,
        } => {
            let config = VitterConfig::DEFAULT
                .with_invariant_checks(check)
                .with_strict_padding(!lenient);
            cmd_decode(input.as_deref(), output.as_deref(), raw, length, config)
        }
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Codes {
            input,
            blocks,
            json,
        } => cmd_codes(input.as_deref(), blocks, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_length_requires_raw() {
        assert!(Cli::try_parse_from(["oxihuff", "decode", "--length", "4"]).is_err());
        assert!(Cli::try_parse_from(["oxihuff", "decode", "--raw", "--length", "4"]).is_ok());
    }

    #[test]
    fn test_global_verbosity() {
        let cli = Cli::try_parse_from(["oxihuff", "codes", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }
}
