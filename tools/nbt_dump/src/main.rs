#![doc = include_str!("../README.md")]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    rustdoc::missing_crate_level_docs,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls,
    rustdoc::invalid_html_tags
)]
#![warn(
    trivial_casts,
    trivial_numeric_casts,
    unused_lifetimes,
    unused_import_braces,
    clippy::dbg_macro
)]

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use nbt_codec::stream::{encode_stream, Gzip, Zlib};
use tracing::{info, Level};

mod print;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// NBT file to read. Gzip or zlib compression is detected automatically.
    input: PathBuf,
    /// Re-encode the decoded tree to this path.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Gzip compress the re-encoded output.
    #[arg(short, long, requires = "output")]
    compress: bool,
    /// Use zlib instead of gzip when compressing.
    #[arg(long, requires = "compress")]
    zlib: bool,
    /// Don't print the tree.
    #[arg(short, long)]
    quiet: bool,
    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .init();

    let bytes =
        fs::read(&cli.input).with_context(|| format!("failed to read {}", cli.input.display()))?;

    let (root, root_name) = nbt_codec::from_bytes(&bytes)
        .with_context(|| format!("failed to decode {}", cli.input.display()))?;

    info!(
        path = %cli.input.display(),
        len = bytes.len(),
        entries = root.len(),
        "decoded NBT file"
    );

    if !cli.quiet {
        let mut out = BufWriter::new(io::stdout().lock());
        print::print_root(&mut out, &root_name, &root)?;
        out.flush()?;
    }

    if let Some(output) = &cli.output {
        let encoded = if cli.zlib {
            encode_stream(&root, &root_name, cli.compress, &Zlib::default())?
        } else {
            encode_stream(&root, &root_name, cli.compress, &Gzip::default())?
        };

        fs::write(output, &encoded)
            .with_context(|| format!("failed to write {}", output.display()))?;

        info!(path = %output.display(), len = encoded.len(), "wrote NBT file");
    }

    Ok(())
}
