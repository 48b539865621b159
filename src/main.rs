//! ditherbot - Convert images into byte-budgeted HTML pixel art
//!
//! A command-line tool (and HTTP server) that fetches an image, quantizes
//! and dithers it, and emits run-length-encoded HTML that fits a per-post
//! byte budget.

use std::fs;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use ditherbot::{fetch_image, render_pixel_art, server, RenderOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ditherbot")]
#[command(version)]
#[command(about = "Convert images into byte-budgeted HTML pixel art", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch an image and render it as pixel-art HTML
    Render {
        /// URL of the source image (PNG, JPEG, GIF, WebP)
        url: String,

        /// Output HTML file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Palette size, 0-128 (0 = auto, 1 = black/white)
        #[arg(short, long, default_value = "16")]
        colors: u16,

        /// Rendered size of one image pixel, in CSS pixels (1-32)
        #[arg(short, long, default_value = "8")]
        pixel_size: usize,

        /// Output byte budget (1024-204800)
        #[arg(short, long, default_value = "204800")]
        max_size: usize,

        /// Size-search time limit in seconds
        #[arg(short, long, default_value = "10")]
        timeout: u64,
    },

    /// Serve the HTTP API (POST /dither)
    Serve {
        /// Address to bind
        #[arg(short, long, default_value = "127.0.0.1:8910")]
        addr: SocketAddr,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            url,
            output,
            colors,
            pixel_size,
            max_size,
            timeout,
        } => {
            let image = fetch_image(&url)
                .map_err(|e| format!("failed to fetch '{url}': {e}"))?;
            eprintln!(
                "Fetched '{}' ({}x{}), fitting to {} bytes with {} colors",
                url, image.width, image.height, max_size, colors
            );

            let opts = RenderOptions {
                colors,
                pixel_scale: pixel_size,
                max_size,
                timeout: Duration::from_secs(timeout),
            };
            let html = render_pixel_art(&image, &opts)?;

            match output {
                Some(path) => {
                    fs::write(&path, &html)?;
                    eprintln!("Written {} bytes to '{}'", html.len(), path.display());
                }
                None => {
                    io::stdout().write_all(html.as_bytes())?;
                }
            }
        }

        Commands::Serve { addr } => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(server::serve(addr));
        }
    }

    Ok(())
}
