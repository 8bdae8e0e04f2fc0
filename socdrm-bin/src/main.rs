//! Command-line interface for socdrm

use std::fs::OpenOptions;
use std::os::unix::io::AsRawFd;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use socdrm::prelude::*;

#[derive(Parser)]
#[command(name = "socdrm")]
#[command(version = socdrm::VERSION)]
#[command(about = "Vendor capability and GEM allocation tool for ARM SoC DRM drivers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List vendor plugins compiled into this build
    Vendors,

    /// Show one vendor's capability descriptor
    Caps {
        /// DRM driver name (e.g. "rockchip")
        #[arg(short, long)]
        vendor: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Allocate a GEM buffer through a vendor's custom create hook
    Alloc {
        /// DRM driver name
        #[arg(short, long)]
        vendor: String,

        /// DRM device node
        #[arg(short, long, default_value = "/dev/dri/card0")]
        device: String,

        /// Buffer width in pixels
        #[arg(long)]
        width: u32,

        /// Buffer height in pixels
        #[arg(long)]
        height: u32,

        /// Bits per pixel
        #[arg(long, default_value_t = 32)]
        bpp: u32,

        /// Allocate as a scanout buffer
        #[arg(long)]
        scanout: bool,
    },

    /// Export all capability descriptors to a JSON file
    Export {
        /// Output file
        #[arg(short, long, default_value = "socdrm_caps.json")]
        output: String,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn lookup(name: &str) -> anyhow::Result<&'static dyn DrmModeVendor> {
    socdrm::require_vendor(name)
        .with_context(|| format!("available vendors: {}", socdrm::vendor_names().join(", ")))
}

fn print_caps(caps: &VendorCaps, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(caps)?);
        }
        OutputFormat::Text => {
            println!("Vendor:                {}", caps.name);
            println!("Page-flip events:      {}", caps.use_page_flip_events);
            println!("Early display:         {}", caps.use_early_display);
            println!("Vblank query:          {}", caps.vblank_query_supported);
            println!(
                "Cursor:                {}x{} (pad {} px, {:?})",
                caps.cursor.width, caps.cursor.height, caps.cursor.padding, caps.cursor.api
            );
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Vendors => {
            for name in socdrm::vendor_names() {
                println!("{}", name);
            }
        }

        Commands::Caps { vendor, format } => {
            let vendor = lookup(&vendor)?;
            print_caps(vendor.caps(), format)?;
        }

        Commands::Alloc {
            vendor,
            device,
            width,
            height,
            bpp,
            scanout,
        } => {
            let vendor = lookup(&vendor)?;
            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .open(&device)
                .with_context(|| format!("failed to open {}", device))?;

            let usage = if scanout {
                BufferUsage::Scanout
            } else {
                BufferUsage::NonScanout
            };
            let request = GemCreateRequest {
                width,
                height,
                bpp,
                usage,
            };

            match vendor.create_custom_gem(file.as_raw_fd(), &request) {
                Some(Ok(buffer)) => {
                    println!("handle: {}", buffer.handle);
                    println!("pitch:  {} bytes", buffer.pitch);
                    println!("size:   {} bytes", buffer.size);
                }
                Some(Err(e)) => bail!("allocation failed: {}", e),
                None => bail!(
                    "vendor '{}' has no custom GEM allocator (host would use dumb buffers)",
                    vendor.caps().name
                ),
            }
        }

        Commands::Export { output } => {
            socdrm::export_caps_json(&output)
                .with_context(|| format!("failed to write {}", output))?;
            println!("Wrote {}", output);
        }

        Commands::Version => {
            println!("socdrm v{}", socdrm::VERSION);
        }
    }

    Ok(())
}
