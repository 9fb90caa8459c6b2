use anyhow::Context;
use clap::Parser;
use img_slim::cli::{build_config, Args, Commands};
use img_slim::logger::{self, Verbosity};
use img_slim::processing::{batch_compress_files, compress_file, estimate_files};
use img_slim::Compressor;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::set_verbosity(Verbosity::from_flags(args.quiet, args.verbose));

    if !Compressor::is_platform_supported() {
        anyhow::bail!("this build is missing the image codecs required for compression");
    }

    match args.command {
        Commands::Compress {
            input,
            output,
            quality,
            max_width,
            max_height,
            format,
            no_transparency,
        } => {
            let config = build_config(
                quality,
                format.as_deref(),
                output.as_deref(),
                max_width,
                max_height,
                !no_transparency,
                None,
            )?;
            compress_file(input, output, config).context("compression failed")?;
        }
        Commands::Batch {
            input,
            output,
            quality,
            max_width,
            max_height,
            format,
            workers,
            recursive,
        } => {
            let config = build_config(
                quality,
                format.as_deref(),
                None,
                max_width,
                max_height,
                true,
                workers,
            )?;
            batch_compress_files(input, output, config, recursive)
                .context("batch compression failed")?;
        }
        Commands::Estimate {
            input,
            quality,
            recursive,
        } => {
            let config = build_config(quality, None, None, None, None, true, None)?;
            estimate_files(input, config, recursive).context("estimation failed")?;
        }
    }

    Ok(())
}
