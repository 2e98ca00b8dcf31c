use anyhow::Result;
use clap::Parser;
use img_batcher::batch::batch_process;
use img_batcher::cli::{Args, Commands};
use img_batcher::info::print_image_info;
use img_batcher::server;
use img_batcher::transform::{TargetFormat, TransformSpec};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Convert {
            input,
            output,
            quality,
            webp,
            zip,
            recursive,
        } => {
            let spec = TransformSpec::convert_only(target_format(webp), quality)?;
            batch_process(&input, &output, &spec, zip, recursive)?;
        }
        Commands::Resize {
            input,
            output,
            scale,
            quality,
            webp,
            zip,
            recursive,
        } => {
            let spec = TransformSpec::resize(scale, target_format(webp), quality)?;
            batch_process(&input, &output, &spec, zip, recursive)?;
        }
        Commands::Serve { port } => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .init();
            println!("🚀 Serving on http://127.0.0.1:{}", port);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(port))?;
        }
        Commands::Info { input } => {
            print_image_info(&input)?;
        }
    }

    Ok(())
}

fn target_format(webp: bool) -> TargetFormat {
    if webp {
        TargetFormat::WebP
    } else {
        TargetFormat::Original
    }
}
