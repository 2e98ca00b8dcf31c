use crate::constants::DEFAULT_PORT;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-batcher",
    about = "Batch image conversion and resizing with individual or ZIP archive delivery",
    long_about = "img-batcher converts and resizes batches of raster images (JPEG, PNG, WebP, GIF). \
                  Results are delivered as individual files in an output directory or packed into a \
                  single ZIP archive. The same pipeline is also available over HTTP via `serve`.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    img-batcher convert ./photos -o ./out --webp -q 85\n  \
    img-batcher convert \"./photos/*.png\" -o ./out --zip\n  \
    img-batcher resize ./photos -o ./out -s 50 --webp\n  \
    img-batcher serve -p 3030\n  \
    img-batcher info photo.png"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Convert a batch of images without changing their size",
        long_about = "Convert every image found at the input path. By default each file is \
                      re-encoded in its own format; --webp converts everything to WebP at the \
                      chosen quality."
    )]
    Convert {
        #[arg(
            help = "Input file, directory, or glob pattern",
            long_help = "Input can be a single file, a directory, or a glob expression. \
                         Examples: './images', 'photo.jpg', './images/*.png'"
        )]
        input: String,

        #[arg(short, long, help = "Output directory path")]
        output: PathBuf,

        #[arg(
            short,
            long,
            help = "Encode quality (1-100, default: 80)",
            long_help = "Quality from 1 (smallest) to 100 (best). Applies to WebP output; \
                         PNG output maps it to the lossless optimization effort."
        )]
        quality: Option<u8>,

        #[arg(long, help = "Convert every image to WebP instead of keeping its format")]
        webp: bool,

        #[arg(long, help = "Deliver all outputs as a single ZIP archive")]
        zip: bool,

        #[arg(short, long, help = "Process subdirectories recursively")]
        recursive: bool,
    },

    #[command(
        about = "Resize a batch of images by a percentage of their dimensions",
        long_about = "Resize every image found at the input path. Both axes are scaled by the \
                      same percentage; each axis rounds independently."
    )]
    Resize {
        #[arg(help = "Input file, directory, or glob pattern")]
        input: String,

        #[arg(short, long, help = "Output directory path")]
        output: PathBuf,

        #[arg(
            short,
            long,
            help = "Scale percentage applied to both axes (1-100)"
        )]
        scale: u8,

        #[arg(short, long, help = "Encode quality (1-100, default: 80)")]
        quality: Option<u8>,

        #[arg(long, help = "Convert every image to WebP instead of keeping its format")]
        webp: bool,

        #[arg(long, help = "Deliver all outputs as a single ZIP archive")]
        zip: bool,

        #[arg(short, long, help = "Process subdirectories recursively")]
        recursive: bool,
    },

    #[command(
        about = "Run the HTTP conversion endpoints",
        long_about = "Serve POST /convert (JSON batch result with base64 payloads) and \
                      POST /convert-zip (single binary ZIP response) on localhost."
    )]
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_PORT, help = "Port to listen on")]
        port: u16,
    },

    #[command(about = "Display basic information about an image file")]
    Info {
        #[arg(help = "Image file path to analyze")]
        input: PathBuf,
    },
}
