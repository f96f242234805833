use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "telepic",
    about = "Upload image folders to Telegraph and assemble per-folder HTML galleries",
    long_about = "telepic walks a folder tree, shrinks every image to fit Telegraph's limits \
                  (longest-side cap plus a byte-size ceiling, with GIF frame resampling), \
                  uploads the results and creates one Telegraph page per folder.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    telepic publish ./albums -t <token> -i \"summer trip\"\n  \
    telepic transcode huge.png -s 5000000 -q 85 -k 0.8\n  \
    telepic resize photo.jpg -d 5600\n  \
    telepic info animation.gif"
)]
pub struct Args {
    #[arg(long, global = true, help = "Suppress progress output")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Upload a folder tree and create one Telegraph page per folder",
        long_about = "Walks the root folder; every directory containing images becomes a \
                      Telegraph page titled after the directory. Images are downscaled and \
                      size-compressed as needed before upload, and the gallery HTML is also \
                      written next to each directory as <dir>.txt."
    )]
    Publish {
        #[arg(help = "Root folder to walk")]
        root: PathBuf,

        #[arg(
            short = 't',
            long,
            env = "TELEGRAPH_TOKEN",
            help = "Telegraph access token"
        )]
        token: String,

        #[arg(short = 'i', long, help = "HTML/text prepended to every page")]
        intro: Option<String>,

        #[arg(long, help = "Author name shown on created pages")]
        author_name: Option<String>,

        #[arg(long, help = "Author URL shown on created pages")]
        author_url: Option<String>,

        #[arg(long, help = "SOCKS5 proxy address (host:port)")]
        proxy: Option<String>,

        #[arg(
            short = 'd',
            long,
            help = "Longest-side cap in pixels (default: 5600)"
        )]
        max_dimension: Option<u32>,

        #[arg(
            short = 's',
            long,
            help = "Byte-size ceiling for compression (default: 5120000)"
        )]
        target_size: Option<u64>,

        #[arg(short = 'q', long, help = "Re-encode quality (1-100, default: 85)")]
        quality: Option<u8>,

        #[arg(
            short = 'k',
            long,
            help = "Per-iteration shrink factor (0 < k < 1, default: 0.8)"
        )]
        shrink_factor: Option<f32>,
    },

    #[command(
        about = "Run the size-bounded transcode pipeline on a single file",
        long_about = "Dispatches by format: GIFs get frame resampling with a uniform delay, \
                      JPEG/PNG get iterative shrink-and-re-encode until the byte target is met. \
                      The output lands next to the input with a _compressed marker; the input \
                      is never modified."
    )]
    Transcode {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(
            short = 's',
            long,
            help = "Byte-size ceiling (default: 5120000)"
        )]
        target_size: Option<u64>,

        #[arg(short = 'q', long, help = "Re-encode quality (1-100, default: 85)")]
        quality: Option<u8>,

        #[arg(
            short = 'k',
            long,
            help = "Per-iteration shrink factor (0 < k < 1, default: 0.8)"
        )]
        shrink_factor: Option<f32>,
    },

    #[command(
        about = "Downscale an image so its longest side fits a cap",
        long_about = "Aspect-preserving Lanczos downscale to a _rz output next to the input. \
                      Images already within the cap are left untouched and no file is written."
    )]
    Resize {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(
            short = 'd',
            long,
            help = "Longest-side cap in pixels (default: 5600)"
        )]
        max_dimension: Option<u32>,
    },

    #[command(about = "Show what the pipeline would do with a file")]
    Info {
        #[arg(help = "Image file path to analyze")]
        input: PathBuf,
    },
}
