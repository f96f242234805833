use anyhow::Context;
use clap::Parser;
use telepic::cli::{Args, Commands};
use telepic::{
    info, logger, print_image_info, publish_tree, transcode, ImageAsset, TelegraphOptions,
    TranscodeConfig,
};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::set_quiet_mode(args.quiet);
    logger::set_verbose_mode(args.verbose);

    match args.command {
        Commands::Publish {
            root,
            token,
            intro,
            author_name,
            author_url,
            proxy,
            max_dimension,
            target_size,
            quality,
            shrink_factor,
        } => {
            let config = TranscodeConfig::new(max_dimension, target_size, quality, shrink_factor)?;
            let telegraph = TelegraphOptions::new(token, author_name, author_url, proxy);

            let pages = publish_tree(&root, intro.as_deref(), &config, &telegraph)
                .with_context(|| format!("failed to publish {:?}", root))?;

            info!("\n📋 Here are all page links:");
            for page in &pages {
                info!("{}", page);
            }
        }
        Commands::Transcode {
            input,
            target_size,
            quality,
            shrink_factor,
        } => {
            let config = TranscodeConfig::new(None, target_size, quality, shrink_factor)?;
            let asset = ImageAsset::from_path(&input)?;
            let original_size = asset.byte_size;

            let result = transcode(asset, &config)?;

            info!("✅ Transcoded to: {:?}", result.path);
            info!(
                "📊 {} bytes -> {} bytes ({}x{})",
                original_size, result.byte_size, result.width, result.height
            );
        }
        Commands::Resize {
            input,
            max_dimension,
        } => {
            let cap = max_dimension.unwrap_or(telepic::constants::DEFAULT_MAX_DIMENSION);
            let asset = ImageAsset::from_path(&input)?;
            let original_path = asset.path.clone();

            let result = telepic::limit_dimensions(asset, cap)?;

            if result.path == original_path {
                info!("✅ Already within {} px, nothing to do", cap);
            } else {
                info!("✅ Resized to: {:?}", result.path);
                info!("📏 New dimensions: {}x{}", result.width, result.height);
            }
        }
        Commands::Info { input } => {
            print_image_info(&input)?;
        }
    }

    Ok(())
}
