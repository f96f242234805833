pub mod animation;
pub mod asset;
pub mod cli;
pub mod compress;
pub mod constants;
pub mod error;
pub mod formats;
pub mod gallery;
pub mod info;
pub mod logger;
pub mod resize;
pub mod telegraph;
pub mod transcode;

pub use animation::recompress_animation;
pub use asset::{derived_path, ImageAsset};
pub use compress::compress_to_size;
pub use error::{Result, TranscodeError};
pub use formats::MediaFormat;
pub use gallery::{
    collect_directory_images, gallery_html, publish_directory, publish_image, publish_tree,
};
pub use info::print_image_info;
pub use resize::{fit_dimensions, limit_dimensions};
pub use telegraph::{create_page_sync, image_nodes, upload_file_sync, TelegraphOptions};
pub use transcode::{transcode, TranscodeConfig};
