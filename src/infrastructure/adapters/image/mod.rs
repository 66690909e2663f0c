//! 故事板图片生成适配器

mod http_image_client;

pub use http_image_client::{HttpImageClient, HttpImageClientConfig};
