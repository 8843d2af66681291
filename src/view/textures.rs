use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::AssetLoadError;

pub const WOOD_TEXTURE: &str = "wood.bmp";
pub const BRICK_TEXTURE: &str = "brick.bmp";

/// A decoded RGBA8 image ready for upload.
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub fn decode(path: impl AsRef<Path>) -> Result<TextureImage, AssetLoadError> {
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|e| AssetLoadError::Texture {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
        .to_rgba8();
    let (width, height) = image.dimensions();
    info!("Loaded texture {} ({}x{})", path.display(), width, height);
    Ok(TextureImage {
        width,
        height,
        rgba: image.into_raw(),
    })
}

pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, label: &str, image: &TextureImage) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width: image.width,
        height: image.height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &image.rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * image.width),
            rows_per_image: Some(image.height),
        },
        size,
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Wood and brick views, in that order.
pub fn load_scene_textures(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    textures_dir: &Path,
) -> Result<(wgpu::TextureView, wgpu::TextureView), AssetLoadError> {
    let path = |name: &str| -> PathBuf { textures_dir.join(name) };
    let wood = upload(device, queue, "wood_texture", &decode(path(WOOD_TEXTURE))?);
    let brick = upload(device, queue, "brick_texture", &decode(path(BRICK_TEXTURE))?);
    Ok((wood, brick))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.bmp");
        assert!(matches!(decode(&missing), Err(AssetLoadError::Texture { path, .. }) if path == missing));
    }

    #[test]
    fn test_decode_bmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checker.bmp");
        let pixels = image::RgbImage::from_fn(2, 2, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgb([255, 0, 0])
            } else {
                image::Rgb([0, 0, 255])
            }
        });
        pixels.save(&path).unwrap();

        let decoded = decode(&path).unwrap();
        assert_eq!((decoded.width, decoded.height), (2, 2));
        assert_eq!(&decoded.rgba[..4], &[255, 0, 0, 255]);
        assert_eq!(&decoded.rgba[4..8], &[0, 0, 255, 255]);
    }
}
