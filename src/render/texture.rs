use std::path::{Path, PathBuf};

use crate::neko::atlas::{SHEET_COLUMNS, SHEET_ROWS, TILE_SIZE};

/// Errors raised while loading the sprite sheet.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("failed to load sprite sheet {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("sprite sheet is {width}x{height}, needs at least {min_width}x{min_height}")]
    TooSmall {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },
}

/// Decoded sprite sheet in RGBA8, ready for upload.
pub struct SpriteSheet {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl SpriteSheet {
    /// Load a PNG or GIF sheet from disk.
    pub fn open(path: &Path) -> Result<Self, SheetError> {
        let img = image::open(path).map_err(|source| SheetError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_image(&img)
    }

    /// Check the image holds the full tile grid and convert it to RGBA8.
    pub fn from_image(img: &image::DynamicImage) -> Result<Self, SheetError> {
        let (width, height) = (img.width(), img.height());
        let min_width = SHEET_COLUMNS * TILE_SIZE;
        let min_height = SHEET_ROWS * TILE_SIZE;
        if width < min_width || height < min_height {
            return Err(SheetError::TooSmall {
                width,
                height,
                min_width,
                min_height,
            });
        }

        Ok(Self {
            width,
            height,
            rgba: img.to_rgba8().into_raw(),
        })
    }

    /// Sheet size measured in tiles (may be fractional for padded sheets).
    pub fn size_in_tiles(&self) -> [f32; 2] {
        [
            self.width as f32 / TILE_SIZE as f32,
            self.height as f32 / TILE_SIZE as f32,
        ]
    }
}

/// GPU copy of the sheet plus a nearest-neighbour sampler for crisp pixels.
pub struct SheetTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl SheetTexture {
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, sheet: &SpriteSheet) -> Self {
        let size = wgpu::Extent3d {
            width: sheet.width,
            height: sheet.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("sprite_sheet"),
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
            &sheet.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * sheet.width),
                rows_per_image: Some(sheet.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprite_sheet_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_grid() {
        let img = image::DynamicImage::new_rgba8(256, 128);
        let sheet = SpriteSheet::from_image(&img).unwrap();
        assert_eq!(sheet.rgba.len(), 256 * 128 * 4);
        assert_eq!(sheet.size_in_tiles(), [8.0, 4.0]);
    }

    #[test]
    fn rejects_undersized_sheet() {
        let img = image::DynamicImage::new_rgba8(128, 128);
        let err = SpriteSheet::from_image(&img).err().unwrap();
        assert!(matches!(
            err,
            SheetError::TooSmall {
                width: 128,
                height: 128,
                min_width: 256,
                min_height: 128,
            }
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SpriteSheet::open(Path::new("does/not/exist.gif")).err().unwrap();
        assert!(matches!(err, SheetError::Load { .. }));
        assert!(err.to_string().contains("does/not/exist.gif"));
    }
}
