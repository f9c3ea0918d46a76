//! Image pyramid: the decoded map plus one pre-scaled copy per zoom level.
//!
//! Every level is resampled straight from the source, never from another
//! level, so zooming in and out repeatedly does not accumulate blur.

use std::path::Path;

use image::{RgbaImage, imageops, imageops::FilterType};
use tracing::info;

use crate::error::{ImageLoadError, Result};
use crate::types::ZoomLevel;

/// The decoded map. Never modified after load.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Decode the image at `path`. An empty path means the picker was cancelled.
pub fn load(path: &Path) -> Result<SourceImage> {
    if path.as_os_str().is_empty() {
        return Err(ImageLoadError::NoSelection.into());
    }
    let decoded = image::open(path).map_err(|source| ImageLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let pixels = decoded.to_rgba8();
    info!(
        path = %path.display(),
        width = pixels.width(),
        height = pixels.height(),
        "loaded map image"
    );
    Ok(SourceImage { pixels })
}

pub struct ImagePyramid {
    source: SourceImage,
    levels: Vec<(ZoomLevel, RgbaImage)>, // ascending by zoom
}

impl ImagePyramid {
    /// Eagerly resample `source` once for every level in `ladder`.
    /// The ladder must be ascending and contain 100.
    pub fn build(source: SourceImage, ladder: &[ZoomLevel]) -> Self {
        let (w, h) = source.dimensions();
        let levels = ladder
            .iter()
            .map(|&zoom| {
                let img = if zoom == ZoomLevel::IDENTITY {
                    source.pixels.clone()
                } else {
                    imageops::resize(
                        &source.pixels,
                        zoom.scaled_dim(w),
                        zoom.scaled_dim(h),
                        FilterType::Triangle,
                    )
                };
                (zoom, img)
            })
            .collect::<Vec<_>>();
        info!(levels = levels.len(), "built image pyramid");
        Self { source, levels }
    }

    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Zoom level stored at ladder position `index`.
    pub fn zoom_at(&self, index: usize) -> ZoomLevel {
        self.levels[index].0
    }

    /// Image stored at ladder position `index`.
    pub fn image_at(&self, index: usize) -> &RgbaImage {
        &self.levels[index].1
    }

    pub fn index_of(&self, zoom: ZoomLevel) -> Option<usize> {
        self.levels.binary_search_by_key(&zoom, |(z, _)| *z).ok()
    }

    pub fn get(&self, zoom: ZoomLevel) -> Option<&RgbaImage> {
        self.index_of(zoom).map(|i| self.image_at(i))
    }
}
