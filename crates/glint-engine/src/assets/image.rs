//! Image decoding for texture uploads.

use std::path::Path;

use image::{DynamicImage, ImageError};

use crate::error::{Error, Result};

/// Decoded, row-major, 8-bit-per-channel pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// 1 (gray), 2 (gray + alpha), 3 (RGB) or 4 (RGBA).
    pub channels: u8,
    pub pixels: Vec<u8>,
}

/// Decodes `path`, keeping the file's channel count.
///
/// Images with more than 8 bits per channel are narrowed to 8 bits. With
/// `flip`, the first row of `pixels` is the bottom row of the image, which is
/// what GL expects for texture coordinate `v = 0`.
pub fn decode(path: &Path, flip: bool) -> Result<DecodedImage> {
    let img = image::open(path).map_err(|e| match e {
        ImageError::IoError(io) => Error::io(path, io),
        other => Error::decode(path, other.to_string()),
    })?;
    let img = if flip { img.flipv() } else { img };
    Ok(from_dynamic(img))
}

fn from_dynamic(img: DynamicImage) -> DecodedImage {
    let (width, height) = (img.width(), img.height());
    let channels = img.color().channel_count().clamp(1, 4);

    let pixels = match (img, channels) {
        (DynamicImage::ImageLuma8(buf), _) => buf.into_raw(),
        (DynamicImage::ImageLumaA8(buf), _) => buf.into_raw(),
        (DynamicImage::ImageRgb8(buf), _) => buf.into_raw(),
        (DynamicImage::ImageRgba8(buf), _) => buf.into_raw(),
        (other, 1) => other.into_luma8().into_raw(),
        (other, 2) => other.into_luma_alpha8().into_raw(),
        (other, 3) => other.into_rgb8().into_raw(),
        (other, _) => other.into_rgba8().into_raw(),
    };

    DecodedImage {
        width,
        height,
        channels,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_image_keeps_one_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        image::GrayImage::from_raw(2, 2, vec![0, 64, 128, 255])
            .unwrap()
            .save(&path)
            .unwrap();

        let img = decode(&path, false).unwrap();
        assert_eq!((img.width, img.height, img.channels), (2, 2, 1));
        assert_eq!(img.pixels, vec![0, 64, 128, 255]);
    }

    #[test]
    fn flip_reverses_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.png");
        image::GrayImage::from_raw(2, 2, vec![1, 2, 3, 4])
            .unwrap()
            .save(&path)
            .unwrap();

        let img = decode(&path, true).unwrap();
        assert_eq!(img.pixels, vec![3, 4, 1, 2]);
    }

    #[test]
    fn sixteen_bit_rgb_narrows_to_eight() {
        let img = DynamicImage::ImageRgb16(image::ImageBuffer::from_pixel(
            1,
            1,
            image::Rgb([0xFFFFu16, 0, 0x8080]),
        ));
        let out = from_dynamic(img);
        assert_eq!(out.channels, 3);
        assert_eq!(out.pixels, vec![0xFF, 0x00, 0x80]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode(&dir.path().join("nope.png"), true).unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "got {err:?}");
    }

    #[test]
    fn garbage_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = decode(&path, true).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }), "got {err:?}");
    }
}
