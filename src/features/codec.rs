use crate::error::{CoreError, CoreResult};
use image::{
    codecs::png::PngEncoder, imageops, imageops::FilterType, ColorType, GrayImage, ImageEncoder,
    Luma,
};
use rxing::common::HybridBinarizer;
use rxing::{
    BarcodeFormat, BinaryBitmap, DecodeHintValue, DecodeHints, Exceptions, Luma8LuminanceSource,
    MultiFormatReader, MultiFormatWriter, Reader, Writer,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Barcode standards the app reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbology {
    QrCode,
    Ean13,
    Aztec,
    DataMatrix,
    Code39,
}

impl Symbology {
    fn to_rxing(self) -> BarcodeFormat {
        match self {
            Symbology::QrCode => BarcodeFormat::QR_CODE,
            Symbology::Ean13 => BarcodeFormat::EAN_13,
            Symbology::Aztec => BarcodeFormat::AZTEC,
            Symbology::DataMatrix => BarcodeFormat::DATA_MATRIX,
            Symbology::Code39 => BarcodeFormat::CODE_39,
        }
    }
}

/// Reads a symbol out of a grayscale image.
///
/// `Ok(None)` means the image was readable but holds no recognizable code.
pub trait CodeDecoder: Send + Sync {
    fn decode(
        &self,
        image: &GrayImage,
        formats: &[Symbology],
        try_harder: bool,
    ) -> CoreResult<Option<String>>;
}

/// Renders text as a barcode bitmap of (at least) the requested size.
pub trait CodeEncoder: Send + Sync {
    fn encode(
        &self,
        text: &str,
        symbology: Symbology,
        width: u32,
        height: u32,
    ) -> CoreResult<GrayImage>;
}

/// rxing-backed decoder and encoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct RxingCodec;

impl CodeDecoder for RxingCodec {
    fn decode(
        &self,
        image: &GrayImage,
        formats: &[Symbology],
        try_harder: bool,
    ) -> CoreResult<Option<String>> {
        if image.width() == 0 || image.height() == 0 {
            return Ok(None);
        }
        let mut hints = DecodeHints::default().with(DecodeHintValue::TryHarder(try_harder));
        if !formats.is_empty() {
            let possible: HashSet<BarcodeFormat> = formats.iter().map(|f| f.to_rxing()).collect();
            hints = hints.with(DecodeHintValue::PossibleFormats(possible));
        }

        let source =
            Luma8LuminanceSource::new(image.as_raw().clone(), image.width(), image.height());
        let mut bitmap = BinaryBitmap::new(HybridBinarizer::new(source));
        let mut reader = MultiFormatReader::default();

        match reader.decode_with_hints(&mut bitmap, &hints) {
            Ok(result) => Ok(Some(result.getText().to_string())),
            Err(e) => decode_failure(e),
        }
    }
}

fn decode_failure(e: Exceptions) -> CoreResult<Option<String>> {
    match e {
        // Nothing readable: not an error, the caller turns it into state.
        Exceptions::NotFoundException(_)
        | Exceptions::ChecksumException(_)
        | Exceptions::FormatException(_) => Ok(None),
        other => Err(CoreError::Decode(other.to_string())),
    }
}

impl CodeEncoder for RxingCodec {
    fn encode(
        &self,
        text: &str,
        symbology: Symbology,
        width: u32,
        height: u32,
    ) -> CoreResult<GrayImage> {
        let width = i32::try_from(width).map_err(|_| CoreError::Encode("width_too_large".into()))?;
        let height =
            i32::try_from(height).map_err(|_| CoreError::Encode("height_too_large".into()))?;
        let matrix = MultiFormatWriter::default()
            .encode(text, &symbology.to_rxing(), width, height)
            .map_err(|e| CoreError::Encode(e.to_string()))?;

        let (w, h) = (matrix.getWidth(), matrix.getHeight());
        Ok(GrayImage::from_fn(w, h, |x, y| {
            if matrix.get(x, y) {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        }))
    }
}

/// Bounds decode work: when both sides exceed `cap`, scale so the longer side
/// is exactly `cap`, keeping the aspect ratio.
pub fn constrain_dimensions(width: u32, height: u32, cap: u32) -> (u32, u32) {
    if width <= cap || height <= cap {
        return (width, height);
    }
    if width >= height {
        let scaled = (u64::from(height) * u64::from(cap) / u64::from(width)) as u32;
        (cap, scaled.max(1))
    } else {
        let scaled = (u64::from(width) * u64::from(cap) / u64::from(height)) as u32;
        (scaled.max(1), cap)
    }
}

/// Converts packed ARGB pixels (Android `Bitmap.getPixels` layout) to luminance.
pub fn argb_to_gray(pixels: &[u32], width: u32, height: u32) -> CoreResult<GrayImage> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| CoreError::InvalidBuffer("dimensions_overflow".into()))?;
    if expected == 0 || pixels.len() != expected {
        return Err(CoreError::InvalidBuffer(format!(
            "expected {expected} pixels, got {}",
            pixels.len()
        )));
    }
    let luma: Vec<u8> = pixels
        .iter()
        .map(|&argb| {
            let r = (argb >> 16) & 0xFF;
            let g = (argb >> 8) & 0xFF;
            let b = argb & 0xFF;
            // green counts double, matching the usual luminance source weighting
            ((r + 2 * g + b) / 4) as u8
        })
        .collect();
    GrayImage::from_raw(width, height, luma)
        .ok_or_else(|| CoreError::InvalidBuffer("gray_from_raw".into()))
}

/// ARGB buffer → grayscale image no larger than `cap` on its longer side.
pub fn prepare_argb(pixels: &[u32], width: u32, height: u32, cap: u32) -> CoreResult<GrayImage> {
    let gray = argb_to_gray(pixels, width, height)?;
    let (w, h) = constrain_dimensions(width, height, cap);
    if (w, h) == (width, height) {
        Ok(gray)
    } else {
        Ok(imageops::resize(&gray, w, h, FilterType::Triangle))
    }
}

/// Decodes an encoded image file (PNG, JPEG, WebP) into packed ARGB pixels.
pub fn image_to_argb(bytes: &[u8]) -> CoreResult<(Vec<u32>, u32, u32)> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels = rgba
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
        })
        .collect();
    Ok((pixels, width, height))
}

/// Copies a camera Y plane into a tight grayscale image, honouring the row
/// stride, then applies the clockwise sensor rotation.
pub fn luma_from_plane(
    data: &[u8],
    width: u32,
    height: u32,
    row_stride: u32,
    rotation_deg: u16,
) -> CoreResult<GrayImage> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidBuffer("empty_frame".into()));
    }
    let stride = (if row_stride == 0 { width } else { row_stride }) as usize;
    if stride < width as usize {
        return Err(CoreError::InvalidBuffer("stride_smaller_than_width".into()));
    }
    let needed = stride * (height as usize - 1) + width as usize;
    if data.len() < needed {
        return Err(CoreError::InvalidBuffer(format!(
            "expected at least {needed} bytes, got {}",
            data.len()
        )));
    }

    let mut tight = Vec::with_capacity(width as usize * height as usize);
    for row in data.chunks(stride).take(height as usize) {
        tight.extend_from_slice(&row[..width as usize]);
    }
    let gray = GrayImage::from_raw(width, height, tight)
        .ok_or_else(|| CoreError::InvalidBuffer("gray_from_raw".into()))?;

    Ok(match rotation_deg % 360 {
        90 => imageops::rotate90(&gray),
        180 => imageops::rotate180(&gray),
        270 => imageops::rotate270(&gray),
        _ => gray,
    })
}

pub fn encode_png(image: &GrayImage) -> CoreResult<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::L8,
    )?;
    Ok(buf)
}
