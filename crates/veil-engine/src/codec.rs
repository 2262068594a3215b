//! Image decode/encode helpers

use crate::{EngineError, Result};
use image::{ImageFormat, ImageReader, RgbImage};
use std::io::Cursor;

/// A decoded upload, alpha dropped
pub struct Decoded {
    pub image: RgbImage,
    pub format: ImageFormat,
}

pub fn decode(bytes: &[u8]) -> Result<Decoded> {
    if bytes.is_empty() {
        return Err(EngineError::Decode("empty upload".to_string()));
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| EngineError::Decode(e.to_string()))?;
    let format = reader
        .format()
        .ok_or_else(|| EngineError::Decode("unrecognized image format".to_string()))?;
    let image = reader
        .decode()
        .map_err(|e| EngineError::Decode(e.to_string()))?;

    Ok(Decoded {
        image: image.to_rgb8(),
        format,
    })
}

/// Keep the upload's format when we can write it as RGB, PNG otherwise
pub fn output_format(input: ImageFormat) -> ImageFormat {
    match input {
        ImageFormat::Png
        | ImageFormat::Jpeg
        | ImageFormat::Bmp
        | ImageFormat::Tiff
        | ImageFormat::WebP => input,
        _ => ImageFormat::Png,
    }
}

pub fn encode(image: &RgbImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, format)?;
    Ok(buf.into_inner())
}

/// Extension for an output file. The upload's own extension wins if it names the same format.
pub fn extension_for(format: ImageFormat, upload_ext: Option<&str>) -> String {
    if let Some(ext) = upload_ext
        && ImageFormat::from_extension(ext) == Some(format)
    {
        return ext.to_string();
    }
    format
        .extensions_str()
        .first()
        .copied()
        .unwrap_or("png")
        .to_string()
}
