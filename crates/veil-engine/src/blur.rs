//! Gaussian blur over whole images and regions

use image::RgbImage;
use image::imageops;
use imageproc::filter::separable_filter_equal;
use veil_core::{BlurLevel, Region};

/// Normalized 1D Gaussian with exactly `level.kernel()` taps
fn gaussian_kernel(level: BlurLevel) -> Vec<f32> {
    let (size, _) = level.kernel();
    let sigma = level.sigma();
    let radius = (size / 2) as f32;

    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - radius;
            (-(x * x) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for weight in &mut kernel {
        *weight /= sum;
    }
    kernel
}

pub fn blur_image(image: &RgbImage, level: BlurLevel) -> RgbImage {
    separable_filter_equal(image, &gaussian_kernel(level))
}

/// Replace `region` with a blurred copy of itself. Returns false if the region
/// lies outside the image.
pub fn blur_region(image: &mut RgbImage, region: Region, level: BlurLevel) -> bool {
    let Some(clipped) = region.clip(image.width(), image.height()) else {
        return false;
    };

    let patch = imageops::crop_imm(
        &*image,
        clipped.x as u32,
        clipped.y as u32,
        clipped.width,
        clipped.height,
    )
    .to_image();
    let blurred = blur_image(&patch, level);
    imageops::replace(image, &blurred, clipped.x, clipped.y);
    true
}
