// File: crates/chartmesh-render-skia/src/lib.rs
// Summary: Skia backend; rasterizes a laid-out chart to PNG or RGBA buffers on a CPU surface.

use anyhow::Result;
use chartmesh_core::{Chart, FixedAdvanceText, TextHost};
use skia_safe as skia;

pub mod sink;
pub mod text;

pub use sink::SkiaSink;
pub use text::{SkiaText, TextShaper};

#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Shape and paint text; when off, labels are laid out with fixed advances and not painted.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { draw_labels: true }
    }
}

fn render_surface(chart: &Chart, opts: &RenderOptions) -> Result<skia::Surface> {
    let size = chart.size();
    let (w, h) = (size.width.round().max(1.0) as i32, size.height.round().max(1.0) as i32);
    let mut surface = skia::surfaces::raster_n32_premul((w, h))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    let canvas = surface.canvas();
    canvas.clear(sink::to_skia(chart.theme().background));

    let mut sink = SkiaSink::new(canvas, size.height);
    let shaper;
    let mut fixed = FixedAdvanceText::default();
    let mut skia_text;
    let text: &mut dyn TextHost = if opts.draw_labels {
        shaper = TextShaper::new();
        skia_text = SkiaText::new(&shaper, canvas, size.height);
        &mut skia_text
    } else {
        &mut fixed
    };

    let outcomes = chart.draw(&mut sink, text);
    let skipped = outcomes.iter().filter(|(_, o)| !o.is_drawn()).count();
    if skipped > 0 {
        log::debug!("rendered {} components, {skipped} skipped", outcomes.len());
    }
    Ok(surface)
}

/// Render to encoded PNG bytes.
pub fn render_to_png_bytes(chart: &Chart, opts: &RenderOptions) -> Result<Vec<u8>> {
    let mut surface = render_surface(chart, opts)?;
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
pub fn render_to_png(chart: &Chart, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
    let bytes = render_to_png_bytes(chart, opts)?;
    if let Some(parent) = output_png_path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_png_path, bytes)?;
    Ok(())
}

/// Render to unpremultiplied RGBA8 pixels; returns (pixels, width, height, row stride in bytes).
pub fn render_to_rgba8(chart: &Chart, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
    let mut surface = render_surface(chart, opts)?;
    let (w, h) = (surface.width(), surface.height());
    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let stride = w as usize * 4;
    let mut pixels = vec![0u8; stride * h as usize];
    if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
        anyhow::bail!("read_pixels failed");
    }
    Ok((pixels, w as u32, h as u32, stride))
}
