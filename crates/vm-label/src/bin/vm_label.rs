use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use image::{Rgb, RgbImage};
use log::info;
use serde::Serialize;
use vm_blob::{BlobConfig, BlobLabeling, Contour, LabelCell, LabelGrid, find_blobs};
use vm_core::{Image, Rect};

const PALETTE: [[u8; 3]; 8] = [
    [0xff, 0x00, 0x00],
    [0x00, 0xff, 0x00],
    [0xff, 0xff, 0x00],
    [0x00, 0x00, 0xff],
    [0xff, 0x00, 0xff],
    [0x00, 0xff, 0xff],
    [0xff, 0xff, 0xff],
    [0x7f, 0x00, 0x7f],
];

#[derive(Parser, Debug)]
#[command(name = "vm_label")]
#[command(about = "Label the blobs of a thresholded image and dump their contours")]
struct Cli {
    /// Input image, any format the `image` crate decodes.
    input: PathBuf,
    /// Output label image (PNG).
    output: PathBuf,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    roi_x: i32,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    roi_y: i32,
    /// ROI width; defaults to the image width.
    #[arg(long, allow_negative_numbers = true)]
    roi_w: Option<i32>,
    /// ROI height; defaults to the image height.
    #[arg(long, allow_negative_numbers = true)]
    roi_h: Option<i32>,
    /// Pixels with luma at or above this value are foreground.
    #[arg(long, default_value_t = 128)]
    threshold: u8,
    #[arg(long, default_value = "blob.json")]
    json: PathBuf,
    /// GNUplot data, plot with `plot "blob.plot" lc variable with lines`.
    #[arg(long, default_value = "blob.plot")]
    plot: PathBuf,
    /// Count holes without storing their contours.
    #[arg(long)]
    holes_count_only: bool,
}

#[derive(Debug, Clone, Serialize)]
struct BlobDto {
    label: u32,
    external: Vec<[i16; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    internals: Option<Vec<Vec<[i16; 2]>>>,
    euler_number: usize,
}

#[derive(Debug, Clone, Serialize)]
struct BlobsDto {
    blobs: Vec<BlobDto>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let img = load_binary_mask(&cli.input, cli.threshold)?;
    let roi = roi_from_args(&cli, img.width(), img.height())?;
    let cfg = BlobConfig {
        extract_internal: !cli.holes_count_only,
    };

    let res = find_blobs(&img.as_view(), roi, &cfg)
        .with_context(|| format!("labeling {}", cli.input.display()))?;
    info!(
        "{}: {} blobs, {} holes",
        cli.input.display(),
        res.num_blobs(),
        res.blobs.total_holes()
    );

    render_labels(&res.labels)
        .save(&cli.output)
        .with_context(|| format!("saving label image {}", cli.output.display()))?;
    write_json(&cli.json, &blobs_dto(&res, cfg.extract_internal))?;
    write_plot_file(&cli.plot, &res)?;

    Ok(())
}

fn roi_from_args(cli: &Cli, width: usize, height: usize) -> Result<Rect> {
    let roi_w = match cli.roi_w {
        Some(w) => w,
        None => i32::try_from(width)
            .with_context(|| format!("image width {width} does not fit a ROI rectangle"))?,
    };
    let roi_h = match cli.roi_h {
        Some(h) => h,
        None => i32::try_from(height)
            .with_context(|| format!("image height {height} does not fit a ROI rectangle"))?,
    };

    Ok(Rect::new(cli.roi_x, cli.roi_y, roi_w, roi_h))
}

fn load_binary_mask(path: &Path, threshold: u8) -> Result<Image<u8>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    let data = luma
        .into_raw()
        .into_iter()
        .map(|v| u8::from(v >= threshold))
        .collect();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing vm-core image from {}", path.display()))
}

fn render_labels(labels: &LabelGrid) -> RgbImage {
    RgbImage::from_fn(labels.width() as u32, labels.height() as u32, |x, y| {
        match labels.get(x as usize, y as usize) {
            Some(LabelCell::Blob(l)) if l > 0 => Rgb(PALETTE[(l as usize - 1) % PALETTE.len()]),
            _ => Rgb([0, 0, 0]),
        }
    })
}

fn contour_points(c: &Contour) -> Vec<[i16; 2]> {
    c.iter().map(|p| [p.x, p.y]).collect()
}

fn blobs_dto(res: &BlobLabeling, with_internals: bool) -> BlobsDto {
    let blobs = res
        .blobs
        .iter()
        .map(|b| BlobDto {
            label: b.label,
            external: contour_points(&b.external),
            internals: with_internals.then(|| b.internal.iter().map(contour_points).collect()),
            euler_number: b.euler_number(),
        })
        .collect();

    BlobsDto { blobs }
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn write_plot_file(path: &Path, res: &BlobLabeling) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_plot(&mut out, res).with_context(|| format!("writing plot {}", path.display()))?;
    out.flush()
        .with_context(|| format!("flushing plot {}", path.display()))
}

/// One `x y tag` row per contour point; tag `2 * label` for the external
/// contour, `2 * label + 1` for holes. Contours are separated by a blank line.
fn write_plot(out: &mut impl Write, res: &BlobLabeling) -> std::io::Result<()> {
    for blob in &res.blobs {
        let tag = 2 * u64::from(blob.label);
        write_contour(out, &blob.external, tag)?;
        for hole in &blob.internal {
            write_contour(out, hole, tag + 1)?;
        }
    }
    Ok(())
}

fn write_contour(out: &mut impl Write, contour: &Contour, tag: u64) -> std::io::Result<()> {
    for p in contour.iter() {
        writeln!(out, "{:5}    {:5}    {:5}", p.x, p.y, tag)?;
    }
    writeln!(out)
}
