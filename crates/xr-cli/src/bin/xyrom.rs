use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use image::{GrayImage, Luma, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;
use xyrom::{
    DacPoint, Image, Mask, MemFiles, NeighborSearch, SampleOrder, Trace, XyConfig, hex_width,
    trace_mask, write_xy_mem,
};

/// Cell size used when `--search grid` is given without `--grid-cell`.
const DEFAULT_GRID_CELL: usize = 16;
/// Side of the square sample plots, in pixels.
const PLOT_SIZE: u32 = 512;

#[derive(Parser, Debug)]
#[command(name = "xyrom")]
#[command(about = "Convert a raster image into X/Y DAC sample ROM files")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write `<prefix>x.mem` and `<prefix>y.mem`.
    #[command(name = "convert")]
    Convert(ConvertArgs),
    /// Write mask and sample plots as PNG.
    #[command(name = "preview")]
    Preview(PreviewArgs),
}

#[derive(Args, Debug, Clone)]
struct ConvertArgs {
    #[arg(long, default_value = "image.png")]
    input: PathBuf,
    /// Output file prefix; files are `<prefix>x.mem` and `<prefix>y.mem`.
    #[arg(long, default_value = "image")]
    prefix: String,
    /// Also write a JSON run summary here.
    #[arg(long)]
    meta: Option<PathBuf>,
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Args, Debug, Clone)]
struct PreviewArgs {
    #[arg(long, default_value = "image.png")]
    input: PathBuf,
    #[arg(long, default_value = "preview")]
    out: PathBuf,
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    /// JSON file with config fields; flags given here win over it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    bits: Option<u8>,
    #[arg(long)]
    threshold: Option<u8>,
    #[arg(long)]
    margin: Option<u32>,
    /// Keep image row 0 at the bottom of the code range.
    #[arg(long)]
    no_flip_y: bool,
    #[arg(long)]
    stride: Option<usize>,
    #[arg(long, value_enum)]
    order: Option<OrderArg>,
    #[arg(long, value_enum)]
    search: Option<SearchArg>,
    /// Bucket size for grid search; implies `--search grid`.
    #[arg(long)]
    grid_cell: Option<usize>,
    #[arg(long)]
    min_component_size: Option<usize>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum OrderArg {
    Nearest,
    Raster,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SearchArg {
    Exhaustive,
    Grid,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    bits: Option<u8>,
    threshold: Option<u8>,
    margin: Option<u32>,
    flip_y: Option<bool>,
    stride: Option<usize>,
    order: Option<OrderArg>,
    search: Option<SearchArg>,
    grid_cell: Option<usize>,
    min_component_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaConvert {
    input: String,
    width: usize,
    height: usize,
    foreground: usize,
    components: usize,
    samples: usize,
    collapsed: usize,
    bridge_samples: usize,
    decimated: usize,
    bits: u8,
    hex_width: usize,
    code_range: [u32; 2],
    margin: u32,
    flip_y: bool,
    stride: usize,
    order: &'static str,
    search: String,
    x_mem: String,
    y_mem: String,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Convert(args) => run_convert(args),
        Command::Preview(args) => run_preview(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let cfg = args.config.resolve()?;
    let (_, trace) = load_and_trace(&args.input, &cfg)?;

    let files = MemFiles::for_prefix(&args.prefix);
    write_xy_mem(&files, &trace.decimated, cfg.bits).with_context(|| {
        format!(
            "writing mem files {}, {}",
            files.x.display(),
            files.y.display()
        )
    })?;

    if let Some(meta) = &args.meta {
        write_json(meta, &meta_convert(&args.input, &cfg, &trace, &files))?;
    }

    println!("Done. Samples: {}", trace.decimated.len());
    println!("Wrote: {}, {}", files.x.display(), files.y.display());
    Ok(())
}

fn run_preview(args: PreviewArgs) -> Result<()> {
    let cfg = args.config.resolve()?;
    let (mask, trace) = load_and_trace(&args.input, &cfg)?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;

    let dac_max = cfg.dac_max();
    let outputs = [
        ("mask.png", None),
        ("samples.png", Some(render_samples(&trace, dac_max, false))),
        (
            "samples_decimated.png",
            Some(render_samples(&trace, dac_max, true)),
        ),
    ];
    for (name, plot) in outputs {
        let path = args.out.join(name);
        match plot {
            None => render_mask(&mask).save(&path),
            Some(rgb) => rgb.save(&path),
        }
        .with_context(|| format!("saving image {}", path.display()))?;
        info!(path = %path.display(), "wrote preview");
    }

    println!("Done. Samples: {}", trace.decimated.len());
    println!("Wrote: {}", args.out.display());
    Ok(())
}

impl ConfigArgs {
    /// Defaults, then the JSON file, then flags.
    fn resolve(&self) -> Result<XyConfig> {
        let file = match &self.config {
            Some(path) => read_json::<ConfigFile>(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => ConfigFile::default(),
        };

        let mut cfg = XyConfig::default();
        if let Some(v) = self.bits.or(file.bits) {
            cfg.bits = v;
        }
        if let Some(v) = self.threshold.or(file.threshold) {
            cfg.threshold = v;
        }
        if let Some(v) = self.margin.or(file.margin) {
            cfg.margin = v;
        }
        if self.no_flip_y {
            cfg.flip_y = false;
        } else if let Some(v) = file.flip_y {
            cfg.flip_y = v;
        }
        if let Some(v) = self.stride.or(file.stride) {
            cfg.stride = v;
        }
        if let Some(v) = self.min_component_size.or(file.min_component_size) {
            cfg.min_component_size = v;
        }
        if let Some(order) = self.order.or(file.order) {
            cfg.order = match order {
                OrderArg::Nearest => SampleOrder::NearestNeighbor,
                OrderArg::Raster => SampleOrder::Raster,
            };
        }

        let cell = self.grid_cell.or(file.grid_cell);
        cfg.search = match self.search.or(file.search) {
            Some(SearchArg::Exhaustive) => NeighborSearch::Exhaustive,
            Some(SearchArg::Grid) => NeighborSearch::Grid {
                cell: cell.unwrap_or(DEFAULT_GRID_CELL),
            },
            None => cell.map_or(cfg.search, |cell| NeighborSearch::Grid { cell }),
        };

        cfg.validate().context("invalid configuration")?;
        Ok(cfg)
    }
}

fn load_and_trace(path: &Path, cfg: &XyConfig) -> Result<(Mask, Trace)> {
    ensure_file_exists(path, "input")?;
    let luma = load_input_u8(path)?;
    let mask = Mask::from_luma(&luma.as_view(), cfg.threshold);
    let trace =
        trace_mask(&mask, cfg).with_context(|| format!("tracing {}", path.display()))?;
    Ok((mask, trace))
}

fn load_input_u8(path: &Path) -> Result<Image<u8>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    let data = luma.into_raw();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing luma image from {}", path.display()))
}

fn meta_convert(input: &Path, cfg: &XyConfig, trace: &Trace, files: &MemFiles) -> MetaConvert {
    MetaConvert {
        input: input.display().to_string(),
        width: trace.width,
        height: trace.height,
        foreground: trace.foreground,
        components: trace.components,
        samples: trace.stream.len(),
        collapsed: trace.collapsed,
        bridge_samples: trace.bridge_count(),
        decimated: trace.decimated.len(),
        bits: cfg.bits,
        hex_width: hex_width(cfg.bits),
        code_range: [trace.dst_range.0, trace.dst_range.1],
        margin: cfg.margin,
        flip_y: cfg.flip_y,
        stride: cfg.stride,
        order: match cfg.order {
            SampleOrder::NearestNeighbor => "nearest",
            SampleOrder::Raster => "raster",
        },
        search: match cfg.search {
            NeighborSearch::Exhaustive => "exhaustive".to_string(),
            NeighborSearch::Grid { cell } => format!("grid:{cell}"),
        },
        x_mem: files.x.display().to_string(),
        y_mem: files.y.display().to_string(),
    }
}

/// Foreground black on white, one pixel per mask cell.
fn render_mask(mask: &Mask) -> GrayImage {
    GrayImage::from_fn(mask.width() as u32, mask.height() as u32, |x, y| {
        if mask.is_foreground(x as usize, y as usize) {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

/// Plots samples in code space with y growing upward. Bridge samples are
/// drawn in red on the full stream.
fn render_samples(trace: &Trace, dac_max: u32, decimated: bool) -> RgbImage {
    let mut rgb = RgbImage::from_pixel(PLOT_SIZE, PLOT_SIZE, Rgb([255, 255, 255]));
    let scale = f64::from(PLOT_SIZE - 1) / f64::from(dac_max.max(1));
    let to_plot = |p: DacPoint| {
        let x = f64::from(p.x) * scale;
        let y = f64::from(PLOT_SIZE - 1) - f64::from(p.y) * scale;
        (x as f32, y as f32)
    };

    if decimated {
        for &p in trace.decimated.points() {
            let (x, y) = to_plot(p);
            draw_dot(&mut rgb, x, y, Rgb([0, 0, 0]));
        }
        return rgb;
    }

    let mut spans = trace.spans.iter().peekable();
    for (i, &p) in trace.stream.points().iter().enumerate() {
        while spans.next_if(|s| s.end <= i).is_some() {}
        let in_path = spans.peek().is_some_and(|s| s.contains(&i));
        let color = if in_path {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 64, 64])
        };
        let (x, y) = to_plot(p);
        draw_dot(&mut rgb, x, y, color);
    }
    rgb
}

fn draw_dot(img: &mut RgbImage, x: f32, y: f32, color: Rgb<u8>) {
    let xi = x.round() as i32;
    let yi = y.round() as i32;

    for dy in -1..=1 {
        for dx in -1..=1 {
            let nx = xi + dx;
            let ny = yi + dy;
            if nx < 0 || ny < 0 {
                continue;
            }
            let (ux, uy) = (nx as u32, ny as u32);
            if ux >= img.width() || uy >= img.height() {
                continue;
            }
            img.put_pixel(ux, uy, color);
        }
    }
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
