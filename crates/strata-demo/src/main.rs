// File: crates/strata-demo/src/main.rs
// Summary: Demo loads a multi-series CSV (first column x, one column per series) and renders
//          stacked-area, line and bar PNGs through the Skia backend.
//
// Usage: strata-demo [CSV] [--offset zero|expand|silhouette|wiggle] [--window MIN:MAX]
//                    [--palette dark|light|solarized]

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use strata_core::{palette, Graph, GraphArgs, Palette, Series, SeriesCollection, Window};
use strata_render_skia::SkiaHost;
use tracing_subscriber::EnvFilter;

struct Options {
    input: Option<PathBuf>,
    offset: String,
    window: Window,
    palette: Palette,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let opts = parse_args(std::env::args().skip(1))?;

    let (series, stem) = match &opts.input {
        Some(path) => {
            let series = load_series_csv(path)
                .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("chart").to_string();
            (series, stem)
        }
        None => {
            tracing::info!("no input file given; using synthetic series");
            (synthetic_series(3, 48), "synthetic".to_string())
        }
    };
    tracing::info!(series = series.len(), "loaded series");

    for renderer in ["stack", "line", "bar"] {
        let args = GraphArgs::new(series.clone())
            .with_size(800, 400)
            .with_renderer(renderer)
            .with_offset(opts.offset.as_str())
            .with_palette(opts.palette.clone());
        let mut graph = Graph::new(&mut SkiaHost::new(), args)?;
        graph.set_window(opts.window);
        graph.on_update(move || tracing::debug!(renderer, "frame ready"));
        graph.render()?;

        let domain = graph.domain();
        tracing::info!(renderer, x = ?domain.x, y = ?domain.y, "rendered");

        let out = out_name_with(&stem, renderer);
        graph.surface_mut().write_png(&out)?;
        println!("Wrote {}", out.display());
    }
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options> {
    let mut opts = Options {
        input: None,
        offset: "zero".to_string(),
        window: Window::unbounded(),
        palette: Palette::default(),
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--offset" => opts.offset = args.next().context("--offset needs a value")?,
            "--window" => {
                let spec = args.next().context("--window needs MIN:MAX")?;
                opts.window = parse_window(&spec)?;
            }
            "--palette" => {
                let name = args.next().context("--palette needs a name")?;
                opts.palette = palette::presets()
                    .into_iter()
                    .find(|p| p.name == name)
                    .with_context(|| format!("unknown palette {name:?}"))?;
            }
            _ if opts.input.is_none() => opts.input = Some(PathBuf::from(arg)),
            other => anyhow::bail!("unexpected argument: {other}"),
        }
    }
    Ok(opts)
}

/// `MIN:MAX`, either side may be empty.
fn parse_window(spec: &str) -> Result<Window> {
    let (min, max) = spec.split_once(':').context("window must look like MIN:MAX")?;
    let bound = |s: &str| -> Result<Option<f64>> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        Ok(Some(parse_x(s).with_context(|| format!("bad window bound {s:?}"))?))
    };
    Ok(Window::new(bound(min)?, bound(max)?))
}

/// Produce output file name like target/out/strata_<stem>_<renderer>.png
fn out_name_with(stem: &str, renderer: &str) -> PathBuf {
    let mut out = PathBuf::from("target/out");
    out.push(format!("strata_{stem}_{renderer}.png"));
    out
}

/// Load a CSV whose first column is x and every other column is one series.
/// Missing or unparseable cells are left out and the series are zero-filled afterwards.
fn load_series_csv(path: &Path) -> Result<Vec<Series>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.clone();
    tracing::debug!(?headers, "csv headers");
    if headers.len() < 2 {
        anyhow::bail!("need an x column and at least one series column, got {} columns", headers.len());
    }

    let mut series: Vec<Series> = headers.iter().skip(1).map(|h| Series::new(h.trim())).collect();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let Some(x) = rec.get(0).and_then(parse_x) else {
            tracing::warn!(row, "skipping row with unparseable x");
            continue;
        };
        for (s, cell) in series.iter_mut().zip(rec.iter().skip(1)) {
            if let Ok(y) = cell.trim().parse::<f64>() {
                s.push(x, y);
            }
        }
    }

    let mut collection = SeriesCollection::new(series);
    collection.zero_fill()?;
    Ok(collection.iter().cloned().collect())
}

/// x as seconds: epoch seconds/millis, RFC 3339 timestamps, or `YYYY-MM-DD` dates.
fn parse_x(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        if n > 10_i64.pow(12) {
            return Some(n as f64 / 1000.0);
        } // epoch ms -> sec
        return Some(n as f64);
    }
    if let Ok(v) = s.parse::<f64>() {
        return Some(v);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp() as f64);
    }
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp() as f64)
}

fn synthetic_series(layers: usize, n: usize) -> Vec<Series> {
    (0..layers)
        .map(|l| {
            let data = (0..n)
                .map(|i| {
                    let x = i as f64;
                    (x, ((x / 6.0) + l as f64).sin().abs() * 10.0 + 2.0)
                })
                .collect();
            Series::with_data(format!("series {l}"), data)
        })
        .collect()
}
