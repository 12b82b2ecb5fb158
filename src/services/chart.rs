//! Chart rendering: candles with EMA overlays and levels, plus RSI and MACD
//! panels, written as a PNG per instrument.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use crate::error::{Error, Result};
use crate::models::indicators::{FeatureRow, Levels};

pub trait ChartRenderer: Send + Sync {
    /// Render `rows` and `levels` for `symbol`; returns the image path.
    fn render(&self, symbol: &str, rows: &[FeatureRow], levels: &Levels) -> Result<PathBuf>;
}

pub mod colors {
    use image::Rgb;

    pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
    pub const GRID: Rgb<u8> = Rgb([225, 225, 225]);
    pub const BULLISH: Rgb<u8> = Rgb([0, 150, 70]);
    pub const BEARISH: Rgb<u8> = Rgb([210, 40, 40]);
    pub const EMA_FAST: Rgb<u8> = Rgb([33, 100, 243]);
    pub const EMA_SLOW: Rgb<u8> = Rgb([255, 152, 0]);
    pub const SUPPORT: Rgb<u8> = Rgb([0, 170, 0]);
    pub const RESISTANCE: Rgb<u8> = Rgb([200, 0, 0]);
    pub const RSI: Rgb<u8> = Rgb([128, 0, 128]);
    pub const MACD: Rgb<u8> = Rgb([0, 128, 0]);
    pub const MACD_SIGNAL: Rgb<u8> = Rgb([220, 0, 0]);
}

/// File name for an instrument's chart: `BTC/USDT` -> `BTC_USDT.png`.
pub fn chart_file_name(symbol: &str) -> String {
    format!("{}.png", symbol.replace('/', "_"))
}

#[derive(Debug, Clone)]
pub struct PngChartRenderer {
    dir: PathBuf,
    width: u32,
    height: u32,
}

/// Vertical extent of one panel and the value range mapped onto it.
struct Panel {
    top: u32,
    bottom: u32,
    min: f64,
    max: f64,
}

impl Panel {
    fn new(top: u32, bottom: u32, values: impl Iterator<Item = f64>) -> Self {
        let (mut min, mut max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !min.is_finite() || !max.is_finite() {
            min = 0.0;
            max = 1.0;
        }
        if (max - min).abs() < f64::EPSILON {
            min -= 1.0;
            max += 1.0;
        }
        Self {
            top,
            bottom,
            min,
            max,
        }
    }

    fn y(&self, value: f64) -> i64 {
        let span = (self.bottom - self.top) as f64;
        let ratio = (value - self.min) / (self.max - self.min);
        self.bottom as i64 - (ratio * span).round() as i64
    }
}

impl PngChartRenderer {
    /// Renderer writing into `dir`, created if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            width: 1200,
            height: 900,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn draw(&self, rows: &[FeatureRow], levels: &Levels) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.width, self.height, colors::BACKGROUND);
        if rows.is_empty() {
            return img;
        }

        let margin = 10u32;
        let price_bottom = self.height * 6 / 10;
        let rsi_top = price_bottom + margin * 2;
        let rsi_bottom = self.height * 78 / 100;
        let macd_top = rsi_bottom + margin * 2;
        let macd_bottom = self.height - margin;

        let price_values = rows
            .iter()
            .flat_map(|r| [r.candle.high, r.candle.low])
            .chain(levels.supports.iter().copied())
            .chain(levels.resistances.iter().copied());
        let price = Panel::new(margin, price_bottom, price_values);
        let rsi = Panel {
            top: rsi_top,
            bottom: rsi_bottom,
            min: 0.0,
            max: 100.0,
        };
        let macd = Panel::new(
            macd_top,
            macd_bottom,
            rows.iter()
                .flat_map(|r| [r.features.macd, r.features.macd_signal, 0.0]),
        );

        let plot_width = (self.width - 2 * margin) as f64;
        let step = plot_width / rows.len() as f64;
        let x_at = |i: usize| (margin as f64 + step * (i as f64 + 0.5)).round() as i64;
        let body_half = ((step * 0.35).floor() as i64).max(1);

        for panel in [&price, &rsi, &macd] {
            draw_hline(&mut img, panel.top as i64, colors::GRID);
            draw_hline(&mut img, panel.bottom as i64, colors::GRID);
        }
        draw_hline(&mut img, rsi.y(70.0), colors::GRID);
        draw_hline(&mut img, rsi.y(30.0), colors::GRID);
        draw_hline(&mut img, macd.y(0.0), colors::GRID);

        for level in &levels.supports {
            draw_dashed_hline(&mut img, price.y(*level), colors::SUPPORT);
        }
        for level in &levels.resistances {
            draw_dashed_hline(&mut img, price.y(*level), colors::RESISTANCE);
        }

        for (i, row) in rows.iter().enumerate() {
            let c = &row.candle;
            let x = x_at(i);
            let color = if c.close >= c.open {
                colors::BULLISH
            } else {
                colors::BEARISH
            };
            draw_line(&mut img, (x, price.y(c.high)), (x, price.y(c.low)), color);
            let (top, bottom) = (price.y(c.open.max(c.close)), price.y(c.open.min(c.close)));
            fill_rect(&mut img, x - body_half, top, x + body_half, bottom, color);
        }

        for pair in rows.windows(2).enumerate() {
            let (i, w) = pair;
            let (a, b) = (&w[0].features, &w[1].features);
            let (x0, x1) = (x_at(i), x_at(i + 1));
            draw_line(&mut img, (x0, price.y(a.ema12)), (x1, price.y(b.ema12)), colors::EMA_FAST);
            draw_line(&mut img, (x0, price.y(a.ema26)), (x1, price.y(b.ema26)), colors::EMA_SLOW);
            draw_line(&mut img, (x0, rsi.y(a.rsi)), (x1, rsi.y(b.rsi)), colors::RSI);
            draw_line(&mut img, (x0, macd.y(a.macd)), (x1, macd.y(b.macd)), colors::MACD);
            draw_line(
                &mut img,
                (x0, macd.y(a.macd_signal)),
                (x1, macd.y(b.macd_signal)),
                colors::MACD_SIGNAL,
            );
        }

        img
    }
}

impl ChartRenderer for PngChartRenderer {
    fn render(&self, symbol: &str, rows: &[FeatureRow], levels: &Levels) -> Result<PathBuf> {
        let path = self.dir.join(chart_file_name(symbol));
        self.draw(rows, levels)
            .save(&path)
            .map_err(|e| Error::Chart(format!("failed to write {}: {}", path.display(), e)))?;
        Ok(path)
    }
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line between two points, clipped to the image.
fn draw_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x0, mut y0) = from;
    let (x1, y1) = to;
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(img, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

fn fill_rect(img: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    for y in y0.min(y1)..=y0.max(y1) {
        for x in x0.min(x1)..=x0.max(x1) {
            put(img, x, y, color);
        }
    }
}

fn draw_hline(img: &mut RgbImage, y: i64, color: Rgb<u8>) {
    for x in 0..img.width() as i64 {
        put(img, x, y, color);
    }
}

fn draw_dashed_hline(img: &mut RgbImage, y: i64, color: Rgb<u8>) {
    for x in 0..img.width() as i64 {
        if (x / 8) % 2 == 0 {
            put(img, x, y, color);
        }
    }
}
