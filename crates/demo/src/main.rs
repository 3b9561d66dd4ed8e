// File: crates/demo/src/main.rs
// Summary: Demo loads a daily CSV (or built-in sample) and renders stacked areas with marks, a ring and a sampled series to PNGs.

use anyhow::{Context, Result};
use chartmesh_core::series::{AreaStyle, Sampling};
use chartmesh_core::{
    Axis, Chart, DataZoom, Label, LabelPosition, MarkArea, MarkAreaData, MarkLine, MarkLineData, MarkType, Point2,
    SampleType, Series, Size, Tooltip, TooltipTrigger,
};
use chartmesh_render_skia::{render_to_png, RenderOptions, TextShaper};
use chrono::{Duration, NaiveDate};
use std::path::{Path, PathBuf};

/// Daily table: one date column followed by one numeric column per series.
struct Table {
    dates: Vec<NaiveDate>,
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

fn main() -> Result<()> {
    env_logger::init();

    let table = match std::env::args().nth(1) {
        Some(raw) => {
            let path = PathBuf::from(&raw);
            load_daily_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?
        }
        None => {
            log::info!("no CSV given, using built-in sample");
            sample_table()?
        }
    };
    if table.dates.is_empty() || table.columns.is_empty() {
        anyhow::bail!("no rows loaded; expected a date column followed by numeric columns");
    }
    log::info!("loaded {} rows x {} series", table.dates.len(), table.columns.len());

    let opts = RenderOptions::default();
    let size = Size::new(1024.0, 640.0);

    // 1) Stacked areas with mark line and mark area
    let mut stacked = stacked_chart(&table, size);
    stacked.set_text_host(Box::new(TextShaper::new()));
    // Park the pointer mid-grid so the axis tooltip shows in the still image.
    stacked.update(0.016, Some(Point2::new(size.width * 0.5, size.height * 0.5)));
    write(&stacked, &opts, "stacked")?;

    // 2) Ring of per-series totals against the largest total
    let mut ring = ring_chart(&table, Size::new(640.0, 640.0));
    ring.set_text_host(Box::new(TextShaper::new()));
    ring.update(0.016, None);
    write(&ring, &opts, "ring")?;

    // 3) Long noisy series, peak-sampled and zoomed to the middle
    let mut sampled = sampled_chart(size)?;
    sampled.set_text_host(Box::new(TextShaper::new()));
    sampled.update(0.016, None);
    write(&sampled, &opts, "sampled")?;

    Ok(())
}

fn stacked_chart(table: &Table, size: Size) -> Chart {
    let labels = table.dates.iter().map(|d| d.format("%m-%d").to_string());
    let x = Axis::category("Day").with_categories(labels);
    let mut chart = Chart::with_grid(size, x, Axis::value("Total"));
    chart.set_tooltip(Tooltip::default().with_trigger(TooltipTrigger::Axis));

    for (name, column) in table.names.iter().zip(&table.columns) {
        let mut s = Series::line(name.as_str(), column.iter().copied()).with_stack("total");
        if let Some(o) = s.line_options_mut() {
            o.area_style = Some(AreaStyle::default());
        }
        chart.add_series(s);
    }

    chart.add_mark_line(MarkLine::new(
        0,
        vec![MarkLineData::stat(MarkType::Max).named("max"), MarkLineData::stat(MarkType::Average).named("avg")],
    ));
    let n = table.dates.len() as f64;
    let mut area = MarkArea::new(0, MarkAreaData::x_value((n * 0.25).floor()), MarkAreaData::x_value((n * 0.5).floor()));
    area.name = "window".to_string();
    chart.add_mark_area(area.with_label(Label { position: LabelPosition::Top, ..Label::default() }));
    chart
}

fn ring_chart(table: &Table, size: Size) -> Chart {
    let totals: Vec<f64> = table.columns.iter().map(|c| c.iter().sum()).collect();
    let max = totals.iter().copied().fold(0.0, f64::max).max(1.0);
    let items = table.names.iter().zip(&totals).map(|(n, t)| (n.as_str(), *t, max));
    let mut chart = Chart::new(size);
    chart.add_series(
        Series::ring("share", items).with_label(Label { formatter: Some("{b}".to_string()), ..Label::default() }),
    );
    chart
}

fn sampled_chart(size: Size) -> Result<Chart> {
    let values = (0..5000).map(|i| {
        let t = i as f64 * 0.01;
        50.0 + 30.0 * t.sin() + 8.0 * (t * 17.0).sin()
    });
    let mut chart = Chart::with_grid(size, Axis::category("Sample"), Axis::new("Value", 0.0, 100.0));
    let sampling = Sampling { kind: SampleType::Peak, sample_dist: 2.0, ..Sampling::default() };
    chart.add_series(Series::line("signal", values).with_sampling(sampling));
    chart.add_data_zoom(DataZoom::new(20.0, 80.0)?);
    Ok(chart)
}

fn write(chart: &Chart, opts: &RenderOptions, suffix: &str) -> Result<()> {
    let out = out_name(suffix);
    render_to_png(chart, opts, &out).with_context(|| format!("rendering {}", out.display()))?;
    println!("Wrote {}", out.display());
    Ok(())
}

/// Produce output file name like target/out/chart_<suffix>.png
fn out_name(suffix: &str) -> PathBuf {
    let mut out = PathBuf::from("target/out");
    out.push(format!("chart_{suffix}.png"));
    out
}

fn sample_table() -> Result<Table> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("sample start date")?;
    let dates: Vec<NaiveDate> = (0..14).map(|i| start + Duration::days(i)).collect();
    let base = [120.0, 132.0, 101.0, 134.0, 90.0, 230.0, 210.0];
    let columns: Vec<Vec<f64>> = (0..3usize)
        .map(|k| (0..dates.len()).map(|i| base[(i + k * 2) % base.len()] * (1.0 + 0.1 * k as f64)).collect())
        .collect();
    Ok(Table { dates, names: vec!["Email".into(), "Ads".into(), "Video".into()], columns })
}

/// Load a CSV whose first column is a date and the rest are series values.
fn load_daily_csv(path: &Path) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect::<Vec<_>>();
    log::debug!("headers: {headers:?}");
    let names: Vec<String> = headers.iter().skip(1).cloned().collect();

    let mut table = Table { dates: Vec::new(), columns: vec![Vec::new(); names.len()], names };
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let Some(date) = rec.get(0).and_then(parse_date) else {
            log::warn!("row {row}: unreadable date, skipped");
            continue;
        };
        table.dates.push(date);
        for (i, column) in table.columns.iter_mut().enumerate() {
            // Missing cells become zero so stacks stay aligned.
            let v = rec.get(i + 1).and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(0.0);
            column.push(v);
        }
    }
    Ok(table)
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
        .ok()
        .or_else(|| {
            // epoch seconds or milliseconds
            let n = s.parse::<i64>().ok()?;
            let secs = if n > 10_i64.pow(12) { n / 1000 } else { n };
            chrono::DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_parse_from_common_forms() {
        let want = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_date("2024-03-05"), want);
        assert_eq!(parse_date("2024/03/05"), want);
        assert_eq!(parse_date("1709596800"), want);
        assert_eq!(parse_date("1709596800000"), want);
        assert_eq!(parse_date("march"), None);
    }

    #[test]
    fn sample_table_is_rectangular() {
        let t = sample_table().expect("sample");
        assert_eq!(t.columns.len(), t.names.len());
        assert!(t.columns.iter().all(|c| c.len() == t.dates.len()));
    }
}
