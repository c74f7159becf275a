//! Borrowing chart: horizontal bars of borrow counts per category,
//! most borrowed at the top.

use std::path::Path;

use anyhow::{bail, Result};
use plotters::prelude::*;

use crate::report::Language;
use crate::summary::DatasetSummary;

const BAR_COLOR: RGBColor = RGBColor(76, 114, 176);

fn chart_title(language: Language) -> &'static str {
    match language {
        Language::English => "Book Borrowing by Category",
        Language::Indonesian => "Grafik Data Peminjaman Buku",
    }
}

/// Draw `summary.borrows_per_category` as an SVG bar chart at `output_path`.
///
/// Fails when the summary has no categories.
pub fn render_borrow_chart(
    summary: &DatasetSummary,
    output_path: &Path,
    language: Language,
) -> Result<()> {
    let bars = &summary.borrows_per_category;
    if bars.is_empty() {
        bail!("no borrowing records to chart");
    }
    let n = bars.len() as u32;
    let max_count = bars.iter().map(|(_, c)| *c).max().unwrap_or(1) as f64;

    let height = 120 + 28 * n;
    let root = SVGBackend::new(output_path, (900, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(chart_title(language), ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(220)
        .build_cartesian_2d(0f64..(max_count * 1.1), (0u32..n).into_segmented())?;

    // Row 0 is drawn at the top.
    let label_of = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => bars
            .get((n - 1).wrapping_sub(*i) as usize)
            .map(|(category, _)| category.clone())
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    };
    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(bars.len())
        .y_label_formatter(&label_of)
        .x_desc(match language {
            Language::English => "Borrows",
            Language::Indonesian => "Jumlah Peminjaman",
        })
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(row, (_, count))| {
        let slot = n - 1 - row as u32;
        let mut bar = Rectangle::new(
            [
                (0.0, SegmentValue::Exact(slot)),
                (*count as f64, SegmentValue::Exact(slot + 1)),
            ],
            BAR_COLOR.filled(),
        );
        bar.set_margin(3, 3, 0, 0);
        bar
    }))?;

    root.present()?;
    Ok(())
}
