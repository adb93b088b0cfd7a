use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, FontId, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Plot, PlotPoint, PlotPoints,
    PlotResponse, Points, Polygon, Text,
};

use crate::color;
use crate::data::model::SurveyDataset;
use crate::data::stats::{self, CorrelationMatrix};

// ---------------------------------------------------------------------------
// Bar chart: SME type distribution
// ---------------------------------------------------------------------------

/// Frequency bar chart of `SME_Type`, bars in descending-count order.
pub fn sme_type_bar_chart(ui: &mut Ui, dataset: &SurveyDataset) {
    let counts = stats::value_counts(dataset, "SME_Type");
    if counts.is_empty() {
        ui.label("No SME type values to plot.");
        return;
    }

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (label, n))| {
            Bar::new(i as f64, *n as f64)
                .name(label)
                .width(0.6)
                .fill(color::SKY_BLUE)
        })
        .collect();
    let labels: Vec<String> = counts.iter().map(|(l, _)| l.clone()).collect();

    Plot::new("sme_type_distribution")
        .height(260.0)
        .x_axis_label("SME Type")
        .y_axis_label("Count")
        .x_axis_formatter(category_formatter(labels))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("SME Type Distribution"));
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Annotated heatmap of the Pearson matrix over the metric columns.
/// First metric sits at the top-left; cells are labeled to two decimals on
/// a diverging scale centered at zero.
pub fn correlation_heatmap(ui: &mut Ui, dataset: &SurveyDataset, metric_columns: &[String]) {
    let matrix = CorrelationMatrix::compute(dataset, metric_columns);
    if matrix.is_empty() {
        return;
    }
    let n = matrix.len();

    let x_labels: Vec<String> = matrix.labels.clone();
    // y axis runs bottom-up, so reverse to put the first metric on top.
    let y_labels: Vec<String> = matrix.labels.iter().rev().cloned().collect();

    Plot::new("correlation_heatmap")
        .height((60 * n.max(4)) as f32)
        .data_aspect(1.0)
        .show_grid(false)
        .x_axis_formatter(category_formatter(x_labels))
        .y_axis_formatter(category_formatter(y_labels))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for i in 0..n {
                for j in 0..n {
                    let r = matrix.get(i, j);
                    let cell = color::diverging_color(r);
                    let x = j as f64;
                    let y = (n - 1 - i) as f64;

                    let corners = vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(corners))
                            .fill_color(cell)
                            .stroke(Stroke::new(0.5, Color32::WHITE)),
                    );
                    plot_ui.text(Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(format!("{r:.2}"))
                            .size(11.0)
                            .color(color::annotation_color(cell)),
                    ));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Grouped box plots
// ---------------------------------------------------------------------------

/// Box plot of the selected metric grouped by one categorical column:
/// median, IQR box, 1.5×IQR whiskers, outliers as points. Category tick
/// labels are drawn rotated 45° below the plot.
pub fn grouped_box_plot(
    ui: &mut Ui,
    dataset: &SurveyDataset,
    group_column: &str,
    metric_column: &str,
    hue_offset: f32,
) {
    let groups = stats::grouped_box_stats(dataset, group_column, metric_column);
    if groups.is_empty() {
        ui.label(format!(
            "No numeric {metric_column} values to plot by {group_column}."
        ));
        return;
    }

    let palette = color::generate_palette(groups.len(), hue_offset);
    let mut boxes = Vec::with_capacity(groups.len());
    let mut outliers: Vec<[f64; 2]> = Vec::new();
    for (i, ((label, s), fill)) in groups.iter().zip(&palette).enumerate() {
        let spread = BoxSpread::new(
            s.lower_whisker,
            s.quartile1,
            s.median,
            s.quartile3,
            s.upper_whisker,
        );
        boxes.push(
            BoxElem::new(i as f64, spread)
                .name(label)
                .box_width(0.5)
                .whisker_width(0.25)
                .fill(fill.gamma_multiply(0.5))
                .stroke(Stroke::new(1.5, *fill)),
        );
        outliers.extend(s.outliers.iter().map(|&v| [i as f64, v]));
    }
    let labels: Vec<String> = groups.iter().map(|(l, _)| l.clone()).collect();

    let plot_id = format!("box_{group_column}");
    let response = Plot::new(plot_id)
        .height(280.0)
        .y_axis_label(metric_column)
        // Ticks stay blank here; rotated labels are painted below the plot.
        .x_axis_formatter(|_mark: GridMark, _range: &RangeInclusive<f64>| String::new())
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
            if !outliers.is_empty() {
                plot_ui.points(
                    Points::new(outliers)
                        .radius(2.5)
                        .color(Color32::DARK_GRAY)
                        .name("outliers"),
                );
            }
        });

    rotated_x_labels(ui, &response, &labels);
}

/// Paint category labels under the plot, slanted 45°.
fn rotated_x_labels(ui: &mut Ui, response: &PlotResponse<()>, labels: &[String]) {
    let transform = &response.transform;
    let bottom = transform.frame().bottom();
    let font = FontId::proportional(12.0);
    let text_color = ui.visuals().text_color();
    let painter = ui.painter();

    for (i, label) in labels.iter().enumerate() {
        let anchor = transform.position_from_point(&PlotPoint::new(i as f64, 0.0));
        let galley = painter.layout_no_wrap(label.clone(), font.clone(), text_color);
        let pos = egui::pos2(anchor.x, bottom + 4.0);
        painter.add(
            egui::epaint::TextShape::new(pos, galley, text_color)
                .with_angle(std::f32::consts::FRAC_PI_4),
        );
    }

    // Reserve room so the slanted labels don't overlap the next section.
    let longest = labels.iter().map(|l| l.len()).max().unwrap_or(0);
    ui.add_space(12.0 + 6.0 * longest as f32);
}

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Axis formatter that shows a category label at each integer tick.
fn category_formatter(
    labels: Vec<String>,
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let nearest = mark.value.round();
        if (mark.value - nearest).abs() > 1e-3 || nearest < 0.0 {
            return String::new();
        }
        labels.get(nearest as usize).cloned().unwrap_or_default()
    }
}
