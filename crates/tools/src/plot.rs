//! Terminal chart of a magnitude trace

use zplane_core::response::FrequencyResponse;
use zplane_editor::state::MagnitudeScale;
use zplane_editor::view::{magnitude_trace, trace_range};

/// Chart dimensions in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: usize,
    pub height: usize,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 72,
            height: 16,
        }
    }
}

/// Draw the magnitude of `response` as rows of text.
///
/// Each column covers several samples and is drawn as a vertical stroke from
/// their smallest to their largest value, so narrow peaks and notches both
/// survive the downsampling.
pub fn render_chart(
    response: &FrequencyResponse,
    scale: MagnitudeScale,
    size: ChartSize,
) -> String {
    let width = size.width.max(2);
    let height = size.height.max(2);

    let trace = magnitude_trace(response, scale);
    let (low, high) = trace_range(&trace, scale);
    let columns = column_spans(&trace, width);

    let mut grid = vec![vec![' '; width]; height];
    for (x, span) in columns.iter().enumerate() {
        if let Some((min, max)) = span {
            let top = row_for(*max, low, high, height);
            let bottom = row_for(*min, low, high, height);
            for row in &mut grid[top..=bottom] {
                row[x] = '*';
            }
        }
    }

    let unit = match scale {
        MagnitudeScale::Linear => "",
        MagnitudeScale::Decibel => " dB",
    };
    let top_label = format!("{:>8.2}{}", high, unit);
    let bottom_label = format!("{:>8.2}{}", low, unit);
    let label_width = top_label.len().max(bottom_label.len());

    let mut out = String::new();
    for (y, row) in grid.iter().enumerate() {
        let label = match y {
            0 => top_label.as_str(),
            _ if y == height - 1 => bottom_label.as_str(),
            _ => "",
        };
        out.push_str(&format!("{:>w$} |", label, w = label_width));
        out.extend(row.iter());
        out.push('\n');
    }

    out.push_str(&format!("{:>w$} +{}\n", "", "-".repeat(width), w = label_width));
    let mid = width / 2;
    let mut axis = vec![' '; width];
    axis[0] = '-';
    axis[1] = 'π';
    axis[mid] = '0';
    axis[width - 1] = 'π';
    out.push_str(&format!("{:>w$}  ", "", w = label_width));
    out.extend(axis.iter());
    out.push('\n');
    out
}

/// Bucket the trace into `width` columns as `(min, max)` of each bucket,
/// ignoring NaN
fn column_spans(trace: &[f64], width: usize) -> Vec<Option<(f64, f64)>> {
    if trace.is_empty() {
        return vec![None; width];
    }
    (0..width)
        .map(|x| {
            let start = x * trace.len() / width;
            let end = ((x + 1) * trace.len() / width).max(start + 1).min(trace.len());
            trace[start.min(trace.len() - 1)..end]
                .iter()
                .copied()
                .filter(|v| !v.is_nan())
                .fold(None, |span, v| match span {
                    None => Some((v, v)),
                    Some((min, max)) => Some((f64::min(min, v), f64::max(max, v))),
                })
        })
        .collect()
}

/// Row index for `value`, top row highest
fn row_for(value: f64, low: f64, high: f64, height: usize) -> usize {
    let span = (high - low).max(f64::EPSILON);
    let fraction = ((value - low) / span).clamp(0.0, 1.0);
    let from_bottom = (fraction * (height - 1) as f64).round() as usize;
    height - 1 - from_bottom
}

#[cfg(test)]
mod tests {
    use super::*;
    use zplane_core::presets::Preset;

    fn plot_cells(line: &str) -> Vec<char> {
        line.split_once('|').map(|(_, cells)| cells.chars().collect()).unwrap_or_default()
    }

    #[test]
    fn test_chart_dimensions() {
        let response = Preset::Resonator.model().frequency_response(1000).unwrap();
        let size = ChartSize { width: 40, height: 10 };
        let chart = render_chart(&response, MagnitudeScale::Decibel, size);

        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].contains("30.00 dB"));
        assert!(lines[9].contains("-60.00 dB"));

        let rows: Vec<Vec<char>> = lines[..10].iter().map(|l| plot_cells(l)).collect();
        assert!((0..40).all(|x| rows.iter().any(|row| row[x] == '*')));
    }

    #[test]
    fn test_identity_is_flat() {
        let identity = zplane_core::model::PoleZeroModel::identity()
            .frequency_response(100)
            .unwrap();
        let size = ChartSize {
            width: 20,
            height: 5,
        };
        let chart = render_chart(&identity, MagnitudeScale::Linear, size);
        // |H| = 1 is the top of the linear range
        assert_eq!(chart.lines().next().unwrap().matches('*').count(), 20);
        assert_eq!(chart.matches('*').count(), 20);
    }

    #[test]
    fn test_notch_reaches_floor() {
        let response = Preset::Notch.model().frequency_response(1000).unwrap();
        let size = ChartSize::default();
        let chart = render_chart(&response, MagnitudeScale::Decibel, size);

        let rows: Vec<Vec<char>> = chart.lines().take(size.height).map(plot_cells).collect();
        let deep_columns: Vec<usize> = (0..size.width)
            .filter(|&x| rows[size.height - 3..].iter().any(|row| row[x] == '*'))
            .collect();

        // ω = ±π/2 sit a quarter of the way in from either edge
        for quarter in [size.width / 4, 3 * size.width / 4] {
            assert!(
                deep_columns.iter().any(|&x| x.abs_diff(quarter) <= 2),
                "no trough near column {} in {:?}",
                quarter,
                deep_columns
            );
        }
        // Away from the notches the curve stays near 0 dB
        assert!(!deep_columns.contains(&0) && !deep_columns.contains(&(size.width / 2)));
    }

    #[test]
    fn test_column_spans() {
        let columns = column_spans(&[1.0, 3.0], 4);
        assert_eq!(
            columns,
            vec![Some((1.0, 1.0)), Some((1.0, 1.0)), Some((3.0, 3.0)), Some((3.0, 3.0))]
        );
        assert_eq!(
            column_spans(&[-5.0, 2.0, f64::NAN, 0.5], 2),
            vec![Some((-5.0, 2.0)), Some((0.5, 0.5))]
        );
        assert_eq!(column_spans(&[f64::NAN], 1), vec![None]);
        assert_eq!(column_spans(&[], 3), vec![None, None, None]);
    }

    #[test]
    fn test_row_for() {
        assert_eq!(row_for(30.0, -60.0, 30.0, 10), 0);
        assert_eq!(row_for(-60.0, -60.0, 30.0, 10), 9);
        assert_eq!(row_for(100.0, -60.0, 30.0, 10), 0);
    }
}
