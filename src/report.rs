use std::fmt::Write;

use beamx::{
    DeflectionCurve, SolverError, CENTRAL_DIFFERENCE_LABEL, DEFLECTION_AXIS_LABEL,
    POSITION_AXIS_LABEL, RUNGE_KUTTA_LABEL,
};
use serde::Serialize;

use crate::analysis::AnalysisSummary;

/// Render a textual comparison of both deflection curves.
///
/// The table lists every `every`-th position of the first available curve and
/// reads the other curve at the same positions by linear interpolation. A
/// failed method is reported in place of its numbers.
#[must_use]
pub fn render_summary(summary: &AnalysisSummary, every: usize) -> String {
    let beam = &summary.config.beam;
    let methods = [
        (RUNGE_KUTTA_LABEL, &summary.comparison.runge_kutta),
        (CENTRAL_DIFFERENCE_LABEL, &summary.comparison.central_difference),
    ];
    let mut output = String::new();

    writeln!(
        &mut output,
        "Beam deflection under point load \
         (P = {:.1} N at x = {:.2} m, L = {:.2} m, EI = {:.4e} N·m²)",
        beam.load_magnitude, beam.load_position, beam.length, beam.flexural_rigidity
    )
    .expect("writing to string cannot fail");

    for (label, result) in methods {
        let written = match result {
            Ok(curve) => match curve.peak() {
                Some(peak) => writeln!(
                    &mut output,
                    "{label}: {} samples, peak {:+.4e} m at x = {:.2} m",
                    curve.len(),
                    peak.deflection,
                    peak.position
                ),
                None => writeln!(&mut output, "{label}: no samples"),
            },
            Err(error) => writeln!(&mut output, "{label}: failed ({error})"),
        };
        written.expect("writing to string cannot fail");
    }

    let curves: Vec<Option<&DeflectionCurve>> = methods
        .iter()
        .map(|(_, result)| result.as_ref().ok())
        .collect();
    let Some(rows) = curves.iter().flatten().next() else {
        return output;
    };

    writeln!(
        &mut output,
        "\n{POSITION_AXIS_LABEL:>16} | {RUNGE_KUTTA_LABEL:>26} | {CENTRAL_DIFFERENCE_LABEL:>26}"
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "{:>16} | {DEFLECTION_AXIS_LABEL:>26} | {DEFLECTION_AXIS_LABEL:>26}",
        ""
    )
    .expect("writing to string cannot fail");

    let stride = every.max(1);
    let last = rows.len().saturating_sub(1);
    for (idx, x) in rows.positions().enumerate() {
        if idx % stride != 0 && idx != last {
            continue;
        }
        let cells: Vec<String> = curves
            .iter()
            .map(|&curve| match curve.and_then(|curve| curve.interpolate(x)) {
                Some(y) => format!("{y:+.6e}"),
                None => "-".to_string(),
            })
            .collect();
        writeln!(&mut output, "{x:>16.3} | {:>26} | {:>26}", cells[0], cells[1])
            .expect("writing to string cannot fail");
    }

    output
}

/// A labelled series in the JSON report.
#[derive(Debug, Serialize)]
struct SeriesReport<'a> {
    /// Legend label.
    label: &'static str,
    /// Sampled curve, absent when the method failed.
    curve: Option<&'a DeflectionCurve>,
    /// Failure message, absent when the method succeeded.
    error: Option<String>,
}

impl<'a> SeriesReport<'a> {
    /// Describe one method's outcome.
    fn new(label: &'static str, result: &'a Result<DeflectionCurve, SolverError>) -> Self {
        Self {
            label,
            curve: result.as_ref().ok(),
            error: result.as_ref().err().map(ToString::to_string),
        }
    }
}

/// Top-level JSON report.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    /// Inputs used for the run.
    config: &'a beamx::BeamConfig,
    /// Label for the position axis.
    x_label: &'static str,
    /// Label for the deflection axis.
    y_label: &'static str,
    /// One entry per method.
    series: [SeriesReport<'a>; 2],
}

/// Render both curves and their inputs as pretty-printed JSON.
pub fn render_json(summary: &AnalysisSummary) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        config: &summary.config,
        x_label: POSITION_AXIS_LABEL,
        y_label: DEFLECTION_AXIS_LABEL,
        series: [
            SeriesReport::new(RUNGE_KUTTA_LABEL, &summary.comparison.runge_kutta),
            SeriesReport::new(CENTRAL_DIFFERENCE_LABEL, &summary.comparison.central_difference),
        ],
    };
    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use beamx::{BeamConfig, DeflectionComparison};

    fn summary() -> AnalysisSummary {
        AnalysisSummary {
            config: BeamConfig::default(),
            comparison: DeflectionComparison {
                runge_kutta: Ok(DeflectionCurve::from_parts(
                    &[0.0, 5.0, 10.0],
                    &[0.0, 0.0, 1.25e-2],
                )),
                central_difference: Err(SolverError::TooFewPoints { points: 3 }),
            },
        }
    }

    #[test]
    fn formats_human_readable_report() {
        let report = render_summary(&summary(), 1);
        assert!(report.contains("Beam deflection under point load"));
        assert!(report.contains("Runge-Kutta Method: 3 samples, peak +1.2500e-2 m at x = 10.00 m"));
        assert!(report.contains("Central Difference Method: failed"));
        assert!(report.contains("Beam Length (m)"));
        assert!(report.contains("+1.250000e-2"));
    }

    #[test]
    fn json_report_carries_labels_and_errors() {
        let json = render_json(&summary()).expect("serialisable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["x_label"], "Beam Length (m)");
        assert_eq!(value["series"][0]["label"], "Runge-Kutta Method");
        assert_eq!(value["series"][0]["curve"][2]["position"], 10.0);
        assert!(value["series"][1]["curve"].is_null());
        assert!(value["series"][1]["error"]
            .as_str()
            .expect("error message")
            .contains("at least 5 points"));
    }
}
