//! Rendering of analysis reports for the CLI.

use std::fmt::Write as _;

use tempo_common::{OutputFormat, Result};

use crate::report::AnalysisReport;

/// Render a report in the requested format.
pub fn render(report: &AnalysisReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).map_err(|e| {
                tempo_common::Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            })?;
            Ok(json)
        }
        OutputFormat::Text => Ok(render_text(report)),
    }
}

fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let s = &report.stats;

    let _ = writeln!(out, "Interarrival statistics (seconds)");
    let _ = writeln!(out, "  n          {}", s.n);
    let _ = writeln!(out, "  min        {:.6}", s.min);
    let _ = writeln!(out, "  max        {:.6}", s.max);
    let _ = writeln!(out, "  mean       {:.6}", s.mean);
    let _ = writeln!(out, "  median     {:.6}", s.median);
    let _ = writeln!(out, "  std        {:.6}", s.std_dev);
    let _ = writeln!(out, "  q25        {:.6}", s.q25);
    let _ = writeln!(out, "  q75        {:.6}", s.q75);
    let _ = writeln!(out, "  skewness   {:.6}", s.skewness);
    let _ = writeln!(out, "  kurtosis   {:.6}", s.kurtosis);

    if report.below_minimum {
        let _ = writeln!(
            out,
            "\nWARNING: sample below configured minimum; fit is unstable"
        );
    }

    let selected = &report.fit.selected;
    let _ = writeln!(
        out,
        "\nBest fit: {} (sse = {:.6e}, {} bins)",
        selected.family, selected.sse, report.fit.bins
    );
    for (name, value) in selected.params.named_values() {
        let _ = writeln!(out, "  {name:<10} {value:.6}");
    }

    if let Some(lambda) = report.lambda {
        let _ = writeln!(out, "  lambda     {lambda:.6} 1/s");
    }

    if !report.fit.failures.is_empty() {
        let _ = writeln!(out, "\nExcluded families:");
        for f in &report.fit.failures {
            let _ = writeln!(out, "  {:<12} {}", f.family.name(), f.reason);
        }
    }

    let m = &report.moments;
    let _ = writeln!(out, "\nMoment comparison (sample vs model):");
    let _ = writeln!(out, "  {:<12} {:>14} {:>14}", "", "sample", "model");
    let rows = [
        ("mean", s.mean, m.mean),
        ("variance", s.variance(), m.variance),
        ("std", s.std_dev, m.std_dev),
        ("skewness", s.skewness, m.skewness),
        ("kurtosis", s.kurtosis, m.kurtosis),
    ];
    for (name, sample, model) in rows {
        let _ = writeln!(out, "  {name:<12} {sample:>14.6} {model:>14.6}");
    }
    if !m.is_defined() {
        let _ = writeln!(
            out,
            "  (model moments undefined for {})",
            selected.family
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::fit_families;
    use crate::report::AnalysisReport;
    use tempo_common::OutputFormat;
    use tempo_math::{summarize, Family};

    fn sample_report() -> AnalysisReport {
        let sample: Vec<f64> = (0..200)
            .map(|i| -8.0 * (1.0 - (i as f64 + 0.5) / 200.0).ln())
            .collect();
        let stats = summarize(&sample).unwrap();
        let fit = fit_families(&sample, &Family::CATALOG, 10).unwrap();
        AnalysisReport::new(false, stats, fit, sample)
    }

    #[test]
    fn text_render_mentions_the_selected_family() {
        let report = sample_report();
        let text = render(&report, OutputFormat::Text).unwrap();
        assert!(text.contains("Best fit:"));
        assert!(text.contains(report.fit.selected.family.name()));
        assert!(text.contains("Moment comparison"));
    }

    #[test]
    fn json_render_is_machine_readable() {
        let report = sample_report();
        let json = render(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sample_size"], 200);
        assert!(value["fit"]["selected"]["sse"].is_number());
        // The raw sample stays out of serialized output.
        assert!(value.get("sample").is_none());
    }
}
