//! HTML dashboard generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use studyplan_core::model::{EffortStatus, QuotaResult};
use studyplan_core::report::PlanReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML dashboard from a plan report.
pub fn generate_html(report: &PlanReport) -> String {
    let result = &report.strategy.result;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>studyplan — {}</title>\n",
        html_escape(&report.bank.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Study plan</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Bank: <strong>{}</strong> | {} topics | {} questions | {}</p>\n",
        html_escape(&report.bank.name),
        report.bank.topic_count,
        report.bank.question_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Outlook
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Outlook</h2>\n");
    html.push_str(&format!(
        "<p class=\"effort {}\">Effort: <strong>{}</strong> ({})</p>\n",
        effort_class(result.effort_status),
        result.effort_status,
        report.strategy.band
    ));
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<tbody>\n");
    html.push_str(&format!(
        "<tr><th>Target</th><td>{:.0}%</td></tr>\n",
        report.profile.target_percent
    ));
    html.push_str(&format!(
        "<tr><th>Realistic range</th><td>{}% – {}%</td></tr>\n",
        result.realistic_min, result.realistic_max
    ));
    html.push_str(&format!(
        "<tr><th>Hours/day required</th><td>{:.1}</td></tr>\n",
        result.hours_per_day_required
    ));
    html.push_str(&format!(
        "<tr><th>Hours/day planned</th><td>{:.1}</td></tr>\n",
        report.profile.hours_per_day
    ));
    html.push_str(&format!(
        "<tr><th>Days left</th><td>{}</td></tr>\n",
        report.profile.days_left
    ));
    html.push_str(&format!(
        "<tr><th>Current level</th><td>{:.1}% ({})</td></tr>\n",
        report.strategy.assumed_current_percent,
        if report.strategy.current_supplied {
            "measured"
        } else {
            "assumed"
        }
    ));
    html.push_str(&format!(
        "<tr><th>Effort ratio</th><td>{:.2}</td></tr>\n",
        report.strategy.effort_ratio
    ));
    html.push_str("</tbody></table>\n");
    html.push_str(&generate_band_chart(
        result.realistic_min,
        result.realistic_max,
        report.profile.target_percent,
    ));
    html.push_str("</section>\n");

    // Topic mix
    html.push_str("<section class=\"results\">\n");
    html.push_str(&format!(
        "<h2>Topic mix — {} questions ({})</h2>\n",
        report.total_questions, report.method
    ));
    html.push_str("<table class=\"results-table\" id=\"mix\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Topic</th><th onclick=\"sortTable(1)\">Weightage</th><th onclick=\"sortTable(2)\">Questions</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for quota in &report.topic_mix {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.1}%</td><td>{}</td></tr>\n",
            html_escape(&quota.name),
            quota.weightage_percent,
            quota.count
        ));
    }
    html.push_str("</tbody></table>\n");
    if !report.topic_mix.is_empty() {
        html.push_str(&generate_mix_chart(&report.topic_mix));
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML dashboard to a file.
pub fn write_html_report(report: &PlanReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn effort_class(status: EffortStatus) -> &'static str {
    match status {
        EffortStatus::High => "pass",
        EffortStatus::Ok => "warn",
        EffortStatus::Low => "fail",
    }
}

/// A 0–100 scale with the realistic band shaded and the target marked.
fn generate_band_chart(min: i32, max: i32, target: f64) -> String {
    let width = 600.0;
    let height = 60;
    let scale = |percent: f64| percent.clamp(0.0, 100.0) / 100.0 * width;

    let band_x = scale(min as f64);
    let band_width = scale(max as f64) - band_x;
    let target_x = scale(target);

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        width + 40.0,
        height
    );
    svg.push_str(&format!(
        "  <rect x=\"20\" y=\"20\" width=\"{width}\" height=\"16\" fill=\"#e5e7eb\" rx=\"4\"/>\n"
    ));
    svg.push_str(&format!(
        "  <rect x=\"{:.1}\" y=\"20\" width=\"{:.1}\" height=\"16\" fill=\"#22c55e\" rx=\"4\"/>\n",
        20.0 + band_x,
        band_width
    ));
    svg.push_str(&format!(
        "  <line x1=\"{x:.1}\" y1=\"12\" x2=\"{x:.1}\" y2=\"44\" stroke=\"#ef4444\" stroke-width=\"2\"/>\n",
        x = 20.0 + target_x
    ));
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"56\" font-size=\"12\" fill=\"currentColor\" text-anchor=\"middle\">target {:.0}%</text>\n",
        20.0 + target_x,
        target
    ));
    svg.push_str("</svg>\n");
    svg
}

fn generate_mix_chart(mix: &[QuotaResult]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let largest = mix.iter().map(|q| q.count).max().unwrap_or(1).max(1);
    let total_height = mix.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, quota) in mix.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (quota.count as f64 / largest as f64 * max_width as f64) as usize;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&quota.name)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#3b82f6\" rx=\"4\"/>\n",
            label_width, y, width, bar_height
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            quota.count
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --warn: #fef9c3; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --warn: #713f12; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.effort { padding: 0.5rem 1rem; border-radius: 8px; display: inline-block; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.warn { background: var(--warn); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('mix');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    if (!isNaN(na) && !isNaN(nb)) return asc ? na - nb : nb - na;
    return asc ? va.localeCompare(vb) : vb.localeCompare(va);
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
