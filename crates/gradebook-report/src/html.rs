//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use gradebook_core::model::{CourseStatistics, Grade};
use gradebook_core::report::RosterReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn grade_class(grade: Grade) -> &'static str {
    match grade {
        Grade::A | Grade::B => "pass",
        Grade::C | Grade::D => "warn",
        Grade::E => "fail",
    }
}

/// Generate an HTML report from a roster snapshot.
pub fn generate_html(report: &RosterReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>gradebook: {}</title>\n",
        html_escape(&report.title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.title)));
    html.push_str(&format!(
        "<p class=\"meta\">{} students | {} courses | {}</p>\n",
        report.student_count,
        report.course_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if !report.scores_fresh {
        html.push_str(
            "<p class=\"warning\">Totals and averages were not recomputed after the last edit.</p>\n",
        );
    }
    html.push_str("</header>\n");

    // Roster
    html.push_str("<section class=\"roster\">\n");
    html.push_str("<h2>Roster</h2>\n");
    html.push_str("<table id=\"roster\">\n<thead><tr>");
    let mut col = 0;
    for heading in ["ID", "Name"] {
        html.push_str(&format!("<th onclick=\"sortTable({col})\">{heading}</th>"));
        col += 1;
    }
    for course in 1..=report.course_count {
        html.push_str(&format!(
            "<th onclick=\"sortTable({col})\">Course {course}</th>"
        ));
        col += 1;
    }
    for heading in ["Total", "Average"] {
        html.push_str(&format!("<th onclick=\"sortTable({col})\">{heading}</th>"));
        col += 1;
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for r in &report.records {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td>",
            r.id(),
            html_escape(r.name())
        ));
        for &score in r.scores() {
            html.push_str(&format!(
                "<td class=\"{}\">{score:.2}</td>",
                grade_class(Grade::classify(score))
            ));
        }
        html.push_str(&format!(
            "<td>{:.2}</td><td>{:.2}</td></tr>\n",
            r.total_score(),
            r.avg_score()
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Course statistics
    html.push_str("<section class=\"courses\">\n");
    html.push_str("<h2>Courses</h2>\n");
    match &report.courses {
        Some(courses) => {
            html.push_str("<table class=\"summary\">\n<thead><tr><th>Course</th><th>Total</th><th>Average</th>");
            for grade in Grade::ALL {
                html.push_str(&format!("<th>{}</th>", html_escape(grade.label())));
            }
            html.push_str("</tr></thead>\n<tbody>\n");
            for (i, c) in courses.iter().enumerate() {
                html.push_str(&format!(
                    "<tr><td>Course {}</td><td>{:.2}</td><td>{:.2}</td>",
                    i + 1,
                    c.total_score,
                    c.avg_score
                ));
                for grade in Grade::ALL {
                    html.push_str(&format!(
                        "<td>{} ({:.1}%)</td>",
                        c.count(grade),
                        c.percent(grade) * 100.0
                    ));
                }
                html.push_str("</tr>\n");
            }
            html.push_str("</tbody></table>\n");

            if !courses.is_empty() {
                html.push_str(&generate_bar_chart(courses));
            }
        }
        None => {
            html.push_str("<p class=\"meta\">Course statistics were out of date when this report was taken.</p>\n");
        }
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('&', "&amp;")
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

/// Write an HTML report to a file.
pub fn write_html_report(report: &RosterReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

/// One horizontal bar per course, sized by its average score.
fn generate_bar_chart(courses: &[CourseStatistics]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 120;

    let total_height = courses.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, course) in courses.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let ratio = (course.avg_score / 100.0).clamp(0.0, 1.0);
        let width = (ratio * max_width as f64) as usize;

        let color = match Grade::classify(course.avg_score) {
            Grade::A | Grade::B => "#22c55e",
            Grade::C | Grade::D => "#eab308",
            Grade::E => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">Course {}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            i + 1
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.2}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            course.avg_score
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
.warning { color: #b45309; font-weight: bold; }
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
  const table = document.getElementById('roster');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    const cmp = isNaN(na) || isNaN(nb) ? va.localeCompare(vb) : na - nb;
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook_core::{RecordInput, RecordStore};

    fn make_test_report() -> RosterReport {
        let mut store = RecordStore::new();
        store
            .bulk_load(
                2,
                &[
                    RecordInput::new(1001, "Alice", vec![95.0, 85.0]),
                    RecordInput::new(1002, "<Bob>", vec![60.0, 55.0]),
                ],
            )
            .unwrap();
        RosterReport::from_store(&store, "Class 3")
    }

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&make_test_report());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Class 3"));
        assert!(html.contains("<td>Alice</td>"));
        assert!(html.contains("<td>180.00</td><td>90.00</td>"));
        assert!(html.contains("A(90-100)"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn html_report_escapes_names() {
        let html = generate_html(&make_test_report());
        assert!(html.contains("&lt;Bob&gt;"));
        assert!(!html.contains("<td><Bob></td>"));
    }

    #[test]
    fn grade_distribution_is_rendered_as_percentages() {
        let html = generate_html(&make_test_report());
        // Course 2: 85 is a B, 55 is an E.
        assert!(html.contains("<tr><td>Course 2</td><td>140.00</td><td>70.00</td><td>0 (0.0%)</td><td>1 (50.0%)</td>"));
    }

    #[test]
    fn stale_statistics_are_not_rendered() {
        let mut report = make_test_report();
        report.courses = None;
        report.scores_fresh = false;
        let html = generate_html(&report);

        assert!(!html.contains("<svg"));
        assert!(html.contains("out of date"));
        assert!(html.contains("not recomputed"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
