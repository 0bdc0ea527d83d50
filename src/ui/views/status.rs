use kiln::application::CompileReport;
use kiln::infrastructure::{CheckReport, RefreshReport};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_check_report(report: &CheckReport, supports_color: bool, supports_unicode: bool) -> String {
    if report.is_clean() {
        return format!(
            "{} All projects and files are present.\n",
            Icon::Success.colored(supports_color, supports_unicode)
        );
    }

    let mut out = String::new();
    for id in &report.removed_projects {
        out.push_str(&format!(
            "{} {} project {}\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            ColoredText::warning("Removed").render(supports_color),
            id
        ));
    }
    for file in &report.removed_files {
        out.push_str(&format!(
            "{} {} {}\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            ColoredText::warning("Removed").render(supports_color),
            ColoredText::dim(file.display().to_string()).render(supports_color)
        ));
    }
    out
}

pub fn render_refresh_report(report: &RefreshReport, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} Refreshed: {} added, {} removed\n",
        Icon::Success.colored(supports_color, supports_unicode),
        report.added.len(),
        report.removed.len()
    );
    for path in &report.added {
        out.push_str(&format!("    + {}\n", path.display()));
    }
    for path in &report.removed {
        out.push_str(&format!(
            "    {}\n",
            ColoredText::dim(format!("- {}", path.display())).render(supports_color)
        ));
    }
    out
}

pub fn render_compile_report(report: &CompileReport, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} Compiled: {} {} {} {}\n",
        Icon::Success.colored(supports_color, supports_unicode),
        report.entry.display(),
        Icon::To.render(supports_unicode),
        report.output.display(),
        ColoredText::dim(format!("({}ms)", report.duration_ms)).render(supports_color)
    );
    for import in &report.imports {
        out.push_str(&format!(
            "    {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            import.display()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn clean_check_says_so() {
        let rendered = render_check_report(&CheckReport::default(), false, false);
        assert_eq!(rendered, "[OK] All projects and files are present.\n");
    }

    #[test]
    fn check_lists_removed_entries() {
        let report = CheckReport {
            removed_projects: vec!["deadbeef".to_string()],
            removed_files: vec![PathBuf::from("/site/gone.less")],
        };
        let rendered = render_check_report(&report, false, false);
        assert!(rendered.contains("[WARN] Removed project deadbeef"));
        assert!(rendered.contains("[WARN] Removed /site/gone.less"));
    }

    #[test]
    fn compile_report_lists_imports() {
        let report = CompileReport {
            project_id: "1a2b3c4d".to_string(),
            entry: PathBuf::from("/site/main.less"),
            output: PathBuf::from("/site/main.css"),
            imports: vec![PathBuf::from("/site/vars.less")],
            duration_ms: 7,
        };
        let rendered = render_compile_report(&report, false, false);
        assert_eq!(
            rendered,
            "[OK] Compiled: /site/main.less -> /site/main.css (7ms)\n    [>] /site/vars.less\n"
        );
    }
}
