use std::path::Path;

use kiln::domain::entities::Project;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub struct ProjectsView<'a> {
    projects: &'a [Project],
    settings_dir: &'a Path,
    show_files: bool,
}

impl<'a> ProjectsView<'a> {
    pub fn new(projects: &'a [Project], settings_dir: &'a Path) -> Self {
        Self {
            projects,
            settings_dir,
            show_files: false,
        }
    }

    pub fn with_files(mut self, show_files: bool) -> Self {
        self.show_files = show_files;
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut header = CommandHeader::new(Icon::Project, "Kiln Projects");
        header.add("Settings", self.settings_dir.display().to_string());
        header.add("Projects", self.projects.len().to_string());
        let mut out = header.render(supports_color, supports_unicode);
        out.push('\n');

        if self.projects.is_empty() {
            out.push_str(&format!(
                "{} {}\n{}\n",
                Icon::Pending.colored(supports_color, supports_unicode),
                ColoredText::dim("No projects configured.").render(supports_color),
                ColoredText::dim("Run `kiln project add <dir>` to add one.").render(supports_color)
            ));
            return out;
        }

        for project in self.projects {
            let entries = project.entry_files().count();
            let marker = if project.active { " *" } else { "" };
            out.push_str(&format!(
                "{} {}{} {}\n",
                Icon::Project.colored(supports_color, supports_unicode),
                ColoredText::info(project.name.as_str()).bold().render(supports_color),
                marker,
                ColoredText::dim(format!("[{}]", project.id)).render(supports_color),
            ));
            out.push_str(&format!(
                "    {}\n    {} files, {} compiled\n",
                truncate_middle(&project.root.display().to_string(), 72),
                project.files.len(),
                entries
            ));

            if self.show_files {
                for file in &project.files {
                    let icon = if file.compile {
                        Icon::Success
                    } else {
                        Icon::Pending
                    };
                    let src = file.src.strip_prefix(&project.root).unwrap_or(&file.src);
                    out.push_str(&format!(
                        "      {} {}\n",
                        icon.colored(supports_color, supports_unicode),
                        src.display()
                    ));
                }
            }
        }
        out
    }
}

fn truncate_middle(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(1);
    let left = keep / 2;
    let right = keep - left;

    let left_part: String = s.chars().take(left).collect();
    let right_part: String = s.chars().skip(s.chars().count() - right).collect();
    format!("{}…{}", left_part, right_part)
}
