use kiln::domain::ports::CompileEvent;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_watch_header(
    settings_dir: &str,
    projects: usize,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "Kiln Watch");
    header.add("Settings", settings_dir);
    header.add("Projects", projects.to_string());
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

pub fn render_watch_event(
    timestamp: &str,
    event: &CompileEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = ColoredText::dim(format!("[{}]", timestamp)).render(supports_color);
    let icon = |icon: Icon| icon.colored(supports_color, supports_unicode);

    match event {
        CompileEvent::WatchStarted { direct, imports } => format!(
            "{} {} Watching {} {} and {} {}\n",
            prefix,
            icon(Icon::Watch),
            direct,
            plural(*direct, "entry", "entries"),
            imports,
            plural(*imports, "import", "imports"),
        ),
        CompileEvent::WatchSkipped { path, reason } => format!(
            "{} {} Skipped: {} ({})\n",
            prefix,
            icon(Icon::Warning),
            path,
            reason
        ),
        CompileEvent::FileChanged { path } => {
            format!("{} {} Changed: {}\n", prefix, icon(Icon::Arrow), path)
        }
        CompileEvent::CompileCoalesced { entry } => {
            format!("{} {} Queued: {}\n", prefix, icon(Icon::Pending), entry)
        }
        CompileEvent::CompileStarted { entry } => {
            format!("{} {} Compiling: {}\n", prefix, icon(Icon::Progress), entry)
        }
        CompileEvent::CompileSucceeded {
            entry,
            output,
            duration_ms,
        } => format!(
            "{} {} Compiled: {} {} {} {}\n",
            prefix,
            icon(Icon::Success),
            entry,
            Icon::To.render(supports_unicode),
            output,
            ColoredText::dim(format!("({}ms)", duration_ms)).render(supports_color)
        ),
        CompileEvent::CompileFailed { entry, reason } => {
            let mut out = format!("{} {} Failed: {}\n", prefix, icon(Icon::Error), entry);
            for line in reason.lines() {
                out.push_str(&format!(
                    "    {}\n",
                    ColoredText::error(line).render(supports_color)
                ));
            }
            out
        }
        CompileEvent::Shutdown => format!("\n{} {} Watch stopped.\n", prefix, icon(Icon::Watch)),
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}
