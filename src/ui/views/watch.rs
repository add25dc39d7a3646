use crate::ui::primitives::icon::Icon;
use stylewatch::application::watch::WatchEvent;

pub fn render_watch_event(
    timestamp: &str,
    event: &WatchEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = format!("[{}]", timestamp);
    let icon = |icon: Icon| icon.colored(supports_color, supports_unicode);

    match event {
        WatchEvent::WatchStarted { roots, files } => format!(
            "{} {} Watching {} stylesheet{} under {}. Press Ctrl+C to stop.\n",
            prefix,
            icon(Icon::Watch),
            files,
            if *files == 1 { "" } else { "s" },
            roots.join(", ")
        ),
        WatchEvent::Discovered { path } => {
            format!("{} {} Watching {}.\n", prefix, icon(Icon::Arrow), path)
        }
        WatchEvent::ImportFound { importer, imported } => format!(
            "{} {} {} imports {}\n",
            prefix,
            icon(Icon::Arrow),
            importer,
            imported
        ),
        WatchEvent::DanglingImport { importer, imported } => format!(
            "{} {} {} was imported by {} but does not exist\n",
            prefix,
            icon(Icon::Warning),
            imported,
            importer
        ),
        WatchEvent::DiscoveryError { path, message } => format!(
            "{} {} Error adding {} to watchlist: {}\n",
            prefix,
            icon(Icon::Error),
            path,
            message
        ),
        WatchEvent::FileChanged { path } => {
            format!("{} {} Changed: {}\n", prefix, icon(Icon::Arrow), path)
        }
        WatchEvent::FileMissing { path } => format!(
            "{} {} {} no longer exists\n",
            prefix,
            icon(Icon::Warning),
            path
        ),
        WatchEvent::StatFailed { path, message } => format!(
            "{} {} Error checking timestamp on {}: {}\n",
            prefix,
            icon(Icon::Error),
            path,
            message
        ),
        // Timestamped when the output was written, not when it was rendered.
        WatchEvent::Compiled {
            time,
            source,
            target,
        } => format!(
            "[{}] {} Compiled {} to {}\n",
            time,
            icon(Icon::Success),
            source,
            target
        ),
        WatchEvent::CompileFailed {
            source,
            file,
            line,
            column,
            message,
            extract,
        } => {
            let mut out = format!(
                "{} {} Error while compiling {} at line {}, column {} in {}: {}\n",
                prefix,
                icon(Icon::Error),
                source,
                line,
                column,
                file,
                message
            );
            if !extract.is_empty() {
                out.push_str(extract);
                out.push('\n');
            }
            out
        }
        WatchEvent::ReadFailed { path, message } => format!(
            "{} {} Error reading {}: {}\n",
            prefix,
            icon(Icon::Error),
            path,
            message
        ),
        WatchEvent::WriteFailed { path, message } => format!(
            "{} {} Error saving {}: {}\n",
            prefix,
            icon(Icon::Error),
            path,
            message
        ),
        WatchEvent::RebuildComplete { trigger, rebuilt } => format!(
            "{} {} Rebuilt {} file{} after change to {}\n",
            prefix,
            icon(Icon::Progress),
            rebuilt.len(),
            if rebuilt.len() == 1 { "" } else { "s" },
            trigger
        ),
        WatchEvent::Shutdown => format!("\n{} {} Watch stopped.\n", prefix, icon(Icon::Watch)),
    }
}
