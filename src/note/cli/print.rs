use chrono::{DateTime, Utc};
use colored::Colorize;
use note::api::{CmdMessage, MessageLevel};
use note::model::Note;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const SPACE_WIDTH: usize = 12;
const PIN_MARKER: &str = "⚲";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_full_notes(notes: &[Note]) {
    for (i, note) in notes.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        let pin = if note.pinned { PIN_MARKER } else { "" };
        println!(
            "{} {} {}",
            format!("#{}", note.id).yellow(),
            note.space.cyan(),
            pin
        );
        println!(
            "{}",
            format!(
                "created {}  updated {}",
                note.created.format("%Y-%m-%d %H:%M"),
                note.updated.format("%Y-%m-%d %H:%M")
            )
            .dimmed()
        );
        println!("--------------------------------");
        println!("{}", note.content);
    }
}

pub(super) fn print_notes(notes: &[Note]) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    let id_width = notes
        .iter()
        .map(|n| n.id.to_string().len())
        .max()
        .unwrap_or(1);

    let mut last_was_pinned = notes.first().is_some_and(|n| n.pinned);
    for note in notes {
        // Blank line between the pinned group and the rest.
        if last_was_pinned != note.pinned {
            println!();
        }
        last_was_pinned = note.pinned;

        let parts = LineParts::new(note, id_width);
        let idx_colored = if note.pinned {
            parts.index.yellow()
        } else {
            parts.index.normal()
        };
        println!(
            "{}{}{}{}{}{}",
            parts.prefix,
            idx_colored,
            parts.space.cyan(),
            parts.preview,
            " ".repeat(parts.padding),
            parts.time.dimmed()
        );
    }
}

pub(super) fn print_spaces(spaces: &[String]) {
    if spaces.is_empty() {
        println!("No spaces found.");
        return;
    }
    for space in spaces {
        println!("{}", space);
    }
}

/// Uncoloured pieces of one list line.
struct LineParts {
    prefix: String,
    index: String,
    space: String,
    preview: String,
    padding: usize,
    time: String,
}

impl LineParts {
    fn new(note: &Note, id_width: usize) -> Self {
        let prefix = if note.pinned {
            format!("  {} ", PIN_MARKER)
        } else {
            "    ".to_string()
        };
        let index = format!("{:>width$}. ", note.id, width = id_width);
        let space = format!(
            "{} ",
            pad_to_width(&truncate_to_width(&note.space, SPACE_WIDTH), SPACE_WIDTH)
        );

        let fixed = prefix.width() + index.width() + space.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let preview = truncate_to_width(&flatten(&note.content), available);
        let padding = available.saturating_sub(preview.width());

        Self {
            prefix,
            index,
            space,
            preview,
            padding,
            time: format_time_ago(note.updated),
        }
    }
}

fn flatten(content: &str) -> String {
    content
        .trim()
        .chars()
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .collect()
}

fn pad_to_width(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(pad))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
    }

    #[test]
    fn truncate_counts_wide_chars() {
        let out = truncate_to_width("日本語テキスト", 7);
        assert!(out.width() <= 7);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn flatten_joins_lines() {
        assert_eq!(flatten("  one\ntwo\tthree\n"), "one two three");
    }

    #[test]
    fn line_fits_line_width() {
        let mut note = Note::new("a-very-long-space-name", "x".repeat(300)).pinned(true);
        note.id = 42;
        let parts = LineParts::new(&note, 3);
        let total = parts.prefix.width()
            + parts.index.width()
            + parts.space.width()
            + parts.preview.width()
            + parts.padding
            + parts.time.width();
        assert_eq!(total, LINE_WIDTH);
        assert_eq!(parts.index, " 42. ");
        assert!(parts.space.starts_with("a-very-long"));
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let out = format_time_ago(Utc::now() - chrono::Duration::hours(2));
        assert_eq!(out.width(), TIME_WIDTH);
        assert!(out.ends_with("ago"));
    }
}
