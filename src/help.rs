use std::fmt::Write;

use crate::{
    command::Command,
    value::{Kind, Value},
};

macro_rules! w {
    ($($tt:tt)*) => {{
        let _ = write!($($tt)*);
    }};
}

/// Renders the usage text of `cmd`: its arguments, options and subcommands.
pub fn usage(cmd: &Command) -> String {
    let mut buf = String::new();
    let flags = cmd.flags();
    let id_width = flags.max_id_width();

    w!(buf, "{}\n", cmd.full_name());
    if let Some(about) = cmd.about_text() {
        write_wrapped(&mut buf, about, 2, cmd.help_width());
    }

    blank_line(&mut buf);
    w!(buf, "USAGE:\n    {}", cmd.path().join(" "));
    if !flags.named().is_empty() {
        w!(buf, " [OPTIONS]");
    }
    for flag in flags.positional() {
        w!(buf, " [{}]", flag.placeholder());
    }
    if !cmd.subcommands().is_empty() {
        w!(buf, " <SUBCOMMAND>");
    }
    w!(buf, "\n");

    if !flags.positional().is_empty() {
        blank_line(&mut buf);
        w!(buf, "ARGS:\n");
        let mut blank = "";
        for flag in flags.positional() {
            w!(buf, "{blank}");
            blank = "\n";
            let record = flag.record();
            let summary = summary(record.kind(), &record.default_value());
            w!(buf, "    {:<id_width$}  {summary}\n", flag.id());
            write_wrapped(&mut buf, record.help(), 6, cmd.help_width());
        }
    }

    if !flags.named().is_empty() {
        blank_line(&mut buf);
        w!(buf, "OPTIONS:\n");
        let mut blank = "";
        for flag in flags.named() {
            w!(buf, "{blank}");
            blank = "\n";
            let record = flag.record();
            let summary = summary(record.kind(), &record.default_value());
            w!(buf, "    {:<id_width$}  {summary}\n", flag.id());
            write_wrapped(&mut buf, record.help(), 6, cmd.help_width());
        }
    }

    if !cmd.subcommands().is_empty() {
        blank_line(&mut buf);
        w!(buf, "SUBCOMMANDS:\n");
        for sub in cmd.subcommands() {
            w!(buf, "    {}\n", sub.name());
            if let Some(about) = sub.about_text() {
                write_wrapped(&mut buf, about, 6, cmd.help_width());
            }
        }
    }

    buf
}

fn summary(kind: Kind, default: &Value) -> String {
    match default {
        Value::Text(it) => format!("(type: {kind}, default: {it:?})"),
        it => format!("(type: {kind}, default: {it})"),
    }
}

/// Writes `text` indented, breaking lines between words so that no line
/// passes `width` unless a single word is longer than that.
fn write_wrapped(buf: &mut String, text: &str, indent: usize, width: usize) {
    let room = width.saturating_sub(indent).max(1);
    for paragraph in text.lines().map(str::trim) {
        if paragraph.is_empty() {
            continue;
        }
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > room {
                w!(buf, "{blank:indent$}{line}\n", blank = "");
                line.clear();
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        w!(buf, "{blank:indent$}{line}\n", blank = "");
    }
}

fn blank_line(buf: &mut String) {
    w!(buf, "\n");
}
