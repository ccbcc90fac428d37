//! Plain-text rendering of a guide for `--print`.

use std::io::Result;
use std::io::Write;

use unicode_width::UnicodeWidthStr;

use crate::guide::Entry;
use crate::guide::Guide;
use crate::guide::Link;

/// Column width used for wrapped prose. Commands are never wrapped.
pub const PRINT_WIDTH: usize = 80;

/// Write every section of `guide`, fully expanded, as plain text.
pub fn write_guide<W: Write>(guide: &Guide, out: &mut W) -> Result<()> {
    writeln!(out, "{}", guide.title)?;
    writeln!(out, "{}", "=".repeat(guide.title.width()))?;
    if let Some(summary) = &guide.summary {
        writeln!(out)?;
        write_wrapped(out, summary, "", "")?;
    }

    for section in &guide.sections {
        writeln!(out)?;
        writeln!(out, "## {}", section.title)?;
        for entry in &section.entries {
            writeln!(out)?;
            write_entry(out, entry)?;
        }
    }
    Ok(())
}

fn write_entry<W: Write>(out: &mut W, entry: &Entry) -> Result<()> {
    match entry {
        Entry::Heading { text } => writeln!(out, "### {text}"),
        Entry::Note { text } => write_wrapped(out, text, "", ""),
        Entry::List { ordered, items } => {
            for (n, item) in items.iter().enumerate() {
                let marker = if *ordered {
                    format!("{}. ", n + 1)
                } else {
                    "- ".to_string()
                };
                let indent = " ".repeat(marker.len());
                write_wrapped(out, item, &marker, &indent)?;
            }
            Ok(())
        }
        Entry::Link { prefix, text, url } => match prefix {
            Some(prefix) => writeln!(out, "{prefix} {text} <{url}>"),
            None => writeln!(out, "{text} <{url}>"),
        },
        Entry::Callout { title, body, link } => {
            writeln!(out, "> {title}")?;
            write_wrapped(out, body, "> ", "> ")?;
            if let Some(Link { text, url }) = link {
                writeln!(out, "> {text} <{url}>")?;
            }
            Ok(())
        }
        Entry::Command { label, commands } => {
            let label = label
                .as_deref()
                .unwrap_or(setup_guide_command_block::DEFAULT_LABEL);
            writeln!(out, "[{label}]")?;
            for line in commands.display_text().lines() {
                writeln!(out, "    {line}")?;
            }
            Ok(())
        }
    }
}

fn write_wrapped<W: Write>(
    out: &mut W,
    text: &str,
    initial_indent: &str,
    subsequent_indent: &str,
) -> Result<()> {
    let options = textwrap::Options::new(PRINT_WIDTH)
        .initial_indent(initial_indent)
        .subsequent_indent(subsequent_indent);
    for line in textwrap::wrap(text, options) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn print(guide: &str) -> String {
        let guide = Guide::parse(guide).unwrap();
        let mut out = Vec::new();
        write_guide(&guide, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prints_sections_and_commands() {
        let text = print(
            r#"
title = "Ops"
summary = "Handy commands."

[[sections]]
id = "disk"
title = "Disk space"

[[sections.entries]]
kind = "list"
ordered = true
items = ["Check usage", "Clean up"]

[[sections.entries]]
kind = "command"
label = "Disk usage"
commands = ["df -h", "du -sh /var/log"]

[[sections.entries]]
kind = "command"
commands = "sudo apt autoremove"
"#,
        );
        assert_eq!(
            text,
            "Ops\n===\n\nHandy commands.\n\n## Disk space\n\n1. Check usage\n2. Clean up\n\n\
             [Disk usage]\n    df -h\n    du -sh /var/log\n\n[Command]\n    sudo apt autoremove\n"
        );
    }

    #[test]
    fn prints_links_and_callouts() {
        let text = print(
            r#"
title = "T"

[[sections]]
id = "s"
title = "S"

[[sections.entries]]
kind = "link"
prefix = "Docs:"
text = "Nginx"
url = "https://nginx.org"

[[sections.entries]]
kind = "callout"
title = "Note"
body = "Buckets are global."
link = { text = "Console", url = "https://example.com" }
"#,
        );
        assert!(text.contains("Docs: Nginx <https://nginx.org>\n"), "{text}");
        assert!(
            text.contains("> Note\n> Buckets are global.\n> Console <https://example.com>\n"),
            "{text}"
        );
    }
}
