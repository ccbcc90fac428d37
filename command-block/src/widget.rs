use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::WidgetRef;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::clipboard::ClipboardWriter;
use crate::copy_state::COPIED_REVERT_DELAY;
use crate::copy_state::CopyState;
use crate::copy_state::CopyStatus;
use crate::input::CommandInput;

/// Caption used when a block is constructed without a label.
pub const DEFAULT_LABEL: &str = "Command";

/// Called after a copy action changes the state of its block from outside
/// the render path (the result arriving, the revert timer firing). UIs use it
/// to schedule a redraw.
pub type ChangeNotifier = Arc<dyn Fn() + Send + Sync>;

/// A labeled, read-only block of shell commands with a copy control.
pub struct CommandBlock {
    commands: CommandInput,
    label: Option<String>,
    border_style: Style,
    focused_border_style: Style,
    focused: bool,
    scroll_x: u16,
    status: CopyStatus,
    notifier: Option<ChangeNotifier>,
}

impl fmt::Debug for CommandBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBlock")
            .field("commands", &self.commands)
            .field("label", &self.label)
            .field("focused", &self.focused)
            .field("scroll_x", &self.scroll_x)
            .field("copy_state", &self.copy_state())
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

impl CommandBlock {
    pub fn new(commands: impl Into<CommandInput>) -> Self {
        Self {
            commands: commands.into(),
            label: None,
            border_style: Style::new().dim(),
            focused_border_style: Style::new().cyan(),
            focused: false,
            scroll_x: 0,
            status: CopyStatus::default(),
            notifier: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Cosmetic only.
    pub fn with_border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Cosmetic only.
    pub fn with_focused_border_style(mut self, style: Style) -> Self {
        self.focused_border_style = style;
        self
    }

    pub fn with_change_notifier(mut self, notifier: ChangeNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn commands(&self) -> &CommandInput {
        &self.commands
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }

    pub fn display_text(&self) -> Cow<'_, str> {
        self.commands.display_text()
    }

    pub fn copy_state(&self) -> CopyState {
        self.status.get()
    }

    /// "Copy" or "Copied".
    pub fn action_label(&self) -> &'static str {
        self.copy_state().action_label()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll_x
    }

    pub fn scroll_left(&mut self, columns: u16) {
        self.scroll_x = self.scroll_x.saturating_sub(columns);
    }

    /// Scroll the text region right, stopping at the last column of the
    /// widest line.
    pub fn scroll_right(&mut self, columns: u16) {
        let max = self.max_line_width().saturating_sub(1);
        self.scroll_x = self.scroll_x.saturating_add(columns).min(max);
    }

    /// Rows needed to draw the block at `width`: the bordered header row, one
    /// row per command line, and the bottom border. Lines never wrap, so the
    /// width does not matter.
    pub fn desired_height(&self, _width: u16) -> u16 {
        let lines = self.display_text().lines().count().max(1);
        u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2)
    }

    fn max_line_width(&self) -> u16 {
        let widest = self
            .display_text()
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0);
        u16::try_from(widest).unwrap_or(u16::MAX)
    }

    /// Detach a copy of the current text together with this block's state so
    /// the copy can run on a spawned task.
    pub fn copy_action(&self) -> CopyAction {
        CopyAction {
            text: self.display_text().into_owned(),
            status: self.status.clone(),
            notifier: self.notifier.clone(),
        }
    }

    /// Copy the block's text to `clipboard`. Never fails: a rejected write
    /// leaves the control reading "Copy".
    pub async fn copy<C>(&self, clipboard: &C)
    where
        C: ClipboardWriter + ?Sized,
    {
        self.copy_action().run(clipboard).await;
    }
}

/// One pending copy of a block's text, detached from the block itself.
pub struct CopyAction {
    text: String,
    status: CopyStatus,
    notifier: Option<ChangeNotifier>,
}

impl fmt::Debug for CopyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyAction")
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

impl CopyAction {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub async fn run<C>(self, clipboard: &C)
    where
        C: ClipboardWriter + ?Sized,
    {
        let generation = self.status.begin();
        let copied = clipboard.write_text(&self.text).await.is_ok();

        if self.status.finish(generation, copied) {
            notify(self.notifier.as_ref());
            if copied {
                schedule_revert(self.status, generation, self.notifier);
            }
        }
    }
}

fn notify(notifier: Option<&ChangeNotifier>) {
    if let Some(notifier) = notifier {
        notifier();
    }
}

/// One-shot timer that puts the control back to "Copy". Runs on the ambient
/// tokio runtime when there is one, otherwise on a short-lived thread.
fn schedule_revert(status: CopyStatus, generation: u64, notifier: Option<ChangeNotifier>) {
    let revert = move || {
        if status.revert(generation) {
            notify(notifier.as_ref());
        }
    };

    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                tokio::time::sleep(COPIED_REVERT_DELAY).await;
                revert();
            });
        }
        Err(_) => {
            std::thread::spawn(move || {
                std::thread::sleep(COPIED_REVERT_DELAY);
                revert();
            });
        }
    }
}

/// Columns taken by the widest action title, ` [Copied] `.
const ACTION_TITLE_WIDTH: usize = 10;

/// Cut `text` to at most `max_width` columns, ending in `…` when shortened.
fn truncate_to_width(text: &str, max_width: usize) -> Cow<'_, str> {
    if text.width() <= max_width {
        return Cow::Borrowed(text);
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    Cow::Owned(out)
}

impl WidgetRef for CommandBlock {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let state = self.copy_state();
        let action = match state {
            CopyState::Idle => Span::from(state.action_label()).bold(),
            CopyState::Copied => Span::from(state.action_label()).green().bold(),
        };
        let border_style = if self.focused {
            self.focused_border_style
        } else {
            self.border_style
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_top(Line::from(vec![" [".dim(), action, "] ".dim()]).right_aligned());
        // Left titles are drawn over right ones, so the label gets whatever
        // the widest action control leaves free.
        let label_budget = usize::from(area.width.saturating_sub(2))
            .saturating_sub(ACTION_TITLE_WIDTH + 1 + 2);
        let block = if label_budget > 0 {
            let label = truncate_to_width(self.label(), label_budget);
            block.title_top(
                Line::from(vec![" ".into(), Span::from(label), " ".into()]).left_aligned(),
            )
        } else {
            block
        };

        let inner = block.inner(area);
        block.render_ref(area, buf);

        let max_scroll = self.max_line_width().saturating_sub(inner.width);
        let text = self.display_text();
        Paragraph::new(Text::raw(text.as_ref()))
            .scroll((0, self.scroll_x.min(max_scroll)))
            .render_ref(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render_rows(block: &CommandBlock, width: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, block.desired_height(width));
        let mut buf = Buffer::empty(area);
        block.render_ref(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn header_defaults_to_command_label() {
        let block = CommandBlock::new("df -h");
        assert_eq!(block.label(), "Command");
        let rows = render_rows(&block, 30);
        assert!(rows[0].contains(" Command "), "header: {:?}", rows[0]);
        assert!(rows[0].contains("[Copy]"), "header: {:?}", rows[0]);
    }

    #[test]
    fn header_shows_given_label() {
        let block = CommandBlock::new("sudo apt install -y nginx").with_label("Nginx");
        assert_eq!(block.label(), "Nginx");
        let rows = render_rows(&block, 40);
        assert!(rows[0].contains(" Nginx "));
        assert!(!rows[0].contains("Command"));
    }

    #[test]
    fn long_label_never_hides_the_action() {
        let block = CommandBlock::new("chmod 400 key.pem")
            .with_label("Change permissions of the private key file");
        for width in [80, 50, 40, 20, 14] {
            let header = &render_rows(&block, width)[0];
            assert!(header.contains("[Copy]"), "width {width}: {header:?}");
        }

        let header = &render_rows(&block, 40)[0];
        assert!(header.contains(" Change permissions of th… "), "{header:?}");
        assert!(render_rows(&block, 80)[0].contains(" Change permissions of the private key file "));
    }

    #[test]
    fn truncation_counts_display_columns() {
        assert_eq!(truncate_to_width("pm2 list", 8), "pm2 list");
        assert_eq!(truncate_to_width("pm2 list", 5), "pm2 …");
        assert_eq!(truncate_to_width("日本語ラベル", 7), "日本語…");
    }

    #[test]
    fn text_region_shows_each_line_verbatim() {
        let block = CommandBlock::new(["cd ~/.ssh", "cat id_rsa.pub"]);
        let rows = render_rows(&block, 30);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1], format!("│{:<28}│", "cd ~/.ssh"));
        assert_eq!(rows[2], format!("│{:<28}│", "cat id_rsa.pub"));
        assert!(rows[3].starts_with('╰'));
    }

    #[test]
    fn empty_command_still_draws_one_row() {
        let block = CommandBlock::new("");
        assert_eq!(block.display_text(), "");
        assert_eq!(block.desired_height(20), 3);
        let rows = render_rows(&block, 20);
        assert_eq!(rows[1], format!("│{:18}│", ""));
    }

    #[test]
    fn scroll_is_clamped_to_widest_line() {
        let mut block = CommandBlock::new(["short", "0123456789"]);
        block.scroll_right(100);
        assert_eq!(block.scroll_offset(), 9);
        block.scroll_left(4);
        assert_eq!(block.scroll_offset(), 5);
        block.scroll_left(40);
        assert_eq!(block.scroll_offset(), 0);
    }

    #[test]
    fn scrolled_text_hides_leading_columns() {
        let mut block = CommandBlock::new("0123456789abcdef");
        block.scroll_right(4);
        let rows = render_rows(&block, 10);
        // Inner width is 8; offset 4 leaves "456789ab" visible.
        assert_eq!(rows[1], "│456789ab│");

        // Wide enough to show everything: offset is ignored at render time.
        let rows = render_rows(&block, 30);
        assert!(rows[1].starts_with("│0123456789abcdef"));
    }

    #[test]
    fn focus_only_changes_border_style() {
        let mut block = CommandBlock::new("pm2 list");
        let unfocused = render_rows(&block, 20);
        block.set_focused(true);
        assert!(block.is_focused());
        assert_eq!(render_rows(&block, 20), unfocused);
    }
}
