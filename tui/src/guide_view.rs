//! The reference page: a single-open accordion of guide sections whose
//! command entries are [`CommandBlock`]s.

use std::cell::Cell;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::WidgetRef;
use setup_guide_command_block::CommandBlock;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::guide::Entry;
use crate::guide::Guide;
use crate::guide::Link;
use crate::util::buffer::copy_rows;

/// Columns moved per Left/Right press inside a command block.
const HSCROLL_STEP: u16 = 4;
/// Left margin of expanded section content.
const CONTENT_INDENT: u16 = 2;

const FOOTER_HINT: &str =
    "↑/↓ move · enter open/close · c copy · ←/→ scroll · g top · q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Section(usize),
    /// `block` counts command entries within the section, not all entries.
    Block { section: usize, block: usize },
}

enum Item {
    Heading(String),
    Note(String),
    List { ordered: bool, items: Vec<String> },
    Link { prefix: Option<String>, link: Link },
    Callout { title: String, body: String, link: Option<Link> },
    Command(CommandBlock),
}

struct SectionView {
    id: String,
    title: String,
    items: Vec<Item>,
}

impl SectionView {
    fn blocks(&self) -> impl Iterator<Item = &CommandBlock> {
        self.items.iter().filter_map(|item| match item {
            Item::Command(block) => Some(block),
            _ => None,
        })
    }

    fn block_mut(&mut self, index: usize) -> Option<&mut CommandBlock> {
        self.items
            .iter_mut()
            .filter_map(|item| match item {
                Item::Command(block) => Some(block),
                _ => None,
            })
            .nth(index)
    }
}

pub(crate) struct GuideView {
    title: String,
    summary: Option<String>,
    sections: Vec<SectionView>,
    expanded: Option<usize>,
    focus: Focus,
    scroll_y: Cell<u16>,
    app_event_tx: AppEventSender,
}

impl GuideView {
    pub(crate) fn new(guide: &Guide, app_event_tx: AppEventSender) -> Self {
        let notifier = app_event_tx.redraw_notifier();
        let sections = guide
            .sections
            .iter()
            .map(|section| SectionView {
                id: section.id.clone(),
                title: section.title.clone(),
                items: section
                    .entries
                    .iter()
                    .map(|entry| match entry {
                        Entry::Heading { text } => Item::Heading(text.clone()),
                        Entry::Note { text } => Item::Note(text.clone()),
                        Entry::List { ordered, items } => Item::List {
                            ordered: *ordered,
                            items: items.clone(),
                        },
                        Entry::Link { prefix, text, url } => Item::Link {
                            prefix: prefix.clone(),
                            link: Link {
                                text: text.clone(),
                                url: url.clone(),
                            },
                        },
                        Entry::Callout { title, body, link } => Item::Callout {
                            title: title.clone(),
                            body: body.clone(),
                            link: link.clone(),
                        },
                        Entry::Command { label, commands } => {
                            let block = CommandBlock::new(commands.clone())
                                .with_change_notifier(notifier.clone());
                            Item::Command(match label {
                                Some(label) => block.with_label(label.clone()),
                                None => block,
                            })
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: guide.title.clone(),
            summary: guide.summary.clone(),
            sections,
            expanded: None,
            focus: Focus::Section(0),
            scroll_y: Cell::new(0),
            app_event_tx,
        }
    }

    /// Open the section with `id` and focus its header. Returns `false` when
    /// no such section exists.
    pub(crate) fn expand_section(&mut self, id: &str) -> bool {
        match self.sections.iter().position(|s| s.id == id) {
            Some(index) => {
                self.expanded = Some(index);
                self.set_focus(Focus::Section(index));
                true
            }
            None => false,
        }
    }

    /// Open `index`, or close it when it is already open. Opening a section
    /// closes the previous one.
    pub(crate) fn toggle_section(&mut self, index: usize) {
        if index >= self.sections.len() {
            return;
        }
        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
        self.set_focus(Focus::Section(index));
    }

    pub(crate) fn focused_block(&self) -> Option<&CommandBlock> {
        match self.focus {
            Focus::Block { section, block } => self.sections.get(section)?.blocks().nth(block),
            Focus::Section(_) => None,
        }
    }

    fn focused_block_mut(&mut self) -> Option<&mut CommandBlock> {
        match self.focus {
            Focus::Block { section, block } => self.sections.get_mut(section)?.block_mut(block),
            Focus::Section(_) => None,
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        if let Some(block) = self.focused_block_mut() {
            block.set_focused(false);
        }
        self.focus = focus;
        if let Some(block) = self.focused_block_mut() {
            block.set_focused(true);
        }
    }

    /// Focus stops in page order: every section header, plus the command
    /// blocks of the open section right after its header.
    fn focus_order(&self) -> Vec<Focus> {
        let mut order = Vec::new();
        for (index, section) in self.sections.iter().enumerate() {
            order.push(Focus::Section(index));
            if self.expanded == Some(index) {
                order.extend(
                    (0..section.blocks().count()).map(|block| Focus::Block {
                        section: index,
                        block,
                    }),
                );
            }
        }
        order
    }

    fn move_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let Some(current) = order.iter().position(|f| *f == self.focus) else {
            self.set_focus(Focus::Section(0));
            return;
        };
        let next = if forward {
            (current + 1).min(order.len().saturating_sub(1))
        } else {
            current.saturating_sub(1)
        };
        if let Some(focus) = order.get(next) {
            self.set_focus(*focus);
        }
    }

    fn back_to_top(&mut self) {
        self.set_focus(Focus::Section(0));
        self.scroll_y.set(0);
    }

    /// Focus the last stop and scroll to the end of the page, past the last
    /// header to the trailer.
    fn to_bottom(&mut self) {
        if let Some(last) = self.focus_order().last() {
            self.set_focus(*last);
        }
        self.scroll_y.set(u16::MAX);
    }

    fn request_copy(&self) {
        if let Some(block) = self.focused_block() {
            tracing::debug!(label = block.label(), "copy requested");
            self.app_event_tx.send(AppEvent::Copy(block.copy_action()));
        }
    }

    pub(crate) fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_focus(false),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => self.move_focus(true),
            KeyCode::Enter | KeyCode::Char(' ') => match self.focus {
                Focus::Section(index) => self.toggle_section(index),
                Focus::Block { .. } => self.request_copy(),
            },
            KeyCode::Char('c') | KeyCode::Char('y') => self.request_copy(),
            KeyCode::Left | KeyCode::Char('h') => {
                if let Some(block) = self.focused_block_mut() {
                    block.scroll_left(HSCROLL_STEP);
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if let Some(block) = self.focused_block_mut() {
                    block.scroll_right(HSCROLL_STEP);
                }
            }
            KeyCode::Home | KeyCode::Char('g') => self.back_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.to_bottom(),
            KeyCode::Esc | KeyCode::Char('q') => {
                self.app_event_tx.send(AppEvent::ExitRequest);
                return;
            }
            _ => return,
        }
        self.app_event_tx.send(AppEvent::RequestRedraw);
    }

    fn layout(&self, width: u16) -> PageLayout<'_> {
        let mut page = PageLayout::default();
        let content_width = width.saturating_sub(CONTENT_INDENT);

        page.push_line(0, Line::from(self.title.clone().bold()));
        if let Some(summary) = &self.summary {
            for line in wrap(summary, width) {
                page.push_line(0, Line::from(line.dim()));
            }
        }
        page.push_blank();

        for (index, section) in self.sections.iter().enumerate() {
            let open = self.expanded == Some(index);
            let marker = if open { "▾" } else { "▸" };
            let header = format!("{marker} {}", section.title);
            let header = if self.focus == Focus::Section(index) {
                Line::from(header.cyan().bold())
            } else {
                Line::from(header.bold())
            };
            if self.focus == Focus::Section(index) {
                page.focus_span = Some((page.height, 1));
            }
            page.push_line(0, header);

            if !open {
                continue;
            }

            let mut block_index = 0;
            for (i, item) in section.items.iter().enumerate() {
                if i > 0 && !matches!(section.items[i - 1], Item::Heading(_)) {
                    page.push_blank();
                }
                match item {
                    Item::Heading(text) => {
                        page.push_line(CONTENT_INDENT, Line::from(text.clone().bold()));
                    }
                    Item::Note(text) => {
                        for line in wrap(text, content_width) {
                            page.push_line(CONTENT_INDENT, Line::from(line.dim()));
                        }
                    }
                    Item::List { ordered, items } => {
                        for (n, text) in items.iter().enumerate() {
                            let marker = if *ordered {
                                format!("{}. ", n + 1)
                            } else {
                                "• ".to_string()
                            };
                            let marker_width =
                                u16::try_from(marker.chars().count()).unwrap_or(u16::MAX);
                            for (row, line) in wrap(text, content_width.saturating_sub(marker_width))
                                .into_iter()
                                .enumerate()
                            {
                                let lead = if row == 0 {
                                    marker.clone()
                                } else {
                                    " ".repeat(marker.chars().count())
                                };
                                page.push_line(
                                    CONTENT_INDENT,
                                    Line::from(vec![lead.dim(), line.dim()]),
                                );
                            }
                        }
                    }
                    Item::Link { prefix, link } => {
                        page.push_line(CONTENT_INDENT, link_line(prefix.as_deref(), link));
                    }
                    Item::Callout { title, body, link } => {
                        let bar = || Span::from("│ ").yellow();
                        page.push_line(
                            CONTENT_INDENT,
                            Line::from(vec![bar(), title.clone().bold()]),
                        );
                        for line in wrap(body, content_width.saturating_sub(2)) {
                            page.push_line(CONTENT_INDENT, Line::from(vec![bar(), line.into()]));
                        }
                        if let Some(link) = link {
                            let mut line = link_line(None, link);
                            line.spans.insert(0, bar());
                            page.push_line(CONTENT_INDENT, line);
                        }
                    }
                    Item::Command(block) => {
                        let height = block.desired_height(content_width);
                        if self.focus
                            == (Focus::Block {
                                section: index,
                                block: block_index,
                            })
                        {
                            page.focus_span = Some((page.height, height));
                        }
                        page.push_block(CONTENT_INDENT, height, block);
                        block_index += 1;
                    }
                }
            }
            page.push_blank();
        }

        page.push_blank();
        page.push_line(0, Line::from("g: back to top".dim()));
        page
    }
}

fn wrap(text: &str, width: u16) -> Vec<String> {
    textwrap::wrap(text, usize::from(width.max(1)))
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

fn link_line(prefix: Option<&str>, link: &Link) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    if let Some(prefix) = prefix {
        spans.push(format!("{prefix} ").dim());
    }
    spans.push(link.text.clone().underlined());
    spans.push(" ".into());
    spans.push(format!("<{}>", link.url).cyan());
    Line::from(spans)
}

enum PieceKind<'a> {
    Line(Line<'a>),
    Block(&'a CommandBlock),
}

struct Piece<'a> {
    y: u16,
    height: u16,
    indent: u16,
    kind: PieceKind<'a>,
}

#[derive(Default)]
struct PageLayout<'a> {
    pieces: Vec<Piece<'a>>,
    height: u16,
    /// Rows occupied by the focused header or block.
    focus_span: Option<(u16, u16)>,
}

impl<'a> PageLayout<'a> {
    fn push_line(&mut self, indent: u16, line: Line<'a>) {
        self.pieces.push(Piece {
            y: self.height,
            height: 1,
            indent,
            kind: PieceKind::Line(line),
        });
        self.height = self.height.saturating_add(1);
    }

    fn push_blank(&mut self) {
        self.height = self.height.saturating_add(1);
    }

    fn push_block(&mut self, indent: u16, height: u16, block: &'a CommandBlock) {
        self.pieces.push(Piece {
            y: self.height,
            height,
            indent,
            kind: PieceKind::Block(block),
        });
        self.height = self.height.saturating_add(height);
    }
}

/// Smallest scroll offset change that brings `span` fully into a viewport of
/// `viewport` rows. Spans taller than the viewport are aligned to their top.
fn scroll_to_show(scroll: u16, span: (u16, u16), viewport: u16) -> u16 {
    let (top, height) = span;
    let bottom = top.saturating_add(height);
    if top < scroll || height >= viewport {
        top
    } else if bottom > scroll.saturating_add(viewport) {
        bottom.saturating_sub(viewport)
    } else {
        scroll
    }
}

impl WidgetRef for GuideView {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let body = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        let footer = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        Line::from(FOOTER_HINT.dim()).render_ref(footer, buf);

        let page = self.layout(body.width);
        let mut scroll = self
            .scroll_y
            .get()
            .min(page.height.saturating_sub(body.height));
        if let Some(span) = page.focus_span {
            scroll = scroll_to_show(scroll, span, body.height);
        }
        self.scroll_y.set(scroll);

        let view_bottom = scroll.saturating_add(body.height);
        for piece in &page.pieces {
            let bottom = piece.y.saturating_add(piece.height);
            if bottom <= scroll || piece.y >= view_bottom {
                continue;
            }
            let x = body.x.saturating_add(piece.indent);
            let width = body.width.saturating_sub(piece.indent);
            let top = piece.y.max(scroll);
            let visible = bottom.min(view_bottom) - top;
            let dst = Rect::new(x, body.y + (top - scroll), width, visible);

            match &piece.kind {
                PieceKind::Line(line) => line.render_ref(dst, buf),
                PieceKind::Block(block) if visible == piece.height => block.render_ref(dst, buf),
                PieceKind::Block(block) => {
                    let mut scratch = Buffer::empty(Rect::new(0, 0, width, piece.height));
                    block.render_ref(scratch.area, &mut scratch);
                    copy_rows(&scratch, top - piece.y, buf, dst);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use setup_guide_command_block::ClipboardWriteFailure;
    use setup_guide_command_block::ClipboardWriter;
    use setup_guide_command_block::CopyState;
    use std::sync::mpsc::Receiver;
    use std::sync::mpsc::channel;

    const SMALL_GUIDE: &str = r#"
title = "Guide"
summary = "Short summary."

[[sections]]
id = "base"
title = "Base setup"

[[sections.entries]]
kind = "heading"
text = "Update"

[[sections.entries]]
kind = "command"
label = "Apt maintenance"
commands = ["sudo apt update", "sudo apt upgrade -y"]

[[sections.entries]]
kind = "command"
commands = "sudo apt install -y zip unzip curl wget git"

[[sections]]
id = "disk"
title = "Disk space"

[[sections.entries]]
kind = "command"
label = "Disk usage"
commands = ["df -h"]
"#;

    fn view() -> (GuideView, Receiver<AppEvent>) {
        let (tx, rx) = channel();
        let guide = Guide::parse(SMALL_GUIDE).unwrap();
        (GuideView::new(&guide, AppEventSender::new(tx)), rx)
    }

    fn press(view: &mut GuideView, code: KeyCode) {
        view.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn render(view: &GuideView, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        view.render_ref(area, &mut buf);
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    fn copies(rx: &Receiver<AppEvent>) -> Vec<String> {
        rx.try_iter()
            .filter_map(|event| match event {
                AppEvent::Copy(action) => Some(action.text().to_string()),
                _ => None,
            })
            .collect()
    }

    impl GuideView {
        fn focus(&self) -> Focus {
            self.focus
        }

        fn expanded(&self) -> Option<usize> {
            self.expanded
        }
    }

    struct AcceptingClipboard;

    #[async_trait::async_trait]
    impl ClipboardWriter for AcceptingClipboard {
        async fn write_text(&self, _text: &str) -> Result<(), ClipboardWriteFailure> {
            Ok(())
        }
    }

    #[test]
    fn starts_collapsed() {
        let (view, _rx) = view();
        assert_eq!(view.expanded(), None);
        assert_eq!(view.focus(), Focus::Section(0));
        let rows = render(&view, 60, 12);
        assert_eq!(rows[0], "Guide");
        assert_eq!(rows[1], "Short summary.");
        assert_eq!(rows[3], "▸ Base setup");
        assert_eq!(rows[4], "▸ Disk space");
        assert!(!rows.iter().any(|r| r.contains("Apt maintenance")));
        assert!(rows[11].starts_with("↑/↓ move"));
    }

    #[test]
    fn only_one_section_is_open() {
        let (mut view, _rx) = view();
        press(&mut view, KeyCode::Enter);
        assert_eq!(view.expanded(), Some(0));

        view.toggle_section(1);
        assert_eq!(view.expanded(), Some(1));
        assert_eq!(view.focus(), Focus::Section(1));

        view.toggle_section(1);
        assert_eq!(view.expanded(), None);
    }

    #[test]
    fn open_section_shows_its_blocks() {
        let (mut view, _rx) = view();
        press(&mut view, KeyCode::Enter);
        let rows = render(&view, 60, 20);
        assert_eq!(rows[3], "▾ Base setup");
        assert_eq!(rows[4], "  Update");
        assert!(rows[5].contains(" Apt maintenance "), "{rows:#?}");
        assert!(rows[5].contains("[Copy]"));
        assert!(rows[6].contains("sudo apt update"));
        assert!(rows[7].contains("sudo apt upgrade -y"));
        // Unlabeled entries fall back to the default caption.
        assert!(rows[10].contains(" Command "), "{rows:#?}");
    }

    #[test]
    fn focus_walks_headers_and_open_blocks() {
        let (mut view, _rx) = view();
        press(&mut view, KeyCode::Down);
        assert_eq!(view.focus(), Focus::Section(1));
        press(&mut view, KeyCode::Up);

        press(&mut view, KeyCode::Enter);
        press(&mut view, KeyCode::Down);
        assert_eq!(view.focus(), Focus::Block { section: 0, block: 0 });
        assert!(view.focused_block().is_some_and(CommandBlock::is_focused));

        press(&mut view, KeyCode::Char('j'));
        assert_eq!(view.focus(), Focus::Block { section: 0, block: 1 });
        press(&mut view, KeyCode::Down);
        assert_eq!(view.focus(), Focus::Section(1));
        press(&mut view, KeyCode::Down);
        assert_eq!(view.focus(), Focus::Section(1));

        press(&mut view, KeyCode::Char('g'));
        assert_eq!(view.focus(), Focus::Section(0));
    }

    #[test]
    fn copy_targets_the_focused_block_only() {
        let (mut view, rx) = view();
        press(&mut view, KeyCode::Char('c'));
        assert_eq!(copies(&rx), Vec::<String>::new());

        press(&mut view, KeyCode::Enter);
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Char('c'));
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Enter);
        assert_eq!(
            copies(&rx),
            vec![
                "sudo apt update\nsudo apt upgrade -y".to_string(),
                "sudo apt install -y zip unzip curl wget git".to_string(),
            ]
        );
    }

    #[test]
    fn horizontal_scroll_moves_only_the_focused_block() {
        let (mut view, _rx) = view();
        press(&mut view, KeyCode::Enter);
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Right);
        press(&mut view, KeyCode::Char('l'));
        assert_eq!(view.focused_block().map(CommandBlock::scroll_offset), Some(8));
        press(&mut view, KeyCode::Left);
        assert_eq!(view.focused_block().map(CommandBlock::scroll_offset), Some(4));

        press(&mut view, KeyCode::Up);
        assert_eq!(view.focused_block().map(CommandBlock::scroll_offset), Some(0));
    }

    #[test]
    fn quit_keys_request_exit() {
        let (mut view, rx) = view();
        press(&mut view, KeyCode::Char('q'));
        assert!(matches!(rx.try_recv(), Ok(AppEvent::ExitRequest)));
        press(&mut view, KeyCode::Esc);
        assert!(matches!(rx.try_recv(), Ok(AppEvent::ExitRequest)));
    }

    #[test]
    fn focused_block_is_scrolled_into_view() {
        let (tx, _rx) = channel();
        let guide = Guide::embedded().unwrap();
        let mut view = GuideView::new(&guide, AppEventSender::new(tx));
        assert!(view.expand_section("step-1"));
        assert!(!view.expand_section("does-not-exist"));

        press(&mut view, KeyCode::End);
        // End lands on the last header; walk back to the last block of step 1.
        while !matches!(view.focus(), Focus::Block { .. }) {
            press(&mut view, KeyCode::Up);
        }
        let label = view.focused_block().map(|b| b.label().to_string()).unwrap();
        assert_eq!(label, "Create folder");

        let rows = render(&view, 80, 12);
        assert!(
            rows.iter().any(|r| r.contains(" Create folder ")),
            "{rows:#?}"
        );
        assert!(!rows.iter().any(|r| r.contains("Server Setup")));
    }

    #[test]
    fn end_scrolls_to_the_page_trailer() {
        let (tx, _rx) = channel();
        let guide = Guide::embedded().unwrap();
        let mut view = GuideView::new(&guide, AppEventSender::new(tx));
        assert!(view.expand_section("step-1"));

        let rows = render(&view, 80, 12);
        assert!(!rows.iter().any(|r| r == "g: back to top"));

        press(&mut view, KeyCode::End);
        let rows = render(&view, 80, 12);
        assert_eq!(rows[10], "g: back to top", "{rows:#?}");
        assert_eq!(rows[8], "▸ Create bucket");

        press(&mut view, KeyCode::Char('g'));
        assert_eq!(render(&view, 80, 12)[0], "Server Setup & Deployment Guide");
    }

    #[test]
    fn partially_visible_block_is_clipped() {
        let (mut view, _rx) = view();
        press(&mut view, KeyCode::Enter);
        // Body has 6 rows: title, summary, blank, header, heading and the
        // first row of the first block.
        let rows = render(&view, 60, 7);
        assert!(rows[5].contains(" Apt maintenance "), "{rows:#?}");
        assert!(rows[6].starts_with("↑/↓ move"));
    }

    #[tokio::test(start_paused = true)]
    async fn copied_feedback_reaches_the_page() {
        let (mut view, rx) = view();
        press(&mut view, KeyCode::Enter);
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Char('y'));

        let action = rx
            .try_iter()
            .find_map(|event| match event {
                AppEvent::Copy(action) => Some(action),
                _ => None,
            })
            .unwrap();
        // Drop the key presses' own redraw requests.
        rx.try_iter().for_each(drop);
        action.run(&AcceptingClipboard).await;

        assert_eq!(
            view.focused_block().map(CommandBlock::copy_state),
            Some(CopyState::Copied)
        );
        assert!(matches!(rx.try_recv(), Ok(AppEvent::RequestRedraw)));
        assert!(rx.try_recv().is_err());
        assert!(render(&view, 60, 20)[5].contains("[Copied]"));

        tokio::time::sleep(setup_guide_command_block::COPIED_REVERT_DELAY).await;
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        assert!(render(&view, 60, 20)[5].contains("[Copy]"));
        assert!(matches!(rx.try_recv(), Ok(AppEvent::RequestRedraw)));
        assert!(rx.try_recv().is_err());
    }
}
