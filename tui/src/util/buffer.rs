use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// Copy rows of `src`, starting at `src_first_row`, into `dst_area` of `dst`.
///
/// Used to draw a widget that is only partly inside the viewport: render it
/// into a scratch buffer at full height, then copy the visible slice. Both the
/// source rows and the destination rectangle are clipped to their buffers.
pub fn copy_rows(src: &Buffer, src_first_row: u16, dst: &mut Buffer, dst_area: Rect) {
    let rect = dst.area.intersection(dst_area);
    if rect.width == 0 || rect.height == 0 {
        return;
    }

    let width = rect.width.min(src.area.width);
    for row in 0..rect.height {
        let src_y = src_first_row.saturating_add(row);
        if src_y >= src.area.height {
            break;
        }
        for col in 0..width {
            let cell = &src[(src.area.x + col, src.area.y + src_y)];
            dst[(rect.x + col, rect.y + row)] = cell.clone();
        }
    }
}
