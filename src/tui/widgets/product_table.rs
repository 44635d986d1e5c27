use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use super::panel;
use crate::catalog::{Column, Product};
use crate::tui::app::{App, Focus, HeaderHitboxes, InputMode};

pub struct ProductTableWidget;

const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Percentage(14),
    Constraint::Percentage(34),
    Constraint::Percentage(22),
    Constraint::Percentage(12),
    Constraint::Percentage(18),
];

impl ProductTableWidget {
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let theme = app.theme.clone();
        let block = panel("Products", app.focus == Focus::Table, &theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(2), Constraint::Length(1)])
            .split(inner);

        let view = app.list_view.view();
        let sort = view.sort;

        // Header text doubles as the click target for sorting.
        let header_cells = Column::ALL.iter().enumerate().map(|(i, &column)| {
            let (marker, style) = if column == sort.column {
                (sort.direction.arrow(), theme.sort_active)
            } else {
                ("", theme.table_header)
            };
            Cell::from(Line::from(vec![
                Span::styled(format!("{} ", i + 1), theme.sort_inactive),
                Span::styled(format!("{} {}", column.title(), marker), style),
            ]))
        });
        let header = Row::new(header_cells).height(1);

        let rows: Vec<Row> = view.visible_rows.iter().map(|p| product_row(p, &theme)).collect();
        let empty = rows.is_empty();

        let table = Table::new(rows, COLUMN_WIDTHS)
            .header(header)
            .column_spacing(1)
            .highlight_style(theme.highlight_style)
            .highlight_symbol("");

        let footer = if app.input_mode == InputMode::GoToPage {
            Line::from(vec![
                Span::styled("Go to page: ", theme.input_active),
                Span::styled(app.page_input.clone(), Style::default().fg(theme.input_text)),
                Span::styled("█", theme.input_active),
            ])
        } else {
            Line::from(Span::styled(
                format!(
                    "Page {} of {} | {} matching | {}",
                    view.current_page,
                    view.total_pages.max(1),
                    view.matched,
                    sort_label(sort.column, sort.direction.to_string())
                ),
                theme.pagination_text,
            ))
        };

        app.header_hitboxes = header_hitboxes(chunks[0]);
        f.render_stateful_widget(table, chunks[0], &mut app.table_state);
        if empty {
            let message = if app.list_view.collection().is_empty() { "No products" } else { "No products match the filter" };
            let placeholder_area = Rect { y: chunks[0].y + 1, height: 1, ..chunks[0] };
            f.render_widget(
                Paragraph::new(Span::styled(message, theme.input_placeholder)),
                placeholder_area,
            );
        }
        f.render_widget(Paragraph::new(footer), chunks[1]);
    }
}

fn product_row<'a>(product: &Product, theme: &crate::tui::theme::AppTheme) -> Row<'a> {
    let cells = Column::ALL.iter().map(|&column| {
        let text = product.display_field(column);
        match column {
            Column::Price => Cell::from(Span::styled(text, theme.price_text)),
            _ => Cell::from(text),
        }
    });
    Row::new(cells).style(Style::default().fg(theme.primary_foreground))
}

fn sort_label(column: Column, direction: String) -> String {
    format!("sorted by {} {}", column.title().to_lowercase(), direction)
}

/// Mirrors the table's column split so mouse clicks can be mapped back to a
/// header cell.
fn header_hitboxes(table_area: Rect) -> HeaderHitboxes {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(COLUMN_WIDTHS)
        .split(Rect { height: 1, ..table_area });
    HeaderHitboxes {
        y: table_area.y,
        columns: cells.iter().copied().zip(Column::ALL).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hitboxes_cover_the_header_row() {
        let hitboxes = header_hitboxes(Rect::new(1, 2, 100, 10));
        assert_eq!(hitboxes.y, 2);
        assert_eq!(hitboxes.columns.len(), 5);
        assert_eq!(hitboxes.column_at(1, 2), Some(Column::Code));
        assert_eq!(hitboxes.column_at(99, 2), Some(Column::Price));
    }
}
