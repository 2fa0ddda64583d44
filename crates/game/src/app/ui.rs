use engine::{ItemKind, MapBounds, PlayerStatus, RenderCell, Rgb};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::input::HELP_LINES;

const HELP_BOX_X: u16 = 50;
const HELP_BOX_WIDTH: u16 = 30;

/// Everything one frame needs. Borrowed from the running app.
pub(crate) struct View<'a> {
    pub(crate) bounds: MapBounds,
    pub(crate) hud_height: u16,
    pub(crate) cells: &'a [RenderCell],
    pub(crate) status: &'a PlayerStatus,
    pub(crate) neighborhood: &'a str,
    pub(crate) message: &'a str,
    pub(crate) game_over: bool,
    pub(crate) show_help: bool,
}

pub(crate) fn draw(f: &mut Frame, view: &View<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(view.hud_height)])
        .split(f.area());

    render_map(f, chunks[0], view);
    render_hud(f, chunks[1], view);
    if view.show_help {
        render_help(f, chunks[0]);
    }
}

fn render_map(f: &mut Frame, area: Rect, view: &View<'_>) {
    let width = usize::try_from(view.bounds.width).unwrap_or(0);
    let height = usize::try_from(view.bounds.height).unwrap_or(0);
    let mut grid = vec![vec![(' ', Color::Reset); width]; height];

    // Cells arrive in draw order, so later entries overwrite earlier ones.
    for cell in view.cells {
        let (Ok(x), Ok(y)) = (usize::try_from(cell.x), usize::try_from(cell.y)) else {
            continue;
        };
        if let Some(slot) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
            *slot = (cell.glyph, to_color(cell.color));
        }
    }

    let lines = grid
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(glyph, color)| Span::styled(glyph.to_string(), Style::default().fg(color)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect::<Vec<_>>();

    f.render_widget(Paragraph::new(lines), area);
}

fn render_hud(f: &mut Frame, area: Rect, view: &View<'_>) {
    let status = view.status;
    let title = Line::from(format!(" {} ", view.neighborhood)).centered();

    let mut lines = vec![
        Line::from(vec![
            Span::styled("HP ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("{}/{}", status.health, status.max_health),
                Style::default().fg(Color::Red),
            ),
            Span::raw("   "),
            Span::styled("Stamina ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("{}/{}", status.stamina, status.max_stamina),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(format!("Inventory: {}", inventory_summary(&status.inventory))),
    ];
    if view.game_over {
        lines.push(Line::from(Span::styled(
            "You have died. Press q to quit.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    } else if !view.message.is_empty() {
        lines.push(Line::from(view.message.to_string()));
    }

    let hud = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(hud, area);
}

fn render_help(f: &mut Frame, map_area: Rect) {
    let height = u16::try_from(HELP_LINES.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = Rect::new(HELP_BOX_X, 0, HELP_BOX_WIDTH, height).intersection(map_area);
    if area.is_empty() {
        return;
    }

    let lines = HELP_LINES
        .iter()
        .map(|(key, description)| Line::from(format!("{key} - {description}")))
        .collect::<Vec<_>>();
    let help = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from("Help Menu").centered()),
        );
    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

fn inventory_summary(inventory: &[ItemKind]) -> String {
    if inventory.is_empty() {
        return "empty".to_string();
    }
    inventory
        .iter()
        .map(|item| item.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn to_color(color: Rgb) -> Color {
    let Rgb(r, g, b) = color;
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use engine::{PlayerStats, Simulation};
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn frame_shows_player_and_neighborhood_title() {
        let sim = Simulation::new(MapBounds::new(20, 8), (3, 2), PlayerStats::default());
        let cells = sim.render_cells();
        let status = sim.player_status();
        let view = View {
            bounds: sim.world().bounds(),
            hud_height: 5,
            cells: &cells,
            status: &status,
            neighborhood: "MAPLE RIDGE",
            message: "",
            game_over: false,
            show_help: false,
        };
        let mut terminal = Terminal::new(TestBackend::new(40, 13)).expect("terminal");
        terminal.draw(|f| draw(f, &view)).expect("draw");

        let text = screen_text(&terminal);
        assert!(text.contains("MAPLE RIDGE"));
        assert!(text.contains('@'));
        assert!(text.contains("10/10"));
        assert!(text.contains("empty"));
    }

    #[test]
    fn inventory_lists_item_names() {
        assert_eq!(
            inventory_summary(&[ItemKind::Food, ItemKind::Shiny]),
            "Food, Bright, shiny object"
        );
    }
}
