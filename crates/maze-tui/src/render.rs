use crate::app::App;
use crate::stats;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use maze_core::{Coord, Direction, SessionState};
use std::io;

/// Width of the info panel to the right of the maze
const PANEL_WIDTH: u16 = 28;

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(
        stdout,
        Hide,
        SetBackgroundColor(app.theme.bg),
        Clear(ClearType::All)
    )?;

    // Each cell draws as a 3-wide interior inside shared 1-char borders.
    let maze_cols = app.session.grid().width() as u16 * 4 + 1;
    let maze_rows = app.session.grid().height() as u16 * 2 + 1;

    let total_width = maze_cols + 3 + PANEL_WIDTH;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > maze_rows + 4 { 2 } else { 1 };
    app.grid_origin = (start_x, start_y);

    render_maze(stdout, app, start_x, start_y, term_height)?;
    render_info_panel(stdout, app, start_x + maze_cols + 3, start_y)?;

    if let Some(ref message) = app.message {
        let message_y = term_height.saturating_sub(2);
        execute!(
            stdout,
            MoveTo(start_x, message_y),
            SetForegroundColor(app.theme.key),
            Print(message)
        )?;
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_maze(
    stdout: &mut io::Stdout,
    app: &App,
    x: u16,
    y: u16,
    term_height: u16,
) -> io::Result<()> {
    let grid = app.session.grid();
    let theme = &app.theme;

    for row in 0..grid.height() {
        let border_y = y + row as u16 * 2;
        let cell_y = border_y + 1;
        if cell_y >= term_height {
            break;
        }

        // Border row above this cell row; doorways show up as gaps.
        let mut line = String::new();
        for col in 0..grid.width() {
            line.push('+');
            line.push_str(if grid.is_open(Coord::new(col, row), Direction::Up) {
                "   "
            } else {
                "---"
            });
        }
        line.push('+');
        execute!(
            stdout,
            MoveTo(x, border_y),
            SetForegroundColor(theme.wall),
            Print(line)
        )?;

        // Cell row: vertical walls interleaved with cell markers.
        execute!(stdout, MoveTo(x, cell_y))?;
        for col in 0..grid.width() {
            let coord = Coord::new(col, row);
            let left = if grid.is_open(coord, Direction::Left) {
                ' '
            } else {
                '|'
            };
            execute!(stdout, SetForegroundColor(theme.wall), Print(left))?;

            let (marker, color) = cell_marker(app, coord);
            execute!(
                stdout,
                SetForegroundColor(color),
                Print(format!(" {} ", marker))
            )?;
        }
        let rightmost = Coord::new(grid.width() - 1, row);
        let right = if grid.is_open(rightmost, Direction::Right) {
            ' '
        } else {
            '|'
        };
        execute!(stdout, SetForegroundColor(theme.wall), Print(right))?;
    }

    // Bottom border.
    let bottom_y = y + grid.height() as u16 * 2;
    if bottom_y < term_height {
        let last_row = grid.height() - 1;
        let mut line = String::new();
        for col in 0..grid.width() {
            line.push('+');
            line.push_str(if grid.is_open(Coord::new(col, last_row), Direction::Down) {
                "   "
            } else {
                "---"
            });
        }
        line.push('+');
        execute!(
            stdout,
            MoveTo(x, bottom_y),
            SetForegroundColor(theme.wall),
            Print(line)
        )?;
    }

    Ok(())
}

/// Pick the marker for one cell. The player outranks the replay cursor,
/// which outranks the toggled highlights.
fn cell_marker(app: &App, coord: Coord) -> (char, Color) {
    let theme = &app.theme;
    if app.session.position() == Some(coord) {
        return ('@', theme.player);
    }
    if app.playback_cursor == Some(coord) {
        return ('*', theme.answer);
    }
    if app.show_splits
        && app.session.is_on_visited_path(coord)
        && app.session.is_decision_cell(coord)
    {
        return ('x', theme.split);
    }
    if app.show_visited && app.session.is_on_visited_path(coord) {
        return ('.', theme.visited);
    }
    (' ', theme.fg)
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let grid = app.session.grid();

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.fg),
        Print(format!("MAZE {}x{}", grid.width(), grid.height()))
    )?;

    let controls: [(&str, String); 8] = [
        ("arrows", "move".to_string()),
        ("click ", "jump to a visited cell".to_string()),
        (
            "a     ",
            if app.playback_cursor.is_some() {
                "stop the answer replay".to_string()
            } else {
                "replay the answer".to_string()
            },
        ),
        (
            "v     ",
            format!(
                "visited path {}",
                if app.show_visited { "(on)" } else { "(off)" }
            ),
        ),
        (
            "o     ",
            format!(
                "split offs {}",
                if app.show_splits { "(on)" } else { "(off)" }
            ),
        ),
        (
            "t     ",
            format!("stats {}", if app.show_stats { "(on)" } else { "(off)" }),
        ),
        ("n     ", "new maze".to_string()),
        ("q     ", "quit".to_string()),
    ];

    let mut line_y = y + 2;
    for (key, label) in &controls {
        execute!(
            stdout,
            MoveTo(x, line_y),
            SetForegroundColor(theme.key),
            Print(key),
            SetForegroundColor(theme.info),
            Print(format!("  {}", label))
        )?;
        line_y += 1;
    }

    if app.show_stats {
        line_y += 1;
        execute!(
            stdout,
            MoveTo(x, line_y),
            SetForegroundColor(theme.fg),
            Print(format!("Moves: {}", app.session.moves()))
        )?;
        line_y += 1;
        execute!(
            stdout,
            MoveTo(x, line_y),
            SetForegroundColor(theme.fg),
            Print(format!("Jumps: {}", app.session.jumps()))
        )?;
        line_y += 1;
    }

    if app.session.state() == SessionState::Finished {
        line_y += 1;
        execute!(
            stdout,
            MoveTo(x, line_y),
            SetForegroundColor(theme.success),
            Print("MAZE SOLVED!")
        )?;
        if let Some(summary) = app.session.summary() {
            for line in stats::summary_lines(&summary) {
                line_y += 1;
                execute!(
                    stdout,
                    MoveTo(x, line_y),
                    SetForegroundColor(theme.fg),
                    Print(line)
                )?;
            }
        }
        line_y += 2;
        execute!(
            stdout,
            MoveTo(x, line_y),
            SetForegroundColor(theme.info),
            Print("press n for a new maze")
        )?;
    }

    Ok(())
}
