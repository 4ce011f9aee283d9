//! Plain-text rendering of a [`ViewState`].

use super::{Cell, PaginationControls, Resource, ViewState, APP_TITLE};

const NO_DATA: &str = "No data available";

/// Draw the whole view: heading, tab bar, title, table and page controls.
pub fn render(state: &ViewState) -> String {
    let mut output = String::new();

    output.push_str(APP_TITLE);
    output.push_str("\n\n");
    output.push_str(&render_tabs(state.active()));
    output.push_str("\n\n");
    output.push_str(state.title());
    output.push('\n');

    if state.rows().is_empty() {
        output.push_str(NO_DATA);
        output.push('\n');
        return output;
    }

    let headers: Vec<&str> = state.columns().iter().map(|f| f.label).collect();
    output.push_str(&render_table(&headers, state.rows()));

    if let Some(controls) = state.pagination() {
        output.push_str(&render_pagination(&controls));
        output.push('\n');
    }

    output
}

fn render_tabs(active: Resource) -> String {
    Resource::ALL
        .iter()
        .map(|r| {
            if *r == active {
                format!("[{}]", r.title())
            } else {
                format!(" {} ", r.title())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lines of a cell; links are stacked one per line.
fn cell_lines(cell: &Cell) -> Vec<String> {
    match cell {
        Cell::Text(text) if text.is_empty() => vec![String::new()],
        Cell::Text(text) => text.lines().map(str::to_string).collect(),
        Cell::Links(links) if links.is_empty() => vec![String::new()],
        Cell::Links(links) => links
            .iter()
            .map(|l| format!("{} <{}>", l.name, l.url))
            .collect(),
    }
}

fn render_table(headers: &[&str], rows: &[Vec<Cell>]) -> String {
    let rows: Vec<Vec<Vec<String>>> = rows
        .iter()
        .map(|row| row.iter().map(cell_lines).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, lines) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
                *width = (*width).max(widest);
            }
        }
    }

    let border = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let mut output = border.clone();
    output.push_str(&render_line(&widths, |i| headers.get(i).copied().unwrap_or("")));
    output.push_str(&border);

    for row in &rows {
        let height = row.iter().map(Vec::len).max().unwrap_or(1);
        for n in 0..height {
            output.push_str(&render_line(&widths, |i| {
                row.get(i)
                    .and_then(|lines| lines.get(n))
                    .map(String::as_str)
                    .unwrap_or("")
            }));
        }
    }
    output.push_str(&border);

    output
}

fn render_line<'a>(widths: &[usize], text: impl Fn(usize) -> &'a str) -> String {
    let mut line = String::from("|");
    for (i, width) in widths.iter().enumerate() {
        let value = text(i);
        let padding = width - value.chars().count();
        line.push(' ');
        line.push_str(value);
        line.push_str(&" ".repeat(padding + 1));
        line.push('|');
    }
    line.push('\n');
    line
}

fn render_pagination(controls: &PaginationControls) -> String {
    let mut parts = Vec::with_capacity(controls.pages.len() + 2);

    parts.push(control_label("Previous", controls.previous.disabled));
    for button in &controls.pages {
        parts.push(if button.current {
            format!("[{}]", button.number)
        } else {
            button.number.to_string()
        });
    }
    parts.push(control_label("Next", controls.next.disabled));

    parts.join(" ")
}

/// Disabled controls are shown in parentheses.
fn control_label(label: &str, disabled: bool) -> String {
    if disabled {
        format!("({})", label)
    } else {
        label.to_string()
    }
}
