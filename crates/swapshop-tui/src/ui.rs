// UI rendering logic
use crate::{App, InputMode, Screen};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use swapshop_core::{
    interest::{interest_badge, interest_button_label},
    FilterCriteria, InterestSet, Item, ALLOWED_TAGS,
};

const ACCENT: Color = Color::Rgb(135, 206, 235);
const HEART: Color = Color::Rgb(255, 105, 135);
const MUTED: Color = Color::Rgb(128, 128, 128);

pub fn render(frame: &mut Frame, app: &mut App) {
    let show_search = app.screen == Screen::Market;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if show_search {
            vec![
                Constraint::Length(3), // Header
                Constraint::Length(3), // Search input
                Constraint::Min(5),    // Main content
                Constraint::Length(1), // Status bar
            ]
        } else {
            vec![
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ]
        })
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let (content_area, status_area) = if show_search {
        render_search_input(frame, app, chunks[1]);
        (chunks[2], chunks[3])
    } else {
        (chunks[1], chunks[2])
    };

    if let (Some(reason), Screen::Market) = (&app.load_error, app.screen) {
        render_load_error(frame, reason, content_area);
    } else {
        match app.screen {
            Screen::Market => render_market_list(frame, app, content_area),
            Screen::Interested => render_interested_list(frame, app, content_area),
            Screen::MyItems => render_my_items(frame, app, content_area),
            Screen::Detail => {
                if let Some(item) = &app.detail {
                    let interests = app.can_flag_interest().then_some(&app.interests);
                    render_detail(frame, item, interests, content_area);
                }
            }
        }
    }

    if app.input_mode == InputMode::FilterPicker {
        let area = frame.area();
        render_filter_picker(frame, &app.criteria, app.filter_cursor, area);
    }

    render_status_bar(frame, app, status_area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let tab = |label: &'static str, screen: Screen| {
        let style = if app.screen == screen
            || (app.screen == Screen::Detail && app.detail_origin == screen)
        {
            Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        Span::styled(format!(" {} ", label), style)
    };

    let line = Line::from(vec![
        Span::styled("swapshop", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        tab("Market", Screen::Market),
        Span::raw(" "),
        tab("Interested", Screen::Interested),
        Span::raw(" "),
        tab("My Items", Screen::MyItems),
        Span::raw("  "),
        Span::styled(
            format!("{} {}", interest_badge(true), app.interests.len()),
            Style::default().fg(HEART).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  user {}", app.context.user_id()),
            Style::default().fg(MUTED),
        ),
    ]);

    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let input_style = match app.input_mode {
        InputMode::Searching => Style::default().fg(Color::Yellow),
        InputMode::Normal | InputMode::FilterPicker => Style::default(),
    };

    let input = Paragraph::new(app.criteria.name_query.as_str())
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search for items... (/ to type, ESC when done)")
                .border_style(input_style),
        );

    frame.render_widget(input, area);

    if app.input_mode == InputMode::Searching {
        frame.set_cursor_position((
            area.x + app.criteria.name_query.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}

/// Whole-screen loading view shown while market data is fetched
pub fn render_loading_frame(frame: &mut Frame) {
    let area = frame.area();
    render_loading(frame, area);
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Loading marketplace...",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_load_error(frame: &mut Frame, reason: &str, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Could not load the marketplace",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(reason.to_string(), Style::default().fg(MUTED))),
        Line::from(""),
        Line::from(Span::styled("Press r to retry", Style::default().fg(Color::Yellow))),
    ];
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Market "))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Three-line list entry: name with heart, tags, location
fn item_row<'a>(item: &'a Item, interests: Option<&InterestSet>) -> ListItem<'a> {
    let mut title = Vec::new();
    if let Some(interests) = interests {
        title.push(Span::styled(
            interest_badge(interests.is_interested(item)),
            Style::default().fg(HEART),
        ));
        title.push(Span::raw(" "));
    }
    title.push(Span::styled(
        item.name.as_str(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    if !item.description.is_empty() {
        title.push(Span::styled(
            format!("  {}", truncate(&item.description, 50)),
            Style::default().fg(MUTED),
        ));
    }

    ListItem::new(vec![
        Line::from(title),
        Line::from(vec![
            Span::styled("    Tags: ", Style::default().fg(MUTED)),
            Span::raw(item.trade_tags.join(", ")),
            Span::styled("   Looking for: ", Style::default().fg(MUTED)),
            Span::raw(item.looking_for.join(", ")),
        ]),
        Line::from(Span::styled(
            format!("    {}", item.location_display()),
            Style::default().fg(MUTED),
        )),
    ])
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

fn item_list<'a>(rows: Vec<ListItem<'a>>, title: String) -> List<'a> {
    List::new(rows)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ")
}

fn render_empty(frame: &mut Frame, title: String, message: &str, area: Rect) {
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(MUTED))),
    ])
    .block(Block::default().borders(Borders::ALL).title(title))
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_market_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let visible = swapshop_core::filter_items(app.context.market_items(), &app.criteria);
    let title = format!(" Market ({}) ", visible.len());

    if visible.is_empty() {
        let message = if app.criteria.looking_for.is_empty() || app.criteria.trading_away.is_empty() {
            "Pick at least one tag in each filter column (f)"
        } else {
            "No items match your filters"
        };
        render_empty(frame, title, message, area);
        return;
    }

    let rows = visible
        .iter()
        .map(|item| item_row(item, Some(&app.interests)))
        .collect();
    frame.render_stateful_widget(item_list(rows, title), area, &mut app.market_state);
}

fn render_interested_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = format!(" Interested ({}) ", app.interests.len());

    if app.interests.is_empty() {
        render_empty(frame, title, "Nothing flagged yet - press i on an item", area);
        return;
    }

    let rows = app
        .interests
        .iter()
        .map(|item| item_row(item, Some(&app.interests)))
        .collect();
    frame.render_stateful_widget(item_list(rows, title), area, &mut app.interested_state);
}

fn render_my_items(frame: &mut Frame, app: &mut App, area: Rect) {
    let items = app.context.user_items();
    let title = format!(" My Items ({}) ", items.len());

    if items.is_empty() {
        render_empty(frame, title, "You haven't listed anything", area);
        return;
    }

    let rows = items.iter().map(|item| item_row(item, None)).collect();
    frame.render_stateful_widget(item_list(rows, title), area, &mut app.my_items_state);
}

/// Full item view. `interests` is None for the user's own items.
fn render_detail(frame: &mut Frame, item: &Item, interests: Option<&InterestSet>, area: Rect) {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(MUTED));

    let mut lines = vec![
        Line::from(Span::styled(
            item.name.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(item.description.as_str()),
        Line::from(""),
        Line::from(vec![label("Location:     "), Span::raw(item.location_display())]),
        Line::from(vec![label("Tags:         "), Span::raw(item.trade_tags.join(", "))]),
        Line::from(vec![label("Looking for:  "), Span::raw(item.looking_for.join(", "))]),
        Line::from(vec![label("Posted:       "), Span::raw(item.posted_display())]),
    ];

    if let Some(owner) = &item.owner {
        lines.push(Line::from(vec![label("Owner:        "), Span::raw(owner.as_str())]));
    }
    if let Some(image) = &item.image {
        lines.push(Line::from(vec![label("Image:        "), Span::raw(image.as_str())]));
    }

    if let Some(interests) = interests {
        let interested = interests.is_interested(item);
        let button_style = if interested {
            Style::default().fg(Color::Black).bg(HEART).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", interest_button_label(interested)), button_style),
            Span::styled("  (i to toggle)", Style::default().fg(MUTED)),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Item Detail "))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_filter_picker(frame: &mut Frame, criteria: &FilterCriteria, cursor: usize, area: Rect) {
    let popup = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Filter Options ")
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let n = ALLOWED_TAGS.len();
    let trading_cursor = (cursor < n).then_some(cursor);
    let looking_cursor = (cursor >= n).then(|| cursor - n);

    render_tag_column(
        frame,
        "Trading away",
        |tag| criteria.trading_away.contains(tag),
        trading_cursor,
        columns[0],
    );
    render_tag_column(
        frame,
        "Looking for",
        |tag| criteria.looking_for.contains(tag),
        looking_cursor,
        columns[1],
    );

    let help = Paragraph::new(Span::styled(
        "j/k: move | TAB: column | SPACE: toggle | d: defaults | ESC: close",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(help, rows[1]);
}

fn render_tag_column<F>(
    frame: &mut Frame,
    title: &str,
    is_selected: F,
    cursor: Option<usize>,
    area: Rect,
) where
    F: Fn(&str) -> bool,
{
    let rows: Vec<ListItem> = ALLOWED_TAGS
        .iter()
        .map(|tag| {
            let (mark, style) = if is_selected(*tag) {
                ("[x]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            } else {
                ("[ ]", Style::default())
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::raw(" "),
                Span::styled(*tag, style),
            ]))
        })
        .collect();

    let border_style = if cursor.is_some() {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    };

    let list = List::new(rows)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(border_style),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(cursor);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let span = match app.input_mode {
        InputMode::Searching => Span::styled(
            "SEARCH | type to filter by name | ENTER/ESC: done",
            Style::default().fg(Color::Yellow),
        ),
        InputMode::FilterPicker => Span::styled(
            "FILTERS | SPACE: toggle tag | ESC: close",
            Style::default().fg(Color::Yellow),
        ),
        InputMode::Normal => {
            if let Some(message) = &app.status_message {
                Span::styled(message.as_str(), Style::default().fg(Color::Green))
            } else if app.load_error.is_some() {
                Span::styled("Load failed | r: retry | q: quit", Style::default().fg(Color::Red))
            } else {
                match app.screen {
                    Screen::Detail => Span::raw("i: interested | ESC: back | q: quit"),
                    _ => Span::raw(
                        "j/k: navigate | ENTER: details | i: interested | /: search | f: filters | TAB: screens | r: reload | q: quit",
                    ),
                }
            }
        }
    };

    frame.render_widget(Paragraph::new(Line::from(span)), area);
}

/// Centered popup rect, sized as a percentage of `r`
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
