//! CHANCE rendering (read-only from state).
//!
//! Every view registers its click targets while drawing. Overlays are drawn
//! last (toasts, then the open modal) so their targets sit on top.

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::auth::{AuthStep, AuthWizard, OTP_DIGITS};
use super::catalog::Opportunity;
use super::logic::{convert, format_money, format_number, roi_projection};
use super::mock::{
    HoldingStatus, StageState, APPLICATION_STAGES, CAPITAL_DEPLOYED, CHATS, CURRENT_PLAN,
    DEALS_CLOSED, DOCUMENTS, HOLDINGS, MY_LISTINGS, PENDING_ACTIONS, PORTFOLIO_INVESTED,
    PORTFOLIO_VALUE,
};
use super::notify::{Toast, ToastKind};
use super::registration::{PaymentFlow, RegistrationStep, RegistrationWizard, ALL_PLANS};
use super::session::{Currency, Role, View};
use super::state::{AppState, ALL_FILTERS, UNLOCK_COST};

const GOLD: Color = Color::Rgb(212, 175, 55);

/// Two border rows plus five content rows.
const CARD_HEIGHT: u16 = 7;
const TOAST_WIDTH: u16 = 46;
const MODAL_WIDTH: u16 = 60;

pub fn render(
    state: &AppState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let is_narrow = is_narrow_layout(area.width);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if is_narrow { 4 } else { 3 }), // Navigation
            Constraint::Min(5),    // View
            Constraint::Length(1), // Key help
        ])
        .split(area);

    render_nav(state, f, chunks[0], is_narrow, click_state);
    match state.session.view {
        View::Home => render_home(state, f, chunks[1], is_narrow, click_state),
        View::Marketplace => render_marketplace(state, f, chunks[1], is_narrow, click_state),
        View::Detail => render_detail(state, f, chunks[1], is_narrow, click_state),
        View::Dashboard => render_dashboard(state, f, chunks[1], is_narrow),
        View::Portfolio => render_portfolio(state, f, chunks[1]),
        View::Messages => render_messages(state, f, chunks[1], is_narrow, click_state),
    }
    render_key_help(state, f, chunks[2]);

    if let Some(wizard) = &state.auth {
        render_auth_modal(wizard, f, area, click_state);
    } else if let Some(wizard) = &state.registration {
        render_registration_modal(wizard, state.session.currency, f, area, click_state);
    }
    render_toasts(state, f, area);
}

// ── Shared helpers ─────────────────────────────────────────────────────

fn key_hint(key: impl Display) -> Span<'static> {
    Span::styled(
        format!(" [{}] ", key),
        Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
    )
}

fn push_action(cl: &mut ClickableList, key: impl Display, label: &str, enabled: bool, action_id: u16) {
    let color = if enabled { Color::White } else { Color::DarkGray };
    cl.push_clickable(
        Line::from(vec![
            key_hint(key),
            Span::styled(label.to_string(), Style::default().fg(color)),
        ]),
        action_id,
    );
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "\u{25A3} "
    } else {
        "\u{25A1} "
    }
}

fn figure(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<18}", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn panel(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// Split side by side on wide screens, stacked on narrow ones.
fn split_pair(area: Rect, is_narrow: bool, first_height: u16) -> (Rect, Rect) {
    let chunks = if is_narrow {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(first_height), Constraint::Min(0)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area)
    };
    (chunks[0], chunks[1])
}

// ── Navigation ─────────────────────────────────────────────────────────

fn render_nav(
    state: &AppState,
    f: &mut Frame,
    area: Rect,
    is_narrow: bool,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let session = &state.session;
    let nav_style = |view: View| {
        if session.view == view {
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        }
    };
    let label = |wide: &'static str, narrow: &'static str| if is_narrow { narrow } else { wide };

    let mut views = vec![
        (
            label("CHANCE", "Home"),
            nav_style(View::Home).fg(GOLD).add_modifier(Modifier::BOLD),
            NAV_HOME,
        ),
        (label("Marketplace", "Mkt"), nav_style(View::Marketplace), NAV_MARKETPLACE),
    ];
    if session.role == Role::Investor {
        views.push((label("Portfolio", "Port"), nav_style(View::Portfolio), NAV_PORTFOLIO));
        views.push((label("Messages", "Msg"), nav_style(View::Messages), NAV_MESSAGES));
    }
    views.push((label("Dashboard", "Dash"), nav_style(View::Dashboard), NAV_DASHBOARD));
    let account = [
        (
            session.currency.code(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            TOGGLE_CURRENCY,
        ),
        ("Sign in", Style::default().fg(Color::Green), OPEN_SIGN_IN),
        ("Log out", Style::default().fg(Color::DarkGray), LOG_OUT),
    ];

    let mut block = Block::default()
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", session.role.label()),
            Style::default().fg(Color::Gray),
        ));
    if session.role == Role::Investor {
        block = block.title(
            Line::from(Span::styled(
                format!(" {} Credits ", format_number(state.wallet.balance() as u64)),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        );
    }
    let tab_bar = |separator, tabs: &[(&'static str, Style, u16)]| {
        tabs.iter()
            .fold(TabBar::new(separator), |bar, &(text, style, id)| bar.tab(text, style, id))
    };

    let mut cs = click_state.borrow_mut();
    if is_narrow {
        // Phones get the account controls on a second row so every tab fits.
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(area);
        tab_bar("\u{2502}", &views)
            .block(block.borders(Borders::TOP | Borders::LEFT | Borders::RIGHT))
            .render(f, rows[0], &mut cs);
        tab_bar("\u{2502}", &account)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(f, rows[1], &mut cs);
    } else {
        views.extend(account);
        tab_bar(" \u{2502} ", &views)
            .block(block.borders(Borders::ALL))
            .render(f, area, &mut cs);
    }
}

fn render_key_help(state: &AppState, f: &mut Frame, area: Rect) {
    let text = if state.auth.is_some() {
        "Enter next \u{00B7} Tab country \u{00B7} Backspace erase \u{00B7} Esc back"
    } else if state.registration.is_some() {
        "Tab next field \u{00B7} Enter continue \u{00B7} Esc back"
    } else {
        match state.session.view {
            View::Home | View::Marketplace => {
                "1-9 card \u{00B7} f filter \u{00B7} m market \u{00B7} d dashboard \u{00B7} c currency \u{00B7} l sign in \u{00B7} o log out"
            }
            View::Detail => "a agree \u{00B7} r meeting \u{00B7} - back \u{00B7} h home \u{00B7} c currency",
            View::Messages => "1-3 conversation \u{00B7} h home \u{00B7} m market",
            View::Dashboard | View::Portfolio => {
                "h home \u{00B7} m market \u{00B7} p portfolio \u{00B7} i messages \u{00B7} c currency"
            }
        }
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(Color::DarkGray),
        ))),
        area,
    );
}

// ── Home ───────────────────────────────────────────────────────────────

fn render_home(
    state: &AppState,
    f: &mut Frame,
    area: Rect,
    is_narrow: bool,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        " Own a share of the region's most promising brands.",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(vec![
        Span::styled(
            format!(" {}", format_money(CAPITAL_DEPLOYED, state.session.currency)),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            if is_narrow { " deployed" } else { " deployed across Cairo, Riyadh and Dubai" },
            Style::default().fg(Color::Gray),
        ),
    ]));
    cl.push(Line::from(""));
    push_action(&mut cl, 7, "List your franchise", true, REGISTER_FRANCHISE);
    push_action(&mut cl, 8, "Seek funding for your business", true, REGISTER_FUND);
    push_action(&mut cl, 9, "Start investing (pay per unlock)", true, REGISTER_INVESTOR);

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(chunks[0], &mut cs, 1, 1, 0, 0);
    }
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(panel("The Premium Investment Gateway", GOLD)),
        chunks[0],
    );

    render_marketplace(state, f, chunks[1], is_narrow, click_state);
}

// ── Marketplace ────────────────────────────────────────────────────────

fn render_marketplace(
    state: &AppState,
    f: &mut Frame,
    area: Rect,
    is_narrow: bool,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let mut filters = TabBar::new(" ");
    for (i, filter) in ALL_FILTERS.iter().enumerate() {
        let style = if *filter == state.filter {
            Style::default().fg(Color::Black).bg(GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        filters = filters.tab(filter.label(), style, FILTER_BASE + i as u16);
    }
    {
        let mut cs = click_state.borrow_mut();
        filters
            .block(panel("Opportunities", Color::DarkGray))
            .render(f, chunks[0], &mut cs);
    }

    render_grid(state, f, chunks[1], is_narrow, click_state);
}

fn render_grid(
    state: &AppState,
    f: &mut Frame,
    area: Rect,
    is_narrow: bool,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let visible = state.visible_cards();
    if visible.is_empty() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " No opportunities in this category yet.",
                Style::default().fg(Color::DarkGray),
            ))),
            area,
        );
        return;
    }

    let cols = if is_narrow { 1 } else { 2 };
    let rows = visible.len().div_ceil(cols);
    let mut constraints = vec![Constraint::Length(CARD_HEIGHT); rows];
    constraints.push(Constraint::Min(0));
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (slot, &index) in visible.iter().enumerate() {
        let row_area = row_areas[slot / cols];
        let card_area = if cols == 1 {
            row_area
        } else {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(row_area)[slot % cols]
        };
        // Squeezed off the bottom of a short screen.
        if card_area.height < 3 {
            continue;
        }
        if let Some(opp) = state.catalog.by_index(index) {
            render_card(state, opp, index, slot, f, card_area, click_state);
        }
    }
}

fn render_card(
    state: &AppState,
    opp: &Opportunity,
    index: usize,
    slot: usize,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let currency = state.session.currency;
    let mut cl = ClickableList::new();

    cl.push(Line::from(Span::styled(
        format!(" {} \u{00B7} {}", opp.industry, opp.location),
        Style::default().fg(Color::Gray),
    )));
    let tags = opp
        .tags
        .iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ");
    cl.push(Line::from(Span::styled(
        format!(" {}", tags),
        Style::default().fg(Color::Magenta),
    )));
    cl.push(figure("Min. ticket", format_money(opp.min_investment, currency), Color::White));
    if opp.is_unlocked {
        cl.push(figure("Revenue", format_money(opp.revenue, currency), Color::Green));
    } else {
        cl.push(Line::from(Span::styled(
            " Revenue & profit: Unlock to view",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let action_id = CARD_ACTION_BASE + index as u16;
    let label = if opp.is_unlocked {
        Some("View Full Details".to_string())
    } else if state.session.role == Role::Investor {
        Some(format!("Unlock Details ({} Credits)", UNLOCK_COST))
    } else {
        None
    };
    match (char::from_digit(slot as u32 + 1, 10), label) {
        (Some(key), Some(label)) => push_action(&mut cl, key, &label, true, action_id),
        (None, Some(label)) => cl.push_clickable(
            Line::from(Span::styled(format!(" {}", label), Style::default().fg(Color::White))),
            action_id,
        ),
        (_, None) => cl.push(Line::from(Span::styled(
            " Investor accounts can unlock",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let (border, lock) = if opp.is_unlocked {
        (GOLD, " Unlocked ")
    } else {
        (Color::DarkGray, " Locked ")
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {} ", opp.name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .title(Line::from(Span::styled(lock, Style::default().fg(border))).right_aligned());

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);
    }
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Detail ─────────────────────────────────────────────────────────────

fn render_detail(
    state: &AppState,
    f: &mut Frame,
    area: Rect,
    is_narrow: bool,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let Some(opp) = state
        .session
        .selected
        .as_deref()
        .and_then(|id| state.catalog.get(id))
    else {
        f.render_widget(Block::default().borders(Borders::ALL), area);
        return;
    };
    let currency = state.session.currency;

    let description = Paragraph::new(opp.description.as_str())
        .wrap(Wrap { trim: true })
        .block(panel("About", Color::DarkGray));
    let description_height = (description.line_count(area.width) as u16).clamp(3, 8);
    let figures_height = if is_narrow { 11 } else { 6 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),                  // Header
            Constraint::Length(description_height), // About
            Constraint::Length(figures_height),     // Financials + ROI
            Constraint::Min(0),                     // Data room + commit
        ])
        .split(area);

    // Header
    let header = vec![
        Line::from(Span::styled(
            format!(" {}", opp.name),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                " {} \u{00B7} {}{}",
                opp.industry,
                opp.location,
                opp.tags.iter().map(|t| format!("  #{}", t)).collect::<String>()
            ),
            Style::default().fg(Color::Gray),
        )),
    ];
    f.render_widget(
        Paragraph::new(header).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GOLD)),
        ),
        chunks[0],
    );
    f.render_widget(description, chunks[1]);

    // Financials and ROI simulator
    let (financials_area, roi_area) = split_pair(chunks[2], is_narrow, 5);
    let masked = |amount: u64| {
        if opp.is_unlocked {
            format_money(amount, currency)
        } else {
            "Unlock to view".to_string()
        }
    };
    let financials = vec![
        figure("Min. investment", format_money(opp.min_investment, currency), Color::White),
        figure("Gross revenue", masked(opp.revenue), Color::Green),
        figure("Net profit", masked(opp.net_profit), Color::Green),
    ];
    f.render_widget(
        Paragraph::new(financials).block(panel("Financial Performance", Color::DarkGray)),
        financials_area,
    );

    let roi = roi_projection(opp.min_investment);
    let roi = vec![
        figure(
            "Ticket range",
            format!(
                "{} to {}",
                format_number(convert(roi.range.0, currency)),
                format_money(roi.range.1, currency)
            ),
            Color::Gray,
        ),
        figure("Investment", format_money(roi.ticket, currency), Color::White),
        figure("Year 1 return (25%)", format!("+{}", format_money(roi.year_one, currency)), GOLD),
        figure("Total value", format_money(roi.total, currency), Color::White),
    ];
    f.render_widget(
        Paragraph::new(roi).block(panel("ROI Simulator", Color::DarkGray)),
        roi_area,
    );

    // Data room and commitment
    let (docs_area, commit_area) = split_pair(chunks[3], is_narrow, DOCUMENTS.len() as u16 + 2);
    let docs: Vec<Line> = if opp.is_unlocked {
        DOCUMENTS
            .iter()
            .map(|(name, kind, size)| {
                Line::from(vec![
                    Span::styled(format!(" {:<4}", kind), Style::default().fg(Color::Cyan)),
                    Span::styled(format!("{:<26}", name), Style::default().fg(Color::White)),
                    Span::styled(size.to_string(), Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect()
    } else {
        vec![Line::from(Span::styled(
            " Unlock to access the data room.",
            Style::default().fg(Color::DarkGray),
        ))]
    };
    f.render_widget(
        Paragraph::new(docs).block(panel("Data Room", Color::DarkGray)),
        docs_area,
    );

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        " A dedicated investment manager is assigned per deal.",
        Style::default().fg(Color::Gray),
    )));
    cl.push_clickable(
        Line::from(vec![
            key_hint('a'),
            Span::styled(checkbox(state.detail_agreed), Style::default().fg(GOLD)),
            Span::styled(
                "I accept the 1-2% success fee on deal closure",
                Style::default().fg(Color::White),
            ),
        ]),
        DETAIL_TOGGLE_AGREE,
    );
    push_action(&mut cl, 'r', "Request Meeting", state.detail_agreed, DETAIL_REQUEST_MEETING);
    push_action(&mut cl, '-', "Back to Marketplace", true, DETAIL_BACK);

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(commit_area, &mut cs, 1, 1, 0, 0);
    }
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(panel("Ready to Commit?", GOLD)),
        commit_area,
    );
}

// ── Dashboard ──────────────────────────────────────────────────────────

fn render_dashboard(state: &AppState, f: &mut Frame, area: Rect, is_narrow: bool) {
    let currency = state.session.currency;
    let investor = state.session.role == Role::Investor;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let (headline, raised_label, closed_label) = if investor {
        ("Investor Dashboard", "Total Invested", "Deals Closed")
    } else {
        ("Business Portal", "Capital Raised", "Applications")
    };
    let summary = vec![
        figure("Current plan", CURRENT_PLAN.to_string(), GOLD),
        figure(raised_label, format_money(PORTFOLIO_INVESTED, currency), Color::White),
        figure(closed_label, DEALS_CLOSED.to_string(), Color::White),
        figure("Pending actions", PENDING_ACTIONS.to_string(), Color::Yellow),
    ];
    f.render_widget(
        Paragraph::new(summary).block(panel(headline, GOLD)),
        chunks[0],
    );

    let (left, right) = split_pair(chunks[1], is_narrow, 7);

    // Wallet (both roles)
    let mut wallet = vec![
        figure(
            "Wallet balance",
            format!("{} Credits", format_number(state.wallet.balance() as u64)),
            GOLD,
        ),
        Line::from(Span::styled(
            " 1 Credit = 1 EGP",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            " Top Up Wallet (coming soon)",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT),
        )),
        Line::from(""),
    ];

    if investor {
        wallet.push(Line::from(Span::styled(
            " Transaction History",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        let history = state.wallet.history();
        if history.is_empty() {
            wallet.push(Line::from(Span::styled(
                " No transactions yet.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for entry in history.iter().rev() {
            wallet.push(Line::from(vec![
                Span::styled(format!(" -{:<4}", entry.amount), Style::default().fg(Color::Red)),
                Span::styled(entry.memo.clone(), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("  \u{2192} {}", format_number(entry.balance_after as u64)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
        f.render_widget(
            Paragraph::new(wallet).block(panel("Wallet", Color::DarkGray)),
            right,
        );

        let mut unlocked: Vec<Line> = state
            .catalog
            .unlocked()
            .map(|opp| {
                Line::from(vec![
                    Span::styled(
                        format!(" {}", opp.name),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {} \u{00B7} {}", opp.industry, opp.location),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect();
        if unlocked.is_empty() {
            unlocked.push(Line::from(Span::styled(
                " Nothing unlocked yet. Browse the marketplace.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        f.render_widget(
            Paragraph::new(unlocked).block(panel("Unlocked Opportunities", Color::DarkGray)),
            left,
        );
    } else {
        let listings: Vec<Line> = MY_LISTINGS
            .iter()
            .map(|(name, status, unlocks)| {
                let color = if *status == "Live" { Color::Green } else { Color::Yellow };
                Line::from(vec![
                    Span::styled(
                        format!(" {}", name),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {}", status), Style::default().fg(color)),
                    Span::styled(
                        format!("  {} unlocks", unlocks),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect();
        f.render_widget(
            Paragraph::new(listings).block(panel("My Listings", Color::DarkGray)),
            left,
        );

        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(wallet.len() as u16 + 2), Constraint::Min(0)])
            .split(right);
        f.render_widget(
            Paragraph::new(wallet).block(panel("Wallet", Color::DarkGray)),
            sidebar[0],
        );

        let timeline: Vec<Line> = APPLICATION_STAGES
            .iter()
            .map(|(title, date, stage)| {
                let (dot, color) = match stage {
                    StageState::Done => ("\u{25CF}", GOLD),
                    StageState::Active => ("\u{25C9}", Color::White),
                    StageState::Waiting => ("\u{25CB}", Color::DarkGray),
                };
                Line::from(vec![
                    Span::styled(format!(" {} ", dot), Style::default().fg(color)),
                    Span::styled(format!("{:<22}", title), Style::default().fg(color)),
                    Span::styled(date.to_string(), Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect();
        f.render_widget(
            Paragraph::new(timeline).block(panel("Application Status", Color::DarkGray)),
            sidebar[1],
        );
    }
}

// ── Portfolio ──────────────────────────────────────────────────────────

fn render_portfolio(state: &AppState, f: &mut Frame, area: Rect) {
    let currency = state.session.currency;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let gain = PORTFOLIO_VALUE.saturating_sub(PORTFOLIO_INVESTED);
    let gain_pct = gain as f64 * 100.0 / PORTFOLIO_INVESTED as f64;
    let summary = vec![
        figure("Total invested", format_money(PORTFOLIO_INVESTED, currency), Color::White),
        figure("Current value", format_money(PORTFOLIO_VALUE, currency), GOLD),
        figure(
            "Unrealized gain",
            format!("+{} ({:.1}%)", format_money(gain, currency), gain_pct),
            Color::Green,
        ),
    ];
    f.render_widget(
        Paragraph::new(summary).block(panel("My Portfolio", GOLD)),
        chunks[0],
    );

    let mut lines = Vec::new();
    for holding in HOLDINGS.iter() {
        let (status, color) = match holding.status {
            HoldingStatus::Active => ("Active", Color::Green),
            HoldingStatus::Pending => ("Pending", Color::Yellow),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {}", holding.name),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", status), Style::default().fg(color)),
        ]));
        lines.push(Line::from(Span::styled(
            format!(" {}", holding.sector),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(
            holding
                .facts
                .iter()
                .map(|(label, value)| {
                    Span::styled(format!(" {}: {} ", label, value), Style::default().fg(Color::Gray))
                })
                .collect::<Vec<_>>(),
        ));
        lines.push(Line::from(""));
    }
    f.render_widget(
        Paragraph::new(lines).block(panel("Holdings", Color::DarkGray)),
        chunks[1],
    );
}

// ── Messages ───────────────────────────────────────────────────────────

fn render_messages(
    state: &AppState,
    f: &mut Frame,
    area: Rect,
    is_narrow: bool,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let list_size = CHATS.len() as u16 * 2 + 2;
    let chunks = if is_narrow {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(list_size), Constraint::Min(0)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(38), Constraint::Min(0)])
            .split(area)
    };

    let mut cl = ClickableList::new();
    for (i, chat) in CHATS.iter().enumerate() {
        let selected = i == state.selected_chat;
        let name_style = if selected {
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let mut spans = vec![key_hint(i + 1), Span::styled(chat.name, name_style)];
        if chat.unread > 0 {
            spans.push(Span::styled(
                format!(" ({})", chat.unread),
                Style::default().fg(Color::Black).bg(GOLD),
            ));
        }
        cl.push_clickable(Line::from(spans), SELECT_CHAT_BASE + i as u16);
        cl.push(Line::from(Span::styled(
            format!("     {} \u{00B7} {}", chat.last_msg, chat.time),
            Style::default().fg(Color::DarkGray),
        )));
    }
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(chunks[0], &mut cs, 1, 1, 0, 0);
    }
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(panel("Conversations", Color::DarkGray)),
        chunks[0],
    );

    let Some(chat) = CHATS.get(state.selected_chat) else {
        return;
    };
    let mut thread = Vec::new();
    for (from_me, text, time) in chat.thread.iter() {
        let (color, who) = if *from_me {
            (GOLD, "You")
        } else {
            (Color::White, chat.name)
        };
        let header = Line::from(Span::styled(
            format!(" {} \u{00B7} {} ", who, time),
            Style::default().fg(Color::DarkGray),
        ));
        let body = Line::from(Span::styled(format!(" {} ", text), Style::default().fg(color)));
        if *from_me {
            thread.push(header.right_aligned());
            thread.push(body.right_aligned());
        } else {
            thread.push(header);
            thread.push(body);
        }
        thread.push(Line::from(""));
    }
    f.render_widget(
        Paragraph::new(thread)
            .wrap(Wrap { trim: true })
            .block(panel(&format!("{} \u{00B7} {}", chat.name, chat.role), Color::DarkGray)),
        chunks[1],
    );
}

// ── Toasts ─────────────────────────────────────────────────────────────

fn render_toasts(state: &AppState, f: &mut Frame, area: Rect) {
    let width = area.width.min(TOAST_WIDTH);
    // Stack upward from just above the key help line, newest at the bottom.
    let mut bottom = area.y + area.height.saturating_sub(1);
    for toast in state.toasts.visible().iter().rev() {
        let height = if toast.description.is_some() { 4 } else { 3 };
        if bottom < area.y + height {
            break;
        }
        let rect = Rect::new(area.x + area.width - width, bottom - height, width, height);
        render_toast(toast, f, rect);
        bottom -= height;
    }
}

fn render_toast(toast: &Toast, f: &mut Frame, rect: Rect) {
    let (icon, color) = match toast.kind {
        ToastKind::Success => ("\u{2713}", Color::Green),
        ToastKind::Error => ("!", Color::Red),
        ToastKind::Info => ("i", Color::Cyan),
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(format!(" {} ", icon), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(toast.title.clone(), Style::default().fg(Color::White)),
    ])];
    if let Some(description) = &toast.description {
        lines.push(Line::from(Span::styled(
            format!("   {}", description),
            Style::default().fg(Color::Gray),
        )));
    }
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        ),
        rect,
    );
}

// ── Modals ─────────────────────────────────────────────────────────────

fn render_modal(
    cl: ClickableList,
    title: &str,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let rect = centered(area, MODAL_WIDTH, cl.len() as u16 + 2);
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(rect, &mut cs, 1, 1, 0, 0);
    }
    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(cl.into_lines()).block(panel(title, GOLD)), rect);
}

fn render_auth_modal(
    wizard: &AuthWizard,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let heading = |text: &str| {
        Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
    };
    let note = |text: String| Line::from(Span::styled(text, Style::default().fg(Color::Gray)));

    let mut cl = ClickableList::new();
    match wizard.step {
        AuthStep::RoleSelection => {
            cl.push(heading("How would you like to proceed today?"));
            cl.push(Line::from(""));
            push_action(&mut cl, 1, "I'm an Investor: looking for opportunities", true, AUTH_PICK_INVESTOR);
            push_action(&mut cl, 2, "I'm a Business Owner: looking for funding", true, AUTH_PICK_BUSINESS);
        }
        AuthStep::PhoneEntry => {
            cl.push(heading("Enter Mobile Number"));
            cl.push(note(" We'll send you a verification code.".to_string()));
            cl.push(Line::from(""));
            cl.push_clickable(
                Line::from(vec![
                    key_hint("Tab"),
                    Span::styled(
                        wizard.country_code(),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}_", wizard.phone),
                        Style::default().fg(Color::White),
                    ),
                ]),
                AUTH_CYCLE_COUNTRY,
            );
            cl.push(Line::from(""));
            push_action(&mut cl, "Enter", "Send code", true, AUTH_SUBMIT);
        }
        AuthStep::OtpEntry => {
            cl.push(heading("Verify Account"));
            cl.push(note(format!(
                " Enter the {}-digit code sent to {} {}",
                OTP_DIGITS,
                wizard.country_code(),
                wizard.phone
            )));
            cl.push(Line::from(""));
            let boxes: String = (0..OTP_DIGITS)
                .map(|i| wizard.otp.chars().nth(i).unwrap_or('_'))
                .map(|c| format!(" {} ", c))
                .collect();
            cl.push(Line::from(Span::styled(
                format!("   {}", boxes),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            )));
            cl.push(Line::from(""));
            push_action(&mut cl, "Enter", "Verify & sign in", true, AUTH_SUBMIT);
        }
        AuthStep::Complete => return,
    }
    if wizard.step != AuthStep::RoleSelection {
        push_action(&mut cl, "Esc", "Back", true, AUTH_BACK);
    }
    cl.push_clickable(
        Line::from(Span::styled(" Cancel", Style::default().fg(Color::DarkGray))),
        AUTH_CLOSE,
    );

    render_modal(cl, "Welcome to CHANCE", f, area, click_state);
}

fn render_registration_modal(
    wizard: &RegistrationWizard,
    currency: Currency,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let heading = |text: &str| {
        Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
    };
    let note = |text: String| Line::from(Span::styled(text, Style::default().fg(Color::Gray)));

    let mut cl = ClickableList::new();
    match wizard.step {
        RegistrationStep::Verify => {
            cl.push(heading("Verify Mobile Number"));
            cl.push(note(" We'll send a code to verify your identity.".to_string()));
        }
        RegistrationStep::Payment => match wizard.payment_flow() {
            PaymentFlow::PayPerUnlock => {
                cl.push(heading("Pay-Per-Click Access"));
                cl.push(note(format!(
                    " {} Credits per unlock. Link your card to start.",
                    UNLOCK_COST
                )));
            }
            PaymentFlow::Subscription => {
                cl.push(heading("Choose Your Plan"));
                for (i, plan) in ALL_PLANS.iter().enumerate() {
                    let selected = *plan == wizard.plan;
                    let style = if selected {
                        Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    cl.push_clickable(
                        Line::from(vec![
                            key_hint(i + 1),
                            Span::styled(checkbox(selected), style),
                            Span::styled(format!("{:<10}", plan.label()), style),
                            Span::styled(
                                format!("{:>12}", format_money(plan.price(), currency)),
                                style,
                            ),
                            Span::styled(
                                format!("  {}", plan.tier()),
                                Style::default().fg(Color::DarkGray),
                            ),
                        ]),
                        REG_PLAN_BASE + i as u16,
                    );
                }
            }
        },
        RegistrationStep::Agreement => {
            cl.push(heading("Final Step: Terms of Service"));
            cl.push(note(" Commission Agreement: 2.0% on closed deals.".to_string()));
            cl.push(Line::from(""));
            cl.push_clickable(
                Line::from(vec![
                    key_hint('a'),
                    Span::styled(checkbox(wizard.agreed), Style::default().fg(GOLD)),
                    Span::styled(
                        "I accept the Terms of Service and the 2% fee",
                        Style::default().fg(Color::White),
                    ),
                ]),
                REG_TOGGLE_AGREE,
            );
        }
        RegistrationStep::Complete => return,
    }

    let fields = wizard.fields();
    if !fields.is_empty() {
        cl.push(Line::from(""));
    }
    for field in fields {
        let focused = wizard.focus == Some(*field);
        let (marker, style) = if focused {
            ("\u{25B8}", Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
        } else {
            (" ", Style::default().fg(Color::Gray))
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" {} {:<15}", marker, field.label()), style),
                Span::styled(
                    format!("{}{}", wizard.value(*field), if focused { "_" } else { "" }),
                    Style::default().fg(Color::White),
                ),
            ]),
            REG_FOCUS_BASE + field.index() as u16,
        );
    }
    if wizard.step == RegistrationStep::Payment
        && wizard.payment_flow() == PaymentFlow::Subscription
    {
        cl.push(note(format!(
            " Total to charge: {}",
            format_money(wizard.plan.price(), currency)
        )));
    }

    cl.push(Line::from(""));
    match wizard.step {
        RegistrationStep::Agreement => {
            push_action(&mut cl, 's', "Complete Registration", wizard.can_submit(), REG_SUBMIT);
        }
        _ => push_action(&mut cl, 'n', "Continue", true, REG_NEXT),
    }
    let back = if wizard.step == RegistrationStep::Verify {
        "Cancel"
    } else {
        "Back"
    };
    push_action(&mut cl, 'b', back, true, REG_BACK);
    push_action(&mut cl, 'x', "Close", true, REG_CLOSE);

    let title = format!(
        "{} \u{00B7} Step {} of 3",
        wizard.role.title(),
        wizard.step.number()
    );
    render_modal(cl, &title, f, area, click_state);
}
