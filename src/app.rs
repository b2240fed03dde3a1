use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::error::TallyError;
use crate::fmt::{bar, money, pct};
use crate::form::{ExpenseForm, FormField};
use crate::models::Expense;
use crate::query::{CategoryFilter, FilterCriteria, MonthFilter, Summary};
use crate::settings::Settings;
use crate::tracker::Tracker;
use crate::tui::{
    self, category_span, money_span, View, ViewAction, AMOUNT_STYLE, ERROR_STYLE, FOOTER_STYLE,
    HEADER_STYLE, SELECTED_STYLE,
};

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Form,
    ConfirmDelete(u64),
}

/// The interactive session: one tracker plus everything the screen needs to
/// remember between key presses (filters, form, selection).
pub struct App {
    tracker: Tracker,
    criteria: FilterCriteria,
    form: ExpenseForm,
    mode: Mode,
    selected: usize,
    table_state: TableState,
    status_message: Option<String>,
    currency: String,
}

impl App {
    pub fn new(tracker: Tracker, settings: &Settings) -> Self {
        Self {
            tracker,
            criteria: FilterCriteria::default(),
            form: ExpenseForm::new(settings.default_category),
            mode: Mode::Browse,
            selected: 0,
            table_state: TableState::default(),
            status_message: None,
            currency: settings.currency_symbol.clone(),
        }
    }

    pub fn run(&mut self) -> crate::error::Result<()> {
        tui::run_view(self)
    }

    fn visible(&self) -> Vec<Expense> {
        self.tracker.get_filtered(&self.criteria)
    }

    fn selected_expense(&self) -> Option<Expense> {
        self.visible().into_iter().nth(self.selected)
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    // -----------------------------------------------------------------------
    // Key handling
    // -----------------------------------------------------------------------

    fn handle_browse_key(&mut self, code: KeyCode) -> ViewAction {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Close,
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.visible().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('a') => {
                self.form.reset();
                self.mode = Mode::Form;
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(expense) = self.selected_expense() {
                    self.form.edit(&expense);
                    self.mode = Mode::Form;
                }
            }
            KeyCode::Char('d') => {
                if let Some(expense) = self.selected_expense() {
                    self.mode = Mode::ConfirmDelete(expense.id);
                }
            }
            KeyCode::Char('c') => self.set_criteria(FilterCriteria {
                category: self.criteria.category.next(),
                ..self.criteria
            }),
            KeyCode::Char('C') => self.set_criteria(FilterCriteria {
                category: self.criteria.category.prev(),
                ..self.criteria
            }),
            KeyCode::Char('m') => {
                let options = self.tracker.get_month_options();
                self.set_criteria(FilterCriteria {
                    month: self.criteria.month.next_in(&options),
                    ..self.criteria
                });
            }
            KeyCode::Char('M') => {
                let options = self.tracker.get_month_options();
                self.set_criteria(FilterCriteria {
                    month: self.criteria.month.prev_in(&options),
                    ..self.criteria
                });
            }
            KeyCode::Char('r') => self.set_criteria(FilterCriteria::default()),
            _ => {}
        }
        ViewAction::Continue
    }

    fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.selected = 0;
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.form.reset();
                self.mode = Mode::Browse;
            }
            KeyCode::Tab | KeyCode::Down => self.form.focus = self.form.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus = self.form.focus.prev(),
            KeyCode::Left if self.form.focus == FormField::Category => {
                self.form.category = self.form.category.prev();
            }
            KeyCode::Right | KeyCode::Char(' ') if self.form.focus == FormField::Category => {
                self.form.category = self.form.category.next();
            }
            KeyCode::Backspace => {
                if let Some(text) = self.form.focused_text_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.form.focused_text_mut() {
                    text.push(c);
                }
            }
            KeyCode::Enter => self.submit_form(),
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let verb = if self.form.is_editing() { "Updated" } else { "Added" };
        match self.tracker.submit(&mut self.form) {
            Ok(id) => {
                self.mode = Mode::Browse;
                self.status_message = Some(format!("{verb} expense #{id}"));
                if let Some(pos) = self.visible().iter().position(|e| e.id == id) {
                    self.selected = pos;
                }
                self.clamp_selection();
            }
            Err(TallyError::NotFound(id)) => {
                self.mode = Mode::Browse;
                self.status_message = Some(format!("Expense #{id} no longer exists"));
                self.clamp_selection();
            }
            // Validation errors stay on the form.
            Err(_) => {}
        }
    }

    fn handle_confirm_key(&mut self, id: u64, code: KeyCode) {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if self.tracker.remove_expense(id).is_some() {
                    self.status_message = Some(format!("Deleted expense #{id}"));
                }
                self.clamp_selection();
            }
            _ => self.status_message = Some("Delete cancelled".to_string()),
        }
        self.mode = Mode::Browse;
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    fn draw_cards(&self, frame: &mut Frame, area: Rect, summary: &Summary) {
        let cols = Layout::horizontal([Constraint::Fill(1); 4]).split(area);
        let top = match &summary.top_category {
            Some(t) => Line::from(vec![
                category_span(t.category),
                Span::raw(" "),
                Span::styled(money(t.total, &self.currency), FOOTER_STYLE),
            ]),
            None => Line::from("None"),
        };
        let cards = [
            ("Total Spent", Line::from(money_span(summary.total, &self.currency))),
            (
                "Avg/Transaction",
                Line::from(money_span(summary.avg_per_transaction, &self.currency)),
            ),
            (
                "Transactions",
                Line::from(Span::styled(summary.count.to_string(), AMOUNT_STYLE)),
            ),
            ("Top Category", top),
        ];
        for ((title, value), col) in cards.into_iter().zip(cols.iter()) {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(FOOTER_STYLE);
            frame.render_widget(Paragraph::new(value).block(block), *col);
        }
    }

    fn draw_filters(&self, frame: &mut Frame, area: Rect) {
        let category = match self.criteria.category {
            CategoryFilter::All => "All Categories".to_string(),
            CategoryFilter::Only(c) => c.label().to_string(),
        };
        let month = match self.criteria.month {
            MonthFilter::All => "All Months".to_string(),
            MonthFilter::Only(m) => m.long_label(),
        };
        let line = Line::from(vec![
            Span::styled("Category: ", FOOTER_STYLE),
            Span::raw(category),
            Span::styled("   Month: ", FOOTER_STYLE),
            Span::raw(month),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_list(&mut self, frame: &mut Frame, area: Rect, rows_data: &[Expense]) {
        let title = format!("Recent Transactions ({} expenses)", rows_data.len());
        let block = Block::default().borders(Borders::ALL).title(title);

        if rows_data.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from("No expenses found".bold()),
                Line::from(Span::styled("Press a to add your first expense", FOOTER_STYLE)),
            ])
            .centered()
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let note_width = area.width.saturating_sub(2 + 12 + 15 + 14 + 3) as usize;
        let rows: Vec<Row> = rows_data
            .iter()
            .map(|e| {
                let (note, height) = tui::wrap_text(&e.note, note_width.max(10));
                Row::new(vec![
                    Cell::from(e.date.format("%b %-d, %Y").to_string()),
                    Cell::from(category_span(e.category)),
                    Cell::from(note),
                    Cell::from(money_span(e.amount, &self.currency)),
                ])
                .height(height)
            })
            .collect();

        let widths = [
            Constraint::Length(12),
            Constraint::Length(15),
            Constraint::Fill(1),
            Constraint::Length(14),
        ];
        self.table_state.select(Some(self.selected));
        let table = Table::new(rows, widths)
            .header(
                Row::new(vec!["Date", "Category", "Note", "Amount"])
                    .style(HEADER_STYLE)
                    .bottom_margin(1),
            )
            .column_spacing(1)
            .row_highlight_style(SELECTED_STYLE)
            .block(block);
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_breakdown(&self, frame: &mut Frame, area: Rect, summary: &Summary) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Category Breakdown");
        let mut lines = Vec::new();
        for share in summary.ranked_categories() {
            lines.push(Line::from(vec![
                category_span(share.category),
                Span::raw("  "),
                money_span(share.total, &self.currency),
                Span::styled(format!("  {}", pct(share.pct)), FOOTER_STYLE),
            ]));
            lines.push(Line::from(Span::styled(
                bar(share.pct, BAR_WIDTH),
                Style::new().fg(tui::category_color(share.category)),
            )));
        }
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let title = if self.form.is_editing() {
            "Edit Expense"
        } else {
            "Add New Expense"
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::new().fg(Color::Cyan));

        let mut lines = Vec::new();
        for field in FormField::ORDER {
            let focused = self.form.focus == field;
            let marker = if focused { ">" } else { " " };
            let value = if field == FormField::Category {
                format!("\u{2190} {} \u{2192}", self.form.field_value(field))
            } else if focused {
                format!("{}\u{2588}", self.form.field_value(field))
            } else {
                self.form.field_value(field)
            };
            let label = if field == FormField::Amount {
                format!("{} ({})", field.label(), self.currency)
            } else {
                field.label().to_string()
            };
            let style = if focused { SELECTED_STYLE } else { Style::new() };
            lines.push(Line::from(vec![
                Span::raw(format!("{marker} ")),
                Span::styled(format!("{label:<22}"), FOOTER_STYLE),
                Span::styled(value, style),
            ]));
        }
        if let Some(err) = self.form.error() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(err.to_string(), ERROR_STYLE)));
        }
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn keys_hint(&self) -> Paragraph<'static> {
        match self.mode {
            Mode::Browse => Paragraph::new(
                "\u{2191}/\u{2193}:select  a:add  e:edit  d:delete  c/C:category  m/M:month  r:reset  q:quit",
            )
            .style(FOOTER_STYLE),
            Mode::Form => Paragraph::new(
                "Tab/\u{2193}:next field  \u{2190}/\u{2192}:category  Enter:save  Esc:cancel",
            )
            .style(FOOTER_STYLE),
            Mode::ConfirmDelete(id) => {
                let note = self.tracker.get(id).map(|e| e.note.as_str()).unwrap_or("");
                Paragraph::new(format!(
                    "Are you sure you want to delete expense #{id} \"{note}\"? (y/N)"
                ))
                .style(ERROR_STYLE)
            }
        }
    }
}

impl View for App {
    fn draw(&mut self, frame: &mut Frame) {
        let rows_data = self.visible();
        let summary = self.tracker.get_summary(&self.criteria);

        let areas = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(3), // cards
            Constraint::Length(1), // filters
            Constraint::Fill(1),   // body
            Constraint::Length(1), // status
            Constraint::Length(1), // keys
        ])
        .split(frame.area());

        frame.render_widget(
            Paragraph::new("Expense Tracker").style(HEADER_STYLE),
            areas[0],
        );
        self.draw_cards(frame, areas[1], &summary);
        self.draw_filters(frame, areas[2]);

        let body = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(areas[3]);
        self.draw_list(frame, body[0], &rows_data);
        if self.mode == Mode::Form {
            self.draw_form(frame, body[1]);
        } else {
            self.draw_breakdown(frame, body[1], &summary);
        }

        let status = self.status_message.clone().unwrap_or_default();
        frame.render_widget(Paragraph::new(status).style(FOOTER_STYLE), areas[4]);
        frame.render_widget(self.keys_hint(), areas[5]);
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        if self.mode != Mode::Form {
            self.status_message = None;
        }
        match self.mode {
            Mode::Browse => return self.handle_browse_key(code),
            Mode::Form => self.handle_form_key(code),
            Mode::ConfirmDelete(id) => self.handle_confirm_key(id, code),
        }
        ViewAction::Continue
    }
}
