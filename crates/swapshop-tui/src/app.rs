// TUI application state and event handling
use ratatui::widgets::ListState;
use swapshop_core::{
    filter_items, FilterCriteria, InterestSet, Item, LoadOutcome, MarketContext, ALLOWED_TAGS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Market,     // Filtered listings
    Detail,     // One item, full info
    Interested, // The shortlist
    MyItems,    // Items the user posted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,       // Navigating lists
    Searching,    // Typing in the name search box
    FilterPicker, // Tag picker popup
}

/// Which column of the tag picker a cursor position falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagColumn {
    TradingAway,
    LookingFor,
}

pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub context: MarketContext,
    pub criteria: FilterCriteria,
    pub interests: InterestSet,
    pub market_state: ListState,
    pub interested_state: ListState,
    pub my_items_state: ListState,
    /// Item shown on the detail screen and where we came from
    pub detail: Option<Item>,
    pub detail_origin: Screen,
    /// Cursor over both picker columns: trading-away tags, then looking-for tags
    pub filter_cursor: usize,
    pub load_error: Option<String>,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(context: MarketContext, criteria: FilterCriteria) -> Self {
        Self {
            should_quit: false,
            screen: Screen::Market,
            input_mode: InputMode::Normal,
            context,
            criteria,
            interests: InterestSet::new(),
            market_state: selected_first(),
            interested_state: selected_first(),
            my_items_state: selected_first(),
            detail: None,
            detail_origin: Screen::Market,
            filter_cursor: 0,
            load_error: None,
            status_message: None,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Market items that pass the current criteria, in listing order
    pub fn visible_items(&self) -> Vec<&Item> {
        filter_items(self.context.market_items(), &self.criteria)
    }

    pub fn finish_load(&mut self, outcome: LoadOutcome) {
        match outcome.failure() {
            Some(reason) => {
                self.load_error = Some(reason);
                self.status_message = None;
            }
            None => {
                self.load_error = None;
                self.status_message = Some(format!(
                    "Loaded {} listings",
                    self.context.market_items().len()
                ));
            }
        }
        self.clamp_selections();
    }

    // ---- navigation ----

    pub fn next(&mut self) {
        let len = self.current_list_len();
        if let Some(state) = self.current_list_state() {
            step(state, len, 1);
        }
    }

    pub fn previous(&mut self) {
        let len = self.current_list_len();
        if let Some(state) = self.current_list_state() {
            step(state, len, -1);
        }
    }

    pub fn show_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.input_mode = InputMode::Normal;
        self.clamp_selections();
    }

    /// Market -> Interested -> My Items -> Market
    pub fn cycle_screen(&mut self) {
        let next = match self.screen {
            Screen::Market => Screen::Interested,
            Screen::Interested => Screen::MyItems,
            Screen::MyItems | Screen::Detail => Screen::Market,
        };
        self.show_screen(next);
    }

    pub fn selected_item(&self) -> Option<&Item> {
        match self.screen {
            Screen::Market => {
                let idx = self.market_state.selected()?;
                self.visible_items().get(idx).copied()
            }
            Screen::Interested => self.interests.get(self.interested_state.selected()?),
            Screen::MyItems => self.context.user_items().get(self.my_items_state.selected()?),
            Screen::Detail => self.detail.as_ref(),
        }
    }

    pub fn open_detail(&mut self) {
        if self.screen == Screen::Detail {
            return;
        }
        if let Some(item) = self.selected_item().cloned() {
            self.detail_origin = self.screen;
            self.detail = Some(item);
            self.screen = Screen::Detail;
        }
    }

    pub fn back(&mut self) {
        if self.screen == Screen::Detail {
            self.detail = None;
            self.show_screen(self.detail_origin);
        } else if self.screen != Screen::Market {
            self.show_screen(Screen::Market);
        }
    }

    // ---- interest ----

    /// Own items can't be flagged
    pub fn can_flag_interest(&self) -> bool {
        match self.screen {
            Screen::Market | Screen::Interested => true,
            Screen::Detail => self.detail_origin != Screen::MyItems,
            Screen::MyItems => false,
        }
    }

    pub fn toggle_selected_interest(&mut self) {
        if !self.can_flag_interest() {
            return;
        }
        if let Some(item) = self.selected_item().cloned() {
            let now_interested = self.interests.toggle(&item);
            self.status_message = Some(if now_interested {
                format!("Added {} to interested", item.name)
            } else {
                format!("Removed {} from interested", item.name)
            });
            self.clamp_selections();
        }
    }

    pub fn is_selected_interesting(&self) -> bool {
        self.selected_item()
            .map(|item| self.interests.is_interested(item))
            .unwrap_or(false)
    }

    // ---- search ----

    pub fn enter_search_mode(&mut self) {
        self.show_screen(Screen::Market);
        self.input_mode = InputMode::Searching;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.criteria.name_query.push(c);
        self.reset_market_selection();
    }

    pub fn pop_search_char(&mut self) {
        self.criteria.name_query.pop();
        self.reset_market_selection();
    }

    // ---- tag picker ----

    pub fn open_filter_picker(&mut self) {
        self.show_screen(Screen::Market);
        self.input_mode = InputMode::FilterPicker;
    }

    pub fn close_filter_picker(&mut self) {
        self.input_mode = InputMode::Normal;
        self.reset_market_selection();
    }

    pub fn next_filter(&mut self) {
        self.filter_cursor = (self.filter_cursor + 1).min(ALLOWED_TAGS.len() * 2 - 1);
    }

    pub fn previous_filter(&mut self) {
        self.filter_cursor = self.filter_cursor.saturating_sub(1);
    }

    /// Jump between the two picker columns, keeping the row
    pub fn switch_filter_column(&mut self) {
        let n = ALLOWED_TAGS.len();
        self.filter_cursor = (self.filter_cursor + n) % (n * 2);
    }

    pub fn filter_cursor_target(&self) -> (TagColumn, &'static str) {
        let n = ALLOWED_TAGS.len();
        if self.filter_cursor < n {
            (TagColumn::TradingAway, ALLOWED_TAGS[self.filter_cursor])
        } else {
            (TagColumn::LookingFor, ALLOWED_TAGS[self.filter_cursor - n])
        }
    }

    pub fn toggle_filter_tag(&mut self) {
        match self.filter_cursor_target() {
            (TagColumn::TradingAway, tag) => self.criteria.toggle_trading_away(tag),
            (TagColumn::LookingFor, tag) => self.criteria.toggle_looking_for(tag),
        };
    }

    pub fn reset_filter_tags(&mut self) {
        self.criteria.reset_tags();
    }

    // ---- helpers ----

    fn current_list_len(&self) -> usize {
        match self.screen {
            Screen::Market => self.visible_items().len(),
            Screen::Interested => self.interests.len(),
            Screen::MyItems => self.context.user_items().len(),
            Screen::Detail => 0,
        }
    }

    fn current_list_state(&mut self) -> Option<&mut ListState> {
        match self.screen {
            Screen::Market => Some(&mut self.market_state),
            Screen::Interested => Some(&mut self.interested_state),
            Screen::MyItems => Some(&mut self.my_items_state),
            Screen::Detail => None,
        }
    }

    fn reset_market_selection(&mut self) {
        self.market_state.select(Some(0));
    }

    /// Keep every list selection inside its list after the lists change
    fn clamp_selections(&mut self) {
        let market_len = self.visible_items().len();
        clamp(&mut self.market_state, market_len);
        clamp(&mut self.interested_state, self.interests.len());
        clamp(&mut self.my_items_state, self.context.user_items().len());
    }
}

fn selected_first() -> ListState {
    let mut state = ListState::default();
    state.select(Some(0));
    state
}

fn step(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        return;
    }
    let current = state.selected().unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, len as isize - 1);
    state.select(Some(next as usize));
}

fn clamp(state: &mut ListState, len: usize) {
    let selected = state.selected().unwrap_or(0);
    state.select(Some(selected.min(len.saturating_sub(1))));
}
