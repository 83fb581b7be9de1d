//! Admin console state.
//!
//! The state caches whatever the current view displays so rendering never
//! touches the store. Every command refreshes it afterwards.

use crate::models::{ChoiceListing, Question, QuestionWithChoices};
use crate::store::{Store, StoreResult};

/// Blank choice slots offered under a question's existing choices.
pub const INLINE_EXTRA: usize = 2;

const HISTORY_LIMIT: usize = 100;

/// Which choices the choice list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChoiceFilter {
    #[default]
    All,
    Correct,
    Incorrect,
}

impl ChoiceFilter {
    pub const ALL: [ChoiceFilter; 3] = [Self::All, Self::Correct, Self::Incorrect];

    pub fn parse(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "" | "all" => Some(Self::All),
            "correct" | "yes" | "true" => Some(Self::Correct),
            "incorrect" | "no" | "false" => Some(Self::Incorrect),
            _ => None,
        }
    }

    /// The `is_correct` value to filter on, if any.
    pub fn as_flag(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Correct => Some(true),
            Self::Incorrect => Some(false),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Correct => "Correct",
            Self::Incorrect => "Incorrect",
        }
    }
}

/// What the console is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdminView {
    /// Question list, narrowed by the active search if any.
    #[default]
    Questions,
    /// One question with its inline choice slots.
    QuestionDetail(i64),
    /// Choice list with a correctness filter.
    Choices(ChoiceFilter),
    /// Command reference.
    Help,
}

pub struct AdminState {
    pub current_view: AdminView,
    /// View to return to when help is closed.
    pub previous_view: Option<AdminView>,
    /// Active question search term.
    pub search: Option<String>,
    pub questions: Vec<Question>,
    pub detail: Option<QuestionWithChoices>,
    pub choices: Vec<ChoiceListing>,
    pub question_count: usize,
    pub choice_count: usize,
    pub command_input: String,
    pub command_history: Vec<String>,
    /// First visible line of the current list.
    pub scroll: usize,
    pub should_quit: bool,
    /// Database name shown in the header.
    pub database: String,
}

impl AdminState {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            current_view: AdminView::Questions,
            previous_view: None,
            search: None,
            questions: Vec::new(),
            detail: None,
            choices: Vec::new(),
            question_count: 0,
            choice_count: 0,
            command_input: String::new(),
            command_history: Vec::new(),
            scroll: 0,
            should_quit: false,
            database: database.into(),
        }
    }

    /// Switch views and load what the new view needs.
    pub fn show(&mut self, view: AdminView, store: &Store) -> StoreResult<()> {
        if view != self.current_view {
            self.scroll = 0;
        }
        self.current_view = view;
        self.refresh(store)
    }

    /// Reload the totals and the data behind the current view.
    pub fn refresh(&mut self, store: &Store) -> StoreResult<()> {
        self.question_count = store.count_questions()?;
        self.choice_count = store.count_choices()?;

        match self.current_view.clone() {
            AdminView::Questions => {
                self.questions = match &self.search {
                    Some(term) => store.search_questions(term)?,
                    None => store.list_questions()?,
                };
            }
            AdminView::QuestionDetail(id) => {
                self.detail = store.question_with_choices(id)?;
                if self.detail.is_none() {
                    return self.show(AdminView::Questions, store);
                }
            }
            AdminView::Choices(filter) => {
                self.choices = store.list_choices(filter.as_flag())?;
            }
            AdminView::Help => {}
        }
        self.scroll = self.scroll.min(self.list_len().saturating_sub(1));
        Ok(())
    }

    /// The question open in the detail view.
    pub fn open_question(&self) -> Option<&QuestionWithChoices> {
        match self.current_view {
            AdminView::QuestionDetail(_) => self.detail.as_ref(),
            _ => None,
        }
    }

    /// Existing choices plus the blank slots after them.
    pub fn inline_slots(&self) -> usize {
        self.open_question()
            .map_or(0, |detail| detail.choices.len() + INLINE_EXTRA)
    }

    /// Number of lines the current list can scroll through.
    pub fn list_len(&self) -> usize {
        match self.current_view {
            AdminView::Questions => self.questions.len(),
            AdminView::QuestionDetail(_) => self.inline_slots(),
            AdminView::Choices(_) => self.choices.len(),
            AdminView::Help => 0,
        }
    }

    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < self.list_len() {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn add_to_history(&mut self, msg: String) {
        self.command_history.push(msg);
        if self.command_history.len() > HISTORY_LIMIT {
            self.command_history.remove(0);
        }
    }
}
