//! Form → loading → result state for the search screen.
//!
//! Holds everything the front end needs to draw, with no drawing of its own.
//! The submit gate and the single expanded card are enforced here.

use crate::advisor::{
    Advisor, AdvisorError, DifficultyRank, ElementalType, Query, Recommendation,
};
use crate::dex::{suggest, Dex, ReferenceEntity};
use crate::llm::TextGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Submit pressed with no name or no tera type.
    IncompleteForm,
    /// Anything went wrong while fetching advice.
    RequestFailed,
}

impl Notice {
    pub fn title(self) -> &'static str {
        match self {
            Self::IncompleteForm => "確認",
            Self::RequestFailed => "エラー",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::IncompleteForm => "相手の情報を入力してください",
            Self::RequestFailed => "AIからの回答を取得できませんでした。",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Closed,
    TeraType,
    Rank,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchForm {
    pub target_name: String,
    pub tera_type: Option<ElementalType>,
    pub rank: DifficultyRank,
}

impl SearchForm {
    pub fn to_query(&self) -> Query {
        Query::new(self.target_name.clone(), self.tera_type, self.rank)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    ResultShown {
        query: Query,
        recommendations: Vec<Recommendation>,
        expanded: Option<usize>,
    },
}

pub struct Screen<'d> {
    dex: &'d Dex,
    form: SearchForm,
    suggestions: Vec<&'d ReferenceEntity>,
    modal: Modal,
    phase: Phase,
    notice: Option<Notice>,
}

impl<'d> Screen<'d> {
    pub fn new(dex: &'d Dex) -> Self {
        Self {
            dex,
            form: SearchForm::default(),
            suggestions: Vec::new(),
            modal: Modal::Closed,
            phase: Phase::Idle,
            notice: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    pub fn suggestions(&self) -> &[&'d ReferenceEntity] {
        &self.suggestions
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    #[cfg(test)]
    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Submit is disabled only while a request is in flight.
    pub fn can_submit(&self) -> bool {
        !matches!(self.phase, Phase::Loading)
    }

    fn editable(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn set_target_name(&mut self, name: &str) {
        if !self.editable() {
            return;
        }
        self.form.target_name = name.to_string();
        self.suggestions = suggest(self.dex, name);
    }

    /// Copy the `index`th suggestion into the form. Returns false if there is none.
    pub fn pick_suggestion(&mut self, index: usize) -> bool {
        if !self.editable() {
            return false;
        }
        match self.suggestions.get(index) {
            Some(entity) => {
                self.form.target_name = entity.name.clone();
                self.suggestions.clear();
                true
            }
            None => false,
        }
    }

    pub fn open_modal(&mut self, modal: Modal) {
        if self.editable() {
            self.modal = modal;
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    pub fn choose_tera_type(&mut self, tera_type: ElementalType) {
        if !self.editable() {
            return;
        }
        self.form.tera_type = Some(tera_type);
        self.modal = Modal::Closed;
    }

    pub fn choose_rank(&mut self, rank: DifficultyRank) {
        if !self.editable() {
            return;
        }
        self.form.rank = rank;
        self.modal = Modal::Closed;
    }

    /// Move from `Idle` to `Loading` and hand back the query to send.
    ///
    /// An incomplete form raises [`Notice::IncompleteForm`] and stays `Idle`.
    pub fn begin_submit(&mut self) -> Option<Query> {
        if !self.editable() {
            return None;
        }

        let query = self.form.to_query();
        if let Err(e) = query.validate() {
            tracing::debug!(error = %e, "Submit rejected");
            self.notice = Some(Notice::IncompleteForm);
            return None;
        }

        self.notice = None;
        self.modal = Modal::Closed;
        self.phase = Phase::Loading;
        Some(query)
    }

    /// Settle the in-flight request. Ignored unless `Loading`.
    pub fn finish_submit(
        &mut self,
        query: Query,
        outcome: Result<Vec<Recommendation>, AdvisorError>,
    ) {
        if !matches!(self.phase, Phase::Loading) {
            return;
        }

        match outcome {
            Ok(recommendations) => {
                self.phase = Phase::ResultShown {
                    query,
                    recommendations,
                    expanded: None,
                };
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch advice");
                self.notice = Some(Notice::RequestFailed);
                self.phase = Phase::Idle;
            }
        }
    }

    /// Full submit cycle. Returns true when results are on screen.
    pub async fn submit<G: TextGenerator>(&mut self, advisor: &Advisor<G>) -> bool {
        let Some(query) = self.begin_submit() else {
            return false;
        };
        let outcome = advisor.fetch_advice(&query).await;
        self.finish_submit(query, outcome);
        matches!(self.phase, Phase::ResultShown { .. })
    }

    /// Expand card `index`, collapsing whichever was open; tapping the open card closes it.
    pub fn toggle_card(&mut self, index: usize) {
        if let Phase::ResultShown {
            recommendations,
            expanded,
            ..
        } = &mut self.phase
        {
            if index >= recommendations.len() {
                return;
            }
            *expanded = if *expanded == Some(index) {
                None
            } else {
                Some(index)
            };
        }
    }

    /// Leave the result view. The form keeps its values.
    pub fn back(&mut self) {
        if matches!(self.phase, Phase::ResultShown { .. }) {
            self.phase = Phase::Idle;
        }
    }

    pub fn heading(&self) -> Option<String> {
        match &self.phase {
            Phase::ResultShown { query, .. } => Some(format!(
                "【{} ソロ攻略】対 {} ({})",
                query.rank,
                query.target_name,
                query.tera_type.map(ElementalType::label).unwrap_or_default()
            )),
            _ => None,
        }
    }
}
