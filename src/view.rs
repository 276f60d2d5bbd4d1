//! Ephemeral UI-side state: which panel is open, which AI tool is
//! active, which article is in focus, onboarding progress. Never
//! persisted; lives for the session only.
//!
//! Exactly one surface (AI panel, side panel, filter modal) may be open
//! at a time; opening one closes the others.

use serde::{Deserialize, Serialize};

/// AI exploration tools selectable in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiTool {
    Analyze,
    Create,
    Chat,
    Speak,
}

/// Tabs in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidePanelTab {
    Feed,
    Daily,
    Settings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub active_article_id: Option<String>,
    /// 0 = onboarding off; 1, 2, 3... for steps.
    pub onboarding_step: u32,
    pub active_ai_tool: Option<AiTool>,
    pub active_side_panel_tab: Option<SidePanelTab>,
    pub filter_modal_open: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ai_panel_open(&self) -> bool {
        self.active_ai_tool.is_some()
    }

    pub fn side_panel_open(&self) -> bool {
        self.active_side_panel_tab.is_some()
    }

    /// Re-selecting the open tool closes the panel; anything else opens
    /// it on that tool and closes the other surfaces.
    pub fn toggle_ai_panel(&mut self, tool: AiTool) {
        if self.active_ai_tool == Some(tool) {
            self.active_ai_tool = None;
        } else {
            self.active_ai_tool = Some(tool);
            self.active_side_panel_tab = None;
            self.filter_modal_open = false;
        }
    }

    pub fn toggle_side_panel(&mut self, tab: SidePanelTab) {
        if self.active_side_panel_tab == Some(tab) {
            self.active_side_panel_tab = None;
        } else {
            self.active_side_panel_tab = Some(tab);
            self.active_ai_tool = None;
            self.filter_modal_open = false;
        }
    }

    pub fn toggle_filter_modal(&mut self) {
        self.filter_modal_open = !self.filter_modal_open;
        if self.filter_modal_open {
            self.active_ai_tool = None;
            self.active_side_panel_tab = None;
        }
    }

    pub fn close_all(&mut self) {
        self.active_ai_tool = None;
        self.active_side_panel_tab = None;
        self.filter_modal_open = false;
    }

    pub fn set_active_article(&mut self, id: Option<String>) {
        self.active_article_id = id;
    }

    pub fn start_onboarding(&mut self) {
        self.onboarding_step = 1;
    }

    pub fn advance_onboarding(&mut self) {
        if self.onboarding_step > 0 {
            self.onboarding_step += 1;
        }
    }

    pub fn finish_onboarding(&mut self) {
        self.onboarding_step = 0;
    }
}
