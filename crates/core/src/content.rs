//! Content feed models (`/val/content/v1/contents`).
//!
//! Only `acts` drives the sync; the remaining collections are decoded so
//! that the full document is available to callers.

use serde::{Deserialize, Serialize};

/// The `type` value that marks a competitive act (as opposed to an episode).
pub const ACT_TYPE: &str = "act";

/// A generic entry of the content feed (characters, maps, skins, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub name: String,
    pub asset_name: String,
    pub asset_path: String,
}

/// A season period. Episodes and acts share this shape and differ by `type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Act {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    #[serde(rename = "type")]
    pub act_type: String,
}

impl Act {
    /// Whether this entry qualifies as the currently running act.
    pub fn is_active_act(&self) -> bool {
        self.is_active && self.act_type == ACT_TYPE
    }
}

/// The full content document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentDocument {
    pub version: String,
    pub characters: Vec<ContentItem>,
    pub maps: Vec<ContentItem>,
    pub chromas: Vec<ContentItem>,
    pub skins: Vec<ContentItem>,
    pub equips: Vec<ContentItem>,
    pub game_modes: Vec<ContentItem>,
    pub sprays: Vec<ContentItem>,
    pub spray_levels: Vec<ContentItem>,
    pub charms: Vec<ContentItem>,
    pub charm_levels: Vec<ContentItem>,
    pub player_cards: Vec<ContentItem>,
    pub player_titles: Vec<ContentItem>,
    pub acts: Vec<Act>,
}

/// Outcome of the active-act selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveAct<'a> {
    /// No act is both active and of type `act`.
    None,
    /// Exactly one act qualifies.
    Unique(&'a Act),
    /// Several acts qualify; `selected` is the last one in feed order.
    Ambiguous {
        selected: &'a Act,
        candidates: usize,
    },
}

impl<'a> ActiveAct<'a> {
    /// The selected act, if any.
    pub fn act(&self) -> Option<&'a Act> {
        match *self {
            ActiveAct::None => None,
            ActiveAct::Unique(act) | ActiveAct::Ambiguous { selected: act, .. } => Some(act),
        }
    }
}

impl ContentDocument {
    /// Select the active act.
    ///
    /// Last match wins when several acts qualify; the result says so, so
    /// callers can decide whether ambiguity is fatal.
    pub fn active_act(&self) -> ActiveAct<'_> {
        let mut candidates = self.acts.iter().filter(|act| act.is_active_act());
        let Some(first) = candidates.next() else {
            return ActiveAct::None;
        };

        let (last, extra) = candidates.fold((first, 0usize), |(_, n), act| (act, n + 1));
        if extra == 0 {
            ActiveAct::Unique(last)
        } else {
            ActiveAct::Ambiguous {
                selected: last,
                candidates: extra + 1,
            }
        }
    }

    /// Id of the selected active act, or an empty string when none qualifies.
    pub fn active_act_id(&self) -> String {
        self.active_act()
            .act()
            .map(|act| act.id.clone())
            .unwrap_or_default()
    }

    /// Ids of every act that qualifies as active, in feed order.
    pub fn active_act_candidates(&self) -> Vec<String> {
        self.acts
            .iter()
            .filter(|act| act.is_active_act())
            .map(|act| act.id.clone())
            .collect()
    }
}
