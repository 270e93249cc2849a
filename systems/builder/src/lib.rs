#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure build-placement system: owns the selected item and its preview, and
//! turns confirmed clicks into placement commands for the world.

use foundry_core::{
    BuildableId, BuildableItemConfig, CellCoord, Command, Event, GridMapper, PauseState,
    PlacementError,
};
use glam::Vec2;
use tracing::{debug, info};

/// Opacity of the placement preview.
pub const PREVIEW_ALPHA: f32 = 0.6;

/// Draw depth of the placement preview; terrain and nodes render below it.
pub const PREVIEW_DEPTH: i32 = 50;

/// Ghost of the selected item that follows the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementPreview {
    /// Item the preview stands for.
    pub item: BuildableId,
    /// Visual key drawn for the preview.
    pub visual_key: &'static str,
    /// Cell currently under the pointer.
    pub cell: CellCoord,
    /// Snapped world position of the preview.
    pub position: Vec2,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
    /// Draw depth.
    pub depth: i32,
}

impl PlacementPreview {
    fn tracking(item: &BuildableItemConfig, pointer_world: Vec2, mapper: &GridMapper) -> Self {
        let cell = mapper.to_grid_cell(pointer_world);
        Self {
            item: item.id,
            visual_key: item.visual_key,
            cell,
            position: mapper.to_world_center(cell),
            alpha: PREVIEW_ALPHA,
            depth: PREVIEW_DEPTH,
        }
    }
}

/// Pointer appearance requested by the placement system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorAffordance {
    /// Regular system pointer.
    #[default]
    Default,
    /// Pointer hidden while the preview stands in for it.
    Hidden,
}

/// Outcome of a selection request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    /// The item became the active selection.
    Selected(BuildableId),
    /// The active selection was cleared.
    Cleared,
}

/// Placement state machine: idle, or holding exactly one selected item and its preview.
#[derive(Clone, Debug, Default)]
pub struct BuildPlacement {
    selection: Option<&'static BuildableItemConfig>,
    preview: Option<PlacementPreview>,
    last_rejection: Option<PlacementError>,
}

impl BuildPlacement {
    /// Creates an idle placement system.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selection: None,
            preview: None,
            last_rejection: None,
        }
    }

    /// Selects the item, or clears the selection when the item is already selected.
    ///
    /// Selecting a different item replaces the previous preview, so at most one exists.
    pub fn select_or_toggle(
        &mut self,
        item: &'static BuildableItemConfig,
        pointer_world: Vec2,
        mapper: &GridMapper,
    ) -> SelectionChange {
        self.last_rejection = None;
        if self.selected() == Some(item.id) {
            self.clear();
            info!(item = %item.id, "build selection cleared");
            return SelectionChange::Cleared;
        }

        self.selection = Some(item);
        self.preview = Some(PlacementPreview::tracking(item, pointer_world, mapper));
        info!(item = %item.id, "build item selected");
        SelectionChange::Selected(item.id)
    }

    /// Moves the preview to the snapped pointer position. No-op while idle or paused.
    pub fn update_preview(&mut self, pointer_world: Vec2, pause: PauseState, mapper: &GridMapper) {
        if pause.is_paused() {
            return;
        }
        if let Some(item) = self.selection {
            self.preview = Some(PlacementPreview::tracking(item, pointer_world, mapper));
        }
    }

    /// Requests placement of the selected item at the pointer's cell.
    ///
    /// Returns `true` when a command was emitted. No-op while idle or paused. The
    /// selection is only cleared once the world confirms the placement via [`Self::handle`].
    pub fn confirm_placement(
        &mut self,
        pointer_world: Vec2,
        pause: PauseState,
        mapper: &GridMapper,
        out: &mut Vec<Command>,
    ) -> bool {
        if pause.is_paused() {
            return false;
        }
        let Some(item) = self.selection else {
            return false;
        };

        let cell = mapper.to_grid_cell(pointer_world);
        debug!(item = %item.id, %cell, "placement confirmed");
        out.push(Command::PlaceStructure { item: item.id, cell });
        true
    }

    /// Reacts to the world's verdict on placement requests.
    ///
    /// Success clears the selection and preview. Rejection keeps both so the
    /// player may retry, and records the reason.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::StructurePlaced { item, .. } if self.selected() == Some(*item) => {
                    self.clear();
                }
                Event::PlacementRejected { item, reason, .. } if self.selected() == Some(*item) => {
                    self.last_rejection = Some(*reason);
                }
                _ => {}
            }
        }
    }

    /// Clears the selection. Works regardless of pause state; returns `false` while idle.
    pub fn cancel(&mut self) -> bool {
        let Some(item) = self.selection else {
            return false;
        };
        self.clear();
        info!(item = %item.id, "build placement cancelled");
        true
    }

    /// Identifier of the selected item, if any.
    #[must_use]
    pub fn selected(&self) -> Option<BuildableId> {
        self.selection.map(|item| item.id)
    }

    /// Catalog entry of the selected item, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&'static BuildableItemConfig> {
        self.selection
    }

    /// Current preview, present exactly while an item is selected.
    #[must_use]
    pub fn preview(&self) -> Option<&PlacementPreview> {
        self.preview.as_ref()
    }

    /// Pointer appearance to apply this frame.
    #[must_use]
    pub fn cursor(&self) -> CursorAffordance {
        if self.selection.is_some() {
            CursorAffordance::Hidden
        } else {
            CursorAffordance::Default
        }
    }

    /// Reason the most recent placement attempt for the selected item was rejected.
    #[must_use]
    pub fn last_rejection(&self) -> Option<PlacementError> {
        self.last_rejection
    }

    fn clear(&mut self) {
        self.selection = None;
        self.preview = None;
        self.last_rejection = None;
    }
}
