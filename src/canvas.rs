//! The mood-board canvas.
//!
//! Owns the placed items shown on a board, one `SnapshotItemController` per
//! item, the single selection, the pointer capture for rotate/scale
//! gestures and the R-tree used for click hit testing. Every transform
//! change goes through [`MoodBoardCanvas::update_item`], which queues a
//! [`CanvasEvent::LayoutChanged`] carrying the full item list for the owning
//! document.

use crate::constants::{DEFAULT_ITEM_SIZE, POINTER_MOVE_BUDGET_MS};
use crate::error::{BacklotError, Result};
use crate::input::coords::CoordinateConverter;
use crate::input::{
    CaptureKind, ItemEvent, PointerCapture, PointerEvent, PointerRouter, SnapshotItemController,
};
use crate::perf::{PerfMonitor, is_profiling_enabled, measure};
use crate::profile_scope;
use crate::spatial_index::SpatialIndex;
use crate::types::{DropPayload, ItemId, ItemPatch, PlacedItem, Point, Rect, Size, Snapshot, clamp_scale};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Notification queued for the owner of the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// The item list changed; carries the complete updated list
    LayoutChanged(Vec<PlacedItem>),
    /// A new snapshot was dropped; the owner mints the item
    PlacementRequested { snapshot: Snapshot, position: Point },
    /// Selection moved to another item or was cleared
    SelectionChanged(Option<ItemId>),
}

/// Result of handling a drop
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// A new item was requested at this canvas-local position
    PlacementRequested(Point),
    /// An existing item was moved
    Moved(ItemId),
    /// The payload named an item that is not on this canvas
    Ignored,
}

/// Presentation state for one item, in render order
#[derive(Debug, Clone, PartialEq)]
pub struct ItemView<'a> {
    pub item: &'a PlacedItem,
    pub selected: bool,
    pub hovered: bool,
    pub dragging: bool,
    pub controls_visible: bool,
}

/// What the canvas should draw
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasView<'a> {
    /// No items; show the drop placeholder
    Empty,
    /// Items bottom to top
    Items(Vec<ItemView<'a>>),
}

impl CanvasView<'_> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

pub struct MoodBoardCanvas {
    items: Vec<PlacedItem>,
    controllers: HashMap<ItemId, SnapshotItemController>,
    selected: Option<ItemId>,
    dragging: Option<ItemId>,
    router: PointerRouter,
    spatial: SpatialIndex,
    item_size: Size,
    measured: Option<Size>,
    events: Vec<CanvasEvent>,
    perf: PerfMonitor,
}

impl Default for MoodBoardCanvas {
    fn default() -> Self {
        Self::new(Size::from(DEFAULT_ITEM_SIZE))
    }
}

impl MoodBoardCanvas {
    /// Empty canvas whose items have the given unscaled footprint
    pub fn new(item_size: Size) -> Self {
        Self {
            items: Vec::new(),
            controllers: HashMap::new(),
            selected: None,
            dragging: None,
            router: PointerRouter::new(),
            spatial: SpatialIndex::new(),
            item_size,
            measured: None,
            events: Vec::new(),
            perf: PerfMonitor::new(),
        }
    }

    /// Canvas showing `items`. Later duplicates of an id are dropped.
    pub fn with_items(items: Vec<PlacedItem>, item_size: Size) -> Self {
        let mut canvas = Self::new(item_size);
        canvas.replace_items(items);
        canvas
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn get(&self, id: &ItemId) -> Option<&PlacedItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_size(&self) -> Size {
        self.item_size
    }

    pub fn selected(&self) -> Option<&ItemId> {
        self.selected.as_ref()
    }

    pub fn dragging(&self) -> Option<&ItemId> {
        self.dragging.as_ref()
    }

    pub fn controller(&self, id: &ItemId) -> Option<&SnapshotItemController> {
        self.controllers.get(id)
    }

    pub fn active_capture(&self) -> Option<&PointerCapture> {
        self.router.active()
    }

    pub fn perf(&self) -> &PerfMonitor {
        &self.perf
    }

    /// Last measured size of the canvas element, if any
    pub fn measured_size(&self) -> Option<Size> {
        self.measured
    }

    /// Record the canvas's rendered bounds after mount or resize.
    ///
    /// Items keep their positions even if they now lie outside.
    pub fn measure(&mut self, bounds: &Rect) {
        self.measured = Some(bounds.size);
        debug!(
            width = bounds.size.width,
            height = bounds.size.height,
            "canvas measured"
        );
    }

    /// Items bottom to top: unselected items in collection order, then the
    /// selected item, then the dragged item if it is a different one.
    pub fn render_order(&self) -> Vec<&PlacedItem> {
        let is_raised = |id: &ItemId| {
            self.selected.as_ref() == Some(id) || self.dragging.as_ref() == Some(id)
        };

        let mut order: Vec<&PlacedItem> = self.items.iter().filter(|item| !is_raised(&item.id)).collect();
        if let Some(item) = self.selected.as_ref().and_then(|id| self.get(id)) {
            order.push(item);
        }
        if let Some(item) = self
            .dragging
            .as_ref()
            .filter(|id| self.selected.as_ref() != Some(*id))
            .and_then(|id| self.get(id))
        {
            order.push(item);
        }
        order
    }

    pub fn view(&self) -> CanvasView<'_> {
        if self.items.is_empty() {
            return CanvasView::Empty;
        }

        let views = self
            .render_order()
            .into_iter()
            .map(|item| {
                let selected = self.selected.as_ref() == Some(&item.id);
                let hovered = self
                    .controllers
                    .get(&item.id)
                    .is_some_and(|c| c.is_hovered());
                ItemView {
                    item,
                    selected,
                    hovered,
                    dragging: self.dragging.as_ref() == Some(&item.id),
                    controls_visible: hovered || selected,
                }
            })
            .collect();
        CanvasView::Items(views)
    }

    /// Topmost item under a canvas-local point
    pub fn item_at(&self, local: Point) -> Option<ItemId> {
        let candidates: HashSet<ItemId> = self
            .spatial
            .query_point(local.x, local.y)
            .into_iter()
            .collect();
        if candidates.is_empty() {
            return None;
        }

        self.render_order()
            .into_iter()
            .rev()
            .find(|item| candidates.contains(&item.id) && item.contains_point(local, self.item_size))
            .map(|item| item.id.clone())
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Collection changes
    // ========================================================================

    /// Swap in a new item list without queuing a layout event.
    ///
    /// Used when the owning document changed the items itself. Gestures and
    /// selection on items that disappeared are cancelled.
    pub fn replace_items(&mut self, items: Vec<PlacedItem>) {
        let mut seen = HashSet::new();
        self.items = items
            .into_iter()
            .filter(|item| seen.insert(item.id.clone()))
            .map(|mut item| {
                item.scale = clamp_scale(item.scale);
                item
            })
            .collect();

        let gone: Vec<ItemId> = self
            .controllers
            .keys()
            .filter(|id| !seen.contains(*id))
            .cloned()
            .collect();
        for id in &gone {
            self.forget(id);
        }
        for item in &self.items {
            self.controllers
                .entry(item.id.clone())
                .or_insert_with(|| SnapshotItemController::new(item.id.clone()));
        }

        self.reindex();
    }

    /// Change the unscaled item footprint; hit testing follows immediately
    pub fn set_item_size(&mut self, item_size: Size) {
        if self.item_size == item_size {
            return;
        }
        self.item_size = item_size;
        self.reindex();
    }

    fn reindex(&mut self) {
        let item_size = self.item_size;
        self.spatial
            .rebuild(self.items.iter().map(|item| (item.id.clone(), item.bounds(item_size))));
    }

    /// Add a fully formed item. Fails if the id is already on the canvas.
    pub fn insert_item(&mut self, mut item: PlacedItem) -> Result<()> {
        if self.get(&item.id).is_some() {
            return Err(BacklotError::validation(format!(
                "item {} is already on the canvas",
                item.id
            )));
        }
        item.scale = clamp_scale(item.scale);
        debug!(item = %item.id, x = item.position.x, y = item.position.y, "item inserted");
        self.spatial.insert(item.id.clone(), item.bounds(self.item_size));
        self.controllers
            .insert(item.id.clone(), SnapshotItemController::new(item.id.clone()));
        self.items.push(item);
        self.emit_layout();
        Ok(())
    }

    /// Merge a partial transform into one item.
    ///
    /// Returns false for an unknown id or when nothing changed; no event is
    /// queued in that case.
    pub fn update_item(&mut self, id: &ItemId, patch: ItemPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        let item_size = self.item_size;
        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            trace!(item = %id, "update for unknown item ignored");
            return false;
        };
        if !item.apply(&patch) {
            return false;
        }
        let bounds = item.bounds(item_size);
        self.spatial.insert(id.clone(), bounds);
        self.emit_layout();
        true
    }

    /// Remove an item. Removing an unknown id is a no-op.
    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        let Some(index) = self.items.iter().position(|item| &item.id == id) else {
            return false;
        };
        self.items.remove(index);
        self.forget(id);
        debug!(item = %id, "item removed");
        self.emit_layout();
        true
    }

    // ========================================================================
    // Drop target
    // ========================================================================

    /// Handle a drop at `pointer_client`.
    ///
    /// New snapshots are handed to the owner as a placement request; existing
    /// items move so their top-left sits under the pointer.
    pub fn accept_drop(
        &mut self,
        payload: DropPayload,
        pointer_client: Point,
        canvas_rect: &Rect,
    ) -> DropOutcome {
        let local = CoordinateConverter::to_canvas_local(pointer_client, canvas_rect);
        match payload {
            DropPayload::NewSnapshot(snapshot) => {
                debug!(snapshot = %snapshot.id, x = local.x, y = local.y, "placement requested");
                self.events.push(CanvasEvent::PlacementRequested {
                    snapshot,
                    position: local,
                });
                DropOutcome::PlacementRequested(local)
            }
            DropPayload::ExistingItem(id) => {
                if self.get(&id).is_none() {
                    debug!(item = %id, "drop for unknown item ignored");
                    return DropOutcome::Ignored;
                }
                if let Some(controller) = self.controllers.get_mut(&id) {
                    controller.end_drag();
                }
                if self.dragging.as_ref() == Some(&id) {
                    self.dragging = None;
                }
                self.update_item(&id, ItemPatch::position(local));
                DropOutcome::Moved(id)
            }
        }
    }

    // ========================================================================
    // Selection and hover
    // ========================================================================

    /// Select one item; the previous selection is replaced.
    pub fn select(&mut self, id: &ItemId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        if self.selected.as_ref() != Some(id) {
            self.selected = Some(id.clone());
            self.events.push(CanvasEvent::SelectionChanged(Some(id.clone())));
        }
        true
    }

    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.events.push(CanvasEvent::SelectionChanged(None));
        }
    }

    /// Click on an item body
    pub fn click_item(&mut self, id: &ItemId) -> bool {
        match self.controllers.get(id).map(|c| c.click()) {
            Some(ItemEvent::Selected) => self.select(id),
            _ => false,
        }
    }

    /// Click anywhere on the canvas: selects the topmost item under the
    /// pointer, or clears the selection on empty canvas.
    pub fn click_at(&mut self, pointer_client: Point, canvas_rect: &Rect) -> Option<ItemId> {
        let local = CoordinateConverter::to_canvas_local(pointer_client, canvas_rect);
        match self.item_at(local) {
            Some(id) => {
                self.click_item(&id);
                Some(id)
            }
            None => {
                self.clear_selection();
                None
            }
        }
    }

    pub fn set_hovered(&mut self, id: &ItemId, hovered: bool) {
        if let Some(controller) = self.controllers.get_mut(id) {
            controller.set_hovered(hovered);
        }
    }

    /// Pointer hovering over the canvas; only the topmost item under it is
    /// marked hovered.
    pub fn hover_at(&mut self, pointer_client: Point, canvas_rect: &Rect) -> Option<ItemId> {
        let local = CoordinateConverter::to_canvas_local(pointer_client, canvas_rect);
        let hit = self.item_at(local);
        for (id, controller) in self.controllers.iter_mut() {
            controller.set_hovered(hit.as_ref() == Some(id));
        }
        hit
    }

    // ========================================================================
    // Gestures
    // ========================================================================

    /// The host drag system picked up an item body
    pub fn begin_drag(&mut self, id: &ItemId) -> bool {
        if !self.controllers.contains_key(id) {
            return false;
        }
        // only one item is dragged at a time
        if self.dragging.as_ref().is_some_and(|current| current != id) {
            self.cancel_drag();
        }
        let Some(controller) = self.controllers.get_mut(id) else {
            return false;
        };
        if !controller.begin_drag() {
            return false;
        }
        self.dragging = Some(id.clone());
        true
    }

    /// The drag ended without a drop on this canvas
    pub fn cancel_drag(&mut self) -> bool {
        let Some(id) = self.dragging.take() else {
            return false;
        };
        self.controllers
            .get_mut(&id)
            .is_some_and(|controller| controller.end_drag())
    }

    /// Pointer down on an item's rotate handle
    pub fn begin_rotate(&mut self, id: &ItemId, pointer_client: Point) -> bool {
        self.begin_captured(id, pointer_client, CaptureKind::Rotate)
    }

    /// Pointer down on an item's scale handle
    pub fn begin_scale(&mut self, id: &ItemId, pointer_client: Point) -> bool {
        self.begin_captured(id, pointer_client, CaptureKind::Scale)
    }

    fn begin_captured(&mut self, id: &ItemId, pointer_client: Point, kind: CaptureKind) -> bool {
        let Some((rotation, scale)) = self.get(id).map(|item| (item.rotation, item.scale)) else {
            return false;
        };
        let Some(controller) = self.controllers.get_mut(id) else {
            return false;
        };
        let started = match kind {
            CaptureKind::Rotate => controller.begin_rotate(pointer_client, rotation),
            CaptureKind::Scale => controller.begin_scale(pointer_client, scale),
        };
        if !started {
            return false;
        }

        if let Some(previous) = self.router.capture(id.clone(), kind) {
            if let Some(other) = self.controllers.get_mut(previous.item_id()) {
                other.cancel();
            }
        }
        true
    }

    /// Pointer moved anywhere on the page.
    ///
    /// Routed to the item holding the capture, if any; the resulting rotation
    /// or scale is applied through `update_item`.
    pub fn pointer_move(&mut self, event: &PointerEvent, canvas_rect: &Rect) -> Option<ItemEvent> {
        profile_scope!("canvas::pointer_move", POINTER_MOVE_BUDGET_MS);
        if !is_profiling_enabled() {
            return self.route_pointer_move(event, canvas_rect);
        }
        let (result, elapsed_ms) = measure(|| self.route_pointer_move(event, canvas_rect));
        self.perf.record_operation("pointer_move", elapsed_ms);
        result
    }

    fn route_pointer_move(&mut self, event: &PointerEvent, canvas_rect: &Rect) -> Option<ItemEvent> {
        let id = self.router.target()?.clone();
        let item = self.get(&id)?;
        let center = CoordinateConverter::to_client(item.center(self.item_size), canvas_rect);
        let item_event = self.controllers.get(&id)?.pointer_move(event, center)?;

        match item_event {
            ItemEvent::Rotated(rotation) => {
                self.update_item(&id, ItemPatch::rotation(rotation));
            }
            ItemEvent::Scaled(scale) => {
                self.update_item(&id, ItemPatch::scale(scale));
            }
            ItemEvent::Moved(position) => {
                self.update_item(&id, ItemPatch::position(position));
            }
            ItemEvent::Selected | ItemEvent::Removed => {}
        }
        Some(item_event)
    }

    /// Pointer released anywhere. Ends the captured gesture; a second call
    /// finds nothing to release.
    pub fn pointer_up(&mut self) -> bool {
        let Some(capture) = self.router.release() else {
            return false;
        };
        self.controllers
            .get_mut(capture.item_id())
            .is_some_and(|controller| controller.pointer_up())
    }

    /// Abandon any captured gesture and any drag
    pub fn cancel_gestures(&mut self) {
        if let Some(capture) = self.router.release() {
            if let Some(controller) = self.controllers.get_mut(capture.item_id()) {
                controller.cancel();
            }
        }
        self.cancel_drag();
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn emit_layout(&mut self) {
        self.events.push(CanvasEvent::LayoutChanged(self.items.clone()));
    }

    /// Drop all per-item state for an id that left the collection
    fn forget(&mut self, id: &ItemId) {
        if let Some(mut controller) = self.controllers.remove(id) {
            controller.remove();
        }
        self.router.release_for(id);
        self.spatial.remove(id);
        if self.dragging.as_ref() == Some(id) {
            self.dragging = None;
        }
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
            self.events.push(CanvasEvent::SelectionChanged(None));
        }
    }
}
