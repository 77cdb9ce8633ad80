//! # Dialog State Machine
//!
//! State for the add/edit/delete modal workflows.
//!
//! ## State Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Dialog State Machine                              │
//! │                                                                         │
//! │                    open_add()                                           │
//! │        ┌────────────────────────────► Adding(draft)                     │
//! │        │                                   │                            │
//! │        │           open_edit(item)         │ close()                    │
//! │     Closed ◄──────────────────────┐        │                            │
//! │        │ ▲                        │        ▼                            │
//! │        │ │ close()           Editing(item, draft)                       │
//! │        │ └────────────────────────┘                                     │
//! │        │           open_delete(item)                                    │
//! │        └────────────────────────────► Deleting(item)                    │
//! │                                                                         │
//! │  Exactly one workflow is active at a time - the variants make the       │
//! │  "two dialogs open at once" state unrepresentable.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Preview Lifecycle
//! A locally chosen image file holds a preview resource (the browser-side
//! equivalent is an object URL that must be revoked). [`PreviewHandle`]
//! releases on drop, so every path that discards a selection - replace,
//! cancel, submit-success - releases the preview exactly once without any
//! call-site bookkeeping.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::types::InventoryItem;
use crate::DEFAULT_CATEGORY;

// =============================================================================
// Preview Handle
// =============================================================================

/// Scoped handle to a preview resource for a locally selected image.
///
/// Dropping the handle releases the resource. Handles are deliberately not
/// `Clone`: one selection, one holder, one release.
#[derive(Debug)]
pub struct PreviewHandle {
    url: String,
    released: Arc<AtomicBool>,
}

/// Observer for a preview's release state, used by callers that need to
/// verify the scoped-acquisition contract (primarily tests).
#[derive(Debug, Clone)]
pub struct PreviewProbe(Arc<AtomicBool>);

impl PreviewProbe {
    pub fn is_released(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl PreviewHandle {
    /// Wraps a preview URL in a scoped handle.
    pub fn new(url: impl Into<String>) -> Self {
        PreviewHandle {
            url: url.into(),
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The preview URL to render while the selection is alive.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns an observer that outlives the handle.
    pub fn probe(&self) -> PreviewProbe {
        PreviewProbe(Arc::clone(&self.released))
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

// =============================================================================
// Image Selection
// =============================================================================

/// Image state carried by a draft.
#[derive(Debug, Default)]
pub enum ImageSelection {
    /// No image chosen and none on the item.
    #[default]
    None,

    /// The item's already-hosted image, shown as the initial edit preview.
    /// No upload has occurred for it in this dialog session.
    Existing(String),

    /// A newly chosen local file awaiting upload on submit.
    NewFile {
        path: PathBuf,
        preview: PreviewHandle,
    },
}

impl ImageSelection {
    /// URL to show in the preview pane, if any.
    pub fn preview_url(&self) -> Option<&str> {
        match self {
            ImageSelection::None => None,
            ImageSelection::Existing(url) => Some(url),
            ImageSelection::NewFile { preview, .. } => Some(preview.url()),
        }
    }

    /// Whether submit must upload a file before posting the payload.
    pub fn has_new_file(&self) -> bool {
        matches!(self, ImageSelection::NewFile { .. })
    }

    /// Path of the pending local file, if one is selected.
    pub fn new_file_path(&self) -> Option<&Path> {
        match self {
            ImageSelection::NewFile { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Selects a new local file, releasing any prior preview.
    pub fn select_file(&mut self, path: PathBuf, preview: PreviewHandle) {
        *self = ImageSelection::NewFile { path, preview };
    }

    /// Clears the selection, releasing any held preview.
    pub fn clear(&mut self) {
        *self = ImageSelection::None;
    }
}

// =============================================================================
// Item Draft
// =============================================================================

/// Locally held, unsaved copy of an item's fields.
///
/// One draft backs the add dialog and one backs the edit dialog; each lives
/// exactly as long as its dialog is open.
#[derive(Debug)]
pub struct ItemDraft {
    pub product_name: String,
    pub sku: String,
    pub quantity: u32,
    pub price: String,
    pub category: String,
    pub image: ImageSelection,
}

impl Default for ItemDraft {
    fn default() -> Self {
        ItemDraft {
            product_name: String::new(),
            sku: String::new(),
            quantity: 0,
            price: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            image: ImageSelection::None,
        }
    }
}

impl ItemDraft {
    /// Seeds a draft from an existing item for the edit dialog.
    ///
    /// The item's hosted image (if any) becomes the initial preview; it is
    /// NOT treated as a new file, so an unchanged submit omits the image
    /// field and the server keeps what it has.
    pub fn from_item(item: &InventoryItem) -> Self {
        ItemDraft {
            product_name: item.product_name.clone(),
            sku: item.sku.clone(),
            quantity: item.quantity,
            price: item.price.clone(),
            category: item.category.clone(),
            image: match &item.image {
                Some(url) => ImageSelection::Existing(url.clone()),
                None => ImageSelection::None,
            },
        }
    }
}

// =============================================================================
// Dialog State
// =============================================================================

/// The active modal workflow, if any.
#[derive(Debug, Default)]
pub enum DialogState {
    /// No dialog open.
    #[default]
    Closed,

    /// Add dialog with its draft.
    Adding(ItemDraft),

    /// Edit dialog: the immutable target plus the draft being edited.
    Editing {
        item: InventoryItem,
        draft: ItemDraft,
    },

    /// Delete confirmation naming the target.
    Deleting(InventoryItem),
}

impl DialogState {
    /// Opens the add dialog with a fresh default draft.
    /// Any previously open dialog is discarded (and its preview released).
    pub fn open_add(&mut self) {
        *self = DialogState::Adding(ItemDraft::default());
    }

    /// Opens the edit dialog, seeding the draft from the item.
    pub fn open_edit(&mut self, item: InventoryItem) {
        let draft = ItemDraft::from_item(&item);
        *self = DialogState::Editing { item, draft };
    }

    /// Opens the delete confirmation for the item.
    pub fn open_delete(&mut self, item: InventoryItem) {
        *self = DialogState::Deleting(item);
    }

    /// Closes whatever is open, dropping drafts and releasing previews.
    pub fn close(&mut self) {
        *self = DialogState::Closed;
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, DialogState::Closed)
    }

    /// Mutable access to the open draft (add or edit), for form input.
    pub fn draft_mut(&mut self) -> Option<&mut ItemDraft> {
        match self {
            DialogState::Adding(draft) => Some(draft),
            DialogState::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// The item targeted by the edit or delete dialog.
    pub fn target(&self) -> Option<&InventoryItem> {
        match self {
            DialogState::Editing { item, .. } => Some(item),
            DialogState::Deleting(item) => Some(item),
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> InventoryItem {
        InventoryItem {
            id: 42,
            product_name: "Blue Widget".to_string(),
            sku: "WID-042".to_string(),
            quantity: 7,
            price: "19.99".to_string(),
            category: "Sports".to_string(),
            image: Some("https://img.example/widget.png".to_string()),
        }
    }

    #[test]
    fn test_open_edit_seeds_draft_from_item() {
        let item = sample_item();
        let mut dialog = DialogState::default();
        dialog.open_edit(item.clone());

        match &dialog {
            DialogState::Editing { item: target, draft } => {
                assert_eq!(target.id, 42);
                assert_eq!(draft.product_name, item.product_name);
                assert_eq!(draft.sku, item.sku);
                assert_eq!(draft.quantity, item.quantity);
                assert_eq!(draft.price, item.price);
                assert_eq!(draft.category, item.category);
                // Existing image is the preview, not a pending upload
                assert_eq!(
                    draft.image.preview_url(),
                    Some("https://img.example/widget.png")
                );
                assert!(!draft.image.has_new_file());
            }
            other => panic!("expected Editing, got {:?}", other),
        }
    }

    #[test]
    fn test_open_add_starts_with_defaults() {
        let mut dialog = DialogState::default();
        dialog.open_add();
        let draft = dialog.draft_mut().unwrap();
        assert_eq!(draft.product_name, "");
        assert_eq!(draft.category, DEFAULT_CATEGORY);
        assert_eq!(draft.quantity, 0);
        assert!(draft.image.preview_url().is_none());
    }

    #[test]
    fn test_only_one_dialog_active() {
        let mut dialog = DialogState::default();
        dialog.open_add();
        dialog.open_delete(sample_item());
        assert!(matches!(dialog, DialogState::Deleting(_)));
        dialog.close();
        assert!(dialog.is_closed());
        assert!(dialog.target().is_none());
    }

    #[test]
    fn test_close_releases_preview() {
        let mut dialog = DialogState::default();
        dialog.open_add();

        let preview = PreviewHandle::new("blob:preview-1");
        let probe = preview.probe();
        dialog
            .draft_mut()
            .unwrap()
            .image
            .select_file(PathBuf::from("/tmp/pic.png"), preview);

        assert!(!probe.is_released());
        dialog.close();
        assert!(probe.is_released());
    }

    #[test]
    fn test_replacing_file_releases_prior_preview() {
        let mut selection = ImageSelection::None;

        let first = PreviewHandle::new("blob:first");
        let first_probe = first.probe();
        selection.select_file(PathBuf::from("/tmp/a.png"), first);

        let second = PreviewHandle::new("blob:second");
        let second_probe = second.probe();
        selection.select_file(PathBuf::from("/tmp/b.png"), second);

        assert!(first_probe.is_released());
        assert!(!second_probe.is_released());
        assert_eq!(selection.preview_url(), Some("blob:second"));
    }

    #[test]
    fn test_clear_releases_preview() {
        let mut selection = ImageSelection::None;
        let preview = PreviewHandle::new("blob:x");
        let probe = preview.probe();
        selection.select_file(PathBuf::from("/tmp/x.png"), preview);

        selection.clear();
        assert!(probe.is_released());
        assert!(selection.preview_url().is_none());
    }

    #[test]
    fn test_new_file_path_exposed_for_upload() {
        let mut selection = ImageSelection::None;
        selection.select_file(PathBuf::from("/tmp/up.png"), PreviewHandle::new("blob:up"));
        assert!(selection.has_new_file());
        assert_eq!(selection.new_file_path(), Some(Path::new("/tmp/up.png")));
    }
}
