//! # Dashboard Controller
//!
//! Orchestrates the dashboard flows: auth gate, inventory refresh, and the
//! add/edit/delete dialogs.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Dashboard Controller                                 │
//! │                                                                         │
//! │  View Layer ───► Dashboard ───► ApiGateway ───► Backend REST API       │
//! │                      │                                                  │
//! │                      ├────────► ImageHost ────► Asset CDN              │
//! │                      │                                                  │
//! │                      ├────────► SessionStore ─► Disk                   │
//! │                      │                                                  │
//! │                      └────────► SessionState / InventoryState /        │
//! │                                 DialogState / AlertSlot                │
//! │                                                                         │
//! │  LOCK DISCIPLINE:                                                      │
//! │  Every method clones what it needs out of a state lock, releases the   │
//! │  lock, and only then awaits the network. No guard crosses an await.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, warn};

use stockdeck_api::{
    ApiGateway, CreateItemPayload, ImageHost, SessionStore, UpdateItemPayload,
};
use stockdeck_core::{
    validate_draft, validate_login, validate_registration, DialogState, ImageSelection, ItemDraft,
    PreviewHandle, Role, VisiblePage,
};

use crate::alert::AlertSlot;
use crate::error::AppError;
use crate::state::{InventoryState, SessionContext, SessionState};

// =============================================================================
// User-Facing Messages
// =============================================================================

pub const MSG_REGISTER_SUCCESS: &str = "Registration successful! Redirecting to dashboard...";
pub const MSG_FETCH_FAILED: &str = "Failed to load inventory items. Please try again later.";
pub const MSG_ADD_SUCCESS: &str = "Item added successfully!";
pub const MSG_ADD_FAILED: &str = "Failed to add item. Please try again.";
pub const MSG_UPDATE_SUCCESS: &str = "Item updated successfully!";
pub const MSG_UPDATE_FAILED: &str = "Failed to update item. Please try again.";
pub const MSG_DELETE_SUCCESS: &str = "Item deleted successfully!";
pub const MSG_DELETE_FAILED: &str = "Failed to delete item. Please try again.";

/// Result of running the auth gate on dashboard entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Full access: render the dashboard with the action column.
    Admin,
    /// Read-only access: render the dashboard without modify controls.
    Staff,
    /// No usable session: the caller must show the login screen.
    RedirectToLogin,
}

// =============================================================================
// Controller
// =============================================================================

/// The dashboard's behavior behind any view layer.
pub struct Dashboard {
    gateway: Arc<dyn ApiGateway>,
    images: Arc<dyn ImageHost>,
    store: SessionStore,

    pub session: SessionState,
    pub inventory: InventoryState,
    pub alerts: AlertSlot,
    dialog: Mutex<DialogState>,
}

impl Dashboard {
    pub fn new(
        gateway: Arc<dyn ApiGateway>,
        images: Arc<dyn ImageHost>,
        store: SessionStore,
    ) -> Self {
        Dashboard {
            gateway,
            images,
            store,
            session: SessionState::new(),
            inventory: InventoryState::new(),
            alerts: AlertSlot::new(),
            dialog: Mutex::new(DialogState::Closed),
        }
    }

    // =========================================================================
    // Auth Gate
    // =========================================================================

    /// Verifies the stored session against the backend.
    ///
    /// Any failure along the way (no stored tokens, unreadable session file,
    /// rejected token) resolves to [`AuthOutcome::RedirectToLogin`] with the
    /// stored session wiped, never to an error.
    pub async fn authorize(&self) -> AuthOutcome {
        let tokens = match self.store.load() {
            Ok(Some(tokens)) => tokens,
            Ok(None) => {
                debug!("No stored session, redirecting to login");
                return self.reject_session();
            }
            Err(e) => {
                warn!("Stored session unreadable: {}", e);
                return self.reject_session();
            }
        };

        match self.gateway.user_role(&tokens.access).await {
            Ok(role) => {
                info!(is_admin = role.is_admin, "Session verified");
                self.session.set(SessionContext {
                    tokens,
                    is_admin: role.is_admin,
                    is_staff: role.is_staff,
                });
                if role.is_admin {
                    AuthOutcome::Admin
                } else {
                    AuthOutcome::Staff
                }
            }
            Err(e) => {
                warn!("Role check failed: {}", e);
                self.reject_session()
            }
        }
    }

    fn reject_session(&self) -> AuthOutcome {
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear stored session: {}", e);
        }
        self.session.clear();
        AuthOutcome::RedirectToLogin
    }

    /// Exchanges credentials for tokens and persists them.
    ///
    /// On success the caller proceeds to the dashboard, where
    /// [`Dashboard::authorize`] installs the session context.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AppError> {
        validate_login(username, password)?;

        let tokens = self.gateway.login(username, password).await?;
        self.store.save(&tokens)?;
        info!(username, "Logged in");
        Ok(())
    }

    /// Creates an account, then logs straight into it.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirmation: &str,
        role: &str,
    ) -> Result<(), AppError> {
        validate_registration(username, password, confirmation, role)?;
        let role: Role = role.parse().map_err(AppError::from)?;

        self.gateway.register(username, password, role).await?;
        let tokens = self.gateway.login(username, password).await?;
        self.store.save(&tokens)?;

        info!(username, ?role, "Account registered");
        self.alerts.success(MSG_REGISTER_SUCCESS);
        Ok(())
    }

    /// Drops the session everywhere: disk, memory, and any in-flight fetch.
    pub fn logout(&self) {
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear stored session: {}", e);
        }
        self.session.clear();
        self.inventory.reset();
        self.close_dialog();
        info!("Logged out");
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Fetches the item list and installs it unless a newer fetch has
    /// started in the meantime.
    ///
    /// Failures land in the inventory error banner, not in a return value;
    /// the previous list stays visible.
    pub async fn refresh_inventory(&self) {
        let ticket = self.inventory.begin_fetch();

        let Some(access) = self.session.access_token() else {
            self.inventory.apply_error(ticket, MSG_FETCH_FAILED);
            warn!("Inventory refresh without an active session");
            return;
        };

        match self.gateway.list_items(&access).await {
            Ok(items) => {
                if self.inventory.apply_items(ticket, items) {
                    debug!(count = self.inventory.item_count(), "Inventory refreshed");
                } else {
                    debug!("Dropped stale inventory response");
                }
            }
            Err(e) => {
                warn!("Inventory fetch failed: {}", e);
                self.inventory.apply_error(ticket, MSG_FETCH_FAILED);
            }
        }
    }

    /// Runs the filter engine for the current state.
    pub fn visible_page(&self) -> VisiblePage {
        self.inventory.visible_page()
    }

    // =========================================================================
    // Dialogs
    // =========================================================================

    /// Opens the add dialog with a fresh draft.
    pub fn open_add_dialog(&self) {
        self.lock_dialog().open_add();
    }

    /// Opens the edit dialog seeded from the item with the given id.
    pub fn open_edit_dialog(&self, id: i64) -> Result<(), AppError> {
        let item = self
            .inventory
            .item_by_id(id)
            .ok_or_else(|| AppError::not_found("Item", id))?;
        self.lock_dialog().open_edit(item);
        Ok(())
    }

    /// Opens the delete confirmation for the item with the given id.
    pub fn open_delete_dialog(&self, id: i64) -> Result<(), AppError> {
        let item = self
            .inventory
            .item_by_id(id)
            .ok_or_else(|| AppError::not_found("Item", id))?;
        self.lock_dialog().open_delete(item);
        Ok(())
    }

    /// Closes whatever dialog is open, dropping its draft (and releasing
    /// any local image preview).
    pub fn close_dialog(&self) {
        self.lock_dialog().close();
    }

    /// Whether no dialog is open.
    pub fn dialog_is_closed(&self) -> bool {
        self.lock_dialog().is_closed()
    }

    /// Reads the dialog state under the lock.
    pub fn with_dialog<R>(&self, f: impl FnOnce(&DialogState) -> R) -> R {
        f(&self.lock_dialog())
    }

    /// Mutates the open dialog's draft, for form field edits.
    pub fn update_draft(&self, f: impl FnOnce(&mut ItemDraft)) -> Result<(), AppError> {
        let mut dialog = self.lock_dialog();
        match dialog.draft_mut() {
            Some(draft) => {
                f(draft);
                Ok(())
            }
            None => Err(AppError::internal("No dialog with a draft is open")),
        }
    }

    /// Stages a local file as the draft's image and previews it.
    pub fn select_image(&self, path: PathBuf, preview_url: &str) -> Result<(), AppError> {
        let preview = PreviewHandle::new(preview_url);
        self.update_draft(|draft| draft.image.select_file(path, preview))
    }

    /// Removes the staged image from the draft.
    pub fn clear_image(&self) -> Result<(), AppError> {
        self.update_draft(|draft| draft.image.clear())
    }

    fn lock_dialog(&self) -> std::sync::MutexGuard<'_, DialogState> {
        self.dialog.lock().unwrap_or_else(|e| e.into_inner())
    }

    // =========================================================================
    // Submit Flows
    // =========================================================================

    /// Validates the add draft, uploads its image if one was staged, and
    /// creates the item.
    ///
    /// An upload failure aborts before anything reaches the backend; the
    /// dialog stays open so the user can retry or drop the file.
    pub async fn submit_add(&self) -> Result<(), AppError> {
        let access = self.require_admin()?;

        let (fields, file) = {
            let dialog = self.lock_dialog();
            match &*dialog {
                DialogState::Adding(draft) => snapshot(draft),
                _ => return Err(AppError::internal("Add dialog is not open")),
            }
        };
        validate_draft(&fields)?;

        let uploaded = match file {
            Some(path) => match self.images.upload(&path).await {
                Ok(url) => Some(url),
                Err(e) => {
                    error!("Image upload failed: {}", e);
                    self.alerts.error(MSG_ADD_FAILED);
                    return Err(e.into());
                }
            },
            None => None,
        };

        let payload = CreateItemPayload::from_draft(&fields, uploaded);
        match self.gateway.create_item(&access, &payload).await {
            Ok(item) => {
                info!(id = item.id, sku = %item.sku, "Item created");
                self.alerts.success(MSG_ADD_SUCCESS);
                self.close_dialog();
                self.refresh_inventory().await;
                Ok(())
            }
            Err(e) => {
                error!("Item create failed: {}", e);
                self.alerts.error(MSG_ADD_FAILED);
                Err(e.into())
            }
        }
    }

    /// Validates the edit draft and updates the item.
    ///
    /// The image field is sent only when a new file was staged in this
    /// session; otherwise the server keeps its stored image.
    pub async fn submit_edit(&self) -> Result<(), AppError> {
        let access = self.require_admin()?;

        let (id, fields, file) = {
            let dialog = self.lock_dialog();
            match &*dialog {
                DialogState::Editing { item, draft } => {
                    let (fields, file) = snapshot(draft);
                    (item.id, fields, file)
                }
                _ => return Err(AppError::internal("Edit dialog is not open")),
            }
        };
        validate_draft(&fields)?;

        let uploaded = match file {
            Some(path) => match self.images.upload(&path).await {
                Ok(url) => Some(url),
                Err(e) => {
                    error!("Image upload failed: {}", e);
                    self.alerts.error(MSG_UPDATE_FAILED);
                    return Err(e.into());
                }
            },
            None => None,
        };

        let payload = UpdateItemPayload::from_draft(&fields, uploaded);
        match self.gateway.update_item(&access, id, &payload).await {
            Ok(item) => {
                info!(id = item.id, sku = %item.sku, "Item updated");
                self.alerts.success(MSG_UPDATE_SUCCESS);
                self.close_dialog();
                self.refresh_inventory().await;
                Ok(())
            }
            Err(e) => {
                error!(id, "Item update failed: {}", e);
                self.alerts.error(MSG_UPDATE_FAILED);
                Err(e.into())
            }
        }
    }

    /// Deletes the item behind the open confirmation dialog.
    pub async fn confirm_delete(&self) -> Result<(), AppError> {
        let access = self.require_admin()?;

        let id = {
            let dialog = self.lock_dialog();
            match &*dialog {
                DialogState::Deleting(item) => item.id,
                _ => return Err(AppError::internal("Delete dialog is not open")),
            }
        };

        match self.gateway.delete_item(&access, id).await {
            Ok(()) => {
                info!(id, "Item deleted");
                self.alerts.success(MSG_DELETE_SUCCESS);
                self.close_dialog();
                self.refresh_inventory().await;
                Ok(())
            }
            Err(e) => {
                error!(id, "Item delete failed: {}", e);
                self.alerts.error(MSG_DELETE_FAILED);
                Err(e.into())
            }
        }
    }

    fn require_admin(&self) -> Result<String, AppError> {
        let access = self
            .session
            .access_token()
            .ok_or_else(|| AppError::unauthorized("No active session"))?;
        if !self.session.is_admin() {
            return Err(AppError::unauthorized(
                "Only admin users can modify inventory",
            ));
        }
        Ok(access)
    }
}

/// Copies the draft's plain fields and its staged file path out of the
/// dialog lock, so nothing borrowed survives into the network awaits.
fn snapshot(draft: &ItemDraft) -> (ItemDraft, Option<PathBuf>) {
    let fields = ItemDraft {
        product_name: draft.product_name.clone(),
        sku: draft.sku.clone(),
        quantity: draft.quantity,
        price: draft.price.clone(),
        category: draft.category.clone(),
        image: ImageSelection::None,
    };
    (fields, draft.image.new_file_path().map(Path::to_path_buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use stockdeck_api::{ApiError, ApiResult, RoleInfo, TokenPair};
    use stockdeck_core::InventoryItem;

    // =========================================================================
    // Fakes
    // =========================================================================

    #[derive(Default)]
    struct FakeBackend {
        items: Mutex<Vec<InventoryItem>>,
        next_id: Mutex<i64>,
        registered: Mutex<Vec<(String, Role)>>,
        created: Mutex<Vec<CreateItemPayload>>,
        updated: Mutex<Vec<(i64, UpdateItemPayload)>>,
        deleted: Mutex<Vec<i64>>,
        role: Mutex<Option<RoleInfo>>,
        fail_list: AtomicBool,
    }

    impl FakeBackend {
        fn with_role(is_admin: bool) -> Self {
            let backend = FakeBackend::default();
            *backend.role.lock().unwrap() = Some(RoleInfo {
                is_admin,
                is_staff: true,
            });
            backend
        }

        fn seed(&self, items: Vec<InventoryItem>) {
            *self.next_id.lock().unwrap() = items.iter().map(|i| i.id).max().unwrap_or(0);
            *self.items.lock().unwrap() = items;
        }
    }

    #[async_trait]
    impl ApiGateway for FakeBackend {
        async fn login(&self, _username: &str, _password: &str) -> ApiResult<TokenPair> {
            Ok(TokenPair {
                access: "fake-access".into(),
                refresh: "fake-refresh".into(),
            })
        }

        async fn register(&self, username: &str, _password: &str, role: Role) -> ApiResult<()> {
            self.registered
                .lock()
                .unwrap()
                .push((username.to_string(), role));
            Ok(())
        }

        async fn user_role(&self, _access: &str) -> ApiResult<RoleInfo> {
            self.role
                .lock()
                .unwrap()
                .ok_or_else(|| ApiError::Unauthorized {
                    message: "Given token not valid for any token type".into(),
                })
        }

        async fn list_items(&self, _access: &str) -> ApiResult<Vec<InventoryItem>> {
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(ApiError::Server {
                    status: 500,
                    message: "An error occurred".into(),
                });
            }
            Ok(self.items.lock().unwrap().clone())
        }

        async fn create_item(
            &self,
            _access: &str,
            payload: &CreateItemPayload,
        ) -> ApiResult<InventoryItem> {
            self.created.lock().unwrap().push(payload.clone());
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let item = InventoryItem {
                id: *next_id,
                product_name: payload.product_name.clone(),
                sku: payload.sku.clone(),
                quantity: payload.quantity,
                price: payload.price.clone(),
                category: payload.category.clone(),
                image: (!payload.image_url.is_empty()).then(|| payload.image_url.clone()),
            };
            self.items.lock().unwrap().push(item.clone());
            Ok(item)
        }

        async fn update_item(
            &self,
            _access: &str,
            id: i64,
            payload: &UpdateItemPayload,
        ) -> ApiResult<InventoryItem> {
            self.updated.lock().unwrap().push((id, payload.clone()));
            let mut items = self.items.lock().unwrap();
            let item = items
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| ApiError::Server {
                    status: 404,
                    message: "Not found.".into(),
                })?;
            item.product_name = payload.product_name.clone();
            item.sku = payload.sku.clone();
            item.quantity = payload.quantity;
            item.price = payload.price.clone();
            item.category = payload.category.clone();
            if let Some(url) = &payload.image {
                item.image = Some(url.clone());
            }
            Ok(item.clone())
        }

        async fn delete_item(&self, _access: &str, id: i64) -> ApiResult<()> {
            self.deleted.lock().unwrap().push(id);
            self.items.lock().unwrap().retain(|i| i.id != id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeImageHost {
        uploads: Mutex<Vec<PathBuf>>,
        fail: AtomicBool,
    }

    #[async_trait]
    impl ImageHost for FakeImageHost {
        async fn upload(&self, path: &Path) -> ApiResult<String> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ApiError::Upload("Upload rejected".into()));
            }
            self.uploads.lock().unwrap().push(path.to_path_buf());
            Ok(format!(
                "https://res.example.com/{}",
                path.file_name().unwrap().to_string_lossy()
            ))
        }
    }

    // =========================================================================
    // Harness
    // =========================================================================

    struct Harness {
        backend: Arc<FakeBackend>,
        images: Arc<FakeImageHost>,
        dashboard: Dashboard,
        _dir: tempfile::TempDir,
    }

    fn harness(backend: FakeBackend) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at_path(dir.path().join("session.json"));
        let backend = Arc::new(backend);
        let images = Arc::new(FakeImageHost::default());
        let dashboard = Dashboard::new(backend.clone(), images.clone(), store);
        Harness {
            backend,
            images,
            dashboard,
            _dir: dir,
        }
    }

    fn admin_session() -> SessionContext {
        SessionContext {
            tokens: TokenPair {
                access: "fake-access".into(),
                refresh: "fake-refresh".into(),
            },
            is_admin: true,
            is_staff: true,
        }
    }

    fn item(id: i64, name: &str) -> InventoryItem {
        InventoryItem {
            id,
            product_name: name.to_string(),
            sku: format!("SKU-{}", id),
            quantity: 4,
            price: "25.00".to_string(),
            category: "Electronics".to_string(),
            image: Some("https://res.example.com/existing.png".to_string()),
        }
    }

    // =========================================================================
    // Auth Gate
    // =========================================================================

    #[tokio::test]
    async fn authorize_without_stored_tokens_redirects() {
        let h = harness(FakeBackend::with_role(true));
        assert_eq!(h.dashboard.authorize().await, AuthOutcome::RedirectToLogin);
        assert!(!h.dashboard.session.is_active());
    }

    #[tokio::test]
    async fn authorize_resolves_admin_and_staff() {
        let h = harness(FakeBackend::with_role(true));
        h.dashboard.login("alice", "secret-pass").await.unwrap();
        assert_eq!(h.dashboard.authorize().await, AuthOutcome::Admin);
        assert!(h.dashboard.session.is_admin());

        let h = harness(FakeBackend::with_role(false));
        h.dashboard.login("bob", "secret-pass").await.unwrap();
        assert_eq!(h.dashboard.authorize().await, AuthOutcome::Staff);
        assert!(!h.dashboard.session.is_admin());
    }

    #[tokio::test]
    async fn rejected_token_wipes_stored_session() {
        let h = harness(FakeBackend::default());
        h.dashboard.login("alice", "secret-pass").await.unwrap();

        assert_eq!(h.dashboard.authorize().await, AuthOutcome::RedirectToLogin);
        assert!(h.dashboard.store.load().unwrap().is_none());
        assert!(!h.dashboard.session.is_active());
    }

    #[tokio::test]
    async fn login_validates_before_hitting_the_network() {
        let h = harness(FakeBackend::with_role(true));
        let err = h.dashboard.login("alice", "short").await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert!(h.dashboard.store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn register_creates_account_then_logs_in() {
        let h = harness(FakeBackend::with_role(false));
        h.dashboard
            .register("carol", "secret-pass", "secret-pass", "staff")
            .await
            .unwrap();

        let registered = h.backend.registered.lock().unwrap();
        assert_eq!(registered.as_slice(), &[("carol".to_string(), Role::Staff)]);
        assert!(h.dashboard.store.load().unwrap().is_some());
        assert_eq!(
            h.dashboard.alerts.take().unwrap().message,
            MSG_REGISTER_SUCCESS
        );
    }

    #[tokio::test]
    async fn logout_clears_session_store_and_inventory() {
        let h = harness(FakeBackend::with_role(true));
        h.backend.seed(vec![item(1, "Keyboard")]);
        h.dashboard.login("alice", "secret-pass").await.unwrap();
        h.dashboard.authorize().await;
        h.dashboard.refresh_inventory().await;
        assert_eq!(h.dashboard.inventory.item_count(), 1);

        h.dashboard.logout();

        assert!(!h.dashboard.session.is_active());
        assert!(h.dashboard.store.load().unwrap().is_none());
        assert_eq!(h.dashboard.inventory.item_count(), 0);
        assert_eq!(h.dashboard.authorize().await, AuthOutcome::RedirectToLogin);
    }

    // =========================================================================
    // Inventory Refresh
    // =========================================================================

    #[tokio::test]
    async fn fetch_failure_sets_banner_and_keeps_list() {
        let h = harness(FakeBackend::with_role(true));
        h.backend.seed(vec![item(1, "Keyboard")]);
        h.dashboard.session.set(admin_session());

        h.dashboard.refresh_inventory().await;
        assert_eq!(h.dashboard.inventory.item_count(), 1);

        h.backend.fail_list.store(true, Ordering::SeqCst);
        h.dashboard.refresh_inventory().await;

        assert_eq!(h.dashboard.inventory.error().as_deref(), Some(MSG_FETCH_FAILED));
        assert_eq!(h.dashboard.inventory.item_count(), 1);
    }

    #[tokio::test]
    async fn refresh_without_session_sets_banner() {
        let h = harness(FakeBackend::with_role(true));
        h.dashboard.refresh_inventory().await;
        assert!(h.dashboard.inventory.error().is_some());
    }

    // =========================================================================
    // Add Flow
    // =========================================================================

    fn fill_draft(dashboard: &Dashboard) {
        dashboard
            .update_draft(|draft| {
                draft.product_name = "Webcam".to_string();
                draft.sku = "CAM-001".to_string();
                draft.quantity = 12;
                draft.price = "79.99".to_string();
            })
            .unwrap();
    }

    #[tokio::test]
    async fn add_without_file_sends_empty_image_url() {
        let h = harness(FakeBackend::with_role(true));
        h.dashboard.session.set(admin_session());

        h.dashboard.open_add_dialog();
        fill_draft(&h.dashboard);
        h.dashboard.submit_add().await.unwrap();

        let created = h.backend.created.lock().unwrap();
        assert_eq!(created[0].image_url, "");
        drop(created);

        assert!(h.dashboard.dialog_is_closed());
        assert_eq!(h.dashboard.alerts.take().unwrap().message, MSG_ADD_SUCCESS);
        assert_eq!(h.dashboard.inventory.item_count(), 1);
    }

    #[tokio::test]
    async fn add_with_file_uploads_before_create() {
        let h = harness(FakeBackend::with_role(true));
        h.dashboard.session.set(admin_session());

        h.dashboard.open_add_dialog();
        fill_draft(&h.dashboard);
        h.dashboard
            .select_image(PathBuf::from("/tmp/webcam.png"), "blob:preview-1")
            .unwrap();
        h.dashboard.submit_add().await.unwrap();

        let uploads = h.images.uploads.lock().unwrap();
        assert_eq!(uploads.as_slice(), &[PathBuf::from("/tmp/webcam.png")]);
        drop(uploads);

        let created = h.backend.created.lock().unwrap();
        assert_eq!(created[0].image_url, "https://res.example.com/webcam.png");
    }

    #[tokio::test]
    async fn upload_failure_aborts_add_and_keeps_dialog_open() {
        let h = harness(FakeBackend::with_role(true));
        h.dashboard.session.set(admin_session());
        h.images.fail.store(true, Ordering::SeqCst);

        h.dashboard.open_add_dialog();
        fill_draft(&h.dashboard);
        h.dashboard
            .select_image(PathBuf::from("/tmp/webcam.png"), "blob:preview-1")
            .unwrap();

        assert!(h.dashboard.submit_add().await.is_err());
        assert!(h.backend.created.lock().unwrap().is_empty());
        assert!(!h.dashboard.dialog_is_closed());
        assert_eq!(h.dashboard.alerts.take().unwrap().message, MSG_ADD_FAILED);
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_before_any_request() {
        let h = harness(FakeBackend::with_role(true));
        h.dashboard.session.set(admin_session());

        h.dashboard.open_add_dialog();
        let err = h.dashboard.submit_add().await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert!(h.backend.created.lock().unwrap().is_empty());
        assert!(!h.dashboard.dialog_is_closed());
    }

    #[tokio::test]
    async fn staff_cannot_submit() {
        let h = harness(FakeBackend::with_role(false));
        h.dashboard.session.set(SessionContext {
            is_admin: false,
            ..admin_session()
        });

        h.dashboard.open_add_dialog();
        fill_draft(&h.dashboard);

        let err = h.dashboard.submit_add().await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::Unauthorized);
        assert!(h.backend.created.lock().unwrap().is_empty());
    }

    // =========================================================================
    // Edit Flow
    // =========================================================================

    #[tokio::test]
    async fn edit_without_new_file_omits_image() {
        let h = harness(FakeBackend::with_role(true));
        h.backend.seed(vec![item(1, "Keyboard")]);
        h.dashboard.session.set(admin_session());
        h.dashboard.refresh_inventory().await;

        h.dashboard.open_edit_dialog(1).unwrap();
        h.dashboard
            .update_draft(|draft| draft.quantity = 99)
            .unwrap();
        h.dashboard.submit_edit().await.unwrap();

        let updated = h.backend.updated.lock().unwrap();
        let (id, payload) = &updated[0];
        assert_eq!(*id, 1);
        assert_eq!(payload.quantity, 99);
        assert!(payload.image.is_none());
        drop(updated);

        // The server-side image survives an edit that never touched it.
        let kept = h.dashboard.inventory.item_by_id(1).unwrap();
        assert_eq!(
            kept.image.as_deref(),
            Some("https://res.example.com/existing.png")
        );
        assert_eq!(h.dashboard.alerts.take().unwrap().message, MSG_UPDATE_SUCCESS);
    }

    #[tokio::test]
    async fn edit_with_new_file_sends_hosted_url() {
        let h = harness(FakeBackend::with_role(true));
        h.backend.seed(vec![item(1, "Keyboard")]);
        h.dashboard.session.set(admin_session());
        h.dashboard.refresh_inventory().await;

        h.dashboard.open_edit_dialog(1).unwrap();
        h.dashboard
            .select_image(PathBuf::from("/tmp/replacement.png"), "blob:preview-2")
            .unwrap();
        h.dashboard.submit_edit().await.unwrap();

        let updated = h.backend.updated.lock().unwrap();
        assert_eq!(
            updated[0].1.image.as_deref(),
            Some("https://res.example.com/replacement.png")
        );
    }

    #[tokio::test]
    async fn edit_unknown_id_is_not_found() {
        let h = harness(FakeBackend::with_role(true));
        h.dashboard.session.set(admin_session());

        let err = h.dashboard.open_edit_dialog(42).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
        assert!(h.dashboard.dialog_is_closed());
    }

    // =========================================================================
    // Delete Flow
    // =========================================================================

    #[tokio::test]
    async fn delete_flow_removes_item_and_refreshes() {
        let h = harness(FakeBackend::with_role(true));
        h.backend.seed(vec![item(1, "Keyboard"), item(2, "Mouse")]);
        h.dashboard.session.set(admin_session());
        h.dashboard.refresh_inventory().await;

        h.dashboard.open_delete_dialog(1).unwrap();
        h.dashboard.confirm_delete().await.unwrap();

        assert_eq!(h.backend.deleted.lock().unwrap().as_slice(), &[1]);
        assert!(h.dashboard.dialog_is_closed());
        assert_eq!(h.dashboard.alerts.take().unwrap().message, MSG_DELETE_SUCCESS);
        assert!(h.dashboard.inventory.item_by_id(1).is_none());
        assert!(h.dashboard.inventory.item_by_id(2).is_some());
    }

    #[tokio::test]
    async fn confirm_delete_without_dialog_is_internal_error() {
        let h = harness(FakeBackend::with_role(true));
        h.dashboard.session.set(admin_session());

        let err = h.dashboard.confirm_delete().await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::Internal);
        assert!(h.backend.deleted.lock().unwrap().is_empty());
    }
}
