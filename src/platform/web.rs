//! Browser bindings
//!
//! `WebOrganizer` is the handle the view layer holds. It shares the session
//! with the `beforeunload` listener that saves the project on exit.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use super::storage::{KeyValueStore, LocalStore, MemoryStore};
use crate::persistence::{ExportFile, encode_project};
use crate::session::Session;
use crate::settings::{LogLevel, Settings};
use crate::store::CardField;

/// Organizer state shared with event closures
struct Shared {
    session: RefCell<Session>,
    store: Box<dyn KeyValueStore>,
    settings: RefCell<Settings>,
}

#[wasm_bindgen]
pub struct WebOrganizer {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl WebOrganizer {
    /// Load settings and the saved project, then hook save-on-exit
    #[wasm_bindgen(constructor)]
    pub fn boot() -> WebOrganizer {
        let store: Box<dyn KeyValueStore> = match LocalStore::open() {
            Some(store) => Box::new(store),
            None => {
                log::warn!("LocalStorage unavailable, changes will not persist");
                Box::new(MemoryStore::new())
            }
        };
        let settings = Settings::load(store.as_ref());
        let session = Session::load(store.as_ref(), &settings);

        let shared = Rc::new(Shared {
            session: RefCell::new(session),
            store,
            settings: RefCell::new(settings),
        });
        install_unload_hook(shared.clone());

        log::info!("Organizer ready");
        WebOrganizer { shared }
    }

    /// Apply an action in JSON form; returns whether the project changed
    pub fn dispatch(&self, action: &str) -> bool {
        self.shared.session.borrow_mut().dispatch_json(action)
    }

    /// Whole project as a tagged map envelope
    pub fn snapshot(&self) -> Result<String, JsValue> {
        let session = self.shared.session.borrow();
        encode_project(session.project()).map_err(to_js)
    }

    /// Cards of the active workspace as a JSON array
    #[wasm_bindgen(js_name = activeCards)]
    pub fn active_cards(&self) -> Result<String, JsValue> {
        let session = self.shared.session.borrow();
        serde_json::to_string(session.active_cards()).map_err(to_js)
    }

    #[wasm_bindgen(js_name = workspaceNames)]
    pub fn workspace_names(&self) -> Vec<String> {
        let session = self.shared.session.borrow();
        session.project().names().map(str::to_string).collect()
    }

    #[wasm_bindgen(js_name = activeWorkspace)]
    pub fn active_workspace(&self) -> String {
        self.shared.session.borrow().active_workspace().to_string()
    }

    /// Index of the card in edit mode, if any
    #[wasm_bindgen(js_name = focusedCard)]
    pub fn focused_card(&self) -> Option<usize> {
        self.shared.session.borrow().focused()
    }

    #[wasm_bindgen(js_name = switchWorkspace)]
    pub fn switch_workspace(&self, name: &str) -> bool {
        self.shared.session.borrow_mut().switch_workspace(name)
    }

    #[wasm_bindgen(js_name = addWorkspace)]
    pub fn add_workspace(&self) -> String {
        self.shared.session.borrow_mut().add_workspace()
    }

    #[wasm_bindgen(js_name = deleteWorkspace)]
    pub fn delete_workspace(&self, name: &str) -> bool {
        self.shared.session.borrow_mut().delete_workspace(name)
    }

    #[wasm_bindgen(js_name = createCard)]
    pub fn create_card(&self) -> Option<usize> {
        self.shared.session.borrow_mut().create_card()
    }

    /// Edit one field (`title`, `tech`, `comments`, `caption`) of the focused card
    #[wasm_bindgen(js_name = editCard)]
    pub fn edit_card(&self, field: &str, value: &str) -> Result<bool, JsValue> {
        let field = CardField::from_str(field)
            .ok_or_else(|| JsValue::from_str(&format!("unknown card field `{}`", field)))?;
        Ok(self.shared.session.borrow_mut().edit_card(field, value))
    }

    #[wasm_bindgen(js_name = focusCard)]
    pub fn focus_card(&self, index: Option<usize>) {
        self.shared.session.borrow_mut().focus_card(index);
    }

    #[wasm_bindgen(js_name = clearWorkspace)]
    pub fn clear_workspace(&self) -> bool {
        self.shared.session.borrow_mut().clear_workspace()
    }

    /// Download the active workspace's cards
    #[wasm_bindgen(js_name = exportActive)]
    pub fn export_active(&self) -> Result<(), JsValue> {
        let file = self
            .shared
            .session
            .borrow()
            .export_active(&self.shared.settings.borrow())
            .map_err(to_js)?;
        download(&file)
    }

    /// Replace the active workspace with an imported card array
    #[wasm_bindgen(js_name = importIntoActive)]
    pub fn import_into_active(&self, text: &str) -> Result<(), JsValue> {
        self.shared
            .session
            .borrow_mut()
            .import_into_active(text)
            .map_err(to_js)
    }

    /// Save now, outside the unload hook
    pub fn save(&self) -> Result<(), JsValue> {
        let shared = &self.shared;
        shared
            .session
            .borrow()
            .save(shared.store.as_ref(), &shared.settings.borrow())
            .map_err(to_js)
    }

    /// Current settings as JSON
    pub fn settings(&self) -> Result<String, JsValue> {
        serde_json::to_string(&*self.shared.settings.borrow()).map_err(to_js)
    }

    /// Change the console log level (`error`, `warn`, `info`, `debug`) and persist it
    #[wasm_bindgen(js_name = setLogLevel)]
    pub fn set_log_level(&self, level: &str) -> Result<(), JsValue> {
        let level = LogLevel::from_str(level)
            .ok_or_else(|| JsValue::from_str(&format!("unknown log level `{}`", level)))?;
        log::set_max_level(level.to_level_filter());
        self.update_settings(|settings| settings.log_level = level);
        Ok(())
    }

    #[wasm_bindgen(js_name = setSaveOnExit)]
    pub fn set_save_on_exit(&self, enabled: bool) {
        self.update_settings(|settings| settings.save_on_exit = enabled);
    }

    #[wasm_bindgen(js_name = setExportFilename)]
    pub fn set_export_filename(&self, filename: &str) {
        self.update_settings(|settings| settings.export_filename = filename.to_string());
    }

    /// Drop stored settings and go back to the defaults
    #[wasm_bindgen(js_name = resetSettings)]
    pub fn reset_settings(&self) {
        let settings = Settings::reset(self.shared.store.as_ref());
        log::set_max_level(settings.log_level.to_level_filter());
        *self.shared.settings.borrow_mut() = settings;
    }
}

impl WebOrganizer {
    fn update_settings(&self, change: impl FnOnce(&mut Settings)) {
        let mut settings = self.shared.settings.borrow_mut();
        change(&mut settings);
        settings.save(self.shared.store.as_ref());
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn install_unload_hook(shared: Rc<Shared>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::BeforeUnloadEvent| {
        // The view may still hold a borrow if unload fires mid-handler
        match shared.session.try_borrow() {
            Ok(session) => session.on_shutdown(shared.store.as_ref(), &shared.settings.borrow()),
            Err(_) => log::warn!("Session busy at unload, project not saved"),
        }
    });
    if let Err(e) =
        window.add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref())
    {
        log::warn!("Could not install save-on-exit hook: {:?}", e);
    }
    closure.forget();
}

/// Hand a file to the browser through a temporary object URL and anchor
fn download(file: &ExportFile) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    let parts = js_sys::Array::of1(&JsValue::from_str(&file.contents));
    let options = BlobPropertyBag::new();
    options.set_type(&file.mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&file.filename);
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Url::revoke_object_url(&url)?;

    log::info!("Download started: {}", file.filename);
    Ok(())
}
