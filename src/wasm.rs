//! Browser front end.
//!
//! Builds the editor DOM (canvas host, rename input, side panel), turns DOM
//! events into [`Message`]s and redraws whatever the editor reports stale.
//! All listeners are owned by an [`EditorHandle`]; `stop()` drops it, which
//! deregisters every callback and disconnects the resize observer.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::rc::{Rc, Weak};

use seatplan_ui::{
    Canvas, Color, Event as UiEvent, KeyCode, Modifiers, MouseButton, Point, Size, WebCanvas,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlCanvasElement, HtmlElement, HtmlImageElement,
    HtmlInputElement, HtmlSelectElement, KeyboardEvent, MouseEvent, ResizeObserver, Window,
};
use web_time::Instant;

use crate::config::AppConfig;
use crate::constants::{MAX_RADIUS, MIN_RADIUS};
use crate::editor::{Redraw, SeatEditor};
use crate::message::{BackgroundMessage, Message, PointerMessage, SeatMessage};
use crate::model::{SeatId, ShapeKind};
use crate::keybindings::captures_keys;
use crate::panel::{PanelRow, PanelTrigger};
use crate::persistence::{KeyValueStore, LocalStorage, MemoryStore};
use crate::platform::{Dialogs, Subscription};
use crate::scene::BACKGROUND_TEXTURE;

/// Id of the element the editor mounts into. Created under `<body>` if absent.
const ROOT_ID: &str = "seatplan";

thread_local! {
    static HANDLE: RefCell<Option<EditorHandle>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config = match LocalStorage::open() {
        Ok(storage) => AppConfig::load_or_default(&storage),
        Err(_) => AppConfig::default(),
    };
    crate::init_logging(config.preferences.log_level);
    log::info!("Seat plan editor starting");

    // Tear down a previous mount before building a new one
    stop();

    let handle = EditorHandle::mount(&config)?;
    HANDLE.with(|slot| *slot.borrow_mut() = Some(handle));
    Ok(())
}

/// Deregister every listener and release the editor.
#[wasm_bindgen]
pub fn stop() {
    let handle = HANDLE.with(|slot| slot.borrow_mut().take());
    if let Some(handle) = handle {
        drop(handle);
        log::info!("Seat plan editor stopped");
    }
}

// ============================================================================
// Dialogs
// ============================================================================

/// `window.confirm`, `window.prompt` and `window.alert`.
pub struct BrowserDialogs {
    window: Window,
}

impl Dialogs for BrowserDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        self.window
            .prompt_with_message_and_default(message, default)
            .ok()
            .flatten()
    }

    fn alert(&mut self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::warn!("alert failed: {:?}", e);
        }
    }
}

type BrowserEditor = SeatEditor<Box<dyn KeyValueStore>, BrowserDialogs>;

// ============================================================================
// DOM
// ============================================================================

struct Elements {
    root: HtmlElement,
    host: HtmlElement,
    canvas: HtmlCanvasElement,
    rename_input: HtmlInputElement,
    panel: HtmlElement,
    panel_toggle: HtmlElement,
}

impl Elements {
    fn build(document: &Document) -> Result<Self, JsValue> {
        let root = match document.get_element_by_id(ROOT_ID) {
            Some(existing) => existing.dyn_into::<HtmlElement>()?,
            None => {
                let root = create::<HtmlElement>(document, "div")?;
                root.set_id(ROOT_ID);
                document
                    .body()
                    .ok_or_else(|| JsValue::from_str("document has no body"))?
                    .append_child(&root)?;
                root
            }
        };
        root.set_inner_html("");
        root.set_attribute(
            "style",
            "display:flex;width:100%;height:100vh;margin:0;font-family:sans-serif;",
        )?;

        let host = create::<HtmlElement>(document, "div")?;
        host.set_attribute("style", "position:relative;flex:1;min-width:0;overflow:hidden;")?;

        let canvas = create::<HtmlCanvasElement>(document, "canvas")?;
        canvas.set_attribute("style", "display:block;position:absolute;left:0;top:0;")?;

        let rename_input = create::<HtmlInputElement>(document, "input")?;
        rename_input.set_type("text");
        rename_input.set_placeholder("Seat name");
        rename_input.set_attribute(
            "style",
            "position:absolute;display:none;box-sizing:border-box;text-align:center;",
        )?;

        let panel_toggle = create::<HtmlElement>(document, "button")?;
        panel_toggle.set_attribute("data-action", "toggle-panel")?;
        panel_toggle.set_attribute("style", "position:absolute;right:8px;top:8px;")?;

        let panel = create::<HtmlElement>(document, "aside")?;
        panel.set_attribute(
            "style",
            "width:340px;overflow:auto;border-left:1px solid #ccc;padding:8px;box-sizing:border-box;",
        )?;

        host.append_child(&canvas)?;
        host.append_child(&rename_input)?;
        host.append_child(&panel_toggle)?;
        root.append_child(&host)?;
        root.append_child(&panel)?;

        Ok(Self {
            root,
            host,
            canvas,
            rename_input,
            panel,
            panel_toggle,
        })
    }
}

fn element_size(element: &HtmlElement) -> Size {
    Size::new(element.client_width() as f32, element.client_height() as f32)
}

/// Pointer position relative to the canvas.
fn surface_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Point {
    let rect = canvas.get_bounding_client_rect();
    Point::new(
        (event.client_x() as f64 - rect.left()) as f32,
        (event.client_y() as f64 - rect.top()) as f32,
    )
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, JsValue> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("<{tag}> has an unexpected type")))
}

// ============================================================================
// Shell: editor + DOM, redrawn after every update
// ============================================================================

struct Shell {
    editor: BrowserEditor,
    canvas: WebCanvas,
    dom: Elements,
    /// Last focus generation applied to the rename input.
    applied_focus: u64,
}

impl Shell {
    fn apply(&mut self, redraw: Redraw) {
        if redraw.scene {
            if let Err(e) = self.canvas.present(&self.editor.frame()) {
                log::warn!("Failed to draw frame: {}", e);
            }
        }
        if redraw.panel {
            self.render_panel();
        }
        self.sync_rename_input();
    }

    fn render_panel(&self) {
        let open = self.editor.panel().is_open();
        let toggle_key = self.editor.keybindings().toggle_panel.name();

        self.dom
            .panel
            .set_inner_html(&panel_html(&self.editor.panel_rows(), &toggle_key));
        set_style(&self.dom.panel, "display", if open { "block" } else { "none" });
        self.dom.panel_toggle.set_text_content(Some(&format!(
            "{} seats ({})",
            if open { "Hide" } else { "Show" },
            toggle_key
        )));
    }

    fn sync_rename_input(&mut self) {
        let input = &self.dom.rename_input;
        let Some(overlay) = self.editor.rename_overlay() else {
            set_style(input, "display", "none");
            return;
        };

        let rect = overlay.rect;
        set_style(input, "left", &format!("{}px", rect.x));
        set_style(input, "top", &format!("{}px", rect.y));
        set_style(input, "width", &format!("{}px", rect.width));
        set_style(input, "height", &format!("{}px", rect.height));
        set_style(input, "display", "block");

        if overlay.focus_generation != self.applied_focus {
            self.applied_focus = overlay.focus_generation;
            input.set_value(&overlay.draft);
            if let Err(e) = input.focus() {
                log::warn!("Failed to focus rename input: {:?}", e);
            }
            input.select();
        }
    }
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        log::warn!("Failed to set style {}: {:?}", property, e);
    }
}

/// Shared between every DOM callback.
struct App {
    shell: RefCell<Shell>,
    /// Messages raised while an update is running (e.g. a blur fired by a
    /// dialog) wait here instead of re-entering the editor.
    queue: RefCell<VecDeque<Message>>,
    window: Window,
    host: HtmlElement,
    canvas: HtmlCanvasElement,
    frame_requested: Cell<bool>,
}

impl App {
    fn dispatch(self: &Rc<Self>, message: Message) {
        self.queue.borrow_mut().push_back(message);

        let Ok(mut shell) = self.shell.try_borrow_mut() else {
            return;
        };
        let mut redraw = Redraw::NONE;
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(message) = next else {
                break;
            };
            redraw = redraw.merge(shell.editor.update(message));
        }
        shell.apply(redraw);

        let pending = shell.editor.editing().pending_edit().is_some();
        drop(shell);
        if pending {
            self.request_render_completed();
        }
    }

    /// Report `RenderCompleted` once the browser has painted the next frame.
    fn request_render_completed(self: &Rc<Self>) {
        if self.frame_requested.replace(true) {
            return;
        }
        let weak = Rc::downgrade(self);
        let callback = Closure::once_into_js(move || {
            if let Some(app) = weak.upgrade() {
                app.frame_requested.set(false);
                app.dispatch(Message::RenderCompleted);
            }
        });
        if let Err(e) = self.window.request_animation_frame(callback.unchecked_ref()) {
            log::warn!("requestAnimationFrame failed: {:?}", e);
            self.frame_requested.set(false);
        }
    }

    fn measure(self: &Rc<Self>) {
        let size = element_size(&self.host);
        self.dispatch(Message::Resized(size));
    }
}

// ============================================================================
// Handle
// ============================================================================

/// Keeps the editor and its listeners alive.
pub struct EditorHandle {
    // Dropped first so no callback runs against a half-dropped app
    subscriptions: Vec<Subscription>,
    app: Rc<App>,
}

impl EditorHandle {
    fn mount(config: &AppConfig) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let dom = Elements::build(&document)?;
        let canvas = WebCanvas::new(dom.canvas.clone())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let storage: Box<dyn KeyValueStore> = match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{}; seats will not survive a reload", e);
                Box::new(MemoryStore::new())
            }
        };
        let dialogs = BrowserDialogs {
            window: window.clone(),
        };
        let editor = SeatEditor::new(config, storage, dialogs, element_size(&dom.host));
        let host = dom.host.clone();
        let canvas_element = dom.canvas.clone();

        let app = Rc::new(App {
            shell: RefCell::new(Shell {
                editor,
                canvas,
                dom,
                applied_focus: 0,
            }),
            queue: RefCell::new(VecDeque::new()),
            window: window.clone(),
            host,
            canvas: canvas_element,
            frame_requested: Cell::new(false),
        });

        let mut handle = Self {
            subscriptions: Vec::new(),
            app,
        };
        handle.wire(&window, &document)?;
        handle.load_background(&config.preferences.background_path)?;

        handle.app.shell.borrow_mut().apply(Redraw::ALL);
        handle.app.measure();
        Ok(handle)
    }

    fn wire(&mut self, window: &Window, document: &Document) -> Result<(), JsValue> {
        let (canvas, root, input): (EventTarget, EventTarget, EventTarget) = {
            let shell = self.app.shell.borrow();
            (
                shell.dom.canvas.clone().into(),
                shell.dom.root.clone().into(),
                shell.dom.rename_input.clone().into(),
            )
        };
        let host: Element = self.app.host.clone().into();
        let window_target: EventTarget = window.clone().into();

        // Pointer: press and double-click on the canvas, move/release anywhere
        // so drags continue outside it.
        for kind in ["mousedown", "mousemove", "mouseup", "dblclick"] {
            let target = if matches!(kind, "mousedown" | "dblclick") {
                &canvas
            } else {
                &window_target
            };
            let weak = Rc::downgrade(&self.app);
            self.subscriptions
                .push(listen::<MouseEvent>(target, kind, move |event| {
                    with_app(&weak, |app| {
                        let position = surface_point(&app.canvas, &event);
                        if let Some(message) = mouse_message(kind, &event, position) {
                            app.dispatch(message);
                        }
                    })
                })?);
        }

        let weak = Rc::downgrade(&self.app);
        self.subscriptions
            .push(listen::<Event>(&window_target, "blur", move |_| {
                with_app(&weak, |app| app.dispatch(Message::Pointer(PointerMessage::Left)))
            })?);

        let weak = Rc::downgrade(&self.app);
        let doc = document.clone();
        self.subscriptions
            .push(listen::<KeyboardEvent>(&window_target, "keydown", move |event| {
                let Some(key) = KeyCode::from_dom_key(&event.key()) else {
                    return;
                };
                let modifiers = Modifiers {
                    shift: event.shift_key(),
                    ctrl: event.ctrl_key(),
                    alt: event.alt_key(),
                    meta: event.meta_key(),
                };
                let input_focused = doc.active_element().is_some_and(|el| takes_keys(&el));
                let ui_event = UiEvent::KeyPressed { key, modifiers };
                if let Some(message) = Message::from_event(ui_event, Instant::now(), input_focused) {
                    with_app(&weak, |app| app.dispatch(message));
                }
            })?);

        // Host size: window resizes plus the container's own box changes
        let weak = Rc::downgrade(&self.app);
        self.subscriptions
            .push(listen::<Event>(&window_target, "resize", move |_| {
                with_app(&weak, |app| app.measure())
            })?);
        self.subscriptions.push(observe_resize(&host, Rc::downgrade(&self.app))?);

        // Panel buttons and the floating toggle, by delegation. Mouse use
        // acts on press; `click` only carries keyboard activation.
        for kind in ["mousedown", "click"] {
            let weak = Rc::downgrade(&self.app);
            self.subscriptions
                .push(listen::<MouseEvent>(&root, kind, move |event| {
                    let action = event
                        .target()
                        .and_then(|t| t.dyn_into::<Element>().ok())
                        .and_then(|el| el.closest("[data-action]").ok().flatten());
                    let Some(message) = action.as_ref().and_then(click_message) else {
                        return;
                    };
                    let trigger = if kind == "mousedown" {
                        // Keep focus where it is; the commit below replaces the blur
                        event.prevent_default();
                        PanelTrigger::Press {
                            button: event.button(),
                        }
                    } else {
                        PanelTrigger::Click {
                            detail: event.detail(),
                        }
                    };
                    with_app(&weak, |app| {
                        for message in trigger.messages(message) {
                            app.dispatch(message);
                        }
                    });
                })?);
        }

        let weak = Rc::downgrade(&self.app);
        self.subscriptions
            .push(listen::<Event>(&root, "change", move |event| {
                let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
                if let Some(message) = target.as_ref().and_then(change_message) {
                    with_app(&weak, |app| app.dispatch(message));
                }
            })?);

        // Rename input
        let weak = Rc::downgrade(&self.app);
        self.subscriptions
            .push(listen::<Event>(&input, "input", move |event| {
                let value = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                    .map(|el| el.value());
                if let Some(value) = value {
                    with_app(&weak, |app| app.dispatch(Message::draft_changed(value)));
                }
            })?);

        let weak = Rc::downgrade(&self.app);
        self.subscriptions
            .push(listen::<Event>(&input, "blur", move |_| {
                with_app(&weak, |app| app.dispatch(Message::commit_edit()))
            })?);

        Ok(())
    }

    /// Start loading the floor plan. The scene redraws when it arrives.
    fn load_background(&mut self, path: &str) -> Result<(), JsValue> {
        let image = HtmlImageElement::new()?;

        let weak = Rc::downgrade(&self.app);
        let loaded = image.clone();
        let onload = Closure::<dyn FnMut()>::new(move || {
            with_app(&weak, |app| {
                let size = Size::new(loaded.natural_width() as f32, loaded.natural_height() as f32);
                app.shell
                    .borrow_mut()
                    .canvas
                    .register_image(BACKGROUND_TEXTURE, loaded.clone());
                app.dispatch(Message::Background(BackgroundMessage::Loaded { size }));
            })
        });

        let weak = Rc::downgrade(&self.app);
        let src = path.to_string();
        let onerror = Closure::<dyn FnMut()>::new(move || {
            with_app(&weak, |app| {
                app.dispatch(Message::Background(BackgroundMessage::Failed(format!(
                    "could not load {}",
                    src
                ))))
            })
        });

        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        image.set_src(path);

        let pending = image.clone();
        self.subscriptions.push(Subscription::new(move || {
            pending.set_onload(None);
            pending.set_onerror(None);
            drop(onload);
            drop(onerror);
        }));
        Ok(())
    }
}

impl Drop for EditorHandle {
    fn drop(&mut self) {
        self.subscriptions.clear();
        if let Ok(shell) = self.app.shell.try_borrow() {
            shell.dom.root.set_inner_html("");
        }
    }
}

fn with_app(weak: &Weak<App>, f: impl FnOnce(&Rc<App>)) {
    if let Some(app) = weak.upgrade() {
        f(&app);
    }
}

/// Add an event listener, removed again when the subscription drops.
fn listen<E: JsCast + 'static>(
    target: &EventTarget,
    kind: &'static str,
    mut handler: impl FnMut(E) + 'static,
) -> Result<Subscription, JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;

    let target = target.clone();
    Ok(Subscription::new(move || {
        let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        drop(closure);
    }))
}

fn observe_resize(host: &Element, app: Weak<App>) -> Result<Subscription, JsValue> {
    let closure = Closure::<dyn FnMut()>::new(move || with_app(&app, |app| app.measure()));
    let observer = ResizeObserver::new(closure.as_ref().unchecked_ref())?;
    observer.observe(host);

    Ok(Subscription::new(move || {
        observer.disconnect();
        drop(closure);
    }))
}

// ============================================================================
// Event translation
// ============================================================================

fn mouse_message(kind: &str, event: &MouseEvent, position: Point) -> Option<Message> {
    let button = MouseButton::from_dom_index(event.button());
    let ui_event = match kind {
        "mousedown" => UiEvent::MousePressed { button, position },
        "mouseup" => UiEvent::MouseReleased { button, position },
        "mousemove" => UiEvent::MouseMoved { position },
        "dblclick" => UiEvent::DoubleClicked { position },
        _ => return None,
    };
    Message::from_event(ui_event, Instant::now(), false)
}

/// Whether key presses in `element` belong to it rather than to shortcuts.
fn takes_keys(element: &Element) -> bool {
    let input_type = element.dyn_ref::<HtmlInputElement>().map(|input| input.type_());
    captures_keys(&element.tag_name(), input_type.as_deref())
}

fn click_message(element: &Element) -> Option<Message> {
    let action = element.get_attribute("data-action")?;
    let id = || element.get_attribute("data-id").map(SeatId::from);

    let message = match action.as_str() {
        "add" => Message::add_seat(),
        "toggle-panel" => Message::toggle_panel(),
        "select" => Message::select(id()?),
        "rename" => Message::rename(id()?),
        "delete" => Message::delete(id()?),
        "recolor" => Message::Seat(SeatMessage::PromptFill(id()?)),
        "toggle-visible" => Message::Seat(SeatMessage::ToggleVisible(id()?)),
        "delete-selected" => Message::Seat(SeatMessage::DeleteSelected),
        "rename-selected" => Message::Seat(SeatMessage::RenameSelected),
        "recolor-selected" => Message::Seat(SeatMessage::RecolorSelected),
        _ => return None,
    };
    Some(message)
}

fn change_message(element: &Element) -> Option<Message> {
    let action = element.get_attribute("data-action")?;
    let id = SeatId::from(element.get_attribute("data-id")?);

    let message = match action.as_str() {
        "fill" => {
            let value = element.dyn_ref::<HtmlInputElement>()?.value();
            SeatMessage::SetFill(id, value)
        }
        "radius" => {
            let value = element.dyn_ref::<HtmlInputElement>()?.value();
            SeatMessage::SetRadius(id, value.parse().ok()?)
        }
        "shape" => {
            let value = element.dyn_ref::<HtmlSelectElement>()?.value();
            SeatMessage::SetShape(id, ShapeKind::from_name(&value)?)
        }
        _ => return None,
    };
    Some(Message::Seat(message))
}

// ============================================================================
// Panel markup
// ============================================================================

fn panel_html(rows: &[PanelRow], toggle_key: &str) -> String {
    let mut html = String::new();

    html.push_str(
        "<div style=\"display:flex;flex-wrap:wrap;gap:4px;margin-bottom:8px\">\
         <button data-action=\"add\">Add seat</button>\
         <button data-action=\"rename-selected\">Rename</button>\
         <button data-action=\"recolor-selected\">Recolor</button>\
         <button data-action=\"delete-selected\">Delete</button>\
         </div>",
    );
    let _ = write!(
        html,
        "<p style=\"margin:0 0 8px;color:#666;font-size:12px\">\
         Press {} to toggle this panel. Double-click a seat to rename it.</p>",
        escape_html(toggle_key)
    );

    html.push_str("<table style=\"width:100%;border-collapse:collapse;font-size:13px\"><tbody>");
    for row in rows {
        write_row(&mut html, row);
    }
    html.push_str("</tbody></table>");
    html
}

fn write_row(html: &mut String, row: &PanelRow) {
    let id = escape_html(row.id.as_str());
    let background = if row.selected { "#e6efff" } else { "transparent" };
    let opacity = if row.visible { "1" } else { "0.5" };
    // Color inputs only accept the long form
    let fill = Color::from_hex(&row.fill)
        .map(|c| c.to_hex())
        .unwrap_or_else(|| "#ffffff".to_string());

    let _ = write!(
        html,
        "<tr data-action=\"select\" data-id=\"{id}\" \
         style=\"background:{background};opacity:{opacity};cursor:pointer\">\
         <td><strong>{name}</strong>{editing}<br><small>#{label}</small></td>\
         <td><input type=\"color\" data-action=\"fill\" data-id=\"{id}\" value=\"{fill}\"></td>\
         <td><input type=\"range\" data-action=\"radius\" data-id=\"{id}\" \
         min=\"{min}\" max=\"{max}\" value=\"{radius}\" style=\"width:70px\"></td>\
         <td><select data-action=\"shape\" data-id=\"{id}\">",
        name = escape_html(&row.display_name),
        editing = if row.editing { " &#9998;" } else { "" },
        label = escape_html(&row.label),
        min = MIN_RADIUS,
        max = MAX_RADIUS,
        radius = row.radius,
    );
    for shape in ShapeKind::all() {
        let _ = write!(
            html,
            "<option value=\"{name}\"{selected}>{name}</option>",
            name = shape.name(),
            selected = if *shape == row.shape { " selected" } else { "" },
        );
    }
    let _ = write!(
        html,
        "</select></td>\
         <td style=\"white-space:nowrap\">\
         <button data-action=\"toggle-visible\" data-id=\"{id}\">{visibility}</button>\
         <button data-action=\"rename\" data-id=\"{id}\">Rename</button>\
         <button data-action=\"recolor\" data-id=\"{id}\">Hex</button>\
         <button data-action=\"delete\" data-id=\"{id}\">Delete</button>\
         </td></tr>",
        visibility = if row.visible { "Hide" } else { "Show" },
    );
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
