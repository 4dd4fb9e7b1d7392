//! Browser location/history adapter over the History API.

use std::rc::Rc;

use platform_host::LocationService;

/// Browser location adapter backed by `window.location` and `window.history`.
///
/// `navigate` goes through `pushState`/`replaceState`, which never fire
/// `popstate`, so listeners registered via
/// [`LocationService::on_location_change`] only see user-driven history
/// traversal.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserLocationService;

impl LocationService for BrowserLocationService {
    fn search(&self) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            return web_sys::window()
                .and_then(|window| window.location().search().ok())
                .unwrap_or_default();
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            String::new()
        }
    }

    fn navigate(&self, url: &str, replace: bool) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsValue;

            let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
            let history = window
                .history()
                .map_err(|err| format!("history unavailable: {err:?}"))?;
            let result = if replace {
                history.replace_state_with_url(&JsValue::NULL, "", Some(url))
            } else {
                history.push_state_with_url(&JsValue::NULL, "", Some(url))
            };
            return result.map_err(|err| format!("history mutation failed for `{url}`: {err:?}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (url, replace);
            Ok(())
        }
    }

    fn on_location_change(&self, listener: Rc<dyn Fn()>) {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::{closure::Closure, JsCast};

            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut()>::wrap(Box::new(move || listener()));
            let registered = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
            if registered.is_ok() {
                // Listeners stay installed for the page lifetime.
                closure.forget();
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = listener;
        }
    }
}
