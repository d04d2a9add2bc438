//! Logging to the browser/host console.
//!
//! On `wasm32` messages go through `web_sys::console`. Elsewhere there is no
//! JS host to log to, so the calls compile to nothing.
//! Never pass resume text, audio or credentials here.

#[cfg(target_arch = "wasm32")]
pub fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

#[cfg(target_arch = "wasm32")]
pub fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log(_message: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(_message: &str) {}
