pub mod components;
pub mod host;
pub mod runtime_context;

mod effect_executor;
mod route_watcher;

pub use components::{DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use host::DesktopHostContext;
pub use runtime_context::use_desktop_runtime;
