pub mod catalog;
pub mod components;
mod effect_executor;
mod host_ui;
pub mod icon_grid;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod session;
pub mod window_manager;

pub use catalog::{builtin_catalog, AppCatalogEntry, CatalogError, DesktopCatalog};
pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use icon_grid::{IconLayout, LayoutError, MoveOutcome};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use window_manager::{OpenOutcome, WindowManager, WindowManagerError};
