//! A desktop shell with floating, draggable and resizable windows, drawn in
//! the terminal with ratatui.
//!
//! [`window::WindowManager`] owns focus, stacking and pointer capture for a
//! set of [`window::FloatingWindow`]s; [`desktop::Desktop`] wires it to the
//! demo apps, the dock and the menu bar.

pub mod apps;
pub mod component_context;
pub mod components;
pub mod config;
pub mod constants;
pub mod desktop;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod keybindings;
pub mod layout;
pub mod log_buffer;
pub mod playback;
pub mod runner;
pub mod theme;
pub mod timer;
pub mod tracing_sub;
pub mod ui;
pub mod window;
