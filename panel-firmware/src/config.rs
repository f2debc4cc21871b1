//! Board configuration
//!
//! `CONFIG` is generated by build.rs from `panel.toml`.

use panel_core::config::PanelConfig;

include!(concat!(env!("OUT_DIR"), "/panel_config.rs"));
