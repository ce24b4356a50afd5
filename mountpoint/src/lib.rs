//! Bootstraps a single-page application: creates a container in the document body and mounts
//! the root component into it, once, at startup.
//!
//! ```no_run
//! use mountpoint::prelude::*;
//!
//! fn app() -> Node {
//!     Node::text("Hello!")
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     mountpoint::try_start(&mountpoint::Config::default(), &app)?.persist();
//!     Ok(())
//! }
//! ```

#![warn(clippy::use_self)]

pub mod config;
pub mod logging;

use std::{cell::Cell, mem, thread_local};

#[cfg(target_family = "wasm")]
use wasm_bindgen::JsValue;

pub use config::Config;
pub use mountpoint_core::*;

pub mod prelude {
    pub use crate::{
        Component, Container, Document, IntoNode as _, MountError, Node, Precondition,
    };
}

thread_local! {
    static MOUNTED: Cell<bool> = const { Cell::new(false) };
}

/// The result of a successful [`bootstrap`].
#[derive(Debug)]
pub struct Mounted {
    container: Container,
    root: Node,
}

impl Mounted {
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// The component node wrapping the rendered application.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Hands the tree over to the document for the rest of the page's lifetime.
    pub fn persist(self) {
        mem::forget(self);
    }
}

/// Creates the container in `document` and mounts `app` into it.
///
/// Only one application can be mounted per thread; later calls fail with
/// [`MountError::AlreadyMounted`] without touching the document.
pub fn bootstrap<C>(
    document: &Document,
    config: &ContainerConfig,
    app: &C,
) -> Result<Mounted, MountError>
where
    C: Component + ?Sized,
{
    if MOUNTED.get() {
        return Err(MountError::AlreadyMounted);
    }

    let container = make_container_with(document, config)?;
    let root = mount(app, &container);
    MOUNTED.set(true);

    Ok(Mounted { container, root })
}

/// Starts the application in the global document.
///
/// Installs logging from `config`, then bootstraps. Errors are logged before being returned;
/// they are fatal for the page.
pub fn try_start<C>(config: &Config, app: &C) -> Result<Mounted, MountError>
where
    C: Component + ?Sized,
{
    logging::init(config.log.level.into());
    launch(config, app)
}

/// Like [`try_start`], with the config parsed from TOML, typically embedded with
/// `include_str!`. Unused config keys are logged as warnings.
pub fn try_start_with_toml<C>(contents: &str, app: &C) -> anyhow::Result<Mounted>
where
    C: Component + ?Sized,
{
    let (config, unused) = Config::parse(contents)?;

    logging::init(config.log.level.into());
    for key in unused {
        log::warn!("unused config key: {key}");
    }
    Ok(launch(&config, app)?)
}

fn launch<C>(config: &Config, app: &C) -> Result<Mounted, MountError>
where
    C: Component + ?Sized,
{
    let result = Document::global()
        .ok_or(MountError::from(Precondition::MissingDocument))
        .and_then(|document| bootstrap(&document, &config.container(), app));

    if let Err(err) = &result {
        log::error!("failed to start application: {err}");
    }
    result
}

/// Starts the application in the browser with the default config.
///
/// Errors are returned as JavaScript `Error`s for the caller to throw.
#[cfg(target_family = "wasm")]
pub fn start<C: Component>(app: C) -> Result<(), JsValue> {
    start_with(&Config::default(), app)
}

#[cfg(target_family = "wasm")]
pub fn start_with<C: Component>(config: &Config, app: C) -> Result<(), JsValue> {
    try_start(config, &app)
        .map(Mounted::persist)
        .map_err(JsValue::from)
}

#[cfg(target_family = "wasm")]
pub fn start_with_toml<C: Component>(contents: &str, app: C) -> Result<(), JsValue> {
    try_start_with_toml(contents, &app)
        .map(Mounted::persist)
        .map_err(|err| js_sys::Error::new(&format!("{err:#}")).into())
}
