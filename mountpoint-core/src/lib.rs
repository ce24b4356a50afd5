#![warn(clippy::use_self)]

pub mod component;
pub mod container;
pub mod document;
pub mod error;
pub mod install;

mod env;
mod node;
mod util;

pub use component::{mount, Component};
pub use container::{
    make_container, make_container_with, Container, ContainerConfig, ContainerId,
};
pub use document::{Document, HtmlDocument};
pub use error::{MountError, Precondition};
pub use install::{attach, MountPoint};
pub use node::*;

pub use web_sys;
