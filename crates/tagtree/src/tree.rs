//! Schema-less element tree

mod decode;
mod encode;
pub mod model;
mod navigate;
pub mod view;

pub use model::{Element, Node};
pub use view::ElementView;
