// Server-rendered UI component skeleton: view-state, mount lifecycle,
// a memoized action callback and tri-state rendering.

pub mod callback;
pub mod classnames;
pub mod component;
pub mod lifecycle;
pub mod markup;

pub use callback::{Callback, MemoizedCallback};
pub use classnames::cn;
pub use component::{
    Component, ComponentProps, MountedComponent, RenderState, StateHandle, ViewState,
};
pub use lifecycle::Cleanup;
pub use markup::{AttrValue, Attributes, Element, Node};
