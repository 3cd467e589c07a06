use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, PoisonError};

use crate::interface_adapters::ui::callback::{Callback, MemoizedCallback};
use crate::interface_adapters::ui::classnames::cn;
use crate::interface_adapters::ui::lifecycle::Cleanup;
use crate::interface_adapters::ui::markup::{AttrValue, Attributes, Element, Node};

const CONTAINER_CLASS: &str = "component-container";

// Attribute names owned by `class_name`; passthrough values for them are dropped.
const RESERVED_ATTRIBUTES: [&str; 2] = ["class", "className"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub loading: bool,
    pub error: Option<String>,
}

// Which of the three mutually exclusive views a state selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    Error(String),
    Loading,
    Content,
}

impl ViewState {
    // Error wins over loading; content only when neither is set.
    pub fn render_state(&self) -> RenderState {
        match (&self.error, self.loading) {
            (Some(message), _) => RenderState::Error(message.clone()),
            (None, true) => RenderState::Loading,
            (None, false) => RenderState::Content,
        }
    }
}

// Shared handle to a component's view-state, usable from effects and
// the async work they start.
#[derive(Debug, Clone, Default)]
pub struct StateHandle {
    inner: Arc<Mutex<ViewState>>,
}

impl StateHandle {
    pub fn snapshot(&self) -> ViewState {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update(&self, change: impl FnOnce(&mut ViewState)) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        change(&mut guard);
    }

    pub fn set_loading(&self, loading: bool) {
        self.update(|state| state.loading = loading);
    }

    pub fn set_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.update(|state| state.error = Some(message));
    }

    pub fn clear_error(&self) {
        self.update(|state| state.error = None);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ComponentProps {
    pub class_name: String,
    pub children: Vec<Node>,
    pub attributes: Attributes,
}

impl ComponentProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn attr(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

pub struct Component {
    props: ComponentProps,
    state: StateHandle,
    action: MemoizedCallback<(), ()>,
}

impl Component {
    pub fn new(props: ComponentProps) -> Self {
        Self {
            props,
            state: StateHandle::default(),
            action: MemoizedCallback::new(),
        }
    }

    pub fn props(&self) -> &ComponentProps {
        &self.props
    }

    pub fn state(&self) -> StateHandle {
        self.state.clone()
    }

    pub fn view_state(&self) -> ViewState {
        self.state.snapshot()
    }

    // Action handler for the rendered view. It has no changing
    // dependencies, so every call returns the same callback.
    pub fn handle_action(&mut self) -> Callback<()> {
        let state = self.state.clone();
        self.action.get((), move || move |_: ()| state.clear_error())
    }

    // Run the mount effect once. Its cleanup runs exactly once, when the
    // returned handle is unmounted or dropped.
    pub fn mount<E>(self, effect: E) -> MountedComponent
    where
        E: FnOnce(StateHandle) -> Cleanup,
    {
        let cleanup = effect(self.state());
        MountedComponent {
            component: self,
            cleanup: Some(cleanup),
        }
    }

    pub fn render(&self) -> Node {
        match self.view_state().render_state() {
            RenderState::Error(message) => Element::new("div")
                .attr("class", "error-container")
                .attr("role", "alert")
                .child(Element::new("p").child(format!("Error: {message}")))
                .into(),
            RenderState::Loading => Element::new("div")
                .attr("class", "loading-container")
                .attr("aria-label", "Loading")
                .child(Element::new("div").attr("class", "spinner"))
                .into(),
            RenderState::Content => self.render_content(),
        }
    }

    fn render_content(&self) -> Node {
        let class = cn([Some(CONTAINER_CLASS), Some(self.props.class_name.as_str())]);
        let mut root = Element::new("div").attr("class", class);
        for (name, value) in &self.props.attributes {
            if RESERVED_ATTRIBUTES.contains(&name.as_str()) {
                continue;
            }
            root = root.attr(name.clone(), value.clone());
        }
        root.children(self.props.children.iter().cloned()).into()
    }
}

// A mounted component holding the pending cleanup action.
pub struct MountedComponent {
    component: Component,
    cleanup: Option<Cleanup>,
}

impl MountedComponent {
    pub fn unmount(mut self) {
        self.run_cleanup();
    }

    fn run_cleanup(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup.run();
        }
    }
}

impl Deref for MountedComponent {
    type Target = Component;

    fn deref(&self) -> &Self::Target {
        &self.component
    }
}

impl DerefMut for MountedComponent {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.component
    }
}

impl Drop for MountedComponent {
    fn drop(&mut self) {
        self.run_cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const LOADING_HTML: &str =
        r#"<div class="loading-container" aria-label="Loading"><div class="spinner"></div></div>"#;

    fn counting_cleanup(counter: &Arc<AtomicUsize>) -> Cleanup {
        let counter = Arc::clone(counter);
        Cleanup::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn when_component_is_created_then_state_is_idle_without_error() {
        let component = Component::new(ComponentProps::new());

        assert_eq!(
            component.view_state(),
            ViewState {
                loading: false,
                error: None
            }
        );
        assert_eq!(component.props().class_name, "");
    }

    #[test]
    fn when_error_is_set_then_only_alert_region_is_rendered_even_while_loading() {
        let component = Component::new(ComponentProps::new().child("hidden"));
        component.state().set_loading(true);
        component.state().set_error("boom");

        let html = component.render().to_html();

        assert_eq!(
            html,
            r#"<div class="error-container" role="alert"><p>Error: boom</p></div>"#
        );
    }

    #[test]
    fn when_loading_without_error_then_only_loading_indicator_is_rendered() {
        let component = Component::new(
            ComponentProps::new()
                .class_name("card")
                .child(Element::new("span").child("content")),
        );
        component.state().set_loading(true);

        assert_eq!(component.render().to_html(), LOADING_HTML);
    }

    #[test]
    fn when_class_name_is_omitted_then_container_class_is_used_alone() {
        let component = Component::new(ComponentProps::new().child("hello"));

        let node = component.render();
        let root = node.as_element().expect("expected root element");

        assert_eq!(
            root.get_attr("class"),
            Some(&AttrValue::Text("component-container".to_string()))
        );
        assert_eq!(node.text_content(), "hello");
    }

    #[test]
    fn when_class_name_and_attributes_are_supplied_then_they_are_merged_and_forwarded() {
        let component = Component::new(
            ComponentProps::new()
                .class_name("card")
                .attr("data-testid", "profile")
                .attr("hidden", false)
                .attr("class", "ignored")
                .child(Element::new("span").child("Ada")),
        );

        assert_eq!(
            component.render().to_html(),
            r#"<div class="component-container card" data-testid="profile"><span>Ada</span></div>"#
        );
    }

    #[test]
    fn when_error_is_dismissed_through_action_then_content_is_rendered_again() {
        let mut component = Component::new(ComponentProps::new().child("ok"));
        component.state().set_error("boom");

        component.handle_action().call(());

        assert_eq!(component.view_state().render_state(), RenderState::Content);
    }

    #[test]
    fn when_action_is_requested_across_renders_then_identity_is_stable() {
        let mut component = Component::new(ComponentProps::new());

        let first = component.handle_action();
        component.state().set_loading(true);
        let _ = component.render();
        let second = component.handle_action();

        assert!(first.ptr_eq(&second));
    }

    #[test]
    fn when_unmounted_then_cleanup_runs_exactly_once_even_without_async_work() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mounted =
            Component::new(ComponentProps::new()).mount(|_| counting_cleanup(&counter));

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        mounted.unmount();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn when_mounted_component_is_dropped_then_cleanup_runs_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let mounted =
                Component::new(ComponentProps::new()).mount(|_| counting_cleanup(&counter));
            let _ = mounted.render();
        }

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn when_effect_returns_noop_cleanup_then_unmount_succeeds() {
        let mounted = Component::new(ComponentProps::new()).mount(|_| Cleanup::noop());

        mounted.unmount();
    }

    #[tokio::test]
    async fn when_unmounted_before_async_work_finishes_then_cleanup_cancels_it() {
        let work = tokio::spawn(async { tokio::time::sleep(Duration::from_secs(60)).await });
        let abort = work.abort_handle();

        let mounted = Component::new(ComponentProps::new()).mount(move |state| {
            state.set_loading(true);
            Cleanup::new(move || abort.abort())
        });
        assert_eq!(mounted.render().to_html(), LOADING_HTML);

        mounted.unmount();

        let err = work.await.expect_err("expected work to be cancelled");
        assert!(err.is_cancelled());
    }
}
