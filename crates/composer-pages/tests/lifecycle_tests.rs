//! Lifecycle cascade tests
//!
//! Drives components through `enter` and `leave` the way a router would.

mod utils;

use composer_pages::lifecycle::{Entered, hide_tree, show_tree};
use composer_pages::prelude::*;
use rstest::*;
use utils::*;

#[fixture]
fn dashboard() -> ComponentInstance {
	ComponentInstance::new::<Dashboard>(Props::with_id("dash"), Vec::new()).unwrap()
}

// ============================================================================
// Enter
// ============================================================================

/// Construct: fetch, render, then interactions and show parent first.
#[rstest]
#[tokio::test]
async fn test_enter_construct_cascade(mut dashboard: ComponentInstance) {
	take_events();
	let renderer = Renderer::default();
	let document = Document::new();
	let body = document.body().unwrap();

	let entered = enter(
		&mut dashboard,
		&FetchRequest::new("/dash"),
		RenderTarget::Construct {
			document: &document,
			parent: &body,
		},
		&renderer,
	)
	.await
	.unwrap();

	assert_eq!(entered, Entered::Mounted);
	assert_eq!(
		take_events(),
		vec![
			"fetch:/dash",
			"bind:dash",
			"bind:card",
			"bind:card-badge",
			"bind:footer-badge",
			"show:dash",
			"show:card",
			"show:card-badge",
			"show:footer-badge",
		]
	);
	assert_eq!(body.child_elements(), vec![dashboard.root().unwrap().clone()]);
}

/// Serialize: only fetch runs besides the render itself.
#[rstest]
#[tokio::test]
async fn test_enter_serialize(mut dashboard: ComponentInstance) {
	take_events();
	let renderer = Renderer::default();
	let request = FetchRequest::new("/dash").with_param("heading", "Overview");

	let entered = enter(&mut dashboard, &request, RenderTarget::Serialize, &renderer)
		.await
		.unwrap();

	let html = match entered {
		Entered::Markup(html) => html,
		other => panic!("expected markup, got {:?}", other),
	};
	assert!(html.starts_with(r#"<main id="dash"><header data-ref="header">Overview</header>"#));
	assert_eq!(take_events(), vec!["fetch:/dash"]);
}

/// Bind: server markup is bound, then interactions and show run.
#[rstest]
#[tokio::test]
async fn test_enter_bind(mut dashboard: ComponentInstance) {
	let renderer = Renderer::default();
	let html = renderer.render_component_to_string(&mut dashboard).unwrap();
	let document = Document::parse(&html).unwrap();
	let mut client = ComponentInstance::new::<Dashboard>(Props::with_id("dash"), Vec::new()).unwrap();
	take_events();

	let entered = enter(
		&mut client,
		&FetchRequest::new("/dash"),
		RenderTarget::Bind {
			document: &document,
		},
		&renderer,
	)
	.await
	.unwrap();

	assert_eq!(entered, Entered::Bound);
	assert!(client.base().has_bound_dom());
	assert_eq!(client.element("header").unwrap().text_content(), "Dashboard");
	let events = take_events();
	assert_eq!(events.len(), 9);
	assert_eq!(events[1], "bind:dash");
	assert_eq!(events[8], "show:footer-badge");
}

/// A failing bind stops the cascade before any hook runs.
#[rstest]
#[tokio::test]
async fn test_enter_bind_failure_stops_cascade(mut dashboard: ComponentInstance) {
	take_events();
	let document = Document::parse("<p>unrelated</p>").unwrap();

	let result = enter(
		&mut dashboard,
		&FetchRequest::new("/dash"),
		RenderTarget::Bind {
			document: &document,
		},
		&Renderer::default(),
	)
	.await;

	assert!(matches!(result, Err(ComponentError::RootNotFound { .. })));
	assert_eq!(take_events(), vec!["fetch:/dash"]);
}

// ============================================================================
// Fetch
// ============================================================================

/// Props returned by fetch replace the current ones.
#[rstest]
#[tokio::test]
async fn test_fetch_replaces_props() {
	let mut profile = ComponentInstance::new::<Profile>(Props::with_id("me"), Vec::new()).unwrap();

	profile
		.fetch(&FetchRequest::new("/me").with_param("user", "ada"))
		.await
		.unwrap();

	assert_eq!(profile.base().props().get_str("name"), Some("ada"));
	assert_eq!(profile.id(), "me");
	assert_eq!(
		profile.render_to_string().unwrap(),
		r#"<article id="me" title="ada">ada</article>"#
	);
}

/// Fetched props must still carry an id.
#[rstest]
#[tokio::test]
async fn test_fetch_without_id_is_fatal() {
	let mut profile = ComponentInstance::new::<Profile>(Props::with_id("me"), Vec::new()).unwrap();

	let err = profile
		.fetch(&FetchRequest::new("/me").with_param("user", ""))
		.await
		.unwrap_err();

	assert!(matches!(err, ComponentError::MissingId { .. }));
	assert_eq!(profile.id(), "me");
}

/// Hook failures propagate.
#[rstest]
#[tokio::test]
async fn test_fetch_hook_error() {
	let mut profile = ComponentInstance::new::<Profile>(Props::with_id("me"), Vec::new()).unwrap();

	let err = profile.fetch(&FetchRequest::new("/me")).await.unwrap_err();

	assert_eq!(err, ComponentError::hook("Profile", "missing user"));
}

// ============================================================================
// Leave
// ============================================================================

/// Hide and remove run children first, and roots end up detached.
#[rstest]
#[tokio::test]
async fn test_leave_cascade(mut dashboard: ComponentInstance) {
	let renderer = Renderer::default();
	let document = Document::new();
	let body = document.body().unwrap();
	enter(
		&mut dashboard,
		&FetchRequest::new("/dash"),
		RenderTarget::Construct {
			document: &document,
			parent: &body,
		},
		&renderer,
	)
	.await
	.unwrap();
	take_events();

	leave(&mut dashboard).await.unwrap();

	assert_eq!(
		take_events(),
		vec![
			"hide:card-badge",
			"hide:card",
			"hide:footer-badge",
			"hide:dash",
			"remove:card-badge",
			"remove:card",
			"remove:footer-badge",
			"remove:dash",
		]
	);
	assert!(body.children().is_empty());
	assert!(!dashboard.root().unwrap().is_attached());
}

/// The default `remove` detaches the root.
#[rstest]
#[tokio::test]
async fn test_default_remove_detaches_root() {
	let mut panel = ComponentInstance::new::<Panel>(Props::with_id("panel"), Vec::new()).unwrap();
	let document = Document::new();
	let body = document.body().unwrap();
	panel.construct_as_dom(&document).unwrap().append_to(&body);
	assert_eq!(body.child_elements().len(), 1);

	panel.remove().await.unwrap();

	assert!(body.children().is_empty());
	assert!(panel.root().is_some());
}

/// Show and hide on a single tree without a render only touch the root.
#[rstest]
#[tokio::test]
async fn test_cascade_before_render(mut dashboard: ComponentInstance) {
	take_events();

	show_tree(&mut dashboard).await.unwrap();
	hide_tree(&mut dashboard).await.unwrap();

	assert_eq!(take_events(), vec!["show:dash", "hide:dash"]);
}
