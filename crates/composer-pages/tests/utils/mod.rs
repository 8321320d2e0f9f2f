//! Shared test components.
//!
//! Each test binary uses a subset of these.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use composer_pages::logging::{DiagnosticLevel, Diagnostics, MemoryHandler};
use composer_pages::prelude::*;
use composer_pages::render::Renderer;

thread_local! {
	static EVENTS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Records a lifecycle event on the current thread.
pub fn record(event: impl Into<String>) {
	EVENTS.with(|events| events.borrow_mut().push(event.into()));
}

/// Takes every event recorded on the current thread.
pub fn take_events() -> Vec<String> {
	EVENTS.with(|events| events.borrow_mut().drain(..).collect())
}

/// A renderer whose diagnostics go to memory only.
pub fn memory_renderer(level: DiagnosticLevel) -> (Renderer, Rc<MemoryHandler>) {
	let memory = Rc::new(MemoryHandler::new());
	let diagnostics = Diagnostics::silent(level).with_handler(memory.clone());
	(Renderer::default().with_diagnostics(diagnostics), memory)
}

/// `<div id><span ref="label">{text}</span></div>`
pub struct Panel {
	pub text: String,
}

impl Component for Panel {
	fn construct(props: &Props, _children: &[Child]) -> Self {
		Self {
			text: props.get_str("text").unwrap_or("hello").to_string(),
		}
	}

	fn name() -> &'static str {
		"Panel"
	}

	fn render(&self, _base: &ComponentBase) -> Descriptor {
		Descriptor::element("div")
			.child(
				Descriptor::element("span")
					.prop("ref", "label")
					.child(self.text.clone()),
			)
			.build()
	}
}

/// `<em ref="text">{label}</em>`
pub struct Badge {
	pub label: String,
}

#[async_trait(?Send)]
impl Component for Badge {
	fn construct(props: &Props, _children: &[Child]) -> Self {
		Self {
			label: props.get_str("label").unwrap_or_default().to_string(),
		}
	}

	fn name() -> &'static str {
		"Badge"
	}

	fn render(&self, _base: &ComponentBase) -> Descriptor {
		Descriptor::element("em")
			.prop("ref", "text")
			.child(self.label.clone())
			.build()
	}

	async fn show(&mut self, base: &ComponentBase) -> Result<()> {
		record(format!("show:{}", base.id()));
		Ok(())
	}

	async fn hide(&mut self, base: &ComponentBase) -> Result<()> {
		record(format!("hide:{}", base.id()));
		Ok(())
	}

	async fn remove(&mut self, base: &mut ComponentBase) -> Result<()> {
		record(format!("remove:{}", base.id()));
		base.detach_root();
		Ok(())
	}

	fn bind_interactions(&mut self, base: &ComponentBase) {
		record(format!("bind:{}", base.id()));
	}
}

/// A card with a title reference, a list of items and one badge.
///
/// Constructor children are rendered inside the body.
pub struct Card {
	pub title: String,
	pub items: Vec<String>,
}

#[async_trait(?Send)]
impl Component for Card {
	fn construct(props: &Props, _children: &[Child]) -> Self {
		Self {
			title: props.get_str("title").unwrap_or("Card").to_string(),
			items: vec!["one".to_string(), "two".to_string()],
		}
	}

	fn name() -> &'static str {
		"Card"
	}

	fn render(&self, base: &ComponentBase) -> Descriptor {
		let items: Vec<Descriptor> = self
			.items
			.iter()
			.map(|item| Descriptor::element("li").child(item.clone()).build())
			.collect();
		let badge_id = format!("{}-badge", base.id());

		Descriptor::element("section")
			.prop("class", "card")
			.child(Descriptor::element("h2").prop("ref", "title").child(self.title.clone()))
			.child(Descriptor::element("ul").prop("ref", "items").child(items))
			.child(
				Descriptor::element("div")
					.prop("class", "body")
					.children(base.children().to_vec()),
			)
			.child(
				Descriptor::component::<Badge>()
					.prop("id", badge_id)
					.prop("label", "new"),
			)
			.build()
	}

	async fn show(&mut self, base: &ComponentBase) -> Result<()> {
		record(format!("show:{}", base.id()));
		Ok(())
	}

	async fn hide(&mut self, base: &ComponentBase) -> Result<()> {
		record(format!("hide:{}", base.id()));
		Ok(())
	}

	async fn remove(&mut self, base: &mut ComponentBase) -> Result<()> {
		record(format!("remove:{}", base.id()));
		base.detach_root();
		Ok(())
	}

	fn bind_interactions(&mut self, base: &ComponentBase) {
		record(format!("bind:{}", base.id()));
	}
}

/// A page with a header reference, a card and a footer badge.
pub struct Dashboard {
	pub heading: String,
}

#[async_trait(?Send)]
impl Component for Dashboard {
	fn construct(props: &Props, _children: &[Child]) -> Self {
		Self {
			heading: props.get_str("heading").unwrap_or("Dashboard").to_string(),
		}
	}

	fn name() -> &'static str {
		"Dashboard"
	}

	fn render(&self, _base: &ComponentBase) -> Descriptor {
		Descriptor::element("main")
			.child(Descriptor::element("header").prop("ref", "header").child(self.heading.clone()))
			.child(
				Descriptor::component::<Card>()
					.prop("id", "card")
					.prop("title", "Stats")
					.child(Descriptor::element("p").prop("ref", "note").child("inside")),
			)
			.child(
				Descriptor::element("footer").child(
					Descriptor::component::<Badge>()
						.prop("id", "footer-badge")
						.prop("label", "v1"),
				),
			)
			.build()
	}

	async fn fetch(&mut self, _base: &ComponentBase, request: &FetchRequest) -> Result<Option<Props>> {
		record(format!("fetch:{}", request.path));
		if let Some(heading) = request.param("heading") {
			self.heading = heading.to_string();
		}
		Ok(None)
	}

	async fn show(&mut self, base: &ComponentBase) -> Result<()> {
		record(format!("show:{}", base.id()));
		Ok(())
	}

	async fn hide(&mut self, base: &ComponentBase) -> Result<()> {
		record(format!("hide:{}", base.id()));
		Ok(())
	}

	async fn remove(&mut self, base: &mut ComponentBase) -> Result<()> {
		record(format!("remove:{}", base.id()));
		base.detach_root();
		Ok(())
	}

	fn bind_interactions(&mut self, base: &ComponentBase) {
		record(format!("bind:{}", base.id()));
	}
}

/// Two list items under the same reference name.
pub struct Duplicates;

impl Component for Duplicates {
	fn construct(_props: &Props, _children: &[Child]) -> Self {
		Self
	}

	fn name() -> &'static str {
		"Duplicates"
	}

	fn render(&self, _base: &ComponentBase) -> Descriptor {
		Descriptor::element("ul")
			.child(Descriptor::element("li").prop("ref", "x").child("first"))
			.child(Descriptor::element("li").prop("ref", "x").child("second"))
			.build()
	}
}

/// Renders a nested component with no intrinsic element of its own.
pub struct Wrapper;

impl Component for Wrapper {
	fn construct(_props: &Props, _children: &[Child]) -> Self {
		Self
	}

	fn name() -> &'static str {
		"Wrapper"
	}

	fn render(&self, base: &ComponentBase) -> Descriptor {
		Descriptor::component::<Panel>()
			.prop("id", format!("{}-inner", base.id()))
			.prop("text", "wrapped")
			.build()
	}
}

/// Renders a nested component that lacks an id.
pub struct Broken;

impl Component for Broken {
	fn construct(_props: &Props, _children: &[Child]) -> Self {
		Self
	}

	fn name() -> &'static str {
		"Broken"
	}

	fn render(&self, _base: &ComponentBase) -> Descriptor {
		Descriptor::element("div")
			.child(Descriptor::component::<Badge>().prop("label", "no id"))
			.build()
	}
}

/// Loads its props from the request.
pub struct Profile {
	pub name: String,
}

#[async_trait(?Send)]
impl Component for Profile {
	fn construct(props: &Props, _children: &[Child]) -> Self {
		Self {
			name: props.get_str("name").unwrap_or("anonymous").to_string(),
		}
	}

	fn name() -> &'static str {
		"Profile"
	}

	fn render(&self, base: &ComponentBase) -> Descriptor {
		Descriptor::element("article")
			.prop("title", base.props().get_str("name").unwrap_or(self.name.as_str()).to_string())
			.child(self.name.clone())
			.build()
	}

	async fn fetch(&mut self, base: &ComponentBase, request: &FetchRequest) -> Result<Option<Props>> {
		match request.param("user") {
			Some("") => Ok(Some(Props::new().with("name", "nobody"))),
			Some(user) => {
				self.name = user.to_string();
				Ok(Some(base.props().clone().with("name", user)))
			}
			None => Err(ComponentError::hook("Profile", "missing user")),
		}
	}
}
