//! Integration tests: scoped containers composed through provider stacks.

use std::rc::Rc;

use scoped_store::view::{IntoView, View};
use scoped_store::{
	Leaf, Provider, ProviderList, ScopeError, create_scope, decorator, flush_updates,
	multi_provider, provide_scopes, reducer,
};
use serial_test::serial;

#[derive(Clone, Debug, PartialEq)]
enum CartAction {
	Add(u32),
	Clear,
	Noise,
}

fn cart_reducer(state: &Vec<u32>, action: &CartAction) -> Vec<u32> {
	match action {
		CartAction::Add(item) => {
			let mut next = state.clone();
			next.push(*item);
			next
		}
		CartAction::Clear => Vec::new(),
		CartAction::Noise => state.clone(),
	}
}

#[test]
#[serial]
fn round_trip_matches_direct_reducer_fold() {
	let audit = decorator(|inner: scoped_store::store::Reducer<Vec<u32>, CartAction>| {
		reducer(move |state, action| {
			let mut next = inner(state, action);
			next.dedup();
			next
		})
	});

	let scope = create_scope(vec![1u32], cart_reducer)
		.with_decorator(Rc::clone(&audit))
		.build();

	let actions = vec![
		CartAction::Add(2),
		CartAction::Add(2),
		CartAction::Noise,
		CartAction::Add(3),
	];

	// Through the tree: mount, dispatch the sequence, flush, re-read.
	let provider = scope.provider();
	provider.provide(&|| {
		let dispatch = scope.use_dispatch().unwrap();
		for action in &actions {
			dispatch.call(action.clone());
		}
		View::Empty
	});
	flush_updates();

	let observed = std::cell::RefCell::new(Vec::new());
	provider.provide(&|| {
		*observed.borrow_mut() = scope.use_state().unwrap();
		View::Empty
	});

	// Directly: fold the same effective reducer outside the tree.
	let effective = scoped_store::DecorationChain::from(audit).compose(reducer(cart_reducer));
	let expected = actions
		.iter()
		.fold(vec![1u32], |state, action| effective(&state, action));

	assert_eq!(*observed.borrow(), expected);
}

#[test]
#[serial]
fn two_scopes_stacked_are_independent() {
	let theme = create_scope("light".to_string(), |state: &String, action: &String| {
		let _ = state;
		action.clone()
	})
	.build();
	let cart = create_scope(Vec::new(), cart_reducer).build();

	let providers = ProviderList::new().with(theme.provider()).with(cart.provider());

	multi_provider(&providers, || {
		theme.use_dispatch().unwrap().call("dark".to_string());
		cart.use_dispatch().unwrap().call(CartAction::Add(1));
		View::Empty
	});
	flush_updates();

	let rendered = multi_provider(&providers, || {
		let theme_name = theme.use_state().unwrap();
		let items = cart.use_state().unwrap().len();
		View::text(format!("{theme_name}:{items}"))
	});
	assert_eq!(rendered.render_to_string(), "dark:1");

	// Outside the stack both scopes are unreachable again.
	assert!(matches!(
		theme.use_state(),
		Err(ScopeError::OutsideProvider { .. })
	));
	assert!(matches!(
		cart.use_state(),
		Err(ScopeError::OutsideProvider { .. })
	));
}

#[test]
#[serial]
fn wrapped_leaf_reads_scopes_and_props() {
	#[derive(Clone)]
	struct BadgeProps {
		label: &'static str,
	}

	let cart = create_scope(vec![10u32, 20], cart_reducer).build();
	let providers = ProviderList::new().with(cart.provider());

	let wrapped = provide_scopes(providers)(Leaf::component({
		let cart = cart.clone();
		move |props: &BadgeProps| {
			let count = cart.use_state().unwrap().len();
			View::text(format!("{} ({count})", props.label))
		}
	}));

	let view = wrapped(BadgeProps { label: "items" });
	assert_eq!(view.render_to_string(), "items (2)");
}

#[test]
#[serial]
fn actions_object_drives_container_through_stack() {
	struct CartActions {
		add: Box<dyn Fn(u32)>,
		clear: Box<dyn Fn()>,
	}

	let cart = create_scope(Vec::new(), cart_reducer)
		.with_actions(|dispatch| {
			let add_dispatch = dispatch.clone();
			CartActions {
				add: Box::new(move |item| add_dispatch.call(CartAction::Add(item))),
				clear: Box::new(move || dispatch.call(CartAction::Clear)),
			}
		})
		.build();

	let provider = cart.provider();
	provider.provide(&|| {
		let (state, actions) = cart.use_scope().unwrap();
		assert!(state.is_empty());
		(actions.add)(5);
		(actions.add)(6);
		View::Empty
	});
	flush_updates();

	provider.provide(&|| {
		let (state, actions) = cart.use_scope().unwrap();
		assert_eq!(state, vec![5, 6]);
		(actions.clear)();
		View::Empty
	});
	flush_updates();

	provider.provide(&|| {
		assert!(cart.use_state().unwrap().is_empty());
		View::Empty
	});
}

#[test]
#[serial]
fn empty_stack_renders_leaf_with_props() {
	#[derive(Clone)]
	struct P {
		x: i32,
	}

	let wrapped = provide_scopes(ProviderList::new())(Leaf::component(|props: &P| {
		View::text(format!("x={}", props.x))
	}));
	assert_eq!(wrapped(P { x: 1 }).render_to_string(), "x=1");

	let bare = multi_provider(&ProviderList::new(), || "nothing".into_view());
	assert_eq!(bare.render_to_string(), "nothing");
}
