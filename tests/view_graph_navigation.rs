use std::io;

use coupon_calendar::cli::ui::{
    navigation::NavKey,
    surface::{Region, Surface},
    test_mode::ScriptedSurface,
    view_graph::{HasSurface, Transition, ViewGraph, ViewNode},
};

struct Counter {
    surface: ScriptedSurface,
    value: i32,
    draws: usize,
}

impl Counter {
    fn new(keys: Vec<NavKey>) -> Self {
        Self {
            surface: ScriptedSurface::new(keys),
            value: 0,
            draws: 0,
        }
    }
}

impl HasSurface for Counter {
    fn surface(&mut self) -> &mut dyn Surface {
        &mut self.surface
    }
}

fn counting_graph() -> ViewGraph<Counter> {
    let root = ViewNode::new(Region::new(0, 0, 10, 40))
        .with_title("|Main|")
        .with_draw(|counter: &mut Counter, _region| {
            counter.draws += 1;
            Ok(())
        })
        .on_key(NavKey::Char('>'), |counter: &mut Counter| {
            counter.value += 1;
            true
        })
        .on_key(NavKey::Char('q'), |_: &mut Counter| false);
    let mut graph = ViewGraph::new(root);
    let root = graph.root();
    let help = graph.add(
        ViewNode::new(Region::new(2, 2, 5, 20))
            .with_title("|Help|")
            .route(NavKey::Char('q'), root)
            .route(NavKey::Esc, root),
    );
    graph.connect(root, NavKey::Char('h'), help);
    graph
}

#[test]
fn actions_run_until_one_returns_false() {
    let mut graph = counting_graph();
    let mut counter = Counter::new(vec![
        NavKey::Char('>'),
        NavKey::Char('>'),
        NavKey::Char('q'),
    ]);

    graph.run(&mut counter).unwrap();

    assert_eq!(counter.value, 2);
    assert_eq!(counter.draws, 3);
    assert_eq!(graph.focus(), graph.root());
    assert_eq!(counter.surface.remaining_keys(), 0);
}

#[test]
fn child_view_routes_back_to_its_parent() {
    let mut graph = counting_graph();
    let mut counter = Counter::new(vec![
        NavKey::Char('h'),
        NavKey::Char('>'),
        NavKey::Esc,
        NavKey::Char('h'),
        NavKey::Char('q'),
        NavKey::Char('q'),
    ]);

    graph.run(&mut counter).unwrap();

    // '>' is unbound in the help view and the first 'q' there is a transition.
    assert_eq!(counter.value, 0);
    assert_eq!(graph.focus(), graph.root());
    let titles: Vec<Option<String>> = counter.surface.frames().to_vec();
    assert_eq!(
        titles,
        vec![
            Some("|Main|".to_string()),
            Some("|Help|".to_string()),
            Some("|Help|".to_string()),
            Some("|Main|".to_string()),
            Some("|Help|".to_string()),
            Some("|Main|".to_string()),
        ]
    );
}

#[test]
fn apply_reports_each_kind_of_step() {
    let mut graph = counting_graph();
    let mut counter = Counter::new(Vec::new());
    let root = graph.root();

    assert_eq!(
        graph.apply(&mut counter, NavKey::Char('>')).unwrap(),
        Transition::Handled
    );
    assert_eq!(
        graph.apply(&mut counter, NavKey::Char('x')).unwrap(),
        Transition::Ignored
    );
    let moved = graph.apply(&mut counter, NavKey::Char('h')).unwrap();
    let help = graph.focus();
    assert_eq!(moved, Transition::Moved { from: root, to: help });
    assert_eq!(graph.node(help).title(), Some("|Help|"));
    assert_eq!(graph.node(help).region(), Region::new(2, 2, 5, 20));
    assert_eq!(
        graph.apply(&mut counter, NavKey::Char('q')).unwrap(),
        Transition::Moved { from: help, to: root }
    );
    assert_eq!(
        graph.apply(&mut counter, NavKey::Char('q')).unwrap(),
        Transition::Stop
    );
}

#[test]
fn running_out_of_keys_is_an_error() {
    let mut graph = counting_graph();
    let mut counter = Counter::new(vec![NavKey::Char('>')]);
    let err = graph.run(&mut counter).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    assert_eq!(counter.value, 1);
}
