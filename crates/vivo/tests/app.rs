//! Application-level tests: mounting, the instance proxy and unmounting.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use vivo::relief::ErrorCode;
use vivo::{parse_document, App, AppOptions, Dom, NodeId, Value, VivoError};

fn dom(template: &str) -> Dom {
    let (doc, errors) = parse_document(template);
    if !errors.is_empty() {
        panic!("Parse errors: {:?}", errors);
    }
    Dom::from_document(doc)
}

fn find(dom: &Dom, selector: &str) -> NodeId {
    dom.with(|doc| doc.query_selector(selector))
        .unwrap_or_else(|| panic!("no {selector}"))
}

#[test]
fn counter() {
    let dom = dom(r#"<div id="app"><button @click="inc">+</button> <span>{{ count }}</span></div>"#);
    let options = AppOptions::new("#app")
        .data(json!({ "count": 0 }))
        .unwrap()
        .method("inc", |vm, _| {
            let n = vm.get("count").as_f64().unwrap_or(0.0);
            vm.set("count", n + 1.0);
        });
    let app = App::mount(&dom, options).unwrap();
    insta::assert_snapshot!(app.html(), @r#"<button @click="inc">+</button> <span>0</span>"#);

    let button = find(&dom, "button");
    dom.dispatch_event(button, "click");
    dom.dispatch_event(button, "click");
    dom.dispatch_event(button, "click");

    assert_eq!(app.get("count"), Value::from(3));
    insta::assert_snapshot!(app.html(), @r#"<button @click="inc">+</button> <span>3</span>"#);
}

#[test]
fn instance_proxy_passes_through() {
    let dom = dom(r#"<main><p>{{ msg }}</p></main>"#);
    let app = App::mount(
        &dom,
        AppOptions::new("main").data(json!({ "msg": "hi" })).unwrap(),
    )
    .unwrap();

    assert_eq!(app.get("msg"), Value::from("hi"));
    assert_eq!(app.data().get("msg"), Value::from("hi"));

    app.data().set("msg", Value::from("direct"));
    assert_eq!(app.get("msg"), Value::from("direct"));
    assert_eq!(app.html(), "<p>direct</p>");

    assert!(app.get("missing").is_undefined());
}

#[test]
fn call_method_uses_the_instance() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&log);
    let dom = dom(r#"<div class="root"></div>"#);
    let app = App::mount(
        &dom,
        AppOptions::new(".root")
            .data(json!({ "name": "vivo" }))
            .unwrap()
            .method("greet", move |vm, event| {
                seen.borrow_mut()
                    .push(format!("{} {}", event.kind(), vm.get("name")));
            }),
    )
    .unwrap();

    app.call_method("greet").unwrap();
    assert_eq!(*log.borrow(), vec!["greet vivo"]);

    let err = app.call_method("nope").unwrap_err();
    assert!(matches!(err, VivoError::MethodNotFound(ref name) if name == "nope"));
}

#[test]
fn mount_target_must_exist() {
    let dom = dom("<div></div>");
    let err = App::mount(&dom, AppOptions::new("#app")).unwrap_err();
    match err {
        VivoError::Compile(e) => assert_eq!(e.code, ErrorCode::MountTargetNotFound),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_method_fails_mount() {
    let dom = dom(r#"<div id="app"><button @click="nope"></button></div>"#);
    let err = App::mount(&dom, AppOptions::new("#app")).unwrap_err();
    assert_eq!(err.to_string(), "Event handler names a method that does not exist. (nope)");
}

#[test]
fn strict_mode_rejects_unknown_directives() {
    let template = r#"<div id="app"><p v-if="ok">x</p></div>"#;

    let app = App::mount(&dom(template), AppOptions::new("#app")).unwrap();
    assert_eq!(app.warnings().len(), 1);

    let err = App::mount(&dom(template), AppOptions::new("#app").strict(true)).unwrap_err();
    assert!(matches!(err, VivoError::Compile(ref e) if e.code == ErrorCode::UnknownDirective));
}

#[test]
fn unmount_freezes_the_view() {
    let dom = dom(r#"<div id="app"><input v-model="msg"><p>{{ msg }}</p></div>"#);
    let mut app = App::mount(&dom, AppOptions::new("#app").data(json!({ "msg": "hi" })).unwrap())
        .unwrap();
    let input = find(&dom, "input");
    assert_eq!(app.bindings().watcher_count(), 2);
    assert_eq!(app.bindings().listener_count(), 1);

    app.unmount();

    app.set("msg", "later");
    dom.input(input, "typed");
    assert_eq!(app.get("msg"), Value::from("later"));
    assert_eq!(app.html(), r#"<input v-model="msg"><p>hi</p>"#);
    assert_eq!(app.data().dep("msg").map(|d| d.len()), Some(0));
}

#[test]
fn data_must_be_an_object() {
    assert!(matches!(
        AppOptions::new("#app").data(json!("text")),
        Err(VivoError::DataNotObject)
    ));
}
