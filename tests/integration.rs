//! End-to-end tests: recorded events in, script text out.

use eoka_codegen::{
    Event, GenerationOptions, Generator, Recorder, Recording, SenderFrame,
};
use serde_json::{json, Value};

fn lines(script: &str) -> Vec<&str> {
    script.lines().map(str::trim).collect()
}

fn position(lines: &[&str], needle: &str) -> usize {
    lines
        .iter()
        .position(|l| l.contains(needle))
        .unwrap_or_else(|| panic!("'{}' not found in output", needle))
}

#[test]
fn test_empty_recording_gives_bare_template() {
    let script = Generator::default().generate(&[], &json!({}));
    assert!(script.contains("async function testCaseXXXX(page) :Promise<VoidFunc> {"));
    assert!(script.contains("let clean = await openIntercepRequest(page,()=>neworkMock);"));
    assert!(script.contains("async function TestCase () {\n     \n    await clean();"));
    assert!(script.contains("var neworkMock ={};"));
    assert!(script.contains("return TestCase;"));
}

#[test]
fn test_frame_declared_once_before_first_use() {
    let events = vec![
        Event::new("click").selector("#top"),
        Event::new("input")
            .selector("#card")
            .value("4242")
            .frame(5, "https://x/y"),
        Event::new("click").selector("#top2"),
        Event::new("click").selector("#pay").frame(5, "https://x/y"),
    ];
    let script = Generator::default().generate(&events, &Value::Null);
    let out = lines(&script);

    assert_eq!(script.matches("let frames = await page.frames()").count(), 1);
    assert_eq!(
        script
            .matches("const frame_5 = frames.find(f => f.url() === 'https://x/y')")
            .count(),
        1
    );

    let handle = position(&out, "let frames = await page.frames()");
    let binder = position(&out, "const frame_5 =");
    let first_use = position(&out, "frame_5.waitForSelector('#card')");
    assert_eq!(binder, handle + 1);
    assert_eq!(first_use, binder + 1);
    assert!(position(&out, "await frame_5.click('#pay');") > first_use);
    assert!(position(&out, "await page.click('#top');") < handle);
}

#[test]
fn test_frame_url_last_write_wins() {
    let events = vec![
        Event::new("click").selector("#a").frame(2, "https://first"),
        Event::new("click").selector("#b").frame(2, "https://second"),
    ];
    let script = Generator::default().generate(&events, &Value::Null);
    assert!(script.contains("const frame_2 = frames.find(f => f.url() === 'https://second')"));
    assert!(!script.contains("https://first"));
}

#[test]
fn test_blank_blocks_interleaved() {
    let events = vec![
        Event::new("goto").href("https://example.com"),
        Event::new("click").selector("#a"),
        Event::new("keydown").value("Tab"),
        Event::new("keydown").value("q"), // dropped
    ];
    let gen = Generator::default();
    let blocks = gen.blocks(&events);

    let content = blocks.iter().filter(|b| !b.is_blank()).count();
    let blank = blocks.iter().filter(|b| b.is_blank()).count();
    assert_eq!(content, 3);
    assert_eq!(blank, content + 1);
    assert!(blocks.first().unwrap().is_blank());
    assert!(blocks.last().unwrap().is_blank());
    for pair in blocks.windows(2) {
        assert_ne!(pair[0].is_blank(), pair[1].is_blank());
    }
}

#[test]
fn test_no_blank_blocks_when_disabled() {
    let gen = Generator::new(GenerationOptions {
        blank_lines_between_blocks: false,
        ..Default::default()
    });
    let blocks = gen.blocks(&[Event::new("click").selector("#a")]);
    assert_eq!(blocks.len(), 1);
    assert!(!blocks[0].is_blank());
}

#[test]
fn test_navigation_promise_declared_before_await() {
    let events = vec![
        Event::new("click").selector("a.next"),
        Event::new("navigation"),
        Event::new("click").selector("a.more"),
        Event::new("navigation"),
    ];
    let script = Generator::default().generate(&events, &Value::Null);
    let out = lines(&script);

    let declaration = position(&out, "const navigationPromise = page.waitForNavigation()");
    let first_await = position(&out, "await navigationPromise");
    assert!(declaration < first_await);
    assert!(declaration < position(&out, "await page.click('a.next');"));
    assert_eq!(script.matches("await navigationPromise").count(), 2);
    assert_eq!(script.matches("const navigationPromise").count(), 1);
}

#[test]
fn test_no_navigation_promise_without_navigation() {
    let script = Generator::default().generate(&[Event::new("click").selector("#a")], &Value::Null);
    assert!(!script.contains("navigationPromise"));
}

#[test]
fn test_screenshot_numbering() {
    let events = vec![
        Event::new("screenshot"),
        Event::new("screenshot")
            .value(json!({ "x": "10px", "y": "20px", "width": "30px", "height": "40px" })),
        Event::new("click").selector("#a"),
        Event::new("screenshot").value(json!({ "x": "1px", "y": "2px" })),
    ];
    let script = Generator::default().generate(&events, &Value::Null);
    assert!(script.contains("screenshot({ path: 'screenshot_1.png' })"));
    assert!(script.contains(
        "screenshot({ path: 'screenshot_2.png', clip: { x: 10, y: 20, width: 30, height: 40 } })"
    ));
    assert!(script.contains("screenshot({ path: 'screenshot_3.png' })"));
    assert!(!script.contains("px"));
}

#[test]
fn test_select_change_filter() {
    let events = vec![
        Event::new("change").selector("#country").value("NZ").tag_name("SELECT"),
        Event::new("change").selector("#agree").value("on").tag_name("INPUT"),
    ];
    let script = Generator::default().generate(&events, &Value::Null);
    assert!(script.contains("await page.select('#country', 'NZ')"));
    assert!(!script.contains("#agree"));
}

#[test]
fn test_unknown_actions_ignored() {
    let events = vec![
        Event::new("mouseover").selector("#menu"),
        Event::new("scroll"),
        Event::new(""),
    ];
    let gen = Generator::default();
    assert!(gen.blocks(&events).is_empty());
    assert_eq!(
        gen.generate(&events, &Value::Null),
        gen.generate(&[], &Value::Null)
    );
}

#[test]
fn test_fresh_generators_identical_output() {
    let recording = Recording::load("configs/recording.json").unwrap();
    let options = GenerationOptions::load("configs/options.yaml").unwrap();
    let a = Generator::new(options.clone()).generate_recording(&recording);
    let b = Generator::new(options).generate_recording(&recording);
    assert_eq!(a, b);
}

#[test]
fn test_quotes_verbatim_by_default() {
    let events = vec![Event::new("input").selector("input[name='q']").value("it's")];
    let script = Generator::default().generate(&events, &Value::Null);
    assert!(script.contains("await page.type('input[name='q']','it's')"));

    let escaped = Generator::new(GenerationOptions {
        escape_strings: true,
        ..Default::default()
    })
    .generate(&events, &Value::Null);
    assert!(escaped.contains("await page.type('input[name=\\'q\\']','it\\'s')"));
}

#[test]
fn test_recorder_to_script() {
    let mut rec = Recorder::new();
    rec.start();
    rec.record_current_url("https://shop.example.com");
    rec.record_viewport(1024, 768);
    rec.record(
        Event::new("click").selector("#buy").mark("buy"),
        Some(&SenderFrame::new(0, "https://shop.example.com")),
    );
    rec.record_navigation(0);
    rec.record_current_url("https://shop.example.com/cart");
    rec.record_viewport(800, 600);
    rec.record_screenshot(None);
    let recording = rec.stop();

    let script = Generator::default().generate_recording(&recording);
    assert!(script.contains("window.__testContext__.goto('https://shop.example.com')"));
    assert!(!script.contains("/cart"));
    assert!(script.contains("setViewport({ width: 1024, height: 768 })"));
    assert!(!script.contains("width: 800"));
    assert!(script.contains("log(`[clicking]buy `);"));
    assert!(script.contains("await navigationPromise"));
    assert!(script.contains("var neworkMock ={};"));
}
