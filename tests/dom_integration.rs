use mcp_browser_use::{BrowserSession, LaunchOptions};

#[test]
#[ignore] // Requires Chrome to be installed
fn test_dom_extraction() {
    let session = BrowserSession::launch(LaunchOptions::new().headless(true))
        .expect("Failed to launch browser");

    session.navigate("data:text/html,<html><body><button id='test-btn'>Click me</button><a href='#'>Link</a></body></html>")
        .expect("Failed to navigate");
    session.wait_for_navigation().expect("Navigation failed");

    let dom = session.extract_dom().expect("Failed to extract DOM");

    assert_eq!(dom.root.tag_name, "body");
    assert!(dom.count_elements() > 0);

    let json = dom.to_json().expect("Failed to convert to JSON");
    assert!(json.contains("button"));
    assert!(json.contains("test-btn"));
}

#[test]
#[ignore]
fn test_interactive_indexing() {
    let session = BrowserSession::launch(LaunchOptions::new().headless(true))
        .expect("Failed to launch browser");

    session.navigate("data:text/html,<html><body><button id='btn1'>Button 1</button><button id='btn2'>Button 2</button></body></html>")
        .expect("Failed to navigate");
    session.wait_for_navigation().expect("Navigation failed");

    std::thread::sleep(std::time::Duration::from_millis(500));

    let dom = session.extract_dom().expect("Failed to extract DOM");

    // Both buttons should be indexed with XPath locators
    assert_eq!(dom.count_interactive(), 2);

    for &index in &dom.interactive_indices() {
        let selector = dom.get_selector(index).expect("Missing selector");
        assert!(selector.xpath.starts_with("/html/body"));
    }
}

#[test]
#[ignore]
fn test_prompt_listing_renders_indices() {
    let session = BrowserSession::launch(LaunchOptions::new().headless(true))
        .expect("Failed to launch browser");

    session.navigate("data:text/html,<html><body><a href='/go' title='Go'>Take me there</a></body></html>")
        .expect("Failed to navigate");
    session.wait_for_navigation().expect("Navigation failed");

    std::thread::sleep(std::time::Duration::from_millis(500));

    let dom = session.extract_dom().expect("Failed to extract DOM");
    let listing = dom.to_prompt_string();

    assert!(listing.contains("[0]<a"));
    assert!(listing.contains("Take me there"));
    assert!(listing.contains("title=\"Go\""));
}

#[test]
#[ignore]
fn test_simplified_dom_extraction() {
    let session = BrowserSession::launch(LaunchOptions::new().headless(true))
        .expect("Failed to launch browser");

    session.navigate("data:text/html,<html><head></head><body><p>Hello</p><button>Click</button></body></html>")
        .expect("Failed to navigate");
    session.wait_for_navigation().expect("Navigation failed");

    std::thread::sleep(std::time::Duration::from_millis(500));

    let tab = session.tab().expect("No tab");
    let dom = mcp_browser_use::dom::extract_simplified_dom(&tab)
        .expect("Failed to extract simplified DOM");

    let json = dom.to_json().expect("Failed to convert to JSON");
    assert!(json.contains("button") || json.contains("body"));
}
