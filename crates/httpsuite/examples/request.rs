use httpsuite::protocol::HttpError;
use httpsuite::{Headers, Item, Request};
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), HttpError> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let body = json!({"hello": "world"}).to_string();

    let request = Request::new("GET", "/", "HTTP/1.1")
        .with_headers(Headers::from([
            ("Host", Item::from("www.google.com")),
            ("Connection", Item::from("keep-alive")),
            ("Content-Length", Item::from(body.len())),
        ]))
        .with_body(body.as_str());

    let raw = format!(
        "GET / HTTP/1.1\r\nHost: www.google.com\r\nConnection: keep-alive\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    );
    let mut parsed = Request::parse(raw)?;

    info!(equal = parsed == request, "compared constructed and parsed requests");
    println!("{parsed}\n");

    parsed.set_method("POST");
    parsed.set_target("/post");
    parsed.headers_mut().set_host("httpbin.org");

    println!("{parsed}\n");
    println!("{:?}", parsed.raw());
    println!("content-length: {}", parsed.headers().get("content_length")?);
    Ok(())
}
