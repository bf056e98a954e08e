use httpsuite::protocol::HttpError;
use httpsuite::{Headers, Response};
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), HttpError> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let body = json!({"hello": "world"}).to_string();

    let headers = Headers::try_from(json!({
        "Host": "www.google.com",
        "Connection": "keep-alive",
        "Content-Length": body.len(),
    }))?;
    let response = Response::with_status_msg("HTTP/1.1", 200, "OK").with_headers(headers).with_body(body.as_str());

    let raw = format!(
        "HTTP/1.1 200 OK\r\nHost: www.google.com\r\nConnection: keep-alive\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    );
    let mut parsed = Response::parse(raw)?;

    info!(
        same_status = parsed.status() == response.status(),
        same_body = parsed.body() == response.body(),
        "compared responses"
    );
    println!("{response}\n");

    parsed.set_status(404);
    parsed.set_status_msg("Not Found");
    parsed.set_body("");
    parsed.headers_mut().set_content_length(0);

    println!("{parsed}\n");
    println!("{}", parsed.string()?);
    Ok(())
}
