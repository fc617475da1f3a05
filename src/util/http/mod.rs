use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use once_cell::sync::{Lazy, OnceCell};
use reqwest::{header, Client, Method, Response};

use crate::logging::Logger;

pub mod user_agent;

/// A singleton instance of the reqwest client.
static CLIENT: OnceCell<Client> = OnceCell::new();

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("http"));

/// Returns the reqwest client singleton instance or creates one if it
/// doesn't exist.
///
/// The client identifies itself with a browser-like User-Agent: the quote
/// source serves degraded markup to default request identifiers.
fn get_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .brotli(true)
            .gzip(true)
            .connect_timeout(Duration::from_secs(8))
            .timeout(Duration::from_secs(15))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(user_agent::gen_random_ua())
            .build()
            .map_err(|e| anyhow!("Failed to create reqwest client: {:?}", e))
    })
}

/// Performs an HTTP GET request and returns the response as text.
///
/// Malformed bytes in the body are replaced rather than failing the
/// decode, matching the tolerance the source page requires.
pub async fn get(url: &str, headers: Option<header::HeaderMap>) -> Result<String> {
    let response = get_response(url, headers).await?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| anyhow!("Error reading response body: {:?}", e))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub async fn get_response(url: &str, headers: Option<header::HeaderMap>) -> Result<Response> {
    send(Method::GET, url, headers).await
}

/// Sends a single HTTP request. No retry: a failed fetch is reported to
/// the caller, which records it against the ticker and moves on.
async fn send(
    method: Method,
    url: &str,
    headers: Option<header::HeaderMap>,
) -> Result<Response> {
    let visit_log = format!("{method}:{url}");
    let client = get_client()?;
    let mut rb = client.request(method, url);

    if let Some(h) = headers {
        rb = rb.headers(h);
    }

    let start = Instant::now();
    let res = rb.send().await;
    let elapsed = start.elapsed().as_millis();

    match res {
        Ok(response) => {
            LOGGER.info(format!("{} {} ms", visit_log, elapsed));
            Ok(response)
        }
        Err(why) => {
            LOGGER.error(format!(
                "{} failed because {:?}. {} ms",
                visit_log, why, elapsed
            ));
            Err(anyhow!("Failed to send request to {} because {:?}", url, why))
        }
    }
}
