//! Header sets for FPL requests

use crate::Result;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER,
    USER_AGENT,
};

/// Public site the API sits behind; used for referers and the login redirect.
pub const FPL_SITE_URL: &str = "https://fantasy.premierleague.com";

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/116.0";

/// Headers for JSON submissions, mimicking the site's own AJAX calls.
///
/// `referer` is the page the request claims to come from
/// (e.g. `https://fantasy.premierleague.com/transfers`).
pub fn submission_headers(referer: &str) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("*/*"));
    h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    h.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    h.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    h.insert(REFERER, HeaderValue::from_str(referer)?);
    Ok(h)
}

/// Headers for the form-encoded login POST.
pub fn login_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(ORIGIN, HeaderValue::from_static(FPL_SITE_URL));
    h.insert(
        REFERER,
        HeaderValue::from_static("https://fantasy.premierleague.com/"),
    );
    h.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    h.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-GB,en;q=0.9,en-US;q=0.7"),
    );
    h
}
