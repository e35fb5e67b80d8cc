use axum_extra::extract::cookie::CookieJar;
use cookie::{Cookie, SameSite};

const FLASH_COOKIE: &str = "marquee_flash";

/// Queues `message` for the next page that calls [`take`].
pub fn set(jar: CookieJar, message: &str, secure: bool) -> CookieJar {
    let cookie = Cookie::build((FLASH_COOKIE, urlencoding::encode(message).into_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::minutes(5));
    jar.add(cookie)
}

/// Removes the pending message, if any, so it renders exactly once.
pub fn take(jar: CookieJar) -> (CookieJar, Option<String>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let message = urlencoding::decode(cookie.value())
        .ok()
        .map(|m| m.into_owned())
        .filter(|m| !m.trim().is_empty());

    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), message)
}
