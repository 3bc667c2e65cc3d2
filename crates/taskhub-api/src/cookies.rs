//! Credential cookies.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use taskhub_auth::jwt::TokenPair;
use taskhub_core::config::AppConfig;
use taskhub_core::config::cookie::{ACCESS_COOKIE, CookieConfig, REFRESH_COOKIE};

/// Reads a cookie value, treating an empty value as absent.
pub fn read(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Adds both credential cookies for `tokens`.
pub fn with_tokens(jar: CookieJar, config: &AppConfig, tokens: &TokenPair) -> CookieJar {
    let access_max_age = time::Duration::minutes(config.auth.jwt_access_ttl_minutes as i64);
    let refresh_max_age = time::Duration::hours(config.auth.jwt_refresh_ttl_hours as i64);

    jar.add(credential(
        ACCESS_COOKIE,
        tokens.access_token.clone(),
        access_max_age,
        &config.cookie,
    ))
    .add(credential(
        REFRESH_COOKIE,
        tokens.refresh_token.clone(),
        refresh_max_age,
        &config.cookie,
    ))
}

/// Overwrites both credential cookies with expired, empty values.
pub fn cleared(jar: CookieJar, config: &CookieConfig) -> CookieJar {
    jar.add(credential(ACCESS_COOKIE, String::new(), time::Duration::ZERO, config))
        .add(credential(REFRESH_COOKIE, String::new(), time::Duration::ZERO, config))
}

fn credential(
    name: &'static str,
    value: String,
    max_age: time::Duration,
    config: &CookieConfig,
) -> Cookie<'static> {
    let mut builder = Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .max_age(max_age);
    if let Some(domain) = &config.domain {
        builder = builder.domain(domain.clone());
    }
    builder.build()
}
