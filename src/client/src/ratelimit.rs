//! Rate-limit header extraction
//!
//! Best effort: a response without rate-limit headers is annotated with
//! [`Annotation::NoRateLimitData`] rather than treated as an error.

use redis_iam_core::{Annotation, RateLimitDescription, RateLimitStatus};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

const LIMIT_HEADERS: [&str; 2] = ["x-ratelimit-limit", "ratelimit-limit"];
const REMAINING_HEADERS: [&str; 2] = ["x-ratelimit-remaining", "ratelimit-remaining"];
const RESET_HEADERS: [&str; 3] = ["x-ratelimit-reset", "ratelimit-reset", "retry-after"];

/// Build the rate-limit annotation for one response
pub fn extract_rate_limit(status: StatusCode, headers: &HeaderMap) -> Annotation {
    let limit = first_number(headers, &LIMIT_HEADERS);
    let remaining = first_number(headers, &REMAINING_HEADERS);
    let reset_after_secs = first_number(headers, &RESET_HEADERS);

    if limit.is_none() && remaining.is_none() && reset_after_secs.is_none() {
        return Annotation::NoRateLimitData;
    }

    let status = if status == StatusCode::TOO_MANY_REQUESTS {
        RateLimitStatus::Overlimit
    } else {
        RateLimitStatus::Ok
    };

    Annotation::RateLimit(RateLimitDescription {
        status,
        limit,
        remaining,
        reset_after_secs,
    })
}

fn first_number(headers: &HeaderMap, names: &[&str]) -> Option<u64> {
    names.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
    })
}
