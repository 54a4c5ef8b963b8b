//! Source resolution for skills.
//!
//! Turns a free-form specifier into exactly one of:
//! - a hosted repository reference (`hosted:`, `github.com` URLs, `owner/repo`)
//! - a generic http(s) URL
//! - a local path
//! - a registry id or slug

mod resolver;
mod spec;

pub use resolver::{HOSTED_PREFIX, RULES, Rule, classify, is_uuid, resolve};
pub use spec::{DEFAULT_REF, HOSTED_SITE, HostedRef, Specifier};

#[cfg(test)]
mod tests;
