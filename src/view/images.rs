//! Image Host Allow-list
//!
//! Remote images may only be rendered from a fixed set of hostnames. Relative
//! same-origin paths (our own `/assets`) are always accepted.

use std::collections::HashSet;

use thiserror::Error;
use tracing::warn;
use url::Url;

use super::img_tag;

/// Hosts permitted when no `IMAGE_HOSTS` override is configured
pub const DEFAULT_IMAGE_HOSTS: [&str; 2] = ["drive.google.com", "u9a6wmr3as.ufs.sh"];

/// Reasons an image source is refused
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageRejection {
    #[error("image source {0:?} is not a valid URL")]
    Malformed(String),

    #[error("image scheme {0:?} is not allowed")]
    Scheme(String),

    #[error("image host {0:?} is not in the allow-list")]
    Host(String),
}

/// Static set of hostnames images may be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHostAllowList {
    hosts: HashSet<String>,
}

impl Default for ImageHostAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_HOSTS)
    }
}

impl ImageHostAllowList {
    /// Builds an allow-list; hostnames are compared case-insensitively.
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            hosts: hosts
                .into_iter()
                .map(|host| host.as_ref().trim().to_ascii_lowercase())
                .filter(|host| !host.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, host: &str) -> bool {
        self.hosts.contains(&host.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Validates an image source against the allow-list.
    ///
    /// # Rules
    ///
    /// * `/path` (but not the protocol-relative `//host/path`) is accepted.
    /// * Anything else must parse as an `http`/`https` URL whose host is in
    ///   the set.
    pub fn check(&self, src: &str) -> Result<(), ImageRejection> {
        if src.starts_with('/') && !src.starts_with("//") {
            return Ok(());
        }

        let url = Url::parse(src).map_err(|_| ImageRejection::Malformed(src.to_owned()))?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(ImageRejection::Scheme(other.to_owned())),
        }

        match url.host_str() {
            Some(host) if self.contains(host) => Ok(()),
            Some(host) => Err(ImageRejection::Host(host.to_owned())),
            None => Err(ImageRejection::Malformed(src.to_owned())),
        }
    }

    /// Returns `src` when it may be rendered, logging and dropping it otherwise.
    /// An empty source means "no image" and is dropped silently.
    pub fn permitted<'a>(&self, src: &'a str) -> Option<&'a str> {
        if src.is_empty() {
            return None;
        }

        match self.check(src) {
            Ok(()) => Some(src),
            Err(rejection) => {
                warn!(%rejection, "Omitting image from rendered output");
                None
            }
        }
    }

    /// Renders an `<img>` for an allowed source, or nothing at all.
    pub fn img(&self, src: &str, alt: &str, class: &str) -> String {
        self.permitted(src)
            .map(|allowed| img_tag(allowed, alt, class))
            .unwrap_or_default()
    }
}
