//! Go module proxy abstraction: endpoint URL layout.

/// The public Go module proxy operated by the Go team.
pub const DEFAULT_PROXY_URL: &str = "https://proxy.golang.org";

/// A module proxy endpoint.
///
/// The proxy protocol serves, per module path, a latest-release record
/// (`/@latest`), a plain-text release listing (`/@v/list`), and per-release
/// `.info`, `.mod`, and `.zip` files under `/@v/`.
#[derive(Debug, Clone)]
pub struct GoProxy {
    pub url: String,
}

impl GoProxy {
    /// Build a proxy endpoint from a base URL, trimming any trailing slash.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
        }
    }

    /// The default public proxy.
    pub fn default_proxy() -> Self {
        Self::new(DEFAULT_PROXY_URL)
    }

    /// URL of the latest-release record for a module.
    pub fn latest_url(&self, path: &str) -> String {
        format!("{}/{}/@latest", self.url, path)
    }

    /// URL of the plain-text release listing for a module.
    pub fn list_url(&self, path: &str) -> String {
        format!("{}/{}/@v/list", self.url, path)
    }

    /// URL of the release metadata record.
    pub fn info_url(&self, path: &str, release: &str) -> String {
        format!("{}/{}/@v/{}.info", self.url, path, release)
    }

    /// URL of the `go.mod` manifest for a specific release.
    pub fn mod_url(&self, path: &str, release: &str) -> String {
        format!("{}/{}/@v/{}.mod", self.url, path, release)
    }

    /// URL of the source archive for a specific release.
    pub fn zip_url(&self, path: &str, release: &str) -> String {
        format!("{}/{}/@v/{}.zip", self.url, path, release)
    }
}

impl Default for GoProxy {
    fn default() -> Self {
        Self::default_proxy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_trimmed() {
        let proxy = GoProxy::new("https://proxy.example.com/");
        assert_eq!(proxy.url, "https://proxy.example.com");
    }

    #[test]
    fn latest_url_format() {
        let proxy = GoProxy::default_proxy();
        assert_eq!(
            proxy.latest_url("github.com/gin-gonic/gin"),
            "https://proxy.golang.org/github.com/gin-gonic/gin/@latest"
        );
    }

    #[test]
    fn list_url_format() {
        let proxy = GoProxy::default_proxy();
        assert_eq!(
            proxy.list_url("github.com/gin-gonic/gin"),
            "https://proxy.golang.org/github.com/gin-gonic/gin/@v/list"
        );
    }

    #[test]
    fn mod_url_format() {
        let proxy = GoProxy::default_proxy();
        assert_eq!(
            proxy.mod_url("github.com/gin-gonic/gin", "v1.9.1"),
            "https://proxy.golang.org/github.com/gin-gonic/gin/@v/v1.9.1.mod"
        );
    }

    #[test]
    fn zip_and_info_url_format() {
        let proxy = GoProxy::default_proxy();
        assert_eq!(
            proxy.zip_url("golang.org/x/text", "v0.14.0"),
            "https://proxy.golang.org/golang.org/x/text/@v/v0.14.0.zip"
        );
        assert_eq!(
            proxy.info_url("golang.org/x/text", "v0.14.0"),
            "https://proxy.golang.org/golang.org/x/text/@v/v0.14.0.info"
        );
    }
}
