use crate::Result;
use crate::registry::resilient_get;
use ohno::bail;

const LOG_TARGET: &str = "   harness";

/// Default root of the projects' source repositories.
pub const DEFAULT_SOURCE_URL: &str = "https://git.drupalcode.org/project";

/// Token whose presence in a project's CI manifest signals downstream test-harness integration.
pub const DEFAULT_INTEGRATION_MARKER: &str = "ORCA_SUT_NAME";

/// Looks for the integration marker in a project's CI manifest.
#[derive(Debug, Clone)]
pub struct IntegrationCheck {
    client: reqwest::Client,
    base: String,
    marker: String,
}

impl IntegrationCheck {
    #[must_use]
    pub fn new(client: reqwest::Client, base: &str, marker: impl Into<String>) -> Self {
        Self {
            client,
            base: base.trim_end_matches('/').to_string(),
            marker: marker.into(),
        }
    }

    /// The CI manifest at the tag or branch named by `version`.
    ///
    /// Development tarballs carry no CI manifest, so `-dev` versions map to their branch.
    #[must_use]
    pub fn manifest_url(&self, name: &str, version: &str) -> String {
        let git_ref = version.strip_suffix("-dev").unwrap_or(version);
        format!("{}/{name}/raw/{git_ref}/.travis.yml", self.base)
    }

    /// Whether `name` at `version` runs in the shared test harness.
    ///
    /// A manifest that cannot be fetched counts as not integrated.
    pub async fn is_integrated(&self, name: &str, version: &str) -> bool {
        let url = self.manifest_url(name, version);
        match self.fetch(&url).await {
            Ok(text) => {
                let found = text.contains(&self.marker);
                log::debug!(target: LOG_TARGET, "'{}' {} in {url}", self.marker, if found { "found" } else { "not found" });
                found
            }
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Treating {name} {version} as not integrated: {e:#}");
                false
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let resp = resilient_get(&self.client, url).await?;
        let status = resp.status();
        if !status.is_success() {
            bail!("'{url}' returned {status}");
        }
        Ok(resp.text().await?)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn check_for(server: &MockServer) -> IntegrationCheck {
        IntegrationCheck::new(reqwest::Client::new(), &format!("{}/project", server.uri()), DEFAULT_INTEGRATION_MARKER)
    }

    #[test]
    fn manifest_url_drops_dev_suffix() {
        let check = IntegrationCheck::new(reqwest::Client::new(), DEFAULT_SOURCE_URL, DEFAULT_INTEGRATION_MARKER);
        assert_eq!(
            check.manifest_url("acquia_connector", "8.x-1.x-dev"),
            "https://git.drupalcode.org/project/acquia_connector/raw/8.x-1.x/.travis.yml"
        );
        assert_eq!(
            check.manifest_url("acquia_connector", "8.x-1.22"),
            "https://git.drupalcode.org/project/acquia_connector/raw/8.x-1.22/.travis.yml"
        );
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support network operations")]
    async fn marker_present() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/project/acquia_connector/raw/8.x-1.x/.travis.yml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("env:\n  global:\n    - ORCA_SUT_NAME=drupal/acquia_connector\n"))
            .mount(&server)
            .await;

        assert!(check_for(&server).is_integrated("acquia_connector", "8.x-1.x-dev").await);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support network operations")]
    async fn marker_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/project/ctools/raw/8.x-3.x/.travis.yml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("language: php\n"))
            .mount(&server)
            .await;

        assert!(!check_for(&server).is_integrated("ctools", "8.x-3.x-dev").await);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support network operations")]
    async fn missing_manifest_is_not_integrated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("ORCA_SUT_NAME"))
            .mount(&server)
            .await;

        assert!(!check_for(&server).is_integrated("ctools", "8.x-3.x-dev").await);
    }
}
