//! Client for the registry's node-listing endpoint.

use super::cache::ResponseCache;
use super::node_list::NodeList;
use super::node_query::{Direction, NodeQuery};
use super::project::Project;
use super::release::Release;
use super::resilient_http::resilient_get;
use super::taxonomy::{CoreCompatibility, NodeType};
use crate::error::EvalError;
use url::Url;

pub(crate) const LOG_TARGET: &str = "  registry";

/// Default location of the node-listing endpoint.
pub const DEFAULT_REGISTRY_URL: &str = "https://www.drupal.org/api-d7/node.json";

/// Anything that can answer node queries.
///
/// [`RegistryClient`] is the production implementation; the aggregation
/// logic only depends on this trait.
pub trait NodeSource: Send + Sync {
    fn fetch_nodes(&self, query: &NodeQuery) -> impl Future<Output = Result<NodeList, EvalError>> + Send;
}

#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: reqwest::Client,
    endpoint: Url,
    cache: ResponseCache,
}

impl RegistryClient {
    pub fn new(endpoint: &str, cache: ResponseCache) -> crate::Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("drupal-eval/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, endpoint, cache })
    }

    /// The effective URL requested for `query`.
    #[must_use]
    pub fn request_url(&self, query: &NodeQuery) -> Url {
        let mut url = self.endpoint.clone();
        if query.pairs().next().is_some() {
            let _ = url.query_pairs_mut().extend_pairs(query.pairs());
        }
        url
    }

    /// Looks up a project by machine name, returning the first match.
    pub async fn get_project(&self, machine_name: &str) -> Result<Project, EvalError> {
        let query = NodeQuery::new().machine_name(machine_name);
        let list = self.fetch_nodes(&query).await?;

        let project = list.first_item::<Project>()?.ok_or_else(|| EvalError::ProjectNotFound {
            name: machine_name.to_string(),
        })?;

        log::debug!(target: LOG_TARGET, "Found project '{}' (nid {})", project.machine_name, project.nid);
        Ok(project)
    }

    /// Returns a project's releases for one core line, newest first.
    pub async fn get_project_releases(&self, project: &Project, compat: CoreCompatibility) -> Result<Vec<Release>, EvalError> {
        if !project.has_releases {
            return Ok(Vec::new());
        }

        let query = NodeQuery::new()
            .release_project(project.nid)
            .node_type(NodeType::ProjectRelease)
            .core_compatibility(compat)
            .sort("created", Direction::Descending);

        let releases = self.fetch_nodes(&query).await?.items::<Release>()?;
        log::debug!(target: LOG_TARGET, "Found {} {compat} releases of '{}'", releases.len(), project.machine_name);
        Ok(releases)
    }
}

impl NodeSource for RegistryClient {
    async fn fetch_nodes(&self, query: &NodeQuery) -> Result<NodeList, EvalError> {
        let url = self.request_url(query);

        if let Some(mut list) = self.cache.load(&url) {
            list.source = url.to_string();
            return Ok(list);
        }

        log::debug!(target: LOG_TARGET, "GET {url}");
        let registry_error = |status: Option<u16>, reason: String| EvalError::Registry {
            url: url.to_string(),
            status,
            reason,
        };

        let resp = resilient_get(&self.client, url.as_str())
            .await
            .map_err(|e| registry_error(None, e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unexpected status").to_string();
            return Err(registry_error(Some(status.as_u16()), reason));
        }

        let mut list: NodeList = resp
            .json()
            .await
            .map_err(|e| registry_error(Some(status.as_u16()), format!("malformed response: {e}")))?;
        list.source = url.to_string();

        if let Err(e) = self.cache.save(&url, &list) {
            log::debug!(target: LOG_TARGET, "Could not cache response for {url}: {e:#}");
        }

        Ok(list)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> RegistryClient {
        RegistryClient::new(&format!("{}/api-d7/node.json", server.uri()), ResponseCache::disabled()).unwrap()
    }

    #[test]
    fn request_url_carries_every_filter() {
        let client = RegistryClient::new(DEFAULT_REGISTRY_URL, ResponseCache::disabled()).unwrap();
        let url = client.request_url(&NodeQuery::new().machine_name("ctools").page(2));
        assert_eq!(
            url.as_str(),
            "https://www.drupal.org/api-d7/node.json?field_project_machine_name=ctools&page=2"
        );
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support network operations")]
    async fn get_project_returns_first_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api-d7/node.json"))
            .and(query_param("field_project_machine_name", "ctools"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "list": [
                    {"nid": "17866", "title": "Chaos Tool Suite", "field_project_machine_name": "ctools"},
                    {"nid": "1", "title": "Impostor", "field_project_machine_name": "ctools"},
                ]
            })))
            .mount(&server)
            .await;

        let project = client_for(&server).await.get_project("ctools").await.unwrap();
        assert_eq!(project.nid, 17866);
        assert_eq!(project.title, "Chaos Tool Suite");
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support network operations")]
    async fn get_project_reports_missing_project() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api-d7/node.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": []})))
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_project("nonexistent").await.unwrap_err();
        assert_eq!(err, EvalError::ProjectNotFound { name: "nonexistent".into() });
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support network operations")]
    async fn non_success_status_is_a_registry_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api-d7/node.json"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.fetch_nodes(&NodeQuery::new().machine_name("x")).await.unwrap_err();
        match err {
            EvalError::Registry { url, status, reason } => {
                assert!(url.ends_with("/api-d7/node.json?field_project_machine_name=x"));
                assert_eq!(status, Some(403));
                assert_eq!(reason, "Forbidden");
            }
            other => panic!("expected a registry error, got {other:?}"),
        }
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support network operations")]
    async fn releases_are_requested_newest_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api-d7/node.json"))
            .and(query_param("type", "project_release"))
            .and(query_param("field_release_project", "42"))
            .and(query_param("taxonomy_vocabulary_6", "7234"))
            .and(query_param("sort", "created"))
            .and(query_param("direction", "DESC"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "list": [
                    {"field_release_version": "8.x-1.1", "field_release_version_major": "1", "created": "200"},
                    {"field_release_version": "8.x-1.0", "field_release_version_major": "1", "created": "100"},
                ]
            })))
            .mount(&server)
            .await;

        let project: Project = serde_json::from_value(json!({
            "nid": 42,
            "field_project_machine_name": "demo",
            "field_project_has_releases": "1",
        }))
        .unwrap();
        let releases = client_for(&server)
            .await
            .get_project_releases(&project, CoreCompatibility::Drupal8x)
            .await
            .unwrap();

        let versions: Vec<_> = releases.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(versions, ["8.x-1.1", "8.x-1.0"]);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support network operations")]
    async fn project_without_releases_is_not_queried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let project: Project = serde_json::from_value(json!({"nid": 42, "field_project_has_releases": false})).unwrap();
        let releases = client_for(&server)
            .await
            .get_project_releases(&project, CoreCompatibility::Drupal7x)
            .await
            .unwrap();
        assert!(releases.is_empty());
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support network operations")]
    async fn cached_response_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api-d7/node.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": [{"nid": "5"}]})))
            .expect(1)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(tmp.path(), core::time::Duration::from_secs(3600), chrono::Utc::now(), false);
        let client = RegistryClient::new(&format!("{}/api-d7/node.json", server.uri()), cache).unwrap();

        let query = NodeQuery::new().machine_name("cached");
        let first = client.fetch_nodes(&query).await.unwrap();
        let second = client.fetch_nodes(&query).await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(first.source, second.source);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support network operations")]
    async fn registries_sharing_a_cache_dir_stay_separate() {
        let first = MockServer::start().await;
        let second = MockServer::start().await;
        for (server, title) in [(&first, "From first"), (&second, "From second")] {
            Mock::given(method("GET"))
                .and(path("/api-d7/node.json"))
                .and(query_param("field_project_machine_name", "shared"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "list": [{"nid": "1", "title": title, "field_project_machine_name": "shared"}]
                })))
                .expect(1)
                .mount(server)
                .await;
        }

        let tmp = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(tmp.path(), core::time::Duration::from_secs(3600), chrono::Utc::now(), false);
        let a = RegistryClient::new(&format!("{}/api-d7/node.json", first.uri()), cache.clone()).unwrap();
        let b = RegistryClient::new(&format!("{}/api-d7/node.json", second.uri()), cache).unwrap();

        assert_eq!(a.get_project("shared").await.unwrap().title, "From first");
        assert_eq!(b.get_project("shared").await.unwrap().title, "From second");
    }
}
