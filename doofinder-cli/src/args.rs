//! Command-line arguments shared by the binaries.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser};

use doofinder_ingest::batcher::DEFAULT_BATCH_SIZE;
use doofinder_ingest::loader::DEFAULT_WORKERS;
use doofinder_ingest::orchestrator::{IngestConfig, DEFAULT_INDEX};
use doofinder_repository::config::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_ZONE};
use doofinder_repository::ServiceConfig;
use doofinder_shared::types::search_request::{DEFAULT_PAGE, DEFAULT_SEARCH_RPP, DEFAULT_SIMILAR_RPP};
use doofinder_shared::{
    FacetSpec, Filters, ParamError, QueryName, SearchRequest, SimilarRequest, SortEntry,
    SuggestRequest,
};

/// Credentials and endpoint of the search engine.
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Search engine hashid
    #[arg(long, env = "DOOFINDER_HASHID")]
    pub hashid: String,

    /// API token
    #[arg(long, env = "DOOFINDER_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Search zone (eu1, us1)
    #[arg(long, default_value = DEFAULT_ZONE)]
    pub zone: String,

    /// Override the API root, e.g. for a staging host
    #[arg(long, env = "DOOFINDER_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds for index and query calls
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub timeout: u64,
}

impl ServiceArgs {
    pub fn service_config(&self) -> ServiceConfig {
        let config = ServiceConfig::new(&self.hashid, &self.token)
            .with_zone(&self.zone)
            .with_request_timeout(Duration::from_secs(self.timeout));
        match &self.base_url {
            Some(base_url) => config.with_base_url(base_url),
            None => config,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "df-ingest")]
#[command(about = "Import a product catalog into a Doofinder index", long_about = None)]
pub struct IngestCli {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// JSON file with the product list
    #[arg(long)]
    pub file: PathBuf,

    /// Number of concurrent uploads
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Products per upload batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Index to replace
    #[arg(long, default_value = DEFAULT_INDEX)]
    pub index: String,

    /// Write the import report as JSON to this file
    #[arg(long)]
    pub report_file: Option<PathBuf>,
}

impl IngestCli {
    pub fn ingest_config(&self) -> IngestConfig {
        IngestConfig {
            index: self.index.clone(),
            workers: self.workers,
            batch_size: self.batch_size,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "df-search")]
#[command(about = "Search products in Doofinder", long_about = None)]
pub struct SearchCli {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// Search query, or the product id with --similar
    #[arg(long)]
    pub query: String,

    /// Page number
    #[arg(long, default_value_t = DEFAULT_PAGE)]
    pub page: u32,

    /// Results per page (defaults to 20, or 10 with --similar)
    #[arg(long)]
    pub rpp: Option<u32>,

    /// Index to search in (e.g. product)
    #[arg(long)]
    pub index: Option<String>,

    /// JSON filter, e.g. '{"price":{"gte":100}}'
    #[arg(long)]
    pub filter: Option<String>,

    /// JSON sort, e.g. '[{"price":"asc"}]'
    #[arg(long)]
    pub sort: Option<String>,

    /// JSON facets, e.g. '[{"field":"brand","size":10}]'
    #[arg(long)]
    pub facets: Option<String>,

    /// Matching strategy: match_and, match_or or fuzzy
    #[arg(long)]
    pub query_name: Option<String>,

    /// Get search suggestions instead
    #[arg(long, conflicts_with = "similar")]
    pub suggest: bool,

    /// Find products similar to the product id given in --query
    #[arg(long)]
    pub similar: bool,

    /// Keep the queried product in --similar results
    #[arg(long, requires = "similar")]
    pub include_self: bool,
}

/// The query a `df-search` invocation resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchCommand {
    Search(SearchRequest),
    Suggest(SuggestRequest),
    Similar(SimilarRequest),
}

impl SearchCli {
    /// Build the request, validating the JSON parameters.
    pub fn command(&self) -> Result<SearchCommand, ParamError> {
        if self.suggest {
            let mut request = SuggestRequest::new(&self.query);
            if let Some(index) = &self.index {
                request = request.with_index(index);
            }
            return Ok(SearchCommand::Suggest(request));
        }

        let filters = self.filter.as_deref().map(str::parse::<Filters>).transpose()?;

        if self.similar {
            let mut request = SimilarRequest::new(&self.query)
                .with_rpp(self.rpp.unwrap_or(DEFAULT_SIMILAR_RPP))
                .with_exclude_self(!self.include_self);
            if let Some(filters) = filters {
                request = request.with_filters(filters);
            }
            return Ok(SearchCommand::Similar(request));
        }

        let mut request = SearchRequest::new(&self.query)
            .with_page(self.page)
            .with_rpp(self.rpp.unwrap_or(DEFAULT_SEARCH_RPP));
        if let Some(index) = &self.index {
            request = request.with_index(index);
        }
        if let Some(filters) = filters {
            request = request.with_filters(filters);
        }
        if let Some(sort) = &self.sort {
            request = request.with_sort(SortEntry::parse_list(sort)?);
        }
        if let Some(facets) = &self.facets {
            request = request.with_facets(FacetSpec::parse_list(facets)?);
        }
        if let Some(query_name) = &self.query_name {
            request = request.with_query_name(query_name.parse::<QueryName>()?);
        }
        Ok(SearchCommand::Search(request))
    }
}

#[derive(Parser, Debug)]
#[command(name = "df-bench")]
#[command(about = "Run a query benchmark file against a Doofinder index", long_about = None)]
pub struct BenchCli {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// JSON file with `{query_id, query}` entries
    #[arg(long)]
    pub queries_file: PathBuf,

    /// Where to write the collected result ids
    #[arg(long, default_value = "doofinder_results.json")]
    pub output_file: PathBuf,

    /// Results per query
    #[arg(long, default_value_t = crate::bench::DEFAULT_COUNT)]
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(args: &[&str]) -> SearchCli {
        let mut argv = vec!["df-search", "--hashid", "abc", "--token", "secret"];
        argv.extend_from_slice(args);
        SearchCli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_search_defaults() {
        let cli = search(&["--query", "mug"]);
        assert_eq!(cli.service.zone, "eu1");

        match cli.command().unwrap() {
            SearchCommand::Search(request) => {
                assert_eq!(request, SearchRequest::new("mug").with_page(1).with_rpp(20));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_search_with_params() {
        let cli = search(&[
            "--query",
            "mug",
            "--index",
            "product",
            "--filter",
            r#"{"brand":["acme"]}"#,
            "--sort",
            r#"[{"price":"desc"}]"#,
            "--query-name",
            "fuzzy",
        ]);

        let expected = SearchRequest::new("mug")
            .with_page(1)
            .with_rpp(20)
            .with_index("product")
            .with_filters(Filters::new().with_term("brand", "acme"))
            .with_sort(vec![SortEntry::desc("price")])
            .with_query_name(QueryName::Fuzzy);
        assert_eq!(cli.command().unwrap(), SearchCommand::Search(expected));
    }

    #[test]
    fn test_similar_uses_own_rpp_default() {
        let cli = search(&["--query", "sku-1", "--similar"]);
        match cli.command().unwrap() {
            SearchCommand::Similar(request) => {
                assert_eq!(request.product_id, "sku-1");
                assert_eq!(request.rpp, 10);
                assert!(request.exclude_self);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_suggest() {
        let cli = search(&["--query", "mu", "--suggest", "--index", "product"]);
        assert_eq!(
            cli.command().unwrap(),
            SearchCommand::Suggest(SuggestRequest::new("mu").with_index("product"))
        );
    }

    #[test]
    fn test_similar_include_self() {
        let cli = search(&["--query", "sku-1", "--similar", "--include-self", "--rpp", "4"]);
        match cli.command().unwrap() {
            SearchCommand::Similar(request) => {
                assert!(!request.exclude_self);
                assert_eq!(request.rpp, 4);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_include_self_requires_similar() {
        let result = SearchCli::try_parse_from([
            "df-search", "--hashid", "abc", "--token", "secret", "--query", "x", "--include-self",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_suggest_ignores_filter() {
        let cli = search(&["--query", "mu", "--suggest", "--filter", "{not json"]);
        assert_eq!(
            cli.command().unwrap(),
            SearchCommand::Suggest(SuggestRequest::new("mu"))
        );
    }

    #[test]
    fn test_timeout_flag() {
        let cli = search(&["--query", "mug", "--timeout", "5"]);
        let config = cli.service.service_config();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(search(&["--query", "mug"]).service.timeout, 30);
    }

    #[test]
    fn test_suggest_conflicts_with_similar() {
        let result = SearchCli::try_parse_from([
            "df-search", "--hashid", "abc", "--token", "secret", "--query", "x", "--suggest",
            "--similar",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_filter_is_rejected() {
        let cli = search(&["--query", "mug", "--filter", "{not json"]);
        assert!(matches!(
            cli.command(),
            Err(ParamError::InvalidJson { param: "filter", .. })
        ));
    }

    #[test]
    fn test_unknown_query_name_is_rejected() {
        let cli = search(&["--query", "mug", "--query-name", "exact"]);
        assert!(matches!(cli.command(), Err(ParamError::UnknownValue { .. })));
    }

    #[test]
    fn test_ingest_defaults() {
        let cli = IngestCli::try_parse_from([
            "df-ingest", "--hashid", "abc", "--token", "secret", "--file", "products.json",
        ])
        .unwrap();

        let config = cli.ingest_config();
        assert_eq!(config.index, "product");
        assert_eq!(config.workers, 5);
        assert_eq!(config.batch_size, 100);
        assert!(cli.report_file.is_none());
    }

    #[test]
    fn test_base_url_override() {
        let cli = search(&["--query", "mug", "--base-url", "http://localhost:8080"]);
        let config = cli.service.service_config();
        assert_eq!(
            config.api_root().unwrap().as_str(),
            "http://localhost:8080/6/abc"
        );
    }
}
