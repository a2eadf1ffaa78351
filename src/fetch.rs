//! HTTP boundary: the catalog endpoint and the per-query file endpoint.
//!
//! Both fetches are plain GETs with a bounded timeout. Failures surface as
//! [`RankingError::Transport`] / [`RankingError::Status`] and are never
//! retried here; retry and memoization policy belong to the caller.

use std::time::Duration;

use log::info;
use reqwest::blocking::Client;
use url::Url;

use crate::catalog::Catalog;
use crate::error::RankingError;

pub const CATALOG_URL: &str = "https://www3.bcb.gov.br/rdrweb/rest/ext/ranking";
pub const RANKING_FILE_URL: &str = "https://www3.bcb.gov.br/rdrweb/rest/ext/ranking/arquivo";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The four query parameters the upstream API fixes for a report file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub tipo: String,
    pub ano: String,
    pub periodicidade: String,
    pub periodo: String,
}

/// Raw bytes of one fetched report plus the declared content type, if any.
#[derive(Debug, Clone)]
pub struct RawPayload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self, RankingError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RankingError::Client)?;
        Ok(Self { client })
    }

    pub fn catalog(&self) -> Result<Catalog, RankingError> {
        let body = self.get_text(CATALOG_URL)?;
        Catalog::parse(&body)
    }

    pub fn ranking_file(&self, query: &ReportQuery) -> Result<RawPayload, RankingError> {
        let url = ranking_file_url(query);
        info!("fetching report file {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| RankingError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(RankingError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .map_err(|source| RankingError::Transport {
                url: url.to_string(),
                source,
            })?
            .to_vec();
        info!("received {} byte(s)", bytes.len());
        Ok(RawPayload {
            bytes,
            content_type,
        })
    }

    fn get_text(&self, url: &str) -> Result<String, RankingError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| RankingError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(RankingError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().map_err(|source| RankingError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

/// Builds the file-endpoint URL for one query. Parameter order matches the
/// upstream convention (`ano`, `periodicidade`, `periodo`, `tipo`).
pub fn ranking_file_url(query: &ReportQuery) -> Url {
    let mut url = Url::parse(RANKING_FILE_URL).expect("static endpoint URL");
    url.query_pairs_mut()
        .append_pair("ano", &query.ano)
        .append_pair("periodicidade", &query.periodicidade)
        .append_pair("periodo", &query.periodo)
        .append_pair("tipo", &query.tipo);
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_url_interpolates_all_four_parameters() {
        let url = ranking_file_url(&ReportQuery {
            tipo: "Consórcio".to_string(),
            ano: "2024".to_string(),
            periodicidade: "TRIMESTRAL".to_string(),
            periodo: "1".to_string(),
        });
        assert_eq!(
            url.as_str(),
            "https://www3.bcb.gov.br/rdrweb/rest/ext/ranking/arquivo\
             ?ano=2024&periodicidade=TRIMESTRAL&periodo=1&tipo=Cons%C3%B3rcio"
        );
    }

    #[test]
    fn file_url_percent_encodes_spaces() {
        let url = ranking_file_url(&ReportQuery {
            tipo: "Bancos e financeiras".to_string(),
            ano: "2023".to_string(),
            periodicidade: "ANUAL".to_string(),
            periodo: "1".to_string(),
        });
        assert!(url.query().unwrap().contains("tipo=Bancos+e+financeiras"));
    }
}
