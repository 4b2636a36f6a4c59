//! Elasticsearch index backend.
//!
//! Embeddings are computed server-side by an ELSER inference endpoint
//! attached to the index; reranking uses a cross-encoder model through the
//! rescore API. This client only moves JSON over HTTP.

use super::{IndexSink, SearchHit};
use crate::chunking::ChunkRecord;
use crate::config::ElasticsearchSettings;
use crate::error::{Result, TekstError};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::{json, Value};
use tracing::debug;

/// Elasticsearch-backed chunk index.
pub struct ElasticIndex {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    index: String,
    inference_id: String,
    rerank_model_id: String,
    rescore_window: u32,
    query_weight: f64,
    rescore_query_weight: f64,
}

impl ElasticIndex {
    /// Build a client from settings, resolving endpoint/key from the
    /// environment where the config leaves them unset.
    pub fn from_settings(settings: &ElasticsearchSettings) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: settings.resolve_endpoint()?,
            api_key: settings.resolve_api_key(),
            index: settings.index.clone(),
            inference_id: settings.inference_id.clone(),
            rerank_model_id: settings.rerank_model_id.clone(),
            rescore_window: settings.rescore_window,
            query_weight: settings.query_weight,
            rescore_query_weight: settings.rescore_query_weight,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.endpoint.trim_end_matches('/'), path);
        let mut req = self.client.request(method, url);
        if let Some(key) = &self.api_key {
            req = req.header(AUTHORIZATION, format!("ApiKey {}", key));
        }
        req
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<Value> {
        let response = req.send().await?;
        let status = response.status();
        let body: Value = response.json().await?;

        if !status.is_success() {
            return Err(TekstError::Search(format!(
                "Elasticsearch returned {}: {}",
                status, body
            )));
        }
        Ok(body)
    }

    /// Build the per-video sparse-vector search body, optionally with a
    /// cross-encoder rescore block.
    fn search_body(&self, video_id: &str, query: &str, size: usize, rerank: bool) -> Value {
        let mut body = json!({
            "size": size,
            "query": {
                "bool": {
                    "must": {
                        "nested": {
                            "path": "text_semantic.inference.chunks",
                            "query": {
                                "sparse_vector": {
                                    "inference_id": self.inference_id,
                                    "field": "text_semantic.inference.chunks.embeddings",
                                    "query": query
                                }
                            },
                            "inner_hits": {
                                "size": 2,
                                "name": format!("{}.text_semantic", self.index),
                                "_source": ["text_semantic.inference.chunks.text"]
                            }
                        }
                    },
                    "filter": {
                        "term": { "video_id": video_id }
                    }
                }
            },
            "_source": ["start_time", "text"],
            "track_scores": true
        });

        if rerank {
            body["rescore"] = json!({
                "window_size": self.rescore_window,
                "query": {
                    "rescore_query": {
                        "inference": {
                            "model_id": self.rerank_model_id,
                            "inference_config": {
                                "cross_encoder": { "query": query }
                            },
                            "input_field": "text",
                            "target_field": "reranked_score"
                        }
                    },
                    "score_mode": "total",
                    "query_weight": self.query_weight,
                    "rescore_query_weight": self.rescore_query_weight
                }
            });
        }

        body
    }

    /// Body of the unique-video-IDs aggregation.
    fn video_ids_body() -> Value {
        json!({
            "size": 0,
            "aggs": {
                "unique_video_ids": {
                    "terms": { "field": "video_id", "size": 10000 }
                }
            }
        })
    }

    /// Pull `(score, start_time, text)` rows out of a search response.
    fn parse_hits(response: &Value) -> Vec<SearchHit> {
        let Some(hits) = response["hits"]["hits"].as_array() else {
            return Vec::new();
        };

        hits.iter()
            .filter_map(|hit| {
                let source = &hit["_source"];
                Some(SearchHit {
                    score: hit["_score"].as_f64()?,
                    start_time: source["start_time"].as_f64()?,
                    text: source["text"].as_str()?.to_string(),
                })
            })
            .collect()
    }

    async fn run_search(&self, body: Value) -> Result<Vec<SearchHit>> {
        debug!("Search request: {}", body);
        let response = self
            .send(
                self.request(reqwest::Method::POST, &format!("{}/_search", self.index))
                    .json(&body),
            )
            .await?;
        Ok(Self::parse_hits(&response))
    }
}

#[async_trait]
impl IndexSink for ElasticIndex {
    async fn ingest(&self, records: &[ChunkRecord]) -> Result<usize> {
        let mut indexed = 0;
        for record in records {
            self.send(
                self.request(reqwest::Method::POST, &format!("{}/_doc", self.index))
                    .json(record),
            )
            .await?;
            indexed += 1;
        }
        debug!("Ingested {} documents into {}", indexed, self.index);
        Ok(indexed)
    }

    async fn search(&self, video_id: &str, query: &str, size: usize) -> Result<Vec<SearchHit>> {
        self.run_search(self.search_body(video_id, query, size, false))
            .await
    }

    async fn rerank_search(
        &self,
        video_id: &str,
        query: &str,
        size: usize,
    ) -> Result<Vec<SearchHit>> {
        self.run_search(self.search_body(video_id, query, size, true))
            .await
    }

    async fn list_video_ids(&self) -> Result<Vec<String>> {
        let response = self
            .send(
                self.request(reqwest::Method::POST, &format!("{}/_search", self.index))
                    .json(&Self::video_ids_body()),
            )
            .await?;

        let buckets = response["aggregations"]["unique_video_ids"]["buckets"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        Ok(buckets
            .iter()
            .filter_map(|bucket| bucket["key"].as_str().map(|s| s.to_string()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_index() -> ElasticIndex {
        let settings = ElasticsearchSettings {
            endpoint: Some("https://localhost:9200".to_string()),
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        ElasticIndex::from_settings(&settings).unwrap()
    }

    #[test]
    fn test_search_body_shape() {
        let body = test_index().search_body("dQw4w9WgXcQ", "guitar solo", 10, false);

        let sparse = &body["query"]["bool"]["must"]["nested"]["query"]["sparse_vector"];
        assert_eq!(sparse["inference_id"], "my-elser-endpoint");
        assert_eq!(
            sparse["field"],
            "text_semantic.inference.chunks.embeddings"
        );
        assert_eq!(sparse["query"], "guitar solo");

        assert_eq!(
            body["query"]["bool"]["filter"]["term"]["video_id"],
            "dQw4w9WgXcQ"
        );
        assert_eq!(body["_source"], serde_json::json!(["start_time", "text"]));
        assert_eq!(body["track_scores"], true);
        assert!(body.get("rescore").is_none());
    }

    #[test]
    fn test_rerank_body_has_rescore_block() {
        let body = test_index().search_body("dQw4w9WgXcQ", "guitar solo", 10, true);

        let rescore = &body["rescore"];
        assert_eq!(rescore["window_size"], 50);
        assert_eq!(
            rescore["query"]["rescore_query"]["inference"]["model_id"],
            "cross-encoder__ms-marco-minilm-l-6-v2"
        );
        assert_eq!(rescore["query"]["query_weight"], 0.3);
        assert_eq!(rescore["query"]["rescore_query_weight"], 0.7);
    }

    #[test]
    fn test_parse_hits() {
        let response = serde_json::json!({
            "hits": {
                "hits": [
                    {"_score": 5.2, "_source": {"start_time": 12.5, "text": "first"}},
                    {"_score": 3.1, "_source": {"start_time": 80.0, "text": "second"}},
                    {"_score": null, "_source": {"start_time": 1.0, "text": "unscored"}}
                ]
            }
        });

        let hits = ElasticIndex::parse_hits(&response);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].score, 5.2);
        assert_eq!(hits[0].start_time, 12.5);
        assert_eq!(hits[1].text, "second");
    }

    #[test]
    fn test_parse_hits_empty_response() {
        assert!(ElasticIndex::parse_hits(&serde_json::json!({})).is_empty());
    }
}
