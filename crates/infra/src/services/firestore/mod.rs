mod value;

pub use value::{FirestoreDocument, Value};

use crate::StoreError;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use tracing::error;

const FIRESTORE_API_BASE_URL: &str = "https://firestore.googleapis.com/v1";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldOperator {
    Equal,
    In,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub op: FieldOperator,
    pub value: Value,
}

/// Subset of the Firestore structured query used by the repositories
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredQuery {
    pub collection: String,
    pub filters: Vec<FieldFilter>,
    pub order_by: Option<(String, Direction)>,
    pub limit: Option<u32>,
}

impl StructuredQuery {
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    pub fn filter(mut self, field: &str, op: FieldOperator, value: Value) -> Self {
        self.filters.push(FieldFilter {
            field: field.into(),
            op,
            value,
        });
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn to_json(&self) -> serde_json::Value {
        let mut query = json!({ "from": [{ "collectionId": self.collection }] });

        let mut filters = self
            .filters
            .iter()
            .map(|f| {
                let op = match f.op {
                    FieldOperator::Equal => "EQUAL",
                    FieldOperator::In => "IN",
                };
                json!({
                    "fieldFilter": {
                        "field": { "fieldPath": f.field },
                        "op": op,
                        "value": f.value,
                    }
                })
            })
            .collect::<Vec<_>>();
        let filter = match filters.len() {
            0 => None,
            1 => filters.pop(),
            _ => Some(json!({ "compositeFilter": { "op": "AND", "filters": filters } })),
        };
        if let Some(filter) = filter {
            query["where"] = filter;
        }

        if let Some((field, direction)) = &self.order_by {
            let direction = match direction {
                Direction::Ascending => "ASCENDING",
                Direction::Descending => "DESCENDING",
            };
            query["orderBy"] = json!([{ "field": { "fieldPath": field }, "direction": direction }]);
        }
        if let Some(limit) = self.limit {
            query["limit"] = json!(limit);
        }

        json!({ "structuredQuery": query })
    }
}

#[derive(Debug, Deserialize)]
struct FirestoreErrorBody {
    error: FirestoreErrorDetails,
}

#[derive(Debug, Deserialize)]
struct FirestoreErrorDetails {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunQueryResponseItem {
    #[serde(default)]
    document: Option<FirestoreDocument>,
}

#[derive(Serialize)]
struct DocumentBody<'a> {
    fields: &'a HashMap<String, Value>,
}

/// Client for the Cloud Firestore REST API
pub struct FirestoreRestApi {
    client: Client,
    project_id: String,
    api_key: Option<String>,
    access_token: Option<String>,
}

impl FirestoreRestApi {
    pub fn new(project_id: String, api_key: Option<String>, access_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            project_id,
            api_key,
            access_token,
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            FIRESTORE_API_BASE_URL, self.project_id
        )
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let req = match &self.api_key {
            Some(key) => req.query(&[("key", key)]),
            None => req,
        };
        match &self.access_token {
            Some(token) => req.header("authorization", format!("Bearer {}", token)),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, method: &str, req: RequestBuilder) -> Result<T, StoreError> {
        let res = match self.authorize(req).send().await {
            Ok(res) => res,
            Err(e) => {
                error!(
                    "[Network Error] Firestore API {} error. Error message: {:?}",
                    method, e
                );
                return Err(e.into());
            }
        };

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound);
        }
        if !status.is_success() {
            let message = res
                .json::<FirestoreErrorBody>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_default();
            error!(
                "[Unexpected Response] Firestore API {} error. Status: {}, message: {}",
                method, status, message
            );
            return Err(StoreError::Backend {
                code: status.as_u16(),
                message,
            });
        }

        res.json::<T>().await.map_err(|e| {
            error!(
                "[Unexpected Response] Firestore API {} error. Error message: {:?}",
                method, e
            );
            StoreError::Decode(e.to_string())
        })
    }

    /// Firestore generates the document id when `document_id` is `None`
    pub async fn create_document(
        &self,
        collection: &str,
        document_id: Option<&str>,
        fields: &HashMap<String, Value>,
    ) -> Result<FirestoreDocument, StoreError> {
        let mut req = self
            .client
            .post(format!("{}/{}", self.documents_url(), collection))
            .json(&DocumentBody { fields });
        if let Some(id) = document_id {
            req = req.query(&[("documentId", id)]);
        }
        self.send("POST", req).await
    }

    pub async fn get_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Option<FirestoreDocument>, StoreError> {
        let req = self
            .client
            .get(format!("{}/{}/{}", self.documents_url(), collection, document_id));
        match self.send("GET", req).await {
            Ok(doc) => Ok(Some(doc)),
            Err(StoreError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Updates only the given fields of an existing document
    pub async fn patch_document(
        &self,
        collection: &str,
        document_id: &str,
        fields: &HashMap<String, Value>,
    ) -> Result<FirestoreDocument, StoreError> {
        let mut params = fields
            .keys()
            .map(|field| ("updateMask.fieldPaths", field.as_str()))
            .collect::<Vec<_>>();
        params.push(("currentDocument.exists", "true"));

        let req = self
            .client
            .patch(format!("{}/{}/{}", self.documents_url(), collection, document_id))
            .query(&params)
            .json(&DocumentBody { fields });
        self.send("PATCH", req).await
    }

    pub async fn run_query(&self, query: &StructuredQuery) -> Result<Vec<FirestoreDocument>, StoreError> {
        let req = self
            .client
            .post(format!("{}:runQuery", self.documents_url()))
            .json(&query.to_json());
        let items: Vec<RunQueryResponseItem> = self.send("POST", req).await?;
        Ok(items.into_iter().filter_map(|item| item.document).collect())
    }
}
