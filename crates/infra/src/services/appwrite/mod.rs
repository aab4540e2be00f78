use crate::StoreError;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use tracing::error;

/// Lets Appwrite assign the document id
pub const UNIQUE_DOCUMENT_ID: &str = "unique()";

/// A single entry of the `queries[]` list understood by the Appwrite
/// documents API
#[derive(Debug, Clone, PartialEq)]
pub enum AppwriteQuery {
    Equal(String, Vec<String>),
    OrderAsc(String),
    OrderDesc(String),
    Limit(u32),
}

impl AppwriteQuery {
    pub fn equal(attribute: &str, value: &str) -> Self {
        Self::Equal(attribute.into(), vec![value.into()])
    }

    pub fn equal_any(attribute: &str, values: &[&str]) -> Self {
        Self::Equal(
            attribute.into(),
            values.iter().map(|v| v.to_string()).collect(),
        )
    }

    fn to_json(&self) -> String {
        let query = match self {
            Self::Equal(attribute, values) => {
                json!({ "method": "equal", "attribute": attribute, "values": values })
            }
            Self::OrderAsc(attribute) => json!({ "method": "orderAsc", "attribute": attribute }),
            Self::OrderDesc(attribute) => json!({ "method": "orderDesc", "attribute": attribute }),
            Self::Limit(limit) => json!({ "method": "limit", "values": [limit] }),
        };
        query.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct AppwriteErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
pub struct DocumentList<T> {
    pub total: u64,
    pub documents: Vec<T>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocumentBody<'a, B: Serialize> {
    document_id: &'a str,
    data: &'a B,
}

#[derive(Serialize)]
struct UpdateDocumentBody<'a, B: Serialize> {
    data: &'a B,
}

/// Server side client for the Appwrite databases REST API
pub struct AppwriteRestApi {
    client: Client,
    endpoint: String,
    project_id: String,
    api_key: Option<String>,
    database_id: String,
}

impl AppwriteRestApi {
    pub fn new(
        endpoint: String,
        project_id: String,
        api_key: Option<String>,
        database_id: String,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id,
            api_key,
            database_id,
        }
    }

    fn documents_url(&self, collection_id: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, collection_id
        )
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req.header("X-Appwrite-Project", &self.project_id);
        match &self.api_key {
            Some(key) => req.header("X-Appwrite-Key", key),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, method: &str, req: RequestBuilder) -> Result<T, StoreError> {
        let res = match self.authorize(req).send().await {
            Ok(res) => res,
            Err(e) => {
                error!(
                    "[Network Error] Appwrite API {} error. Error message: {:?}",
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
                .json::<AppwriteErrorBody>()
                .await
                .map(|body| body.message)
                .unwrap_or_default();
            error!(
                "[Unexpected Response] Appwrite API {} error. Status: {}, message: {}",
                method, status, message
            );
            return Err(StoreError::Backend {
                code: status.as_u16(),
                message,
            });
        }

        res.json::<T>().await.map_err(|e| {
            error!(
                "[Unexpected Response] Appwrite API {} error. Error message: {:?}",
                method, e
            );
            StoreError::Decode(e.to_string())
        })
    }

    pub async fn create_document<B: Serialize, T: DeserializeOwned>(
        &self,
        collection_id: &str,
        document_id: &str,
        data: &B,
    ) -> Result<T, StoreError> {
        let req = self
            .client
            .post(self.documents_url(collection_id))
            .json(&CreateDocumentBody { document_id, data });
        self.send("POST", req).await
    }

    pub async fn get_document<T: DeserializeOwned>(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Option<T>, StoreError> {
        let req = self
            .client
            .get(format!("{}/{}", self.documents_url(collection_id), document_id));
        match self.send("GET", req).await {
            Ok(doc) => Ok(Some(doc)),
            Err(StoreError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        collection_id: &str,
        queries: &[AppwriteQuery],
    ) -> Result<Vec<T>, StoreError> {
        let params = queries
            .iter()
            .map(|q| ("queries[]", q.to_json()))
            .collect::<Vec<_>>();
        let req = self
            .client
            .get(self.documents_url(collection_id))
            .query(&params);
        let list: DocumentList<T> = self.send("GET", req).await?;
        Ok(list.documents)
    }

    pub async fn update_document<B: Serialize, T: DeserializeOwned>(
        &self,
        collection_id: &str,
        document_id: &str,
        data: &B,
    ) -> Result<T, StoreError> {
        let req = self
            .client
            .patch(format!("{}/{}", self.documents_url(collection_id), document_id))
            .json(&UpdateDocumentBody { data });
        self.send("PATCH", req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_queries() {
        assert_eq!(
            AppwriteQuery::equal("patientId", "abc").to_json(),
            r#"{"attribute":"patientId","method":"equal","values":["abc"]}"#
        );
        assert_eq!(
            AppwriteQuery::OrderAsc("dueDate".into()).to_json(),
            r#"{"attribute":"dueDate","method":"orderAsc"}"#
        );
        assert_eq!(
            AppwriteQuery::Limit(1).to_json(),
            r#"{"method":"limit","values":[1]}"#
        );
    }

    #[test]
    fn trims_trailing_slash_of_endpoint() {
        let api = AppwriteRestApi::new(
            "https://cloud.appwrite.io/v1/".into(),
            "project".into(),
            None,
            "db".into(),
        );
        assert_eq!(
            api.documents_url("users"),
            "https://cloud.appwrite.io/v1/databases/db/collections/users/documents"
        );
    }
}
