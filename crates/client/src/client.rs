//! Typed HTTP client covering every API operation.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::types::{
    Employee, EmployeeFilter, EmployeePayload, Page, Vaccine, VaccineFilter, VaccinePayload,
};

/// Request timeout applied to every call.
const TIMEOUT_SECS: u64 = 30;

/// Plain `{"message": ...}` acknowledgement body.
#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

/// HTTP client for the immunization API.
///
/// One method per endpoint. Calls are sequential single requests with no
/// retries or caching.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the API at `base_url`, with or without a
    /// trailing slash.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a response, mapping non-success statuses onto the error
    /// taxonomy.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(Into::into);
        }

        let body = response.bytes().await?;
        Err(ClientError::from_response_parts(status, &body))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.http.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.http.put(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn delete(&self, path: &str) -> ClientResult<String> {
        let response = self.http.delete(self.url(path)).send().await?;
        let body: MessageBody = Self::decode(response).await?;
        Ok(body.message)
    }

    async fn generate(&self, path: &str, quantity: i64) -> ClientResult<String> {
        let response = self
            .http
            .post(self.url(path))
            .query(&[("quantity", quantity)])
            .send()
            .await?;
        let body: MessageBody = Self::decode(response).await?;
        Ok(body.message)
    }

    // ========== Employees ==========

    /// List one page of employees with optional substring filters.
    pub async fn list_employees(
        &self,
        page: i64,
        per_page: i64,
        filter: &EmployeeFilter,
    ) -> ClientResult<Page<Employee>> {
        let response = self
            .http
            .get(self.url("/employees"))
            .query(&[("page", page), ("per_page", per_page)])
            .query(filter)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Look up one employee by numeric id or 11-digit CPF.
    pub async fn get_employee(&self, key: &str) -> ClientResult<Employee> {
        self.get(&format!("/employees/{key}")).await
    }

    pub async fn create_employee(&self, payload: &EmployeePayload) -> ClientResult<Employee> {
        self.post_json("/employees", payload).await
    }

    /// Replace every field of the employee addressed by `key`.
    pub async fn update_employee(
        &self,
        key: &str,
        payload: &EmployeePayload,
    ) -> ClientResult<Employee> {
        self.put_json(&format!("/employees/{key}"), payload).await
    }

    /// Delete an employee, returning the server acknowledgement message.
    pub async fn delete_employee(&self, key: &str) -> ClientResult<String> {
        self.delete(&format!("/employees/{key}")).await
    }

    /// Insert `quantity` synthetic employees, returning the summary message.
    pub async fn generate_employees(&self, quantity: i64) -> ClientResult<String> {
        self.generate("/employees/generate", quantity).await
    }

    // ========== Vaccines ==========

    /// List one page of vaccines with optional substring filters.
    pub async fn list_vaccines(
        &self,
        page: i64,
        per_page: i64,
        filter: &VaccineFilter,
    ) -> ClientResult<Page<Vaccine>> {
        let response = self
            .http
            .get(self.url("/vaccines"))
            .query(&[("page", page), ("per_page", per_page)])
            .query(filter)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn get_vaccine(&self, id: i64) -> ClientResult<Vaccine> {
        self.get(&format!("/vaccines/{id}")).await
    }

    pub async fn create_vaccine(&self, payload: &VaccinePayload) -> ClientResult<Vaccine> {
        self.post_json("/vaccines", payload).await
    }

    /// Replace every field of the vaccine addressed by `id`.
    pub async fn update_vaccine(&self, id: i64, payload: &VaccinePayload) -> ClientResult<Vaccine> {
        self.put_json(&format!("/vaccines/{id}"), payload).await
    }

    /// Delete a vaccine, returning the server acknowledgement message.
    ///
    /// Fails with `ClientError::Conflict` while employees still
    /// reference the record.
    pub async fn delete_vaccine(&self, id: i64) -> ClientResult<String> {
        self.delete(&format!("/vaccines/{id}")).await
    }

    /// Insert `quantity` synthetic vaccines, returning the summary message.
    pub async fn generate_vaccines(&self, quantity: i64) -> ClientResult<String> {
        self.generate("/vaccines/generate", quantity).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_the_base_url() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.url("/employees"), "http://localhost:8000/employees");
    }

    #[test]
    fn base_url_without_trailing_slash_is_kept() {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        assert_eq!(
            client.url("/vaccines/generate"),
            "http://localhost:8000/vaccines/generate"
        );
    }
}
